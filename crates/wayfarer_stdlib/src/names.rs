//! The standard vocabulary: verbs, directions, keywords, and message
//! templates.

use wayfarer_foundation::NameStore;

/// Verb keys with their surface forms. The first form is the display form.
const VERBS: &[(&str, &[&str])] = &[
    ("look", &["look", "l", "look around"]),
    ("inventory", &["inventory", "inv", "i"]),
    ("take", &["take", "get", "grab", "pick up"]),
    ("drop", &["drop", "put down"]),
    ("give", &["give", "hand"]),
    ("go", &["go", "walk", "move"]),
    ("hide", &["hide"]),
    ("say", &["say", "shout"]),
    ("wait", &["wait", "rest"]),
    ("dig", &["dig"]),
    ("bandage", &["bandage", "patch up"]),
    ("attack", &["attack", "hit", "kill"]),
    ("search", &["search"]),
    ("list", &["list", "wares"]),
    ("sell", &["sell"]),
    ("shop.buy", &["buy", "purchase"]),
    ("shop.value", &["value", "appraise"]),
];

/// Members of the `direction` token set.
const DIRECTIONS: &[(&str, &[&str])] = &[
    ("dir.north", &["north", "n"]),
    ("dir.south", &["south", "s"]),
    ("dir.east", &["east", "e"]),
    ("dir.west", &["west", "w"]),
    ("dir.up", &["up", "u"]),
    ("dir.down", &["down", "d"]),
];

/// Effort modifiers and other keywords.
const KEYWORDS: &[(&str, &[&str])] = &[
    ("effort.slow", &["slowly", "slow", "carefully"]),
    ("effort.normal", &["normally"]),
    ("effort.fast", &["quickly", "fast", "hastily"]),
    ("word.to", &["to"]),
];

const TEMPLATES: &[(&str, &str)] = &[
    // Parse failures
    ("parse.empty", "Say something."),
    ("parse.unknown_verb", "I don't know how to \"{0}\"."),
    ("parse.no_match", "You don't see \"{0}\" here."),
    ("parse.missing", "What {0}?"),
    ("parse.extra", "I didn't understand \"{0}\"."),
    ("parse.wrong_kind", "The {0} is the wrong kind of thing."),
    ("parse.number_range", "That number is too large."),
    // Execution failures
    ("command.gone", "That is no longer here."),
    ("command.wrong_kind", "The {0} is the wrong kind of thing."),
    ("command.not_carried", "You aren't carrying the {0}."),
    ("action.dark", "It is too dark to do that."),
    ("action.no_power", "You are too tired for that ({0} power needed)."),
    ("action.missing", "You need a {0} for that."),
    ("action.broken", "Your {0} is broken."),
    ("action.nowhere", "You are nowhere at all."),
    ("error.internal", "Something went wrong."),
    // Look and inventory
    ("look.dark", "It is pitch dark."),
    ("look.room", "You are in the {0}. You see {*}."),
    ("look.room_empty", "You are in the {0}."),
    ("inventory.list", "You are carrying {*}."),
    ("inventory.empty", "You are empty-handed."),
    // Items
    ("take.done", "You take the {0}."),
    ("take.already", "You already have the {0}."),
    ("take.fixed", "The {0} won't budge."),
    ("take.seen", "The {0} takes the {1}."),
    ("drop.done", "You drop the {0}."),
    ("drop.seen", "The {0} drops the {1}."),
    ("give.done", "You give the {0} to the {1}."),
    ("give.received", "The {0} gives you the {1}."),
    ("give.refused", "The {0} can't take anything."),
    ("give.self", "You already have it."),
    // Movement and stealth
    ("go.no_exit", "You can't go {0} from here."),
    ("go.departs", "The {0} leaves {1}."),
    ("go.arrives", "The {0} arrives."),
    ("hide.done", "You slip into the shadows."),
    ("hide.already", "You are already hidden."),
    ("say.done", "You say, \"{0}\""),
    ("say.heard", "The {0} says, \"{1}\""),
    // Deferred work
    ("wait.start", "You settle in to wait."),
    ("wait.done", "You wait {0} moments."),
    ("wait.range", "You can wait between 1 and {0} moments."),
    ("dig.start", "You start digging."),
    ("dig.rock", "The ground here is solid rock."),
    ("dig.found", "You unearth a {0}!"),
    ("dig.nothing", "You dig a hole and find nothing."),
    ("search.start", "You begin searching the area."),
    ("search.round", "You keep searching."),
    ("search.found", "You discover a {0}!"),
    ("search.stopped", "You stop searching."),
    // Healing and combat
    ("bandage.done", "You bandage your wounds."),
    ("bandage.unhurt", "You aren't hurt."),
    ("attack.hits", "You hit the {0} for {1} damage."),
    ("attack.kills", "You strike down the {0}!"),
    ("attack.hit_by", "The {0} hits you for {1} damage."),
    ("attack.killed_by", "The {0} strikes you down!"),
    ("attack.self", "You think better of it."),
    ("attack.not_alive", "The {0} isn't something you can fight."),
    ("attack.already_dead", "The {0} is already dead."),
    // Trade
    ("shop.none", "Nobody here is trading."),
    ("shop.wares", "The {0} offers {*}."),
    ("shop.empty", "The {0} has nothing for sale."),
    ("shop.price", "The {0} costs {1} gold."),
    ("shop.poor", "You need {0} gold for that."),
    ("shop.bought", "You buy the {0} for {1} gold."),
    ("shop.sold", "You sell the {0} for {1} gold."),
    ("shop.worthless", "Nobody wants the {0}."),
    ("shop.broke", "The {0} can't afford it."),
];

/// Builds the standard name store.
///
/// Thing names are not included; worlds register their own.
#[must_use]
pub fn standard_names() -> NameStore {
    let mut names = NameStore::new();
    for (key, forms) in VERBS.iter().chain(KEYWORDS) {
        names.insert(key, forms);
    }
    for (key, forms) in DIRECTIONS {
        names.insert_member("direction", key, forms);
    }
    for (key, template) in TEMPLATES {
        names.insert_template(key, template);
    }
    names
}
