//! Parsing integration tests
//!
//! Tests candidate matching, failure merging, and cursor restarts.

use proptest::prelude::*;
use wayfarer_command::{
    ActionRegistry, ActionSpec, ArgumentParserGroup, CommandParser, Cursor, FailureReason,
    ParseContext, ParserResult, Response,
};
use wayfarer_foundation::{Description, EntityId, NameStore, ParamType, Value};
use wayfarer_stdlib::names::standard_names;
use wayfarer_world::{Thing, World};

struct Scene {
    world: World,
    names: NameStore,
    hero: EntityId,
    sword: EntityId,
}

impl Scene {
    fn new() -> Self {
        let mut names = standard_names();
        names.insert("item.sword", &["iron sword", "sword"]);
        names.insert("item.ring", &["ring"]);
        names.insert("npc.smith", &["smith"]);

        let mut world = World::new(8);
        let hall = world.spawn(Thing::room("room.hall").lit()).unwrap();
        let hero = world.spawn(Thing::actor("pc.hero").at(hall)).unwrap();
        let sword = world.spawn(Thing::item("item.sword").at(hall)).unwrap();
        world.spawn(Thing::item("item.ring").hidden().at(hall)).unwrap();
        world.spawn(Thing::actor("npc.smith").at(hall)).unwrap();
        Self {
            world,
            names,
            hero,
            sword,
        }
    }

    fn ctx(&self) -> ParseContext<'_> {
        ParseContext {
            actor: self.hero,
            world: &self.world,
            names: &self.names,
        }
    }
}

fn parser(specs: Vec<ActionSpec>) -> CommandParser {
    let mut registry = ActionRegistry::new();
    for spec in specs {
        registry
            .register(spec.handler(|_, _| Ok(Response::new(Description::new("ok")))))
            .unwrap();
    }
    CommandParser::new(registry, ArgumentParserGroup::standard()).unwrap()
}

/// Two actions on one verb: the first wants quoted text, the second a thing.
fn text_or_thing() -> CommandParser {
    parser(vec![
        ActionSpec::new("inscribe")
            .verb("take")
            .actor()
            .param("words", ParamType::Text { greedy: false })
            .priority(1),
        ActionSpec::new("take")
            .actor()
            .param("item", ParamType::thing())
            .priority(2),
    ])
}

// =============================================================================
// Candidate Matching
// =============================================================================

#[test]
fn empty_input_is_rejected() {
    let scene = Scene::new();
    for line in ["", "   ", "!?"] {
        match text_or_thing().parse(line, &scene.ctx()).unwrap() {
            ParserResult::Failure(failure) => {
                assert_eq!(failure.reason, FailureReason::Syntax);
                assert_eq!(failure.detail.key, "parse.empty");
            }
            ParserResult::Success(cmd) => panic!("`{line}` parsed as {}", cmd.action.name),
        }
    }
}

#[test]
fn word_rejected_by_text_binds_to_thing() {
    let scene = Scene::new();
    let cmd = text_or_thing()
        .parse("take sword", &scene.ctx())
        .unwrap()
        .command()
        .unwrap();
    assert_eq!(cmd.action.name, "take");
    assert_eq!(cmd.arguments, vec![Value::Entity(scene.sword)]);
}

#[test]
fn quoted_word_binds_to_text() {
    let scene = Scene::new();
    let cmd = text_or_thing()
        .parse("take \"Sword\"", &scene.ctx())
        .unwrap()
        .command()
        .unwrap();
    assert_eq!(cmd.action.name, "inscribe");
    assert_eq!(cmd.arguments, vec![Value::Text("Sword".into())]);
}

#[test]
fn known_verb_failure_is_mismatch() {
    let scene = Scene::new();
    let result = text_or_thing().parse("take unicorn", &scene.ctx()).unwrap();
    assert_eq!(result.reason(), Some(FailureReason::Mismatch));

    let result = text_or_thing().parse("juggle sword", &scene.ctx()).unwrap();
    assert_eq!(result.reason(), Some(FailureReason::Syntax));
}

#[test]
fn hidden_things_cannot_be_named() {
    let scene = Scene::new();
    let result = text_or_thing().parse("take ring", &scene.ctx()).unwrap();
    assert_eq!(result.reason(), Some(FailureReason::Mismatch));
}

#[test]
fn category_mismatch_gives_a_specific_detail() {
    let scene = Scene::new();
    let parser = parser(vec![
        ActionSpec::new("wield")
            .actor()
            .param("weapon", ParamType::thing_of("weapon")),
    ]);
    let failure = match parser.parse("wield smith", &scene.ctx()).unwrap() {
        ParserResult::Failure(failure) => failure,
        ParserResult::Success(_) => panic!("a smith is not a weapon"),
    };
    assert_eq!(failure.reason, FailureReason::Mismatch);
    assert_eq!(failure.detail.key, "parse.wrong_kind");
}

#[test]
fn parsing_never_touches_the_world() {
    let scene = Scene::new();
    let before = scene.world.clone();
    let parser = text_or_thing();
    for line in ["take sword", "take unicorn", "take", "take sword sword"] {
        let _ = parser.parse(line, &scene.ctx()).unwrap();
    }
    assert_eq!(before.len(), scene.world.len());
    assert_eq!(scene.world.location_of(scene.sword), before.location_of(scene.sword));
}

// =============================================================================
// Cursor Restarts
// =============================================================================

fn any_param() -> impl Strategy<Value = ParamType> {
    prop_oneof![
        Just(ParamType::thing()),
        Just(ParamType::thing_of("weapon")),
        Just(ParamType::stock()),
        Just(ParamType::Number),
        Just(ParamType::Text { greedy: false }),
        Just(ParamType::token("direction")),
        Just(ParamType::literal("word.to")),
    ]
}

proptest! {
    /// A parser that does not match leaves the cursor where it found it, so
    /// the next candidate starts from the same words.
    #[test]
    fn failed_parse_leaves_cursor_untouched(
        words in prop::collection::vec("[a-z]{1,6}|sword|iron|north|to|[0-9]{1,3}", 0..5),
        ty in any_param(),
    ) {
        let scene = Scene::new();
        let group = ArgumentParserGroup::standard();
        let line = words.join(" ");
        let mut cursor = Cursor::from_line(&line);
        let before = cursor.remaining().to_vec();

        match group.parse(&ty, &mut cursor, &scene.ctx()) {
            Ok(Some(value)) => prop_assert!(ty.accepts(&value)),
            Ok(None) | Err(_) => prop_assert_eq!(cursor.remaining(), before.as_slice()),
        }
    }

    /// Parsing the same line twice gives the same answer.
    #[test]
    fn parsing_is_repeatable(words in prop::collection::vec("take|get|sword|iron|ring|quickly|[a-z]{1,5}", 0..5)) {
        let scene = Scene::new();
        let parser = text_or_thing();
        let line = words.join(" ");
        let first = parser.parse(&line, &scene.ctx()).unwrap();
        let second = parser.parse(&line, &scene.ctx()).unwrap();
        match (first, second) {
            (ParserResult::Success(a), ParserResult::Success(b)) => {
                prop_assert_eq!(a.action.name.clone(), b.action.name.clone());
                prop_assert_eq!(a.arguments, b.arguments);
            }
            (ParserResult::Failure(a), ParserResult::Failure(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "results differ for `{}`", line),
        }
    }
}
