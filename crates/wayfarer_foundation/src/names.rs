//! Name lookup for parsing and rendering.
//!
//! A [`NameStore`] decouples the command pipeline from natural-language text.
//! Every verb, thing, direction, or keyword is known by a canonical key
//! (`"take"`, `"item.sword"`, `"dir.north"`), and the store maps that key to
//! the surface words a player may type for it. The first surface form
//! registered for a key is its display form.
//!
//! The store also holds message templates keyed the same way, used to render
//! [`Description`]s.

use std::collections::{HashMap, HashSet};

use crate::description::{Description, DescriptionArg};

/// Canonical keys mapped to synonyms, abbreviations, and message templates.
#[derive(Clone, Debug, Default)]
pub struct NameStore {
    /// Key -> surface forms, display form first.
    surfaces: HashMap<String, Vec<String>>,
    /// Lowercased surface phrase -> keys, in registration order.
    phrases: HashMap<String, Vec<String>>,
    /// Enumerated token set -> member keys, in registration order.
    sets: HashMap<String, Vec<String>>,
    /// Message key -> template with `{0}`-style placeholders.
    templates: HashMap<String, String>,
    /// Keys named like people, rendered without an article.
    proper: HashSet<String>,
    /// Longest registered phrase, in words.
    max_phrase_words: usize,
}

impl NameStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers surface forms for a key.
    ///
    /// May be called more than once for the same key; later forms are
    /// appended. Surface forms may be multi-word phrases.
    pub fn insert(&mut self, key: &str, forms: &[&str]) {
        let entry = self.surfaces.entry(key.to_string()).or_default();
        for form in forms {
            let phrase = normalize(form);
            if phrase.is_empty() {
                continue;
            }
            self.max_phrase_words = self.max_phrase_words.max(phrase.split(' ').count());
            entry.push((*form).to_string());
            let keys = self.phrases.entry(phrase).or_default();
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
        }
    }

    /// Registers surface forms for a proper name.
    ///
    /// Templates that put "the" in front of a placeholder drop it when the
    /// placeholder holds a proper name.
    pub fn insert_proper(&mut self, key: &str, forms: &[&str]) {
        self.insert(key, forms);
        self.proper.insert(key.to_string());
    }

    /// Returns whether `key` is a proper name.
    #[must_use]
    pub fn is_proper(&self, key: &str) -> bool {
        self.proper.contains(key)
    }

    /// Registers a key as a member of an enumerated token set, with its
    /// surface forms.
    pub fn insert_member(&mut self, set: &str, key: &str, forms: &[&str]) {
        self.insert(key, forms);
        let members = self.sets.entry(set.to_string()).or_default();
        if !members.iter().any(|k| k == key) {
            members.push(key.to_string());
        }
    }

    /// Registers a message template.
    pub fn insert_template(&mut self, key: &str, template: &str) {
        self.templates.insert(key.to_string(), template.to_string());
    }

    /// Returns whether any surface form or template is known for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.surfaces.contains_key(key) || self.templates.contains_key(key)
    }

    /// Returns the surface forms for a key.
    #[must_use]
    pub fn forms(&self, key: &str) -> &[String] {
        self.surfaces.get(key).map_or(&[], Vec::as_slice)
    }

    /// Returns the display form of a key, or the key itself when unknown.
    #[must_use]
    pub fn display<'a>(&'a self, key: &'a str) -> &'a str {
        self.forms(key).first().map_or(key, String::as_str)
    }

    /// Returns every key that `phrase` names.
    #[must_use]
    pub fn keys_for(&self, phrase: &str) -> &[String] {
        self.phrases
            .get(&normalize(phrase))
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the members of an enumerated token set.
    #[must_use]
    pub fn members(&self, set: &str) -> &[String] {
        self.sets.get(set).map_or(&[], Vec::as_slice)
    }

    /// Length, in words, of the longest registered surface form.
    #[must_use]
    pub const fn max_phrase_words(&self) -> usize {
        self.max_phrase_words
    }

    /// Returns whether `phrase` is a surface form of `key`.
    ///
    /// A key with no registered forms is matched by its own text.
    #[must_use]
    pub fn matches(&self, key: &str, phrase: &str) -> bool {
        let phrase = normalize(phrase);
        match self.surfaces.get(key) {
            Some(forms) => forms.iter().any(|f| normalize(f) == phrase),
            None => normalize(key) == phrase,
        }
    }

    /// Finds the longest surface form of `key` that prefixes `words`.
    ///
    /// Returns the number of words it covers.
    #[must_use]
    pub fn longest_match(&self, key: &str, words: &[&str]) -> Option<usize> {
        let limit = words.len().min(self.max_phrase_words.max(1));
        (1..=limit)
            .rev()
            .find(|&n| self.matches(key, &words[..n].join(" ")))
    }

    /// Renders a description through its template.
    ///
    /// `{0}`, `{1}`, ... are replaced by the matching argument. `{*}` is
    /// replaced by every argument after the last numbered placeholder used,
    /// joined with commas.
    ///
    /// Unknown keys render as the key itself followed by any arguments, so a
    /// missing template is visible rather than silent.
    #[must_use]
    pub fn render(&self, description: &Description) -> String {
        let args: Vec<String> = description
            .args
            .iter()
            .map(|arg| match arg {
                DescriptionArg::Name(key) => self.display(key).to_string(),
                DescriptionArg::Text(text) => text.clone(),
                DescriptionArg::Number(n) => n.to_string(),
            })
            .collect();

        let Some(template) = self.templates.get(&description.key) else {
            if args.is_empty() {
                return description.key.clone();
            }
            return format!("{} {}", description.key, args.join(" "));
        };

        let mut out = template.clone();
        let mut consumed = 0;
        for (i, arg) in args.iter().enumerate() {
            let placeholder = format!("{{{i}}}");
            if out.contains(&placeholder) {
                if matches!(&description.args[i], DescriptionArg::Name(key) if self.is_proper(key)) {
                    out = out
                        .replace(&format!("The {placeholder}"), arg)
                        .replace(&format!("the {placeholder}"), arg);
                }
                out = out.replace(&placeholder, arg);
                consumed = i + 1;
            }
        }
        if out.contains("{*}") {
            out = out.replace("{*}", &args[consumed..].join(", "));
        }
        out
    }
}

/// Lowercases and collapses whitespace so phrases compare word-by-word.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> NameStore {
        let mut names = NameStore::new();
        names.insert("take", &["take", "get", "grab"]);
        names.insert("item.sword", &["iron sword", "sword", "blade"]);
        names.insert_member("direction", "dir.north", &["north", "n"]);
        names.insert_member("direction", "dir.south", &["south", "s"]);
        names.insert_template("take.done", "You take the {0}.");
        names
    }

    #[test]
    fn display_is_first_form() {
        let names = store();
        assert_eq!(names.display("item.sword"), "iron sword");
        assert_eq!(names.display("unknown.key"), "unknown.key");
    }

    #[test]
    fn synonyms_resolve_to_keys() {
        let names = store();
        assert_eq!(names.keys_for("GET"), &["take".to_string()]);
        assert!(names.keys_for("fetch").is_empty());
        assert!(names.matches("item.sword", "Blade"));
        assert!(!names.matches("item.sword", "axe"));
    }

    #[test]
    fn longest_phrase_wins() {
        let names = store();
        assert_eq!(
            names.longest_match("item.sword", &["iron", "sword", "now"]),
            Some(2)
        );
        assert_eq!(names.longest_match("item.sword", &["sword"]), Some(1));
        assert_eq!(names.longest_match("item.sword", &["iron"]), None);
    }

    #[test]
    fn set_members_keep_order() {
        let names = store();
        assert_eq!(
            names.members("direction"),
            &["dir.north".to_string(), "dir.south".to_string()]
        );
        assert!(names.members("colour").is_empty());
    }

    #[test]
    fn render_substitutes_names() {
        let names = store();
        let text = names.render(&Description::new("take.done").with_name("item.sword"));
        assert_eq!(text, "You take the iron sword.");
    }

    #[test]
    fn render_list_placeholder() {
        let mut names = store();
        names.insert_template("look.room", "{0}. You see {*}.");
        names.insert("item.axe", &["axe"]);
        let text = names.render(
            &Description::new("look.room")
                .with_text("A hall")
                .with_name("item.sword")
                .with_name("item.axe"),
        );
        assert_eq!(text, "A hall. You see iron sword, axe.");
    }

    #[test]
    fn proper_names_drop_the_article() {
        let mut names = store();
        names.insert_proper("pc.1", &["Ada"]);
        names.insert_template("give.done", "You give the {0} to the {1}.");
        names.insert_template("say.heard", "The {0} says, \"{1}\"");
        assert!(names.is_proper("pc.1"));
        assert!(!names.is_proper("item.sword"));
        assert_eq!(
            names.render(&Description::new("give.done").with_name("item.sword").with_name("pc.1")),
            "You give the iron sword to Ada."
        );
        assert_eq!(
            names.render(&Description::new("say.heard").with_name("pc.1").with_text("hi")),
            "Ada says, \"hi\""
        );
        assert!(names.matches("pc.1", "ada"));
    }

    #[test]
    fn render_missing_template_shows_key() {
        let names = store();
        assert_eq!(names.render(&Description::new("nope")), "nope");
        assert_eq!(
            names.render(&Description::new("nope").with_number(2)),
            "nope 2"
        );
    }
}
