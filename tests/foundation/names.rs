//! Integration tests for the name store
//!
//! Tests surface forms, phrase matching, and template rendering.

use proptest::prelude::*;
use wayfarer_foundation::{Description, NameStore};

fn store() -> NameStore {
    let mut names = NameStore::new();
    names.insert("take", &["take", "get", "pick up"]);
    names.insert("item.sword", &["iron sword", "sword"]);
    names.insert("item.ring", &["silver ring", "ring"]);
    names.insert_member("direction", "dir.up", &["up", "u"]);
    names.insert_template("give.done", "You give the {0} to the {1}.");
    names.insert_template("inventory.list", "You are carrying {*}.");
    names
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn phrases_are_case_and_space_insensitive() {
    let names = store();
    assert!(names.matches("item.sword", "Iron   SWORD"));
    assert!(!names.matches("item.sword", "iron"));
    assert_eq!(names.keys_for("pick up"), &["take".to_string()]);
}

#[test]
fn keys_without_forms_match_themselves() {
    let names = store();
    assert!(names.matches("look", "look"));
    assert_eq!(names.display("look"), "look");
}

#[test]
fn longest_match_prefers_the_full_phrase() {
    let names = store();
    assert_eq!(names.longest_match("item.sword", &["iron", "sword", "now"]), Some(2));
    assert_eq!(names.longest_match("item.sword", &["sword", "iron"]), Some(1));
    assert_eq!(names.longest_match("item.sword", &["axe"]), None);
}

#[test]
fn set_members_are_listed() {
    let names = store();
    assert_eq!(names.members("direction"), &["dir.up".to_string()]);
    assert!(names.members("colour").is_empty());
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn render_mixes_names_and_text() {
    let names = store();
    let description = Description::new("give.done")
        .with_name("item.ring")
        .with_text("old man");
    assert_eq!(names.render(&description), "You give the silver ring to the old man.");
}

#[test]
fn render_list() {
    let names = store();
    let description = Description::new("inventory.list")
        .with_name("item.ring")
        .with_name("item.sword")
        .with_number(3);
    assert_eq!(names.render(&description), "You are carrying silver ring, iron sword, 3.");
}

#[test]
fn unknown_template_shows_key_and_args() {
    let names = store();
    let description = Description::new("mystery").with_number(7);
    assert_eq!(names.render(&description), "mystery 7");
}

proptest! {
    #[test]
    fn any_registered_form_resolves_back(word in "[a-z]{1,8}", extra in "[a-z]{1,8}") {
        let mut names = NameStore::new();
        names.insert("thing.x", &[&word, &format!("{word} {extra}")]);
        prop_assert!(names.keys_for(&word).contains(&"thing.x".to_string()));
        let phrase = format!("{word} {extra}");
        let words: Vec<&str> = phrase.split(' ').collect();
        prop_assert_eq!(names.longest_match("thing.x", &words), Some(2));
    }
}
