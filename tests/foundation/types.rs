//! Integration tests for parameter types and effort

use wayfarer_foundation::{Effort, EntityId, ParamType, Value};

#[test]
fn thing_parameters_take_entities_only() {
    let ty = ParamType::thing_of("weapon");
    assert!(ty.accepts(&Value::Entity(EntityId::new(0, 0))));
    assert!(!ty.accepts(&Value::Text("sword".into())));
}

#[test]
fn literal_accepts_only_its_key() {
    let ty = ParamType::literal("word.to");
    assert!(ty.accepts(&Value::Token("word.to".into())));
    assert!(!ty.accepts(&Value::Token("word.with".into())));
}

#[test]
fn effort_scales_durations() {
    assert_eq!(Effort::Slow.scale(30), 60);
    assert_eq!(Effort::Normal.scale(30), 30);
    assert_eq!(Effort::Fast.scale(30), 15);
    assert_eq!(Effort::default(), Effort::Normal);
}
