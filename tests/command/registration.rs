//! Registration integration tests
//!
//! Calling conventions are validated once, when an action is registered.

use wayfarer_command::{
    ActionRegistry, ActionSpec, ArgumentParserGroup, CommandParser, Response,
};
use wayfarer_foundation::{Description, ErrorKind, ParamType};

fn ok_spec(spec: ActionSpec) -> ActionSpec {
    spec.handler(|_, _| Ok(Response::new(Description::new("ok"))))
}

#[test]
fn full_convention_registers() {
    let mut registry = ActionRegistry::new();
    let descriptors = registry
        .register(ok_spec(
            ActionSpec::new("chop")
                .actor()
                .injected("axe")
                .param("tree", ParamType::thing())
                .effort(),
        ))
        .unwrap();
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].slots.len(), 4);
    assert!(registry.has_verb("chop"));
}

#[test]
fn out_of_order_slots_are_rejected_at_registration() {
    let bad = [
        ActionSpec::new("a").param("x", ParamType::thing()).actor(),
        ActionSpec::new("b").actor().effort().param("x", ParamType::thing()),
        ActionSpec::new("c").actor().param("x", ParamType::thing()).injected("axe"),
        ActionSpec::new("d").effort().effort(),
    ];
    for spec in bad {
        let mut registry = ActionRegistry::new();
        let err = registry.register(ok_spec(spec)).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::CallingConvention { .. }), "{err}");
        assert!(err.is_fatal());
        assert!(registry.is_empty());
    }
}

#[test]
fn enumerated_actions_need_a_variant_slot() {
    let mut registry = ActionRegistry::new();
    let err = registry
        .register(ok_spec(ActionSpec::enumerated("shop", &["shop.buy"]).actor()))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CallingConvention { .. }));

    let descriptors = registry
        .register(ok_spec(
            ActionSpec::enumerated("shop", &["shop.buy", "shop.sell"]).actor().variant(),
        ))
        .unwrap();
    let verbs: Vec<&str> = descriptors.iter().map(|d| d.verb.as_str()).collect();
    assert_eq!(verbs, ["shop.buy", "shop.sell"]);
}

#[test]
fn unknown_parameter_type_fails_at_parser_build() {
    let mut registry = ActionRegistry::new();
    registry
        .register(ok_spec(
            ActionSpec::new("paint").actor().param("colour", ParamType::token("colour")),
        ))
        .unwrap();
    let group = ArgumentParserGroup::new();
    let err = CommandParser::new(registry, group).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoParser(_)));
    assert!(err.is_fatal());
}
