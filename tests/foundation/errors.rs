//! Integration tests for Error types
//!
//! Tests error construction, display, fatality, and the domain/internal split.

use wayfarer_foundation::{
    ActionError, Description, EntityId, Error, ErrorContext, ErrorKind, ExecutionError,
};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn calling_convention_names_handler_and_slot() {
    let err = Error::calling_convention("attack", 1, "actor", "effort");
    assert!(matches!(err.kind, ErrorKind::CallingConvention { slot: 1, .. }));
    let msg = format!("{err}");
    assert!(msg.contains("attack"));
    assert!(msg.contains("effort"));
}

#[test]
fn entity_not_found_shows_index() {
    let err = Error::entity_not_found(EntityId::new(42, 1));
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(_)));
    assert!(format!("{err}").contains("42"));
}

#[test]
fn context_travels_with_the_error() {
    let err = Error::internal("boom")
        .with_context(ErrorContext::new().with_source("dig").with_actor(EntityId::new(3, 0)));
    assert!(format!("{err}").contains("boom"));
    let context = err.context.expect("context attached");
    assert_eq!(format!("{context}"), "in dig (actor #3)");
}

// =============================================================================
// Fatality
// =============================================================================

#[test]
fn registration_and_config_errors_are_fatal() {
    assert!(Error::calling_convention("x", 0, "actor", "effort").is_fatal());
    assert!(Error::no_parser("colour").is_fatal());
    assert!(Error::config("frame").is_fatal());
    assert!(Error::new(ErrorKind::DuplicateAction("take".into())).is_fatal());
}

#[test]
fn runtime_errors_are_not_fatal() {
    assert!(!Error::internal("oops").is_fatal());
    assert!(!Error::entity_not_found(EntityId::new(1, 0)).is_fatal());
    assert!(!Error::new(ErrorKind::InductionIdle(EntityId::new(1, 0))).is_fatal());
}

// =============================================================================
// Execution Errors
// =============================================================================

fn domain() -> Result<(), ExecutionError> {
    Err(Description::new("take.fixed").with_name("item.fountain"))?;
    Ok(())
}

fn internal() -> Result<(), ExecutionError> {
    Err(Error::internal("lost thing"))?;
    Ok(())
}

#[test]
fn question_mark_sorts_failures() {
    match domain() {
        Err(ExecutionError::Action(ActionError { description })) => {
            assert_eq!(description.key, "take.fixed");
        }
        other => panic!("expected a domain failure, got {other:?}"),
    }
    assert!(matches!(internal(), Err(ExecutionError::Internal(_))));
}
