//! End-to-end controller scenarios.

use switchboard_core::{
    ControllerError, ControllerOptions, ErrorKind, Rejection, StateController, StateInput,
    StateSpec,
};

use crate::common::{active_count, controller, init_tracing, multiple, single, specs, state};

#[test]
fn second_activation_under_single_is_rejected() {
    init_tracing();
    let mut controller = controller(&["a", "b"], single());

    controller.activate("a").unwrap();
    assert!(controller.get("a").unwrap().is_active());

    let err = controller.activate("b").unwrap_err();
    assert_eq!(
        err,
        ControllerError::MultiplicityViolation {
            name: "b".to_owned()
        }
    );
    assert!(!controller.get("b").unwrap().is_active());
}

#[test]
fn pinned_state_ignores_toggle() {
    init_tracing();
    let mut pinned = state("x", false, true);
    assert!(pinned.is_active());

    let outcome = pinned.toggle();
    assert_eq!(
        outcome.warning(),
        Some(&Rejection::PinnedToggle {
            name: "x".to_owned()
        })
    );
    assert!(pinned.is_active());
}

#[test]
fn activate_all_under_multiple() {
    let mut controller = controller(&["a", "b"], multiple());
    assert!(controller.activate_all().is_applied());
    assert!(controller.get("a").unwrap().is_active());
    assert!(controller.get("b").unwrap().is_active());
}

#[test]
fn construction_activate_all_is_blanket_rejected_under_single() {
    init_tracing();
    let options = ControllerOptions {
        activate_all: true,
        ..ControllerOptions::default()
    };

    let one = StateController::new(specs(&["a"]), options).unwrap();
    assert_eq!(active_count(&one), 0);

    let two = StateController::new(specs(&["a", "b"]), options).unwrap();
    assert_eq!(active_count(&two), 0);
}

#[test]
fn construction_activate_all_under_multiple() {
    let options = ControllerOptions {
        allow_multiple: true,
        activate_all: true,
        ..ControllerOptions::default()
    };
    let controller = StateController::new(specs(&["element1", "element2"]), options).unwrap();
    assert!(controller.get("element1").unwrap().is_active());
    assert!(controller.get("element2").unwrap().is_active());
}

#[test]
fn construction_deactivate_all_keeps_pinned_states() {
    let options = ControllerOptions {
        allow_multiple: true,
        deactivate_all: true,
        ..ControllerOptions::default()
    };
    let states = [
        ("lit", state("lit", true, false)),
        ("pinned", state("pinned", false, true)),
    ];
    let controller = StateController::new(states, options).unwrap();
    assert_eq!(controller.active_names(), vec!["pinned"]);
}

#[test]
fn conflicting_options_fail_before_states_are_read() {
    // An empty spec would fail on its own; the option conflict must win.
    let options = ControllerOptions {
        activate_all: true,
        deactivate_all: true,
        ..ControllerOptions::default()
    };
    let err = StateController::new([("broken", StateSpec::default())], options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigConflict);
}

#[test]
fn add_with_empty_payload_is_rejected() {
    let mut controller = controller(&["a"], single());
    let err = controller.add(StateSpec::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(controller.len(), 1);
}

#[test]
fn add_adopts_existing_state() {
    let mut controller = controller(&[], single());
    controller.add(state("newElement", false, false)).unwrap();
    assert_eq!(controller.get("newElement").unwrap().name(), "newElement");
    assert!(controller.contains("newElement"));
}

#[test]
fn activate_unknown_name_leaves_collection_unchanged() {
    let mut controller = controller(&["a", "b"], single());
    controller.activate("a").unwrap();
    let before: Vec<_> = controller.iter().cloned().collect();

    let err = controller.activate("nonExistent").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(controller.iter().cloned().collect::<Vec<_>>(), before);
}

#[test]
fn single_element_toggles_back_and_forth() {
    let mut controller = controller(&["element1"], single());
    assert!(controller.toggle("element1").unwrap().is_applied());
    assert!(controller.get("element1").unwrap().is_active());
    assert!(controller.toggle("element1").unwrap().is_applied());
    assert!(!controller.get("element1").unwrap().is_active());
}

#[test]
fn deactivate_all_clears_unpinned_states() {
    let states = [
        ("element1", state("element1", true, false)),
        ("element2", state("element2", true, false)),
    ];
    let mut controller = StateController::new(states, multiple()).unwrap();
    assert!(controller.deactivate_all().is_empty());
    assert!(!controller.any_active());
    assert_eq!(active_count(&controller), 0);
}

#[test]
fn mixed_inputs_build_one_collection() {
    let states = vec![
        ("header", StateInput::from(state("header", false, true))),
        ("sidebar", StateInput::from(StateSpec::default())),
    ];
    let err = StateController::new(states, multiple()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let states = vec![
        ("header", StateInput::from(state("header", false, true))),
        ("sidebar", StateInput::from(StateSpec::default().with_value(true))),
    ];
    let controller = StateController::new(states, multiple()).unwrap();
    assert_eq!(controller.active_names(), vec!["header", "sidebar"]);
}
