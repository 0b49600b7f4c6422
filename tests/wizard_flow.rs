// ABOUTME: Public API tests - controller, validator, and observers used together without a terminal

use pretty_assertions::assert_eq;
use regex::Regex;
use serde_json::json;
use tokio::sync::mpsc;

use stepwise::validation::{Rule, RuleSet};
use stepwise::wizard::{ChannelObserver, NavigationError, StepStatus, StepTransition, WizardEvent};
use stepwise::{create_validator, create_wizard};

#[test]
fn test_gated_progression() {
    let rules = RuleSet::new()
        .with_rule(
            "contact",
            "email",
            Rule::new()
                .required()
                .pattern(Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap()),
        )
        .with_rule("about", "age", Rule::new().custom(|value, _| {
            value.and_then(serde_json::Value::as_u64).is_some_and(|age| age >= 18)
        }));
    let steps = ["contact", "about"];

    let mut wizard = create_wizard(steps.len());
    let mut validator = create_validator(rules);

    wizard.update_step_data("email", "not-an-email");
    let result = validator.validate_step(steps[wizard.current_step()], wizard.step_data());
    assert!(!result.is_valid);
    assert_eq!(result.errors["email"], "email is invalid");

    wizard.update_step_data("email", "ada@example.com");
    assert!(validator.validate_step("contact", wizard.step_data()).is_valid);
    assert_eq!(
        wizard.next_step().unwrap(),
        StepTransition::Advanced { from: 0, to: 1 }
    );

    wizard.update_step_data("age", json!(17));
    assert!(!validator.has_errors("contact"));
    assert!(!validator.validate_step("about", wizard.step_data()).is_valid);

    wizard.update_step_data("age", json!(36));
    assert!(validator.validate_step("about", wizard.step_data()).is_valid);
    assert_eq!(wizard.next_step().unwrap(), StepTransition::Completed);
    assert!(wizard.is_complete());
}

#[test]
fn test_channel_observer_sees_transitions() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut wizard = create_wizard(2);
    wizard.subscribe(ChannelObserver::new(tx));

    wizard.update_step_data("name", "Ada");
    wizard.next_step().unwrap();
    wizard.next_step().unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], WizardEvent::DataChanged { .. }));
    assert!(matches!(events[1], WizardEvent::StepChanged { step: 1, .. }));
    match &events[2] {
        WizardEvent::Completed { data } => assert_eq!(data["name"], json!("Ada")),
        other => panic!("expected completion, got {other:?}"),
    }
}

#[test]
fn test_reachability_and_indicators() {
    let mut wizard = create_wizard(4);

    assert_eq!(
        wizard.jump_to_step(2),
        Err(NavigationError::Unreachable { index: 2, max_reachable: 0 })
    );
    assert_eq!(
        wizard.go_to_step(9),
        Err(NavigationError::OutOfRange { index: 9, total: 4 })
    );

    wizard.next_step().unwrap();
    wizard.next_step().unwrap();
    assert_eq!(wizard.current_step(), 2);

    let statuses: Vec<StepStatus> = (0..4).map(|i| wizard.step_status(i)).collect();
    assert_eq!(
        statuses,
        vec![
            StepStatus::Completed,
            StepStatus::Completed,
            StepStatus::Current,
            StepStatus::Disabled,
        ]
    );

    wizard.jump_to_step(0).unwrap();
    wizard.jump_to_step(2).unwrap();
    assert_eq!(wizard.progress().percentage, 75);
}

#[test]
fn test_skip_steps_policy() {
    let mut wizard = create_wizard(5).with_skip_steps(true);

    wizard.go_to_step(4).unwrap();
    assert!(wizard.is_last());
    assert_eq!(wizard.step_status(2), StepStatus::Accessible);

    // Indicator jumps still honor reachability
    wizard.reset();
    assert!(wizard.jump_to_step(3).is_err());
}
