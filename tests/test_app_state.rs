// ABOUTME: Drives AppState through keyboard events to check the gated wizard flow end to end

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use tempfile::TempDir;

use stepwise::app::{AppState, EventHandler};
use stepwise::config::WizardConfig;
use stepwise::persistence::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
use stepwise::wizard::StepStatus;

fn create_test_state() -> AppState {
    let config = WizardConfig::default();
    let definition = config.definition().unwrap();
    AppState::new(config, definition, Some(Box::new(MemorySnapshotStore::new())))
}

fn state_with_store(store: FileSnapshotStore) -> AppState {
    let config = WizardConfig::default();
    let definition = config.definition().unwrap();
    AppState::new(config, definition, Some(Box::new(store)))
}

fn send(state: &mut AppState, key_event: KeyEvent) {
    if let Some(event) = EventHandler::handle_key_event(key_event, state) {
        EventHandler::process_event(event, state);
    }
}

fn press(state: &mut AppState, code: KeyCode) {
    send(state, KeyEvent::new(code, KeyModifiers::NONE));
}

fn ctrl(state: &mut AppState, c: char) {
    send(state, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
}

fn type_text(state: &mut AppState, text: &str) {
    for c in text.chars() {
        press(state, KeyCode::Char(c));
    }
}

fn fill_account(state: &mut AppState) {
    type_text(state, "ada@example.com");
    press(state, KeyCode::Tab);
    type_text(state, "hunter22");
    press(state, KeyCode::Tab);
    type_text(state, "hunter22");
}

fn toast_messages(state: &AppState) -> Vec<String> {
    state.toasts.toasts().iter().map(|t| t.message.clone()).collect()
}

#[test]
fn test_app_state_creation() {
    let state = create_test_state();

    assert_eq!(state.controller.current_step(), 0);
    assert_eq!(state.controller.total_steps(), 3);
    assert_eq!(state.focused_field_name(), Some("email"));
    assert!(state.has_persistence());
    assert!(!state.should_quit);
    assert!(state.toasts.is_empty());
}

#[test]
fn test_typing_edits_focused_field() {
    let mut state = create_test_state();

    type_text(&mut state, "ada");
    press(&mut state, KeyCode::Backspace);
    assert_eq!(state.field_value("email"), "ad");

    press(&mut state, KeyCode::Tab);
    assert_eq!(state.focused_field_name(), Some("password"));
    type_text(&mut state, "pw");
    assert_eq!(state.controller.step_data().get("password"), Some(&json!("pw")));

    press(&mut state, KeyCode::BackTab);
    press(&mut state, KeyCode::BackTab);
    assert_eq!(state.focused_field_name(), Some("confirm_password"));
}

#[test]
fn test_enter_blocked_by_validation() {
    let mut state = create_test_state();

    press(&mut state, KeyCode::Enter);

    assert_eq!(state.controller.current_step(), 0);
    assert!(state.controller.completed_steps().is_empty());
    assert_eq!(
        state.validator.field_error("account", "email"),
        Some("Enter a valid email address")
    );
    assert!(state.validator.field_error("account", "password").is_some());
    assert!(toast_messages(&state)
        .iter()
        .any(|m| m == "Please fix 3 fields before continuing"));
}

#[test]
fn test_mismatched_confirmation_blocks() {
    let mut state = create_test_state();

    type_text(&mut state, "ada@example.com");
    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "hunter22");
    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "hunter23");
    press(&mut state, KeyCode::Enter);

    assert_eq!(state.controller.current_step(), 0);
    assert_eq!(
        state.validator.field_error("account", "confirm_password"),
        Some("Passwords do not match")
    );
    assert_eq!(state.validator.step_errors("account").len(), 1);
}

#[test]
fn test_full_flow_to_completion() {
    let mut state = create_test_state();

    fill_account(&mut state);
    press(&mut state, KeyCode::Enter);
    assert_eq!(state.controller.current_step(), 1);
    assert_eq!(state.focused_field, 0);
    assert!(!state.validator.has_errors("account"));

    type_text(&mut state, "Ada Lovelace");
    press(&mut state, KeyCode::Enter);
    assert_eq!(state.controller.current_step(), 2);

    // Review step has no rules
    press(&mut state, KeyCode::Enter);
    assert!(state.controller.is_complete());
    assert_eq!(state.controller.progress().percentage, 100);
    assert!(toast_messages(&state).iter().any(|m| m == "All done! Press Enter to exit"));
    assert!(!state.should_quit);

    // Edits are ignored once finished
    type_text(&mut state, "x");
    assert_eq!(state.field_value("email"), "ada@example.com");

    press(&mut state, KeyCode::Enter);
    assert!(state.should_quit);
}

#[test]
fn test_back_and_jump_navigation() {
    let mut state = create_test_state();

    fill_account(&mut state);
    press(&mut state, KeyCode::Enter);
    assert_eq!(state.controller.current_step(), 1);

    ctrl(&mut state, 'b');
    assert_eq!(state.controller.current_step(), 0);
    assert!(state.controller.is_step_completed(0));

    press(&mut state, KeyCode::F(2));
    assert_eq!(state.controller.current_step(), 1);

    // Review is not reachable yet
    press(&mut state, KeyCode::F(3));
    assert_eq!(state.controller.current_step(), 1);
    assert!(toast_messages(&state).iter().any(|m| m.contains("not reachable")));

    press(&mut state, KeyCode::PageUp);
    assert_eq!(state.controller.current_step(), 0);
}

#[test]
fn test_jump_keys_follow_skip_policy() {
    let config = WizardConfig {
        allow_skip_steps: true,
        ..WizardConfig::default()
    };
    let definition = config.definition().unwrap();
    let mut state = AppState::new(config, definition, None);
    assert_eq!(state.controller.step_status(2), StepStatus::Accessible);

    press(&mut state, KeyCode::F(3));

    assert_eq!(state.controller.current_step(), 2);
    assert!(state.controller.completed_steps().is_empty());
    assert!(state.toasts.is_empty());

    // Out of range is still refused
    press(&mut state, KeyCode::F(9));
    assert_eq!(state.controller.current_step(), 2);
    assert!(toast_messages(&state).iter().any(|m| m.contains("out of range")));
}

#[test]
fn test_reset_through_dialog() {
    let mut state = create_test_state();

    fill_account(&mut state);
    press(&mut state, KeyCode::Enter);

    ctrl(&mut state, 'r');
    assert!(state.dialogs.is_open());
    assert!(state.is_awaiting_decision());
    assert_eq!(state.dialogs.active().unwrap().request().confirm_text, "Reset");

    // Wizard keys are captured by the dialog
    press(&mut state, KeyCode::Char('y'));

    assert!(!state.dialogs.is_open());
    assert!(!state.is_awaiting_decision());
    assert_eq!(state.controller.current_step(), 0);
    assert!(state.controller.step_data().is_empty());
    assert!(state.controller.completed_steps().is_empty());
    assert!(toast_messages(&state).iter().any(|m| m == "Wizard reset"));
}

#[test]
fn test_reset_cancelled_keeps_progress() {
    let mut state = create_test_state();

    fill_account(&mut state);
    press(&mut state, KeyCode::Enter);

    ctrl(&mut state, 'r');
    press(&mut state, KeyCode::Esc);

    assert!(!state.dialogs.is_open());
    assert!(!state.is_awaiting_decision());
    assert_eq!(state.controller.current_step(), 1);
    assert_eq!(state.field_value("email"), "ada@example.com");
}

#[test]
fn test_quit_asks_first() {
    let mut state = create_test_state();

    press(&mut state, KeyCode::Esc);
    assert!(state.dialogs.is_open());
    assert!(!state.should_quit);

    press(&mut state, KeyCode::Char('n'));
    assert!(!state.dialogs.is_open());
    assert!(!state.should_quit);

    press(&mut state, KeyCode::Esc);
    press(&mut state, KeyCode::Enter);
    assert!(state.should_quit);
}

#[test]
fn test_ctrl_c_quits_immediately() {
    let mut state = create_test_state();

    press(&mut state, KeyCode::Esc);
    ctrl(&mut state, 'c');

    assert!(state.should_quit);
}

#[test]
fn test_progress_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(temp_dir.path(), "wizard-data");

    let mut first = state_with_store(store.clone());
    fill_account(&mut first);
    press(&mut first, KeyCode::Enter);
    ctrl(&mut first, 's');
    assert!(toast_messages(&first).iter().any(|m| m == "Progress saved"));
    assert!(store.path().exists());

    let second = state_with_store(store.clone());
    assert_eq!(second.controller.current_step(), 1);
    assert!(second.controller.is_step_completed(0));
    assert_eq!(second.field_value("email"), "ada@example.com");
    assert!(toast_messages(&second)
        .iter()
        .any(|m| m == "Restored progress: step 2 of 3"));
}

#[test]
fn test_completion_clears_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSnapshotStore::new(temp_dir.path(), "wizard-data");

    let mut state = state_with_store(store.clone());
    fill_account(&mut state);
    press(&mut state, KeyCode::Enter);
    ctrl(&mut state, 's');
    assert!(store.path().exists());

    type_text(&mut state, "Ada");
    press(&mut state, KeyCode::Enter);
    press(&mut state, KeyCode::Enter);

    assert!(state.controller.is_complete());
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_corrupt_snapshot_degrades_to_warning() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileSnapshotStore::new(temp_dir.path(), "wizard-data");
    store.save("{ not json").unwrap();

    let state = state_with_store(store);

    assert_eq!(state.controller.current_step(), 0);
    assert!(toast_messages(&state)
        .iter()
        .any(|m| m.starts_with("Could not restore saved progress")));
}

#[test]
fn test_save_without_persistence() {
    let config = WizardConfig::default();
    let definition = config.definition().unwrap();
    let mut state = AppState::new(config, definition, None);

    ctrl(&mut state, 's');

    assert!(!state.has_persistence());
    assert!(toast_messages(&state)
        .iter()
        .any(|m| m == "Saving is disabled in the config"));
}
