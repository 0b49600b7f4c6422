// ABOUTME: Maps keyboard input to application events and applies them to the state

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::AppState;
use crate::dialog::DialogKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Ask before leaving
    RequestQuit,
    /// Leave immediately (Ctrl-C)
    ForceQuit,
    FocusNext,
    FocusPrev,
    Input(char),
    Backspace,
    /// Validate and advance
    Submit,
    PrevStep,
    JumpTo(usize),
    Save,
    RequestReset,
    DialogConfirm,
    DialogCancel,
    DialogInput(char),
    DialogBackspace,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key_event.code == KeyCode::Char('c') {
            return Some(AppEvent::ForceQuit);
        }

        // Open dialog captures all other input
        if let Some(dialog) = state.dialogs.active() {
            let is_prompt = dialog.request().kind == DialogKind::Prompt;
            return match key_event.code {
                KeyCode::Enter => Some(AppEvent::DialogConfirm),
                KeyCode::Esc => Some(AppEvent::DialogCancel),
                KeyCode::Backspace if is_prompt => Some(AppEvent::DialogBackspace),
                KeyCode::Char(c) if is_prompt => Some(AppEvent::DialogInput(c)),
                KeyCode::Char('y' | 'Y') => Some(AppEvent::DialogConfirm),
                KeyCode::Char('n' | 'N') => Some(AppEvent::DialogCancel),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Esc => Some(AppEvent::RequestQuit),
            KeyCode::Enter => Some(AppEvent::Submit),
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::FocusPrev),
            KeyCode::PageUp => Some(AppEvent::PrevStep),
            KeyCode::F(n) if (1..=9).contains(&n) => Some(AppEvent::JumpTo(usize::from(n - 1))),
            KeyCode::Backspace => Some(AppEvent::Backspace),
            KeyCode::Char('b') if ctrl => Some(AppEvent::PrevStep),
            KeyCode::Char('s') if ctrl => Some(AppEvent::Save),
            KeyCode::Char('r') if ctrl => Some(AppEvent::RequestReset),
            KeyCode::Char(c) if !ctrl => Some(AppEvent::Input(c)),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::RequestQuit => state.request_quit(),
            AppEvent::ForceQuit => state.should_quit = true,
            AppEvent::FocusNext => state.focus_next(),
            AppEvent::FocusPrev => state.focus_prev(),
            AppEvent::Input(c) => state.input_char(c),
            AppEvent::Backspace => state.backspace(),
            AppEvent::Submit => state.submit_step(),
            AppEvent::PrevStep => state.prev_step(),
            AppEvent::JumpTo(index) => state.jump_to(index),
            AppEvent::Save => state.save_snapshot(),
            AppEvent::RequestReset => state.request_reset(),
            AppEvent::DialogConfirm => {
                state.dialogs.confirm_active();
            }
            AppEvent::DialogCancel => {
                state.dialogs.cancel_active();
            }
            AppEvent::DialogInput(c) => state.dialogs.input_char(c),
            AppEvent::DialogBackspace => state.dialogs.backspace(),
        }

        // Answers and controller notifications are visible on the next frame
        state.poll_pending();
        state.drain_wizard_events();
    }
}
