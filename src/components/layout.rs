// ABOUTME: Top-level layout - wizard screen with dialog and toast overlays on top

use ratatui::prelude::*;

use super::{DialogComponent, ToastComponent, WizardViewComponent};
use crate::app::AppState;

pub struct LayoutComponent {
    wizard: WizardViewComponent,
    dialog: DialogComponent,
    toasts: ToastComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            wizard: WizardViewComponent::new(),
            dialog: DialogComponent::new(),
            toasts: ToastComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();

        self.wizard.render(frame, area, state);

        // Overlays last so they sit above the wizard
        if state.dialogs.is_open() {
            self.dialog.render(frame, area, &state.dialogs);
        }
        if !state.toasts.is_empty() {
            self.toasts.render(frame, area, &state.toasts);
        }
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
