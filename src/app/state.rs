// ABOUTME: Terminal application state - drives one wizard session from keyboard input
// Validation gates Enter before calling next_step; the controller itself never validates

use serde_json::Value;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

use crate::config::WizardConfig;
use crate::dialog::{DialogHandle, DialogManager, ToastManager};
use crate::persistence::{PersistenceOutcome, SnapshotStore, WizardPersistence};
use crate::validation::StepValidator;
use crate::wizard::{
    ChannelObserver, StepDescriptor, StepTransition, WizardController, WizardDefinition,
    WizardEvent,
};

/// Question awaiting a dialog answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingDecision {
    Quit,
    Reset,
}

pub struct AppState {
    pub config: WizardConfig,
    pub definition: WizardDefinition,
    pub controller: WizardController,
    pub validator: StepValidator,
    pub dialogs: DialogManager,
    pub toasts: ToastManager,
    /// Index into the current step's fields
    pub focused_field: usize,
    pub should_quit: bool,
    persistence: Option<WizardPersistence<Box<dyn SnapshotStore>>>,
    pending: Option<(PendingDecision, DialogHandle<bool>)>,
    events: UnboundedReceiver<WizardEvent>,
}

impl AppState {
    /// Build the session and restore any saved snapshot
    pub fn new(
        config: WizardConfig,
        definition: WizardDefinition,
        store: Option<Box<dyn SnapshotStore>>,
    ) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let mut controller = definition.controller(config.allow_skip_steps);
        controller.subscribe(ChannelObserver::new(tx));

        let mut state = Self {
            validator: definition.validator(),
            toasts: ToastManager::new(config.toasts.duration(), config.toasts.position),
            dialogs: DialogManager::new(),
            focused_field: 0,
            should_quit: false,
            persistence: store.map(WizardPersistence::new),
            pending: None,
            events,
            controller,
            definition,
            config,
        };
        state.restore_snapshot();
        state
    }

    fn restore_snapshot(&mut self) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        match persistence.restore(&mut self.controller) {
            PersistenceOutcome::Done => {
                let progress = self.controller.progress();
                self.toasts.info(format!(
                    "Restored progress: step {} of {}",
                    progress.current, progress.total
                ));
            }
            PersistenceOutcome::Empty => {}
            PersistenceOutcome::Degraded(err) => {
                self.toasts.warning(format!("Could not restore saved progress: {err}"));
            }
        }
        self.drain_wizard_events();
    }

    pub fn has_persistence(&self) -> bool {
        self.persistence.is_some()
    }

    pub fn current_step(&self) -> Option<&StepDescriptor> {
        self.definition.step(self.controller.current_step())
    }

    pub fn focused_field_name(&self) -> Option<&str> {
        self.current_step()
            .and_then(|step| step.fields.get(self.focused_field))
            .map(|field| field.name.as_str())
    }

    /// Value of a step-data key as display text
    pub fn field_value(&self, name: &str) -> String {
        match self.controller.step_data().get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn is_awaiting_decision(&self) -> bool {
        self.pending.is_some()
    }

    // === Field editing ===

    pub fn focus_next(&mut self) {
        let count = self.current_step().map_or(0, |s| s.fields.len());
        if count > 0 {
            self.focused_field = (self.focused_field + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.current_step().map_or(0, |s| s.fields.len());
        if count > 0 {
            self.focused_field = (self.focused_field + count - 1) % count;
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.edit_focused(|value| value.push(c));
    }

    pub fn backspace(&mut self) {
        self.edit_focused(|value| {
            value.pop();
        });
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        if self.controller.is_complete() {
            return;
        }
        let Some(name) = self.focused_field_name().map(str::to_string) else {
            return;
        };
        let mut value = self.field_value(&name);
        edit(&mut value);
        self.controller.update_step_data(name, value);
    }

    // === Navigation ===

    /// Validate the current step and advance only when it passes
    pub fn submit_step(&mut self) {
        if self.controller.is_complete() {
            self.should_quit = true;
            return;
        }
        let Some(step_key) = self.current_step().map(|s| s.key.clone()) else {
            return;
        };

        let result = self.validator.validate_step(&step_key, self.controller.step_data());
        if !result.is_valid {
            let count = result.error_count();
            self.toasts.error(format!(
                "Please fix {count} field{} before continuing",
                if count == 1 { "" } else { "s" }
            ));
            return;
        }

        match self.controller.next_step() {
            Ok(StepTransition::Advanced { from, to }) => debug!(from, to, "Advanced"),
            Ok(StepTransition::Completed | StepTransition::AlreadyComplete) => {}
            Err(err) => {
                self.toasts.warning(err.to_string());
            }
        }
    }

    pub fn prev_step(&mut self) {
        self.controller.prev_step();
    }

    /// Indicator navigation; with skipping allowed any in-range step is a target
    pub fn jump_to(&mut self, index: usize) {
        let result = if self.controller.allows_skip_steps() {
            self.controller.go_to_step(index)
        } else {
            self.controller.jump_to_step(index)
        };
        if let Err(err) = result {
            self.toasts.warning(err.to_string());
        }
    }

    // === Persistence ===

    pub fn save_snapshot(&mut self) {
        let Some(persistence) = &mut self.persistence else {
            self.toasts.info("Saving is disabled in the config");
            return;
        };
        match persistence.save(&self.controller) {
            PersistenceOutcome::Degraded(err) => {
                self.toasts.warning(format!("Could not save progress: {err}"));
            }
            PersistenceOutcome::Done | PersistenceOutcome::Empty => {
                self.toasts.success("Progress saved");
            }
        }
    }

    fn clear_snapshot(&mut self) {
        if let Some(persistence) = &mut self.persistence {
            if let Some(err) = persistence.clear().warning() {
                self.toasts.warning(format!("Could not clear saved progress: {err}"));
            }
        }
    }

    // === Decisions ===

    pub fn request_quit(&mut self) {
        if self.controller.is_complete() {
            self.should_quit = true;
            return;
        }
        let handle = self.dialogs.confirm(
            "Quit",
            "Leave the wizard? Your answers will be saved for next time.",
        );
        self.dialogs.set_button_labels("Quit", "Stay");
        self.pending = Some((PendingDecision::Quit, handle));
    }

    pub fn request_reset(&mut self) {
        let handle = self
            .dialogs
            .confirm("Start over", "Clear every answer and return to the first step?");
        self.dialogs.set_button_labels("Reset", "Cancel");
        self.pending = Some((PendingDecision::Reset, handle));
    }

    /// Apply the pending decision once its dialog has been answered
    pub fn poll_pending(&mut self) {
        let answer = self
            .pending
            .as_mut()
            .and_then(|(_, handle)| handle.try_take());
        let Some(answer) = answer else {
            return;
        };
        let Some((decision, _)) = self.pending.take() else {
            return;
        };
        if !answer {
            return;
        }

        match decision {
            PendingDecision::Quit => {
                self.save_snapshot();
                self.should_quit = true;
            }
            PendingDecision::Reset => {
                self.controller.reset();
                self.validator.clear_errors(None);
                self.clear_snapshot();
                self.focused_field = 0;
                self.toasts.info("Wizard reset");
            }
        }
    }

    // === Wizard notifications ===

    pub fn drain_wizard_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                WizardEvent::StepChanged { step, .. } => {
                    debug!(step, "Renderer moved to step");
                    self.focused_field = 0;
                }
                WizardEvent::Completed { data } => {
                    info!(fields = data.len(), "Wizard finished");
                    self.clear_snapshot();
                    self.toasts.success("All done! Press Enter to exit");
                }
                WizardEvent::DataChanged { .. } => {}
            }
        }
    }

    /// Periodic housekeeping from the render loop
    pub fn tick(&mut self, now: Instant) {
        self.toasts.expire(now);
        self.poll_pending();
        self.drain_wizard_events();
    }
}
