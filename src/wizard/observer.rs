// ABOUTME: Notification contract between the wizard controller and its renderers
// Observers are called after each mutation completes, never mid-update

use tokio::sync::mpsc::UnboundedSender;

use super::state::StepData;

/// Receives wizard notifications. Every method defaults to a no-op.
#[cfg_attr(test, mockall::automock)]
pub trait WizardObserver {
    /// Called after the current step index changes
    fn on_step_change(&mut self, _step: usize, _data: &StepData) {}

    /// Called once, when the terminal step is advanced past
    fn on_complete(&mut self, _data: &StepData) {}

    /// Called once per data update call, after the whole merge is applied
    fn on_data_change(&mut self, _data: &StepData) {}
}

/// Owned copy of a notification, for renderers that run their own loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    StepChanged { step: usize, data: StepData },
    Completed { data: StepData },
    DataChanged { data: StepData },
}

/// Forwards notifications into an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: UnboundedSender<WizardEvent>,
}

impl ChannelObserver {
    pub fn new(tx: UnboundedSender<WizardEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: WizardEvent) {
        // Receiver gone means the renderer shut down; nothing left to notify
        if self.tx.send(event).is_err() {
            tracing::debug!("Wizard event dropped: receiver closed");
        }
    }
}

impl WizardObserver for ChannelObserver {
    fn on_step_change(&mut self, step: usize, data: &StepData) {
        self.send(WizardEvent::StepChanged {
            step,
            data: data.clone(),
        });
    }

    fn on_complete(&mut self, data: &StepData) {
        self.send(WizardEvent::Completed { data: data.clone() });
    }

    fn on_data_change(&mut self, data: &StepData) {
        self.send(WizardEvent::DataChanged { data: data.clone() });
    }
}
