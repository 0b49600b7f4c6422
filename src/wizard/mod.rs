// ABOUTME: Multi-step wizard navigation and completion state machine
// The controller owns the state; renderers observe it and call its transitions

pub mod controller;
pub mod observer;
pub mod state;
pub mod step;

pub use controller::{NavResult, NavigationError, StepTransition, WizardController};
pub use observer::{ChannelObserver, WizardEvent, WizardObserver};
pub use state::{Progress, StepData, WizardState};
pub use step::{FieldDescriptor, StepContent, StepDescriptor, StepStatus, WizardDefinition};

/// Create a controller for `total_steps` steps
pub fn create_wizard(total_steps: usize) -> WizardController {
    WizardController::new(total_steps)
}
