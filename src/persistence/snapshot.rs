// ABOUTME: Serializable snapshot of a wizard session
// JSON blob carrying step position, ordered completed steps, and step data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StorageError;
use crate::wizard::{StepData, WizardController, WizardState};

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSnapshot {
    /// Crate version that wrote the snapshot
    #[serde(default = "default_version")]
    pub version: String,

    pub saved_at: DateTime<Utc>,

    pub total_steps: usize,

    pub current_step: usize,

    /// Sorted ascending
    #[serde(default)]
    pub completed_steps: Vec<usize>,

    #[serde(default)]
    pub step_data: StepData,

    #[serde(default)]
    pub is_complete: bool,
}

impl WizardSnapshot {
    pub fn capture(controller: &WizardController) -> Self {
        let state = controller.state();
        Self {
            version: default_version(),
            saved_at: Utc::now(),
            total_steps: controller.total_steps(),
            current_step: state.current_step,
            completed_steps: state.completed_steps.iter().copied().collect(),
            step_data: state.step_data.clone(),
            is_complete: state.is_complete,
        }
    }

    pub fn to_blob(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_blob(blob: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(blob)?)
    }

    /// Convert into a state for `controller`, rejecting snapshots that do not fit it
    pub fn into_state(self, controller: &WizardController) -> Result<WizardState, StorageError> {
        if self.total_steps != controller.total_steps() {
            return Err(StorageError::Incompatible(format!(
                "snapshot has {} steps, wizard has {}",
                self.total_steps,
                controller.total_steps()
            )));
        }

        let state = WizardState {
            current_step: self.current_step,
            completed_steps: self.completed_steps.into_iter().collect(),
            step_data: self.step_data,
            is_complete: self.is_complete,
        };

        if !controller.fits(&state) {
            return Err(StorageError::Incompatible(format!(
                "step indices or completion flag do not fit a {}-step wizard",
                controller.total_steps()
            )));
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_blob_preserves_wizard_fields() {
        let mut controller = WizardController::new(4);
        controller.update_step_data("email", "a@b.com");
        controller.update_step_data("age", json!(42));
        controller.next_step().unwrap();
        controller.next_step().unwrap();

        let blob = WizardSnapshot::capture(&controller).to_blob().unwrap();
        let restored = WizardSnapshot::from_blob(&blob).unwrap();

        assert_eq!(restored.current_step, 2);
        assert_eq!(restored.completed_steps, vec![0, 1]);
        assert_eq!(restored.step_data, *controller.step_data());
        assert_eq!(restored.into_state(&controller).unwrap(), *controller.state());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let blob = r#"{"saved_at":"2024-01-01T00:00:00Z","total_steps":3,"current_step":1}"#;
        let snapshot = WizardSnapshot::from_blob(blob).unwrap();

        assert!(snapshot.completed_steps.is_empty());
        assert!(snapshot.step_data.is_empty());
        assert!(!snapshot.is_complete);
    }

    #[test]
    fn test_rejects_step_count_mismatch() {
        let controller = WizardController::new(3);
        let mut snapshot = WizardSnapshot::capture(&controller);
        snapshot.total_steps = 5;

        assert!(matches!(
            snapshot.into_state(&controller),
            Err(StorageError::Incompatible(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_indices() {
        let controller = WizardController::new(3);
        let mut snapshot = WizardSnapshot::capture(&controller);
        snapshot.completed_steps = vec![0, 7];

        assert!(matches!(
            snapshot.into_state(&controller),
            Err(StorageError::Incompatible(_))
        ));
    }

    #[test]
    fn test_rejects_completion_away_from_last_step() {
        let controller = WizardController::new(3);
        let mut snapshot = WizardSnapshot::capture(&controller);
        snapshot.is_complete = true;
        snapshot.completed_steps = vec![0, 1, 2];
        snapshot.current_step = 0;

        assert!(matches!(
            snapshot.into_state(&controller),
            Err(StorageError::Incompatible(_))
        ));
    }

    #[test]
    fn test_rejects_completion_without_last_step_done() {
        let controller = WizardController::new(3);
        let mut snapshot = WizardSnapshot::capture(&controller);
        snapshot.is_complete = true;
        snapshot.completed_steps = vec![0, 1];
        snapshot.current_step = 2;

        assert!(matches!(
            snapshot.into_state(&controller),
            Err(StorageError::Incompatible(_))
        ));
    }

    #[test]
    fn test_accepts_finished_wizard() {
        let mut controller = WizardController::new(2);
        controller.next_step().unwrap();
        controller.next_step().unwrap();

        let snapshot = WizardSnapshot::capture(&controller);
        assert_eq!(snapshot.into_state(&controller).unwrap(), *controller.state());
    }
}
