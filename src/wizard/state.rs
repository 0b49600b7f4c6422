// ABOUTME: Wizard state aggregate owned by the controller
// Tracks step position, completed steps, accumulated data, and the completion flag

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Key-value data accumulated across every step of a wizard session
pub type StepData = Map<String, Value>;

/// The single mutable aggregate behind a wizard session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    /// Zero-based index of the step being shown
    pub current_step: usize,
    /// Steps the user has advanced past (or the renderer marked)
    pub completed_steps: BTreeSet<usize>,
    /// Data shared by all steps, never scoped to one step
    pub step_data: StepData,
    /// Set once the terminal step has been advanced past
    pub is_complete: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest step index navigation may reach without skipping ahead
    pub fn max_reachable(&self) -> usize {
        self.completed_steps.last().map_or(0, |last| last + 1)
    }
}

/// Progress summary, 1-indexed for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percentage: u32,
    pub completed: usize,
    pub is_complete: bool,
}

impl Progress {
    pub(crate) fn compute(state: &WizardState, total_steps: usize) -> Self {
        Self {
            current: state.current_step + 1,
            total: total_steps,
            percentage: rounded_percentage(state.current_step + 1, total_steps),
            completed: state.completed_steps.len(),
            is_complete: state.is_complete,
        }
    }

    /// Ratio in `[0, 1]` for gauges
    pub fn ratio(&self) -> f64 {
        (f64::from(self.percentage) / 100.0).clamp(0.0, 1.0)
    }
}

/// `round(part / whole * 100)` with halves rounded up, in integer arithmetic
fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (part * 200 + whole) / (whole * 2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
