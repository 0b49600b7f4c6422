// ABOUTME: Wizard controller - sole authority over step position, completion, and step data
// Enforces reachability rules and notifies observers after each mutation

use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use super::observer::WizardObserver;
use super::state::{Progress, StepData, WizardState};
use super::step::StepStatus;

/// Why a navigation request was refused. State is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Index outside `[0, total_steps)`
    #[error("Step {index} is out of range (wizard has {total} steps)")]
    OutOfRange { index: usize, total: usize },

    /// Index beyond the furthest step the user has unlocked
    #[error("Step {index} is not reachable yet (furthest reachable step is {max_reachable})")]
    Unreachable { index: usize, max_reachable: usize },
}

/// Result type for navigation operations
pub type NavResult<T> = Result<T, NavigationError>;

/// What a successful `next_step` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTransition {
    /// Current step completed and the next one is now current
    Advanced { from: usize, to: usize },
    /// Terminal step completed; the wizard is now complete
    Completed,
    /// Terminal step was already advanced past; nothing changed
    AlreadyComplete,
}

/// Drives one wizard session
pub struct WizardController {
    total_steps: usize,
    allow_skip_steps: bool,
    state: WizardState,
    observers: Vec<Box<dyn WizardObserver>>,
}

impl fmt::Debug for WizardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardController")
            .field("total_steps", &self.total_steps)
            .field("allow_skip_steps", &self.allow_skip_steps)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl WizardController {
    /// Create a controller for `total_steps` steps, positioned on the first one
    pub fn new(total_steps: usize) -> Self {
        Self {
            total_steps,
            allow_skip_steps: false,
            state: WizardState::new(),
            observers: Vec::new(),
        }
    }

    /// Let `go_to_step` ignore reachability
    pub fn with_skip_steps(mut self, allow: bool) -> Self {
        self.allow_skip_steps = allow;
        self
    }

    /// Register an observer for step, completion, and data notifications
    pub fn subscribe(&mut self, observer: impl WizardObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === State reads ===

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn allows_skip_steps(&self) -> bool {
        self.allow_skip_steps
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn completed_steps(&self) -> &BTreeSet<usize> {
        &self.state.completed_steps
    }

    pub fn step_data(&self) -> &StepData {
        &self.state.step_data
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    pub fn max_reachable(&self) -> usize {
        self.state.max_reachable()
    }

    pub fn is_first(&self) -> bool {
        self.state.current_step == 0
    }

    pub fn is_last(&self) -> bool {
        self.total_steps > 0 && self.state.current_step == self.total_steps - 1
    }

    pub fn has_next(&self) -> bool {
        self.state.current_step + 1 < self.total_steps
    }

    pub fn has_prev(&self) -> bool {
        self.state.current_step > 0
    }

    pub fn is_step_completed(&self, index: usize) -> bool {
        self.state.completed_steps.contains(&index)
    }

    /// Indicator predicate: only the immediately preceding step is consulted.
    ///
    /// This is deliberately stricter than the `max_reachable` check used by
    /// `jump_to_step` and `go_to_step`: after `mark_step_as_incomplete` opens a
    /// gap in the completed set, a step can be jumpable without its indicator
    /// being enabled.
    pub fn can_go_to_step(&self, index: usize) -> bool {
        index == 0 || self.state.completed_steps.contains(&(index - 1))
    }

    /// Indicator status; completed beats current beats accessible
    pub fn step_status(&self, index: usize) -> StepStatus {
        if self.is_step_completed(index) {
            StepStatus::Completed
        } else if index == self.state.current_step {
            StepStatus::Current
        } else if self.allow_skip_steps || self.can_go_to_step(index) {
            StepStatus::Accessible
        } else {
            StepStatus::Disabled
        }
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(&self.state, self.total_steps)
    }

    /// Evaluate an ad-hoc predicate over the accumulated data; no predicate passes
    pub fn check_step(&self, predicate: Option<&dyn Fn(&StepData) -> bool>) -> bool {
        predicate.map_or(true, |check| check(&self.state.step_data))
    }

    // === Navigation ===

    /// Move to `index`, honoring reachability unless skipping is allowed
    pub fn go_to_step(&mut self, index: usize) -> NavResult<()> {
        self.ensure_in_range(index)?;
        if !self.allow_skip_steps {
            self.ensure_reachable(index)?;
        }
        self.set_current_step(index);
        Ok(())
    }

    /// Complete the current step and advance, or finish the wizard on the last step
    pub fn next_step(&mut self) -> NavResult<StepTransition> {
        if self.total_steps == 0 {
            return Err(NavigationError::OutOfRange { index: 0, total: 0 });
        }

        let current = self.state.current_step;
        self.state.completed_steps.insert(current);

        if current < self.total_steps - 1 {
            // Completing a step always unlocks the next one
            self.set_current_step(current + 1);
            return Ok(StepTransition::Advanced {
                from: current,
                to: current + 1,
            });
        }

        if self.state.is_complete {
            debug!(step = current, "Wizard already complete; next_step ignored");
            return Ok(StepTransition::AlreadyComplete);
        }

        self.state.is_complete = true;
        info!(total_steps = self.total_steps, "Wizard completed");
        for observer in &mut self.observers {
            observer.on_complete(&self.state.step_data);
        }
        Ok(StepTransition::Completed)
    }

    /// Move back one step. Completion is never undone. Returns whether it moved.
    pub fn prev_step(&mut self) -> bool {
        if self.state.current_step == 0 {
            return false;
        }
        self.set_current_step(self.state.current_step - 1);
        true
    }

    /// Direct indicator navigation: allowed up to `max_reachable` regardless of skip policy
    pub fn jump_to_step(&mut self, index: usize) -> NavResult<()> {
        self.ensure_in_range(index)?;
        self.ensure_reachable(index)?;
        self.set_current_step(index);
        Ok(())
    }

    // === Data ===

    /// Set one key, overwriting any previous value. No validation happens here.
    pub fn update_step_data(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.state.step_data.insert(key.into(), value.into());
        self.notify_data_change();
    }

    /// Merge all entries, then notify once
    pub fn update_multiple_step_data<K, I>(&mut self, entries: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        for (key, value) in entries {
            self.state.step_data.insert(key.into(), value);
        }
        self.notify_data_change();
    }

    // === Completion overrides ===

    pub fn mark_step_as_completed(&mut self, index: usize) -> NavResult<()> {
        self.ensure_in_range(index)?;
        self.state.completed_steps.insert(index);
        Ok(())
    }

    /// Returns whether the step had been completed
    pub fn mark_step_as_incomplete(&mut self, index: usize) -> bool {
        self.state.completed_steps.remove(&index)
    }

    /// Restore every field to its initial value
    pub fn reset(&mut self) {
        let previous_step = self.state.current_step;
        self.state = WizardState::new();
        debug!("Wizard reset");
        if previous_step != 0 {
            self.notify_step_change();
        }
    }

    /// Swap in a validated state (e.g. from a snapshot)
    pub(crate) fn replace_state(&mut self, state: WizardState) {
        let moved = state.current_step != self.state.current_step;
        self.state = state;
        if moved {
            self.notify_step_change();
        }
    }

    /// Whether `state` is one this wizard could have reached: indices in range, and a
    /// completed wizard sits on its completed last step
    pub(crate) fn fits(&self, state: &WizardState) -> bool {
        let step_ok = if self.total_steps == 0 {
            state.current_step == 0
        } else {
            state.current_step < self.total_steps
        };
        let completed_ok = state.completed_steps.iter().all(|&i| i < self.total_steps);
        let finish_ok = !state.is_complete || {
            let last = self.total_steps.checked_sub(1);
            last == Some(state.current_step)
                && last.is_some_and(|last| state.completed_steps.contains(&last))
        };
        step_ok && completed_ok && finish_ok
    }

    // === Internals ===

    fn ensure_in_range(&self, index: usize) -> NavResult<()> {
        if index >= self.total_steps {
            return Err(NavigationError::OutOfRange {
                index,
                total: self.total_steps,
            });
        }
        Ok(())
    }

    fn ensure_reachable(&self, index: usize) -> NavResult<()> {
        let max_reachable = self.state.max_reachable();
        if index > max_reachable {
            debug!(index, max_reachable, "Navigation refused: step not reachable");
            return Err(NavigationError::Unreachable {
                index,
                max_reachable,
            });
        }
        Ok(())
    }

    fn set_current_step(&mut self, index: usize) {
        if self.state.current_step == index {
            return;
        }
        debug!(from = self.state.current_step, to = index, "Step changed");
        self.state.current_step = index;
        self.notify_step_change();
    }

    fn notify_step_change(&mut self) {
        for observer in &mut self.observers {
            observer.on_step_change(self.state.current_step, &self.state.step_data);
        }
    }

    fn notify_data_change(&mut self) {
        for observer in &mut self.observers {
            observer.on_data_change(&self.state.step_data);
        }
    }
}
