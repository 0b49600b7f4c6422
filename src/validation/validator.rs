// ABOUTME: Step validator - evaluates a step's rule set against accumulated data
// Keeps the latest field errors per step key for renderers to display

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::rule::RuleSet;
use crate::wizard::StepData;

/// Field name → error message
pub type FieldErrors = BTreeMap<String, String>;

static NO_ERRORS: FieldErrors = BTreeMap::new();

/// Outcome of validating one step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: FieldErrors,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: FieldErrors::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StepValidator {
    rules: RuleSet,
    errors: HashMap<String, FieldErrors>,
}

impl StepValidator {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            errors: HashMap::new(),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validate every field declared for `step_key` and remember the errors.
    ///
    /// Steps without rules are always valid and leave the stored errors alone.
    pub fn validate_step(&mut self, step_key: &str, data: &StepData) -> ValidationResult {
        let Some(fields) = self.rules.step(step_key) else {
            return ValidationResult::valid();
        };

        let errors: FieldErrors = fields
            .iter()
            .filter_map(|(field, rule)| {
                rule.check(field, data.get(field), data)
                    .err()
                    .map(|message| (field.clone(), message))
            })
            .collect();

        if !errors.is_empty() {
            debug!(step = step_key, failed = errors.len(), "Step validation failed");
        }

        self.errors.insert(step_key.to_string(), errors.clone());
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Clear one step's errors, or every step's when no key is given
    pub fn clear_errors(&mut self, step_key: Option<&str>) {
        match step_key {
            Some(key) => {
                self.errors.remove(key);
            }
            None => self.errors.clear(),
        }
    }

    pub fn step_errors(&self, step_key: &str) -> &FieldErrors {
        self.errors.get(step_key).unwrap_or(&NO_ERRORS)
    }

    pub fn has_errors(&self, step_key: &str) -> bool {
        !self.step_errors(step_key).is_empty()
    }

    pub fn field_error(&self, step_key: &str, field: &str) -> Option<&str> {
        self.step_errors(step_key).get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &HashMap<String, FieldErrors> {
        &self.errors
    }
}
