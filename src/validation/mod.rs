// ABOUTME: Declarative per-step field validation
// Validation is informational; it never blocks controller transitions by itself

pub mod rule;
pub mod validator;

pub use rule::{CustomCheck, FieldRules, Rule, RuleSet};
pub use validator::{FieldErrors, StepValidator, ValidationResult};

/// Create a validator over `rules`
pub fn create_validator(rules: RuleSet) -> StepValidator {
    StepValidator::new(rules)
}
