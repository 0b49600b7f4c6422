// ABOUTME: Declarative field rules and per-step rule sets
// Checks run in a fixed order: required, pattern, min length, max length, custom

use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::wizard::StepData;

/// Custom check over a field value and all accumulated step data
pub type CustomCheck = Arc<dyn Fn(Option<&Value>, &StepData) -> bool + Send + Sync>;

/// Rules for one field
#[derive(Clone, Default)]
pub struct Rule {
    pub required: bool,
    pub pattern: Option<Regex>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub custom: Option<CustomCheck>,
    /// Replaces the generated message for any failing check
    pub message: Option<String>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("required", &self.required)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("custom", &self.custom.is_some())
            .field("message", &self.message)
            .finish()
    }
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(Option<&Value>, &StepData) -> bool + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Evaluate the rule, stopping at the first failing check
    pub fn check(&self, field: &str, value: Option<&Value>, data: &StepData) -> Result<(), String> {
        self.first_violation(field, value, data)
            .map_or(Ok(()), |default| Err(self.message.clone().unwrap_or(default)))
    }

    fn first_violation(
        &self,
        field: &str,
        value: Option<&Value>,
        data: &StepData,
    ) -> Option<String> {
        if self.required && !is_filled(value) {
            return Some(format!("{field} is required"));
        }

        if let Some(present) = value.filter(|v| is_present(v)) {
            if let Some(pattern) = &self.pattern {
                if !pattern.is_match(&value_text(present)) {
                    return Some(format!("{field} is invalid"));
                }
            }

            let length = value_length(present);
            if let (Some(min), Some(len)) = (self.min_length, length) {
                if len < min {
                    return Some(format!("{field} must be at least {min} characters"));
                }
            }
            if let (Some(max), Some(len)) = (self.max_length, length) {
                if len > max {
                    return Some(format!("{field} must be no more than {max} characters"));
                }
            }
        }

        if let Some(custom) = &self.custom {
            if !custom(value, data) {
                return Some(format!("{field} is invalid"));
            }
        }

        None
    }
}

/// Null or missing
fn is_absent(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Satisfies `required`: not absent and not a blank string
fn is_filled(value: Option<&Value>) -> bool {
    match value {
        _ if is_absent(value) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Gates the pattern and length checks; an empty string counts as not entered
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Characters for strings, elements for arrays; other values have no length
fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Rules for every field of one step, evaluated in field-name order
pub type FieldRules = BTreeMap<String, Rule>;

/// Rules for every step, keyed by step key
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    steps: HashMap<String, FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rule for `field` on `step`
    pub fn with_rule(
        mut self,
        step: impl Into<String>,
        field: impl Into<String>,
        rule: Rule,
    ) -> Self {
        self.insert(step, field, rule);
        self
    }

    pub fn insert(&mut self, step: impl Into<String>, field: impl Into<String>, rule: Rule) {
        self.steps
            .entry(step.into())
            .or_default()
            .insert(field.into(), rule);
    }

    pub fn step(&self, step: &str) -> Option<&FieldRules> {
        self.steps.get(step)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(rule: &Rule, value: Value) -> Result<(), String> {
        let mut data = StepData::new();
        data.insert("field".into(), value.clone());
        rule.check("field", Some(&value), &data)
    }

    #[test]
    fn test_required_rejects_missing_and_blank() {
        let rule = Rule::new().required();
        let data = StepData::new();

        assert_eq!(rule.check("name", None, &data), Err("name is required".to_string()));
        assert!(check(&rule, json!(null)).is_err());
        assert!(check(&rule, json!("   ")).is_err());
        assert!(check(&rule, json!("x")).is_ok());
        assert!(check(&rule, json!(0)).is_ok());
    }

    #[test]
    fn test_length_limits() {
        let rule = Rule::new().min_length(3).max_length(5);

        assert_eq!(
            check(&rule, json!("ab")),
            Err("field must be at least 3 characters".to_string())
        );
        assert_eq!(
            check(&rule, json!("abcdef")),
            Err("field must be no more than 5 characters".to_string())
        );
        assert!(check(&rule, json!("abcd")).is_ok());
        // Characters, not bytes
        assert!(check(&rule, json!("ééé")).is_ok());
    }

    #[test]
    fn test_optional_empty_value_skips_format_checks() {
        let rule = Rule::new()
            .pattern(Regex::new("^[0-9]+$").unwrap())
            .min_length(4);
        assert!(check(&rule, json!("")).is_ok());
        assert!(rule.check("field", None, &StepData::new()).is_ok());
    }

    #[test]
    fn test_pattern_applies_to_non_string_values() {
        let rule = Rule::new().pattern(Regex::new("^[0-9]+$").unwrap());
        assert!(check(&rule, json!(1234)).is_ok());
        assert!(check(&rule, json!(true)).is_err());
    }

    #[test]
    fn test_first_failure_wins() {
        let rule = Rule::new()
            .required()
            .min_length(10)
            .custom(|_, _| false);
        assert_eq!(check(&rule, json!("")), Err("field is required".to_string()));
        assert_eq!(
            check(&rule, json!("short")),
            Err("field must be at least 10 characters".to_string())
        );
        assert_eq!(check(&rule, json!("long enough!")), Err("field is invalid".to_string()));
    }

    #[test]
    fn test_custom_sees_all_data() {
        let rule = Rule::new().custom(|value, data| value == data.get("password"));
        let mut data = StepData::new();
        data.insert("password".into(), json!("hunter2"));

        assert!(rule.check("confirm", Some(&json!("hunter2")), &data).is_ok());
        assert!(rule.check("confirm", Some(&json!("hunter3")), &data).is_err());
    }

    #[test]
    fn test_custom_message_overrides_default() {
        let rule = Rule::new().required().message("Tell us your name");
        assert_eq!(
            rule.check("name", None, &StepData::new()),
            Err("Tell us your name".to_string())
        );
    }
}
