// ABOUTME: Step and field definitions as they appear in the config file
// Converted into step descriptors and a validation rule set at startup

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ConfigError;
use crate::validation::{Rule, RuleSet};
use crate::wizard::{FieldDescriptor, StepContent, StepDescriptor, WizardDefinition};

/// Slot name the terminal renderer fills with a data summary
pub const SUMMARY_SLOT: &str = "summary";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepConfig {
    /// Key used for validation rules; must be unique
    pub key: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Static text shown above the fields
    #[serde(default)]
    pub content: Option<String>,

    /// Named render slot; takes precedence over `content`
    #[serde(default)]
    pub slot: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Step-data key
    pub name: String,

    pub label: String,

    #[serde(default)]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub secret: bool,

    #[serde(default)]
    pub rule: Option<RuleConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub required: bool,

    /// Regular expression the value must match
    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub min_length: Option<usize>,

    #[serde(default)]
    pub max_length: Option<usize>,

    #[serde(default)]
    pub message: Option<String>,

    /// Value must equal this other step-data key (e.g. password confirmation)
    #[serde(default)]
    pub matches_field: Option<String>,
}

impl RuleConfig {
    fn build(&self, step: &str, field: &str) -> Result<Rule, ConfigError> {
        let mut rule = Rule::new();
        rule.required = self.required;
        rule.min_length = self.min_length;
        rule.max_length = self.max_length;
        rule.message = self.message.clone();

        if let Some(pattern) = &self.pattern {
            let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                step: step.to_string(),
                field: field.to_string(),
                source,
            })?;
            rule = rule.pattern(regex);
        }

        if let Some(other) = self.matches_field.clone() {
            rule = rule.custom(move |value, data| value == data.get(&other));
        }

        Ok(rule)
    }
}

/// Build the wizard definition from configured steps
pub fn build_definition(
    title: &str,
    steps: &[StepConfig],
) -> Result<WizardDefinition, ConfigError> {
    if steps.is_empty() {
        return Err(ConfigError::NoSteps);
    }

    let mut seen = HashSet::new();
    for step in steps {
        if !seen.insert(step.key.as_str()) {
            return Err(ConfigError::DuplicateStepKey(step.key.clone()));
        }
    }

    let field_names: HashSet<&str> = steps
        .iter()
        .flat_map(|s| s.fields.iter().map(|f| f.name.as_str()))
        .collect();

    let mut definition = WizardDefinition::new(title);
    for step in steps {
        let content = match (&step.slot, &step.content) {
            (Some(slot), _) => StepContent::RenderSlot(slot.clone()),
            (None, Some(text)) => StepContent::StaticText(text.clone()),
            (None, None) => StepContent::default(),
        };

        let mut descriptor = StepDescriptor::new(&step.key, &step.title).with_content(content);
        descriptor.description = step.description.clone();

        for field in &step.fields {
            let mut field_descriptor = FieldDescriptor::new(&field.name, &field.label);
            field_descriptor.placeholder = field.placeholder.clone();
            field_descriptor.secret = field.secret;
            descriptor = descriptor.with_field(field_descriptor);

            let Some(rule_config) = &field.rule else {
                continue;
            };
            if let Some(target) = &rule_config.matches_field {
                if !field_names.contains(target.as_str()) {
                    return Err(ConfigError::UnknownField {
                        step: step.key.clone(),
                        field: field.name.clone(),
                        target: target.clone(),
                    });
                }
            }
            definition
                .rules
                .insert(&step.key, &field.name, rule_config.build(&step.key, &field.name)?);
        }

        definition.steps.push(descriptor);
    }

    Ok(definition)
}

fn field(name: &str, label: &str, rule: RuleConfig) -> FieldConfig {
    FieldConfig {
        name: name.to_string(),
        label: label.to_string(),
        placeholder: None,
        secret: false,
        rule: Some(rule),
    }
}

/// Built-in sign-up wizard: account, profile, review
pub fn default_steps() -> Vec<StepConfig> {
    vec![
        StepConfig {
            key: "account".to_string(),
            title: "Account".to_string(),
            description: Some("Create your login".to_string()),
            content: Some("We'll use your email to sign you in.".to_string()),
            slot: None,
            fields: vec![
                FieldConfig {
                    placeholder: Some("you@example.com".to_string()),
                    ..field(
                        "email",
                        "Email",
                        RuleConfig {
                            required: true,
                            pattern: Some("^[^@\\s]+@[^@\\s]+$".to_string()),
                            message: Some("Enter a valid email address".to_string()),
                            ..RuleConfig::default()
                        },
                    )
                },
                FieldConfig {
                    secret: true,
                    ..field(
                        "password",
                        "Password",
                        RuleConfig {
                            required: true,
                            min_length: Some(8),
                            ..RuleConfig::default()
                        },
                    )
                },
                FieldConfig {
                    secret: true,
                    ..field(
                        "confirm_password",
                        "Confirm password",
                        RuleConfig {
                            required: true,
                            matches_field: Some("password".to_string()),
                            message: Some("Passwords do not match".to_string()),
                            ..RuleConfig::default()
                        },
                    )
                },
            ],
        },
        StepConfig {
            key: "profile".to_string(),
            title: "Profile".to_string(),
            description: Some("Tell us about yourself".to_string()),
            content: None,
            slot: None,
            fields: vec![
                field(
                    "name",
                    "Full name",
                    RuleConfig {
                        required: true,
                        max_length: Some(64),
                        ..RuleConfig::default()
                    },
                ),
                field(
                    "bio",
                    "Short bio",
                    RuleConfig {
                        max_length: Some(160),
                        ..RuleConfig::default()
                    },
                ),
            ],
        },
        StepConfig {
            key: "review".to_string(),
            title: "Review".to_string(),
            description: Some("Check your details".to_string()),
            content: None,
            slot: Some(SUMMARY_SLOT.to_string()),
            fields: Vec::new(),
        },
    ]
}
