// ABOUTME: Step descriptors consumed by renderers
// A step carries display text plus either static content or a slot the renderer resolves

use crate::validation::{RuleSet, StepValidator};

use super::controller::WizardController;

/// What a step shows in its content area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepContent {
    /// Plain text shown above the step's fields
    StaticText(String),
    /// Named slot the renderer fills in on its own (e.g. "summary")
    RenderSlot(String),
}

impl Default for StepContent {
    fn default() -> Self {
        Self::StaticText(String::new())
    }
}

/// Input field collected on a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Step-data key the field writes to
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    /// Mask the value when rendering
    pub secret: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            placeholder: None,
            secret: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// One stage of a wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Key used to look up the step's validation rules
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub content: StepContent,
    pub fields: Vec<FieldDescriptor>,
}

impl StepDescriptor {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: None,
            content: StepContent::default(),
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content(mut self, content: StepContent) -> Self {
        self.content = content;
        self
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Indicator state of a step, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Accessible,
    Disabled,
}

/// Full description of a wizard: its steps and their validation rules
#[derive(Debug, Clone, Default)]
pub struct WizardDefinition {
    pub title: String,
    pub steps: Vec<StepDescriptor>,
    pub rules: RuleSet,
}

impl WizardDefinition {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&StepDescriptor> {
        self.steps.get(index)
    }

    /// Find the field descriptor for a step-data key on any step
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.steps.iter().find_map(|s| s.field(name))
    }

    /// Build a controller sized to this definition
    pub fn controller(&self, allow_skip_steps: bool) -> WizardController {
        WizardController::new(self.total_steps()).with_skip_steps(allow_skip_steps)
    }

    /// Build a validator over this definition's rules
    pub fn validator(&self) -> StepValidator {
        StepValidator::new(self.rules.clone())
    }
}
