// ABOUTME: CLI steps command - list configured steps, fields, and rules

use super::OutputFormat;
use anyhow::Result;
use stepwise::config::{RuleConfig, StepConfig, WizardConfig};

/// Execute the steps command
pub fn execute(config: &WizardConfig, format: OutputFormat) -> Result<()> {
    // Fail on invalid patterns before printing anything
    config.definition()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config.steps)?),
        OutputFormat::Text => output_text(&config.steps),
    }
    Ok(())
}

fn output_text(steps: &[StepConfig]) {
    for (idx, step) in steps.iter().enumerate() {
        println!("{}. {} [{}]", idx + 1, step.title, step.key);
        if let Some(description) = &step.description {
            println!("   {description}");
        }
        for field in &step.fields {
            let rules = field.rule.as_ref().map(describe_rule).unwrap_or_default();
            if rules.is_empty() {
                println!("   - {} ({})", field.label, field.name);
            } else {
                println!("   - {} ({}): {rules}", field.label, field.name);
            }
        }
    }
}

/// One-line summary of a rule, e.g. "required, 8..64 chars"
fn describe_rule(rule: &RuleConfig) -> String {
    let mut parts = Vec::new();
    if rule.required {
        parts.push("required".to_string());
    }
    match (rule.min_length, rule.max_length) {
        (Some(min), Some(max)) => parts.push(format!("{min}..{max} chars")),
        (Some(min), None) => parts.push(format!("min {min} chars")),
        (None, Some(max)) => parts.push(format!("max {max} chars")),
        (None, None) => {}
    }
    if let Some(pattern) = &rule.pattern {
        parts.push(format!("matches /{pattern}/"));
    }
    if let Some(other) = &rule.matches_field {
        parts.push(format!("equals {other}"));
    }
    parts.join(", ")
}
