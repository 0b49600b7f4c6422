// ABOUTME: CLI show/clear commands - inspect or delete the saved progress snapshot

use super::OutputFormat;
use anyhow::{Context, Result};
use stepwise::config::WizardConfig;
use stepwise::persistence::{SnapshotStore, WizardSnapshot};

/// Execute the show command
pub fn show(config: &WizardConfig, format: OutputFormat) -> Result<()> {
    let Some(store) = config.persistence.store()? else {
        println!("Persistence is disabled in the config.");
        return Ok(());
    };

    let Some(blob) = store.load()? else {
        match format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Text => println!("No saved progress at {}", store.path().display()),
        }
        return Ok(());
    };

    let snapshot = WizardSnapshot::from_blob(&blob)
        .with_context(|| format!("Failed to decode snapshot at {}", store.path().display()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => output_text(config, &snapshot),
    }
    Ok(())
}

fn output_text(config: &WizardConfig, snapshot: &WizardSnapshot) {
    let title = config
        .steps
        .get(snapshot.current_step)
        .map_or("?", |step| step.title.as_str());

    println!("Saved at:  {}", snapshot.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!(
        "Step:      {} of {} ({title})",
        snapshot.current_step + 1,
        snapshot.total_steps
    );
    println!("Completed: {:?}", snapshot.completed_steps);
    println!("Finished:  {}", if snapshot.is_complete { "yes" } else { "no" });

    if snapshot.step_data.is_empty() {
        return;
    }
    println!();
    println!("{:<24} VALUE", "FIELD");
    println!("{}", "-".repeat(60));

    let secret = |name: &str| {
        config
            .steps
            .iter()
            .flat_map(|step| step.fields.iter())
            .any(|field| field.name == name && field.secret)
    };
    for (name, value) in &snapshot.step_data {
        let shown = if secret(name) {
            "********".to_string()
        } else {
            match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            }
        };
        println!("{name:<24} {shown}");
    }
}

/// Execute the clear command
pub fn clear(config: &WizardConfig) -> Result<()> {
    let Some(mut store) = config.persistence.store()? else {
        println!("Persistence is disabled in the config.");
        return Ok(());
    };

    store
        .clear()
        .with_context(|| format!("Failed to remove {}", store.path().display()))?;
    println!("Cleared saved progress ({})", store.path().display());
    Ok(())
}
