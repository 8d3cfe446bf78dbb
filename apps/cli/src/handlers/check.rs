use anyhow::{Context, Result};
use recap::domain::config::SecurityConfig;
use recap::kernel::config::{SecretState, load_secrets};
use std::path::Path;

/// Prints the state of every key and fails when a required one is unusable.
pub(crate) fn run(secrets_file: Option<&Path>) -> Result<()> {
    let default_file = SecurityConfig::default().secrets_file;
    let path = secrets_file.unwrap_or(default_file.as_path());
    let secrets = load_secrets(Some(path))?;

    println!("Deployment check ({})", path.display());
    for status in secrets.statuses() {
        let state = match status.state {
            SecretState::Present(source) => format!("ok ({source})"),
            SecretState::Missing => "MISSING".to_owned(),
            SecretState::Placeholder => "PLACEHOLDER".to_owned(),
        };
        let kind = if status.required { "required" } else { "optional" };
        println!("  {:<18} {kind:<9} {state}", status.key);
    }
    for warning in secrets.warnings() {
        println!("  warning: {warning}");
    }

    secrets.validate().context("Deployment check failed")?;
    println!("All required keys are configured.");
    Ok(())
}
