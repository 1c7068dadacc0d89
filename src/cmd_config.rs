//! Configuration subcommands.

use anyhow::bail;
use chatsweep_config::{Config, ConfigValidator};
use chatsweep_core::PlatformRegistry;

/// Print the effective platform table.
pub(crate) fn platforms(registry: &PlatformRegistry) {
    for platform in registry.platforms() {
        let mut features = vec!["delete"];
        if !platform.move_labels.is_empty() {
            features.push("move");
        }
        println!(
            "{:<10} {:<40} {}",
            platform.name,
            platform.hosts.join(", "),
            features.join(", ")
        );
    }
}

/// Validate `config`; fails when any error is found.
pub(crate) fn check_config(config: &Config) -> anyhow::Result<()> {
    let result = ConfigValidator::validate(config)?;
    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    if !result.is_valid() {
        bail!("Configuration has {} error(s)", result.errors.len());
    }
    println!("Configuration OK ({} warning(s))", result.warnings.len());
    Ok(())
}
