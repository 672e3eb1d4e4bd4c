//! Validate a configuration file without running it

use std::path::Path;

use anyhow::{Context, Result};
use motorctl_sim::SimConfig;
use tracing::info;

use crate::error::CliError;
use crate::output;

pub fn execute(path: &Path, json: bool) -> Result<()> {
    let config = load(path)?;
    config
        .validate()
        .map_err(CliError::Config)
        .with_context(|| format!("{} is not a valid configuration", path.display()))?;

    info!(path = %path.display(), "Configuration is valid");
    output::print_validation(path, &config, json);
    Ok(())
}

/// Read a configuration file, tagging failures as configuration errors.
pub fn load(path: &Path) -> Result<SimConfig> {
    SimConfig::from_path(path)
        .map_err(CliError::Config)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))
}
