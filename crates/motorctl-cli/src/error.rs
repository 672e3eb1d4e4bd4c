//! Error types for the motorctl CLI

use motorctl_sim::SimError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration rejected: {0}")]
    Config(SimError),

    #[error("Export failed: {0}")]
    Export(SimError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Config(_) => 2,
            CliError::Export(_) => 3,
        }
    }
}
