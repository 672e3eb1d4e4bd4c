//! Error types for the simulation driver.

use motorctl_control::ControlError;
use thiserror::Error;

/// Errors from configuration loading, simulation setup and trace export.
#[derive(Error, Debug)]
pub enum SimError {
    /// The control core rejected its parameters.
    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    /// A configuration value is out of its valid domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A file extension or format name is not recognised.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML decoding or encoding error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON decoding or encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}
