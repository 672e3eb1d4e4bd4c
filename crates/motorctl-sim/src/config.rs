//! Simulation configuration.
//!
//! A configuration file is YAML (`.yaml`, `.yml`) or JSON (`.json`). Every
//! field has a default, so a file only needs to name what it changes.

use std::path::Path;

use motorctl_control::{ControlLoop, ControlLoopConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimError;
use crate::setpoint::SetpointProfile;

/// Largest number of samples a single run may record.
///
/// Every sample is kept in memory, so this caps a trace at a few hundred MB.
pub const MAX_SAMPLE_COUNT: usize = 10_000_000;

/// Plant model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantConfig {
    /// `k` in `dy/dt = -k·y + u`
    pub gain: f64,
    /// Output at `t = 0`
    pub initial_value: f64,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            gain: 0.5,
            initial_value: 0.0,
        }
    }
}

/// Measurement noise parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Standard deviation of the additive Gaussian noise; 0 disables it
    pub std_dev: f64,
    /// RNG seed; drawn at random when absent
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            std_dev: 0.01,
            seed: None,
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Filter and regulator parameters
    pub control: ControlLoopConfig,
    /// Whether the regulator output is bounded
    pub output_limitation: bool,
    /// Simulated time span in seconds
    pub duration: f64,
    /// Plant model
    pub plant: PlantConfig,
    /// Measurement noise
    pub noise: NoiseConfig,
    /// Setpoint over time
    pub setpoint: SetpointProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            control: ControlLoopConfig::default(),
            output_limitation: true,
            duration: 20.0,
            plant: PlantConfig::default(),
            noise: NoiseConfig::default(),
            setpoint: SetpointProfile::step_sequence(),
        }
    }
}

impl SimConfig {
    /// Load a configuration file, picking the decoder from its extension.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnsupportedFormat`] for unknown extensions, or the
    /// I/O or decoding error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let contents = std::fs::read_to_string(path)?;
        let config = match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&contents)?,
            "json" => Self::from_json_str(&contents)?,
            other => {
                return Err(SimError::UnsupportedFormat(format!(
                    "configuration extension '{other}' (expected yaml, yml or json)"
                )));
            }
        };

        debug!(path = %path.display(), "Loaded simulation configuration");
        Ok(config)
    }

    /// Decode a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, SimError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Decode a JSON document.
    pub fn from_json_str(contents: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Encode as YAML.
    pub fn to_yaml_string(&self) -> Result<String, SimError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Sampling interval in seconds.
    pub fn sample_period(&self) -> f64 {
        self.control.sample_period()
    }

    /// Number of simulated samples, `round(duration · sampling_frequency)`.
    ///
    /// Only meaningful for a validated configuration; out-of-range products
    /// saturate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample_count(&self) -> usize {
        let count = self.raw_sample_count();
        if count.is_finite() && count > 0.0 {
            count as usize
        } else {
            0
        }
    }

    fn raw_sample_count(&self) -> f64 {
        (self.duration * self.control.sampling_frequency).round()
    }

    /// Check every parameter before a simulation is built.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Control`] when the filter or regulator would reject
    /// their parameters, and [`SimError::InvalidConfiguration`] for any other
    /// out-of-domain value.
    pub fn validate(&self) -> Result<(), SimError> {
        ControlLoop::new(&self.control)?;

        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(SimError::invalid(format!(
                "duration must be positive and finite, got {}",
                self.duration
            )));
        }
        #[allow(clippy::cast_precision_loss)]
        let max_samples = MAX_SAMPLE_COUNT as f64;
        if !(self.raw_sample_count() <= max_samples) {
            return Err(SimError::invalid(format!(
                "duration of {} s at {} Hz exceeds the limit of {MAX_SAMPLE_COUNT} samples",
                self.duration, self.control.sampling_frequency
            )));
        }
        if self.sample_count() < 2 {
            return Err(SimError::invalid(
                "duration must cover at least two sampling intervals",
            ));
        }
        if !self.plant.gain.is_finite() || !self.plant.initial_value.is_finite() {
            return Err(SimError::invalid("plant parameters must be finite"));
        }
        if !self.noise.std_dev.is_finite() || self.noise.std_dev < 0.0 {
            return Err(SimError::invalid(format!(
                "noise standard deviation must be non-negative and finite, got {}",
                self.noise.std_dev
            )));
        }
        self.setpoint.validate()?;

        Ok(())
    }
}
