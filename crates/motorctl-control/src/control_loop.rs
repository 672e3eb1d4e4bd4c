//! Filter + regulator composition.
//!
//! [`ControlLoop`] runs one control step the way the feedback path is wired:
//! the raw measurement goes through the lowpass filter, and the regulator
//! acts on the filtered value.

use serde::{Deserialize, Serialize};

use crate::error::ControlError;
use crate::filter::LowpassFilter;
use crate::regulator::PiRegulator;

/// Parameters of one filter/regulator pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlLoopConfig {
    /// Lowpass cutoff frequency in Hz
    pub pass_frequency: f64,
    /// Loop sampling frequency in Hz
    pub sampling_frequency: f64,
    /// Proportional gain
    pub kp: f64,
    /// Integral gain (per sample)
    pub ki: f64,
    /// Lower bound of the control action
    pub min_action: f64,
    /// Upper bound of the control action
    pub max_action: f64,
}

impl Default for ControlLoopConfig {
    fn default() -> Self {
        Self {
            pass_frequency: 2.5,
            sampling_frequency: 100.0,
            kp: 5.0,
            ki: 0.03,
            min_action: -48.0,
            max_action: 48.0,
        }
    }
}

impl ControlLoopConfig {
    /// Sampling interval in seconds.
    pub fn sample_period(&self) -> f64 {
        1.0 / self.sampling_frequency
    }
}

/// Result of one [`ControlLoop::step`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControlStep {
    /// Filtered measurement
    pub filtered: f64,
    /// Control action
    pub action: f64,
}

/// A lowpass filter feeding a PI regulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLoop {
    filter: LowpassFilter,
    regulator: PiRegulator,
}

impl ControlLoop {
    /// Build the filter and regulator described by `config`.
    ///
    /// # Errors
    ///
    /// Returns whichever [`ControlError`] the filter design or the regulator
    /// bounds check produces; the filter is checked first.
    pub fn new(config: &ControlLoopConfig) -> Result<Self, ControlError> {
        let filter = LowpassFilter::new(config.pass_frequency, config.sampling_frequency)?;
        let regulator =
            PiRegulator::new(config.kp, config.ki, config.min_action, config.max_action)?;
        Ok(Self { filter, regulator })
    }

    /// Assemble a loop from already-built parts.
    pub fn from_parts(filter: LowpassFilter, regulator: PiRegulator) -> Self {
        Self { filter, regulator }
    }

    /// Run one sampling interval.
    #[inline]
    pub fn step(&mut self, setpoint: f64, measurement: f64) -> ControlStep {
        let filtered = self.filter.calculate_out(measurement);
        let action = self.regulator.calculate(setpoint, filtered);
        ControlStep { filtered, action }
    }

    /// The feedback filter.
    pub fn filter(&self) -> &LowpassFilter {
        &self.filter
    }

    /// The regulator.
    pub fn regulator(&self) -> &PiRegulator {
        &self.regulator
    }

    /// Mutable access to the regulator, for toggling output limitation.
    pub fn regulator_mut(&mut self) -> &mut PiRegulator {
        &mut self.regulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_default_config_builds() -> TestResult {
        let control = ControlLoop::new(&ControlLoopConfig::default())?;
        assert_abs_diff_eq!(control.filter().pass_frequency(), 2.5, epsilon = 0.0);
        assert_eq!(control.regulator().output_limits(), (-48.0, 48.0));
        Ok(())
    }

    #[test]
    fn test_step_filters_before_regulating() -> TestResult {
        let config = ControlLoopConfig::default();
        let mut control = ControlLoop::new(&config)?;
        let mut filter = LowpassFilter::new(config.pass_frequency, config.sampling_frequency)?;
        let mut regulator =
            PiRegulator::new(config.kp, config.ki, config.min_action, config.max_action)?;

        for (sp, y) in [(5.0, 0.0), (5.0, 0.4), (5.0, 1.1), (10.0, 2.0)] {
            let step = control.step(sp, y);
            let filtered = filter.calculate_out(y);
            let action = regulator.calculate(sp, filtered);
            assert_abs_diff_eq!(step.filtered, filtered, epsilon = 0.0);
            assert_abs_diff_eq!(step.action, action, epsilon = 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_filter_reported_first() {
        let config = ControlLoopConfig {
            pass_frequency: 80.0,
            min_action: 1.0,
            max_action: 0.0,
            ..ControlLoopConfig::default()
        };
        assert!(matches!(
            ControlLoop::new(&config),
            Err(ControlError::InvalidDesignParameters { .. })
        ));
    }

    #[test]
    fn test_invalid_bounds_reported() {
        let config = ControlLoopConfig {
            min_action: 1.0,
            max_action: 0.0,
            ..ControlLoopConfig::default()
        };
        assert!(matches!(
            ControlLoop::new(&config),
            Err(ControlError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_sample_period() {
        let period = ControlLoopConfig::default().sample_period();
        assert_abs_diff_eq!(period, 0.01, epsilon = 1e-15);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() -> TestResult {
        let config: ControlLoopConfig = serde_json::from_str(r#"{ "kp": 2.0 }"#)?;
        assert_abs_diff_eq!(config.kp, 2.0, epsilon = 0.0);
        assert_abs_diff_eq!(config.ki, 0.03, epsilon = 0.0);
        assert_abs_diff_eq!(config.max_action, 48.0, epsilon = 0.0);
        Ok(())
    }
}
