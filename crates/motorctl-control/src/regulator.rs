//! PI Regulator
//!
//! This module provides a proportional-integral regulator with optional
//! output saturation.
//!
//! The integrator is a plain running sum of the error. It is not scaled by a
//! time step (the integral gain absorbs the caller's fixed sampling interval)
//! and it is never clamped: while the output is saturated and the error keeps
//! its sign the integrator keeps growing, which delays recovery once the
//! error reverses.

use crate::bound::bound_value;
use crate::error::ControlError;

/// PI regulator with saturating output.
///
/// ```text
/// e(k) = setpoint(k) - act_value(k)
/// I(k) = I(k-1) + e(k)
/// u(k) = bound(Kp·e(k) + Ki·I(k), min_output, max_output)
/// ```
///
/// There is no reset operation; build a new regulator to start from a zero
/// integrator.
///
/// # Example
///
/// ```
/// use motorctl_control::PiRegulator;
///
/// let mut reg = PiRegulator::new(5.0, 0.03, -48.0, 48.0)?;
/// let u1 = reg.calculate(5.0, 0.0);
/// let u2 = reg.calculate(5.0, 0.0);
/// assert!((u1 - 25.15).abs() < 1e-9);
/// assert!((u2 - 25.3).abs() < 1e-9);
/// # Ok::<(), motorctl_control::ControlError>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PiRegulator {
    kp: f64,
    ki: f64,
    min_output: f64,
    max_output: f64,
    integrator: f64,
    output_limitation_enabled: bool,
    last_error: f64,
    last_output: f64,
    saturated: bool,
}

impl PiRegulator {
    /// Create a new regulator with a zero integrator and limitation enabled.
    ///
    /// Gains may be negative for inverted-sense control.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidBounds`] if `min_output > max_output` or
    /// either bound is NaN.
    pub fn new(kp: f64, ki: f64, min_output: f64, max_output: f64) -> Result<Self, ControlError> {
        // Written so that NaN bounds fail too.
        if !(min_output <= max_output) {
            return Err(ControlError::InvalidBounds {
                min_output,
                max_output,
            });
        }

        Ok(Self {
            kp,
            ki,
            min_output,
            max_output,
            integrator: 0.0,
            output_limitation_enabled: true,
            last_error: 0.0,
            last_output: 0.0,
            saturated: false,
        })
    }

    /// Enable output limitation from the next [`calculate`](Self::calculate) on.
    pub fn enable_output_limitation(&mut self) {
        self.output_limitation_enabled = true;
    }

    /// Disable output limitation from the next [`calculate`](Self::calculate) on.
    pub fn disable_output_limitation(&mut self) {
        self.output_limitation_enabled = false;
    }

    /// Whether outputs are currently bounded.
    pub fn is_output_limitation_enabled(&self) -> bool {
        self.output_limitation_enabled
    }

    /// Calculate the control action for one sampling interval.
    ///
    /// # Arguments
    ///
    /// * `setpoint` - Desired value
    /// * `act_value` - Actual (filtered) value from the feedback path
    #[inline]
    pub fn calculate(&mut self, setpoint: f64, act_value: f64) -> f64 {
        let error = setpoint - act_value;
        self.integrator += error;

        let raw = self.kp * error + self.ki * self.integrator;

        let output = if self.output_limitation_enabled {
            bound_value(raw, self.min_output, self.max_output)
        } else {
            raw
        };

        self.saturated =
            self.output_limitation_enabled && (raw > self.max_output || raw < self.min_output);
        self.last_error = error;
        self.last_output = output;
        output
    }

    /// Proportional and integral gains `(kp, ki)`.
    pub fn gains(&self) -> (f64, f64) {
        (self.kp, self.ki)
    }

    /// Output saturation range `(min_output, max_output)`.
    pub fn output_limits(&self) -> (f64, f64) {
        (self.min_output, self.max_output)
    }

    /// Accumulated error sum.
    pub fn integrator(&self) -> f64 {
        self.integrator
    }

    /// Error of the most recent call, or 0 before the first call.
    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    /// Output of the most recent call, or 0 before the first call.
    pub fn last_output(&self) -> f64 {
        self.last_output
    }

    /// True if the most recent output was cut by the limitation.
    pub fn is_saturated(&self) -> bool {
        self.saturated
    }
}
