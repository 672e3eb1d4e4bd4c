//! Lowpass Filter (2nd-Order Butterworth IIR)
//!
//! This module provides the feedback filter of the control loop: a digital
//! Butterworth lowpass of order 2 designed with the bilinear transform, and
//! evaluated sample by sample with the direct-form difference equation.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::error::ControlError;

/// 2nd-order IIR lowpass filter.
///
/// Transfer function:
/// ```text
/// H(z) = (b0 + b1·z⁻¹ + b2·z⁻²) / (1 + a1·z⁻¹ + a2·z⁻²)
/// ```
///
/// Input and output histories are kept most-recent-first: index 0 holds the
/// current sample, index 1 the previous one and index 2 the one before.
///
/// # Execution
///
/// - No heap allocations
/// - O(1) time complexity
/// - Mutates both histories on every call, so samples must arrive in time order
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LowpassFilter {
    pass_frequency: f64,
    sampling_frequency: f64,
    /// Numerator coefficients `[b0, b1, b2]`
    b: [f64; 3],
    /// Denominator coefficients `[1, a1, a2]`
    a: [f64; 3],
    /// Input history `[x(k), x(k-1), x(k-2)]`
    x: [f64; 3],
    /// Output history `[y(k), y(k-1), y(k-2)]`
    y: [f64; 3],
}

impl LowpassFilter {
    /// Design a new lowpass filter.
    ///
    /// # Arguments
    ///
    /// * `pass_frequency` - Cutoff (-3 dB) frequency in Hz
    /// * `sampling_frequency` - Rate at which [`calculate_out`](Self::calculate_out)
    ///   is called, in Hz
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidDesignParameters`] if either frequency is
    /// not a positive finite number, or if `pass_frequency` is not below the
    /// Nyquist frequency `sampling_frequency / 2`.
    ///
    /// # Example
    ///
    /// ```
    /// use motorctl_control::LowpassFilter;
    ///
    /// let filter = LowpassFilter::new(2.5, 100.0)?;
    /// let (_, a) = filter.coefficients();
    /// assert_eq!(a[0], 1.0);
    ///
    /// assert!(LowpassFilter::new(60.0, 100.0).is_err());
    /// # Ok::<(), motorctl_control::ControlError>(())
    /// ```
    pub fn new(pass_frequency: f64, sampling_frequency: f64) -> Result<Self, ControlError> {
        validate_design_params(pass_frequency, sampling_frequency)?;
        let (b, a) = butterworth_lowpass_coefficients(pass_frequency, sampling_frequency);

        Ok(Self {
            pass_frequency,
            sampling_frequency,
            b,
            a,
            x: [0.0; 3],
            y: [0.0; 3],
        })
    }

    /// Feed one raw sample and return the filtered value.
    ///
    /// ```text
    /// y(k) = b0·x(k) + b1·x(k-1) + b2·x(k-2) - a1·y(k-1) - a2·y(k-2)
    /// ```
    #[inline]
    pub fn calculate_out(&mut self, x_in: f64) -> f64 {
        // Shift registers: the oldest sample falls off the end.
        self.x = [x_in, self.x[0], self.x[1]];
        self.y = [0.0, self.y[0], self.y[1]];

        let y_out = self.b[0] * self.x[0] + self.b[1] * self.x[1] + self.b[2] * self.x[2]
            - self.a[1] * self.y[1]
            - self.a[2] * self.y[2];

        self.y[0] = y_out;
        y_out
    }

    /// Return the `(b, a)` coefficient arrays. `a[0]` is always 1.
    pub fn coefficients(&self) -> ([f64; 3], [f64; 3]) {
        (self.b, self.a)
    }

    /// Cutoff frequency the filter was designed for, in Hz.
    pub fn pass_frequency(&self) -> f64 {
        self.pass_frequency
    }

    /// Sampling frequency the filter was designed for, in Hz.
    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    /// Most recent output, or 0 before the first call.
    pub fn last_output(&self) -> f64 {
        self.y[0]
    }

    /// Input history `[x(k), x(k-1), x(k-2)]`.
    pub fn input_history(&self) -> [f64; 3] {
        self.x
    }

    /// Output history `[y(k), y(k-1), y(k-2)]`.
    pub fn output_history(&self) -> [f64; 3] {
        self.y
    }
}

fn validate_design_params(
    pass_frequency: f64,
    sampling_frequency: f64,
) -> Result<(), ControlError> {
    let fail = |reason| Err(ControlError::design(pass_frequency, sampling_frequency, reason));

    if !sampling_frequency.is_finite() || sampling_frequency <= 0.0 {
        return fail("sampling frequency must be positive and finite");
    }
    if !pass_frequency.is_finite() || pass_frequency <= 0.0 {
        return fail("pass frequency must be positive and finite");
    }
    if pass_frequency >= sampling_frequency / 2.0 {
        return fail("pass frequency must be below the Nyquist frequency");
    }
    Ok(())
}

/// Butterworth lowpass of order 2 through the bilinear transform.
///
/// The analog cutoff is pre-warped so that the digital -3 dB point lands on
/// `pass_frequency` exactly. The prototype has a single conjugate pole pair at
/// `wa·e^{±j3π/4}`.
fn butterworth_lowpass_coefficients(
    pass_frequency: f64,
    sampling_frequency: f64,
) -> ([f64; 3], [f64; 3]) {
    // Pre-warp
    let c = 2.0 * sampling_frequency;
    let wa = c * (PI * pass_frequency / sampling_frequency).tan();

    // σ ± jω = wa·(cos 3π/4 ± j·sin 3π/4)
    let sigma = -wa * FRAC_1_SQRT_2;
    let omega = wa * FRAC_1_SQRT_2;
    let pole_mag2 = sigma * sigma + omega * omega;

    let d = c * c - 2.0 * sigma * c + pole_mag2;
    let wa2 = wa * wa;

    let b0 = wa2 / d;
    let b1 = 2.0 * wa2 / d;
    let b2 = b0;
    let a1 = 2.0 * (pole_mag2 - c * c) / d;
    let a2 = (c * c + 2.0 * sigma * c + pole_mag2) / d;

    ([b0, b1, b2], [1.0, a1, a2])
}
