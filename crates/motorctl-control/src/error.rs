//! Construction error types.
//!
//! Both evaluation operations are total, so errors only arise when a filter
//! or regulator is built from parameters that cannot describe a valid one.

/// Errors from filter design and regulator construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControlError {
    /// The Butterworth design cannot produce a stable digital filter.
    #[error(
        "invalid filter design parameters (pass {pass_frequency} Hz, sampling {sampling_frequency} Hz): {reason}"
    )]
    InvalidDesignParameters {
        /// Requested pass (cutoff) frequency in Hz
        pass_frequency: f64,
        /// Requested sampling frequency in Hz
        sampling_frequency: f64,
        /// Which constraint was violated
        reason: &'static str,
    },

    /// The output saturation range is empty.
    #[error("invalid output bounds: min {min_output} must not exceed max {max_output}")]
    InvalidBounds {
        /// Lower output limit
        min_output: f64,
        /// Upper output limit
        max_output: f64,
    },
}

impl ControlError {
    pub(crate) fn design(
        pass_frequency: f64,
        sampling_frequency: f64,
        reason: &'static str,
    ) -> Self {
        ControlError::InvalidDesignParameters {
            pass_frequency,
            sampling_frequency,
            reason,
        }
    }
}
