//! Piecewise-constant setpoint profile.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// One constant stretch of the profile.
///
/// The segment is active strictly inside `(start, end)`; at the boundary
/// instants themselves the profile falls back to its default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetpointSegment {
    /// Segment start time in seconds (exclusive)
    pub start: f64,
    /// Segment end time in seconds (exclusive)
    pub end: f64,
    /// Setpoint while the segment is active
    pub value: f64,
}

impl SetpointSegment {
    /// Create a segment.
    pub fn new(start: f64, end: f64, value: f64) -> Self {
        Self { start, end, value }
    }

    /// Whether `time` lies strictly inside the segment.
    pub fn contains(&self, time: f64) -> bool {
        time > self.start && time < self.end
    }
}

/// Setpoint as a function of time.
///
/// Segments are checked in order and the first one containing `t` wins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SetpointProfile {
    /// Value outside every segment
    #[serde(default)]
    pub default_value: f64,
    /// Ordered segments
    #[serde(default)]
    pub segments: Vec<SetpointSegment>,
}

impl SetpointProfile {
    /// A profile that holds `value` forever.
    pub fn constant(value: f64) -> Self {
        Self {
            default_value: value,
            segments: Vec::new(),
        }
    }

    /// Rest, step to 5, step to 10, back to 5, rest.
    ///
    /// ```text
    ///  2 s < t <  5 s :  5
    ///  5 s < t < 10 s : 10
    /// 10 s < t < 15 s :  5
    /// otherwise       :  0
    /// ```
    pub fn step_sequence() -> Self {
        Self {
            default_value: 0.0,
            segments: vec![
                SetpointSegment::new(2.0, 5.0, 5.0),
                SetpointSegment::new(5.0, 10.0, 10.0),
                SetpointSegment::new(10.0, 15.0, 5.0),
            ],
        }
    }

    /// Append a segment. Returns `self` for chaining.
    pub fn with_segment(mut self, start: f64, end: f64, value: f64) -> Self {
        self.segments.push(SetpointSegment::new(start, end, value));
        self
    }

    /// Setpoint at `time`.
    pub fn value_at(&self, time: f64) -> f64 {
        self.segments
            .iter()
            .find(|segment| segment.contains(time))
            .map_or(self.default_value, |segment| segment.value)
    }

    /// Check that every value is finite and every segment is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] naming the offending segment.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.default_value.is_finite() {
            return Err(SimError::invalid("setpoint default value must be finite"));
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if !(segment.start.is_finite() && segment.end.is_finite() && segment.value.is_finite())
            {
                return Err(SimError::invalid(format!(
                    "setpoint segment {index} has non-finite fields"
                )));
            }
            if segment.start >= segment.end {
                return Err(SimError::invalid(format!(
                    "setpoint segment {index} must start before it ends ({} >= {})",
                    segment.start, segment.end
                )));
            }
        }
        Ok(())
    }
}
