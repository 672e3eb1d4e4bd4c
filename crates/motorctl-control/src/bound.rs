//! Numeric limitation.

/// Limit `value` to the closed range `[min_value, max_value]`.
///
/// Returns `max_value` above the range, `min_value` below it and `value`
/// unchanged otherwise. Unlike [`f64::clamp`] this never panics, even for
/// reversed or NaN bounds; a NaN `value` is passed through.
///
/// # Example
///
/// ```
/// use motorctl_control::bound_value;
///
/// assert_eq!(bound_value(60.0, -48.0, 48.0), 48.0);
/// assert_eq!(bound_value(-60.0, -48.0, 48.0), -48.0);
/// assert_eq!(bound_value(12.5, -48.0, 48.0), 12.5);
/// ```
#[inline]
#[must_use]
pub fn bound_value(value: f64, min_value: f64, max_value: f64) -> f64 {
    if value > max_value {
        max_value
    } else if value < min_value {
        min_value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_value_inside_range() {
        assert!((bound_value(0.5, -1.0, 1.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bound_value_above_max() {
        assert_eq!(bound_value(100.0, -48.0, 48.0).to_bits(), 48.0f64.to_bits());
    }

    #[test]
    fn test_bound_value_below_min() {
        assert_eq!(
            bound_value(-100.0, -48.0, 48.0).to_bits(),
            (-48.0f64).to_bits()
        );
    }

    #[test]
    fn test_bound_value_on_the_edges() {
        assert_eq!(bound_value(48.0, -48.0, 48.0).to_bits(), 48.0f64.to_bits());
        assert_eq!(
            bound_value(-48.0, -48.0, 48.0).to_bits(),
            (-48.0f64).to_bits()
        );
    }

    #[test]
    fn test_bound_value_degenerate_range() {
        assert_eq!(bound_value(3.0, 1.0, 1.0).to_bits(), 1.0f64.to_bits());
        assert_eq!(bound_value(-3.0, 1.0, 1.0).to_bits(), 1.0f64.to_bits());
    }

    #[test]
    fn test_bound_value_infinite_limits() {
        let v = bound_value(1e300, f64::NEG_INFINITY, f64::INFINITY);
        assert_eq!(v.to_bits(), 1e300f64.to_bits());
    }

    #[test]
    fn test_bound_value_nan_passthrough() {
        assert!(bound_value(f64::NAN, -1.0, 1.0).is_nan());
    }
}
