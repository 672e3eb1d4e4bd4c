//! First-order plant model.

/// `dy/dt = -gain·y + u`, integrated with explicit Euler.
///
/// For a positive gain the plant is a stable lag whose steady state for a
/// constant input `u` is `u / gain`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrderPlant {
    gain: f64,
    value: f64,
}

impl FirstOrderPlant {
    /// Create a plant at `initial_value`.
    pub fn new(gain: f64, initial_value: f64) -> Self {
        Self {
            gain,
            value: initial_value,
        }
    }

    /// Integrate one step of length `dt` with input `input`; returns the new output.
    #[inline]
    pub fn advance(&mut self, input: f64, dt: f64) -> f64 {
        let derivative = -self.gain * self.value + input;
        self.value += derivative * dt;
        self.value
    }

    /// Add `offset` directly to the state; returns the new output.
    #[inline]
    pub fn perturb(&mut self, offset: f64) -> f64 {
        self.value += offset;
        self.value
    }

    /// Current output.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Model gain `k`.
    pub fn gain(&self) -> f64 {
        self.gain
    }
}
