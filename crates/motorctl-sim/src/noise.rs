//! Gaussian measurement noise.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::error::SimError;

/// Additive zero-mean Gaussian noise with a reproducible seed.
#[derive(Debug, Clone)]
pub struct MeasurementNoise {
    distribution: Option<Normal<f64>>,
    rng: StdRng,
    seed: u64,
}

impl MeasurementNoise {
    /// Create a noise source with standard deviation `std_dev`.
    ///
    /// A zero standard deviation produces a silent source. Without a `seed`
    /// one is drawn at random; [`seed`](Self::seed) reports it so the run can
    /// be repeated.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `std_dev` is negative or
    /// not finite.
    pub fn new(std_dev: f64, seed: Option<u64>) -> Result<Self, SimError> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(SimError::invalid(format!(
                "noise standard deviation must be non-negative and finite, got {std_dev}"
            )));
        }

        let distribution = if std_dev > 0.0 {
            Some(Normal::new(0.0, std_dev).map_err(|e| SimError::invalid(e.to_string()))?)
        } else {
            None
        };

        let seed = seed.unwrap_or_else(rand::random);
        Ok(Self {
            distribution,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    /// A source that always returns 0.
    pub fn silent() -> Self {
        Self {
            distribution: None,
            rng: StdRng::seed_from_u64(0),
            seed: 0,
        }
    }

    /// Draw one noise sample.
    #[inline]
    pub fn sample(&mut self) -> f64 {
        match &self.distribution {
            Some(normal) => normal.sample(&mut self.rng),
            None => 0.0,
        }
    }

    /// Seed the generator was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether this source ever produces non-zero samples.
    pub fn is_enabled(&self) -> bool {
        self.distribution.is_some()
    }
}
