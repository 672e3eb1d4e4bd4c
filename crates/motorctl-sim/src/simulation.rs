//! The simulation loop.

use motorctl_control::ControlLoop;
use tracing::{debug, info, trace, warn};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::noise::MeasurementNoise;
use crate::plant::FirstOrderPlant;
use crate::trace::{SimulationTrace, TraceSample};

/// `count` evenly spaced instants from 0 to `duration`, both ends included.
///
/// `count == 1` yields `[0.0]` and `count == 0` an empty grid.
pub fn time_grid(duration: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        duration / (count - 1) as f64
    } else {
        0.0
    };
    let last = count.saturating_sub(1);
    (0..count).map(move |i| {
        if i == last && count > 1 {
            duration
        } else {
            i as f64 * step
        }
    })
}

/// A configured closed-loop run: setpoint, plant, noise, filter and regulator.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    control: ControlLoop,
    plant: FirstOrderPlant,
    noise: MeasurementNoise,
}

impl Simulation {
    /// Validate `config` and build every component.
    ///
    /// # Errors
    ///
    /// Returns the first validation or construction error.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut control = ControlLoop::new(&config.control)?;
        if !config.output_limitation {
            control.regulator_mut().disable_output_limitation();
        }
        let plant = FirstOrderPlant::new(config.plant.gain, config.plant.initial_value);
        let noise = MeasurementNoise::new(config.noise.std_dev, config.noise.seed)?;

        debug!(
            coefficients = ?control.filter().coefficients(),
            seed = noise.seed(),
            "Simulation components built"
        );

        Ok(Self {
            config,
            control,
            plant,
            noise,
        })
    }

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Seed of the measurement noise generator.
    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }

    /// Run the whole time grid and return the recorded trace.
    pub fn run(mut self) -> SimulationTrace {
        let dt = self.config.sample_period();
        let count = self.config.sample_count();

        info!(
            steps = count,
            duration = self.config.duration,
            seed = self.noise.seed(),
            output_limitation = self.control.regulator().is_output_limitation_enabled(),
            "Starting simulation"
        );

        let mut samples = Vec::with_capacity(count);
        let mut saturated_steps = 0usize;
        let mut action = 0.0;
        let mut previous_setpoint = None;

        for time in time_grid(self.config.duration, count) {
            let setpoint = self.config.setpoint.value_at(time);
            let changed = previous_setpoint
                .is_some_and(|previous: f64| previous.to_bits() != setpoint.to_bits());
            if changed {
                debug!(time, setpoint, "Setpoint changed");
            }
            previous_setpoint = Some(setpoint);

            self.plant.advance(action, dt);
            let measurement = self.plant.perturb(self.noise.sample());

            let step = self.control.step(setpoint, measurement);
            action = step.action;

            if self.control.regulator().is_saturated() {
                if saturated_steps == 0 {
                    warn!(
                        time,
                        integrator = self.control.regulator().integrator(),
                        "Regulator output saturated"
                    );
                }
                saturated_steps += 1;
            }

            trace!(time, setpoint, measurement, filtered = step.filtered, action, "Step");

            samples.push(TraceSample {
                time,
                setpoint,
                measurement,
                filtered: step.filtered,
                action,
            });
        }

        let trace = SimulationTrace {
            sample_period: dt,
            seed: self.noise.seed(),
            samples,
            saturated_steps,
        };

        let summary = trace.summary();
        info!(
            steps = summary.steps,
            saturated_steps = summary.saturated_steps,
            final_error = summary.final_error,
            integral_abs_error = summary.integral_abs_error,
            "Simulation finished"
        );

        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn quiet_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.noise.std_dev = 0.0;
        config
    }

    #[test]
    fn test_time_grid_matches_linspace() {
        let grid: Vec<f64> = time_grid(20.0, 2000).collect();
        assert_eq!(grid.len(), 2000);
        assert_abs_diff_eq!(grid[0], 0.0, epsilon = 0.0);
        assert_abs_diff_eq!(grid[1], 20.0 / 1999.0, epsilon = 1e-15);
        assert_abs_diff_eq!(grid[1999], 20.0, epsilon = 0.0);
    }

    #[test]
    fn test_time_grid_edge_counts() {
        assert_eq!(time_grid(5.0, 0).count(), 0);
        let single: Vec<f64> = time_grid(5.0, 1).collect();
        assert_eq!(single, vec![0.0]);
    }

    #[test]
    fn test_run_records_every_step() -> TestResult {
        let trace = Simulation::new(quiet_config())?.run();
        assert_eq!(trace.samples.len(), 2000);
        assert_abs_diff_eq!(trace.sample_period, 0.01, epsilon = 1e-15);
        Ok(())
    }

    #[test]
    fn test_first_steps_at_rest() -> TestResult {
        let trace = Simulation::new(quiet_config())?.run();
        // Setpoint 0 and no noise: nothing moves before t = 2 s.
        for sample in trace.samples.iter().take_while(|s| s.time <= 2.0) {
            assert_abs_diff_eq!(sample.action, 0.0, epsilon = 0.0);
            assert_abs_diff_eq!(sample.measurement, 0.0, epsilon = 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_first_step_action_after_setpoint_change() -> TestResult {
        let trace = Simulation::new(quiet_config())?.run();
        let first = trace
            .samples
            .iter()
            .find(|s| s.setpoint > 0.0)
            .ok_or("setpoint never rises")?;
        // Plant and filter still at rest: pure 5·5 + 0.03·5.
        assert_abs_diff_eq!(first.action, 25.15, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_quiet_runs_are_identical() -> TestResult {
        let a = Simulation::new(quiet_config())?.run();
        let b = Simulation::new(quiet_config())?.run();
        assert_eq!(a.samples, b.samples);
        Ok(())
    }

    #[test]
    fn test_seeded_runs_are_identical() -> TestResult {
        let mut config = SimConfig::default();
        config.noise.seed = Some(17);
        let a = Simulation::new(config.clone())?.run();
        let b = Simulation::new(config)?.run();
        assert_eq!(a.seed, 17);
        assert_eq!(a.samples, b.samples);
        Ok(())
    }

    #[test]
    fn test_disabled_limitation_is_applied() -> TestResult {
        let mut config = quiet_config();
        config.output_limitation = false;
        let sim = Simulation::new(config)?;
        assert!(!sim.control.regulator().is_output_limitation_enabled());

        let trace = sim.run();
        assert_eq!(trace.saturated_steps, 0);
        Ok(())
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimConfig::default();
        config.control.sampling_frequency = -1.0;
        assert!(Simulation::new(config).is_err());
    }
}
