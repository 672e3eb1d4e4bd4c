//! Closed-Loop Simulation Driver for motorctl
//!
//! This crate drives the control core from `motorctl-control` against a
//! simulated plant, one sampling interval at a time:
//!
//! 1. evaluate the setpoint profile at the current time
//! 2. advance the plant with the previous control action
//! 3. inject measurement noise
//! 4. filter the measurement and compute the next control action
//! 5. record the sample
//!
//! # Example
//!
//! ```
//! use motorctl_sim::{SimConfig, Simulation};
//!
//! let mut config = SimConfig::default();
//! config.noise.std_dev = 0.0;
//!
//! let trace = Simulation::new(config)?.run();
//! let summary = trace.summary();
//! assert_eq!(summary.steps, 2000);
//! # Ok::<(), motorctl_sim::SimError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod noise;
pub mod plant;
pub mod setpoint;
pub mod simulation;
pub mod trace;

pub use config::{MAX_SAMPLE_COUNT, NoiseConfig, PlantConfig, SimConfig};
pub use error::SimError;
pub use noise::MeasurementNoise;
pub use plant::FirstOrderPlant;
pub use setpoint::{SetpointProfile, SetpointSegment};
pub use simulation::{Simulation, time_grid};
pub use trace::{CSV_HEADER, SimulationTrace, TraceFormat, TraceSample, TraceSummary};

/// A specialized `Result` type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;
