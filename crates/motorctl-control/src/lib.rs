//! Discrete-Time Control Core for motorctl
//!
//! This crate provides the two stateful building blocks of a sampled speed
//! control loop, plus the bounding helper they share.
//!
//! # Overview
//!
//! - **Filter**: 2nd-order Butterworth IIR lowpass for smoothing noisy feedback
//! - **Regulator**: PI regulator with optional output saturation
//! - **Bound**: Numeric limitation shared by the regulator
//! - **Control loop**: One filter followed by one regulator, stepped together
//!
//! # Execution Model
//!
//! Every operation is a synchronous computation over owned state:
//! - No heap allocations in `calculate_out`, `calculate` or `step`
//! - O(1) time complexity for all operations
//! - No syscalls, I/O or logging in evaluation paths
//! - Callers must invoke the evaluation functions once per sampling interval,
//!   in time order
//!
//! # Example
//!
//! ```
//! use motorctl_control::prelude::*;
//!
//! let mut filter = LowpassFilter::new(2.5, 100.0)?;
//! let mut regulator = PiRegulator::new(5.0, 0.03, -48.0, 48.0)?;
//!
//! // In the control loop (100 Hz):
//! let filtered = filter.calculate_out(0.0);
//! let action = regulator.calculate(5.0, filtered);
//! assert!((action - 25.15).abs() < 1e-9);
//! # Ok::<(), ControlError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod bound;
pub mod control_loop;
pub mod error;
pub mod filter;
pub mod prelude;
pub mod regulator;

pub use bound::bound_value;
pub use control_loop::{ControlLoop, ControlLoopConfig, ControlStep};
pub use error::ControlError;
pub use filter::LowpassFilter;
pub use regulator::PiRegulator;

/// A specialized `Result` type for control construction.
pub type Result<T> = std::result::Result<T, ControlError>;
