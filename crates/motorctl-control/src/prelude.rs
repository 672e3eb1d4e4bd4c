//! Prelude for the control crate.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! # Example
//!
//! ```
//! use motorctl_control::prelude::*;
//!
//! let mut control = ControlLoop::new(&ControlLoopConfig::default())?;
//! let step = control.step(5.0, 0.0);
//! assert!(step.action > 0.0);
//! # Ok::<(), ControlError>(())
//! ```

pub use crate::bound::bound_value;
pub use crate::control_loop::{ControlLoop, ControlLoopConfig, ControlStep};
pub use crate::error::ControlError;
pub use crate::filter::LowpassFilter;
pub use crate::regulator::PiRegulator;
