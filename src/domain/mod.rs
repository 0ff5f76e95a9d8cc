//! Domain types used throughout the calibration pipeline.
//!
//! This module defines:
//!
//! - switch and window configuration (`ParamSwitch`, `CalibrationWindow`)
//! - the optimizer handoff types (`ParamBound`, `ObjectiveSpec`)
//! - raw input records as supplied by the external dataset reader

pub mod types;

pub use types::*;
