//! Time-grid alignment.
//!
//! Responsibilities:
//!
//! - nearest-timestamp index lookup between two series of different
//!   lengths/rates (`nearest`)
//! - trim-then-split partitioning of the record into calibration and
//!   validation subsets (`window`)

pub mod nearest;
pub mod window;

pub use nearest::*;
pub use window::*;
