//! `shoreline-cal` library crate.
//!
//! Configures calibration of a shoreline-evolution model against observed
//! shoreline positions:
//!
//! - aligns high-rate wave forcing and sparse observations onto a common
//!   discrete time grid
//! - partitions the aligned record into a calibration window and the
//!   validation remainder
//! - selects the free-parameter set implied by the two switch flags
//! - builds the simulation closure handed to an external optimizer
//!
//! The physical integrator and the optimizer are external collaborators:
//! the integrator sits behind [`calibrate::ShorelineModel`], and the
//! optimizer receives identifiers/options via [`domain::ObjectiveSpec`]
//! rather than any scoring logic from this crate.

pub mod calibrate;
pub mod domain;
pub mod error;
pub mod io;
pub mod session;
pub mod timealign;
