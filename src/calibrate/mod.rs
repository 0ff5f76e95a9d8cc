//! Parameter-space configuration and the optimizer-facing closure.
//!
//! Responsibilities:
//!
//! - select the free-parameter set implied by the two switch flags (`params`)
//! - build the simulation closure the external optimizer evaluates
//!   (`closure`), behind the [`ShorelineModel`] integrator seam

pub mod closure;
pub mod params;

pub use closure::*;
pub use params::*;
