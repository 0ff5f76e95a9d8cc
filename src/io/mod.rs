//! Input normalization.
//!
//! - timestamp assembly from Y/M/D/h component arrays (`ingest`)
//! - raw records -> clean series with the derived energy proxy (`ingest`)

pub mod ingest;

pub use ingest::*;
