//! Crate-wide error type.
//!
//! Every failure in this crate is a session-construction failure: once a
//! [`crate::session::CalibrationSession`] exists, the simulation closure it
//! produces is pure numeric code and never constructs one of these. Any
//! failure inside the external integrator propagates to the optimizer
//! unmodified.

use thiserror::Error;

/// Crate-wide result alias.
pub type CalResult<T> = Result<T, CalError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalError {
    /// Parallel time-component arrays disagree in length within one series,
    /// or a component tuple does not form a representable calendar time.
    #[error("malformed time axis for `{series}`: {detail}")]
    MalformedTime { series: &'static str, detail: String },

    /// Nearest-timestamp lookup attempted against an empty reference array.
    ///
    /// Callers are expected to short-circuit before reaching this (see the
    /// empty-validation handling in [`crate::timealign::window`]).
    #[error("nearest-timestamp lookup against an empty reference array")]
    EmptyReference,

    /// The calibration window is inverted or leaves a mandatory subset empty.
    #[error("invalid calibration window: {reason}")]
    InvalidWindow { reason: String },

    /// A switch flag outside `{0, 1}`. The two valid values select the four
    /// parameter-set variants exhaustively.
    #[error("switch `{name}` must be 0 (fixed) or 1 (free), got {value}")]
    UnknownSwitch { name: &'static str, value: i64 },

    /// A config field required by the selected algorithm or switch state is
    /// absent (e.g. fixed `vlt`, NSGA-II population fields).
    #[error("config field `{field}` is required by the selected configuration")]
    MissingConfig { field: &'static str },
}
