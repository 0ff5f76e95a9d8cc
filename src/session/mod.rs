//! Calibration session construction.
//!
//! [`CalibrationSession::build`] performs the whole single-pass setup:
//!
//! raw records -> timestamps -> energy proxy -> trim-then-split -> aligned
//! arrays -> fixed-value derivation
//!
//! After construction the session is immutable. The simulation closure and
//! the external optimizer only ever read it, so candidate evaluations may run
//! concurrently over a shared `&CalibrationSession` without locks.

use chrono::NaiveDateTime;
use log::debug;

use crate::calibrate::{self, ValueSource};
use crate::domain::{
    CalibrationWindow, ConfigRecord, ForcingRecord, ObjectiveSpec, ObservationRecord, ParamBound,
    ParamSwitch,
};
use crate::error::{CalError, CalResult};
use crate::io::{ForcingSeries, ObservationSeries};
use crate::timealign::{nearest_indices, split};

/// One calibration setup: aligned arrays, switch state, fixed values and the
/// optimizer handoff data. Owns everything it exposes; nothing is shared
/// across sessions.
#[derive(Debug, Clone)]
pub struct CalibrationSession {
    dt: f64,
    window: CalibrationWindow,
    switch_yini: ParamSwitch,
    switch_vlt: ParamSwitch,
    objective: ObjectiveSpec,

    // Forcing, trimmed to start at the window trim point.
    time: Vec<NaiveDateTime>,
    energy: Vec<f64>,

    // Windowed forcing subset (the arrays the model integrates over).
    time_window: Vec<NaiveDateTime>,
    energy_window: Vec<f64>,
    idx_calibration: Vec<usize>,
    idx_validation: Vec<usize>,

    // Observations (never trimmed) and their windowed subset.
    time_obs: Vec<NaiveDateTime>,
    obs: Vec<f64>,
    obs_window: Vec<f64>,
    idx_obs_window: Vec<usize>,
    idx_obs_validation: Vec<usize>,

    // Index mappings onto the forcing axes.
    idx_obs: Vec<usize>,
    idx_obs_to_forcing: Vec<usize>,
    idx_validation_for_obs: Vec<usize>,

    // Fixed values; `Some` exactly when the matching switch is `Fixed`.
    yini: Option<f64>,
    vlt: Option<f64>,
}

impl CalibrationSession {
    /// Construct a session from the three raw records.
    ///
    /// All error cases (§ error taxonomy) surface here; nothing is retried.
    pub fn build(
        cfg: &ConfigRecord,
        forcing: &ForcingRecord,
        observations: &ObservationRecord,
    ) -> CalResult<Self> {
        let window = cfg.window()?;
        let switch_yini = ParamSwitch::from_flag("switch_Yini", cfg.switch_yini)?;
        let switch_vlt = ParamSwitch::from_flag("switch_vlt", cfg.switch_vlt)?;
        let objective = cfg.objective_spec()?;

        let vlt = match switch_vlt {
            ParamSwitch::Fixed => Some(cfg.vlt.ok_or(CalError::MissingConfig { field: "vlt" })?),
            ParamSwitch::Free => None,
        };

        let forcing = ForcingSeries::from_record(forcing)?;
        let obs = ObservationSeries::from_record(observations)?;

        let parts = split(&forcing.time, &obs.time, &window)?;

        let time: Vec<NaiveDateTime> = forcing.time[parts.trim_offset..].to_vec();
        let energy: Vec<f64> = forcing.energy[parts.trim_offset..].to_vec();

        let time_window: Vec<NaiveDateTime> =
            parts.idx_calibration.iter().map(|&i| time[i]).collect();
        let energy_window: Vec<f64> = parts.idx_calibration.iter().map(|&i| energy[i]).collect();

        let obs_window: Vec<f64> = parts.idx_obs_window.iter().map(|&i| obs.value[i]).collect();
        if obs_window.is_empty() {
            return Err(CalError::InvalidWindow {
                reason: format!(
                    "no observations inside [{}, {}]",
                    window.start(),
                    window.end()
                ),
            });
        }

        // Fixed initial position comes from the first *windowed* observation,
        // not the first raw one.
        let yini = match switch_yini {
            ParamSwitch::Fixed => Some(obs_window[0]),
            ParamSwitch::Free => None,
        };

        // Full-series observation mapping against the trimmed forcing axis.
        let idx_obs = nearest_indices(&time, &obs.time)?;

        debug!(
            "session: {} forcing steps after trim ({} in window, {} validation), \
             {} observations ({} in window)",
            time.len(),
            parts.idx_calibration.len(),
            parts.idx_validation.len(),
            obs.value.len(),
            obs_window.len()
        );

        Ok(Self {
            dt: cfg.dt,
            window,
            switch_yini,
            switch_vlt,
            objective,
            time,
            energy,
            time_window,
            energy_window,
            idx_calibration: parts.idx_calibration,
            idx_validation: parts.idx_validation,
            time_obs: obs.time,
            obs: obs.value,
            obs_window,
            idx_obs_window: parts.idx_obs_window,
            idx_obs_validation: parts.idx_obs_validation,
            idx_obs,
            idx_obs_to_forcing: parts.idx_obs_to_forcing,
            idx_validation_for_obs: parts.idx_validation_for_obs,
            yini,
            vlt,
        })
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn window(&self) -> &CalibrationWindow {
        &self.window
    }

    pub fn switch_yini(&self) -> ParamSwitch {
        self.switch_yini
    }

    pub fn switch_vlt(&self) -> ParamSwitch {
        self.switch_vlt
    }

    /// Identifiers/options for the external objective builder.
    pub fn objective_spec(&self) -> &ObjectiveSpec {
        &self.objective
    }

    /// Forcing time axis after the permanent head trim.
    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    /// Energy proxy over the trimmed forcing axis.
    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    pub fn time_window(&self) -> &[NaiveDateTime] {
        &self.time_window
    }

    /// Energy subset the model integrates over.
    pub fn energy_window(&self) -> &[f64] {
        &self.energy_window
    }

    pub fn idx_calibration(&self) -> &[usize] {
        &self.idx_calibration
    }

    pub fn idx_validation(&self) -> &[usize] {
        &self.idx_validation
    }

    pub fn time_obs(&self) -> &[NaiveDateTime] {
        &self.time_obs
    }

    /// Full, unwindowed observation series.
    pub fn obs(&self) -> &[f64] {
        &self.obs
    }

    /// The target values the optimizer scores predictions against.
    pub fn observed_calibration(&self) -> &[f64] {
        &self.obs_window
    }

    pub fn idx_obs_window(&self) -> &[usize] {
        &self.idx_obs_window
    }

    pub fn idx_obs_validation(&self) -> &[usize] {
        &self.idx_obs_validation
    }

    /// All observations mapped onto the trimmed forcing axis.
    pub fn idx_obs(&self) -> &[usize] {
        &self.idx_obs
    }

    /// Windowed observations mapped onto the windowed forcing subset.
    pub fn idx_obs_to_forcing(&self) -> &[usize] {
        &self.idx_obs_to_forcing
    }

    /// Validation observations mapped onto the validation forcing tail;
    /// empty when either side is empty.
    pub fn idx_validation_for_obs(&self) -> &[usize] {
        &self.idx_validation_for_obs
    }

    /// Fixed initial position (`Some` iff `switch_Yini` is fixed).
    pub fn fixed_initial_position(&self) -> Option<f64> {
        self.yini
    }

    /// Fixed trend rate (`Some` iff `switch_vlt` is fixed).
    pub fn fixed_trend_rate(&self) -> Option<f64> {
        self.vlt
    }

    /// The free-parameter set for this session's switch combination.
    pub fn free_parameters(&self) -> Vec<ParamBound> {
        calibrate::free_parameters(self.switch_yini, self.switch_vlt, &self.obs)
    }

    /// Length of the parameter vector the simulation closure expects.
    pub fn parameter_count(&self) -> usize {
        4 + usize::from(self.switch_yini.is_free()) + usize::from(self.switch_vlt.is_free())
    }

    /// Where the closure sources the initial position on each invocation.
    pub fn initial_position_source(&self) -> ValueSource {
        match self.yini {
            Some(v) => ValueSource::Fixed(v),
            None => ValueSource::FromVector(4),
        }
    }

    /// Where the closure sources the trend rate on each invocation. When
    /// both axes are free, `vlt` sits after `Yini` in the vector.
    pub fn trend_rate_source(&self) -> ValueSource {
        match self.vlt {
            Some(v) => ValueSource::Fixed(v),
            None => ValueSource::FromVector(if self.switch_yini.is_free() { 5 } else { 4 }),
        }
    }
}
