//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory during session construction
//! - filled from any self-describing input format by an external reader
//! - inspected by the calling optimizer harness

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalError, CalResult};

/// Whether a model quantity is a fixed input or explored by the optimizer.
///
/// Decoded from the raw dataset flags (`0` = fixed, `1` = free); read once at
/// session construction and never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSwitch {
    Fixed,
    Free,
}

impl ParamSwitch {
    /// Decode a raw switch flag. Anything outside `{0, 1}` is rejected so
    /// the four-variant decision table stays exhaustive.
    pub fn from_flag(name: &'static str, value: i64) -> CalResult<Self> {
        match value {
            0 => Ok(ParamSwitch::Fixed),
            1 => Ok(ParamSwitch::Free),
            _ => Err(CalError::UnknownSwitch { name, value }),
        }
    }

    pub fn is_free(self) -> bool {
        matches!(self, ParamSwitch::Free)
    }
}

/// Closed calibration interval `[start, end]` over the forcing time domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl CalibrationWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> CalResult<Self> {
        if start > end {
            return Err(CalError::InvalidWindow {
                reason: format!("start {start} is after end {end}"),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Closed-interval membership test used by both the forcing and the
    /// observation partition.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }
}

/// A named free parameter with its uniform search bounds.
///
/// Opaque `(name, lower, upper)` record handed to the external optimizer;
/// bounds are valid by construction and never re-validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamBound {
    pub name: &'static str,
    pub lower: f64,
    pub upper: f64,
}

impl ParamBound {
    pub fn uniform(name: &'static str, lower: f64, upper: f64) -> Self {
        Self { name, lower, upper }
    }
}

/// Algorithm-family options forwarded to the external objective builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmOptions {
    /// NSGA-II population search.
    Nsga {
        n_pop: u32,
        generations: u32,
        n_obj: u32,
    },
    /// Repetition-count samplers (SCE-UA, Monte Carlo, ...).
    Repetitions { repetitions: u32 },
}

/// Identifiers and options the external objective builder consumes.
///
/// This crate supplies no scoring logic: the algorithm name, metric names and
/// family options pass through to `build_objective` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveSpec {
    pub algorithm: String,
    pub metrics: Vec<String>,
    pub options: AlgorithmOptions,
}

/// Raw configuration record.
///
/// Field names mirror the upstream dataset variables; the file format itself
/// is an external concern. Optional fields are required or ignored depending
/// on `cal_alg` and the switch flags (see [`ConfigRecord::objective_spec`]).
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigRecord {
    pub cal_alg: String,
    pub metrics: Vec<String>,
    /// Model time step, in the same unit the forcing series is sampled at.
    pub dt: f64,
    /// `0` = initial position is a fixed input, `1` = calibrated.
    pub switch_yini: i64,
    /// `0` = long-term trend rate is a fixed input, `1` = calibrated.
    pub switch_vlt: i64,

    #[serde(default)]
    pub n_pop: Option<u32>,
    #[serde(default)]
    pub generations: Option<u32>,
    #[serde(default)]
    pub n_obj: Option<u32>,
    #[serde(default)]
    pub repetitions: Option<u32>,

    /// Fixed trend rate; required when `switch_vlt == 0`.
    #[serde(default)]
    pub vlt: Option<f64>,

    // Calibration window start/end date components.
    pub ysi: i32,
    pub msi: u32,
    pub dsi: u32,
    pub ysf: i32,
    pub msf: u32,
    pub dsf: u32,
}

impl ConfigRecord {
    /// Assemble the calibration window from its date components (midnight
    /// boundaries, matching the upstream convention).
    pub fn window(&self) -> CalResult<CalibrationWindow> {
        let start = window_date("config", self.ysi, self.msi, self.dsi)?;
        let end = window_date("config", self.ysf, self.msf, self.dsf)?;
        CalibrationWindow::new(start, end)
    }

    /// Resolve the algorithm identifier plus its family options.
    pub fn objective_spec(&self) -> CalResult<ObjectiveSpec> {
        let options = if self.cal_alg == "NSGAII" {
            AlgorithmOptions::Nsga {
                n_pop: self.n_pop.ok_or(CalError::MissingConfig { field: "n_pop" })?,
                generations: self
                    .generations
                    .ok_or(CalError::MissingConfig { field: "generations" })?,
                n_obj: self.n_obj.ok_or(CalError::MissingConfig { field: "n_obj" })?,
            }
        } else {
            AlgorithmOptions::Repetitions {
                repetitions: self
                    .repetitions
                    .ok_or(CalError::MissingConfig { field: "repetitions" })?,
            }
        };
        Ok(ObjectiveSpec {
            algorithm: self.cal_alg.clone(),
            metrics: self.metrics.clone(),
            options,
        })
    }
}

fn window_date(series: &'static str, y: i32, m: u32, d: u32) -> CalResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(y, m, d)
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| CalError::MalformedTime {
            series,
            detail: format!("invalid window date components {y:04}-{m:02}-{d:02}"),
        })
}

/// Raw wave-forcing record: parallel arrays of equal length.
#[derive(Debug, Clone, Deserialize)]
pub struct ForcingRecord {
    /// Significant wave height.
    pub hs: Vec<f64>,
    /// Peak period.
    pub tp: Vec<f64>,
    /// Wave direction.
    pub dir: Vec<f64>,
    pub y: Vec<i32>,
    pub m: Vec<u32>,
    pub d: Vec<u32>,
    pub h: Vec<u32>,
}

/// Raw shoreline-observation record: parallel arrays of equal length.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationRecord {
    /// Observed shoreline position.
    pub obs: Vec<f64>,
    pub y: Vec<i32>,
    pub m: Vec<u32>,
    pub d: Vec<u32>,
    pub h: Vec<u32>,
}
