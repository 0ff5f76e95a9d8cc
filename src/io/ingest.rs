//! Record ingest and normalization.
//!
//! This module turns the raw parallel-array records supplied by the external
//! dataset reader into clean time series that are safe to align and split.
//!
//! Design goals:
//! - **Strict validation** of the parallel time-component arrays
//! - **Deterministic behavior** (pure elementwise transforms, no hidden state)
//! - **Separation of concerns**: no windowing or parameter logic here

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{ForcingRecord, ObservationRecord};
use crate::error::{CalError, CalResult};

/// Build absolute timestamps from four parallel component arrays.
///
/// Fails with [`CalError::MalformedTime`] when the arrays disagree in length
/// or a component tuple is not a representable calendar time.
pub fn build_timestamps(
    series: &'static str,
    y: &[i32],
    m: &[u32],
    d: &[u32],
    h: &[u32],
) -> CalResult<Vec<NaiveDateTime>> {
    let n = y.len();
    if m.len() != n || d.len() != n || h.len() != n {
        return Err(CalError::MalformedTime {
            series,
            detail: format!(
                "component lengths differ: y={}, m={}, d={}, h={}",
                y.len(),
                m.len(),
                d.len(),
                h.len()
            ),
        });
    }

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let t = NaiveDate::from_ymd_opt(y[i], m[i], d[i])
            .and_then(|date| date.and_hms_opt(h[i], 0, 0))
            .ok_or_else(|| CalError::MalformedTime {
                series,
                detail: format!(
                    "invalid components at index {i}: {:04}-{:02}-{:02} {:02}h",
                    y[i], m[i], d[i], h[i]
                ),
            })?;
        out.push(t);
    }
    Ok(out)
}

/// Normalized wave forcing: a time axis plus the energy proxy driving the
/// model. `hs`/`tp`/`dir` are carried through unchanged for consumers of the
/// wider model family; only `energy` feeds this calibration.
#[derive(Debug, Clone)]
pub struct ForcingSeries {
    pub time: Vec<NaiveDateTime>,
    pub hs: Vec<f64>,
    pub tp: Vec<f64>,
    pub dir: Vec<f64>,
    /// `hs^2`, the wave-energy proxy.
    pub energy: Vec<f64>,
}

impl ForcingSeries {
    pub fn from_record(rec: &ForcingRecord) -> CalResult<Self> {
        let time = build_timestamps("forcing", &rec.y, &rec.m, &rec.d, &rec.h)?;
        ensure_value_len("forcing", "hs", rec.hs.len(), time.len())?;
        ensure_value_len("forcing", "tp", rec.tp.len(), time.len())?;
        ensure_value_len("forcing", "dir", rec.dir.len(), time.len())?;

        let energy = rec.hs.iter().map(|hs| hs * hs).collect();
        Ok(Self {
            time,
            hs: rec.hs.clone(),
            tp: rec.tp.clone(),
            dir: rec.dir.clone(),
            energy,
        })
    }
}

/// Normalized shoreline observations.
#[derive(Debug, Clone)]
pub struct ObservationSeries {
    pub time: Vec<NaiveDateTime>,
    pub value: Vec<f64>,
}

impl ObservationSeries {
    pub fn from_record(rec: &ObservationRecord) -> CalResult<Self> {
        let time = build_timestamps("observations", &rec.y, &rec.m, &rec.d, &rec.h)?;
        ensure_value_len("observations", "obs", rec.obs.len(), time.len())?;
        Ok(Self {
            time,
            value: rec.obs.clone(),
        })
    }
}

fn ensure_value_len(
    series: &'static str,
    name: &'static str,
    got: usize,
    expected: usize,
) -> CalResult<()> {
    if got != expected {
        return Err(CalError::MalformedTime {
            series,
            detail: format!("`{name}` has {got} entries but the time axis has {expected}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_timestamps_from_components() {
        let ts = build_timestamps("forcing", &[2020, 2020], &[1, 1], &[1, 2], &[0, 12]).unwrap();
        assert_eq!(ts.len(), 2);
        assert_eq!(
            ts[1],
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap().and_hms_opt(12, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_component_length_mismatch() {
        let err = build_timestamps("forcing", &[2020, 2020], &[1], &[1, 2], &[0, 0]).unwrap_err();
        assert!(matches!(err, CalError::MalformedTime { series: "forcing", .. }));
    }

    #[test]
    fn rejects_unrepresentable_date() {
        // February 30th does not exist.
        let err = build_timestamps("observations", &[2020], &[2], &[30], &[0]).unwrap_err();
        assert!(matches!(err, CalError::MalformedTime { series: "observations", .. }));
    }

    #[test]
    fn forcing_energy_is_squared_height() {
        let rec = ForcingRecord {
            hs: vec![1.0, 2.0, 3.0],
            tp: vec![8.0, 9.0, 10.0],
            dir: vec![270.0, 275.0, 280.0],
            y: vec![2020; 3],
            m: vec![1; 3],
            d: vec![1, 2, 3],
            h: vec![0; 3],
        };
        let series = ForcingSeries::from_record(&rec).unwrap();
        assert_eq!(series.energy, vec![1.0, 4.0, 9.0]);
        assert_eq!(series.tp, rec.tp);
    }

    #[test]
    fn forcing_rejects_value_time_mismatch() {
        let rec = ForcingRecord {
            hs: vec![1.0, 2.0],
            tp: vec![8.0, 9.0, 10.0],
            dir: vec![270.0, 275.0, 280.0],
            y: vec![2020; 3],
            m: vec![1; 3],
            d: vec![1, 2, 3],
            h: vec![0; 3],
        };
        assert!(ForcingSeries::from_record(&rec).is_err());
    }
}
