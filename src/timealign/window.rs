//! Calibration/validation window splitting.
//!
//! The contract here is **trim-then-split**: the forcing series is first
//! trimmed to start at the first timestamp `>= start`, permanently discarding
//! everything earlier. Calibration and validation index sets are then
//! computed over the trimmed axis, so head-side forcing data can never appear
//! in the validation set — only the tail after `end` can.
//!
//! The observation series is never trimmed; its subsets are computed against
//! the full series with the same closed-window predicate. Observations before
//! `start` therefore land in the validation observation subset while their
//! nearest-index mapping is taken against the post-`end` forcing tail only.
//! That asymmetry is inherited behavior and is preserved on purpose.

use chrono::NaiveDateTime;

use crate::domain::CalibrationWindow;
use crate::error::{CalError, CalResult};
use crate::timealign::nearest::nearest_indices;

/// Output of the trim-then-split pass.
///
/// Forcing index sets are expressed on the *trimmed* axis (`0` is the trim
/// point); observation index sets are expressed on the full observation
/// series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSplit {
    /// Number of leading forcing entries discarded by the trim.
    pub trim_offset: usize,
    /// Trimmed-axis indices with `start <= t <= end`.
    pub idx_calibration: Vec<usize>,
    /// Trimmed-axis indices outside the window (tail after `end` only, by
    /// construction of the trim).
    pub idx_validation: Vec<usize>,
    /// Observation indices inside the window.
    pub idx_obs_window: Vec<usize>,
    /// Observation indices outside the window.
    pub idx_obs_validation: Vec<usize>,
    /// Nearest map: windowed observations -> positions in the windowed
    /// forcing subset. This is what lets the simulation closure subselect
    /// simulated values at observation times.
    pub idx_obs_to_forcing: Vec<usize>,
    /// Nearest map: validation observations -> positions in the validation
    /// forcing subset. Empty whenever either side is empty.
    pub idx_validation_for_obs: Vec<usize>,
}

/// First index with `t >= start`, i.e. the permanent trim point.
pub fn trim_offset(times: &[NaiveDateTime], start: NaiveDateTime) -> CalResult<usize> {
    times
        .iter()
        .position(|&t| t >= start)
        .ok_or_else(|| CalError::InvalidWindow {
            reason: format!("no forcing timestamps at or after window start {start}"),
        })
}

/// Trim the forcing axis and partition both series around `window`.
///
/// Fails fast with [`CalError::InvalidWindow`] when the window lies entirely
/// outside forcing coverage (an empty calibration set would otherwise hand
/// the closure empty arrays).
pub fn split(
    forcing_times: &[NaiveDateTime],
    obs_times: &[NaiveDateTime],
    window: &CalibrationWindow,
) -> CalResult<WindowSplit> {
    let offset = trim_offset(forcing_times, window.start())?;
    let trimmed = &forcing_times[offset..];

    let mut idx_calibration = Vec::new();
    let mut idx_validation = Vec::new();
    for (i, &t) in trimmed.iter().enumerate() {
        if window.contains(t) {
            idx_calibration.push(i);
        } else {
            idx_validation.push(i);
        }
    }
    if idx_calibration.is_empty() {
        return Err(CalError::InvalidWindow {
            reason: format!(
                "no forcing timestamps inside [{}, {}]",
                window.start(),
                window.end()
            ),
        });
    }

    let mut idx_obs_window = Vec::new();
    let mut idx_obs_validation = Vec::new();
    for (i, &t) in obs_times.iter().enumerate() {
        if window.contains(t) {
            idx_obs_window.push(i);
        } else {
            idx_obs_validation.push(i);
        }
    }

    let time_window: Vec<NaiveDateTime> = idx_calibration.iter().map(|&i| trimmed[i]).collect();
    let obs_window_times: Vec<NaiveDateTime> = idx_obs_window.iter().map(|&i| obs_times[i]).collect();
    let idx_obs_to_forcing = nearest_indices(&time_window, &obs_window_times)?;

    // Short-circuit before the indexer: a nearest lookup over an empty
    // validation reference is undefined.
    let idx_validation_for_obs = if !idx_validation.is_empty() && !idx_obs_validation.is_empty() {
        let time_validation: Vec<NaiveDateTime> =
            idx_validation.iter().map(|&i| trimmed[i]).collect();
        let obs_validation_times: Vec<NaiveDateTime> =
            idx_obs_validation.iter().map(|&i| obs_times[i]).collect();
        nearest_indices(&time_validation, &obs_validation_times)?
    } else {
        Vec::new()
    };

    Ok(WindowSplit {
        trim_offset: offset,
        idx_calibration,
        idx_validation,
        idx_obs_window,
        idx_obs_validation,
        idx_obs_to_forcing,
        idx_validation_for_obs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 3, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn daily(from: u32, to: u32) -> Vec<NaiveDateTime> {
        (from..=to).map(day).collect()
    }

    fn window(start: u32, end: u32) -> CalibrationWindow {
        CalibrationWindow::new(day(start), day(end)).unwrap()
    }

    #[test]
    fn trim_keeps_nothing_before_start() {
        let times = daily(1, 10);
        let offset = trim_offset(&times, day(4)).unwrap();
        assert_eq!(offset, 3);
        assert!(times[offset..].iter().all(|&t| t >= day(4)));
    }

    #[test]
    fn trim_fails_when_window_starts_after_coverage() {
        let times = daily(1, 10);
        let err = trim_offset(&times, day(11)).unwrap_err();
        assert!(matches!(err, CalError::InvalidWindow { .. }));
    }

    #[test]
    fn partition_is_disjoint_and_complete_over_trimmed_axis() {
        let forcing = daily(1, 20);
        let split = split(&forcing, &[], &window(5, 12)).unwrap();

        let trimmed_len = forcing.len() - split.trim_offset;
        let mut all: Vec<usize> = split
            .idx_calibration
            .iter()
            .chain(split.idx_validation.iter())
            .copied()
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..trimmed_len).collect::<Vec<_>>());
        assert!(split.idx_calibration.iter().all(|i| !split.idx_validation.contains(i)));
    }

    #[test]
    fn empty_calibration_set_is_rejected() {
        // Daily grid with a gap covering the whole window.
        let mut forcing = daily(1, 5);
        forcing.extend(daily(20, 25));
        let err = split(&forcing, &[], &window(8, 15)).unwrap_err();
        assert!(matches!(err, CalError::InvalidWindow { .. }));
    }

    #[test]
    fn empty_validation_short_circuits_observation_mapping() {
        // Window covers the whole forcing series: nothing left for validation.
        let forcing = daily(3, 8);
        let obs = vec![day(2), day(5)];
        let split = split(&forcing, &obs, &window(3, 8)).unwrap();

        assert!(split.idx_validation.is_empty());
        // Day-2 observation is outside the window, but with no validation
        // forcing entries the mapping must stay empty rather than invoking
        // the indexer on an empty reference.
        assert_eq!(split.idx_obs_validation, vec![0]);
        assert!(split.idx_validation_for_obs.is_empty());
    }

    #[test]
    fn ten_day_scenario_with_window_days_3_to_8() {
        // Forcing: days 1..=10. Observations: days 2, 5, 9. Window: [3, 8].
        let forcing = daily(1, 10);
        let obs = vec![day(2), day(5), day(9)];
        let split = split(&forcing, &obs, &window(3, 8)).unwrap();

        // Trim point is the first timestamp >= day 3.
        assert_eq!(split.trim_offset, 2);
        // Calibration covers days 3..=8; validation is the day-9/10 tail only
        // (days 1-2 are gone after the trim, never "validation").
        assert_eq!(split.idx_calibration, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(split.idx_validation, vec![6, 7]);

        // Only the day-5 observation is inside the window.
        assert_eq!(split.idx_obs_window, vec![1]);
        assert_eq!(split.idx_obs_to_forcing, vec![2]);

        // Days 2 and 9 are validation observations. Both map into the
        // post-window tail [day 9, day 10]: day 9 exactly, day 2 onto the
        // nearest tail entry. The pre-start observation has no matching
        // forcing history left; this asymmetry is inherited behavior.
        assert_eq!(split.idx_obs_validation, vec![0, 2]);
        assert_eq!(split.idx_validation_for_obs, vec![0, 0]);
    }
}
