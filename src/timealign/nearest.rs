//! Nearest-timestamp index lookup.
//!
//! Pure brute-force absolute-difference scan: for each query timestamp,
//! return the index of the closest reference timestamp, ties broken by the
//! smallest index (first minimum encountered in ascending scan).
//!
//! A single-element reference always maps to index 0 regardless of distance;
//! no out-of-range rejection is performed. The model deliberately does not
//! know whether an observation falls outside forcing coverage.

use chrono::NaiveDateTime;
use rayon::prelude::*;

use crate::error::{CalError, CalResult};

/// Index of the reference timestamp closest to `query`.
pub fn index_of_nearest(reference: &[NaiveDateTime], query: NaiveDateTime) -> CalResult<usize> {
    if reference.is_empty() {
        return Err(CalError::EmptyReference);
    }
    Ok(scan_nearest(reference, query))
}

/// Elementwise nearest lookup; output order matches `queries`.
///
/// The per-query scans are independent, so they run in parallel.
pub fn nearest_indices(
    reference: &[NaiveDateTime],
    queries: &[NaiveDateTime],
) -> CalResult<Vec<usize>> {
    if reference.is_empty() {
        return Err(CalError::EmptyReference);
    }
    Ok(queries
        .par_iter()
        .map(|&q| scan_nearest(reference, q))
        .collect())
}

fn scan_nearest(reference: &[NaiveDateTime], query: NaiveDateTime) -> usize {
    let mut best = 0usize;
    let mut best_dist = (reference[0] - query).abs();
    for (i, &t) in reference.iter().enumerate().skip(1) {
        let dist = (t - query).abs();
        // Strict `<` keeps the first minimum on ties.
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
