//! Free-parameter selection.
//!
//! A 2x2 decision table over (trend rate fixed/free) x (initial position
//! fixed/free). Every variant explores `a`, `b`, `cacr`, `cero`; `Yini` and
//! `vlt` join the set when their switch is free. The table is closed: there
//! is no fifth case.
//!
//! `a`, `cacr` and `cero` are sampled as positive magnitudes here and negated
//! inside the simulation closure — the model's internal sign convention
//! differs from the search space.

use crate::domain::{ParamBound, ParamSwitch};

const A_BOUNDS: (f64, f64) = (1e-3, 2.0);
const B_BOUNDS: (f64, f64) = (1e-1, 1e3);
const CACR_BOUNDS: (f64, f64) = (1e-5, 6e-1);
const CERO_BOUNDS: (f64, f64) = (1e-5, 6e-1);
const VLT_BOUNDS: (f64, f64) = (-1e2, 1e2);

/// The free-parameter set for one switch combination, in the order the
/// simulation closure reads its parameter vector.
///
/// `obs` is the full, unwindowed observation series: the `Yini` search range
/// is `[0.5 * min(obs), 1.5 * max(obs)]` over all observations, windowed or
/// not.
pub fn free_parameters(
    switch_yini: ParamSwitch,
    switch_vlt: ParamSwitch,
    obs: &[f64],
) -> Vec<ParamBound> {
    let mut params = vec![
        ParamBound::uniform("a", A_BOUNDS.0, A_BOUNDS.1),
        ParamBound::uniform("b", B_BOUNDS.0, B_BOUNDS.1),
        ParamBound::uniform("cacr", CACR_BOUNDS.0, CACR_BOUNDS.1),
        ParamBound::uniform("cero", CERO_BOUNDS.0, CERO_BOUNDS.1),
    ];

    if switch_yini.is_free() {
        let (obs_min, obs_max) = obs.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        );
        params.push(ParamBound::uniform("Yini", 0.5 * obs_min, 1.5 * obs_max));
    }
    if switch_vlt.is_free() {
        params.push(ParamBound::uniform("vlt", VLT_BOUNDS.0, VLT_BOUNDS.1));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParamSwitch::{Fixed, Free};

    fn names(params: &[ParamBound]) -> Vec<&'static str> {
        params.iter().map(|p| p.name).collect()
    }

    #[test]
    fn four_variants_have_expected_sets() {
        let obs = [10.0, 20.0, 30.0];

        assert_eq!(names(&free_parameters(Fixed, Fixed, &obs)), ["a", "b", "cacr", "cero"]);
        assert_eq!(
            names(&free_parameters(Free, Fixed, &obs)),
            ["a", "b", "cacr", "cero", "Yini"]
        );
        assert_eq!(
            names(&free_parameters(Fixed, Free, &obs)),
            ["a", "b", "cacr", "cero", "vlt"]
        );
        assert_eq!(
            names(&free_parameters(Free, Free, &obs)),
            ["a", "b", "cacr", "cero", "Yini", "vlt"]
        );
    }

    #[test]
    fn counts_are_4_5_5_6_and_core_always_present() {
        let obs = [1.0];
        for (yini, vlt, expected) in [
            (Fixed, Fixed, 4),
            (Free, Fixed, 5),
            (Fixed, Free, 5),
            (Free, Free, 6),
        ] {
            let params = free_parameters(yini, vlt, &obs);
            assert_eq!(params.len(), expected);
            let n = names(&params);
            for core in ["a", "b", "cacr", "cero"] {
                assert!(n.contains(&core));
            }
        }
    }

    #[test]
    fn yini_bounds_come_from_the_full_observation_series() {
        let obs = [12.0, 4.0, 40.0, 8.0];
        let params = free_parameters(Free, Fixed, &obs);
        let yini = params.iter().find(|p| p.name == "Yini").unwrap();
        assert!((yini.lower - 2.0).abs() < 1e-12);
        assert!((yini.upper - 60.0).abs() < 1e-12);
    }

    #[test]
    fn core_bounds_match_the_search_space() {
        let params = free_parameters(Fixed, Fixed, &[0.0]);
        assert_eq!((params[0].lower, params[0].upper), (1e-3, 2.0));
        assert_eq!((params[1].lower, params[1].upper), (1e-1, 1e3));
        assert_eq!((params[2].lower, params[2].upper), (1e-5, 6e-1));
        assert_eq!((params[3].lower, params[3].upper), (1e-5, 6e-1));
    }
}
