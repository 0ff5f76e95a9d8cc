//! Simulation closure factory.
//!
//! The external optimizer repeatedly evaluates candidate parameter vectors.
//! Each evaluation:
//!
//! - applies the sign convention (`a`, `cacr`, `cero` negated)
//! - substitutes the session's fixed value for any axis that is not free
//! - integrates the model over the windowed energy series
//! - subselects the simulated positions at the observation-aligned indices
//!
//! One parametrized closure covers all four switch combinations via
//! [`ValueSource`], instead of four near-duplicate closures. The closure is
//! `Fn`, deterministic, and borrows the session immutably, so population
//! optimizers can evaluate a whole generation concurrently against one
//! shared session.

use crate::session::CalibrationSession;

/// The external shoreline evolution integrator.
///
/// Implementations are expected to be pure: same inputs, same output. The
/// second returned series is a secondary model output that calibration does
/// not consume.
pub trait ShorelineModel {
    #[allow(clippy::too_many_arguments)]
    fn simulate(
        &self,
        energy: &[f64],
        dt: f64,
        a: f64,
        b: f64,
        cacr: f64,
        cero: f64,
        yini: f64,
        vlt: f64,
    ) -> (Vec<f64>, Vec<f64>);
}

/// Where a per-axis model input comes from on each closure invocation:
/// a session-fixed value, or a slot of the candidate parameter vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueSource {
    Fixed(f64),
    FromVector(usize),
}

impl ValueSource {
    fn resolve(self, par: &[f64]) -> f64 {
        match self {
            ValueSource::Fixed(v) => v,
            ValueSource::FromVector(i) => par[i],
        }
    }
}

/// Build the function handed to the external optimizer.
///
/// The parameter vector is positional in the exact order
/// [`CalibrationSession::free_parameters`] declares:
/// `[a, b, cacr, cero]`, then `Yini` if free, then `vlt` if free.
pub fn build_simulation<'a, M: ShorelineModel>(
    model: &'a M,
    session: &'a CalibrationSession,
) -> impl Fn(&[f64]) -> Vec<f64> + 'a {
    let yini_source = session.initial_position_source();
    let vlt_source = session.trend_rate_source();
    let n_free = session.parameter_count();

    move |par: &[f64]| {
        debug_assert_eq!(par.len(), n_free);

        let a = -par[0];
        let b = par[1];
        let cacr = -par[2];
        let cero = -par[3];
        let yini = yini_source.resolve(par);
        let vlt = vlt_source.resolve(par);

        let (positions, _) = model.simulate(
            session.energy_window(),
            session.dt(),
            a,
            b,
            cacr,
            cero,
            yini,
            vlt,
        );
        session
            .idx_obs_to_forcing()
            .iter()
            .map(|&i| positions[i])
            .collect()
    }
}
