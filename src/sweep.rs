use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compute;
use crate::error::MechanismError;
use crate::model::outcome::Outcome;
use crate::model::profile::Profile;
use crate::model::scheme::Scheme;

/// Largest number of steps a sweep grid may hold.
pub const MAX_GRID_STEPS: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Distance between consecutive `t` values of a sweep.
    pub step: f64,
    /// Upper bound on halvings when balancing a moving scheme.
    pub bisection_rounds: usize,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            step: 0.005,
            bisection_rounds: 64,
        }
    }
}

/// Largest `t` found at which a moving scheme stays within budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    pub t: f64,
    pub outcome: Outcome,
}

struct State {
    feasible_t: f64,
    feasible: Outcome,
    infeasible_t: f64,
    n_rounds: usize,
}

/// `0, step, 2·step, ...` up to and including `1`. Steps that would need
/// more than [`MAX_GRID_STEPS`] steps are rejected.
pub fn grid(step: f64) -> Result<Vec<f64>, MechanismError> {
    if !(step.is_finite() && step > 0.0) || 1.0 / step > MAX_GRID_STEPS as f64 {
        return Err(MechanismError::InvalidStep { step });
    }
    let n_steps = (1.0 / step).ceil() as usize;
    Ok((0..=n_steps).map(|i| (i as f64 * step).min(1.0)).collect())
}

/// Evaluates the mechanism at every point of the `t` grid.
pub fn sweep(
    profile: &Profile,
    scheme: Scheme,
    params: &Params,
) -> Result<Vec<(f64, Outcome)>, MechanismError> {
    grid(params.step)?
        .into_iter()
        .map(|t| Ok((t, compute(profile, scheme, t)?)))
        .collect()
}

/// Bisects `t` for a moving scheme, keeping the feasible end of the bracket.
///
/// At `t = 0` both moving schemes put every phantom at 0, so every allocation
/// is 0 and the lower end always starts feasible. The returned outcome is
/// therefore always within budget.
pub fn balance(
    profile: &Profile,
    scheme: Scheme,
    params: &Params,
) -> Result<Balance, MechanismError> {
    if !scheme.is_moving() {
        return Err(MechanismError::NotMoving { scheme });
    }
    let top = compute(profile, scheme, 1.0)?;
    if top.feasible {
        return Ok(Balance {
            t: 1.0,
            outcome: top,
        });
    }
    let mut state = State {
        feasible_t: 0.0,
        feasible: compute(profile, scheme, 0.0)?,
        infeasible_t: 1.0,
        n_rounds: 0,
    };
    while state.n_rounds < params.bisection_rounds {
        let mid = state.feasible_t + (state.infeasible_t - state.feasible_t) / 2.0;
        if mid <= state.feasible_t || mid >= state.infeasible_t {
            break;
        }
        let outcome = compute(profile, scheme, mid)?;
        if outcome.feasible {
            state.feasible_t = mid;
            state.feasible = outcome;
        } else {
            state.infeasible_t = mid;
        }
        state.n_rounds += 1;
    }
    debug!(
        scheme = %scheme,
        t = state.feasible_t,
        sum = state.feasible.sum,
        rounds = state.n_rounds,
        "balanced"
    );
    Ok(Balance {
        t: state.feasible_t,
        outcome: state.feasible,
    })
}
