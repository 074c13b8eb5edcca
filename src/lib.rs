//! Phantom mechanisms for aggregating budget proposals.
//!
//! Each voter reports how much of a unit budget every alternative should
//! receive. The mechanism adds `n + 1` phantom votes, chosen by a [`Scheme`],
//! and gives each alternative the median of its real and phantom votes
//! (Freeman, Pennock, Peters and Wortman Vaughan, "Truthful Aggregation of
//! Budget Proposals", EC '19).

pub mod error;
pub mod feasibility;
pub mod median;
pub mod model;
pub mod parse;
pub mod phantom;
pub mod sample;
pub mod sweep;

use tracing::debug;

pub use error::{MechanismError, ProfileError};
pub use model::outcome::{Feasibility, Outcome, PhantomSet};
pub use model::profile::{Profile, Vote};
pub use model::scheme::Scheme;

/// One evaluation request.
#[derive(Debug, Clone, PartialEq)]
pub struct MechanismInput {
    pub profile: Profile,
    pub scheme: Scheme,
    pub t: f64,
}

/// Runs phantom generation, per-alternative aggregation and the budget check
/// for one input.
pub fn compute_mechanism(input: &MechanismInput) -> Result<Outcome, MechanismError> {
    compute(&input.profile, input.scheme, input.t)
}

pub fn compute(profile: &Profile, scheme: Scheme, t: f64) -> Result<Outcome, MechanismError> {
    let phantoms = phantom::generate(scheme, profile.n_voters(), t)?;
    let allocations = median::aggregate(profile, &phantoms);
    let Feasibility { sum, feasible } = feasibility::evaluate(&allocations);
    debug!(
        scheme = %scheme,
        n = profile.n_voters(),
        m = profile.n_alternatives(),
        t,
        sum,
        feasible,
        "computed mechanism"
    );
    Ok(Outcome {
        phantoms,
        allocations,
        sum,
        feasible,
    })
}
