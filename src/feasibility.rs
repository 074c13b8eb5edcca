use tracing::debug;

use crate::model::outcome::Feasibility;

/// Total budget the allocations share.
pub const BUDGET: f64 = 1.0;

/// Sums the allocations and compares against [`BUDGET`] exactly, without any
/// tolerance.
pub fn evaluate(allocations: &[f64]) -> Feasibility {
    let sum: f64 = allocations.iter().sum();
    let feasible = sum <= BUDGET;
    if !feasible {
        debug!(sum, alternatives = allocations.len(), "allocations exceed budget");
    }
    Feasibility { sum, feasible }
}
