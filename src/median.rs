use itertools::Itertools;
use tracing::trace;

use crate::model::outcome::PhantomSet;
use crate::model::profile::Profile;

/// Order-statistic median. Even lengths average the two middle values; an
/// empty slice has median `0`.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted = values
        .iter()
        .copied()
        .sorted_by(f64::total_cmp)
        .collect_vec();
    let len = sorted.len();
    if len % 2 == 1 {
        sorted[(len - 1) / 2]
    } else {
        (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
    }
}

/// Median of each alternative's votes merged with the phantoms, one entry per
/// alternative.
pub fn aggregate(profile: &Profile, phantoms: &PhantomSet) -> Vec<f64> {
    (0..profile.n_alternatives())
        .map(|alternative| {
            let votes = profile
                .column(alternative)
                .chain(phantoms.iter().copied())
                .collect_vec();
            let allocation = median(&votes);
            trace!(alternative, allocation, pool = votes.len(), "aggregated");
            allocation
        })
        .collect()
}

/// Rounds to two decimals for display.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
