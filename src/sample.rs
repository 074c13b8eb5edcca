use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::model::profile::{Profile, Vote};

/// Random profile source for simulations and randomized checks.
pub struct Sampler {
    rng: SmallRng,
}

impl Sampler {
    pub fn seeded(seed: u64) -> Sampler {
        Sampler {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Every vote drawn independently from `[0, 1]`.
    pub fn uniform_profile(&mut self, n: usize, m: usize) -> Profile {
        let rows = (0..n)
            .map(|_| (0..m).map(|_| self.rng.gen_range(0.0..=1.0)).collect())
            .collect();
        Profile::from_valid_rows(rows)
    }

    /// Each voter divides the whole budget: rows sum to 1 up to rounding.
    pub fn normalized_profile(&mut self, n: usize, m: usize) -> Profile {
        let rows = (0..n).map(|_| self.budget_division(m)).collect();
        Profile::from_valid_rows(rows)
    }

    fn budget_division(&mut self, m: usize) -> Vec<Vote> {
        let weights: Vec<f64> = (0..m).map(|_| self.rng.gen_range(0.0..=1.0)).collect();
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights.into_iter().map(|w| (w / total).min(1.0)).collect()
        } else {
            vec![1.0 / m as f64; m]
        }
    }
}
