use tracing::{debug, trace};

use crate::error::MechanismError;
use crate::model::outcome::PhantomSet;
use crate::model::scheme::Scheme;

/// Phantom votes for `n` voters under `scheme`.
///
/// Every scheme except [`Scheme::NoPhantoms`] yields `n + 1` values
/// `x_0, ..., x_n`, each in closed form. `t` is read only by the moving
/// schemes and must lie in `[0, 1]` for them.
///
/// With no voters, uniform phantoms (`1 - k/n`) divide by zero and are
/// reported as [`MechanismError::UndefinedForZeroVoters`]. Independent markets
/// place their single phantom at `min(t·0, 1) = 0`.
pub fn generate(scheme: Scheme, n: usize, t: f64) -> Result<PhantomSet, MechanismError> {
    if scheme.is_moving() && !(0.0..=1.0).contains(&t) {
        return Err(MechanismError::ParameterOutOfRange { t });
    }
    let phantoms: Vec<f64> = match scheme {
        Scheme::NoPhantoms => Vec::new(),
        Scheme::UniformPhantoms => {
            require_voters(scheme, n)?;
            (0..=n).map(|k| uniform(n, k)).collect()
        }
        Scheme::Median => (0..=n).map(|k| median_step(n, k)).collect(),
        Scheme::IndependentMarkets => (0..=n).map(|k| independent_markets(n, k, t)).collect(),
        Scheme::WelfareMaximizing => (0..=n).map(|k| welfare_maximizing(n, k, t)).collect(),
    };
    for (k, x) in phantoms.iter().enumerate() {
        trace!(k, x, "phantom");
    }
    debug!(scheme = %scheme, n, t, count = phantoms.len(), "generated phantoms");
    Ok(phantoms.into())
}

fn require_voters(scheme: Scheme, n: usize) -> Result<(), MechanismError> {
    if n == 0 {
        Err(MechanismError::UndefinedForZeroVoters { scheme })
    } else {
        Ok(())
    }
}

fn uniform(n: usize, k: usize) -> f64 {
    1.0 - k as f64 / n as f64
}

fn median_step(n: usize, k: usize) -> f64 {
    if n + 1 <= 2 * k {
        0.0
    } else if n <= 2 * k {
        0.5
    } else {
        1.0
    }
}

fn independent_markets(n: usize, k: usize, t: f64) -> f64 {
    (t * (n - k) as f64).min(1.0)
}

fn welfare_maximizing(n: usize, k: usize, t: f64) -> f64 {
    let segments = (n + 1) as f64;
    let k = k as f64;
    if t <= k / segments {
        0.0
    } else if t < (k + 1.0) / segments {
        // rounding near the segment ends can leave [0, 1] by an ulp
        (t * segments - k).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn phantoms(scheme: Scheme, n: usize, t: f64) -> Vec<f64> {
        generate(scheme, n, t).unwrap().into_vec()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn no_phantoms_is_always_empty() {
        for n in [0, 1, 7] {
            for t in [0.0, 0.3, 1.0] {
                assert!(phantoms(Scheme::NoPhantoms, n, t).is_empty());
            }
        }
    }

    #[test]
    fn uniform_spreads_from_one_to_zero() {
        assert_close(
            &phantoms(Scheme::UniformPhantoms, 5, 0.0),
            &[1.0, 0.8, 0.6, 0.4, 0.2, 0.0],
        );
        for n in 1..50 {
            let xs = phantoms(Scheme::UniformPhantoms, n, 0.0);
            assert_eq!(xs.len(), n + 1);
            assert_eq!(xs[0], 1.0);
            assert_eq!(xs[n], 0.0);
            assert!(xs.iter().tuple_windows().all(|(a, b)| a > b));
        }
    }

    #[test]
    fn median_steps_through_half() {
        assert_eq!(phantoms(Scheme::Median, 3, 0.0), vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(phantoms(Scheme::Median, 4, 0.0), vec![1.0, 1.0, 0.5, 0.0, 0.0]);
        assert_eq!(phantoms(Scheme::Median, 0, 0.0), vec![0.5]);
        for n in 0..30 {
            let xs = phantoms(Scheme::Median, n, 0.9);
            assert!(xs.iter().all(|x| [0.0, 0.5, 1.0].contains(x)));
            assert!(xs.iter().tuple_windows().all(|(a, b)| a >= b));
        }
    }

    #[test]
    fn independent_markets_saturates_at_one() {
        assert_close(
            &phantoms(Scheme::IndependentMarkets, 4, 0.3),
            &[1.0, 0.9, 0.6, 0.3, 0.0],
        );
        assert_eq!(phantoms(Scheme::IndependentMarkets, 4, 0.0), vec![0.0; 5]);
        assert_eq!(
            phantoms(Scheme::IndependentMarkets, 4, 1.0),
            vec![1.0, 1.0, 1.0, 1.0, 0.0]
        );
    }

    #[test]
    fn welfare_maximizing_single_voter_at_half() {
        assert_eq!(phantoms(Scheme::WelfareMaximizing, 1, 0.5), vec![1.0, 0.0]);
    }

    #[test]
    fn welfare_maximizing_interpolates_within_segment() {
        // n = 3: segments of width 0.25, t = 0.6 sits inside k = 2
        assert_close(
            &phantoms(Scheme::WelfareMaximizing, 3, 0.6),
            &[1.0, 1.0, 0.4, 0.0],
        );
        assert_eq!(phantoms(Scheme::WelfareMaximizing, 0, 0.25), vec![0.25]);
    }

    #[test]
    fn welfare_maximizing_moves_monotonically_in_t() {
        for n in 0..12 {
            let grid = (0..=200).map(|i| i as f64 / 200.0).collect_vec();
            let rows = grid
                .iter()
                .map(|t| phantoms(Scheme::WelfareMaximizing, n, *t))
                .collect_vec();
            for k in 0..=n {
                assert_eq!(rows[0][k], 0.0);
                assert_eq!(rows[200][k], 1.0);
                assert!(rows.iter().tuple_windows().all(|(a, b)| a[k] <= b[k]));
            }
            for row in &rows {
                assert!(row.iter().tuple_windows().all(|(a, b)| a >= b));
            }
        }
    }

    #[test]
    fn zero_voters_is_undefined_for_uniform_phantoms() {
        assert_eq!(
            generate(Scheme::UniformPhantoms, 0, 0.0),
            Err(MechanismError::UndefinedForZeroVoters {
                scheme: Scheme::UniformPhantoms
            })
        );
    }

    #[test]
    fn zero_voters_puts_independent_markets_phantom_at_zero() {
        for t in [0.0, 0.5, 1.0] {
            assert_eq!(phantoms(Scheme::IndependentMarkets, 0, t), vec![0.0]);
        }
    }

    #[test]
    fn moving_schemes_reject_parameter_outside_unit_interval() {
        assert_eq!(
            generate(Scheme::WelfareMaximizing, 3, 1.5),
            Err(MechanismError::ParameterOutOfRange { t: 1.5 })
        );
        assert!(matches!(
            generate(Scheme::IndependentMarkets, 3, f64::NAN),
            Err(MechanismError::ParameterOutOfRange { .. })
        ));
        assert!(generate(Scheme::Median, 3, 7.0).is_ok());
    }
}
