pub mod profile {
    use crate::error::ProfileError;

    /// A single voter's allocation to one alternative, in `[0, 1]`.
    pub type Vote = f64;

    pub fn is_vote(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }

    /// Rectangular `n × m` matrix of votes, one row per voter.
    ///
    /// Only the validating constructors build a `Profile`, so every value of
    /// this type is rectangular and holds votes in `[0, 1]`.
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct Profile {
        rows: Vec<Vec<Vote>>,
        n_alternatives: usize,
    }

    impl Profile {
        pub fn empty() -> Profile {
            Profile::default()
        }

        /// Rows are numbered from 1 in the returned errors.
        pub fn from_rows(rows: Vec<Vec<Vote>>) -> Result<Profile, ProfileError> {
            let n_alternatives = rows.first().map_or(0, Vec::len);
            for (index, row) in rows.iter().enumerate() {
                if row.len() != n_alternatives {
                    return Err(ProfileError::DimensionMismatch {
                        line: index + 1,
                        expected: n_alternatives,
                        found: row.len(),
                    });
                }
                if let Some(value) = row.iter().copied().find(|value| !is_vote(*value)) {
                    return Err(ProfileError::OutOfRangeValue {
                        line: index + 1,
                        value,
                    });
                }
            }
            Ok(Profile {
                rows,
                n_alternatives,
            })
        }

        /// Caller guarantees the rows are rectangular and hold valid votes.
        pub(crate) fn from_valid_rows(rows: Vec<Vec<Vote>>) -> Profile {
            let n_alternatives = rows.first().map_or(0, Vec::len);
            debug_assert!(rows.iter().all(|row| row.len() == n_alternatives));
            debug_assert!(rows.iter().flatten().all(|value| is_vote(*value)));
            Profile {
                rows,
                n_alternatives,
            }
        }

        pub fn n_voters(&self) -> usize {
            self.rows.len()
        }

        pub fn n_alternatives(&self) -> usize {
            self.n_alternatives
        }

        pub fn is_empty(&self) -> bool {
            self.rows.is_empty()
        }

        pub fn voters(&self) -> impl Iterator<Item = &[Vote]> + '_ {
            self.rows.iter().map(Vec::as_slice)
        }

        /// Every voter's vote on one alternative. Empty when `alternative` is
        /// out of range.
        pub fn column(&self, alternative: usize) -> impl Iterator<Item = Vote> + '_ {
            self.rows
                .iter()
                .filter_map(move |row| row.get(alternative).copied())
        }
    }
}

pub mod scheme {
    use std::fmt;
    use std::str::FromStr;

    use serde::{Deserialize, Serialize};

    use crate::error::MechanismError;

    /// Rule producing the phantom votes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Scheme {
        NoPhantoms,
        #[default]
        UniformPhantoms,
        Median,
        IndependentMarkets,
        WelfareMaximizing,
    }

    impl Scheme {
        pub const ALL: [Scheme; 5] = [
            Scheme::NoPhantoms,
            Scheme::UniformPhantoms,
            Scheme::Median,
            Scheme::IndependentMarkets,
            Scheme::WelfareMaximizing,
        ];

        pub fn as_str(&self) -> &'static str {
            match self {
                Scheme::NoPhantoms => "no_phantoms",
                Scheme::UniformPhantoms => "uniform_phantoms",
                Scheme::Median => "median",
                Scheme::IndependentMarkets => "independent_markets",
                Scheme::WelfareMaximizing => "welfare_maximizing",
            }
        }

        /// Moving schemes place their phantoms according to `t`; fixed ones
        /// ignore it.
        pub fn is_moving(&self) -> bool {
            matches!(self, Scheme::IndependentMarkets | Scheme::WelfareMaximizing)
        }
    }

    impl fmt::Display for Scheme {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl FromStr for Scheme {
        type Err = MechanismError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Scheme::ALL
                .into_iter()
                .find(|scheme| scheme.as_str() == s)
                .ok_or_else(|| MechanismError::UnknownScheme(s.to_string()))
        }
    }
}

pub mod outcome {
    use std::fmt;
    use std::ops::Deref;

    use serde::Serialize;

    use crate::median::round2;

    /// Phantom votes in generation order (ascending `k`).
    #[derive(Debug, Clone, PartialEq, Default, Serialize)]
    #[serde(transparent)]
    pub struct PhantomSet(Vec<f64>);

    impl PhantomSet {
        pub fn into_vec(self) -> Vec<f64> {
            self.0
        }
    }

    impl From<Vec<f64>> for PhantomSet {
        fn from(values: Vec<f64>) -> Self {
            PhantomSet(values)
        }
    }

    impl Deref for PhantomSet {
        type Target = [f64];

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize)]
    pub struct Feasibility {
        pub sum: f64,
        pub feasible: bool,
    }

    /// Everything one evaluation of the mechanism produces.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct Outcome {
        pub phantoms: PhantomSet,
        pub allocations: Vec<f64>,
        pub sum: f64,
        pub feasible: bool,
    }

    impl fmt::Display for Outcome {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            for (index, allocation) in self.allocations.iter().enumerate() {
                writeln!(f, "alternative {}: {}", index + 1, round2(*allocation))?;
            }
            write!(f, "sum: {}", round2(self.sum))?;
            if !self.feasible {
                write!(f, " (over budget)")?;
            }
            Ok(())
        }
    }
}
