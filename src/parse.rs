use std::str::FromStr;

use tracing::debug;

use crate::error::ProfileError;
use crate::model::profile::{is_vote, Profile, Vote};

/// Profile written one voter per line, votes separated by whitespace.
/// Commas are ignored and blank lines skipped; reported line numbers count
/// every line of the input.
impl FromStr for Profile {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.replace(',', "");
        let mut rows: Vec<Vec<Vote>> = Vec::new();
        let mut expected = None;
        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let row = parse_line(line, line_number)?;
            if row.is_empty() {
                continue;
            }
            let expected = *expected.get_or_insert(row.len());
            if row.len() != expected {
                return Err(ProfileError::DimensionMismatch {
                    line: line_number,
                    expected,
                    found: row.len(),
                });
            }
            rows.push(row);
        }
        let profile = Profile::from_valid_rows(rows);
        debug!(n = profile.n_voters(), m = profile.n_alternatives(), "parsed profile");
        Ok(profile)
    }
}

/// `NaN` and the infinities parse as `f64` but are not numbers a voter can
/// write, so they count as invalid tokens.
fn parse_line(line: &str, line_number: usize) -> Result<Vec<Vote>, ProfileError> {
    line.split_whitespace()
        .map(|token| {
            let invalid = || ProfileError::InvalidNumber {
                line: line_number,
                token: token.to_string(),
            };
            let value: f64 = token.parse().map_err(|_| invalid())?;
            if !value.is_finite() {
                Err(invalid())
            } else if is_vote(value) {
                Ok(value)
            } else {
                Err(ProfileError::OutOfRangeValue {
                    line: line_number,
                    value,
                })
            }
        })
        .collect()
}
