use thiserror::Error;

use crate::model::scheme::Scheme;

/// Reasons a preference profile cannot be built. Lines are 1-based.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("Not a number: {token:?} on line {line}")]
    InvalidNumber { line: usize, token: String },
    #[error("Numbers must be in range [0, 1]: {value} on line {line}")]
    OutOfRangeValue { line: usize, value: f64 },
    #[error("Check dimension: line {line} has {found} values, expected {expected}")]
    DimensionMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MechanismError {
    #[error("{scheme} phantoms are undefined without voters")]
    UndefinedForZeroVoters { scheme: Scheme },
    #[error("Parameter t = {t} is outside [0, 1]")]
    ParameterOutOfRange { t: f64 },
    #[error("Sweep step {step} must be positive and finite")]
    InvalidStep { step: f64 },
    #[error("{scheme} does not move with t")]
    NotMoving { scheme: Scheme },
    #[error("Unknown scheme: {0:?}")]
    UnknownScheme(String),
}
