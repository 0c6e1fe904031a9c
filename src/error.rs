//! Error type for problem construction.
//!
//! Segment arithmetic and move evaluation are total and never fail; errors
//! only surface while validating input data.

use thiserror::Error;

use crate::measure::Duration;

/// Validation failures raised while building problem data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("time window [{earliest}, {latest}] is empty or starts before zero")]
    InvalidTimeWindow { earliest: Duration, latest: Duration },

    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    #[error("{field} {value} lies beyond the planning horizon")]
    BeyondHorizon { field: &'static str, value: Duration },

    #[error("matrix data has {actual} entries, expected {expected}")]
    MatrixShape { expected: usize, actual: usize },

    #[error("{name} matrix is {actual}x{actual}, expected {expected}x{expected}")]
    MatrixDimension {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("location {0} does not exist")]
    UnknownLocation(usize),
}

/// Shorthand result type for fallible constructors.
pub type Result<T> = std::result::Result<T, RoutingError>;
