//! Travel-duration lookup seam.

use crate::measure::Duration;

use super::Matrix;

/// Read-only travel durations between locations.
///
/// Segment merging queries this once per merge, with the last location of
/// the left segment and the first location of the right one. Lookups may
/// be asymmetric but must be non-negative and defined for every pair a
/// merge asks for.
///
/// Plain closures implement the trait, which keeps tests and ad-hoc
/// callers free of matrix setup:
///
/// ```
/// use u_timewarp::distance::DurationLookup;
///
/// let lookup = |from: usize, to: usize| (from as i64 - to as i64).abs() * 10;
/// assert_eq!(lookup.duration(1, 3), 20);
/// ```
pub trait DurationLookup {
    /// Travel duration from `from` to `to`.
    fn duration(&self, from: usize, to: usize) -> Duration;
}

impl DurationLookup for Matrix {
    #[inline]
    fn duration(&self, from: usize, to: usize) -> Duration {
        self.get(from, to)
    }
}

impl<F> DurationLookup for F
where
    F: Fn(usize, usize) -> Duration,
{
    #[inline]
    fn duration(&self, from: usize, to: usize) -> Duration {
        self(from, to)
    }
}
