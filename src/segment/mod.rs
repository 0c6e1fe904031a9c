//! Composable route segment digests.
//!
//! - [`TimeWindowSegment`]: duration, time warp and feasible start range of
//!   a contiguous route segment, with an associative merge operator
//!
//! With the `no-time-windows` feature enabled, merging skips all
//! arithmetic and returns the all-zero segment.

mod time_window;

pub use time_window::TimeWindowSegment;
