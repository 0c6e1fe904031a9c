//! Time window segments.
//!
//! # Algorithm
//!
//! A [`TimeWindowSegment`] summarises a contiguous stretch of a route by the
//! range of start moments `[tw_early, tw_late]` that minimise its duration,
//! together with that minimal duration and the time warp that cannot be
//! avoided from any start. Concatenating `A` then `B` across an edge of
//! travel time `edge` works from
//!
//! ```text
//! at_b  = A.duration - A.time_warp + edge
//! wait  = max(B.tw_early - at_b - A.tw_late, 0)
//! warp  = max(A.tw_early + at_b - B.tw_late, 0)
//!
//! duration  = A.duration + B.duration + edge + wait
//! time_warp = A.time_warp + B.time_warp + warp
//! tw_early  = max(B.tw_early - at_b, A.tw_early) - wait
//! tw_late   = min(B.tw_late - at_b, A.tw_late) + warp
//! release   = max(A.release, B.release)
//! ```
//!
//! The operator is associative, so digests of any sub-route can be cached
//! and recombined in any grouping with identical results.
//!
//! # Complexity
//!
//! O(1) per merge, one duration lookup, no allocation.
//!
//! # Reference
//!
//! Vidal, T., Crainic, T.G., Gendreau, M. & Prins, C. (2013). "A hybrid
//! genetic algorithm with adaptive diversity management for a large class of
//! vehicle routing problems with time-windows", *Computers & Operations
//! Research* 40(1), 475-489.

use serde::{Deserialize, Serialize};

use crate::distance::DurationLookup;
use crate::measure::Duration;
use crate::models::Client;

/// Time-window digest of a contiguous route segment.
///
/// Digests are immutable values. Leaves come from
/// [`TimeWindowSegment::from_client`]; longer segments come from
/// [`TimeWindowSegment::merge`] and [`TimeWindowSegment::merge_all`].
///
/// After merging, `tw_early > tw_late` is possible and is not an error: the
/// conflict has already been absorbed into the time warp.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::{Client, TimeWindow};
/// use u_timewarp::segment::TimeWindowSegment;
///
/// let a = Client::new(0, 0)
///     .with_service_duration(10)
///     .with_time_window(TimeWindow::new(0, 100).unwrap());
/// let b = Client::new(0, 0)
///     .with_service_duration(5)
///     .with_time_window(TimeWindow::new(50, 60).unwrap());
///
/// let travel = |_: usize, _: usize| -> i64 { 20 };
/// let merged = TimeWindowSegment::merge(
///     &travel,
///     &TimeWindowSegment::from_client(0, &a),
///     &TimeWindowSegment::from_client(1, &b),
/// );
///
/// assert_eq!(merged.duration(), 35);
/// assert_eq!(merged.time_warp(), 0);
/// assert_eq!((merged.tw_early(), merged.tw_late()), (20, 30));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindowSegment {
    idx_first: usize,
    idx_last: usize,
    duration: Duration,
    time_warp: Duration,
    tw_early: Duration,
    tw_late: Duration,
    release_time: Duration,
}

impl TimeWindowSegment {
    /// Creates a segment from raw fields.
    ///
    /// `duration` and `time_warp` must be non-negative.
    pub fn new(
        idx_first: usize,
        idx_last: usize,
        duration: Duration,
        time_warp: Duration,
        tw_early: Duration,
        tw_late: Duration,
        release_time: Duration,
    ) -> Self {
        debug_assert!(duration >= 0 && time_warp >= 0);
        Self {
            idx_first,
            idx_last,
            duration,
            time_warp,
            tw_early,
            tw_late,
            release_time,
        }
    }

    /// Leaf segment for a single visit to `client` at location `idx`.
    pub fn from_client(idx: usize, client: &Client) -> Self {
        let tw = client.time_window();
        Self::new(
            idx,
            idx,
            client.service_duration(),
            0,
            tw.earliest(),
            tw.latest(),
            client.release_time(),
        )
    }

    /// Digest of `first` followed directly by `second`.
    ///
    /// The two segments must be adjacent in visiting order; `lookup` is
    /// asked for the travel duration from `first`'s last location to
    /// `second`'s first location.
    #[cfg(not(feature = "no-time-windows"))]
    #[inline]
    pub fn merge<L>(lookup: &L, first: &Self, second: &Self) -> Self
    where
        L: DurationLookup + ?Sized,
    {
        let edge = lookup.duration(first.idx_last, second.idx_first);
        let at_second = first.duration - first.time_warp + edge;

        // Starting as late as allowed still arrives before second opens:
        // wait. Starting as early as allowed still arrives after it
        // closes: warp.
        let extra_wait = (second.tw_early - at_second - first.tw_late).max(0);
        let extra_warp = (first.tw_early + at_second - second.tw_late).max(0);

        Self {
            idx_first: first.idx_first,
            idx_last: second.idx_last,
            duration: first.duration + second.duration + edge + extra_wait,
            time_warp: first.time_warp + second.time_warp + extra_warp,
            tw_early: (second.tw_early - at_second).max(first.tw_early) - extra_wait,
            tw_late: (second.tw_late - at_second).min(first.tw_late) + extra_warp,
            release_time: first.release_time.max(second.release_time),
        }
    }

    /// Without time windows every merge yields the all-zero segment.
    #[cfg(feature = "no-time-windows")]
    #[inline]
    pub fn merge<L>(_lookup: &L, _first: &Self, _second: &Self) -> Self
    where
        L: DurationLookup + ?Sized,
    {
        Self::default()
    }

    /// Left fold of [`merge`](Self::merge) over `first` and then each of
    /// `rest` in order.
    ///
    /// ```
    /// use u_timewarp::models::Client;
    /// use u_timewarp::segment::TimeWindowSegment;
    ///
    /// let c = Client::new(0, 0).with_service_duration(1);
    /// let leaves: Vec<_> = (0..4).map(|i| TimeWindowSegment::from_client(i, &c)).collect();
    /// let travel = |_: usize, _: usize| -> i64 { 2 };
    ///
    /// let all = TimeWindowSegment::merge_all(&travel, &leaves[0], &leaves[1..]);
    /// assert_eq!(all.duration(), 4 + 3 * 2);
    /// assert_eq!((all.first_index(), all.last_index()), (0, 3));
    /// ```
    pub fn merge_all<'a, L, I>(lookup: &L, first: &Self, rest: I) -> Self
    where
        L: DurationLookup + ?Sized,
        I: IntoIterator<Item = &'a Self>,
    {
        rest.into_iter()
            .fold(*first, |acc, next| Self::merge(lookup, &acc, next))
    }

    /// Location of the first visit in this segment.
    pub fn first_index(&self) -> usize {
        self.idx_first
    }

    /// Location of the last visit in this segment.
    pub fn last_index(&self) -> usize {
        self.idx_last
    }

    /// Total duration, including travel, service and waiting.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time warp on this segment, release-time violations included.
    pub fn time_warp(&self) -> Duration {
        self.time_warp_with_max(Duration::MAX)
    }

    /// Time warp on this segment, additionally counting any duration in
    /// excess of `max_duration` as time warp.
    ///
    /// The stored time warp, the release-time excess and the duration
    /// excess are added independently of one another.
    pub fn time_warp_with_max(&self, max_duration: Duration) -> Duration {
        self.time_warp
            + (self.release_time - self.tw_late).max(0)
            + (self.duration - max_duration).max(0)
    }

    /// Earliest start moment that yields the minimal duration.
    pub fn tw_early(&self) -> Duration {
        self.tw_early
    }

    /// Latest start moment that yields the minimal duration.
    pub fn tw_late(&self) -> Duration {
        self.tw_late
    }

    /// Earliest moment the segment may start, from its clients' releases.
    pub fn release_time(&self) -> Duration {
        self.release_time
    }
}
