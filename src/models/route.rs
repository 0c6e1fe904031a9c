//! Scheduled route and visit types.

use crate::measure::{Distance, Duration, Load};

/// A single scheduled visit within a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    /// Location being visited.
    pub client: usize,
    /// Arrival time at the client.
    pub arrival_time: Duration,
    /// Moment service starts, after waiting or time warp.
    pub service_start: Duration,
    /// Idle time spent before the window opened.
    pub wait_duration: Duration,
    /// Time warp incurred to meet the window's closing time.
    pub time_warp: Duration,
    /// Cumulative load after this visit.
    pub load_after: Load,
}

/// A client sequence with a computed schedule.
///
/// A route starts and ends at the depot; neither depot visit is stored in
/// `visits`. Routes are produced by
/// [`RouteEvaluator`](crate::evaluation::RouteEvaluator).
///
/// # Examples
///
/// ```
/// use u_timewarp::models::{Route, Visit};
///
/// let mut route = Route::new(0);
/// route.push_visit(Visit {
///     client: 1,
///     arrival_time: 10,
///     service_start: 10,
///     wait_duration: 0,
///     time_warp: 0,
///     load_after: 10,
/// });
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.total_load(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Route {
    start_time: Duration,
    end_time: Duration,
    visits: Vec<Visit>,
    distance: Distance,
    duration: Duration,
    time_warp: Duration,
    total_load: Load,
}

impl Route {
    /// Creates an empty route leaving the depot at `start_time`.
    pub fn new(start_time: Duration) -> Self {
        Self {
            start_time,
            end_time: start_time,
            ..Self::default()
        }
    }

    /// Appends a visit to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.total_load = visit.load_after;
        self.visits.push(visit);
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Number of client visits (depot excluded).
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Visited locations in order.
    pub fn clients(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.client).collect()
    }

    /// Moment the vehicle leaves the depot.
    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    /// Moment the vehicle is back at the depot.
    pub fn end_time(&self) -> Duration {
        self.end_time
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Total duration, including waiting and any time warp.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Total time warp, release-time violations included.
    pub fn time_warp(&self) -> Duration {
        self.time_warp
    }

    pub fn total_load(&self) -> Load {
        self.total_load
    }

    /// Records the return to the depot and the route totals.
    pub(crate) fn finish(
        &mut self,
        end_time: Duration,
        distance: Distance,
        duration: Duration,
        time_warp: Duration,
    ) {
        self.end_time = end_time;
        self.distance = distance;
        self.duration = duration;
        self.time_warp = time_warp;
    }
}
