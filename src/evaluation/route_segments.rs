//! Per-route segment cache for constant-time move evaluation.

use crate::measure::{Distance, Load};
use crate::models::ProblemData;
use crate::segment::TimeWindowSegment;

/// Prefix and suffix digests of a single route.
///
/// The route is viewed as the node sequence `[depot, c1, ..., cn, depot]`,
/// so clients sit at node positions `1..=n`. For every position the cache
/// keeps the time window segment of the prefix ending there and of the
/// suffix starting there, together with cumulative distance and load. Any
/// candidate route that reuses one prefix, a few single visits and one
/// suffix is then scored with a constant number of merges.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::{Client, ProblemData, VehicleType};
/// use u_timewarp::evaluation::RouteSegments;
///
/// let clients = vec![
///     Client::depot(0, 0),
///     Client::new(3, 4).with_demand(10),
///     Client::new(6, 8).with_demand(20),
/// ];
/// let data = ProblemData::euclidean(clients, VehicleType::new(50, 1)).unwrap();
///
/// let route = RouteSegments::new(&data, &[1, 2]);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.distance(), 5 + 5 + 10);
/// assert_eq!(route.load(), 30);
/// assert_eq!(route.segment().duration(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct RouteSegments<'a> {
    data: &'a ProblemData,
    nodes: Vec<usize>,
    leaves: Vec<TimeWindowSegment>,
    before: Vec<TimeWindowSegment>,
    after: Vec<TimeWindowSegment>,
    cum_distance: Vec<Distance>,
    cum_reverse_distance: Vec<Distance>,
    cum_load: Vec<Load>,
}

impl<'a> RouteSegments<'a> {
    /// Builds the cache for the given client sequence (depot excluded).
    pub fn new(data: &'a ProblemData, clients: &[usize]) -> Self {
        let depot = data.depot();
        let nodes: Vec<usize> = std::iter::once(depot)
            .chain(clients.iter().copied())
            .chain(std::iter::once(depot))
            .collect();
        let n = nodes.len();
        let durations = data.duration_matrix();

        let leaves: Vec<TimeWindowSegment> = nodes
            .iter()
            .map(|&loc| TimeWindowSegment::from_client(loc, data.client(loc)))
            .collect();

        let mut before = Vec::with_capacity(n);
        before.push(leaves[0]);
        for leaf in &leaves[1..] {
            let prev = before[before.len() - 1];
            before.push(TimeWindowSegment::merge(durations, &prev, leaf));
        }

        let mut after = leaves.clone();
        for idx in (0..n - 1).rev() {
            after[idx] = TimeWindowSegment::merge(durations, &leaves[idx], &after[idx + 1]);
        }

        let mut cum_distance = vec![0; n];
        let mut cum_reverse_distance = vec![0; n];
        let mut cum_load = vec![0; n];
        cum_load[0] = data.client(nodes[0]).demand();
        for idx in 1..n {
            let (prev, curr) = (nodes[idx - 1], nodes[idx]);
            cum_distance[idx] = cum_distance[idx - 1] + data.distance(prev, curr);
            cum_reverse_distance[idx] = cum_reverse_distance[idx - 1] + data.distance(curr, prev);
            cum_load[idx] = cum_load[idx - 1] + data.client(curr).demand();
        }

        Self {
            data,
            nodes,
            leaves,
            before,
            after,
            cum_distance,
            cum_reverse_distance,
            cum_load,
        }
    }

    pub fn data(&self) -> &'a ProblemData {
        self.data
    }

    /// Number of clients on the route.
    pub fn len(&self) -> usize {
        self.nodes.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Location at node position `idx` (0 and `len() + 1` are the depot).
    pub fn node(&self, idx: usize) -> usize {
        self.nodes[idx]
    }

    /// Client locations in visiting order.
    pub fn clients(&self) -> &[usize] {
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Single-visit segment at position `idx`.
    pub fn leaf(&self, idx: usize) -> &TimeWindowSegment {
        &self.leaves[idx]
    }

    /// Segment of positions `0..=idx`.
    pub fn before(&self, idx: usize) -> &TimeWindowSegment {
        &self.before[idx]
    }

    /// Segment of positions `idx..=len() + 1`.
    pub fn after(&self, idx: usize) -> &TimeWindowSegment {
        &self.after[idx]
    }

    /// Segment of positions `start..=end`, in route order.
    pub fn between(&self, start: usize, end: usize) -> TimeWindowSegment {
        debug_assert!(start <= end);
        if start == 0 {
            return self.before[end];
        }
        if end == self.nodes.len() - 1 {
            return self.after[start];
        }
        TimeWindowSegment::merge_all(
            self.data.duration_matrix(),
            &self.leaves[start],
            &self.leaves[start + 1..=end],
        )
    }

    /// Segment of positions `start..=end`, visited in reverse order.
    pub fn reversed(&self, start: usize, end: usize) -> TimeWindowSegment {
        debug_assert!(start <= end);
        TimeWindowSegment::merge_all(
            self.data.duration_matrix(),
            &self.leaves[end],
            self.leaves[start..end].iter().rev(),
        )
    }

    /// Segment of the whole route, depot to depot.
    pub fn segment(&self) -> &TimeWindowSegment {
        &self.before[self.nodes.len() - 1]
    }

    /// Distance travelled from position 0 to position `idx`.
    pub fn distance_before(&self, idx: usize) -> Distance {
        self.cum_distance[idx]
    }

    /// Distance travelled from position `idx` to the end of the route.
    pub fn distance_after(&self, idx: usize) -> Distance {
        self.distance() - self.cum_distance[idx]
    }

    /// Distance travelled from position `start` to position `end`.
    pub fn distance_between(&self, start: usize, end: usize) -> Distance {
        self.cum_distance[end] - self.cum_distance[start]
    }

    /// Distance travelled from position `end` back to position `start` when
    /// the positions in between are visited in reverse.
    pub fn reversed_distance_between(&self, start: usize, end: usize) -> Distance {
        self.cum_reverse_distance[end] - self.cum_reverse_distance[start]
    }

    /// Total route distance.
    pub fn distance(&self) -> Distance {
        self.cum_distance[self.nodes.len() - 1]
    }

    /// Load of positions `0..=idx`.
    pub fn load_before(&self, idx: usize) -> Load {
        self.cum_load[idx]
    }

    /// Load of positions `idx..=len() + 1`.
    pub fn load_after(&self, idx: usize) -> Load {
        self.load() - if idx == 0 { 0 } else { self.cum_load[idx - 1] }
    }

    /// Total load delivered on the route.
    pub fn load(&self) -> Load {
        self.cum_load[self.nodes.len() - 1]
    }
}
