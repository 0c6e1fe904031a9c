//! Solution and violation types.

use crate::measure::{Duration, Load};

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load carried.
        load: Load,
        /// Vehicle capacity.
        capacity: Load,
    },
    /// Time windows or release times could not all be met.
    TimeWarp {
        /// Route index in the solution.
        route_index: usize,
        /// Total time warp on the route, duration limit excluded.
        time_warp: Duration,
    },
    /// Route duration exceeds the vehicle's maximum.
    MaxDurationExceeded {
        route_index: usize,
        duration: Duration,
        max_duration: Duration,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationType,
}

impl Violation {
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }

    /// Points the violation at a different route.
    pub(crate) fn set_route_index(&mut self, idx: usize) {
        match &mut self.kind {
            ViolationType::CapacityExceeded { route_index, .. }
            | ViolationType::TimeWarp { route_index, .. }
            | ViolationType::MaxDurationExceeded { route_index, .. } => *route_index = idx,
        }
    }
}

/// A solution as one client sequence per used vehicle.
///
/// Sequences exclude the depot. Empty sequences are allowed and denote an
/// unused vehicle.
///
/// Unassigned clients are bookkeeping for the caller: costs, evaluators and
/// local search neither read nor change them, and carry them through to
/// every improved solution untouched.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::Solution;
///
/// let mut sol = Solution::new(vec![vec![1, 2], vec![3]]);
/// sol.add_unassigned(4);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 3);
/// assert_eq!(sol.unassigned(), &[4]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Vec<usize>>,
    unassigned: Vec<usize>,
}

impl Solution {
    pub fn new(routes: Vec<Vec<usize>>) -> Self {
        Self {
            routes,
            unassigned: Vec::new(),
        }
    }

    /// Records a client as left out of every route. The list is only
    /// carried along; see the type-level docs.
    pub fn add_unassigned(&mut self, client: usize) {
        self.unassigned.push(client);
    }

    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    pub fn routes_mut(&mut self) -> &mut Vec<Vec<usize>> {
        &mut self.routes
    }

    /// Number of non-empty routes.
    pub fn num_routes(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Total number of clients served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// A solution with the given routes and this solution's unassigned
    /// clients.
    pub fn with_routes(&self, routes: Vec<Vec<usize>>) -> Self {
        Self {
            routes,
            unassigned: self.unassigned.clone(),
        }
    }

    /// Drops empty routes.
    pub fn compact(&mut self) {
        self.routes.retain(|r| !r.is_empty());
    }
}
