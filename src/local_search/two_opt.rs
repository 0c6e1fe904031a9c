//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! Reversing the clients at node positions `i..=j` of a route replaces the
//! edges (i-1, i) and (j, j+1) with (i-1, j) and (i, j+1). The candidate is
//! scored as
//!
//! ```text
//! before(i - 1) ⊕ reversed(i, j) ⊕ after(j + 1)
//! ```
//!
//! so time windows stay exact even on asymmetric duration matrices. The
//! best improving reversal is applied until none remains.
//!
//! # Complexity
//!
//! O(n²) candidates per pass. Each reversed segment is built in O(j - i).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::debug;

use crate::evaluation::{CostEvaluator, RouteSegments};
use crate::measure::Cost;
use crate::models::{ProblemData, Solution};
use crate::segment::TimeWindowSegment;

/// Cost change of reversing node positions `start..=end` of `route`.
///
/// Requires `1 <= start < end <= route.len()`.
pub fn two_opt_delta(costs: &CostEvaluator, route: &RouteSegments<'_>, start: usize, end: usize) -> Cost {
    debug_assert!(1 <= start && start < end && end <= route.len());
    let data = route.data();

    let distance = route.distance_before(start - 1)
        + data.distance(route.node(start - 1), route.node(end))
        + route.reversed_distance_between(start, end)
        + data.distance(route.node(start), route.node(end + 1))
        + route.distance_after(end + 1);
    let tws = TimeWindowSegment::merge_all(
        data.duration_matrix(),
        route.before(start - 1),
        [route.reversed(start, end), *route.after(end + 1)].iter(),
    );

    costs.cost_of(data.vehicle_type(), distance, route.load(), &tws) - costs.route_cost(route)
}

/// Applies 2-opt improvement to every route of a solution.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::{Client, ProblemData, Solution, VehicleType};
/// use u_timewarp::evaluation::{CostEvaluator, PenaltyParams};
/// use u_timewarp::local_search::two_opt_improve;
///
/// let clients = vec![
///     Client::depot(0, 0),
///     Client::new(10, 10),
///     Client::new(20, 0),
///     Client::new(10, -10),
/// ];
/// let data = ProblemData::euclidean(clients, VehicleType::new(10, 1)).unwrap();
/// let costs = CostEvaluator::new(PenaltyParams::default());
///
/// let improved = two_opt_improve(&data, &costs, &Solution::new(vec![vec![1, 3, 2]]));
/// assert_eq!(improved.routes(), &[vec![1, 2, 3]]);
/// assert_eq!(costs.solution_cost(&data, &improved), 56);
/// ```
pub fn two_opt_improve(data: &ProblemData, costs: &CostEvaluator, solution: &Solution) -> Solution {
    let mut routes = solution.routes().to_vec();
    for (route_idx, clients) in routes.iter_mut().enumerate() {
        while let Some((start, end, delta)) = find_best_reversal(data, costs, clients) {
            debug!(delta, route = route_idx, start, end, "two_opt");
            clients[start - 1..end].reverse();
        }
    }
    solution.with_routes(routes)
}

fn find_best_reversal(
    data: &ProblemData,
    costs: &CostEvaluator,
    clients: &[usize],
) -> Option<(usize, usize, Cost)> {
    if clients.len() < 2 {
        return None;
    }

    let route = RouteSegments::new(data, clients);
    let mut best: Option<(usize, usize, Cost)> = None;
    for start in 1..route.len() {
        for end in start + 1..=route.len() {
            let delta = two_opt_delta(costs, &route, start, end);
            if delta < 0 && best.is_none_or(|(_, _, b)| delta < b) {
                best = Some((start, end, delta));
            }
        }
    }
    best
}
