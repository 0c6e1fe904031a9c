//! Inter-route client relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each client from its current route to directly after any
//! position of another route. The cost change of a candidate is computed
//! from cached prefix/suffix segments:
//!
//! ```text
//! from' = before(p - 1) ⊕ after(p + 1)
//! to'   = before(q) ⊕ U ⊕ after(q + 1)
//! ```
//!
//! so each candidate costs a constant number of segment merges, time
//! windows and release times included. The best improving move is applied
//! until none is left.
//!
//! # Complexity
//!
//! O(n²) candidates per pass, O(1) each.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use tracing::debug;

use crate::evaluation::{CostEvaluator, RouteSegments};
use crate::measure::Cost;
use crate::models::{ProblemData, Solution};
use crate::segment::TimeWindowSegment;

/// A relocate move: client at node `from_pos` of `from_route` goes directly
/// after node `to_pos` of `to_route`.
#[derive(Debug, Clone, Copy)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: Cost,
}

/// Cost change of moving the client at node `from_pos` of `from` to
/// directly after node `to_pos` of `to`.
///
/// `from` and `to` must be different routes of the same problem. Node
/// positions follow [`RouteSegments`]: clients sit at `1..=len()` and
/// `to_pos` may be `0` (right after the depot).
pub fn relocate_delta(
    costs: &CostEvaluator,
    from: &RouteSegments<'_>,
    from_pos: usize,
    to: &RouteSegments<'_>,
    to_pos: usize,
) -> Cost {
    let data = from.data();
    let vehicle = data.vehicle_type();
    let durations = data.duration_matrix();

    let u = from.node(from_pos);
    let demand = data.client(u).demand();

    let from_cost = if from.len() == 1 {
        0
    } else {
        let (prev, next) = (from.node(from_pos - 1), from.node(from_pos + 1));
        let distance = from.distance_before(from_pos - 1)
            + data.distance(prev, next)
            + from.distance_after(from_pos + 1);
        let tws = TimeWindowSegment::merge(durations, from.before(from_pos - 1), from.after(from_pos + 1));
        costs.cost_of(vehicle, distance, from.load() - demand, &tws)
    };

    let (v, next) = (to.node(to_pos), to.node(to_pos + 1));
    let distance = to.distance_before(to_pos)
        + data.distance(v, u)
        + data.distance(u, next)
        + to.distance_after(to_pos + 1);
    let tws = TimeWindowSegment::merge_all(
        durations,
        to.before(to_pos),
        [*from.leaf(from_pos), *to.after(to_pos + 1)].iter(),
    );
    let to_cost = costs.cost_of(vehicle, distance, to.load() + demand, &tws);

    from_cost + to_cost - costs.route_cost(from) - costs.route_cost(to)
}

/// Applies inter-route relocate improvement to a solution.
///
/// Repeatedly applies the best improving relocation until no move lowers
/// the penalised cost. Empty routes in `solution` are valid targets.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::{Client, ProblemData, Solution, VehicleType};
/// use u_timewarp::evaluation::{CostEvaluator, PenaltyParams};
/// use u_timewarp::local_search::relocate_improve;
///
/// let clients = vec![
///     Client::depot(0, 0),
///     Client::new(10, 0).with_demand(1),
///     Client::new(11, 0).with_demand(1),
///     Client::new(0, 10).with_demand(1),
/// ];
/// let data = ProblemData::euclidean(clients, VehicleType::new(10, 2)).unwrap();
/// let costs = CostEvaluator::new(PenaltyParams::default());
///
/// let initial = Solution::new(vec![vec![1, 3], vec![2]]);
/// let improved = relocate_improve(&data, &costs, &initial);
/// assert!(costs.solution_cost(&data, &improved) < costs.solution_cost(&data, &initial));
/// ```
pub fn relocate_improve(data: &ProblemData, costs: &CostEvaluator, solution: &Solution) -> Solution {
    if solution.routes().len() < 2 {
        return solution.clone();
    }

    let mut routes = solution.routes().to_vec();
    while let Some(mv) = find_best_relocate(data, costs, &routes) {
        debug!(
            delta = mv.delta,
            from_route = mv.from_route,
            to_route = mv.to_route,
            "relocate"
        );
        let client = routes[mv.from_route].remove(mv.from_pos - 1);
        routes[mv.to_route].insert(mv.to_pos, client);
    }

    solution.with_routes(routes)
}

fn find_best_relocate(
    data: &ProblemData,
    costs: &CostEvaluator,
    routes: &[Vec<usize>],
) -> Option<RelocateMove> {
    let segments: Vec<RouteSegments<'_>> =
        routes.iter().map(|r| RouteSegments::new(data, r)).collect();
    let mut best: Option<RelocateMove> = None;

    for (from_route, from) in segments.iter().enumerate() {
        for from_pos in 1..=from.len() {
            for (to_route, to) in segments.iter().enumerate() {
                if to_route == from_route {
                    continue;
                }
                for to_pos in 0..=to.len() {
                    let delta = relocate_delta(costs, from, from_pos, to, to_pos);
                    if delta < 0 && best.as_ref().is_none_or(|b| delta < b.delta) {
                        best = Some(RelocateMove {
                            from_route,
                            from_pos,
                            to_route,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}
