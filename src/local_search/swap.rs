//! Inter-route client swap operator.
//!
//! # Algorithm
//!
//! Exchanges a client `U` of one route with a client `V` of another:
//!
//! ```text
//! r1' = before1(p - 1) ⊕ V ⊕ after1(p + 1)
//! r2' = before2(q - 1) ⊕ U ⊕ after2(q + 1)
//! ```
//!
//! Accepts the best improving swap until none remains.
//!
//! # Complexity
//!
//! O(n²) candidates per pass, O(1) each.

use tracing::debug;

use crate::evaluation::{CostEvaluator, RouteSegments};
use crate::measure::Cost;
use crate::models::{ProblemData, Solution};
use crate::segment::TimeWindowSegment;

#[derive(Debug, Clone, Copy)]
struct SwapMove {
    first_route: usize,
    first_pos: usize,
    second_route: usize,
    second_pos: usize,
    delta: Cost,
}

/// Cost of `route` with the client at node `pos` replaced by the visit
/// `incoming`.
fn replaced_cost(
    costs: &CostEvaluator,
    route: &RouteSegments<'_>,
    pos: usize,
    incoming: &TimeWindowSegment,
) -> Cost {
    let data = route.data();
    let outgoing = route.node(pos);
    let loc = incoming.first_index();
    let (prev, next) = (route.node(pos - 1), route.node(pos + 1));

    let distance = route.distance_before(pos - 1)
        + data.distance(prev, loc)
        + data.distance(loc, next)
        + route.distance_after(pos + 1);
    let load = route.load() - data.client(outgoing).demand() + data.client(loc).demand();
    let tws = TimeWindowSegment::merge_all(
        data.duration_matrix(),
        route.before(pos - 1),
        [*incoming, *route.after(pos + 1)].iter(),
    );

    costs.cost_of(data.vehicle_type(), distance, load, &tws)
}

/// Cost change of swapping the client at node `first_pos` of `first` with
/// the client at node `second_pos` of `second`.
pub fn swap_delta(
    costs: &CostEvaluator,
    first: &RouteSegments<'_>,
    first_pos: usize,
    second: &RouteSegments<'_>,
    second_pos: usize,
) -> Cost {
    let new_first = replaced_cost(costs, first, first_pos, second.leaf(second_pos));
    let new_second = replaced_cost(costs, second, second_pos, first.leaf(first_pos));
    new_first + new_second - costs.route_cost(first) - costs.route_cost(second)
}

/// Applies inter-route swap improvement to a solution.
pub fn swap_improve(data: &ProblemData, costs: &CostEvaluator, solution: &Solution) -> Solution {
    let mut routes = solution.routes().to_vec();
    while let Some(mv) = find_best_swap(data, costs, &routes) {
        debug!(
            delta = mv.delta,
            first_route = mv.first_route,
            second_route = mv.second_route,
            "swap"
        );
        let first = routes[mv.first_route][mv.first_pos - 1];
        let second = routes[mv.second_route][mv.second_pos - 1];
        routes[mv.first_route][mv.first_pos - 1] = second;
        routes[mv.second_route][mv.second_pos - 1] = first;
    }
    solution.with_routes(routes)
}

fn find_best_swap(data: &ProblemData, costs: &CostEvaluator, routes: &[Vec<usize>]) -> Option<SwapMove> {
    let segments: Vec<RouteSegments<'_>> =
        routes.iter().map(|r| RouteSegments::new(data, r)).collect();
    let mut best: Option<SwapMove> = None;

    for (first_route, first) in segments.iter().enumerate() {
        for (second_route, second) in segments.iter().enumerate().skip(first_route + 1) {
            for first_pos in 1..=first.len() {
                for second_pos in 1..=second.len() {
                    let delta = swap_delta(costs, first, first_pos, second, second_pos);
                    if delta < 0 && best.as_ref().is_none_or(|b| delta < b.delta) {
                        best = Some(SwapMove {
                            first_route,
                            first_pos,
                            second_route,
                            second_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}
