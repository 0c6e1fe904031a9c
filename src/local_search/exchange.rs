//! Inter-route tail exchange operator (2-opt*).
//!
//! # Algorithm
//!
//! Swaps tail segments between two routes. Cutting R1 after node `p` and
//! R2 after node `q` gives
//!
//! ```text
//! R1' = before1(p) ⊕ after2(q + 1)
//! R2' = before2(q) ⊕ after1(p + 1)
//! ```
//!
//! Both new routes are scored with a single segment merge each.
//!
//! # Complexity
//!
//! O(n² × R²) candidates per pass, where n = clients per route and R = number
//! of routes; O(1) each.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use tracing::debug;

use crate::evaluation::{CostEvaluator, RouteSegments};
use crate::measure::Cost;
use crate::models::{ProblemData, Solution};
use crate::segment::TimeWindowSegment;

#[derive(Debug, Clone, Copy)]
struct ExchangeMove {
    first_route: usize,
    first_cut: usize,
    second_route: usize,
    second_cut: usize,
    delta: Cost,
}

/// Cost of `head`'s nodes `0..=cut` followed by `tail`'s nodes from
/// `tail_cut + 1` on.
fn joined_cost(
    costs: &CostEvaluator,
    head: &RouteSegments<'_>,
    cut: usize,
    tail: &RouteSegments<'_>,
    tail_cut: usize,
) -> Cost {
    if cut + (tail.len() - tail_cut) == 0 {
        return 0;
    }

    let data = head.data();
    let distance = head.distance_before(cut)
        + data.distance(head.node(cut), tail.node(tail_cut + 1))
        + tail.distance_after(tail_cut + 1);
    let load = head.load_before(cut) + tail.load_after(tail_cut + 1);
    let tws = TimeWindowSegment::merge(data.duration_matrix(), head.before(cut), tail.after(tail_cut + 1));

    costs.cost_of(data.vehicle_type(), distance, load, &tws)
}

/// Cost change of exchanging the tail of `first` after node `first_cut`
/// with the tail of `second` after node `second_cut`.
///
/// Cuts range over `0..=len()`; cutting at `0` hands over every client.
pub fn exchange_delta(
    costs: &CostEvaluator,
    first: &RouteSegments<'_>,
    first_cut: usize,
    second: &RouteSegments<'_>,
    second_cut: usize,
) -> Cost {
    let new_first = joined_cost(costs, first, first_cut, second, second_cut);
    let new_second = joined_cost(costs, second, second_cut, first, first_cut);
    new_first + new_second - costs.route_cost(first) - costs.route_cost(second)
}

/// Applies inter-route tail exchange (2-opt*) improvement.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::{Client, ProblemData, Solution, VehicleType};
/// use u_timewarp::evaluation::{CostEvaluator, PenaltyParams};
/// use u_timewarp::local_search::exchange_improve;
///
/// let clients = vec![
///     Client::depot(0, 0),
///     Client::new(10, 1).with_demand(1),
///     Client::new(20, 1).with_demand(1),
///     Client::new(-10, -1).with_demand(1),
///     Client::new(-20, -1).with_demand(1),
/// ];
/// let data = ProblemData::euclidean(clients, VehicleType::new(2, 2)).unwrap();
/// let costs = CostEvaluator::new(PenaltyParams::default());
///
/// let initial = Solution::new(vec![vec![1, 4], vec![3, 2]]);
/// let improved = exchange_improve(&data, &costs, &initial);
/// assert_eq!(improved.routes(), &[vec![1, 2], vec![3, 4]]);
/// ```
pub fn exchange_improve(data: &ProblemData, costs: &CostEvaluator, solution: &Solution) -> Solution {
    if solution.routes().len() < 2 {
        return solution.clone();
    }

    let mut routes = solution.routes().to_vec();
    while let Some(mv) = find_best_exchange(data, costs, &routes) {
        debug!(
            delta = mv.delta,
            first_route = mv.first_route,
            second_route = mv.second_route,
            "exchange"
        );
        let tail1 = routes[mv.first_route].split_off(mv.first_cut);
        let tail2 = routes[mv.second_route].split_off(mv.second_cut);
        routes[mv.first_route].extend(tail2);
        routes[mv.second_route].extend(tail1);
    }

    solution.with_routes(routes)
}

fn find_best_exchange(
    data: &ProblemData,
    costs: &CostEvaluator,
    routes: &[Vec<usize>],
) -> Option<ExchangeMove> {
    let segments: Vec<RouteSegments<'_>> =
        routes.iter().map(|r| RouteSegments::new(data, r)).collect();
    let mut best: Option<ExchangeMove> = None;

    for (first_route, first) in segments.iter().enumerate() {
        for (second_route, second) in segments.iter().enumerate().skip(first_route + 1) {
            let (n1, n2) = (first.len(), second.len());
            for first_cut in 0..=n1 {
                for second_cut in 0..=n2 {
                    // Swapping whole routes, or nothing, changes nothing.
                    if (first_cut == 0 && second_cut == 0) || (first_cut == n1 && second_cut == n2) {
                        continue;
                    }
                    let delta = exchange_delta(costs, first, first_cut, second, second_cut);
                    if delta < 0 && best.as_ref().is_none_or(|b| delta < b.delta) {
                        best = Some(ExchangeMove {
                            first_route,
                            first_cut,
                            second_route,
                            second_cut,
                            delta,
                        });
                    }
                }
            }
        }
    }

    best
}
