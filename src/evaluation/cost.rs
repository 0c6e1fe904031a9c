//! Penalised cost of routes and solutions.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::measure::{Cost, Distance, Duration, Load};
use crate::models::{ProblemData, Solution, VehicleType};
use crate::segment::TimeWindowSegment;

use super::RouteSegments;

/// Penalty weights for constraint violations.
///
/// # Examples
///
/// ```
/// use u_timewarp::evaluation::PenaltyParams;
///
/// let params: PenaltyParams = serde_json::from_str(r#"{"time_warp_penalty": 50}"#).unwrap();
/// assert_eq!(params.time_warp_penalty, 50);
/// assert_eq!(params.capacity_penalty, PenaltyParams::default().capacity_penalty);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyParams {
    /// Cost per unit of load above vehicle capacity.
    pub capacity_penalty: Cost,
    /// Cost per unit of time warp, duration-limit excess included.
    pub time_warp_penalty: Cost,
}

impl Default for PenaltyParams {
    fn default() -> Self {
        Self {
            capacity_penalty: 20,
            time_warp_penalty: 6,
        }
    }
}

/// Scores routes as distance plus weighted infeasibility.
///
/// Infeasible candidates are never rejected here; they simply cost more.
///
/// # Examples
///
/// ```
/// use u_timewarp::evaluation::{CostEvaluator, PenaltyParams};
///
/// let eval = CostEvaluator::new(PenaltyParams { capacity_penalty: 10, time_warp_penalty: 3 });
/// assert_eq!(eval.penalised_cost(100, 2, 5), 100 + 20 + 15);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CostEvaluator {
    params: PenaltyParams,
}

impl CostEvaluator {
    pub fn new(params: PenaltyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PenaltyParams {
        &self.params
    }

    pub fn load_penalty(&self, load: Load, capacity: Load) -> Cost {
        (load - capacity).max(0) * self.params.capacity_penalty
    }

    pub fn tw_penalty(&self, time_warp: Duration) -> Cost {
        time_warp * self.params.time_warp_penalty
    }

    /// Distance plus penalties for the given excess load and time warp.
    pub fn penalised_cost(&self, distance: Distance, excess_load: Load, time_warp: Duration) -> Cost {
        distance
            + excess_load * self.params.capacity_penalty
            + time_warp * self.params.time_warp_penalty
    }

    /// Cost of a candidate route given its aggregate measures.
    #[inline]
    pub fn cost_of(
        &self,
        vehicle: &VehicleType,
        distance: Distance,
        load: Load,
        tws: &TimeWindowSegment,
    ) -> Cost {
        distance
            + self.load_penalty(load, vehicle.capacity())
            + self.tw_penalty(tws.time_warp_with_max(vehicle.duration_limit()))
    }

    /// Cost of a cached route. Empty routes cost nothing.
    pub fn route_cost(&self, route: &RouteSegments<'_>) -> Cost {
        if route.is_empty() {
            return 0;
        }
        let vehicle = route.data().vehicle_type();
        self.cost_of(vehicle, route.distance(), route.load(), route.segment())
    }

    /// Total penalised cost of a solution. Routes are scored in parallel.
    pub fn solution_cost(&self, data: &ProblemData, solution: &Solution) -> Cost {
        solution
            .routes()
            .par_iter()
            .filter(|clients| !clients.is_empty())
            .map(|clients| self.route_cost(&RouteSegments::new(data, clients)))
            .sum()
    }

    /// Whether no route in the solution exceeds capacity, time windows,
    /// release times or the duration limit.
    pub fn is_feasible(&self, data: &ProblemData, solution: &Solution) -> bool {
        let vehicle = data.vehicle_type();
        solution.routes().par_iter().all(|clients| {
            let route = RouteSegments::new(data, clients);
            route.load() <= vehicle.capacity()
                && route.segment().time_warp_with_max(vehicle.duration_limit()) == 0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, TimeWindow};

    fn data(max_duration: Option<Duration>) -> ProblemData {
        let tw = |e, l| TimeWindow::new(e, l).expect("valid");
        let clients = vec![
            Client::depot(0, 0),
            Client::new(10, 0).with_demand(6).with_time_window(tw(0, 100)),
            Client::new(20, 0).with_demand(6).with_time_window(tw(0, 15)),
        ];
        let mut vehicle = VehicleType::new(10, 2);
        if let Some(max) = max_duration {
            vehicle = vehicle.with_max_duration(max);
        }
        ProblemData::euclidean(clients, vehicle).expect("valid")
    }

    fn evaluator() -> CostEvaluator {
        CostEvaluator::new(PenaltyParams {
            capacity_penalty: 10,
            time_warp_penalty: 100,
        })
    }

    #[test]
    fn test_penalties() {
        let eval = evaluator();
        assert_eq!(eval.load_penalty(8, 10), 0);
        assert_eq!(eval.load_penalty(13, 10), 30);
        assert_eq!(eval.tw_penalty(2), 200);
        assert_eq!(eval.penalised_cost(50, 0, 0), 50);
    }

    #[test]
    fn test_route_cost_feasible() {
        let data = data(None);
        let route = RouteSegments::new(&data, &[1]);
        assert_eq!(evaluator().route_cost(&route), 20);
    }

    #[cfg(not(feature = "no-time-windows"))]
    #[test]
    fn test_route_cost_with_violations() {
        let data = data(None);
        // 0 -> 1 -> 2 arrives at 20, five after client 2 closes; load 12.
        let route = RouteSegments::new(&data, &[1, 2]);
        assert_eq!(route.segment().time_warp(), 5);
        assert_eq!(evaluator().route_cost(&route), 40 + 2 * 10 + 5 * 100);
    }

    #[cfg(not(feature = "no-time-windows"))]
    #[test]
    fn test_route_cost_counts_duration_limit() {
        let data = data(Some(15));
        let route = RouteSegments::new(&data, &[1]);
        assert_eq!(evaluator().route_cost(&route), 20 + 5 * 100);
    }

    #[test]
    fn test_empty_route_costs_nothing() {
        let data = data(None);
        let route = RouteSegments::new(&data, &[]);
        assert_eq!(evaluator().route_cost(&route), 0);
    }

    #[cfg(not(feature = "no-time-windows"))]
    #[test]
    fn test_solution_cost_sums_routes() {
        let data = data(None);
        let sol = Solution::new(vec![vec![1], vec![], vec![2]]);
        assert_eq!(evaluator().solution_cost(&data, &sol), 20 + 40 + 5 * 100);
        assert!(!evaluator().is_feasible(&data, &sol));
        let feasible = Solution::new(vec![vec![1]]);
        assert!(evaluator().is_feasible(&data, &feasible));
    }

    #[test]
    fn test_params_default_roundtrip() {
        let params = PenaltyParams::default();
        let json = serde_json::to_string(&params).expect("serialize");
        let back: PenaltyParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, params);
    }
}
