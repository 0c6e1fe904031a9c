//! Shared instances for operator tests.

use crate::evaluation::{CostEvaluator, PenaltyParams, RouteSegments};
use crate::measure::{Cost, Duration};
use crate::models::{Client, ProblemData, TimeWindow, VehicleType};

pub(crate) fn tw(earliest: Duration, latest: Duration) -> TimeWindow {
    TimeWindow::new(earliest, latest).expect("valid window")
}

/// Six clients with tight windows, release times and a duration limit.
pub(crate) fn constrained_data() -> ProblemData {
    let clients = vec![
        Client::depot(0, 0).with_time_window(tw(0, 400)),
        Client::new(10, 0).with_demand(3).with_service_duration(5).with_time_window(tw(0, 60)),
        Client::new(20, 5).with_demand(4).with_service_duration(5).with_time_window(tw(40, 90)),
        Client::new(0, 15)
            .with_demand(5)
            .with_service_duration(5)
            .with_time_window(tw(10, 50))
            .with_release_time(10),
        Client::new(-10, 5).with_demand(3).with_service_duration(5).with_time_window(tw(80, 200)),
        Client::new(5, -10).with_demand(6).with_service_duration(5).with_time_window(tw(0, 40)),
        Client::new(15, 15)
            .with_demand(4)
            .with_service_duration(5)
            .with_time_window(tw(100, 150))
            .with_release_time(30),
    ];
    let vehicle = VehicleType::new(12, 3).with_max_duration(150);
    ProblemData::euclidean(clients, vehicle).expect("valid data")
}

/// Unconstrained instance built from plain coordinates.
pub(crate) fn plain_data(coords: &[(i64, i64)], capacity: i64) -> ProblemData {
    let clients = coords
        .iter()
        .enumerate()
        .map(|(idx, &(x, y))| {
            let c = Client::new(x, y);
            if idx == 0 {
                c
            } else {
                c.with_demand(1)
            }
        })
        .collect();
    let vehicle = VehicleType::new(capacity, coords.len());
    ProblemData::euclidean(clients, vehicle).expect("valid data")
}

pub(crate) fn costs() -> CostEvaluator {
    CostEvaluator::new(PenaltyParams::default())
}

/// Cost change between two route sets, recomputed from scratch.
pub(crate) fn recomputed_delta(
    data: &ProblemData,
    costs: &CostEvaluator,
    before: &[&[usize]],
    after: &[&[usize]],
) -> Cost {
    let total = |routes: &[&[usize]]| -> Cost {
        routes
            .iter()
            .map(|r| costs.route_cost(&RouteSegments::new(data, r)))
            .sum()
    };
    total(after) - total(before)
}
