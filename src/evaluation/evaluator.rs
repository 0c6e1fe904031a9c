//! Route evaluator that computes a full visit schedule.

use crate::measure::{Distance, Duration};
use crate::models::{Client, ProblemData, Route, Solution, Violation, ViolationType, Visit};

use super::RouteSegments;

/// Simulates routes visit by visit, producing schedules and violations.
///
/// The vehicle leaves the depot at the earliest moment that both minimises
/// route duration and respects release times, as given by the route's
/// [`TimeWindowSegment`](crate::segment::TimeWindowSegment). Arriving early
/// means waiting; arriving late means time warp back to the closing time.
/// The resulting duration and time warp agree with the segment digest.
///
/// With the `no-time-windows` feature, windows and release times are
/// ignored here as well, so schedules never report time warp.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::{Client, ProblemData, TimeWindow, VehicleType};
/// use u_timewarp::evaluation::RouteEvaluator;
///
/// let clients = vec![
///     Client::depot(0, 0),
///     Client::new(3, 4)
///         .with_service_duration(5)
///         .with_time_window(TimeWindow::new(20, 100).unwrap()),
/// ];
/// let data = ProblemData::euclidean(clients, VehicleType::new(100, 1)).unwrap();
///
/// let evaluator = RouteEvaluator::new(&data);
/// let (route, violations) = evaluator.schedule(&[1]);
/// assert!(violations.is_empty());
/// assert_eq!(route.start_time(), 15);
/// assert_eq!(route.visits()[0].service_start, 20);
/// assert_eq!(route.duration(), 15);
/// ```
pub struct RouteEvaluator<'a> {
    data: &'a ProblemData,
}

impl<'a> RouteEvaluator<'a> {
    pub fn new(data: &'a ProblemData) -> Self {
        Self { data }
    }

    /// Schedules the given client sequence (depot excluded).
    ///
    /// Returns the scheduled route and any constraint violations, with
    /// route indices set to zero.
    pub fn schedule(&self, clients: &[usize]) -> (Route, Vec<Violation>) {
        let data = self.data;
        let vehicle = data.vehicle_type();
        let depot = data.depot();
        let segments = RouteSegments::new(data, clients);
        let tws = segments.segment();

        let start = tws
            .tw_early()
            .max(tws.release_time().min(tws.tw_late()));

        let mut route = Route::new(start);
        let mut time = start;
        let mut load = 0;
        let mut warp: Duration = 0;
        let mut distance: Distance = 0;
        let mut prev = depot;

        let stops = clients.iter().copied().chain(std::iter::once(depot));
        for (pos, loc) in std::iter::once(depot).chain(stops).enumerate() {
            if pos > 0 {
                time += data.duration(prev, loc);
                distance += data.distance(prev, loc);
            }

            let client = data.client(loc);
            let arrival = time;
            let (wait_duration, time_warp) = window_effect(client, arrival);
            let service_start = arrival + wait_duration - time_warp;
            warp += time_warp;
            time = service_start + client.service_duration();

            if pos > 0 && pos <= clients.len() {
                load += client.demand();
                route.push_visit(Visit {
                    client: loc,
                    arrival_time: arrival,
                    service_start,
                    wait_duration,
                    time_warp,
                    load_after: load,
                });
            }
            prev = loc;
        }

        let release_warp = (tws.release_time() - tws.tw_late()).max(0);
        let duration = time - start + warp;
        route.finish(time, distance, duration, warp + release_warp);

        let mut violations = Vec::new();
        if clients.is_empty() {
            return (route, violations);
        }

        if load > vehicle.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: 0,
                load,
                capacity: vehicle.capacity(),
            }));
        }

        if route.time_warp() > 0 {
            violations.push(Violation::new(ViolationType::TimeWarp {
                route_index: 0,
                time_warp: route.time_warp(),
            }));
        }

        if let Some(max_duration) = vehicle.max_duration() {
            if duration > max_duration {
                violations.push(Violation::new(ViolationType::MaxDurationExceeded {
                    route_index: 0,
                    duration,
                    max_duration,
                }));
            }
        }

        (route, violations)
    }

    /// Evaluates an entire solution, returning its total distance and all
    /// violations with route indices filled in.
    pub fn evaluate_solution(&self, solution: &Solution) -> (Distance, Vec<Violation>) {
        let mut total_distance = 0;
        let mut all_violations = Vec::new();

        for (idx, clients) in solution.routes().iter().enumerate() {
            let (route, mut violations) = self.schedule(clients);
            for v in &mut violations {
                v.set_route_index(idx);
            }
            total_distance += route.distance();
            all_violations.append(&mut violations);
        }

        (total_distance, all_violations)
    }
}

/// Waiting and time warp when arriving at `client` at `arrival`.
#[cfg(not(feature = "no-time-windows"))]
fn window_effect(client: &Client, arrival: Duration) -> (Duration, Duration) {
    let tw = client.time_window();
    (tw.waiting_time(arrival), tw.lateness(arrival))
}

/// Windows are ignored, matching the all-zero route segments.
#[cfg(feature = "no-time-windows")]
fn window_effect(_client: &Client, _arrival: Duration) -> (Duration, Duration) {
    (0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, TimeWindow, VehicleType};
    use crate::segment::TimeWindowSegment;
    use proptest::prelude::*;

    fn tw(earliest: Duration, latest: Duration) -> TimeWindow {
        TimeWindow::new(earliest, latest).expect("valid")
    }

    fn setup(vehicle: VehicleType) -> ProblemData {
        let clients = vec![
            Client::depot(0, 0),
            Client::new(3, 4).with_demand(10).with_service_duration(5),
            Client::new(6, 8).with_demand(20).with_service_duration(5),
            Client::new(0, 10).with_demand(15).with_service_duration(5),
        ];
        ProblemData::euclidean(clients, vehicle).expect("valid")
    }

    #[test]
    fn test_schedule_empty() {
        let data = setup(VehicleType::new(50, 1));
        let (route, violations) = RouteEvaluator::new(&data).schedule(&[]);
        assert!(route.is_empty());
        assert!(violations.is_empty());
        assert_eq!(route.distance(), 0);
        assert_eq!(route.duration(), 0);
    }

    #[test]
    fn test_schedule_single() {
        let data = setup(VehicleType::new(50, 1));
        let (route, violations) = RouteEvaluator::new(&data).schedule(&[1]);
        assert!(violations.is_empty());
        assert_eq!(route.distance(), 10);
        assert_eq!(route.duration(), 15);
        assert_eq!(route.total_load(), 10);
    }

    #[test]
    fn test_capacity_violated() {
        let data = setup(VehicleType::new(25, 1));
        let (route, violations) = RouteEvaluator::new(&data).schedule(&[1, 2, 3]);
        assert_eq!(route.len(), 3);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                load: 45,
                capacity: 25,
                ..
            }
        ));
    }

    #[cfg(not(feature = "no-time-windows"))]
    #[test]
    fn test_start_delayed_to_avoid_waiting() {
        let clients = vec![
            Client::depot(0, 0),
            Client::new(3, 4).with_service_duration(5).with_time_window(tw(20, 100)),
            Client::new(6, 8).with_service_duration(5).with_time_window(tw(60, 100)),
        ];
        let data = ProblemData::euclidean(clients, VehicleType::new(100, 1)).expect("valid");
        let (route, violations) = RouteEvaluator::new(&data).schedule(&[1, 2]);
        assert!(violations.is_empty());
        assert_eq!(route.start_time(), 45);
        assert_eq!(route.visits()[0].service_start, 50);
        assert_eq!(route.visits()[1].wait_duration, 0);
        assert_eq!(route.end_time(), 75);
        assert_eq!(route.duration(), 30);
    }

    #[cfg(not(feature = "no-time-windows"))]
    #[test]
    fn test_unavoidable_waiting() {
        let clients = vec![
            Client::depot(0, 0),
            Client::new(3, 4).with_service_duration(5).with_time_window(tw(0, 10)),
            Client::new(6, 8).with_service_duration(5).with_time_window(tw(60, 100)),
        ];
        let data = ProblemData::euclidean(clients, VehicleType::new(100, 1)).expect("valid");
        let (route, violations) = RouteEvaluator::new(&data).schedule(&[1, 2]);
        assert!(violations.is_empty());
        // Client 1 closes at 10, so client 2 is reached at 20 at the latest.
        let v2 = &route.visits()[1];
        assert_eq!(route.start_time(), 5);
        assert_eq!(v2.arrival_time, 20);
        assert_eq!(v2.wait_duration, 40);
        assert_eq!(v2.service_start, 60);
        assert_eq!(route.end_time(), 75);
        assert_eq!(route.duration(), 70);
    }

    #[cfg(not(feature = "no-time-windows"))]
    #[test]
    fn test_time_warp_violation() {
        let clients = vec![
            Client::depot(0, 0),
            Client::new(3, 4).with_service_duration(5).with_time_window(tw(0, 3)),
        ];
        let data = ProblemData::euclidean(clients, VehicleType::new(100, 1)).expect("valid");
        let (route, violations) = RouteEvaluator::new(&data).schedule(&[1]);
        assert_eq!(route.visits()[0].time_warp, 2);
        assert_eq!(route.visits()[0].service_start, 3);
        assert_eq!(
            violations,
            vec![Violation::new(ViolationType::TimeWarp {
                route_index: 0,
                time_warp: 2
            })]
        );
    }

    #[cfg(not(feature = "no-time-windows"))]
    #[test]
    fn test_release_time_delays_start() {
        let clients = vec![
            Client::depot(0, 0),
            Client::new(3, 4).with_service_duration(5).with_release_time(40),
        ];
        let data = ProblemData::euclidean(clients, VehicleType::new(100, 1)).expect("valid");
        let (route, violations) = RouteEvaluator::new(&data).schedule(&[1]);
        assert!(violations.is_empty());
        assert_eq!(route.start_time(), 40);
        assert_eq!(route.visits()[0].arrival_time, 45);
    }

    #[cfg(not(feature = "no-time-windows"))]
    #[test]
    fn test_release_after_depot_closes() {
        let clients = vec![
            Client::depot(0, 0).with_time_window(tw(0, 30)),
            Client::new(3, 4).with_release_time(40),
        ];
        let data = ProblemData::euclidean(clients, VehicleType::new(100, 1)).expect("valid");
        let (route, violations) = RouteEvaluator::new(&data).schedule(&[1]);
        // The route must leave by 20 to be back at 30; release comes 20 later.
        assert_eq!(route.time_warp(), 20);
        assert!(matches!(
            violations[0].kind,
            ViolationType::TimeWarp { time_warp: 20, .. }
        ));
    }

    #[cfg(feature = "no-time-windows")]
    #[test]
    fn test_windows_ignored_without_time_windows() {
        use crate::evaluation::{CostEvaluator, PenaltyParams};

        let clients = vec![
            Client::depot(0, 0),
            Client::new(3, 4).with_service_duration(5).with_time_window(tw(0, 3)),
            Client::new(6, 8).with_service_duration(5).with_time_window(tw(60, 100)),
        ];
        let data = ProblemData::euclidean(clients, VehicleType::new(100, 1)).expect("valid");
        let (route, violations) = RouteEvaluator::new(&data).schedule(&[1, 2]);
        assert!(violations.is_empty());
        assert_eq!(route.start_time(), 0);
        assert_eq!(route.time_warp(), 0);
        assert_eq!(route.visits()[1].wait_duration, 0);

        let costs = CostEvaluator::new(PenaltyParams::default());
        assert!(costs.is_feasible(&data, &Solution::new(vec![vec![1, 2]])));
    }

    #[test]
    fn test_max_duration_violated() {
        let data = setup(VehicleType::new(100, 1).with_max_duration(10));
        let (_, violations) = RouteEvaluator::new(&data).schedule(&[1]);
        assert_eq!(
            violations,
            vec![Violation::new(ViolationType::MaxDurationExceeded {
                route_index: 0,
                duration: 15,
                max_duration: 10
            })]
        );
    }

    #[test]
    fn test_evaluate_solution_sets_route_index() {
        let data = setup(VehicleType::new(25, 2));
        let sol = Solution::new(vec![vec![1], vec![2, 3]]);
        let (distance, violations) = RouteEvaluator::new(&data).evaluate_solution(&sol);
        assert_eq!(distance, 10 + (10 + 6 + 10));
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded { route_index: 1, .. }
        ));
    }

    fn instance_strategy() -> impl Strategy<Value = (ProblemData, Vec<usize>)> {
        (2usize..7).prop_flat_map(|n| {
            (
                prop::collection::vec((0i64..40, 0i64..40, 0i64..20, 0i64..150, 0i64..80, 0i64..120), n),
                Just(n),
            )
                .prop_map(|(raw, n)| {
                    let mut clients = vec![Client::depot(20, 20)];
                    for (x, y, service, earliest, width, release) in raw {
                        clients.push(
                            Client::new(x, y)
                                .with_service_duration(service)
                                .with_time_window(tw(earliest, earliest + width))
                                .with_release_time(release),
                        );
                    }
                    let data = ProblemData::euclidean(clients, VehicleType::new(100, 1))
                        .expect("valid");
                    (data, (1..=n).collect())
                })
        })
    }

    #[cfg(not(feature = "no-time-windows"))]
    proptest! {
        #[test]
        fn prop_schedule_agrees_with_segment((data, order) in instance_strategy()) {
            let (route, _) = RouteEvaluator::new(&data).schedule(&order);
            let segments = RouteSegments::new(&data, &order);
            let tws: &TimeWindowSegment = segments.segment();
            prop_assert_eq!(route.duration(), tws.duration());
            prop_assert_eq!(route.time_warp(), tws.time_warp());
            prop_assert_eq!(route.distance(), segments.distance());
        }
    }
}
