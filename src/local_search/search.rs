//! Local search driver that chains the move operators.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::evaluation::CostEvaluator;
use crate::models::{ProblemData, Solution};

use super::{exchange_improve, relocate_improve, swap_improve, two_opt_improve};

/// A local search neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Relocate,
    Swap,
    Exchange,
    TwoOpt,
}

impl Operator {
    /// Every operator, in default order.
    pub const ALL: [Operator; 4] = [
        Operator::Relocate,
        Operator::Swap,
        Operator::Exchange,
        Operator::TwoOpt,
    ];

    /// Runs this operator to its local optimum.
    pub fn improve(self, data: &ProblemData, costs: &CostEvaluator, solution: &Solution) -> Solution {
        match self {
            Operator::Relocate => relocate_improve(data, costs, solution),
            Operator::Swap => swap_improve(data, costs, solution),
            Operator::Exchange => exchange_improve(data, costs, solution),
            Operator::TwoOpt => two_opt_improve(data, costs, solution),
        }
    }
}

/// Local search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSearchParams {
    /// Upper bound on passes over the operator list.
    pub max_passes: usize,
    /// Shuffle operator order at the start of every pass.
    pub shuffle: bool,
    /// Pad the solution with empty routes up to the fleet size so clients
    /// can move onto unused vehicles.
    pub use_empty_routes: bool,
}

impl Default for LocalSearchParams {
    fn default() -> Self {
        Self {
            max_passes: 50,
            shuffle: true,
            use_empty_routes: true,
        }
    }
}

/// Chains move operators until a full pass brings no improvement.
///
/// # Examples
///
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use u_timewarp::models::{Client, ProblemData, Solution, VehicleType};
/// use u_timewarp::evaluation::{CostEvaluator, PenaltyParams};
/// use u_timewarp::local_search::{LocalSearch, LocalSearchParams};
///
/// let clients = vec![
///     Client::depot(0, 0),
///     Client::new(10, 0).with_demand(1),
///     Client::new(20, 0).with_demand(1),
///     Client::new(-10, 0).with_demand(1),
///     Client::new(-20, 0).with_demand(1),
/// ];
/// let data = ProblemData::euclidean(clients, VehicleType::new(2, 3)).unwrap();
/// let costs = CostEvaluator::new(PenaltyParams::default());
/// let ls = LocalSearch::new(&data, &costs, LocalSearchParams::default());
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let initial = Solution::new(vec![vec![1, 3], vec![4, 2]]);
/// let improved = ls.run(&initial, &mut rng);
/// assert_eq!(costs.solution_cost(&data, &improved), 80);
/// ```
#[derive(Debug, Clone)]
pub struct LocalSearch<'a> {
    data: &'a ProblemData,
    costs: &'a CostEvaluator,
    params: LocalSearchParams,
    operators: Vec<Operator>,
}

impl<'a> LocalSearch<'a> {
    /// Creates a driver using every operator.
    pub fn new(data: &'a ProblemData, costs: &'a CostEvaluator, params: LocalSearchParams) -> Self {
        Self {
            data,
            costs,
            params,
            operators: Operator::ALL.to_vec(),
        }
    }

    /// Restricts the driver to the given operators.
    pub fn with_operators(mut self, operators: &[Operator]) -> Self {
        self.operators = operators.to_vec();
        self
    }

    pub fn params(&self) -> &LocalSearchParams {
        &self.params
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Improves `solution` until no operator finds an improving move or
    /// `max_passes` is reached. Empty routes are dropped from the result.
    pub fn run<R: Rng + ?Sized>(&self, solution: &Solution, rng: &mut R) -> Solution {
        let mut current = solution.clone();
        if self.params.use_empty_routes {
            let fleet = self.data.vehicle_type().num_available();
            let missing = fleet.saturating_sub(current.routes().len());
            current.routes_mut().extend(std::iter::repeat_with(Vec::new).take(missing));
        }

        let initial_cost = self.costs.solution_cost(self.data, &current);
        let mut cost = initial_cost;
        let mut ops = self.operators.clone();

        for pass in 0..self.params.max_passes {
            if self.params.shuffle {
                ops.shuffle(rng);
            }

            let mut improved = false;
            for op in &ops {
                let candidate = op.improve(self.data, self.costs, &current);
                let candidate_cost = self.costs.solution_cost(self.data, &candidate);
                if candidate_cost < cost {
                    current = candidate;
                    cost = candidate_cost;
                    improved = true;
                }
            }

            trace!(pass, cost, improved, "local search pass");
            if !improved {
                break;
            }
        }

        debug!(initial_cost, cost, "local search finished");
        current.compact();
        current
    }
}
