//! Route evaluation: segment caches, penalised costs and schedules.
//!
//! - [`RouteSegments`]: prefix/suffix segment cache for O(1) move scoring
//! - [`CostEvaluator`]: distance plus capacity and time warp penalties
//! - [`RouteEvaluator`]: visit-by-visit schedule and violation report

mod cost;
mod evaluator;
mod route_segments;

pub use cost::{CostEvaluator, PenaltyParams};
pub use evaluator::RouteEvaluator;
pub use route_segments::RouteSegments;
