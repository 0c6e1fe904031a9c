//! # u-timewarp
//!
//! Composable time-window segments for vehicle routing with time windows,
//! release times and route duration limits. A segment digest summarizes any
//! contiguous run of visits in a handful of integers, and two adjacent
//! digests merge in constant time, so local search moves are scored without
//! re-simulating the route.
//!
//! ## Modules
//!
//! - [`measure`]: Integer measure aliases (Duration, Distance, Cost, Load)
//! - [`models`]: Domain model types (Client, VehicleType, ProblemData, Route, Solution)
//! - [`distance`]: Distance and duration matrices, the duration lookup trait
//! - [`segment`]: The time window segment digest and its merge operator
//! - [`evaluation`]: Route segment caches, penalised cost, schedule simulation
//! - [`local_search`]: Relocate, swap, 2-opt* and 2-opt operators plus a driver
//! - [`error`]: Construction-time validation errors

pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod measure;
pub mod models;
pub mod segment;

pub use error::{Result, RoutingError};
