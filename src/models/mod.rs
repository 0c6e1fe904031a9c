//! Domain model types for time-window constrained routing.
//!
//! Provides clients with time windows and release times, a vehicle type with
//! capacity and duration limits, validated problem data, scheduled routes,
//! and solutions as client sequences.

mod client;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use client::{Client, TimeWindow};
pub use problem::ProblemData;
pub use route::{Route, Visit};
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::VehicleType;
