//! Local search operators for improving VRPTW solutions.
//!
//! Every operator scores candidate moves from cached [`RouteSegments`]
//! digests instead of re-simulating routes.
//!
//! - [`relocate`]: Inter-route client relocation
//! - [`swap`]: Inter-route client exchange
//! - [`exchange`]: Inter-route tail exchange (2-opt*)
//! - [`two_opt`]: Intra-route segment reversal
//! - [`LocalSearch`]: Driver chaining the operators
//!
//! [`RouteSegments`]: crate::evaluation::RouteSegments

pub mod exchange;
#[cfg(test)]
mod fixtures;
pub mod relocate;
mod search;
pub mod swap;
pub mod two_opt;

pub use exchange::{exchange_delta, exchange_improve};
pub use relocate::{relocate_delta, relocate_improve};
pub use search::{LocalSearch, LocalSearchParams, Operator};
pub use swap::{swap_delta, swap_improve};
pub use two_opt::{two_opt_delta, two_opt_improve};
