//! Travel matrices and the duration lookup seam used by segment merging.

mod lookup;
mod matrix;

pub use lookup::DurationLookup;
pub use matrix::Matrix;
