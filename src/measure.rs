//! Integer measures shared by every module.
//!
//! All quantities are signed 64-bit integers. Segment arithmetic subtracts
//! durations freely before clamping at zero, so the width must comfortably
//! exceed any horizon a real instance uses.

/// Elapsed time, in the instance's time unit.
pub type Duration = i64;

/// Travelled distance.
pub type Distance = i64;

/// Objective value, including penalties.
pub type Cost = i64;

/// Demand or vehicle capacity.
pub type Load = i64;
