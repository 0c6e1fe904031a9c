//! Vehicle type with capacity and shift-length limits.

use serde::{Deserialize, Serialize};

use crate::measure::{Duration, Load};

/// A homogeneous fleet of vehicles sharing a depot and limits.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::VehicleType;
///
/// let v = VehicleType::new(200, 3).with_max_duration(480);
/// assert_eq!(v.capacity(), 200);
/// assert_eq!(v.num_available(), 3);
/// assert_eq!(v.max_duration(), Some(480));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleType {
    capacity: Load,
    num_available: usize,
    #[serde(default)]
    depot: usize,
    #[serde(default)]
    max_duration: Option<Duration>,
}

impl VehicleType {
    /// Creates a vehicle type with the given capacity and fleet size.
    ///
    /// Default: depot 0, no duration limit.
    pub fn new(capacity: Load, num_available: usize) -> Self {
        Self {
            capacity,
            num_available,
            depot: 0,
            max_duration: None,
        }
    }

    /// Sets the depot location.
    pub fn with_depot(mut self, depot: usize) -> Self {
        self.depot = depot;
        self
    }

    /// Sets the maximum route duration.
    pub fn with_max_duration(mut self, max: Duration) -> Self {
        self.max_duration = Some(max);
        self
    }

    /// Maximum load per route.
    pub fn capacity(&self) -> Load {
        self.capacity
    }

    /// Number of vehicles of this type.
    pub fn num_available(&self) -> usize {
        self.num_available
    }

    /// Depot location (start and end of every route).
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Maximum route duration, if any.
    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration
    }

    /// Duration bound passed to segment time warp queries.
    pub(crate) fn duration_limit(&self) -> Duration {
        self.max_duration.unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_new() {
        let v = VehicleType::new(200, 2);
        assert_eq!(v.capacity(), 200);
        assert_eq!(v.num_available(), 2);
        assert_eq!(v.depot(), 0);
        assert!(v.max_duration().is_none());
        assert_eq!(v.duration_limit(), Duration::MAX);
    }

    #[test]
    fn test_vehicle_type_builder() {
        let v = VehicleType::new(100, 1).with_depot(2).with_max_duration(480);
        assert_eq!(v.depot(), 2);
        assert_eq!(v.max_duration(), Some(480));
        assert_eq!(v.duration_limit(), 480);
    }
}
