//! Problem instance data.

use crate::distance::Matrix;
use crate::error::{Result, RoutingError};
use crate::measure::{Distance, Duration};

use super::{Client, TimeWindow, VehicleType};

/// A VRPTW instance: locations, a vehicle type and travel matrices.
///
/// Location indices double as lookup keys into both matrices. The vehicle
/// type's depot is one of these locations.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::{Client, ProblemData, VehicleType};
///
/// let clients = vec![
///     Client::depot(0, 0),
///     Client::new(3, 4).with_demand(10),
///     Client::new(6, 8).with_demand(20),
/// ];
/// let data = ProblemData::euclidean(clients, VehicleType::new(50, 2)).unwrap();
/// assert_eq!(data.num_locations(), 3);
/// assert_eq!(data.distance(0, 2), 10);
/// assert_eq!(data.duration(1, 2), 5);
/// assert_eq!(data.client_ids().collect::<Vec<_>>(), vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemData {
    clients: Vec<Client>,
    vehicle_type: VehicleType,
    distances: Matrix,
    durations: Matrix,
}

impl ProblemData {
    /// Creates problem data, validating every client and matrix dimension.
    pub fn new(
        clients: Vec<Client>,
        vehicle_type: VehicleType,
        distances: Matrix,
        durations: Matrix,
    ) -> Result<Self> {
        let n = clients.len();
        if vehicle_type.depot() >= n {
            return Err(RoutingError::UnknownLocation(vehicle_type.depot()));
        }
        for client in &clients {
            client.validate()?;
        }
        for (name, matrix) in [("distance", &distances), ("duration", &durations)] {
            if matrix.size() != n {
                return Err(RoutingError::MatrixDimension {
                    name,
                    expected: n,
                    actual: matrix.size(),
                });
            }
        }
        if let Some(value) = durations.min().filter(|&v| v < 0) {
            return Err(RoutingError::Negative {
                field: "travel duration",
                value,
            });
        }

        if let Some(value) = durations.max().filter(|&v| v > TimeWindow::HORIZON) {
            return Err(RoutingError::BeyondHorizon {
                field: "travel duration",
                value,
            });
        }

        Ok(Self {
            clients,
            vehicle_type,
            distances,
            durations,
        })
    }

    /// Creates problem data whose distances and durations are both the
    /// rounded Euclidean distances between client coordinates.
    pub fn euclidean(clients: Vec<Client>, vehicle_type: VehicleType) -> Result<Self> {
        let matrix = Matrix::from_clients(&clients);
        Self::new(clients, vehicle_type, matrix.clone(), matrix)
    }

    /// All locations, depot included.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Location `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn client(&self, idx: usize) -> &Client {
        &self.clients[idx]
    }

    /// Number of locations, depot included.
    pub fn num_locations(&self) -> usize {
        self.clients.len()
    }

    /// Indices of all locations other than the depot.
    pub fn client_ids(&self) -> impl Iterator<Item = usize> + '_ {
        let depot = self.vehicle_type.depot();
        (0..self.clients.len()).filter(move |&idx| idx != depot)
    }

    pub fn vehicle_type(&self) -> &VehicleType {
        &self.vehicle_type
    }

    pub fn depot(&self) -> usize {
        self.vehicle_type.depot()
    }

    pub fn distance_matrix(&self) -> &Matrix {
        &self.distances
    }

    pub fn duration_matrix(&self) -> &Matrix {
        &self.durations
    }

    /// Travel distance from `from` to `to`.
    pub fn distance(&self, from: usize, to: usize) -> Distance {
        self.distances.get(from, to)
    }

    /// Travel duration from `from` to `to`.
    pub fn duration(&self, from: usize, to: usize) -> Duration {
        self.durations.get(from, to)
    }
}
