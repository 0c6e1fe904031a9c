//! Dense integer matrix.

use crate::error::{Result, RoutingError};
use crate::models::Client;

/// A dense n×n matrix of integer travel measures stored in row-major order.
///
/// Used for both distances and durations.
///
/// # Examples
///
/// ```
/// use u_timewarp::models::Client;
/// use u_timewarp::distance::Matrix;
///
/// let clients = vec![
///     Client::depot(0, 0),
///     Client::new(3, 4),
///     Client::new(6, 8),
/// ];
/// let m = Matrix::from_clients(&clients);
/// assert_eq!(m.get(0, 1), 5);
/// assert_eq!(m.get(0, 2), 10);
/// assert_eq!(m.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<i64>,
    size: usize,
}

impl Matrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Computes rounded Euclidean distances between client coordinates.
    pub fn from_clients(clients: &[Client]) -> Self {
        let n = clients.len();
        let mut m = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = clients[i].distance_to(&clients[j]);
                m.set(i, j, d);
                m.set(j, i, d);
            }
        }
        m
    }

    /// Creates a matrix from an explicit n×n grid.
    pub fn from_data(size: usize, data: Vec<i64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(RoutingError::MatrixShape {
                expected: size * size,
                actual: data.len(),
            });
        }
        Ok(Self { data, size })
    }

    /// Returns the entry from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Sets the entry from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, value: i64) {
        self.data[from * self.size + to] = value;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Largest entry, or `None` for an empty matrix.
    pub fn max(&self) -> Option<i64> {
        self.data.iter().copied().max()
    }

    /// Smallest entry, or `None` for an empty matrix.
    pub fn min(&self) -> Option<i64> {
        self.data.iter().copied().min()
    }

    /// Returns `true` if `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }
}
