//! Conversions to nalgebra and approximate comparison support
//!
//! nalgebra is only used at the edges (tests, hosts that already speak it);
//! the core math keeps its own pooled types.

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{SMatrix, SVector};

use super::{Matrix, Vector};

impl<const N: usize> Vector<N> {
    /// Copy into a nalgebra column vector
    pub fn to_nalgebra(&self) -> SVector<f64, N> {
        SVector::from(self.to_array())
    }
}

impl<const N: usize> From<&SVector<f64, N>> for Vector<N> {
    fn from(v: &SVector<f64, N>) -> Self {
        let mut data = [0.0; N];
        data.copy_from_slice(v.as_slice());
        Vector::from_array(data)
    }
}

impl<const N: usize> Matrix<N> {
    /// Copy into a nalgebra matrix
    pub fn to_nalgebra(&self) -> SMatrix<f64, N, N> {
        let m = self.entries();
        SMatrix::from_fn(|r, c| m[r][c])
    }
}

impl<const N: usize> From<&SMatrix<f64, N, N>> for Matrix<N> {
    fn from(m: &SMatrix<f64, N, N>) -> Self {
        let mut rows = [[0.0; N]; N];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = m[(r, c)];
            }
        }
        Matrix::from_rows(rows)
    }
}

impl<const N: usize> AbsDiffEq for Vector<N> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const N: usize> RelativeEq for Vector<N> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<const N: usize> AbsDiffEq for Matrix<N> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.entries()
            .iter()
            .flatten()
            .zip(other.entries().iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const N: usize> RelativeEq for Matrix<N> {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.entries()
            .iter()
            .flatten()
            .zip(other.entries().iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
