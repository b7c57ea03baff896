//! Math utilities and types
//!
//! Double precision vectors and square matrices used by scripts and the
//! avatar renderer. Both are pooled value types, see
//! [`crate::foundation::memory`].

pub mod interop;
pub mod matrix;
pub mod vector;

pub use matrix::{Cofactors, Mat2, Mat3, Mat4, Matrix, DEGENERATE_DETERMINANT};
pub use vector::{Swizzled, Vec2, Vec3, Vec4, Vector};

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f64 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f64 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + (b - a) * t
    }
}
