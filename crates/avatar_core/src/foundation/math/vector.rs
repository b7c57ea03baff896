//! Fixed-size numeric vectors
//!
//! Vectors are move-only values drawn from their type's shared pool. Mutating
//! methods work in place and return `&mut Self` so calls chain; the "pure"
//! variants (`plus`, `scaled`, ...) take a fresh copy from the pool first.

use std::fmt;
use std::ops::{Index, IndexMut};

use super::matrix::Matrix;
use super::{constants, Mat4};
use crate::error::{CoreError, CoreResult};
use crate::foundation::memory::{impl_pooled, Poolable, Pooled};

/// Vector of `N` double precision components
///
/// Components are addressed by name (`x`, `y`, `z`, `w`), by 1-based index
/// through [`Vector::get`], or by 0-based index through `Index`.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<const N: usize> {
    data: [f64; N],
}

/// Two component vector
pub type Vec2 = Vector<2>;

/// Three component vector
pub type Vec3 = Vector<3>;

/// Four component vector
pub type Vec4 = Vector<4>;

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const N: usize> Poolable for Vector<N> {
    fn create() -> Self {
        Self::zeros()
    }

    fn reset(&mut self) {
        self.data = [0.0; N];
    }
}

impl_pooled!(Vector<2>, 300);
impl_pooled!(Vector<3>, 300);
impl_pooled!(Vector<4>, 300);

impl<const N: usize> Vector<N> {
    /// Vector with every component zero
    pub const fn zeros() -> Self {
        Self { data: [0.0; N] }
    }

    /// Wrap raw components
    pub const fn from_array(data: [f64; N]) -> Self {
        Self { data }
    }

    /// Number of components
    pub const fn size(&self) -> usize {
        N
    }

    /// Components as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Components as an array
    pub fn to_array(&self) -> [f64; N] {
        self.data
    }

    /// First component, 0 if absent
    pub fn x(&self) -> f64 {
        self.component(0)
    }

    /// Second component, 0 if absent
    pub fn y(&self) -> f64 {
        self.component(1)
    }

    /// Third component, 0 if absent
    pub fn z(&self) -> f64 {
        self.component(2)
    }

    /// Fourth component, 0 if absent
    pub fn w(&self) -> f64 {
        self.component(3)
    }

    fn component(&self, i: usize) -> f64 {
        self.data.get(i).copied().unwrap_or(0.0)
    }

    /// Component by 1-based index
    pub fn get(&self, index: usize) -> CoreResult<f64> {
        index
            .checked_sub(1)
            .and_then(|i| self.data.get(i).copied())
            .ok_or_else(|| CoreError::index(index, N))
    }

    /// Overwrite a component by 1-based index
    pub fn set_index(&mut self, index: usize, value: f64) -> CoreResult<&mut Self> {
        let slot = index
            .checked_sub(1)
            .and_then(|i| self.data.get_mut(i))
            .ok_or_else(|| CoreError::index(index, N))?;
        *slot = value;
        Ok(self)
    }

    // -- basic math -- //

    /// Copy every component from `other`
    pub fn set(&mut self, other: &Self) -> &mut Self {
        self.data = other.data;
        self
    }

    /// Overwrite every component from an array
    pub fn set_array(&mut self, data: [f64; N]) -> &mut Self {
        self.data = data;
        self
    }

    /// Reset every component to zero
    pub fn reset(&mut self) -> &mut Self {
        self.data = [0.0; N];
        self
    }

    fn zip_with(&mut self, other: &Self, f: impl Fn(f64, f64) -> f64) -> &mut Self {
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a = f(*a, *b);
        }
        self
    }

    /// Componentwise addition
    pub fn add(&mut self, other: &Self) -> &mut Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Componentwise subtraction
    pub fn sub(&mut self, other: &Self) -> &mut Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Componentwise multiplication
    pub fn mul(&mut self, other: &Self) -> &mut Self {
        self.zip_with(other, |a, b| a * b)
    }

    /// Componentwise division
    ///
    /// Zero components in `other` produce IEEE-754 infinities or NaN.
    pub fn div(&mut self, other: &Self) -> &mut Self {
        self.zip_with(other, |a, b| a / b)
    }

    /// Componentwise modulo whose result takes the sign of the divisor
    pub fn reduce(&mut self, other: &Self) -> &mut Self {
        self.zip_with(other, |a, b| ((a % b) + b) % b)
    }

    /// Multiply every component by `factor`
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        for a in &mut self.data {
            *a *= factor;
        }
        self
    }

    /// Divide every component by a scalar
    pub fn div_scalar(&mut self, divisor: f64) -> CoreResult<&mut Self> {
        if divisor == 0.0 {
            return Err(CoreError::DivideByZero);
        }
        Ok(self.scale(1.0 / divisor))
    }

    /// Reduce every component modulo a scalar
    pub fn reduce_scalar(&mut self, modulus: f64) -> CoreResult<&mut Self> {
        if modulus == 0.0 {
            return Err(CoreError::DivideByZero);
        }
        for a in &mut self.data {
            *a = ((*a % modulus) + modulus) % modulus;
        }
        Ok(self)
    }

    /// Apply `f` to every component
    pub fn apply(&mut self, f: impl Fn(f64) -> f64) -> &mut Self {
        for a in &mut self.data {
            *a = f(*a);
        }
        self
    }

    /// Round every component down
    pub fn floor(&mut self) -> &mut Self {
        self.apply(f64::floor)
    }

    /// Round every component up
    pub fn ceil(&mut self) -> &mut Self {
        self.apply(f64::ceil)
    }

    // -- metrics -- //

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.data.iter().zip(other.data.iter()).map(|(a, b)| a * b).sum()
    }

    /// Squared euclidean length
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Scale to unit length; zero vectors are left untouched
    pub fn normalize(&mut self) -> &mut Self {
        let len = self.length();
        if len > 0.0 {
            self.scale(1.0 / len);
        }
        self
    }

    /// Rescale so the length lies within `[min, max]`, keeping direction
    ///
    /// Missing bounds default to 0 and infinity. Zero vectors are left
    /// untouched since they have no direction to keep.
    pub fn clamp_length(&mut self, min: Option<f64>, max: Option<f64>) -> &mut Self {
        let min = min.unwrap_or(0.0);
        let max = max.unwrap_or(f64::INFINITY);
        let len = self.length();
        if len == 0.0 {
            return self;
        }
        if len < min {
            self.scale(min / len);
        } else if len > max {
            self.scale(max / len);
        }
        self
    }

    /// Apply `matrix` to this vector: `v = M · v`
    pub fn transform(&mut self, matrix: &Matrix<N>) -> &mut Self {
        let m = matrix.entries();
        let v = self.data;
        for (out, row) in self.data.iter_mut().zip(m.iter()) {
            *out = row.iter().zip(v.iter()).map(|(a, b)| a * b).sum();
        }
        self
    }

    /// True if every component is strictly less than the matching one
    pub fn all_lt(&self, other: &Self) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(a, b)| a < b)
    }

    /// True if every component is less than or equal to the matching one
    pub fn all_le(&self, other: &Self) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(a, b)| a <= b)
    }

    // -- swizzles -- //

    /// Read components through a selector string
    ///
    /// Each character picks a component (`x`/`r`/`1` through `w`/`a`/`4`,
    /// limited to this vector's size) or `_` for a constant zero.
    pub fn swizzle(&self, key: &str) -> CoreResult<Swizzled> {
        let len = key.chars().count();
        if len == 0 || len > 4 {
            return Err(CoreError::swizzle(format!(
                "key \"{key}\" must select 1 to 4 components"
            )));
        }

        let mut values = [0.0; 4];
        for (slot, c) in values.iter_mut().zip(key.chars()) {
            *slot = match swizzle_slot::<N>(c) {
                Some(Some(i)) => self.data[i],
                Some(None) => 0.0,
                None => return Err(invalid_swizzle_char::<N>(c)),
            };
        }

        Ok(match len {
            1 => Swizzled::Scalar(values[0]),
            2 => Swizzled::Vec2(Vec2::of(values[0], values[1])),
            3 => Swizzled::Vec3(Vec3::of(values[0], values[1], values[2])),
            _ => Swizzled::Vec4(Vec4::of(values[0], values[1], values[2], values[3])),
        })
    }

    /// Write components through a selector string
    ///
    /// `values` must have exactly one entry per selector character; values
    /// under a `_` selector are ignored. Nothing is written when the key is
    /// rejected.
    pub fn set_swizzle(&mut self, key: &str, values: &[f64]) -> CoreResult<&mut Self> {
        let len = key.chars().count();
        if len != values.len() {
            return Err(CoreError::swizzle(format!(
                "key \"{key}\" selects {len} components but {} were given",
                values.len()
            )));
        }

        if len == 0 || len > 4 {
            return Err(CoreError::swizzle(format!(
                "key \"{key}\" must select 1 to 4 components"
            )));
        }

        let mut targets = [None; 4];
        for (slot, c) in targets.iter_mut().zip(key.chars()) {
            *slot = swizzle_slot::<N>(c).ok_or_else(|| invalid_swizzle_char::<N>(c))?;
        }

        for (target, value) in targets.iter().zip(values) {
            if let Some(i) = target {
                self.data[*i] = *value;
            }
        }
        Ok(self)
    }
}

/// Map a swizzle character to a component slot
///
/// Returns `Some(None)` for the wildcard and `None` for characters that are
/// not valid for a vector of size `N`.
fn swizzle_slot<const N: usize>(c: char) -> Option<Option<usize>> {
    let slot = match c {
        '1' | 'x' | 'r' => 0,
        '2' | 'y' | 'g' => 1,
        '3' | 'z' | 'b' => 2,
        '4' | 'w' | 'a' => 3,
        '_' => return Some(None),
        _ => return None,
    };
    (slot < N).then_some(Some(slot))
}

fn invalid_swizzle_char<const N: usize>(c: char) -> CoreError {
    CoreError::swizzle(format!("invalid character '{c}' for a vector of size {N}"))
}

/// Pure variants backed by the shared pool
impl<const N: usize> Vector<N>
where
    Self: Pooled,
{
    /// Pooled copy of this vector
    pub fn copy(&self) -> Self {
        let mut out = Self::fresh();
        out.data = self.data;
        out
    }

    /// Pooled vector holding `data`
    pub fn pooled(data: [f64; N]) -> Self {
        let mut out = Self::fresh();
        out.data = data;
        out
    }

    /// `self + other` as a new vector
    pub fn plus(&self, other: &Self) -> Self {
        let mut out = self.copy();
        out.add(other);
        out
    }

    /// `self - other` as a new vector
    pub fn minus(&self, other: &Self) -> Self {
        let mut out = self.copy();
        out.sub(other);
        out
    }

    /// Componentwise product as a new vector
    pub fn times(&self, other: &Self) -> Self {
        let mut out = self.copy();
        out.mul(other);
        out
    }

    /// Componentwise quotient as a new vector
    pub fn divided_by(&self, other: &Self) -> Self {
        let mut out = self.copy();
        out.div(other);
        out
    }

    /// Componentwise modulo as a new vector
    pub fn modulo(&self, other: &Self) -> Self {
        let mut out = self.copy();
        out.reduce(other);
        out
    }

    /// Scaled copy
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.copy();
        out.scale(factor);
        out
    }

    /// Copy divided by a scalar
    pub fn divided_by_scalar(&self, divisor: f64) -> CoreResult<Self> {
        if divisor == 0.0 {
            return Err(CoreError::DivideByZero);
        }
        Ok(self.scaled(1.0 / divisor))
    }

    /// Copy reduced modulo a scalar
    pub fn modulo_scalar(&self, modulus: f64) -> CoreResult<Self> {
        let mut out = self.copy();
        match out.reduce_scalar(modulus) {
            Ok(_) => Ok(out),
            Err(err) => {
                out.retire();
                Err(err)
            }
        }
    }

    /// Negated copy
    pub fn negated(&self) -> Self {
        self.scaled(-1.0)
    }

    /// Unit length copy
    pub fn normalized(&self) -> Self {
        let mut out = self.copy();
        out.normalize();
        out
    }

    /// Length-clamped copy
    pub fn clamped(&self, min: Option<f64>, max: Option<f64>) -> Self {
        let mut out = self.copy();
        out.clamp_length(min, max);
        out
    }

    /// Copy with every component converted from degrees to radians
    pub fn to_rad(&self) -> Self {
        self.scaled(constants::DEG_TO_RAD)
    }

    /// Copy with every component converted from radians to degrees
    pub fn to_deg(&self) -> Self {
        self.scaled(constants::RAD_TO_DEG)
    }

    /// Copy transformed by `matrix`
    pub fn transformed(&self, matrix: &Matrix<N>) -> Self {
        let mut out = self.copy();
        out.transform(matrix);
        out
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.data[index]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.data[index]
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(data: [f64; N]) -> Self {
        Self::from_array(data)
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}

impl Vec2 {
    /// Construct from components
    pub const fn new(x: f64, y: f64) -> Self {
        Self { data: [x, y] }
    }

    /// Pooled vector from components
    pub fn of(x: f64, y: f64) -> Self {
        Self::pooled([x, y])
    }

    /// Extend to a 3-vector with the given last component
    pub fn augmented(&self, z: f64) -> Vec3 {
        Vec3::of(self.data[0], self.data[1], z)
    }
}

impl Vec3 {
    /// Construct from components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { data: [x, y, z] }
    }

    /// Pooled vector from components
    pub fn of(x: f64, y: f64, z: f64) -> Self {
        Self::pooled([x, y, z])
    }

    /// Overwrite all three components
    pub fn set_xyz(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.data = [x, y, z];
        self
    }

    /// Cross product `self × other` as a new vector
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::of(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Transform as a point (implicit `w = 1`) by a 4×4 matrix
    pub fn transform_point(&mut self, matrix: &Mat4) -> &mut Self {
        self.transform_homogeneous(matrix, 1.0)
    }

    /// Transform as a direction (implicit `w = 0`) by a 4×4 matrix
    pub fn transform_direction(&mut self, matrix: &Mat4) -> &mut Self {
        self.transform_homogeneous(matrix, 0.0)
    }

    fn transform_homogeneous(&mut self, matrix: &Mat4, w: f64) -> &mut Self {
        let m = matrix.entries();
        let [x, y, z] = self.data;
        for (out, row) in self.data.iter_mut().zip(m.iter()) {
            *out = row[0] * x + row[1] * y + row[2] * z + row[3] * w;
        }
        self
    }

    /// Extend to a 4-vector with the given last component
    pub fn augmented(&self, w: f64) -> Vec4 {
        Vec4::of(self.data[0], self.data[1], self.data[2], w)
    }

    /// Drop the last component
    pub fn deaugmented(&self) -> Vec2 {
        Vec2::of(self.data[0], self.data[1])
    }
}

impl Vec4 {
    /// Construct from components
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Pooled vector from components
    pub fn of(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::pooled([x, y, z, w])
    }

    /// Drop the last component
    pub fn deaugmented(&self) -> Vec3 {
        Vec3::of(self.data[0], self.data[1], self.data[2])
    }
}

/// Result of a swizzle read
#[derive(Debug, Clone, PartialEq)]
pub enum Swizzled {
    /// Single component selected
    Scalar(f64),
    /// Two components selected
    Vec2(Vec2),
    /// Three components selected
    Vec3(Vec3),
    /// Four components selected
    Vec4(Vec4),
}

impl Swizzled {
    /// Number of selected components
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Vec2(_) => 2,
            Self::Vec3(_) => 3,
            Self::Vec4(_) => 4,
        }
    }

    /// Always false; a swizzle selects at least one component
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Selected components in selector order
    pub fn values(&self) -> Vec<f64> {
        match self {
            Self::Scalar(v) => vec![*v],
            Self::Vec2(v) => v.as_slice().to_vec(),
            Self::Vec3(v) => v.as_slice().to_vec(),
            Self::Vec4(v) => v.as_slice().to_vec(),
        }
    }

    /// Return any pooled vector held by this result
    pub fn retire(self) {
        match self {
            Self::Scalar(_) => {}
            Self::Vec2(v) => v.retire(),
            Self::Vec3(v) => v.retire(),
            Self::Vec4(v) => v.retire(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_retired_vector_comes_back_zeroed() {
        Vec3::with_pool(crate::foundation::memory::Pool::clear);
        let mut v = Vec3::of(4.0, -5.0, 6.0);
        v.normalize();
        v.retire();

        let reused_before = Vec3::with_pool(|pool| pool.stats().reused);
        let fresh = Vec3::fresh();
        assert_eq!(Vec3::with_pool(|pool| pool.stats().reused), reused_before + 1);
        assert_eq!(fresh, Vec3::zeros());
    }

    #[test]
    fn test_componentwise_arithmetic() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v.add(&Vec3::new(1.0, 1.0, 1.0))
            .mul(&Vec3::new(2.0, 3.0, 4.0))
            .sub(&Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(v, Vec3::new(3.0, 8.0, 15.0));

        v.div(&Vec3::new(3.0, 2.0, 5.0));
        assert_eq!(v, Vec3::new(1.0, 4.0, 3.0));
    }

    #[test]
    fn test_reduce_is_non_negative_for_positive_divisor() {
        let mut v = Vec2::new(-1.0, 7.5);
        v.reduce(&Vec2::new(3.0, 2.0));
        assert_eq!(v, Vec2::new(2.0, 1.5));

        let mut w = Vec2::new(5.0, -5.0);
        w.reduce(&Vec2::new(-3.0, -3.0));
        assert_eq!(w, Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_scalar_division_by_zero_fails() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.div_scalar(0.0).unwrap_err(), CoreError::DivideByZero);
        assert_eq!(v.reduce_scalar(0.0).unwrap_err(), CoreError::DivideByZero);
        assert_eq!(v, Vec4::new(1.0, 2.0, 3.0, 4.0));

        v.div_scalar(2.0).unwrap();
        assert_eq!(v, Vec4::new(0.5, 1.0, 1.5, 2.0));
    }

    #[test]
    fn test_elementwise_division_propagates_infinity() {
        let mut v = Vec2::new(1.0, 0.0);
        v.div(&Vec2::new(0.0, 0.0));
        assert!(v.x().is_infinite());
        assert!(v.y().is_nan());
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut v = Vec3::zeros();
        v.normalize();
        assert_eq!(v, Vec3::zeros());

        let mut u = Vec3::new(3.0, 0.0, 4.0);
        u.normalize();
        assert_relative_eq!(u.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(u.x(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_clamp_length_keeps_direction() {
        let mut v = Vec2::new(3.0, 4.0);
        v.clamp_length(None, Some(2.5));
        assert_relative_eq!(v.length(), 2.5, epsilon = 1e-12);
        assert_relative_eq!(v.x() / v.y(), 0.75, epsilon = 1e-12);

        let mut short = Vec2::new(0.3, 0.4);
        short.clamp_length(Some(1.0), None);
        assert_relative_eq!(short.length(), 1.0, epsilon = 1e-12);

        let mut inside = Vec2::new(3.0, 4.0);
        inside.clamp_length(Some(1.0), Some(10.0));
        assert_eq!(inside, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_one_based_index_access() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.get(1).unwrap(), 1.0);
        assert_eq!(v.get(3).unwrap(), 3.0);
        assert_eq!(v.get(0).unwrap_err(), CoreError::index(0, 3));
        assert_eq!(v.get(4).unwrap_err(), CoreError::index(4, 3));

        v.set_index(2, 9.0).unwrap();
        assert_eq!(v[1], 9.0);
        assert!(v.set_index(5, 0.0).is_err());
    }

    #[test]
    fn test_missing_named_components_read_zero() {
        let v = Vec2::new(1.0, 2.0);
        assert_eq!(v.z(), 0.0);
        assert_eq!(v.w(), 0.0);
    }

    #[test]
    fn test_swizzle_read() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v.swizzle("x").unwrap(), Swizzled::Scalar(1.0));
        assert_eq!(v.swizzle("wzyx").unwrap(), Swizzled::Vec4(Vec4::new(4.0, 3.0, 2.0, 1.0)));
        assert_eq!(v.swizzle("r_b").unwrap(), Swizzled::Vec3(Vec3::new(1.0, 0.0, 3.0)));
        assert_eq!(v.swizzle("12").unwrap(), Swizzled::Vec2(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_swizzle_rejects_bad_keys() {
        let v = Vec2::new(1.0, 2.0);
        assert!(matches!(v.swizzle("xz"), Err(CoreError::InvalidSwizzle(_))));
        assert!(matches!(v.swizzle("q"), Err(CoreError::InvalidSwizzle(_))));
        assert!(matches!(v.swizzle(""), Err(CoreError::InvalidSwizzle(_))));
        assert!(matches!(v.swizzle("xyxyx"), Err(CoreError::InvalidSwizzle(_))));
    }

    #[test]
    fn test_swizzle_write() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v.set_swizzle("zx", &[10.0, 20.0]).unwrap();
        assert_eq!(v, Vec3::new(20.0, 2.0, 10.0));

        v.set_swizzle("_y", &[99.0, 7.0]).unwrap();
        assert_eq!(v, Vec3::new(20.0, 7.0, 10.0));

        assert!(v.set_swizzle("xy", &[1.0]).is_err());
        assert!(v.set_swizzle("xw", &[1.0, 2.0]).is_err());
        assert_eq!(v, Vec3::new(20.0, 7.0, 10.0));
    }

    #[test]
    fn test_swizzle_round_trip() {
        let samples = [
            Vec4::new(0.0, 0.0, 0.0, 0.0),
            Vec4::new(-1.5, 2.25, 1e9, -0.0),
            Vec4::new(f64::MAX, f64::MIN, 3.0, 4.0),
        ];
        for v2 in &samples {
            let mut v = Vec4::new(9.0, 8.0, 7.0, 6.0);
            v.set_swizzle("xyzw", v2.as_slice()).unwrap();
            assert_eq!(v.swizzle("xyzw").unwrap(), Swizzled::Vec4(v2.clone()));
        }
    }

    #[test]
    fn test_pure_variants_leave_receiver_untouched() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        let sum = a.plus(&b);
        assert_eq!(sum, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));

        let scaled = a.scaled(2.0);
        assert_eq!(scaled, Vec3::new(2.0, 4.0, 6.0));
        assert!(a.divided_by_scalar(0.0).is_err());
        assert!(a.modulo_scalar(0.0).is_err());

        sum.retire();
        scaled.retire();
    }

    #[test]
    fn test_cross_and_dot() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(x.dot(&y), 0.0);
        assert_eq!(Vec4::new(1.0, 2.0, 3.0, 4.0).length_squared(), 30.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vec3::new(1.0, -2.5, 0.0).to_string(), "{1, -2.5, 0}");
    }
}
