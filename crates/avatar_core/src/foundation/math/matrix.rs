//! Fixed-size square matrices with cached inverse and determinant
//!
//! Entries are stored row-major and addressed `v(row)(col)`, both 1-indexed
//! like in written math. The determinant is computed lazily and cached until
//! the next mutation; inverting a matrix stores an owned copy of the
//! pre-inversion entries so that inverting again is a copy, not a
//! recomputation.
//!
//! Rotation, scale and translation helpers left-multiply the receiver, so the
//! new transform is applied after everything already in the matrix.

use std::cell::Cell;
use std::fmt;

use super::constants;
use super::vector::{Vec3, Vector};
use crate::error::{CoreError, CoreResult};
use crate::foundation::memory::{impl_pooled, Poolable, Pooled};

/// Determinant used in place of an exact zero when inverting
///
/// Inversion never fails: a singular matrix is inverted as if its determinant
/// were the smallest positive double, so entries with non-zero cofactors
/// become infinite instead of raising an error.
pub const DEGENERATE_DETERMINANT: f64 = f64::from_bits(1);

/// Square matrix of `N`×`N` double precision entries
#[derive(Debug, Clone)]
pub struct Matrix<const N: usize> {
    m: [[f64; N]; N],
    determinant: Cell<Option<f64>>,
    inverse: Option<Box<Matrix<N>>>,
}

/// 2×2 matrix
pub type Mat2 = Matrix<2>;

/// 3×3 matrix
pub type Mat3 = Matrix<3>;

/// 4×4 matrix
pub type Mat4 = Matrix<4>;

/// Size-specific cofactor expansion backing [`Matrix::det`] and
/// [`Matrix::invert`]
pub trait Cofactors<const N: usize> {
    /// Determinant computed from the current entries
    fn compute_determinant(&self) -> f64;

    /// Adjugate (transposed cofactor matrix) of the current entries
    fn adjugate(&self) -> [[f64; N]; N];
}

impl<const N: usize> Default for Matrix<N> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<const N: usize> PartialEq for Matrix<N> {
    fn eq(&self, other: &Self) -> bool {
        self.m == other.m
    }
}

impl<const N: usize> Poolable for Matrix<N> {
    fn create() -> Self {
        Self::identity()
    }

    fn reset(&mut self) {
        Matrix::reset(self);
    }
}

impl_pooled!(Matrix<2>, 250);
impl_pooled!(Matrix<3>, 250);
impl_pooled!(Matrix<4>, 250);

const fn identity_entries<const N: usize>() -> [[f64; N]; N] {
    let mut m = [[0.0; N]; N];
    let mut i = 0;
    while i < N {
        m[i][i] = 1.0;
        i += 1;
    }
    m
}

impl<const N: usize> Matrix<N> {
    /// Identity matrix
    pub const fn identity() -> Self {
        Self::from_rows(identity_entries::<N>())
    }

    /// Matrix from row-major entries
    pub const fn from_rows(rows: [[f64; N]; N]) -> Self {
        Self {
            m: rows,
            determinant: Cell::new(None),
            inverse: None,
        }
    }

    /// Matrix from column-major entries
    pub fn from_columns(columns: [[f64; N]; N]) -> Self {
        let mut out = Self::from_rows(columns);
        out.transpose_entries();
        out
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        N
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        N
    }

    /// Row-major entries
    pub fn entries(&self) -> &[[f64; N]; N] {
        &self.m
    }

    /// Entry at 1-based `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> CoreResult<f64> {
        let (r, c) = Self::slot(row, col)?;
        Ok(self.m[r][c])
    }

    /// Overwrite the entry at 1-based `(row, col)`
    pub fn set_entry(&mut self, row: usize, col: usize, value: f64) -> CoreResult<&mut Self> {
        let (r, c) = Self::slot(row, col)?;
        self.m[r][c] = value;
        self.invalidate();
        Ok(self)
    }

    /// Entry by name, `"v11"` through `"vNN"`
    pub fn entry(&self, name: &str) -> CoreResult<f64> {
        let (row, col) = Self::parse_entry_name(name)?;
        self.get(row, col)
    }

    /// Overwrite an entry by name, `"v11"` through `"vNN"`
    pub fn set_named_entry(&mut self, name: &str, value: f64) -> CoreResult<&mut Self> {
        let (row, col) = Self::parse_entry_name(name)?;
        self.set_entry(row, col, value)
    }

    fn parse_entry_name(name: &str) -> CoreResult<(usize, usize)> {
        let mut chars = name.chars();
        let digit = |c: Option<char>| c.and_then(|c| c.to_digit(10)).map(|d| d as usize);
        match (chars.next(), digit(chars.next()), digit(chars.next()), chars.next()) {
            (Some('v'), Some(row), Some(col), None) => Ok((row, col)),
            _ => Err(CoreError::index(0, N)),
        }
    }

    fn slot(row: usize, col: usize) -> CoreResult<(usize, usize)> {
        if row == 0 || row > N {
            return Err(CoreError::index(row, N));
        }
        if col == 0 || col > N {
            return Err(CoreError::index(col, N));
        }
        Ok((row - 1, col - 1))
    }

    fn check_index(index: usize) -> CoreResult<usize> {
        if index == 0 || index > N {
            Err(CoreError::index(index, N))
        } else {
            Ok(index - 1)
        }
    }

    /// Overwrite a row (1-based) from a vector
    pub fn set_row(&mut self, row: usize, values: &Vector<N>) -> CoreResult<&mut Self> {
        let r = Self::check_index(row)?;
        self.m[r] = values.to_array();
        self.invalidate();
        Ok(self)
    }

    /// Overwrite a column (1-based) from a vector
    pub fn set_column(&mut self, col: usize, values: &Vector<N>) -> CoreResult<&mut Self> {
        let c = Self::check_index(col)?;
        for (row, value) in self.m.iter_mut().zip(values.as_slice()) {
            row[c] = *value;
        }
        self.invalidate();
        Ok(self)
    }

    // -- cache -- //

    /// Drop the cached determinant and inverse
    pub fn invalidate(&mut self) {
        self.determinant.set(None);
        self.inverse = None;
    }

    /// Determinant if it is currently cached
    pub fn cached_determinant(&self) -> Option<f64> {
        self.determinant.get()
    }

    /// Inverse if it is currently cached
    pub fn cached_inverse(&self) -> Option<&Self> {
        self.inverse.as_deref()
    }

    // -- mutation -- //

    /// Copy entries from `other`
    pub fn set(&mut self, other: &Self) -> &mut Self {
        self.m = other.m;
        self.invalidate();
        self
    }

    /// Overwrite entries from row-major data
    pub fn set_rows(&mut self, rows: [[f64; N]; N]) -> &mut Self {
        self.m = rows;
        self.invalidate();
        self
    }

    /// Reset to the identity matrix
    pub fn reset(&mut self) -> &mut Self {
        self.m = identity_entries::<N>();
        self.invalidate();
        self
    }

    /// Entrywise addition
    pub fn add(&mut self, other: &Self) -> &mut Self {
        self.zip_entries(other, |a, b| a + b)
    }

    /// Entrywise subtraction
    pub fn sub(&mut self, other: &Self) -> &mut Self {
        self.zip_entries(other, |a, b| a - b)
    }

    fn zip_entries(&mut self, other: &Self, f: impl Fn(f64, f64) -> f64) -> &mut Self {
        for (row, other_row) in self.m.iter_mut().zip(other.m.iter()) {
            for (a, b) in row.iter_mut().zip(other_row.iter()) {
                *a = f(*a, *b);
            }
        }
        self.invalidate();
        self
    }

    /// `self = other · self`; `other` becomes the outer transform
    pub fn multiply(&mut self, other: &Self) -> &mut Self {
        self.m = product(&other.m, &self.m);
        self.invalidate();
        self
    }

    /// `self = self · other`; `other` becomes the inner transform
    pub fn right_multiply(&mut self, other: &Self) -> &mut Self {
        self.m = product(&self.m, &other.m);
        self.invalidate();
        self
    }

    /// Swap rows and columns
    ///
    /// The determinant is unchanged, and a cached inverse stays valid once it
    /// is transposed along with the receiver.
    pub fn transpose(&mut self) -> &mut Self {
        self.transpose_entries();
        if let Some(inverse) = self.inverse.as_deref_mut() {
            inverse.transpose();
        }
        self
    }

    fn transpose_entries(&mut self) {
        for r in 0..N {
            for c in (r + 1)..N {
                let tmp = self.m[r][c];
                self.m[r][c] = self.m[c][r];
                self.m[c][r] = tmp;
            }
        }
    }

    /// Left-multiply by a rotation in the plane of rows `a` and `b`
    fn rotate_plane(&mut self, a: usize, b: usize, degrees: f64) -> &mut Self {
        let radians = degrees * constants::DEG_TO_RAD;
        let (s, c) = radians.sin_cos();
        for col in 0..N {
            let ra = self.m[a][col];
            let rb = self.m[b][col];
            self.m[a][col] = c * ra - s * rb;
            self.m[b][col] = s * ra + c * rb;
        }
        self.invalidate();
        self
    }

    /// Left-multiply the first three rows by a 3×3 block
    fn left_multiply_block3(&mut self, block: [[f64; 3]; 3]) -> &mut Self {
        for col in 0..N {
            let v = [self.m[0][col], self.m[1][col], self.m[2][col]];
            for (r, coefficients) in block.iter().enumerate() {
                self.m[r][col] =
                    coefficients[0] * v[0] + coefficients[1] * v[1] + coefficients[2] * v[2];
            }
        }
        self.invalidate();
        self
    }

    /// Multiply leading rows by the given factors
    fn scale_rows(&mut self, factors: &[f64]) -> &mut Self {
        for (row, factor) in self.m.iter_mut().zip(factors) {
            for v in row.iter_mut() {
                *v *= factor;
            }
        }
        self.invalidate();
        self
    }

    /// Homogeneous translation: add multiples of the last row to the leading rows
    fn translate_rows(&mut self, offsets: &[f64]) -> &mut Self {
        let last = self.m[N - 1];
        for (row, offset) in self.m.iter_mut().zip(offsets) {
            for (v, l) in row.iter_mut().zip(last.iter()) {
                *v += offset * l;
            }
        }
        self.invalidate();
        self
    }
}

fn product<const N: usize>(a: &[[f64; N]; N], b: &[[f64; N]; N]) -> [[f64; N]; N] {
    let mut out = [[0.0; N]; N];
    for (r, out_row) in out.iter_mut().enumerate() {
        for (c, out_value) in out_row.iter_mut().enumerate() {
            *out_value = (0..N).map(|k| a[r][k] * b[k][c]).sum();
        }
    }
    out
}

/// Combined `Rz · Ry · Rx` rotation block for angles in degrees
fn rotation_zyx(x: f64, y: f64, z: f64) -> [[f64; 3]; 3] {
    let (b, a) = (x * constants::DEG_TO_RAD).sin_cos();
    let (d, c) = (y * constants::DEG_TO_RAD).sin_cos();
    let (f, e) = (z * constants::DEG_TO_RAD).sin_cos();

    [
        [c * e, b * d * e - a * f, a * d * e + b * f],
        [c * f, a * e + b * d * f, a * d * f - b * e],
        [-d, b * c, a * c],
    ]
}

impl<const N: usize> Matrix<N>
where
    Self: Cofactors<N>,
{
    /// Determinant, computed on first use and cached until the next mutation
    pub fn det(&self) -> f64 {
        if let Some(det) = self.determinant.get() {
            return det;
        }
        let det = self.compute_determinant();
        self.determinant.set(Some(det));
        det
    }

    /// Invert in place
    ///
    /// A cached inverse is copied back without recomputation and the cached
    /// determinant is reciprocated. Otherwise the adjugate method is used,
    /// with an exactly-zero determinant replaced by
    /// [`DEGENERATE_DETERMINANT`]. Either way the pre-inversion entries are
    /// kept as this matrix's cached inverse.
    pub fn invert(&mut self) -> &mut Self {
        let previous_det = self.determinant.get();

        if let Some(mut cached) = self.inverse.take() {
            std::mem::swap(&mut self.m, &mut cached.m);
            let det = previous_det.map(|d| 1.0 / d);
            self.determinant.set(det);

            cached.determinant.set(previous_det);
            cached.inverse = Some(Box::new(Self::with_cache(self.m, det)));
            self.inverse = Some(cached);
            return self;
        }

        let previous = self.m;
        let mut det = previous_det.unwrap_or_else(|| self.compute_determinant());
        if det == 0.0 {
            det = DEGENERATE_DETERMINANT;
        }
        let inv_det = 1.0 / det;
        let adjugate = self.adjugate();
        for (row, adj_row) in self.m.iter_mut().zip(adjugate.iter()) {
            for (v, a) in row.iter_mut().zip(adj_row.iter()) {
                *v = a * inv_det;
            }
        }
        self.determinant.set(Some(inv_det));

        let mut original = Self::with_cache(previous, Some(det));
        original.inverse = Some(Box::new(Self::with_cache(self.m, Some(inv_det))));
        self.inverse = Some(Box::new(original));
        self
    }

    fn with_cache(m: [[f64; N]; N], det: Option<f64>) -> Self {
        Self {
            m,
            determinant: Cell::new(det),
            inverse: None,
        }
    }
}

/// Pure variants backed by the shared pool
impl<const N: usize> Matrix<N>
where
    Self: Pooled,
{
    /// Pooled copy of the entries (caches are not copied)
    pub fn copy(&self) -> Self {
        let mut out = Self::fresh();
        out.m = self.m;
        out
    }

    /// Pooled matrix from row-major entries
    pub fn pooled_rows(rows: [[f64; N]; N]) -> Self {
        let mut out = Self::fresh();
        out.set_rows(rows);
        out
    }

    /// `self + other` as a new matrix
    pub fn plus(&self, other: &Self) -> Self {
        let mut out = self.copy();
        out.add(other);
        out
    }

    /// `self - other` as a new matrix
    pub fn minus(&self, other: &Self) -> Self {
        let mut out = self.copy();
        out.sub(other);
        out
    }

    /// `self · other` as a new matrix
    pub fn times(&self, other: &Self) -> Self {
        let mut out = self.copy();
        out.right_multiply(other);
        out
    }

    /// Transposed copy
    pub fn transposed(&self) -> Self {
        let mut out = self.copy();
        out.transpose();
        out
    }
}

impl<const N: usize> Matrix<N>
where
    Self: Pooled + Cofactors<N>,
{
    /// Inverted copy; the receiver's caches are carried over so a cached
    /// inverse is reused
    pub fn inverted(&self) -> Self {
        let mut out = self.copy();
        out.determinant.set(self.determinant.get());
        out.inverse = self.inverse.clone();
        out.invert();
        out
    }
}

impl<const N: usize> Matrix<N>
where
    Vector<N>: Pooled,
{
    /// Row (1-based) as a pooled vector
    pub fn row(&self, row: usize) -> CoreResult<Vector<N>> {
        let r = Self::check_index(row)?;
        Ok(Vector::pooled(self.m[r]))
    }

    /// Column (1-based) as a pooled vector
    pub fn column(&self, col: usize) -> CoreResult<Vector<N>> {
        let c = Self::check_index(col)?;
        let mut out = Vector::fresh();
        for (r, row) in self.m.iter().enumerate() {
            out[r] = row[c];
        }
        Ok(out)
    }

    /// `self · v` as a pooled vector
    pub fn apply(&self, v: &Vector<N>) -> Vector<N> {
        let mut out = v.copy();
        out.transform(self);
        out
    }
}

impl<const N: usize> fmt::Display for Matrix<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (r, row) in self.m.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                if r > 0 || c > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{v}")?;
            }
        }
        write!(f, "}}")
    }
}

// -- size specific -- //

impl Cofactors<2> for Mat2 {
    fn compute_determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * m[1][1] - m[0][1] * m[1][0]
    }

    fn adjugate(&self) -> [[f64; 2]; 2] {
        let m = &self.m;
        [[m[1][1], -m[0][1]], [-m[1][0], m[0][0]]]
    }
}

impl Cofactors<3> for Mat3 {
    fn compute_determinant(&self) -> f64 {
        let m = &self.m;
        let sub11 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
        let sub12 = m[1][0] * m[2][2] - m[1][2] * m[2][0];
        let sub13 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
        m[0][0] * sub11 - m[0][1] * sub12 + m[0][2] * sub13
    }

    fn adjugate(&self) -> [[f64; 3]; 3] {
        let m = &self.m;
        let minor = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };
        [
            [minor(1, 2, 1, 2), -minor(0, 2, 1, 2), minor(0, 1, 1, 2)],
            [-minor(1, 2, 0, 2), minor(0, 2, 0, 2), -minor(0, 1, 0, 2)],
            [minor(1, 2, 0, 1), -minor(0, 2, 0, 1), minor(0, 1, 0, 1)],
        ]
    }
}

/// 2×2 sub-determinants of a 4×4 matrix, shared by its determinant and adjugate
struct Minors4 {
    s: [f64; 6],
    c: [f64; 6],
}

impl Minors4 {
    fn of(m: &[[f64; 4]; 4]) -> Self {
        Self {
            s: [
                m[0][0] * m[1][1] - m[1][0] * m[0][1],
                m[0][0] * m[1][2] - m[1][0] * m[0][2],
                m[0][0] * m[1][3] - m[1][0] * m[0][3],
                m[0][1] * m[1][2] - m[1][1] * m[0][2],
                m[0][1] * m[1][3] - m[1][1] * m[0][3],
                m[0][2] * m[1][3] - m[1][2] * m[0][3],
            ],
            c: [
                m[2][0] * m[3][1] - m[3][0] * m[2][1],
                m[2][0] * m[3][2] - m[3][0] * m[2][2],
                m[2][0] * m[3][3] - m[3][0] * m[2][3],
                m[2][1] * m[3][2] - m[3][1] * m[2][2],
                m[2][1] * m[3][3] - m[3][1] * m[2][3],
                m[2][2] * m[3][3] - m[3][2] * m[2][3],
            ],
        }
    }

    fn determinant(&self) -> f64 {
        let (s, c) = (&self.s, &self.c);
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }
}

impl Cofactors<4> for Mat4 {
    fn compute_determinant(&self) -> f64 {
        Minors4::of(&self.m).determinant()
    }

    fn adjugate(&self) -> [[f64; 4]; 4] {
        let m = &self.m;
        let Minors4 { s, c } = Minors4::of(m);
        [
            [
                m[1][1] * c[5] - m[1][2] * c[4] + m[1][3] * c[3],
                -m[0][1] * c[5] + m[0][2] * c[4] - m[0][3] * c[3],
                m[3][1] * s[5] - m[3][2] * s[4] + m[3][3] * s[3],
                -m[2][1] * s[5] + m[2][2] * s[4] - m[2][3] * s[3],
            ],
            [
                -m[1][0] * c[5] + m[1][2] * c[2] - m[1][3] * c[1],
                m[0][0] * c[5] - m[0][2] * c[2] + m[0][3] * c[1],
                -m[3][0] * s[5] + m[3][2] * s[2] - m[3][3] * s[1],
                m[2][0] * s[5] - m[2][2] * s[2] + m[2][3] * s[1],
            ],
            [
                m[1][0] * c[4] - m[1][1] * c[2] + m[1][3] * c[0],
                -m[0][0] * c[4] + m[0][1] * c[2] - m[0][3] * c[0],
                m[3][0] * s[4] - m[3][1] * s[2] + m[3][3] * s[0],
                -m[2][0] * s[4] + m[2][1] * s[2] - m[2][3] * s[0],
            ],
            [
                -m[1][0] * c[3] + m[1][1] * c[1] - m[1][2] * c[0],
                m[0][0] * c[3] - m[0][1] * c[1] + m[0][2] * c[0],
                -m[3][0] * s[3] + m[3][1] * s[1] - m[3][2] * s[0],
                m[2][0] * s[3] - m[2][1] * s[1] + m[2][2] * s[0],
            ],
        ]
    }
}

impl Mat2 {
    /// Rotate by `degrees` counter-clockwise
    pub fn rotate(&mut self, degrees: f64) -> &mut Self {
        self.rotate_plane(0, 1, degrees)
    }

    /// Scale rows by `(x, y)`
    pub fn scale(&mut self, x: f64, y: f64) -> &mut Self {
        self.scale_rows(&[x, y])
    }

    /// Embed in the upper-left block of a pooled 3×3 matrix
    pub fn augmented(&self) -> Mat3 {
        let m = &self.m;
        Mat3::pooled_rows([
            [m[0][0], m[0][1], 0.0],
            [m[1][0], m[1][1], 0.0],
            [0.0, 0.0, 1.0],
        ])
    }
}

impl Mat3 {
    /// Rotate about the X axis
    pub fn rotate_x(&mut self, degrees: f64) -> &mut Self {
        self.rotate_plane(1, 2, degrees)
    }

    /// Rotate about the Y axis
    pub fn rotate_y(&mut self, degrees: f64) -> &mut Self {
        self.rotate_plane(2, 0, degrees)
    }

    /// Rotate about the Z axis
    pub fn rotate_z(&mut self, degrees: f64) -> &mut Self {
        self.rotate_plane(0, 1, degrees)
    }

    /// Rotate about X, then Y, then Z in a single step (`Rz · Ry · Rx`)
    pub fn rotate_zyx(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.left_multiply_block3(rotation_zyx(x, y, z))
    }

    /// [`Mat3::rotate_zyx`] with the angles taken from a vector
    pub fn rotate(&mut self, angles: &Vec3) -> &mut Self {
        self.rotate_zyx(angles.x(), angles.y(), angles.z())
    }

    /// Scale rows by `(x, y, z)`
    pub fn scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.scale_rows(&[x, y, z])
    }

    /// 2D homogeneous translation
    pub fn translate(&mut self, x: f64, y: f64) -> &mut Self {
        self.translate_rows(&[x, y])
    }

    /// Embed in the upper-left block of a pooled 4×4 matrix
    pub fn augmented(&self) -> Mat4 {
        let m = &self.m;
        Mat4::pooled_rows([
            [m[0][0], m[0][1], m[0][2], 0.0],
            [m[1][0], m[1][1], m[1][2], 0.0],
            [m[2][0], m[2][1], m[2][2], 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Upper-left 2×2 block as a pooled matrix
    pub fn deaugmented(&self) -> Mat2 {
        let m = &self.m;
        Mat2::pooled_rows([[m[0][0], m[0][1]], [m[1][0], m[1][1]]])
    }
}

impl Mat4 {
    /// Rotate about the X axis
    pub fn rotate_x(&mut self, degrees: f64) -> &mut Self {
        self.rotate_plane(1, 2, degrees)
    }

    /// Rotate about the Y axis
    pub fn rotate_y(&mut self, degrees: f64) -> &mut Self {
        self.rotate_plane(2, 0, degrees)
    }

    /// Rotate about the Z axis
    pub fn rotate_z(&mut self, degrees: f64) -> &mut Self {
        self.rotate_plane(0, 1, degrees)
    }

    /// Rotate about X, then Y, then Z in a single step (`Rz · Ry · Rx`)
    pub fn rotate_zyx(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.left_multiply_block3(rotation_zyx(x, y, z))
    }

    /// [`Mat4::rotate_zyx`] with the angles taken from a vector
    pub fn rotate(&mut self, angles: &Vec3) -> &mut Self {
        self.rotate_zyx(angles.x(), angles.y(), angles.z())
    }

    /// Scale the first three rows by `(x, y, z)`
    pub fn scale(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.scale_rows(&[x, y, z])
    }

    /// 3D homogeneous translation
    pub fn translate(&mut self, x: f64, y: f64, z: f64) -> &mut Self {
        self.translate_rows(&[x, y, z])
    }

    /// [`Mat4::translate`] with the offset taken from a vector
    pub fn translate_by(&mut self, offset: &Vec3) -> &mut Self {
        self.translate(offset.x(), offset.y(), offset.z())
    }

    /// Upper-left 3×3 block as a pooled matrix
    pub fn deaugmented(&self) -> Mat3 {
        let m = &self.m;
        Mat3::pooled_rows([
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ])
    }

    /// Column-major single precision copy for host upload
    pub fn to_f32_column_major(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for (c, chunk) in out.chunks_exact_mut(4).enumerate() {
            for (r, v) in chunk.iter_mut().enumerate() {
                #[allow(clippy::cast_possible_truncation)]
                {
                    *v = self.m[r][c] as f32;
                }
            }
        }
        out
    }

    /// Overwrite from column-major single precision data
    pub fn set_f32_column_major(&mut self, data: &[f32; 16]) -> &mut Self {
        for (c, chunk) in data.chunks_exact(4).enumerate() {
            for (r, v) in chunk.iter().enumerate() {
                self.m[r][c] = f64::from(*v);
            }
        }
        self.invalidate();
        self
    }
}
