//! Part transform descriptor
//!
//! A [`PartCustomization`] carries the position, rotation, scale, and pivot of
//! a model part and the matrices derived from them. The same type is the
//! modifier pushed onto a [`PartStack`] and the composed frame it yields.

use crate::foundation::math::{Mat3, Mat4, Vec3};
use crate::foundation::memory::Poolable;
use crate::scene::cache_stack::{CacheStack, StackValue};

/// Stack composing part customizations into global transforms
pub type PartStack = CacheStack<PartCustomization, PartCustomization>;

/// Local transform of a model part
///
/// Rotation is in degrees and applied about X, then Y, then Z. Setters only
/// record the new values; call [`PartCustomization::recalculate`] to refresh
/// the derived matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct PartCustomization {
    pos: Vec3,
    rot: Vec3,
    scale: Vec3,
    pivot: Vec3,
    position_matrix: Mat4,
    normal_matrix: Mat3,
}

impl PartCustomization {
    /// Identity customization
    pub fn new() -> Self {
        Self {
            pos: Vec3::zeros(),
            rot: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            pivot: Vec3::zeros(),
            position_matrix: Mat4::identity(),
            normal_matrix: Mat3::identity(),
        }
    }

    /// Customization built from a transform, with matrices already computed
    pub fn from_transform(pos: &Vec3, rot: &Vec3, scale: &Vec3) -> Self {
        let mut out = Self::new();
        out.set_pos(pos).set_rot(rot).set_scale(scale);
        out.recalculate();
        out
    }

    /// Position offset
    pub fn pos(&self) -> &Vec3 {
        &self.pos
    }

    /// Rotation in degrees
    pub fn rot(&self) -> &Vec3 {
        &self.rot
    }

    /// Scale factors
    pub fn scale(&self) -> &Vec3 {
        &self.scale
    }

    /// Point rotation and scale are applied about
    pub fn pivot(&self) -> &Vec3 {
        &self.pivot
    }

    /// Set the position offset
    pub fn set_pos(&mut self, pos: &Vec3) -> &mut Self {
        self.pos.set(pos);
        self
    }

    /// Set the rotation in degrees
    pub fn set_rot(&mut self, rot: &Vec3) -> &mut Self {
        self.rot.set(rot);
        self
    }

    /// Set the scale factors
    pub fn set_scale(&mut self, scale: &Vec3) -> &mut Self {
        self.scale.set(scale);
        self
    }

    /// Set the pivot point
    pub fn set_pivot(&mut self, pivot: &Vec3) -> &mut Self {
        self.pivot.set(pivot);
        self
    }

    /// Model-space transform of the part
    pub fn position_matrix(&self) -> &Mat4 {
        &self.position_matrix
    }

    /// Transform applied to normals
    pub fn normal_matrix(&self) -> &Mat3 {
        &self.normal_matrix
    }

    /// Rebuild the position and normal matrices
    ///
    /// The position matrix is `T(pos) · T(pivot) · Rz · Ry · Rx · S · T(-pivot)`;
    /// the normal matrix is the inverse transpose of its upper-left 3×3 block.
    pub fn recalculate(&mut self) {
        let (pivot, scale) = (&self.pivot, &self.scale);
        self.position_matrix
            .reset()
            .translate(-pivot.x(), -pivot.y(), -pivot.z())
            .scale(scale.x(), scale.y(), scale.z())
            .rotate(&self.rot)
            .translate_by(pivot)
            .translate_by(&self.pos);

        let m = self.position_matrix.entries();
        self.normal_matrix
            .set_rows([
                [m[0][0], m[0][1], m[0][2]],
                [m[1][0], m[1][1], m[1][2]],
                [m[2][0], m[2][1], m[2][2]],
            ])
            .invert()
            .transpose();
    }
}

impl Default for PartCustomization {
    fn default() -> Self {
        Self::new()
    }
}

impl Poolable for PartCustomization {
    fn create() -> Self {
        Self::new()
    }

    fn reset(&mut self) {
        self.pos.reset();
        self.rot.reset();
        self.scale.set_xyz(1.0, 1.0, 1.0);
        self.pivot.reset();
        self.position_matrix.reset();
        self.normal_matrix.reset();
    }
}

impl StackValue<PartCustomization> for PartCustomization {
    fn copy_from(&mut self, other: &Self) {
        self.pos.set(&other.pos);
        self.rot.set(&other.rot);
        self.scale.set(&other.scale);
        self.pivot.set(&other.pivot);
        self.position_matrix.set(&other.position_matrix);
        self.normal_matrix.set(&other.normal_matrix);
    }

    fn compose(&mut self, modifier: &PartCustomization) {
        self.position_matrix.right_multiply(&modifier.position_matrix);
        self.normal_matrix.right_multiply(&modifier.normal_matrix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn mapped(custom: &PartCustomization, p: [f64; 3]) -> Vec3 {
        let mut v = Vec3::from(p);
        v.transform_point(custom.position_matrix());
        v
    }

    #[test]
    fn test_default_is_identity() {
        let mut custom = PartCustomization::new();
        custom.recalculate();
        assert_eq!(custom.position_matrix(), &Mat4::identity());
        assert_eq!(custom.normal_matrix(), &Mat3::identity());
    }

    #[test]
    fn test_scale_then_rotate_then_translate() {
        let custom = PartCustomization::from_transform(
            &Vec3::new(5.0, 0.0, 0.0),
            &Vec3::new(0.0, 0.0, 90.0),
            &Vec3::new(2.0, 2.0, 2.0),
        );
        let p = mapped(&custom, [1.0, 0.0, 0.0]);
        assert_relative_eq!(p, Vec3::new(5.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_pivot_is_fixed_point() {
        let mut custom = PartCustomization::new();
        custom
            .set_pivot(&Vec3::new(0.0, 1.0, 0.0))
            .set_rot(&Vec3::new(90.0, 0.0, 0.0))
            .set_scale(&Vec3::new(3.0, 3.0, 3.0));
        custom.recalculate();

        let p = mapped(&custom, [0.0, 1.0, 0.0]);
        assert_relative_eq!(p, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_normal_matrix_is_inverse_transpose() {
        let custom = PartCustomization::from_transform(
            &Vec3::zeros(),
            &Vec3::new(10.0, 20.0, 30.0),
            &Vec3::new(1.0, 2.0, 4.0),
        );
        let mut product = custom.position_matrix().deaugmented();
        product.transpose();
        product.right_multiply(custom.normal_matrix());
        assert_relative_eq!(product, Mat3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_setters_wait_for_recalculate() {
        let mut custom = PartCustomization::new();
        custom.set_pos(&Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(custom.pos(), &Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(custom.position_matrix(), &Mat4::identity());

        custom.recalculate();
        assert_eq!(mapped(&custom, [0.0, 0.0, 0.0]), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_stack_composes_parent_before_child() {
        let mut stack = PartStack::new(8);
        let parent = PartCustomization::from_transform(
            &Vec3::new(1.0, 0.0, 0.0),
            &Vec3::zeros(),
            &Vec3::new(1.0, 1.0, 1.0),
        );
        let child = PartCustomization::from_transform(
            &Vec3::zeros(),
            &Vec3::zeros(),
            &Vec3::new(2.0, 2.0, 2.0),
        );
        stack.push(&parent);
        stack.push(&child);
        assert_eq!(mapped(stack.top(), [1.0, 0.0, 0.0]), Vec3::new(3.0, 0.0, 0.0));

        stack.pop().unwrap();
        assert_eq!(mapped(stack.top(), [1.0, 0.0, 0.0]), Vec3::new(2.0, 0.0, 0.0));
    }
}
