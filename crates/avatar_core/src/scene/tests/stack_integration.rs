//! Integration tests for stack composition through customizations, tasks,
//! and part trees

use crate::error::{CoreError, CoreResult};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{BlockState, BlockTask, CommandRecorder, DrawError, RenderTask};
use crate::scene::{MatrixStack, PartCustomization, PartStack};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn customization(pos: [f64; 3], rot: [f64; 3], scale: [f64; 3]) -> PartCustomization {
        PartCustomization::from_transform(&Vec3::from(pos), &Vec3::from(rot), &Vec3::from(scale))
    }

    fn map_point(m: &Mat4, p: [f64; 3]) -> Vec3 {
        let mut v = Vec3::from(p);
        v.transform_point(m);
        v
    }

    #[test]
    fn test_push_pop_symmetry_for_many_depths() {
        for depth in 0..24u32 {
            let mut stack = PartStack::new(8);
            stack.push(&customization([0.5, -2.0, 1.0], [15.0, 30.0, -45.0], [1.0, 2.0, 0.5]));
            let before = stack.top().clone();

            for i in 0..depth {
                let k = f64::from(i);
                stack.push(&customization(
                    [k, -k * 0.5, 0.25],
                    [k * 13.0, -k * 7.5, k * 3.0],
                    [1.0 + k * 0.1, 1.0, 0.9],
                ));
            }
            assert_eq!(stack.depth(), depth as usize + 1);
            for _ in 0..depth {
                stack.pop().unwrap();
            }

            assert_eq!(stack.top(), &before);
            assert_eq!(stack.pop(), Ok(()));
            assert_eq!(stack.pop(), Err(CoreError::EmptyStack));
        }
    }

    #[test]
    fn test_hierarchical_translate_over_scale() {
        let mut stack = PartStack::new(8);
        stack.push(&customization([1.0, 0.0, 0.0], [0.0; 3], [1.0; 3]));
        stack.push(&customization([0.0; 3], [0.0; 3], [2.0; 3]));

        let global = stack.top().position_matrix();
        assert_eq!(map_point(global, [0.0, 0.0, 0.0]), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(map_point(global, [1.0, 0.0, 0.0]), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_literal_scale_then_translate_order() {
        let mut stack = MatrixStack::<4>::new(8);
        let mut scale = Mat4::identity();
        scale.scale(2.0, 2.0, 2.0);
        let mut translate = Mat4::identity();
        translate.translate(1.0, 0.0, 0.0);

        stack.push(&scale);
        stack.push(&translate);

        // Parent scale applies to the child's translation as well
        assert_eq!(map_point(stack.top(), [0.0, 0.0, 0.0]), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(map_point(stack.top(), [1.0, 0.0, 0.0]), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_each_push_composes_with_parent_only() {
        let mut stack = MatrixStack::<4>::new(8);
        let mut rotate = Mat4::identity();
        rotate.rotate_z(90.0);
        let mut shift = Mat4::identity();
        shift.translate(0.0, 0.0, 5.0);

        stack.push(&rotate);
        stack.push(&shift);
        let mut expected = rotate.clone();
        expected.right_multiply(&shift);
        assert_eq!(stack.top(), &expected);

        stack.pop().unwrap();
        assert_eq!(stack.top(), &rotate);
    }

    fn nested_failure(stack: &mut MatrixStack<4>) -> CoreResult<()> {
        let mut frame = stack.push_scoped(&Mat4::identity());
        let _inner = frame.push_scoped(&Mat4::identity());
        Err(CoreError::index(9, 4))
    }

    #[test]
    fn test_scoped_frames_pop_on_early_return() {
        let mut stack = MatrixStack::<4>::new(8);
        assert!(nested_failure(&mut stack).is_err());
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_task_under_rotated_part() {
        let mut host = CommandRecorder::new();
        let mut stack = PartStack::new(8);
        stack.push(&customization([0.0; 3], [0.0, 90.0, 0.0], [1.0; 3]));

        let mut task = BlockTask::new();
        task.set_block(BlockState::new("minecraft", "stone"), &host);
        let mut task = RenderTask::from(task);
        task.transform_mut().pos.set_xyz(1.0, 0.0, 0.0);

        assert_eq!(task.render(&mut stack, &mut host, 0, 0), Ok(true));
        assert_eq!(stack.depth(), 1);

        let [x, y, z] = host.batch().commands[0].translation();
        assert_relative_eq!(f64::from(x), 0.0, epsilon = 1e-6);
        assert_relative_eq!(f64::from(y), 0.0, epsilon = 1e-6);
        assert_relative_eq!(f64::from(z), -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_failed_task_leaves_parent_frame() {
        let mut host = CommandRecorder::new().with_missing_model("minecraft:stone");
        let mut stack = PartStack::new(8);
        stack.push(&customization([3.0, 0.0, 0.0], [0.0; 3], [1.0; 3]));
        let before = stack.top().clone();

        let mut task = BlockTask::new();
        task.set_block(BlockState::new("minecraft", "stone"), &host);
        let result = RenderTask::from(task).render(&mut stack, &mut host, 0, 0);

        assert!(matches!(result, Err(DrawError::MissingModel(_))));
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), &before);
    }
}
