//! Push/pop composition stack
//!
//! A [`CacheStack`] holds one composed value per nested push on top of an
//! identity base frame. Pushing copies the current top and composes the new
//! modifier into it, so every push is O(1) regardless of depth, and popping
//! gives the frame back to the stack's own pool for the next push.

use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use crate::error::{CoreError, CoreResult};
use crate::foundation::math::Matrix;
use crate::foundation::memory::{Pool, Poolable};

/// Frame value of a [`CacheStack`] composed with modifiers of type `M`
pub trait StackValue<M>: Poolable {
    /// Overwrite this value with `other`
    fn copy_from(&mut self, other: &Self);

    /// Fold `modifier` into this value as the innermost transform
    fn compose(&mut self, modifier: &M);
}

/// Composition stack over pooled frames
pub struct CacheStack<V, M> {
    base: V,
    frames: Vec<V>,
    pool: Pool<V>,
    _modifier: PhantomData<fn(&M)>,
}

/// Stack of composed square matrices
pub type MatrixStack<const N: usize> = CacheStack<Matrix<N>, Matrix<N>>;

impl<V: StackValue<M>, M> CacheStack<V, M> {
    /// Create a stack whose pool keeps at most `capacity` popped frames
    pub fn new(capacity: usize) -> Self {
        Self {
            base: V::create(),
            frames: Vec::with_capacity(capacity),
            pool: Pool::new(capacity),
            _modifier: PhantomData,
        }
    }

    /// Compose `modifier` onto the current top and make it the new top
    pub fn push(&mut self, modifier: &M) {
        let mut value = self.pool.fresh();
        value.copy_from(self.top());
        value.compose(modifier);
        self.frames.push(value);
    }

    /// Push a frame that is popped again when the returned guard drops
    pub fn push_scoped(&mut self, modifier: &M) -> StackFrame<'_, V, M> {
        self.push(modifier);
        let depth = self.depth();
        StackFrame { stack: self, depth }
    }

    /// Discard the top frame
    ///
    /// Fails with [`CoreError::EmptyStack`] when only the base frame remains.
    pub fn pop(&mut self) -> CoreResult<()> {
        match self.frames.pop() {
            Some(value) => {
                self.pool.retire(value);
                Ok(())
            }
            None => {
                log::debug!("Pop on a transform stack with no pushed frames");
                Err(CoreError::EmptyStack)
            }
        }
    }

    /// Current composed value
    pub fn top(&self) -> &V {
        self.frames.last().unwrap_or(&self.base)
    }

    /// Number of frames pushed above the base frame
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Pop every pushed frame
    pub fn reset(&mut self) {
        if !self.frames.is_empty() {
            log::debug!("Resetting transform stack from depth {}", self.frames.len());
        }
        while let Some(value) = self.frames.pop() {
            self.pool.retire(value);
        }
    }

    /// Pool holding popped frames
    pub fn pool(&self) -> &Pool<V> {
        &self.pool
    }
}

impl<V: StackValue<M>, M> Default for CacheStack<V, M> {
    fn default() -> Self {
        Self::new(64)
    }
}

/// RAII guard for a scoped push; pops its frame on drop
///
/// Dereferences to the stack so nested pushes can go through the guard. On
/// drop the stack is unwound to the depth it had before the push; frames
/// below that are never touched, even if the guard's own frame was already
/// popped through it.
pub struct StackFrame<'a, V: StackValue<M>, M> {
    stack: &'a mut CacheStack<V, M>,
    depth: usize,
}

impl<V: StackValue<M>, M> Deref for StackFrame<'_, V, M> {
    type Target = CacheStack<V, M>;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl<V: StackValue<M>, M> DerefMut for StackFrame<'_, V, M> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl<V: StackValue<M>, M> Drop for StackFrame<'_, V, M> {
    fn drop(&mut self) {
        let current = self.stack.depth();
        if current != self.depth {
            log::warn!(
                "Scoped frame pushed at depth {} released at depth {}",
                self.depth,
                current
            );
        }
        while self.stack.depth() >= self.depth {
            if self.stack.pop().is_err() {
                break;
            }
        }
    }
}

impl<const N: usize> StackValue<Matrix<N>> for Matrix<N> {
    fn copy_from(&mut self, other: &Self) {
        self.set(other);
    }

    fn compose(&mut self, modifier: &Matrix<N>) {
        self.right_multiply(modifier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat3, Mat4};

    fn translation(x: f64, y: f64, z: f64) -> Mat4 {
        let mut m = Mat4::identity();
        m.translate(x, y, z);
        m
    }

    #[test]
    fn test_new_stack_has_identity_base() {
        let stack = MatrixStack::<4>::new(8);
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.top(), &Mat4::identity());
    }

    #[test]
    fn test_pop_base_frame_fails() {
        let mut stack = MatrixStack::<3>::new(8);
        assert_eq!(stack.pop(), Err(CoreError::EmptyStack));

        stack.push(&Mat3::identity());
        assert_eq!(stack.pop(), Ok(()));
        assert_eq!(stack.pop(), Err(CoreError::EmptyStack));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_push_composes_onto_parent() {
        let mut stack = MatrixStack::<4>::new(8);
        stack.push(&translation(1.0, 0.0, 0.0));
        stack.push(&translation(0.0, 2.0, 0.0));
        assert_eq!(stack.top(), &translation(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_push_pop_restores_top_exactly() {
        let mut stack = MatrixStack::<4>::new(8);
        let mut parent = Mat4::identity();
        parent.rotate_zyx(12.5, -40.0, 73.0).translate(0.3, -1.1, 2.0);
        stack.push(&parent);
        let before = stack.top().clone();

        for i in 0..10 {
            let mut m = Mat4::identity();
            m.rotate_y(f64::from(i) * 17.0).scale(1.1, 0.9, 1.0);
            stack.push(&m);
        }
        for _ in 0..10 {
            stack.pop().unwrap();
        }
        assert_eq!(stack.top(), &before);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_scoped_push_pops_on_drop() {
        let mut stack = MatrixStack::<4>::new(8);
        {
            let mut frame = stack.push_scoped(&translation(1.0, 0.0, 0.0));
            assert_eq!(frame.depth(), 1);
            {
                let nested = frame.push_scoped(&translation(0.0, 1.0, 0.0));
                assert_eq!(nested.depth(), 2);
            }
            assert_eq!(frame.depth(), 1);
        }
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.top(), &Mat4::identity());
    }

    #[test]
    fn test_scoped_guard_never_pops_parent_frame() {
        let mut stack = MatrixStack::<4>::new(8);
        stack.push(&translation(5.0, 0.0, 0.0));
        {
            let mut frame = stack.push_scoped(&Mat4::identity());
            frame.pop().unwrap();
        }
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), &translation(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_scoped_guard_unwinds_unbalanced_pushes() {
        let mut stack = MatrixStack::<4>::new(8);
        stack.push(&translation(5.0, 0.0, 0.0));
        {
            let mut frame = stack.push_scoped(&translation(0.0, 1.0, 0.0));
            frame.push(&translation(0.0, 0.0, 1.0));
            frame.push(&translation(0.0, 0.0, 1.0));
            assert_eq!(frame.depth(), 4);
        }
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), &translation(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_popped_frames_are_recycled() {
        let mut stack = MatrixStack::<3>::new(2);
        for _ in 0..4 {
            stack.push(&Mat3::identity());
        }
        stack.reset();
        assert_eq!(stack.depth(), 0);
        assert_eq!(stack.pool().len(), 2);

        stack.push(&Mat3::identity());
        assert_eq!(stack.pool().stats().reused, 1);
    }
}
