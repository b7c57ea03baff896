//! Memory management utilities
//!
//! Bounded freelists for the transient math values that scripts and the
//! render pass churn through every frame. A pool never tracks the values it
//! hands out: ownership moves to the caller on [`Pool::fresh`] and back on
//! [`Pool::retire`], so a value can only be recycled once it is no longer
//! reachable from anywhere else.

/// Values that can be recycled through a [`Pool`]
pub trait Poolable: Sized {
    /// Construct a new value in its canonical default state
    fn create() -> Self;

    /// Return an existing value to its canonical default state
    fn reset(&mut self);
}

/// Counters describing how a pool has been used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Values constructed because the freelist was empty
    pub created: u64,
    /// Values handed out from the freelist
    pub reused: u64,
    /// Values accepted back into the freelist
    pub retired: u64,
    /// Values dropped because the freelist was full
    pub discarded: u64,
}

/// Bounded freelist allocator for a single value type
///
/// Entries on the freelist are always in their default state; values are
/// reset as they are retired, so [`Pool::fresh`] can hand them out directly.
#[derive(Debug)]
pub struct Pool<T> {
    free: Vec<T>,
    capacity: usize,
    stats: PoolStats,
}

impl<T: Poolable> Pool<T> {
    /// Create an empty pool that keeps at most `capacity` retired values
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
            stats: PoolStats::default(),
        }
    }

    /// Take a value in its default state, reusing a retired one when possible
    pub fn fresh(&mut self) -> T {
        match self.free.pop() {
            Some(value) => {
                self.stats.reused += 1;
                value
            }
            None => {
                self.stats.created += 1;
                T::create()
            }
        }
    }

    /// Give a value back to the pool
    ///
    /// The value is dropped instead when the freelist is already full.
    pub fn retire(&mut self, mut value: T) {
        if self.free.len() < self.capacity {
            value.reset();
            self.free.push(value);
            self.stats.retired += 1;
        } else {
            self.stats.discarded += 1;
            log::trace!(
                "Pool of {} at capacity ({}), dropping retired value",
                std::any::type_name::<T>(),
                self.capacity
            );
        }
    }

    /// Number of values currently waiting on the freelist
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Whether the freelist is empty
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Maximum number of retired values kept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping surplus freelist entries
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if self.free.len() > capacity {
            log::debug!(
                "Shrinking pool of {} from {} to {} entries",
                std::any::type_name::<T>(),
                self.free.len(),
                capacity
            );
            self.free.truncate(capacity);
        }
    }

    /// Drop every value on the freelist
    pub fn clear(&mut self) {
        self.free.clear();
    }

    /// Usage counters since construction
    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}

/// Types backed by a process-wide pool owned by the render thread
///
/// Each implementing type has exactly one pool per thread, created lazily on
/// first use. Implementations are generated with `impl_pooled!`.
pub trait Pooled: Poolable + 'static {
    /// Default capacity of this type's shared pool
    const DEFAULT_CAPACITY: usize;

    /// Run `f` with exclusive access to this type's shared pool
    fn with_pool<R>(f: impl FnOnce(&mut Pool<Self>) -> R) -> R;

    /// Take a default-state value from the shared pool
    fn fresh() -> Self {
        Self::with_pool(Pool::fresh)
    }

    /// Return this value to the shared pool
    fn retire(self) {
        Self::with_pool(|pool| pool.retire(self));
    }
}

/// Implement [`Pooled`] for a concrete type with a thread-local pool
macro_rules! impl_pooled {
    ($ty:ty, $capacity:expr) => {
        impl $crate::foundation::memory::Pooled for $ty {
            const DEFAULT_CAPACITY: usize = $capacity;

            fn with_pool<R>(
                f: impl FnOnce(&mut $crate::foundation::memory::Pool<Self>) -> R,
            ) -> R {
                thread_local! {
                    static POOL: ::std::cell::RefCell<$crate::foundation::memory::Pool<$ty>> =
                        ::std::cell::RefCell::new($crate::foundation::memory::Pool::new($capacity));
                }
                POOL.with(|pool| f(&mut pool.borrow_mut()))
            }
        }
    };
}

pub(crate) use impl_pooled;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Counter(u32);

    impl Poolable for Counter {
        fn create() -> Self {
            Counter(0)
        }

        fn reset(&mut self) {
            self.0 = 0;
        }
    }

    #[test]
    fn test_fresh_on_empty_pool_creates_default() {
        let mut pool: Pool<Counter> = Pool::new(4);
        assert_eq!(pool.fresh(), Counter(0));
        assert_eq!(pool.stats().created, 1);
        assert_eq!(pool.stats().reused, 0);
    }

    #[test]
    fn test_retired_values_are_reset_and_reused() {
        let mut pool: Pool<Counter> = Pool::new(4);
        let mut value = pool.fresh();
        value.0 = 42;
        pool.retire(value);
        assert_eq!(pool.len(), 1);

        let again = pool.fresh();
        assert_eq!(again, Counter(0));
        assert_eq!(pool.stats().reused, 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_never_exceeds_capacity() {
        let mut pool: Pool<Counter> = Pool::new(3);
        for i in 0..10 {
            pool.retire(Counter(i));
            assert!(pool.len() <= pool.capacity());
        }
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.stats().retired, 3);
        assert_eq!(pool.stats().discarded, 7);

        // Drain the freelist, then keep asking
        for _ in 0..5 {
            assert_eq!(pool.fresh(), Counter(0));
        }
        assert!(pool.is_empty());
        assert_eq!(pool.stats().created, 2);
    }

    #[test]
    fn test_set_capacity_truncates_freelist() {
        let mut pool: Pool<Counter> = Pool::new(8);
        for i in 0..8 {
            pool.retire(Counter(i));
        }
        pool.set_capacity(2);
        assert_eq!(pool.len(), 2);
        pool.retire(Counter(9));
        assert_eq!(pool.len(), 2);
    }
}
