//! # Avatar Core
//!
//! Pooled math values and transform composition for an avatar scripting
//! runtime.
//!
//! ## Features
//!
//! - **Pooled Math**: 2-, 3- and 4-component vectors and square matrices
//!   recycled through per-type bounded pools
//! - **Cached Inverses**: determinants and inverses computed lazily and kept
//!   until the next mutation
//! - **Transform Stacks**: push/pop composition of nested local transforms
//! - **Part Trees**: hierarchical model parts with render tasks and a
//!   per-frame complexity budget
//!
//! ## Quick Start
//!
//! ```rust
//! use avatar_core::prelude::*;
//!
//! let mut host = CommandRecorder::new();
//! let mut tree = PartTree::new("root", RenderConfig::default());
//! let head = tree.add_part(tree.root(), "head").unwrap();
//!
//! let mut task = BlockTask::new();
//! task.set_block("minecraft:glass".parse().unwrap(), &host);
//! tree.add_task(head, task.into());
//!
//! let mut stack = PartStack::new(64);
//! let stats = tree.render(tree.root(), &mut stack, &mut host, 0, 0).unwrap();
//! assert_eq!(stats.tasks_drawn, 1);
//! assert_eq!(stack.depth(), 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::float_cmp,
    clippy::should_implement_trait
)]

pub mod config;
pub mod error;
pub mod foundation;
pub mod render;
pub mod scene;

pub use error::{CoreError, CoreResult};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PoolConfig, RenderConfig, RuntimeConfig},
        error::{CoreError, CoreResult},
        foundation::{
            math::{Mat2, Mat3, Mat4, Matrix, Swizzled, Vec2, Vec3, Vec4, Vector},
            memory::{Pool, Poolable, Pooled},
        },
        render::{
            BlockState, BlockTask, CommandRecorder, DrawBatch, DrawCommand, DrawError, DrawHost,
            RenderTask, TaskTransform,
        },
        scene::{
            CacheStack, MatrixStack, ModelPart, PartCustomization, PartKey, PartStack, PartTree,
            RenderStats, StackValue,
        },
    };
}
