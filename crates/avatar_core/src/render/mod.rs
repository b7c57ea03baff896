//! # Rendering
//!
//! Render tasks and the boundary to the host renderer. Nothing here touches a
//! graphics API: tasks compose transforms and call into a [`DrawHost`].

pub mod block;
pub mod commands;
pub mod render_task;

pub use block::BlockState;
pub use commands::{CommandRecorder, DrawBatch, DrawCommand, DrawError, DrawHost};
pub use render_task::{BlockTask, RenderTask, TaskTransform, BLOCK_UNIT_SCALE, FULL_BRIGHT};
