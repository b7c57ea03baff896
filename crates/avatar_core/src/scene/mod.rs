//! Scene module - transform composition and the part hierarchy
//!
//! - [`cache_stack`]: generic push/pop composition stack
//! - [`customization`]: per-part local transforms
//! - [`part_tree`]: the part hierarchy and its render walk

pub mod cache_stack;
pub mod customization;
pub mod part_tree;

pub use cache_stack::{CacheStack, MatrixStack, StackFrame, StackValue};
pub use customization::{PartCustomization, PartStack};
pub use part_tree::{ModelPart, PartKey, PartTree, RenderStats};

#[cfg(test)]
mod tests;
