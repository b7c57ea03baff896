//! Draw host interface and command recording
//!
//! The core never talks to a graphics API. Render tasks hand fully composed
//! transforms to a [`DrawHost`]; hosts that want to defer or inspect drawing
//! use [`CommandRecorder`], which captures each draw as a [`DrawCommand`].
//!
//! # Design Philosophy
//!
//! The host should be a passive sink that:
//! - Accepts pre-computed matrices (no transform logic)
//! - Accepts block states (no model ownership in the core)
//! - Only handles drawing (no lifecycle or timing)

use std::collections::HashMap;

use crate::foundation::math::Mat4;
use crate::render::BlockState;

/// Errors reported by a draw host
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The host has no model for the block
    #[error("No model for block {0}")]
    MissingModel(String),

    /// Block state text that could not be parsed
    #[error("Invalid block state: {0}")]
    InvalidBlock(String),
}

/// Host collaborator that owns block models and performs the actual draw
pub trait DrawHost {
    /// Number of quads the block's model draws, across all faces
    fn block_quad_count(&self, block: &BlockState) -> u32;

    /// Draw a single block with a global model transform
    fn draw_block(
        &mut self,
        block: &BlockState,
        transform: &Mat4,
        light: u32,
        overlay: u32,
    ) -> Result<(), DrawError>;
}

/// A single recorded block draw
///
/// The transform is stored column-major in single precision, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Block to draw
    pub block: BlockState,
    /// Global model transform, column-major
    pub transform: [f32; 16],
    /// Packed light value
    pub light: u32,
    /// Packed overlay value
    pub overlay: u32,
}

impl DrawCommand {
    /// Create a new draw command
    pub fn new(block: BlockState, transform: &Mat4, light: u32, overlay: u32) -> Self {
        Self {
            block,
            transform: transform.to_f32_column_major(),
            light,
            overlay,
        }
    }

    /// Transform as raw bytes
    pub fn transform_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.transform.as_slice())
    }

    /// Translation column of the transform
    pub fn translation(&self) -> [f32; 3] {
        [self.transform[12], self.transform[13], self.transform[14]]
    }
}

/// Batch of draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawBatch {
    /// List of commands in draw order
    pub commands: Vec<DrawCommand>,
}

impl DrawBatch {
    /// Create a new empty batch
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to this batch
    pub fn add(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Get the number of commands in this batch
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the batch is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// [`DrawHost`] that records every draw into a [`DrawBatch`]
///
/// Blocks without a registered quad count are treated as full cubes. Blocks
/// marked missing fail to draw with [`DrawError::MissingModel`].
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    batch: DrawBatch,
    quad_counts: HashMap<String, u32>,
    missing: Vec<String>,
    default_quads: u32,
}

impl CommandRecorder {
    /// Quads in a plain cube model
    pub const CUBE_QUADS: u32 = 6;

    /// Create a new recorder
    pub fn new() -> Self {
        Self {
            batch: DrawBatch::new(),
            quad_counts: HashMap::new(),
            missing: Vec::new(),
            default_quads: Self::CUBE_QUADS,
        }
    }

    /// Register the quad count of a block id
    pub fn with_quad_count(mut self, id: impl Into<String>, quads: u32) -> Self {
        self.quad_counts.insert(id.into(), quads);
        self
    }

    /// Make draws of a block id fail
    pub fn with_missing_model(mut self, id: impl Into<String>) -> Self {
        self.missing.push(id.into());
        self
    }

    /// Commands recorded so far
    pub fn batch(&self) -> &DrawBatch {
        &self.batch
    }

    /// Hand over the recorded commands, leaving an empty batch
    pub fn take_batch(&mut self) -> DrawBatch {
        std::mem::take(&mut self.batch)
    }
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawHost for CommandRecorder {
    fn block_quad_count(&self, block: &BlockState) -> u32 {
        if block.is_air() {
            return 0;
        }
        self.quad_counts
            .get(&block.id())
            .copied()
            .unwrap_or(self.default_quads)
    }

    fn draw_block(
        &mut self,
        block: &BlockState,
        transform: &Mat4,
        light: u32,
        overlay: u32,
    ) -> Result<(), DrawError> {
        let id = block.id();
        if self.missing.contains(&id) {
            return Err(DrawError::MissingModel(id));
        }
        log::trace!("Recording draw of {}", block);
        self.batch
            .add(DrawCommand::new(block.clone(), transform, light, overlay));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_commands_in_order() {
        let mut recorder = CommandRecorder::new();
        let stone = BlockState::new("minecraft", "stone");
        let mut transform = Mat4::identity();
        transform.translate(1.0, 2.0, 3.0);

        recorder.draw_block(&stone, &Mat4::identity(), 1, 2).unwrap();
        recorder.draw_block(&stone, &transform, 3, 4).unwrap();

        let batch = recorder.take_batch();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.commands[0].translation(), [0.0, 0.0, 0.0]);
        assert_eq!(batch.commands[1].translation(), [1.0, 2.0, 3.0]);
        assert_eq!(batch.commands[1].light, 3);
        assert!(recorder.batch().is_empty());
    }

    #[test]
    fn test_transform_bytes_cover_matrix() {
        let command = DrawCommand::new(BlockState::new("minecraft", "stone"), &Mat4::identity(), 0, 0);
        let bytes = command.transform_bytes();
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn test_quad_counts() {
        let recorder = CommandRecorder::new().with_quad_count("minecraft:torch", 10);
        assert_eq!(recorder.block_quad_count(&BlockState::new("minecraft", "torch")), 10);
        assert_eq!(recorder.block_quad_count(&BlockState::new("minecraft", "stone")), 6);
        assert_eq!(recorder.block_quad_count(&BlockState::new("minecraft", "air")), 0);
    }

    #[test]
    fn test_missing_model_fails() {
        let mut recorder = CommandRecorder::new().with_missing_model("minecraft:barrier");
        let result = recorder.draw_block(&BlockState::new("minecraft", "barrier"), &Mat4::identity(), 0, 0);
        assert_eq!(result, Err(DrawError::MissingModel("minecraft:barrier".to_string())));
        assert!(recorder.batch().is_empty());
    }
}
