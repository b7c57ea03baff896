//! Render tasks attached to model parts
//!
//! A task draws something extra relative to its part: it pushes its own
//! local transform on top of the part's, hands the composed transform to the
//! host, and pops again no matter how the draw went.

use std::fmt;

use crate::foundation::math::{Mat4, Vec3};
use crate::foundation::memory::Pooled;
use crate::render::{BlockState, DrawError, DrawHost};
use crate::scene::{PartCustomization, PartStack};

/// Packed light value used for emissive tasks
pub const FULL_BRIGHT: u32 = 0x00F0_00F0;

/// Model units per block
pub const BLOCK_UNIT_SCALE: f64 = 16.0;

/// State shared by every task variant
#[derive(Debug, Clone, PartialEq)]
pub struct TaskTransform {
    /// Disabled tasks are skipped without drawing
    pub enabled: bool,
    /// Draw at full brightness regardless of the light passed in
    pub emissive: bool,
    /// Offset from the part origin
    pub pos: Vec3,
    /// Rotation in degrees
    pub rot: Vec3,
    /// Scale factors
    pub scale: Vec3,
}

impl TaskTransform {
    /// Enabled, non-emissive identity transform
    pub fn new() -> Self {
        Self {
            enabled: true,
            emissive: false,
            pos: Vec3::zeros(),
            rot: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Customization to push for this task
    pub fn customization(&self) -> PartCustomization {
        PartCustomization::from_transform(&self.pos, &self.rot, &self.scale)
    }

    fn light(&self, light: u32) -> u32 {
        if self.emissive {
            FULL_BRIGHT
        } else {
            light
        }
    }
}

impl Default for TaskTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws a single block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTask {
    transform: TaskTransform,
    block: Option<BlockState>,
    cached_complexity: u32,
    unit_scale: f64,
}

impl BlockTask {
    /// Task with no block bound yet
    pub fn new() -> Self {
        Self {
            transform: TaskTransform::new(),
            block: None,
            cached_complexity: 0,
            unit_scale: BLOCK_UNIT_SCALE,
        }
    }

    /// Bind a block and cache its quad count
    pub fn set_block<H: DrawHost + ?Sized>(&mut self, block: BlockState, host: &H) -> &mut Self {
        self.cached_complexity = host.block_quad_count(&block);
        self.block = Some(block);
        self
    }

    /// Currently bound block
    pub fn block(&self) -> Option<&BlockState> {
        self.block.as_ref()
    }

    /// Scale applied between the composed transform and block model units
    pub fn set_unit_scale(&mut self, scale: f64) -> &mut Self {
        self.unit_scale = scale;
        self
    }

    /// Quad count of the bound block, as cached by [`BlockTask::set_block`]
    pub fn complexity(&self) -> u32 {
        self.cached_complexity
    }

    fn render<H: DrawHost + ?Sized>(
        &self,
        stack: &mut PartStack,
        host: &mut H,
        light: u32,
        overlay: u32,
    ) -> Result<bool, DrawError> {
        let block = match &self.block {
            Some(block) if self.transform.enabled && !block.is_air() => block,
            _ => return Ok(false),
        };

        let local = self.transform.customization();
        let frame = stack.push_scoped(&local);

        let mut unit = Mat4::fresh();
        unit.scale(self.unit_scale, self.unit_scale, self.unit_scale);
        let mut global = frame.top().position_matrix().copy();
        global.right_multiply(&unit);
        unit.retire();

        let result = host.draw_block(block, &global, self.transform.light(light), overlay);
        global.retire();
        drop(frame);

        if let Err(err) = &result {
            log::warn!("Block task failed to draw {}: {}", block, err);
        }
        result.map(|()| true)
    }
}

impl Default for BlockTask {
    fn default() -> Self {
        Self::new()
    }
}

/// Extra draw attached to a model part
#[derive(Debug, Clone, PartialEq)]
pub enum RenderTask {
    /// Single block draw
    Block(BlockTask),
}

impl RenderTask {
    /// Draw the task relative to the current top of `stack`
    ///
    /// Returns `Ok(false)` when nothing was drawn. The stack is left exactly
    /// as it was on every path.
    pub fn render<H: DrawHost + ?Sized>(
        &self,
        stack: &mut PartStack,
        host: &mut H,
        light: u32,
        overlay: u32,
    ) -> Result<bool, DrawError> {
        match self {
            RenderTask::Block(task) => task.render(stack, host, light, overlay),
        }
    }

    /// Quads this task draws
    pub fn complexity(&self) -> u32 {
        match self {
            RenderTask::Block(task) => task.complexity(),
        }
    }

    /// Shared task state
    pub fn transform(&self) -> &TaskTransform {
        match self {
            RenderTask::Block(task) => &task.transform,
        }
    }

    /// Mutable shared task state
    pub fn transform_mut(&mut self) -> &mut TaskTransform {
        match self {
            RenderTask::Block(task) => &mut task.transform,
        }
    }

    /// Set the model units per block
    pub fn set_unit_scale(&mut self, scale: f64) {
        match self {
            RenderTask::Block(task) => {
                task.set_unit_scale(scale);
            }
        }
    }
}

impl From<BlockTask> for RenderTask {
    fn from(task: BlockTask) -> Self {
        RenderTask::Block(task)
    }
}

impl fmt::Display for RenderTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderTask::Block(_) => write!(f, "Block Render Task"),
        }
    }
}
