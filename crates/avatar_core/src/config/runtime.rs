//! Pool and render pass settings

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::foundation::memory::Pooled;

/// Capacities of the shared value pools and the transform stacks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Retired vectors kept per vector size
    pub vector_capacity: usize,
    /// Retired matrices kept per matrix size
    pub matrix_capacity: usize,
    /// Retired frames kept by each cache stack
    pub stack_capacity: usize,
}

impl PoolConfig {
    /// Create a pool configuration with defaults
    pub fn new() -> Self {
        Self {
            vector_capacity: <Vec3 as Pooled>::DEFAULT_CAPACITY,
            matrix_capacity: <Mat4 as Pooled>::DEFAULT_CAPACITY,
            stack_capacity: 64,
        }
    }

    /// Resize the calling thread's shared vector and matrix pools
    pub fn apply(&self) {
        Vec2::with_pool(|pool| pool.set_capacity(self.vector_capacity));
        Vec3::with_pool(|pool| pool.set_capacity(self.vector_capacity));
        Vec4::with_pool(|pool| pool.set_capacity(self.vector_capacity));
        Mat2::with_pool(|pool| pool.set_capacity(self.matrix_capacity));
        Mat3::with_pool(|pool| pool.set_capacity(self.matrix_capacity));
        Mat4::with_pool(|pool| pool.set_capacity(self.matrix_capacity));
        log::debug!(
            "Pool capacities set: vectors {}, matrices {}",
            self.vector_capacity,
            self.matrix_capacity
        );
    }

    /// Validate pool capacities
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vector_capacity == 0 {
            return Err(ConfigError::Invalid("Vector pool capacity must be at least 1".to_string()));
        }
        if self.matrix_capacity == 0 {
            return Err(ConfigError::Invalid("Matrix pool capacity must be at least 1".to_string()));
        }
        if self.stack_capacity == 0 {
            return Err(ConfigError::Invalid("Stack capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Render pass settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Quad budget per frame; `None` draws everything
    pub max_complexity: Option<u32>,
    /// Model units per block, applied to every block draw
    pub block_unit_scale: f64,
}

impl RenderConfig {
    /// Create a render configuration with defaults
    pub fn new() -> Self {
        Self {
            max_complexity: None,
            block_unit_scale: 16.0,
        }
    }

    /// Limit the per-frame quad budget
    pub fn with_max_complexity(mut self, max: u32) -> Self {
        self.max_complexity = Some(max);
        self
    }

    /// Validate render settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.block_unit_scale.is_finite() && self.block_unit_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "Block unit scale must be positive, got {}",
                self.block_unit_scale
            )));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Runtime Configuration
///
/// Top-level settings for the avatar core. Hosts load it once at startup and
/// call [`PoolConfig::apply`] on the render thread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Pool sizing
    pub pools: PoolConfig,
    /// Render pass settings
    pub render: RenderConfig,
}

impl Config for RuntimeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.pools.validate()?;
        self.render.validate()
    }
}
