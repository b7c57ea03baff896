//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Value pooling
//! - Logging utilities

pub mod logging;
pub mod math;
pub mod memory;
