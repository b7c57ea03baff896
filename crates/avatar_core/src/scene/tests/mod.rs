//! Cross-module tests for transform composition

mod stack_integration;
