//! Configuration module for resource inlining
//!
//! This module provides the `InlineConfig` struct, its rule types and a fluent
//! builder with validation and the plugin's historical defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::InlineConfigBuilder;
pub use types::{ExcludeAttr, IncludeRule, InlineConfig, NonMatchedLevel};
