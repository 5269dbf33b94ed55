//! Shared types for propforge.
//!
//! This crate contains the plain data types used across the workspace:
//! property values, the build validation policy, configuration structs and
//! every error type surfaced by property insertion, validation and `build()`.
//!
//! No logic lives here beyond constructors and `Display` impls -- only serde,
//! serde_json, thiserror and anyhow.

pub mod config;
pub mod error;
pub mod policy;
pub mod value;

pub use error::{
    BuilderError, ConfigError, InstanceBuildError, InvalidBuilderState, InvalidProperty,
    PropertyAccessError,
};
pub use policy::{BuildStage, ValidationPolicy};
pub use value::PropertyValue;
