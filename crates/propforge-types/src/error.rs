use std::path::PathBuf;

use thiserror::Error;

/// A property validator rejected a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid property value: {message}")]
pub struct InvalidProperty {
    pub message: String,
}

impl InvalidProperty {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A builder-level validator rejected the accumulated properties or the
/// constructed instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid builder state: {message}")]
pub struct InvalidBuilderState {
    pub message: String,
}

impl InvalidBuilderState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors from mutating a builder's property set.
///
/// A failed operation never leaves a partial change behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("property cannot be null or have an empty key")]
    NullProperty,

    #[error("duplicated property key '{0}'")]
    DuplicateKey(String),

    #[error("property '{key}' rejected: {source}")]
    InvalidProperty {
        key: String,
        #[source]
        source: InvalidProperty,
    },

    #[error("property '{0}' not found")]
    PropertyNotFound(String),
}

/// Errors from reading typed values out of a property set.
#[derive(Debug, Error)]
pub enum PropertyAccessError {
    #[error("required property '{0}' is missing")]
    Missing(String),

    #[error("property '{key}' has an unexpected type: {source}")]
    Type {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The umbrella failure surfaced by `build()`.
///
/// No instance is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum InstanceBuildError {
    #[error("builder '{builder}' rejected its properties before construction")]
    PreValidation {
        builder: String,
        #[source]
        source: InvalidBuilderState,
    },

    #[error("builder '{builder}' rejected the constructed instance")]
    PostValidation {
        builder: String,
        #[source]
        source: InvalidBuilderState,
    },

    #[error("builder '{builder}' failed to construct an instance")]
    Construction {
        builder: String,
        #[source]
        source: anyhow::Error,
    },
}

impl InstanceBuildError {
    /// Name of the builder whose `build()` failed.
    pub fn builder(&self) -> &str {
        match self {
            InstanceBuildError::PreValidation { builder, .. }
            | InstanceBuildError::PostValidation { builder, .. }
            | InstanceBuildError::Construction { builder, .. } => builder,
        }
    }

    /// The validator's rejection, if this failure came from a builder validator.
    pub fn invalid_state(&self) -> Option<&InvalidBuilderState> {
        match self {
            InstanceBuildError::PreValidation { source, .. }
            | InstanceBuildError::PostValidation { source, .. } => Some(source),
            InstanceBuildError::Construction { .. } => None,
        }
    }
}

/// Errors from the strict configuration loader.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
