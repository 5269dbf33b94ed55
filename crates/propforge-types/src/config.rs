//! Configuration types for propforge.
//!
//! `LibraryConfig` mirrors a `propforge.toml` file with a `[builder]` section
//! (default validation policy for builders created from config) and a
//! `[logging]` section consumed by `propforge-observe`. Every field defaults.

use serde::{Deserialize, Serialize};

use crate::policy::ValidationPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub builder: BuilderSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults applied to builders constructed via `Builder::from_config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderSettings {
    /// Whether the builder validator runs before or after construction.
    #[serde(default)]
    pub validation_policy: ValidationPolicy,
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,

    /// Log span close events with timing.
    #[serde(default)]
    pub span_events: bool,

    /// Bridge spans to OpenTelemetry with a stdout exporter (local debugging).
    #[serde(default)]
    pub otel_stdout: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
            span_events: false,
            otel_stdout: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_config_default_values() {
        let config = LibraryConfig::default();
        assert_eq!(
            config.builder.validation_policy,
            ValidationPolicy::PostConstruct
        );
        assert_eq!(config.logging.filter, "info");
        assert!(!config.logging.json);
        assert!(!config.logging.span_events);
        assert!(!config.logging.otel_stdout);
    }

    #[test]
    fn test_library_config_deserialize_empty() {
        let config: LibraryConfig = toml::from_str("").unwrap();
        assert_eq!(config, LibraryConfig::default());
    }

    #[test]
    fn test_library_config_deserialize_with_values() {
        let toml_str = r#"
[builder]
validation_policy = "pre_construct"

[logging]
filter = "propforge_core=debug"
json = true
"#;
        let config: LibraryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.builder.validation_policy,
            ValidationPolicy::PreConstruct
        );
        assert_eq!(config.logging.filter, "propforge_core=debug");
        assert!(config.logging.json);
        assert!(!config.logging.span_events);
    }

    #[test]
    fn test_library_config_rejects_unknown_policy() {
        let toml_str = r#"
[builder]
validation_policy = "whenever"
"#;
        assert!(toml::from_str::<LibraryConfig>(toml_str).is_err());
    }

    #[test]
    fn test_library_config_toml_roundtrip() {
        let config = LibraryConfig {
            builder: BuilderSettings {
                validation_policy: ValidationPolicy::PreConstruct,
            },
            logging: LoggingConfig {
                filter: "warn".to_string(),
                json: true,
                span_events: true,
                otel_stdout: false,
            },
        };
        let serialized = toml::to_string(&config).unwrap();
        let parsed: LibraryConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }
}
