//! Configuration loader.
//!
//! Reads a `propforge.toml` file into [`LibraryConfig`]. The lenient loader
//! falls back to defaults when the file is missing or malformed; the strict
//! one reports why.

use std::path::Path;

use propforge_types::ConfigError;
use propforge_types::config::LibraryConfig;

/// Default file name looked up by [`load_config_from_dir`].
pub const CONFIG_FILE_NAME: &str = "propforge.toml";

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`LibraryConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub fn load_config(path: &Path) -> LibraryConfig {
    match try_load_config(path) {
        Ok(config) => config,
        Err(ConfigError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            LibraryConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            LibraryConfig::default()
        }
    }
}

/// Load `{dir}/propforge.toml` with the same fallbacks as [`load_config`].
pub fn load_config_from_dir(dir: &Path) -> LibraryConfig {
    load_config(&dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from `path`, failing on a missing or malformed file.
pub fn try_load_config(path: &Path) -> Result<LibraryConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use propforge_types::ValidationPolicy;
    use tempfile::TempDir;

    #[test]
    fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_from_dir(tmp.path());
        assert_eq!(config, LibraryConfig::default());
    }

    #[test]
    fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
[builder]
validation_policy = "pre_construct"

[logging]
filter = "debug"
span_events = true
"#,
        )
        .unwrap();

        let config = load_config_from_dir(tmp.path());
        assert_eq!(
            config.builder.validation_policy,
            ValidationPolicy::PreConstruct
        );
        assert_eq!(config.logging.filter, "debug");
        assert!(config.logging.span_events);
    }

    #[test]
    fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "this is not { valid toml !!!").unwrap();

        assert_eq!(load_config(&path), LibraryConfig::default());
    }

    #[test]
    fn try_load_config_reports_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);

        let err = try_load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));

        std::fs::write(&path, "[builder]\nvalidation_policy = 3\n").unwrap();
        let err = try_load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
