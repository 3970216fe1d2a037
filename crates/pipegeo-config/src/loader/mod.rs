//! Configuration loading from various sources

pub mod env;
pub mod file;
pub mod formats;
pub mod merge;

use crate::{Config, Result, Validate};
use std::path::{Path, PathBuf};

/// Format for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Configuration source for layered loading
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Load from a file
    File(PathBuf),
    /// Load from environment variables
    Environment,
    /// Explicit config object (for programmatic use)
    Explicit(Config),
}

/// Builder for loading and merging configurations
///
/// Supports layered configuration with precedence:
/// defaults < file < environment < explicit overrides
///
/// File and explicit layers are merged field by field: a field left at its
/// built-in default counts as unset and keeps the lower layer's value. The
/// environment layer is written directly, so any `PIPEGEO_` variable that is
/// present wins, including one set to the default.
///
/// # Example
///
/// ```no_run
/// use pipegeo_config::loader::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file(".pipegeo.toml")
///     .with_env()
///     .build()?;
/// # Ok::<(), pipegeo_config::ConfigError>(())
/// ```
pub struct ConfigBuilder {
    sources: Vec<ConfigSource>,
}

impl ConfigBuilder {
    /// Create a new config builder starting with defaults
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources
            .push(ConfigSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Add environment variable overlay
    pub fn with_env(mut self) -> Self {
        self.sources.push(ConfigSource::Environment);
        self
    }

    /// Add explicit config overlay (for programmatic use)
    pub fn with_config(mut self, config: Config) -> Self {
        self.sources.push(ConfigSource::Explicit(config));
        self
    }

    /// Build and validate the final configuration
    ///
    /// Merges all sources in order, with later sources taking precedence.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        for source in self.sources {
            match source {
                ConfigSource::File(path) => {
                    let file_config = file::load_from_file(&path)?;
                    config = merge::merge(config, file_config);
                }
                ConfigSource::Environment => {
                    env::apply_env(&mut config)?;
                }
                ConfigSource::Explicit(explicit_config) => {
                    config = merge::merge(config, explicit_config);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Files probed by [`Config::load`], first match wins
pub const DEFAULT_PATHS: [&str; 4] = [
    ".pipegeo.toml",
    ".pipegeo.yml",
    ".pipegeo.yaml",
    ".pipegeo.json",
];

impl Config {
    /// Load configuration from default locations
    ///
    /// Uses the first of [`DEFAULT_PATHS`] that exists in the working
    /// directory, falling back to defaults, then applies the environment
    /// overlay.
    pub fn load() -> Result<Self> {
        let mut builder = ConfigBuilder::new();

        if let Some(path) = DEFAULT_PATHS.iter().find(|p| Path::new(p).exists()) {
            builder = builder.with_file(path);
        }

        builder.with_env().build()
    }

    /// Load configuration from a specific file
    ///
    /// Also applies environment variable overlays.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigBuilder::new().with_file(path).with_env().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViewConfig;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_builder_default() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builder_file_then_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipegeo.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "view:\n  default_limit: 250\nremote:\n  timeout_secs: 9").unwrap();

        let explicit = Config {
            view: ViewConfig { default_limit: 40 },
            ..Default::default()
        };
        let config = ConfigBuilder::new()
            .with_file(&path)
            .with_config(explicit)
            .build()
            .unwrap();

        assert_eq!(config.view.default_limit, 40);
        assert_eq!(config.remote.timeout_secs, 9);
    }

    #[test]
    fn test_builder_missing_file_fails() {
        let result = ConfigBuilder::new()
            .with_file("/definitely/not/here/pipegeo.toml")
            .build();
        assert!(matches!(
            result,
            Err(crate::ConfigError::FileNotFound { .. })
        ));
    }
}
