//! Diagnostics output configuration

use serde::{Deserialize, Serialize};

/// Log output settings
///
/// `RUST_LOG`, when set, takes precedence over `filter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `warn` or `pipegeo_store=debug`
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Line layout of log records
    #[serde(default)]
    pub format: LogFormat,

    /// Emit ANSI colors
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
            ansi: default_ansi(),
        }
    }
}

impl crate::validation::Validate for LogConfig {
    fn validate(&self) -> crate::error::Result<()> {
        if self.filter.trim().is_empty() {
            return Err(crate::error::ConfigError::validation(
                "log.filter",
                "Filter cannot be empty (use 'off' to silence logging)",
            ));
        }
        Ok(())
    }
}

fn default_filter() -> String {
    "warn".to_string()
}

fn default_ansi() -> bool {
    true
}
