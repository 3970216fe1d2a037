//! Remote pipe API configuration

use serde::{Deserialize, Serialize};

/// Settings for reading pipes from an HTTP endpoint instead of the local store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the pipe API, e.g. `http://localhost:4000`
    ///
    /// When unset, the local store is used.
    #[serde(default)]
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl crate::validation::Validate for RemoteConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        if let Some(base) = &self.api_base {
            if !(base.starts_with("http://") || base.starts_with("https://")) {
                return Err(ConfigError::validation(
                    "remote.api_base",
                    format!("Expected an http(s) URL, got '{}'", base),
                ));
            }
        }

        validate_positive("remote.timeout_secs", self.timeout_secs as usize, 0)?;

        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    30
}
