//! Pipe store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Local pipe store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory of the sled database holding pipes
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Color assigned to created pipes that do not specify one
    #[serde(default = "default_color")]
    pub default_color: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            default_color: default_color(),
        }
    }
}

impl crate::validation::Validate for StoreConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_hex_color;

        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::validation(
                "store.path",
                "Store path cannot be empty",
            ));
        }

        validate_hex_color("store.default_color", &self.default_color)?;

        Ok(())
    }
}

fn default_path() -> PathBuf {
    PathBuf::from(".pipegeo").join("store.db")
}

fn default_color() -> String {
    "#607D8B".to_string()
}
