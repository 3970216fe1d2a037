//! View settings

use serde::{Deserialize, Serialize};

/// Settings for the table and measurement view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Number of pipes loaded when no explicit limit is requested
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl crate::validation::Validate for ViewConfig {
    fn validate(&self) -> crate::error::Result<()> {
        crate::validation::validate_positive("view.default_limit", self.default_limit, 0)
    }
}

fn default_limit() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        assert!(ViewConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_limit_invalid() {
        let config = ViewConfig { default_limit: 0 };
        assert!(config.validate().is_err());
    }
}
