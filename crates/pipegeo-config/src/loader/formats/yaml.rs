//! YAML format parser

use crate::{error::ConfigError, Config, Result};

/// Parse configuration from YAML string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Parse configuration from YAML string with file path for better errors
pub fn parse_with_path(content: &str, path: Option<&str>) -> Result<Config> {
    serde_yaml::from_str(content).map_err(|e| ConfigError::from_yaml_error(e, content, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
view:
  default_limit: 500
generator:
  seed: 7
"#;
        let config = parse(yaml).unwrap();
        assert_eq!(config.view.default_limit, 500);
        assert_eq!(config.generator.seed, Some(7));
    }

    #[test]
    fn test_parse_empty_yaml() {
        let config = parse("{}").unwrap();
        assert_eq!(config.view.default_limit, 100);
    }

    #[test]
    fn test_parse_invalid_yaml_shows_line() {
        let yaml = "log:\n  format: sideways\n";
        let err = parse_with_path(yaml, Some("pipegeo.yml")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("pipegeo.yml"));
        assert!(message.contains("line 2"));
    }
}
