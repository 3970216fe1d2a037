//! Environment variable configuration overlay
//!
//! Supports environment variables in the format:
//! `PIPEGEO_<section>_<field>=value`
//!
//! Examples:
//! - `PIPEGEO_STORE_PATH=/var/lib/pipegeo/store.db`
//! - `PIPEGEO_VIEW_DEFAULT_LIMIT=1000`
//! - `PIPEGEO_REMOTE_API_BASE=http://localhost:4000`
//! - `PIPEGEO_GENERATOR_BOUNDS_MIN_LAT=31.9`

use crate::{error::ConfigError, types::*, Config, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const PREFIX: &str = "PIPEGEO_";

/// Parse configuration from environment variables
///
/// Returns `None` when no `PIPEGEO_` variable is set. Variables that fail to
/// parse are reported on stderr and skipped.
pub fn from_env() -> Result<Option<Config>> {
    let mut config = Config::default();
    let applied = apply_env(&mut config)?;
    Ok((applied > 0).then_some(config))
}

/// Write `PIPEGEO_` variables directly onto `config`
///
/// Every variable that is set replaces the field, even when its value
/// equals the built-in default. An empty `PIPEGEO_REMOTE_API_BASE` clears
/// the API base. Returns how many variables were present.
pub fn apply_env(config: &mut Config) -> Result<usize> {
    let env_vars: Vec<(String, String)> = env::vars()
        .filter(|(k, _)| k.starts_with(PREFIX))
        .collect();

    for (key, value) in &env_vars {
        if let Err(e) = apply_env_var(config, key, value) {
            eprintln!("Warning: failed to parse {}: {}", key, e);
        }
    }

    Ok(env_vars.len())
}

/// Apply a single environment variable to config
fn apply_env_var(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let key = key.strip_prefix(PREFIX).unwrap_or(key);

    let Some((section, field)) = key.split_once('_') else {
        return Err(ConfigError::EnvVarError {
            var: format!("{}{}", PREFIX, key),
            message: "Expected format: PIPEGEO_<section>_<field>".to_string(),
        });
    };

    let section = section.to_lowercase();
    let field = field.to_lowercase();

    match section.as_str() {
        "store" => apply_store_var(&mut config.store, &field, value),
        "view" => apply_view_var(&mut config.view, &field, value),
        "remote" => apply_remote_var(&mut config.remote, &field, value),
        "generator" => apply_generator_var(&mut config.generator, &field, value),
        "log" => apply_log_var(&mut config.log, &field, value),
        _ => Err(ConfigError::EnvVarError {
            var: format!("{}{}", PREFIX, key),
            message: format!("Unknown section: {}", section),
        }),
    }
}

fn env_name(section: &str, field: &str) -> String {
    format!("{}{}_{}", PREFIX, section, field).to_uppercase()
}

fn unknown_field(section: &str, field: &str) -> ConfigError {
    ConfigError::EnvVarError {
        var: env_name(section, field),
        message: format!("Unknown field: {}", field),
    }
}

/// Parse a number, naming the variable in the error
fn parse_num<T: FromStr>(section: &str, field: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ConfigError::EnvVarError {
        var: env_name(section, field),
        message: format!("Invalid number: {}", value),
    })
}

fn apply_store_var(config: &mut StoreConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "path" => config.path = PathBuf::from(value),
        "default_color" => config.default_color = value.to_string(),
        _ => return Err(unknown_field("store", field)),
    }
    Ok(())
}

fn apply_view_var(config: &mut ViewConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "default_limit" => config.default_limit = parse_num("view", field, value)?,
        _ => return Err(unknown_field("view", field)),
    }
    Ok(())
}

fn apply_remote_var(config: &mut RemoteConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "api_base" => {
            let trimmed = value.trim();
            config.api_base = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        "timeout_secs" => config.timeout_secs = parse_num("remote", field, value)?,
        _ => return Err(unknown_field("remote", field)),
    }
    Ok(())
}

fn apply_generator_var(config: &mut GeneratorConfig, field: &str, value: &str) -> Result<()> {
    let section = "generator";
    match field {
        "count" => config.count = parse_num(section, field, value)?,
        "seed" => config.seed = Some(parse_num(section, field, value)?),
        "min_chain" => config.min_chain = parse_num(section, field, value)?,
        "max_chain" => config.max_chain = parse_num(section, field, value)?,
        "step_degrees" => config.step_degrees = parse_num(section, field, value)?,
        "jump_probability" => config.jump_probability = parse_num(section, field, value)?,
        "jump_span_degrees" => config.jump_span_degrees = parse_num(section, field, value)?,
        "origin_lat" => config.origin_lat = parse_num(section, field, value)?,
        "origin_lng" => config.origin_lng = parse_num(section, field, value)?,
        "batch_size" => config.batch_size = parse_num(section, field, value)?,
        "bounds_min_lat" => config.bounds.min_lat = parse_num(section, field, value)?,
        "bounds_max_lat" => config.bounds.max_lat = parse_num(section, field, value)?,
        "bounds_min_lng" => config.bounds.min_lng = parse_num(section, field, value)?,
        "bounds_max_lng" => config.bounds.max_lng = parse_num(section, field, value)?,
        _ => return Err(unknown_field(section, field)),
    }
    Ok(())
}

fn apply_log_var(config: &mut LogConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "filter" => config.filter = value.to_string(),
        "format" => {
            config.format = match value.to_lowercase().as_str() {
                "full" => LogFormat::Full,
                "compact" => LogFormat::Compact,
                _ => {
                    return Err(ConfigError::invalid_enum(
                        "log.format",
                        value,
                        &["full", "compact"],
                    ))
                }
            };
        }
        "ansi" => config.ansi = parse_bool(value)?,
        _ => return Err(unknown_field("log", field)),
    }
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvVarError {
            var: value.to_string(),
            message: format!(
                "Invalid boolean: {} (use true/false, 1/0, yes/no, on/off)",
                value
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serializes tests that touch the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn cleanup_pipegeo_env_vars() {
        let keys: Vec<String> = env::vars()
            .filter(|(k, _)| k.starts_with(PREFIX))
            .map(|(k, _)| k)
            .collect();
        for key in keys {
            env::remove_var(&key);
        }
    }

    #[test]
    fn test_view_limit_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_pipegeo_env_vars();
        env::set_var("PIPEGEO_VIEW_DEFAULT_LIMIT", "1000");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.view.default_limit, 1000);
        cleanup_pipegeo_env_vars();
    }

    #[test]
    fn test_generator_bounds_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_pipegeo_env_vars();
        env::set_var("PIPEGEO_GENERATOR_BOUNDS_MIN_LAT", "31.9");
        env::set_var("PIPEGEO_GENERATOR_SEED", "42");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.generator.bounds.min_lat, 31.9);
        assert_eq!(config.generator.seed, Some(42));
        cleanup_pipegeo_env_vars();
    }

    #[test]
    fn test_bad_value_is_skipped() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_pipegeo_env_vars();
        env::set_var("PIPEGEO_REMOTE_TIMEOUT_SECS", "soon");
        let config = from_env().unwrap().unwrap();
        assert_eq!(config.remote.timeout_secs, RemoteConfig::default().timeout_secs);
        cleanup_pipegeo_env_vars();
    }

    #[test]
    fn test_log_format_env_suggests() {
        let mut config = LogConfig::default();
        let err = apply_log_var(&mut config, "format", "compactt").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'compact'?"));
    }

    #[test]
    fn test_unknown_section() {
        let mut config = Config::default();
        assert!(apply_env_var(&mut config, "PIPEGEO_MAP_ZOOM", "3").is_err());
        assert!(apply_env_var(&mut config, "PIPEGEO_VIEW", "3").is_err());
    }

    #[test]
    fn test_bool_parsing() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(parse_bool("yes").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn test_no_env_vars() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_pipegeo_env_vars();
        assert!(from_env().unwrap().is_none());
    }

    #[test]
    fn test_env_overrides_file_even_with_default_values() {
        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_pipegeo_env_vars();

        let mut config = Config::default();
        config.log.ansi = false;
        config.remote.api_base = Some("http://pipes.local".to_string());

        env::set_var("PIPEGEO_LOG_ANSI", "true");
        env::set_var("PIPEGEO_REMOTE_API_BASE", "");
        assert_eq!(apply_env(&mut config).unwrap(), 2);
        cleanup_pipegeo_env_vars();

        assert!(config.log.ansi);
        assert_eq!(config.remote.api_base, None);
    }

    #[test]
    fn test_builder_env_layer_beats_file() {
        use crate::loader::ConfigBuilder;
        use std::io::Write;

        let _lock = ENV_LOCK.lock().unwrap();
        cleanup_pipegeo_env_vars();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipegeo.yml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "log:\n  ansi: false\nremote:\n  api_base: http://pipes.local\n  timeout_secs: 9"
        )
        .unwrap();

        env::set_var("PIPEGEO_LOG_ANSI", "true");
        env::set_var("PIPEGEO_REMOTE_API_BASE", "");
        env::set_var("PIPEGEO_REMOTE_TIMEOUT_SECS", "30");
        let result = ConfigBuilder::new().with_file(&path).with_env().build();
        cleanup_pipegeo_env_vars();

        let config = result.unwrap();
        assert!(config.log.ansi);
        assert_eq!(config.remote.api_base, None);
        assert_eq!(config.remote.timeout_secs, 30);
    }
}
