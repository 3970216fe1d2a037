use anyhow::Result;
use pipegeo_config::{Config, ConfigError, Validate};
use pipegeo_core::Coordinate;
use pipegeo_store::{HttpPipeSource, PipeSource, PipeStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load the layered config, then apply command-line overrides.
pub fn load_config(
    path: Option<&Path>,
    store: Option<PathBuf>,
    remote: Option<String>,
) -> std::result::Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    if let Some(store) = store {
        config.store.path = store;
    }
    if let Some(remote) = remote {
        config.remote.api_base = Some(remote);
    }

    config.validate()?;
    Ok(config)
}

pub fn open_store(config: &Config) -> Result<PipeStore> {
    debug!(path = %config.store.path.display(), "opening pipe store");
    PipeStore::from_config(&config.store)
}

/// The remote API when one is configured, the local store otherwise.
/// Also returns a label for display.
pub fn open_source(config: &Config) -> Result<(Box<dyn PipeSource>, String)> {
    if let Some(remote) = HttpPipeSource::from_config(&config.remote)? {
        let label = remote.base_url().to_string();
        return Ok((Box::new(remote), label));
    }
    let label = config.store.path.display().to_string();
    Ok((Box::new(open_store(config)?), label))
}

/// Parse `LAT,LNG` in decimal degrees.
pub fn parse_coordinate(value: &str) -> std::result::Result<Coordinate, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got '{}'", value))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid number '{}'", part.trim()))
    };
    Ok(Coordinate::new(parse(lat)?, parse(lng)?))
}
