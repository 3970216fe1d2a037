//! Synthetic pipe generator configuration

use serde::{Deserialize, Serialize};

/// Settings for generating chains of connected pipes
///
/// Defaults place the chains around central Tel Aviv with pipes of up to
/// roughly half a kilometre per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of pipes generated when no count is given on the command line
    #[serde(default = "default_count")]
    pub count: usize,

    /// Seed for reproducible runs; a random seed is drawn when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Shortest chain of connected pipes (inclusive)
    #[serde(default = "default_min_chain")]
    pub min_chain: usize,

    /// Longest chain of connected pipes (exclusive)
    #[serde(default = "default_max_chain")]
    pub max_chain: usize,

    /// Full width, in degrees, of the random offset between a pipe's endpoints
    #[serde(default = "default_step_degrees")]
    pub step_degrees: f64,

    /// Chance of jumping to a new area when a chain ends
    #[serde(default = "default_jump_probability")]
    pub jump_probability: f64,

    /// Full width, in degrees, of the area around the origin a jump lands in
    #[serde(default = "default_jump_span_degrees")]
    pub jump_span_degrees: f64,

    /// Latitude of the first pipe's start point
    #[serde(default = "default_origin_lat")]
    pub origin_lat: f64,

    /// Longitude of the first pipe's start point
    #[serde(default = "default_origin_lng")]
    pub origin_lng: f64,

    /// Box that jump targets are clamped to
    #[serde(default)]
    pub bounds: BoundsConfig,

    /// Pipes written to the store per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

/// Latitude / longitude box in decimal degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundsConfig {
    #[serde(default = "default_min_lat")]
    pub min_lat: f64,
    #[serde(default = "default_max_lat")]
    pub max_lat: f64,
    #[serde(default = "default_min_lng")]
    pub min_lng: f64,
    #[serde(default = "default_max_lng")]
    pub max_lng: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            seed: None,
            min_chain: default_min_chain(),
            max_chain: default_max_chain(),
            step_degrees: default_step_degrees(),
            jump_probability: default_jump_probability(),
            jump_span_degrees: default_jump_span_degrees(),
            origin_lat: default_origin_lat(),
            origin_lng: default_origin_lng(),
            bounds: BoundsConfig::default(),
            batch_size: default_batch_size(),
        }
    }
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            min_lat: default_min_lat(),
            max_lat: default_max_lat(),
            min_lng: default_min_lng(),
            max_lng: default_max_lng(),
        }
    }
}

impl crate::validation::Validate for GeneratorConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::{validate_positive, validate_range};

        validate_positive("generator.count", self.count, 0)?;
        validate_positive("generator.min_chain", self.min_chain, 0)?;
        validate_positive("generator.max_chain", self.max_chain, self.min_chain)?;
        validate_positive("generator.batch_size", self.batch_size, 0)?;
        validate_range("generator.jump_probability", self.jump_probability, 0.0, 1.0)?;
        validate_range("generator.step_degrees", self.step_degrees, 0.0, 10.0)?;
        validate_range("generator.jump_span_degrees", self.jump_span_degrees, 0.0, 10.0)?;
        validate_range("generator.origin_lat", self.origin_lat, -90.0, 90.0)?;
        validate_range("generator.origin_lng", self.origin_lng, -180.0, 180.0)?;
        self.bounds.validate()?;

        if self.step_degrees == 0.0 {
            return Err(ConfigError::validation(
                "generator.step_degrees",
                "Step must be greater than zero",
            ));
        }

        Ok(())
    }
}

impl crate::validation::Validate for BoundsConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_range;

        validate_range("generator.bounds.min_lat", self.min_lat, -90.0, 90.0)?;
        validate_range("generator.bounds.max_lat", self.max_lat, -90.0, 90.0)?;
        validate_range("generator.bounds.min_lng", self.min_lng, -180.0, 180.0)?;
        validate_range("generator.bounds.max_lng", self.max_lng, -180.0, 180.0)?;

        if self.min_lat >= self.max_lat || self.min_lng >= self.max_lng {
            return Err(ConfigError::validation(
                "generator.bounds",
                format!(
                    "Minimums must be below maximums (lat {}..{}, lng {}..{})",
                    self.min_lat, self.max_lat, self.min_lng, self.max_lng
                ),
            ));
        }

        Ok(())
    }
}

fn default_count() -> usize {
    100_000
}

fn default_min_chain() -> usize {
    10
}

fn default_max_chain() -> usize {
    30
}

fn default_step_degrees() -> f64 {
    0.01 // ~1 km
}

fn default_jump_probability() -> f64 {
    0.2
}

fn default_jump_span_degrees() -> f64 {
    0.1
}

fn default_origin_lat() -> f64 {
    32.0853
}

fn default_origin_lng() -> f64 {
    34.7818
}

// Land area of Tel Aviv, keeping jumps out of the Mediterranean

fn default_min_lat() -> f64 {
    32.0
}

fn default_max_lat() -> f64 {
    32.15
}

fn default_min_lng() -> f64 {
    34.76
}

fn default_max_lng() -> f64 {
    34.85
}

fn default_batch_size() -> usize {
    1000
}
