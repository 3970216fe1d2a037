//! Configuration type definitions
//!
//! One module per concern. Each type carries its own defaults and validation.

pub mod generator;
pub mod log;
pub mod remote;
pub mod store;
pub mod view;

pub use generator::{BoundsConfig, GeneratorConfig};
pub use log::{LogConfig, LogFormat};
pub use remote::RemoteConfig;
pub use store::StoreConfig;
pub use view::ViewConfig;

use serde::{Deserialize, Serialize};

/// Main configuration struct aggregating all settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Pipe store location and create defaults
    #[serde(default)]
    pub store: StoreConfig,

    /// Table / measurement view settings
    #[serde(default)]
    pub view: ViewConfig,

    /// Remote pipe API used instead of the local store
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Synthetic pipe generation
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Diagnostics output
    #[serde(default)]
    pub log: LogConfig,
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.store.validate()?;
        self.view.validate()?;
        self.remote.validate()?;
        self.generator.validate()?;
        self.log.validate()?;

        Ok(())
    }
}
