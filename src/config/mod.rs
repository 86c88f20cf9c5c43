//! Configuration management for the aggregation engine.
//!
//! Provides layered configuration loading with priority:
//! 1. Default values (hardcoded)
//! 2. Optional TOML config file
//! 3. Environment variables (highest priority)

mod aggregator;
pub use aggregator::*;

//---
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::Result;


#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Windowing and offload parameters for the aggregator
    #[serde(default)]
    pub aggregator: AggregatorConfig,
}

impl Settings {
    /// Load configuration with priority:
    /// 1. Optional config file
    /// 2. Environment variables (`TALLY__` prefix, `__` separator)
    ///
    /// Validation runs on the merged result: an invalid configuration is
    /// rejected here, before any aggregator is created.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Config::builder();

        if let Some(path) = config_path {
            config = config.add_source(File::with_name(path).required(true));
        }

        config = config.add_source(
            Environment::with_prefix("TALLY")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Settings = config.build()?.try_deserialize()?;
        settings.aggregator.validate()?;
        Ok(settings)
    }
}
