use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_AGGREGATOR_NAME;
use crate::Error;
use crate::Result;

/// Configuration for a single aggregator identity.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AggregatorConfig {
    /// Identity under which the aggregator registers.
    /// Must be unique within its registry.
    #[serde(default = "default_name")]
    pub name: String,

    /// Length of an aggregation window in milliseconds. Increments are
    /// grouped by window and offloaded once their window has closed.
    /// `0` disables windowing: every flush drains all resident entries.
    #[serde(default = "default_offload_interval_ms")]
    pub offload_interval_ms: u64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            offload_interval_ms: default_offload_interval_ms(),
        }
    }
}

impl AggregatorConfig {
    /// Validates the configuration. A failed validation means no aggregator
    /// is started with it.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Config(ConfigError::Message(
                "aggregator name must not be empty".into(),
            )));
        }

        Ok(())
    }
}

fn default_name() -> String {
    DEFAULT_AGGREGATOR_NAME.to_string()
}
// in ms
fn default_offload_interval_ms() -> u64 {
    10_000
}
