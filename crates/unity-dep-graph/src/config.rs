//! Build options.
//!
//! Options can be constructed in code or loaded from a YAML file. Every field
//! has a default, so an empty file is a valid configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

/// Package manager name written into built graphs by default.
pub const DEFAULT_PACKAGE_MANAGER: &str = "unity";

/// Default time budget between cooperative yields, in milliseconds.
pub const DEFAULT_YIELD_INTERVAL_MS: u64 = 10;

/// What to do when the resolved dependencies contain a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CyclePolicy {
    /// Fail with `Error::CycleDetected`.
    #[default]
    Reject,
    /// Return the cyclic graph.
    Allow,
}

/// Options controlling graph construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildOptions {
    /// Package manager name recorded in the graph.
    pub package_manager: String,

    /// Cycle handling.
    pub cycles: CyclePolicy,

    /// Time budget between cooperative yields, in milliseconds. 0 disables
    /// yielding.
    pub yield_interval_ms: u64,
}

impl BuildOptions {
    /// Parse options from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load options from a YAML file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        Self::from_yaml_str(&content)
    }

    /// Yield interval as a [`Duration`], or `None` when yielding is disabled.
    #[must_use]
    pub fn yield_interval(&self) -> Option<Duration> {
        (self.yield_interval_ms > 0).then(|| Duration::from_millis(self.yield_interval_ms))
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            cycles: CyclePolicy::default(),
            yield_interval_ms: DEFAULT_YIELD_INTERVAL_MS,
        }
    }
}
