//! Configuration for the Monte Carlo player

use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

/// Default playouts per candidate move
pub const DEFAULT_TRIALS: u32 = 1000;

/// Monte Carlo player configuration
///
/// Every candidate of one decision is scored with the same number of
/// trials, which is what makes raw win counts comparable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Random playouts per candidate move
    pub trials: u32,
    /// Generator seed (None = seeded from the system clock)
    pub seed: Option<u64>,
    /// Score candidates on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: false,
        }
    }
}

impl MonteCarloConfig {
    /// Config with the given number of trials
    pub fn with_trials(trials: u32) -> Self {
        Self {
            trials,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable parallel candidate scoring
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.trials > 0, "trials must be positive");
        Ok(())
    }
}
