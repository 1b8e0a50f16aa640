//! Settings for CLI commands that can also come from a JSON file

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::pagerank;

/// PageRank settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerankConfig {
    /// Probability of following a link rather than jumping
    pub damping: f64,

    /// Random surfer steps for the sampling estimator
    pub samples: usize,

    /// Convergence threshold for the iterative estimator
    pub tolerance: f64,

    /// Random seed for reproducible sampling
    pub seed: Option<u64>,
}

impl Default for PagerankConfig {
    fn default() -> Self {
        Self {
            damping: pagerank::DAMPING,
            samples: pagerank::SAMPLES,
            tolerance: pagerank::TOLERANCE,
            seed: None,
        }
    }
}

impl PagerankConfig {
    /// Load settings from a JSON file; missing keys keep their defaults.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|source| crate::Error::io(format!("read config {}", path.display()), source))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(crate::Error::InvalidDamping {
                value: self.damping,
            });
        }
        if self.samples == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: "samples must be positive".to_string(),
            });
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("tolerance {} must be positive", self.tolerance),
            });
        }
        Ok(())
    }
}
