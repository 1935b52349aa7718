//! Configuration for the grid engine.

use crate::types::{BoundPolicy, InterpolationMethod};
use serde::{Deserialize, Serialize};

/// Configuration for the grid engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridEngineConfig {
    /// Interpolation method for refine, resize and statistics.
    pub interpolation: InterpolationMethod,

    /// Refine factor applied to every layer before computing statistics.
    pub statistics_refine_factor: usize,

    /// How the statistics engine defines the upper and lower bounds.
    pub statistics_bounds: BoundPolicy,

    /// Decode the files of a multigrid on the rayon thread pool.
    pub parallel_decode: bool,
}

impl Default for GridEngineConfig {
    fn default() -> Self {
        Self {
            interpolation: InterpolationMethod::Bilinear,
            statistics_refine_factor: 4,
            statistics_bounds: BoundPolicy::Extremes,
            parallel_decode: true,
        }
    }
}

impl GridEngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_INTERPOLATION") {
            config.interpolation = InterpolationMethod::from_str(&val);
        }

        if let Ok(val) = std::env::var("GRID_STATISTICS_REFINE_FACTOR") {
            if let Ok(factor) = val.parse() {
                config.statistics_refine_factor = factor;
            }
        }

        if let Ok(val) = std::env::var("GRID_STATISTICS_BOUNDS") {
            if let Some(policy) = BoundPolicy::parse(&val) {
                config.statistics_bounds = policy;
            }
        }

        if let Ok(val) = std::env::var("GRID_PARALLEL_DECODE") {
            config.parallel_decode = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.statistics_refine_factor == 0 {
            return Err("statistics_refine_factor must be > 0".to_string());
        }

        if let BoundPolicy::Confidence { z } = self.statistics_bounds {
            if !z.is_finite() || z <= 0.0 {
                return Err(format!("confidence z must be positive and finite, got {}", z));
            }
        }

        Ok(())
    }
}
