//! Decision engine configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for unusable threshold settings
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// EAR cutoff must be a finite, positive ratio
    #[error("ear_threshold {0} is not a finite, positive ratio")]
    InvalidEarThreshold(f32),

    /// A zero closure duration would confirm on the first closed frame
    #[error("closure_threshold_ms must be non-zero")]
    ZeroClosureThreshold,
}

/// Drowsiness decision thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrowsinessConfig {
    /// EAR cutoff below which an eye counts as closing
    pub ear_threshold: f32,

    /// Continuous closure required to confirm drowsiness (milliseconds)
    pub closure_threshold_ms: u64,
}

impl Default for DrowsinessConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.25,
            closure_threshold_ms: 700,
        }
    }
}

impl DrowsinessConfig {
    /// Create strict config (confirms faster, higher EAR cutoff)
    pub fn strict() -> Self {
        Self {
            ear_threshold: 0.27,
            closure_threshold_ms: 500,
        }
    }

    /// Create lenient config (tolerates longer closures, lower EAR cutoff)
    pub fn lenient() -> Self {
        Self {
            ear_threshold: 0.21,
            closure_threshold_ms: 1200,
        }
    }

    /// Check the thresholds are usable before arming sessions with them
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ear_threshold.is_finite() || self.ear_threshold <= 0.0 {
            return Err(ConfigError::InvalidEarThreshold(self.ear_threshold));
        }
        if self.closure_threshold_ms == 0 {
            return Err(ConfigError::ZeroClosureThreshold);
        }
        Ok(())
    }
}
