//! Server Settings
//!
//! Layered configuration: built-in defaults, then an optional
//! `drowsiness.toml` next to the binary, then `DROWSY_*` environment
//! overrides (e.g. `DROWSY_LISTEN_ADDR=0.0.0.0:9000`).

use config::{Config, ConfigError, Environment, File};
use drowsiness::DrowsinessConfig;
use serde::Deserialize;

/// Deployment settings for the API server
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on
    pub listen_addr: String,

    /// EAR cutoff below which an eye counts as closing
    pub ear_threshold: f32,

    /// Continuous closure required to confirm drowsiness (milliseconds)
    pub closure_threshold_ms: u64,

    /// Seconds without frames before a subject's session is evicted
    pub session_idle_timeout_s: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            ear_threshold: 0.25,
            closure_threshold_ms: 700,
            session_idle_timeout_s: 300,
        }
    }
}

impl ServerSettings {
    /// Load settings from file and environment over the defaults
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let settings: Self = Config::builder()
            .set_default("listen_addr", defaults.listen_addr)?
            .set_default("ear_threshold", defaults.ear_threshold as f64)?
            .set_default("closure_threshold_ms", defaults.closure_threshold_ms as i64)?
            .set_default("session_idle_timeout_s", defaults.session_idle_timeout_s as i64)?
            .add_source(File::with_name("drowsiness").required(false))
            .add_source(Environment::with_prefix("DROWSY"))
            .build()?
            .try_deserialize()?;

        settings
            .drowsiness_config()
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(settings)
    }

    /// Decision thresholds handed to new sessions
    pub fn drowsiness_config(&self) -> DrowsinessConfig {
        DrowsinessConfig {
            ear_threshold: self.ear_threshold,
            closure_threshold_ms: self.closure_threshold_ms,
        }
    }
}
