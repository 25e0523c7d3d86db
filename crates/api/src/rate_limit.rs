//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per-client-IP limiting sized for video-rate monitoring streams, using
//! tower_governor's Generic Cell Rate Algorithm implementation: a sustained
//! replenish rate plus a burst allowance, with no background bookkeeping.

use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed by peer IP.
/// StateInformationMiddleware comes from use_headers() and adds
/// X-RateLimit-* headers to responses.
pub type FrameGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Replenish interval in milliseconds (one request per interval)
    pub per_millisecond: u64,
    /// Burst size (max requests that can be made immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_millisecond: 10, // Sustained ~100 frames/s per client
            burst_size: 120,     // Absorb a few seconds of backlogged frames
        }
    }
}

impl RateLimitConfig {
    /// Config for low-rate periodic uploaders (e.g. one frame per second)
    pub fn periodic() -> Self {
        Self {
            per_millisecond: 500,
            burst_size: 10,
        }
    }
}

/// Create a rate limiting governor config.
///
/// Returns an Arc wrapped config for use with GovernorLayer. Uses
/// PeerIpKeyExtractor, so the service must be built with
/// `into_make_service_with_connect_info::<SocketAddr>()` for IP extraction.
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<FrameGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(config.per_millisecond)
            .burst_size(config.burst_size)
            .use_headers()
            .finish()
            .unwrap(),
    )
}
