//! Drowsiness Monitoring API Server
//!
//! REST surface for per-subject drowsiness evaluation: clients post each
//! frame's landmark observations and receive that frame's verdict. Face
//! detection and landmark extraction happen upstream; this server consumes
//! landmark points, never images.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod rate_limit;
mod routes;
pub mod settings;

pub use rate_limit::RateLimitConfig;
pub use settings::ServerSettings;

use session_registry::SessionRegistry;

/// Application state shared across handlers
pub struct AppState {
    /// Per-subject sessions
    pub registry: SessionRegistry,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state from settings
    pub fn new(settings: &ServerSettings) -> Self {
        Self {
            registry: SessionRegistry::new(settings.drowsiness_config()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/frames", post(routes::frames::evaluate_frame))
        .route("/api/v1/sessions", get(routes::sessions::list_sessions))
        .route(
            "/api/v1/sessions/:subject_id",
            delete(routes::sessions::reset_session),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        active_sessions: state.registry.len().await,
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(settings: ServerSettings) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(&settings));

    // Sweep abandoned streams so they don't pin memory
    let sweeper = Arc::clone(&state);
    let idle_timeout = chrono::Duration::seconds(settings.session_idle_timeout_s as i64);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(30));
        loop {
            interval.tick().await;
            sweeper.registry.evict_idle(idle_timeout).await;
        }
    });

    // Rate limiting is keyed by peer IP, which is only available through
    // connect info on the listener below
    let governor = rate_limit::create_governor_config(&RateLimitConfig::default());
    let app = create_router(state).layer(GovernorLayer { config: governor });

    info!("Starting drowsiness API server on {}", settings.listen_addr);

    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
