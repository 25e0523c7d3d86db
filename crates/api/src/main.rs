//! Drowsiness Monitoring Pipeline - Main Entry Point

use api::{init_logging, run_server, ServerSettings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!(
        "=== Drowsiness Monitoring Pipeline v{} ===",
        env!("CARGO_PKG_VERSION")
    );
    info!("Starting per-subject drowsiness evaluation service...");

    let settings = ServerSettings::load()?;
    run_server(settings).await?;

    Ok(())
}
