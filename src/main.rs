use std::sync::Arc;

use diagnosis_dashboard::api::start_server_on;
use diagnosis_dashboard::config::{self, DashboardConfig};
use diagnosis_dashboard::core_state::CoreState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    diagnosis_dashboard::init_tracing();

    let config = DashboardConfig::from_env()?;
    tracing::info!(
        "{} starting v{} (models: {})",
        config::APP_NAME,
        config::APP_VERSION,
        config.models_dir.display()
    );

    let core = Arc::new(CoreState::from_config(config.clone()));
    let status = core.registry().status();
    if !status.errors.is_empty() {
        tracing::warn!(
            loaded = status.loaded.len(),
            unavailable = status.errors.len(),
            "Some models are unavailable; their predictions will be refused"
        );
    }

    let server = start_server_on(core, config.bind_addr).await?;
    tracing::info!("Dashboard available at http://{}/", server.info.addr);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Ctrl-C received, shutting down");
    server.stop().await;
    Ok(())
}
