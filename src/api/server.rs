//! Dashboard server lifecycle: bind → spawn background task → return a
//! handle with a shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::dashboard_router;
use crate::core_state::CoreState;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to get server address: {0}")]
    LocalAddr(#[source] std::io::Error),
}

/// Where and since when the server is listening.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub addr: SocketAddr,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

/// Handle to a running dashboard server.
pub struct DashboardServer {
    pub info: ServerInfo,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl DashboardServer {
    /// Signal a graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Dashboard server shutdown signal sent");
        }
    }

    /// Signal shutdown and wait for in-flight requests to finish.
    pub async fn stop(mut self) {
        self.shutdown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Dashboard server task failed: {e}");
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Start the dashboard server on `addr` (port 0 picks an ephemeral port).
pub async fn start_server_on(
    core: Arc<CoreState>,
    addr: SocketAddr,
) -> Result<DashboardServer, ServerError> {
    // 1. Bind
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

    // 2. Build the router
    let app = dashboard_router(core);

    // 3. Set up shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    // 4. Spawn server in background task
    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Dashboard server received shutdown signal");
        };

        tracing::info!(%addr, "Dashboard server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Dashboard server error: {e}");
        }

        tracing::info!("Dashboard server stopped");
    });

    Ok(DashboardServer {
        info: ServerInfo {
            addr,
            started_at: chrono::Utc::now(),
        },
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    use crate::config::SESSION_HEADER;
    use crate::core_state::tests::test_core;
    use crate::inference::{Disease, MockClassifier, ModelRegistry};

    fn localhost() -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, 0))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let core = test_core(ModelRegistry::new(), "");
        let server = start_server_on(core, localhost())
            .await
            .expect("server should start");
        assert!(server.info.addr.port() > 0);

        let url = format!("http://{}/api/health", server.info.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.stop().await;
    }

    #[tokio::test]
    async fn serves_page_and_session_flow() {
        let registry = ModelRegistry::new()
            .with_model(Disease::Thyroid, Box::new(MockClassifier::new(7, 1)));
        let server = start_server_on(test_core(registry, ""), localhost())
            .await
            .expect("server should start");
        let base = format!("http://{}", server.info.addr);
        let client = reqwest::Client::new();

        let page = client.get(&base).send().await.unwrap();
        assert_eq!(page.status(), reqwest::StatusCode::OK);
        assert!(page.text().await.unwrap().contains("Diagnosis Dashboard"));

        let session: serde_json::Value = client
            .post(format!("{base}/api/session"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let id = session["session_id"].as_str().unwrap();

        let resp = client
            .post(format!("{base}/api/predict/thyroid/vector"))
            .header(SESSION_HEADER, id)
            .json(&serde_json::json!({ "features": [40, 1, 0, 3.5, 1, 100, 8] }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let csv = client
            .get(format!("{base}/api/history/export"))
            .header(SESSION_HEADER, id)
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(csv.starts_with("time,model,inputs,prediction,prob"));
        assert!(csv.contains(",thyroid,"));

        server.stop().await;
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let first = start_server_on(test_core(ModelRegistry::new(), ""), localhost())
            .await
            .unwrap();
        let err = start_server_on(test_core(ModelRegistry::new(), ""), first.info.addr)
            .await
            .err()
            .expect("second bind should fail");
        assert!(matches!(err, ServerError::Bind { .. }));
        first.stop().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_server_on(test_core(ModelRegistry::new(), ""), localhost())
            .await
            .expect("server should start");
        server.shutdown();
        server.shutdown(); // Second call should be safe
    }
}
