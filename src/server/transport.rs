//! HTTP listener.

use tracing::info;

use super::routes::{AppState, router};
use crate::agent::ContractAnalyzer;

/// Serves the API on `host:port` until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(analyzer: ContractAnalyzer, host: &str, port: u16) -> anyhow::Result<()> {
    let router = router(AppState::new(analyzer));
    let addr = format!("{host}:{port}");
    let tcp_listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("clause-roster API listening on http://{addr}");

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
