//! axumサーバー起動・シャットダウンハンドリング

use crate::config::ServerConfig;
use crate::error::{HealthwatchError, HealthwatchResult};
use crate::shutdown::ShutdownController;
use tokio::net::TcpListener;
use tracing::info;

/// axumサーバーを起動し、シャットダウン要求まで待機する
pub async fn run(config: &ServerConfig, shutdown: ShutdownController) -> HealthwatchResult<()> {
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await.map_err(|err| {
        HealthwatchError::Server(format!("Failed to bind to {bind_addr}: {err}"))
    })?;

    serve(listener, shutdown).await
}

/// バインド済みリスナーでサーバーを起動する
pub async fn serve(listener: TcpListener, shutdown: ShutdownController) -> HealthwatchResult<()> {
    let app = crate::api::create_router();

    if let Ok(addr) = listener.local_addr() {
        info!("Status server listening on {}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await
        .map_err(|err| HealthwatchError::Server(err.to_string()))?;

    info!("Server shutdown complete");
    Ok(())
}
