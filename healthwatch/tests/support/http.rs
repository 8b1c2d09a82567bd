use std::net::SocketAddr;

use healthwatch::error::HealthwatchResult;
use healthwatch::shutdown::ShutdownController;
use tokio::{net::TcpListener, task::JoinHandle};

/// テスト用のステータスサーバー
#[allow(dead_code)]
pub struct TestServer {
    addr: SocketAddr,
    shutdown: ShutdownController,
    handle: JoinHandle<HealthwatchResult<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// サーバーがバインドしているアドレスを返す
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `/health` のURL
    pub fn health_url(&self) -> String {
        format!("http://{}/health", self.addr)
    }

    /// サーバーを停止し、バックグラウンドタスクの終了を待つ
    pub async fn stop(self) {
        self.shutdown.request_shutdown();
        let _ = self.handle.await;
    }
}

/// ステータスサーバーを実ポートにバインドして起動する
pub async fn spawn_status_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = ShutdownController::default();
    let handle = tokio::spawn(healthwatch::server::serve(listener, shutdown.clone()));
    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// 接続が拒否されるURLを返す（確保したポートをすぐ解放する）
#[allow(dead_code)]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/health")
}
