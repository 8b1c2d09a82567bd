//! serve サブコマンド
//!
//! ステータスサーバーを起動します。

use crate::config::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
use crate::server;
use crate::shutdown::{listen_for_signals, ShutdownController};
use clap::Args;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "HEALTHWATCH_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = DEFAULT_HOST, env = "HEALTHWATCH_HOST")]
    pub host: String,
}

impl ServeArgs {
    /// サーバー設定へ変換
    pub fn to_config(&self) -> ServerConfig {
        ServerConfig::from_args(self.host.clone(), self.port)
    }
}

/// サーバーを起動し、Ctrl+C / SIGTERM で停止する
pub async fn execute(config: &ServerConfig) -> Result<(), anyhow::Error> {
    let shutdown = ShutdownController::default();
    tokio::spawn(listen_for_signals(shutdown.clone()));
    server::run(config, shutdown).await?;
    Ok(())
}
