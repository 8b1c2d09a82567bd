//! monitor サブコマンド
//!
//! 対象URLを一定間隔でプローブし、結果を標準出力とログファイルへ記録します。

use crate::config::{
    MonitorConfig, DEFAULT_INTERVAL_SECS, DEFAULT_LOG_FILE, DEFAULT_TARGET_URL,
    DEFAULT_TIMEOUT_SECS,
};
use crate::health::{HealthMonitor, HealthProbe};
use crate::logging;
use crate::shutdown::{listen_for_signals, ShutdownController};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

/// monitor サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct MonitorArgs {
    /// URL to probe
    #[arg(short, long, default_value = DEFAULT_TARGET_URL, env = "HEALTHWATCH_TARGET_URL")]
    pub url: String,

    /// Probe timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "HEALTHWATCH_TIMEOUT_SECS")]
    pub timeout: f64,

    /// Seconds to wait between probes
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL_SECS, env = "HEALTHWATCH_INTERVAL_SECS")]
    pub interval: f64,

    /// Log file (records are also written to stdout)
    #[arg(short, long, default_value = DEFAULT_LOG_FILE, env = "HEALTHWATCH_LOG_FILE")]
    pub log_file: PathBuf,
}

impl MonitorArgs {
    /// 検証済みのモニター設定へ変換
    pub fn to_config(&self) -> crate::error::HealthwatchResult<MonitorConfig> {
        MonitorConfig::from_secs(
            self.url.clone(),
            self.timeout,
            self.interval,
            self.log_file.clone(),
        )
    }
}

/// monitor コマンドを実行
///
/// ログ初期化後にループを開始し、割り込みを受けると正常終了する。
pub async fn execute(args: &MonitorArgs) -> Result<(), anyhow::Error> {
    let config = args.to_config()?;
    logging::init(Some(&config.log_file))?;

    let shutdown = ShutdownController::default();
    tokio::spawn(listen_for_signals(shutdown.clone()));

    let monitor = HealthMonitor::new(config, HealthProbe::new()?, shutdown);
    let iterations = monitor.run().await;
    debug!(iterations, "Monitor loop finished");
    Ok(())
}
