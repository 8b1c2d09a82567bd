//! ヘルスモニターループ
//!
//! PROBING → SLEEPING を割り込みまで繰り返す。プローブとスリープはどちらも
//! シャットダウン要求と競合させるため、どの時点の割り込みでも即座に停止する。

use super::probe::HealthProbe;
use crate::config::MonitorConfig;
use crate::shutdown::ShutdownController;
use tracing::{error, info};

/// ヘルスレコードを出力するターゲット
pub const RECORD_TARGET: &str = module_path!();

/// 定期ヘルスチェッカー
#[derive(Debug, Clone)]
pub struct HealthMonitor {
    config: MonitorConfig,
    probe: HealthProbe,
    shutdown: ShutdownController,
}

impl HealthMonitor {
    /// 新しいモニターを作成
    pub fn new(config: MonitorConfig, probe: HealthProbe, shutdown: ShutdownController) -> Self {
        Self {
            config,
            probe,
            shutdown,
        }
    }

    /// 割り込みまで監視を続ける
    ///
    /// 完了したイテレーション数（= 出力したヘルスレコード数）を返す。
    /// プローブ中に割り込まれたイテレーションはレコードを出力しない。
    pub async fn run(&self) -> u64 {
        info!("Starting health check for {}", self.config.target_url);

        let mut iterations = 0u64;
        loop {
            let result = tokio::select! {
                _ = self.shutdown.wait() => break,
                result = self.probe.probe(&self.config.target_url, self.config.timeout) => result,
            };

            if result.healthy {
                info!("{}", result);
            } else {
                error!("{}", result);
            }
            iterations += 1;

            tokio::select! {
                _ = self.shutdown.wait() => break,
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        info!("Health check stopped by user");
        iterations
    }
}
