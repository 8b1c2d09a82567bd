//! 単一エンドポイントへのプローブ
//!
//! 1回のGETリクエストで稼働状況を判定する。失敗はすべて結果に吸収され、
//! 呼び出し元へエラーとして伝播しない。

use crate::error::HealthwatchResult;
use reqwest::Client;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// 1回のプローブ結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResult {
    /// ステータスコードが400未満のレスポンスを受信した場合 true
    pub healthy: bool,
    /// リクエスト送信直前からレスポンス受信（または失敗）直後までの経過時間
    pub response_time: Duration,
    /// 受信したステータスコード。転送レベルの失敗時は `None`
    pub status_code: Option<u16>,
}

impl ProbeResult {
    /// レスポンスを受信した場合の結果
    pub fn from_status(status_code: u16, response_time: Duration) -> Self {
        Self {
            healthy: is_healthy_status(status_code),
            response_time,
            status_code: Some(status_code),
        }
    }

    /// 転送レベルで失敗した場合の結果
    pub fn transport_failure(response_time: Duration) -> Self {
        Self {
            healthy: false,
            response_time,
            status_code: None,
        }
    }

    /// 応答時間（秒）
    pub fn response_time_secs(&self) -> f64 {
        self.response_time.as_secs_f64()
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.healthy { "HEALTHY" } else { "UNHEALTHY" };
        let status = match self.status_code {
            Some(code) => code.to_string(),
            None => "None".to_string(),
        };
        write!(
            f,
            "Service {} - Status: {}, Response time: {:.3}s",
            state,
            status,
            self.response_time_secs()
        )
    }
}

/// 1xx/2xx/3xx は healthy、4xx/5xx は unhealthy
pub fn is_healthy_status(status_code: u16) -> bool {
    status_code < 400
}

/// HTTPプローブ
///
/// 接続プールを再利用するため、クライアントはループ全体で共有する。
#[derive(Debug, Clone)]
pub struct HealthProbe {
    client: Client,
}

impl HealthProbe {
    /// 新しいプローブを作成
    pub fn new() -> HealthwatchResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// `url` へ GET を1回送信し、`timeout` 以内の結果を返す
    pub async fn probe(&self, url: &str, timeout: Duration) -> ProbeResult {
        let started = Instant::now();
        let outcome = self.client.get(url).timeout(timeout).send().await;
        let elapsed = started.elapsed();

        match outcome {
            Ok(response) => ProbeResult::from_status(response.status().as_u16(), elapsed),
            Err(err) => {
                debug!(url = %url, error = %err, "Probe request failed");
                ProbeResult::transport_failure(elapsed)
            }
        }
    }
}
