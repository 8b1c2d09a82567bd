//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to conventional variable names, plus the validated configuration types for
//! the monitor and the status server.

use crate::error::{HealthwatchError, HealthwatchResult};
use std::path::PathBuf;
use std::time::Duration;

/// デフォルトの監視対象URL
pub const DEFAULT_TARGET_URL: &str = "http://localhost:5000/health";

/// デフォルトのプローブタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

/// デフォルトのチェック間隔（秒）
pub const DEFAULT_INTERVAL_SECS: f64 = 30.0;

/// デフォルトのログファイル
pub const DEFAULT_LOG_FILE: &str = "health_check.log";

/// デフォルトのバインドアドレス
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// デフォルトのリッスンポート
pub const DEFAULT_PORT: u16 = 5000;

/// Get an environment variable with fallback to a conventional name
///
/// If the preferred variable name is set, returns its value.
/// If only the fallback variable name is set, returns its value
/// and logs a warning recommending the preferred name.
///
/// # Example
/// ```
/// use healthwatch::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("HEALTHWATCH_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// ログレベル（EnvFilter ディレクティブ）を取得
///
/// `HEALTHWATCH_LOG_LEVEL`（旧: `RUST_LOG`）から取得し、未設定の場合は `info`。
pub fn get_log_level() -> String {
    get_env_with_fallback_or("HEALTHWATCH_LOG_LEVEL", "RUST_LOG", "info")
}

/// 秒数（小数可）を `Duration` に変換する。0以下・非有限値はエラー。
pub fn positive_secs(name: &str, secs: f64) -> HealthwatchResult<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(HealthwatchError::Config(format!(
            "{name} must be a positive number of seconds (got {secs})"
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|err| HealthwatchError::Config(format!("{name} is out of range: {err}")))
}

/// ステータスサーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host: String,
    /// リッスンポート
    pub port: u16,
}

impl ServerConfig {
    /// 環境変数から読み込む（`HEALTHWATCH_HOST` / `HEALTHWATCH_PORT`、旧: `PORT`）
    pub fn from_env() -> Self {
        let host =
            std::env::var("HEALTHWATCH_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = get_env_with_fallback_parse("HEALTHWATCH_PORT", "PORT", DEFAULT_PORT);
        Self { host, port }
    }

    /// CLI引数から作成
    pub fn from_args(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// `host:port` 形式のバインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// ヘルスモニターの設定
///
/// プロセスの生存期間中は不変。実行中の再設定はない。
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// 監視対象URL
    pub target_url: String,
    /// 1回のプローブのタイムアウト
    pub timeout: Duration,
    /// プローブ間の待機時間
    pub interval: Duration,
    /// ログファイルのパス
    pub log_file: PathBuf,
}

impl MonitorConfig {
    /// 検証付きで設定を作成
    pub fn new(
        target_url: impl Into<String>,
        timeout: Duration,
        interval: Duration,
        log_file: impl Into<PathBuf>,
    ) -> HealthwatchResult<Self> {
        let target_url = target_url.into();
        if target_url.trim().is_empty() {
            return Err(HealthwatchError::Config(
                "target URL must not be empty".to_string(),
            ));
        }
        if timeout.is_zero() {
            return Err(HealthwatchError::Config(
                "timeout must be positive".to_string(),
            ));
        }
        if interval.is_zero() {
            return Err(HealthwatchError::Config(
                "interval must be positive".to_string(),
            ));
        }
        Ok(Self {
            target_url,
            timeout,
            interval,
            log_file: log_file.into(),
        })
    }

    /// 秒数指定（小数可）から作成
    pub fn from_secs(
        target_url: impl Into<String>,
        timeout_secs: f64,
        interval_secs: f64,
        log_file: impl Into<PathBuf>,
    ) -> HealthwatchResult<Self> {
        let timeout = positive_secs("timeout", timeout_secs)?;
        let interval = positive_secs("interval", interval_secs)?;
        Self::new(target_url, timeout, interval, log_file)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            interval: Duration::from_secs_f64(DEFAULT_INTERVAL_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}
