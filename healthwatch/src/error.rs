//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! プローブの失敗はここに含まれない。転送レベルの失敗はすべて
//! `ProbeResult { healthy: false, status_code: None, .. }` に吸収される。

use thiserror::Error;

/// healthwatch error type
#[derive(Debug, Error)]
pub enum HealthwatchError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging initialization error
    #[error("Logging error: {0}")]
    Logging(String),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server error (bind / serve)
    #[error("Server error: {0}")]
    Server(String),
}

/// healthwatch result alias
pub type HealthwatchResult<T> = Result<T, HealthwatchError>;
