//! Status API (`/` と `/health`).
//!
//! どちらも静的なJSONを返す。モニターは `/health` を監視対象とする。

use axum::Json;
use serde::{Deserialize, Serialize};

/// `GET /` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootResponse {
    /// 挨拶メッセージ
    pub message: String,
    /// サービス状態
    pub status: String,
}

/// `GET /health` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態
    pub status: String,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Hello DevOps!".to_string(),
        status: "ok".to_string(),
    })
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
