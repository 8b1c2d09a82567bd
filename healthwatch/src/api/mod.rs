//! REST APIハンドラー

pub mod status;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// ステータスサービスのルーターを作成
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(status::root))
        .route("/health", get(status::health))
        .layer(TraceLayer::new_for_http())
}
