//! healthwatch
//!
//! ステータスサーバー、定期ヘルスチェックモニター、古いファイルのクリーンアップを
//! 1つのバイナリにまとめたDevOps向けユーティリティ

#![warn(missing_docs)]

/// REST APIハンドラー（`/` と `/health`）
pub mod api;

/// 古いファイルのクリーンアップ
pub mod cleanup;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// エラー型定義
pub mod error;

/// ヘルスチェック監視
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// axumサーバー起動
pub mod server;

/// Shutdown controller
pub mod shutdown;
