//! ヘルスチェックモニター
//!
//! 単一URLを一定間隔でプローブし、結果をログへ記録する。

pub mod monitor;
pub mod probe;

pub use monitor::{HealthMonitor, RECORD_TARGET};
pub use probe::{is_healthy_status, HealthProbe, ProbeResult};
