//! Integration Test: ヘルスモニター
//!
//! モックターゲットに対する定期ヘルスチェック → ログ出力 → 割り込み停止

use crate::support::http::{spawn_status_server, unreachable_url};
use crate::support::logs::{record_time, CapturedLogs};
use healthwatch::config::MonitorConfig;
use healthwatch::health::{HealthMonitor, HealthProbe};
use healthwatch::shutdown::ShutdownController;
use std::time::Duration;
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct RunningMonitor {
    shutdown: ShutdownController,
    handle: JoinHandle<u64>,
}

impl RunningMonitor {
    fn start(url: String, timeout: Duration, interval: Duration) -> Self {
        let config = MonitorConfig::new(url, timeout, interval, "unused.log").unwrap();
        let shutdown = ShutdownController::default();
        let monitor = HealthMonitor::new(config, HealthProbe::new().unwrap(), shutdown.clone());
        let handle = tokio::spawn(async move { monitor.run().await });
        Self { shutdown, handle }
    }

    async fn stop(self) -> u64 {
        self.shutdown.request_shutdown();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("monitor did not stop")
            .expect("monitor task panicked")
    }
}

async fn mock_target(status: u16) -> MockServer {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&mock)
        .await;
    mock
}

/// 200 → HEALTHY / INFO
#[tokio::test]
async fn test_target_returns_200_logs_healthy() {
    let (logs, _guard) = CapturedLogs::install();
    let mock = mock_target(200).await;

    let monitor = RunningMonitor::start(
        format!("{}/health", mock.uri()),
        Duration::from_secs(5),
        Duration::from_secs(60),
    );
    logs.wait_until(|lines| lines.iter().any(|l| l.contains(" - Service ")))
        .await;
    let iterations = monitor.stop().await;

    assert_eq!(iterations, 1);
    let records = logs.health_records();
    assert_eq!(records.len(), 1);
    assert!(records[0].contains(" - INFO - Service HEALTHY - Status: 200, Response time: "));
    assert!(records[0].ends_with('s'));
}

/// 503 → UNHEALTHY / ERROR（ステータスコード付き）
#[tokio::test]
async fn test_target_returns_503_logs_unhealthy() {
    let (logs, _guard) = CapturedLogs::install();
    let mock = mock_target(503).await;

    let monitor = RunningMonitor::start(
        format!("{}/health", mock.uri()),
        Duration::from_secs(5),
        Duration::from_secs(60),
    );
    logs.wait_until(|lines| lines.iter().any(|l| l.contains(" - Service ")))
        .await;
    monitor.stop().await;

    let records = logs.health_records();
    assert_eq!(records.len(), 1);
    assert!(records[0].contains(" - ERROR - Service UNHEALTHY - Status: 503, Response time: "));
}

/// 接続拒否 → UNHEALTHY / Status: None
#[tokio::test]
async fn test_unreachable_target_logs_none_status() {
    let (logs, _guard) = CapturedLogs::install();

    let monitor = RunningMonitor::start(
        unreachable_url(),
        Duration::from_secs(2),
        Duration::from_secs(60),
    );
    logs.wait_until(|lines| lines.iter().any(|l| l.contains(" - Service ")))
        .await;
    monitor.stop().await;

    let records = logs.health_records();
    assert_eq!(records.len(), 1);
    assert!(records[0].contains(" - ERROR - Service UNHEALTHY - Status: None, Response time: "));
}

/// スリープ中の割り込み → 停止メッセージを出して正常終了
#[tokio::test]
async fn test_interrupt_during_sleep_stops_cleanly() {
    let (logs, _guard) = CapturedLogs::install();
    let mock = mock_target(200).await;

    let monitor = RunningMonitor::start(
        format!("{}/health", mock.uri()),
        Duration::from_secs(5),
        Duration::from_secs(3600),
    );
    logs.wait_until(|lines| lines.iter().any(|l| l.contains(" - Service ")))
        .await;
    monitor.stop().await;

    let lines = logs.lines();
    assert!(lines[0].contains(" - INFO - Starting health check for http://"));
    assert!(lines
        .last()
        .unwrap()
        .ends_with(" - INFO - Health check stopped by user"));
}

/// プローブ中の割り込み → レコードを出さずに即停止
#[tokio::test]
async fn test_interrupt_during_probe_stops_without_record() {
    let (logs, _guard) = CapturedLogs::install();
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&mock)
        .await;

    let monitor = RunningMonitor::start(
        format!("{}/health", mock.uri()),
        Duration::from_secs(60),
        Duration::from_secs(60),
    );
    logs.wait_until(|lines| {
        lines
            .iter()
            .any(|l| l.contains("Starting health check for"))
    })
    .await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let iterations = monitor.stop().await;
    assert_eq!(iterations, 0);
    assert!(logs.health_records().is_empty());
}

/// 1イテレーションにつき1レコード・1リクエスト、レコード間隔は interval 以上
#[tokio::test]
async fn test_one_record_per_iteration_spaced_by_interval() {
    let (logs, _guard) = CapturedLogs::install();
    let mock = mock_target(200).await;
    let interval = Duration::from_millis(300);

    let monitor = RunningMonitor::start(
        format!("{}/health", mock.uri()),
        Duration::from_secs(5),
        interval,
    );
    logs.wait_until(|lines| lines.iter().filter(|l| l.contains(" - Service ")).count() >= 3)
        .await;
    let iterations = monitor.stop().await;

    let records = logs.health_records();
    assert_eq!(records.len() as u64, iterations);
    let requests = mock.received_requests().await.unwrap();
    assert_eq!(requests.len() as u64, iterations);

    for pair in records.windows(2) {
        let gap = (record_time(&pair[1]) - record_time(&pair[0])).num_milliseconds();
        // ミリ秒切り捨て分の誤差を許容
        assert!(
            gap + 1 >= interval.as_millis() as i64,
            "records too close: {gap}ms"
        );
    }
}

/// 実際のステータスサーバーの /health を監視する
#[tokio::test]
async fn test_monitors_status_server_health_endpoint() {
    let (logs, _guard) = CapturedLogs::install();
    let server = spawn_status_server().await;

    let monitor = RunningMonitor::start(
        server.health_url(),
        Duration::from_secs(5),
        Duration::from_secs(60),
    );
    logs.wait_until(|lines| lines.iter().any(|l| l.contains(" - Service ")))
        .await;
    monitor.stop().await;
    server.stop().await;

    let records = logs.health_records();
    assert!(records[0].contains("Service HEALTHY - Status: 200"));
}
