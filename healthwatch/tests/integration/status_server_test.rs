//! Integration Test: ステータスサーバー

use crate::support::http::spawn_status_server;
use healthwatch::api::status::{HealthResponse, RootResponse};
use reqwest::StatusCode;

#[tokio::test]
async fn test_root_endpoint_over_http() {
    let server = spawn_status_server().await;

    let response = reqwest::get(format!("http://{}/", server.addr()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: RootResponse = response.json().await.unwrap();
    assert_eq!(body.message, "Hello DevOps!");
    assert_eq!(body.status, "ok");

    server.stop().await;
}

#[tokio::test]
async fn test_health_endpoint_over_http() {
    let server = spawn_status_server().await;

    let response = reqwest::get(server.health_url()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body: HealthResponse = response.json().await.unwrap();
    assert_eq!(body.status, "healthy");

    server.stop().await;
}
