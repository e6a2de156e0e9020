//! Dashboard assets served next to the /ws endpoint.

mod common;

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use common::FakeReaders;
use dashboard_agent::metrics::Aggregator;
use dashboard_agent::state::AppState;
use dashboard_agent::ws::router;
use reqwest::StatusCode;

async fn spawn_agent(frontend: &Path) -> SocketAddr {
    let state = AppState::new(
        Aggregator::new(Arc::new(FakeReaders::ticking())),
        Duration::from_millis(50),
        frontend.to_path_buf(),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            router(state).into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    addr
}

fn frontend_fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("assets/js")).unwrap();
    fs::write(
        dir.path().join("index.html"),
        "<!doctype html><title>dashboard</title>",
    )
    .unwrap();
    fs::write(
        dir.path().join("assets/js/dashboard.js"),
        "const ws = new WebSocket(`ws://${location.host}/ws`);",
    )
    .unwrap();
    dir
}

#[tokio::test]
async fn serves_index_and_assets() {
    let dir = frontend_fixture();
    let addr = spawn_agent(dir.path()).await;

    let index = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(index.status(), StatusCode::OK);
    assert!(index.text().await.unwrap().contains("<title>dashboard</title>"));

    let js = reqwest::get(format!("http://{addr}/assets/js/dashboard.js"))
        .await
        .unwrap();
    assert_eq!(js.status(), StatusCode::OK);
    assert!(js.text().await.unwrap().contains("/ws"));
}

#[tokio::test]
async fn unknown_asset_is_not_found() {
    let dir = frontend_fixture();
    let addr = spawn_agent(dir.path()).await;

    let res = reqwest::get(format!("http://{addr}/assets/missing.css"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn websocket_route_still_wins() {
    let dir = frontend_fixture();
    fs::write(dir.path().join("ws"), "not the socket").unwrap();
    let addr = spawn_agent(dir.path()).await;

    // plain GET without upgrade headers is rejected by the upgrade extractor
    let res = reqwest::get(format!("http://{addr}/ws")).await.unwrap();
    assert_ne!(res.status(), StatusCode::OK);
}
