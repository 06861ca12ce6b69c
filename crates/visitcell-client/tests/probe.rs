//! Client against a live gateway over TCP.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use visitcell_client::{ClientError, ConnectionState, Probe, SessionClient, CANCELLED};
use visitcell_gateway::{app_state::AppState, config, router, store::MemoryCell};

async fn spawn_gateway() -> SocketAddr {
    let cfg = config::load_from_str("version: 1\nstorage:\n  backend: memory\n").unwrap();
    let app = router::build_router(AppState::with_cell(cfg, Arc::new(MemoryCell::new())));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn probe_counts_visits() {
    let addr = spawn_gateway().await;
    let mut probe = Probe::new(SessionClient::new(format!("http://{addr}")));
    let diag = probe.diagnostics();

    let first = probe.connect().await.unwrap();
    assert_eq!(first.session_id.as_str(), "e53f626fa705e33e");
    assert_eq!(first.visit_count, 1);
    assert_eq!(probe.state(), &ConnectionState::Connected(first.clone()));
    assert_eq!(diag.current(), Some(first));

    probe.disconnect().unwrap();
    assert_eq!(probe.state(), &ConnectionState::Idle);
    assert!(diag.current().is_none());

    let second = probe.connect().await.unwrap();
    assert_eq!(second.visit_count, 2);
}

#[tokio::test]
async fn connect_while_connected_is_refused() {
    let addr = spawn_gateway().await;
    let mut probe = Probe::new(SessionClient::new(format!("http://{addr}")));

    probe.connect().await.unwrap();
    let err = probe.connect().await.unwrap_err();
    assert!(matches!(err, ClientError::Transition(_)));
    assert_eq!(probe.state().name(), "connected");
}

#[tokio::test]
async fn non_2xx_is_a_transport_failure() {
    let addr = spawn_gateway().await;
    // Base path shifts the request to /edge/api/session, which the gateway 404s.
    let mut probe = Probe::new(SessionClient::new(format!("http://{addr}/edge")));

    let err = probe.connect().await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Transport("Edge rejected request with HTTP status 404".into())
    );
    assert_eq!(
        probe.state(),
        &ConnectionState::Error("Edge rejected request with HTTP status 404".into())
    );
    assert!(probe.diagnostics().current().is_none());
}

#[tokio::test]
async fn unreachable_edge_is_a_transport_failure_and_retryable() {
    // Bind then drop to get a port nothing listens on.
    let addr = {
        let l = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        l.local_addr().unwrap()
    };
    let mut probe = Probe::new(SessionClient::new(format!("http://{addr}")));

    let err = probe.connect().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(probe.state().name(), "error");

    // Retry is allowed from the error state.
    assert!(matches!(probe.connect().await, Err(ClientError::Transport(_))));
}

/// Accepts connections and holds them open without ever answering.
async fn spawn_silent_edge() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

#[tokio::test]
async fn dropped_connect_leaves_a_retryable_error() {
    let addr = spawn_silent_edge().await;
    let mut conn = Probe::new(SessionClient::new(format!("http://{addr}")));

    let timed_out = tokio::time::timeout(Duration::from_millis(200), conn.connect()).await;
    assert!(timed_out.is_err());
    assert_eq!(conn.state(), &ConnectionState::Error(CANCELLED.into()));
    assert!(conn.diagnostics().current().is_none());

    // Retry is accepted: it times out again instead of being refused.
    let retry = tokio::time::timeout(Duration::from_millis(200), conn.connect()).await;
    assert!(retry.is_err());
    assert_eq!(conn.state(), &ConnectionState::Error(CANCELLED.into()));
}
