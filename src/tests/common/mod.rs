// tests/common/mod.rs
pub use axum::Router;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};

use crate::config::settings::{ConnectorConfig, Secret};

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Config pointed at a mock server; margin zero so lifetime knobs act exactly.
pub fn test_config(base_url: String) -> ConnectorConfig {
    ConnectorConfig {
        base_url,
        username: "admin@example.org".to_owned(),
        password: Secret::new("pw"),
        connect_timeout_ms: 2000,
        read_timeout_ms: 2000,
        trust_all_certs: false,
        session_lifetime_secs: 3600,
        safety_margin_secs: 0,
        logging: None,
    }
}

/// Hit counters for the mock authn endpoints.
#[derive(Default)]
pub struct AuthnCounters {
    pub status_hits: AtomicUsize,
    pub login_hits: AtomicUsize,
}

impl AuthnCounters {
    pub fn status(&self) -> usize {
        self.status_hits.load(Ordering::SeqCst)
    }
    pub fn logins(&self) -> usize {
        self.login_hits.load(Ordering::SeqCst)
    }
}

/// Router implementing the two-step handshake: the status call sets the CSRF
/// header, the login POST requires it back and answers with an
/// `Authorization: Bearer <token>` response header.
pub fn authn_router(counters: Arc<AuthnCounters>, token: &'static str) -> Router {
    let status_counters = counters.clone();
    let login_counters = counters;
    Router::new()
        .route(
            "/server/api/authn/status",
            get(move || {
                let counters = status_counters.clone();
                async move {
                    counters.status_hits.fetch_add(1, Ordering::SeqCst);
                    let mut headers = HeaderMap::new();
                    headers.insert("DSPACE-XSRF-TOKEN", "csrf-1".parse().unwrap());
                    (StatusCode::OK, headers, r#"{"authenticated":false}"#)
                }
            }),
        )
        .route(
            "/server/api/authn/login",
            post(move |request_headers: HeaderMap| {
                let counters = login_counters.clone();
                async move {
                    counters.login_hits.fetch_add(1, Ordering::SeqCst);
                    if request_headers.get("X-XSRF-TOKEN").is_none() {
                        return (StatusCode::FORBIDDEN, "missing csrf token").into_response();
                    }
                    let mut headers = HeaderMap::new();
                    headers.insert(
                        "Authorization",
                        format!("Bearer {}", token).parse().unwrap(),
                    );
                    (StatusCode::OK, headers, "").into_response()
                }
            }),
        )
}
