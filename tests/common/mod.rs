//! Shared mock upstreams for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{any, get},
    Router,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A local upstream server that counts every request it receives.
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    /// Absolute URL for `path` on the mock.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn ok_json(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"ok":true}"#,
    )
}

async fn echo(
    State(hits): State<Arc<AtomicUsize>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);

    let mut reply = HeaderMap::new();
    reply.insert("x-echo-method", HeaderValue::from_str(method.as_str()).unwrap());
    for (name, echoed) in [
        (header::CONTENT_TYPE, "x-echo-content-type"),
        (header::AUTHORIZATION, "x-echo-authorization"),
        (header::HOST, "x-echo-host"),
    ] {
        if let Some(value) = headers.get(name) {
            reply.insert(echoed, value.clone());
        }
    }
    (StatusCode::OK, reply, body)
}

async fn missing(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::NOT_FOUND, "not here")
}

async fn cookies(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
    headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));
    (StatusCode::OK, headers, "cookies")
}

async fn sized(State(hits): State<Arc<AtomicUsize>>, Path(size): Path<usize>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    "x".repeat(size)
}

/// Starts the counting mock upstream on an ephemeral port.
pub async fn start_mock_upstream() -> MockUpstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/a", get(ok_json))
        .route("/echo", any(echo))
        .route("/missing", get(missing))
        .route("/cookies", get(cookies))
        .route("/size/:n", get(sized))
        .layer(DefaultBodyLimit::disable())
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream { addr, hits }
}

/// Starts an upstream that promises more body bytes than it sends.
pub async fn start_truncating_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response =
                    "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort";
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Returns an address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
