//! Shared utilities for integration testing.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Path, Request},
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect},
    routing::{any, get, post},
    Json, Router,
};
use cors_relay::{HttpServer, RelayConfig, ReqwestUpstream, Shutdown};
use futures_util::{stream, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Notify};

/// What the mock upstream received, echoed back as JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub uri: String,
    pub headers: BTreeMap<String, Vec<String>>,
    pub body: String,
}

impl Echo {
    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&[String]> {
        self.headers.get(name).map(Vec::as_slice)
    }
}

async fn echo(request: Request) -> Json<Echo> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in parts.headers.iter() {
        headers
            .entry(name.to_string())
            .or_default()
            .push(value.to_str().unwrap_or_default().to_string());
    }

    Json(Echo {
        method: parts.method.to_string(),
        uri: parts.uri.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap();
    (status, format!("status {}", code))
}

async fn cookies() -> impl IntoResponse {
    (
        AppendHeaders([(header::SET_COOKIE, "a=1"), (header::SET_COOKIE, "b=2")]),
        "ok",
    )
}

/// Start a mock upstream on an ephemeral port.
///
/// Routes: `/echo`, `/hello`, `/cookies`, `/status/{code}`, `/redirect`.
pub async fn start_mock_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/echo", any(echo))
        .route("/hello", get(|| async { "hello world" }))
        .route("/cookies", get(cookies))
        .route("/status/{code}", get(status))
        .route("/redirect", get(|| async { Redirect::temporary("/hello") }));

    serve(app).await
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// A body yielding `"first"`, then `"second"` only once `release` fires.
#[allow(dead_code)]
pub fn gated_chunks(
    release: Arc<Notify>,
) -> impl Stream<Item = Result<&'static str, std::io::Error>> + Send + 'static {
    stream::once(async { Ok::<_, std::io::Error>("first") }).chain(stream::once(async move {
        release.notified().await;
        Ok("second")
    }))
}

/// Start an upstream whose `/gated` body stalls after its first chunk
/// until `release` is notified.
#[allow(dead_code)]
pub async fn start_gated_upstream(release: Arc<Notify>) -> SocketAddr {
    let app = Router::new().route(
        "/gated",
        get(move || {
            let release = release.clone();
            async move { Body::from_stream(gated_chunks(release)) }
        }),
    );
    serve(app).await
}

/// Start an upstream whose `/upload` forwards the first request body chunk
/// on `received` as soon as it arrives, then answers with the remainder.
#[allow(dead_code)]
pub async fn start_upload_upstream(received: mpsc::UnboundedSender<Bytes>) -> SocketAddr {
    let app = Router::new().route(
        "/upload",
        post(move |body: Body| {
            let received = received.clone();
            async move {
                let mut chunks = body.into_data_stream();
                if let Some(Ok(first)) = chunks.next().await {
                    let _ = received.send(first);
                }

                let mut rest = Vec::new();
                while let Some(Ok(chunk)) = chunks.next().await {
                    rest.extend_from_slice(&chunk);
                }
                String::from_utf8_lossy(&rest).into_owned()
            }
        }),
    );
    serve(app).await
}

#[allow(dead_code)]
/// Start a backend that promises more body bytes than it sends, then hangs up.
pub async fn start_truncating_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = tokio::io::AsyncReadExt::read(&mut socket, &mut buf).await;
                let response = "HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\npartial";
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

#[allow(dead_code)]
/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start the relay on an ephemeral port.
pub async fn start_relay(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let upstream = ReqwestUpstream::from_client(reqwest::Client::builder().no_proxy().build().unwrap());
    let server = HttpServer::new(&config, upstream, None);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client used to talk to the relay.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
