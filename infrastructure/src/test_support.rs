//! Canned-response HTTP server for adapter tests.

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// The first request received by a [`spawn_responder`] server.
pub(crate) struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn json_body(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    first_request: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
}

async fn answer(
    State(canned): State<Canned>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    if let Some(tx) = canned.first_request.lock().unwrap().take() {
        let _ = tx.send(CapturedRequest {
            method,
            path: uri.path().to_string(),
            headers,
            body,
        });
    }
    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
}

/// Serve `body` with `status` for every route on a random local port.
///
/// Returns the base URL and a receiver for the first request.
pub(crate) async fn spawn_responder(
    status: u16,
    body: &str,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    let (tx, rx) = oneshot::channel();
    let canned = Canned {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        first_request: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new().fallback(answer).with_state(canned);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (url, rx)
}
