//! In-process HTTP server returning canned responses.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Header lookup by lowercase name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
struct Exchange {
    responses: VecDeque<(u16, String)>,
    requests: Vec<RecordedRequest>,
}

type SharedExchange = Arc<Mutex<Exchange>>;

/// Serves each `(status, body)` pair to one request, in order.
pub(crate) struct MockServer {
    addr: SocketAddr,
    exchange: SharedExchange,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let exchange: SharedExchange = Arc::new(Mutex::new(Exchange {
            responses: responses.into(),
            requests: Vec::new(),
        }));
        let app = Router::new()
            .fallback(serve_canned)
            .with_state(exchange.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            exchange,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the server and return the recorded requests.
    ///
    /// Panics if a canned response was never requested.
    pub async fn finish(self) -> Vec<RecordedRequest> {
        self.handle.abort();
        let mut exchange = self.exchange.lock().unwrap();
        assert!(
            exchange.responses.is_empty(),
            "{} canned responses were not served",
            exchange.responses.len()
        );
        std::mem::take(&mut exchange.requests)
    }
}

async fn serve_canned(
    State(exchange): State<SharedExchange>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let mut exchange = exchange.lock().unwrap();
    exchange.requests.push(RecordedRequest {
        method: method.to_string(),
        target: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body,
    });

    match exchange.responses.pop_front() {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "no canned response left").into_response(),
    }
}
