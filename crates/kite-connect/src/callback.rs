//! One-shot local listener for the login redirect.
//!
//! After a browser login the broker redirects to
//! `http://<host>:<port>/<path>?request_token=...&status=success`. The
//! listener serves that single redirect and is shut down as soon as the
//! token is captured, the redirect carries no token, or the timeout elapses.

use std::collections::HashMap;
use std::future::IntoFuture;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use kite_core::error::CallbackError;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub const DEFAULT_CALLBACK_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CALLBACK_PATH: &str = "/api/user/callback/kite/";

/// What the redirect carried.
#[derive(Debug, Clone)]
enum Redirect {
    Token(String),
    MissingToken,
}

#[derive(Clone)]
struct CallbackState {
    outcome: Arc<watch::Sender<Option<Redirect>>>,
}

/// A bound callback listener.
pub struct CallbackListener {
    listener: TcpListener,
    path: String,
}

impl CallbackListener {
    /// Bind the listener.
    pub async fn bind(addr: &str, path: impl Into<String>) -> Result<Self, CallbackError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| CallbackError::Bind {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?;
        let path = normalize_path(&path.into());
        debug!("Callback listener bound on {} for {}", addr, path);
        Ok(Self { listener, path })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Wait for the redirect and return its request token.
    ///
    /// Consumes the listener, so the port is released on every exit path.
    /// Connections are served concurrently; requests for other paths get a
    /// 404 and do not end the wait.
    pub async fn accept_request_token(self, timeout: Duration) -> Result<String, CallbackError> {
        let (outcome_tx, outcome_rx) = watch::channel(None);
        let app = router(
            &self.path,
            CallbackState {
                outcome: Arc::new(outcome_tx),
            },
        );

        let mut shutdown_rx = outcome_rx.clone();
        let server = axum::serve(self.listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.wait_for(Option::is_some).await;
        });
        let served = tokio::time::timeout(timeout, server.into_future()).await;

        let outcome = outcome_rx.borrow().clone();
        match (outcome, served) {
            (Some(Redirect::Token(token)), _) => Ok(token),
            (Some(Redirect::MissingToken), _) => Err(CallbackError::MissingToken),
            (None, Err(_)) => Err(CallbackError::Timeout(timeout)),
            (None, Ok(Err(e))) => Err(CallbackError::Io(e)),
            (None, Ok(Ok(()))) => Err(CallbackError::Stopped),
        }
    }
}

fn router(path: &str, state: CallbackState) -> Router {
    let mut router = Router::new().route(path, get(handle_redirect));
    if path != "/" {
        router = router.route(&format!("{}/", path), get(handle_redirect));
    }
    router.with_state(state)
}

async fn handle_redirect(
    State(state): State<CallbackState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, &'static str) {
    let redirect = match params.get("request_token").filter(|token| !token.is_empty()) {
        Some(token) => Redirect::Token(token.clone()),
        None => Redirect::MissingToken,
    };

    let response = match &redirect {
        Redirect::Token(_) => {
            info!("Received request token from login redirect");
            (StatusCode::OK, "login successful!")
        }
        Redirect::MissingToken => {
            warn!("Login redirect has no request_token");
            (StatusCode::BAD_REQUEST, "request_token missing")
        }
    };

    // First redirect wins.
    state.outcome.send_if_modified(|current| {
        if current.is_none() {
            *current = Some(redirect);
            true
        } else {
            false
        }
    });
    response
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
