//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, timeout, body limit, metrics)
//! - Own the application state handed to handlers
//! - Serve until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::FromRef,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::request::{self, MakeRequestUuidV4};
use crate::items::SharedItemList;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::session::SessionManager;

/// Errors that stop the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedItemList>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            shared: Arc::new(SharedItemList::new()),
            sessions: Arc::new(SessionManager::new(&config.session)),
        }
    }
}

impl FromRef<AppState> for Arc<SharedItemList> {
    fn from_ref(state: &AppState) -> Self {
        state.shared.clone()
    }
}

impl FromRef<AppState> for Arc<SessionManager> {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

/// HTTP server for the item board.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        if config.session.uses_placeholder_secret() {
            tracing::warn!(
                "session.secret_key is the built-in placeholder; session cookies can be forged. \
                 Set a real secret before deploying"
            );
        }

        let state = AppState::new(&config);
        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::show_shared).post(handlers::add_shared))
            .route(
                "/session",
                get(handlers::show_session).post(handlers::add_session),
            )
            .route("/healthz", get(handlers::healthz))
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(request::make_span))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server on `listener` until a signal or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
