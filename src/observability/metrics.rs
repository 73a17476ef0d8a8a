//! Metrics collection and exposition.
//!
//! # Metrics
//! - `item_board_requests_total` (counter): requests by route, method, status
//! - `item_board_request_duration_seconds` (histogram): latency by route
//! - `item_board_items_appended_total` (counter): appends by scope
//! - `item_board_shared_items` (gauge): length of the shared list
//! - `item_board_session_rejected_total` (counter): unreadable session
//!   cookies by reason

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Where an item was appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Shared,
    Session,
}

impl Scope {
    fn as_str(self) -> &'static str {
        match self {
            Scope::Shared => "shared",
            Scope::Session => "session",
        }
    }
}

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(route: &str, method: &str, status: u16, start: Instant) {
    counter!(
        "item_board_requests_total",
        "route" => route.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("item_board_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_item_appended(scope: Scope) {
    counter!("item_board_items_appended_total", "scope" => scope.as_str()).increment(1);
}

pub fn set_shared_items(len: usize) {
    gauge!("item_board_shared_items").set(len as f64);
}

pub fn record_session_rejected(reason: &'static str) {
    counter!("item_board_session_rejected_total", "reason" => reason).increment(1);
}

/// Middleware recording request count and latency per matched route.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;
    record_request(&route, &method, response.status().as_u16(), start);
    response
}
