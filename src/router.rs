use axum::{routing::any, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::config::ReportPolicy;
use crate::error::fault_to_response;
use crate::routes::ip::report_client_ip;

/// Builds the service: the single reporting endpoint, wrapped in a
/// per-request fault boundary so an unexpected panic in handling degrades to
/// a 500 response instead of tearing down the server.
pub fn create_router(policy: ReportPolicy) -> Router {
    Router::new()
        .route("/GetClientIPAddress", any(report_client_ip))
        .layer(CatchPanicLayer::custom(fault_to_response))
        .with_state(policy)
}
