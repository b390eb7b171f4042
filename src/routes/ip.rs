use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::debug;

use crate::config::ReportPolicy;
use crate::error::HttpError;

#[derive(Serialize)]
pub struct ClientIpResponse {
    #[serde(rename = "IP")]
    ip: String,
}

/// Reports the caller's remote address back as `{"IP": "<address>"}`.
///
/// Browser clients call this cross-origin, so the response carries permissive
/// CORS headers; anything other than a plain GET is rejected with the
/// contract's 400 messages rather than axum's automatic 405.
pub async fn report_client_ip(
    State(policy): State<ReportPolicy>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    method: Method,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    if policy.require_origin_header && !headers.contains_key(header::ORIGIN) {
        return Err(HttpError::bad_request(
            "Cross domain request require Origin header",
        ));
    }

    if method != Method::GET {
        return Err(HttpError::bad_request(
            "Cross domain request only supports GET",
        ));
    }

    let remote = remote.to_string();
    let address = if policy.strip_port_from_address {
        strip_port(&remote).to_string()
    } else {
        remote
    };

    debug!("reporting client address {}", address);

    let body = serde_json::to_string(&ClientIpResponse { ip: address })
        .map_err(|err| HttpError::internal(err.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET"),
            (header::CONTENT_TYPE, "application/json"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response())
}

/// Drops everything from the first `:` onward. Addresses without a colon pass
/// through unchanged. Bare IPv6 text truncates at its first group; callers
/// that need untouched IPv6 should disable stripping.
fn strip_port(address: &str) -> &str {
    match address.find(':') {
        Some(index) => &address[..index],
        None => address,
    }
}
