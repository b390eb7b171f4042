use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// A failure with an explicit HTTP status. Converted into a plain-text
/// response at the handler boundary.
#[derive(Debug, thiserror::Error)]
#[error("{status} - {message}")]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

impl HttpError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

/// Converts a caught panic into a 500 response so one faulting request never
/// takes the server down with it. Wired as the catch-panic layer in the
/// router.
pub fn fault_to_response(fault: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = fault.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = fault.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown fault".to_string()
    };

    (StatusCode::INTERNAL_SERVER_ERROR, detail).into_response()
}

#[derive(thiserror::Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body;

    async fn body_text(response: Response) -> String {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn http_error_writes_its_exact_status_and_message() {
        let response =
            HttpError::bad_request("Cross domain request only supports GET").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_text(response).await,
            "Cross domain request only supports GET"
        );
    }

    #[tokio::test]
    async fn serialization_failure_maps_to_500_with_underlying_text() {
        // serde_json refuses non-string map keys, which is the closest real
        // serializer failure this crate can hit.
        let err = serde_json::to_string(&std::collections::BTreeMap::from([((1, 2), "x")]))
            .unwrap_err();
        let response = HttpError::internal(err.to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.contains("key must be a string"));
    }

    #[tokio::test]
    async fn string_panic_payload_becomes_the_response_body() {
        let response = fault_to_response(Box::new("handler fault".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "handler fault");
    }

    #[tokio::test]
    async fn opaque_panic_payload_still_produces_a_response() {
        let response = fault_to_response(Box::new(42_u32));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "unknown fault");
    }
}
