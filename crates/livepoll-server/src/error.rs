//! Error types for the request/response surface.
//!
//! [`ApiError`] converts tally failures into Axum HTTP responses via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. The push
//! surface never uses this type: its failures are dropped silently by
//! design.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use livepoll_core::TallyError;
use livepoll_types::OptionId;

/// Errors reported to callers of the REST API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request named an option outside the configured set.
    #[error("invalid option: {0}")]
    InvalidOption(OptionId),
}

impl From<TallyError> for ApiError {
    fn from(err: TallyError) -> Self {
        match err {
            TallyError::InvalidOption(option) => Self::InvalidOption(option),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidOption(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn invalid_option_maps_to_bad_request() {
        let response = ApiError::InvalidOption(OptionId::from("option9")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
