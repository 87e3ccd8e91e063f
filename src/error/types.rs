//! API error types
//!
//! Every failure leaving the generator endpoint is rendered with the same
//! `{ "error": ... }` body as a successful view, only the status differs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::schemas::BlogResponse;
use crate::services::GenerationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(err) => generation_status(err),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn generation_status(err: &GenerationError) -> StatusCode {
    match err {
        GenerationError::Validation(_) => StatusCode::BAD_REQUEST,
        GenerationError::NotConfigured | GenerationError::KeysUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        GenerationError::EmptyResponse | GenerationError::Exhausted { .. } => {
            StatusCode::BAD_GATEWAY
        }
        GenerationError::TimedOut => StatusCode::GATEWAY_TIMEOUT,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(BlogResponse::failure(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_statuses() {
        let cases = [
            (GenerationError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (GenerationError::NotConfigured, StatusCode::SERVICE_UNAVAILABLE),
            (GenerationError::KeysUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (GenerationError::EmptyResponse, StatusCode::BAD_GATEWAY),
            (
                GenerationError::Exhausted { last_error: "x".into() },
                StatusCode::BAD_GATEWAY,
            ),
            (GenerationError::TimedOut, StatusCode::GATEWAY_TIMEOUT),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_generation_message_passes_through() {
        let err = ApiError::from(GenerationError::Validation("Please enter a topic!".into()));
        assert_eq!(err.to_string(), "Please enter a topic!");
    }

    #[test]
    fn test_internal_error_is_generic() {
        let response = ApiError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
