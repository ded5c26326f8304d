//! HTTP error envelope

use crate::activity::ActivityError;
use crate::pipelines::PipelineError;
use crate::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Message suggested to callers when every remote option is exhausted
const OUTAGE_SUGGESTION: &str =
    "AI services are temporarily unavailable. Please try again in a few minutes.";

/// Errors surfaced to HTTP callers
#[derive(Debug)]
pub enum ApiError {
    /// Payload could not be decoded as the declared media kind
    InvalidMedia(String),
    /// The audio contained no recognizable speech
    NoSpeechDetected,
    /// A required request field was absent or empty
    MissingInput(String),
    /// A provider rejected the input as malformed or unsupported
    RejectedInput(String),
    /// A provider failed and no fallback applies
    ProviderUnavailable(String),
    /// The request body could not be read or parsed
    BadRequest(String),
    /// Activity storage is unconfigured or failed
    StorageUnavailable(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback: Option<FallbackHint>,
}

#[derive(Serialize)]
struct FallbackHint {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, fallback) = match self {
            ApiError::InvalidMedia(msg) => (StatusCode::BAD_REQUEST, "invalid_media", msg, None),
            ApiError::NoSpeechDetected => (
                StatusCode::BAD_REQUEST,
                "no_speech_detected",
                "No speech was detected in the audio".to_string(),
                None,
            ),
            ApiError::MissingInput(field) => (
                StatusCode::BAD_REQUEST,
                "missing_input",
                format!("Missing required input: {field}"),
                None,
            ),
            ApiError::RejectedInput(msg) => (StatusCode::BAD_REQUEST, "rejected_input", msg, None),
            ApiError::ProviderUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "provider_unavailable",
                msg,
                Some(FallbackHint {
                    message: OUTAGE_SUGGESTION.to_string(),
                }),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::StorageUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_unavailable",
                msg,
                None,
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            fallback,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::InvalidMedia(e) => ApiError::InvalidMedia(e.to_string()),
            PipelineError::NoSpeechDetected => ApiError::NoSpeechDetected,
            PipelineError::MissingInput(field) => ApiError::MissingInput(field),
            PipelineError::Provider(ProviderError::RejectedInput(msg)) => {
                ApiError::RejectedInput(msg)
            }
            PipelineError::Provider(ProviderError::Unavailable(msg)) => {
                ApiError::ProviderUnavailable(msg)
            }
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::RejectedInput(msg) => ApiError::RejectedInput(msg),
            ProviderError::Unavailable(msg) => ApiError::ProviderUnavailable(msg),
        }
    }
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        ApiError::StorageUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_rejected_input_maps_to_bad_request() {
        let err: ApiError = PipelineError::Provider(ProviderError::RejectedInput(
            "unsupported image".to_string(),
        ))
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unavailable_maps_to_server_error() {
        let err: ApiError =
            PipelineError::Provider(ProviderError::Unavailable("timeout".to_string())).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
