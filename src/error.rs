// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Service not configured: {0}")]
    Configuration(String),

    #[error("Empty response from vision model")]
    UpstreamEmptyResponse,

    #[error("Vision model returned malformed data: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Vision model error: {0}")]
    UpstreamModel(String),

    #[error("Missing webhook signature")]
    MissingSignature,

    #[error("Webhook Error: {0}")]
    SignatureVerification(String),

    #[error("{0}")]
    UpstreamProcessor(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::Configuration(_) => "configuration_error",
            AppError::UpstreamEmptyResponse => "upstream_empty_response",
            AppError::MalformedUpstreamResponse(_) => "malformed_upstream_response",
            AppError::UpstreamModel(_) => "upstream_model_error",
            AppError::MissingSignature => "missing_signature",
            AppError::SignatureVerification(_) => "signature_verification_failed",
            AppError::UpstreamProcessor(_) => "upstream_processor_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::MissingSignature
            | AppError::SignatureVerification(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let error = match &self {
            AppError::Validation(_) | AppError::MissingSignature => {
                tracing::debug!(code, error = %self, "Rejected request");
                self.to_string()
            }
            AppError::SignatureVerification(_) => {
                tracing::warn!(code, error = %self, "Webhook signature rejected");
                self.to_string()
            }
            AppError::UpstreamProcessor(msg) => {
                tracing::error!(code, error = %msg, "Payment processor error");
                msg.clone()
            }
            AppError::Internal(err) => {
                tracing::error!(code, error = %err, "Internal server error");
                "Internal server error".to_string()
            }
            _ => {
                tracing::error!(code, error = %self, "Request failed");
                self.to_string()
            }
        };

        (status, Json(ErrorResponse { error, code })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
