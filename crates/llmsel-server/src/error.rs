//! JSON error responses for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use llmsel_catalog::ListingError;
use llmsel_core::{RecommendationResponse, SelectorError};

/// API error rendered as `{ "success": false, "error": ..., "message": ... }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn internal(error: &'static str, msg: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, error, message: msg.into() }
    }
    pub fn bad_gateway(error: &'static str, msg: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_GATEWAY, error, message: msg.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = RecommendationResponse::failure(self.error, self.message);
        (self.status, Json(body)).into_response()
    }
}

impl From<SelectorError> for ApiError {
    fn from(err: SelectorError) -> Self {
        ApiError::internal("Failed to get recommendations", err.to_string())
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        ApiError::bad_gateway("Failed to list models", err.to_string())
    }
}
