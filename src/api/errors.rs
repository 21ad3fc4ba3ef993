use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::analytics::AnalyticsError;

/// Failure surfaced to API callers.
///
/// The caller only ever sees a generic message; the cause is logged here.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{route} failed: {source}")]
    Internal {
        route: &'static str,
        source: AnalyticsError
    }
}

impl ApiError {
    pub fn internal(route: &'static str, source: AnalyticsError) -> Self {
        let api_error = Self::Internal { route, source };
        error!("{api_error}");
        api_error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": "Internal server error" }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
