use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::foundation::error::CountdownError;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// A [`CountdownError`] surfaced through the HTTP API.
#[derive(Debug)]
pub struct ApiError(pub CountdownError);

impl From<CountdownError> for ApiError {
    fn from(err: CountdownError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Request input is never rejected, so every failure is a server fault.
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(
            status = status.as_u16(),
            kind = self.0.kind(),
            error = %self.0,
            "countdown request failed"
        );
        let body = ErrorBody {
            error: self.0.kind(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
