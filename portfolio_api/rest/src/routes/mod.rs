use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiError;

pub mod contact;
pub mod health;

pub async fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Route not found")
}

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    internal_error(err, "Internal server error")
}

pub fn internal_error(err: impl Into<anyhow::Error>, detail: impl Into<String>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, detail)
}

fn error(code: StatusCode, detail: impl Into<String>) -> Response {
    (
        code,
        Json(ApiError {
            error: detail.into(),
        }),
    )
        .into_response()
}
