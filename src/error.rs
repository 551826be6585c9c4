use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Validation(&'static str),
    /// Upstream catalog returned a non-success status on one of the two
    /// refresh calls. Surfaced to clients as the fetch-failure body.
    #[error("upstream catalog request failed")]
    Upstream,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Date(#[from] jiff::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::FORBIDDEN, "Unauthorized"),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, *msg),
            AppError::Upstream => {
                tracing::warn!("catalog refresh failed: upstream returned non-success status");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch movies")
            }
            err => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
