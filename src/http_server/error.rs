use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::{Html, IntoResponse},
};

use crate::http_server::views;

/// Errors a handler can end in; each renders its own error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),
    // Produced via `?` on any `color_eyre::Result`
    #[error("{0:?}")]
    Internal(color_eyre::Report),
}

impl From<color_eyre::Report> for AppError {
    fn from(err: color_eyre::Report) -> Self {
        Self::Internal(err)
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response<Body> {
        match self {
            AppError::NotFound(what) => {
                log::debug!("{} not found", what);
                (StatusCode::NOT_FOUND, Html(views::pages::not_found())).into_response()
            }
            AppError::Internal(err) => {
                log::error!("{err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::pages::server_error()),
                )
                    .into_response()
            }
        }
    }
}

/// Path ids that aren't integers get the 404 page rather than a 400.
pub fn parse_id(raw: &str, kind: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::NotFound(format!("{} '{}'", kind, raw)))
}
