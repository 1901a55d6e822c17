use axum::response::Html;

use crate::http_server::{error::AppError, views};

pub async fn index() -> Html<String> {
    Html(views::pages::home(&[]))
}

/// Any path no route claims
pub async fn fallback() -> AppError {
    AppError::NotFound("Page".into())
}
