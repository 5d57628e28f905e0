//! Server-rendered web interface

pub mod books;
pub mod flash;
pub mod templates;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Fallback for unknown pages
pub async fn page_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        templates::error_page("Not found", "The page you requested does not exist."),
    )
        .into_response()
}
