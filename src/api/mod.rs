//! API handlers for Bookshelf JSON endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, ErrorResponse};

/// Book identifier taken from the `{id}` path segment
pub struct BookId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || AppError::BadRequest("Invalid book ID. Must be a number.".to_string());

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        raw.trim().parse::<i64>().map(BookId).map_err(|_| invalid())
    }
}

/// Routes advertised by the discovery document
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiEndpoints {
    pub get_all_books: String,
    pub get_book_by_id: String,
    pub create_book: String,
    pub update_book: String,
    pub delete_book: String,
}

/// Discovery document served at `/api`
#[derive(Serialize, ToSchema)]
pub struct ApiIndex {
    pub message: String,
    pub endpoints: ApiEndpoints,
}

/// API discovery endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "discovery",
    responses(
        (status = 200, description = "Available API routes", body = ApiIndex)
    )
)]
pub async fn index() -> Json<ApiIndex> {
    Json(ApiIndex {
        message: "Book Management API".to_string(),
        endpoints: ApiEndpoints {
            get_all_books: "GET /api/books".to_string(),
            get_book_by_id: "GET /api/books/{id}".to_string(),
            create_book: "POST /api/books".to_string(),
            update_book: "PUT /api/books/{id}".to_string(),
            delete_book: "DELETE /api/books/{id}".to_string(),
        },
    })
}

/// Fallback for unknown routes under `/api`
pub async fn route_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Route not found"))).into_response()
}
