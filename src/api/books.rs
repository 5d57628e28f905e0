//! Book (catalog) endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Book, BookPayload},
    AppState,
};

use super::BookId;

/// Envelope for the book listing
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    pub success: bool,
    /// Number of books in `data`
    pub count: usize,
    pub data: Vec<Book>,
}

/// Envelope for a single book
#[derive(Debug, Serialize, ToSchema)]
pub struct BookResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Book,
}

/// Envelope carrying only a message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Unreadable JSON is treated as an empty payload so it fails validation
fn into_payload(body: Result<Json<Value>, JsonRejection>) -> BookPayload {
    match body {
        Ok(Json(value)) => BookPayload::from_json(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Unreadable book payload");
            BookPayload::default()
        }
    }
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = BookListResponse),
        (status = 500, description = "Datastore failure", body = ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<BookListResponse>> {
    let books = state
        .services
        .catalog
        .list_books()
        .await
        .map_err(|e| e.masked("Failed to retrieve books"))?;

    Ok(Json(BookListResponse {
        success: true,
        count: books.len(),
        data: books,
    }))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookResponse),
        (status = 400, description = "Invalid book ID", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Json<BookResponse>> {
    let book = state
        .services
        .catalog
        .get_book(id)
        .await
        .map_err(|e| e.masked("Failed to retrieve book"))?;

    Ok(Json(BookResponse {
        success: true,
        message: None,
        data: book,
    }))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state
        .services
        .catalog
        .create_book(into_payload(body))
        .await
        .map_err(|e| e.masked("Failed to create book"))?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            success: true,
            message: Some("Book created successfully".to_string()),
            data: book,
        }),
    ))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<BookResponse>> {
    let book = state
        .services
        .catalog
        .update_book(id, into_payload(body))
        .await
        .map_err(|e| e.masked("Failed to update book"))?;

    Ok(Json(BookResponse {
        success: true,
        message: Some("Book updated successfully".to_string()),
        data: book,
    }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .catalog
        .delete_book(id)
        .await
        .map_err(|e| e.masked("Failed to delete book"))?;

    Ok(Json(MessageResponse {
        success: true,
        message: format!("Book with ID {} deleted successfully", id),
    }))
}
