//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookPayload},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books_list().await
    }

    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await
    }

    /// Validate the payload and store it as a new book
    pub async fn create_book(&self, payload: BookPayload) -> AppResult<Book> {
        let input = payload.into_input().map_err(AppError::Validation)?;
        let book = self.repository.books_create(&input).await?;
        tracing::info!(book_id = book.book_id, "Book created");
        Ok(book)
    }

    /// Replace a book's fields. Existence is checked before the payload is validated.
    pub async fn update_book(&self, id: i64, payload: BookPayload) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await?;
        let input = payload.into_input().map_err(AppError::Validation)?;
        let book = self.repository.books_update(id, &input).await?;
        tracing::info!(book_id = book.book_id, "Book updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books_delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    /// Readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
