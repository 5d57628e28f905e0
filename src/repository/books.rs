//! Book domain methods on Repository

use chrono::{TimeZone, Utc};
use validator::Validate;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book::{now_millis, Book, BookInput},
};

const BOOK_COLUMNS: &str = "book_id, name, author, price, published_date";

pub(crate) fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book with ID {} not found", id))
}

impl Repository {
    /// List all books in identifier order
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY book_id",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE book_id = ?1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))
    }

    pub async fn books_count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a book; a missing published date becomes the creation instant
    pub async fn books_create(&self, input: &BookInput) -> AppResult<Book> {
        input.validate()?;
        let published_date = input.published_date.unwrap_or_else(now_millis);

        let mut tx = self.pool.begin().await?;
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (name, author, price, published_date)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.author)
        .bind(input.price)
        .bind(published_date)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(book)
    }

    /// Overwrite the mutable fields of a book; a missing published date keeps the stored one
    pub async fn books_update(&self, id: i64, input: &BookInput) -> AppResult<Book> {
        input.validate()?;

        let mut tx = self.pool.begin().await?;
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET name = ?1, author = ?2, price = ?3,
                published_date = COALESCE(?4, published_date)
            WHERE book_id = ?5
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.author)
        .bind(input.price)
        .bind(input.published_date)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        Ok(book)
    }

    /// Delete a book
    pub async fn books_delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM books WHERE book_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        tx.commit().await?;
        Ok(())
    }

    /// Insert the demonstration books into an empty catalog
    pub async fn seed_demo_books(&self) -> AppResult<()> {
        if self.books_count().await? > 0 {
            return Ok(());
        }

        let samples = [
            ("JavaScript: The Good Parts", "Douglas Crockford", 29.99, (2008, 5, 1)),
            ("Clean Code", "Robert C. Martin", 39.99, (2008, 8, 1)),
        ];

        let mut tx = self.pool.begin().await?;
        for (name, author, price, (year, month, day)) in samples {
            let published_date = Utc
                .with_ymd_and_hms(year, month, day, 0, 0, 0)
                .single()
                .ok_or_else(|| AppError::Internal("invalid seed date".to_string()))?;
            sqlx::query(
                "INSERT INTO books (name, author, price, published_date) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(name)
            .bind(author)
            .bind(price)
            .bind(published_date)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::info!(count = samples.len(), "Seeded demo books");
        Ok(())
    }
}
