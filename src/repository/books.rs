//! Books collection on PostgreSQL.
//!
//! A book's genres are kept on the row as a `UUID[]`, the same shape the
//! document has in memory.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

use super::{BookFilter, BookStore, PgStore};

const BOOK_COLUMNS: &str = "id, title, author, summary, isbn, genre";

#[async_trait]
impl BookStore for PgStore {
    async fn find_book_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn find_books(&self, filter: BookFilter) -> AppResult<Vec<Book>> {
        let books = match filter {
            BookFilter::All => {
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {} FROM books ORDER BY title",
                    BOOK_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await?
            }
            BookFilter::ByAuthor(author) => {
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {} FROM books WHERE author = $1 ORDER BY title",
                    BOOK_COLUMNS
                ))
                .bind(author)
                .fetch_all(&self.pool)
                .await?
            }
            BookFilter::ByGenre(genre) => {
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {} FROM books WHERE $1 = ANY(genre) ORDER BY title",
                    BOOK_COLUMNS
                ))
                .bind(genre)
                .fetch_all(&self.pool)
                .await?
            }
            BookFilter::ByIds(ids) => {
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {} FROM books WHERE id = ANY($1) ORDER BY title",
                    BOOK_COLUMNS
                ))
                .bind(ids)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(books)
    }

    async fn count_books(&self, filter: BookFilter) -> AppResult<i64> {
        let count: i64 = match filter {
            BookFilter::All => {
                sqlx::query_scalar("SELECT COUNT(*) FROM books")
                    .fetch_one(&self.pool)
                    .await?
            }
            BookFilter::ByAuthor(author) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author = $1")
                    .bind(author)
                    .fetch_one(&self.pool)
                    .await?
            }
            BookFilter::ByGenre(genre) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE $1 = ANY(genre)")
                    .bind(genre)
                    .fetch_one(&self.pool)
                    .await?
            }
            BookFilter::ByIds(ids) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE id = ANY($1)")
                    .bind(ids)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    async fn insert_book(&self, book: NewBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (id, title, author, summary, isbn, genre)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&book.title)
        .bind(book.author)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(&book.genre)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn remove_book_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
