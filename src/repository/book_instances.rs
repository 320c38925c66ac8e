//! Book instances collection on PostgreSQL

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BookInstance, NewBookInstance},
};

use super::{BookInstanceFilter, BookInstanceStore, PgStore};

#[async_trait]
impl BookInstanceStore for PgStore {
    async fn find_book_instance_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let instance = sqlx::query_as::<_, BookInstance>(
            "SELECT id, book, imprint, status, due_back FROM book_instances WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(instance)
    }

    async fn find_book_instances(&self, filter: BookInstanceFilter) -> AppResult<Vec<BookInstance>> {
        let instances = match filter {
            BookInstanceFilter::All => {
                sqlx::query_as::<_, BookInstance>(
                    "SELECT id, book, imprint, status, due_back FROM book_instances ORDER BY due_back, id",
                )
                .fetch_all(&self.pool)
                .await?
            }
            BookInstanceFilter::ByBook(book) => {
                sqlx::query_as::<_, BookInstance>(
                    r#"
                    SELECT id, book, imprint, status, due_back
                    FROM book_instances
                    WHERE book = $1
                    ORDER BY due_back, id
                    "#,
                )
                .bind(book)
                .fetch_all(&self.pool)
                .await?
            }
            BookInstanceFilter::ByStatus(status) => {
                sqlx::query_as::<_, BookInstance>(
                    r#"
                    SELECT id, book, imprint, status, due_back
                    FROM book_instances
                    WHERE status = $1
                    ORDER BY due_back, id
                    "#,
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(instances)
    }

    async fn count_book_instances(&self, filter: BookInstanceFilter) -> AppResult<i64> {
        let count: i64 = match filter {
            BookInstanceFilter::All => {
                sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
                    .fetch_one(&self.pool)
                    .await?
            }
            BookInstanceFilter::ByBook(book) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE book = $1")
                    .bind(book)
                    .fetch_one(&self.pool)
                    .await?
            }
            BookInstanceFilter::ByStatus(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                    .bind(status)
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    async fn insert_book_instance(&self, instance: NewBookInstance) -> AppResult<BookInstance> {
        let instance = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book, imprint, status, due_back
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(instance.book)
        .bind(&instance.imprint)
        .bind(instance.status)
        .bind(instance.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(instance)
    }

    async fn remove_book_instance_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
