//! Genres collection on PostgreSQL

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Genre, NewGenre},
};

use super::{GenreFilter, GenreStore, PgStore};

#[async_trait]
impl GenreStore for PgStore {
    async fn find_genre_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(genre)
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let genre = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(genre)
    }

    async fn find_genres(&self, filter: GenreFilter) -> AppResult<Vec<Genre>> {
        let genres = match filter {
            GenreFilter::All => {
                sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
                    .fetch_all(&self.pool)
                    .await?
            }
            GenreFilter::ByIds(ids) => {
                sqlx::query_as::<_, Genre>(
                    "SELECT id, name FROM genres WHERE id = ANY($1) ORDER BY name",
                )
                .bind(ids)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(genres)
    }

    async fn count_genres(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_genre(&self, genre: NewGenre) -> AppResult<Genre> {
        let genre = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(&genre.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(genre)
    }

    async fn remove_genre_by_id(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
