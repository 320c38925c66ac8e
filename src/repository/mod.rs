//! Repository layer: the document-store capability behind every service.
//!
//! Each collection has its own trait; `CatalogStore` ties them together and is
//! what services hold (`Arc<dyn CatalogStore>`). Two backends implement it:
//! [`PgStore`] on PostgreSQL and [`MemoryStore`] in process memory.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, Book, BookInstance, BookStatus, Genre, NewAuthor, NewBook, NewBookInstance,
        NewGenre,
    },
};

pub use memory::MemoryStore;

/// Book selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookFilter {
    All,
    ByAuthor(Uuid),
    ByGenre(Uuid),
    ByIds(Vec<Uuid>),
}

/// Genre selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreFilter {
    All,
    ByIds(Vec<Uuid>),
}

/// Book instance selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookInstanceFilter {
    All,
    ByBook(Uuid),
    ByStatus(BookStatus),
}

#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn find_author_by_id(&self, id: Uuid) -> AppResult<Option<Author>>;
    /// All authors, sorted by family name then first name
    async fn find_authors(&self) -> AppResult<Vec<Author>>;
    async fn count_authors(&self) -> AppResult<i64>;
    async fn insert_author(&self, author: NewAuthor) -> AppResult<Author>;
    /// Returns whether a document was removed
    async fn remove_author_by_id(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait GenreStore: Send + Sync {
    async fn find_genre_by_id(&self, id: Uuid) -> AppResult<Option<Genre>>;
    /// Exact, case-sensitive match on the stored name
    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    /// Matching genres, sorted by name
    async fn find_genres(&self, filter: GenreFilter) -> AppResult<Vec<Genre>>;
    async fn count_genres(&self) -> AppResult<i64>;
    async fn insert_genre(&self, genre: NewGenre) -> AppResult<Genre>;
    async fn remove_genre_by_id(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_book_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;
    /// Matching books, sorted by title
    async fn find_books(&self, filter: BookFilter) -> AppResult<Vec<Book>>;
    async fn count_books(&self, filter: BookFilter) -> AppResult<i64>;
    async fn insert_book(&self, book: NewBook) -> AppResult<Book>;
    async fn remove_book_by_id(&self, id: Uuid) -> AppResult<bool>;
}

#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    async fn find_book_instance_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    /// Matching copies, sorted by due date
    async fn find_book_instances(&self, filter: BookInstanceFilter) -> AppResult<Vec<BookInstance>>;
    async fn count_book_instances(&self, filter: BookInstanceFilter) -> AppResult<i64>;
    async fn insert_book_instance(&self, instance: NewBookInstance) -> AppResult<BookInstance>;
    async fn remove_book_instance_by_id(&self, id: Uuid) -> AppResult<bool>;
}

/// The whole catalog: every collection plus the handle's lifecycle.
#[async_trait]
pub trait CatalogStore: AuthorStore + GenreStore + BookStore + BookInstanceStore {
    /// Release the underlying connections. Called once at shutdown.
    async fn close(&self) {}
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create or upgrade the catalog schema
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn close(&self) {
        self.pool.close().await;
    }
}
