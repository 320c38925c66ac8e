//! In-process store, used by the test-suite and `database.in_memory`.
//!
//! Collections live behind one async `RwLock`; every operation takes the lock
//! for its own duration only, so a read-then-write sequence in a service is
//! no more atomic here than it is on PostgreSQL.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, Book, BookInstance, Genre, NewAuthor, NewBook, NewBookInstance, NewGenre,
    },
};

use super::{
    AuthorStore, BookFilter, BookInstanceFilter, BookInstanceStore, BookStore, CatalogStore,
    GenreFilter, GenreStore,
};

#[derive(Default)]
struct Collections {
    authors: IndexMap<Uuid, Author>,
    genres: IndexMap<Uuid, Genre>,
    books: IndexMap<Uuid, Book>,
    book_instances: IndexMap<Uuid, BookInstance>,
}

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn book_matches(book: &Book, filter: &BookFilter) -> bool {
    match filter {
        BookFilter::All => true,
        BookFilter::ByAuthor(author) => book.author == *author,
        BookFilter::ByGenre(genre) => book.genre.contains(genre),
        BookFilter::ByIds(ids) => ids.contains(&book.id),
    }
}

fn instance_matches(instance: &BookInstance, filter: &BookInstanceFilter) -> bool {
    match filter {
        BookInstanceFilter::All => true,
        BookInstanceFilter::ByBook(book) => instance.book == *book,
        BookInstanceFilter::ByStatus(status) => instance.status == *status,
    }
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn find_author_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.collections.read().await.authors.get(&id).cloned())
    }

    async fn find_authors(&self) -> AppResult<Vec<Author>> {
        let mut authors: Vec<Author> =
            self.collections.read().await.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            (a.family_name.as_str(), a.first_name.as_str())
                .cmp(&(b.family_name.as_str(), b.first_name.as_str()))
        });
        Ok(authors)
    }

    async fn count_authors(&self) -> AppResult<i64> {
        Ok(self.collections.read().await.authors.len() as i64)
    }

    async fn insert_author(&self, author: NewAuthor) -> AppResult<Author> {
        let author = author.into_author(Uuid::new_v4());
        self.collections
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn remove_author_by_id(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.collections.write().await.authors.shift_remove(&id).is_some())
    }
}

#[async_trait]
impl GenreStore for MemoryStore {
    async fn find_genre_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.collections.read().await.genres.get(&id).cloned())
    }

    async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        Ok(self
            .collections
            .read()
            .await
            .genres
            .values()
            .find(|g| g.name == name)
            .cloned())
    }

    async fn find_genres(&self, filter: GenreFilter) -> AppResult<Vec<Genre>> {
        let collections = self.collections.read().await;
        let mut genres: Vec<Genre> = collections
            .genres
            .values()
            .filter(|g| match &filter {
                GenreFilter::All => true,
                GenreFilter::ByIds(ids) => ids.contains(&g.id),
            })
            .cloned()
            .collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn count_genres(&self) -> AppResult<i64> {
        Ok(self.collections.read().await.genres.len() as i64)
    }

    async fn insert_genre(&self, genre: NewGenre) -> AppResult<Genre> {
        let genre = genre.into_genre(Uuid::new_v4());
        self.collections
            .write()
            .await
            .genres
            .insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn remove_genre_by_id(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.collections.write().await.genres.shift_remove(&id).is_some())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn find_book_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.collections.read().await.books.get(&id).cloned())
    }

    async fn find_books(&self, filter: BookFilter) -> AppResult<Vec<Book>> {
        let collections = self.collections.read().await;
        let mut books: Vec<Book> = collections
            .books
            .values()
            .filter(|b| book_matches(b, &filter))
            .cloned()
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn count_books(&self, filter: BookFilter) -> AppResult<i64> {
        let collections = self.collections.read().await;
        Ok(collections
            .books
            .values()
            .filter(|b| book_matches(b, &filter))
            .count() as i64)
    }

    async fn insert_book(&self, book: NewBook) -> AppResult<Book> {
        let book = book.into_book(Uuid::new_v4());
        self.collections
            .write()
            .await
            .books
            .insert(book.id, book.clone());
        Ok(book)
    }

    async fn remove_book_by_id(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.collections.write().await.books.shift_remove(&id).is_some())
    }
}

#[async_trait]
impl BookInstanceStore for MemoryStore {
    async fn find_book_instance_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.collections.read().await.book_instances.get(&id).cloned())
    }

    async fn find_book_instances(&self, filter: BookInstanceFilter) -> AppResult<Vec<BookInstance>> {
        let collections = self.collections.read().await;
        let mut instances: Vec<BookInstance> = collections
            .book_instances
            .values()
            .filter(|i| instance_matches(i, &filter))
            .cloned()
            .collect();
        instances.sort_by_key(|i| i.due_back);
        Ok(instances)
    }

    async fn count_book_instances(&self, filter: BookInstanceFilter) -> AppResult<i64> {
        let collections = self.collections.read().await;
        Ok(collections
            .book_instances
            .values()
            .filter(|i| instance_matches(i, &filter))
            .count() as i64)
    }

    async fn insert_book_instance(&self, instance: NewBookInstance) -> AppResult<BookInstance> {
        let instance = instance.into_book_instance(Uuid::new_v4());
        self.collections
            .write()
            .await
            .book_instances
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn remove_book_instance_by_id(&self, id: Uuid) -> AppResult<bool> {
        Ok(self
            .collections
            .write()
            .await
            .book_instances
            .shift_remove(&id)
            .is_some())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {}
