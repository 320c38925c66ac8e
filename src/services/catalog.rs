//! Catalog home: collection counts

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::BookStatus,
    repository::{BookFilter, BookInstanceFilter, CatalogStore},
};

use super::aggregate::{Bundle, FetchSet};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Count every collection at once.
    ///
    /// Keys: `book_count`, `book_instance_count`,
    /// `book_instance_available_count`, `author_count`, `genre_count`.
    pub async fn summary(&self) -> AppResult<Bundle<i64>> {
        let store = self.store.as_ref();
        FetchSet::<i64, AppError>::new()
            .fetch("book_count", store.count_books(BookFilter::All))
            .fetch("book_instance_count", store.count_book_instances(BookInstanceFilter::All))
            .fetch(
                "book_instance_available_count",
                store.count_book_instances(BookInstanceFilter::ByStatus(BookStatus::Available)),
            )
            .fetch("author_count", store.count_authors())
            .fetch("genre_count", store.count_genres())
            .join()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::{
        models::{NewAuthor, NewBook, NewBookInstance, NewGenre},
        repository::{AuthorStore, BookInstanceStore, BookStore, GenreStore, MemoryStore},
    };

    async fn stocked() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        let mut authors = Vec::new();
        for (first_name, family_name) in [("Patrick", "Rothfuss"), ("Ben", "Bova")] {
            let author = store
                .insert_author(NewAuthor {
                    first_name: first_name.into(),
                    family_name: family_name.into(),
                    date_of_birth: None,
                    date_of_death: None,
                })
                .await
                .unwrap();
            authors.push(author.id);
        }
        for name in ["Fantasy", "Science Fiction", "French Poetry", "Military History"] {
            store.insert_genre(NewGenre { name: name.into() }).await.unwrap();
        }

        let mut books = Vec::new();
        for (title, author) in [
            ("The Name of the Wind", authors[0]),
            ("The Wise Man's Fear", authors[0]),
            ("Apes and Angels", authors[1]),
        ] {
            let book = store
                .insert_book(NewBook {
                    title: title.into(),
                    author,
                    summary: "Summary.".into(),
                    isbn: "9781473211896".into(),
                    genre: vec![],
                })
                .await
                .unwrap();
            books.push(book.id);
        }

        let due_back = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        for (book, status) in [
            (books[0], BookStatus::Available),
            (books[0], BookStatus::Loaned),
            (books[1], BookStatus::Available),
            (books[1], BookStatus::Maintenance),
            (books[2], BookStatus::Reserved),
        ] {
            store
                .insert_book_instance(NewBookInstance {
                    book,
                    imprint: "Gollancz".into(),
                    status,
                    due_back,
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn summary_counts_every_collection() {
        let service = CatalogService::new(stocked().await);
        let summary = service.summary().await.unwrap();

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "book_count": 3,
                "book_instance_count": 5,
                "book_instance_available_count": 2,
                "author_count": 2,
                "genre_count": 4,
            })
        );
        let keys: Vec<_> = summary.iter().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            [
                "book_count",
                "book_instance_count",
                "book_instance_available_count",
                "author_count",
                "genre_count",
            ]
        );
    }

    #[tokio::test]
    async fn empty_catalog_counts_zero() {
        let service = CatalogService::new(Arc::new(MemoryStore::new()));
        let summary = service.summary().await.unwrap();
        assert!(summary.iter().all(|(_, count)| *count == 0));
        assert_eq!(summary.get("genre_count"), Some(&0));
    }
}
