//! Error pages when the store fails

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mockall::mock;
use tower::ServiceExt;
use uuid::Uuid;

use catalog_server::{
    api,
    config::{AppConfig, RunEnvironment},
    models::{Author, Book, BookInstance, Genre, NewAuthor, NewBook, NewBookInstance, NewGenre},
    repository::{
        AuthorStore, BookFilter, BookInstanceFilter, BookInstanceStore, BookStore, CatalogStore,
        GenreFilter, GenreStore,
    },
    AppError, AppResult, AppState,
};

mock! {
    pub Store {}

    #[async_trait]
    impl AuthorStore for Store {
        async fn find_author_by_id(&self, id: Uuid) -> AppResult<Option<Author>>;
        async fn find_authors(&self) -> AppResult<Vec<Author>>;
        async fn count_authors(&self) -> AppResult<i64>;
        async fn insert_author(&self, author: NewAuthor) -> AppResult<Author>;
        async fn remove_author_by_id(&self, id: Uuid) -> AppResult<bool>;
    }

    #[async_trait]
    impl GenreStore for Store {
        async fn find_genre_by_id(&self, id: Uuid) -> AppResult<Option<Genre>>;
        async fn find_genre_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
        async fn find_genres(&self, filter: GenreFilter) -> AppResult<Vec<Genre>>;
        async fn count_genres(&self) -> AppResult<i64>;
        async fn insert_genre(&self, genre: NewGenre) -> AppResult<Genre>;
        async fn remove_genre_by_id(&self, id: Uuid) -> AppResult<bool>;
    }

    #[async_trait]
    impl BookStore for Store {
        async fn find_book_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;
        async fn find_books(&self, filter: BookFilter) -> AppResult<Vec<Book>>;
        async fn count_books(&self, filter: BookFilter) -> AppResult<i64>;
        async fn insert_book(&self, book: NewBook) -> AppResult<Book>;
        async fn remove_book_by_id(&self, id: Uuid) -> AppResult<bool>;
    }

    #[async_trait]
    impl BookInstanceStore for Store {
        async fn find_book_instance_by_id(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
        async fn find_book_instances(&self, filter: BookInstanceFilter) -> AppResult<Vec<BookInstance>>;
        async fn count_book_instances(&self, filter: BookInstanceFilter) -> AppResult<i64>;
        async fn insert_book_instance(&self, instance: NewBookInstance) -> AppResult<BookInstance>;
        async fn remove_book_instance_by_id(&self, id: Uuid) -> AppResult<bool>;
    }

    #[async_trait]
    impl CatalogStore for Store {
        async fn close(&self);
    }
}

fn unavailable() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

fn app(store: MockStore, environment: RunEnvironment) -> Router {
    let mut config = AppConfig::default();
    config.server.environment = environment;
    api::router(AppState::new(config, Arc::new(store)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn failing_author_list() -> MockStore {
    let mut store = MockStore::new();
    store.expect_find_authors().returning(|| Err(unavailable()));
    store
}

#[tokio::test]
async fn test_store_failure_shows_detail_in_development() {
    let app = app(failing_author_list(), RunEnvironment::Development);
    let (status, body) = get(app, "/catalog/authors").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Internal Server Error"));
    assert!(body.contains("pool timed out"));
}

#[tokio::test]
async fn test_store_failure_hides_detail_in_production() {
    let app = app(failing_author_list(), RunEnvironment::Production);
    let (status, body) = get(app, "/catalog/authors").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Internal Server Error"));
    assert!(!body.contains("pool timed out"));
}

#[tokio::test]
async fn test_failed_dependent_read_fails_the_detail_page() {
    let mut store = MockStore::new();
    store.expect_find_author_by_id().returning(|id| {
        Ok(Some(Author {
            id,
            first_name: "Jane".into(),
            family_name: "Austen".into(),
            date_of_birth: None,
            date_of_death: None,
        }))
    });
    store.expect_find_books().returning(|_| Err(unavailable()));

    let (status, body) = get(
        app(store, RunEnvironment::Production),
        &format!("/catalog/author/{}", Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("Austen"));
}

#[tokio::test]
async fn test_home_page_reports_failed_counts() {
    let mut store = MockStore::new();
    store.expect_count_books().returning(|_| Ok(3));
    store.expect_count_book_instances().returning(|_| Ok(5));
    store.expect_count_authors().returning(|| Err(unavailable()));
    store.expect_count_genres().returning(|| Ok(4));

    let (status, body) = get(app(store, RunEnvironment::Development), "/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Unable to load the catalog counts."));
    assert!(!body.contains(r#"id="book_count""#));
}
