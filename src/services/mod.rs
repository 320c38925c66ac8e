//! Business logic services

pub mod aggregate;
pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use std::sync::Arc;

use crate::{repository::CatalogStore, validation::FieldError};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services over the same store handle
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            authors: authors::AuthorsService::new(store.clone()),
            genres: genres::GenresService::new(store.clone()),
            books: books::BooksService::new(store.clone()),
            book_instances: book_instances::BookInstancesService::new(store),
        }
    }
}

/// Outcome of a creation form submission
#[derive(Debug)]
pub enum Submission<T, F> {
    /// A new document was stored
    Created(T),
    /// Rules were violated; `form` holds the sanitized values
    Rejected { form: F, errors: Vec<FieldError> },
}

/// Outcome of a delete request
#[derive(Debug)]
pub enum DeleteOutcome<T> {
    Deleted,
    /// Nothing with that id
    Missing,
    /// Dependents exist; `T` carries everything the confirmation page lists
    Blocked(T),
}
