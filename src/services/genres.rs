//! Genre pages: list, detail, delete and de-duplicating creation

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, Genre, GenreForm},
    repository::{BookFilter, CatalogStore, GenreFilter},
    validation::{FieldError, SubmittedForm},
};

use super::{
    aggregate::{fetch_related, Deletion, Related},
    DeleteOutcome,
};

/// A genre and the books filed under it
#[derive(Debug, Clone)]
pub struct GenreWithBooks {
    pub genre: Genre,
    pub books: Vec<Book>,
}

/// Outcome of a genre form submission
#[derive(Debug)]
pub enum GenreSubmission {
    Created(Genre),
    /// A genre with this exact name already existed; nothing was stored
    Existing(Genre),
    Rejected { form: GenreForm, errors: Vec<FieldError> },
}

#[derive(Clone)]
pub struct GenresService {
    store: Arc<dyn CatalogStore>,
}

impl GenresService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All genres, by name
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.store.find_genres(GenreFilter::All).await
    }

    async fn with_books(&self, id: Uuid) -> AppResult<Related<Genre, Book>> {
        fetch_related(
            self.store.find_genre_by_id(id),
            self.store.find_books(BookFilter::ByGenre(id)),
        )
        .await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<GenreWithBooks> {
        let (genre, books) = self.with_books(id).await?.into_detail("Genre")?;
        Ok(GenreWithBooks { genre, books })
    }

    pub async fn delete_confirmation(&self, id: Uuid) -> AppResult<Option<GenreWithBooks>> {
        Ok(self
            .with_books(id)
            .await?
            .into_confirmation()
            .map(|(genre, books)| GenreWithBooks { genre, books }))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<GenreWithBooks>> {
        match self.with_books(id).await?.into_deletion() {
            Deletion::Missing => Ok(DeleteOutcome::Missing),
            Deletion::Blocked { primary, dependents } => {
                tracing::debug!(
                    "Refusing to delete genre {}: {} book(s) use it",
                    id,
                    dependents.len()
                );
                Ok(DeleteOutcome::Blocked(GenreWithBooks {
                    genre: primary,
                    books: dependents,
                }))
            }
            Deletion::Clear(genre) => {
                self.store.remove_genre_by_id(genre.id).await?;
                tracing::info!("Deleted genre {} ({})", genre.id, genre.name);
                Ok(DeleteOutcome::Deleted)
            }
        }
    }

    /// Create a genre, or return the one that already has this exact name.
    ///
    /// Look-up then insert: two concurrent submissions of a new name can both
    /// miss the look-up and store two genres. There is no unique constraint
    /// behind this.
    pub async fn create(&self, form: GenreForm) -> AppResult<GenreSubmission> {
        let form = form.sanitized();
        let errors = form.violations();
        if !errors.is_empty() {
            return Ok(GenreSubmission::Rejected { form, errors });
        }

        if let Some(existing) = self.store.find_genre_by_name(&form.name).await? {
            tracing::info!("Genre '{}' already exists as {}", existing.name, existing.id);
            return Ok(GenreSubmission::Existing(existing));
        }

        let genre = self.store.insert_genre(form.to_new_genre()).await?;
        tracing::info!("Created genre {} ({})", genre.id, genre.name);
        Ok(GenreSubmission::Created(genre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{GenreStore, MemoryStore};

    #[tokio::test]
    async fn duplicate_name_returns_the_existing_genre() {
        let store = Arc::new(MemoryStore::new());
        let service = GenresService::new(store.clone());

        let GenreSubmission::Created(first) = service
            .create(GenreForm { name: "Fantasy".into() })
            .await
            .unwrap()
        else {
            panic!("genre should be created");
        };
        let GenreSubmission::Existing(again) = service
            .create(GenreForm { name: "  Fantasy ".into() })
            .await
            .unwrap()
        else {
            panic!("existing genre should be returned");
        };

        assert_eq!(again.id, first.id);
        assert_eq!(store.count_genres().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unused_genre_is_deleted() {
        let store = Arc::new(MemoryStore::new());
        let service = GenresService::new(store.clone());
        let GenreSubmission::Created(genre) = service
            .create(GenreForm { name: "Poetry".into() })
            .await
            .unwrap()
        else {
            panic!("genre should be created");
        };

        assert!(matches!(service.delete(genre.id).await.unwrap(), DeleteOutcome::Deleted));
        assert!(store.find_genre_by_id(genre.id).await.unwrap().is_none());
    }
}
