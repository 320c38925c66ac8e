//! Author pages: list, detail, delete and creation

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, AuthorForm, Book},
    repository::{BookFilter, CatalogStore},
    validation::SubmittedForm,
};

use super::{
    aggregate::{fetch_related, Deletion, Related},
    DeleteOutcome, Submission,
};

/// An author and the books written by them
#[derive(Debug, Clone)]
pub struct AuthorWithBooks {
    pub author: Author,
    pub books: Vec<Book>,
}

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All authors, by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.find_authors().await
    }

    async fn with_books(&self, id: Uuid) -> AppResult<Related<Author, Book>> {
        fetch_related(
            self.store.find_author_by_id(id),
            self.store.find_books(BookFilter::ByAuthor(id)),
        )
        .await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorWithBooks> {
        let (author, books) = self.with_books(id).await?.into_detail("Author")?;
        Ok(AuthorWithBooks { author, books })
    }

    /// `None` when there is no such author
    pub async fn delete_confirmation(&self, id: Uuid) -> AppResult<Option<AuthorWithBooks>> {
        Ok(self
            .with_books(id)
            .await?
            .into_confirmation()
            .map(|(author, books)| AuthorWithBooks { author, books }))
    }

    /// Remove the author unless books still reference them.
    ///
    /// The check and the removal are two separate store calls; a book created
    /// in between is not seen.
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<AuthorWithBooks>> {
        match self.with_books(id).await?.into_deletion() {
            Deletion::Missing => Ok(DeleteOutcome::Missing),
            Deletion::Blocked { primary, dependents } => {
                tracing::debug!(
                    "Refusing to delete author {}: {} book(s) reference them",
                    id,
                    dependents.len()
                );
                Ok(DeleteOutcome::Blocked(AuthorWithBooks {
                    author: primary,
                    books: dependents,
                }))
            }
            Deletion::Clear(author) => {
                self.store.remove_author_by_id(author.id).await?;
                tracing::info!("Deleted author {} ({})", author.id, author.name());
                Ok(DeleteOutcome::Deleted)
            }
        }
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<Submission<Author, AuthorForm>> {
        let form = form.sanitized();
        let errors = form.violations();
        if !errors.is_empty() {
            return Ok(Submission::Rejected { form, errors });
        }

        let author = self.store.insert_author(form.to_new_author()).await?;
        tracing::info!("Created author {} ({})", author.id, author.name());
        Ok(Submission::Created(author))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::NewBook,
        repository::{AuthorStore, BookStore, MemoryStore},
    };

    fn service() -> (AuthorsService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (AuthorsService::new(store.clone()), store)
    }

    fn jane() -> AuthorForm {
        AuthorForm {
            first_name: "Jane".into(),
            family_name: "Austen".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_author_reads_back_with_derived_fields() {
        let (service, _) = service();
        let Submission::Created(created) = service.create(jane()).await.unwrap() else {
            panic!("author should be created");
        };
        let detail = service.detail(created.id).await.unwrap();
        assert_eq!(detail.author.name(), "Austen, Jane");
        assert_eq!(detail.author.lifespan(), None);
        assert!(detail.books.is_empty());
    }

    #[tokio::test]
    async fn rejected_form_stores_nothing() {
        let (service, store) = service();
        let form = AuthorForm {
            first_name: "J@ne".into(),
            ..jane()
        };
        let outcome = service.create(form).await.unwrap();
        assert!(matches!(outcome, Submission::Rejected { ref errors, .. } if errors[0].field == "first_name"));
        assert_eq!(store.count_authors().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_is_refused_while_books_exist() {
        let (service, store) = service();
        let Submission::Created(author) = service.create(jane()).await.unwrap() else {
            panic!("author should be created");
        };
        store
            .insert_book(NewBook {
                title: "Emma".into(),
                author: author.id,
                summary: "s".into(),
                isbn: "i".into(),
                genre: vec![],
            })
            .await
            .unwrap();

        let DeleteOutcome::Blocked(blocked) = service.delete(author.id).await.unwrap() else {
            panic!("delete should be blocked");
        };
        assert_eq!(blocked.books.len(), 1);
        assert!(store.find_author_by_id(author.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_of_unknown_author_is_missing() {
        let (service, _) = service();
        assert!(matches!(
            service.delete(Uuid::new_v4()).await.unwrap(),
            DeleteOutcome::Missing
        ));
        assert!(service.delete_confirmation(Uuid::new_v4()).await.unwrap().is_none());
    }
}
