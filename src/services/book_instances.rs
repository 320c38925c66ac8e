//! Book instance pages: list, detail, delete and creation

use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInstance, BookInstanceEntry, BookInstanceForm},
    repository::{BookFilter, BookInstanceFilter, CatalogStore},
    validation::SubmittedForm,
};

use super::{aggregate::fetch_pair, Submission};

/// Outcome of a copy delete request. Copies have no dependents, so nothing
/// can block the removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceDeletion {
    Deleted,
    /// Nothing with that id
    Missing,
}

#[derive(Clone)]
pub struct BookInstancesService {
    store: Arc<dyn CatalogStore>,
}

impl BookInstancesService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Every copy with the title of its book
    pub async fn list(&self) -> AppResult<Vec<BookInstanceEntry>> {
        let (instances, books) = fetch_pair(
            self.store.find_book_instances(BookInstanceFilter::All),
            self.store.find_books(BookFilter::All),
        )
        .await?;

        let books: HashMap<Uuid, Book> = books.into_iter().map(|b| (b.id, b)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| BookInstanceEntry {
                book: books.get(&instance.book).cloned(),
                instance,
            })
            .collect())
    }

    async fn entry(&self, instance: BookInstance) -> AppResult<BookInstanceEntry> {
        let book = self.store.find_book_by_id(instance.book).await?;
        Ok(BookInstanceEntry { instance, book })
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceEntry> {
        let instance = self
            .store
            .find_book_instance_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy".to_string()))?;
        self.entry(instance).await
    }

    pub async fn delete_confirmation(&self, id: Uuid) -> AppResult<Option<BookInstanceEntry>> {
        match self.store.find_book_instance_by_id(id).await? {
            Some(instance) => Ok(Some(self.entry(instance).await?)),
            None => Ok(None),
        }
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<InstanceDeletion> {
        if self.store.remove_book_instance_by_id(id).await? {
            tracing::info!("Deleted book instance {}", id);
            Ok(InstanceDeletion::Deleted)
        } else {
            Ok(InstanceDeletion::Missing)
        }
    }

    /// Books offered by the creation form, by title
    pub async fn form_options(&self) -> AppResult<Vec<Book>> {
        self.store.find_books(BookFilter::All).await
    }

    pub async fn create(
        &self,
        form: BookInstanceForm,
    ) -> AppResult<Submission<BookInstance, BookInstanceForm>> {
        let form = form.sanitized();
        let errors = form.violations();
        let new_instance = match form.to_new_book_instance() {
            Some(new_instance) if errors.is_empty() => new_instance,
            _ => return Ok(Submission::Rejected { form, errors }),
        };

        let instance = self.store.insert_book_instance(new_instance).await?;
        tracing::info!("Created book instance {} of book {}", instance.id, instance.book);
        Ok(Submission::Created(instance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{BookStatus, NewBook},
        repository::{BookInstanceStore, BookStore, MemoryStore},
    };

    async fn seeded() -> (BookInstancesService, Arc<MemoryStore>, Book) {
        let store = Arc::new(MemoryStore::new());
        let book = store
            .insert_book(NewBook {
                title: "The Wise Man's Fear".into(),
                author: Uuid::new_v4(),
                summary: "Day two.".into(),
                isbn: "9788401352836".into(),
                genre: vec![],
            })
            .await
            .unwrap();
        (BookInstancesService::new(store.clone()), store, book)
    }

    #[tokio::test]
    async fn created_copy_gets_defaults_and_its_book() {
        let (service, _, book) = seeded().await;
        let outcome = service
            .create(BookInstanceForm {
                book: book.id.to_string(),
                imprint: "Gollancz, 2011".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let Submission::Created(instance) = outcome else {
            panic!("copy should be created");
        };
        assert_eq!(instance.status, BookStatus::Maintenance);

        let entry = service.detail(instance.id).await.unwrap();
        assert_eq!(entry.book.map(|b| b.id), Some(book.id));
    }

    #[tokio::test]
    async fn missing_copy_is_not_found() {
        let (service, _, _) = seeded().await;
        assert!(matches!(
            service.detail(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(
            service.delete(Uuid::new_v4()).await.unwrap(),
            InstanceDeletion::Missing
        );
    }

    #[tokio::test]
    async fn invalid_status_is_rejected() {
        let (service, store, book) = seeded().await;
        let outcome = service
            .create(BookInstanceForm {
                book: book.id.to_string(),
                imprint: "Gollancz".into(),
                status: "Lost".into(),
                due_back: String::new(),
            })
            .await
            .unwrap();
        assert!(matches!(outcome, Submission::Rejected { ref errors, .. } if errors[0].field == "status"));
        assert_eq!(
            store.count_book_instances(BookInstanceFilter::All).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn copy_is_deleted() {
        let (service, store, book) = seeded().await;
        let Submission::Created(instance) = service
            .create(BookInstanceForm {
                book: book.id.to_string(),
                imprint: "Gollancz".into(),
                status: "Available".into(),
                due_back: "2024-03-01".into(),
            })
            .await
            .unwrap()
        else {
            panic!("copy should be created");
        };

        assert_eq!(service.delete(instance.id).await.unwrap(), InstanceDeletion::Deleted);
        assert!(store.find_book_instance_by_id(instance.id).await.unwrap().is_none());
    }
}
