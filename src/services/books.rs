//! Book pages: list, detail, delete, creation and the form's option lists

use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookDetail, BookForm, BookInstance, BookListEntry, Genre},
    repository::{BookFilter, BookInstanceFilter, CatalogStore, GenreFilter},
    validation::{FieldError, SubmittedForm},
};

use super::{
    aggregate::{fetch_pair, fetch_related, Deletion, Related},
    DeleteOutcome, Submission,
};

/// A book and its copies
#[derive(Debug, Clone)]
pub struct BookWithInstances {
    pub book: BookDetail,
    pub instances: Vec<BookInstance>,
}

/// Everything the book form offers to pick from
#[derive(Debug, Clone, Default)]
pub struct BookFormOptions {
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn CatalogStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Every book with its author, by title
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let (books, authors) =
            fetch_pair(self.store.find_books(BookFilter::All), self.store.find_authors()).await?;

        let authors: HashMap<Uuid, Author> = authors.into_iter().map(|a| (a.id, a)).collect();
        Ok(books
            .into_iter()
            .map(|book| BookListEntry {
                author: authors.get(&book.author).cloned(),
                book,
            })
            .collect())
    }

    async fn with_instances(&self, id: Uuid) -> AppResult<Related<Book, BookInstance>> {
        fetch_related(
            self.store.find_book_by_id(id),
            self.store.find_book_instances(BookInstanceFilter::ByBook(id)),
        )
        .await
    }

    /// Resolve the author and genre references of a book.
    async fn populate(&self, book: Book) -> AppResult<BookDetail> {
        let (author, genres) = fetch_pair(
            self.store.find_author_by_id(book.author),
            self.store.find_genres(GenreFilter::ByIds(book.genre.clone())),
        )
        .await?;
        Ok(BookDetail {
            book,
            author,
            genres,
        })
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookWithInstances> {
        let (book, instances) = self.with_instances(id).await?.into_detail("Book")?;
        Ok(BookWithInstances {
            book: self.populate(book).await?,
            instances,
        })
    }

    pub async fn delete_confirmation(&self, id: Uuid) -> AppResult<Option<BookWithInstances>> {
        match self.with_instances(id).await?.into_confirmation() {
            Some((book, instances)) => Ok(Some(BookWithInstances {
                book: self.populate(book).await?,
                instances,
            })),
            None => Ok(None),
        }
    }

    /// Remove the book unless copies of it still exist.
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookWithInstances>> {
        match self.with_instances(id).await?.into_deletion() {
            Deletion::Missing => Ok(DeleteOutcome::Missing),
            Deletion::Blocked { primary, dependents } => {
                tracing::debug!(
                    "Refusing to delete book {}: {} copy(ies) exist",
                    id,
                    dependents.len()
                );
                Ok(DeleteOutcome::Blocked(BookWithInstances {
                    book: self.populate(primary).await?,
                    instances: dependents,
                }))
            }
            Deletion::Clear(book) => {
                self.store.remove_book_by_id(book.id).await?;
                tracing::info!("Deleted book {} ({})", book.id, book.title);
                Ok(DeleteOutcome::Deleted)
            }
        }
    }

    pub async fn form_options(&self) -> AppResult<BookFormOptions> {
        let (authors, genres) = fetch_pair(
            self.store.find_authors(),
            self.store.find_genres(GenreFilter::All),
        )
        .await?;
        Ok(BookFormOptions { authors, genres })
    }

    /// The author and genre ids are trusted once well-formed: they are not
    /// looked up before the book is stored.
    pub async fn create(&self, form: BookForm) -> AppResult<Submission<Book, BookForm>> {
        let form = form.sanitized();
        let mut errors = form.violations();
        let new_book = match form.to_new_book() {
            Some(new_book) if errors.is_empty() => new_book,
            None if errors.is_empty() => {
                errors.push(FieldError {
                    field: "author",
                    message: "Author must be selected from the list.".to_string(),
                });
                return Ok(Submission::Rejected { form, errors });
            }
            _ => return Ok(Submission::Rejected { form, errors }),
        };

        let book = self.store.insert_book(new_book).await?;
        tracing::info!("Created book {} ({})", book.id, book.title);
        Ok(Submission::Created(book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{NewAuthor, NewBookInstance, NewGenre},
        repository::{AuthorStore, BookInstanceStore, BookStore, GenreStore, MemoryStore},
    };

    async fn seeded() -> (BooksService, Arc<MemoryStore>, Author, Genre) {
        let store = Arc::new(MemoryStore::new());
        let author = store
            .insert_author(NewAuthor {
                first_name: "Patrick".into(),
                family_name: "Rothfuss".into(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap();
        let genre = store.insert_genre(NewGenre { name: "Fantasy".into() }).await.unwrap();
        (BooksService::new(store.clone()), store, author, genre)
    }

    fn form(author: &Author, genres: &[&Genre]) -> BookForm {
        BookForm {
            title: "The Name of the Wind".into(),
            author: author.id.to_string(),
            summary: "Kvothe tells his story.".into(),
            isbn: "9780756404079".into(),
            genre: genres.iter().map(|g| g.id.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn detail_resolves_author_and_genres() {
        let (service, store, author, genre) = seeded().await;
        let Submission::Created(book) = service.create(form(&author, &[&genre])).await.unwrap() else {
            panic!("book should be created");
        };
        store
            .insert_book_instance(NewBookInstance {
                book: book.id,
                imprint: "DAW, 2007".into(),
                status: Default::default(),
                due_back: chrono::Utc::now().date_naive(),
            })
            .await
            .unwrap();

        let detail = service.detail(book.id).await.unwrap();
        assert_eq!(detail.book.author.as_ref().map(Author::name).as_deref(), Some("Rothfuss, Patrick"));
        assert_eq!(detail.book.genres, vec![genre]);
        assert_eq!(detail.instances.len(), 1);
    }

    #[tokio::test]
    async fn list_pairs_books_with_authors() {
        let (service, _, author, _) = seeded().await;
        service.create(form(&author, &[])).await.unwrap();
        let entries = service.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].author.as_ref().map(|a| a.id), Some(author.id));
    }

    #[tokio::test]
    async fn empty_title_is_rejected_without_storing() {
        let (service, store, author, _) = seeded().await;
        let outcome = service
            .create(BookForm { title: String::new(), ..form(&author, &[]) })
            .await
            .unwrap();
        let Submission::Rejected { errors, .. } = outcome else {
            panic!("form should be rejected");
        };
        assert_eq!(errors[0].field, "title");
        assert_eq!(store.count_books(BookFilter::All).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn book_with_copies_cannot_be_deleted() {
        let (service, store, author, _) = seeded().await;
        let Submission::Created(book) = service.create(form(&author, &[])).await.unwrap() else {
            panic!("book should be created");
        };
        store
            .insert_book_instance(NewBookInstance {
                book: book.id,
                imprint: "DAW".into(),
                status: Default::default(),
                due_back: chrono::Utc::now().date_naive(),
            })
            .await
            .unwrap();

        assert!(matches!(service.delete(book.id).await.unwrap(), DeleteOutcome::Blocked(_)));
        assert!(store.find_book_by_id(book.id).await.unwrap().is_some());
    }
}
