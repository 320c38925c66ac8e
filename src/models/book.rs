//! Book model and related read models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, SubmittedForm};

use super::{Author, Genre};

/// Book document as stored. `author` and `genre` hold references only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book list row with its author resolved
#[derive(Debug, Clone)]
pub struct BookListEntry {
    pub book: Book,
    pub author: Option<Author>,
}

/// Book with its author and genres resolved
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl NewBook {
    pub fn into_book(self, id: Uuid) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            summary: self.summary,
            isbn: self.isbn,
            genre: self.genre,
        }
    }
}

/// Book creation form as submitted.
///
/// `genre` comes from a group of checkboxes: the browser sends the key once
/// per checked box, or not at all. The form extractor collects every
/// occurrence, so the field is always a list (empty, one value, or many)
/// before any rule runs.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Author must not be empty."),
        custom(function = "validation::object_id", message = "Author must be selected from the list.")
    )]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[serde(default)]
    #[validate(custom(function = "validation::object_ids", message = "Genre selection is invalid."))]
    pub genre: Vec<String>,
}

impl SubmittedForm for BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    fn sanitized(self) -> Self {
        Self {
            title: validation::sanitize(&self.title),
            author: validation::sanitize(&self.author),
            summary: validation::sanitize(&self.summary),
            isbn: validation::sanitize(&self.isbn),
            genre: self.genre.iter().map(|g| validation::escape(g)).collect(),
        }
    }
}

impl BookForm {
    pub fn is_author_selected(&self, author: &Author) -> bool {
        self.author == author.id.to_string()
    }

    pub fn is_genre_checked(&self, genre: &Genre) -> bool {
        let id = genre.id.to_string();
        self.genre.iter().any(|g| *g == id)
    }

    /// Only meaningful on a sanitized form without violations; malformed
    /// ids never reach this point.
    pub fn to_new_book(&self) -> Option<NewBook> {
        let author = Uuid::parse_str(&self.author).ok()?;
        let genre = self
            .genre
            .iter()
            .map(|g| Uuid::parse_str(g).ok())
            .collect::<Option<Vec<_>>>()?;
        Some(NewBook {
            title: self.title.clone(),
            author,
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre,
        })
    }
}
