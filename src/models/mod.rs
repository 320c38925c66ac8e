//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::{Author, AuthorForm, NewAuthor};
pub use book::{Book, BookDetail, BookForm, BookListEntry, NewBook};
pub use book_instance::{BookInstance, BookInstanceEntry, BookInstanceForm, BookStatus, NewBookInstance};
pub use genre::{Genre, GenreForm, NewGenre};

/// Medium date format used across pages, e.g. `Dec 16, 1775`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
