//! Book instance (physical copy) model and related types

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::{self, SubmittedForm};

use super::{format_date, Book};

/// Availability of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "book_status")]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Maintenance,
        BookStatus::Available,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

/// Book instance document as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: NaiveDate,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_date(self.due_back)
    }
}

/// Book instance with its book resolved
#[derive(Debug, Clone)]
pub struct BookInstanceEntry {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[derive(Debug, Clone)]
pub struct NewBookInstance {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: NaiveDate,
}

impl NewBookInstance {
    pub fn into_book_instance(self, id: Uuid) -> BookInstance {
        BookInstance {
            id,
            book: self.book,
            imprint: self.imprint,
            status: self.status,
            due_back: self.due_back,
        }
    }
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<BookStatus>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("status"))
    }
}

/// Book instance creation form as submitted
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Book must be specified"),
        custom(function = "validation::object_id", message = "Book must be selected from the list.")
    )]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "known_status", message = "Invalid status"))]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = "validation::optional_iso_date", message = "Invalid date"))]
    pub due_back: String,
}

impl SubmittedForm for BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn sanitized(self) -> Self {
        Self {
            book: validation::sanitize(&self.book),
            imprint: validation::sanitize(&self.imprint),
            status: validation::sanitize(&self.status),
            due_back: self.due_back.trim().to_string(),
        }
    }
}

impl BookInstanceForm {
    pub fn is_book_selected(&self, book: &Book) -> bool {
        self.book == book.id.to_string()
    }

    pub fn is_status_selected(&self, status: BookStatus) -> bool {
        if self.status.is_empty() {
            status == BookStatus::default()
        } else {
            self.status == status.as_str()
        }
    }

    /// Empty status means `Maintenance`, empty due date means today.
    pub fn to_new_book_instance(&self) -> Option<NewBookInstance> {
        let book = Uuid::parse_str(&self.book).ok()?;
        let status = if self.status.is_empty() {
            BookStatus::default()
        } else {
            self.status.parse().ok()?
        };
        let due_back = if self.due_back.is_empty() {
            Utc::now().date_naive()
        } else {
            validation::parse_iso_date(&self.due_back)?
        };
        Some(NewBookInstance {
            book,
            imprint: self.imprint.clone(),
            status,
            due_back,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_its_label() {
        for status in BookStatus::ALL {
            assert_eq!(status.to_string().parse::<BookStatus>(), Ok(status));
        }
        assert!("available".parse::<BookStatus>().is_err());
        assert_eq!(BookStatus::default(), BookStatus::Maintenance);
    }

    #[test]
    fn defaults_fill_status_and_due_date() {
        let form = BookInstanceForm {
            book: Uuid::new_v4().to_string(),
            imprint: " Penguin Classics, 2003 ".into(),
            status: String::new(),
            due_back: String::new(),
        }
        .sanitized();
        assert!(form.violations().is_empty());
        let new = form.to_new_book_instance().unwrap();
        assert_eq!(new.status, BookStatus::Maintenance);
        assert_eq!(new.due_back, Utc::now().date_naive());
        assert_eq!(new.imprint, "Penguin Classics, 2003");
    }

    #[test]
    fn rejects_unknown_status_and_bad_date() {
        let form = BookInstanceForm {
            book: String::new(),
            imprint: "x".into(),
            status: "Lost".into(),
            due_back: "soon".into(),
        }
        .sanitized();
        let messages: Vec<_> = form.violations().into_iter().map(|v| v.message).collect();
        assert_eq!(messages, vec!["Book must be specified", "Invalid status", "Invalid date"]);
    }

    #[test]
    fn derived_fields() {
        let instance = BookInstance {
            id: Uuid::nil(),
            book: Uuid::nil(),
            imprint: "London Gollancz, 2014.".into(),
            status: BookStatus::Available,
            due_back: NaiveDate::from_ymd_opt(2020, 6, 3).unwrap(),
        };
        assert_eq!(instance.url(), format!("/catalog/bookinstance/{}", Uuid::nil()));
        assert_eq!(instance.due_back_formatted(), "Jun 3, 2020");
    }
}
