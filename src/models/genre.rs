//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, SubmittedForm};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

#[derive(Debug, Clone)]
pub struct NewGenre {
    pub name: String,
}

impl NewGenre {
    pub fn into_genre(self, id: Uuid) -> Genre {
        Genre { id, name: self.name }
    }
}

/// Genre creation form as submitted
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Genre name required"))]
    pub name: String,
}

impl SubmittedForm for GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];

    fn sanitized(self) -> Self {
        Self {
            name: validation::sanitize(&self.name),
        }
    }
}

impl GenreForm {
    pub fn to_new_genre(&self) -> NewGenre {
        NewGenre {
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let form = GenreForm { name: "  \t ".into() }.sanitized();
        let violations = form.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "name");
        assert_eq!(violations[0].message, "Genre name required");
    }

    #[test]
    fn name_is_trimmed_and_escaped() {
        let form = GenreForm { name: " Sci-Fi & <Fantasy> ".into() }.sanitized();
        assert!(form.violations().is_empty());
        assert_eq!(form.to_new_genre().name, "Sci-Fi &amp; &lt;Fantasy&gt;");
    }
}
