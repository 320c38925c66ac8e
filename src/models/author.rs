//! Author model and related types

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{self, SubmittedForm, ALPHANUMERIC};

use super::format_date;

/// Author document as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, "family_name, first_name"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Years between birth and death, only when both are known.
    pub fn lifespan(&self) -> Option<i32> {
        match (self.date_of_birth, self.date_of_death) {
            (Some(born), Some(died)) => Some(died.year() - born.year()),
            _ => None,
        }
    }

    pub fn date_of_birth_formatted(&self) -> String {
        self.date_of_birth.map(format_date).unwrap_or_default()
    }

    pub fn date_of_death_formatted(&self) -> String {
        self.date_of_death.map(format_date).unwrap_or_default()
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

/// Validated author ready to be inserted
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl NewAuthor {
    pub fn into_author(self, id: Uuid) -> Author {
        Author {
            id,
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

/// Author creation form as submitted
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(function = "validation::name_length", message = "First name must be at most 100 characters."),
        regex(path = *ALPHANUMERIC, message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(function = "validation::name_length", message = "Family name must be at most 100 characters."),
        regex(path = *ALPHANUMERIC, message = "Family name has non-alphanumeric characters.")
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = "validation::optional_iso_date", message = "Invalid date of birth"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = "validation::optional_iso_date", message = "Invalid date of death"))]
    pub date_of_death: String,
}

impl SubmittedForm for AuthorForm {
    const FIELDS: &'static [&'static str] = &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn sanitized(self) -> Self {
        Self {
            first_name: validation::sanitize(&self.first_name),
            family_name: validation::sanitize(&self.family_name),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }
}

impl AuthorForm {
    /// Only meaningful on a sanitized form without violations.
    pub fn to_new_author(&self) -> NewAuthor {
        NewAuthor {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: validation::parse_optional_date(&self.date_of_birth),
            date_of_death: validation::parse_optional_date(&self.date_of_death),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(birth: Option<NaiveDate>, death: Option<NaiveDate>) -> Author {
        Author {
            id: Uuid::nil(),
            first_name: "Jane".into(),
            family_name: "Austen".into(),
            date_of_birth: birth,
            date_of_death: death,
        }
    }

    #[test]
    fn derived_fields() {
        let a = author(NaiveDate::from_ymd_opt(1775, 12, 16), NaiveDate::from_ymd_opt(1817, 7, 18));
        assert_eq!(a.name(), "Austen, Jane");
        assert_eq!(a.lifespan(), Some(42));
        assert_eq!(a.date_of_birth_formatted(), "Dec 16, 1775");
        assert_eq!(a.date_of_death_formatted(), "Jul 18, 1817");
        assert_eq!(a.url(), format!("/catalog/author/{}", Uuid::nil()));
    }

    #[test]
    fn lifespan_needs_both_dates() {
        let a = author(NaiveDate::from_ymd_opt(1775, 12, 16), None);
        assert_eq!(a.lifespan(), None);
        assert_eq!(a.date_of_death_formatted(), "");
        assert_eq!(author(None, None).lifespan(), None);
    }

    #[test]
    fn valid_form_builds_an_author() {
        let form = AuthorForm {
            first_name: "  Jane ".into(),
            family_name: "Austen".into(),
            date_of_birth: "1775-12-16".into(),
            date_of_death: String::new(),
        }
        .sanitized();
        assert!(form.violations().is_empty());
        let new = form.to_new_author();
        assert_eq!(new.first_name, "Jane");
        assert_eq!(new.date_of_birth, NaiveDate::from_ymd_opt(1775, 12, 16));
        assert_eq!(new.date_of_death, None);
    }

    #[test]
    fn invalid_form_reports_each_field() {
        let form = AuthorForm {
            first_name: "   ".into(),
            family_name: "O'Brien".into(),
            date_of_birth: "not a date".into(),
            date_of_death: String::new(),
        }
        .sanitized();
        let violations = form.violations();
        let fields: Vec<_> = violations.iter().map(|v| (v.field, v.message.as_str())).collect();
        assert_eq!(
            fields,
            vec![
                ("first_name", "First name must be specified."),
                ("family_name", "Family name has non-alphanumeric characters."),
                ("date_of_birth", "Invalid date of birth"),
            ]
        );
    }

    #[test]
    fn overlong_names_are_rejected() {
        let form = AuthorForm {
            first_name: "a".repeat(101),
            family_name: "Austen".into(),
            ..Default::default()
        }
        .sanitized();
        let violations = form.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "First name must be at most 100 characters.");
    }
}
