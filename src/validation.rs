//! Form sanitizers and validation helpers.
//!
//! Submitted values are sanitized first (trimmed, then HTML-escaped) and the
//! sanitized struct is checked with `validator` rules. Violations come back in
//! form-field order, each tagged with the field it belongs to.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{AppError, AppResult};

/// Matches ASCII letters and digits only; an empty value passes so that a
/// missing name reports only its "must be specified" message.
pub static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]*$").unwrap());

/// Maximum length of author name fields.
pub const NAME_MAX_LEN: usize = 100;

/// A single rule violation, tagged with the field it was raised for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// A submitted form that can be sanitized and checked.
pub trait SubmittedForm: Validate + Sized {
    /// Field names in the order they appear on the form.
    const FIELDS: &'static [&'static str];

    /// Apply the trim/escape sanitizers to every field.
    fn sanitized(self) -> Self;

    fn violations(&self) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect(&errors, Self::FIELDS),
        }
    }
}

/// Flatten `validator` errors into field-ordered violations.
pub fn collect(errors: &ValidationErrors, order: &[&'static str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut violations = Vec::new();
    for &field in order {
        if let Some(field_errors) = by_field.get(field) {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                violations.push(FieldError { field, message });
            }
        }
    }
    violations
}

/// HTML-escape the characters that are unsafe in markup.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Trim then escape.
pub fn sanitize(value: &str) -> String {
    escape(value.trim())
}

/// Parse an ISO-8601 calendar date (`1775-12-16`) or date-time
/// (`1775-12-16T00:00:00Z`), keeping only the date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Parse an optional date field: empty means absent.
pub fn parse_optional_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        None
    } else {
        parse_iso_date(value)
    }
}

pub fn optional_iso_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_iso_date(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("iso_date"))
    }
}

pub fn name_length(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() <= NAME_MAX_LEN {
        Ok(())
    } else {
        Err(ValidationError::new("max_length"))
    }
}

/// An empty reference is left to the `length` rule.
pub fn object_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("object_id"))
    }
}

pub fn object_ids(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().all(|v| Uuid::parse_str(v).is_ok()) {
        Ok(())
    } else {
        Err(ValidationError::new("object_id"))
    }
}

/// Parse an id taken from a path segment or a hidden form field.
pub fn parse_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| AppError::InvalidId(value.to_string()))
}
