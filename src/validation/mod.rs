//! Field validation for medical record requests.
//!
//! Every rule of a rule set is evaluated; failures are collected in order
//! into [`ValidationErrors`] rather than stopping at the first one.

pub mod medical_record;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use medical_record::{
    validate_create, validate_delete, validate_filter, validate_id, validate_record, validate_update,
};

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of failed rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Whether any failure was recorded against `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Ids present in the reference tables at validation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookups {
    pub record_type_ids: BTreeSet<i32>,
    pub status_ids: BTreeSet<i32>,
}

impl Lookups {
    pub fn new(record_type_ids: impl IntoIterator<Item = i32>, status_ids: impl IntoIterator<Item = i32>) -> Self {
        Self {
            record_type_ids: record_type_ids.into_iter().collect(),
            status_ids: status_ids.into_iter().collect(),
        }
    }

    /// The rows created by `sql/schema.sql`.
    pub fn seeded() -> Self {
        use crate::models::status::{ACTIVE, DELETED};
        Self::new([1, 2], [ACTIVE, DELETED])
    }

    fn describe(ids: &BTreeSet<i32>) -> String {
        ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
    }
}

/// Rule helpers writing into a shared error list.
#[derive(Debug, Default)]
struct Rules {
    errors: ValidationErrors,
}

impl Rules {
    fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.errors.push(field, message);
        }
    }

    /// Value must be present; returns it for follow-up rules.
    fn required<'a, T>(&mut self, field: &str, value: &'a Option<T>) -> Option<&'a T> {
        if value.is_none() {
            self.errors.push(field, format!("{field} must not be null"));
        }
        value.as_ref()
    }

    /// Present and not blank.
    fn required_text<'a>(&mut self, field: &str, value: &'a Option<String>) -> Option<&'a str> {
        let text = self.required(field, value)?;
        if text.trim().is_empty() {
            self.errors.push(field, format!("{field} must not be empty"));
            return None;
        }
        Some(text)
    }

    fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.errors
                .push(field, format!("{field} has exceeded the maximum of {max} characters"));
        }
    }

    fn max_len_opt(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.max_len(field, value, max);
        }
    }

    fn positive(&mut self, field: &str, value: i32) {
        self.check(value > 0, field, format!("{field} must be higher than 0"));
    }

    fn member(&mut self, field: &str, value: i32, allowed: &BTreeSet<i32>) {
        if !allowed.contains(&value) {
            self.errors.push(
                field,
                format!("{field} must be one of [{}]", Lookups::describe(allowed)),
            );
        }
    }

    fn finish(self) -> ValidationErrors {
        self.errors
    }
}
