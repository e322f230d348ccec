//! Course resource domain model.
//!
//! # Responsibility
//! - Define the typed shape of every static document served per regulation.
//! - Provide per-record structural checks used by document decoding.
//!
//! # Invariants
//! - Records are immutable once decoded; resolvers only borrow them.
//! - Identifiers and names are never blank after validation.

pub mod class;
pub mod curriculum;
pub mod metadata;
pub mod note;
pub mod project;
pub mod subject;
pub mod term;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field-level record check failure.
///
/// `field` is relative to the record, e.g. `code` or `links[1].link`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reason: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl Error for FieldError {}

/// Structural checks that serde cannot express.
pub trait Record {
    fn validate(&self) -> Result<(), FieldError>;
}

pub(crate) fn require_text(value: &str, field: impl Into<String>) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError {
            field: field.into(),
            reason: "must not be blank",
        });
    }
    Ok(())
}
