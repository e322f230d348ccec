//! Static document decoding and structural validation.
//!
//! # Responsibility
//! - Name the documents served per regulation and per class.
//! - Decode JSON array documents record by record into typed models.
//! - Report malformed shapes with the document name and a `$[index].field`
//!   path, distinct from transport failures.
//!
//! # Invariants
//! - A document either decodes fully or yields exactly one `ValidationError`.
//! - Subject codes and class ids are unique within one regulation.

use crate::model::class::ClassRecord;
use crate::model::metadata::Metadata;
use crate::model::subject::Subject;
use crate::model::Record;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Documents known to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Metadata,
    Subjects,
    Notes,
    Classes,
    Curriculum,
    Projects,
}

impl DocumentKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Metadata => "metadata.json",
            Self::Subjects => "subjects.json",
            Self::Notes => "notes.json",
            Self::Classes => "classes.json",
            Self::Curriculum => "curriculum.json",
            Self::Projects => "projects.json",
        }
    }
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Malformed document shape. Indicates a data-authoring bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Fetch path of the offending document, e.g. `R22/subjects.json`.
    pub document: String,
    /// JSON path inside the document, e.g. `$[3].code`.
    pub path: String,
    pub reason: String,
}

impl ValidationError {
    fn new(document: &str, path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            document: document.to_string(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.document, self.path, self.reason)
    }
}

impl Error for ValidationError {}

/// Decodes a JSON array document into validated records.
pub fn decode_records<T>(document: &str, bytes: &[u8]) -> Result<Vec<T>, ValidationError>
where
    T: DeserializeOwned + Record,
{
    let root: Value = serde_json::from_slice(bytes)
        .map_err(|err| ValidationError::new(document, "$", format!("invalid JSON: {err}")))?;
    let items = match root {
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::new(
                document,
                "$",
                format!("expected an array, found {}", json_type_name(&other)),
            ))
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record: T = serde_json::from_value(item)
            .map_err(|err| ValidationError::new(document, format!("$[{index}]"), err.to_string()))?;
        record.validate().map_err(|err| {
            ValidationError::new(document, format!("$[{index}].{}", err.field), err.reason)
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Decodes the top-level metadata object.
pub fn decode_metadata(document: &str, bytes: &[u8]) -> Result<Metadata, ValidationError> {
    let root: Value = serde_json::from_slice(bytes)
        .map_err(|err| ValidationError::new(document, "$", format!("invalid JSON: {err}")))?;
    if !root.is_object() {
        return Err(ValidationError::new(
            document,
            "$",
            format!("expected an object, found {}", json_type_name(&root)),
        ));
    }
    serde_json::from_value(root).map_err(|err| ValidationError::new(document, "$", err.to_string()))
}

/// Rejects a second occurrence of the same subject code.
pub fn ensure_unique_subject_codes(
    document: &str,
    subjects: &[Subject],
) -> Result<(), ValidationError> {
    ensure_unique(document, "code", subjects.iter().map(|s| s.code.as_str()))
}

/// Rejects a second occurrence of the same class id.
pub fn ensure_unique_class_ids(
    document: &str,
    classes: &[ClassRecord],
) -> Result<(), ValidationError> {
    ensure_unique(document, "class_id", classes.iter().map(|c| c.class_id.as_str()))
}

fn ensure_unique<'a>(
    document: &str,
    field: &str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (index, key) in keys.enumerate() {
        if !seen.insert(key) {
            return Err(ValidationError::new(
                document,
                format!("$[{index}].{field}"),
                format!("duplicate value `{key}`"),
            ));
        }
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
