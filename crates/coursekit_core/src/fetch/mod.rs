//! Document fetch contracts and implementations.
//!
//! # Responsibility
//! - Define the `Fetcher` seam between the loader and any document source.
//! - Build conventional document paths from validated path segments.
//!
//! # Invariants
//! - `Ok(None)` means a non-success response; `Err` means the fetch itself
//!   failed. Callers decide per document which of these is fatal.
//! - Path segments never contain separators or parent references.

pub mod fs;
#[cfg(feature = "http")]
pub mod http;
pub mod loader;
pub mod memory;

use crate::document::DocumentKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid segment regex"));

pub type FetchResult<T> = Result<T, FetchError>;

/// Retrieves one document body by relative path.
///
/// Implementations must be shareable across the loader's worker threads.
pub trait Fetcher: Sync {
    fn fetch(&self, path: &str) -> FetchResult<Option<Vec<u8>>>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, path: &str) -> FetchResult<Option<Vec<u8>>> {
        (**self).fetch(path)
    }
}

/// Transport-level fetch failure.
#[derive(Debug)]
pub enum FetchError {
    Io { path: String, source: std::io::Error },
    Transport { path: String, message: String },
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read `{path}`: {source}"),
            Self::Transport { path, message } => write!(f, "failed to fetch `{path}`: {message}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Transport { .. } => None,
        }
    }
}

/// Rejected path segment (regulation or class id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub segment: String,
}

impl Display for PathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid path segment `{}`", self.segment)
    }
}

impl Error for PathError {}

/// Validates one path segment.
pub fn check_segment(segment: &str) -> Result<&str, PathError> {
    if SEGMENT_RE.is_match(segment) && !segment.contains("..") {
        Ok(segment)
    } else {
        Err(PathError {
            segment: segment.to_string(),
        })
    }
}

/// Path of the site-wide metadata document.
pub fn metadata_path() -> &'static str {
    DocumentKind::Metadata.file_name()
}

/// Path of a per-regulation document, e.g. `R22/subjects.json`.
pub fn regulation_document_path(regulation: &str, kind: DocumentKind) -> Result<String, PathError> {
    let regulation = check_segment(regulation)?;
    Ok(format!("{regulation}/{}", kind.file_name()))
}

/// Path of a class projects document, e.g. `R22/cse-a/projects.json`.
pub fn class_projects_path(regulation: &str, class_id: &str) -> Result<String, PathError> {
    let regulation = check_segment(regulation)?;
    let class_id = check_segment(class_id)?;
    Ok(format!(
        "{regulation}/{class_id}/{}",
        DocumentKind::Projects.file_name()
    ))
}
