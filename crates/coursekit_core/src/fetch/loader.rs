//! Batch loading of regulation datasets and class projects.
//!
//! # Responsibility
//! - Fetch the four per-regulation documents concurrently and decode them
//!   into one `DataSnapshot` only after all four have completed.
//! - Apply the availability policy per document.
//! - Classify failures as metadata, batch, validation or path errors.
//!
//! # Invariants
//! - A missing curriculum document is an empty curriculum, not a failure.
//! - Any failure of subjects, notes or classes fails the whole batch.
//! - A missing projects document is an empty, unavailable list.

use crate::document::{
    decode_metadata, decode_records, ensure_unique_class_ids, ensure_unique_subject_codes,
    DocumentKind, ValidationError,
};
use crate::fetch::{
    class_projects_path, metadata_path, regulation_document_path, FetchError, Fetcher, PathError,
};
use crate::model::metadata::Metadata;
use crate::model::project::Project;
use crate::state::session::DataSnapshot;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread;
use std::time::Instant;

const BATCH_DOCUMENTS: [DocumentKind; 4] = [
    DocumentKind::Subjects,
    DocumentKind::Notes,
    DocumentKind::Classes,
    DocumentKind::Curriculum,
];

/// Why one document of a batch was unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub kind: DocumentKind,
    pub reason: String,
}

impl DocumentFailure {
    pub fn not_found(kind: DocumentKind) -> Self {
        Self {
            kind,
            reason: "not found".to_string(),
        }
    }

    fn transport(kind: DocumentKind, err: &FetchError) -> Self {
        Self {
            kind,
            reason: err.to_string(),
        }
    }
}

impl Display for DocumentFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind, self.reason)
    }
}

/// Loader error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// `metadata.json` could not be fetched.
    MetadataUnavailable(String),
    /// One or more required regulation documents could not be fetched.
    ResourceBatch {
        regulation: String,
        failures: Vec<DocumentFailure>,
    },
    /// A fetched document has a malformed shape.
    Validation(ValidationError),
    /// A regulation or class id is not a safe path segment.
    InvalidSegment(PathError),
}

impl LoadError {
    /// Stable code for structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MetadataUnavailable(_) => "metadata_unavailable",
            Self::ResourceBatch { .. } => "resource_batch_failed",
            Self::Validation(_) => "document_invalid",
            Self::InvalidSegment(_) => "invalid_path_segment",
        }
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MetadataUnavailable(reason) => write!(f, "metadata unavailable: {reason}"),
            Self::ResourceBatch {
                regulation,
                failures,
            } => {
                let listed = failures
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "error loading resources for {regulation}: {listed}")
            }
            Self::Validation(err) => write!(f, "malformed document {err}"),
            Self::InvalidSegment(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidSegment(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for LoadError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PathError> for LoadError {
    fn from(value: PathError) -> Self {
        Self::InvalidSegment(value)
    }
}

/// Result of loading one class's projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsLoad {
    Loaded(Vec<Project>),
    /// No projects document was published (or it could not be fetched).
    Unavailable,
}

/// Loads the site-wide metadata document.
pub fn load_metadata<F: Fetcher>(fetcher: &F) -> Result<Metadata, LoadError> {
    let path = metadata_path();
    let body = match fetcher.fetch(path) {
        Ok(Some(body)) => body,
        Ok(None) => {
            error!("event=metadata_load module=fetch status=error error_code=metadata_unavailable reason=not_found");
            return Err(LoadError::MetadataUnavailable(format!("{path} not found")));
        }
        Err(err) => {
            error!(
                "event=metadata_load module=fetch status=error error_code=metadata_unavailable error={err}"
            );
            return Err(LoadError::MetadataUnavailable(err.to_string()));
        }
    };
    let metadata = decode_metadata(path, &body)?;
    info!(
        "event=metadata_load module=fetch status=ok regulations={} batches={} departments={}",
        metadata.regulations.len(),
        metadata.batches.len(),
        metadata.departments.len()
    );
    Ok(metadata)
}

/// Loads and decodes every document of one regulation.
///
/// The four fetches run concurrently; decoding starts only once all have
/// completed.
pub fn load_regulation<F: Fetcher>(fetcher: &F, regulation: &str) -> Result<DataSnapshot, LoadError> {
    let started_at = Instant::now();
    let paths = BATCH_DOCUMENTS
        .iter()
        .map(|kind| regulation_document_path(regulation, *kind))
        .collect::<Result<Vec<_>, _>>()?;

    let responses: Vec<Result<Option<Vec<u8>>, FetchError>> = thread::scope(|scope| {
        let handles: Vec<_> = paths
            .iter()
            .map(|path| scope.spawn(move || fetcher.fetch(path)))
            .collect();
        handles
            .into_iter()
            .zip(paths.iter())
            .map(|(handle, path)| {
                handle.join().unwrap_or_else(|_| {
                    Err(FetchError::Transport {
                        path: path.clone(),
                        message: "fetch worker panicked".to_string(),
                    })
                })
            })
            .collect()
    });

    let mut bodies: Vec<Option<Vec<u8>>> = Vec::with_capacity(BATCH_DOCUMENTS.len());
    let mut failures = Vec::new();
    for (kind, response) in BATCH_DOCUMENTS.iter().zip(responses) {
        match (kind, response) {
            (_, Ok(Some(body))) => bodies.push(Some(body)),
            (DocumentKind::Curriculum, Ok(None)) => {
                warn!("event=curriculum_missing module=fetch status=degraded regulation={regulation}");
                bodies.push(None);
            }
            (_, Ok(None)) => {
                failures.push(DocumentFailure::not_found(*kind));
                bodies.push(None);
            }
            (_, Err(err)) => {
                failures.push(DocumentFailure::transport(*kind, &err));
                bodies.push(None);
            }
        }
    }

    if !failures.is_empty() {
        let err = LoadError::ResourceBatch {
            regulation: regulation.to_string(),
            failures,
        };
        error!(
            "event=dataset_load module=fetch status=error regulation={} duration_ms={} error_code={} error={}",
            regulation,
            started_at.elapsed().as_millis(),
            err.code(),
            err
        );
        return Err(err);
    }

    let snapshot = decode_snapshot(regulation, &paths, &bodies).map_err(|err| {
        error!(
            "event=dataset_load module=fetch status=error regulation={} duration_ms={} error_code=document_invalid error={}",
            regulation,
            started_at.elapsed().as_millis(),
            err
        );
        LoadError::Validation(err)
    })?;

    info!(
        "event=dataset_load module=fetch status=ok regulation={} duration_ms={}",
        regulation,
        started_at.elapsed().as_millis()
    );
    Ok(snapshot)
}

fn decode_snapshot(
    regulation: &str,
    paths: &[String],
    bodies: &[Option<Vec<u8>>],
) -> Result<DataSnapshot, ValidationError> {
    let body = |index: usize| bodies[index].as_deref().unwrap_or(b"[]");

    let subjects = decode_records(&paths[0], body(0))?;
    ensure_unique_subject_codes(&paths[0], &subjects)?;
    let notes = decode_records(&paths[1], body(1))?;
    let classes = decode_records(&paths[2], body(2))?;
    ensure_unique_class_ids(&paths[2], &classes)?;
    let curriculum = decode_records(&paths[3], body(3))?;

    Ok(DataSnapshot {
        regulation: regulation.to_string(),
        subjects,
        notes,
        classes,
        curriculum,
    })
}

/// Loads the projects document for one class.
pub fn load_projects<F: Fetcher>(
    fetcher: &F,
    regulation: &str,
    class_id: &str,
) -> Result<ProjectsLoad, LoadError> {
    let path = class_projects_path(regulation, class_id)?;
    match fetcher.fetch(&path) {
        Ok(Some(body)) => {
            let projects = decode_records::<Project>(&path, &body)?;
            info!(
                "event=projects_load module=fetch status=ok class_id={} projects={}",
                class_id,
                projects.len()
            );
            Ok(ProjectsLoad::Loaded(projects))
        }
        Ok(None) => {
            info!("event=projects_load module=fetch status=unavailable class_id={class_id}");
            Ok(ProjectsLoad::Unavailable)
        }
        Err(err) => {
            warn!(
                "event=projects_load module=fetch status=unavailable class_id={class_id} error={err}"
            );
            Ok(ProjectsLoad::Unavailable)
        }
    }
}
