//! Core filter/resolve/render logic for CourseKit.
//! This crate is the single source of truth for which subjects, notes,
//! classes and projects a filter selection shows.

pub mod db;
pub mod document;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod render;
pub mod resolver;
pub mod service;
pub mod state;

pub use document::{DocumentKind, ValidationError};
pub use fetch::fs::FsFetcher;
#[cfg(feature = "http")]
pub use fetch::http::HttpFetcher;
pub use fetch::loader::{LoadError, ProjectsLoad};
pub use fetch::memory::MemoryFetcher;
pub use fetch::{FetchError, Fetcher};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::metadata::Metadata;
pub use model::term::YearSem;
pub use prefs::{
    persist_filters, restore_filters, MemoryPreferenceStore, PreferenceStore, PrefsError,
    SqlitePreferenceStore, StoredFilters,
};
pub use resolver::YearSemMenu;
pub use service::{BrowseError, BrowseService, BrowseView, RenderedPage, SubjectCard};
pub use state::filter::{FilterError, FilterField, FilterState};
pub use state::session::{ProjectPanel, SessionStatus};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
