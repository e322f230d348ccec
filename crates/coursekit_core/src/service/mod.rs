//! Use-case services.
//!
//! # Responsibility
//! - Drive the filter session against a document source.
//! - Hand owned, renderer-ready views to callers.

pub mod browse_service;

pub use browse_service::{BrowseError, BrowseService, BrowseView, RenderedPage, SubjectCard};
