//! Remembered filter values across sessions.
//!
//! # Responsibility
//! - Read/write the four filter keys to a location query string.
//! - Read/write the same keys to a key-value preference store.
//! - Merge both sources into the filter values a session starts from.
//!
//! # Invariants
//! - Query-string values win over stored values; blank values never win.
//! - Core resolution never depends on persistence; it only consumes values.

mod query;
mod store;

pub use query::StoredFilters;
pub use store::{
    persist_filters, restore_filters, MemoryPreferenceStore, PreferenceStore, PrefsError,
    SqlitePreferenceStore,
};

/// Persistence keys for the four remembered filter values.
pub const KEY_REGULATION: &str = "reg";
pub const KEY_BATCH: &str = "batch";
pub const KEY_DEPARTMENT: &str = "dept";
pub const KEY_YEAR_SEM: &str = "yearSem";

pub const FILTER_KEYS: [&str; 4] = [KEY_REGULATION, KEY_BATCH, KEY_DEPARTMENT, KEY_YEAR_SEM];
