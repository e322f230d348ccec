//! Site-wide metadata enumerating valid filter values.

use crate::state::filter::{FilterError, FilterField, FilterState};
use serde::{Deserialize, Serialize};

/// Top-level `metadata.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub regulations: Vec<String>,
    pub batches: Vec<String>,
    pub departments: Vec<String>,
}

impl Metadata {
    /// Returns the enumerated values for one of the metadata-backed fields.
    ///
    /// Year/semester and class values are dataset-derived and have no
    /// metadata enumeration.
    pub fn values_for(&self, field: FilterField) -> Option<&[String]> {
        match field {
            FilterField::Regulation => Some(&self.regulations),
            FilterField::Batch => Some(&self.batches),
            FilterField::Department => Some(&self.departments),
            FilterField::YearSem | FilterField::Class => None,
        }
    }

    /// Rejects a single non-blank value that metadata does not enumerate.
    pub fn check_value(&self, field: FilterField, value: &str) -> Result<(), FilterError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        match self.values_for(field) {
            Some(known) if !known.iter().any(|candidate| candidate == trimmed) => {
                Err(FilterError::UnknownValue {
                    field,
                    value: trimmed.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Checks every metadata-backed value of a filter.
    pub fn check_filter(&self, state: &FilterState) -> Result<(), FilterError> {
        self.check_value(FilterField::Regulation, &state.regulation)?;
        self.check_value(FilterField::Batch, &state.batch)?;
        self.check_value(FilterField::Department, &state.department)
    }
}
