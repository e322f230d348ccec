//! Filter state and its transition function.
//!
//! # Responsibility
//! - Hold the user-selected `(regulation, batch, department, year/semester)`
//!   tuple plus the derived class selection.
//! - Map one field change to the next state and the effect the owner must run.
//!
//! # Invariants
//! - Changing regulation, batch or department always clears the term and the
//!   class selection.
//! - A dataset reload is requested only for a complete filter.

use crate::model::term::{YearSem, YearSemParseError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Active filter values. Blank strings mean "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub regulation: String,
    pub batch: String,
    pub department: String,
    /// `None` means all semesters.
    pub year_sem: Option<YearSem>,
    /// Derived from the visible classes once a dataset is loaded.
    pub current_class_id: Option<String>,
}

impl FilterState {
    /// True when regulation, batch and department are all selected.
    pub fn is_complete(&self) -> bool {
        !self.regulation.trim().is_empty()
            && !self.batch.trim().is_empty()
            && !self.department.trim().is_empty()
    }

    /// True when `other` selects the same per-regulation dataset and cohort.
    pub fn same_dataset(&self, other: &FilterState) -> bool {
        self.regulation == other.regulation
            && self.batch == other.batch
            && self.department == other.department
    }
}

/// Filter field addressed by a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Regulation,
    Batch,
    Department,
    YearSem,
    Class,
}

impl FilterField {
    /// Persistence / query-string key for the field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Regulation => "reg",
            Self::Batch => "batch",
            Self::Department => "dept",
            Self::YearSem => "yearSem",
            Self::Class => "class",
        }
    }
}

impl Display for FilterField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Work the state owner must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEffect {
    /// Filter is incomplete; show the welcome state and drop loaded data.
    ShowWelcome,
    /// Fetch the regulation's documents and replace the snapshot.
    ReloadDataset,
    /// Re-run the resolver over the current snapshot.
    Reresolve,
    /// Fetch projects for the class.
    FetchProjects(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTransition {
    pub state: FilterState,
    pub effect: TransitionEffect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    InvalidYearSem(YearSemParseError),
    EmptyClassId,
    UnknownValue { field: FilterField, value: String },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidYearSem(err) => write!(f, "{err}"),
            Self::EmptyClassId => write!(f, "class id must not be empty"),
            Self::UnknownValue { field, value } => {
                write!(f, "unknown {field} value `{value}`")
            }
        }
    }
}

impl Error for FilterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidYearSem(err) => Some(err),
            _ => None,
        }
    }
}

impl From<YearSemParseError> for FilterError {
    fn from(value: YearSemParseError) -> Self {
        Self::InvalidYearSem(value)
    }
}

/// Applies one field change and returns the next state plus its effect.
///
/// `value` is the raw picker value; an empty year/semester value selects all
/// semesters.
pub fn apply_filter_change(
    current: &FilterState,
    field: FilterField,
    value: &str,
) -> Result<FilterTransition, FilterError> {
    let value = value.trim();
    let mut next = current.clone();

    let effect = match field {
        FilterField::Regulation | FilterField::Batch | FilterField::Department => {
            match field {
                FilterField::Regulation => next.regulation = value.to_string(),
                FilterField::Batch => next.batch = value.to_string(),
                _ => next.department = value.to_string(),
            }
            next.year_sem = None;
            next.current_class_id = None;
            if next.is_complete() {
                TransitionEffect::ReloadDataset
            } else {
                TransitionEffect::ShowWelcome
            }
        }
        FilterField::YearSem => {
            next.year_sem = if value.is_empty() {
                None
            } else {
                Some(YearSem::parse(value)?)
            };
            if next.is_complete() {
                TransitionEffect::Reresolve
            } else {
                TransitionEffect::ShowWelcome
            }
        }
        FilterField::Class => {
            if value.is_empty() {
                return Err(FilterError::EmptyClassId);
            }
            next.current_class_id = Some(value.to_string());
            TransitionEffect::FetchProjects(value.to_string())
        }
    };

    Ok(FilterTransition {
        state: next,
        effect,
    })
}

#[cfg(test)]
mod tests {
    use super::{apply_filter_change, FilterError, FilterField, FilterState, TransitionEffect};
    use crate::model::term::YearSem;

    fn complete() -> FilterState {
        FilterState {
            regulation: "R22".to_string(),
            batch: "2022-2026".to_string(),
            department: "CSE".to_string(),
            year_sem: Some(YearSem::new(1, 2)),
            current_class_id: Some("cse-a".to_string()),
        }
    }

    #[test]
    fn cohort_change_resets_term_and_class_and_reloads() {
        let transition =
            apply_filter_change(&complete(), FilterField::Department, "ECE").unwrap();
        assert_eq!(transition.state.department, "ECE");
        assert_eq!(transition.state.year_sem, None);
        assert_eq!(transition.state.current_class_id, None);
        assert_eq!(transition.effect, TransitionEffect::ReloadDataset);
    }

    #[test]
    fn clearing_a_required_field_shows_welcome() {
        let transition = apply_filter_change(&complete(), FilterField::Batch, "").unwrap();
        assert!(!transition.state.is_complete());
        assert_eq!(transition.effect, TransitionEffect::ShowWelcome);
    }

    #[test]
    fn year_sem_change_reresolves_without_reload() {
        let transition = apply_filter_change(&complete(), FilterField::YearSem, "2-1").unwrap();
        assert_eq!(transition.state.year_sem, Some(YearSem::new(2, 1)));
        assert_eq!(
            transition.state.current_class_id.as_deref(),
            Some("cse-a")
        );
        assert_eq!(transition.effect, TransitionEffect::Reresolve);

        let transition = apply_filter_change(&complete(), FilterField::YearSem, "").unwrap();
        assert_eq!(transition.state.year_sem, None);
    }

    #[test]
    fn malformed_year_sem_is_rejected() {
        let err = apply_filter_change(&complete(), FilterField::YearSem, "first").unwrap_err();
        assert!(matches!(err, FilterError::InvalidYearSem(_)));
    }

    #[test]
    fn class_change_requests_projects() {
        let transition = apply_filter_change(&complete(), FilterField::Class, "cse-b").unwrap();
        assert_eq!(
            transition.effect,
            TransitionEffect::FetchProjects("cse-b".to_string())
        );
        assert_eq!(
            apply_filter_change(&complete(), FilterField::Class, " ").unwrap_err(),
            FilterError::EmptyClassId
        );
    }

    #[test]
    fn transition_does_not_mutate_input() {
        let state = complete();
        let _ = apply_filter_change(&state, FilterField::Regulation, "R18").unwrap();
        assert_eq!(state, complete());
    }
}
