//! Filter resolution and data joins over one regulation's snapshot.
//!
//! # Responsibility
//! - Narrow curriculum entries by cohort and term.
//! - Select visible subjects through curriculum subject codes.
//! - Join notes to subjects and projects to categories.
//!
//! # Invariants
//! - Every function is pure and total over decoded records.
//! - No matching curriculum entry means no visible subjects (fail-closed).
//! - Output order follows source order unless an operation states a sort key.

use crate::model::class::ClassRecord;
use crate::model::curriculum::CurriculumEntry;
use crate::model::note::Note;
use crate::model::project::Project;
use crate::model::subject::Subject;
use crate::model::term::YearSem;
use std::collections::{HashMap, HashSet};

/// Year/semester picker state derived from the curriculum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSemMenu {
    /// No curriculum entry exists for the cohort.
    NoData,
    Options {
        options: Vec<YearSem>,
        /// Previous selection, kept only when it is still offered.
        selected: Option<YearSem>,
    },
}

/// A visible subject with its notes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectWithNotes<'a> {
    pub subject: &'a Subject,
    /// Empty means the subject renders with a "no notes" marker.
    pub notes: Vec<&'a Note>,
}

/// Classes visible for a cohort plus the effective selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSelection<'a> {
    pub classes: Vec<&'a ClassRecord>,
    pub selected: Option<&'a ClassRecord>,
}

/// Projects sharing one `type_category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGroup<'a> {
    pub category: &'a str,
    pub projects: Vec<&'a Project>,
}

/// Returns the terms offered for a cohort, sorted by year then semester.
///
/// Duplicate `(year, semester)` pairs from the source collapse to one option.
pub fn resolve_year_sem_options(
    curriculum: &[CurriculumEntry],
    batch: &str,
    department: &str,
) -> Vec<YearSem> {
    let mut terms: Vec<YearSem> = curriculum
        .iter()
        .filter(|entry| entry.matches_cohort(batch, department))
        .map(CurriculumEntry::term)
        .collect();
    terms.sort();
    terms.dedup();
    terms
}

/// Builds the year/semester picker, distinguishing "no data" from options.
pub fn resolve_year_sem_menu(
    curriculum: &[CurriculumEntry],
    batch: &str,
    department: &str,
    selected: Option<YearSem>,
) -> YearSemMenu {
    let options = resolve_year_sem_options(curriculum, batch, department);
    if options.is_empty() {
        return YearSemMenu::NoData;
    }
    let selected = selected.filter(|term| options.contains(term));
    YearSemMenu::Options { options, selected }
}

/// Returns subjects taught to a cohort, optionally narrowed to one term.
///
/// Output keeps subject-document order. An empty candidate code set yields
/// an empty list, never the full subject list.
pub fn resolve_visible_subjects<'a>(
    curriculum: &[CurriculumEntry],
    subjects: &'a [Subject],
    batch: &str,
    department: &str,
    year_sem: Option<YearSem>,
) -> Vec<&'a Subject> {
    let candidate_codes: HashSet<&str> = curriculum
        .iter()
        .filter(|entry| entry.matches_cohort(batch, department))
        .filter(|entry| year_sem.map_or(true, |term| entry.term() == term))
        .flat_map(|entry| entry.subjects.iter().map(String::as_str))
        .collect();

    if candidate_codes.is_empty() {
        return Vec::new();
    }

    subjects
        .iter()
        .filter(|subject| candidate_codes.contains(subject.code.as_str()))
        .collect()
}

/// Returns notes for one subject code in source order.
pub fn resolve_notes_for_subject<'a>(notes: &'a [Note], subject_code: &str) -> Vec<&'a Note> {
    notes
        .iter()
        .filter(|note| note.subject_code == subject_code)
        .collect()
}

/// Pairs each subject with its notes.
pub fn pair_subjects_with_notes<'a>(
    subjects: &[&'a Subject],
    notes: &'a [Note],
) -> Vec<SubjectWithNotes<'a>> {
    let mut by_code: HashMap<&str, Vec<&'a Note>> = HashMap::new();
    for note in notes {
        by_code
            .entry(note.subject_code.as_str())
            .or_default()
            .push(note);
    }

    subjects
        .iter()
        .map(|&subject| SubjectWithNotes {
            subject,
            notes: by_code
                .get(subject.code.as_str())
                .cloned()
                .unwrap_or_default(),
        })
        .collect()
}

/// Returns classes of a cohort in source order.
pub fn resolve_visible_classes<'a>(
    classes: &'a [ClassRecord],
    batch: &str,
    department: &str,
) -> Vec<&'a ClassRecord> {
    classes
        .iter()
        .filter(|class| class.matches_cohort(batch, department))
        .collect()
}

/// Resolves visible classes and the effective selection.
///
/// The requested class wins when it is visible; otherwise the first visible
/// class is the default.
pub fn resolve_class_selection<'a>(
    classes: &'a [ClassRecord],
    batch: &str,
    department: &str,
    requested: Option<&str>,
) -> ClassSelection<'a> {
    let visible = resolve_visible_classes(classes, batch, department);
    let selected = requested
        .and_then(|class_id| {
            visible
                .iter()
                .copied()
                .find(|class| class.class_id == class_id)
        })
        .or_else(|| visible.first().copied());
    ClassSelection {
        classes: visible,
        selected,
    }
}

/// Groups projects by category in order of first appearance.
pub fn group_projects_by_category(projects: &[Project]) -> Vec<ProjectGroup<'_>> {
    let mut groups: Vec<ProjectGroup<'_>> = Vec::new();
    let mut index_by_category: HashMap<&str, usize> = HashMap::new();

    for project in projects {
        let category = project.type_category.as_str();
        let slot = *index_by_category.entry(category).or_insert_with(|| {
            groups.push(ProjectGroup {
                category,
                projects: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].projects.push(project);
    }
    groups
}

#[cfg(test)]
mod tests;
