//! Single owner of the active filter and the loaded dataset snapshot.
//!
//! # Responsibility
//! - Replace the per-regulation snapshot atomically after a successful batch.
//! - Discard late responses for dataset or class selections that are no
//!   longer current.
//! - Track the user-visible load status.
//!
//! # Invariants
//! - The snapshot is only ever replaced whole; it is never merged across
//!   regulations or patched mid-load.
//! - A failed batch leaves no snapshot and no project list behind.
//! - A completion carrying an outdated ticket never changes state.

use crate::fetch::loader::{LoadError, ProjectsLoad};
use crate::model::class::ClassRecord;
use crate::model::curriculum::CurriculumEntry;
use crate::model::note::Note;
use crate::model::project::Project;
use crate::model::subject::Subject;
use crate::state::filter::{FilterState, FilterTransition, TransitionEffect};
use log::{debug, info, warn};
use std::sync::Arc;

/// Immutable documents of one regulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSnapshot {
    pub regulation: String,
    pub subjects: Vec<Subject>,
    pub notes: Vec<Note>,
    pub classes: Vec<ClassRecord>,
    /// Empty when the regulation publishes no curriculum document.
    pub curriculum: Vec<CurriculumEntry>,
}

/// Status shown by the status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Welcome,
    Loading,
    Ready,
    Error(String),
}

/// Project list state for the selected class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectPanel {
    /// No class is visible for the cohort.
    NoClasses,
    Loading,
    /// The class has no published projects document.
    Unavailable,
    /// The projects document exists but is malformed.
    Invalid(String),
    Loaded(Vec<Project>),
}

/// Outcome of completing a ticketed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// The selection changed while loading; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetTicket {
    generation: u64,
    filter: FilterState,
}

impl DatasetTicket {
    pub fn regulation(&self) -> &str {
        &self.filter.regulation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTicket {
    generation: u64,
    regulation: String,
    class_id: String,
}

impl ProjectTicket {
    pub fn regulation(&self) -> &str {
        &self.regulation
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }
}

#[derive(Debug)]
pub struct Session {
    filter: FilterState,
    status: SessionStatus,
    snapshot: Option<Arc<DataSnapshot>>,
    projects: ProjectPanel,
    dataset_generation: u64,
    project_generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            filter: FilterState::default(),
            status: SessionStatus::Welcome,
            snapshot: None,
            projects: ProjectPanel::NoClasses,
            dataset_generation: 0,
            project_generation: 0,
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Snapshot of the current regulation, present only after a successful load.
    pub fn snapshot(&self) -> Option<&Arc<DataSnapshot>> {
        self.snapshot.as_ref()
    }

    pub fn projects(&self) -> &ProjectPanel {
        &self.projects
    }

    /// Installs a transition computed by `apply_filter_change`.
    ///
    /// Returns the effect the caller must run next.
    pub fn apply(&mut self, transition: FilterTransition) -> TransitionEffect {
        self.filter = transition.state;
        if transition.effect == TransitionEffect::ShowWelcome {
            self.dataset_generation += 1;
            self.project_generation += 1;
            self.snapshot = None;
            self.projects = ProjectPanel::NoClasses;
            self.status = SessionStatus::Welcome;
            debug!("event=session_welcome module=state status=ok");
        }
        transition.effect
    }

    /// Starts a dataset load for the current filter.
    ///
    /// Any in-flight dataset or project load becomes stale.
    pub fn begin_dataset_load(&mut self) -> DatasetTicket {
        self.dataset_generation += 1;
        self.project_generation += 1;
        self.status = SessionStatus::Loading;
        self.projects = ProjectPanel::Loading;
        DatasetTicket {
            generation: self.dataset_generation,
            filter: self.filter.clone(),
        }
    }

    /// Completes a dataset load all-or-nothing.
    pub fn complete_dataset_load(
        &mut self,
        ticket: DatasetTicket,
        result: Result<DataSnapshot, LoadError>,
    ) -> LoadOutcome {
        if ticket.generation != self.dataset_generation || !ticket.filter.same_dataset(&self.filter)
        {
            warn!(
                "event=dataset_load module=state status=stale regulation={} generation={} current_generation={}",
                ticket.filter.regulation, ticket.generation, self.dataset_generation
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(snapshot) => {
                info!(
                    "event=snapshot_replace module=state status=ok regulation={} subjects={} notes={} classes={} curriculum={}",
                    snapshot.regulation,
                    snapshot.subjects.len(),
                    snapshot.notes.len(),
                    snapshot.classes.len(),
                    snapshot.curriculum.len()
                );
                self.snapshot = Some(Arc::new(snapshot));
                self.projects = ProjectPanel::NoClasses;
                self.status = SessionStatus::Ready;
                LoadOutcome::Applied
            }
            Err(err) => {
                self.snapshot = None;
                self.projects = ProjectPanel::NoClasses;
                self.filter.current_class_id = None;
                self.status = SessionStatus::Error(err.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Selects a class and starts loading its projects.
    ///
    /// Any in-flight project load for another selection becomes stale.
    pub fn begin_project_load(&mut self, class_id: &str) -> ProjectTicket {
        self.project_generation += 1;
        self.filter.current_class_id = Some(class_id.to_string());
        self.projects = ProjectPanel::Loading;
        ProjectTicket {
            generation: self.project_generation,
            regulation: self.filter.regulation.clone(),
            class_id: class_id.to_string(),
        }
    }

    /// Completes a project load unless the class selection has moved on.
    pub fn complete_project_load(
        &mut self,
        ticket: ProjectTicket,
        result: Result<ProjectsLoad, LoadError>,
    ) -> LoadOutcome {
        let still_selected = self.filter.current_class_id.as_deref() == Some(ticket.class_id.as_str())
            && self.filter.regulation == ticket.regulation;
        if ticket.generation != self.project_generation || !still_selected {
            warn!(
                "event=projects_load module=state status=stale class_id={} generation={} current_generation={}",
                ticket.class_id, ticket.generation, self.project_generation
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(ProjectsLoad::Loaded(projects)) => {
                self.projects = ProjectPanel::Loaded(projects);
                LoadOutcome::Applied
            }
            Ok(ProjectsLoad::Unavailable) => {
                self.projects = ProjectPanel::Unavailable;
                LoadOutcome::Applied
            }
            Err(err) => {
                self.projects = ProjectPanel::Invalid(err.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Records that the cohort has no visible class.
    pub fn clear_class_selection(&mut self) {
        self.project_generation += 1;
        self.filter.current_class_id = None;
        self.projects = ProjectPanel::NoClasses;
    }
}
