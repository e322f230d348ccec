//! Browse use-case service.
//!
//! # Responsibility
//! - Validate filter changes against site metadata.
//! - Run the effect each transition asks for: reload the regulation
//!   dataset or fetch the selected class's projects.
//! - Pick the default class after every successful reload.
//!
//! # Invariants
//! - Session state only changes through `Session` transitions and tickets.
//! - A failed reload leaves no snapshot behind.

use crate::fetch::loader::{load_metadata, load_projects, load_regulation, LoadError};
use crate::fetch::Fetcher;
use crate::model::class::ClassRecord;
use crate::model::metadata::Metadata;
use crate::model::note::Note;
use crate::model::subject::Subject;
use crate::prefs::StoredFilters;
use crate::render::{
    render_batch_error, render_class_options, render_filter_options, render_projects,
    render_status, render_subjects, render_welcome, render_year_sem_options, semester_label,
    RenderError, SelectFragment,
};
use crate::resolver::{
    pair_subjects_with_notes, resolve_class_selection, resolve_visible_subjects,
    resolve_year_sem_menu, ClassSelection, SubjectWithNotes, YearSemMenu,
};
use crate::state::filter::{
    apply_filter_change, FilterError, FilterField, FilterState, FilterTransition,
    TransitionEffect,
};
use crate::state::session::{LoadOutcome, ProjectPanel, Session, SessionStatus};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service-level error for browse operations.
#[derive(Debug)]
pub enum BrowseError {
    /// A filter was changed before `load_metadata` succeeded.
    MetadataNotLoaded,
    /// A class was selected while no dataset is loaded.
    DatasetNotLoaded,
    /// The requested class is not visible for the current cohort.
    UnknownClass(String),
    Filter(FilterError),
    Load(LoadError),
    Render(RenderError),
}

impl Display for BrowseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MetadataNotLoaded => write!(f, "site metadata has not been loaded"),
            Self::DatasetNotLoaded => write!(f, "no regulation dataset is loaded"),
            Self::UnknownClass(class_id) => {
                write!(f, "class `{class_id}` is not offered for this cohort")
            }
            Self::Filter(err) => write!(f, "{err}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BrowseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Filter(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FilterError> for BrowseError {
    fn from(value: FilterError) -> Self {
        Self::Filter(value)
    }
}

impl From<LoadError> for BrowseError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<RenderError> for BrowseError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

/// One visible subject with its notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCard {
    pub subject: Subject,
    pub notes: Vec<Note>,
}

/// Owned snapshot of everything the page displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseView {
    pub filter: FilterState,
    pub status: SessionStatus,
    pub year_sem_menu: YearSemMenu,
    pub semester_label: String,
    pub subjects: Vec<SubjectCard>,
    pub classes: Vec<ClassRecord>,
    pub selected_class: Option<String>,
    pub projects: ProjectPanel,
}

/// Rendered HTML fragments for each page container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub status: String,
    pub regulation_options: String,
    pub batch_options: String,
    pub department_options: String,
    pub year_sem: SelectFragment,
    /// Subject cards, the welcome prompt, or the batch error banner.
    pub subjects: String,
    pub classes: SelectFragment,
    pub projects: String,
}

/// Use-case service over one document source.
pub struct BrowseService<F: Fetcher> {
    fetcher: F,
    metadata: Option<Metadata>,
    session: Session,
}

impl<F: Fetcher> BrowseService<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            metadata: None,
            session: Session::new(),
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn filter(&self) -> &FilterState {
        self.session.filter()
    }

    /// Fetches `metadata.json`; required before any filter change.
    pub fn load_metadata(&mut self) -> Result<&Metadata, BrowseError> {
        let metadata = load_metadata(&self.fetcher)?;
        Ok(self.metadata.insert(metadata))
    }

    /// Applies restored filter values in `reg`, `batch`, `dept`, `yearSem`
    /// order and loads the dataset when the cohort is complete.
    ///
    /// Values metadata does not list, and malformed term tokens, are dropped
    /// rather than rejected. A well-formed term the cohort does not offer is
    /// kept and matches no subjects.
    pub fn restore(&mut self, stored: &StoredFilters) -> Result<(), BrowseError> {
        let metadata = self.metadata.as_ref().ok_or(BrowseError::MetadataNotLoaded)?;

        let mut state = FilterState::default();
        for (field, value) in [
            (FilterField::Regulation, stored.regulation.as_str()),
            (FilterField::Batch, stored.batch.as_str()),
            (FilterField::Department, stored.department.as_str()),
        ] {
            let value = match metadata.check_value(field, value) {
                Ok(()) => value,
                Err(err) => {
                    warn!("event=filters_restore module=service status=skipped field={field} reason={err}");
                    ""
                }
            };
            state = apply_filter_change(&state, field, value)?.state;
        }

        let effect = if state.is_complete() {
            TransitionEffect::ReloadDataset
        } else {
            TransitionEffect::ShowWelcome
        };
        let effect = self.session.apply(FilterTransition { state, effect });
        self.run_effect(effect)?;

        let token = stored.year_sem.trim();
        if token.is_empty() || self.session.snapshot().is_none() {
            return Ok(());
        }
        match apply_filter_change(self.session.filter(), FilterField::YearSem, token) {
            Ok(transition) => {
                let effect = self.session.apply(transition);
                self.run_effect(effect)
            }
            Err(err) => {
                warn!("event=filters_restore module=service status=skipped field=yearSem reason={err}");
                Ok(())
            }
        }
    }

    /// Applies one filter change and runs its effect.
    ///
    /// Load failures are recorded on the session and also returned.
    pub fn change_filter(&mut self, field: FilterField, value: &str) -> Result<(), BrowseError> {
        let metadata = self.metadata.as_ref().ok_or(BrowseError::MetadataNotLoaded)?;
        metadata.check_value(field, value)?;

        if field == FilterField::Class {
            self.check_class_visible(value.trim())?;
        }

        let transition = apply_filter_change(self.session.filter(), field, value)?;
        let effect = self.session.apply(transition);
        self.run_effect(effect)
    }

    pub fn select_class(&mut self, class_id: &str) -> Result<(), BrowseError> {
        self.change_filter(FilterField::Class, class_id)
    }

    /// Resolves the current session into owned display data.
    pub fn view(&self) -> BrowseView {
        let filter = self.session.filter().clone();
        let mut view = BrowseView {
            semester_label: semester_label(filter.year_sem),
            status: self.session.status().clone(),
            year_sem_menu: YearSemMenu::NoData,
            subjects: Vec::new(),
            classes: Vec::new(),
            selected_class: None,
            projects: self.session.projects().clone(),
            filter,
        };

        let Some(snapshot) = self.session.snapshot() else {
            return view;
        };
        let filter = &view.filter;

        view.year_sem_menu = resolve_year_sem_menu(
            &snapshot.curriculum,
            &filter.batch,
            &filter.department,
            filter.year_sem,
        );

        let visible = resolve_visible_subjects(
            &snapshot.curriculum,
            &snapshot.subjects,
            &filter.batch,
            &filter.department,
            filter.year_sem,
        );
        view.subjects = pair_subjects_with_notes(&visible, &snapshot.notes)
            .into_iter()
            .map(|entry| SubjectCard {
                subject: entry.subject.clone(),
                notes: entry.notes.into_iter().cloned().collect(),
            })
            .collect();

        let selection = resolve_class_selection(
            &snapshot.classes,
            &filter.batch,
            &filter.department,
            filter.current_class_id.as_deref(),
        );
        view.selected_class = selection.selected.map(|class| class.class_id.clone());
        view.classes = selection.classes.into_iter().cloned().collect();

        view
    }

    /// Renders every page fragment for the current session.
    pub fn render_page(&self) -> Result<RenderedPage, BrowseError> {
        let view = self.view();
        let metadata = self.metadata.clone().unwrap_or_default();

        let subjects = match &view.status {
            SessionStatus::Welcome | SessionStatus::Loading => render_welcome()?,
            SessionStatus::Error(_) => render_batch_error(&view.filter.regulation)?,
            SessionStatus::Ready => {
                let cards: Vec<SubjectWithNotes<'_>> = view
                    .subjects
                    .iter()
                    .map(|card| SubjectWithNotes {
                        subject: &card.subject,
                        notes: card.notes.iter().collect(),
                    })
                    .collect();
                render_subjects(&cards, view.filter.year_sem)?
            }
        };

        let selection = ClassSelection {
            classes: view.classes.iter().collect(),
            selected: view
                .classes
                .iter()
                .find(|class| Some(&class.class_id) == view.selected_class.as_ref()),
        };

        Ok(RenderedPage {
            status: render_status(&view.status)?,
            regulation_options: render_filter_options(
                "Select Regulation",
                &metadata.regulations,
                &view.filter.regulation,
            )?,
            batch_options: render_filter_options(
                "Select Batch",
                &metadata.batches,
                &view.filter.batch,
            )?,
            department_options: render_filter_options(
                "Select Department",
                &metadata.departments,
                &view.filter.department,
            )?,
            year_sem: render_year_sem_options(&view.year_sem_menu)?,
            subjects,
            classes: render_class_options(&selection)?,
            projects: render_projects(&view.projects)?,
        })
    }

    fn run_effect(&mut self, effect: TransitionEffect) -> Result<(), BrowseError> {
        match effect {
            TransitionEffect::ShowWelcome => Ok(()),
            TransitionEffect::Reresolve => {
                debug!(
                    "event=filter_reresolve module=service status=ok year_sem={}",
                    self.session
                        .filter()
                        .year_sem
                        .map_or_else(|| "all".to_string(), |term| term.token())
                );
                Ok(())
            }
            TransitionEffect::ReloadDataset => self.reload_dataset(),
            TransitionEffect::FetchProjects(class_id) => self.load_class_projects(&class_id),
        }
    }

    fn reload_dataset(&mut self) -> Result<(), BrowseError> {
        let ticket = self.session.begin_dataset_load();
        let result = load_regulation(&self.fetcher, ticket.regulation());
        let failure = result.as_ref().err().cloned();

        match (self.session.complete_dataset_load(ticket, result), failure) {
            (LoadOutcome::Applied, _) => self.select_default_class(),
            (LoadOutcome::Failed, Some(err)) => Err(BrowseError::Load(err)),
            _ => Ok(()),
        }
    }

    fn select_default_class(&mut self) -> Result<(), BrowseError> {
        let Some(snapshot) = self.session.snapshot().cloned() else {
            return Ok(());
        };
        let filter = self.session.filter();
        let selection = resolve_class_selection(
            &snapshot.classes,
            &filter.batch,
            &filter.department,
            filter.current_class_id.as_deref(),
        );

        match selection.selected {
            Some(class) => {
                let class_id = class.class_id.clone();
                self.load_class_projects(&class_id)
            }
            None => {
                self.session.clear_class_selection();
                Ok(())
            }
        }
    }

    fn load_class_projects(&mut self, class_id: &str) -> Result<(), BrowseError> {
        let ticket = self.session.begin_project_load(class_id);
        let result = load_projects(&self.fetcher, ticket.regulation(), ticket.class_id());
        let failure = result.as_ref().err().cloned();

        match (self.session.complete_project_load(ticket, result), failure) {
            (LoadOutcome::Failed, Some(err)) => Err(BrowseError::Load(err)),
            _ => Ok(()),
        }
    }

    fn check_class_visible(&self, class_id: &str) -> Result<(), BrowseError> {
        let snapshot = self
            .session
            .snapshot()
            .ok_or(BrowseError::DatasetNotLoaded)?;
        let filter = self.session.filter();
        let visible = snapshot.classes.iter().any(|class| {
            class.class_id == class_id && class.matches_cohort(&filter.batch, &filter.department)
        });
        if visible || class_id.is_empty() {
            Ok(())
        } else {
            Err(BrowseError::UnknownClass(class_id.to_string()))
        }
    }
}
