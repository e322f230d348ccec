use super::{
    group_projects_by_category, pair_subjects_with_notes, resolve_class_selection,
    resolve_notes_for_subject, resolve_visible_classes, resolve_visible_subjects,
    resolve_year_sem_menu, resolve_year_sem_options, YearSemMenu,
};
use crate::model::class::ClassRecord;
use crate::model::curriculum::CurriculumEntry;
use crate::model::note::Note;
use crate::model::project::Project;
use crate::model::subject::Subject;
use crate::model::term::YearSem;

fn entry(batch: &str, dept: &str, year: u32, semester: u32, codes: &[&str]) -> CurriculumEntry {
    CurriculumEntry {
        batch: batch.to_string(),
        department: dept.to_string(),
        year,
        semester,
        subjects: codes.iter().map(|code| code.to_string()).collect(),
    }
}

fn subject(code: &str, name: &str) -> Subject {
    Subject {
        code: code.to_string(),
        name: name.to_string(),
        syllabus: None,
    }
}

fn note(code: &str, kind: &str) -> Note {
    Note {
        subject_code: code.to_string(),
        resource_type: kind.to_string(),
        author_name: "A. Author".to_string(),
        author_link: String::new(),
        links: Vec::new(),
    }
}

fn class(id: &str, batch: &str, dept: &str) -> ClassRecord {
    ClassRecord {
        class_id: id.to_string(),
        name: String::new(),
        batch: batch.to_string(),
        dept: dept.to_string(),
    }
}

fn project(category: &str, title: &str) -> Project {
    Project {
        type_category: category.to_string(),
        team_no: "1".to_string(),
        title: title.to_string(),
        members: Vec::new(),
        presentation_links: Vec::new(),
        documents: Vec::new(),
    }
}

fn codes(subjects: &[&Subject]) -> Vec<String> {
    subjects.iter().map(|s| s.code.clone()).collect()
}

#[test]
fn cohort_filter_selects_only_mapped_subjects() {
    let curriculum = vec![entry("B1", "CSE", 1, 1, &["CS101"])];
    let subjects = vec![subject("CS101", "Intro"), subject("CS102", "Other")];

    let visible = resolve_visible_subjects(&curriculum, &subjects, "B1", "CSE", None);
    assert_eq!(codes(&visible), vec!["CS101"]);
}

#[test]
fn unmatched_term_yields_no_subjects() {
    let curriculum = vec![entry("B1", "CSE", 1, 1, &["CS101"])];
    let subjects = vec![subject("CS101", "Intro"), subject("CS102", "Other")];

    let visible =
        resolve_visible_subjects(&curriculum, &subjects, "B1", "CSE", Some(YearSem::new(1, 2)));
    assert!(visible.is_empty());
}

#[test]
fn empty_curriculum_never_shows_all_subjects() {
    let subjects = vec![subject("CS101", "Intro"), subject("CS102", "Other")];
    assert!(resolve_visible_subjects(&[], &subjects, "B1", "CSE", None).is_empty());
}

#[test]
fn matching_entry_with_no_codes_is_fail_closed() {
    let curriculum = vec![entry("B1", "CSE", 1, 1, &[])];
    let subjects = vec![subject("CS101", "Intro")];
    assert!(resolve_visible_subjects(&curriculum, &subjects, "B1", "CSE", None).is_empty());
}

#[test]
fn visible_subjects_keep_subject_document_order() {
    let curriculum = vec![
        entry("B1", "CSE", 1, 1, &["C"]),
        entry("B1", "CSE", 1, 2, &["A", "C"]),
    ];
    let subjects = vec![subject("A", "a"), subject("B", "b"), subject("C", "c")];

    let visible = resolve_visible_subjects(&curriculum, &subjects, "B1", "CSE", None);
    assert_eq!(codes(&visible), vec!["A", "C"]);
}

#[test]
fn cohort_match_is_exact_on_both_fields() {
    let curriculum = vec![
        entry("B1", "ECE", 1, 1, &["EC101"]),
        entry("B2", "CSE", 1, 1, &["CS201"]),
        entry("b1", "cse", 1, 1, &["CS101"]),
    ];
    let subjects = vec![subject("CS101", "x"), subject("EC101", "y"), subject("CS201", "z")];
    assert!(resolve_visible_subjects(&curriculum, &subjects, "B1", "CSE", None).is_empty());
}

#[test]
fn year_sem_options_sort_and_collapse_duplicates() {
    let curriculum = vec![
        entry("B1", "CSE", 2, 1, &[]),
        entry("B1", "CSE", 1, 2, &[]),
        entry("B1", "ECE", 1, 1, &[]),
        entry("B1", "CSE", 1, 1, &[]),
        entry("B1", "CSE", 1, 2, &[]),
    ];
    let options = resolve_year_sem_options(&curriculum, "B1", "CSE");
    assert_eq!(
        options,
        vec![YearSem::new(1, 1), YearSem::new(1, 2), YearSem::new(2, 1)]
    );
}

#[test]
fn year_sem_menu_reports_no_data_distinctly() {
    let curriculum = vec![entry("B1", "ECE", 1, 1, &[])];
    assert_eq!(
        resolve_year_sem_menu(&curriculum, "B1", "CSE", None),
        YearSemMenu::NoData
    );
}

#[test]
fn year_sem_menu_drops_selection_that_is_not_offered() {
    let curriculum = vec![entry("B1", "CSE", 1, 1, &[])];
    let menu = resolve_year_sem_menu(&curriculum, "B1", "CSE", Some(YearSem::new(4, 2)));
    assert_eq!(
        menu,
        YearSemMenu::Options {
            options: vec![YearSem::new(1, 1)],
            selected: None,
        }
    );

    let menu = resolve_year_sem_menu(&curriculum, "B1", "CSE", Some(YearSem::new(1, 1)));
    assert!(matches!(
        menu,
        YearSemMenu::Options { selected: Some(term), .. } if term == YearSem::new(1, 1)
    ));
}

#[test]
fn notes_resolve_by_exact_code() {
    let notes = vec![note("CS101", "Slides"), note("CS1010", "PDF"), note("CS101", "Video")];
    let found = resolve_notes_for_subject(&notes, "CS101");
    let kinds: Vec<&str> = found.iter().map(|n| n.resource_type.as_str()).collect();
    assert_eq!(kinds, vec!["Slides", "Video"]);
    assert!(resolve_notes_for_subject(&notes, "CS102").is_empty());
}

#[test]
fn pairing_marks_subjects_without_notes_with_empty_list() {
    let subjects = vec![subject("CS101", "Intro"), subject("CS102", "Other")];
    let notes = vec![note("CS101", "Slides")];
    let visible: Vec<&Subject> = subjects.iter().collect();

    let paired = pair_subjects_with_notes(&visible, &notes);
    assert_eq!(paired.len(), 2);
    assert_eq!(paired[0].notes.len(), 1);
    assert!(paired[1].notes.is_empty());
}

#[test]
fn visible_classes_filter_exactly_and_default_to_first() {
    let classes = vec![
        class("cse-a", "B1", "CSE"),
        class("ece-a", "B1", "ECE"),
        class("cse-b", "B1", "CSE"),
    ];
    let visible = resolve_visible_classes(&classes, "B1", "CSE");
    let ids: Vec<&str> = visible.iter().map(|c| c.class_id.as_str()).collect();
    assert_eq!(ids, vec!["cse-a", "cse-b"]);
    assert_eq!(visible, resolve_visible_classes(&classes, "B1", "CSE"));

    let selection = resolve_class_selection(&classes, "B1", "CSE", None);
    assert_eq!(selection.selected.map(|c| c.class_id.as_str()), Some("cse-a"));

    let selection = resolve_class_selection(&classes, "B1", "CSE", Some("cse-b"));
    assert_eq!(selection.selected.map(|c| c.class_id.as_str()), Some("cse-b"));

    let selection = resolve_class_selection(&classes, "B1", "CSE", Some("ece-a"));
    assert_eq!(selection.selected.map(|c| c.class_id.as_str()), Some("cse-a"));

    let selection = resolve_class_selection(&classes, "B9", "CSE", None);
    assert!(selection.classes.is_empty());
    assert!(selection.selected.is_none());
}

#[test]
fn project_groups_follow_first_seen_category_order() {
    let projects = vec![project("A", "one"), project("B", "two"), project("A", "three")];
    let groups = group_projects_by_category(&projects);

    let keys: Vec<&str> = groups.iter().map(|g| g.category).collect();
    assert_eq!(keys, vec!["A", "B"]);
    let titles: Vec<&str> = groups[0].projects.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "three"]);
}

#[test]
fn empty_inputs_are_total() {
    assert!(resolve_year_sem_options(&[], "B1", "CSE").is_empty());
    assert!(resolve_visible_classes(&[], "B1", "CSE").is_empty());
    assert!(group_projects_by_category(&[]).is_empty());
    assert!(pair_subjects_with_notes(&[], &[]).is_empty());
}
