use coursekit_core::{
    BrowseError, BrowseService, FilterField, LoadError, MemoryFetcher, ProjectPanel,
    SessionStatus, StoredFilters, YearSem, YearSemMenu,
};
use serde_json::json;

fn site() -> MemoryFetcher {
    let mut fetcher = MemoryFetcher::new();
    fetcher
        .insert_json(
            "metadata.json",
            &json!({
                "regulations": ["R18", "R22"],
                "batches": ["B1", "B2"],
                "departments": ["CSE", "ECE"]
            }),
        )
        .insert_json(
            "R22/subjects.json",
            &json!([
                {"code": "CS101", "name": "Intro", "syllabus": {"units": [
                    {"name": "Basics", "topics": [{"topic": "Sets", "subTopics": ["Union"]}]}
                ]}},
                {"code": "CS102", "name": "Data Structures"},
                {"code": "EC101", "name": "Circuits"}
            ]),
        )
        .insert_json(
            "R22/notes.json",
            &json!([
                {"subject_code": "CS101", "resource_type": "Slides", "author_name": "Asha",
                 "author_link": "https://example.com/asha",
                 "links": [{"name": "Part 1", "link": "https://example.com/p1"}]}
            ]),
        )
        .insert_json(
            "R22/classes.json",
            &json!([
                {"class_id": "cse-a", "name": "CSE A", "batch": "B1", "dept": "CSE"},
                {"class_id": "cse-b", "name": "CSE B", "batch": "B1", "dept": "CSE"}
            ]),
        )
        .insert_json(
            "R22/curriculum.json",
            &json!([
                {"batch": "B1", "department": "CSE", "year": 2, "semester": 1, "subjects": ["CS102"]},
                {"batch": "B1", "department": "CSE", "year": 1, "semester": 1, "subjects": ["CS101"]}
            ]),
        )
        .insert_json(
            "R22/cse-a/projects.json",
            &json!([
                {"type_category": "Mini Project", "team_no": "T1", "title": "Parser",
                 "members": [{"name": "Ravi", "roll": "22A01"}]}
            ]),
        )
        .insert_json("R18/subjects.json", &json!([]))
        .insert_json("R18/classes.json", &json!([]));
    fetcher
}

fn ready_service() -> BrowseService<MemoryFetcher> {
    let mut service = BrowseService::new(site());
    service.load_metadata().unwrap();
    service
        .restore(&StoredFilters::from_query("?reg=R22&batch=B1&dept=CSE&yearSem=1-1"))
        .unwrap();
    service
}

#[test]
fn restore_loads_dataset_default_class_and_term() {
    let service = ready_service();
    let view = service.view();

    assert_eq!(view.status, SessionStatus::Ready);
    assert_eq!(view.filter.year_sem, Some(YearSem::new(1, 1)));
    assert_eq!(
        view.year_sem_menu,
        YearSemMenu::Options {
            options: vec![YearSem::new(1, 1), YearSem::new(2, 1)],
            selected: Some(YearSem::new(1, 1)),
        }
    );
    assert_eq!(view.semester_label, "(Year 1 - Sem 1)");

    let codes: Vec<&str> = view
        .subjects
        .iter()
        .map(|card| card.subject.code.as_str())
        .collect();
    assert_eq!(codes, vec!["CS101"]);
    assert_eq!(view.subjects[0].notes.len(), 1);

    assert_eq!(view.classes.len(), 2);
    assert_eq!(view.selected_class.as_deref(), Some("cse-a"));
    let ProjectPanel::Loaded(projects) = &view.projects else {
        panic!("expected loaded projects, got {:?}", view.projects);
    };
    assert_eq!(projects[0].title, "Parser");
}

#[test]
fn all_semesters_shows_every_cohort_subject_in_document_order() {
    let mut service = ready_service();
    service.change_filter(FilterField::YearSem, "").unwrap();

    let view = service.view();
    let codes: Vec<&str> = view
        .subjects
        .iter()
        .map(|card| card.subject.code.as_str())
        .collect();
    assert_eq!(codes, vec!["CS101", "CS102"]);
    assert_eq!(view.semester_label, "(All Semesters)");
    assert!(view.subjects[1].notes.is_empty());
}

#[test]
fn term_without_curriculum_renders_empty_state() {
    let mut service = ready_service();
    service.change_filter(FilterField::YearSem, "1-2").unwrap();

    assert!(service.view().subjects.is_empty());
    let page = service.render_page().unwrap();
    assert!(page.subjects.contains("No subjects found for this selection."));
    assert!(page.subjects.contains("(Year 1 - Sem 2)"));
}

#[test]
fn rendered_page_marks_selections() {
    let page = ready_service().render_page().unwrap();

    assert!(page.regulation_options.contains(r#"value="R22" selected"#));
    assert!(page.department_options.contains(r#"value="CSE" selected"#));
    assert!(page.year_sem.html.contains(r#"value="1-1" selected"#));
    assert!(!page.year_sem.disabled);
    assert!(!page.classes.hidden);
    assert!(page.classes.html.contains(r#"value="cse-a" selected"#));
    assert!(page.subjects.contains("Intro"));
    assert!(page.subjects.contains("Study Resources"));
    assert!(page.projects.contains("T1: Parser"));
    assert!(page.status.contains("status-ready"));
}

#[test]
fn selecting_a_class_without_projects_shows_unavailable() {
    let mut service = ready_service();
    service.select_class("cse-b").unwrap();

    let view = service.view();
    assert_eq!(view.selected_class.as_deref(), Some("cse-b"));
    assert_eq!(view.projects, ProjectPanel::Unavailable);
    assert!(service
        .render_page()
        .unwrap()
        .projects
        .contains("No projects uploaded."));
}

#[test]
fn selecting_an_invisible_class_is_rejected() {
    let mut service = ready_service();
    let err = service.select_class("ece-a").unwrap_err();
    assert!(matches!(err, BrowseError::UnknownClass(id) if id == "ece-a"));
    assert_eq!(service.view().selected_class.as_deref(), Some("cse-a"));
}

#[test]
fn cohort_without_classes_or_curriculum() {
    let mut service = ready_service();
    service.change_filter(FilterField::Department, "ECE").unwrap();

    let view = service.view();
    assert_eq!(view.filter.year_sem, None);
    assert_eq!(view.year_sem_menu, YearSemMenu::NoData);
    assert!(view.subjects.is_empty());
    assert!(view.classes.is_empty());
    assert_eq!(view.projects, ProjectPanel::NoClasses);

    let page = service.render_page().unwrap();
    assert!(page.year_sem.disabled);
    assert!(page.year_sem.html.contains("No Data"));
    assert!(page.projects.contains("No classes found."));
}

#[test]
fn failed_batch_clears_dataset_and_shows_banner() {
    let mut service = ready_service();
    let err = service
        .change_filter(FilterField::Regulation, "R18")
        .unwrap_err();

    match err {
        BrowseError::Load(LoadError::ResourceBatch { regulation, failures }) => {
            assert_eq!(regulation, "R18");
            assert_eq!(failures.len(), 1);
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(service.session().snapshot().is_none());
    let view = service.view();
    assert!(matches!(view.status, SessionStatus::Error(_)));
    assert!(view.subjects.is_empty());
    assert!(view.classes.is_empty());

    let page = service.render_page().unwrap();
    assert!(page
        .subjects
        .contains("Error loading resources for R18. Check file paths."));
    assert!(page.status.contains("status-error"));
}

#[test]
fn clearing_a_cohort_field_returns_to_welcome() {
    let mut service = ready_service();
    service.change_filter(FilterField::Batch, "").unwrap();

    let view = service.view();
    assert_eq!(view.status, SessionStatus::Welcome);
    assert!(view.subjects.is_empty());
    assert!(service.session().snapshot().is_none());
    assert!(service
        .render_page()
        .unwrap()
        .subjects
        .contains("class=\"welcome\""));
}

#[test]
fn restore_drops_unknown_values_and_malformed_terms() {
    let mut service = BrowseService::new(site());
    service.load_metadata().unwrap();
    service
        .restore(&StoredFilters::from_query("reg=R22&batch=B1&dept=MECH&yearSem=1-1"))
        .unwrap();
    assert_eq!(service.view().status, SessionStatus::Welcome);
    assert_eq!(service.filter().department, "");

    service
        .restore(&StoredFilters::from_query("reg=R22&batch=B1&dept=CSE&yearSem=abc"))
        .unwrap();
    assert_eq!(service.view().status, SessionStatus::Ready);
    assert_eq!(service.filter().year_sem, None);
}

#[test]
fn restored_term_the_cohort_does_not_offer_shows_no_subjects() {
    let mut service = BrowseService::new(site());
    service.load_metadata().unwrap();
    service
        .restore(&StoredFilters::from_query("reg=R22&batch=B1&dept=CSE&yearSem=1-2"))
        .unwrap();

    let view = service.view();
    assert_eq!(view.status, SessionStatus::Ready);
    assert_eq!(view.filter.year_sem, Some(YearSem::new(1, 2)));
    assert_eq!(view.semester_label, "(Year 1 - Sem 2)");
    assert!(view.subjects.is_empty());
    assert_eq!(
        view.year_sem_menu,
        YearSemMenu::Options {
            options: vec![YearSem::new(1, 1), YearSem::new(2, 1)],
            selected: None,
        }
    );

    let page = service.render_page().unwrap();
    assert!(page.subjects.contains("No subjects found for this selection."));
    assert!(!page.subjects.contains("Intro"));
}

#[test]
fn malformed_term_token_is_a_filter_error() {
    let mut service = ready_service();
    let err = service
        .change_filter(FilterField::YearSem, "first")
        .unwrap_err();
    assert!(matches!(err, BrowseError::Filter(_)));
    assert_eq!(service.filter().year_sem, Some(YearSem::new(1, 1)));
}
