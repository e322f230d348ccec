use crate::render::RenderResult;
use crate::resolver::{ClassSelection, YearSemMenu};
use crate::state::session::SessionStatus;
use askama::Template;

struct OptionView {
    value: String,
    label: String,
    selected: bool,
    disabled: bool,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% if !placeholder.is_empty() %}<option value="">{{ placeholder }}</option>
{% endif %}{% for opt in options %}<option value="{{ opt.value }}"{% if opt.selected %} selected{% endif %}{% if opt.disabled %} disabled{% endif %}>{{ opt.label }}</option>
{% endfor %}"#
)]
struct OptionsTemplate {
    /// Empty means no placeholder entry.
    placeholder: String,
    options: Vec<OptionView>,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<span class="status status-{{ kind }}" role="status">{{ text }}</span>"#
)]
struct StatusTemplate<'a> {
    kind: &'a str,
    text: &'a str,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<div class="error-banner">Error loading resources for {{ regulation }}. Check file paths.</div>"#
)]
struct BatchErrorTemplate<'a> {
    regulation: &'a str,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<div class="welcome">Select a regulation, batch and department to browse resources.</div>"#
)]
struct WelcomeTemplate;

/// Options markup plus the state the enclosing `<select>` should take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectFragment {
    pub html: String,
    pub disabled: bool,
    pub hidden: bool,
}

/// Renders a metadata-backed picker (regulation, batch or department).
pub fn render_filter_options(
    placeholder: &str,
    values: &[String],
    selected: &str,
) -> RenderResult<String> {
    let template = OptionsTemplate {
        placeholder: placeholder.to_string(),
        options: values
            .iter()
            .map(|value| OptionView {
                value: value.clone(),
                label: value.clone(),
                selected: value == selected,
                disabled: false,
            })
            .collect(),
    };
    Ok(template.render()?)
}

/// Renders the year/semester picker.
///
/// `NoData` produces a disabled picker with a single "No Data" entry.
pub fn render_year_sem_options(menu: &YearSemMenu) -> RenderResult<SelectFragment> {
    let (options, disabled) = match menu {
        YearSemMenu::NoData => (
            vec![OptionView {
                value: String::new(),
                label: "No Data".to_string(),
                selected: false,
                disabled: true,
            }],
            true,
        ),
        YearSemMenu::Options { options, selected } => (
            options
                .iter()
                .map(|term| OptionView {
                    value: term.token(),
                    label: term.label(),
                    selected: Some(*term) == *selected,
                    disabled: false,
                })
                .collect(),
            false,
        ),
    };
    let template = OptionsTemplate {
        placeholder: "All Semesters".to_string(),
        options,
    };
    Ok(SelectFragment {
        html: template.render()?,
        disabled,
        hidden: false,
    })
}

/// Renders the class picker; it stays hidden unless there is a choice to make.
pub fn render_class_options(selection: &ClassSelection<'_>) -> RenderResult<SelectFragment> {
    let selected_id = selection.selected.map(|class| class.class_id.as_str());
    let template = OptionsTemplate {
        placeholder: String::new(),
        options: selection
            .classes
            .iter()
            .map(|class| OptionView {
                value: class.class_id.clone(),
                label: class.display_name().to_string(),
                selected: Some(class.class_id.as_str()) == selected_id,
                disabled: false,
            })
            .collect(),
    };
    Ok(SelectFragment {
        html: template.render()?,
        disabled: selection.classes.is_empty(),
        hidden: selection.classes.len() < 2,
    })
}

/// Renders the status indicator.
pub fn render_status(status: &SessionStatus) -> RenderResult<String> {
    let (kind, text) = match status {
        SessionStatus::Welcome => ("idle", "Select filters"),
        SessionStatus::Loading => ("loading", "Loading..."),
        SessionStatus::Ready => ("ready", "Ready"),
        SessionStatus::Error(_) => ("error", "Error"),
    };
    Ok(StatusTemplate { kind, text }.render()?)
}

/// Renders the banner shown in place of subjects after a failed batch.
pub fn render_batch_error(regulation: &str) -> RenderResult<String> {
    Ok(BatchErrorTemplate { regulation }.render()?)
}

/// Renders the placeholder shown before a complete filter is chosen.
pub fn render_welcome() -> RenderResult<String> {
    Ok(WelcomeTemplate.render()?)
}

#[cfg(test)]
mod tests {
    use super::{
        render_batch_error, render_class_options, render_filter_options, render_status,
        render_welcome, render_year_sem_options,
    };
    use crate::model::class::ClassRecord;
    use crate::model::term::YearSem;
    use crate::resolver::{ClassSelection, YearSemMenu};
    use crate::state::session::SessionStatus;

    #[test]
    fn no_data_menu_is_disabled() {
        let fragment = render_year_sem_options(&YearSemMenu::NoData).unwrap();
        assert!(fragment.disabled);
        assert!(fragment.html.contains("No Data"));
    }

    #[test]
    fn year_sem_options_mark_selection() {
        let menu = YearSemMenu::Options {
            options: vec![YearSem::new(1, 1), YearSem::new(1, 2)],
            selected: Some(YearSem::new(1, 2)),
        };
        let fragment = render_year_sem_options(&menu).unwrap();
        assert!(!fragment.disabled);
        assert!(fragment.html.contains("All Semesters"));
        assert!(fragment.html.contains("Year 1 - Sem 1"));
        assert!(fragment.html.contains(r#"value="1-2" selected"#));
        assert_eq!(fragment.html.matches(" selected").count(), 1);
    }

    #[test]
    fn single_class_picker_is_hidden() {
        let only = ClassRecord {
            class_id: "cse-a".to_string(),
            name: String::new(),
            batch: "B1".to_string(),
            dept: "CSE".to_string(),
        };
        let selection = ClassSelection {
            classes: vec![&only],
            selected: Some(&only),
        };
        let fragment = render_class_options(&selection).unwrap();
        assert!(fragment.hidden);
        assert!(fragment.html.contains(">cse-a</option>"));
    }

    #[test]
    fn filter_options_escape_values() {
        let html = render_filter_options(
            "Regulation",
            &["R22".to_string(), "R<18>".to_string()],
            "R22",
        )
        .unwrap();
        assert!(html.contains(r#"value="R22" selected"#));
        assert!(html.contains("R&lt;18&gt;"));
    }

    #[test]
    fn status_and_error_banner_render() {
        assert!(render_status(&SessionStatus::Loading)
            .unwrap()
            .contains("Loading..."));
        assert!(render_status(&SessionStatus::Error("x".to_string()))
            .unwrap()
            .contains("status-error"));
        assert!(render_batch_error("R22")
            .unwrap()
            .contains("Error loading resources for R22. Check file paths."));
        assert!(render_welcome().unwrap().contains("class=\"welcome\""));
    }
}
