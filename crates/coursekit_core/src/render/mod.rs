//! HTML fragment rendering for resolver output.
//!
//! # Responsibility
//! - Turn resolved subjects, classes, projects and picker state into HTML
//!   fragments a static page swaps into its containers.
//! - Own all escaping; every interpolated value goes through askama's HTML
//!   escaper.
//!
//! # Invariants
//! - Renderers never filter or reorder; they display resolver output as-is.
//! - Link targets with non-web schemes are replaced by `#`.

mod controls;
mod projects;
mod subjects;

pub use controls::{
    render_batch_error, render_class_options, render_filter_options, render_status,
    render_welcome, render_year_sem_options, SelectFragment,
};
pub use projects::render_projects;
pub use subjects::{render_subjects, semester_label};

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug)]
pub struct RenderError(askama::Error);

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "template rendering failed: {}", self.0)
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl From<askama::Error> for RenderError {
    fn from(value: askama::Error) -> Self {
        Self(value)
    }
}

/// One anchor with a display label.
#[derive(Debug, Clone)]
struct LinkView {
    label: String,
    href: String,
}

/// Keeps relative and web links; anything with another scheme becomes `#`.
fn safe_href(raw: &str) -> String {
    let trimmed = raw.trim();
    match url::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https" | "mailto") => trimmed.to_string(),
        Ok(_) => "#".to_string(),
        Err(_) if trimmed.contains(':') && !trimmed.starts_with('/') => "#".to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Labels a link list as `Base`, or `Base 1`, `Base 2`, ... when there are
/// several.
fn numbered_links(base: &str, links: &[String]) -> Vec<LinkView> {
    links
        .iter()
        .enumerate()
        .map(|(index, link)| LinkView {
            label: if links.len() > 1 {
                format!("{base} {}", index + 1)
            } else {
                base.to_string()
            },
            href: safe_href(link),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{numbered_links, safe_href};

    #[test]
    fn safe_href_blocks_script_schemes() {
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href("data:text/html,hi"), "#");
        assert_eq!(safe_href("https://example.com/a.pdf"), "https://example.com/a.pdf");
        assert_eq!(safe_href("./files/a.pdf"), "./files/a.pdf");
        assert_eq!(safe_href("/files/a.pdf"), "/files/a.pdf");
    }

    #[test]
    fn single_link_is_not_numbered() {
        let one = numbered_links("Report", &["a.pdf".to_string()]);
        assert_eq!(one[0].label, "Report");

        let two = numbered_links("Report", &["a.pdf".to_string(), "b.pdf".to_string()]);
        assert_eq!(two[1].label, "Report 2");
    }
}
