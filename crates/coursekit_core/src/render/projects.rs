use crate::render::{numbered_links, LinkView, RenderResult};
use crate::resolver::group_projects_by_category;
use crate::state::session::ProjectPanel;
use askama::Template;

struct MemberView {
    name: String,
    roll: String,
}

struct ProjectView {
    heading: String,
    members: Vec<MemberView>,
    presentations: Vec<LinkView>,
    reports: Vec<LinkView>,
}

struct GroupView {
    category: String,
    projects: Vec<ProjectView>,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% for group in groups %}<details class="project-group" open>
  <summary>{{ group.category }}</summary>
  <div class="project-list">
{% for project in group.projects %}    <div class="project">
      <div class="project-title">{{ project.heading }}</div>
      <div class="project-members">{% for member in project.members %}{{ member.name }}{% if !member.roll.is_empty() %} <span class="roll">({{ member.roll }})</span>{% endif %}{% if !loop.last %}, {% endif %}{% endfor %}</div>
      <div class="project-links">{% for link in project.presentations %}<a class="presentation" href="{{ link.href }}" target="_blank" rel="noopener">{{ link.label }}</a>{% endfor %}{% for link in project.reports %}<a class="report" href="{{ link.href }}" target="_blank" rel="noopener">{{ link.label }}</a>{% endfor %}</div>
    </div>
{% endfor %}  </div>
</details>
{% endfor %}"#
)]
struct ProjectGroupsTemplate {
    groups: Vec<GroupView>,
}

#[derive(Template)]
#[template(ext = "html", source = r#"<div class="empty-state">{{ message }}</div>"#)]
struct PanelMessageTemplate<'a> {
    message: &'a str,
}

/// Renders the projects container for the selected class.
pub fn render_projects(panel: &ProjectPanel) -> RenderResult<String> {
    let projects = match panel {
        ProjectPanel::NoClasses => return message("No classes found."),
        ProjectPanel::Loading => return message("Loading Projects..."),
        ProjectPanel::Unavailable => return message("No projects uploaded."),
        ProjectPanel::Invalid(_) => return message("Projects data could not be read."),
        ProjectPanel::Loaded(projects) if projects.is_empty() => {
            return message("No projects found.")
        }
        ProjectPanel::Loaded(projects) => projects,
    };

    let groups = group_projects_by_category(projects)
        .into_iter()
        .map(|group| GroupView {
            category: group.category.to_string(),
            projects: group
                .projects
                .into_iter()
                .map(|project| ProjectView {
                    heading: format!("{}: {}", project.team_no, project.title),
                    members: project
                        .members
                        .iter()
                        .map(|member| MemberView {
                            name: member.name.clone(),
                            roll: member.roll.clone(),
                        })
                        .collect(),
                    presentations: numbered_links("Presentation", &project.presentation_links),
                    reports: numbered_links("Report", &project.documents),
                })
                .collect(),
        })
        .collect();

    Ok(ProjectGroupsTemplate { groups }.render()?)
}

fn message(message: &str) -> RenderResult<String> {
    Ok(PanelMessageTemplate { message }.render()?)
}
