use crate::model::term::YearSem;
use crate::render::{safe_href, LinkView, RenderResult};
use crate::resolver::SubjectWithNotes;
use askama::Template;

struct NoteView {
    resource_type: String,
    author_name: String,
    author_href: String,
    links: Vec<LinkView>,
}

struct TopicView {
    topic: String,
    sub_topics: String,
}

struct UnitView {
    name: String,
    topics: Vec<TopicView>,
}

struct CardView {
    code: String,
    name: String,
    delay_ms: usize,
    notes: Vec<NoteView>,
    units: Vec<UnitView>,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r#"<p class="semester-label">{{ semester_label }}</p>
{% if cards.is_empty() %}<div class="empty-state">No subjects found for this selection.</div>
{% else %}{% for card in cards %}<article class="subject-card fade-in" style="animation-delay: {{ card.delay_ms }}ms">
  <header><h3>{{ card.name }}</h3><span class="subject-code">{{ card.code }}</span></header>
  <section class="study-resources"><h4>Study Resources</h4>
{% if card.notes.is_empty() %}    <div class="no-notes">No notes available yet.</div>
{% else %}{% for note in card.notes %}    <div class="note">
      <div class="note-type">{{ note.resource_type }}</div>
      <div class="note-author">By <a href="{{ note.author_href }}" target="_blank" rel="noopener">{{ note.author_name }}</a></div>
      <div class="note-links">{% for link in note.links %}<a href="{{ link.href }}" target="_blank" rel="noopener">{{ link.label }}</a>{% endfor %}</div>
    </div>
{% endfor %}{% endif %}  </section>
  <section class="curriculum"><h4>Curriculum</h4>
{% if card.units.is_empty() %}    <div class="no-syllabus">Syllabus data not available.</div>
{% else %}{% for unit in card.units %}    <details class="unit"><summary>{{ unit.name }}</summary>
      <ul>{% for topic in unit.topics %}<li><span class="topic">{{ topic.topic }}</span>{% if !topic.sub_topics.is_empty() %}<span class="sub-topics">{{ topic.sub_topics }}</span>{% endif %}</li>{% endfor %}</ul>
    </details>
{% endfor %}{% endif %}  </section>
</article>
{% endfor %}{% endif %}"#
)]
struct SubjectsTemplate {
    semester_label: String,
    cards: Vec<CardView>,
}

/// Heading suffix for the subject list, e.g. `(Year 1 - Sem 2)`.
pub fn semester_label(year_sem: Option<YearSem>) -> String {
    match year_sem {
        Some(term) => format!("({})", term.label()),
        None => "(All Semesters)".to_string(),
    }
}

/// Renders subject cards with their notes and syllabus.
pub fn render_subjects(
    subjects: &[SubjectWithNotes<'_>],
    year_sem: Option<YearSem>,
) -> RenderResult<String> {
    let cards = subjects
        .iter()
        .enumerate()
        .map(|(index, entry)| CardView {
            code: entry.subject.code.clone(),
            name: entry.subject.name.clone(),
            delay_ms: index * 50,
            notes: entry
                .notes
                .iter()
                .map(|note| NoteView {
                    resource_type: note.resource_type.clone(),
                    author_name: note.author_name.clone(),
                    author_href: safe_href(&note.author_link),
                    links: note
                        .links
                        .iter()
                        .map(|link| LinkView {
                            label: link.name.clone(),
                            href: safe_href(&link.link),
                        })
                        .collect(),
                })
                .collect(),
            units: entry
                .subject
                .units()
                .iter()
                .map(|unit| UnitView {
                    name: unit.name.clone(),
                    topics: unit
                        .topics
                        .iter()
                        .map(|topic| TopicView {
                            topic: topic.topic.clone(),
                            sub_topics: topic.sub_topics.join(", "),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    let template = SubjectsTemplate {
        semester_label: semester_label(year_sem),
        cards,
    };
    Ok(template.render()?)
}
