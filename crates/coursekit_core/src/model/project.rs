//! Student project records, fetched per class.

use crate::model::term::string_or_number;
use crate::model::{require_text, FieldError, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Grouping label, e.g. `Mini Project`.
    pub type_category: String,
    #[serde(deserialize_with = "string_or_number")]
    pub team_no: String,
    pub title: String,
    #[serde(default)]
    pub members: Vec<ProjectMember>,
    #[serde(default)]
    pub presentation_links: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub roll: String,
}

impl Record for Project {
    fn validate(&self) -> Result<(), FieldError> {
        require_text(&self.type_category, "type_category")?;
        require_text(&self.title, "title")?;
        for (index, member) in self.members.iter().enumerate() {
            require_text(&member.name, format!("members[{index}].name"))?;
        }
        Ok(())
    }
}
