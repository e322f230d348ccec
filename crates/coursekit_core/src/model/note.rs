//! Study-resource notes attached to subjects by code.

use crate::model::{require_text, FieldError, Record};
use serde::{Deserialize, Serialize};

/// One contributed resource for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Foreign key to `Subject::code`.
    pub subject_code: String,
    pub resource_type: String,
    pub author_name: String,
    #[serde(default)]
    pub author_link: String,
    #[serde(default)]
    pub links: Vec<NoteLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteLink {
    pub name: String,
    pub link: String,
}

impl Record for Note {
    fn validate(&self) -> Result<(), FieldError> {
        require_text(&self.subject_code, "subject_code")?;
        require_text(&self.resource_type, "resource_type")?;
        for (index, link) in self.links.iter().enumerate() {
            require_text(&link.name, format!("links[{index}].name"))?;
            require_text(&link.link, format!("links[{index}].link"))?;
        }
        Ok(())
    }
}
