//! Class (section) records used to scope student projects.

use crate::model::{require_text, FieldError, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Unique within a regulation; also a path segment for project documents.
    pub class_id: String,
    #[serde(default)]
    pub name: String,
    pub batch: String,
    pub dept: String,
}

impl ClassRecord {
    pub fn matches_cohort(&self, batch: &str, department: &str) -> bool {
        self.batch == batch && self.dept == department
    }

    /// Name shown in class pickers; falls back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.class_id
        } else {
            &self.name
        }
    }
}

impl Record for ClassRecord {
    fn validate(&self) -> Result<(), FieldError> {
        require_text(&self.class_id, "class_id")?;
        require_text(&self.batch, "batch")?;
        require_text(&self.dept, "dept")
    }
}
