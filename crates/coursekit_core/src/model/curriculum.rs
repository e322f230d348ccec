//! Curriculum mapping of `(batch, department, year, semester)` to subject codes.

use crate::model::term::{term_number, YearSem};
use crate::model::{require_text, FieldError, Record};
use serde::{Deserialize, Serialize};

/// One curriculum row for a cohort and term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumEntry {
    pub batch: String,
    pub department: String,
    /// Normalized from either a JSON integer or a numeric string.
    #[serde(deserialize_with = "term_number")]
    pub year: u32,
    #[serde(deserialize_with = "term_number")]
    pub semester: u32,
    /// Subject codes taught that term, in document order.
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl CurriculumEntry {
    /// Exact cohort match on both batch and department.
    pub fn matches_cohort(&self, batch: &str, department: &str) -> bool {
        self.batch == batch && self.department == department
    }

    pub fn term(&self) -> YearSem {
        YearSem::new(self.year, self.semester)
    }
}

impl Record for CurriculumEntry {
    fn validate(&self) -> Result<(), FieldError> {
        require_text(&self.batch, "batch")?;
        require_text(&self.department, "department")?;
        for (index, code) in self.subjects.iter().enumerate() {
            require_text(code, format!("subjects[{index}]"))?;
        }
        Ok(())
    }
}
