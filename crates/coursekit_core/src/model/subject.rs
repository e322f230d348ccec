//! Subject (course) records with optional syllabus breakdown.

use crate::model::{require_text, FieldError, Record};
use serde::{Deserialize, Serialize};

/// A course identified by a code unique within its regulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub syllabus: Option<Syllabus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllabus {
    #[serde(default)]
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub topic: String,
    #[serde(default, rename = "subTopics")]
    pub sub_topics: Vec<String>,
}

impl Subject {
    /// Returns syllabus units, or an empty slice when no syllabus is authored.
    pub fn units(&self) -> &[Unit] {
        self.syllabus
            .as_ref()
            .map(|syllabus| syllabus.units.as_slice())
            .unwrap_or(&[])
    }
}

impl Record for Subject {
    fn validate(&self) -> Result<(), FieldError> {
        require_text(&self.code, "code")?;
        require_text(&self.name, "name")?;
        for (u_idx, unit) in self.units().iter().enumerate() {
            require_text(&unit.name, format!("syllabus.units[{u_idx}].name"))?;
            for (t_idx, topic) in unit.topics.iter().enumerate() {
                require_text(
                    &topic.topic,
                    format!("syllabus.units[{u_idx}].topics[{t_idx}].topic"),
                )?;
            }
        }
        Ok(())
    }
}
