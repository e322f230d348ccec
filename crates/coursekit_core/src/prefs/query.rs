use crate::prefs::{KEY_BATCH, KEY_DEPARTMENT, KEY_REGULATION, KEY_YEAR_SEM};
use crate::state::filter::FilterState;
use url::form_urlencoded;

/// Raw remembered filter values. Blank means "not remembered".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredFilters {
    pub regulation: String,
    pub batch: String,
    pub department: String,
    /// Raw `"{year}-{semester}"` token; parsed when applied.
    pub year_sem: String,
}

impl StoredFilters {
    /// Parses a location query string such as `?reg=R22&dept=CSE`.
    ///
    /// Unknown keys are ignored; the last occurrence of a key wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut filters = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if let Some(slot) = filters.slot_mut(&key) {
                *slot = value.trim().to_string();
            }
        }
        filters
    }

    /// Captures the persisted subset of a filter state.
    pub fn from_state(state: &FilterState) -> Self {
        Self {
            regulation: state.regulation.clone(),
            batch: state.batch.clone(),
            department: state.department.clone(),
            year_sem: state.year_sem.map(|term| term.token()).unwrap_or_default(),
        }
    }

    /// Serializes non-blank values into a query string (without `?`).
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            if !value.is_empty() {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Key/value pairs in persistence order.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (KEY_REGULATION, self.regulation.as_str()),
            (KEY_BATCH, self.batch.as_str()),
            (KEY_DEPARTMENT, self.department.as_str()),
            (KEY_YEAR_SEM, self.year_sem.as_str()),
        ]
    }

    pub(crate) fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        match key {
            KEY_REGULATION => Some(&mut self.regulation),
            KEY_BATCH => Some(&mut self.batch),
            KEY_DEPARTMENT => Some(&mut self.department),
            KEY_YEAR_SEM => Some(&mut self.year_sem),
            _ => None,
        }
    }
}
