//! Year/semester term model and numeric normalization.
//!
//! # Responsibility
//! - Represent one academic term as a `(year, semester)` pair.
//! - Parse and format the `"{year}-{semester}"` token used by filters and
//!   persisted query strings.
//! - Normalize document values that arrive as either JSON integers or numeric
//!   strings into `u32` before any comparison happens.
//!
//! # Invariants
//! - Term comparison is plain integer equality; no string/number mixing
//!   survives decoding.
//! - Ordering is by `year` then `semester`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static YEAR_SEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,4})\s*-\s*(\d{1,4})\s*$").expect("valid year-sem regex"));

/// One academic term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearSem {
    pub year: u32,
    pub semester: u32,
}

impl YearSem {
    pub fn new(year: u32, semester: u32) -> Self {
        Self { year, semester }
    }

    /// Parses a `"{year}-{semester}"` token, e.g. `"2-1"`.
    pub fn parse(token: &str) -> Result<Self, YearSemParseError> {
        let captures = YEAR_SEM_RE
            .captures(token)
            .ok_or_else(|| YearSemParseError(token.to_string()))?;
        let year = captures[1]
            .parse::<u32>()
            .map_err(|_| YearSemParseError(token.to_string()))?;
        let semester = captures[2]
            .parse::<u32>()
            .map_err(|_| YearSemParseError(token.to_string()))?;
        Ok(Self { year, semester })
    }

    /// Canonical token used as option value and persisted filter value.
    pub fn token(&self) -> String {
        format!("{}-{}", self.year, self.semester)
    }

    /// Human-readable label, e.g. `Year 1 - Sem 2`.
    pub fn label(&self) -> String {
        format!("Year {} - Sem {}", self.year, self.semester)
    }
}

impl Display for YearSem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.year, self.semester)
    }
}

/// Error for malformed year/semester tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSemParseError(pub String);

impl Display for YearSemParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid year/semester `{}` (expected `<year>-<semester>`)",
            self.0
        )
    }
}

impl Error for YearSemParseError {}

/// Deserializes a non-negative integer given either as a JSON number or as a
/// string of ASCII digits.
pub(crate) fn term_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    struct TermNumberVisitor;

    impl<'de> Visitor<'de> for TermNumberVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str("a non-negative integer or a numeric string")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<u32, E> {
            u32::try_from(value).map_err(|_| E::custom(format!("{value} is out of range")))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<u32, E> {
            u32::try_from(value).map_err(|_| E::custom(format!("{value} is out of range")))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<u32, E> {
            Err(E::custom(format!("{value} is not an integer")))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<u32, E> {
            let trimmed = value.trim();
            if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
                return Err(E::custom(format!("`{value}` is not a numeric string")));
            }
            trimmed
                .parse::<u32>()
                .map_err(|_| E::custom(format!("`{value}` is out of range")))
        }
    }

    deserializer.deserialize_any(TermNumberVisitor)
}

/// Deserializes a string given either as a JSON string or a JSON integer.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumberVisitor;

    impl<'de> Visitor<'de> for StringOrNumberVisitor {
        type Value = String;

        fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str("a string or an integer")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
            Ok(value)
        }
    }

    deserializer.deserialize_any(StringOrNumberVisitor)
}

#[cfg(test)]
mod tests {
    use super::YearSem;

    #[test]
    fn parse_accepts_padded_tokens() {
        assert_eq!(YearSem::parse(" 2 - 1 ").unwrap(), YearSem::new(2, 1));
        assert_eq!(YearSem::parse("1-2").unwrap().token(), "1-2");
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        for token in ["", "1", "1-", "-2", "a-b", "1-2-3", "1.5-2"] {
            assert!(YearSem::parse(token).is_err(), "token `{token}` should fail");
        }
    }

    #[test]
    fn ordering_is_year_then_semester() {
        let mut terms = vec![
            YearSem::new(2, 1),
            YearSem::new(1, 2),
            YearSem::new(1, 1),
        ];
        terms.sort();
        assert_eq!(
            terms,
            vec![YearSem::new(1, 1), YearSem::new(1, 2), YearSem::new(2, 1)]
        );
    }

    #[test]
    fn label_reads_naturally() {
        assert_eq!(YearSem::new(3, 2).label(), "Year 3 - Sem 2");
    }
}
