//! Data model types for the vehicle catalog.
//!
//! A [`VehicleRecord`] describes one generation of one model. Records are
//! identified two different ways: the [`RecordKey`] (every field, used for
//! selection and deletion) and the [`DuplicateKey`] (everything except
//! `End_Year`, used when deciding whether an incoming record already exists).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator placed between fields of a [`RecordKey`]. Never appears in
/// catalog text fields.
pub const KEY_SEPARATOR: &str = "||";

/// Literal `End_Year` value for a generation still in production.
pub const PRESENT: &str = "Present";

// ── Record ──────────────────────────────────────────────────────────────────

/// A single model generation.
///
/// Serialized field names match the CSV header and the persisted snapshot,
/// so the same JSON shape is accepted from storage and from the suggestion
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "Model")]
    pub model: String,
    /// Digits only (e.g. "7"), unless the source had no digits at all.
    #[serde(rename = "Generation")]
    pub generation: String,
    #[serde(rename = "Model_Code")]
    pub model_code: String,
    #[serde(rename = "Start_Year")]
    pub start_year: i32,
    /// A four-digit year or [`PRESENT`].
    #[serde(rename = "End_Year")]
    pub end_year: String,
}

/// An unconfirmed record proposed by an import or the suggestion provider.
pub type CandidateRecord = VehicleRecord;

impl VehicleRecord {
    pub fn new(
        manufacturer: impl Into<String>,
        model: impl Into<String>,
        generation: impl Into<String>,
        model_code: impl Into<String>,
        start_year: i32,
        end_year: impl Into<String>,
    ) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            model: model.into(),
            generation: generation.into(),
            model_code: model_code.into(),
            start_year,
            end_year: end_year.into(),
        }
    }

    /// Identity key over all six fields, trimmed and lowercased.
    pub fn key(&self) -> RecordKey {
        let start_year = self.start_year.to_string();
        let parts = [
            self.manufacturer.as_str(),
            self.model.as_str(),
            self.generation.as_str(),
            self.model_code.as_str(),
            start_year.as_str(),
            self.end_year.as_str(),
        ];
        let joined = parts
            .iter()
            .map(|p| p.trim().to_lowercase())
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR);
        RecordKey(joined)
    }

    /// Key used by the merge path. Ignores `End_Year`.
    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey {
            manufacturer: self.manufacturer.to_lowercase(),
            model: self.model.to_lowercase(),
            generation: self.generation.to_lowercase(),
            model_code: self.model_code.to_lowercase(),
            start_year: self.start_year,
        }
    }

    /// Whether the generation is still in production.
    pub fn is_current(&self) -> bool {
        self.end_year.trim().eq_ignore_ascii_case(PRESENT)
    }

    /// Production span for display, e.g. `2018-Present`.
    pub fn years(&self) -> String {
        format!("{}-{}", self.start_year, self.end_year)
    }
}

impl fmt::Display for VehicleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} gen {} ({}, {})",
            self.manufacturer,
            self.model,
            self.generation,
            self.model_code,
            self.years()
        )
    }
}

// ── Keys ────────────────────────────────────────────────────────────────────

/// Identity of a record for selection and deletion.
///
/// Two records differing only in `End_Year` have different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Comparison key for duplicate detection during merge.
///
/// Text fields are compared case-insensitively and `Start_Year` exactly.
/// `End_Year` is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    manufacturer: String,
    model: String,
    generation: String,
    model_code: String,
    start_year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g20(end_year: &str) -> VehicleRecord {
        VehicleRecord::new("BMW", "3 Series", "7", "G20", 2018, end_year)
    }

    #[test]
    fn key_includes_end_year() {
        assert_ne!(g20("Present").key(), g20("2023").key());
    }

    #[test]
    fn duplicate_key_ignores_end_year() {
        assert_eq!(g20("Present").duplicate_key(), g20("2023").duplicate_key());
    }

    #[test]
    fn key_is_trimmed_and_case_insensitive() {
        let messy = VehicleRecord::new(" bmw ", "3 SERIES", "7 ", " g20", 2018, "present");
        assert_eq!(messy.key(), g20("Present").key());
        assert_eq!(
            g20("Present").key().as_str(),
            "bmw||3 series||7||g20||2018||present"
        );
    }

    #[test]
    fn duplicate_key_is_case_insensitive_but_not_trimmed() {
        let upper = VehicleRecord::new("BMW", "3 SERIES", "7", "g20", 2018, "Present");
        assert_eq!(upper.duplicate_key(), g20("Present").duplicate_key());

        let padded = VehicleRecord::new("BMW ", "3 Series", "7", "G20", 2018, "Present");
        assert_ne!(padded.duplicate_key(), g20("Present").duplicate_key());
    }

    #[test]
    fn start_year_must_match_exactly() {
        let other = VehicleRecord::new("BMW", "3 Series", "7", "G20", 2019, "Present");
        assert_ne!(other.duplicate_key(), g20("Present").duplicate_key());
    }

    #[test]
    fn serde_uses_catalog_field_names() {
        let json = serde_json::to_value(g20("Present")).unwrap();
        assert_eq!(json["Manufacturer"], "BMW");
        assert_eq!(json["Model_Code"], "G20");
        assert_eq!(json["Start_Year"], 2018);
        assert_eq!(json["End_Year"], "Present");
    }

    #[test]
    fn is_current_checks_present() {
        assert!(g20("Present").is_current());
        assert!(!g20("2023").is_current());
    }
}
