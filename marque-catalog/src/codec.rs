//! Delimited-text (CSV) export and import.
//!
//! Export writes a fixed header followed by one comma-joined row per record.
//! Fields are not quoted or escaped, so a comma inside a text field will
//! shift columns on the way back in.
//!
//! Import resolves columns by header name, so extra or reordered columns are
//! accepted. Rows shorter than the header are skipped; a non-integer
//! `Start_Year` aborts the whole import.

use thiserror::Error;

use crate::normalize::normalize_generation;
use crate::types::VehicleRecord;

/// Column names, in export order.
pub const FIELD_NAMES: [&str; 6] = [
    "Manufacturer",
    "Model",
    "Generation",
    "Model_Code",
    "Start_Year",
    "End_Year",
];

#[derive(Debug, Error)]
pub enum CodecError {
    /// Missing header columns or no data rows.
    #[error("Invalid CSV format: {0}")]
    Format(String),

    /// A data row whose `Start_Year` is not an integer.
    #[error("Invalid Start_Year \"{value}\" on line {line}: {row}")]
    RowParse { line: u64, value: String, row: String },

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),
}

impl CodecError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}

/// Serialize records as CSV text with a header row.
pub fn to_text(records: &[VehicleRecord]) -> String {
    let mut out = FIELD_NAMES.join(",");
    out.push('\n');
    for r in records {
        let start_year = r.start_year.to_string();
        let row = [
            r.manufacturer.as_str(),
            r.model.as_str(),
            r.generation.as_str(),
            r.model_code.as_str(),
            start_year.as_str(),
            r.end_year.as_str(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

/// Parse CSV text into records.
///
/// Neither deduplicates nor sorts; callers feed the result through the merge
/// path. Line numbers in errors are 1-based physical lines of `text`.
pub fn from_text(text: &str) -> Result<Vec<VehicleRecord>, CodecError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    // Whitespace-only lines carry no data. The rest keep their physical
    // 1-based line numbers so errors point at the right place.
    let (line_numbers, kept): (Vec<u64>, Vec<&str>) = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i as u64 + 1, l))
        .unzip();

    if kept.len() < 2 {
        return Err(CodecError::format(
            "expected a header row and at least one data row",
        ));
    }

    // Quoting is off, so every CSV record is exactly one kept line.
    let joined = kept.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(joined.as_bytes());

    let mut rows = reader.records().zip(line_numbers);

    let header = match rows.next() {
        Some((h, _)) => h?,
        None => return Err(CodecError::format("missing header row")),
    };

    let columns = resolve_columns(&header)?;
    let header_len = header.len();

    let mut records = Vec::new();
    let mut seen_rows = 0u64;

    for (result, line) in rows {
        let row = result?;
        seen_rows += 1;

        if row.len() < header_len {
            log::debug!(
                "Skipping short row on line {} ({} of {} columns)",
                line,
                row.len(),
                header_len
            );
            continue;
        }

        let field = |i: usize| row.get(columns[i]).unwrap_or("");

        let raw_year = field(4);
        let start_year: i32 = raw_year.parse().map_err(|_| CodecError::RowParse {
            line,
            value: raw_year.to_string(),
            row: row.iter().collect::<Vec<_>>().join(","),
        })?;

        records.push(VehicleRecord {
            manufacturer: field(0).to_string(),
            model: field(1).to_string(),
            generation: normalize_generation(field(2)),
            model_code: field(3).to_string(),
            start_year,
            end_year: field(5).to_string(),
        });
    }

    log::debug!("Decoded {} record(s) from {} data row(s)", records.len(), seen_rows);
    Ok(records)
}

/// Map each expected field to its column index in `header`.
fn resolve_columns(header: &csv::StringRecord) -> Result<[usize; 6], CodecError> {
    let mut columns = [0usize; 6];
    let mut missing = Vec::new();

    for (slot, name) in FIELD_NAMES.iter().enumerate() {
        match header.iter().position(|h| h == *name) {
            Some(idx) => columns[slot] = idx,
            None => missing.push(*name),
        }
    }

    if !missing.is_empty() {
        return Err(CodecError::format(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )));
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_header_and_rows() {
        let records = vec![VehicleRecord::new("BMW", "3 Series", "7", "G20", 2018, "Present")];
        let text = to_text(&records);
        assert_eq!(
            text,
            "Manufacturer,Model,Generation,Model_Code,Start_Year,End_Year\n\
             BMW,3 Series,7,G20,2018,Present\n"
        );
    }

    #[test]
    fn export_empty_dataset_is_header_only() {
        assert_eq!(
            to_text(&[]),
            "Manufacturer,Model,Generation,Model_Code,Start_Year,End_Year\n"
        );
    }

    #[test]
    fn resolve_columns_reports_all_missing() {
        let header = csv::StringRecord::from(vec!["Manufacturer", "Model", "Start_Year"]);
        let err = resolve_columns(&header).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Generation"));
        assert!(msg.contains("Model_Code"));
        assert!(msg.contains("End_Year"));
    }
}
