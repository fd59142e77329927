//! Import CSV text into the catalog dataset.
//!
//! Decoding is all-or-nothing: a format or row error returns before anything
//! is merged. Decoded rows then go through the same merge path as provider
//! suggestions.

use marque_catalog::{CandidateRecord, CodecError, VehicleRecord, from_text};

use crate::merge::merge_candidates;
use crate::progress::ImportProgress;

/// Counts from a single CSV import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Rows that decoded into records (short rows excluded).
    pub rows_decoded: usize,
    pub accepted: usize,
    pub rejected: usize,
}

/// The merged dataset plus what happened to the imported rows.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub dataset: Vec<VehicleRecord>,
    pub stats: ImportStats,
    pub rejected: Vec<CandidateRecord>,
}

/// Decode `text` and merge the rows into `dataset`.
///
/// `dataset` is not modified; the caller swaps in [`ImportOutcome::dataset`].
pub fn import_text(
    dataset: &[VehicleRecord],
    text: &str,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportOutcome, CodecError> {
    if let Some(p) = progress {
        p.on_phase("Decoding CSV");
    }
    let candidates = from_text(text)?;
    let rows_decoded = candidates.len();

    if let Some(p) = progress {
        p.on_phase(&format!("Merging {} row(s)", rows_decoded));
    }
    let outcome = merge_candidates(dataset, candidates);

    if let Some(p) = progress {
        for r in &outcome.rejected {
            p.on_rejected(r);
        }
    }

    let stats = ImportStats {
        rows_decoded,
        accepted: outcome.accepted,
        rejected: outcome.rejected.len(),
    };

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Imported {} new record(s), {} duplicate(s) skipped",
            stats.accepted, stats.rejected
        ));
    }

    Ok(ImportOutcome {
        dataset: outcome.dataset,
        stats,
        rejected: outcome.rejected,
    })
}
