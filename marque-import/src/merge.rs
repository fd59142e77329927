//! Duplicate screening and merge into the dataset.
//!
//! A candidate is a duplicate when the dataset already holds a record with the
//! same manufacturer, model, generation, and model code (case-insensitive) and
//! the same start year. End year is not compared, so a candidate that only
//! changes `End_Year` is rejected rather than added alongside the original.
//!
//! Candidates in one batch are only checked against the dataset as it stood
//! before the batch, never against each other.

use std::collections::HashSet;

use marque_catalog::{CandidateRecord, DuplicateKey, RecordKey, VehicleRecord, sort_dataset};

/// Result of merging a batch of candidates.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// The new dataset, already in canonical order.
    pub dataset: Vec<VehicleRecord>,
    pub accepted: usize,
    /// Candidates dropped as duplicates, in input order.
    pub rejected: Vec<CandidateRecord>,
}

/// Whether `existing` already holds a record that `candidate` duplicates.
pub fn is_duplicate(existing: &[VehicleRecord], candidate: &VehicleRecord) -> bool {
    let key = candidate.duplicate_key();
    existing.iter().any(|r| r.duplicate_key() == key)
}

/// Split candidates into (new, duplicate) against `dataset`, preserving order.
pub fn screen_candidates(
    dataset: &[VehicleRecord],
    candidates: Vec<CandidateRecord>,
) -> (Vec<CandidateRecord>, Vec<CandidateRecord>) {
    let existing: HashSet<DuplicateKey> = dataset.iter().map(|r| r.duplicate_key()).collect();

    candidates
        .into_iter()
        .partition(|c| !existing.contains(&c.duplicate_key()))
}

/// Append the non-duplicate candidates to `dataset` and re-sort.
///
/// Never fails: duplicates are logged and reported in
/// [`MergeOutcome::rejected`].
pub fn merge_candidates(
    dataset: &[VehicleRecord],
    candidates: Vec<CandidateRecord>,
) -> MergeOutcome {
    let total = candidates.len();
    let (fresh, rejected) = screen_candidates(dataset, candidates);

    for r in &rejected {
        log::debug!("Rejected duplicate candidate: {}", r);
    }

    let accepted = fresh.len();
    let mut merged = Vec::with_capacity(dataset.len() + accepted);
    merged.extend_from_slice(dataset);
    merged.extend(fresh);

    log::info!(
        "Merged {} of {} candidate(s) ({} duplicate(s) skipped)",
        accepted,
        total,
        rejected.len()
    );

    MergeOutcome {
        dataset: sort_dataset(&merged),
        accepted,
        rejected,
    }
}

/// Drop records whose identity key was already seen, keeping the first.
pub fn dedupe_by_key(records: Vec<VehicleRecord>) -> Vec<VehicleRecord> {
    let mut seen: HashSet<RecordKey> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.key());
            if !fresh {
                log::debug!("Dropping repeated record: {}", r);
            }
            fresh
        })
        .collect()
}
