//! Canonical dataset ordering.
//!
//! The dataset is kept sorted by manufacturer, then model, then start year.
//! Every mutation path re-sorts before the result is stored.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::types::VehicleRecord;

/// Compare two display strings the way a default locale collation would.
///
/// Base letters decide first, ignoring case and accents, so "Škoda" sorts
/// between "Seat" and "Volvo". Accents break ties next, then case, with
/// lowercase ahead of uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Return a sorted copy of `records`. The input is left untouched.
///
/// The sort is stable: records equal on all three keys keep their relative
/// input order.
pub fn sort_dataset(records: &[VehicleRecord]) -> Vec<VehicleRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(compare_records);
    sorted
}

fn compare_records(a: &VehicleRecord, b: &VehicleRecord) -> Ordering {
    collate(&a.manufacturer, &b.manufacturer)
        .then_with(|| collate(&a.model, &b.model))
        .then_with(|| a.start_year.cmp(&b.start_year))
}
