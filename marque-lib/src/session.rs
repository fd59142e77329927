//! The catalog session: sole owner of the dataset and everything derived
//! from it.
//!
//! Every mutation builds a new dataset, sorts it, persists it (best effort),
//! and then recomputes the derived state: filtered view, facets, and the
//! clamped page number. Nothing is recomputed lazily on read.
//!
//! Provider calls and imports are split into `begin_*` / `finish_*` pairs so
//! a caller can hold the busy gate across an await point while still letting
//! the rest of the application observe [`CatalogSession::busy`]. The async
//! helpers ([`CatalogSession::suggest`], [`CatalogSession::initialize`]) do
//! both halves for callers that don't need that.

use std::collections::HashSet;

use chrono::NaiveDate;
use marque_catalog::{CandidateRecord, RecordKey, VehicleRecord, seed_dataset, sort_dataset, to_text};
use marque_import::{
    ImportProgress, ImportStats, ProviderError, SuggestScope, SuggestionProvider, dedupe_by_key,
    merge_candidates, screen_candidates,
};

use crate::error::{Operation, SessionError};
use crate::filter::{Facets, FilterSpec, YearRange, filter_view, models_for};
use crate::pagination::{Page, clamp_page, page, total_pages};
use crate::storage::{SnapshotStore, load_dataset, serialize_snapshot};

/// Snapshot handed to the provider for a suggestion request.
#[derive(Debug, Clone)]
pub struct SuggestRequest {
    pub scope: SuggestScope,
    pub current: Vec<VehicleRecord>,
}

/// What a finished suggestion request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// New candidates are pending confirmation.
    Pending { count: usize, duplicates: usize },
    /// The provider returned nothing the catalog doesn't already have.
    NothingNew { received: usize },
}

/// Counts from merging confirmed suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Export text plus the filename to offer when saving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
}

/// Suggested export filename for a given date.
pub fn export_filename(date: NaiveDate) -> String {
    format!("vehicle_catalog_{}.csv", date.format("%Y-%m-%d"))
}

pub struct CatalogSession<S: SnapshotStore> {
    dataset: Vec<VehicleRecord>,
    store: S,
    filter: FilterSpec,
    page_size: usize,
    page_number: usize,
    selection: HashSet<RecordKey>,
    pending: Vec<CandidateRecord>,
    busy: Option<Operation>,
    view: Vec<VehicleRecord>,
    facets: Facets,
}

impl<S: SnapshotStore> CatalogSession<S> {
    /// Load the dataset from `store` (or the seed dataset) and compute the
    /// initial views.
    pub fn open(store: S, page_size: usize) -> Self {
        let dataset = load_dataset(&store);
        let mut session = Self {
            dataset,
            store,
            filter: FilterSpec::default(),
            page_size: page_size.max(1),
            page_number: 1,
            selection: HashSet::new(),
            pending: Vec::new(),
            busy: None,
            view: Vec::new(),
            facets: Facets::default(),
        };
        session.recompute_views();
        session
    }

    // ── Read access ─────────────────────────────────────────────────────────

    pub fn dataset(&self) -> &[VehicleRecord] {
        &self.dataset
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Records passing the current filter.
    pub fn view(&self) -> &[VehicleRecord] {
        &self.view
    }

    /// Facets over the whole dataset.
    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    /// Distinct models for a manufacturer across the whole dataset.
    pub fn models_for(&self, manufacturer: &str) -> Vec<String> {
        models_for(&self.dataset, manufacturer)
    }

    /// The current page of the filtered view.
    pub fn page(&self) -> Page<'_, VehicleRecord> {
        page(&self.view, self.page_size, self.page_number)
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.view.len(), self.page_size)
    }

    pub fn selection(&self) -> &HashSet<RecordKey> {
        &self.selection
    }

    pub fn is_selected(&self, record: &VehicleRecord) -> bool {
        self.selection.contains(&record.key())
    }

    /// Suggestions awaiting confirmation.
    pub fn pending(&self) -> &[CandidateRecord] {
        &self.pending
    }

    /// The operation currently holding the busy gate.
    pub fn busy(&self) -> Option<Operation> {
        self.busy
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    // ── Filters and paging ──────────────────────────────────────────────────

    /// Replace the whole filter. Resets to page 1 and clears the selection.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.filter_changed();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
        self.filter_changed();
    }

    /// Add `manufacturer` to the manufacturer filter, or remove it if present.
    pub fn toggle_manufacturer(&mut self, manufacturer: &str) {
        if !self.filter.manufacturers.remove(manufacturer) {
            self.filter.manufacturers.insert(manufacturer.to_string());
        }
        self.filter_changed();
    }

    pub fn set_year_range(&mut self, range: YearRange) {
        self.filter.year_range = range;
        self.filter_changed();
    }

    pub fn clear_filters(&mut self) {
        self.filter = FilterSpec::default();
        self.filter_changed();
    }

    /// Jump to a page, clamped to the valid range. Returns the page shown.
    pub fn go_to_page(&mut self, page_number: usize) -> usize {
        self.page_number = clamp_page(page_number, self.view.len(), self.page_size);
        self.page_number
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page_number + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.page_number.saturating_sub(1))
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_number = clamp_page(self.page_number, self.view.len(), self.page_size);
    }

    fn filter_changed(&mut self) {
        self.page_number = 1;
        self.selection.clear();
        self.recompute_views();
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// Toggle a key in the selection. Returns whether it is now selected.
    pub fn toggle_selected(&mut self, key: &RecordKey) -> bool {
        if self.selection.remove(key) {
            false
        } else {
            self.selection.insert(key.clone());
            true
        }
    }

    /// Select every record on the current page.
    pub fn select_page(&mut self) {
        let keys: Vec<RecordKey> = self.page().items.iter().map(|r| r.key()).collect();
        self.selection.extend(keys);
    }

    /// Select every record in the filtered view.
    pub fn select_view(&mut self) {
        self.selection.extend(self.view.iter().map(|r| r.key()));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ── Deletion ────────────────────────────────────────────────────────────

    /// Delete every record whose identity key is in `keys`. Returns how many
    /// records were removed.
    pub fn delete_keys(
        &mut self,
        keys: impl IntoIterator<Item = RecordKey>,
    ) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        let doomed: HashSet<RecordKey> = keys.into_iter().collect();
        if doomed.is_empty() {
            return Ok(0);
        }

        let before = self.dataset.len();
        let remaining: Vec<VehicleRecord> = self
            .dataset
            .iter()
            .filter(|r| !doomed.contains(&r.key()))
            .cloned()
            .collect();
        let removed = before - remaining.len();

        if removed > 0 {
            log::info!("Deleted {} record(s)", removed);
            self.commit(remaining);
        }
        Ok(removed)
    }

    /// Delete the selected records and clear the selection.
    pub fn delete_selected(&mut self) -> Result<usize, SessionError> {
        self.ensure_idle()?;
        let keys = std::mem::take(&mut self.selection);
        self.delete_keys(keys)
    }

    // ── CSV import / export ─────────────────────────────────────────────────

    /// Take the busy gate while the import text is being read.
    pub fn begin_import(&mut self) -> Result<(), SessionError> {
        self.begin(Operation::Import)
    }

    /// Release the import gate and merge `text`. On any decode error the
    /// dataset is left untouched.
    pub fn finish_import(
        &mut self,
        text: &str,
        progress: Option<&dyn ImportProgress>,
    ) -> Result<ImportStats, SessionError> {
        self.finish(Operation::Import)?;
        let outcome = marque_import::import_text(&self.dataset, text, progress)?;
        if outcome.stats.accepted > 0 {
            self.commit(outcome.dataset);
        }
        Ok(outcome.stats)
    }

    /// Import text that is already in memory.
    pub fn import_text(
        &mut self,
        text: &str,
        progress: Option<&dyn ImportProgress>,
    ) -> Result<ImportStats, SessionError> {
        self.begin_import()?;
        self.finish_import(text, progress)
    }

    /// Export the full dataset as CSV with a dated filename.
    pub fn export(&self) -> ExportFile {
        ExportFile {
            filename: export_filename(chrono::Local::now().date_naive()),
            contents: to_text(&self.dataset),
        }
    }

    // ── Suggestions ─────────────────────────────────────────────────────────

    /// Take the busy gate and snapshot the dataset for the provider.
    pub fn begin_suggest(&mut self, scope: SuggestScope) -> Result<SuggestRequest, SessionError> {
        self.begin(Operation::Suggest)?;
        log::info!("Requesting suggestions for {}", scope);
        Ok(SuggestRequest {
            scope,
            current: self.dataset.clone(),
        })
    }

    /// Release the gate and screen the provider's candidates. New candidates
    /// replace any previous pending set; the dataset is not modified until
    /// [`confirm_suggestions`](Self::confirm_suggestions).
    pub fn finish_suggest(
        &mut self,
        result: Result<Vec<CandidateRecord>, ProviderError>,
    ) -> Result<SuggestOutcome, SessionError> {
        self.finish(Operation::Suggest)?;
        let candidates = result?;
        let received = candidates.len();

        let (fresh, duplicates) = screen_candidates(&self.dataset, candidates);
        for d in &duplicates {
            log::debug!("Provider suggested an existing record: {}", d);
        }

        if fresh.is_empty() {
            log::info!("No new records found ({} suggestion(s) received)", received);
            self.pending.clear();
            return Ok(SuggestOutcome::NothingNew { received });
        }

        log::info!(
            "{} new suggestion(s) pending, {} duplicate(s) dropped",
            fresh.len(),
            duplicates.len()
        );
        self.pending = fresh;
        Ok(SuggestOutcome::Pending {
            count: self.pending.len(),
            duplicates: duplicates.len(),
        })
    }

    /// Run a suggestion request end to end.
    pub async fn suggest<P: SuggestionProvider>(
        &mut self,
        provider: &P,
        scope: SuggestScope,
    ) -> Result<SuggestOutcome, SessionError> {
        let request = self.begin_suggest(scope)?;
        let result = provider.suggest(&request.scope, &request.current).await;
        self.finish_suggest(result)
    }

    /// Remove one pending suggestion before confirming. Returns whether it
    /// was pending.
    pub fn drop_suggestion(&mut self, key: &RecordKey) -> bool {
        let before = self.pending.len();
        self.pending.retain(|c| &c.key() != key);
        self.pending.len() != before
    }

    pub fn discard_suggestions(&mut self) {
        self.pending.clear();
    }

    /// Merge the pending suggestions into the dataset.
    pub fn confirm_suggestions(&mut self) -> Result<MergeSummary, SessionError> {
        self.ensure_idle()?;
        if self.pending.is_empty() {
            return Err(SessionError::NoPendingSuggestions);
        }
        let candidates = std::mem::take(&mut self.pending);
        let outcome = merge_candidates(&self.dataset, candidates);
        let summary = MergeSummary {
            accepted: outcome.accepted,
            rejected: outcome.rejected.len(),
        };
        if summary.accepted > 0 {
            self.commit(outcome.dataset);
        }
        Ok(summary)
    }

    // ── Initialization / reset ──────────────────────────────────────────────

    pub fn begin_initialize(&mut self) -> Result<(), SessionError> {
        self.begin(Operation::Initialize)
    }

    /// Release the gate and replace the dataset with the provider's starter
    /// catalog. An empty result leaves the dataset as it was. Returns the new
    /// record count (0 when nothing was returned).
    pub fn finish_initialize(
        &mut self,
        result: Result<Vec<VehicleRecord>, ProviderError>,
    ) -> Result<usize, SessionError> {
        self.finish(Operation::Initialize)?;
        let records = result?;
        if records.is_empty() {
            log::info!("Provider returned an empty starter catalog; keeping current data");
            return Ok(0);
        }
        let records = dedupe_by_key(records);
        let count = records.len();
        self.pending.clear();
        self.selection.clear();
        self.commit(records);
        log::info!("Catalog initialized with {} record(s)", count);
        Ok(count)
    }

    /// Run an initialization end to end.
    pub async fn initialize<P: SuggestionProvider>(
        &mut self,
        provider: &P,
    ) -> Result<usize, SessionError> {
        self.begin_initialize()?;
        let result = provider.initialize().await;
        self.finish_initialize(result)
    }

    /// Clear storage and go back to the built-in dataset.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.store.clear()?;
        self.dataset = seed_dataset();
        self.pending.clear();
        self.selection.clear();
        self.recompute_views();
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn ensure_idle(&self) -> Result<(), SessionError> {
        match self.busy {
            Some(op) => Err(SessionError::Busy(op)),
            None => Ok(()),
        }
    }

    fn begin(&mut self, op: Operation) -> Result<(), SessionError> {
        self.ensure_idle()?;
        self.busy = Some(op);
        Ok(())
    }

    fn finish(&mut self, op: Operation) -> Result<(), SessionError> {
        if self.busy != Some(op) {
            return Err(SessionError::NotStarted(op));
        }
        self.busy = None;
        Ok(())
    }

    /// Swap in a new dataset: sort, persist, prune the selection, recompute.
    fn commit(&mut self, records: Vec<VehicleRecord>) {
        self.dataset = sort_dataset(&records);
        self.persist();

        let live: HashSet<RecordKey> = self.dataset.iter().map(|r| r.key()).collect();
        self.selection.retain(|k| live.contains(k));

        self.recompute_views();
    }

    fn persist(&mut self) {
        let snapshot = match serialize_snapshot(&self.dataset) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Failed to serialize catalog: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.save(&snapshot) {
            log::warn!("Failed to save catalog: {}", e);
        }
    }

    fn recompute_views(&mut self) {
        self.view = filter_view(&self.dataset, &self.filter);
        self.facets = Facets::compute(&self.dataset);
        self.page_number = clamp_page(self.page_number, self.view.len(), self.page_size);
    }
}
