//! Import progress reporting.

use marque_catalog::VehicleRecord;

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called when a phase starts (e.g., "Decoding 120 line(s)").
    fn on_phase(&self, message: &str);

    /// Called for each candidate rejected as a duplicate of an existing record.
    fn on_rejected(&self, record: &VehicleRecord);

    /// Called when the import is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_rejected(&self, _record: &VehicleRecord) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_rejected(&self, record: &VehicleRecord) {
        log::debug!("  duplicate: {}", record);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
