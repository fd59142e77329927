use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use marque_import::LogProgress;

use crate::{AppContext, CliError};

/// Merge a CSV file into the catalog.
pub(crate) fn run_import(ctx: &AppContext, file: &Path) -> Result<(), CliError> {
    let text = std::fs::read_to_string(file).map_err(|e| {
        CliError::usage(format!("Failed to read {}: {}", file.display(), e))
    })?;

    let mut session = ctx.open_session();
    let stats = session.import_text(&text, Some(&LogProgress))?;

    crate::log_blank();
    log::info!(
        "{}",
        "Import complete".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  Rows read:          {}", stats.rows_decoded);
    log::info!(
        "  Added:              {}",
        stats.accepted.if_supports_color(Stdout, |t| t.green())
    );
    log::info!(
        "  Skipped duplicates: {}",
        stats.rejected.if_supports_color(Stdout, |t| t.yellow())
    );
    log::info!("  Catalog size:       {}", session.dataset().len());
    Ok(())
}
