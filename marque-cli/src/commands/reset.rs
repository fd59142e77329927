use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::{AppContext, CliError};

use super::confirm;

/// Discard the saved catalog and go back to the built-in records.
pub(crate) fn run_reset(ctx: &AppContext, yes: bool) -> Result<(), CliError> {
    let mut session = ctx.open_session();

    if !yes {
        log::warn!(
            "This will discard the saved catalog ({} records) at:\n  {}",
            session.dataset().len(),
            ctx.data_file.display(),
        );
        if !confirm("Continue?")? {
            log::info!("Reset cancelled.");
            return Ok(());
        }
    }

    session.reset()?;
    log::info!(
        "{}",
        "Catalog reset.".if_supports_color(Stdout, |t| t.bold())
    );
    log::info!("  Restored {} built-in records.", session.dataset().len());
    Ok(())
}
