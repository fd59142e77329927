use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::{AppContext, CliError};

/// Print per-manufacturer counts, or one manufacturer's models.
pub(crate) fn run_facets(ctx: &AppContext, manufacturer: Option<String>) -> Result<(), CliError> {
    let session = ctx.open_session();

    if let Some(name) = manufacturer {
        let models = session.models_for(&name);
        if models.is_empty() {
            log::info!("No models found for '{}'", name);
            return Ok(());
        }
        log::info!(
            "{} ({} models):",
            name.if_supports_color(Stdout, |t| t.bold()),
            models.len()
        );
        for model in models {
            log::info!("  {}", model);
        }
        return Ok(());
    }

    let facets = session.facets();
    if facets.manufacturer_counts.is_empty() {
        log::info!("The catalog is empty.");
        return Ok(());
    }

    log::info!("{}", "Manufacturers:".if_supports_color(Stdout, |t| t.bold()));
    for (name, count) in &facets.manufacturer_counts {
        log::info!(
            "  {:<20} {:>5}",
            name.if_supports_color(Stdout, |t| t.cyan()),
            count
        );
    }
    if let Some((min, max)) = facets.year_bounds {
        crate::log_blank();
        log::info!("Start years: {}-{}", min, max);
    }
    log::info!("Total records: {}", session.dataset().len());
    Ok(())
}
