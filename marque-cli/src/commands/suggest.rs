use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use marque_lib::{Scope, SessionError, SuggestOutcome, SuggestScope};
use marque_suggest::{GenerativeClient, ProviderConfig};

use crate::spinner::Spinner;
use crate::{AppContext, CliError};

use super::{confirm, print_records};

fn build_client(ctx: &AppContext) -> Result<GenerativeClient, CliError> {
    let config = ProviderConfig::load(&ctx.settings)?;
    log::debug!("Provider: {} ({})", config.model, config.endpoint);
    Ok(GenerativeClient::new(config)?)
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

/// Ask the provider for missing generations and merge them on confirmation.
pub(crate) fn run_suggest(
    ctx: &AppContext,
    manufacturer: Scope,
    model: Scope,
    yes: bool,
) -> Result<(), CliError> {
    let client = build_client(ctx)?;
    let rt = runtime()?;
    let mut session = ctx.open_session();
    let scope = SuggestScope::new(manufacturer, model);

    let spinner = Spinner::start(format!("Asking for suggestions ({})...", scope), ctx.quiet);
    let outcome = rt.block_on(session.suggest(&client, scope));
    spinner.finish();

    let (count, duplicates) = match outcome {
        Ok(SuggestOutcome::Pending { count, duplicates }) => (count, duplicates),
        Ok(SuggestOutcome::NothingNew { received }) => {
            log::info!(
                "Nothing new found ({} suggestion(s) were already in the catalog).",
                received
            );
            return Ok(());
        }
        Err(SessionError::Provider(e)) => {
            log::warn!("Suggestion request failed: {}", e);
            log::warn!("The catalog was not changed.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    log::info!(
        "{}",
        format!("{} new suggestion(s):", count).if_supports_color(Stdout, |t| t.bold())
    );
    print_records(session.pending());
    if duplicates > 0 {
        log::info!(
            "{}",
            format!("({} already in the catalog, skipped)", duplicates)
                .if_supports_color(Stdout, |t| t.dimmed())
        );
    }
    crate::log_blank();

    if !yes && !confirm("Add these records to the catalog?")? {
        session.discard_suggestions();
        log::info!("Suggestions discarded.");
        return Ok(());
    }

    let summary = session.confirm_suggestions()?;
    log::info!(
        "{} Added {} record(s); catalog now has {}.",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.accepted,
        session.dataset().len()
    );
    Ok(())
}

/// Replace the catalog with a provider-generated starter catalog.
pub(crate) fn run_init(ctx: &AppContext, yes: bool) -> Result<(), CliError> {
    let client = build_client(ctx)?;
    let mut session = ctx.open_session();

    if !yes {
        log::warn!(
            "This replaces the current catalog ({} records) with an AI-generated one.",
            session.dataset().len()
        );
        if !confirm("Continue?")? {
            log::info!("Initialization cancelled.");
            return Ok(());
        }
    }

    let rt = runtime()?;
    let spinner = Spinner::start("Generating starter catalog...", ctx.quiet);
    let outcome = rt.block_on(session.initialize(&client));
    spinner.finish();

    match outcome {
        Ok(0) => {
            log::info!("The provider returned no records; the catalog was not changed.");
            Ok(())
        }
        Ok(count) => {
            log::info!(
                "{} Catalog initialized with {} records.",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                count
            );
            Ok(())
        }
        Err(SessionError::Provider(e)) => {
            log::warn!("Initialization failed: {}", e);
            log::warn!("The catalog was not changed.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
