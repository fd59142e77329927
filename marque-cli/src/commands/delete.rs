use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use marque_lib::{RecordKey, VehicleRecord};

use crate::cli_types::FilterArgs;
use crate::{AppContext, CliError};

use super::{confirm, print_records};

/// Delete records selected by identity key, by filter, or both.
pub(crate) fn run_delete(
    ctx: &AppContext,
    keys: Vec<String>,
    matching: bool,
    filter: &FilterArgs,
    yes: bool,
) -> Result<(), CliError> {
    if keys.is_empty() && !matching {
        return Err(CliError::usage(
            "Nothing to delete: pass --key or --matching with filter flags",
        ));
    }
    if matching && filter.is_empty() {
        return Err(CliError::usage(
            "--matching needs at least one filter flag (--search, --manufacturer, --from, --to)",
        ));
    }

    let mut session = ctx.open_session();

    if matching {
        session.set_filter(filter.to_filter());
        session.select_view();
    }
    for key in &keys {
        let key = parse_key(key);
        if !session.selection().contains(&key) {
            session.toggle_selected(&key);
        }
    }

    let doomed: Vec<VehicleRecord> = session
        .dataset()
        .iter()
        .filter(|r| session.is_selected(r))
        .cloned()
        .collect();

    if doomed.is_empty() {
        log::info!("No records matched; nothing deleted.");
        return Ok(());
    }

    log::info!(
        "{}",
        format!("{} record(s) will be deleted:", doomed.len())
            .if_supports_color(Stdout, |t| t.bold())
    );
    print_records(&doomed);
    crate::log_blank();

    if !yes && !confirm("Delete these records?")? {
        log::info!("Delete cancelled.");
        return Ok(());
    }

    let removed = session.delete_selected()?;
    log::info!(
        "{} Deleted {} record(s); {} remain.",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        removed,
        session.dataset().len()
    );
    Ok(())
}

/// Normalize a key typed on the command line the same way records derive
/// theirs, so casing and padding around fields don't matter.
fn parse_key(input: &str) -> RecordKey {
    let parts: Vec<String> = input
        .split(marque_catalog::KEY_SEPARATOR)
        .map(|p| p.trim().to_lowercase())
        .collect();
    RecordKey::from(parts.join(marque_catalog::KEY_SEPARATOR))
}
