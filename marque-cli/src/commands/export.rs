use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::{AppContext, CliError};

/// Write the catalog to a CSV file.
///
/// `output` may be a directory (the dated filename is used inside it) or a
/// file path.
pub(crate) fn run_export(ctx: &AppContext, output: Option<PathBuf>) -> Result<(), CliError> {
    let session = ctx.open_session();
    let export = session.export();

    let path = match output {
        Some(p) if p.is_dir() => p.join(&export.filename),
        Some(p) => p,
        None => PathBuf::from(&export.filename),
    };

    std::fs::write(&path, &export.contents)?;
    log::info!(
        "{} Exported {} records to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        session.dataset().len(),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
