//! marque CLI
//!
//! Command-line interface for browsing and maintaining a catalog of vehicle
//! model generations.

mod cli_types;
mod commands;
mod error;
mod spinner;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use marque_lib::{CatalogSession, FileStore, Settings};

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Shared state resolved once from flags and settings.
pub(crate) struct AppContext {
    pub settings: Settings,
    pub data_file: PathBuf,
    pub quiet: bool,
}

impl AppContext {
    pub(crate) fn open_session(&self) -> CatalogSession<FileStore> {
        log::debug!("Catalog file: {}", self.data_file.display());
        CatalogSession::open(FileStore::new(&self.data_file), self.settings.page_size())
    }
}

/// Print an empty line through the logger so `--quiet` and `--logfile` apply.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.quiet, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = marque_lib::load_settings();

    // Config commands must work even when no data path can be resolved.
    if let Commands::Config { action } = &cli.command {
        match action {
            ConfigAction::Show => commands::config::run_config_show(&settings, cli.data),
            ConfigAction::Path => commands::config::run_config_path(),
        }
        return Ok(());
    }

    let data_file = settings.resolve_data_file(cli.data)?;
    let ctx = AppContext {
        settings,
        data_file,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::List {
            filter,
            page,
            page_size,
            keys,
        } => commands::list::run_list(&ctx, &filter, page, page_size, keys),
        Commands::Facets { manufacturer } => commands::facets::run_facets(&ctx, manufacturer),
        Commands::Import { file } => commands::import::run_import(&ctx, &file),
        Commands::Export { output } => commands::export::run_export(&ctx, output),
        Commands::Delete {
            key,
            matching,
            filter,
            yes,
        } => commands::delete::run_delete(&ctx, key, matching, &filter, yes),
        Commands::Suggest {
            manufacturer,
            model,
            yes,
        } => commands::suggest::run_suggest(&ctx, manufacturer, model, yes),
        Commands::Init { yes } => commands::suggest::run_init(&ctx, yes),
        Commands::Reset { yes } => commands::reset::run_reset(&ctx, yes),
        Commands::Config { .. } => Ok(()),
    }
}

/// Log sink: stdout, plus an optional ANSI-stripped copy in a file.
struct LogSink {
    file: Option<File>,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        if let Some(file) = &mut self.file {
            file.write_all(&strip_ansi_escapes::strip(buf))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Colored label for error and warning lines. Checks stdout, where
/// [`LogSink`] writes.
fn level_prefix(level: log::Level) -> Option<String> {
    match level {
        log::Level::Error => Some("error:".if_supports_color(Stdout, |t| t.red()).to_string()),
        log::Level::Warn => Some(
            "warning:"
                .if_supports_color(Stdout, |t| t.yellow())
                .to_string(),
        ),
        _ => None,
    }
}

/// Install env_logger.
///
/// Normal mode prints bare messages, which is how commands produce their
/// output. `--verbose` adds timestamps and debug records; `--quiet` keeps
/// only warnings and errors. `RUST_LOG` overrides both.
fn init_logging(verbose: bool, quiet: bool, logfile: Option<&std::path::Path>) -> io::Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    let file = logfile.map(File::create).transpose()?;

    env_logger::Builder::new()
        .filter_level(level)
        .filter_module("hyper", log::LevelFilter::Warn)
        .filter_module("hyper_util", log::LevelFilter::Warn)
        .filter_module("reqwest", log::LevelFilter::Warn)
        .filter_module("rustls", log::LevelFilter::Warn)
        .parse_default_env()
        .format(move |buf, record| {
            let level = record.level();
            if verbose {
                writeln!(
                    buf,
                    "{} {:<5} {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    level,
                    record.args()
                )
            } else {
                match level_prefix(level) {
                    Some(prefix) => writeln!(buf, "{} {}", prefix, record.args()),
                    None => writeln!(buf, "{}", record.args()),
                }
            }
        })
        .target(env_logger::Target::Pipe(Box::new(LogSink { file })))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(prefix: Option<String>) -> Option<String> {
        prefix.map(|p| String::from_utf8_lossy(&strip_ansi_escapes::strip(p)).into_owned())
    }

    #[test]
    fn only_errors_and_warnings_get_a_prefix() {
        assert_eq!(plain(level_prefix(log::Level::Error)).as_deref(), Some("error:"));
        assert_eq!(plain(level_prefix(log::Level::Warn)).as_deref(), Some("warning:"));
        assert_eq!(level_prefix(log::Level::Info), None);
        assert_eq!(level_prefix(log::Level::Debug), None);
    }
}
