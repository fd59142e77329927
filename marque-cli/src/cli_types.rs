//! CLI type definitions: command enums and argument structs.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use marque_lib::{FilterSpec, Scope, YearRange};

#[derive(Parser)]
#[command(name = "marque")]
#[command(about = "Manage a catalog of vehicle model generations", long_about = None)]
pub(crate) struct Cli {
    /// Catalog snapshot file (defaults to the configured or platform data path)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter arguments shared by commands that operate on a view.
#[derive(Args, Clone, Default)]
pub(crate) struct FilterArgs {
    /// Case-insensitive text matched against manufacturer, model and model code
    #[arg(short, long)]
    pub search: Option<String>,

    /// Manufacturer names to include, exact match (e.g., Toyota,Honda)
    #[arg(short, long, value_delimiter = ',')]
    pub manufacturer: Vec<String>,

    /// Earliest start year to include
    #[arg(long)]
    pub from: Option<i32>,

    /// Latest start year to include
    #[arg(long)]
    pub to: Option<i32>,
}

impl FilterArgs {
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.manufacturer.is_empty()
            && self.from.is_none()
            && self.to.is_none()
    }

    pub fn to_filter(&self) -> FilterSpec {
        FilterSpec {
            search_term: self.search.clone().unwrap_or_default(),
            manufacturers: self.manufacturer.iter().cloned().collect::<BTreeSet<_>>(),
            year_range: YearRange::new(
                self.from.unwrap_or(i32::MIN),
                self.to.unwrap_or(i32::MAX),
            ),
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show one page of the catalog
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page to show (clamped to the last page)
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page (defaults to catalog.page_size in settings)
        #[arg(long)]
        page_size: Option<usize>,

        /// Also print each record's identity key (for `delete --key`)
        #[arg(long)]
        keys: bool,
    },

    /// Show record counts per manufacturer, or the models of one manufacturer
    Facets {
        /// List the models of this manufacturer (case-insensitive)
        #[arg(short, long)]
        manufacturer: Option<String>,
    },

    /// Merge records from a CSV file into the catalog
    Import {
        /// CSV file with a Manufacturer,Model,Generation,Model_Code,Start_Year,End_Year header
        file: PathBuf,
    },

    /// Write the catalog to a dated CSV file
    Export {
        /// Output directory or file (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete records by identity key or by filter
    Delete {
        /// Identity key of a record to delete (repeatable)
        #[arg(short, long)]
        key: Vec<String>,

        /// Delete every record matching the filter flags
        #[arg(long)]
        matching: bool,

        #[command(flatten)]
        filter: FilterArgs,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Ask the AI provider for missing generations
    Suggest {
        /// Manufacturer scope, or ALL
        #[arg(short, long, default_value = "ALL")]
        manufacturer: Scope,

        /// Model scope, or ALL
        #[arg(long, default_value = "ALL")]
        model: Scope,

        /// Merge suggestions without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Replace the catalog with an AI-generated starter catalog
    Init {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Discard the saved catalog and restore the built-in records
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show settings and provider configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and where each provider value comes from
    Show,

    /// Print the settings file path
    Path,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn filter_args_build_filter() {
        let cli = Cli::parse_from([
            "marque", "list", "-m", "Toyota,Honda", "--from", "2019", "-s", "civic",
        ]);
        let Commands::List { filter, page, .. } = cli.command else {
            panic!("expected list");
        };
        assert_eq!(page, 1);
        let spec = filter.to_filter();
        assert_eq!(spec.search_term, "civic");
        assert!(spec.manufacturers.contains("Toyota"));
        assert!(spec.manufacturers.contains("Honda"));
        assert_eq!(spec.year_range, YearRange::new(2019, i32::MAX));
    }

    #[test]
    fn suggest_scope_defaults_to_all() {
        let cli = Cli::parse_from(["marque", "suggest", "-m", "BMW"]);
        let Commands::Suggest {
            manufacturer,
            model,
            yes,
        } = cli.command
        else {
            panic!("expected suggest");
        };
        assert_eq!(manufacturer, Scope::Only("BMW".into()));
        assert_eq!(model, Scope::All);
        assert!(!yes);
    }

    #[test]
    fn empty_filter_args() {
        assert!(FilterArgs::default().is_empty());
        let args = FilterArgs {
            search: Some("  ".into()),
            ..Default::default()
        };
        assert!(args.is_empty());
    }
}
