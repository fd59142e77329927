pub(crate) mod config;
pub(crate) mod delete;
pub(crate) mod export;
pub(crate) mod facets;
pub(crate) mod import;
pub(crate) mod list;
pub(crate) mod reset;
pub(crate) mod suggest;

use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use marque_lib::VehicleRecord;

use crate::CliError;

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Log a table of records with a bold header row.
pub(crate) fn print_records(records: &[VehicleRecord]) {
    log::info!(
        "{}",
        format!(
            "  {:<14} {:<18} {:>4}  {:<10} {:>5}  {:<7}",
            "Manufacturer", "Model", "Gen", "Code", "Start", "End"
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );
    for r in records {
        log::info!(
            "  {:<14} {:<18} {:>4}  {:<10} {:>5}  {:<7}",
            truncate_str(&r.manufacturer, 14),
            truncate_str(&r.model, 18),
            truncate_str(&r.generation, 4),
            truncate_str(&r.model_code, 10),
            r.start_year,
            r.end_year,
        );
    }
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
pub(crate) fn confirm(question: &str) -> Result<bool, CliError> {
    print!("{} [y/N]: ", question);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_and_long() {
        assert_eq!(truncate_str("Civic", 10), "Civic");
        assert_eq!(truncate_str("Volkswagen Group", 10), "Volkswa...");
        assert_eq!(truncate_str("Citroën", 3), "Cit");
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }
}
