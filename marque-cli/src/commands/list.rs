use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::cli_types::FilterArgs;
use crate::{AppContext, CliError};

use super::print_records;

/// Print one page of the filtered catalog.
pub(crate) fn run_list(
    ctx: &AppContext,
    filter: &FilterArgs,
    page: usize,
    page_size: Option<usize>,
    show_keys: bool,
) -> Result<(), CliError> {
    let mut session = ctx.open_session();
    session.set_filter(filter.to_filter());
    if let Some(size) = page_size {
        session.set_page_size(size);
    }
    session.go_to_page(page);

    let page = session.page();
    if page.total_items == 0 {
        if session.dataset().is_empty() {
            log::info!("The catalog is empty. Run 'marque import' or 'marque init' to add records.");
        } else {
            log::info!("No records match the current filter.");
        }
        return Ok(());
    }

    print_records(page.items);
    if show_keys {
        crate::log_blank();
        for record in page.items {
            log::info!("  {}", record.key().if_supports_color(Stdout, |t| t.dimmed()));
        }
    }
    crate::log_blank();
    log::info!(
        "Page {} of {} {}",
        page.number.if_supports_color(Stdout, |t| t.bold()),
        page.total_pages,
        format!(
            "({} of {} records)",
            page.total_items,
            session.dataset().len()
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
    Ok(())
}
