use crate::output::Output;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use reel_core::{
    DetailStatus, DetailView, Pagination, RenderSink, RenderedRecord, SearchStatus, SearchView, ToggleUpdate,
    ViewState, WatchlistView,
};
use std::io::IsTerminal;
use std::time::Duration;

/// Renders view state to the terminal.
///
/// Intermediate states only drive a spinner; the command prints the settled
/// screen once the controller is done.
pub struct TerminalSink<'a> {
    output: &'a Output,
    spinner: Option<ProgressBar>,
    interactive: bool,
}

impl<'a> TerminalSink<'a> {
    pub fn new(output: &'a Output) -> Self {
        Self {
            output,
            spinner: None,
            interactive: output.is_human() && std::io::stderr().is_terminal(),
        }
    }

    fn start_spinner(&mut self, message: &str) {
        if !self.interactive {
            tracing::debug!(operation = "progress", message = message, "Loading");
            return;
        }
        let spinner = self.spinner.get_or_insert_with(|| {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .map(|s| s.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"))
            {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(80));
            spinner
        });
        spinner.set_message(message.to_string());
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl RenderSink for TerminalSink<'_> {
    fn render(&mut self, state: &ViewState) {
        if state.search.status == SearchStatus::Loading {
            self.start_spinner("Searching...");
        } else if state.detail.status == DetailStatus::Loading {
            self.start_spinner("Loading details...");
        } else {
            self.stop_spinner();
        }
    }

    fn toggle_changed(&mut self, update: &ToggleUpdate) {
        self.stop_spinner();
        let verb = if update.in_watchlist { "Added" } else { "Removed" };
        let count = if update.count_label.is_empty() {
            "empty".to_string()
        } else {
            update.count_label.clone()
        };
        self.output
            .success(format!("{} {} ({} on watchlist)", verb, update.id, count));
    }
}

impl Drop for TerminalSink<'_> {
    fn drop(&mut self) {
        self.stop_spinner();
    }
}

pub fn print_search(output: &Output, view: &SearchView) {
    output.data(view);
    match &view.status {
        SearchStatus::Failed { message } => output.error(message),
        SearchStatus::Empty { message } => output.warn(message),
        SearchStatus::Idle | SearchStatus::Loading => {}
        SearchStatus::Results => {
            if let Some(heading) = view.heading() {
                output.println(heading.bold().to_string());
            }
            output.println(record_table(&view.records).to_string());
            if let Some(pagination) = &view.pagination {
                output.println(pagination_line(pagination));
            }
        }
    }
}

pub fn print_detail(output: &Output, view: &DetailView) {
    output.data(view);
    if let DetailStatus::Failed { message } = &view.status {
        output.error(message);
        return;
    }
    let Some(content) = &view.content else {
        return;
    };

    output.println(format!(
        "{} {}",
        content.record.title().bold(),
        format!("[{}]", content.record.id()).dimmed()
    ));
    if !content.meta_line.is_empty() {
        output.println(content.meta_line.dimmed().to_string());
    }
    if !content.highlights.is_empty() {
        let ratings: Vec<String> = content
            .highlights
            .iter()
            .map(|r| format!("{} {}", r.source.cyan(), r.value))
            .collect();
        output.println(ratings.join("   "));
    }
    if let Some(plot) = &content.plot {
        output.println(format!("\n{}\n", plot));
    }

    if !content.info_rows.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_content_arrangement(ContentArrangement::Dynamic);
        for row in &content.info_rows {
            table.add_row(vec![row.label.to_string(), row.value.clone()]);
        }
        output.println(table.to_string());
    }

    let saved = if content.in_watchlist { "★ On your watchlist" } else { "☆ Not on your watchlist" };
    output.println(format!("{}  ({})", saved, content.toggle_label()));
    output.println(format!("Trailer: {}", content.trailer_url));

    if let Some(related) = &view.related {
        output.println(format!("\nMore from {}", related.director).bold().to_string());
        output.println(record_table(&related.records).to_string());
    }
}

pub fn print_watchlist(output: &Output, view: &WatchlistView, count_label: &str) {
    output.data(view);
    if view.records.is_empty() {
        output.println("Your watchlist is empty.");
        return;
    }
    output.println(format!("Watchlist: {}", count_label).bold().to_string());
    output.println(record_table(&view.records).to_string());
}

fn record_table(records: &[RenderedRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "Title", "Year", "Type", "Id"]);
    for rendered in records {
        let record = &rendered.record;
        table.add_row(vec![
            if rendered.in_watchlist { "★" } else { "" }.to_string(),
            record.title.clone(),
            record.year.clone(),
            record.media_type.to_string(),
            record.id.clone(),
        ]);
    }
    table
}

fn pagination_line(pagination: &Pagination) -> String {
    let mut parts = Vec::new();
    if let Some(previous) = pagination.previous {
        parts.push(format!("‹ Previous ({})", previous));
    }
    for page in &pagination.pages {
        if page.current {
            parts.push(format!("[{}]", page.number));
        } else {
            parts.push(page.number.to_string());
        }
    }
    if let Some(next) = pagination.next {
        parts.push(format!("Next ({}) ›", next));
    }
    format!("{}   of {} pages", parts.join("  "), pagination.total_pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_line_marks_current_page() {
        let pagination = Pagination::build(2, 4).unwrap();
        assert_eq!(
            pagination_line(&pagination),
            "‹ Previous (1)  1  [2]  3  4  Next (3) ›   of 4 pages"
        );
    }
}
