//! The single value describing what the client shows.

use crate::pagination::Pagination;
use reel_models::{DetailRecord, Field, Rating, Record, SortMode, TypeFilter, WatchlistEntry};
use serde::Serialize;

pub const EMPTY_QUERY_MESSAGE: &str = "Type a movie or series name to search.";
pub const NOTHING_FOUND_MESSAGE: &str = "Nothing found. Try another name.";
pub const SEARCH_FAILED_MESSAGE: &str = "Something went wrong. Check your connection and try again.";
pub const DETAIL_FAILED_MESSAGE: &str = "Couldn’t load details. Try again.";

pub const ADD_LABEL: &str = "Add to watchlist";
pub const REMOVE_LABEL: &str = "Remove from watchlist";

const TRAILER_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Search,
    Watchlist,
}

/// Exactly one screen is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "lowercase")]
pub enum Screen {
    Search,
    Detail { origin: Origin },
    Watchlist,
}

/// A record as rendered, with its watchlist membership at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRecord {
    pub record: Record,
    pub in_watchlist: bool,
}

impl RenderedRecord {
    pub fn toggle_label(&self) -> &'static str {
        toggle_label(self.in_watchlist)
    }
}

pub fn toggle_label(in_watchlist: bool) -> &'static str {
    if in_watchlist {
        REMOVE_LABEL
    } else {
        ADD_LABEL
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchStatus {
    Idle,
    Loading,
    Results,
    /// Nothing matched; distinct from a failure.
    Empty { message: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    /// The query of the last search actually issued.
    pub query: Option<String>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub filter: TypeFilter,
    pub sort: SortMode,
    pub status: SearchStatus,
    pub records: Vec<RenderedRecord>,
    pub pagination: Option<Pagination>,
}

impl SearchView {
    pub fn new(sort: SortMode, filter: TypeFilter) -> Self {
        Self {
            query: None,
            page: 1,
            total_pages: 0,
            total_results: 0,
            filter,
            sort,
            status: SearchStatus::Idle,
            records: Vec::new(),
            pagination: None,
        }
    }

    /// `1 result for "q"` or `{n} results for "q"`.
    pub fn heading(&self) -> Option<String> {
        if self.status != SearchStatus::Results {
            return None;
        }
        let query = self.query.as_deref()?;
        Some(match self.total_results {
            1 => format!("1 result for \"{}\"", query),
            n => format!("{} results for \"{}\"", n, query),
        })
    }

    pub fn results_visible(&self) -> bool {
        self.query.is_some() && self.status == SearchStatus::Results
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailStatus {
    Idle,
    Loading,
    Loaded,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

/// A detail record plus the render-ready data derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPresentation {
    pub record: DetailRecord,
    pub in_watchlist: bool,
    /// `year · rated · runtime`, skipping what is unavailable.
    pub meta_line: String,
    pub highlights: Vec<Rating>,
    pub plot: Option<String>,
    pub info_rows: Vec<InfoRow>,
    pub trailer_url: String,
}

impl DetailPresentation {
    pub fn new(record: DetailRecord, in_watchlist: bool) -> Self {
        Self {
            meta_line: meta_line(&record),
            highlights: rating_highlights(&record),
            plot: record.plot.as_deref().map(str::to_string),
            info_rows: info_rows(&record),
            trailer_url: trailer_url(record.title()),
            record,
            in_watchlist,
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        toggle_label(self.in_watchlist)
    }
}

/// Other works by the same director, shown under a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedStrip {
    pub director: String,
    pub records: Vec<RenderedRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub id: Option<String>,
    pub status: DetailStatus,
    pub content: Option<DetailPresentation>,
    pub related: Option<RelatedStrip>,
}

impl Default for DetailView {
    fn default() -> Self {
        Self {
            id: None,
            status: DetailStatus::Idle,
            content: None,
            related: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct WatchlistView {
    pub records: Vec<RenderedRecord>,
}

impl WatchlistView {
    pub fn from_entries(entries: &[WatchlistEntry]) -> Self {
        Self {
            records: entries
                .iter()
                .map(|entry| RenderedRecord {
                    record: entry.to_record(),
                    in_watchlist: true,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub screen: Screen,
    pub search: SearchView,
    pub detail: DetailView,
    pub watchlist: WatchlistView,
    pub watchlist_count: String,
}

impl ViewState {
    pub fn new(sort: SortMode, filter: TypeFilter) -> Self {
        Self {
            screen: Screen::Search,
            search: SearchView::new(sort, filter),
            detail: DetailView::default(),
            watchlist: WatchlistView::default(),
            watchlist_count: String::new(),
        }
    }
}

fn meta_line(record: &DetailRecord) -> String {
    let year = Field::new(record.record.year.as_str());
    [&year, &record.rated, &record.runtime]
        .into_iter()
        .filter_map(Field::as_deref)
        .collect::<Vec<_>>()
        .join(" · ")
}

const IMDB_SOURCE: &str = "Internet Movie Database";
const PREFERRED_SOURCES: [&str; 2] = ["Rotten Tomatoes", "Metacritic"];

/// IMDb first, then Rotten Tomatoes and Metacritic, then any other source in
/// upstream order.
pub fn rating_highlights(record: &DetailRecord) -> Vec<Rating> {
    let mut highlights = Vec::new();

    let imdb_entry = record.ratings.iter().find(|r| r.source == IMDB_SOURCE);
    match (imdb_entry, record.rating.as_deref()) {
        (Some(entry), _) => highlights.push(Rating::new("IMDb", entry.value.clone())),
        // A bare top-level score counts as IMDb only when no listed source already carries it.
        (None, Some(score)) if !record.ratings.iter().any(|r| r.value.starts_with(score)) => {
            highlights.push(Rating::new("IMDb", format!("{}/10", score)))
        }
        _ => {}
    }

    for source in PREFERRED_SOURCES {
        if let Some(entry) = record.ratings.iter().find(|r| r.source == source) {
            highlights.push(entry.clone());
        }
    }
    highlights.extend(
        record
            .ratings
            .iter()
            .filter(|r| r.source != IMDB_SOURCE && !PREFERRED_SOURCES.contains(&r.source.as_str()))
            .cloned(),
    );
    highlights
}

fn info_rows(record: &DetailRecord) -> Vec<InfoRow> {
    [
        ("Genre", &record.genre),
        ("Director", &record.director),
        ("Actors", &record.actors),
        ("Box Office", &record.box_office),
        ("Awards", &record.awards),
    ]
    .into_iter()
    .filter_map(|(label, field)| {
        field.as_deref().map(|value| InfoRow {
            label,
            value: value.to_string(),
        })
    })
    .collect()
}

pub fn trailer_url(title: &str) -> String {
    format!(
        "{}{}",
        TRAILER_SEARCH_URL,
        urlencoding::encode(&format!("{} trailer", title))
    )
}
