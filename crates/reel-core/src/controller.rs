//! The view state machine.
//!
//! Every request-issuing transition is split in two: `begin_*` updates the
//! state and hands out a ticket, `apply_*` takes the response together with
//! that ticket. Each slot (search, detail, related) keeps a generation
//! counter and a response whose ticket is no longer current is dropped, so
//! the last request issued always wins.

use crate::gateway::Gateway;
use crate::pagination::Pagination;
use crate::render::{RenderSink, ToggleUpdate};
use crate::sort::sort_records;
use crate::view::{
    toggle_label, DetailPresentation, DetailStatus, DetailView, Origin, RelatedStrip, RenderedRecord, Screen,
    SearchStatus, ViewState, WatchlistView, DETAIL_FAILED_MESSAGE, EMPTY_QUERY_MESSAGE, NOTHING_FOUND_MESSAGE,
    SEARCH_FAILED_MESSAGE,
};
use crate::watchlist::{StorageBackend, StoreError, WatchlistStore};
use reel_models::{DetailRecord, MediaType, Outcome, Record, SearchPage, SortMode, TypeFilter, WatchlistEntry};
use tracing::{debug, info, warn};

/// Most related titles shown under a detail view.
pub const RELATED_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    pub query: String,
    pub page: u32,
    pub filter: TypeFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    pub id: String,
    pub media_type: Option<MediaType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedTicket {
    generation: u64,
    detail_generation: u64,
    current_id: String,
    pub director: String,
}

#[derive(Debug, Default)]
struct Generations {
    search: u64,
    detail: u64,
    related: u64,
}

pub struct ViewController<G: Gateway, S: RenderSink, B: StorageBackend> {
    gateway: G,
    sink: S,
    watchlist: WatchlistStore<B>,
    state: ViewState,
    generations: Generations,
}

impl<G: Gateway, S: RenderSink, B: StorageBackend> ViewController<G, S, B> {
    pub fn new(gateway: G, sink: S, watchlist: WatchlistStore<B>, sort: SortMode, filter: TypeFilter) -> Self {
        let mut state = ViewState::new(sort, filter);
        state.watchlist_count = watchlist.count_label();
        Self {
            gateway,
            sink,
            watchlist,
            state,
            generations: Generations::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn watchlist(&self) -> &WatchlistStore<B> {
        &self.watchlist
    }

    // ---- search ----

    /// Search page 1 for `query` with the current filter.
    pub async fn search(&mut self, query: &str) {
        self.search_page(query, 1).await;
    }

    pub async fn search_page(&mut self, query: &str, page: u32) {
        if let Some(ticket) = self.begin_search(query, page) {
            let outcome = self.gateway.search(&ticket.query, ticket.page, ticket.filter).await;
            self.apply_search(ticket, outcome);
        }
    }

    /// Re-issue the last query for another page.
    pub async fn go_to_page(&mut self, page: u32) {
        if let Some(query) = self.state.search.query.clone() {
            self.search_page(&query, page).await;
        }
    }

    /// An empty query shows the validation message and returns `None`
    /// without issuing anything. Records already on screen stay; a search
    /// still in flight is invalidated.
    pub fn begin_search(&mut self, query: &str, page: u32) -> Option<SearchTicket> {
        let query = query.trim();
        self.state.screen = Screen::Search;
        self.generations.search += 1;
        let search = &mut self.state.search;

        if query.is_empty() {
            search.status = SearchStatus::Failed {
                message: EMPTY_QUERY_MESSAGE.to_string(),
            };
            self.render();
            return None;
        }

        search.status = SearchStatus::Loading;
        search.records.clear();
        search.pagination = None;

        let ticket = SearchTicket {
            generation: self.generations.search,
            query: query.to_string(),
            page: page.max(1),
            filter: search.filter,
        };
        debug!(operation = "search", query = %ticket.query, page = ticket.page, "Search issued");
        self.render();
        Some(ticket)
    }

    /// Returns `false` when the response was stale and dropped.
    pub fn apply_search(&mut self, ticket: SearchTicket, outcome: Outcome<SearchPage>) -> bool {
        if ticket.generation != self.generations.search {
            debug!(operation = "search", query = %ticket.query, "Dropping stale search response");
            return false;
        }

        let search = &mut self.state.search;
        search.query = Some(ticket.query.clone());
        search.page = ticket.page;

        match outcome {
            Outcome::Found(page) if !page.records.is_empty() => {
                search.total_pages = page.total_pages;
                search.total_results = page.total_results;
                search.records = page
                    .records
                    .into_iter()
                    .map(|record| RenderedRecord {
                        in_watchlist: self.watchlist.contains(&record.id),
                        record,
                    })
                    .collect();
                sort_records(&mut search.records, search.sort, |r| &r.record);
                search.pagination = Pagination::build(ticket.page, page.total_pages);
                search.status = SearchStatus::Results;
                info!(
                    operation = "search",
                    query = %ticket.query,
                    page = ticket.page,
                    records = search.records.len(),
                    "Search results shown"
                );
            }
            Outcome::Found(_) | Outcome::NotFound { .. } => {
                search.total_pages = 0;
                search.total_results = 0;
                search.status = SearchStatus::Empty {
                    message: NOTHING_FOUND_MESSAGE.to_string(),
                };
            }
            failure => {
                warn!(operation = "search", query = %ticket.query, outcome = failure.kind(), "Search failed");
                search.total_pages = 0;
                search.total_results = 0;
                search.status = SearchStatus::Failed {
                    message: SEARCH_FAILED_MESSAGE.to_string(),
                };
            }
        }
        self.render();
        true
    }

    /// Re-sort the visible page in place. No request.
    pub fn set_sort(&mut self, sort: SortMode) {
        let search = &mut self.state.search;
        search.sort = sort;
        sort_records(&mut search.records, sort, |r| &r.record);
        self.render();
    }

    /// Change the type filter and re-run the last query from page 1.
    pub async fn set_filter(&mut self, filter: TypeFilter) {
        self.state.search.filter = filter;
        match self.state.search.query.clone() {
            Some(query) => self.search_page(&query, 1).await,
            None => self.render(),
        }
    }

    // ---- detail ----

    /// Open a detail view and then look up related titles.
    pub async fn open_detail(&mut self, id: &str, media_type: Option<MediaType>) {
        if let Some(related) = self.load_detail(id, media_type).await {
            let outcome = self.gateway.search(&related.director, 1, TypeFilter::Movie).await;
            self.apply_related(related, outcome);
        }
    }

    /// Open a detail view without the related-titles lookup. The returned
    /// ticket is left for the caller to resolve or drop.
    pub async fn load_detail(&mut self, id: &str, media_type: Option<MediaType>) -> Option<RelatedTicket> {
        let ticket = self.begin_detail(id, media_type);
        let outcome = self.gateway.detail(&ticket.id, ticket.media_type).await;
        self.apply_detail(ticket, outcome)
    }

    pub async fn open_record(&mut self, record: &Record) {
        self.open_detail(&record.id, Some(record.media_type)).await;
    }

    pub fn begin_detail(&mut self, id: &str, media_type: Option<MediaType>) -> DetailTicket {
        let origin = match self.state.screen {
            Screen::Detail { origin } => origin,
            Screen::Watchlist => Origin::Watchlist,
            Screen::Search => Origin::Search,
        };
        self.state.screen = Screen::Detail { origin };
        self.clear_errors();

        self.generations.detail += 1;
        self.generations.related += 1;
        self.state.detail = DetailView {
            id: Some(id.to_string()),
            status: DetailStatus::Loading,
            content: None,
            related: None,
        };
        self.render();

        DetailTicket {
            generation: self.generations.detail,
            id: id.to_string(),
            media_type,
        }
    }

    /// Returns a related-titles ticket when the detail names a director.
    pub fn apply_detail(&mut self, ticket: DetailTicket, outcome: Outcome<DetailRecord>) -> Option<RelatedTicket> {
        if ticket.generation != self.generations.detail {
            debug!(operation = "detail", id = %ticket.id, "Dropping stale detail response");
            return None;
        }

        let record = match outcome {
            Outcome::Found(record) => record,
            failure => {
                warn!(operation = "detail", id = %ticket.id, outcome = failure.kind(), "Detail failed");
                self.state.detail.status = DetailStatus::Failed {
                    message: DETAIL_FAILED_MESSAGE.to_string(),
                };
                self.render();
                return None;
            }
        };

        let director = record
            .director
            .as_deref()
            .and_then(|names| names.split(',').next())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        let current_id = record.id().to_string();

        let in_watchlist = self.watchlist.contains(record.id());
        self.state.detail.status = DetailStatus::Loaded;
        self.state.detail.content = Some(DetailPresentation::new(record, in_watchlist));
        self.render();

        director.map(|director| RelatedTicket {
            generation: self.generations.related,
            detail_generation: self.generations.detail,
            current_id,
            director,
        })
    }

    /// Any failure or an empty result leaves the strip out entirely.
    pub fn apply_related(&mut self, ticket: RelatedTicket, outcome: Outcome<SearchPage>) -> bool {
        if ticket.generation != self.generations.related || ticket.detail_generation != self.generations.detail {
            debug!(operation = "related", director = %ticket.director, "Dropping stale related response");
            return false;
        }

        let records: Vec<RenderedRecord> = match outcome {
            Outcome::Found(page) => page
                .records
                .into_iter()
                .filter(|record| record.id != ticket.current_id)
                .take(RELATED_LIMIT)
                .map(|record| RenderedRecord {
                    in_watchlist: self.watchlist.contains(&record.id),
                    record,
                })
                .collect(),
            failure => {
                debug!(operation = "related", director = %ticket.director, outcome = failure.kind(), "No related titles");
                Vec::new()
            }
        };

        if records.is_empty() {
            self.state.detail.related = None;
            return true;
        }
        self.state.detail.related = Some(RelatedStrip {
            director: ticket.director,
            records,
        });
        self.render();
        true
    }

    // ---- navigation ----

    /// Leave the detail view for the screen it was opened from.
    pub fn back(&mut self) {
        if let Screen::Detail { origin } = self.state.screen {
            self.generations.detail += 1;
            self.generations.related += 1;
            match origin {
                Origin::Search => self.show_search(),
                Origin::Watchlist => self.show_watchlist(),
            }
        }
    }

    pub fn show_search(&mut self) {
        self.state.screen = Screen::Search;
        self.clear_errors();
        self.render();
    }

    pub fn show_watchlist(&mut self) {
        self.state.screen = Screen::Watchlist;
        self.clear_errors();
        self.state.watchlist = WatchlistView::from_entries(self.watchlist.list());
        self.render();
    }

    // ---- watchlist ----

    /// Flip membership of a record that is on screen. Returns the new membership.
    ///
    /// On the watchlist screen the list is redrawn; elsewhere only the
    /// toggle changes.
    pub fn toggle_watchlist(&mut self, id: &str) -> Result<bool, StoreError> {
        let in_watchlist = if self.watchlist.contains(id) {
            self.watchlist.remove(id)?;
            false
        } else {
            let entry = self
                .find_on_screen(id)
                .ok_or_else(|| StoreError::UnknownRecord(id.to_string()))?;
            self.watchlist.add(entry)?;
            true
        };

        self.state.watchlist_count = self.watchlist.count_label();
        self.mark_membership(id, in_watchlist);
        info!(operation = "watchlist_toggle", id = id, in_watchlist = in_watchlist, "Watchlist updated");

        if self.state.screen == Screen::Watchlist {
            self.state.watchlist = WatchlistView::from_entries(self.watchlist.list());
            self.render();
        } else {
            let update = ToggleUpdate {
                id: id.to_string(),
                in_watchlist,
                label: toggle_label(in_watchlist),
                count_label: self.state.watchlist_count.clone(),
            };
            self.sink.toggle_changed(&update);
        }
        Ok(in_watchlist)
    }

    fn find_on_screen(&self, id: &str) -> Option<WatchlistEntry> {
        let detail = self.state.detail.content.as_ref().map(|c| &c.record.record);
        let related = self.state.detail.related.iter().flat_map(|strip| strip.records.iter());
        self.state
            .search
            .records
            .iter()
            .chain(related)
            .map(|r| &r.record)
            .chain(detail)
            .find(|record| record.id == id)
            .map(WatchlistEntry::from)
    }

    fn mark_membership(&mut self, id: &str, in_watchlist: bool) {
        let related = self
            .state
            .detail
            .related
            .iter_mut()
            .flat_map(|strip| strip.records.iter_mut());
        for rendered in self.state.search.records.iter_mut().chain(related) {
            if rendered.record.id == id {
                rendered.in_watchlist = in_watchlist;
            }
        }
        if let Some(content) = self.state.detail.content.as_mut() {
            if content.record.id() == id {
                content.in_watchlist = in_watchlist;
            }
        }
    }

    fn clear_errors(&mut self) {
        if let SearchStatus::Failed { .. } = self.state.search.status {
            self.state.search.status = if self.state.search.query.is_some() && !self.state.search.records.is_empty() {
                SearchStatus::Results
            } else {
                SearchStatus::Idle
            };
        }
        if let DetailStatus::Failed { .. } = self.state.detail.status {
            self.state.detail.status = DetailStatus::Idle;
        }
    }

    fn render(&mut self) {
        self.sink.render(&self.state);
    }
}

#[cfg(test)]
mod tests;
