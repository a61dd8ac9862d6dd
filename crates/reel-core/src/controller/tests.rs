use super::*;
use crate::view::{ADD_LABEL, REMOVE_LABEL};
use crate::watchlist::MemoryBackend;
use async_trait::async_trait;
use reel_models::Field;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct FakeGateway {
    searches: HashMap<String, Outcome<SearchPage>>,
    details: HashMap<String, Outcome<DetailRecord>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    fn with_search(mut self, query: &str, outcome: Outcome<SearchPage>) -> Self {
        self.searches.insert(query.to_string(), outcome);
        self
    }

    fn with_detail(mut self, id: &str, outcome: Outcome<DetailRecord>) -> Self {
        self.details.insert(id.to_string(), outcome);
        self
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn search(&self, query: &str, page: u32, filter: TypeFilter) -> Outcome<SearchPage> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("search:{}:{}:{}", query, page, filter));
        self.searches
            .get(query)
            .cloned()
            .map(|outcome| outcome.map(|mut p| {
                p.page = page;
                p
            }))
            .unwrap_or_else(|| Outcome::not_found("no match"))
    }

    async fn detail(&self, id: &str, _media_type: Option<MediaType>) -> Outcome<DetailRecord> {
        self.calls.lock().unwrap().push(format!("detail:{}", id));
        self.details
            .get(id)
            .cloned()
            .unwrap_or_else(|| Outcome::not_found("no match"))
    }
}

#[derive(Default)]
struct RecordingSink {
    renders: Vec<ViewState>,
    toggles: Vec<ToggleUpdate>,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, state: &ViewState) {
        self.renders.push(state.clone());
    }

    fn toggle_changed(&mut self, update: &ToggleUpdate) {
        self.toggles.push(update.clone());
    }
}

type TestController = ViewController<FakeGateway, RecordingSink, MemoryBackend>;

fn build(gateway: FakeGateway) -> TestController {
    ViewController::new(
        gateway,
        RecordingSink::default(),
        WatchlistStore::open(MemoryBackend::new()),
        SortMode::YearDesc,
        TypeFilter::Any,
    )
}

fn calls(controller: &TestController) -> Vec<String> {
    controller.gateway.calls.lock().unwrap().clone()
}

fn record(id: &str, title: &str, year: &str) -> Record {
    Record {
        id: id.to_string(),
        title: title.to_string(),
        year: year.to_string(),
        media_type: MediaType::Movie,
        poster_url: Field::Unavailable,
    }
}

fn page(query: &str, total: u32, records: Vec<Record>) -> Outcome<SearchPage> {
    Outcome::Found(SearchPage::new(query, 1, total, records))
}

fn inception() -> DetailRecord {
    let mut detail = DetailRecord::bare(record("tt1375666", "Inception", "2010"));
    detail.director = Field::new("Christopher Nolan, Emma Thomas");
    detail
}

fn nolan_films() -> Vec<Record> {
    let mut films = vec![record("tt1375666", "Inception", "2010")];
    for (i, year) in ["2000", "2002", "2005", "2006", "2008", "2012", "2014"].iter().enumerate() {
        films.push(record(&format!("tt00{}", i), &format!("Film {}", i), year));
    }
    films
}

fn ids(records: &[RenderedRecord]) -> Vec<&str> {
    records.iter().map(|r| r.record.id.as_str()).collect()
}

#[tokio::test]
async fn test_empty_query_issues_nothing() {
    let mut controller = build(FakeGateway::default());
    controller.search("   ").await;

    assert!(calls(&controller).is_empty());
    assert_eq!(
        controller.state().search.status,
        SearchStatus::Failed {
            message: EMPTY_QUERY_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_query_keeps_previous_results() {
    let gateway = FakeGateway::default().with_search("alien", page("alien", 25, vec![record("a", "Alien", "1979")]));
    let mut controller = build(gateway);
    controller.search("alien").await;

    controller.search("  ").await;
    let search = &controller.state().search;
    assert_eq!(
        search.status,
        SearchStatus::Failed {
            message: EMPTY_QUERY_MESSAGE.to_string()
        }
    );
    assert_eq!(ids(&search.records), vec!["a"]);
    assert!(search.pagination.is_some());
    assert_eq!(calls(&controller).len(), 1);
}

#[tokio::test]
async fn test_empty_query_drops_search_in_flight() {
    let mut controller = build(FakeGateway::default());

    let pending = controller.begin_search("alien", 1).unwrap();
    assert!(controller.begin_search("", 1).is_none());
    assert!(!controller.apply_search(pending, page("alien", 1, vec![record("a", "Alien", "1979")])));

    let search = &controller.state().search;
    assert_eq!(
        search.status,
        SearchStatus::Failed {
            message: EMPTY_QUERY_MESSAGE.to_string()
        }
    );
    assert!(search.records.is_empty());
}

#[tokio::test]
async fn test_no_results_is_empty_state_not_error() {
    let gateway = FakeGateway::default().with_search("batman", page("batman", 0, vec![]));
    let mut controller = build(gateway);
    controller.search("batman").await;

    let search = &controller.state().search;
    assert_eq!(
        search.status,
        SearchStatus::Empty {
            message: NOTHING_FOUND_MESSAGE.to_string()
        }
    );
    assert_eq!(search.pagination, None);
    assert!(search.records.is_empty());

    // NotFound from the gateway lands in the same place.
    controller.search("zzzz").await;
    assert!(matches!(controller.state().search.status, SearchStatus::Empty { .. }));
}

#[tokio::test]
async fn test_results_are_sorted_paginated_and_headed() {
    let records = vec![
        record("a", "Alien", "1979"),
        record("b", "Aliens", "1986"),
        record("c", "Alien: Romulus", "2024"),
    ];
    let gateway = FakeGateway::default().with_search("alien", page("alien", 25, records));
    let mut controller = build(gateway);

    controller.search("  alien ").await;
    let search = &controller.state().search;
    assert_eq!(calls(&controller), vec!["search:alien:1:any".to_string()]);
    assert_eq!(ids(&search.records), vec!["c", "b", "a"]);
    assert_eq!(search.heading().as_deref(), Some("25 results for \"alien\""));
    assert_eq!(search.pagination.as_ref().unwrap().numbers(), vec![1, 2, 3]);

    // Loading was rendered before the results, with results hidden.
    let loading = &controller.sink().renders[0].search;
    assert_eq!(loading.status, SearchStatus::Loading);
    assert!(loading.records.is_empty());
}

#[tokio::test]
async fn test_sort_change_is_local() {
    let records = vec![record("a", "beta", "2001"), record("b", "Alpha", "1999")];
    let gateway = FakeGateway::default().with_search("x", page("x", 2, records));
    let mut controller = build(gateway);
    controller.search("x").await;

    controller.set_sort(SortMode::TitleAsc);
    assert_eq!(ids(&controller.state().search.records), vec!["b", "a"]);
    controller.set_sort(SortMode::YearAsc);
    assert_eq!(ids(&controller.state().search.records), vec!["b", "a"]);
    controller.set_sort(SortMode::YearDesc);
    assert_eq!(ids(&controller.state().search.records), vec!["a", "b"]);
    assert_eq!(calls(&controller).len(), 1);
}

#[tokio::test]
async fn test_paging_and_filter_reissue_the_query() {
    let gateway = FakeGateway::default().with_search("alien", page("alien", 50, vec![record("a", "Alien", "1979")]));
    let mut controller = build(gateway);

    controller.search("alien").await;
    controller.go_to_page(3).await;
    assert_eq!(controller.state().search.page, 3);
    assert_eq!(
        controller.state().search.pagination.as_ref().unwrap().numbers(),
        vec![1, 2, 3, 4, 5]
    );

    controller.set_filter(TypeFilter::Series).await;
    assert_eq!(
        calls(&controller),
        vec![
            "search:alien:1:any".to_string(),
            "search:alien:3:any".to_string(),
            "search:alien:1:series".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_filter_change_without_query_does_not_search() {
    let mut controller = build(FakeGateway::default());
    controller.set_filter(TypeFilter::Movie).await;
    assert!(calls(&controller).is_empty());
    assert_eq!(controller.state().search.filter, TypeFilter::Movie);
}

#[tokio::test]
async fn test_last_search_wins() {
    let mut controller = build(FakeGateway::default());

    let first = controller.begin_search("alien", 1).unwrap();
    let second = controller.begin_search("aliens", 1).unwrap();

    assert!(controller.apply_search(second, page("aliens", 1, vec![record("b", "Aliens", "1986")])));
    assert!(!controller.apply_search(first, page("alien", 1, vec![record("a", "Alien", "1979")])));

    let search = &controller.state().search;
    assert_eq!(search.query.as_deref(), Some("aliens"));
    assert_eq!(ids(&search.records), vec!["b"]);
}

#[tokio::test]
async fn test_unreachable_is_error_message() {
    let gateway = FakeGateway::default()
        .with_search("alien", Outcome::unreachable("down"))
        .with_search("tenet", Outcome::misconfigured("no key"));
    let mut controller = build(gateway);

    for query in ["alien", "tenet"] {
        controller.search(query).await;
        assert_eq!(
            controller.state().search.status,
            SearchStatus::Failed {
                message: SEARCH_FAILED_MESSAGE.to_string()
            }
        );
        assert_eq!(controller.state().search.pagination, None);
    }
}

#[tokio::test]
async fn test_detail_loads_related_by_first_director() {
    let gateway = FakeGateway::default()
        .with_detail("tt1375666", Outcome::Found(inception()))
        .with_search("Christopher Nolan", page("Christopher Nolan", 8, nolan_films()));
    let mut controller = build(gateway);

    controller.open_detail("tt1375666", None).await;

    assert_eq!(
        calls(&controller),
        vec![
            "detail:tt1375666".to_string(),
            "search:Christopher Nolan:1:movie".to_string(),
        ]
    );
    let detail = &controller.state().detail;
    assert_eq!(detail.status, DetailStatus::Loaded);
    assert_eq!(detail.content.as_ref().unwrap().record.title(), "Inception");

    let related = detail.related.as_ref().unwrap();
    assert_eq!(related.director, "Christopher Nolan");
    assert_eq!(related.records.len(), RELATED_LIMIT);
    assert!(related.records.iter().all(|r| r.record.id != "tt1375666"));
}

#[tokio::test]
async fn test_load_detail_skips_related_lookup() {
    let gateway = FakeGateway::default()
        .with_detail("tt1375666", Outcome::Found(inception()))
        .with_search("Christopher Nolan", page("Christopher Nolan", 8, nolan_films()));
    let mut controller = build(gateway);

    let related = controller.load_detail("tt1375666", None).await;
    assert_eq!(related.map(|t| t.director), Some("Christopher Nolan".to_string()));
    assert_eq!(calls(&controller), vec!["detail:tt1375666".to_string()]);

    let detail = &controller.state().detail;
    assert_eq!(detail.status, DetailStatus::Loaded);
    assert!(detail.related.is_none());
}

#[tokio::test]
async fn test_related_failures_omit_the_strip() {
    let gateway = FakeGateway::default()
        .with_detail("tt1375666", Outcome::Found(inception()))
        .with_search("Christopher Nolan", Outcome::unreachable("down"));
    let mut controller = build(gateway);

    controller.open_detail("tt1375666", None).await;
    let detail = &controller.state().detail;
    assert_eq!(detail.status, DetailStatus::Loaded);
    assert_eq!(detail.related, None);

    // Only the current title comes back: nothing left to show.
    let gateway = FakeGateway::default()
        .with_detail("tt1375666", Outcome::Found(inception()))
        .with_search(
            "Christopher Nolan",
            page("Christopher Nolan", 1, vec![record("tt1375666", "Inception", "2010")]),
        );
    let mut controller = build(gateway);
    controller.open_detail("tt1375666", None).await;
    assert_eq!(controller.state().detail.related, None);
}

#[tokio::test]
async fn test_unavailable_director_skips_lookup() {
    let mut detail = inception();
    detail.director = Field::Unavailable;
    let gateway = FakeGateway::default().with_detail("tt1375666", Outcome::Found(detail));
    let mut controller = build(gateway);

    controller.open_detail("tt1375666", None).await;
    assert_eq!(calls(&controller), vec!["detail:tt1375666".to_string()]);
}

#[tokio::test]
async fn test_detail_failure_shows_message() {
    let gateway = FakeGateway::default().with_detail("tt404", Outcome::unreachable("down"));
    let mut controller = build(gateway);

    controller.open_detail("tt404", None).await;
    let detail = &controller.state().detail;
    assert_eq!(
        detail.status,
        DetailStatus::Failed {
            message: DETAIL_FAILED_MESSAGE.to_string()
        }
    );
    assert_eq!(detail.content, None);
}

#[tokio::test]
async fn test_stale_detail_and_related_are_dropped() {
    let mut controller = build(FakeGateway::default());

    let first = controller.begin_detail("tt1", None);
    let second = controller.begin_detail("tt1375666", None);
    assert!(controller
        .apply_detail(first, Outcome::Found(DetailRecord::bare(record("tt1", "Old", "1999"))))
        .is_none());
    assert_eq!(controller.state().detail.content, None);

    let related = controller.apply_detail(second, Outcome::Found(inception())).unwrap();
    let _third = controller.begin_detail("tt0000009", None);
    assert!(!controller.apply_related(related, page("Christopher Nolan", 8, nolan_films())));
    assert_eq!(controller.state().detail.related, None);
}

#[tokio::test]
async fn test_navigation_remembers_origin() {
    let gateway = FakeGateway::default()
        .with_detail("tt1375666", Outcome::Found(inception()))
        .with_search("Christopher Nolan", page("Christopher Nolan", 8, nolan_films()));
    let mut controller = build(gateway);

    controller.show_watchlist();
    controller.open_detail("tt1375666", None).await;
    assert_eq!(
        controller.state().screen,
        Screen::Detail {
            origin: Origin::Watchlist
        }
    );

    // Following a related title keeps the original origin.
    controller.open_detail("tt000", Some(MediaType::Movie)).await;
    assert_eq!(
        controller.state().screen,
        Screen::Detail {
            origin: Origin::Watchlist
        }
    );

    controller.back();
    assert_eq!(controller.state().screen, Screen::Watchlist);
    assert_eq!(controller.state().detail.status, DetailStatus::Idle);

    controller.show_search();
    assert_eq!(controller.state().screen, Screen::Search);
    assert!(!controller.state().search.results_visible());
}

#[tokio::test]
async fn test_back_to_search_keeps_results() {
    let gateway = FakeGateway::default()
        .with_search("inception", page("inception", 1, vec![record("tt1375666", "Inception", "2010")]))
        .with_detail("tt1375666", Outcome::Found(inception()));
    let mut controller = build(gateway);

    controller.search("inception").await;
    let selected = controller.state().search.records[0].record.clone();
    controller.open_record(&selected).await;
    assert_eq!(
        controller.state().screen,
        Screen::Detail {
            origin: Origin::Search
        }
    );

    controller.back();
    assert_eq!(controller.state().screen, Screen::Search);
    assert!(controller.state().search.results_visible());
}

#[tokio::test]
async fn test_toggle_on_search_updates_in_place() {
    let gateway = FakeGateway::default().with_search("inception", page("inception", 1, vec![record("tt1375666", "Inception", "2010")]));
    let mut controller = build(gateway);
    controller.search("inception").await;
    let renders_before = controller.sink().renders.len();

    assert!(controller.toggle_watchlist("tt1375666").unwrap());
    assert_eq!(controller.sink().renders.len(), renders_before);
    assert_eq!(
        controller.sink().toggles,
        vec![ToggleUpdate {
            id: "tt1375666".to_string(),
            in_watchlist: true,
            label: REMOVE_LABEL,
            count_label: "1 title".to_string(),
        }]
    );
    assert!(controller.state().search.records[0].in_watchlist);
    assert_eq!(controller.state().watchlist_count, "1 title");

    assert!(!controller.toggle_watchlist("tt1375666").unwrap());
    assert_eq!(controller.sink().toggles[1].label, ADD_LABEL);
    assert!(controller.watchlist().is_empty());
}

#[tokio::test]
async fn test_rendered_records_carry_membership() {
    let gateway = FakeGateway::default()
        .with_search("inception", page("inception", 1, vec![record("tt1375666", "Inception", "2010")]))
        .with_detail("tt1375666", Outcome::Found(inception()));
    let mut controller = build(gateway);

    controller.search("inception").await;
    controller.toggle_watchlist("tt1375666").unwrap();

    controller.search("inception").await;
    assert!(controller.state().search.records[0].in_watchlist);

    controller.open_detail("tt1375666", None).await;
    assert!(controller.state().detail.content.as_ref().unwrap().in_watchlist);
}

#[tokio::test]
async fn test_removal_on_watchlist_screen_rerenders() {
    let gateway = FakeGateway::default().with_search(
        "nolan",
        page(
            "nolan",
            2,
            vec![record("tt1", "Memento", "2000"), record("tt2", "Tenet", "2020")],
        ),
    );
    let mut controller = build(gateway);
    controller.search("nolan").await;
    controller.toggle_watchlist("tt1").unwrap();
    controller.toggle_watchlist("tt2").unwrap();

    controller.show_watchlist();
    assert_eq!(ids(&controller.state().watchlist.records), vec!["tt1", "tt2"]);
    let renders_before = controller.sink().renders.len();
    let toggles_before = controller.sink().toggles.len();

    controller.toggle_watchlist("tt1").unwrap();
    assert_eq!(controller.sink().renders.len(), renders_before + 1);
    assert_eq!(controller.sink().toggles.len(), toggles_before);
    assert_eq!(ids(&controller.state().watchlist.records), vec!["tt2"]);
    assert_eq!(controller.state().watchlist_count, "1 title");
}

#[tokio::test]
async fn test_toggle_unknown_record_is_error() {
    let mut controller = build(FakeGateway::default());
    assert!(matches!(
        controller.toggle_watchlist("tt404"),
        Err(StoreError::UnknownRecord(_))
    ));
}
