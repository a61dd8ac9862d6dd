//! Translation of TMDB payloads into canonical records.

use crate::capabilities::IdScheme;
use crate::error::AdapterError;
use crate::tmdb::api::{self, TmdbDetail, TmdbPage, TmdbSearchItem};
use crate::tmdb::id::TmdbIdScheme;
use crate::traits::SearchRequest;
use reel_models::{DetailRecord, Field, MediaType, Rating, Record, SearchPage, PAGE_SIZE};

const CAST_LIMIT: usize = 5;
pub const RATING_SOURCE: &str = "TMDB";

/// Results per TMDB search page; each one spans two canonical pages.
pub const UPSTREAM_PAGE_SIZE: u32 = 20;
const PAGES_PER_UPSTREAM_PAGE: u32 = UPSTREAM_PAGE_SIZE / PAGE_SIZE;

/// The TMDB page holding canonical page `page`.
pub fn upstream_page(page: u32) -> u32 {
    (page.max(1) - 1) / PAGES_PER_UPSTREAM_PAGE + 1
}

/// Index of the first result of canonical page `page` within its TMDB page.
fn upstream_offset(page: u32) -> usize {
    (((page.max(1) - 1) % PAGES_PER_UPSTREAM_PAGE) * PAGE_SIZE) as usize
}

/// `body` is the TMDB page returned for `upstream_page(request.page)`; only
/// the slice belonging to the canonical page is kept.
///
/// `implied` is the media type of a single-type endpoint; `None` for
/// `/search/multi`, where each item names its own.
pub fn normalize_search(
    body: &str,
    request: &SearchRequest,
    implied: Option<MediaType>,
) -> Result<SearchPage, AdapterError> {
    let page: TmdbPage = serde_json::from_str(body)
        .map_err(|_| AdapterError::Upstream("TMDB returned an unreadable search payload".to_string()))?;

    let total = page
        .total_results
        .map(|t| u32::try_from(t).unwrap_or(u32::MAX))
        .unwrap_or(0);
    if total == 0 {
        return Err(AdapterError::NotFound(format!("No titles match '{}'", request.query)));
    }

    let records = page
        .results
        .into_iter()
        .skip(upstream_offset(request.page))
        .take(PAGE_SIZE as usize)
        .filter_map(|item| search_item(item, implied))
        .collect();
    Ok(SearchPage::new(request.query.clone(), request.page, total, records))
}

fn search_item(item: TmdbSearchItem, implied: Option<MediaType>) -> Option<Record> {
    // People show up in multi-search with media_type "person"; from_vocab drops them.
    let media_type = match implied {
        Some(media_type) => media_type,
        None => MediaType::from_vocab(item.media_type.as_deref()?)?,
    };
    let (title, date) = match media_type {
        MediaType::Movie => (item.title.or(item.name), item.release_date),
        MediaType::Series => (item.name.or(item.title), item.first_air_date.or(item.release_date)),
    };

    Some(Record {
        id: TmdbIdScheme.encode(media_type, &item.id?.to_string()),
        title: non_blank(title)?,
        year: year_of(date),
        media_type,
        poster_url: poster_url(item.poster_path),
    })
}

pub fn normalize_detail(body: &str, media_type: MediaType) -> Result<DetailRecord, AdapterError> {
    let detail: TmdbDetail = serde_json::from_str(body)
        .map_err(|_| AdapterError::Upstream("TMDB returned an unreadable detail payload".to_string()))?;

    let native_id = detail
        .id
        .ok_or_else(|| AdapterError::NotFound("TMDB returned a record without an id".to_string()))?;
    let id = TmdbIdScheme.encode(media_type, &native_id.to_string());

    let (title, date) = match media_type {
        MediaType::Movie => (detail.title.or(detail.name), detail.release_date),
        MediaType::Series => (detail.name.or(detail.title), detail.first_air_date),
    };
    let title = non_blank(title).ok_or_else(|| AdapterError::NotFound(format!("TMDB record {} has no title", id)))?;

    let genre = join_names(detail.genres.into_iter().filter_map(|g| g.name), usize::MAX);
    let credits = detail.credits.unwrap_or_default();
    let actors = join_names(credits.cast.into_iter().filter_map(|c| c.name), CAST_LIMIT);
    let director = credits
        .crew
        .into_iter()
        .find(|member| member.job.as_deref() == Some("Director"))
        .and_then(|member| member.name);

    let runtime = detail
        .runtime
        .or_else(|| detail.episode_run_time.first().copied())
        .filter(|minutes| *minutes > 0)
        .map(|minutes| format!("{} min", minutes));

    let box_office = detail.revenue.filter(|r| *r > 0).map(format_usd);

    let score = match (detail.vote_average, detail.vote_count) {
        (Some(average), None | Some(0)) if average == 0.0 => None,
        (Some(average), _) => Some(average),
        (None, _) => None,
    };
    let (rating, ratings) = match score {
        Some(score) => (
            Field::new(format!("{:.1}", score)),
            vec![Rating::new(RATING_SOURCE, format!("{:.1}/10", score))],
        ),
        None => (Field::Unavailable, Vec::new()),
    };

    Ok(DetailRecord {
        record: Record {
            id,
            title,
            year: year_of(date),
            media_type,
            poster_url: poster_url(detail.poster_path),
        },
        plot: Field::from_option(detail.overview),
        genre: Field::from_option(genre),
        director: Field::from_option(director),
        actors: Field::from_option(actors),
        runtime: Field::from_option(runtime),
        rated: Field::Unavailable,
        box_office: Field::from_option(box_office),
        awards: Field::Unavailable,
        rating,
        ratings,
    })
}

/// `1234567` becomes `$1,234,567`.
pub fn format_usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${}", grouped)
}

fn poster_url(path: Option<String>) -> Field {
    match non_blank(path) {
        Some(path) => Field::new(format!("{}{}", api::IMAGE_BASE_URL, path)),
        None => Field::Unavailable,
    }
}

fn year_of(date: Option<String>) -> String {
    non_blank(date)
        .map(|d| d.chars().take(4).collect())
        .unwrap_or_default()
}

fn join_names(names: impl Iterator<Item = String>, limit: usize) -> Option<String> {
    let names: Vec<String> = names
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .take(limit)
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
