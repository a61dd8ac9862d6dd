//! OMDb payload schemas and their translation to canonical records.
//!
//! OMDb answers every request on one endpoint with a `Response` flag:
//! `"True"` carries the data, `"False"` carries an `Error` message that is
//! either a "no match" notice or a real failure.

use crate::error::AdapterError;
use crate::lenient;
use crate::traits::SearchRequest;
use reel_models::{DetailRecord, Field, MediaType, Rating, Record, SearchPage};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb error messages that mean "nothing matched" rather than "broken".
const NO_MATCH_MESSAGES: &[&str] = &["not found", "too many results", "incorrect imdb id"];

#[derive(Debug, Deserialize)]
#[serde(tag = "Response")]
enum SearchEnvelope {
    #[serde(rename = "True")]
    Found {
        #[serde(rename = "Search", default, deserialize_with = "lenient::list")]
        search: Vec<OmdbSearchItem>,
        #[serde(rename = "totalResults", default, deserialize_with = "lenient::count")]
        total_results: Option<u64>,
    },
    #[serde(rename = "False")]
    Failed {
        #[serde(rename = "Error", default, deserialize_with = "lenient::text")]
        error: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "Title", default, deserialize_with = "lenient::text")]
    title: Option<String>,
    #[serde(rename = "Year", default, deserialize_with = "lenient::text")]
    year: Option<String>,
    #[serde(rename = "imdbID", default, deserialize_with = "lenient::text")]
    imdb_id: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "lenient::text")]
    kind: Option<String>,
    #[serde(rename = "Poster", default, deserialize_with = "lenient::text")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "Response")]
enum DetailEnvelope {
    #[serde(rename = "True")]
    Found(Box<OmdbDetail>),
    #[serde(rename = "False")]
    Failed {
        #[serde(rename = "Error", default, deserialize_with = "lenient::text")]
        error: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbDetail {
    #[serde(default, deserialize_with = "lenient::text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    year: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    rated: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    runtime: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    genre: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    director: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    actors: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    plot: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    awards: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    poster: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    ratings: Vec<OmdbRating>,
    #[serde(rename = "imdbRating", default, deserialize_with = "lenient::text")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbID", default, deserialize_with = "lenient::text")]
    imdb_id: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "lenient::text")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    box_office: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbRating {
    #[serde(default, deserialize_with = "lenient::text")]
    source: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    value: Option<String>,
}

/// Translate an OMDb search response body.
pub fn normalize_search(body: &str, request: &SearchRequest) -> Result<SearchPage, AdapterError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)
        .map_err(|_| AdapterError::Upstream("OMDb returned an unreadable search payload".to_string()))?;

    match envelope {
        SearchEnvelope::Failed { error } => Err(classify_error(error)),
        SearchEnvelope::Found { search, total_results } => {
            let records: Vec<Record> = search.into_iter().filter_map(OmdbSearchItem::into_record).collect();
            let total = total_results
                .map(|t| u32::try_from(t).unwrap_or(u32::MAX))
                .unwrap_or(records.len() as u32);
            Ok(SearchPage::new(request.query.clone(), request.page, total, records))
        }
    }
}

/// Translate an OMDb `?i=` lookup body.
pub fn normalize_detail(body: &str, hint: Option<MediaType>) -> Result<DetailRecord, AdapterError> {
    let envelope: DetailEnvelope = serde_json::from_str(body)
        .map_err(|_| AdapterError::Upstream("OMDb returned an unreadable detail payload".to_string()))?;

    let detail = match envelope {
        DetailEnvelope::Failed { error } => return Err(classify_error(error)),
        DetailEnvelope::Found(detail) => detail,
    };

    let id = non_blank(detail.imdb_id)
        .ok_or_else(|| AdapterError::NotFound("OMDb returned a record without an id".to_string()))?;
    let title = non_blank(detail.title)
        .ok_or_else(|| AdapterError::NotFound(format!("OMDb record {} has no title", id)))?;

    let media_type = detail
        .kind
        .as_deref()
        .and_then(MediaType::from_vocab)
        .or(hint)
        .unwrap_or(MediaType::Movie);

    let ratings = detail
        .ratings
        .into_iter()
        .filter_map(|r| match (non_blank(r.source), non_blank(r.value)) {
            (Some(source), Some(value)) => Some(Rating::new(source, value)),
            _ => None,
        })
        .collect();

    Ok(DetailRecord {
        record: Record {
            id,
            title,
            year: display_year(detail.year),
            media_type,
            poster_url: Field::from_option(detail.poster),
        },
        plot: Field::from_option(detail.plot),
        genre: Field::from_option(detail.genre),
        director: Field::from_option(detail.director),
        actors: Field::from_option(detail.actors),
        runtime: Field::from_option(detail.runtime),
        rated: Field::from_option(detail.rated),
        box_office: Field::from_option(detail.box_office),
        awards: Field::from_option(detail.awards),
        rating: Field::from_option(detail.imdb_rating),
        ratings,
    })
}

impl OmdbSearchItem {
    /// Entries without an id or title, or that are not movies/series, are skipped.
    fn into_record(self) -> Option<Record> {
        let media_type = MediaType::from_vocab(self.kind.as_deref()?)?;
        Some(Record {
            id: non_blank(self.imdb_id)?,
            title: non_blank(self.title)?,
            year: display_year(self.year),
            media_type,
            poster_url: Field::from_option(self.poster),
        })
    }
}

fn classify_error(error: Option<String>) -> AdapterError {
    let message = error.unwrap_or_else(|| "OMDb reported a failure without a message".to_string());
    let lowered = message.to_lowercase();
    if NO_MATCH_MESSAGES.iter().any(|needle| lowered.contains(needle)) {
        AdapterError::NotFound(message)
    } else {
        AdapterError::Upstream(message)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != reel_models::UNAVAILABLE)
}

fn display_year(value: Option<String>) -> String {
    non_blank(value).unwrap_or_default()
}
