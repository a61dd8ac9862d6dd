//! TMDB v3 payload schemas.
//!
//! Unlike OMDb, TMDB splits search across several endpoints and reports
//! failures through HTTP status plus a `status_message` body.

use crate::error::AdapterError;
use crate::lenient;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Deserialize)]
pub struct TmdbPage {
    #[serde(default, deserialize_with = "lenient::list")]
    pub results: Vec<TmdbSearchItem>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_results: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbSearchItem {
    #[serde(default, deserialize_with = "lenient::count")]
    pub id: Option<u64>,
    /// Only present on `/search/multi`: `movie`, `tv` or `person`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub media_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub first_air_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbDetail {
    #[serde(default, deserialize_with = "lenient::count")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub first_air_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub genres: Vec<TmdbGenre>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub runtime: Option<u64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub episode_run_time: Vec<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub revenue: Option<u64>,
    #[serde(default, deserialize_with = "lenient::score")]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub vote_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "lenient::object")]
    pub credits: Option<TmdbCredits>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenre {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TmdbCredits {
    /// Already in billing order.
    #[serde(default, deserialize_with = "lenient::list")]
    pub cast: Vec<TmdbCastMember>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCastMember {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCrewMember {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub job: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    #[serde(default, deserialize_with = "lenient::text")]
    status_message: Option<String>,
    #[serde(default)]
    success: Option<bool>,
}

/// Turn an HTTP status and body into an adapter error when TMDB reports one.
pub fn check_response(status: u16, body: &str) -> Result<(), AdapterError> {
    let error_body = serde_json::from_str::<TmdbErrorBody>(body).ok();
    let message = error_body
        .as_ref()
        .and_then(|e| e.status_message.clone())
        .unwrap_or_else(|| format!("TMDB responded with status {}", status));

    match status {
        200..=299 if error_body.and_then(|e| e.success) == Some(false) => Err(AdapterError::Upstream(message)),
        200..=299 => Ok(()),
        404 => Err(AdapterError::NotFound(message)),
        _ => Err(AdapterError::Upstream(message)),
    }
}
