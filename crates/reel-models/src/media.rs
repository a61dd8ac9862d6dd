use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Normalize an upstream's media vocabulary.
    ///
    /// Returns `None` for anything that is not a title (people, games, ...).
    pub fn from_vocab(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "movie" | "film" => Some(MediaType::Movie),
            "series" | "tv" | "show" | "episode" => Some(MediaType::Series),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::from_vocab(s).ok_or_else(|| format!("Invalid media type: {}. Use 'movie' or 'series'", s))
    }
}

/// Type filter attached to a search request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    Any,
    Movie,
    Series,
}

impl TypeFilter {
    pub fn media_type(&self) -> Option<MediaType> {
        match self {
            TypeFilter::Any => None,
            TypeFilter::Movie => Some(MediaType::Movie),
            TypeFilter::Series => Some(MediaType::Series),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::Any => "any",
            TypeFilter::Movie => "movie",
            TypeFilter::Series => "series",
        }
    }

    /// Whether a record of `media_type` passes this filter.
    pub fn admits(&self, media_type: MediaType) -> bool {
        self.media_type().map_or(true, |wanted| wanted == media_type)
    }
}

impl From<MediaType> for TypeFilter {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Movie => TypeFilter::Movie,
            MediaType::Series => TypeFilter::Series,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "any" | "all" => Ok(TypeFilter::Any),
            other => MediaType::from_vocab(other)
                .map(TypeFilter::from)
                .ok_or_else(|| format!("Invalid type filter: {}. Use 'any', 'movie' or 'series'", s)),
        }
    }
}
