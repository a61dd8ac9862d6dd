use crate::field::Field;
use crate::media::MediaType;
use serde::{Deserialize, Serialize};

/// Canonical movie/series record at search-result granularity.
///
/// Records are built fresh per request and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub title: String,
    /// Four digits, a range such as `2010–2012`, or empty. Display/sort only.
    #[serde(default)]
    pub year: String,
    pub media_type: MediaType,
    #[serde(default)]
    pub poster_url: Field,
}

impl Record {
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty() && !self.title.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

impl Rating {
    pub fn new(source: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    #[serde(flatten)]
    pub record: Record,
    #[serde(default)]
    pub plot: Field,
    #[serde(default)]
    pub genre: Field,
    #[serde(default)]
    pub director: Field,
    #[serde(default)]
    pub actors: Field,
    #[serde(default)]
    pub runtime: Field,
    #[serde(default)]
    pub rated: Field,
    #[serde(default)]
    pub box_office: Field,
    #[serde(default)]
    pub awards: Field,
    /// Convenience copy of the primary score, e.g. `"8.4"`.
    #[serde(default)]
    pub rating: Field,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

impl DetailRecord {
    /// A detail record with every optional field unavailable.
    pub fn bare(record: Record) -> Self {
        Self {
            record,
            plot: Field::Unavailable,
            genre: Field::Unavailable,
            director: Field::Unavailable,
            actors: Field::Unavailable,
            runtime: Field::Unavailable,
            rated: Field::Unavailable,
            box_office: Field::Unavailable,
            awards: Field::Unavailable,
            rating: Field::Unavailable,
            ratings: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }
}
