use crate::field::Field;
use crate::media::MediaType;
use crate::record::{DetailRecord, Record};
use serde::{Deserialize, Serialize};

/// The persisted subset of a record. Detail fields never reach storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: String,
    pub media_type: MediaType,
    #[serde(default)]
    pub poster_url: Field,
}

impl WatchlistEntry {
    pub fn to_record(&self) -> Record {
        Record {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            media_type: self.media_type,
            poster_url: self.poster_url.clone(),
        }
    }
}

impl From<&Record> for WatchlistEntry {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            year: record.year.clone(),
            media_type: record.media_type,
            poster_url: record.poster_url.clone(),
        }
    }
}

impl From<&DetailRecord> for WatchlistEntry {
    fn from(detail: &DetailRecord) -> Self {
        WatchlistEntry::from(&detail.record)
    }
}
