//! Capability traits for upstream adapters.

use crate::error::AdapterError;
use reel_models::MediaType;

/// An id taken apart into the pieces an upstream needs for a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedId {
    /// `None` when neither the id nor the caller says what kind of title it is.
    pub media_type: Option<MediaType>,
    pub native_id: String,
}

/// How an adapter builds canonical ids and reads them back.
///
/// `parse(encode(t, n), None)` must give back `(t, n)` for every id the
/// adapter hands out.
pub trait IdScheme: Send + Sync {
    fn encode(&self, media_type: MediaType, native_id: &str) -> String;

    /// `hint` is the caller's explicit type and takes precedence over
    /// anything embedded in `id`.
    fn parse(&self, id: &str, hint: Option<MediaType>) -> Result<ParsedId, AdapterError>;
}
