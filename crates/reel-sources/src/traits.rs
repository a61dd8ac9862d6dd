use crate::capabilities::IdScheme;
use crate::error::AdapterError;
use async_trait::async_trait;
use reel_models::{DetailRecord, MediaType, SearchPage, TypeFilter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Already trimmed and non-empty.
    pub query: String,
    pub page: u32,
    pub filter: TypeFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: String,
    /// Explicit type parameter; wins over any type tag embedded in `id`.
    pub media_type: Option<MediaType>,
}

/// One upstream metadata API translated into canonical records.
///
/// Everything past this trait only ever sees canonical types, so adding an
/// upstream family means one implementation plus a factory registration.
#[async_trait]
pub trait UpstreamAdapter: Send + Sync {
    fn source_name(&self) -> &str;

    /// Whether a credential is present. Checked before any network access.
    fn is_configured(&self) -> bool;

    fn id_scheme(&self) -> &dyn IdScheme;

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, AdapterError>;

    async fn detail(&self, request: &DetailRequest) -> Result<DetailRecord, AdapterError>;
}
