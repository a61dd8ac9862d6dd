pub mod controller;
pub mod gateway;
pub mod pagination;
pub mod render;
pub mod sort;
pub mod view;
pub mod watchlist;

pub use controller::{DetailTicket, RelatedTicket, SearchTicket, ViewController};
pub use gateway::{Gateway, HttpGateway};
pub use pagination::{PageButton, Pagination};
pub use render::{RenderSink, ToggleUpdate};
pub use sort::{parse_year, sort_records};
pub use view::{
    DetailPresentation, DetailStatus, DetailView, Origin, RelatedStrip, RenderedRecord, Screen, SearchStatus,
    SearchView, ViewState, WatchlistView,
};
pub use watchlist::{FileBackend, MemoryBackend, StorageBackend, StoreError, WatchlistStore, WATCHLIST_KEY};
