pub mod field;
pub mod media;
pub mod outcome;
pub mod page;
pub mod record;
pub mod sort;
pub mod watchlist;

pub use field::{Field, UNAVAILABLE};
pub use media::{MediaType, TypeFilter};
pub use outcome::Outcome;
pub use page::{SearchPage, PAGE_SIZE};
pub use record::{DetailRecord, Rating, Record};
pub use sort::SortMode;
pub use watchlist::WatchlistEntry;
