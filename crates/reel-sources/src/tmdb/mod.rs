pub mod api;
pub mod client;
pub mod id;
pub mod normalize;

pub use client::TmdbAdapter;
pub use id::TmdbIdScheme;
