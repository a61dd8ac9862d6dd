pub mod capabilities;
pub mod error;
pub mod factory;
pub mod gateway;
pub mod http;
pub mod lenient;
pub mod omdb;
pub mod tmdb;
pub mod traits;

pub use capabilities::{IdScheme, ParsedId};
pub use error::AdapterError;
pub use factory::{AdapterFactory, AdapterFactoryRegistry};
pub use gateway::ProxyGateway;
pub use traits::{DetailRequest, SearchRequest, UpstreamAdapter};
