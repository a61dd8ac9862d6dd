pub mod config;
pub mod paths;

pub use config::{ClientConfig, Config, ServerConfig, UpstreamConfig, UpstreamFamily};
pub use paths::{PathManager, container_base_path};
