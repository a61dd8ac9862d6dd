use reel_models::{SortMode, TypeFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Directory served at `/` next to the API. `None` disables static files.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

/// Which upstream metadata API the gateway talks to. Fixed per deployment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamFamily {
    #[default]
    Omdb,
    Tmdb,
}

impl UpstreamFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamFamily::Omdb => "omdb",
            UpstreamFamily::Tmdb => "tmdb",
        }
    }

    /// Environment variables holding this family's credential, in lookup order.
    pub fn key_variables(&self) -> &'static [&'static str] {
        match self {
            UpstreamFamily::Omdb => &["OMDB_KEY", "OMDB_API_KEY"],
            UpstreamFamily::Tmdb => &["TMDB_KEY", "TMDB_API_KEY"],
        }
    }
}

impl fmt::Display for UpstreamFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpstreamFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "omdb" => Ok(UpstreamFamily::Omdb),
            "tmdb" => Ok(UpstreamFamily::Tmdb),
            _ => Err(format!("Invalid upstream: {}. Use 'omdb' or 'tmdb'", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub family: UpstreamFamily,
    /// Credential for the upstream. Absence is reported per request, not at startup.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Override for the upstream base URL (tests, mirrors).
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Where the terminal client reaches the gateway.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    #[serde(default)]
    pub default_sort: SortMode,
    #[serde(default)]
    pub default_type: TypeFilter,
}

fn default_port() -> u16 {
    3000
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_gateway_url() -> String {
    format!("http://localhost:{}", default_port())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            static_dir: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            family: UpstreamFamily::default(),
            api_key: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            default_sort: SortMode::default(),
            default_type: TypeFilter::default(),
        }
    }
}

impl UpstreamConfig {
    /// The credential, if one is set and is not the sample placeholder.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != "YOUR_API_KEY")
    }

    pub fn is_configured(&self) -> bool {
        self.credential().is_some()
    }
}

impl Config {
    /// Load configuration the way the binary does: `.env`, then the TOML file
    /// (explicit path must exist, the default path may be absent), then the
    /// process environment on top.
    pub fn load(explicit_path: Option<&Path>, default_path: &Path) -> anyhow::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(dotenvy::Error::Io(_)) => {}
            Err(e) => return Err(anyhow::anyhow!("Failed to parse .env file: {}", e)),
        }

        let mut config = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
                }
                Self::load_from_file(path)?
            }
            None if default_path.exists() => Self::load_from_file(default_path)?,
            None => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overlay environment variables. `lookup` is injected so tests never
    /// touch the process environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(family) = lookup("REEL_UPSTREAM") {
            match family.parse::<UpstreamFamily>() {
                Ok(family) => {
                    // A key in the file belongs to the family the file names.
                    if family != self.upstream.family {
                        self.upstream.family = family;
                        self.upstream.api_key = None;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Ignoring REEL_UPSTREAM"),
            }
        }

        if let Some(key) = self
            .upstream
            .family
            .key_variables()
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
        {
            self.upstream.api_key = Some(key);
        }

        if let Some(url) = lookup("REEL_UPSTREAM_URL") {
            self.upstream.base_url = Some(url);
        }

        if let Some(port) = lookup("PORT") {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid PORT"),
            }
        }

        if let Some(url) = lookup("REEL_GATEWAY_URL") {
            self.client.gateway_url = url;
        }
    }
}
