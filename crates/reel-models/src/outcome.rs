use serde::{Deserialize, Serialize};

/// Result envelope returned by the gateway for every search/detail request.
///
/// Only `ServerMisconfigured` (500) and `UpstreamUnreachable` (502) change
/// the transport status; everything else travels as 200 so the client
/// branches on the `outcome` tag rather than on HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome<T> {
    Found(T),
    NotFound { message: String },
    Invalid { message: String },
    ServerMisconfigured { message: String },
    UpstreamUnreachable { message: String },
}

impl<T> Outcome<T> {
    pub fn not_found(message: impl Into<String>) -> Self {
        Outcome::NotFound { message: message.into() }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Outcome::Invalid { message: message.into() }
    }

    pub fn misconfigured(message: impl Into<String>) -> Self {
        Outcome::ServerMisconfigured { message: message.into() }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Outcome::UpstreamUnreachable { message: message.into() }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Outcome::ServerMisconfigured { .. } => 500,
            Outcome::UpstreamUnreachable { .. } => 502,
            _ => 200,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Found(_) => "found",
            Outcome::NotFound { .. } => "not_found",
            Outcome::Invalid { .. } => "invalid",
            Outcome::ServerMisconfigured { .. } => "server_misconfigured",
            Outcome::UpstreamUnreachable { .. } => "upstream_unreachable",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Found(_) => None,
            Outcome::NotFound { message }
            | Outcome::Invalid { message }
            | Outcome::ServerMisconfigured { message }
            | Outcome::UpstreamUnreachable { message } => Some(message),
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Found(value) => Outcome::Found(f(value)),
            Outcome::NotFound { message } => Outcome::NotFound { message },
            Outcome::Invalid { message } => Outcome::Invalid { message },
            Outcome::ServerMisconfigured { message } => Outcome::ServerMisconfigured { message },
            Outcome::UpstreamUnreachable { message } => Outcome::UpstreamUnreachable { message },
        }
    }
}
