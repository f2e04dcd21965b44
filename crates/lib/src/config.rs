//! Endpoint configuration for the collaborator clients.
//!
//! A [`ClientConfig`] is handed to each client explicitly. Endpoints are paths (or absolute
//! URLs) resolved against the transport's base URL.

use std::path::Path;

use thiserror::Error;
use url::{ParseError, Position, Url};

use crate::client::ClientError;

/// Errors loading a configuration file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Check if this error came from reading the file
    pub fn is_io_error(&self) -> bool {
        matches!(self, ConfigError::Read { .. })
    }
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}

const DEFAULT_CRUD_ENDPOINT: &str = "/api/crud";
const DEFAULT_TERM_ENDPOINT: &str = "/autocomplete/term";
const DEFAULT_COMPOUND_ENDPOINT: &str = "/autocomplete/compound";
const DEFAULT_FRAGMENTS_ENDPOINT: &str = "/frag";

/// Collaborator endpoints.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub crud_endpoint: String,
    pub term_endpoint: String,
    pub compound_endpoint: String,
    pub fragments_endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            crud_endpoint: DEFAULT_CRUD_ENDPOINT.to_string(),
            term_endpoint: DEFAULT_TERM_ENDPOINT.to_string(),
            compound_endpoint: DEFAULT_COMPOUND_ENDPOINT.to_string(),
            fragments_endpoint: DEFAULT_FRAGMENTS_ENDPOINT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded client config");
        Ok(config)
    }
}

/// Placeholder origin used to resolve relative endpoints; only the path is kept.
const RELATIVE_BASE: &str = "http://endpoint.invalid/";

/// Appends percent-encoded path segments to an endpoint.
///
/// Relative endpoints stay relative (path only). A `/`, `?` or `#` inside a segment is
/// encoded so it cannot change the request target.
pub(crate) fn endpoint_url(endpoint: &str, segments: &[&str]) -> crate::Result<String> {
    let invalid = |reason: String| ClientError::Request {
        url: endpoint.to_string(),
        reason,
    };

    let (mut url, relative) = match Url::parse(endpoint) {
        Ok(url) => (url, false),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_BASE).map_err(|e| invalid(e.to_string()))?;
            let url = base.join(endpoint).map_err(|e| invalid(e.to_string()))?;
            (url, true)
        }
        Err(e) => return Err(invalid(e.to_string()).into()),
    };

    url.path_segments_mut()
        .map_err(|_| invalid("endpoint cannot take path segments".to_string()))?
        .pop_if_empty()
        .extend(segments);

    if relative {
        Ok(url[Position::BeforePath..].to_string())
    } else {
        Ok(url.to_string())
    }
}
