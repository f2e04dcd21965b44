//! Clients for the external collaborators.
//!
//! All network traffic goes through a [`Transport`], so the clients can run over HTTP
//! ([`HttpTransport`], behind the `http` feature) or over a test double. Requests are
//! fire-and-wait: there is no retry, timeout or cancellation, and errors surface to the
//! caller as [`ClientError`]s.
//!
//! - [`CrudClient`] - create, retrieve and update records
//! - [`Autocomplete`] - term and compound suggestions for selection widgets
//! - [`Fragments`] - HTML fragments, cached by id

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::Result;

pub mod autocomplete;
pub mod crud;
pub mod fragments;
#[cfg(feature = "http")]
pub mod http;

pub use autocomplete::{Autocomplete, AutocompleteOptions, Choice, Source};
pub use crud::CrudClient;
pub use fragments::Fragments;
#[cfg(feature = "http")]
pub use http::HttpTransport;

/// Errors from collaborator requests.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response not read
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// The server answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be understood
    #[error("invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },
}

impl ClientError {
    /// Check if this is a network-level failure
    pub fn is_network_error(&self) -> bool {
        matches!(self, ClientError::Request { .. })
    }

    /// Get the HTTP status, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ClientError> for crate::Error {
    fn from(err: ClientError) -> Self {
        crate::Error::Client(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

/// A request to a collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Endpoint path or absolute URL
    pub url: String,
    pub query: Vec<(String, String)>,
    /// JSON body text
    pub body: Option<String>,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
            ..Self::get(url)
        }
    }

    pub fn put(url: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::Put,
            body: Some(body),
            ..Self::get(url)
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}

/// Sends requests and returns response bodies.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request`, returning the body of a successful response.
    async fn send(&self, request: Request) -> Result<String>;
}

/// Decodes a JSON response body, unwrapping a `callback(...)` JSONP envelope if present.
pub fn parse_jsonp(url: &str, body: &str) -> std::result::Result<Value, ClientError> {
    let body = body.trim();
    if let Ok(value) = serde_json::from_str(body) {
        return Ok(value);
    }

    let invalid = |reason: String| ClientError::InvalidResponse {
        url: url.to_string(),
        reason,
    };

    let open = body
        .find('(')
        .ok_or_else(|| invalid("neither JSON nor a JSONP envelope".to_string()))?;
    let callback = &body[..open];
    if callback.is_empty()
        || !callback
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '.'))
    {
        return Err(invalid(format!("bad JSONP callback name {callback:?}")));
    }

    let inner = body[open + 1..]
        .trim_end()
        .trim_end_matches(';')
        .trim_end()
        .strip_suffix(')')
        .ok_or_else(|| invalid("unterminated JSONP envelope".to_string()))?;
    serde_json::from_str(inner).map_err(|e| invalid(e.to_string()))
}
