//! HTTP transport implementation using reqwest.

use async_trait::async_trait;

use super::{ClientError, Method, Request, Transport};
use crate::Result;

/// Sends collaborator requests over HTTP, resolving endpoint paths against a base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: url::Url,
}

impl HttpTransport {
    /// Create a transport rooted at `base` (e.g. `https://example.org/`).
    pub fn new(base: &str) -> Result<Self> {
        let base = url::Url::parse(base).map_err(|e| ClientError::Request {
            url: base.to_string(),
            reason: format!("invalid base URL: {e}"),
        })?;
        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    pub fn base(&self) -> &url::Url {
        &self.base
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<String> {
        let url = self.base.join(&request.url).map_err(|e| ClientError::Request {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;

        let builder = match request.method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()),
            Method::Put => self.client.put(url.clone()),
        };
        let builder = builder.query(&request.query);
        let builder = match request.body {
            Some(body) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body),
            None => builder,
        };

        tracing::debug!(method = ?request.method, %url, "sending request");
        let response = builder.send().await.map_err(|e| ClientError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| ClientError::Request {
            url: url.to_string(),
            reason: format!("failed to read body: {e}"),
        })?;
        Ok(body)
    }
}
