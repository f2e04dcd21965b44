//! Autocomplete suggestions for selection widgets.
//!
//! Two endpoints serve suggestions: the term endpoint answers with bare values and the
//! compound endpoint with records carrying a `term` field. Either way the answer is turned
//! into [`Choice`]s a selection widget can display.

use std::{fmt, sync::Arc};

use serde_json::Value;

use super::{ClientError, Request, Transport, parse_jsonp};
use crate::{
    Result,
    coerce::to_text,
    config::{ClientConfig, endpoint_url},
};

/// Which autocomplete endpoint to ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Term,
    Compound,
}

/// One candidate for a selection widget.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
}

impl Choice {
    pub fn same(value: impl Into<String>) -> Self {
        let id = value.into();
        Self {
            text: id.clone(),
            id,
        }
    }
}

/// Maps one response record to a choice.
pub type FormatFn = dyn Fn(&Value) -> Choice + Send + Sync;

/// Options for [`Autocomplete::suggest`].
#[derive(Clone)]
pub struct AutocompleteOptions {
    /// Maximum number of suggestions to request
    pub size: usize,
    /// Queries shorter than this are answered with no choices and no request
    pub min_input_length: usize,
    /// Offer the raw query as the first choice
    pub allow_any: bool,
    /// Custom record formatting; the source's default when unset
    pub format: Option<Arc<FormatFn>>,
}

impl Default for AutocompleteOptions {
    fn default() -> Self {
        Self {
            size: 10,
            min_input_length: 3,
            allow_any: false,
            format: None,
        }
    }
}

impl fmt::Debug for AutocompleteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteOptions")
            .field("size", &self.size)
            .field("min_input_length", &self.min_input_length)
            .field("allow_any", &self.allow_any)
            .field("format", &self.format.as_ref().map(|_| "custom"))
            .finish()
    }
}

impl AutocompleteOptions {
    pub fn with_allow_any(mut self, allow_any: bool) -> Self {
        self.allow_any = allow_any;
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_min_input_length(mut self, min_input_length: usize) -> Self {
        self.min_input_length = min_input_length;
        self
    }

    pub fn with_format<F>(mut self, format: F) -> Self
    where
        F: Fn(&Value) -> Choice + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(format));
        self
    }
}

fn default_format(source: Source, record: &Value) -> Choice {
    match source {
        Source::Term => Choice::same(to_text(record)),
        Source::Compound => Choice::same(record.get("term").map(to_text).unwrap_or_default()),
    }
}

/// Client for the term and compound autocomplete endpoints.
#[derive(Clone)]
pub struct Autocomplete {
    transport: Arc<dyn Transport>,
    term_endpoint: String,
    compound_endpoint: String,
}

impl Autocomplete {
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            term_endpoint: config.term_endpoint.clone(),
            compound_endpoint: config.compound_endpoint.clone(),
        }
    }

    /// `GET {endpoint}/{objtype}?q=&size=`, returning the raw response records.
    pub async fn search(&self, source: Source, objtype: &str, q: &str, size: usize) -> Result<Vec<Value>> {
        let endpoint = match source {
            Source::Term => &self.term_endpoint,
            Source::Compound => &self.compound_endpoint,
        };
        let url = endpoint_url(endpoint, &[objtype])?;
        let request = Request::get(url.clone())
            .with_query("q", q)
            .with_query("size", size);

        let body = self.transport.send(request).await?;
        match parse_jsonp(&url, &body)? {
            Value::Array(records) => Ok(records),
            other => Err(ClientError::InvalidResponse {
                url,
                reason: format!("expected a list of records, got {other}"),
            }
            .into()),
        }
    }

    /// Suggestions for `query`, formatted for a selection widget.
    pub async fn suggest(
        &self,
        source: Source,
        objtype: &str,
        query: &str,
        options: &AutocompleteOptions,
    ) -> Result<Vec<Choice>> {
        if query.chars().count() < options.min_input_length {
            return Ok(Vec::new());
        }

        let records = self.search(source, objtype, query, options.size).await?;

        let mut choices = Vec::with_capacity(records.len() + 1);
        if options.allow_any {
            choices.push(Choice::same(query));
        }
        choices.extend(records.iter().map(|record| match &options.format {
            Some(format) => format(record),
            None => default_format(source, record),
        }));
        Ok(choices)
    }
}
