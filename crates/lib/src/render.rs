//! HTML rendering of search results.
//!
//! A [`ResultRenderer`] turns one result record into an HTML fragment;
//! [`render_results`] wraps the fragments in row markup and falls back to the renderer's
//! no-results text for an empty result set. Every value taken from a record is escaped
//! before it is written into markup.

use serde_json::Value;

use crate::{PathStore, Result, coerce::to_text};

/// Escapes the characters that are significant in HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '/' => escaped.push_str("&#x2F;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders individual result records.
pub trait ResultRenderer {
    /// Prefix for the CSS classes of the generated markup
    fn namespace(&self) -> &str {
        "formshape-results"
    }

    fn render_record(&self, record: &Value) -> Result<String>;

    fn no_results_text(&self) -> &str {
        "No results to display"
    }
}

/// Renders `results` as a container of rows, one per record.
pub fn render_results<R: ResultRenderer + ?Sized>(renderer: &R, results: &[Value]) -> Result<String> {
    let namespace = renderer.namespace();
    let body = if results.is_empty() {
        escape_html(renderer.no_results_text())
    } else {
        let mut rows = String::new();
        for record in results {
            let rendered = renderer.render_record(record)?;
            rows.push_str(&format!(
                r#"<div class="row"><div class="col-md-12"><div class="{namespace}-record">{rendered}</div></div></div>"#
            ));
        }
        rows
    };

    tracing::trace!(results = results.len(), namespace, "rendered results");
    Ok(format!(r#"<div class="{namespace}-container">{body}</div>"#))
}

/// Displays a fixed list of fields as `display: value` lines.
///
/// Fields are dotted paths into the record; list values are joined with `", "` and absent
/// or null fields are skipped.
#[derive(Debug, Clone, Default)]
pub struct FieldListRenderer {
    fields: Vec<(String, String)>,
    no_results_text: Option<String>,
}

impl FieldListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, display: impl Into<String>, field: impl Into<String>) -> Self {
        self.fields.push((display.into(), field.into()));
        self
    }

    pub fn with_no_results_text(mut self, text: impl Into<String>) -> Self {
        self.no_results_text = Some(text.into());
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl ResultRenderer for FieldListRenderer {
    fn render_record(&self, record: &Value) -> Result<String> {
        let store = PathStore::from_value(record.clone())?;
        let mut html = String::new();
        for (display, field) in &self.fields {
            let text = match store.get_path(field) {
                None | Some(Value::Null) => continue,
                Some(value) => display_text(value),
            };
            html.push_str(&format!(
                "<strong>{}:</strong> {}<br>",
                escape_html(display),
                escape_html(&text)
            ));
        }
        Ok(html)
    }

    fn no_results_text(&self) -> &str {
        self.no_results_text
            .as_deref()
            .unwrap_or("No results to display")
    }
}

/// Text shown for a record value; lists are joined with `", "`.
pub(crate) fn display_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(to_text).collect::<Vec<_>>().join(", "),
        other => to_text(other),
    }
}
