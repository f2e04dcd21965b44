use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use formshape::{
    FieldSpec, Schema,
    client::{ClientError, Request, Transport},
    coerce::Coerce,
    form::FormInput,
};
use serde_json::json;

// Re-export tokio test macro for convenience
pub use tokio;

/// Transport double that answers from canned bodies keyed by request URL and records
/// every request it sees. Unknown URLs answer with status 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, String>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> formshape::Result<String> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().get(&url) {
            Some(body) => Ok(body.clone()),
            None => Err(ClientError::Status { url, status: 404 }.into()),
        }
    }
}

/// Schema used by the data object tests.
pub fn article_schema() -> Arc<Schema> {
    Arc::new(
        Schema::new()
            .with("id", FieldSpec::single("id").with_coerce(Coerce::Text))
            .with(
                "title",
                FieldSpec::single("bibjson.title")
                    .with_coerce(Coerce::Text)
                    .with_allow_none(false),
            )
            .with(
                "rating",
                FieldSpec::single("scores.rating")
                    .with_coerce(Coerce::Integer)
                    .with_range(formshape::Range::between(json!(1), json!(10))),
            )
            .with(
                "status",
                FieldSpec::single("admin.status")
                    .with_allowed_values(vec![json!("draft"), json!("published")])
                    .with_default(json!("draft")),
            )
            .with("pages", FieldSpec::single("bibjson.pages").with_coerce(Coerce::Integer))
            .with(
                "loose_pages",
                FieldSpec::single("bibjson.loose_pages")
                    .with_coerce(Coerce::Integer)
                    .with_allow_coerce_failure(true),
            )
            .with("keywords", FieldSpec::list("bibjson.keywords").with_coerce(Coerce::Text)),
    )
}

/// A form with plain fields, a checkbox, a tag selector and a `people` list group.
pub fn people_form() -> Vec<FormInput> {
    vec![
        FormInput::text("title", "Minutes"),
        FormInput::checkbox("public", false),
        FormInput::tags("keywords", "a,b"),
        FormInput::text("people-0-name", "Ada"),
        FormInput::text("people-0-email", "ada@example.org"),
        FormInput::text("people-1-name", "Brian"),
        FormInput::text("people-1-email", "brian@example.org"),
    ]
}

/// A copy of `inputs` with every value cleared and every checkbox unchecked.
pub fn blank(inputs: &[FormInput]) -> Vec<FormInput> {
    inputs
        .iter()
        .map(|input| FormInput {
            value: match input.kind {
                formshape::form::InputKind::Checkbox => input.value.clone(),
                _ => String::new(),
            },
            checked: false,
            ..input.clone()
        })
        .collect()
}
