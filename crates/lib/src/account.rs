//! User account records and their search-result rendering.

use std::sync::{Arc, LazyLock};

use serde_json::{Value, json};

use crate::{
    DataObj, DataObject, FieldSpec, Result, Schema,
    coerce::{Coerce, to_text},
    render::{ResultRenderer, display_text, escape_html},
};

static ACCOUNT_SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    let text = |path: &str| FieldSpec::single(path).with_coerce(Coerce::Text);
    Arc::new(
        Schema::new()
            .with("id", text("id"))
            .with("created_date", text("created_date"))
            .with("last_updated", text("last_updated"))
            .with("email", text("email"))
            .with("name", text("name").with_default(json!("Unknown Name")))
            .with("org_role", text("org_role").with_default(json!("Unknown Role")))
            .with(
                "organisation",
                text("organisation").with_default(json!("Unknown Organisation")),
            )
            .with("role", FieldSpec::list("role").with_coerce(Coerce::Text)),
    )
});

/// The schema shared by every [`BasicAccount`].
pub fn account_schema() -> Arc<Schema> {
    Arc::clone(&ACCOUNT_SCHEMA)
}

/// A user account: contact details, organisation and system roles.
#[derive(Debug, Clone)]
pub struct BasicAccount {
    obj: DataObj,
}

impl Default for BasicAccount {
    fn default() -> Self {
        Self::new()
    }
}

impl BasicAccount {
    pub fn new() -> Self {
        Self {
            obj: DataObj::new(account_schema()),
        }
    }

    /// Wraps an account record as received from the server.
    pub fn from_raw(raw: Value) -> Result<Self> {
        Ok(Self {
            obj: DataObj::from_raw(account_schema(), raw)?,
        })
    }

    pub fn as_dataobj(&self) -> &DataObj {
        &self.obj
    }

    pub fn into_dataobj(self) -> DataObj {
        self.obj
    }

    fn text(&self, field: &str) -> Result<String> {
        Ok(match self.obj.read_field(field)? {
            Value::Null => String::new(),
            value => to_text(&value),
        })
    }

    pub fn id(&self) -> Result<String> {
        self.text("id")
    }

    pub fn email(&self) -> Result<String> {
        self.text("email")
    }

    pub fn name(&self) -> Result<String> {
        self.text("name")
    }

    pub fn org_role(&self) -> Result<String> {
        self.text("org_role")
    }

    pub fn organisation(&self) -> Result<String> {
        self.text("organisation")
    }

    pub fn roles(&self) -> Result<Vec<String>> {
        match self.obj.read_field("role")? {
            Value::Array(items) => Ok(items.iter().map(to_text).collect()),
            other => Ok(vec![to_text(&other)]),
        }
    }

    pub fn add_role(&mut self, role: impl Into<String>) -> Result<()> {
        self.obj.append_field("role", Value::String(role.into()))
    }
}

impl DataObject for BasicAccount {
    fn get_field(&mut self, field: &str) -> Result<Value> {
        self.obj.get_field(field)
    }

    fn set_field(&mut self, field: &str, value: Value) -> Result<()> {
        self.obj.set_field(field, value)
    }

    fn append_field(&mut self, field: &str, value: Value) -> Result<()> {
        self.obj.append_field(field, value)
    }
}

impl serde::Serialize for BasicAccount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.obj, serializer)
    }
}

/// Renders account search results with a link to each account's edit page.
#[derive(Debug, Clone, Default)]
pub struct AccountRenderer {
    no_results_text: Option<String>,
}

impl AccountRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_results_text(mut self, text: impl Into<String>) -> Self {
        self.no_results_text = Some(text.into());
        self
    }
}

impl ResultRenderer for AccountRenderer {
    fn namespace(&self) -> &str {
        "formshape-account"
    }

    fn render_record(&self, record: &Value) -> Result<String> {
        let account = BasicAccount::from_raw(record.clone())?;
        let email = escape_html(&account.email()?);
        let roles = display_text(&Value::from(account.roles()?));

        Ok(format!(
            concat!(
                r#"<tr><td><div class="formshape-account-user-result"><div class="row">"#,
                r#"<div class="col-md-10"><strong>{email}</strong><br>{name}, {org_role} at {organisation}<br>System roles: {roles}</div>"#,
                r#"<div class="col-md-2"><a href="/account/{email}" class="btn btn-info pull-right">Edit User</a></div>"#,
                "</div></div></td></tr>"
            ),
            email = email,
            name = escape_html(&account.name()?),
            org_role = escape_html(&account.org_role()?),
            organisation = escape_html(&account.organisation()?),
            roles = escape_html(&roles),
        ))
    }

    fn no_results_text(&self) -> &str {
        self.no_results_text
            .as_deref()
            .unwrap_or("No results to display")
    }
}
