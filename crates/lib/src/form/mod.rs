//! Translation between HTML form inputs and data objects.
//!
//! Forms are described as plain data: each [`FormInput`] carries the name, kind, value and
//! state of one control. Nothing here touches a DOM, so the same code serves browser glue,
//! server-side rendering and tests.
//!
//! Repeated sections use index-encoded names. Inputs named `people-0-name`, `people-0-age`,
//! `people-1-name` become a list field `people` holding one record per index, ordered by
//! the numeric value of the index; a flat list uses names like `tags-0`, `tags-1`.
//!
//! ```
//! use formshape::form::{CaptureOptions, FormInput, form_to_obj};
//! use serde_json::json;
//!
//! let inputs = vec![
//!     FormInput::text("title", "Report"),
//!     FormInput::text("people-5-name", "Bob"),
//!     FormInput::text("people-0-name", "Alice"),
//! ];
//! let obj = form_to_obj(&inputs, &CaptureOptions::default())?;
//! assert_eq!(obj.data()["people"], json!([{"name": "Alice"}, {"name": "Bob"}]));
//! assert_eq!(obj.data()["title"], json!("Report"));
//! # Ok::<(), formshape::Error>(())
//! ```

use std::{collections::BTreeSet, sync::Arc};

use serde_json::{Map, Value};

use crate::{
    DataObj, DataObject, FieldSpec, Result, Schema,
    coerce::{to_bool, to_text},
    dataobj::is_empty_value,
    path::{segments, type_name},
};

mod errors;
pub mod index;
pub mod repeatable;

pub use errors::FormError;
pub use index::FieldIndex;
pub use repeatable::RepeatableGroup;

/// The kind of control an input is, as far as value handling is concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Text inputs, text areas, hidden inputs and anything else with a plain value
    #[default]
    Text,
    /// A checkbox; contributes its checked state instead of its value
    Checkbox,
    /// A plain select
    Select,
    /// A select enhanced into a tag widget; holds a comma-separated list
    TagSelect,
}

/// Description of one form control.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FormInput {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub kind: InputKind,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl FormInput {
    fn new(name: impl Into<String>, kind: InputKind, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Some(name.clone()),
            name,
            kind,
            value: value.into(),
            checked: false,
            disabled: false,
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, InputKind::Text, value)
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, InputKind::Checkbox, "on")
        }
    }

    pub fn select(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, InputKind::Select, value)
    }

    pub fn tags(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, InputKind::TagSelect, value)
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// The value this input contributes when the form is captured.
    pub fn captured_value(&self) -> Value {
        match self.kind {
            InputKind::Checkbox => Value::Bool(self.checked),
            _ => Value::String(self.value.clone()),
        }
    }

    /// The input's dotted data path: its name with `-` replaced by `.`.
    pub fn data_path(&self) -> String {
        self.name.replace('-', ".")
    }
}

/// Options for [`form_to_obj`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureOptions {
    /// Capture disabled inputs too
    pub record_disabled: bool,
}

/// Captures a form into a data object.
///
/// Inputs without a name are ignored, as are disabled inputs unless
/// [`CaptureOptions::record_disabled`] is set. Checkboxes always contribute their checked
/// state; every other input contributes its value only when that value is non-empty.
///
/// Names with more than one `-` separated segment register their first segment as a list
/// group. The group's entries are appended to a list field of the same name in ascending
/// numeric order of their index, so gaps and document order do not matter.
pub fn form_to_obj(inputs: &[FormInput], options: &CaptureOptions) -> Result<DataObj> {
    let mut raw = DataObj::off_schema();
    let mut groups = BTreeSet::new();

    for input in inputs {
        if input.name.is_empty() {
            continue;
        }
        if input.disabled && !options.record_disabled {
            tracing::trace!(name = %input.name, "skipping disabled input");
            continue;
        }

        let value = input.captured_value();
        if input.kind != InputKind::Checkbox && is_empty_value(&value) {
            continue;
        }

        if let Some((group, _)) = input.name.split_once('-') {
            groups.insert(group.to_string());
        }
        raw.set_field(&input.data_path(), value)?;
    }

    let schema: Schema = groups
        .iter()
        .map(|group| (group.clone(), FieldSpec::list(group.as_str())))
        .collect();
    let mut obj = DataObj::new(Arc::new(schema)).with_off_schema(true);

    for group in &groups {
        let entries = match raw.store().get_path(group) {
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                return Err(FormError::GroupShape {
                    group: group.clone(),
                    found: type_name(other),
                }
                .into());
            }
            None => continue,
        };

        let mut ordered = entries
            .iter()
            .map(|(key, value)| Ok((index::parse_index(group, key)?, value)))
            .collect::<std::result::Result<Vec<_>, FormError>>()?;
        ordered.sort_by_key(|(position, _)| *position);

        for (_, value) in ordered {
            obj.append_field(group, value.clone())?;
        }
    }

    for (key, value) in raw.data() {
        if !groups.contains(key) {
            obj.set_field(key, value.clone())?;
        }
    }

    tracing::debug!(
        inputs = inputs.len(),
        groups = groups.len(),
        "captured form into data object"
    );
    Ok(obj)
}

/// Captures a form and passes the result through a crosswalk.
pub fn form_to_obj_with<T, F>(inputs: &[FormInput], options: &CaptureOptions, crosswalk: F) -> Result<T>
where
    F: FnOnce(DataObj) -> Result<T>,
{
    crosswalk(form_to_obj(inputs, options)?)
}

/// A change to apply to one input.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Update {
    SetValue(String),
    SetChecked(bool),
    SetTags(Vec<String>),
}

/// An [`Update`] addressed to an input by name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldAssignment {
    pub name: String,
    pub update: Update,
}

impl FieldAssignment {
    fn for_input(input: &FormInput, value: &Value) -> Self {
        let update = match input.kind {
            InputKind::TagSelect => Update::SetTags(tag_values(value)),
            InputKind::Checkbox => {
                Update::SetChecked(to_bool(value).unwrap_or_else(|| !is_empty_value(value)))
            }
            InputKind::Text | InputKind::Select => Update::SetValue(to_text(value)),
        };
        Self {
            name: input.name.clone(),
            update,
        }
    }
}

fn tag_values(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(to_text).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        Value::Null => Vec::new(),
        other => vec![to_text(other)],
    }
}

fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    segments(path)
        .into_iter()
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Computes the assignments that populate `inputs` from a record.
///
/// Plain inputs read the value at their dotted path. For each list group present in the
/// record as a list, the `n`-th item is bound to the `n`-th index found in the form (in
/// ascending numeric order): record items spread their fields over that index's inputs,
/// scalar items go to the `{group}-{index}` input. Inputs with nothing to show are left
/// out; list items beyond the form's sections are dropped.
pub fn obj_to_form(data: &Map<String, Value>, inputs: &[FormInput]) -> Result<Vec<FieldAssignment>> {
    let index = FieldIndex::build(inputs)?;
    let root = Value::Object(data.clone());
    let mut assignments = Vec::new();

    for (path, input) in index.plain() {
        if let Some(value) = lookup(&root, path) {
            assignments.push(FieldAssignment::for_input(input, value));
        }
    }

    for group in index.group_names() {
        let items = match data.get(group) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => continue,
            Some(other) => {
                return Err(FormError::GroupShape {
                    group: group.to_string(),
                    found: type_name(other),
                }
                .into());
            }
        };

        for (position, item) in items.iter().enumerate() {
            let Some(slots) = index.slot_at(group, position) else {
                tracing::warn!(
                    group,
                    items = items.len(),
                    sections = position,
                    "more list items than form sections"
                );
                break;
            };

            for slot in slots {
                let value = match (item, slot.sub_path.is_empty()) {
                    (Value::Object(_), false) => lookup(item, &slot.sub_path),
                    (Value::Object(_), true) | (_, false) => None,
                    (scalar, true) => Some(scalar),
                };
                if let Some(value) = value {
                    assignments.push(FieldAssignment::for_input(slot.input, value));
                }
            }
        }
    }

    Ok(assignments)
}

/// Populates a form from a data object. See [`obj_to_form`].
pub fn populate(obj: &DataObj, inputs: &[FormInput]) -> Result<Vec<FieldAssignment>> {
    obj_to_form(obj.data(), inputs)
}

/// Writes assignments back into input descriptions, returning how many were applied.
///
/// Tag lists are stored comma-joined, matching how [`form_to_obj`] reads them back.
pub fn apply_assignments(inputs: &mut [FormInput], assignments: &[FieldAssignment]) -> usize {
    let mut applied = 0;
    for assignment in assignments {
        let Some(input) = inputs.iter_mut().find(|i| i.name == assignment.name) else {
            tracing::warn!(name = %assignment.name, "no input for assignment");
            continue;
        };
        match &assignment.update {
            Update::SetValue(value) => input.value = value.clone(),
            Update::SetChecked(checked) => input.checked = *checked,
            Update::SetTags(tags) => input.value = tags.join(","),
        }
        applied += 1;
    }
    applied
}
