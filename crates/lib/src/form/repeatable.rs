//! Repeatable form sections.
//!
//! A repeatable group is a container of numbered sections with ids `{prefix}_{N}`. Adding
//! a section clones the first one, gives it the next free number and renumbers its
//! controls; removing sections is allowed while more than one remains.
//!
//! Section numbers are not kept contiguous: the next number is always one more than the
//! highest present, so sections `item_1` and `item_3` are followed by `item_4`.

use std::collections::BTreeMap;

use crate::form::{FormError, FormInput};

/// A form control inside a section, with the label that points at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionControl {
    pub input: FormInput,
    /// `for` target of the control's label
    pub label_for: Option<String>,
}

impl SectionControl {
    pub fn new(input: FormInput) -> Self {
        let label_for = Some(input.name.clone());
        Self { input, label_for }
    }
}

/// One numbered section of a repeatable group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    /// Attributes of the section element other than its id
    pub attributes: BTreeMap<String, String>,
    pub controls: Vec<SectionControl>,
}

impl Section {
    pub fn new(id: impl Into<String>, controls: Vec<SectionControl>) -> Self {
        Self {
            id: id.into(),
            attributes: BTreeMap::new(),
            controls,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// What happens to the removal control when only one section is left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovePolicy {
    #[default]
    Hide,
    Disable,
}

/// Visible state of the removal control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveControl {
    Hidden,
    Disabled,
    Shown,
}

/// Where the group is in its add/remove cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupState {
    #[default]
    Stable,
    JustAdded,
    JustRemoved,
}

/// Reported by [`RepeatableGroup::add_section`] and [`RepeatableGroup::remove_section`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupEvent {
    Added { id: String, number: u64 },
    Removed { id: String },
}

/// A container of numbered form sections.
#[derive(Debug, Clone)]
pub struct RepeatableGroup {
    prefix: String,
    sections: Vec<Section>,
    enable_remove: bool,
    remove_policy: RemovePolicy,
    state: GroupState,
}

impl RepeatableGroup {
    pub fn new(prefix: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            prefix: prefix.into(),
            sections,
            enable_remove: false,
            remove_policy: RemovePolicy::default(),
            state: GroupState::Stable,
        }
    }

    /// Allows sections to be removed, handling the last-section control per `policy`.
    pub fn with_remove(mut self, policy: RemovePolicy) -> Self {
        self.enable_remove = true;
        self.remove_policy = policy;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn state(&self) -> GroupState {
        self.state
    }

    /// Returns to [`GroupState::Stable`] once the caller has handled the last change.
    pub fn settle(&mut self) {
        self.state = GroupState::Stable;
    }

    /// All inputs of all sections, in section order.
    pub fn inputs(&self) -> impl Iterator<Item = &FormInput> {
        self.sections
            .iter()
            .flat_map(|s| s.controls.iter().map(|c| &c.input))
    }

    /// State of the removal control for the current number of sections.
    pub fn remove_control(&self) -> RemoveControl {
        match (self.enable_remove, self.sections.len() > 1, self.remove_policy) {
            (true, true, _) => RemoveControl::Shown,
            (true, false, RemovePolicy::Disable) => RemoveControl::Disabled,
            _ => RemoveControl::Hidden,
        }
    }

    /// Parses the number at the end of a section id.
    pub fn section_number(id: &str) -> Result<u64, FormError> {
        id.rsplit('_')
            .next()
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| FormError::InvalidSectionId { id: id.to_string() })
    }

    /// Appends a copy of the first section numbered one above the current maximum.
    ///
    /// The copy keeps the template's attributes and controls; control names and ids have
    /// their index segment (the one after the group name) replaced, values and checked
    /// state are cleared and labels follow the new names.
    pub fn add_section(&mut self) -> Result<GroupEvent, FormError> {
        let template = self.sections.first().ok_or_else(|| FormError::NoTemplate {
            prefix: self.prefix.clone(),
        })?;

        let mut max = 0;
        for section in &self.sections {
            max = max.max(Self::section_number(&section.id)?);
        }
        let number = max + 1;
        let id = format!("{}_{}", self.prefix, number);

        let controls = template
            .controls
            .iter()
            .map(|control| renumber(control, number))
            .collect::<Result<Vec<_>, _>>()?;

        let section = Section {
            id: id.clone(),
            attributes: template.attributes.clone(),
            controls,
        };
        self.sections.push(section);
        self.state = GroupState::JustAdded;

        tracing::debug!(prefix = %self.prefix, %id, sections = self.sections.len(), "added section");
        Ok(GroupEvent::Added { id, number })
    }

    /// Removes the section with `id`.
    ///
    /// Fails unless removal was enabled with [`with_remove`](Self::with_remove). The last
    /// remaining section cannot be removed.
    pub fn remove_section(&mut self, id: &str) -> Result<GroupEvent, FormError> {
        if !self.enable_remove {
            return Err(FormError::RemoveDisabled {
                prefix: self.prefix.clone(),
            });
        }
        let position = self
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| FormError::SectionNotFound { id: id.to_string() })?;
        if self.sections.len() == 1 {
            return Err(FormError::LastSection { id: id.to_string() });
        }

        self.sections.remove(position);
        self.state = GroupState::JustRemoved;

        tracing::debug!(prefix = %self.prefix, id, sections = self.sections.len(), "removed section");
        Ok(GroupEvent::Removed { id: id.to_string() })
    }
}

fn renumber(control: &SectionControl, number: u64) -> Result<SectionControl, FormError> {
    let mut parts = control.input.name.splitn(3, '-');
    let group = parts.next().unwrap_or_default();
    if parts.next().is_none() {
        return Err(FormError::InvalidControlName {
            name: control.input.name.clone(),
        });
    }
    let name = match parts.next() {
        Some(sub_path) => format!("{group}-{number}-{sub_path}"),
        None => format!("{group}-{number}"),
    };

    let input = FormInput {
        id: Some(name.clone()),
        name: name.clone(),
        value: String::new(),
        checked: false,
        ..control.input.clone()
    };
    Ok(SectionControl {
        input,
        label_for: control.label_for.as_ref().map(|_| name),
    })
}
