//! Name index over form inputs.
//!
//! The index is built from input names alone. Names with more than one `-` separated
//! segment are list-group members: `people-3-name` belongs to group `people` at index 3
//! with sub-path `name`, and `tags-0` belongs to group `tags` at index 0 with an empty
//! sub-path. Every other name is a plain field addressed by its dotted path.

use std::collections::BTreeMap;

use crate::form::{FormError, FormInput};

/// One input bound to a position in a list group.
#[derive(Debug, Clone)]
pub struct GroupSlot<'a> {
    /// Dotted path inside the list entry, empty for flat lists
    pub sub_path: String,
    pub input: &'a FormInput,
}

/// Inputs of one list group keyed by their numeric index, in ascending order.
pub type GroupSlots<'a> = BTreeMap<i64, Vec<GroupSlot<'a>>>;

/// Index of form inputs by name structure.
#[derive(Debug, Default)]
pub struct FieldIndex<'a> {
    plain: BTreeMap<String, &'a FormInput>,
    groups: BTreeMap<&'a str, GroupSlots<'a>>,
}

/// Splits a list-group name into `(group, index, sub_path)`.
///
/// Returns `Ok(None)` for plain names.
pub fn parse_group_name(name: &str) -> Result<Option<(&str, i64, &str)>, FormError> {
    let mut parts = name.splitn(3, '-');
    let group = parts.next().unwrap_or_default();
    let Some(index) = parts.next() else {
        return Ok(None);
    };
    let sub_path = parts.next().unwrap_or_default();

    let index = parse_index(group, index)?;
    Ok(Some((group, index, sub_path)))
}

/// Parses a list-group index as an integer.
pub fn parse_index(group: &str, key: &str) -> Result<i64, FormError> {
    key.trim().parse().map_err(|_| FormError::InvalidIndex {
        group: group.to_string(),
        key: key.to_string(),
    })
}

impl<'a> FieldIndex<'a> {
    /// Builds the index over every named input.
    pub fn build(inputs: impl IntoIterator<Item = &'a FormInput>) -> Result<Self, FormError> {
        let mut index = FieldIndex::default();
        for input in inputs {
            if input.name.is_empty() {
                continue;
            }
            match parse_group_name(&input.name)? {
                Some((group, position, sub_path)) => index
                    .groups
                    .entry(group)
                    .or_default()
                    .entry(position)
                    .or_default()
                    .push(GroupSlot {
                        sub_path: sub_path.replace('-', "."),
                        input,
                    }),
                None => {
                    index.plain.insert(input.name.clone(), input);
                }
            }
        }
        Ok(index)
    }

    /// Plain (non-group) inputs by dotted path.
    pub fn plain(&self) -> impl Iterator<Item = (&str, &'a FormInput)> + '_ {
        self.plain.iter().map(|(path, input)| (path.as_str(), *input))
    }

    /// The list group names present in the form.
    pub fn group_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    /// A group's slots, ordered by numeric index.
    pub fn group(&self, name: &str) -> Option<&GroupSlots<'a>> {
        self.groups.get(name)
    }

    /// Slot inputs for the `position`-th index of a group (0-based, after sorting).
    pub fn slot_at(&self, group: &str, position: usize) -> Option<&[GroupSlot<'a>]> {
        self.groups
            .get(group)?
            .values()
            .nth(position)
            .map(Vec::as_slice)
    }
}
