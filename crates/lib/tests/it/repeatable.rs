use formshape::form::{
    FormInput,
    repeatable::{
        GroupEvent, GroupState, RemoveControl, RemovePolicy, RepeatableGroup, Section,
        SectionControl,
    },
};

fn section(number: u64) -> Section {
    Section::new(
        format!("item_{number}"),
        vec![SectionControl::new(FormInput::text(
            format!("item-{number}-name"),
            format!("name {number}"),
        ))],
    )
}

#[test]
fn next_number_follows_the_maximum() {
    let mut group = RepeatableGroup::new("item", vec![section(1), section(3)]);
    let event = group.add_section().unwrap();
    assert_eq!(
        event,
        GroupEvent::Added {
            id: "item_4".into(),
            number: 4
        }
    );
    assert_eq!(group.state(), GroupState::JustAdded);

    let added = &group.sections()[2];
    assert_eq!(added.id, "item_4");
    assert_eq!(added.controls[0].input.name, "item-4-name");
    assert_eq!(added.controls[0].input.id.as_deref(), Some("item-4-name"));
    assert_eq!(added.controls[0].input.value, "");
    assert_eq!(added.controls[0].label_for.as_deref(), Some("item-4-name"));
}

#[test]
fn added_sections_are_captured_as_list_entries() {
    let mut group = RepeatableGroup::new("item", vec![section(0)]);
    group.add_section().unwrap();

    let inputs: Vec<FormInput> = group
        .inputs()
        .cloned()
        .map(|mut input| {
            if input.value.is_empty() {
                input.value = "new".into();
            }
            input
        })
        .collect();
    let obj = formshape::form::form_to_obj(&inputs, &Default::default()).unwrap();
    assert_eq!(
        obj.data()["item"],
        serde_json::json!([{"name": "name 0"}, {"name": "new"}])
    );
}

#[test]
fn remove_control_follows_policy() {
    let hidden = RepeatableGroup::new("item", vec![section(1)]).with_remove(RemovePolicy::Hide);
    assert_eq!(hidden.remove_control(), RemoveControl::Hidden);

    let mut disabled =
        RepeatableGroup::new("item", vec![section(1)]).with_remove(RemovePolicy::Disable);
    assert_eq!(disabled.remove_control(), RemoveControl::Disabled);
    disabled.add_section().unwrap();
    assert_eq!(disabled.remove_control(), RemoveControl::Shown);

    let fixed = RepeatableGroup::new("item", vec![section(1), section(2)]);
    assert_eq!(fixed.remove_control(), RemoveControl::Hidden);
}

#[test]
fn last_section_cannot_be_removed() {
    let mut group =
        RepeatableGroup::new("item", vec![section(1), section(2)]).with_remove(RemovePolicy::Hide);
    assert_eq!(
        group.remove_section("item_1").unwrap(),
        GroupEvent::Removed {
            id: "item_1".into()
        }
    );
    assert_eq!(group.state(), GroupState::JustRemoved);
    group.settle();
    assert_eq!(group.state(), GroupState::Stable);

    assert!(group.remove_section("item_2").is_err());
    assert!(group.remove_section("item_9").is_err());
    assert_eq!(group.len(), 1);
}

#[test]
fn malformed_ids_are_rejected() {
    assert_eq!(RepeatableGroup::section_number("item_12").unwrap(), 12);
    assert!(RepeatableGroup::section_number("item_x").is_err());

    let mut empty = RepeatableGroup::new("item", Vec::new());
    assert!(empty.add_section().is_err());
}

#[test]
fn flat_list_sections_capture_as_one_list() {
    let first = Section::new(
        "tags_0",
        vec![SectionControl::new(FormInput::text("tags-0", "x"))],
    );
    let mut group = RepeatableGroup::new("tags", vec![first]);
    group.add_section().unwrap();

    let names: Vec<&str> = group.inputs().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["tags-0", "tags-1"]);

    let inputs: Vec<FormInput> = group
        .inputs()
        .cloned()
        .map(|mut input| {
            if input.value.is_empty() {
                input.value = "y".into();
            }
            input
        })
        .collect();
    let obj = formshape::form::form_to_obj(&inputs, &Default::default()).unwrap();
    assert_eq!(
        serde_json::to_value(&obj).unwrap(),
        serde_json::json!({"tags": ["x", "y"]})
    );
}

#[test]
fn dashed_sub_fields_keep_their_name() {
    let first = Section::new(
        "links_0",
        vec![SectionControl::new(FormInput::text("links-0-url-label", "home"))],
    );
    let mut group = RepeatableGroup::new("links", vec![first]);
    group.add_section().unwrap();

    let added = &group.sections()[1].controls[0];
    assert_eq!(added.input.name, "links-1-url-label");
    assert_eq!(added.label_for.as_deref(), Some("links-1-url-label"));
}

#[test]
fn removal_is_refused_unless_enabled() {
    let mut group = RepeatableGroup::new("item", vec![section(1), section(2)]);
    let err = group.remove_section("item_2").unwrap_err();
    assert!(err.is_section_error());
    assert_eq!(group.len(), 2);
}
