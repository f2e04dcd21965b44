use formshape::{
    DataObj,
    form::{
        CaptureOptions, FieldAssignment, FieldIndex, FormInput, Update, apply_assignments,
        form_to_obj, form_to_obj_with, obj_to_form, populate,
    },
};
use serde_json::json;

use crate::helpers::{blank, people_form};

fn capture(inputs: &[FormInput]) -> DataObj {
    form_to_obj(inputs, &CaptureOptions::default()).unwrap()
}

#[test]
fn list_groups_become_lists_of_records() {
    let obj = capture(&people_form());
    assert_eq!(
        obj.data()["people"],
        json!([
            {"name": "Ada", "email": "ada@example.org"},
            {"name": "Brian", "email": "brian@example.org"}
        ])
    );
    assert_eq!(obj.data()["title"], json!("Minutes"));
    assert_eq!(obj.data()["keywords"], json!("a,b"));
}

#[test]
fn unchecked_checkbox_is_stored_as_false() {
    let obj = capture(&[FormInput::checkbox("public", false)]);
    assert_eq!(obj.data()["public"], json!(false));
}

#[test]
fn empty_and_unnamed_inputs_are_skipped() {
    let obj = capture(&[
        FormInput::text("title", ""),
        FormInput::text("", "orphan"),
        FormInput::text("subtitle", "kept"),
    ]);
    assert_eq!(serde_json::to_value(&obj).unwrap(), json!({"subtitle": "kept"}));
}

#[test]
fn disabled_inputs_are_skipped_unless_recorded() {
    let inputs = [
        FormInput::text("title", "T"),
        FormInput::text("secret", "s").disabled(),
    ];
    assert!(!capture(&inputs).data().contains_key("secret"));

    let recorded = form_to_obj(
        &inputs,
        &CaptureOptions {
            record_disabled: true,
        },
    )
    .unwrap();
    assert_eq!(recorded.data()["secret"], json!("s"));
}

#[test]
fn sparse_indices_are_compacted_in_numeric_order() {
    let obj = capture(&[
        FormInput::text("people-10-name", "Third"),
        FormInput::text("people-5-name", "Second"),
        FormInput::text("people-0-name", "First"),
    ]);
    assert_eq!(
        obj.data()["people"],
        json!([{"name": "First"}, {"name": "Second"}, {"name": "Third"}])
    );
}

#[test]
fn scalar_group_entries_become_scalar_lists() {
    let obj = capture(&[FormInput::text("tags-1", "y"), FormInput::text("tags-0", "x")]);
    assert_eq!(obj.data()["tags"], json!(["x", "y"]));
}

#[test]
fn non_integer_group_index_is_rejected() {
    let err = form_to_obj(
        &[FormInput::text("people-first-name", "Ada")],
        &CaptureOptions::default(),
    )
    .unwrap_err();
    assert!(err.is_form_error());
}

#[test]
fn crosswalk_receives_captured_object() {
    let title = form_to_obj_with(&people_form(), &CaptureOptions::default(), |obj| {
        Ok(obj.data()["title"].clone())
    })
    .unwrap();
    assert_eq!(title, json!("Minutes"));
}

#[test]
fn populate_assigns_plain_and_group_inputs() {
    let inputs = people_form();
    let record = json!({
        "title": "Agenda",
        "public": true,
        "keywords": ["x", "y"],
        "people": [{"name": "Cy", "email": "cy@example.org"}]
    });
    let assignments = obj_to_form(record.as_object().unwrap(), &inputs).unwrap();

    let find = |name: &str| {
        assignments
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.update.clone())
    };
    assert_eq!(find("title"), Some(Update::SetValue("Agenda".into())));
    assert_eq!(find("public"), Some(Update::SetChecked(true)));
    assert_eq!(find("keywords"), Some(Update::SetTags(vec!["x".into(), "y".into()])));
    assert_eq!(find("people-0-name"), Some(Update::SetValue("Cy".into())));
    assert_eq!(find("people-0-email"), Some(Update::SetValue("cy@example.org".into())));
    assert_eq!(find("people-1-name"), None);
}

#[test]
fn populate_binds_items_to_sparse_indices() {
    let inputs = [
        FormInput::text("people-0-name", ""),
        FormInput::text("people-5-name", ""),
    ];
    let record = json!({"people": [{"name": "A"}, {"name": "B"}, {"name": "dropped"}]});
    let assignments = obj_to_form(record.as_object().unwrap(), &inputs).unwrap();
    assert_eq!(
        assignments,
        vec![
            FieldAssignment {
                name: "people-0-name".into(),
                update: Update::SetValue("A".into()),
            },
            FieldAssignment {
                name: "people-5-name".into(),
                update: Update::SetValue("B".into()),
            },
        ]
    );
}

#[test]
fn populate_rejects_group_that_is_not_a_list() {
    let inputs = [FormInput::text("people-0-name", "")];
    let record = json!({"people": "nobody"});
    let err = obj_to_form(record.as_object().unwrap(), &inputs).unwrap_err();
    assert!(err.is_invalid_operation());
}

#[test]
fn capture_then_populate_reproduces_the_form() {
    let original = people_form();
    let obj = capture(&original);

    let mut restored = blank(&original);
    let assignments = populate(&obj, &restored).unwrap();
    let applied = apply_assignments(&mut restored, &assignments);

    assert_eq!(applied, original.len());
    assert_eq!(restored, original);
}

#[test]
fn field_index_orders_group_indices_numerically() {
    let inputs = [
        FormInput::text("people-10-name", ""),
        FormInput::text("people-2-name", ""),
        FormInput::text("title", ""),
    ];
    let index = FieldIndex::build(&inputs).unwrap();
    assert_eq!(index.group_names().collect::<Vec<_>>(), vec!["people"]);
    assert_eq!(index.slot_at("people", 0).unwrap()[0].input.name, "people-2-name");
    assert_eq!(index.slot_at("people", 1).unwrap()[0].input.name, "people-10-name");
    assert!(index.slot_at("people", 2).is_none());
    assert_eq!(index.plain().map(|(path, _)| path).collect::<Vec<_>>(), vec!["title"]);
}

#[test]
fn people_ages_round_trip_in_index_order() {
    let original = vec![
        FormInput::text("people-0-name", "Alice"),
        FormInput::text("people-0-age", "30"),
        FormInput::text("people-1-name", "Bob"),
        FormInput::text("people-1-age", "25"),
    ];
    let obj = capture(&original);
    assert_eq!(
        obj.data()["people"],
        json!([{"name": "Alice", "age": "30"}, {"name": "Bob", "age": "25"}])
    );

    let mut restored = blank(&original);
    let assignments = populate(&obj, &restored).unwrap();
    apply_assignments(&mut restored, &assignments);
    assert_eq!(restored, original);
}
