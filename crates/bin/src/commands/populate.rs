//! Populate command - shows how a record would fill a form.

use serde_json::Value;

use formshape::form::obj_to_form;

use crate::{
    cli::{Format, PopulateArgs},
    output,
};

/// Run the populate command
pub fn run(args: &PopulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = super::read_form(&args.form)?;
    let text = std::fs::read_to_string(&args.object)
        .map_err(|e| format!("failed to read object {}: {e}", args.object.display()))?;
    let record = match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => map,
        other => return Err(format!("object file must hold a JSON object, got {other}").into()),
    };

    let assignments = obj_to_form(&record, &inputs)?;
    tracing::info!(assignments = assignments.len(), "computed form population");

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&assignments)?),
        Format::Human if assignments.is_empty() => println!("Nothing to populate"),
        Format::Human => output::print_table(
            &["INPUT", "OPERATION", "VALUE"],
            &output::assignment_rows(&assignments),
        ),
    }
    Ok(())
}
