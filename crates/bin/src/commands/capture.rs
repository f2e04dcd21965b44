//! Capture command - turns a form description into a JSON record.

use formshape::form::{CaptureOptions, form_to_obj};

use crate::cli::CaptureArgs;

/// Run the capture command
pub fn run(args: &CaptureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = super::read_form(&args.form)?;
    let options = CaptureOptions {
        record_disabled: args.record_disabled,
    };

    let obj = form_to_obj(&inputs, &options)?;
    tracing::info!(fields = obj.data().len(), "captured form");
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
