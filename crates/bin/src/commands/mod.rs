//! Subcommand implementations.

use std::path::Path;

use formshape::form::FormInput;

pub mod capture;
pub mod fragment;
pub mod populate;

/// Reads a JSON list of form inputs.
pub(crate) fn read_form(path: &Path) -> Result<Vec<FormInput>, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read form {}: {e}", path.display()))?;
    let inputs: Vec<FormInput> = serde_json::from_str(&text)
        .map_err(|e| format!("failed to parse form {}: {e}", path.display()))?;
    tracing::debug!(inputs = inputs.len(), path = %path.display(), "loaded form");
    Ok(inputs)
}
