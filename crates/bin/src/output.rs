//! Output helpers for human-readable and JSON output.

use formshape::form::{FieldAssignment, Update};

/// Print a table with aligned columns.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // Calculate column widths (max of header and all row values)
    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    // Print header
    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  ").trim_end());

    // Print rows, dropping trailing padding from the last column
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .take(col_count)
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}

/// One table row per assignment: input name, operation and value.
pub fn assignment_rows(assignments: &[FieldAssignment]) -> Vec<Vec<String>> {
    assignments
        .iter()
        .map(|a| {
            // Tags are shown comma-separated in one cell
            let (op, value) = match &a.update {
                Update::SetValue(v) => ("set_value", v.clone()),
                Update::SetChecked(c) => ("set_checked", c.to_string()),
                Update::SetTags(tags) => ("set_tags", tags.join(", ")),
            };
            vec![a.name.clone(), op.to_string(), value]
        })
        .collect()
}
