//! Plain-text renderers for dashboard views.

use std::fmt::Write as _;

use crate::domain::{DashboardView, Mode, Notification, Record, RecordId, ValidationReport};

const COLUMNS: [&str; 8] = ["#", "ID", "Username", "Email", "Age", "Phone", "City", "ID Number"];

/// Render the form slots, one per line, with visible errors.
pub fn form(view: &DashboardView) -> String {
    let mut out = String::new();
    match (&view.mode, &view.editing) {
        (Mode::Edit, Some(id)) => {
            let _ = writeln!(out, "Editing record {id}");
        }
        _ => out.push_str("New record\n"),
    }
    for slot in &view.form {
        let _ = write!(out, "  {:<10} {}", slot.field.label(), slot.value);
        if let Some(error) = slot.error {
            let _ = write!(out, "  <- {error}");
        }
        out.push('\n');
    }
    out
}

/// Render the records as an aligned table in server order.
pub fn table(records: &[Record]) -> String {
    if records.is_empty() {
        return "No records.\n".to_owned();
    }
    let rows: Vec<[String; 8]> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let fields = record.fields();
            [
                (index + 1).to_string(),
                record.id().to_string(),
                fields.name.clone(),
                fields.email.clone(),
                fields.age.to_string(),
                fields.phone.clone(),
                fields.city.clone(),
                fields.id_number.clone(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &COLUMNS.map(str::to_owned), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render the detail view for the selected record.
///
/// `detail` is `None` when the selected record vanished after a refresh.
pub fn detail(selected: &RecordId, detail: Option<&Record>) -> String {
    let Some(record) = detail else {
        return format!("Record {selected} is no longer available.\n");
    };
    let fields = record.fields();
    let mut out = String::new();
    let _ = writeln!(out, "Record {}", record.id());
    for (label, value) in [
        ("Username", fields.name.clone()),
        ("Email", fields.email.clone()),
        ("Age", fields.age.to_string()),
        ("Phone", fields.phone.clone()),
        ("City", fields.city.clone()),
        ("ID Number", fields.id_number.clone()),
    ] {
        let _ = writeln!(out, "  {label:<10} {value}");
    }
    out
}

/// Render a notification as a single line.
pub fn notification(notification: &Notification) -> String {
    format!("{notification}\n")
}

/// Render a blocked submission.
pub fn invalid(report: &ValidationReport) -> String {
    format!("Fix the highlighted fields: {report}\n")
}
