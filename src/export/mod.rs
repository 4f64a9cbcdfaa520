// CSV export for study tables

use crate::models::{Aspect, Study};

/// Serialize a study as CSV: header row of `Aspect` plus the condition
/// columns, then one row per fixed aspect. Every field is double-quote
/// wrapped with internal quotes doubled; rows are joined by a single
/// newline with no trailing separator.
pub fn to_csv(study: &Study) -> String {
    let mut rows = Vec::with_capacity(1 + Aspect::ALL.len());

    let header: Vec<String> = std::iter::once("Aspect")
        .chain(study.conditions().iter().map(String::as_str))
        .map(csv_field)
        .collect();
    rows.push(header.join(","));

    for aspect in Aspect::ALL {
        let mut row = vec![csv_field(aspect.as_str())];
        for (i, _) in study.conditions().iter().enumerate() {
            row.push(csv_field(study.cell(i, aspect)));
        }
        rows.push(row.join(","));
    }

    rows.join("\n")
}

/// Quote a single CSV field, doubling any embedded double quotes
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Build the download filename `{syndrome}_table.csv`, replacing characters
/// that are unsafe in filenames
pub fn export_filename(syndrome: &str) -> String {
    let safe: String = syndrome
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if safe.is_empty() {
        "study_table.csv".to_string()
    } else {
        format!("{}_table.csv", safe)
    }
}
