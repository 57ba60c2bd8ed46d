//! Plain-text rendering of controller views.

use std::fmt::Write as _;

use pharmadb_core::{format_coordinate, format_distance, PharmacyRecord};
use pharmadb_ui::{SaveStatus, SearchView};

pub fn records(records: &[PharmacyRecord]) -> String {
    if records.is_empty() {
        return "No saved pharmacies. Search an address to store some.\n".to_string();
    }
    let mut out = format!("Saved pharmacies ({})\n", records.len());
    for record in records {
        let _ = writeln!(out, "{}", record_line(record));
    }
    out
}

pub fn record_line(record: &PharmacyRecord) -> String {
    format!(
        "#{} {} | {} | {} | {}, {}",
        record.id,
        record.name,
        record.address.as_deref().unwrap_or("-"),
        format_distance(record.distance),
        format_coordinate(record.latitude),
        format_coordinate(record.longitude),
    )
}

pub fn search(view: &SearchView) -> String {
    let mut out = format!("Search results ({})\n", view.entries.len());
    for (index, entry) in view.entries.iter().enumerate() {
        let result = &entry.result;
        let _ = write!(
            out,
            "[{index}] {} | {} | {}",
            result.name,
            result.address.as_deref().unwrap_or("-"),
            result.distance,
        );
        match &entry.save {
            SaveStatus::Idle => {}
            SaveStatus::Saving => out.push_str(" (saving)"),
            SaveStatus::Saved { id } => {
                let _ = write!(out, " (saved as #{id})");
            }
            SaveStatus::Failed(message) => {
                let _ = write!(out, " ({message})");
            }
        }
        out.push('\n');
        if let Some(url) = &result.direction_url {
            let _ = writeln!(out, "    directions: {url}");
        }
    }
    out
}
