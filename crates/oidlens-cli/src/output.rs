//! Output formatting utilities.

use oidlens_codec::object_id::DecodedIdentifier;
use oidlens_codec::render::{local_iso, utc_iso};
use oidlens_codec::{DisplayZone, Match};
use serde_json::{json, Value};

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// JSON view of a decoded identifier, with both renderings of its instant.
pub fn object_id_json(value: &str, decoded: &DecodedIdentifier, zone: &DisplayZone) -> Value {
    json!({
        "object_id": value,
        "embedded_timestamp": decoded.embedded_timestamp,
        "machine": decoded.machine,
        "process": decoded.process,
        "counter": decoded.counter,
        "created_at": local_iso(&decoded.instant, zone),
        "created_at_utc": utc_iso(&decoded.instant),
    })
}

/// JSON line for a scan match: the match itself plus its decoded view.
pub fn match_json(
    m: &Match,
    decoded: Option<&DecodedIdentifier>,
    zone: &DisplayZone,
) -> Result<Value, serde_json::Error> {
    let mut line = serde_json::to_value(m)?;
    if let (Some(d), Value::Object(fields)) = (decoded, &mut line) {
        if let Value::Object(view) = object_id_json(&m.value, d, zone) {
            fields.extend(view);
        }
    }
    Ok(line)
}

/// Formats a scan match as a table row.
pub fn format_table_row(m: &Match, decoded: Option<&DecodedIdentifier>) -> String {
    let created_at = decoded
        .map(|d| utc_iso(&d.instant))
        .unwrap_or_else(|| "?".to_string());

    format!("{:<8} {:<8} {:<24} {}", m.start, m.end, m.value, created_at)
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!(
        "{:<8} {:<8} {:<24} {}",
        "START", "END", "OBJECT_ID", "CREATED_AT"
    );
    println!("{}", "-".repeat(68));
}
