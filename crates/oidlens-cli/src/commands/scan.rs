//! Scan command implementation.

use oidlens_codec::{object_id, DisplayZone};

use crate::input::read_text;
use crate::output::{format_table_row, match_json, print_table_header};

pub fn run(
    input: Option<String>,
    json: bool,
    zone: DisplayZone,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_text(input.as_deref())?;
    let matches = object_id::find_all(&text);
    tracing::info!(count = matches.len(), "scan complete");

    if !json {
        print_table_header();
    }

    for m in &matches {
        let decoded = object_id::decode(&m.value);
        if json {
            let line = match_json(m, decoded.as_ref(), &zone)?;
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!("{}", format_table_row(m, decoded.as_ref()));
        }
    }

    Ok(())
}
