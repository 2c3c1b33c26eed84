//! Objectid command implementation.

use oidlens_codec::{object_id, DisplayZone, ObjectId};

use crate::output::{format_json, object_id_json};

pub fn run(
    value: String,
    json: bool,
    zone: DisplayZone,
) -> Result<(), Box<dyn std::error::Error>> {
    let decoded = ObjectId::parse(value.as_str())
        .and_then(|id| id.decode())
        .map_err(|e| format!("Invalid ObjectId: {}", e))?;

    if json {
        println!("{}", format_json(&object_id_json(&value, &decoded, &zone)));
    } else {
        println!("{}", object_id::render_in(&value, &zone));
    }
    Ok(())
}
