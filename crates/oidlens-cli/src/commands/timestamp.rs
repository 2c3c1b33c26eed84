//! Timestamp command implementation.

use oidlens_codec::render::utc_iso;
use oidlens_codec::{timestamp, DisplayZone, TimestampToken};
use serde_json::json;

use crate::output::format_json;

pub fn run(
    value: String,
    json: bool,
    zone: DisplayZone,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = TimestampToken::parse(&value).map_err(|e| format!("Invalid timestamp: {}", e))?;
    if !token.is_strict() {
        tracing::warn!(
            value = %value,
            "digit run longer than 13 digits, reading the leading 13 as milliseconds"
        );
    }
    let decoded = token
        .decode_in(&zone)
        .map_err(|e| format!("Invalid timestamp: {}", e))?;

    if json {
        let output = json!({
            "input": value,
            "epoch_seconds": decoded.epoch_seconds,
            "instant": utc_iso(&decoded.instant),
            "synthetic_identifier": decoded.synthetic_identifier,
            "strict": token.is_strict(),
        });
        println!("{}", format_json(&output));
    } else {
        println!("{}", timestamp::render_in(&value, &zone));
    }
    Ok(())
}
