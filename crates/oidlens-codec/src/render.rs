//! Shared instant formatting for the hover blocks.
//!
//! Both renderings are fixed-width and locale independent: the UTC form is
//! `YYYY-MM-DDTHH:MM:SS.sssZ`, the local form is the same wall-clock shape
//! followed by an explicit `±HH:MM` offset.

use chrono::{DateTime, Utc};

use crate::zone::{format_offset, DisplayZone};

const WALL_CLOCK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Formats an instant as a UTC string with millisecond precision and `Z`.
pub fn utc_iso(instant: &DateTime<Utc>) -> String {
    format!("{}Z", instant.format(WALL_CLOCK_FORMAT))
}

/// Formats an instant as wall-clock time in `zone` with a `±HH:MM` suffix.
pub fn local_iso(instant: &DateTime<Utc>, zone: &DisplayZone) -> String {
    let offset = zone.offset_at(instant);
    let wall = instant.with_timezone(&offset).naive_local();
    format!("{}{}", wall.format(WALL_CLOCK_FORMAT), format_offset(&offset))
}
