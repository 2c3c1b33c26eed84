use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use regex::Regex;

use crate::validation::ValidationError;

static OFFSET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])([0-9]{2}):([0-9]{2})$").expect("invalid regex"));

/// Zone used to show local wall-clock times and to read ISO-8601 date-times
/// that carry no offset designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The host environment's local offset, looked up per instant.
    #[default]
    Host,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Returns the offset in effect at `instant`.
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        match self {
            DisplayZone::Host => Local.offset_from_utc_datetime(&instant.naive_utc()).fix(),
            DisplayZone::Fixed(offset) => *offset,
        }
    }

    /// Resolves a wall-clock time in this zone to an instant.
    ///
    /// Wall-clock times skipped by a DST transition yield `None`; repeated
    /// ones resolve to the earlier instant.
    pub fn resolve_local(&self, wall: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            DisplayZone::Host => earliest_utc(Local.from_local_datetime(wall)),
            DisplayZone::Fixed(offset) => earliest_utc(offset.from_local_datetime(wall)),
        }
    }
}

fn earliest_utc<Tz: TimeZone>(resolved: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    resolved.earliest().map(|dt| dt.with_timezone(&Utc))
}

/// Parses a `±HH:MM` designator into a fixed offset.
pub fn parse_offset(value: &str) -> Result<FixedOffset, ValidationError> {
    let mismatch = || ValidationError::PatternMismatch {
        field: "utc_offset",
        value: value.to_string(),
    };
    let caps = OFFSET_PATTERN.captures(value).ok_or_else(mismatch)?;
    let hours: i32 = caps[2].parse().map_err(|_| mismatch())?;
    let minutes: i32 = caps[3].parse().map_err(|_| mismatch())?;
    if hours > 23 || minutes > 59 {
        return Err(ValidationError::OutOfRange {
            field: "utc_offset",
            value: value.to_string(),
        });
    }
    let seconds = (hours * 3600 + minutes * 60) * if &caps[1] == "-" { -1 } else { 1 };
    FixedOffset::east_opt(seconds).ok_or_else(|| ValidationError::OutOfRange {
        field: "utc_offset",
        value: value.to_string(),
    })
}

/// Renders an offset as `±HH:MM`; sub-minute remainders are dropped.
pub fn format_offset(offset: &FixedOffset) -> String {
    let total_minutes = offset.local_minus_utc() / 60;
    let sign = if total_minutes < 0 { '-' } else { '+' };
    let magnitude = total_minutes.abs();
    format!("{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
}

impl FromStr for DisplayZone {
    type Err = ValidationError;

    /// Accepts `local`, `Z`, or `±HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(DisplayZone::Host),
            "Z" | "z" => Ok(DisplayZone::Fixed(Utc.fix())),
            other => parse_offset(other).map(DisplayZone::Fixed),
        }
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayZone::Host => f.write_str("local"),
            DisplayZone::Fixed(offset) => f.write_str(&format_offset(offset)),
        }
    }
}
