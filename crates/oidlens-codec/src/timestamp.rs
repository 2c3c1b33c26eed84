//! Timestamp and ISO-8601 date tokens, and the zero-filled identifiers
//! synthesized from them.
//!
//! Accepted token shapes, after [`normalize`]:
//! - 10 digits: seconds since the Unix epoch
//! - 13 digits: milliseconds since the Unix epoch
//! - 14+ digits: the leading 13 digits read as milliseconds ([`parse`] only)
//! - `YYYY-MM-DD[THH:MM:SS[.sss][Z|±HH:MM]]`
//!
//! Every decoded instant must fall in a year strictly between 1970 and 2100.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use serde::Serialize;

use crate::render::utc_iso;
use crate::scanner::ISO_8601_SHAPE;
use crate::validation::ValidationError;
use crate::zone::{parse_offset, DisplayZone};

/// Returned by [`render`] when the candidate is not a usable timestamp.
pub const INVALID_SENTINEL: &str = "Invalid timestamp or date format";

const SECONDS_DIGITS: usize = 10;
const MILLIS_DIGITS: usize = 13;
const YEAR_FLOOR: i32 = 1970;
const YEAR_CEILING: i32 = 2100;
const ZERO_TAIL: &str = "0000000000000000";

static GROUPED_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:_[0-9]+)*$").expect("invalid regex"));
static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("invalid regex"));
static ISO_8601: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^(?:{ISO_8601_SHAPE})$")).expect("invalid regex"));

/// Strips one matching pair of quotes and removes the underscores of a
/// grouped digit run (`1672_531_200` becomes `1672531200`).
pub fn normalize(raw: &str) -> Cow<'_, str> {
    let unquoted = strip_quotes(raw);
    if unquoted.contains('_') && GROUPED_DIGITS.is_match(unquoted) {
        Cow::Owned(unquoted.replace('_', ""))
    } else {
        Cow::Borrowed(unquoted)
    }
}

fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    raw
}

/// A classified timestamp candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampToken {
    /// Ten digits of seconds.
    Seconds(i64),
    /// Thirteen digits of milliseconds.
    Millis(i64),
    /// Leading thirteen digits of a longer run, read as milliseconds.
    TruncatedMillis(i64),
    /// ISO-8601 date or date-time text.
    Iso8601(String),
}

impl TimestampToken {
    /// Normalizes and classifies `raw`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = normalize(raw);
        let normalized: &str = &normalized;

        if DIGITS.is_match(normalized) {
            let token = match normalized.len() {
                SECONDS_DIGITS => TimestampToken::Seconds(parse_digits(normalized)?),
                MILLIS_DIGITS => TimestampToken::Millis(parse_digits(normalized)?),
                n if n > MILLIS_DIGITS => {
                    TimestampToken::TruncatedMillis(parse_digits(&normalized[..MILLIS_DIGITS])?)
                }
                _ => {
                    return Err(ValidationError::PatternMismatch {
                        field: "timestamp_digits",
                        value: raw.to_string(),
                    })
                }
            };
            return Ok(token);
        }

        if ISO_8601.is_match(normalized) {
            return Ok(TimestampToken::Iso8601(normalized.to_string()));
        }

        Err(ValidationError::PatternMismatch {
            field: "timestamp",
            value: raw.to_string(),
        })
    }

    /// False for the lenient over-long digit form, which only [`parse`] accepts.
    pub fn is_strict(&self) -> bool {
        !matches!(self, TimestampToken::TruncatedMillis(_))
    }

    /// Resolves the token to an instant, reading designator-free date-times in `zone`.
    pub fn instant_in(&self, zone: &DisplayZone) -> Result<DateTime<Utc>, ValidationError> {
        let instant = match self {
            TimestampToken::Seconds(secs) => DateTime::from_timestamp(*secs, 0),
            TimestampToken::Millis(ms) | TimestampToken::TruncatedMillis(ms) => {
                DateTime::from_timestamp_millis(*ms)
            }
            TimestampToken::Iso8601(text) => resolve_iso(text, zone),
        };
        let instant = instant.ok_or_else(|| ValidationError::InvalidInstant {
            value: self.to_string(),
        })?;

        let year = instant.year();
        if year <= YEAR_FLOOR || year >= YEAR_CEILING {
            return Err(ValidationError::OutOfRange {
                field: "year",
                value: year.to_string(),
            });
        }
        Ok(instant)
    }

    /// Decodes the token and builds its synthetic identifier.
    pub fn decode_in(&self, zone: &DisplayZone) -> Result<DecodedTimestamp, ValidationError> {
        let instant = self.instant_in(zone)?;
        let epoch_seconds = match self {
            TimestampToken::Seconds(secs) => *secs,
            TimestampToken::Millis(ms) | TimestampToken::TruncatedMillis(ms) => {
                ms.div_euclid(1000)
            }
            TimestampToken::Iso8601(_) => instant.timestamp(),
        };
        Ok(DecodedTimestamp {
            epoch_seconds,
            instant,
            synthetic_identifier: synthetic_identifier(epoch_seconds)?,
        })
    }
}

impl std::fmt::Display for TimestampToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimestampToken::Seconds(v)
            | TimestampToken::Millis(v)
            | TimestampToken::TruncatedMillis(v) => write!(f, "{v}"),
            TimestampToken::Iso8601(text) => f.write_str(text),
        }
    }
}

fn parse_digits(digits: &str) -> Result<i64, ValidationError> {
    digits.parse().map_err(|_| ValidationError::OutOfRange {
        field: "timestamp_digits",
        value: digits.to_string(),
    })
}

fn resolve_iso(text: &str, zone: &DisplayZone) -> Option<DateTime<Utc>> {
    let caps = ISO_8601.captures(text)?;
    let date = NaiveDate::from_ymd_opt(
        caps["year"].parse().ok()?,
        caps["month"].parse().ok()?,
        caps["day"].parse().ok()?,
    )?;

    // Date-only forms are midnight UTC.
    let Some(hour) = caps.name("hour") else {
        return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
    };
    let millis = match caps.name("millis") {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let time = NaiveTime::from_hms_milli_opt(
        hour.as_str().parse().ok()?,
        caps["minute"].parse().ok()?,
        caps["second"].parse().ok()?,
        millis,
    )?;
    let wall = date.and_time(time);

    match caps.name("designator").map(|m| m.as_str()) {
        None => zone.resolve_local(&wall),
        Some("Z") => Some(wall.and_utc()),
        Some(offset) => {
            let offset: FixedOffset = parse_offset(offset).ok()?;
            offset
                .from_local_datetime(&wall)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        }
    }
}

/// Lowercase 8-hex-digit big-endian seconds followed by sixteen zeros.
pub fn synthetic_identifier(epoch_seconds: i64) -> Result<String, ValidationError> {
    let secs = u32::try_from(epoch_seconds).map_err(|_| ValidationError::OutOfRange {
        field: "epoch_seconds",
        value: epoch_seconds.to_string(),
    })?;
    Ok(format!("{secs:08x}{ZERO_TAIL}"))
}

/// A decoded timestamp and the identifier prefix it corresponds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedTimestamp {
    /// Whole seconds since the Unix epoch (floored).
    pub epoch_seconds: i64,
    /// The decoded instant, with millisecond precision where the token had it.
    pub instant: DateTime<Utc>,
    /// 24-hex identifier with only the timestamp field populated.
    pub synthetic_identifier: String,
}

/// Strict validity check; over-long digit runs are rejected here.
pub fn is_valid_timestamp(raw: &str) -> bool {
    is_valid_timestamp_in(raw, &DisplayZone::Host)
}

/// [`is_valid_timestamp`] with designator-free date-times read in `zone`.
pub fn is_valid_timestamp_in(raw: &str, zone: &DisplayZone) -> bool {
    match TimestampToken::parse(raw) {
        Ok(token) if token.is_strict() => token.instant_in(zone).is_ok(),
        _ => false,
    }
}

/// Decodes `raw`, or `None` if it is not a usable timestamp.
pub fn parse(raw: &str) -> Option<DecodedTimestamp> {
    parse_in(raw, &DisplayZone::Host)
}

/// [`parse`] with designator-free date-times read in `zone`.
pub fn parse_in(raw: &str, zone: &DisplayZone) -> Option<DecodedTimestamp> {
    match TimestampToken::parse(raw).and_then(|token| token.decode_in(zone)) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::debug!(candidate = raw, error = %err, "timestamp rejected");
            None
        }
    }
}

/// Hover block for `raw`.
pub fn render(raw: &str) -> String {
    render_in(raw, &DisplayZone::Host)
}

/// [`render`] with designator-free date-times read in `zone`.
pub fn render_in(raw: &str, zone: &DisplayZone) -> String {
    match parse_in(raw, zone) {
        Some(decoded) => render_block(&decoded),
        None => INVALID_SENTINEL.to_string(),
    }
}

pub(crate) fn render_block(decoded: &DecodedTimestamp) -> String {
    format!(
        "🕐 **Timestamp**: {} ({})\n\n📦 **Generated ObjectId**: `{}`",
        decoded.epoch_seconds,
        utc_iso(&decoded.instant),
        decoded.synthetic_identifier
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_one_matching_quote_pair() {
        assert_eq!(normalize("\"2023-01-01\""), "2023-01-01");
        assert_eq!(normalize("'2023-01-01'"), "2023-01-01");
        assert_eq!(normalize("\"2023-01-01'"), "\"2023-01-01'");
        assert_eq!(normalize("\"\"1\"\""), "\"1\"");
        assert_eq!(normalize("\""), "\"");
    }

    #[test]
    fn normalize_joins_grouped_digits_only() {
        assert_eq!(normalize("1672_531_200"), "1672531200");
        assert_eq!(normalize("'1672_531_200'"), "1672531200");
        assert_eq!(normalize("1672__531"), "1672__531");
        assert_eq!(normalize("_1672"), "_1672");
        assert_eq!(normalize("1672_"), "1672_");
        assert_eq!(normalize("abc_123"), "abc_123");
        assert!(matches!(normalize("1350508407"), Cow::Borrowed(_)));
    }

    #[test]
    fn classifies_digit_lengths() {
        assert_eq!(
            TimestampToken::parse("1350508407").unwrap(),
            TimestampToken::Seconds(1_350_508_407)
        );
        assert_eq!(
            TimestampToken::parse("1350508407000").unwrap(),
            TimestampToken::Millis(1_350_508_407_000)
        );
        assert_eq!(
            TimestampToken::parse("17524657977069").unwrap(),
            TimestampToken::TruncatedMillis(1_752_465_797_706)
        );
        assert!(TimestampToken::parse("123456789012").is_err());
        assert!(TimestampToken::parse("123").is_err());
    }

    #[test]
    fn non_ascii_digits_are_not_digits() {
        assert!(TimestampToken::parse("١٣٥٠٥٠٨٤٠٧").is_err());
    }

    #[test]
    fn synthetic_identifier_pads_to_eight_hex_digits() {
        assert_eq!(
            synthetic_identifier(0x0100_0000).unwrap(),
            "010000000000000000000000"
        );
        assert!(synthetic_identifier(-1).is_err());
        assert!(synthetic_identifier(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn iso_rejects_impossible_calendar_values() {
        let utc = DisplayZone::Fixed(FixedOffset::east_opt(0).unwrap());
        for text in [
            "2023-13-01",
            "2023-02-30",
            "2023-01-01T24:00:00Z",
            "2023-01-01T10:60:00Z",
            "2023-01-01T10:00:60Z",
            "2023-01-01T10:00:00+24:00",
        ] {
            let token = TimestampToken::parse(text).unwrap();
            assert!(token.instant_in(&utc).is_err(), "accepted {text}");
        }
    }
}
