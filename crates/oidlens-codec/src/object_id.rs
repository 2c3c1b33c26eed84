//! 24-hex-character object identifiers with an embedded creation time.
//!
//! Layout of the 12 decoded bytes:
//!
//! | bytes  | hex chars | field                         |
//! |--------|-----------|-------------------------------|
//! | 0..4   | 0..8      | big-endian seconds since epoch |
//! | 4..7   | 8..14     | machine component             |
//! | 7..9   | 14..18    | process component             |
//! | 9..12  | 18..24    | counter                       |

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::render::{local_iso, utc_iso};
use crate::scanner::{scan, Match, TokenKind};
use crate::validation::ValidationError;
use crate::zone::DisplayZone;

/// Returned by [`render`] when the candidate is not an identifier.
pub const INVALID_SENTINEL: &str = "Invalid ObjectId";

const BYTE_LEN: usize = 12;

static OBJECT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("invalid regex"));

/// A syntactically valid identifier, kept in the caller's letter case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parses a validated identifier from a string.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !OBJECT_ID_PATTERN.is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "object_id",
                value: s,
            });
        }
        Ok(Self(s))
    }

    /// Raw 12-byte form.
    pub fn to_bytes(&self) -> Result<[u8; BYTE_LEN], ValidationError> {
        let mut bytes = [0u8; BYTE_LEN];
        hex::decode_to_slice(&self.0, &mut bytes).map_err(|_| {
            ValidationError::PatternMismatch {
                field: "object_id",
                value: self.0.clone(),
            }
        })?;
        Ok(bytes)
    }

    /// Splits the identifier into its fields.
    pub fn decode(&self) -> Result<DecodedIdentifier, ValidationError> {
        let bytes = self.to_bytes()?;
        let embedded_timestamp = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let instant = DateTime::from_timestamp(i64::from(embedded_timestamp), 0).ok_or_else(
            || ValidationError::InvalidInstant {
                value: self.0.clone(),
            },
        )?;

        Ok(DecodedIdentifier {
            embedded_timestamp,
            machine: self.0[8..14].to_string(),
            process: self.0[14..18].to_string(),
            counter: self.0[18..24].to_string(),
            instant,
        })
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields of a decoded identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedIdentifier {
    /// Whole seconds since the Unix epoch stored in the first four bytes.
    pub embedded_timestamp: u32,
    /// Machine component, 6 hex chars.
    pub machine: String,
    /// Process component, 4 hex chars.
    pub process: String,
    /// Counter component, 6 hex chars.
    pub counter: String,
    /// Creation instant (second precision).
    pub instant: DateTime<Utc>,
}

/// True iff `candidate` is exactly 24 hex digits.
pub fn is_well_formed(candidate: &str) -> bool {
    OBJECT_ID_PATTERN.is_match(candidate)
}

/// Decodes `candidate`, or `None` if it is not an identifier.
pub fn decode(candidate: &str) -> Option<DecodedIdentifier> {
    match ObjectId::parse(candidate).and_then(|id| id.decode()) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            tracing::debug!(candidate, error = %err, "object id rejected");
            None
        }
    }
}

/// Every bounded 24-hex run in `text`, left to right.
pub fn find_all(text: &str) -> Vec<Match> {
    scan(text, TokenKind::ObjectId)
}

/// Hover block for `candidate` using the host's local offset.
pub fn render(candidate: &str) -> String {
    render_in(candidate, &DisplayZone::Host)
}

/// Hover block for `candidate` with local times shown in `zone`.
pub fn render_in(candidate: &str, zone: &DisplayZone) -> String {
    match decode(candidate) {
        Some(decoded) => render_block(candidate, &decoded, zone),
        None => INVALID_SENTINEL.to_string(),
    }
}

pub(crate) fn render_block(
    value: &str,
    decoded: &DecodedIdentifier,
    zone: &DisplayZone,
) -> String {
    format!(
        "**MongoDB ObjectId**: `{value}`\n\
         \n\
         📅 **Created At**: {local}  \n\
         🌐 **ISO String**: {utc}  \n\
         🔧 **Details**: Timestamp: {ts} | Machine: {machine} | Process: {process} | Counter: {counter}",
        value = value,
        local = local_iso(&decoded.instant, zone),
        utc = utc_iso(&decoded.instant),
        ts = decoded.embedded_timestamp,
        machine = decoded.machine,
        process = decoded.process,
        counter = decoded.counter,
    )
}
