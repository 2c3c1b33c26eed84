//! Detection and decoding of 24-hex object identifiers and timestamp tokens.
//!
//! Two stateless codecs share one candidate scanner:
//! - [`object_id`] validates and splits identifiers whose first four bytes
//!   hold a big-endian creation time in seconds
//! - [`timestamp`] reads Unix seconds, Unix milliseconds, underscore-grouped
//!   digit runs and ISO-8601 strings, and synthesizes the zero-filled
//!   identifier for the decoded time
//! - [`scanner`] finds bounded candidates in free text and runs the
//!   extract → decode → render pipeline for a cursor offset
//!
//! Every public operation is total: malformed input yields `None` or a fixed
//! sentinel string, never a panic.
//!
#![deny(missing_docs)]

/// 24-hex identifier validation, decoding and rendering.
pub mod object_id;
/// Fixed-layout instant formatting.
pub mod render;
/// Bounded candidate extraction over the three token grammars.
pub mod scanner;
/// Timestamp and date token decoding.
pub mod timestamp;
/// Error types shared by the codecs.
pub mod validation;
/// Display zone and `±HH:MM` offset handling.
pub mod zone;

pub use object_id::{DecodedIdentifier, ObjectId};
pub use scanner::{candidate_at, hover, scan, Match, TokenKind};
pub use timestamp::{DecodedTimestamp, TimestampToken};
pub use validation::ValidationError;
pub use zone::DisplayZone;
