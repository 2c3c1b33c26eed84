//! Candidate extraction shared by the global scan and cursor lookups.
//!
//! Each [`TokenKind`] has one unanchored pattern. A pattern hit only counts
//! as a candidate when the characters on both sides of it are not ASCII word
//! characters (`[A-Za-z0-9_]`), so a 25-character hex run never yields a
//! 24-character identifier and `1350508407a` is not a timestamp. Patterns
//! are greedy, so `1350508407_000` is one grouped token, not a 10-digit
//! token followed by junk.
//!
//! ISO dates are also fenced by date punctuation: a date shape preceded by
//! `-` or `:`, or followed by `+`, `-`, `.` or `:`, is the prefix of some
//! longer token (`2023-01-01T10:30:00+0800`, `2023-01-01T10:30:00.5Z`) and
//! is dropped rather than decoded without its offset or fraction.
//!
//! Offsets are byte offsets into the scanned text.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::zone::DisplayZone;
use crate::{object_id, timestamp};

/// ISO-8601 subset accepted for date tokens, with named groups.
pub(crate) const ISO_8601_SHAPE: &str = concat!(
    r"(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})",
    r"(?:T(?P<hour>[0-9]{2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})",
    r"(?:\.(?P<millis>[0-9]{3}))?",
    r"(?P<designator>Z|[+-][0-9]{2}:[0-9]{2})?)?",
);

static OBJECT_ID_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9a-fA-F]{24}").expect("invalid regex"));
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:_[0-9]+)*").expect("invalid regex"));
static ISO_8601_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ISO_8601_SHAPE).expect("invalid regex"));

/// Grammar a candidate is extracted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// 24 hex digits.
    ObjectId,
    /// Digit run, optionally grouped with single underscores.
    Digits,
    /// ISO-8601 date or date-time.
    IsoDate,
}

impl TokenKind {
    /// Extra characters that may not touch a candidate, before and after it.
    fn fences(self) -> (&'static [char], &'static [char]) {
        match self {
            TokenKind::IsoDate => (&['-', ':'], &['+', '-', '.', ':']),
            TokenKind::ObjectId | TokenKind::Digits => (&[], &[]),
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            TokenKind::ObjectId => &*OBJECT_ID_RUN,
            TokenKind::Digits => &*DIGIT_RUN,
            TokenKind::IsoDate => &*ISO_8601_RUN,
        }
    }
}

/// A bounded candidate found in a larger text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Grammar that matched.
    pub kind: TokenKind,
    /// Matched text.
    pub value: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_bounded(text: &str, start: usize, end: usize, kind: TokenKind) -> bool {
    let (lead, trail) = kind.fences();
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| is_word(c) || lead.contains(&c))
        && !after.is_some_and(|c| is_word(c) || trail.contains(&c))
}

/// All bounded candidates of `kind` in `text`, left to right, non-overlapping.
pub fn scan(text: &str, kind: TokenKind) -> Vec<Match> {
    kind.pattern()
        .find_iter(text)
        .filter(|m| is_bounded(text, m.start(), m.end(), kind))
        .map(|m| Match {
            kind,
            value: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// The candidate of `kind` covering byte `offset` (`start <= offset < end`).
pub fn candidate_at(text: &str, offset: usize, kind: TokenKind) -> Option<Match> {
    scan(text, kind)
        .into_iter()
        .find(|m| m.start <= offset && offset < m.end)
}

/// Hover text for the token under `offset`.
///
/// Tries an identifier, then a digit-run timestamp, then an ISO date, and
/// returns the first that decodes. Sentinels are never returned.
pub fn hover(text: &str, offset: usize, zone: &DisplayZone) -> Option<String> {
    if let Some(m) = candidate_at(text, offset, TokenKind::ObjectId) {
        if let Some(decoded) = object_id::decode(&m.value) {
            return Some(object_id::render_block(&m.value, &decoded, zone));
        }
    }

    for kind in [TokenKind::Digits, TokenKind::IsoDate] {
        if let Some(m) = candidate_at(text, offset, kind) {
            if let Some(decoded) = timestamp::parse_in(&m.value, zone) {
                return Some(timestamp::render_block(&decoded));
            }
        }
    }

    tracing::debug!(offset, "no decodable token at offset");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_checks_both_sides() {
        let text = "a1350508407 1350508407 1350508407b";
        let digits = scan(text, TokenKind::Digits);
        assert_eq!(digits.len(), 1);
        assert_eq!(digits[0].value, "1350508407");
        assert_eq!(digits[0].start, 12);
        assert_eq!(digits[0].end, 22);
    }

    #[test]
    fn grouped_digits_are_one_token() {
        let text = "ts=1672_531_200_000;";
        let digits = scan(text, TokenKind::Digits);
        assert_eq!(digits.len(), 1);
        assert_eq!(digits[0].value, "1672_531_200_000");
    }

    #[test]
    fn trailing_underscore_rejects_run() {
        assert!(scan("1672_531_200_ x", TokenKind::Digits).is_empty());
        assert!(scan("_1672531200", TokenKind::Digits).is_empty());
    }

    #[test]
    fn iso_dates_inside_quotes() {
        let text = r#"{"at": "2023-01-01T10:30:00+08:00"}"#;
        let dates = scan(text, TokenKind::IsoDate);
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].value, "2023-01-01T10:30:00+08:00");
        assert_eq!(&text[dates[0].start..dates[0].end], dates[0].value);
    }

    #[test]
    fn iso_prefix_of_longer_token_is_dropped() {
        let zone: DisplayZone = "Z".parse().unwrap();
        for text in [
            "at 2023-01-01T10:30:00+0800 x",
            "at 2023-01-01T10:30:00.5Z x",
            "at 2023-01-01T10:30:00:15 x",
            "at 2023-01-01-02 x",
            "at 1-2023-01-01 x",
            "at 10:2023-01-01 x",
        ] {
            assert!(scan(text, TokenKind::IsoDate).is_empty(), "{text:?}");
            assert_eq!(hover(text, 8, &zone), None, "{text:?}");
        }
    }

    #[test]
    fn iso_dates_followed_by_sentence_punctuation() {
        let dates = scan("on 2023-01-01, then 2023-01-02T08:00:00Z.", TokenKind::IsoDate);
        let values: Vec<&str> = dates.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, ["2023-01-01"]);

        let dates = scan("(2023-01-02T08:00:00Z)", TokenKind::IsoDate);
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].value, "2023-01-02T08:00:00Z");
    }

    #[test]
    fn multibyte_neighbours_count_as_boundaries() {
        let text = "é507f1f77bcf86cd799439011é";
        let ids = scan(text, TokenKind::ObjectId);
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].start, 'é'.len_utf8());
    }

    #[test]
    fn candidate_at_end_is_exclusive() {
        let text = "id 507f1f77bcf86cd799439011";
        assert!(candidate_at(text, 3, TokenKind::ObjectId).is_some());
        assert!(candidate_at(text, 26, TokenKind::ObjectId).is_some());
        assert!(candidate_at(text, 27, TokenKind::ObjectId).is_none());
        assert!(candidate_at(text, 2, TokenKind::ObjectId).is_none());
    }
}
