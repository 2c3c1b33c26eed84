use thiserror::Error;

/// Reasons a candidate token is rejected by one of the codecs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Grammar the value was checked against.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a decoded value falls outside the accepted range.
    #[error("{field} ({value}) is out of range")]
    OutOfRange {
        /// Field name that is out of range.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a syntactically valid value names no real instant.
    #[error("'{value}' is not a valid instant")]
    InvalidInstant {
        /// Offending value.
        value: String,
    },
}
