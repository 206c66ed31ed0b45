//! Error types for label parsing in sitetrack-types.

use thiserror::Error;

/// Errors that can occur when parsing device labels.
///
/// Classification itself never fails; this type only covers turning a
/// persisted label string back into a typed value.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The label is not one the classifier can produce.
    #[error("Unknown label: {0}")]
    UnknownLabel(String),
}

/// Result type alias using sitetrack-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
