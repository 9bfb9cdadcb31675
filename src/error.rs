//! Error types shared by the input model, codec, and analyzer.

use std::fmt;
use thiserror::Error;

/// Section of a serialized typing log in which a parse failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSection {
    /// `TLv1,<lang>,<len>,`
    Header,
    /// The text characters with their inline timing deltas
    CharTimings,
    /// Everything after the `|` separator
    EditLog,
}

impl fmt::Display for LogSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogSection::Header => "header",
            LogSection::CharTimings => "char timings",
            LogSection::EditLog => "edit log",
        };
        f.write_str(name)
    }
}

/// Main error type for typing-log operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypingError {
    /// Operation not allowed in the current lifecycle state, or the
    /// object could not be constructed from the given parts.
    #[error("invalid state: {0}")]
    State(String),

    /// A required input argument was missing.
    #[error("invalid input: {0}")]
    Input(String),

    /// A serialized typing log was malformed or truncated.
    #[error("malformed typing log at position {position} ({section}): {message}")]
    Format {
        position: usize,
        section: LogSection,
        message: String,
    },

    /// A numeric argument or position was out of its valid range.
    #[error("out of range: {0}")]
    Range(String),
}

impl TypingError {
    pub fn state(message: impl Into<String>) -> Self {
        TypingError::State(message.into())
    }

    pub fn format(position: usize, section: LogSection, message: impl Into<String>) -> Self {
        TypingError::Format {
            position,
            section,
            message: message.into(),
        }
    }

    /// Returns `true` for errors raised while parsing a wire string.
    pub fn is_format(&self) -> bool {
        matches!(self, TypingError::Format { .. })
    }
}

/// Result type alias using [`TypingError`].
pub type Result<T> = std::result::Result<T, TypingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_names_section_and_position() {
        let err = TypingError::format(12, LogSection::EditLog, "expected ','");
        assert_eq!(
            err.to_string(),
            "malformed typing log at position 12 (edit log): expected ','"
        );
        assert!(err.is_format());
    }

    #[test]
    fn state_error_display() {
        let err = TypingError::state("timing already started");
        assert_eq!(err.to_string(), "invalid state: timing already started");
        assert!(!err.is_format());
    }
}
