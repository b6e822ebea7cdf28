//! Parse errors for bind-string expressions.
//!
//! Every variant carries the string being parsed so reports always show
//! the full offending input, not just the failing fragment.

use thiserror::Error;

/// Why a bind-string fragment failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty expression in `{src}`")]
    Empty { src: String },

    #[error("invalid character {found:?} at offset {offset} in `{src}`")]
    InvalidChar {
        found: char,
        offset: usize,
        src: String,
    },

    #[error("unterminated string literal in `{src}`")]
    UnterminatedString { src: String },

    #[error("malformed number `{fragment}` in `{src}`")]
    InvalidNumber { fragment: String, src: String },

    #[error("expected {expected}, found `{found}` in `{src}`")]
    Unexpected {
        expected: &'static str,
        found: String,
        src: String,
    },

    #[error("trailing input `{fragment}` after expression in `{src}`")]
    Trailing { fragment: String, src: String },
}

impl ParseError {
    /// The full string that was being parsed when the error occurred.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::Empty { src }
            | Self::InvalidChar { src, .. }
            | Self::UnterminatedString { src }
            | Self::InvalidNumber { src, .. }
            | Self::Unexpected { src, .. }
            | Self::Trailing { src, .. } => src,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_character_and_input() {
        let err = ParseError::InvalidChar {
            found: '+',
            offset: 9,
            src: "\"hello \" + name".into(),
        };
        let text = err.to_string();
        assert!(text.contains('+'));
        assert!(text.contains("\"hello \" + name"));
    }

    #[test]
    fn input_accessor_returns_source() {
        let err = ParseError::Empty { src: "".into() };
        assert_eq!(err.input(), "");
    }
}
