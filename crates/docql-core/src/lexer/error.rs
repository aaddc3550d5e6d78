//! Tokenizer error types.

use super::Span;

/// What went wrong while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    /// A string literal has no closing quote.
    #[error("Unterminated string literal")]
    UnterminatedString,

    /// A `DATE '...'` or `TIMESTAMP '...'` literal has no closing quote.
    #[error("Unterminated date literal")]
    UnterminatedDate,

    /// A `/* ... */` comment is never closed.
    #[error("Unterminated block comment")]
    UnterminatedComment,

    /// A delimited identifier has no closing quote.
    #[error("Unterminated quoted identifier")]
    UnterminatedIdentifier,

    /// A character that starts no token.
    #[error("Unexpected character: {0:?}")]
    UnexpectedChar(char),

    /// A numeric literal that does not fit its type.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// A date or timestamp literal with an unreadable value.
    #[error("Invalid date literal: {0}")]
    InvalidDate(String),

    /// An unknown backslash escape inside a string.
    #[error("Invalid escape sequence: \\{0}")]
    InvalidEscape(char),
}

/// A tokenizer error with the location of the offending text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at position {span}")]
pub struct LexError {
    /// The error kind.
    pub kind: LexErrorKind,
    /// The offending text.
    pub span: Span,
}

impl LexError {
    /// Creates a new lex error.
    #[must_use]
    pub const fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display() {
        let err = LexError::new(LexErrorKind::UnexpectedChar('#'), Span::new(4, 5));
        assert_eq!(err.to_string(), "Unexpected character: '#' at position 4..5");

        let err = LexError::new(LexErrorKind::InvalidEscape('q'), Span::new(1, 3));
        assert_eq!(err.to_string(), "Invalid escape sequence: \\q at position 1..3");
    }
}
