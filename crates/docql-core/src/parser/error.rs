//! Parser error types.

use crate::lexer::{LexError, Span, TokenKind};

/// A parse error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message} at position {span}")]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected token: expected {expected}, found {found}"),
            span,
            expected: Some(expected),
            found: Some(found),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("Unexpected end of input: expected {expected}"),
            span,
            expected: Some(expected),
            found: Some(TokenKind::Eof),
        }
    }
}

/// Any failure while turning query text into a tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    /// The text could not be split into tokens.
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    /// The tokens do not form a valid query.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl QueryError {
    /// Returns the location of the offending text.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span,
            Self::Parse(e) => e.span,
        }
    }
}
