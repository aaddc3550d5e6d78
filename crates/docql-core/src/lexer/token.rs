//! Token types for the query lexer.

use std::fmt;

use super::Span;
use crate::ast::DateLiteral;

/// Query keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Clauses
    Select,
    From,
    Where,
    Order,
    By,
    Asc,
    Desc,
    Distinct,
    Limit,
    Offset,

    // Logical operators
    And,
    Or,
    Not,

    // Comparison forms
    In,
    Like,
    Ilike,
    Between,
    Is,
    Null,
    StartsWith,

    // Date literal markers
    Date,
    Timestamp,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "ORDER" => Some(Self::Order),
            "BY" => Some(Self::By),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "DISTINCT" => Some(Self::Distinct),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IN" => Some(Self::In),
            "LIKE" => Some(Self::Like),
            "ILIKE" => Some(Self::Ilike),
            "BETWEEN" => Some(Self::Between),
            "IS" => Some(Self::Is),
            "NULL" => Some(Self::Null),
            "STARTSWITH" => Some(Self::StartsWith),
            "DATE" => Some(Self::Date),
            "TIMESTAMP" => Some(Self::Timestamp),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Distinct => "DISTINCT",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Like => "LIKE",
            Self::Ilike => "ILIKE",
            Self::Between => "BETWEEN",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::StartsWith => "STARTSWITH",
            Self::Date => "DATE",
            Self::Timestamp => "TIMESTAMP",
        }
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal (e.g., 42)
    Integer(i64),
    /// Floating-point literal (e.g., 10.2, 1e3)
    Double(f64),
    /// String literal (e.g., 'File' or "test")
    String(String),
    /// Date literal (e.g., DATE '2024-01-31')
    Date(DateLiteral),

    // Identifiers and keywords
    /// Field or type name (e.g., ecm:primaryType)
    Identifier(String),
    /// Query keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// =
    Eq,
    /// <> or !=
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,

    // Special
    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "integer {n}"),
            Self::Double(d) => write!(f, "number {d:?}"),
            Self::String(s) => write!(f, "string '{s}'"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Identifier(name) => write!(f, "identifier `{name}`"),
            Self::Keyword(kw) => f.write_str(kw.as_str()),
            Self::Plus => f.write_str("`+`"),
            Self::Minus => f.write_str("`-`"),
            Self::Star => f.write_str("`*`"),
            Self::Slash => f.write_str("`/`"),
            Self::Eq => f.write_str("`=`"),
            Self::NotEq => f.write_str("`<>`"),
            Self::Lt => f.write_str("`<`"),
            Self::LtEq => f.write_str("`<=`"),
            Self::Gt => f.write_str("`>`"),
            Self::GtEq => f.write_str("`>=`"),
            Self::LeftParen => f.write_str("`(`"),
            Self::RightParen => f.write_str("`)`"),
            Self::Comma => f.write_str("`,`"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its span in the query text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the query text.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
