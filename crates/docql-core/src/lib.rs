//! # docql-core
//!
//! A parser for document queries of the form
//! `SELECT ... FROM ... [WHERE ...] [ORDER BY ...]`.
//!
//! This crate provides:
//! - A hand-written lexer with pluggable lexical dialects
//! - A recursive descent parser with Pratt expression parsing
//! - An immutable AST with structural equality and hand-construction helpers
//!
//! ## Parsing
//!
//! ```rust
//! use docql_core::ast::{Operand, WhereClause};
//!
//! let query = docql_core::parse(
//!     "SELECT p1, p2 FROM t WHERE title = \"test\" OR p2 >= 10.2 AND p1 + p2 < 5",
//! )
//! .unwrap();
//!
//! let expected = Operand::reference("title")
//!     .eq(Operand::string("test"))
//!     .or(Operand::reference("p2")
//!         .gt_eq(Operand::double(10.2))
//!         .and(Operand::reference("p1")
//!             .add(Operand::reference("p2"))
//!             .lt(Operand::integer(5))));
//!
//! assert_eq!(query.where_clause, Some(WhereClause::new(expected)));
//! ```
//!
//! ## Grouping is structural
//!
//! Parentheses leave no node in the tree, so two texts compare equal
//! exactly when they group the same way:
//!
//! ```rust
//! let a = docql_core::parse_predicate("(a = 1 OR b = 2) AND c = 3").unwrap();
//! let b = docql_core::parse_predicate("((a = 1) OR (b = 2)) AND (c = 3)").unwrap();
//! let c = docql_core::parse_predicate("a = 1 OR b = 2 AND c = 3").unwrap();
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! ```
//!
//! ## Errors
//!
//! ```rust
//! use docql_core::QueryError;
//!
//! let err = docql_core::parse("SELECT * FROM t WHERE ecm:primaryType IN 'File'").unwrap_err();
//! assert!(matches!(err, QueryError::Parse(_)));
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;

pub use ast::{Expression, Literal, Operand, Operator, Predicate, Reference, SqlQuery};
pub use dialect::{Dialect, GenericDialect, NxqlDialect};
pub use lexer::{LexError, Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser, QueryError};

/// Parses a complete query with the default dialect.
///
/// # Errors
///
/// Returns a [`QueryError`] if the input cannot be tokenized or is not a
/// valid query. No partial result is produced.
pub fn parse(input: &str) -> Result<SqlQuery, QueryError> {
    parse_with_dialect(input, &NxqlDialect)
}

/// Parses a complete query with the given dialect.
///
/// # Errors
///
/// Returns a [`QueryError`] if the input cannot be tokenized or is not a
/// valid query.
pub fn parse_with_dialect(input: &str, dialect: &dyn Dialect) -> Result<SqlQuery, QueryError> {
    Ok(Parser::with_dialect(input, dialect)?.parse_query()?)
}

/// Parses a standalone predicate (the body of a WHERE clause) with the
/// default dialect.
///
/// # Errors
///
/// Returns a [`QueryError`] if the input is not a single valid expression.
pub fn parse_predicate(input: &str) -> Result<Operand, QueryError> {
    Ok(Parser::new(input)?.parse_predicate()?)
}
