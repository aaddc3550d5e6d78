#![allow(dead_code)]

use docql_core::ast::{Operand, SqlQuery};
use docql_core::{Dialect, QueryError};

pub fn parse(query: &str) -> SqlQuery {
    docql_core::parse(query).unwrap_or_else(|e| panic!("Failed to parse: {query}\nError: {e:?}"))
}

pub fn parse_err(query: &str) -> QueryError {
    docql_core::parse(query).expect_err(&format!("Expected parse error for: {query}"))
}

pub fn parse_with(query: &str, dialect: &dyn Dialect) -> SqlQuery {
    docql_core::parse_with_dialect(query, dialect)
        .unwrap_or_else(|e| panic!("Failed to parse: {query}\nError: {e:?}"))
}

pub fn predicate(text: &str) -> Operand {
    docql_core::parse_predicate(text)
        .unwrap_or_else(|e| panic!("Failed to parse: {text}\nError: {e:?}"))
}

pub fn predicate_err(text: &str) -> QueryError {
    docql_core::parse_predicate(text).expect_err(&format!("Expected parse error for: {text}"))
}

/// Parses `query` and returns its WHERE predicate.
pub fn where_of(query: &str) -> Operand {
    parse(query)
        .where_clause
        .unwrap_or_else(|| panic!("No WHERE clause in: {query}"))
        .predicate
}

pub fn r(name: &str) -> Operand {
    Operand::reference(name)
}

/// Verifies that rendering is faithful: the rendered text parses back to
/// the same tree, and rendering that tree yields the same text again.
pub fn round_trip(query: &str) {
    let ast1 = parse(query);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {query}\n  Rendered: {rendered1}"
    );
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {query}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
