//! Tests for the lexical dialects.

mod common;
use common::*;

use docql_core::ast::{Operand, Reference, SelectClause};
use docql_core::lexer::LexErrorKind;
use docql_core::{Dialect, GenericDialect, NxqlDialect, QueryError};
use pretty_assertions::assert_eq;

#[test]
fn nxql_is_the_default() {
    let query = "SELECT * FROM Document WHERE dc:title = \"x\"";
    assert_eq!(parse(query), parse_with(query, &NxqlDialect));
}

#[test]
fn nxql_field_names() {
    assert_eq!(
        predicate("ecm:primaryType = 'File' AND dc:subjects/* = 'art'"),
        r("ecm:primaryType")
            .eq(Operand::string("File"))
            .and(r("dc:subjects/*").eq(Operand::string("art")))
    );
    assert_eq!(
        predicate("files/*1/file/name LIKE '%.pdf'"),
        r("files/*1/file/name").like(Operand::string("%.pdf"))
    );
}

#[test]
fn nxql_division_needs_spaces_after_a_name() {
    assert_eq!(predicate("a / b"), r("a").div(r("b")));
    assert_eq!(predicate("a/b"), r("a/b"));
    assert_eq!(predicate("6/3"), Operand::integer(6).div(Operand::integer(3)));
}

#[test]
fn generic_quotes_identifiers_with_double_quotes() {
    let query = parse_with(
        "SELECT \"order\" FROM t WHERE \"select\" = 'x'",
        &GenericDialect,
    );
    assert_eq!(query.select, SelectClause::new().with(Reference::new("order")));
    assert_eq!(
        query.where_clause.unwrap().predicate,
        r("select").eq(Operand::string("x"))
    );
}

#[test]
fn generic_rejects_prefixed_names() {
    let err =
        docql_core::parse_with_dialect("SELECT * FROM t WHERE dc:title = 'x'", &GenericDialect)
            .unwrap_err();
    match err {
        QueryError::Lex(e) => assert_eq!(e.kind, LexErrorKind::UnexpectedChar(':')),
        other => panic!("Expected lex error, got {other:?}"),
    }
}

#[test]
fn generic_has_no_backslash_escapes() {
    let query = parse_with(r"SELECT * FROM t WHERE a = 'c:\temp'", &GenericDialect);
    assert_eq!(
        query.where_clause.unwrap().predicate,
        r("a").eq(Operand::string(r"c:\temp"))
    );
}

#[test]
fn grammar_is_shared_between_dialects() {
    let text = "SELECT a, b FROM t WHERE a = 1 OR b IN ('x', 'y') ORDER BY a DESC LIMIT 3";
    assert_eq!(parse_with(text, &GenericDialect), parse_with(text, &NxqlDialect));
}

#[derive(Debug)]
struct ShallowDialect;

impl Dialect for ShallowDialect {
    fn name(&self) -> &'static str {
        "shallow"
    }

    fn max_nesting_depth(&self) -> usize {
        4
    }
}

#[test]
fn custom_dialect_limits_nesting() {
    assert!(docql_core::parse_with_dialect("SELECT * FROM t WHERE ((a))", &ShallowDialect).is_ok());
    let err = docql_core::parse_with_dialect("SELECT * FROM t WHERE ((((a))))", &ShallowDialect)
        .unwrap_err();
    assert!(err.to_string().contains("maximum depth of 4"), "{err}");
}

#[test]
fn default_nesting_limit_rejects_adversarial_input() {
    let deep = format!("SELECT * FROM t WHERE {}a{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = parse_err(&deep);
    assert!(matches!(err, QueryError::Parse(_)));

    let nots = format!("SELECT * FROM t WHERE {}a", "NOT ".repeat(1_000));
    assert!(parse_err(&nots).to_string().contains("maximum depth"));
}

#[test]
fn custom_dialect_limits_chain_height() {
    let query = "SELECT * FROM t WHERE a + b + c + d";
    assert!(docql_core::parse_with_dialect(query, &ShallowDialect).is_ok());
    let err =
        docql_core::parse_with_dialect("SELECT * FROM t WHERE a + b + c + d + e", &ShallowDialect)
            .unwrap_err();
    assert!(err.to_string().contains("maximum depth of 4"), "{err}");
}

#[test]
fn default_nesting_limit_rejects_long_flat_chains() {
    let chain = format!("SELECT * FROM t WHERE a{} = 1", " + a".repeat(50_000));
    let err = parse_err(&chain);
    assert!(matches!(err, QueryError::Parse(_)));
    assert!(err.to_string().contains("maximum depth of 256"), "{err}");

    let ors = format!("SELECT * FROM t WHERE a = 1{}", " OR a = 1".repeat(50_000));
    assert!(matches!(parse_err(&ors), QueryError::Parse(_)));

    let fits = format!("SELECT * FROM t WHERE a{} = 1", " + a".repeat(200));
    let query = parse(&fits);
    assert_eq!(query.to_string(), fits);
}
