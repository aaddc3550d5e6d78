//! Parsed WHERE clauses compared against hand-built trees.

mod common;
use common::*;

use docql_core::ast::{
    Expression, FromClause, LiteralList, Literal, Operand, Operator, Predicate, Reference,
    SelectClause, SqlQuery, WhereClause,
};
use pretty_assertions::{assert_eq, assert_ne};

const QUERY: &str = "SELECT p1, p2 FROM t WHERE title = \"test\" OR p2 >= 10.2 AND p1 + p2 < 5";

/// `title = 'test' OR (p2 >= 10.2 AND (p1 + p2) < 5)`, built by hand.
fn expected_where() -> Operand {
    r("title").eq(Operand::string("test")).or(r("p2")
        .gt_eq(Operand::double(10.2))
        .and(r("p1").add(r("p2")).lt(Operand::integer(5))))
}

#[test]
fn where_clause_matches_hand_built_tree() {
    let query = parse(QUERY);
    assert_eq!(query.where_clause, Some(WhereClause::new(expected_where())));
}

#[test]
fn whole_query_matches_hand_built_query() {
    let expected = SqlQuery::new(
        SelectClause::new().with(Reference::new("p1")).with(Reference::new("p2")),
        FromClause::new().with("t"),
    )
    .with_where(WhereClause::new(expected_where()));
    assert_eq!(parse(QUERY), expected);
}

#[test]
fn equality_ignores_rendering() {
    let parsed = where_of(QUERY);
    let hand_built = expected_where();
    assert_eq!(parsed, hand_built);
    assert_ne!(parsed.to_string(), QUERY);
    assert_eq!(parsed.to_string(), "title = 'test' OR p2 >= 10.2 AND p1 + p2 < 5");
}

#[test]
fn parenthesized_grouping_differs() {
    let grouped = where_of(
        "SELECT p1, p2 FROM t WHERE (title = \"test\" OR p2 >= 10.2) AND p1 + p2 < 5",
    );
    assert_ne!(grouped, expected_where());

    let expected = r("title")
        .eq(Operand::string("test"))
        .or(r("p2").gt_eq(Operand::double(10.2)))
        .and(r("p1").add(r("p2")).lt(Operand::integer(5)));
    assert_eq!(grouped, expected);
}

#[test]
fn redundant_parentheses_do_not_change_the_tree() {
    let plain = where_of(QUERY);
    let noisy = where_of(
        "SELECT p1, p2 FROM t WHERE (title = \"test\") OR ((p2 >= 10.2) AND ((p1 + p2) < 5))",
    );
    assert_eq!(plain, noisy);
}

#[test]
fn expression_and_predicate_compare_equal() {
    let expression = Expression::new(Reference::new("p1"), Operator::Eq, Literal::integer(1));
    let predicate: Predicate =
        Expression::new(Reference::new("p1"), Operator::Eq, Literal::integer(1));
    assert_eq!(expression, predicate);
    assert!(predicate.is_predicate());

    let sum = Expression::new(Reference::new("p1"), Operator::Sum, Literal::integer(1));
    assert!(!sum.is_predicate());
    assert_ne!(sum, expression);
}

#[test]
fn in_requires_parenthesized_list() {
    let err = parse_err("SELECT * FROM Document WHERE ecm:primaryType IN 'File'");
    assert!(matches!(err, docql_core::QueryError::Parse(_)), "{err:?}");

    let predicate = where_of("SELECT * FROM Document WHERE ecm:primaryType IN ('File')");
    assert_eq!(
        predicate,
        Expression::new(
            Reference::new("ecm:primaryType"),
            Operator::In,
            LiteralList::new().with(Literal::string("File")),
        )
        .into()
    );
}

#[test]
fn associativity_is_not_normalized() {
    let left = predicate("(a AND b) AND c");
    let right = predicate("a AND (b AND c)");
    assert_ne!(left, right);
    assert_eq!(left, predicate("a AND b AND c"));
}

#[test]
fn parsing_is_idempotent() {
    assert_eq!(parse(QUERY), parse(QUERY));
}
