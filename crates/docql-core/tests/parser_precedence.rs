//! Tests for operator precedence and associativity.

mod common;
use common::*;

use docql_core::ast::{Operand, Operator};
use pretty_assertions::assert_eq;

fn int(n: i64) -> Operand {
    Operand::integer(n)
}

#[test]
fn or_and_comparison_arithmetic_layering() {
    assert_eq!(
        predicate("a = 1 OR b >= 2 AND c + d < 3"),
        r("a")
            .eq(int(1))
            .or(r("b").gt_eq(int(2)).and(r("c").add(r("d")).lt(int(3))))
    );
}

#[test]
fn parentheses_override_layering() {
    assert_eq!(
        predicate("(a = 1 OR b >= 2) AND c + d < 3"),
        r("a")
            .eq(int(1))
            .or(r("b").gt_eq(int(2)))
            .and(r("c").add(r("d")).lt(int(3)))
    );
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    assert_eq!(
        predicate("a + b * c - d / e"),
        r("a").add(r("b").mul(r("c"))).sub(r("d").div(r("e")))
    );
}

#[test]
fn arithmetic_is_left_associative() {
    assert_eq!(predicate("a - b + c"), r("a").sub(r("b")).add(r("c")));
    assert_eq!(predicate("a / b * c"), r("a").div(r("b")).mul(r("c")));
    assert_eq!(predicate("a - (b + c)"), r("a").sub(r("b").add(r("c"))));
}

#[test]
fn logical_operators_are_left_associative() {
    assert_eq!(predicate("a OR b OR c"), r("a").or(r("b")).or(r("c")));
    assert_eq!(predicate("a AND b AND c"), r("a").and(r("b")).and(r("c")));
}

#[test]
fn not_sits_between_and_and_comparison() {
    assert_eq!(
        predicate("NOT a = 1 OR b = 2"),
        r("a").eq(int(1)).not().or(r("b").eq(int(2)))
    );
    assert_eq!(
        predicate("a AND NOT b = 1"),
        r("a").and(r("b").eq(int(1)).not())
    );
    assert_eq!(
        predicate("NOT (a OR b)"),
        r("a").or(r("b")).not()
    );
}

#[test]
fn unary_minus_binds_tightest() {
    assert_eq!(predicate("-a * b"), r("a").neg().mul(r("b")));
    assert_eq!(predicate("-(a * b)"), r("a").mul(r("b")).neg());
    assert_eq!(predicate("a * -2"), r("a").mul(int(-2)));
}

#[test]
fn comparison_family_shares_one_level() {
    for (text, op) in [
        ("a = b + 1", Operator::Eq),
        ("a <> b + 1", Operator::NotEq),
        ("a != b + 1", Operator::NotEq),
        ("a < b + 1", Operator::Lt),
        ("a <= b + 1", Operator::LtEq),
        ("a > b + 1", Operator::Gt),
        ("a >= b + 1", Operator::GtEq),
        ("a LIKE b + 1", Operator::Like),
        ("a ILIKE b + 1", Operator::ILike),
        ("a STARTSWITH b + 1", Operator::StartsWith),
    ] {
        assert_eq!(
            predicate(text),
            r("a").binary(op, r("b").add(int(1))),
            "{text}"
        );
    }
}

#[test]
fn comparisons_do_not_chain() {
    for text in [
        "a < b < c",
        "a = b = c",
        "a = 1 IN (1)",
        "a LIKE 'x' = b",
        "a BETWEEN 1 AND 2 = b",
        "a IS NULL IS NULL",
    ] {
        let err = predicate_err(text);
        assert!(
            err.to_string().contains("cannot be chained"),
            "{text}: {err}"
        );
    }
}

#[test]
fn grouped_comparison_may_be_compared() {
    assert_eq!(
        predicate("(a = 1) = (b = 2)"),
        r("a").eq(int(1)).eq(r("b").eq(int(2)))
    );
}

#[test]
fn comparisons_separated_by_logic_are_fine() {
    assert_eq!(
        predicate("a < b AND b < c"),
        r("a").lt(r("b")).and(r("b").lt(r("c")))
    );
}

#[test]
fn operator_table_orders_levels() {
    assert!(Operator::Or.precedence() < Operator::And.precedence());
    assert!(Operator::And.precedence() < Operator::Not.precedence());
    assert!(Operator::Not.precedence() < Operator::In.precedence());
    assert_eq!(Operator::In.precedence(), Operator::Like.precedence());
    assert_eq!(Operator::Between.precedence(), Operator::Eq.precedence());
    assert!(Operator::Eq.precedence() < Operator::Sum.precedence());
    assert!(Operator::Sum.precedence() < Operator::Mul.precedence());
    assert!(Operator::Mul.precedence() < Operator::Neg.precedence());
}
