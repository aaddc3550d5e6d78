//! Pratt expression parser for operator precedence.
//!
//! Binding powers are derived from the operator table: an operator of
//! precedence `p` binds with `(2p - 1, 2p)`, which makes every binary
//! operator left-associative. Comparisons are additionally kept from
//! chaining by the parser loop.

use crate::ast::{precedence, Operator};
use crate::lexer::{Keyword, TokenKind};

/// Returns the `(left_bp, right_bp)` pair of an infix operator.
#[must_use]
pub const fn binding_power(op: Operator) -> (u8, u8) {
    let p = op.precedence();
    (2 * p - 1, 2 * p)
}

/// Returns the binding power an operand of a prefix operator is parsed at.
#[must_use]
pub const fn prefix_operand_power(op: Operator) -> u8 {
    2 * op.precedence() - 1
}

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)`; higher binds tighter. Keywords that
/// open a negated comparison (`NOT IN`, `NOT LIKE`, ...) and postfix
/// `IS` sit at comparison level.
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Not | Keyword::Is | Keyword::In | Keyword::Between) => {
            let p = precedence::COMPARISON;
            Some((2 * p - 1, 2 * p))
        }
        _ => match token_to_binary_op(kind) {
            Some(op) => Some(binding_power(op)),
            None => None,
        },
    }
}

/// Converts a token to a binary operator whose right side is an operand.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Plus => Some(Operator::Sum),
        TokenKind::Minus => Some(Operator::Sub),
        TokenKind::Star => Some(Operator::Mul),
        TokenKind::Slash => Some(Operator::Div),
        TokenKind::Eq => Some(Operator::Eq),
        TokenKind::NotEq => Some(Operator::NotEq),
        TokenKind::Lt => Some(Operator::Lt),
        TokenKind::LtEq => Some(Operator::LtEq),
        TokenKind::Gt => Some(Operator::Gt),
        TokenKind::GtEq => Some(Operator::GtEq),
        TokenKind::Keyword(Keyword::And) => Some(Operator::And),
        TokenKind::Keyword(Keyword::Or) => Some(Operator::Or),
        TokenKind::Keyword(Keyword::Like) => Some(Operator::Like),
        TokenKind::Keyword(Keyword::Ilike) => Some(Operator::ILike),
        TokenKind::Keyword(Keyword::StartsWith) => Some(Operator::StartsWith),
        _ => None,
    }
}

/// Converts a token to a unary prefix operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Minus => Some(Operator::Neg),
        TokenKind::Keyword(Keyword::Not) => Some(Operator::Not),
        _ => None,
    }
}

/// Converts the keyword following an infix `NOT` to its negated operator.
#[must_use]
pub const fn negated_op(kind: &TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Keyword(Keyword::In) => Some(Operator::NotIn),
        TokenKind::Keyword(Keyword::Like) => Some(Operator::NotLike),
        TokenKind::Keyword(Keyword::Ilike) => Some(Operator::NotILike),
        TokenKind::Keyword(Keyword::Between) => Some(Operator::NotBetween),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
        token_to_unary_op(kind).map(prefix_operand_power)
    }

    #[test]
    fn test_precedence_ordering() {
        // Multiplication should bind tighter than addition
        let add_bp = infix_binding_power(&TokenKind::Plus).unwrap();
        let mul_bp = infix_binding_power(&TokenKind::Star).unwrap();
        assert!(mul_bp.0 > add_bp.0);

        // AND should bind tighter than OR
        let and_bp = infix_binding_power(&TokenKind::Keyword(Keyword::And)).unwrap();
        let or_bp = infix_binding_power(&TokenKind::Keyword(Keyword::Or)).unwrap();
        assert!(and_bp.0 > or_bp.0);

        // Comparison should bind tighter than NOT, arithmetic tighter than comparison
        let eq_bp = infix_binding_power(&TokenKind::Eq).unwrap();
        let not_bp = prefix_binding_power(&TokenKind::Keyword(Keyword::Not)).unwrap();
        assert!(eq_bp.0 > not_bp);
        assert!(not_bp > and_bp.1);
        assert!(add_bp.0 > eq_bp.1);

        // Unary minus binds tightest
        let neg_bp = prefix_binding_power(&TokenKind::Minus).unwrap();
        assert!(neg_bp > mul_bp.1);
    }

    #[test]
    fn test_left_associativity() {
        for kind in [TokenKind::Plus, TokenKind::Slash, TokenKind::Keyword(Keyword::Or)] {
            let (left, right) = infix_binding_power(&kind).unwrap();
            assert!(left < right);
        }
    }

    #[test]
    fn test_comparison_keywords_share_level() {
        let eq_bp = infix_binding_power(&TokenKind::Eq);
        for kw in [Keyword::In, Keyword::Like, Keyword::Between, Keyword::Is, Keyword::Not] {
            assert_eq!(infix_binding_power(&TokenKind::Keyword(kw)), eq_bp, "{kw:?}");
        }
    }

    #[test]
    fn test_token_to_binary_op() {
        assert_eq!(token_to_binary_op(&TokenKind::Plus), Some(Operator::Sum));
        assert_eq!(token_to_binary_op(&TokenKind::Minus), Some(Operator::Sub));
        assert_eq!(token_to_binary_op(&TokenKind::NotEq), Some(Operator::NotEq));
        assert_eq!(
            token_to_binary_op(&TokenKind::Keyword(Keyword::Ilike)),
            Some(Operator::ILike)
        );
        assert_eq!(token_to_binary_op(&TokenKind::LeftParen), None);
        assert_eq!(token_to_binary_op(&TokenKind::Keyword(Keyword::In)), None);
    }

    #[test]
    fn test_token_to_unary_op() {
        assert_eq!(token_to_unary_op(&TokenKind::Minus), Some(Operator::Neg));
        assert_eq!(
            token_to_unary_op(&TokenKind::Keyword(Keyword::Not)),
            Some(Operator::Not)
        );
        assert_eq!(token_to_unary_op(&TokenKind::Plus), None);
    }

    #[test]
    fn test_negated_op() {
        assert_eq!(
            negated_op(&TokenKind::Keyword(Keyword::Between)),
            Some(Operator::NotBetween)
        );
        assert_eq!(negated_op(&TokenKind::Keyword(Keyword::StartsWith)), None);
    }
}
