//! Operators and their grammar metadata.
//!
//! Precedence, associativity and arity only steer parsing and rendering.
//! They never take part in AST equality.

use std::fmt;

/// Binding strength levels, lowest first.
pub mod precedence {
    /// `OR`.
    pub const OR: u8 = 1;
    /// `AND`.
    pub const AND: u8 = 2;
    /// Prefix `NOT`.
    pub const NOT: u8 = 3;
    /// Comparisons, `IN`, `LIKE`, `BETWEEN`, `IS NULL`, `STARTSWITH`.
    pub const COMPARISON: u8 = 4;
    /// `+` and `-`.
    pub const ADDITIVE: u8 = 5;
    /// `*` and `/`.
    pub const MULTIPLICATIVE: u8 = 6;
    /// Prefix `-`.
    pub const UNARY_MINUS: u8 = 7;
}

/// How operators of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a op b op c` groups as `(a op b) op c`.
    Left,
    /// `a op b op c` is rejected; grouping must be explicit.
    NonAssociative,
    /// Prefix and postfix operators.
    Unary,
}

/// The shape of an operator's operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Prefix operator with one operand (`NOT x`, `-x`).
    Prefix,
    /// Postfix operator with one operand (`x IS NULL`).
    Postfix,
    /// Binary infix operator.
    Binary,
    /// Right operand is a parenthesized literal list (`IN`).
    List,
    /// Right operand is a pair of literal bounds (`BETWEEN`).
    Range,
}

/// Grammar metadata attached to an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    /// Binding strength (see [`precedence`]).
    pub precedence: u8,
    /// Grouping of equal-precedence operators.
    pub associativity: Associativity,
    /// Operand shape.
    pub arity: Arity,
}

impl OperatorInfo {
    const fn new(precedence: u8, associativity: Associativity, arity: Arity) -> Self {
        Self {
            precedence,
            associativity,
            arity,
        }
    }
}

/// Query operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    // Arithmetic
    Sum,
    Sub,
    Mul,
    Div,
    /// Prefix minus.
    Neg,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    ILike,
    NotILike,
    In,
    NotIn,
    Between,
    NotBetween,
    StartsWith,
    IsNull,
    IsNotNull,

    // Logical
    And,
    Or,
    Not,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 25] = [
        Self::Sum,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Neg,
        Self::Eq,
        Self::NotEq,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
        Self::Like,
        Self::NotLike,
        Self::ILike,
        Self::NotILike,
        Self::In,
        Self::NotIn,
        Self::Between,
        Self::NotBetween,
        Self::StartsWith,
        Self::IsNull,
        Self::IsNotNull,
        Self::And,
        Self::Or,
        Self::Not,
    ];

    /// Returns the grammar text of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "+",
            Self::Sub | Self::Neg => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ILike => "ILIKE",
            Self::NotILike => "NOT ILIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT BETWEEN",
            Self::StartsWith => "STARTSWITH",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }

    /// Returns the precedence, associativity and arity of the operator.
    #[must_use]
    pub const fn info(&self) -> OperatorInfo {
        use Arity::{Binary, List, Postfix, Prefix, Range};
        use Associativity::{Left, NonAssociative, Unary};
        use precedence::{ADDITIVE, AND, COMPARISON, MULTIPLICATIVE, NOT, OR, UNARY_MINUS};

        match self {
            Self::Or => OperatorInfo::new(OR, Left, Binary),
            Self::And => OperatorInfo::new(AND, Left, Binary),
            Self::Not => OperatorInfo::new(NOT, Unary, Prefix),
            Self::Eq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::Like
            | Self::NotLike
            | Self::ILike
            | Self::NotILike
            | Self::StartsWith => OperatorInfo::new(COMPARISON, NonAssociative, Binary),
            Self::In | Self::NotIn => OperatorInfo::new(COMPARISON, NonAssociative, List),
            Self::Between | Self::NotBetween => {
                OperatorInfo::new(COMPARISON, NonAssociative, Range)
            }
            Self::IsNull | Self::IsNotNull => OperatorInfo::new(COMPARISON, Unary, Postfix),
            Self::Sum | Self::Sub => OperatorInfo::new(ADDITIVE, Left, Binary),
            Self::Mul | Self::Div => OperatorInfo::new(MULTIPLICATIVE, Left, Binary),
            Self::Neg => OperatorInfo::new(UNARY_MINUS, Unary, Prefix),
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        self.info().precedence
    }

    /// True for operators that yield a boolean: comparisons and logical
    /// connectives.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        self.precedence() <= precedence::COMPARISON
    }

    /// True for `AND`, `OR` and `NOT`.
    #[must_use]
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }

    /// True for operators at comparison level.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        self.precedence() == precedence::COMPARISON
    }

    /// True for operators taking exactly one operand.
    #[must_use]
    pub const fn is_unary(&self) -> bool {
        matches!(self.info().arity, Arity::Prefix | Arity::Postfix)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
