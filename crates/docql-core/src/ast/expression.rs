//! Operands, expression trees and predicates.

use std::fmt;

use super::literal::{DateLiteral, Literal, Reference};
use super::operator::{Arity, Associativity, Operator};

/// Anything usable as an argument to an operator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// A literal value.
    Literal(Literal),
    /// A field reference.
    Reference(Reference),
    /// A nested expression or predicate.
    Expression(Box<Expression>),
    /// A function call.
    Function(Function),
    /// A list of operands.
    OperandList(OperandList),
    /// A list of literals (right side of `IN` and `BETWEEN`).
    LiteralList(LiteralList),
}

#[allow(clippy::should_implement_trait)]
impl Operand {
    /// Creates a field reference operand.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(Reference::new(name))
    }

    /// Creates a string literal operand.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::string(value))
    }

    /// Creates an integer literal operand.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a floating-point literal operand.
    #[must_use]
    pub const fn double(value: f64) -> Self {
        Self::Literal(Literal::Double(value))
    }

    /// Returns the nested expression, if this operand is one.
    #[must_use]
    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Self::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    /// Combines `self op right` into a binary expression operand.
    #[must_use]
    pub fn binary(self, op: Operator, right: impl Into<Self>) -> Self {
        Expression::new(self, op, right).into()
    }

    /// Creates an equality predicate.
    #[must_use]
    pub fn eq(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::Eq, right)
    }

    /// Creates an inequality predicate.
    #[must_use]
    pub fn not_eq(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::NotEq, right)
    }

    /// Creates a less-than predicate.
    #[must_use]
    pub fn lt(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::Lt, right)
    }

    /// Creates a less-than-or-equal predicate.
    #[must_use]
    pub fn lt_eq(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::LtEq, right)
    }

    /// Creates a greater-than predicate.
    #[must_use]
    pub fn gt(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::Gt, right)
    }

    /// Creates a greater-than-or-equal predicate.
    #[must_use]
    pub fn gt_eq(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::GtEq, right)
    }

    /// Creates an AND predicate.
    #[must_use]
    pub fn and(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::And, right)
    }

    /// Creates an OR predicate.
    #[must_use]
    pub fn or(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::Or, right)
    }

    /// Creates an addition expression.
    #[must_use]
    pub fn add(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::Sum, right)
    }

    /// Creates a subtraction expression.
    #[must_use]
    pub fn sub(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::Sub, right)
    }

    /// Creates a multiplication expression.
    #[must_use]
    pub fn mul(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::Mul, right)
    }

    /// Creates a division expression.
    #[must_use]
    pub fn div(self, right: impl Into<Self>) -> Self {
        self.binary(Operator::Div, right)
    }

    /// Creates a LIKE predicate.
    #[must_use]
    pub fn like(self, pattern: impl Into<Self>) -> Self {
        self.binary(Operator::Like, pattern)
    }

    /// Creates an IN predicate.
    #[must_use]
    pub fn in_list(self, list: impl Into<LiteralList>) -> Self {
        self.binary(Operator::In, Self::LiteralList(list.into()))
    }

    /// Creates a BETWEEN predicate.
    #[must_use]
    pub fn between(self, low: Literal, high: Literal) -> Self {
        self.binary(Operator::Between, Self::LiteralList(LiteralList::from(vec![low, high])))
    }

    /// Creates an IS NULL predicate.
    #[must_use]
    pub fn is_null(self) -> Self {
        Expression::unary(Operator::IsNull, self).into()
    }

    /// Creates a NOT predicate.
    #[must_use]
    pub fn not(self) -> Self {
        Expression::unary(Operator::Not, self).into()
    }

    /// Creates a negation expression.
    #[must_use]
    pub fn neg(self) -> Self {
        Expression::unary(Operator::Neg, self).into()
    }
}

impl From<Literal> for Operand {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<DateLiteral> for Operand {
    fn from(date: DateLiteral) -> Self {
        Self::Literal(Literal::Date(date))
    }
}

impl From<Reference> for Operand {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

impl From<Expression> for Operand {
    fn from(expr: Expression) -> Self {
        Self::Expression(Box::new(expr))
    }
}

impl From<Function> for Operand {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<OperandList> for Operand {
    fn from(list: OperandList) -> Self {
        Self::OperandList(list)
    }
}

impl From<LiteralList> for Operand {
    fn from(list: LiteralList) -> Self {
        Self::LiteralList(list)
    }
}

/// A binary or unary expression node.
///
/// Unary operators keep their single operand in `lvalue` and leave
/// `rvalue` empty. Equality is structural: same operator and equal
/// operands at every position. Grouping parentheses from the query text
/// are never recorded, so only the resulting tree shape matters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expression {
    /// Left operand (the only operand of unary operators).
    pub lvalue: Operand,
    /// The operator.
    pub operator: Operator,
    /// Right operand, absent for unary operators.
    pub rvalue: Option<Operand>,
}

/// A boolean-valued expression.
///
/// Predicates and value expressions share one node type, so a predicate
/// built as an `Expression` equals the same predicate produced by the
/// parser.
pub type Predicate = Expression;

impl Expression {
    /// Creates a binary expression.
    #[must_use]
    pub fn new(left: impl Into<Operand>, operator: Operator, right: impl Into<Operand>) -> Self {
        Self {
            lvalue: left.into(),
            operator,
            rvalue: Some(right.into()),
        }
    }

    /// Creates a unary expression (`NOT`, prefix `-`, `IS [NOT] NULL`).
    #[must_use]
    pub fn unary(operator: Operator, operand: impl Into<Operand>) -> Self {
        Self {
            lvalue: operand.into(),
            operator,
            rvalue: None,
        }
    }

    /// True when the operator yields a boolean (comparison or logical).
    #[must_use]
    pub const fn is_predicate(&self) -> bool {
        self.operator.is_boolean()
    }

    /// Number of expression nodes in this tree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let count = |operand: &Operand| operand.as_expression().map_or(0, Self::node_count);
        1 + count(&self.lvalue) + self.rvalue.as_ref().map_or(0, count)
    }
}

/// Which side of its parent a child expression sits on.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Whether `child` must be parenthesized to keep its shape under `parent`.
fn needs_parens(parent: Operator, child: Operator, side: Side) -> bool {
    let parent_info = parent.info();
    let child_info = child.info();

    if child_info.precedence != parent_info.precedence {
        return child_info.precedence < parent_info.precedence;
    }
    match (parent_info.associativity, side) {
        (Associativity::Left, Side::Left) => false,
        // Only `NOT NOT x` reads back unchanged; `--x` would lex as a
        // comment and postfix operators do not chain.
        (Associativity::Unary, _) => !(parent == Operator::Not && child == Operator::Not),
        _ => true,
    }
}

/// Writes `operand`, parenthesizing nested expressions that would regroup.
fn write_child(
    f: &mut fmt::Formatter<'_>,
    parent: Operator,
    operand: &Operand,
    side: Side,
) -> fmt::Result {
    match operand {
        Operand::Expression(child) if needs_parens(parent, child.operator, side) => {
            write!(f, "({child})")
        }
        // A hand-built negation of a numeric literal would lex back as a
        // folded negative literal.
        Operand::Literal(lit) if parent == Operator::Neg && lit.is_numeric() => {
            write!(f, "({lit})")
        }
        _ => write!(f, "{operand}"),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.operator;
        match (op.info().arity, &self.rvalue) {
            (Arity::Prefix, _) => {
                f.write_str(op.as_str())?;
                if op == Operator::Not {
                    f.write_str(" ")?;
                }
                write_child(f, op, &self.lvalue, Side::Right)
            }
            (Arity::Postfix, _) => {
                write_child(f, op, &self.lvalue, Side::Left)?;
                write!(f, " {op}")
            }
            (Arity::Range, Some(Operand::LiteralList(bounds))) if bounds.len() == 2 => {
                write_child(f, op, &self.lvalue, Side::Left)?;
                write!(f, " {op} {} AND {}", bounds.0[0], bounds.0[1])
            }
            (_, Some(right)) => {
                write_child(f, op, &self.lvalue, Side::Left)?;
                write!(f, " {op} ")?;
                write_child(f, op, right, Side::Right)
            }
            (_, None) => {
                write_child(f, op, &self.lvalue, Side::Left)?;
                write!(f, " {op}")
            }
        }
    }
}

/// A function call such as `COUNT(dc:title)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    /// The function name, as written.
    pub name: String,
    /// The arguments.
    pub args: OperandList,
}

impl Function {
    /// Creates a function call.
    #[must_use]
    pub fn new(name: impl Into<String>, args: impl Into<OperandList>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args)
    }
}

/// An ordered list of operands. Order matters for equality.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperandList(pub Vec<Operand>);

impl OperandList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the list with `operand` appended.
    #[must_use]
    pub fn with(mut self, operand: impl Into<Operand>) -> Self {
        self.0.push(operand.into());
        self
    }

    /// Number of operands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the list has no operands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the operands in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operand> {
        self.0.iter()
    }
}

impl From<Vec<Operand>> for OperandList {
    fn from(items: Vec<Operand>) -> Self {
        Self(items)
    }
}

impl FromIterator<Operand> for OperandList {
    fn from_iter<I: IntoIterator<Item = Operand>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OperandList {
    type Item = &'a Operand;
    type IntoIter = std::slice::Iter<'a, Operand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for OperandList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_separated(f, &self.0)
    }
}

/// An ordered list of literals. Order matters for equality.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiteralList(pub Vec<Literal>);

impl LiteralList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the list with `literal` appended.
    #[must_use]
    pub fn with(mut self, literal: Literal) -> Self {
        self.0.push(literal);
        self
    }

    /// Number of literals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the list has no literals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the literals in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Literal> {
        self.0.iter()
    }
}

impl From<Vec<Literal>> for LiteralList {
    fn from(items: Vec<Literal>) -> Self {
        Self(items)
    }
}

impl FromIterator<Literal> for LiteralList {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for LiteralList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_separated(f, &self.0)?;
        f.write_str(")")
    }
}

fn write_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Reference(reference) => write!(f, "{reference}"),
            Self::Expression(expr) => write!(f, "{expr}"),
            Self::Function(function) => write!(f, "{function}"),
            Self::OperandList(list) => write!(f, "{list}"),
            Self::LiteralList(list) => write!(f, "{list}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(name: &str) -> Operand {
        Operand::reference(name)
    }

    #[test]
    fn test_expression_and_predicate_are_interchangeable() {
        let expr = Expression::new(Reference::new("p2"), Operator::GtEq, Literal::double(10.2));
        let pred: Predicate =
            Predicate::new(Reference::new("p2"), Operator::GtEq, Literal::double(10.2));
        assert_eq!(expr, pred);
        assert!(pred.is_predicate());
        assert!(!Expression::new(r("a"), Operator::Sum, r("b")).is_predicate());
    }

    #[test]
    fn test_equality_is_shape_sensitive() {
        let right_nested = r("a").and(r("b").and(r("c")));
        let left_nested = r("a").and(r("b")).and(r("c"));
        assert_ne!(right_nested, left_nested);
    }

    #[test]
    fn test_list_equality_is_order_sensitive() {
        let ab = OperandList::new().with(r("a")).with(r("b"));
        let ba = OperandList::new().with(r("b")).with(r("a"));
        assert_ne!(ab, ba);
        assert_eq!(ab.len(), 2);
    }

    #[test]
    fn test_display_inserts_only_needed_parens() {
        let tree = r("title")
            .eq(Operand::string("test"))
            .or(r("p2")
                .gt_eq(Operand::double(10.2))
                .and(r("p1").add(r("p2")).lt(Operand::integer(5))));
        assert_eq!(tree.to_string(), "title = 'test' OR p2 >= 10.2 AND p1 + p2 < 5");

        let grouped = r("title")
            .eq(Operand::string("test"))
            .or(r("p2").gt_eq(Operand::double(10.2)))
            .and(r("p1").add(r("p2")).lt(Operand::integer(5)));
        assert_eq!(
            grouped.to_string(),
            "(title = 'test' OR p2 >= 10.2) AND p1 + p2 < 5"
        );
    }

    #[test]
    fn test_display_right_nested_left_associative() {
        assert_eq!(r("a").sub(r("b").sub(r("c"))).to_string(), "a - (b - c)");
        assert_eq!(r("a").sub(r("b")).sub(r("c")).to_string(), "a - b - c");
        assert_eq!(r("a").mul(r("b").add(r("c"))).to_string(), "a * (b + c)");
    }

    #[test]
    fn test_display_special_forms() {
        let list = LiteralList::from(vec![Literal::string("File"), Literal::string("Note")]);
        assert_eq!(
            r("ecm:primaryType").in_list(list).to_string(),
            "ecm:primaryType IN ('File', 'Note')"
        );
        assert_eq!(
            r("size").between(Literal::integer(1), Literal::integer(9)).to_string(),
            "size BETWEEN 1 AND 9"
        );
        assert_eq!(r("dc:title").is_null().to_string(), "dc:title IS NULL");
        assert_eq!(r("a").eq(Operand::integer(1)).not().to_string(), "NOT a = 1");
        assert_eq!(
            r("a").or(r("b")).not().to_string(),
            "NOT (a OR b)"
        );
        assert_eq!(Operand::integer(5).neg().to_string(), "-(5)");
        assert_eq!(r("a").add(r("b")).neg().to_string(), "-(a + b)");
        assert_eq!(r("a").neg().neg().to_string(), "-(-a)");
        assert_eq!(r("a").not().not().to_string(), "NOT NOT a");
    }

    #[test]
    fn test_function_display() {
        let function = Function::new("COUNT", OperandList::new().with(r("dc:title")));
        assert_eq!(function.to_string(), "COUNT(dc:title)");
        assert_eq!(Function::new("NOW", OperandList::new()).to_string(), "NOW()");
    }

    #[test]
    fn test_node_count() {
        let tree = r("a").add(r("b")).lt(Operand::integer(5)).not();
        let Operand::Expression(expr) = tree else {
            panic!("Expected expression");
        };
        assert_eq!(expr.node_count(), 3);
    }
}
