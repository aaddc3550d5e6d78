//! Abstract Syntax Tree (AST) types for queries.
//!
//! Every node is an immutable value with structural equality, so a query
//! produced by the parser can be compared against one built by hand.

mod clause;
mod expression;
mod literal;
mod operator;
mod query;

pub use clause::{
    FromClause, OrderByClause, OrderByExpr, OrderDirection, SelectClause, WhereClause,
};
pub use expression::{Expression, Function, LiteralList, Operand, OperandList, Predicate};
pub use literal::{DateLiteral, Literal, Reference};
pub use operator::{precedence, Arity, Associativity, Operator, OperatorInfo};
pub use query::SqlQuery;
