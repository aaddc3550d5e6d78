//! Query clauses.

use std::fmt;

use super::expression::{Operand, OperandList};

/// The projection of a query. An empty list means `*`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectClause {
    /// Whether `DISTINCT` was specified.
    pub distinct: bool,
    /// The selected operands, in order.
    pub elements: OperandList,
}

impl SelectClause {
    /// Creates a wildcard (`SELECT *`) clause.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            distinct: false,
            elements: OperandList::new(),
        }
    }

    /// Returns the clause with `operand` appended to the projection.
    #[must_use]
    pub fn with(mut self, operand: impl Into<Operand>) -> Self {
        self.elements.0.push(operand.into());
        self
    }

    /// Returns the clause with `DISTINCT` set.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// True when nothing is projected explicitly (`SELECT *`).
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        if self.is_wildcard() {
            f.write_str("*")
        } else {
            write!(f, "{}", self.elements)
        }
    }
}

/// The document types or tables a query reads from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FromClause {
    /// Source names, in order.
    pub sources: Vec<String>,
}

impl FromClause {
    /// Creates an empty clause.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Returns the clause with `source` appended.
    #[must_use]
    pub fn with(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for FromClause {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            sources: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FROM {}", self.sources.join(", "))
    }
}

/// The filter of a query: one predicate tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WhereClause {
    /// The root of the predicate tree.
    pub predicate: Operand,
}

impl WhereClause {
    /// Creates a WHERE clause.
    #[must_use]
    pub fn new(predicate: impl Into<Operand>) -> Self {
        Self {
            predicate: predicate.into(),
        }
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHERE {}", self.predicate)
    }
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the grammar keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderByExpr {
    /// The sort key.
    pub operand: Operand,
    /// The direction.
    pub direction: OrderDirection,
}

impl OrderByExpr {
    /// Creates an ORDER BY entry.
    #[must_use]
    pub fn new(operand: impl Into<Operand>, direction: OrderDirection) -> Self {
        Self {
            operand: operand.into(),
            direction,
        }
    }
}

/// The sort specification of a query.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderByClause {
    /// Sort keys, most significant first.
    pub items: Vec<OrderByExpr>,
}

impl OrderByClause {
    /// Creates an empty clause.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the clause with an entry appended.
    #[must_use]
    pub fn with(mut self, operand: impl Into<Operand>, direction: OrderDirection) -> Self {
        self.items.push(OrderByExpr::new(operand, direction));
        self
    }

    /// Returns the clause with an ascending entry appended.
    #[must_use]
    pub fn asc(self, operand: impl Into<Operand>) -> Self {
        self.with(operand, OrderDirection::Asc)
    }

    /// Returns the clause with a descending entry appended.
    #[must_use]
    pub fn desc(self, operand: impl Into<Operand>) -> Self {
        self.with(operand, OrderDirection::Desc)
    }
}

impl fmt::Display for OrderByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ORDER BY ")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item.operand)?;
            if item.direction == OrderDirection::Desc {
                f.write_str(" DESC")?;
            }
        }
        Ok(())
    }
}
