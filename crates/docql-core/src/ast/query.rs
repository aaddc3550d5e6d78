//! The top-level query node.

use std::fmt;

use super::clause::{FromClause, OrderByClause, SelectClause, WhereClause};

/// A complete query: `SELECT ... FROM ... [WHERE ...] [ORDER BY ...]
/// [LIMIT n] [OFFSET n]`.
///
/// Two queries are equal when all their clauses are equal. This is the
/// contract used to check a parsed query against one built by hand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqlQuery {
    /// The projection.
    pub select: SelectClause,
    /// The sources.
    pub from: FromClause,
    /// The filter.
    pub where_clause: Option<WhereClause>,
    /// The sort specification.
    pub order_by: Option<OrderByClause>,
    /// Maximum number of results.
    pub limit: Option<u64>,
    /// Number of results to skip.
    pub offset: Option<u64>,
}

impl SqlQuery {
    /// Creates a query without filter, ordering or paging.
    #[must_use]
    pub const fn new(select: SelectClause, from: FromClause) -> Self {
        Self {
            select,
            from,
            where_clause: None,
            order_by: None,
            limit: None,
            offset: None,
        }
    }

    /// Returns the query with a WHERE clause.
    #[must_use]
    pub fn with_where(mut self, where_clause: WhereClause) -> Self {
        self.where_clause = Some(where_clause);
        self
    }

    /// Returns the query with an ORDER BY clause.
    #[must_use]
    pub fn with_order_by(mut self, order_by: OrderByClause) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Returns the query with a LIMIT.
    #[must_use]
    pub const fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the query with an OFFSET.
    #[must_use]
    pub const fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl fmt::Display for SqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.select, self.from)?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " {where_clause}")?;
        }
        if let Some(order_by) = &self.order_by {
            write!(f, " {order_by}")?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}
