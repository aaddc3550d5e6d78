//! Generic SQL dialect.

use super::Dialect;

/// ANSI-flavoured lexical rules: single-quoted strings, double-quoted
/// identifiers, plain alphanumeric field names.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}
