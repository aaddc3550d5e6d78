//! Document query dialect.

use super::Dialect;

/// Lexical rules of the document query language.
///
/// Both `'` and `"` delimit strings, backslash escapes are recognised, and
/// field names carry schema prefixes (`ecm:primaryType`) and list paths
/// (`dc:subjects/*`, `files/*1/file/name`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NxqlDialect;

impl NxqlDialect {
    /// Creates a new document query dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for NxqlDialect {
    fn name(&self) -> &'static str {
        "nxql"
    }

    fn is_string_quote(&self, c: char) -> bool {
        c == '\'' || c == '"'
    }

    fn identifier_quote(&self) -> Option<char> {
        None
    }

    fn is_identifier_part(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == ':'
    }

    fn supports_field_paths(&self) -> bool {
        true
    }

    fn supports_backslash_escapes(&self) -> bool {
        true
    }
}
