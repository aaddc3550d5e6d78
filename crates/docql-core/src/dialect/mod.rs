//! Query dialect support.
//!
//! Dialects differ in lexical details: which quotes delimit strings, which
//! characters may appear in field names, and how escapes work. The grammar
//! itself is shared.

mod generic;
mod nxql;

pub use generic::GenericDialect;
pub use nxql::NxqlDialect;

/// Nesting depth accepted by default before parsing fails.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Trait for dialect-specific lexical behavior.
pub trait Dialect: std::fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns whether `c` opens (and closes) a string literal.
    fn is_string_quote(&self, c: char) -> bool {
        c == '\''
    }

    /// Returns the quote character for delimited identifiers, if any.
    fn identifier_quote(&self) -> Option<char> {
        Some('"')
    }

    /// Returns whether `c` may start a field or type name.
    fn is_identifier_start(&self, c: char) -> bool {
        c.is_alphabetic() || c == '_'
    }

    /// Returns whether `c` may continue a field or type name.
    fn is_identifier_part(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    /// Returns whether `/` continues a field name as a path separator
    /// (`files/*/file/name`).
    fn supports_field_paths(&self) -> bool {
        false
    }

    /// Returns whether backslash escapes are recognised in strings.
    fn supports_backslash_escapes(&self) -> bool {
        false
    }

    /// Maximum expression nesting depth the parser accepts.
    fn max_nesting_depth(&self) -> usize {
        DEFAULT_MAX_NESTING_DEPTH
    }
}
