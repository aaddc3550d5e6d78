//! Command-line front end for `docql-core`.
//!
//! The binary is a thin caller of the parser: it hands query strings to
//! [`docql_core`], prints the resulting trees, and logs failures without
//! stopping.

pub mod commands;

use clap::ValueEnum;
use docql_core::{Dialect, GenericDialect, NxqlDialect};

/// Lexical dialect selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DialectChoice {
    /// Document query rules: both quotes delimit strings, `prefix:name` fields.
    #[default]
    Nxql,
    /// ANSI-flavoured rules: `'` strings, `"` quoted identifiers.
    Generic,
}

impl DialectChoice {
    /// Returns the dialect implementation.
    #[must_use]
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Nxql => &NxqlDialect,
            Self::Generic => &GenericDialect,
        }
    }
}

/// How a parsed tree is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered query text.
    #[default]
    Text,
    /// The Rust debug representation of the tree.
    Debug,
    /// The tree as pretty-printed JSON.
    Json,
}
