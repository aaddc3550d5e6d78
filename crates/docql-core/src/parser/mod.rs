//! Query parser.
//!
//! A hand-written recursive descent parser for the clauses with Pratt
//! parsing for expressions.

mod error;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;

pub use error::{ParseError, QueryError};
pub use parser::Parser;
