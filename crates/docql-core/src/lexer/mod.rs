//! Query lexer.
//!
//! A hand-written lexer that turns query text into a stream of tokens. The
//! lexical rules (quotes, field name characters, escapes) come from a
//! [`Dialect`](crate::dialect::Dialect).

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::{LexError, LexErrorKind};
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
