//! Query tokenizer implementation.

use super::error::{LexError, LexErrorKind};
use super::{Keyword, Span, Token, TokenKind};
use crate::ast::DateLiteral;
use crate::dialect::{Dialect, NxqlDialect};

/// A lexer that tokenizes query text.
///
/// The lexer is lazy: tokens are produced on demand through
/// [`Lexer::next_token`] or the [`Iterator`] impl, which yields every token
/// up to and including [`TokenKind::Eof`] and stops after the first error.
/// Cloning a fresh lexer restarts the sequence from the beginning.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The query text.
    input: &'a str,
    /// The lexical rules in effect.
    dialect: &'a dyn Dialect,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Set once Eof or an error has been yielded by the iterator.
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer using the default document query dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &NxqlDialect)
    }

    /// Creates a lexer using the given dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            input,
            dialect,
            pos: 0,
            start: 0,
            finished: false,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // -- line comment
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // /* block comment */
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                let comment_start = self.pos;
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => {
                            return Err(LexError::new(
                                LexErrorKind::UnterminatedComment,
                                Span::new(comment_start, self.pos),
                            ));
                        }
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a span from start to current position.
    const fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    /// Creates an error covering the current token.
    const fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.make_span())
    }

    /// Scans a field name, type name or keyword.
    fn scan_identifier(&mut self) -> Result<Token, LexError> {
        loop {
            while self.peek().is_some_and(|c| self.dialect.is_identifier_part(c)) {
                self.advance();
            }

            if !self.dialect.supports_field_paths() || self.peek() != Some('/') {
                break;
            }
            match self.peek_next() {
                Some('*') => {
                    // list wildcard, optionally correlated: /* or /*1
                    self.advance();
                    self.advance();
                    while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                        self.advance();
                    }
                }
                Some(c) if self.dialect.is_identifier_start(c) => {
                    self.advance();
                }
                _ => break,
            }
        }

        let text = &self.input[self.start..self.pos];

        match Keyword::from_str(text) {
            Some(kw @ (Keyword::Date | Keyword::Timestamp)) => self.scan_date_literal(kw),
            Some(kw) => Ok(self.make_token(TokenKind::Keyword(kw))),
            None => Ok(self.make_token(TokenKind::Identifier(text.to_string()))),
        }
    }

    /// Scans the quoted value after `DATE` / `TIMESTAMP`.
    ///
    /// Without a following quote the keyword is returned on its own and
    /// the parser decides what to make of it.
    fn scan_date_literal(&mut self, marker: Keyword) -> Result<Token, LexError> {
        let keyword_end = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }

        let Some(quote) = self.peek().filter(|&c| self.dialect.is_string_quote(c)) else {
            self.pos = keyword_end;
            return Ok(self.make_token(TokenKind::Keyword(marker)));
        };

        let text = self.scan_quoted(quote, LexErrorKind::UnterminatedDate)?;
        let parsed = if marker == Keyword::Date {
            DateLiteral::parse_date(&text)
        } else {
            DateLiteral::parse_timestamp(&text)
        };
        match parsed {
            Ok(date) => Ok(self.make_token(TokenKind::Date(date))),
            Err(e) => Err(self.error(LexErrorKind::InvalidDate(format!("'{text}': {e}")))),
        }
    }

    /// Scans a quoted run starting at the opening `quote` and returns its
    /// unescaped content. A doubled quote stands for one quote character.
    fn scan_quoted(
        &mut self,
        quote: char,
        unterminated: LexErrorKind,
    ) -> Result<String, LexError> {
        self.advance(); // consume opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        value.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        self.advance(); // consume closing quote
                        return Ok(value);
                    }
                }
                Some('\\') if self.dialect.supports_backslash_escapes() => {
                    let escape_start = self.pos;
                    self.advance();
                    let unescaped = match self.advance() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some(c @ ('\\' | '\'' | '"')) => c,
                        Some(c) => {
                            return Err(LexError::new(
                                LexErrorKind::InvalidEscape(c),
                                Span::new(escape_start, self.pos),
                            ));
                        }
                        None => return Err(self.error(unterminated)),
                    };
                    value.push(unescaped);
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return Err(self.error(unterminated)),
            }
        }
    }

    /// Scans a number (integer or floating-point).
    fn scan_number(&mut self) -> Result<Token, LexError> {
        let mut is_double = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal point
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_double = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent, only when digits follow
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let rest = &self.input[self.pos + 1..];
            let digits = rest.strip_prefix(['+', '-']).unwrap_or(rest);
            if digits.starts_with(|c: char| c.is_ascii_digit()) {
                is_double = true;
                self.pos += 1 + (rest.len() - digits.len());
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = &self.input[self.start..self.pos];

        if is_double {
            match text.parse::<f64>() {
                Ok(d) if d.is_finite() => Ok(self.make_token(TokenKind::Double(d))),
                Ok(_) => Err(self.error(LexErrorKind::InvalidNumber(format!(
                    "{text}: number too large to fit in a double"
                )))),
                Err(e) => Err(self.error(LexErrorKind::InvalidNumber(format!("{text}: {e}")))),
            }
        } else {
            text.parse::<i64>()
                .map(|n| self.make_token(TokenKind::Integer(n)))
                .map_err(|e| self.error(LexErrorKind::InvalidNumber(format!("{text}: {e}"))))
        }
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] on an unterminated literal or comment, an
    /// unrecognized character, or an unreadable number or date.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return Ok(self.make_token(TokenKind::Eof));
        };

        match c {
            '(' => Ok(self.make_token(TokenKind::LeftParen)),
            ')' => Ok(self.make_token(TokenKind::RightParen)),
            ',' => Ok(self.make_token(TokenKind::Comma)),
            '+' => Ok(self.make_token(TokenKind::Plus)),
            '-' => Ok(self.make_token(TokenKind::Minus)),
            '*' => Ok(self.make_token(TokenKind::Star)),
            '/' => Ok(self.make_token(TokenKind::Slash)),
            '=' => Ok(self.make_token(TokenKind::Eq)),
            '<' => {
                let kind = match self.peek() {
                    Some('=') => TokenKind::LtEq,
                    Some('>') => TokenKind::NotEq,
                    _ => return Ok(self.make_token(TokenKind::Lt)),
                };
                self.advance();
                Ok(self.make_token(kind))
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(self.make_token(TokenKind::GtEq))
                } else {
                    Ok(self.make_token(TokenKind::Gt))
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(self.make_token(TokenKind::NotEq))
                } else {
                    Err(self.error(LexErrorKind::UnexpectedChar('!')))
                }
            }

            // String literals
            c if self.dialect.is_string_quote(c) => {
                self.pos = self.start;
                let value = self.scan_quoted(c, LexErrorKind::UnterminatedString)?;
                Ok(self.make_token(TokenKind::String(value)))
            }

            // Quoted identifiers
            c if self.dialect.identifier_quote() == Some(c) => {
                self.pos = self.start;
                let name = self.scan_quoted(c, LexErrorKind::UnterminatedIdentifier)?;
                Ok(self.make_token(TokenKind::Identifier(name)))
            }

            // Numbers
            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            // Identifiers and keywords
            c if self.dialect.is_identifier_start(c) => {
                self.pos = self.start;
                self.scan_identifier()
            }

            c => Err(self.error(LexErrorKind::UnexpectedChar(c))),
        }
    }

    /// Tokenizes the entire input, ending with an Eof token.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = result.as_ref().map_or(true, Token::is_eof);
        Some(result)
    }
}
