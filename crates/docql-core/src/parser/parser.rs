//! Query parser implementation.

use tracing::trace;

use super::error::ParseError;
use super::pratt::{
    infix_binding_power, negated_op, prefix_operand_power, token_to_binary_op, token_to_unary_op,
};
use crate::ast::{
    Expression, FromClause, Function, Literal, LiteralList, Operand, OperandList, Operator,
    OrderByClause, OrderByExpr, OrderDirection, SelectClause, SqlQuery, WhereClause,
};
use crate::dialect::{Dialect, NxqlDialect};
use crate::lexer::{Keyword, LexError, Lexer, Span, Token, TokenKind};

/// A parsed operand together with the height of its tree.
type Nested = (Operand, usize);

/// Query parser.
///
/// The input is tokenized up front; parsing then walks the token vector
/// with a cursor. A parser is single-use: call one of the `parse_*`
/// methods once.
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    dialect: &'a dyn Dialect,
    /// Current expression nesting depth.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser for the given input using the default dialect.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the input cannot be tokenized.
    pub fn new(input: &'a str) -> Result<Self, LexError> {
        Self::with_dialect(input, &NxqlDialect)
    }

    /// Creates a parser for the given input using `dialect`.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the input cannot be tokenized.
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Result<Self, LexError> {
        let tokens = Lexer::with_dialect(input, dialect).tokenize()?;
        trace!(
            dialect = dialect.name(),
            input_len = input.len(),
            tokens = tokens.len(),
            "tokenized query"
        );
        Ok(Self {
            tokens,
            pos: 0,
            dialect,
            depth: 0,
        })
    }

    /// Parses a complete query.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid query.
    pub fn parse_query(&mut self) -> Result<SqlQuery, ParseError> {
        self.expect_keyword(Keyword::Select)?;
        let select = self.parse_select_clause()?;

        self.expect_keyword(Keyword::From)?;
        let from = self.parse_from_clause()?;

        let mut query = SqlQuery::new(select, from);

        if self.check_keyword(Keyword::Where) {
            self.advance();
            let (predicate, _) = self.parse_expression(0)?;
            query.where_clause = Some(WhereClause::new(predicate));
        }

        if self.check_keyword(Keyword::Order) {
            self.advance();
            self.expect_keyword(Keyword::By)?;
            query.order_by = Some(self.parse_order_by_clause()?);
        }

        if self.check_keyword(Keyword::Limit) {
            self.advance();
            query.limit = Some(self.expect_count("LIMIT")?);
        }

        if self.check_keyword(Keyword::Offset) {
            self.advance();
            query.offset = Some(self.expect_count("OFFSET")?);
        }

        self.expect_eof()?;
        trace!(
            where_nodes = query
                .where_clause
                .as_ref()
                .and_then(|w| w.predicate.as_expression())
                .map_or(0, Expression::node_count),
            "parsed query"
        );
        Ok(query)
    }

    /// Parses a standalone predicate, such as the body of a WHERE clause.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a single valid expression.
    pub fn parse_predicate(&mut self) -> Result<Operand, ParseError> {
        let (operand, _) = self.parse_expression(0)?;
        self.expect_eof()?;
        trace!(
            nodes = operand.as_expression().map_or(0, Expression::node_count),
            "parsed predicate"
        );
        Ok(operand)
    }

    /// Parses the projection after `SELECT`.
    fn parse_select_clause(&mut self) -> Result<SelectClause, ParseError> {
        let mut select = SelectClause::new();

        if self.check_keyword(Keyword::Distinct) {
            self.advance();
            select.distinct = true;
        }

        if self.check(&TokenKind::Star) {
            self.advance();
            return Ok(select);
        }

        select.elements = self.parse_operand_list()?.0;
        Ok(select)
    }

    /// Parses the source names after `FROM`.
    fn parse_from_clause(&mut self) -> Result<FromClause, ParseError> {
        let mut from = FromClause::new();
        loop {
            from.sources.push(self.expect_identifier()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(from)
    }

    /// Parses an ORDER BY list.
    fn parse_order_by_clause(&mut self) -> Result<OrderByClause, ParseError> {
        let mut order_by = OrderByClause::new();
        loop {
            let (operand, _) = self.parse_expression(0)?;
            let direction = if self.check_keyword(Keyword::Desc) {
                self.advance();
                OrderDirection::Desc
            } else if self.check_keyword(Keyword::Asc) {
                self.advance();
                OrderDirection::Asc
            } else {
                OrderDirection::Asc
            };

            order_by.items.push(OrderByExpr::new(operand, direction));

            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok(order_by)
    }

    /// Parses an expression using Pratt parsing, bounded by the dialect's
    /// nesting depth.
    ///
    /// Both the parser's own recursion and the height of the resulting tree
    /// are limited: left-associative chains grow the tree without recursing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Nested, ParseError> {
        if self.depth >= self.dialect.max_nesting_depth() {
            return Err(self.too_deep(self.current().span));
        }
        self.depth += 1;
        let result = self.parse_expression_bp(min_bp);
        self.depth -= 1;
        result
    }

    /// Builds the error for input nested past the dialect's limit.
    fn too_deep(&self, span: Span) -> ParseError {
        ParseError::new(
            format!(
                "Expression nesting exceeds the maximum depth of {}",
                self.dialect.max_nesting_depth()
            ),
            span,
        )
    }

    fn parse_expression_bp(&mut self, min_bp: u8) -> Result<Nested, ParseError> {
        let (mut lhs, mut height) = self.parse_prefix(min_bp)?;
        // The operator that produced `lhs` in this loop, if any.
        let mut last_op: Option<Operator> = None;

        loop {
            let Some((l_bp, r_bp)) = infix_binding_power(&self.current().kind) else {
                break;
            };

            if l_bp < min_bp {
                break;
            }

            let op_span = self.current().span;
            let op = self.parse_infix_operator()?;

            if op.is_comparison() && last_op.is_some_and(|prev| prev.is_comparison()) {
                return Err(ParseError::new(
                    format!("Comparison operators cannot be chained; `{op}` follows a comparison"),
                    op_span,
                ));
            }

            let (operand, rhs_height) = match op {
                Operator::IsNull | Operator::IsNotNull => (Expression::unary(op, lhs).into(), 0),
                Operator::In | Operator::NotIn => {
                    let list = self.parse_literal_list()?;
                    (Expression::new(lhs, op, list).into(), 1)
                }
                Operator::Between | Operator::NotBetween => {
                    let low = self.parse_signed_literal()?;
                    self.expect_keyword(Keyword::And)?;
                    let high = self.parse_signed_literal()?;
                    let bounds = LiteralList::new().with(low).with(high);
                    (Expression::new(lhs, op, bounds).into(), 1)
                }
                _ => {
                    let (rhs, rhs_height) = self.parse_expression(r_bp)?;
                    (Expression::new(lhs, op, rhs).into(), rhs_height)
                }
            };
            lhs = operand;
            height = height.max(rhs_height) + 1;
            if height > self.dialect.max_nesting_depth() {
                return Err(self.too_deep(op_span));
            }
            last_op = Some(op);
        }

        Ok((lhs, height))
    }

    /// Consumes the tokens of an infix or postfix operator.
    fn parse_infix_operator(&mut self) -> Result<Operator, ParseError> {
        let token = self.current().clone();
        self.advance();

        match &token.kind {
            TokenKind::Keyword(Keyword::In) => Ok(Operator::In),
            TokenKind::Keyword(Keyword::Between) => Ok(Operator::Between),
            TokenKind::Keyword(Keyword::Is) => {
                let op = if self.check_keyword(Keyword::Not) {
                    self.advance();
                    Operator::IsNotNull
                } else {
                    Operator::IsNull
                };
                self.expect_keyword(Keyword::Null)?;
                Ok(op)
            }
            TokenKind::Keyword(Keyword::Not) => {
                let op = negated_op(&self.current().kind).ok_or_else(|| {
                    self.unexpected("IN, LIKE, ILIKE or BETWEEN after NOT")
                })?;
                self.advance();
                Ok(op)
            }
            kind => token_to_binary_op(kind)
                .ok_or_else(|| ParseError::unexpected("operator", kind.clone(), token.span)),
        }
    }

    /// Parses a prefix expression.
    fn parse_prefix(&mut self, min_bp: u8) -> Result<Nested, ParseError> {
        let Some(op) = token_to_unary_op(&self.current().kind) else {
            return self.parse_primary();
        };
        let bp = prefix_operand_power(op);

        // NOT binds looser than comparisons and arithmetic, so it cannot
        // start their operands.
        if op == Operator::Not && bp < min_bp {
            return Err(ParseError::unexpected(
                "operand",
                self.current().kind.clone(),
                self.current().span,
            ));
        }

        let op_span = self.current().span;
        self.advance();

        if op == Operator::Neg {
            if let Some(literal) = self.numeric_literal() {
                let span = op_span.merge(self.current().span);
                self.advance();
                return literal
                    .negated()
                    .map(|literal| (Operand::Literal(literal), 1))
                    .ok_or_else(|| ParseError::new("Numeric literal out of range", span));
            }
        }

        let (operand, height) = self.parse_expression(bp)?;
        Ok((Expression::unary(op, operand).into(), height + 1))
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Nested, ParseError> {
        let token = self.current().clone();

        match token.kind {
            // Literals
            TokenKind::Integer(_)
            | TokenKind::Double(_)
            | TokenKind::String(_)
            | TokenKind::Date(_) => Ok((Operand::Literal(self.parse_signed_literal()?), 1)),

            // Parenthesized expression; grouping leaves no node behind
            TokenKind::LeftParen => {
                self.advance();
                let nested = self.parse_expression(0)?;
                self.expect(&TokenKind::RightParen)?;
                Ok(nested)
            }

            // Field reference or function call
            TokenKind::Identifier(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    return self.parse_function_call(name);
                }
                Ok((Operand::reference(name), 1))
            }

            TokenKind::Eof => Err(ParseError::unexpected_eof("expression", token.span)),

            kind => Err(ParseError::unexpected("expression", kind, token.span)),
        }
    }

    /// Parses a function call.
    fn parse_function_call(&mut self, name: String) -> Result<Nested, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        let (args, height) = if self.check(&TokenKind::RightParen) {
            (OperandList::new(), 0)
        } else {
            self.parse_operand_list()?
        };

        self.expect(&TokenKind::RightParen)?;
        Ok((Function::new(name, args).into(), height + 1))
    }

    /// Parses a parenthesized, non-empty literal list.
    fn parse_literal_list(&mut self) -> Result<LiteralList, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut list = LiteralList::new();
        loop {
            list.0.push(self.parse_signed_literal()?);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(list)
    }

    /// Parses a literal; numeric literals may carry a leading `-`.
    fn parse_signed_literal(&mut self) -> Result<Literal, ParseError> {
        if self.check(&TokenKind::Minus) {
            let minus_span = self.current().span;
            self.advance();
            let Some(literal) = self.numeric_literal() else {
                return Err(self.unexpected("number"));
            };
            let span = minus_span.merge(self.current().span);
            self.advance();
            return literal
                .negated()
                .ok_or_else(|| ParseError::new("Numeric literal out of range", span));
        }

        let literal = match &self.current().kind {
            TokenKind::String(s) => Literal::string(s.clone()),
            TokenKind::Date(d) => Literal::date(*d),
            _ => self.numeric_literal().ok_or_else(|| self.unexpected("literal"))?,
        };
        self.advance();
        Ok(literal)
    }

    /// Returns the current token as a numeric literal without consuming it.
    fn numeric_literal(&self) -> Option<Literal> {
        match self.current().kind {
            TokenKind::Integer(n) => Some(Literal::integer(n)),
            TokenKind::Double(d) => Some(Literal::double(d)),
            _ => None,
        }
    }

    /// Parses a comma-separated list of operands, returning the height of
    /// the tallest one.
    fn parse_operand_list(&mut self) -> Result<(OperandList, usize), ParseError> {
        let mut operands = OperandList::new();
        let mut height = 0;
        loop {
            let (operand, operand_height) = self.parse_expression(0)?;
            operands.0.push(operand);
            height = height.max(operand_height);
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        Ok((operands, height))
    }

    // --- Helper methods ---

    /// Returns the current token. The token vector always ends with Eof.
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Advances to the next token, staying on Eof.
    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    /// Builds an error for the current token.
    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        if token.is_eof() {
            ParseError::unexpected_eof(expected, token.span)
        } else {
            ParseError::unexpected(expected, token.kind.clone(), token.span)
        }
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Expects and returns an identifier.
    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Expects a non-negative integer for LIMIT / OFFSET.
    fn expect_count(&mut self, clause: &str) -> Result<u64, ParseError> {
        match self.current().kind {
            TokenKind::Integer(n) => {
                let span = self.current().span;
                let count = u64::try_from(n).map_err(|_| {
                    ParseError::new(format!("{clause} must be a non-negative integer"), span)
                })?;
                self.advance();
                Ok(count)
            }
            _ => Err(self.unexpected("integer")),
        }
    }

    /// Expects the end of input.
    fn expect_eof(&self) -> Result<(), ParseError> {
        if self.current().is_eof() {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }
}
