//! Recursive descent parser for trellis expressions.
//!
//! Precedence, lowest to highest:
//! conditional < or < and < not < comparison < additive < multiplicative
//! < unary sign < power < postfix < primary.

mod operators;
mod postfix;
mod primary;

use std::ops::Range;

use trellis_stack::ensure_sufficient_stack;

use crate::ast::Expr;
use crate::errors::{syntax_error, ExprError};
use crate::lexer::{tokenize, Spanned, Token};

type ParseResult = Result<Expr, ExprError>;

/// Parse a complete expression.
pub fn parse(source: &str) -> ParseResult {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens, source.len());

    if parser.is_at_end() {
        return Err(syntax_error("empty expression", 0..source.len()));
    }

    let expr = parser.parse_expr()?;
    if !parser.is_at_end() {
        return Err(parser.unexpected("end of expression"));
    }
    Ok(expr)
}

/// Parser state.
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    source_len: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>, source_len: usize) -> Self {
        Parser {
            tokens,
            pos: 0,
            source_len,
        }
    }

    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    #[inline]
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    #[inline]
    fn peek_next(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1).map(|t| &t.token)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    fn check(&self, token: &Token) -> bool {
        self.current() == Some(token)
    }

    #[inline]
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Consume `token` if it is next.
    fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn current_span(&self) -> Range<usize> {
        match self.tokens.get(self.pos) {
            Some(t) => t.span.clone(),
            None => self.source_len..self.source_len,
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), ExprError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.unexpected(&token.describe()))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ExprError> {
        match self.current() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn unexpected(&self, expected: &str) -> ExprError {
        let found = match self.current() {
            Some(token) => token.describe(),
            None => "end of expression".to_owned(),
        };
        syntax_error(format!("expected {expected}, found {found}"), self.current_span())
    }

    // -------------------------------------------------------------------------
    // Entry
    // -------------------------------------------------------------------------

    fn parse_expr(&mut self) -> ParseResult {
        ensure_sufficient_stack(|| self.parse_conditional_expr())
    }

    /// Comma-separated items up to `close`, allowing a trailing comma.
    fn parse_comma_list<T>(
        &mut self,
        close: &Token,
        mut item: impl FnMut(&mut Self) -> Result<T, ExprError>,
    ) -> Result<Vec<T>, ExprError> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(item(self)?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }
}
