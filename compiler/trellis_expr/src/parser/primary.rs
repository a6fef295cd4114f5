// Primary expression parsing: literals, names, parenthesized expressions, list and map displays

use trellis_value::Value;

use super::{ParseResult, Parser};
use crate::ast::Expr;
use crate::errors::ExprError;
use crate::lexer::Token;

impl Parser {
    pub(super) fn parse_primary_expr(&mut self) -> ParseResult {
        let literal = match self.current() {
            Some(Token::Int(n)) => Value::Int(*n),
            Some(Token::Float(x)) => Value::Float(*x),
            Some(Token::Str(s)) => Value::Str(s.clone()),
            Some(Token::True) => Value::Bool(true),
            Some(Token::False) => Value::Bool(false),
            Some(Token::None) => Value::Null,
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.advance();
                return Ok(Expr::Name(name));
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&Token::RParen)?;
                return Ok(inner);
            }
            Some(Token::LBracket) => {
                self.advance();
                let items = self.parse_comma_list(&Token::RBracket, Self::parse_expr)?;
                return Ok(Expr::List(items));
            }
            Some(Token::LBrace) => {
                self.advance();
                let entries = self.parse_comma_list(&Token::RBrace, Self::parse_map_entry)?;
                return Ok(Expr::Map(entries));
            }
            _ => return Err(self.unexpected("expression")),
        };

        self.advance();
        Ok(Expr::Literal(literal))
    }

    fn parse_map_entry(&mut self) -> Result<(Expr, Expr), ExprError> {
        let key = self.parse_expr()?;
        self.expect(&Token::Colon)?;
        let value = self.parse_expr()?;
        Ok((key, value))
    }
}
