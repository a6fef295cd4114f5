// Postfix expression parsing: member access, method calls, indexing, slicing, calls

use super::{ParseResult, Parser};
use crate::ast::Expr;
use crate::errors::syntax_error;
use crate::lexer::Token;

impl Parser {
    pub(super) fn parse_postfix_expr(&mut self) -> ParseResult {
        let mut expr = self.parse_primary_expr()?;

        loop {
            match self.current() {
                Some(Token::Dot) => {
                    self.advance();
                    let name = self.expect_ident()?;

                    if self.eat(&Token::LParen) {
                        let args = self.parse_comma_list(&Token::RParen, Self::parse_expr)?;
                        expr = Expr::MethodCall {
                            receiver: Box::new(expr),
                            method: name,
                            args,
                        };
                    } else {
                        expr = Expr::Attr {
                            receiver: Box::new(expr),
                            name,
                        };
                    }
                }
                Some(Token::LBracket) => {
                    self.advance();
                    expr = self.parse_subscript(expr)?;
                }
                Some(Token::LParen) => {
                    let Expr::Name(name) = expr else {
                        return Err(syntax_error(
                            "only builtin functions can be called",
                            self.current_span(),
                        ));
                    };
                    self.advance();
                    let args = self.parse_comma_list(&Token::RParen, Self::parse_expr)?;
                    expr = Expr::Call { name, args };
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// After `[`: either `index]` or `[start]:[end]]`.
    fn parse_subscript(&mut self, receiver: Expr) -> ParseResult {
        let start = if self.check(&Token::Colon) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        if !self.eat(&Token::Colon) {
            self.expect(&Token::RBracket)?;
            let Some(index) = start else {
                return Err(self.unexpected("index expression"));
            };
            return Ok(Expr::Index {
                receiver: Box::new(receiver),
                index,
            });
        }

        let end = if self.check(&Token::RBracket) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };
        self.expect(&Token::RBracket)?;

        Ok(Expr::Slice {
            receiver: Box::new(receiver),
            start,
            end,
        })
    }
}
