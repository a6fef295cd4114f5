// Operator precedence chain, lowest to highest:
// conditional < or < and < not < comparison < additive < multiplicative < unary < power

use super::{ParseResult, Parser};
use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::lexer::Token;

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn unary(op: UnaryOp, operand: Expr) -> Expr {
    Expr::Unary {
        op,
        operand: Box::new(operand),
    }
}

impl Parser {
    pub(super) fn parse_conditional_expr(&mut self) -> ParseResult {
        let then = self.parse_or_expr()?;

        if !self.eat(&Token::If) {
            return Ok(then);
        }
        let cond = self.parse_or_expr()?;
        self.expect(&Token::Else)?;
        let otherwise = self.parse_expr()?;

        Ok(Expr::Conditional {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn parse_or_expr(&mut self) -> ParseResult {
        let mut left = self.parse_and_expr()?;

        while matches!(self.current(), Some(Token::Or | Token::PipePipe)) {
            self.advance();
            let right = self.parse_and_expr()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_and_expr(&mut self) -> ParseResult {
        let mut left = self.parse_not_expr()?;

        while matches!(self.current(), Some(Token::And | Token::AmpAmp)) {
            self.advance();
            let right = self.parse_not_expr()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_not_expr(&mut self) -> ParseResult {
        if matches!(self.current(), Some(Token::Not | Token::Bang)) {
            self.advance();
            let operand = self.parse_not_expr()?;
            return Ok(unary(UnaryOp::Not, operand));
        }

        self.parse_comparison_expr()
    }

    fn parse_comparison_expr(&mut self) -> ParseResult {
        let mut left = self.parse_additive_expr()?;

        loop {
            let op = match self.current() {
                Some(Token::EqEq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::NotEq,
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::LtEq) => BinaryOp::LtEq,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::GtEq) => BinaryOp::GtEq,
                Some(Token::In) => BinaryOp::In,
                Some(Token::Not) if self.peek_next() == Some(&Token::In) => {
                    self.advance();
                    BinaryOp::NotIn
                }
                _ => break,
            };
            self.advance();
            let right = self.parse_additive_expr()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive_expr(&mut self) -> ParseResult {
        let mut left = self.parse_multiplicative_expr()?;

        loop {
            let op = match self.current() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative_expr()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative_expr(&mut self) -> ParseResult {
        let mut left = self.parse_unary_expr()?;

        loop {
            let op = match self.current() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::SlashSlash) => BinaryOp::FloorDiv,
                Some(Token::Percent) => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary_expr()?;
            left = binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> ParseResult {
        let op = match self.current() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Pos,
            _ => return self.parse_power_expr(),
        };
        self.advance();
        let operand = self.parse_unary_expr()?;
        Ok(unary(op, operand))
    }

    /// `**` binds tighter than unary sign on its left and is right-associative.
    fn parse_power_expr(&mut self) -> ParseResult {
        let base = self.parse_postfix_expr()?;

        if !self.eat(&Token::StarStar) {
            return Ok(base);
        }
        let exponent = self.parse_unary_expr()?;
        Ok(binary(BinaryOp::Pow, base, exponent))
    }
}
