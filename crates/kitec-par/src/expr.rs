//! Expression parsing.
//!
//! One method per precedence level, lowest binding first:
//!
//! | Level          | Operators                 | Associativity |
//! |----------------|---------------------------|---------------|
//! | disjunction    | `or`                      | left          |
//! | conjunction    | `and`                     | left          |
//! | equality       | `==` `!=`                 | none          |
//! | relation       | `<` `<=` `>` `>=`         | none          |
//! | additive       | `+` `-`                   | left          |
//! | multiplicative | `*` `/`                   | left          |
//! | unary          | `-` `not` (one prefix)    | -             |
//! | type cast      | `as` `is`                 | none          |
//! | field access   | `.`                       | left          |
//!
//! Non-associative levels parse at most one operator and leave any second
//! one for an enclosing rule, which has nothing to do with it - so
//! `a == b == c` fails at the second `==`.

use kitec_lex::{TokenKind, TokenSource, TokenValue};
use kitec_util::Result;

use crate::ast::{
    Argument, BinaryExpr, ConstantExpr, Expr, FuncCall, Literal, StructInitExpr, TypeExpr,
    UnaryExpr, VariableAccessExpr,
};
use crate::Parser;

impl<S: TokenSource> Parser<S> {
    pub(crate) fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_disjunction()
    }

    fn parse_disjunction(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_conjunction()?;
        while self.eat(TokenKind::Or)? {
            let rhs = self.parse_conjunction()?;
            lhs = Expr::Disjunction(binary(lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_conjunction(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_equality()?;
        while self.eat(TokenKind::And)? {
            let rhs = self.parse_equality()?;
            lhs = Expr::Conjunction(binary(lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let lhs = self.parse_relation()?;

        let ctor: fn(BinaryExpr) -> Expr = match self.current.kind {
            TokenKind::Equal => Expr::Equal,
            TokenKind::NotEqual => Expr::NotEqual,
            _ => return Ok(lhs),
        };
        self.advance()?;

        let rhs = self.parse_relation()?;
        Ok(ctor(binary(lhs, rhs)))
    }

    fn parse_relation(&mut self) -> Result<Expr> {
        let lhs = self.parse_additive()?;

        let ctor: fn(BinaryExpr) -> Expr = match self.current.kind {
            TokenKind::Less => Expr::Less,
            TokenKind::LessEqual => Expr::LessEqual,
            TokenKind::Greater => Expr::Greater,
            TokenKind::GreaterEqual => Expr::GreaterEqual,
            _ => return Ok(lhs),
        };
        self.advance()?;

        let rhs = self.parse_additive()?;
        Ok(ctor(binary(lhs, rhs)))
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let ctor: fn(BinaryExpr) -> Expr = match self.current.kind {
                TokenKind::Plus => Expr::Addition,
                TokenKind::Minus => Expr::Subtraction,
                _ => return Ok(lhs),
            };
            self.advance()?;
            let rhs = self.parse_multiplicative()?;
            lhs = ctor(binary(lhs, rhs));
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let ctor: fn(BinaryExpr) -> Expr = match self.current.kind {
                TokenKind::Star => Expr::Multiplication,
                TokenKind::Slash => Expr::Division,
                _ => return Ok(lhs),
            };
            self.advance()?;
            let rhs = self.parse_unary()?;
            lhs = ctor(binary(lhs, rhs));
        }
    }

    /// At most one prefix operator; `--x` is a syntax error.
    fn parse_unary(&mut self) -> Result<Expr> {
        let ctor: fn(UnaryExpr) -> Expr = match self.current.kind {
            TokenKind::Minus => Expr::SignChange,
            TokenKind::Not => Expr::LogicalNegation,
            _ => return self.parse_type_cast(),
        };
        let position = self.position();
        self.advance()?;

        let expr = self.parse_type_cast()?;
        Ok(ctor(UnaryExpr {
            expr: Box::new(expr),
            position,
        }))
    }

    fn parse_type_cast(&mut self) -> Result<Expr> {
        let expr = self.parse_field_access()?;

        let (ctor, message): (fn(TypeExpr) -> Expr, _) = match self.current.kind {
            TokenKind::As => (Expr::Conversion, "expected type after 'as'"),
            TokenKind::Is => (Expr::TypeCheck, "expected type after 'is'"),
            _ => return Ok(expr),
        };
        self.advance()?;

        let spec = self.expect_type_spec(message)?;
        let position = expr.position();
        Ok(ctor(TypeExpr {
            expr: Box::new(expr),
            spec,
            position,
        }))
    }

    fn parse_field_access(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        while self.eat(TokenKind::Dot)? {
            let (field, _) = self.take_id("expected field name after '.'")?;
            let position = expr.position();
            expr = Expr::FieldAccess(crate::ast::FieldAccessExpr {
                expr: Box::new(expr),
                field,
                position,
            });
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let position = self.position();

        match self.current.kind {
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "missing ')'")?;
                Ok(expr)
            }

            TokenKind::LBrace => {
                self.advance()?;
                let mut exprs = Vec::new();
                if !self.check(TokenKind::RBrace) {
                    loop {
                        exprs.push(self.parse_expression()?);
                        if !self.eat(TokenKind::Comma)? {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RBrace, "missing '}' in struct initializer")?;
                Ok(Expr::StructInit(StructInitExpr { exprs, position }))
            }

            TokenKind::IntConst
            | TokenKind::FloatConst
            | TokenKind::StrConst
            | TokenKind::TrueConst
            | TokenKind::FalseConst => {
                let value = self.take_literal();
                self.advance()?;
                Ok(Expr::Constant(ConstantExpr { value, position }))
            }

            TokenKind::Id => {
                let (name, _) = self.take_id("expected identifier")?;
                if self.check(TokenKind::LParen) {
                    let arguments = self.parse_call_arguments()?;
                    Ok(Expr::FuncCall(FuncCall {
                        name,
                        arguments,
                        position,
                    }))
                } else {
                    Ok(Expr::VariableAccess(VariableAccessExpr { name, position }))
                }
            }

            _ => Err(self.syntax_error("expected an expression")),
        }
    }

    /// Converts the current literal token into its [`Literal`].
    fn take_literal(&self) -> Literal {
        match (self.current.kind, &self.current.value) {
            (_, TokenValue::Int(n)) => Literal::Int(*n),
            (_, TokenValue::Float(f)) => Literal::Float(*f),
            (_, TokenValue::Str(s)) => Literal::Str(s.clone()),
            (TokenKind::TrueConst, _) => Literal::Bool(true),
            _ => Literal::Bool(false),
        }
    }

    /// Parses a parenthesized argument list: `'(' [ arg { ',' arg } ] ')'`
    /// where `arg = [ 'ref' ] expression`.
    pub(crate) fn parse_call_arguments(&mut self) -> Result<Vec<Argument>> {
        self.expect(TokenKind::LParen, "missing '('")?;

        let mut arguments = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let position = self.position();
                let is_ref = self.eat(TokenKind::Ref)?;
                let expr = self.parse_expression()?;
                arguments.push(Argument {
                    expr,
                    is_ref,
                    position,
                });
                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen, "missing ')'")?;
        Ok(arguments)
    }
}

fn binary(lhs: Expr, rhs: Expr) -> BinaryExpr {
    let position = lhs.position();
    BinaryExpr {
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        position,
    }
}
