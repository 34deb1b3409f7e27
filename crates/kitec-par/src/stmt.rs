//! Statement parsing.

use kitec_lex::{TokenKind, TokenSource};
use kitec_util::{Position, Result, RetType, TypeSpec};

use crate::ast::{
    Assignment, Field, FuncCall, FuncDef, IfStmt, LValue, Parameter, PrintStmt, ReturnStmt, Stmt,
    StructDef, VarDef, VariantDef, WhileStmt,
};
use crate::Parser;

impl<S: TokenSource> Parser<S> {
    /// Parses one statement, or returns `Ok(None)` if the current token
    /// cannot begin one (the caller decides whether that is the end of a
    /// block, the end of the program, or an error).
    pub(crate) fn parse_statement(&mut self) -> Result<Option<Stmt>> {
        let stmt = match self.current.kind {
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::Print => self.parse_print()?,
            TokenKind::Const => self.parse_const_var_def()?,
            TokenKind::Void => self.parse_void_func_def()?,
            TokenKind::Struct => self.parse_struct_def()?,
            TokenKind::Variant => self.parse_variant_def()?,
            TokenKind::Int | TokenKind::Float | TokenKind::Bool | TokenKind::Str => {
                self.parse_built_in_typed_def()?
            }
            TokenKind::Id => self.parse_def_or_assignment_or_call()?,
            _ => return Ok(None),
        };
        Ok(Some(stmt))
    }

    /// `if_stmt = 'if' expression '{' { statement } '}'`
    fn parse_if(&mut self) -> Result<Stmt> {
        let position = self.position();
        self.advance()?;

        let condition = self.parse_expression()?;
        let body = self.parse_block()?;

        Ok(Stmt::If(IfStmt {
            condition,
            body,
            position,
        }))
    }

    /// `while_stmt = 'while' expression '{' { statement } '}'`
    fn parse_while(&mut self) -> Result<Stmt> {
        let position = self.position();
        self.advance()?;

        let condition = self.parse_expression()?;
        let body = self.parse_block()?;

        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            position,
        }))
    }

    /// `return_stmt = 'return' [ expression ] ';'`
    fn parse_return(&mut self) -> Result<Stmt> {
        let position = self.position();
        self.advance()?;

        let expression = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "missing ';'")?;

        Ok(Stmt::Return(ReturnStmt {
            expression,
            position,
        }))
    }

    /// `print_stmt = 'print' [ expression ] ';'`
    fn parse_print(&mut self) -> Result<Stmt> {
        let position = self.position();
        self.advance()?;

        let expression = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon, "missing ';'")?;

        Ok(Stmt::Print(PrintStmt {
            expression,
            position,
        }))
    }

    /// `const_var_def = 'const' type ID '=' expression ';'`
    fn parse_const_var_def(&mut self) -> Result<Stmt> {
        let position = self.position();
        self.advance()?;

        let spec = self.expect_type_spec("expected type after 'const'")?;
        let (name, _) = self.take_id("expected variable name")?;
        let def = self.parse_var_def_tail(true, spec, name, position)?;
        Ok(Stmt::VarDef(def))
    }

    /// `'void' ID func_def_tail` - functions with no return value.
    fn parse_void_func_def(&mut self) -> Result<Stmt> {
        let position = self.position();
        self.advance()?;

        let (name, _) = self.take_id("expected function name")?;
        let def = self.parse_func_def_tail(RetType::Void, name, position)?;
        Ok(Stmt::FuncDef(def))
    }

    /// A statement opening with a built-in type: a variable or function
    /// definition.
    fn parse_built_in_typed_def(&mut self) -> Result<Stmt> {
        let position = self.position();
        let spec = self.expect_type_spec("expected type")?;
        self.parse_typed_def(spec, position)
    }

    /// After `type ID`, a `(` starts a function definition and `=` starts
    /// a variable definition.
    fn parse_typed_def(&mut self, spec: TypeSpec, position: Position) -> Result<Stmt> {
        let (name, _) = self.take_id("expected identifier after type")?;

        if self.check(TokenKind::LParen) {
            let def = self.parse_func_def_tail(RetType::Value(spec), name, position)?;
            return Ok(Stmt::FuncDef(def));
        }

        if self.check(TokenKind::Assign) {
            let def = self.parse_var_def_tail(false, spec, name, position)?;
            return Ok(Stmt::VarDef(def));
        }

        Err(self.syntax_error("expected function or variable definition"))
    }

    /// `'=' expression ';'` - the tail shared by every variable definition.
    fn parse_var_def_tail(
        &mut self,
        is_const: bool,
        spec: TypeSpec,
        name: String,
        position: Position,
    ) -> Result<VarDef> {
        self.expect(TokenKind::Assign, "missing '=' in variable definition")?;
        let init = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "missing ';'")?;

        Ok(VarDef {
            is_const,
            spec,
            name,
            init,
            position,
        })
    }

    /// `'(' params ')' '{' { statement } '}'` - the tail shared by every
    /// function definition.
    fn parse_func_def_tail(
        &mut self,
        ret_type: RetType,
        name: String,
        position: Position,
    ) -> Result<FuncDef> {
        self.expect(TokenKind::LParen, "missing '('")?;
        let parameters = self.parse_parameters()?;
        self.expect(TokenKind::RParen, "missing ')'")?;

        let body = self.parse_block()?;

        Ok(FuncDef {
            ret_type,
            name,
            parameters,
            body,
            position,
        })
    }

    /// `params = [ parameter { ',' parameter } ]`
    fn parse_parameters(&mut self) -> Result<Vec<Parameter>> {
        let mut parameters = Vec::new();

        let Some(first) = self.parse_parameter()? else {
            return Ok(parameters);
        };
        parameters.push(first);

        while self.eat(TokenKind::Comma)? {
            match self.parse_parameter()? {
                Some(parameter) => parameters.push(parameter),
                None => return Err(self.syntax_error("expected parameter after ','")),
            }
        }

        Ok(parameters)
    }

    /// `parameter = [ 'ref' ] type ID`
    fn parse_parameter(&mut self) -> Result<Option<Parameter>> {
        let position = self.position();
        let is_ref = self.eat(TokenKind::Ref)?;

        let spec = match self.parse_type_spec()? {
            Some(spec) => spec,
            None if is_ref => return Err(self.syntax_error("expected type after 'ref'")),
            None => return Ok(None),
        };

        let (name, _) = self.take_id("expected parameter name")?;
        Ok(Some(Parameter {
            spec,
            name,
            is_ref,
            position,
        }))
    }

    /// `struct_def = 'struct' ID '{' [ field { ',' field } ] '}'` with
    /// `field = type ID`. An empty field list is allowed.
    fn parse_struct_def(&mut self) -> Result<Stmt> {
        let position = self.position();
        self.advance()?;

        let (name, _) = self.take_id("expected struct name")?;
        self.expect(TokenKind::LBrace, "missing '{'")?;

        let mut fields = Vec::new();
        if !self.check(TokenKind::RBrace) {
            loop {
                let spec = self.expect_type_spec("expected field type")?;
                let (field_name, _) = self.take_id("expected field name")?;
                fields.push(Field {
                    spec,
                    name: field_name,
                });
                if !self.eat(TokenKind::Comma)? {
                    break;
                }
            }
        }

        self.expect(TokenKind::RBrace, "missing '}'")?;
        Ok(Stmt::StructDef(StructDef {
            name,
            fields,
            position,
        }))
    }

    /// `variant_def = 'variant' ID '{' type { ',' type } '}'` - at least
    /// one alternative.
    fn parse_variant_def(&mut self) -> Result<Stmt> {
        let position = self.position();
        self.advance()?;

        let (name, _) = self.take_id("expected variant name")?;
        self.expect(TokenKind::LBrace, "missing '{'")?;

        let mut alternatives = Vec::new();
        loop {
            alternatives.push(self.expect_type_spec("expected type alternative")?);
            if !self.eat(TokenKind::Comma)? {
                break;
            }
        }

        self.expect(TokenKind::RBrace, "missing '}'")?;
        Ok(Stmt::VariantDef(VariantDef {
            name,
            alternatives,
            position,
        }))
    }

    /// A statement opening with an identifier. The lookahead token picks
    /// the branch: `=`/`.` assignment, `ID` user-typed definition, `(`
    /// call statement.
    fn parse_def_or_assignment_or_call(&mut self) -> Result<Stmt> {
        let position = self.position();
        let (name, _) = self.take_id("expected identifier")?;

        match self.current.kind {
            TokenKind::Assign | TokenKind::Dot => {
                let mut lhs = LValue::Variable(name);
                while self.eat(TokenKind::Dot)? {
                    let (field, _) = self.take_id("expected field name after '.'")?;
                    lhs = LValue::Field(Box::new(lhs), field);
                }

                self.expect(TokenKind::Assign, "missing '=' in assignment")?;
                let rhs = self.parse_expression()?;
                self.expect(TokenKind::Semicolon, "missing ';'")?;

                Ok(Stmt::Assignment(Assignment { lhs, rhs, position }))
            }

            TokenKind::Id => self.parse_typed_def(TypeSpec::Named(name), position),

            TokenKind::LParen => {
                let arguments = self.parse_call_arguments()?;
                self.expect(TokenKind::Semicolon, "missing ';'")?;
                Ok(Stmt::FuncCall(FuncCall {
                    name,
                    arguments,
                    position,
                }))
            }

            _ => Err(self.syntax_error("expected assignment, definition or call")),
        }
    }
}
