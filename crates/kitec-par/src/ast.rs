//! Syntax tree node definitions.
//!
//! The tree is a plain sum type per family (expressions, statements,
//! l-values) with one variant per syntactic form. Every node owns its
//! children outright and carries the [`Position`] of its first token; for
//! binary operators that is the left operand's position, for prefix
//! operators the operator's own.

use kitec_util::{Position, RetType, TypeSpec};

/// A parsed program: the top-level statement list.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

/// A literal constant, tagged with its natural scalar type.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(u32),
    Float(f32),
    Bool(bool),
    Str(String),
}

/// Expression forms.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// `{ e1, e2, ... }` - anonymous struct initializer.
    StructInit(StructInitExpr),

    /// `lhs or rhs`
    Disjunction(BinaryExpr),
    /// `lhs and rhs`
    Conjunction(BinaryExpr),

    /// `lhs == rhs`
    Equal(BinaryExpr),
    /// `lhs != rhs`
    NotEqual(BinaryExpr),
    /// `lhs < rhs`
    Less(BinaryExpr),
    /// `lhs <= rhs`
    LessEqual(BinaryExpr),
    /// `lhs > rhs`
    Greater(BinaryExpr),
    /// `lhs >= rhs`
    GreaterEqual(BinaryExpr),

    /// `lhs + rhs`
    Addition(BinaryExpr),
    /// `lhs - rhs`
    Subtraction(BinaryExpr),
    /// `lhs * rhs`
    Multiplication(BinaryExpr),
    /// `lhs / rhs`
    Division(BinaryExpr),

    /// `-expr`
    SignChange(UnaryExpr),
    /// `not expr`
    LogicalNegation(UnaryExpr),

    /// `expr as type`
    Conversion(TypeExpr),
    /// `expr is type`
    TypeCheck(TypeExpr),

    /// `expr.field`
    FieldAccess(FieldAccessExpr),

    Constant(ConstantExpr),
    FuncCall(FuncCall),
    VariableAccess(VariableAccessExpr),
}

impl Expr {
    /// Position of the node's first token.
    pub fn position(&self) -> Position {
        match self {
            Expr::StructInit(e) => e.position,
            Expr::Disjunction(e)
            | Expr::Conjunction(e)
            | Expr::Equal(e)
            | Expr::NotEqual(e)
            | Expr::Less(e)
            | Expr::LessEqual(e)
            | Expr::Greater(e)
            | Expr::GreaterEqual(e)
            | Expr::Addition(e)
            | Expr::Subtraction(e)
            | Expr::Multiplication(e)
            | Expr::Division(e) => e.position,
            Expr::SignChange(e) | Expr::LogicalNegation(e) => e.position,
            Expr::Conversion(e) | Expr::TypeCheck(e) => e.position,
            Expr::FieldAccess(e) => e.position,
            Expr::Constant(e) => e.position,
            Expr::FuncCall(e) => e.position,
            Expr::VariableAccess(e) => e.position,
        }
    }
}

/// Two-operand expression payload.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub position: Position,
}

/// Single-operand (prefix) expression payload.
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpr {
    pub expr: Box<Expr>,
    pub position: Position,
}

/// `as` / `is` payload: an expression and the named target type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeExpr {
    pub expr: Box<Expr>,
    pub spec: TypeSpec,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldAccessExpr {
    pub expr: Box<Expr>,
    pub field: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConstantExpr {
    pub value: Literal,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructInitExpr {
    pub exprs: Vec<Expr>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableAccessExpr {
    pub name: String,
    pub position: Position,
}

/// A function call. The same node serves as an expression and as a
/// statement; as a statement any returned value is discarded.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncCall {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub position: Position,
}

/// One call-site argument, optionally marked `ref`.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub expr: Expr,
    pub is_ref: bool,
    pub position: Position,
}

/// Statement forms.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    If(IfStmt),
    While(WhileStmt),
    Return(ReturnStmt),
    Print(PrintStmt),
    FuncDef(FuncDef),
    Assignment(Assignment),
    VarDef(VarDef),
    FuncCall(FuncCall),
    StructDef(StructDef),
    VariantDef(VariantDef),
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStmt {
    pub expression: Option<Expr>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrintStmt {
    pub expression: Option<Expr>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncDef {
    pub ret_type: RetType,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Stmt>,
    pub position: Position,
}

/// A declared parameter. `ref` parameters alias the caller's value cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub spec: TypeSpec,
    pub name: String,
    pub is_ref: bool,
    pub position: Position,
}

/// An assignment target: an identifier or a dotted field chain.
#[derive(Clone, Debug, PartialEq)]
pub enum LValue {
    Variable(String),
    Field(Box<LValue>, String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub lhs: LValue,
    pub rhs: Expr,
    pub position: Position,
}

/// A variable definition. Every definition has an initializer; there are
/// no uninitialized variables in the language.
#[derive(Clone, Debug, PartialEq)]
pub struct VarDef {
    pub is_const: bool,
    pub spec: TypeSpec,
    pub name: String,
    pub init: Expr,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<Field>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub spec: TypeSpec,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariantDef {
    pub name: String,
    pub alternatives: Vec<TypeSpec>,
    pub position: Position,
}
