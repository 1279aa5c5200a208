//! Statement AST nodes.
//!
//! Mirrors `crate::expr`'s shape: one `*Data` struct per variant, dispatched
//! through `accept`/`StmtVisitor`. Grounded on the teacher's `Stmt` (the
//! `Expression`/`Print` pair, and the richer `ClassData`/`VarData`/
//! `WhileData`/`BlockData`/`IfData`/`ReturnData`/`FunctionData` shapes its
//! `parser.rs` already builds), extended with the `public`/`static` member
//! qualifiers and optional superclass expression spec.md §3.3 adds.
//!
//! `Stmt` derives `Clone` because a `Function` declaration's body is cloned
//! once, at the point the closure is created, into an `Rc<Vec<Stmt>>` shared
//! by every call.

use std::rc::Rc;

use crate::expr::Expr;
use crate::source::Offset;
use crate::token::Token;

#[derive(Debug, Clone)]
pub enum Stmt {
    Block(BlockData),
    Class(ClassData),
    Function(FunctionData),
    Expression(ExpressionData),
    If(IfData),
    Print(PrintData),
    Return(ReturnData),
    Var(VarData),
    While(WhileData),
}

#[derive(Debug, Clone)]
pub struct BlockData {
    pub statements: Vec<Stmt>,
}

/// A method or static method inside a `class` body: `public [static] fun
/// name(params) { body }`.
#[derive(Debug, Clone)]
pub struct MethodData {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Rc<Vec<Stmt>>,
    pub is_static: bool,
}

/// A declared field inside a `class` body: `public var name [= init];`.
#[derive(Debug, Clone)]
pub struct FieldData {
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct ClassData {
    pub offset: Offset,
    pub name: Token,
    pub superclass: Option<Expr>,
    pub fields: Vec<FieldData>,
    pub methods: Vec<MethodData>,
}

#[derive(Debug, Clone)]
pub struct FunctionData {
    pub offset: Offset,
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Rc<Vec<Stmt>>,
}

#[derive(Debug, Clone)]
pub struct ExpressionData {
    pub expr: Expr,
}

#[derive(Debug, Clone)]
pub struct IfData {
    pub condition: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone)]
pub struct PrintData {
    pub expr: Expr,
}

#[derive(Debug, Clone)]
pub struct ReturnData {
    pub keyword: Token,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct VarData {
    pub name: Token,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone)]
pub struct WhileData {
    pub condition: Expr,
    pub body: Box<Stmt>,
}

impl Stmt {
    pub fn accept<T>(&self, visitor: &mut dyn StmtVisitor<T>) -> T {
        match self {
            Stmt::Block(d) => visitor.visit_block(d),
            Stmt::Class(d) => visitor.visit_class(d),
            Stmt::Function(d) => visitor.visit_function(d),
            Stmt::Expression(d) => visitor.visit_expression(d),
            Stmt::If(d) => visitor.visit_if(d),
            Stmt::Print(d) => visitor.visit_print(d),
            Stmt::Return(d) => visitor.visit_return(d),
            Stmt::Var(d) => visitor.visit_var(d),
            Stmt::While(d) => visitor.visit_while(d),
        }
    }
}

pub trait StmtVisitor<T> {
    fn visit_block(&mut self, data: &BlockData) -> T;
    fn visit_class(&mut self, data: &ClassData) -> T;
    fn visit_function(&mut self, data: &FunctionData) -> T;
    fn visit_expression(&mut self, data: &ExpressionData) -> T;
    fn visit_if(&mut self, data: &IfData) -> T;
    fn visit_print(&mut self, data: &PrintData) -> T;
    fn visit_return(&mut self, data: &ReturnData) -> T;
    fn visit_var(&mut self, data: &VarData) -> T;
    fn visit_while(&mut self, data: &WhileData) -> T;
}
