//! Expression AST nodes.
//!
//! Every variant carries a unique `id`, assigned by the parser from a
//! monotonic counter reset at the start of each parse, and an `offset` into
//! the source the expression was parsed from. The resolver keys its
//! scope-distance map by `id` rather than by token identity, so that two
//! occurrences of the same name at the same source location (possible after
//! desugaring, e.g. `for`) never collide.

use crate::literal::Literal;
use crate::source::Offset;
use crate::token::Token;

pub type ExprId = u32;

#[derive(Debug, Clone)]
pub enum Expr {
    Assign(AssignData),
    Binary(BinaryData),
    Logical(LogicalData),
    Unary(UnaryData),
    Grouping(GroupingData),
    Literal(LiteralData),
    Variable(VariableData),
    Call(CallData),
    Array(ArrayData),
    Constructor(ConstructorData),
    GetProperty(GetPropertyData),
    SetProperty(SetPropertyData),
    GetIndex(GetIndexData),
    SetIndex(SetIndexData),
    This(ThisData),
    Super(SuperData),
    SuperConstructorCall(SuperConstructorCallData),
}

#[derive(Debug, Clone)]
pub struct AssignData {
    pub id: ExprId,
    pub offset: Offset,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct BinaryData {
    pub id: ExprId,
    pub offset: Offset,
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct LogicalData {
    pub id: ExprId,
    pub offset: Offset,
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct UnaryData {
    pub id: ExprId,
    pub offset: Offset,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct GroupingData {
    pub id: ExprId,
    pub offset: Offset,
    pub inner: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct LiteralData {
    pub id: ExprId,
    pub offset: Offset,
    pub value: Literal,
}

#[derive(Debug, Clone)]
pub struct VariableData {
    pub id: ExprId,
    pub offset: Offset,
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct CallData {
    pub id: ExprId,
    pub offset: Offset,
    pub callee: Box<Expr>,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct ArrayData {
    pub id: ExprId,
    pub offset: Offset,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct ConstructorData {
    pub id: ExprId,
    pub offset: Offset,
    pub class: Box<Expr>,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct GetPropertyData {
    pub id: ExprId,
    pub offset: Offset,
    pub object: Box<Expr>,
    pub name: Token,
}

#[derive(Debug, Clone)]
pub struct SetPropertyData {
    pub id: ExprId,
    pub offset: Offset,
    pub object: Box<Expr>,
    pub name: Token,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct GetIndexData {
    pub id: ExprId,
    pub offset: Offset,
    pub object: Box<Expr>,
    pub bracket: Token,
    pub index: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct SetIndexData {
    pub id: ExprId,
    pub offset: Offset,
    pub object: Box<Expr>,
    pub bracket: Token,
    pub index: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct ThisData {
    pub id: ExprId,
    pub offset: Offset,
    pub keyword: Token,
}

#[derive(Debug, Clone)]
pub struct SuperData {
    pub id: ExprId,
    pub offset: Offset,
    pub keyword: Token,
    pub method: Token,
}

#[derive(Debug, Clone)]
pub struct SuperConstructorCallData {
    pub id: ExprId,
    pub offset: Offset,
    pub keyword: Token,
    pub paren: Token,
    pub arguments: Vec<Expr>,
}

impl Expr {
    /// The unique id assigned to this node at parse time.
    pub fn id(&self) -> ExprId {
        match self {
            Expr::Assign(d) => d.id,
            Expr::Binary(d) => d.id,
            Expr::Logical(d) => d.id,
            Expr::Unary(d) => d.id,
            Expr::Grouping(d) => d.id,
            Expr::Literal(d) => d.id,
            Expr::Variable(d) => d.id,
            Expr::Call(d) => d.id,
            Expr::Array(d) => d.id,
            Expr::Constructor(d) => d.id,
            Expr::GetProperty(d) => d.id,
            Expr::SetProperty(d) => d.id,
            Expr::GetIndex(d) => d.id,
            Expr::SetIndex(d) => d.id,
            Expr::This(d) => d.id,
            Expr::Super(d) => d.id,
            Expr::SuperConstructorCall(d) => d.id,
        }
    }

    pub fn offset(&self) -> Offset {
        match self {
            Expr::Assign(d) => d.offset,
            Expr::Binary(d) => d.offset,
            Expr::Logical(d) => d.offset,
            Expr::Unary(d) => d.offset,
            Expr::Grouping(d) => d.offset,
            Expr::Literal(d) => d.offset,
            Expr::Variable(d) => d.offset,
            Expr::Call(d) => d.offset,
            Expr::Array(d) => d.offset,
            Expr::Constructor(d) => d.offset,
            Expr::GetProperty(d) => d.offset,
            Expr::SetProperty(d) => d.offset,
            Expr::GetIndex(d) => d.offset,
            Expr::SetIndex(d) => d.offset,
            Expr::This(d) => d.offset,
            Expr::Super(d) => d.offset,
            Expr::SuperConstructorCall(d) => d.offset,
        }
    }

    pub fn accept<T>(&self, visitor: &mut dyn ExprVisitor<T>) -> T {
        match self {
            Expr::Assign(d) => visitor.visit_assign(d),
            Expr::Binary(d) => visitor.visit_binary(d),
            Expr::Logical(d) => visitor.visit_logical(d),
            Expr::Unary(d) => visitor.visit_unary(d),
            Expr::Grouping(d) => visitor.visit_grouping(d),
            Expr::Literal(d) => visitor.visit_literal(d),
            Expr::Variable(d) => visitor.visit_variable(d),
            Expr::Call(d) => visitor.visit_call(d),
            Expr::Array(d) => visitor.visit_array(d),
            Expr::Constructor(d) => visitor.visit_constructor(d),
            Expr::GetProperty(d) => visitor.visit_get_property(d),
            Expr::SetProperty(d) => visitor.visit_set_property(d),
            Expr::GetIndex(d) => visitor.visit_get_index(d),
            Expr::SetIndex(d) => visitor.visit_set_index(d),
            Expr::This(d) => visitor.visit_this(d),
            Expr::Super(d) => visitor.visit_super(d),
            Expr::SuperConstructorCall(d) => visitor.visit_super_constructor_call(d),
        }
    }
}

pub trait ExprVisitor<T> {
    fn visit_assign(&mut self, data: &AssignData) -> T;
    fn visit_binary(&mut self, data: &BinaryData) -> T;
    fn visit_logical(&mut self, data: &LogicalData) -> T;
    fn visit_unary(&mut self, data: &UnaryData) -> T;
    fn visit_grouping(&mut self, data: &GroupingData) -> T;
    fn visit_literal(&mut self, data: &LiteralData) -> T;
    fn visit_variable(&mut self, data: &VariableData) -> T;
    fn visit_call(&mut self, data: &CallData) -> T;
    fn visit_array(&mut self, data: &ArrayData) -> T;
    fn visit_constructor(&mut self, data: &ConstructorData) -> T;
    fn visit_get_property(&mut self, data: &GetPropertyData) -> T;
    fn visit_set_property(&mut self, data: &SetPropertyData) -> T;
    fn visit_get_index(&mut self, data: &GetIndexData) -> T;
    fn visit_set_index(&mut self, data: &SetIndexData) -> T;
    fn visit_this(&mut self, data: &ThisData) -> T;
    fn visit_super(&mut self, data: &SuperData) -> T;
    fn visit_super_constructor_call(&mut self, data: &SuperConstructorCallData) -> T;
}
