//! Token stream → AST.
//!
//! A hand-written recursive-descent/Pratt parser, grounded on the teacher's
//! `Parser` (same `matches!` helper, same `check`/`advance`/`consume`
//! skeleton, same precedence ladder and `synchronize()` recovery set).
//! Generalized per spec.md §4.2: `class Name [: Parent] { ... }` members
//! with `public`/`static` qualifiers, `new Expr(args)` constructors, array
//! literals and indexing, `super.m()` / bare `super(args)`. Every `Expr`
//! node is assigned a fresh [`ExprId`] from a per-parse counter so the
//! resolver can key its scope-distance map by node rather than by token
//! identity.
//!
//! Unlike the teacher's `ParseError`-returning-and-`.throw()`ing style,
//! errors are reported directly to an [`ErrorSink`] held for the lifetime
//! of the parse; recoverable errors (invalid assignment target, argument/
//! parameter count over 255) are reported without aborting the surrounding
//! production, matching spec.md's "accumulate, don't fail-fast" discipline.

use crate::error::ErrorSink;
use crate::expr::*;
use crate::source::Offset;
use crate::stmt::*;
use crate::token::{Token, Type};
use std::rc::Rc;

/// Internal-only: carries just enough to report through the sink and
/// trigger `synchronize()`. Never exposed outside this module.
struct ParseError {
    offset: Offset,
    message: String,
}

type ParseResult<T> = Result<T, ParseError>;

fn error_at(token: &Token, message: impl Into<String>) -> ParseError {
    ParseError { offset: token.offset, message: message.into() }
}

/// Returns whether the next token is any of the given types, consuming it
/// if so.
macro_rules! matches_type {
    ( $self:ident, $( $type:expr ),+ ) => {
        {
            if $( $self.check($type) )||+ {
                $self.advance();
                true
            } else {
                false
            }
        }
    }
}

pub struct Parser<'s> {
    tokens: Vec<Token>,
    current: usize,
    next_id: ExprId,
    sink: &'s mut dyn ErrorSink,
}

impl<'s> Parser<'s> {
    pub fn new(tokens: Vec<Token>, sink: &'s mut dyn ErrorSink) -> Self {
        Parser { tokens, current: 0, next_id: 0, sink }
    }

    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        statements
    }

    fn fresh_id(&mut self) -> ExprId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn span(&self, start: Offset, end: Offset) -> Offset {
        Offset::new(start.start, end.end)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == Type::Eof
    }

    fn check(&self, kind: Type) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn consume(&mut self, kind: Type, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        Err(error_at(self.peek(), message))
    }

    fn report(&mut self, error: &ParseError) {
        self.sink.error(error.offset, error.message.clone());
    }

    // ---- declarations -----------------------------------------------

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if matches_type!(self, Type::Class) {
            self.class_declaration()
        } else if matches_type!(self, Type::Fun) {
            self.function_declaration()
        } else if matches_type!(self, Type::Var) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                self.report(&error);
                self.synchronize();
                None
            }
        }
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let start = self.previous().offset;
        let name = self.consume(Type::Identifier, "Expect class name.")?;

        let superclass = if matches_type!(self, Type::Colon) {
            let parent = self.consume(Type::Identifier, "Expect superclass name.")?;
            Some(Expr::Variable(VariableData { id: self.fresh_id(), offset: parent.offset, name: parent }))
        } else {
            None
        };

        self.consume(Type::LeftBrace, "Expect '{' before class body.")?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            self.consume(Type::Public, "Expect 'public' before class member.")?;
            let is_static = matches_type!(self, Type::Static);

            if matches_type!(self, Type::Var) {
                if is_static {
                    return Err(error_at(self.previous(), "Fields cannot be static."));
                }
                fields.push(self.field_declaration()?);
            } else {
                self.consume(Type::Fun, "Expect 'var' or 'fun' after member qualifiers.")?;
                methods.push(self.method_declaration(is_static)?);
            }
        }

        let end = self.consume(Type::RightBrace, "Expect '}' after class body.")?;

        Ok(Stmt::Class(ClassData {
            offset: self.span(start, end.offset),
            name,
            superclass,
            fields,
            methods,
        }))
    }

    fn field_declaration(&mut self) -> ParseResult<FieldData> {
        let name = self.consume(Type::Identifier, "Expect field name.")?;
        let initializer = if matches_type!(self, Type::Equal) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after field declaration.")?;
        Ok(FieldData { name, initializer })
    }

    fn method_declaration(&mut self, is_static: bool) -> ParseResult<MethodData> {
        let name = self.consume(Type::Identifier, "Expect method name.")?;
        let params = self.parameter_list()?;
        self.consume(Type::LeftBrace, "Expect '{' before method body.")?;
        let body = Rc::new(self.block()?);
        Ok(MethodData { name, params, body, is_static })
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect variable name.")?;
        let initializer = if matches_type!(self, Type::Equal) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var(VarData { name, initializer }))
    }

    fn parameter_list(&mut self) -> ParseResult<Vec<Token>> {
        self.consume(Type::LeftParen, "Expect '(' after name.")?;
        let mut params = Vec::new();
        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= 255 {
                    self.sink.error(self.peek().offset, "Can't have more than 255 parameters.".to_string());
                }
                params.push(self.consume(Type::Identifier, "Expect parameter name.")?);
                if !matches_type!(self, Type::Comma) {
                    break;
                }
            }
        }
        self.consume(Type::RightParen, "Expect ')' after parameters.")?;
        Ok(params)
    }

    fn function_declaration(&mut self) -> ParseResult<Stmt> {
        let start = self.previous().offset;
        let name = self.consume(Type::Identifier, "Expect function name.")?;
        let params = self.parameter_list()?;
        self.consume(Type::LeftBrace, "Expect '{' before function body.")?;
        let body = Rc::new(self.block()?);
        Ok(Stmt::Function(FunctionData { offset: self.span(start, name.offset), name, params, body }))
    }

    // ---- statements ---------------------------------------------------

    fn statement(&mut self) -> ParseResult<Stmt> {
        if matches_type!(self, Type::For) {
            return self.for_statement();
        }
        if matches_type!(self, Type::If) {
            return self.if_statement();
        }
        if matches_type!(self, Type::Print) {
            return self.print_statement();
        }
        if matches_type!(self, Type::Return) {
            return self.return_statement();
        }
        if matches_type!(self, Type::While) {
            return self.while_statement();
        }
        if matches_type!(self, Type::LeftBrace) {
            return Ok(Stmt::Block(BlockData { statements: self.block()? }));
        }
        self.expression_statement()
    }

    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if matches_type!(self, Type::Semicolon) {
            None
        } else if matches_type!(self, Type::Var) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(Type::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(Type::RightParen) { Some(self.expression()?) } else { None };
        self.consume(Type::RightParen, "Expect ')' after loop clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(BlockData { statements: vec![body, Stmt::Expression(ExpressionData { expr: increment })] });
        }

        let condition = condition.unwrap_or_else(|| {
            let id = self.fresh_id();
            Expr::Literal(LiteralData { id, offset: Offset::at(self.previous().offset.end), value: crate::literal::Literal::Bool(true) })
        });
        body = Stmt::While(WhileData { condition, body: Box::new(body) });

        if let Some(initializer) = initializer {
            body = Stmt::Block(BlockData { statements: vec![initializer, body] });
        }

        Ok(body)
    }

    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch =
            if matches_type!(self, Type::Else) { Some(Box::new(self.statement()?)) } else { None };

        Ok(Stmt::If(IfData { condition, then_branch, else_branch }))
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(PrintData { expr }))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();
        let value = if !self.check(Type::Semicolon) { Some(self.expression()?) } else { None };
        self.consume(Type::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnData { keyword, value }))
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While(WhileData { condition, body }))
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(ExpressionData { expr }))
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        self.consume(Type::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    // ---- expressions ----------------------------------------------------

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if matches_type!(self, Type::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment()?;
            let offset = self.span(expr.offset(), value.offset());

            return Ok(match expr {
                Expr::Variable(data) => {
                    Expr::Assign(AssignData { id: self.fresh_id(), offset, name: data.name, value: Box::new(value) })
                }
                Expr::GetProperty(data) => Expr::SetProperty(SetPropertyData {
                    id: self.fresh_id(),
                    offset,
                    object: data.object,
                    name: data.name,
                    value: Box::new(value),
                }),
                Expr::GetIndex(data) => Expr::SetIndex(SetIndexData {
                    id: self.fresh_id(),
                    offset,
                    object: data.object,
                    bracket: data.bracket,
                    index: data.index,
                    value: Box::new(value),
                }),
                other => {
                    self.sink.error(equals.offset, "Invalid assignment target.".to_string());
                    other
                }
            });
        }

        Ok(expr)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;
        while matches_type!(self, Type::Or) {
            let operator = self.previous().clone();
            let right = self.and()?;
            let offset = self.span(expr.offset(), right.offset());
            expr = Expr::Logical(LogicalData { id: self.fresh_id(), offset, left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;
        while matches_type!(self, Type::And) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            let offset = self.span(expr.offset(), right.offset());
            expr = Expr::Logical(LogicalData { id: self.fresh_id(), offset, left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;
        while matches_type!(self, Type::BangEqual, Type::EqualEqual) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            let offset = self.span(expr.offset(), right.offset());
            expr = Expr::Binary(BinaryData { id: self.fresh_id(), offset, left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;
        while matches_type!(self, Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual) {
            let operator = self.previous().clone();
            let right = self.term()?;
            let offset = self.span(expr.offset(), right.offset());
            expr = Expr::Binary(BinaryData { id: self.fresh_id(), offset, left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;
        while matches_type!(self, Type::Minus, Type::Plus) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            let offset = self.span(expr.offset(), right.offset());
            expr = Expr::Binary(BinaryData { id: self.fresh_id(), offset, left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;
        while matches_type!(self, Type::Slash, Type::Star) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            let offset = self.span(expr.offset(), right.offset());
            expr = Expr::Binary(BinaryData { id: self.fresh_id(), offset, left: Box::new(expr), operator, right: Box::new(right) });
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if matches_type!(self, Type::Bang, Type::Minus) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            let offset = self.span(operator.offset, right.offset());
            return Ok(Expr::Unary(UnaryData { id: self.fresh_id(), offset, operator, right: Box::new(right) }));
        }
        self.call()
    }

    fn finish_arguments(&mut self, whole_call_offset: Offset) -> ParseResult<(Vec<Expr>, Token)> {
        let mut arguments = Vec::new();
        if !self.check(Type::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    self.sink.error(whole_call_offset, "Can't have more than 255 arguments.".to_string());
                }
                arguments.push(self.expression()?);
                if !matches_type!(self, Type::Comma) {
                    break;
                }
            }
        }
        let paren = self.consume(Type::RightParen, "Expect ')' after arguments.")?;
        Ok((arguments, paren))
    }

    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let callee_offset = callee.offset();
        let (arguments, paren) = self.finish_arguments(callee_offset)?;
        let offset = self.span(callee_offset, paren.offset);
        Ok(Expr::Call(CallData { id: self.fresh_id(), offset, callee: Box::new(callee), paren, arguments }))
    }

    fn finish_index(&mut self, object: Expr) -> ParseResult<Expr> {
        let object_offset = object.offset();
        let index = self.expression()?;
        let bracket = self.consume(Type::RightBracket, "Expect ']' after index.")?;
        let offset = self.span(object_offset, bracket.offset);
        Ok(Expr::GetIndex(GetIndexData { id: self.fresh_id(), offset, object: Box::new(object), bracket, index: Box::new(index) }))
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if matches_type!(self, Type::LeftParen) {
                expr = self.finish_call(expr)?;
            } else if matches_type!(self, Type::Dot) {
                let name = self.consume(Type::Identifier, "Expect property name after '.'.")?;
                let offset = self.span(expr.offset(), name.offset);
                expr = Expr::GetProperty(GetPropertyData { id: self.fresh_id(), offset, object: Box::new(expr), name });
            } else if matches_type!(self, Type::LeftBracket) {
                expr = self.finish_index(expr)?;
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Parses a dotted path used as the callee of `new` (e.g. `std.Http`);
    /// unlike `call()`, it only follows `.` — not `(` or `[` — so `new`
    /// always terminates on a constructor call.
    fn class_path(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        while matches_type!(self, Type::Dot) {
            let name = self.consume(Type::Identifier, "Expect property name after '.'.")?;
            let offset = self.span(expr.offset(), name.offset);
            expr = Expr::GetProperty(GetPropertyData { id: self.fresh_id(), offset, object: Box::new(expr), name });
        }
        Ok(expr)
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if matches_type!(self, Type::False) {
            let token = self.previous().clone();
            return Ok(Expr::Literal(LiteralData { id: self.fresh_id(), offset: token.offset, value: crate::literal::Literal::Bool(false) }));
        }
        if matches_type!(self, Type::True) {
            let token = self.previous().clone();
            return Ok(Expr::Literal(LiteralData { id: self.fresh_id(), offset: token.offset, value: crate::literal::Literal::Bool(true) }));
        }
        if matches_type!(self, Type::Nil) {
            let token = self.previous().clone();
            return Ok(Expr::Literal(LiteralData { id: self.fresh_id(), offset: token.offset, value: crate::literal::Literal::Nil }));
        }
        if matches_type!(self, Type::NumberInt, Type::NumberFloat, Type::String) {
            let token = self.previous().clone();
            let value = token.literal.clone().expect("scanned literal token to carry a Literal");
            return Ok(Expr::Literal(LiteralData { id: self.fresh_id(), offset: token.offset, value }));
        }

        if matches_type!(self, Type::New) {
            let start = self.previous().offset;
            let class = self.class_path()?;
            self.consume(Type::LeftParen, "Expect '(' after class name.")?;
            let (arguments, paren) = self.finish_arguments(start)?;
            let offset = self.span(start, paren.offset);
            return Ok(Expr::Constructor(ConstructorData { id: self.fresh_id(), offset, class: Box::new(class), paren, arguments }));
        }

        if matches_type!(self, Type::LeftBracket) {
            let start = self.previous().offset;
            let mut values = Vec::new();
            if !self.check(Type::RightBracket) {
                loop {
                    values.push(self.expression()?);
                    if !matches_type!(self, Type::Comma) {
                        break;
                    }
                }
            }
            let end = self.consume(Type::RightBracket, "Expect ']' after array elements.")?;
            return Ok(Expr::Array(ArrayData { id: self.fresh_id(), offset: self.span(start, end.offset), values }));
        }

        if matches_type!(self, Type::Super) {
            let keyword = self.previous().clone();
            if matches_type!(self, Type::LeftParen) {
                let (arguments, paren) = self.finish_arguments(keyword.offset)?;
                let offset = self.span(keyword.offset, paren.offset);
                return Ok(Expr::SuperConstructorCall(SuperConstructorCallData {
                    id: self.fresh_id(),
                    offset,
                    keyword,
                    paren,
                    arguments,
                }));
            }
            self.consume(Type::Dot, "Expect '.' after 'super'.")?;
            let method = self.consume(Type::Identifier, "Expect superclass method name.")?;
            let offset = self.span(keyword.offset, method.offset);
            return Ok(Expr::Super(SuperData { id: self.fresh_id(), offset, keyword, method }));
        }

        if matches_type!(self, Type::This) {
            let keyword = self.previous().clone();
            return Ok(Expr::This(ThisData { id: self.fresh_id(), offset: keyword.offset, keyword }));
        }

        if matches_type!(self, Type::Identifier) {
            let name = self.previous().clone();
            return Ok(Expr::Variable(VariableData { id: self.fresh_id(), offset: name.offset, name }));
        }

        if matches_type!(self, Type::LeftParen) {
            let start = self.previous().offset;
            let inner = self.expression()?;
            let end = self.consume(Type::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(GroupingData { id: self.fresh_id(), offset: self.span(start, end.offset), inner: Box::new(inner) }));
        }

        Err(error_at(self.peek(), "Expect expression."))
    }

    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == Type::Semicolon {
                return;
            }

            match self.peek().kind {
                Type::Class | Type::Fun | Type::Var | Type::For | Type::If | Type::While | Type::Print | Type::Return => {
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}
