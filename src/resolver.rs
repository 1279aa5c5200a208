//! Static scope-resolution pass: Program → `expr_id → distance` map.
//!
//! Grounded on the teacher's `Resolver` (scope-stack of `HashMap<String,
//! bool>`, `current_function`/`current_class` state machine, `declare`/
//! `define`/`resolve_local`/`resolve_function`), generalized per spec.md
//! §4.3: the output map is keyed by `Expr::id()` instead of being pushed
//! directly into an `&mut Interpreter` (this crate's `Interpreter` doesn't
//! exist yet at resolve time — it's handed the finished map instead);
//! scopes carry each name's declaration offset (for the "already declared"
//! note) and a `defined` flag; class resolution additionally tracks
//! `inside_static_method` and rejects duplicate names across the class's
//! flat `{declared fields, instance methods}` namespace.

use std::collections::HashMap;
use std::mem;

use crate::error::ErrorSink;
use crate::expr::*;
use crate::source::Offset;
use crate::stmt::*;
use crate::token::Token;

#[derive(Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
    None,
    Function,
    Method,
    Initializer,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ClassKind {
    None,
    Class,
    Derived,
}

struct ScopeEntry {
    offset: Offset,
    defined: bool,
}

pub struct Resolver {
    scopes: Vec<HashMap<String, ScopeEntry>>,
    locals: HashMap<ExprId, usize>,
    current_function: FunctionKind,
    current_class: ClassKind,
    inside_static_method: bool,
    had_error: bool,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionKind::None,
            current_class: ClassKind::None,
            inside_static_method: false,
            had_error: false,
        }
    }

    pub fn resolve(mut self, program: &[Stmt], sink: &mut dyn ErrorSink) -> Option<HashMap<ExprId, usize>> {
        self.resolve_stmts(program, sink);
        if self.had_error {
            None
        } else {
            Some(self.locals)
        }
    }

    fn resolve_stmts(&mut self, statements: &[Stmt], sink: &mut dyn ErrorSink) {
        for statement in statements {
            self.resolve_stmt(statement, sink);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt, sink: &mut dyn ErrorSink) {
        stmt.accept(&mut Ctx { resolver: self, sink });
    }

    fn resolve_expr(&mut self, expr: &Expr, sink: &mut dyn ErrorSink) {
        expr.accept(&mut Ctx { resolver: self, sink });
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token, sink: &mut dyn ErrorSink) {
        let Some(scope) = self.scopes.last_mut() else { return };
        if let Some(prior) = scope.get(&name.lexeme) {
            sink.error(name.offset, format!("Already a variable named '{}' in this scope.", name.lexeme));
            sink.note(prior.offset, "Previous declaration here.".to_string());
            self.had_error = true;
        }
        scope.insert(name.lexeme.clone(), ScopeEntry { offset: name.offset, defined: false });
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), ScopeEntry { offset: name.offset, defined: true });
        }
    }

    fn resolve_local_name(&mut self, id: ExprId, name: &str) {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                self.locals.insert(id, distance);
                return;
            }
        }
    }

    fn resolve_function_body(
        &mut self,
        params: &[Token],
        body: &[Stmt],
        kind: FunctionKind,
        sink: &mut dyn ErrorSink,
    ) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in params {
            self.declare(param, sink);
            self.define(param);
        }
        self.resolve_stmts(body, sink);
        self.end_scope();

        self.current_function = enclosing_function;
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Resolver::new()
    }
}

/// Borrows the resolver and the sink together for the duration of one
/// `accept` dispatch; `Expr`/`Stmt` visitors only take `&mut self`, so this
/// is the narrow seam that lets resolution still report through the sink.
struct Ctx<'r, 's> {
    resolver: &'r mut Resolver,
    sink: &'s mut dyn ErrorSink,
}

impl ExprVisitor<()> for Ctx<'_, '_> {
    fn visit_assign(&mut self, data: &AssignData) {
        self.resolver.resolve_expr(&data.value, self.sink);
        self.resolver.resolve_local_name(data.id, &data.name.lexeme);
    }

    fn visit_binary(&mut self, data: &BinaryData) {
        self.resolver.resolve_expr(&data.left, self.sink);
        self.resolver.resolve_expr(&data.right, self.sink);
    }

    fn visit_logical(&mut self, data: &LogicalData) {
        self.resolver.resolve_expr(&data.left, self.sink);
        self.resolver.resolve_expr(&data.right, self.sink);
    }

    fn visit_unary(&mut self, data: &UnaryData) {
        self.resolver.resolve_expr(&data.right, self.sink);
    }

    fn visit_grouping(&mut self, data: &GroupingData) {
        self.resolver.resolve_expr(&data.inner, self.sink);
    }

    fn visit_literal(&mut self, _data: &LiteralData) {}

    fn visit_variable(&mut self, data: &VariableData) {
        if let Some(scope) = self.resolver.scopes.last() {
            if let Some(entry) = scope.get(&data.name.lexeme) {
                if !entry.defined {
                    self.sink.error(data.offset, "Can't read local variable in its own initializer.".to_string());
                    self.resolver.had_error = true;
                }
            }
        }
        self.resolver.resolve_local_name(data.id, &data.name.lexeme);
    }

    fn visit_call(&mut self, data: &CallData) {
        self.resolver.resolve_expr(&data.callee, self.sink);
        for argument in &data.arguments {
            self.resolver.resolve_expr(argument, self.sink);
        }
    }

    fn visit_array(&mut self, data: &ArrayData) {
        for value in &data.values {
            self.resolver.resolve_expr(value, self.sink);
        }
    }

    fn visit_constructor(&mut self, data: &ConstructorData) {
        self.resolver.resolve_expr(&data.class, self.sink);
        for argument in &data.arguments {
            self.resolver.resolve_expr(argument, self.sink);
        }
    }

    fn visit_get_property(&mut self, data: &GetPropertyData) {
        self.resolver.resolve_expr(&data.object, self.sink);
    }

    fn visit_set_property(&mut self, data: &SetPropertyData) {
        self.resolver.resolve_expr(&data.value, self.sink);
        self.resolver.resolve_expr(&data.object, self.sink);
    }

    fn visit_get_index(&mut self, data: &GetIndexData) {
        self.resolver.resolve_expr(&data.object, self.sink);
        self.resolver.resolve_expr(&data.index, self.sink);
    }

    fn visit_set_index(&mut self, data: &SetIndexData) {
        self.resolver.resolve_expr(&data.object, self.sink);
        self.resolver.resolve_expr(&data.index, self.sink);
        self.resolver.resolve_expr(&data.value, self.sink);
    }

    fn visit_this(&mut self, data: &ThisData) {
        if self.resolver.inside_static_method || self.resolver.current_class == ClassKind::None {
            self.sink.error(data.offset, "Can't use 'this' outside of a class.".to_string());
            self.resolver.had_error = true;
            return;
        }
        self.resolver.resolve_local_name(data.id, &data.keyword.lexeme);
    }

    fn visit_super(&mut self, data: &SuperData) {
        self.check_super_usage(data.offset, data.id, &data.keyword.lexeme);
    }

    fn visit_super_constructor_call(&mut self, data: &SuperConstructorCallData) {
        self.check_super_usage(data.offset, data.id, &data.keyword.lexeme);
        for argument in &data.arguments {
            self.resolver.resolve_expr(argument, self.sink);
        }
    }
}

impl Ctx<'_, '_> {
    fn check_super_usage(&mut self, offset: Offset, id: ExprId, keyword_lexeme: &str) {
        if self.resolver.inside_static_method {
            self.sink.error(offset, "Can't use 'super' in a static method.".to_string());
            self.resolver.had_error = true;
            return;
        }
        match self.resolver.current_class {
            ClassKind::Derived => {
                self.resolver.resolve_local_name(id, keyword_lexeme);
            }
            ClassKind::None => {
                self.sink.error(offset, "Can't use 'super' outside of a class.".to_string());
                self.resolver.had_error = true;
            }
            ClassKind::Class => {
                self.sink.error(offset, "Can't use 'super' in a class with no superclass.".to_string());
                self.resolver.had_error = true;
            }
        }
    }
}

impl StmtVisitor<()> for Ctx<'_, '_> {
    fn visit_block(&mut self, data: &BlockData) {
        self.resolver.begin_scope();
        self.resolver.resolve_stmts(&data.statements, self.sink);
        self.resolver.end_scope();
    }

    fn visit_class(&mut self, data: &ClassData) {
        let enclosing_class = mem::replace(&mut self.resolver.current_class, ClassKind::Class);

        self.resolver.declare(&data.name, self.sink);
        self.resolver.define(&data.name);

        let mut member_offsets: HashMap<String, Vec<Offset>> = HashMap::new();
        for field in &data.fields {
            member_offsets.entry(field.name.lexeme.clone()).or_default().push(field.name.offset);
        }
        for method in &data.methods {
            member_offsets.entry(method.name.lexeme.clone()).or_default().push(method.name.offset);
        }
        for (name, offsets) in &member_offsets {
            if offsets.len() > 1 {
                let (last, earlier) = offsets.split_last().expect("non-empty offsets");
                self.sink.error(*last, format!("Class member '{name}' is already declared."));
                for prior in earlier {
                    self.sink.note(*prior, "Previous declaration here.".to_string());
                }
                self.resolver.had_error = true;
            }
        }

        let prior_static = self.resolver.inside_static_method;
        self.resolver.inside_static_method = true;
        for method in data.methods.iter().filter(|m| m.is_static) {
            self.resolver.resolve_function_body(&method.params, &method.body, FunctionKind::Method, self.sink);
        }
        self.resolver.inside_static_method = prior_static;

        if let Some(superclass) = &data.superclass {
            if let Expr::Variable(parent) = superclass {
                if parent.name.lexeme == data.name.lexeme {
                    self.sink.error(parent.offset, "A class can't inherit from itself.".to_string());
                    self.resolver.had_error = true;
                }
            }
            self.resolver.current_class = ClassKind::Derived;
            self.resolver.resolve_expr(superclass, self.sink);

            self.resolver.begin_scope();
            self.resolver
                .scopes
                .last_mut()
                .expect("scope just pushed")
                .insert("super".to_string(), ScopeEntry { offset: data.offset, defined: true });
        }

        self.resolver.begin_scope();
        self.resolver
            .scopes
            .last_mut()
            .expect("scope just pushed")
            .insert("this".to_string(), ScopeEntry { offset: data.offset, defined: true });

        for field in &data.fields {
            if let Some(initializer) = &field.initializer {
                self.resolver.resolve_expr(initializer, self.sink);
            }
        }

        for method in data.methods.iter().filter(|m| !m.is_static) {
            let kind = if method.name.lexeme == "init" { FunctionKind::Initializer } else { FunctionKind::Method };
            self.resolver.resolve_function_body(&method.params, &method.body, kind, self.sink);
        }

        self.resolver.end_scope();
        if data.superclass.is_some() {
            self.resolver.end_scope();
        }

        self.resolver.current_class = enclosing_class;
    }

    fn visit_function(&mut self, data: &FunctionData) {
        self.resolver.declare(&data.name, self.sink);
        self.resolver.define(&data.name);
        self.resolver.resolve_function_body(&data.params, &data.body, FunctionKind::Function, self.sink);
    }

    fn visit_expression(&mut self, data: &ExpressionData) {
        self.resolver.resolve_expr(&data.expr, self.sink);
    }

    fn visit_if(&mut self, data: &IfData) {
        self.resolver.resolve_expr(&data.condition, self.sink);
        self.resolver.resolve_stmt(&data.then_branch, self.sink);
        if let Some(else_branch) = &data.else_branch {
            self.resolver.resolve_stmt(else_branch, self.sink);
        }
    }

    fn visit_print(&mut self, data: &PrintData) {
        self.resolver.resolve_expr(&data.expr, self.sink);
    }

    fn visit_return(&mut self, data: &ReturnData) {
        if self.resolver.current_function == FunctionKind::None {
            self.sink.error(data.keyword.offset, "Can't return from top-level code.".to_string());
            self.resolver.had_error = true;
        }

        if let Some(value) = &data.value {
            if self.resolver.current_function == FunctionKind::Initializer {
                self.sink.error(data.keyword.offset, "Can't return a value from an initializer.".to_string());
                self.resolver.had_error = true;
                return;
            }
            self.resolver.resolve_expr(value, self.sink);
        }
    }

    fn visit_var(&mut self, data: &VarData) {
        self.resolver.declare(&data.name, self.sink);
        if let Some(initializer) = &data.initializer {
            self.resolver.resolve_expr(initializer, self.sink);
        }
        self.resolver.define(&data.name);
    }

    fn visit_while(&mut self, data: &WhileData) {
        self.resolver.resolve_expr(&data.condition, self.sink);
        self.resolver.resolve_stmt(&data.body, self.sink);
    }
}
