//! AST + resolver map → side effects.
//!
//! Grounded on the tree-walk dispatch shape used throughout the teacher
//! (`ExprVisitor`/`StmtVisitor` matched against one `Ctx` per evaluation,
//! mirroring `crate::resolver`'s `Ctx` pattern) and on the call-frame
//! discipline in the teacher's `Function::call` (fresh child environment,
//! bind params, execute body, sentinel-error unwind for `return`). The
//! teacher's own pre-resolver, pre-class `src/interpreter.rs` (a bare
//! `Literal`-valued expression evaluator with no environment chain, no
//! classes, and a global-flag error model) has no equivalent here — this
//! module implements spec.md §4.4 end to end: resolver-guided variable
//! lookup, `this`/`super` binding, single inheritance with field
//! declarations, arrays, and the native-call surface.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::class::{Class, Instance};
use crate::environment::Environment;
use crate::error::{ErrorSink, NativeError};
use crate::expr::*;
use crate::function::{BoundMethod, Function, FunctionKind, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, EvalResult, Object, Signal};
use crate::source::Offset;
use crate::stmt::*;
use crate::token::Type;

pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    resolution: HashMap<ExprId, usize>,
    call_depth: usize,
    max_call_depth: usize,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::with_max_call_depth(crate::config::Config::default().max_call_depth)
    }

    pub fn with_config(config: &crate::config::Config) -> Self {
        Interpreter::with_max_call_depth(config.max_call_depth)
    }

    fn with_max_call_depth(max_call_depth: usize) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));
        crate::native::stdlib::install(&globals);
        Interpreter { environment: Rc::clone(&globals), globals, resolution: HashMap::new(), call_depth: 0, max_call_depth }
    }

    /// Runs a whole program against the resolver's scope-distance map,
    /// reporting diagnostics to `sink` and `print` lines to `print`.
    /// Returns `true` iff no runtime error was raised.
    pub fn interpret(
        &mut self,
        program: &[Stmt],
        resolution: HashMap<ExprId, usize>,
        sink: &mut dyn ErrorSink,
        print: &mut dyn FnMut(&str),
    ) -> bool {
        self.resolution = resolution;
        for statement in program {
            if self.execute(statement, sink, print).is_err() {
                return false;
            }
        }
        true
    }

    pub fn execute(&mut self, stmt: &Stmt, sink: &mut dyn ErrorSink, print: &mut dyn FnMut(&str)) -> EvalResult<()> {
        stmt.accept(&mut Ctx { interpreter: self, sink, print })
    }

    pub fn evaluate(&mut self, expr: &Expr, sink: &mut dyn ErrorSink, print: &mut dyn FnMut(&str)) -> EvalResult<Object> {
        expr.accept(&mut Ctx { interpreter: self, sink, print })
    }

    /// Evaluates `expr` with the cursor temporarily moved to `env`; used to
    /// run a field initializer or a bound call in an environment other than
    /// the one currently executing.
    pub fn evaluate_in(
        &mut self,
        expr: &Expr,
        env: &Rc<RefCell<Environment>>,
        sink: &mut dyn ErrorSink,
        print: &mut dyn FnMut(&str),
    ) -> EvalResult<Object> {
        let previous = std::mem::replace(&mut self.environment, Rc::clone(env));
        let result = self.evaluate(expr, sink, print);
        self.environment = previous;
        result
    }

    /// Runs `statements` with the cursor moved to `frame`, restoring the
    /// prior cursor on every exit path (normal fallthrough, `return`
    /// unwind, or runtime error).
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        frame: Rc<RefCell<Environment>>,
        sink: &mut dyn ErrorSink,
        print: &mut dyn FnMut(&str),
    ) -> EvalResult<()> {
        let previous = std::mem::replace(&mut self.environment, frame);
        let mut result = Ok(());
        for statement in statements {
            if let Err(signal) = self.execute(statement, sink, print) {
                result = Err(signal);
                break;
            }
        }
        self.environment = previous;
        result
    }

    /// Guards against unbounded recursion (spec.md §5 leaves cancellation
    /// of a runaway script to the host; this is the core's own ceiling).
    pub fn enter_call(&mut self, call_offset: Offset, sink: &mut dyn ErrorSink) -> EvalResult<()> {
        if self.call_depth >= self.max_call_depth {
            sink.error(call_offset, "Stack overflow.".to_string());
            return Err(Signal::Error);
        }
        self.call_depth += 1;
        Ok(())
    }

    pub fn exit_call(&mut self) {
        self.call_depth -= 1;
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn literal_to_object(literal: &Literal) -> Object {
    match literal {
        Literal::String(s) => Object::from(s.as_str()),
        Literal::NumberInt(n) => Object::NumberInt(*n),
        Literal::NumberFloat(n) => Object::NumberFloat(*n),
        Literal::Bool(b) => Object::Bool(*b),
        Literal::Nil => Object::Nil,
    }
}

/// Builds the native callable backing an array's `len`/`push`/
/// `remove_front` methods, or `None` if `name` isn't one of them.
fn array_method(arr: &Rc<RefCell<Vec<Object>>>, name: &str) -> Option<Object> {
    #[allow(clippy::type_complexity)]
    let (arity, func): (usize, Rc<dyn Fn(&mut Interpreter, &[Object]) -> Result<Object, NativeError>>) = match name {
        "len" => {
            let arr = Rc::clone(arr);
            (0, Rc::new(move |_: &mut Interpreter, _args: &[Object]| Ok(Object::NumberInt(arr.borrow().len() as i64))))
        }
        "push" => {
            let arr = Rc::clone(arr);
            (1, Rc::new(move |_: &mut Interpreter, args: &[Object]| {
                arr.borrow_mut().push(args[0].clone());
                Ok(Object::Nil)
            }))
        }
        "remove_front" => {
            let arr = Rc::clone(arr);
            (0, Rc::new(move |_: &mut Interpreter, _args: &[Object]| {
                let mut values = arr.borrow_mut();
                if values.is_empty() {
                    return Err(NativeError::new("Cannot remove from an empty array."));
                }
                Ok(values.remove(0))
            }))
        }
        _ => return None,
    };
    Some(Object::Callable(Callable::Native(Rc::new(NativeFunction { name: name.to_string(), arity, func }))))
}

/// Borrows the interpreter, the sink, and the print callback together for
/// the duration of one `accept` dispatch. Mirrors `crate::resolver::Ctx`.
struct Ctx<'i, 's, 'p> {
    interpreter: &'i mut Interpreter,
    sink: &'s mut dyn ErrorSink,
    print: &'p mut dyn FnMut(&str),
}

impl Ctx<'_, '_, '_> {
    fn eval_args(&mut self, arguments: &[Expr]) -> EvalResult<Vec<Object>> {
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.interpreter.evaluate(argument, self.sink, self.print)?);
        }
        Ok(values)
    }

    fn check_arity(&mut self, expected: usize, got: usize, offset: Offset) -> EvalResult<()> {
        if expected != got {
            self.sink.error(offset, format!("Expected {expected} arguments but got {got}."));
            return Err(Signal::Error);
        }
        Ok(())
    }

    fn type_mismatch(&mut self, left: &Object, right: &Object, offset: Offset) -> Signal {
        self.sink.error(
            offset,
            format!("Operands must be two numbers of the same kind, were {} and {}.", left.type_name(), right.type_name()),
        );
        Signal::Error
    }

    fn add(&mut self, left: &Object, right: &Object, offset: Offset) -> EvalResult<Object> {
        match (left, right) {
            (Object::NumberInt(a), Object::NumberInt(b)) => Ok(Object::NumberInt(a + b)),
            (Object::NumberFloat(a), Object::NumberFloat(b)) => Ok(Object::NumberFloat(a + b)),
            (Object::String(a), Object::String(b)) => Ok(Object::from(format!("{a}{b}"))),
            _ => Err(self.type_mismatch(left, right, offset)),
        }
    }

    fn arith(&mut self, left: &Object, right: &Object, offset: Offset, fi: fn(i64, i64) -> i64, ff: fn(f64, f64) -> f64) -> EvalResult<Object> {
        match (left, right) {
            (Object::NumberInt(a), Object::NumberInt(b)) => Ok(Object::NumberInt(fi(*a, *b))),
            (Object::NumberFloat(a), Object::NumberFloat(b)) => Ok(Object::NumberFloat(ff(*a, *b))),
            _ => Err(self.type_mismatch(left, right, offset)),
        }
    }

    fn divide(&mut self, left: &Object, right: &Object, offset: Offset) -> EvalResult<Object> {
        match (left, right) {
            (Object::NumberInt(_), Object::NumberInt(0)) => {
                self.sink.error(offset, "Division by zero.".to_string());
                Err(Signal::Error)
            }
            (Object::NumberInt(a), Object::NumberInt(b)) => Ok(Object::NumberInt(a / b)),
            (Object::NumberFloat(_), Object::NumberFloat(b)) if *b == 0.0 => {
                self.sink.error(offset, "Division by zero.".to_string());
                Err(Signal::Error)
            }
            (Object::NumberFloat(a), Object::NumberFloat(b)) => Ok(Object::NumberFloat(a / b)),
            _ => Err(self.type_mismatch(left, right, offset)),
        }
    }

    fn compare(&mut self, left: &Object, right: &Object, offset: Offset, fi: fn(i64, i64) -> bool, ff: fn(f64, f64) -> bool) -> EvalResult<Object> {
        match (left, right) {
            (Object::NumberInt(a), Object::NumberInt(b)) => Ok(Object::Bool(fi(*a, *b))),
            (Object::NumberFloat(a), Object::NumberFloat(b)) => Ok(Object::Bool(ff(*a, *b))),
            _ => Err(self.type_mismatch(left, right, offset)),
        }
    }

    fn expect_index(&mut self, index: &Object, offset: Offset, len: usize) -> EvalResult<usize> {
        match index {
            Object::NumberInt(i) if *i >= 0 && (*i as usize) < len => Ok(*i as usize),
            Object::NumberInt(i) => {
                self.sink.error(offset, format!("Index {i} out of range for array of length {len}."));
                Err(Signal::Error)
            }
            other => {
                self.sink.error(offset, format!("Array index must be an int, was {}.", other.type_name()));
                Err(Signal::Error)
            }
        }
    }

    /// Evaluates every declared field of `class` (base classes first) onto
    /// `this_obj`, in the environment each class's fields close over (its
    /// `method_closure`) with `this` bound. Native classes have no field
    /// initializers, so this is a no-op for them.
    fn init_fields(&mut self, class: &Rc<RefCell<Class>>, this_obj: &Object) -> EvalResult<()> {
        let superclass = class.borrow().superclass.clone();
        if let Some(parent) = &superclass {
            self.init_fields(parent, this_obj)?;
        }

        let closure = class.borrow().method_closure.clone();
        let Some(closure) = closure else { return Ok(()) };
        let field_initializers = class.borrow().field_initializers.clone();

        let mut this_frame = Environment::new(Some(closure));
        this_frame.define("this", this_obj.clone());
        let this_frame = Rc::new(RefCell::new(this_frame));

        for field in &field_initializers {
            let value = match &field.initializer {
                Some(expr) => self.interpreter.evaluate_in(expr, &this_frame, self.sink, self.print)?,
                None => Object::Nil,
            };
            if let Object::Instance(instance) = this_obj {
                instance.borrow_mut().fields.insert(field.name.lexeme.clone(), value);
            }
        }
        Ok(())
    }
}

impl ExprVisitor<EvalResult<Object>> for Ctx<'_, '_, '_> {
    fn visit_assign(&mut self, data: &AssignData) -> EvalResult<Object> {
        let value = self.interpreter.evaluate(&data.value, self.sink, self.print)?;
        match self.interpreter.resolution.get(&data.id) {
            Some(&distance) => {
                if Environment::set_at_or_false(&self.interpreter.environment, distance, &data.name.lexeme, value.clone()) {
                    Ok(value)
                } else {
                    self.sink.error(data.offset, format!("Variable '{}' was neither declared in global nor local scope.", data.name.lexeme));
                    Err(Signal::Error)
                }
            }
            None => {
                if Environment::set_or_false(&self.interpreter.globals, &data.name.lexeme, value.clone()) {
                    Ok(value)
                } else {
                    self.sink.error(data.offset, format!("Global variable '{}' was never declared.", data.name.lexeme));
                    Err(Signal::Error)
                }
            }
        }
    }

    fn visit_binary(&mut self, data: &BinaryData) -> EvalResult<Object> {
        let left = self.interpreter.evaluate(&data.left, self.sink, self.print)?;
        let right = self.interpreter.evaluate(&data.right, self.sink, self.print)?;
        let offset = data.operator.offset;
        match data.operator.kind {
            Type::Plus => self.add(&left, &right, offset),
            Type::Minus => self.arith(&left, &right, offset, |a, b| a - b, |a, b| a - b),
            Type::Star => self.arith(&left, &right, offset, |a, b| a * b, |a, b| a * b),
            Type::Slash => self.divide(&left, &right, offset),
            Type::Greater => self.compare(&left, &right, offset, |a, b| a > b, |a, b| a > b),
            Type::GreaterEqual => self.compare(&left, &right, offset, |a, b| a >= b, |a, b| a >= b),
            Type::Less => self.compare(&left, &right, offset, |a, b| a < b, |a, b| a < b),
            Type::LessEqual => self.compare(&left, &right, offset, |a, b| a <= b, |a, b| a <= b),
            Type::EqualEqual => Ok(Object::Bool(left.structural_eq(&right))),
            Type::BangEqual => Ok(Object::Bool(!left.structural_eq(&right))),
            other => unreachable!("parser never builds a Binary node with operator {other:?}"),
        }
    }

    fn visit_logical(&mut self, data: &LogicalData) -> EvalResult<Object> {
        let left = self.interpreter.evaluate(&data.left, self.sink, self.print)?;
        match data.operator.kind {
            Type::Or if left.truthy() => Ok(left),
            Type::Or => self.interpreter.evaluate(&data.right, self.sink, self.print),
            Type::And if !left.truthy() => Ok(left),
            Type::And => self.interpreter.evaluate(&data.right, self.sink, self.print),
            other => unreachable!("parser never builds a Logical node with operator {other:?}"),
        }
    }

    fn visit_unary(&mut self, data: &UnaryData) -> EvalResult<Object> {
        let right = self.interpreter.evaluate(&data.right, self.sink, self.print)?;
        match data.operator.kind {
            Type::Minus => match right {
                Object::NumberInt(n) => Ok(Object::NumberInt(-n)),
                Object::NumberFloat(n) => Ok(Object::NumberFloat(-n)),
                other => {
                    self.sink.error(data.operator.offset, format!("Operand must be a number, was {}.", other.type_name()));
                    Err(Signal::Error)
                }
            },
            Type::Bang => Ok(Object::Bool(!right.truthy())),
            other => unreachable!("parser never builds a Unary node with operator {other:?}"),
        }
    }

    fn visit_grouping(&mut self, data: &GroupingData) -> EvalResult<Object> {
        self.interpreter.evaluate(&data.inner, self.sink, self.print)
    }

    fn visit_literal(&mut self, data: &LiteralData) -> EvalResult<Object> {
        Ok(literal_to_object(&data.value))
    }

    fn visit_variable(&mut self, data: &VariableData) -> EvalResult<Object> {
        match self.interpreter.resolution.get(&data.id) {
            Some(&distance) => match Environment::get_at_or_null(&self.interpreter.environment, distance, &data.name.lexeme) {
                Some(value) => Ok(value),
                None => {
                    self.sink.error(data.offset, format!("Variable '{}' was neither declared in global nor local scope.", data.name.lexeme));
                    Err(Signal::Error)
                }
            },
            None => match Environment::get_or_null(&self.interpreter.globals, &data.name.lexeme) {
                Some(value) => Ok(value),
                None => {
                    self.sink.error(data.offset, format!("Undefined variable '{}'.", data.name.lexeme));
                    Err(Signal::Error)
                }
            },
        }
    }

    fn visit_call(&mut self, data: &CallData) -> EvalResult<Object> {
        let callee = self.interpreter.evaluate(&data.callee, self.sink, self.print)?;
        let arguments = self.eval_args(&data.arguments)?;

        match &callee {
            Object::Callable(callable) => {
                self.check_arity(callable.arity(), arguments.len(), data.offset)?;
                callable.call(self.interpreter, arguments, data.offset, self.sink, self.print)
            }
            Object::Class(_) => {
                self.sink.error(data.offset, "A class is not a callable.".to_string());
                self.sink.note(data.offset, "Did you forget to use 'new'?".to_string());
                Err(Signal::Error)
            }
            other => {
                self.sink.error(data.offset, format!("{} is not callable.", other.type_name()));
                Err(Signal::Error)
            }
        }
    }

    fn visit_array(&mut self, data: &ArrayData) -> EvalResult<Object> {
        let values = self.eval_args(&data.values)?;
        Ok(Object::Array(Rc::new(RefCell::new(values))))
    }

    fn visit_constructor(&mut self, data: &ConstructorData) -> EvalResult<Object> {
        let class_value = self.interpreter.evaluate(&data.class, self.sink, self.print)?;
        let Object::Class(class) = &class_value else {
            self.sink.error(data.class.offset(), format!("{} is not a class.", class_value.type_name()));
            return Err(Signal::Error);
        };
        let class = Rc::clone(class);

        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(&class))));
        let this_obj = Object::Instance(Rc::clone(&instance));
        self.init_fields(&class, &this_obj)?;

        let native_constructor = class.borrow().native_constructor.clone();
        if let Some(constructor) = native_constructor {
            let arguments = self.eval_args(&data.arguments)?;
            match constructor(self.interpreter, &arguments) {
                Ok(payload) => instance.borrow_mut().fields.extend(payload),
                Err(err) => {
                    self.sink.error(data.offset, err.0);
                    return Err(Signal::Error);
                }
            }
            return Ok(this_obj);
        }

        let init = class.borrow().find_init();
        match init {
            Some(init) => {
                let bound = init.bind(this_obj.clone());
                let arguments = self.eval_args(&data.arguments)?;
                self.check_arity(bound.params.len(), arguments.len(), data.paren.offset)?;
                bound.call(self.interpreter, arguments, data.offset, self.sink, self.print)?;
            }
            None => {
                self.check_arity(0, data.arguments.len(), data.paren.offset)?;
            }
        }

        Ok(this_obj)
    }

    fn visit_get_property(&mut self, data: &GetPropertyData) -> EvalResult<Object> {
        let object = self.interpreter.evaluate(&data.object, self.sink, self.print)?;
        match &object {
            Object::Instance(instance) => {
                if let Some(value) = instance.borrow().fields.get(&data.name.lexeme).cloned() {
                    return Ok(value);
                }
                let class = Rc::clone(&instance.borrow().class);
                let method = class.borrow().find_method(&data.name.lexeme);
                match method {
                    Some(method) => {
                        let bound = method.bind(object.clone());
                        Ok(Object::Callable(Callable::Bound(Rc::new(BoundMethod { receiver: object.clone(), method: bound }))))
                    }
                    None => {
                        self.sink.error(data.offset, format!("<instance {}> doesn't have a property named '{}'.", class.borrow().name, data.name.lexeme));
                        Err(Signal::Error)
                    }
                }
            }
            Object::Class(class) => match class.borrow().find_static_method(&data.name.lexeme) {
                Some(method) => Ok(Object::Callable(Callable::Function(method))),
                None => {
                    self.sink.error(data.offset, format!("<class {}> doesn't have a static property named '{}'.", class.borrow().name, data.name.lexeme));
                    Err(Signal::Error)
                }
            },
            Object::NativePackage(package) => match package.get_property_or_null(&data.name.lexeme) {
                Some(value) => Ok(value),
                None => {
                    self.sink.error(data.offset, format!("Package '{}' doesn't have a property named '{}'.", package.name, data.name.lexeme));
                    Err(Signal::Error)
                }
            },
            Object::Array(arr) => match array_method(arr, &data.name.lexeme) {
                Some(value) => Ok(value),
                None => {
                    self.sink.error(data.offset, format!("Array doesn't have a property named '{}'.", data.name.lexeme));
                    Err(Signal::Error)
                }
            },
            other => {
                self.sink.error(data.offset, format!("{} is not capable of having any properties.", other.type_name()));
                Err(Signal::Error)
            }
        }
    }

    fn visit_set_property(&mut self, data: &SetPropertyData) -> EvalResult<Object> {
        let object = self.interpreter.evaluate(&data.object, self.sink, self.print)?;
        let Object::Instance(instance) = &object else {
            self.sink.error(data.offset, format!("{} is not capable of having any properties.", object.type_name()));
            return Err(Signal::Error);
        };
        let class = Rc::clone(&instance.borrow().class);
        if !class.borrow().has_field(&data.name.lexeme) {
            self.sink.error(data.offset, format!("<instance {}> doesn't have a property named '{}'.", class.borrow().name, data.name.lexeme));
            return Err(Signal::Error);
        }
        let value = self.interpreter.evaluate(&data.value, self.sink, self.print)?;
        instance.borrow_mut().fields.insert(data.name.lexeme.clone(), value.clone());
        Ok(value)
    }

    fn visit_get_index(&mut self, data: &GetIndexData) -> EvalResult<Object> {
        let object = self.interpreter.evaluate(&data.object, self.sink, self.print)?;
        let index = self.interpreter.evaluate(&data.index, self.sink, self.print)?;
        let Object::Array(arr) = &object else {
            self.sink.error(data.offset, format!("Cannot index into a {}.", object.type_name()));
            return Err(Signal::Error);
        };
        let len = arr.borrow().len();
        let i = self.expect_index(&index, data.bracket.offset, len)?;
        Ok(arr.borrow()[i].clone())
    }

    fn visit_set_index(&mut self, data: &SetIndexData) -> EvalResult<Object> {
        let object = self.interpreter.evaluate(&data.object, self.sink, self.print)?;
        let index = self.interpreter.evaluate(&data.index, self.sink, self.print)?;
        let Object::Array(arr) = &object else {
            self.sink.error(data.offset, format!("Cannot index into a {}.", object.type_name()));
            return Err(Signal::Error);
        };
        let len = arr.borrow().len();
        let i = self.expect_index(&index, data.bracket.offset, len)?;
        let value = self.interpreter.evaluate(&data.value, self.sink, self.print)?;
        arr.borrow_mut()[i] = value.clone();
        Ok(value)
    }

    fn visit_this(&mut self, data: &ThisData) -> EvalResult<Object> {
        let distance = self
            .interpreter
            .resolution
            .get(&data.id)
            .copied()
            .expect("resolver guarantees 'this' is resolvable wherever it's valid");
        match Environment::get_at_or_null(&self.interpreter.environment, distance, "this") {
            Some(value) => Ok(value),
            None => {
                self.sink.error(data.offset, "Variable 'this' was neither declared in global nor local scope.".to_string());
                Err(Signal::Error)
            }
        }
    }

    fn visit_super(&mut self, data: &SuperData) -> EvalResult<Object> {
        let distance = self
            .interpreter
            .resolution
            .get(&data.id)
            .copied()
            .expect("resolver guarantees 'super' is resolvable wherever it's valid");
        let superclass = Environment::get_at_or_null(&self.interpreter.environment, distance, "super")
            .expect("resolver guarantees a 'super' binding exists at this distance");
        let Object::Class(superclass) = superclass else { unreachable!("'super' always resolves to a class") };
        let this_obj = Environment::get_at_or_null(&self.interpreter.environment, distance - 1, "this")
            .expect("'this' is bound exactly one frame inside 'super'");

        match superclass.borrow().find_method(&data.method.lexeme) {
            Some(method) => {
                let bound = method.bind(this_obj.clone());
                Ok(Object::Callable(Callable::Bound(Rc::new(BoundMethod { receiver: this_obj, method: bound }))))
            }
            None => {
                self.sink.error(data.offset, format!("<class {}> doesn't have a property named '{}'.", superclass.borrow().name, data.method.lexeme));
                Err(Signal::Error)
            }
        }
    }

    fn visit_super_constructor_call(&mut self, data: &SuperConstructorCallData) -> EvalResult<Object> {
        let distance = self
            .interpreter
            .resolution
            .get(&data.id)
            .copied()
            .expect("resolver guarantees 'super' is resolvable wherever it's valid");
        let superclass = Environment::get_at_or_null(&self.interpreter.environment, distance, "super")
            .expect("resolver guarantees a 'super' binding exists at this distance");
        let Object::Class(superclass) = superclass else { unreachable!("'super' always resolves to a class") };
        let this_obj = Environment::get_at_or_null(&self.interpreter.environment, distance - 1, "this")
            .expect("'this' is bound exactly one frame inside 'super'");

        let arguments = self.eval_args(&data.arguments)?;
        if let Some(init) = superclass.borrow().find_init() {
            let bound = init.bind(this_obj.clone());
            self.check_arity(bound.params.len(), arguments.len(), data.paren.offset)?;
            bound.call(self.interpreter, arguments, data.offset, self.sink, self.print)?;
        } else {
            self.check_arity(0, arguments.len(), data.paren.offset)?;
        }
        Ok(this_obj)
    }
}

impl StmtVisitor<EvalResult<()>> for Ctx<'_, '_, '_> {
    fn visit_block(&mut self, data: &BlockData) -> EvalResult<()> {
        let frame = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.interpreter.environment)))));
        self.interpreter.execute_block(&data.statements, frame, self.sink, self.print)
    }

    fn visit_class(&mut self, data: &ClassData) -> EvalResult<()> {
        let superclass = match &data.superclass {
            Some(expr) => {
                let value = self.interpreter.evaluate(expr, self.sink, self.print)?;
                match value {
                    Object::Class(class) => Some(class),
                    other => {
                        self.sink.error(expr.offset(), format!("Superclass must be a class, was {}.", other.type_name()));
                        return Err(Signal::Error);
                    }
                }
            }
            None => None,
        };

        let method_closure = match &superclass {
            Some(parent) => {
                let mut super_frame = Environment::new(Some(Rc::clone(&self.interpreter.environment)));
                super_frame.define("super", Object::Class(Rc::clone(parent)));
                Rc::new(RefCell::new(super_frame))
            }
            None => Rc::clone(&self.interpreter.environment),
        };

        let mut methods = HashMap::new();
        let mut static_methods = HashMap::new();
        for method in &data.methods {
            let closure = if method.is_static { Rc::clone(&self.interpreter.environment) } else { Rc::clone(&method_closure) };
            let kind = if method.is_static {
                FunctionKind::Function
            } else if method.name.lexeme == "init" {
                FunctionKind::Initializer
            } else {
                FunctionKind::Method
            };
            let function = Rc::new(Function::new(method.name.lexeme.clone(), method.params.clone(), Rc::clone(&method.body), closure, kind));
            if method.is_static {
                static_methods.insert(method.name.lexeme.clone(), function);
            } else {
                methods.insert(method.name.lexeme.clone(), function);
            }
        }

        let declared_fields: HashSet<String> = data.fields.iter().map(|field| field.name.lexeme.clone()).collect();
        let mut class = Class::new(data.name.lexeme.clone(), superclass, methods, static_methods, declared_fields);
        class.method_closure = Some(method_closure);
        class.field_initializers = data.fields.clone();

        self.interpreter.environment.borrow_mut().define(&data.name.lexeme, Object::Class(Rc::new(RefCell::new(class))));
        Ok(())
    }

    fn visit_function(&mut self, data: &FunctionData) -> EvalResult<()> {
        let function = Rc::new(Function::new(
            data.name.lexeme.clone(),
            data.params.clone(),
            Rc::clone(&data.body),
            Rc::clone(&self.interpreter.environment),
            FunctionKind::Function,
        ));
        self.interpreter.environment.borrow_mut().define(&data.name.lexeme, Object::Callable(Callable::Function(function)));
        Ok(())
    }

    fn visit_expression(&mut self, data: &ExpressionData) -> EvalResult<()> {
        self.interpreter.evaluate(&data.expr, self.sink, self.print)?;
        Ok(())
    }

    fn visit_if(&mut self, data: &IfData) -> EvalResult<()> {
        if self.interpreter.evaluate(&data.condition, self.sink, self.print)?.truthy() {
            self.interpreter.execute(&data.then_branch, self.sink, self.print)
        } else if let Some(else_branch) = &data.else_branch {
            self.interpreter.execute(else_branch, self.sink, self.print)
        } else {
            Ok(())
        }
    }

    fn visit_print(&mut self, data: &PrintData) -> EvalResult<()> {
        let value = self.interpreter.evaluate(&data.expr, self.sink, self.print)?;
        (self.print)(&value.print_string());
        Ok(())
    }

    fn visit_return(&mut self, data: &ReturnData) -> EvalResult<()> {
        let value = match &data.value {
            Some(expr) => self.interpreter.evaluate(expr, self.sink, self.print)?,
            None => Object::Nil,
        };
        Err(Signal::Return(value))
    }

    fn visit_var(&mut self, data: &VarData) -> EvalResult<()> {
        let value = match &data.initializer {
            Some(expr) => self.interpreter.evaluate(expr, self.sink, self.print)?,
            None => Object::Nil,
        };
        self.interpreter.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_while(&mut self, data: &WhileData) -> EvalResult<()> {
        while self.interpreter.evaluate(&data.condition, self.sink, self.print)?.truthy() {
            self.interpreter.execute(&data.body, self.sink, self.print)?;
        }
        Ok(())
    }
}
