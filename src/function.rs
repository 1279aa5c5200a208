//! Callables: language functions/methods, bound methods, and native
//! functions. Grounded on the teacher's `Function`/`NativeFunction`
//! (`call`, closure-capturing body execution); generalized with
//! `FunctionKind` and `BoundMethod` per spec.md §3/§4.4.
//!
//! `super` is wired into a method's closure once, when its owning class is
//! declared (see `crate::interpreter`'s class-statement evaluation); `this`
//! is wired in later, at `bind()` time, when a property lookup on an
//! instance retrieves the method. Both wrap the closure in one more
//! `Environment` frame, so the frame nesting a call sees (params, then
//! `this`, then `super`) lines up with the scope nesting the resolver
//! assigned distances against.

use std::cell::RefCell;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{ErrorSink, NativeError};
use crate::interpreter::Interpreter;
use crate::object::{EvalResult, Object, Signal};
use crate::source::Offset;
use crate::stmt::Stmt;
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Method,
    Initializer,
}

/// A language-level function or method.
#[derive(Debug)]
pub struct Function {
    pub name: String,
    pub params: Vec<Token>,
    pub body: Rc<Vec<Stmt>>,
    pub closure: Rc<RefCell<Environment>>,
    pub kind: FunctionKind,
}

impl Function {
    pub fn new(
        name: String,
        params: Vec<Token>,
        body: Rc<Vec<Stmt>>,
        closure: Rc<RefCell<Environment>>,
        kind: FunctionKind,
    ) -> Self {
        Function { name, params, body, closure, kind }
    }

    /// Produces a copy of this function whose closure is one frame deeper,
    /// with `this` bound to `receiver`. Called once per property lookup
    /// that resolves to an instance method (see `GetProperty`/`Super`).
    pub fn bind(self: &Rc<Function>, receiver: Object) -> Rc<Function> {
        let mut this_frame = Environment::new(Some(Rc::clone(&self.closure)));
        this_frame.define("this", receiver);
        Rc::new(Function {
            name: self.name.clone(),
            params: self.params.clone(),
            body: Rc::clone(&self.body),
            closure: Rc::new(RefCell::new(this_frame)),
            kind: self.kind,
        })
    }

    /// Executes a call: a fresh child environment of `closure` binds the
    /// parameters, then the body runs. `this`/`super`, if applicable, are
    /// already present in `closure` by the time `call` runs (see `bind`).
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Object>,
        call_offset: Offset,
        sink: &mut dyn ErrorSink,
        print: &mut dyn FnMut(&str),
    ) -> EvalResult<Object> {
        log::debug!("call {} ({:?}, {} args)", self.name, self.kind, arguments.len());
        interpreter.enter_call(call_offset, sink)?;

        let mut frame = Environment::new(Some(Rc::clone(&self.closure)));
        for (param, arg) in self.params.iter().zip(arguments.into_iter()) {
            frame.define(&param.lexeme, arg);
        }

        let frame = Rc::new(RefCell::new(frame));
        let result = interpreter.execute_block(&self.body, frame, sink, print);
        interpreter.exit_call();

        let is_initializer = self.kind == FunctionKind::Initializer;
        let bound_this = || Environment::get_or_null(&self.closure, "this").unwrap_or(Object::Nil);
        match result {
            Ok(()) => Ok(if is_initializer { bound_this() } else { Object::Nil }),
            Err(Signal::Return(value)) => Ok(if is_initializer { bound_this() } else { value }),
            Err(Signal::Error) => Err(Signal::Error),
        }
    }
}

/// A callable plus an implicit receiver, produced when a property lookup on
/// an instance resolves to a method (spec.md §3 `BoundCallable`). `method`
/// is already the result of `Function::bind`; calling it needs nothing
/// further from `receiver` beyond what display/identity use it for.
#[derive(Debug)]
pub struct BoundMethod {
    pub receiver: Object,
    pub method: Rc<Function>,
}

impl BoundMethod {
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Object>,
        call_offset: Offset,
        sink: &mut dyn ErrorSink,
        print: &mut dyn FnMut(&str),
    ) -> EvalResult<Object> {
        self.method.call(interpreter, arguments, call_offset, sink, print)
    }
}

/// A host-provided function. Unlike a language `Function`, it cannot fail
/// with a language-level `return`; it either produces a value or a
/// [`NativeError`] which the call site surfaces as an ordinary runtime
/// error at the call's offset.
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    #[allow(clippy::type_complexity)]
    pub func: Rc<dyn Fn(&mut Interpreter, &[Object]) -> Result<Object, NativeError>>,
}

impl NativeFunction {
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Object>,
        call_offset: Offset,
        sink: &mut dyn ErrorSink,
    ) -> EvalResult<Object> {
        match (self.func)(interpreter, &arguments) {
            Ok(value) => Ok(value),
            Err(err) => {
                sink.error(call_offset, err.0);
                Err(Signal::Error)
            }
        }
    }
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fun {}>", self.name)
    }
}
