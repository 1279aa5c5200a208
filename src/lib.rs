#![allow(clippy::needless_return)]

//! Glint is a dynamically typed, class-based scripting language with
//! lexical scoping, single inheritance, first-class functions, and a
//! small host-extension surface for registering native values, functions,
//! and classes. Glint is a tree-walk interpreter with a hand-written
//! recursive descent parser.
//!
//! ## Scanning
//! The first stage turns source text into a token stream. The scanner is
//! implemented in the [`scanner`] module as a byte-offset cursor over the
//! input. It reports lexical errors (unterminated strings, unexpected
//! characters) to an [`error::ErrorSink`] and keeps scanning past them, so
//! a single run can surface every lexical problem in a file at once.
//!
//! ## Parsing
//! The second stage turns the token stream into an AST: [`Expr`](expr::Expr)
//! nodes that produce a value, and [`Stmt`](stmt::Stmt) nodes that perform
//! a side effect. The parser is implemented in the [`parser`] module as a
//! recursive-descent/Pratt parser and, like the scanner, reports errors
//! without aborting: a malformed statement is skipped via synchronization
//! and parsing continues.
//!
//! ## Resolving
//! The third stage, in the [`resolver`] module, performs a static pass over
//! the AST to compute, for every variable reference, how many enclosing
//! scopes up the declaration lives. This lets the interpreter read and
//! write locals by distance rather than by a dynamic name search, and lets
//! it catch scoping mistakes (reading a variable in its own initializer,
//! returning from top-level code, misusing `this`/`super`) before any code
//! runs.
//!
//! ## Interpreting
//! The final stage, in the [`interpreter`] module, walks the resolved AST
//! and produces effects: it reads and writes [`Environment`](environment::Environment)
//! frames, calls [`Callable`](object::Callable)s, and constructs
//! [`Instance`](class::Instance)s. Runtime errors (type mismatches, unbound
//! properties, division by zero) are reported to the same
//! [`error::ErrorSink`] the earlier stages use.
//!
//! None of these stages prints anything or touches the process directly;
//! [`run`] wires them together and a host (see `main.rs`) supplies the
//! sink and the `print` callback.

pub mod ast_printer;
pub mod class;
pub mod config;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod native;
pub mod object;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod source;
pub mod stmt;
pub mod token;

use error::{CollectingSink, ErrorSink};
use interpreter::Interpreter;
use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The end state of a single [`run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    StaticError,
    RuntimeError,
}

/// Runs one chunk of source through the full pipeline: scan, parse,
/// resolve, interpret. Diagnostics from every stage land on `sink`;
/// `print` receives one call per `print` statement executed, with no
/// trailing newline.
///
/// A scan or parse failure short-circuits before the next stage runs, so a
/// file with lexical errors is never handed to the parser, and one with
/// parse errors is never handed to the resolver. The resolver and
/// interpreter report straight to `sink` themselves (they don't need an
/// intermediate collecting stage, since neither feeds a representation the
/// next stage would choke on).
pub fn run(source: &str, interpreter: &mut Interpreter, sink: &mut dyn ErrorSink, print: &mut dyn FnMut(&str)) -> Outcome {
    let mut scan_sink = CollectingSink::new();
    let tokens = Scanner::new(source).scan_tokens(&mut scan_sink);
    let scan_failed = scan_sink.had_errors();
    for diagnostic in scan_sink.diagnostics {
        sink.report(diagnostic);
    }
    if scan_failed {
        return Outcome::StaticError;
    }

    let mut parse_sink = CollectingSink::new();
    let program = Parser::new(tokens, &mut parse_sink).parse();
    let parse_failed = parse_sink.had_errors();
    for diagnostic in parse_sink.diagnostics {
        sink.report(diagnostic);
    }
    if parse_failed {
        return Outcome::StaticError;
    }

    let resolution = match Resolver::new().resolve(&program, sink) {
        Some(resolution) => resolution,
        None => return Outcome::StaticError,
    };

    if interpreter.interpret(&program, resolution, sink, print) {
        Outcome::Ok
    } else {
        Outcome::RuntimeError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_a_well_formed_program() {
        let mut sink = CollectingSink::new();
        let mut lines = Vec::new();
        let mut print = |line: &str| lines.push(line.to_string());
        let outcome = run("print 1 + 2;", &mut Interpreter::new(), &mut sink, &mut print);
        assert_eq!(outcome, Outcome::Ok);
        assert_eq!(lines, vec!["3"]);
    }

    #[test]
    fn stops_before_parsing_on_a_scan_error() {
        let mut sink = CollectingSink::new();
        let mut print = |_: &str| {};
        let outcome = run("print `;", &mut Interpreter::new(), &mut sink, &mut print);
        assert_eq!(outcome, Outcome::StaticError);
        assert!(sink.had_errors());
    }

    #[test]
    fn stops_before_resolving_on_a_parse_error() {
        let mut sink = CollectingSink::new();
        let mut print = |_: &str| {};
        let outcome = run("var = 1;", &mut Interpreter::new(), &mut sink, &mut print);
        assert_eq!(outcome, Outcome::StaticError);
    }

    #[test]
    fn surfaces_runtime_errors() {
        let mut sink = CollectingSink::new();
        let mut print = |_: &str| {};
        let outcome = run("print 1 / 0;", &mut Interpreter::new(), &mut sink, &mut print);
        assert_eq!(outcome, Outcome::RuntimeError);
    }

    #[test]
    fn a_fresh_interpreter_reuses_prior_global_state() {
        let mut sink = CollectingSink::new();
        let mut interpreter = Interpreter::new();
        let mut lines = Vec::new();
        let mut print = |line: &str| lines.push(line.to_string());
        run("var counter = 0;", &mut interpreter, &mut sink, &mut print);
        run("counter = counter + 1; print counter;", &mut interpreter, &mut sink, &mut print);
        assert_eq!(lines, vec!["1"]);
    }
}
