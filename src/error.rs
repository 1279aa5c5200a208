//! Diagnostics plumbing shared by every stage of the pipeline.
//!
//! Each stage (scanner, parser, resolver, interpreter) accumulates
//! [`Diagnostic`]s into a host-supplied [`ErrorSink`] instead of writing to
//! stdout/stderr directly or flipping a global flag, per the spec's error
//! sink contract. `Error` diagnostics carry a source offset; `Note`
//! diagnostics carry a secondary offset clarifying a prior error (e.g. the
//! location of an earlier declaration in a "already declared" error).

use std::fmt;

use crate::source::{Offset, Source};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Note,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub offset: Offset,
    pub message: String,
}

impl Diagnostic {
    pub fn error(offset: Offset, message: impl Into<String>) -> Self {
        Diagnostic { severity: Severity::Error, offset, message: message.into() }
    }

    pub fn note(offset: Offset, message: impl Into<String>) -> Self {
        Diagnostic { severity: Severity::Note, offset, message: message.into() }
    }
}

/// Receives diagnostics from every stage. A host may collect them, print
/// them immediately, or forward them elsewhere; the core never assumes a
/// particular sink.
pub trait ErrorSink {
    fn report(&mut self, diagnostic: Diagnostic);

    /// Takes a concrete `String` (rather than `impl Into<String>`) so this
    /// method stays in the vtable and can be called through `&mut dyn
    /// ErrorSink`, which is how every stage holds its sink.
    fn error(&mut self, offset: Offset, message: String) {
        self.report(Diagnostic::error(offset, message));
    }

    fn note(&mut self, offset: Offset, message: String) {
        self.report(Diagnostic::note(offset, message));
    }
}

/// An [`ErrorSink`] that simply collects every diagnostic it receives, in
/// order. Used by the driver and by tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        CollectingSink::default()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).count()
    }

    pub fn had_errors(&self) -> bool {
        self.error_count() > 0
    }
}

impl ErrorSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Renders a single diagnostic in the classic `[line L:C] Error: message`
/// shape, resolving its offset against `source`. This is the pretty-printer
/// named as an out-of-core-scope collaborator by the spec; it lives here
/// because it's the natural place for a CLI host to reach for it.
pub fn render_diagnostic(source: &Source, diagnostic: &Diagnostic) -> String {
    let pos = source.line_col(diagnostic.offset.start);
    let kind = match diagnostic.severity {
        Severity::Error => "Error",
        Severity::Note => "Note",
    };
    format!("[line {}:{}] {}: {}", pos.line + 1, pos.column + 1, kind, diagnostic.message)
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {:?}: {}", self.severity, self.offset, self.message)
    }
}

/// An error a native (host-provided) callable may raise. Surfaced to the
/// script as an ordinary runtime error at the call site.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct NativeError(pub String);

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        NativeError(message.into())
    }
}
