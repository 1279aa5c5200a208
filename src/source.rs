//! Source text and byte-offset bookkeeping.
//!
//! Tokens, AST nodes, and diagnostics all refer back to a [`Source`] through
//! an [`Offset`], a byte range into the original text. The (line, column)
//! pair needed to render a human-readable diagnostic is only computed on
//! demand, the first time something asks for it.

use std::cell::OnceCell;

/// A byte range into a [`Source`]. `start == end` for single-point offsets
/// (e.g. the position of an inserted/missing token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub start: usize,
    pub end: usize,
}

impl Offset {
    pub fn new(start: usize, end: usize) -> Self {
        Offset { start, end }
    }

    /// A zero-width offset at a single byte position.
    pub fn at(pos: usize) -> Self {
        Offset { start: pos, end: pos }
    }
}

/// A 0-based line and column, used only by the diagnostic renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

/// Maps byte offsets to (line, column) pairs. Built once per [`Source`], the
/// first time a diagnostic needs it.
#[derive(Debug)]
struct LineMap {
    /// Byte offset of the start of each line.
    line_starts: Vec<usize>,
}

impl LineMap {
    fn build(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        LineMap { line_starts }
    }

    fn line_col(&self, offset: usize) -> LineCol {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_at) => insert_at.saturating_sub(1),
        };
        let column = offset - self.line_starts[line];
        LineCol { line, column }
    }
}

/// Owns the original source text; lazily builds a line/column map the first
/// time a diagnostic needs to be rendered.
#[derive(Debug)]
pub struct Source {
    pub text: String,
    map: OnceCell<LineMap>,
}

impl Source {
    pub fn new(text: String) -> Self {
        Source { text, map: OnceCell::new() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Resolves a byte offset to a 0-based (line, column) pair, building the
    /// line map on first use.
    pub fn line_col(&self, offset: usize) -> LineCol {
        let map = self.map.get_or_init(|| LineMap::build(&self.text));
        map.line_col(offset.min(self.text.len()))
    }

    pub fn slice(&self, offset: Offset) -> &str {
        &self.text[offset.start..offset.end]
    }
}
