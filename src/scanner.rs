//! Source text → token stream.
//!
//! Grounded on the teacher's `Scanner` (a `peekmore`-buffered character
//! cursor that dispatches on `peek()` before consuming, `add_single_char_token`/
//! `add_double_char_token` helpers, a `string`/`number`/`identifier` trio);
//! moved from its line/column `Location` stamping to byte-`Offset` stamping
//! per spec.md §4.1, and extended to accept `'` as an alternate string
//! delimiter, to split number literals into `NumberInt`/`NumberFloat`, and
//! to scan the wider punctuation/keyword set `crate::token` now defines.
//! Unlike the teacher (which parses every number as `f32`, a type no 64-bit
//! digit run can overflow), an integer literal can exceed `i64::MAX`; that
//! case reports a scan error instead of producing a token, the same
//! accumulate-and-continue discipline the unterminated-string path uses.

use peekmore::{PeekMore, PeekMoreIterator};
use std::str::Chars;

use crate::error::ErrorSink;
use crate::literal::Literal;
use crate::source::Offset;
use crate::token::{self, Token, Type};

pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner { source: source.chars().peekmore(), tokens: Vec::new(), start: 0, current: 0 }
    }

    /// Scans the whole input, reporting every error to `sink`, and returns
    /// the token list (always terminated by a sentinel `Eof`).
    pub fn scan_tokens(mut self, sink: &mut dyn ErrorSink) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token(sink);
        }

        self.tokens.push(Token::new(Type::Eof, String::new(), None, Offset::at(self.current)));
        self.tokens
    }

    fn advance(&mut self) -> char {
        let c = self.source.next().expect("advance past end of input");
        self.current += c.len_utf8();
        c
    }

    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    fn peek_next(&mut self) -> Option<char> {
        self.source.peek_next().copied()
    }

    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    fn offset(&self) -> Offset {
        Offset::new(self.start, self.current)
    }

    fn add_token(&mut self, kind: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(kind, lexeme, literal, self.offset()));
    }

    fn add_single_char_token(&mut self, kind: Type) {
        let c = self.advance();
        self.add_token(kind, c.to_string(), None);
    }

    fn add_double_char_token(&mut self, kind: Type) {
        let first = self.advance();
        let second = self.advance();
        self.add_token(kind, format!("{first}{second}"), None);
    }

    fn match_next(&mut self, expected: char) -> bool {
        self.peek_next() == Some(expected)
    }

    fn string(&mut self, quote: char, sink: &mut dyn ErrorSink) {
        self.advance();
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    sink.error(self.offset(), "Unterminated string.".to_string());
                    return;
                }
                Some(c) if c == quote => break,
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
        self.advance();
        self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
    }

    fn number(&mut self, sink: &mut dyn ErrorSink) {
        let mut text = String::new();
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            text.push(self.advance());
        }

        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            text.push(self.advance());
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                text.push(self.advance());
            }
        }

        if is_float {
            // A syntactically valid float run always fits in f64 (it
            // saturates to infinity rather than failing to parse).
            let value: f64 = text.parse().expect("scanned float literal");
            self.add_token(Type::NumberFloat, text, Some(Literal::NumberFloat(value)));
        } else {
            match text.parse::<i64>() {
                Ok(value) => self.add_token(Type::NumberInt, text, Some(Literal::NumberInt(value))),
                Err(_) => sink.error(self.offset(), "Integer literal out of range.".to_string()),
            }
        }
    }

    fn identifier(&mut self) {
        let mut text = String::new();
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            text.push(self.advance());
        }

        let kind = token::keyword(&text).unwrap_or(Type::Identifier);
        self.add_token(kind, text, None);
    }

    /// Scans the next token. Dispatches on `peek()` without consuming, so
    /// each branch decides for itself how many characters to advance past.
    fn scan_token(&mut self, sink: &mut dyn ErrorSink) {
        let c = self.peek().expect("scan_token called at end of input");
        match c {
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            '[' => self.add_single_char_token(Type::LeftBracket),
            ']' => self.add_single_char_token(Type::RightBracket),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),
            ':' => self.add_single_char_token(Type::Colon),

            '-' => {
                if self.match_next('>') {
                    self.add_double_char_token(Type::Arrow);
                } else {
                    self.add_single_char_token(Type::Minus);
                }
            }
            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang);
                }
            }
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal);
                }
            }
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less);
                }
            }
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater);
                }
            }
            '/' => {
                if self.match_next('/') {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            }

            ' ' | '\r' | '\t' | '\n' => {
                self.advance();
            }

            '"' | '\'' => self.string(c, sink),

            c if c.is_ascii_digit() => self.number(sink),

            c if c.is_alphabetic() || c == '_' => self.identifier(),

            other => {
                self.advance();
                sink.error(self.offset(), format!("Unexpected character '{other}'."));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectingSink;

    fn scan(src: &str) -> (Vec<Token>, CollectingSink) {
        let mut sink = CollectingSink::default();
        let tokens = Scanner::new(src).scan_tokens(&mut sink);
        (tokens, sink)
    }

    #[test]
    fn scans_punctuation_and_two_char_tokens() {
        let (tokens, sink) = scan("!= == <= >= ->");
        assert!(!sink.had_errors());
        let kinds: Vec<Type> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![Type::BangEqual, Type::EqualEqual, Type::LessEqual, Type::GreaterEqual, Type::Arrow, Type::Eof]
        );
    }

    #[test]
    fn splits_int_and_float_numbers() {
        let (tokens, _) = scan("12 3.5");
        assert_eq!(tokens[0].kind, Type::NumberInt);
        assert_eq!(tokens[0].literal, Some(Literal::NumberInt(12)));
        assert_eq!(tokens[1].kind, Type::NumberFloat);
        assert_eq!(tokens[1].literal, Some(Literal::NumberFloat(3.5)));
    }

    #[test]
    fn reports_unterminated_string() {
        let (_, sink) = scan("\"abc");
        assert!(sink.had_errors());
    }

    #[test]
    fn reports_an_out_of_range_integer_literal_instead_of_panicking() {
        let (tokens, sink) = scan("99999999999999999999");
        assert!(sink.had_errors());
        assert!(sink.diagnostics.iter().any(|d| d.message.contains("Integer literal out of range")));
        assert_eq!(tokens, vec![Token::new(Type::Eof, String::new(), None, Offset::at(20))]);
    }

    #[test]
    fn accepts_single_quote_strings() {
        let (tokens, sink) = scan("'hi'");
        assert!(!sink.had_errors());
        assert_eq!(tokens[0].literal, Some(Literal::String("hi".to_string())));
    }

    #[test]
    fn recognizes_keywords() {
        let (tokens, _) = scan("class public static new");
        let kinds: Vec<Type> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![Type::Class, Type::Public, Type::Static, Type::New, Type::Eof]);
    }
}
