//! Tokenizer and parser for catalog text.
//!
//! ```text
//! Value      ::= [NameAssign] Payload
//! NameAssign ::= '#' Identifier '='
//! Payload    ::= Number | StringLiteral | ArrayLiteral | Reference
//! ArrayLiteral ::= '[' (Value (',' Value)*)? ']'
//! Reference  ::= '@' StringLiteral
//! ```
//!
//! Quoted text is taken verbatim up to the closing quote; backslashes carry no
//! meaning, so `"a\nb"` holds a backslash followed by `n`.
//!
//! Parsing never fails outright. Anything the grammar cannot place is skipped or
//! repaired and reported as a [`Diagnostic`]; callers decide through
//! [`ParseOutcome::into_strict`] or [`ParseOutcome::into_lenient`] how much of that
//! they accept.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use super::Value;
use crate::types::{
    SourcePosition,
    SourceRange,
};

/// Kind of anomaly found while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// An array reached end of input before its closing `]`.
    UnterminatedArray,
    /// A quoted token reached a line break or end of input before its closing quote.
    UnterminatedString,
    /// A token that cannot start a value was skipped inside an array.
    UnexpectedToken,
    /// Tokens after the top-level value were ignored.
    TrailingContent,
}

/// A recoverable parse anomaly with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub range: SourceRange,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.range, self.message)
    }
}

/// Strict parse failure: the text parsed only with repairs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Catalog text is malformed:\n{}", format_diagnostics(.diagnostics))]
pub struct ParseError {
    pub diagnostics: Vec<Diagnostic>,
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .enumerate()
        .map(|(i, diagnostic)| format!("  {}. {diagnostic}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result of parsing: always a value, possibly with diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome {
    /// The complete value, or the best-effort partial value when diagnostics exist.
    pub value: Value,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    /// Returns true if the text parsed without any repair.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Accepts the value only if nothing had to be repaired.
    pub fn into_strict(self) -> Result<Value, ParseError> {
        if self.diagnostics.is_empty() {
            Ok(self.value)
        } else {
            Err(ParseError { diagnostics: self.diagnostics })
        }
    }

    /// Accepts the best-effort value, discarding diagnostics.
    #[must_use]
    pub fn into_lenient(self) -> Value {
        self.value
    }
}

/// Parses catalog text into a value tree.
#[must_use]
pub fn parse(text: &str) -> ParseOutcome {
    let mut parser = Parser::new(text);
    let value = parser.parse_value();

    if parser.current.token != Token::Eof {
        let range = parser.current.range;
        parser.report(
            DiagnosticKind::TrailingContent,
            range,
            format!("Ignored {} after the top-level value", parser.current.token),
        );
    }

    let mut diagnostics = parser.tokenizer.diagnostics;
    diagnostics.extend(parser.diagnostics);
    diagnostics.sort_by_key(|diagnostic| {
        (diagnostic.range.start.line, diagnostic.range.start.character)
    });

    ParseOutcome { value, diagnostics }
}

// ===== Tokenizer =====

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Number(f64),
    Quoted { delimiter: char, text: String },
    Punct(char),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(word) => write!(f, "word '{word}'"),
            Self::Number(number) => write!(f, "number {number}"),
            Self::Quoted { delimiter, text } => {
                write!(f, "quoted text {delimiter}{text}{delimiter}")
            }
            Self::Punct(c) => write!(f, "'{c}'"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Spanned {
    token: Token,
    range: SourceRange,
}

/// Word tokens start with these; digits, `.` and `-` may follow.
const fn is_word_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '#' || c == '_' || c as u32 >= 0xA0
}

const fn is_word_part(c: char) -> bool {
    is_word_start(c) || c.is_ascii_digit() || c == '.' || c == '-'
}

struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    position: SourcePosition,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Tokenizer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            position: SourcePosition::default(),
            diagnostics: Vec::new(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.position = SourcePosition::new(self.position.line + 1, 0);
        } else {
            self.position = self.position.next_character();
        }
        Some(c)
    }

    fn bump_while(&mut self, buffer: &mut String, accept: impl Fn(char) -> bool) {
        while let Some(&c) = self.chars.peek() {
            if !accept(c) {
                break;
            }
            buffer.push(c);
            self.bump();
        }
    }

    fn next_token(&mut self) -> Spanned {
        loop {
            // Control characters and space are all insignificant.
            while self.chars.peek().is_some_and(|&c| c <= ' ') {
                self.bump();
            }

            let start = self.position;
            let Some(c) = self.bump() else {
                return Spanned { token: Token::Eof, range: SourceRange::point(start) };
            };

            let token = match c {
                '/' => {
                    while self.chars.peek().is_some_and(|&c| c != '\n') {
                        self.bump();
                    }
                    continue;
                }
                '"' | '\'' => self.quoted(c, start),
                '-' if self.chars.peek().is_some_and(|&c| c.is_ascii_digit() || c == '.') => {
                    self.number(c)
                }
                c if c.is_ascii_digit() || c == '.' => self.number(c),
                c if is_word_start(c) => {
                    let mut word = String::from(c);
                    self.bump_while(&mut word, is_word_part);
                    Token::Word(word)
                }
                c => Token::Punct(c),
            };

            return Spanned { token, range: SourceRange::new(start, self.position) };
        }
    }

    fn number(&mut self, first: char) -> Token {
        let mut literal = String::from(first);
        let mut seen_dot = first == '.';
        while let Some(&c) = self.chars.peek() {
            if c == '.' && !seen_dot {
                seen_dot = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            literal.push(c);
            self.bump();
        }

        // A bare "." or "-." still counts as a number.
        let value = literal.parse::<f64>().unwrap_or_else(|_| {
            if literal.starts_with('-') { -0.0 } else { 0.0 }
        });
        Token::Number(value)
    }

    fn quoted(&mut self, delimiter: char, start: SourcePosition) -> Token {
        let mut text = String::new();
        loop {
            match self.chars.peek().copied() {
                Some(c) if c == delimiter => {
                    self.bump();
                    break;
                }
                None | Some('\n' | '\r') => {
                    self.diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::UnterminatedString,
                        range: SourceRange::new(start, self.position),
                        message: format!("Missing closing {delimiter} before end of line"),
                    });
                    break;
                }
                Some(c) => {
                    text.push(c);
                    self.bump();
                }
            }
        }
        Token::Quoted { delimiter, text }
    }
}

// ===== Parser =====

struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    current: Spanned,
    /// Number of tokens consumed so far.
    consumed: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        let mut tokenizer = Tokenizer::new(text);
        let current = tokenizer.next_token();
        Self { tokenizer, current, consumed: 0, diagnostics: Vec::new() }
    }

    fn advance(&mut self) {
        self.current = self.tokenizer.next_token();
        self.consumed += 1;
    }

    fn eat_punct(&mut self, punct: char) -> bool {
        if self.current.token == Token::Punct(punct) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn report(&mut self, kind: DiagnosticKind, range: SourceRange, message: String) {
        self.diagnostics.push(Diagnostic { kind, range, message });
    }

    /// Parses one value. A value without a recognised payload stays void.
    fn parse_value(&mut self) -> Value {
        let mut value = Value::new();

        if let Token::Word(word) = &self.current.token
            && let Some(name) = word.strip_prefix('#')
        {
            value.set_name(name);
            self.advance();
            self.eat_punct('=');
        }

        match &self.current.token {
            Token::Number(number) => {
                value.set_float(*number);
                self.advance();
            }
            Token::Quoted { delimiter: '"', text } => {
                value.set_string(text);
                self.advance();
            }
            Token::Punct('[') => {
                let open = self.current.range;
                self.advance();
                value.set_array();
                self.parse_array_body(&mut value, open);
            }
            Token::Punct('@') => {
                self.advance();
                if let Token::Quoted { delimiter: '"', text } = &self.current.token {
                    value.set_string(text);
                    self.advance();
                }
            }
            _ => {}
        }

        value
    }

    fn parse_array_body(&mut self, array: &mut Value, open: SourceRange) {
        loop {
            match self.current.token {
                Token::Punct(']') => {
                    self.advance();
                    return;
                }
                Token::Eof => {
                    self.report(
                        DiagnosticKind::UnterminatedArray,
                        open,
                        "Array is missing its closing ']'".to_string(),
                    );
                    return;
                }
                _ => {}
            }

            let before = self.consumed;
            let child = self.parse_value();
            if !child.is_void() {
                array.push_owned(child);
            }

            if self.eat_punct(',') {
                continue;
            }

            let stuck = self.consumed == before
                && !matches!(self.current.token, Token::Punct(']') | Token::Eof);
            if stuck {
                let range = self.current.range;
                let message = format!("Skipped unexpected {} inside array", self.current.token);
                self.report(DiagnosticKind::UnexpectedToken, range, message);
                self.advance();
            }
        }
    }
}
