use thiserror::Error;

use crate::span::Span;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {span}")]
    UnexpectedCharacter { ch: char, span: Span },

    #[error("Unterminated string literal starting at {span}")]
    UnterminatedString { span: Span },

    #[error("Number literal '{literal}' is out of range at {span}")]
    InvalidNumber { literal: String, span: Span },

    #[error("Invalid escape sequence '{sequence}' at {span}")]
    InvalidEscape { sequence: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            Self::UnexpectedCharacter { span, .. }
            | Self::UnterminatedString { span }
            | Self::InvalidNumber { span, .. }
            | Self::InvalidEscape { span, .. } => *span,
        }
    }
}

/// Parsing stops at the first mismatch, so there is only one shape.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Expected {expected}, got {found} at {span}")]
pub struct ParseError {
    pub expected: String,
    pub found: String,
    pub span: Span,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Undefined function {name} at {span}")]
    UndefinedFunction { name: String, span: Span },

    #[error("Arg count mismatch for {name}: expected {expected}, got {found} at {span}")]
    ArgumentCountMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("Unsupported operand type for unary {op}: {operand}")]
    UnsupportedOperand { op: String, operand: &'static str },

    #[error("Unsupported operand types for {op}: {left} and {right}")]
    UnsupportedOperands {
        op: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow in {op}")]
    IntegerOverflow { op: String },

    #[error("Maximum call depth of {limit} exceeded calling {name} at {span}")]
    RecursionLimit {
        name: String,
        limit: usize,
        span: Span,
    },

    #[error("Failed to write output: {message}")]
    Output { message: String },
}

impl RuntimeError {
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UndefinedFunction { span, .. }
            | Self::ArgumentCountMismatch { span, .. }
            | Self::RecursionLimit { span, .. } => Some(*span),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Parse,
    Runtime,
}

/// The one error a failing run reports upward.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lex,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Runtime(_) => ErrorKind::Runtime,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lex(e) => Some(e.span()),
            Self::Parse(e) => Some(e.span),
            Self::Runtime(e) => e.span(),
        }
    }
}
