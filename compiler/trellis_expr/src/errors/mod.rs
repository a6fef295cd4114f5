//! Error types for expression evaluation.
//!
//! `ExprErrorKind` is the typed category; `ExprError` pairs it with the byte
//! range of the offending source when one is known (lexing and parsing).
//! Callers build errors through the factory functions below rather than
//! constructing kinds directly.

use std::fmt;
use std::ops::Range;

use crate::ast::BinaryOp;

/// Typed error category for expression failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprErrorKind {
    // Source
    Lex {
        message: String,
    },
    Syntax {
        message: String,
    },

    // Names
    UndefinedVariable {
        name: String,
    },
    UndefinedFunction {
        name: String,
    },
    NoSuchMethod {
        method: String,
        type_name: &'static str,
    },

    // Types and operators
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    BinaryTypeMismatch {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    InvalidOperand {
        op: &'static str,
        type_name: &'static str,
    },

    // Arithmetic
    DivisionByZero,
    IntegerOverflow {
        operation: &'static str,
    },

    // Access
    IndexOutOfBounds {
        index: i64,
        len: usize,
    },
    KeyNotFound {
        key: String,
    },

    // Calls
    ArityMismatch {
        name: String,
        expected: String,
        got: usize,
    },
    InvalidArgument {
        name: String,
        message: String,
    },
    CollectionTooLarge {
        size: u128,
        limit: usize,
    },
}

impl fmt::Display for ExprErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex { message } | Self::Syntax { message } => f.write_str(message),

            Self::UndefinedVariable { name } => write!(f, "name '{name}' is not defined"),
            Self::UndefinedFunction { name } => write!(f, "unknown function '{name}'"),
            Self::NoSuchMethod { method, type_name } => {
                write!(f, "no method '{method}' on type {type_name}")
            }

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::BinaryTypeMismatch { op, left, right } => write!(
                f,
                "operator `{}` cannot be applied to {left} and {right}",
                op.as_symbol()
            ),
            Self::InvalidOperand { op, type_name } => {
                write!(f, "operator `{op}` cannot be applied to {type_name}")
            }

            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),

            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::KeyNotFound { key } => write!(f, "key not found: '{key}'"),

            Self::ArityMismatch {
                name,
                expected,
                got,
            } => write!(f, "{name}() expects {expected} arguments, got {got}"),
            Self::InvalidArgument { name, message } => write!(f, "{name}(): {message}"),
            Self::CollectionTooLarge { size, limit } => {
                write!(f, "result of size {size} exceeds the limit of {limit}")
            }
        }
    }
}

/// An expression failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExprError {
    pub kind: ExprErrorKind,
    /// Byte range in the expression source, for lex and syntax errors.
    pub span: Option<Range<usize>>,
}

impl ExprError {
    pub fn new(kind: ExprErrorKind) -> Self {
        ExprError { kind, span: None }
    }

    #[must_use]
    pub fn with_span(mut self, span: Range<usize>) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprErrorKind::Lex { .. } | ExprErrorKind::Syntax { .. } => match &self.span {
                Some(span) => write!(f, "{} (at offset {})", self.kind, span.start),
                None => write!(f, "{}", self.kind),
            },
            kind => write!(f, "{kind}"),
        }
    }
}

impl std::error::Error for ExprError {}

impl From<ExprErrorKind> for ExprError {
    fn from(kind: ExprErrorKind) -> Self {
        ExprError::new(kind)
    }
}

// Source errors

pub fn lex_error(message: impl Into<String>, span: Range<usize>) -> ExprError {
    ExprError::new(ExprErrorKind::Lex {
        message: message.into(),
    })
    .with_span(span)
}

pub fn syntax_error(message: impl Into<String>, span: Range<usize>) -> ExprError {
    ExprError::new(ExprErrorKind::Syntax {
        message: message.into(),
    })
    .with_span(span)
}

// Name errors

pub fn undefined_variable(name: &str) -> ExprError {
    ExprErrorKind::UndefinedVariable {
        name: name.to_owned(),
    }
    .into()
}

pub fn undefined_function(name: &str) -> ExprError {
    ExprErrorKind::UndefinedFunction {
        name: name.to_owned(),
    }
    .into()
}

pub fn no_such_method(method: &str, type_name: &'static str) -> ExprError {
    ExprErrorKind::NoSuchMethod {
        method: method.to_owned(),
        type_name,
    }
    .into()
}

// Type errors

pub fn type_mismatch(expected: &'static str, got: &'static str) -> ExprError {
    ExprErrorKind::TypeMismatch { expected, got }.into()
}

pub fn binary_type_mismatch(op: BinaryOp, left: &'static str, right: &'static str) -> ExprError {
    ExprErrorKind::BinaryTypeMismatch { op, left, right }.into()
}

pub fn invalid_operand(op: &'static str, type_name: &'static str) -> ExprError {
    ExprErrorKind::InvalidOperand { op, type_name }.into()
}

// Arithmetic errors

pub fn division_by_zero() -> ExprError {
    ExprErrorKind::DivisionByZero.into()
}

pub fn integer_overflow(operation: &'static str) -> ExprError {
    ExprErrorKind::IntegerOverflow { operation }.into()
}

// Access errors

pub fn index_out_of_bounds(index: i64, len: usize) -> ExprError {
    ExprErrorKind::IndexOutOfBounds { index, len }.into()
}

pub fn key_not_found(key: &str) -> ExprError {
    ExprErrorKind::KeyNotFound {
        key: key.to_owned(),
    }
    .into()
}

// Call errors

pub fn arity_mismatch(name: &str, expected: impl Into<String>, got: usize) -> ExprError {
    ExprErrorKind::ArityMismatch {
        name: name.to_owned(),
        expected: expected.into(),
        got,
    }
    .into()
}

pub fn invalid_argument(name: &str, message: impl Into<String>) -> ExprError {
    ExprErrorKind::InvalidArgument {
        name: name.to_owned(),
        message: message.into(),
    }
    .into()
}

pub fn collection_too_large(size: u128, limit: usize) -> ExprError {
    ExprErrorKind::CollectionTooLarge { size, limit }.into()
}
