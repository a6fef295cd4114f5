//! Trellis Expr - the bounded expression language used by templates.
//!
//! Expressions appear inside `${{ ... }}` markers and in the headers of
//! `if(...)`, `for(v in ...)` and `with(v=...)` control keys. The language is
//! deliberately small: literals, arithmetic, comparison, boolean connectives,
//! indexing, slicing, and a fixed table of builtin functions and methods.
//!
//! # Architecture
//!
//! - [`lexer`]: `logos` tokenizer
//! - [`parser`]: recursive-descent precedence parser producing [`ast::Expr`]
//! - [`interpreter`]: tree-walking evaluator against a [`Lookup`]
//! - `operators`: binary and unary operator dispatch
//! - `builtins`: the builtin function and method table
//!
//! Callers that need a different language implement [`Evaluate`] themselves;
//! the template engine only depends on that trait.

pub mod ast;
mod builtins;
pub mod errors;
pub mod interpreter;
pub mod lexer;
mod operators;
pub mod parser;
pub mod scope;

pub use builtins::{is_builtin_function, BUILTIN_FUNCTIONS};
pub use errors::{ExprError, ExprErrorKind};
pub use interpreter::Interpreter;
pub use operators::values_equal;
pub use parser::parse;
pub use scope::Lookup;

use trellis_value::Value;

/// Largest list an expression may build.
pub const MAX_COLLECTION_LEN: usize = 1_000_000;

/// Largest string, in bytes, an expression may build.
pub const MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Words reserved by the grammar; never usable as variable names.
pub const KEYWORDS: &[&str] = &[
    "and", "or", "not", "in", "if", "else", "True", "true", "False", "false", "None", "null",
];

/// Expression evaluation seam.
///
/// The template engine hands every expression source to an `Evaluate`
/// together with the current scope chain.
pub trait Evaluate {
    fn evaluate(&self, source: &str, scope: &dyn Lookup) -> Result<Value, ExprError>;
}

impl<E: Evaluate + ?Sized> Evaluate for &E {
    fn evaluate(&self, source: &str, scope: &dyn Lookup) -> Result<Value, ExprError> {
        (**self).evaluate(source, scope)
    }
}

impl<E: Evaluate + ?Sized> Evaluate for Box<E> {
    fn evaluate(&self, source: &str, scope: &dyn Lookup) -> Result<Value, ExprError> {
        (**self).evaluate(source, scope)
    }
}

/// Whether `s` is lexically an identifier.
///
/// First character alphabetic or `_`, the rest alphanumeric or `_`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether `s` can be bound as a variable: an identifier that is not a keyword.
pub fn is_bindable_name(s: &str) -> bool {
    is_identifier(s) && !KEYWORDS.contains(&s)
}
