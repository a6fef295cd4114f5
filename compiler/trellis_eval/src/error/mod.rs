//! Template evaluation errors.
//!
//! Every failure carries the trace path of the node that raised it. The kind
//! says what went wrong; expression failures keep the underlying
//! [`ExprError`] reachable through [`std::error::Error::source`].

use std::fmt;

use trellis_expr::ExprError;
use trellis_value::Value;

/// The three control-key forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    If,
    For,
    With,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::If => "if",
            BlockKind::For => "for",
            BlockKind::With => "with",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed category of a template failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateErrorKind {
    /// Control-key header that does not parse (missing separator, bad variable).
    MalformedBlock { block: BlockKind, reason: String },
    /// Control block whose value is not a mapping.
    NonMappingBody { block: BlockKind, got: &'static str },
    /// `for` target that cannot be iterated.
    NotIterable { got: &'static str },
    /// Ordinary key whose interpolation produced something other than text.
    NonStringKey { got: &'static str },
    /// Inline interpolation site that produced a list or map.
    NonScalarInterpolation { got: &'static str },
    /// Failure reported by the expression evaluator.
    Expression { source: String, error: ExprError },
}

impl fmt::Display for TemplateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBlock { block, reason } => {
                write!(f, "malformed {block} block: {reason}")
            }
            Self::NonMappingBody { block, got } => {
                write!(f, "the value of a {block} block must be a mapping, got {got}")
            }
            Self::NotIterable { got } => {
                write!(f, "the iterable of a for block must be iterable, got {got}")
            }
            Self::NonStringKey { got } => write!(f, "expected a string key, got {got}"),
            Self::NonScalarInterpolation { got } => {
                write!(f, "expected a plain value in string interpolation, got {got}")
            }
            Self::Expression { source, error } => {
                write!(f, "failed to evaluate the expression `{source}`: {error}")
            }
        }
    }
}

/// A template failure located at a node of the template tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateError {
    path: String,
    kind: TemplateErrorKind,
}

impl TemplateError {
    pub fn new(path: impl Into<String>, kind: TemplateErrorKind) -> Self {
        TemplateError {
            path: path.into(),
            kind,
        }
    }

    /// Trace path of the failing node, e.g. `$.items.0.'for(i in xs)'`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> &TemplateErrorKind {
        &self.kind
    }

    /// The message without the path prefix.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn into_kind(self) -> TemplateErrorKind {
        self.kind
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: {}", self.path, self.kind)
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            TemplateErrorKind::Expression { error, .. } => Some(error),
            _ => None,
        }
    }
}

// Factories

pub fn malformed_block(block: BlockKind, reason: impl Into<String>) -> TemplateErrorKind {
    TemplateErrorKind::MalformedBlock {
        block,
        reason: reason.into(),
    }
}

pub fn non_mapping_body(block: BlockKind, got: &Value) -> TemplateErrorKind {
    TemplateErrorKind::NonMappingBody {
        block,
        got: got.type_name(),
    }
}

pub fn not_iterable(got: &Value) -> TemplateErrorKind {
    TemplateErrorKind::NotIterable {
        got: got.type_name(),
    }
}

pub fn non_string_key(got: &Value) -> TemplateErrorKind {
    TemplateErrorKind::NonStringKey {
        got: got.type_name(),
    }
}

pub fn non_scalar_interpolation(got: &Value) -> TemplateErrorKind {
    TemplateErrorKind::NonScalarInterpolation {
        got: got.type_name(),
    }
}

pub fn expression_failed(source: &str, error: ExprError) -> TemplateErrorKind {
    TemplateErrorKind::Expression {
        source: source.trim().to_owned(),
        error,
    }
}

#[cfg(test)]
mod tests;
