//! Evaluation contexts and scope chains.
//!
//! A [`Context`] wraps one node of the template tree with the key it was
//! reached by, a borrowed link to its parent, and the variables bound at
//! that node. Contexts live on the call stack of a single evaluation pass and
//! are never mutated after construction, so the chain of parents is an
//! immutable linked list of scope frames.
//!
//! Name resolution walks that list innermost-first on demand through
//! [`ScopeChain`]; no flattened per-node scope is ever built.

use std::fmt::{self, Write as _};
use std::iter;

use rustc_hash::FxHashMap;
use trellis_expr::{is_identifier, Lookup};
use trellis_value::{Map, Value};

use crate::error::{TemplateError, TemplateErrorKind};

/// Variables bound at a single node.
pub type Bindings = FxHashMap<String, Value>;

/// How a node was reached from its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key<'a> {
    /// Mapping key, including control keys.
    Name(&'a str),
    /// Sequence index or `for` iteration number.
    Index(usize),
}

impl Key<'_> {
    /// Whether the key renders without quotes in a trace path.
    fn is_plain(&self) -> bool {
        match self {
            Key::Index(_) => true,
            Key::Name(name) => {
                is_identifier(name) || (!name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
            }
        }
    }
}

impl fmt::Display for Key<'_> {
    /// One trace-path segment: `name`, `0`, or `'non ident'`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) if self.is_plain() => f.write_str(name),
            Key::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// A node of the template tree during evaluation.
#[derive(Debug)]
pub struct Context<'a> {
    parent: Option<&'a Context<'a>>,
    key: Option<Key<'a>>,
    data: &'a Value,
    scope: Bindings,
}

impl<'a> Context<'a> {
    /// The root context of one evaluation call.
    pub fn root(data: &'a Value) -> Self {
        Context {
            parent: None,
            key: None,
            data,
            scope: Bindings::default(),
        }
    }

    /// A child node that binds no variables.
    pub fn child<'b>(&'b self, key: Key<'b>, data: &'b Value) -> Context<'b> {
        self.child_with_scope(key, data, Bindings::default())
    }

    /// A child node that binds `scope` for itself and its descendants.
    pub fn child_with_scope<'b>(
        &'b self,
        key: Key<'b>,
        data: &'b Value,
        scope: Bindings,
    ) -> Context<'b> {
        Context {
            parent: Some(self),
            key: Some(key),
            data,
            scope,
        }
    }

    pub fn parent(&self) -> Option<&'a Context<'a>> {
        self.parent
    }

    /// The key this node was reached by; `None` only at the root.
    pub fn key(&self) -> Option<Key<'a>> {
        self.key
    }

    pub fn data(&self) -> &'a Value {
        self.data
    }

    /// Variables bound at this node only.
    pub fn scope(&self) -> &Bindings {
        &self.scope
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// This node followed by each ancestor up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &Context<'a>> {
        iter::successors(Some(self), |ctx| ctx.parent)
    }

    /// Human-readable path from the root, e.g. `$.a.0.'if(x)'`.
    pub fn trace_location(&self) -> String {
        let mut keys: Vec<Key<'_>> = self.ancestors().filter_map(|ctx| ctx.key).collect();
        keys.reverse();

        let mut path = String::from("$");
        for key in keys {
            let _ = write!(path, ".{key}");
        }
        path
    }

    /// Variables visible at this node, innermost first, ending with `globals`.
    pub fn effective_scope<'s>(&'s self, globals: &'s Map) -> ScopeChain<'s> {
        ScopeChain {
            innermost: self,
            globals,
        }
    }

    /// A template error located at this node.
    pub fn error(&self, kind: TemplateErrorKind) -> TemplateError {
        TemplateError::new(self.trace_location(), kind)
    }
}

/// Borrowed innermost-first view of a context's scope frames.
#[derive(Clone, Copy, Debug)]
pub struct ScopeChain<'a> {
    innermost: &'a Context<'a>,
    globals: &'a Map,
}

impl<'a> ScopeChain<'a> {
    /// Each binding frame, innermost first, ending with the globals.
    ///
    /// Nodes that bind nothing contribute no frame.
    pub fn frames(&self) -> impl Iterator<Item = &'a dyn Lookup> {
        let globals: &'a dyn Lookup = self.globals;
        self.innermost
            .ancestors()
            .filter(|ctx| !ctx.scope.is_empty())
            .map(|ctx| &ctx.scope as &'a dyn Lookup)
            .chain(iter::once(globals))
    }
}

impl Lookup for ScopeChain<'_> {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.innermost
            .ancestors()
            .find_map(|ctx| ctx.scope.get(name))
            .or_else(|| self.globals.get(name))
    }
}
