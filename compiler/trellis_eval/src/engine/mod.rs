//! The template engine.
//!
//! [`Engine`] owns the read-only globals and the expression evaluator and
//! walks a template tree, dispatching on each node's kind:
//!
//! - mappings go through control-key expansion and key interpolation
//! - sequences are evaluated element by element, one output per input
//! - strings go through interpolation
//! - other scalars are returned unchanged
//!
//! The engine holds no mutable state, so one engine can serve any number of
//! evaluations, including concurrent ones.

use tracing::{debug, trace};
use trellis_expr::{Evaluate, Interpreter};
use trellis_stack::ensure_sufficient_stack;
use trellis_value::{Map, Value};

use crate::context::{Bindings, Context, Key};
use crate::control::{control_block, ControlKey};
use crate::error::{
    expression_failed, non_mapping_body, non_string_key, not_iterable, BlockKind, TemplateError,
};
use crate::eval_mode::EvalMode;
use crate::interpolate::interpolate;

pub type EvalResult<T = Value> = Result<T, TemplateError>;

/// Structured template evaluator.
#[derive(Clone, Debug)]
pub struct Engine<E = Interpreter> {
    globals: Map,
    evaluator: E,
}

impl Engine {
    /// An engine using the builtin expression language.
    pub fn new(globals: Map) -> Self {
        Engine::with_evaluator(globals, Interpreter::new())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(Map::new())
    }
}

impl<E: Evaluate> Engine<E> {
    /// An engine using a custom expression evaluator.
    pub fn with_evaluator(globals: Map, evaluator: E) -> Self {
        Engine { globals, evaluator }
    }

    pub fn globals(&self) -> &Map {
        &self.globals
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Fully evaluate a template.
    pub fn evaluate(&self, template: &Value) -> EvalResult {
        self.evaluate_with(template, EvalMode::Full)
    }

    /// Evaluate only the top level of a template.
    pub fn evaluate_shallow(&self, template: &Value) -> EvalResult {
        self.evaluate_with(template, EvalMode::Shallow)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(mode = ?mode))]
    pub fn evaluate_with(&self, template: &Value, mode: EvalMode) -> EvalResult {
        let root = Context::root(template);
        self.evaluate_context(&root, mode)
    }

    /// Evaluate the node wrapped by `ctx`, resolving names through its scope chain.
    pub fn evaluate_context(&self, ctx: &Context<'_>, mode: EvalMode) -> EvalResult {
        ensure_sufficient_stack(|| match ctx.data() {
            Value::Map(map) => self.evaluate_mapping(ctx, map, mode).map(Value::Map),
            Value::List(items) => self.evaluate_sequence(ctx, items, mode).map(Value::List),
            Value::Str(text) => self.evaluate_string(ctx, text),
            scalar => Ok(scalar.clone()),
        })
    }

    fn evaluate_sequence(
        &self,
        ctx: &Context<'_>,
        items: &[Value],
        mode: EvalMode,
    ) -> EvalResult<Vec<Value>> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.evaluate_context(&ctx.child(Key::Index(index), item), mode))
            .collect()
    }

    fn evaluate_mapping(&self, ctx: &Context<'_>, map: &Map, mode: EvalMode) -> EvalResult<Map> {
        let mut out = Map::with_capacity(map.len());
        for (key, value) in map {
            let entry = ctx.child(Key::Name(key), value);
            if let Some((block, header)) = control_block(key) {
                self.expand_block(ctx, key, &entry, block, header, mode, &mut out)?;
                continue;
            }

            let resolved = match self.evaluate_string(&entry, key)? {
                Value::Str(s) => s,
                other => return Err(entry.error(non_string_key(&other))),
            };
            let value = if mode.recurses() || matches!(value, Value::Str(_)) {
                self.evaluate_context(&entry, mode)?
            } else {
                value.clone()
            };
            out.insert(resolved, value);
        }
        Ok(out)
    }

    /// Expand one control entry of the mapping at `ctx` into `out`.
    #[allow(
        clippy::too_many_arguments,
        reason = "the entry is described by its mapping, key, context and parsed header"
    )]
    fn expand_block(
        &self,
        ctx: &Context<'_>,
        key: &str,
        entry: &Context<'_>,
        block: BlockKind,
        header: &str,
        mode: EvalMode,
        out: &mut Map,
    ) -> EvalResult<()> {
        // The body's shape is checked before the header is parsed or evaluated.
        let body = entry.data();
        let accepted = match block {
            BlockKind::If => matches!(body, Value::Map(_) | Value::Str(_)),
            BlockKind::For | BlockKind::With => matches!(body, Value::Map(_)),
        };
        if !accepted {
            return Err(entry.error(non_mapping_body(block, body)));
        }

        match (ControlKey::parse(block, header).map_err(|kind| entry.error(kind))?, body) {
            (ControlKey::If { condition }, _) => {
                self.expand_if(ctx, key, entry, condition, mode, out)
            }
            (ControlKey::For { var, iterable }, Value::Map(body_map)) => {
                self.expand_for(entry, body_map, var, iterable, mode, out)
            }
            (ControlKey::With { var, expr }, Value::Map(body_map)) => {
                let bound = self.eval_expr(entry, expr)?;
                trace!(var, "with block");
                let scope = Bindings::from_iter([(var.to_owned(), bound)]);
                let body_ctx = ctx.child_with_scope(Key::Name(key), body, scope);
                out.extend(self.evaluate_mapping(&body_ctx, body_map, mode)?);
                Ok(())
            }
            (control, other) => Err(entry.error(non_mapping_body(control.kind(), other))),
        }
    }

    /// `if(<condition>)`: merge the body when the condition is truthy.
    ///
    /// A string body is interpolated only when the condition holds, and must
    /// produce a mapping.
    fn expand_if(
        &self,
        ctx: &Context<'_>,
        key: &str,
        entry: &Context<'_>,
        condition: &str,
        mode: EvalMode,
        out: &mut Map,
    ) -> EvalResult<()> {
        let taken = self.eval_expr(entry, condition)?.is_truthy();
        trace!(condition, taken, "if block");
        if !taken {
            return Ok(());
        }

        match entry.data() {
            Value::Map(map) => out.extend(self.evaluate_mapping(entry, map, mode)?),
            Value::Str(text) => {
                let resolved = self.evaluate_string(entry, text)?;
                let Value::Map(map) = &resolved else {
                    return Err(entry.error(non_mapping_body(BlockKind::If, &resolved)));
                };
                let body_ctx = ctx.child(Key::Name(key), &resolved);
                out.extend(self.evaluate_mapping(&body_ctx, map, mode)?);
            }
            other => return Err(entry.error(non_mapping_body(BlockKind::If, other))),
        }
        Ok(())
    }

    /// `for(<var> in <iterable>)`: merge one body per element, in order.
    ///
    /// Shallow mode emits a `with(<var>=<element>)` entry per element instead.
    fn expand_for(
        &self,
        entry: &Context<'_>,
        body_map: &Map,
        var: &str,
        iterable: &str,
        mode: EvalMode,
        out: &mut Map,
    ) -> EvalResult<()> {
        let target = self.eval_expr(entry, iterable)?;
        let Some(elements) = target.elements() else {
            return Err(entry.error(not_iterable(&target)));
        };

        let body = entry.data();
        let mut iterations = 0usize;
        for (index, element) in elements.enumerate() {
            iterations += 1;
            if mode.expands_loops() {
                let scope = Bindings::from_iter([(var.to_owned(), element)]);
                let iteration = entry.child_with_scope(Key::Index(index), body, scope);
                out.extend(self.evaluate_mapping(&iteration, body_map, mode)?);
            } else {
                out.insert(format!("with({var}={})", element.repr()), body.clone());
            }
        }
        debug!(var, iterations, ?mode, "for block");
        Ok(())
    }

    /// Interpolate a string value or key located at `ctx`.
    fn evaluate_string(&self, ctx: &Context<'_>, text: &str) -> EvalResult {
        interpolate(ctx, text, |source| self.eval_expr(ctx, source))
    }

    /// Run one expression against the scope chain visible at `ctx`.
    fn eval_expr(&self, ctx: &Context<'_>, source: &str) -> EvalResult {
        let scope = ctx.effective_scope(&self.globals);
        self.evaluator
            .evaluate(source, &scope)
            .map_err(|error| ctx.error(expression_failed(source, error)))
    }
}
