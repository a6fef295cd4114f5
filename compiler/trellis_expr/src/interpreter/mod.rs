//! Tree-walking interpreter for the bounded expression grammar.
//!
//! Evaluation is a recursive walk over [`Expr`] against a caller-supplied
//! [`Lookup`]. The only callables are the builtins in [`crate::builtins`],
//! so an expression can compute over its inputs but never reach the host.

mod access;

use smallvec::SmallVec;
use trellis_stack::ensure_sufficient_stack;
use trellis_value::{Map, Value};

use crate::ast::Expr;
use crate::builtins::{call_function, call_method, is_builtin_function};
use crate::errors::{type_mismatch, undefined_function, undefined_variable};
use crate::operators::{evaluate_binary, evaluate_unary, EvalResult};
use crate::parser::parse;
use crate::scope::Lookup;
use crate::{Evaluate, ExprError};
use access::{attr_value, index_value, slice_value};

/// Call arguments; most builtin calls take at most four.
type Args = SmallVec<[Value; 4]>;

/// The default expression evaluator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Interpreter
    }

    /// Evaluate an already-parsed expression.
    pub fn eval(&self, expr: &Expr, scope: &dyn Lookup) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr, scope))
    }

    fn eval_inner(&self, expr: &Expr, scope: &dyn Lookup) -> EvalResult {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Name(name) => scope
                .lookup(name)
                .cloned()
                .ok_or_else(|| undefined_variable(name)),
            Expr::List(items) => items
                .iter()
                .map(|item| self.eval(item, scope))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Expr::Map(entries) => self.eval_map(entries, scope),
            Expr::Unary { op, operand } => evaluate_unary(&self.eval(operand, scope)?, *op),
            Expr::Binary { op, left, right } => {
                let left = self.eval(left, scope)?;
                let right = self.eval(right, scope)?;
                evaluate_binary(&left, &right, *op)
            }
            Expr::And(left, right) => {
                let left = self.eval(left, scope)?;
                if left.is_truthy() {
                    self.eval(right, scope)
                } else {
                    Ok(left)
                }
            }
            Expr::Or(left, right) => {
                let left = self.eval(left, scope)?;
                if left.is_truthy() {
                    Ok(left)
                } else {
                    self.eval(right, scope)
                }
            }
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => {
                if self.eval(cond, scope)?.is_truthy() {
                    self.eval(then, scope)
                } else {
                    self.eval(otherwise, scope)
                }
            }
            Expr::Attr { receiver, name } => attr_value(&self.eval(receiver, scope)?, name),
            Expr::Index { receiver, index } => {
                let receiver = self.eval(receiver, scope)?;
                let index = self.eval(index, scope)?;
                index_value(&receiver, &index)
            }
            Expr::Slice {
                receiver,
                start,
                end,
            } => {
                let receiver = self.eval(receiver, scope)?;
                let start = start.as_deref().map(|e| self.eval(e, scope)).transpose()?;
                let end = end.as_deref().map(|e| self.eval(e, scope)).transpose()?;
                slice_value(&receiver, start.as_ref(), end.as_ref())
            }
            Expr::Call { name, args } => self.eval_call(name, args, scope),
            Expr::MethodCall {
                receiver,
                method,
                args,
            } => {
                let receiver = self.eval(receiver, scope)?;
                let args = self.eval_args(args, scope)?;
                call_method(&receiver, method, &args)
            }
        }
    }

    fn eval_map(&self, entries: &[(Expr, Expr)], scope: &dyn Lookup) -> EvalResult {
        let mut map = Map::with_capacity(entries.len());
        for (key, value) in entries {
            let key = match self.eval(key, scope)? {
                Value::Str(s) => s,
                other => return Err(type_mismatch("str", other.type_name())),
            };
            let value = self.eval(value, scope)?;
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }

    fn eval_call(&self, name: &str, args: &[Expr], scope: &dyn Lookup) -> EvalResult {
        if !is_builtin_function(name) {
            return Err(undefined_function(name));
        }
        // `default(x, fallback)` also covers `x` being a bare unbound name.
        if let ("default", [value, fallback]) = (name, args) {
            let resolved = match value {
                Expr::Name(var) => scope.lookup(var).cloned().unwrap_or(Value::Null),
                _ => self.eval(value, scope)?,
            };
            return match resolved {
                Value::Null => self.eval(fallback, scope),
                other => Ok(other),
            };
        }
        let args = self.eval_args(args, scope)?;
        call_function(name, &args)
    }

    fn eval_args(&self, args: &[Expr], scope: &dyn Lookup) -> Result<Args, ExprError> {
        args.iter().map(|arg| self.eval(arg, scope)).collect()
    }
}

impl Evaluate for Interpreter {
    #[tracing::instrument(level = "trace", skip_all, fields(source = %source))]
    fn evaluate(&self, source: &str, scope: &dyn Lookup) -> Result<Value, ExprError> {
        let expr = parse(source)?;
        self.eval(&expr, scope)
    }
}
