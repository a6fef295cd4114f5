//! Trellis Eval - structured template evaluation.
//!
//! A template is a [`Value`] tree in which some mapping keys are control
//! keys and some strings embed `${{ expr }}` markers. [`Engine::evaluate`]
//! turns it into a plain tree of the same kind:
//!
//! - `if(<expr>)` merges its mapping when the condition is truthy
//! - `for(<var> in <expr>)` merges its mapping once per element, binding `<var>`
//! - `with(<var>=<expr>)` merges its mapping with `<var>` bound once
//! - a string that is exactly `${{ expr }}` becomes the expression's value
//! - other strings, and keys, have each marker replaced by its text
//!
//! Errors carry a trace path (`$.servers.0.'for(p in ports)'.0.name`) naming
//! the node that failed.
//!
//! ```
//! use trellis_eval::Engine;
//! use trellis_value::Value;
//!
//! let template = Value::map([(
//!     "for(i in range(2))",
//!     Value::map([("key${{ i }}", Value::string("${{ i * 10 }}"))]),
//! )]);
//! let result = Engine::default().evaluate(&template).unwrap();
//! assert_eq!(
//!     result,
//!     Value::map([("key0", Value::Int(0)), ("key1", Value::Int(10))])
//! );
//! ```

pub mod context;
pub mod control;
pub mod engine;
pub mod error;
pub mod eval_mode;
pub mod interpolate;

pub use context::{Bindings, Context, Key, ScopeChain};
pub use engine::Engine;
pub use error::{BlockKind, TemplateError, TemplateErrorKind};
pub use eval_mode::EvalMode;

pub use trellis_expr::{Evaluate, ExprError, Interpreter, Lookup};
pub use trellis_value::{Map, Value};
