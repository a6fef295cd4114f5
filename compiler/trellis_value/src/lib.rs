//! Trellis Value - the value tree shared by templates and results.
//!
//! A template is a tree of mappings, sequences and scalars; evaluating it
//! produces another tree of the same type. This crate has no knowledge of
//! control keys or interpolation markers, it only models data.
//!
//! # Text forms
//!
//! Every value has two textual forms:
//! - `Display`: the canonical text used when a value is spliced into a
//!   larger string (`null`, `true`, `2`, `2.5`, `abc`).
//! - [`Value::repr`]: expression-literal source that the trellis expression
//!   grammar reads back into an equal value (`None`, `True`, `'abc'`).

mod format;
mod value;

pub use value::{Elements, Map, Value};
