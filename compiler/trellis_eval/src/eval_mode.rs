//! Evaluation modes for the template engine.
//!
//! `Full` expands the whole tree in one pass. `Shallow` resolves only the
//! current level so a caller can preview one step of expansion: control keys
//! and key interpolation at this level are resolved, string values are
//! interpolated, and every other value is copied through untouched. In
//! shallow mode a `for` block is not expanded; instead it emits one
//! `with(<var>=<element>)` entry per element holding the unevaluated body,
//! which a later full pass expands.

/// Evaluation mode; determines how far the evaluator recurses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Expand the entire tree.
    #[default]
    Full,
    /// Expand only the current level.
    Shallow,
}

impl EvalMode {
    /// Whether values under ordinary keys are evaluated recursively.
    #[inline]
    pub fn recurses(self) -> bool {
        matches!(self, Self::Full)
    }

    /// Whether `for` blocks expand their iterations in place.
    #[inline]
    pub fn expands_loops(self) -> bool {
        matches!(self, Self::Full)
    }
}

#[cfg(test)]
mod tests;
