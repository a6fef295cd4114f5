//! Name resolution seam between expressions and their caller.
//!
//! The interpreter never owns variables. It asks a [`Lookup`] for each name
//! it meets, so a caller can present any chain of frames (innermost first)
//! without flattening it into one map.

use rustc_hash::FxHashMap;
use trellis_value::{Map, Value};

/// Read-only variable resolution.
pub trait Lookup {
    /// Resolve `name`, or `None` if it is not bound anywhere in this view.
    fn lookup(&self, name: &str) -> Option<&Value>;
}

impl Lookup for Map {
    #[inline]
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Lookup for FxHashMap<String, Value> {
    #[inline]
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// The empty scope.
impl Lookup for () {
    #[inline]
    fn lookup(&self, _name: &str) -> Option<&Value> {
        None
    }
}

impl<T: Lookup + ?Sized> Lookup for &T {
    #[inline]
    fn lookup(&self, name: &str) -> Option<&Value> {
        (**self).lookup(name)
    }
}
