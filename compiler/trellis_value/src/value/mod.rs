//! The `Value` tagged union.

use indexmap::IndexMap;

/// Ordered string-keyed mapping.
///
/// Insertion order is preserved. Re-inserting an existing key replaces the
/// value in place, keeping the key's original position.
pub type Map = IndexMap<String, Value>;

/// A node of a template or result tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating-point number. Never equal to an `Int` under `PartialEq`.
    Float(f64),
    /// Text.
    Str(String),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Ordered mapping with unique string keys.
    Map(Map),
}

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Create a sequence value.
    #[inline]
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Create a mapping value from key/value pairs, later keys overwriting earlier ones.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Get the type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Check if a value is truthy.
    ///
    /// Null, `false`, zero and empty containers are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
        }
    }

    /// Whether this value can be spliced into text (not a list or map).
    #[inline]
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Map(_))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as a float, promoting integers.
    #[expect(
        clippy::cast_precision_loss,
        reason = "int to float promotion follows the expression language's mixed-arithmetic rule"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Iterate the elements a loop over this value visits.
    ///
    /// Lists yield their items, maps their keys, strings one-character
    /// strings. Scalars other than strings are not iterable and yield `None`.
    pub fn elements(&self) -> Option<Elements<'_>> {
        match self {
            Value::List(items) => Some(Elements::Items(items.iter())),
            Value::Map(map) => Some(Elements::Keys(map.keys())),
            Value::Str(s) => Some(Elements::Chars(s.chars())),
            _ => None,
        }
    }
}

/// Iterator returned by [`Value::elements`].
#[derive(Clone, Debug)]
pub enum Elements<'a> {
    Items(std::slice::Iter<'a, Value>),
    Keys(indexmap::map::Keys<'a, String, Value>),
    Chars(std::str::Chars<'a>),
}

impl Iterator for Elements<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            Elements::Items(iter) => iter.next().cloned(),
            Elements::Keys(iter) => iter.next().map(|k| Value::Str(k.clone())),
            Elements::Chars(iter) => iter.next().map(|c| Value::Str(c.to_string())),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Elements::Items(iter) => iter.size_hint(),
            Elements::Keys(iter) => iter.size_hint(),
            Elements::Chars(iter) => iter.size_hint(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<usize> for Value {
    /// Saturates at `i64::MAX`.
    fn from(n: usize) -> Self {
        Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
