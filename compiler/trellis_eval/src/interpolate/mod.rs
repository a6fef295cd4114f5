//! `${{ expr }}` interpolation in string values and keys.
//!
//! A string that starts with `${{` and ends with `}}` is a whole-string
//! marker: everything between the outer delimiters is one expression, and
//! the raw result replaces the string, keeping its type. Otherwise every
//! marker is located leftmost-first (each ends at the nearest `}}`) and
//! replaced by the canonical text of its result; `null` becomes the empty
//! string and lists or maps are rejected.

use trellis_value::Value;

use crate::context::Context;
use crate::error::{non_scalar_interpolation, TemplateError};

const OPEN: &str = "${{";
const CLOSE: &str = "}}";

/// One marker found in a string, as byte offsets into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Marker {
    /// Offset of `${{`.
    pub start: usize,
    /// Offset just past `}}`.
    pub end: usize,
}

impl Marker {
    /// The expression source between the delimiters.
    pub fn inner(self, text: &str) -> &str {
        &text[self.start + OPEN.len()..self.end - CLOSE.len()]
    }
}

/// Locate the first marker at or after `from`.
///
/// The expression text must be at least one character long, so `${{}}` is
/// not a marker but `${{}}}` is one whose expression is `}`.
pub fn find_marker(text: &str, from: usize) -> Option<Marker> {
    let start = from + text.get(from..)?.find(OPEN)?;
    let body = start + OPEN.len();
    let first = text[body..].chars().next()?;
    let search = body + first.len_utf8();
    let close = search + text[search..].find(CLOSE)?;
    Some(Marker {
        start,
        end: close + CLOSE.len(),
    })
}

/// The expression of a whole-string marker.
///
/// The expression runs from just after the leading `${{` to just before the
/// trailing `}}`, so it may itself contain `}}`. Returns `None` when the
/// string lacks either delimiter or the expression is empty.
pub fn whole_marker(text: &str) -> Option<&str> {
    let inner = text.strip_prefix(OPEN)?.strip_suffix(CLOSE)?;
    (!inner.is_empty()).then_some(inner)
}

/// Resolve the markers in `text`, located at `ctx`.
///
/// `eval` runs one expression source; errors from it pass through unchanged.
pub fn interpolate<F>(ctx: &Context<'_>, text: &str, mut eval: F) -> Result<Value, TemplateError>
where
    F: FnMut(&str) -> Result<Value, TemplateError>,
{
    if let Some(source) = whole_marker(text) {
        return eval(source);
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(marker) = find_marker(text, pos) {
        out.push_str(&text[pos..marker.start]);
        match eval(marker.inner(text))? {
            Value::Null => {}
            Value::Str(s) => out.push_str(&s),
            value if value.is_scalar() => out.push_str(&value.to_string()),
            value => return Err(ctx.error(non_scalar_interpolation(&value))),
        }
        pos = marker.end;
    }
    out.push_str(&text[pos..]);
    Ok(Value::Str(out))
}
