//! Stack growth for deeply nested templates.
//!
//! Template trees and expression sources are user data, so nesting depth is
//! unbounded. Every recursive descent in the workspace (tree evaluator,
//! expression parser, expression interpreter) wraps its recursive step in
//! [`ensure_sufficient_stack`] so a pathological input grows the stack
//! instead of aborting the process.
//!
//! On native targets this defers to `stacker`; on WASM it is a passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Depth of a right-nested chain, computed recursively.
    fn nested_depth(levels: &[u8]) -> usize {
        ensure_sufficient_stack(|| match levels.split_first() {
            None => 0,
            Some((_, rest)) => nested_depth(rest) + 1,
        })
    }

    #[test]
    fn test_passes_through_result() {
        let result: Result<&str, ()> = ensure_sufficient_stack(|| Ok("ok"));
        assert_eq!(result, Ok("ok"));
    }

    #[test]
    fn test_shallow_nesting() {
        assert_eq!(nested_depth(&[0; 16]), 16);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let levels = vec![0u8; 200_000];
        assert_eq!(nested_depth(&levels), 200_000);
    }
}
