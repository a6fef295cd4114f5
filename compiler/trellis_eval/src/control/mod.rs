//! Control-key recognition.
//!
//! A mapping key is a control key when it has one of the shapes
//! `if(<expr>)`, `for(<var> in <expr>)` or `with(<var>=<expr>)`. Recognition
//! looks only at the prefix and the closing parenthesis; the header inside is
//! parsed separately so callers can validate the block's value first.
//!
//! A `for` header holds ` in ` exactly once, with the variable written
//! directly after `for(`. A `with` header splits at its first `=`, so the
//! bound expression may itself contain `==`; spaces before that `=` are
//! allowed.

use trellis_expr::is_bindable_name;

use crate::error::{malformed_block, BlockKind, TemplateErrorKind};

/// A parsed control-key header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKey<'a> {
    If { condition: &'a str },
    For { var: &'a str, iterable: &'a str },
    With { var: &'a str, expr: &'a str },
}

/// Classify `key`, returning the block kind and the text between the parentheses.
pub fn control_block(key: &str) -> Option<(BlockKind, &str)> {
    let (block, rest) = if let Some(rest) = key.strip_prefix("if(") {
        (BlockKind::If, rest)
    } else if let Some(rest) = key.strip_prefix("for(") {
        (BlockKind::For, rest)
    } else if let Some(rest) = key.strip_prefix("with(") {
        (BlockKind::With, rest)
    } else {
        return None;
    };
    rest.strip_suffix(')').map(|header| (block, header))
}

impl<'a> ControlKey<'a> {
    /// Parse the header of a block already classified by [`control_block`].
    pub fn parse(block: BlockKind, header: &'a str) -> Result<Self, TemplateErrorKind> {
        match block {
            BlockKind::If => Ok(ControlKey::If { condition: header }),
            BlockKind::For => {
                let Some((var, iterable)) = header.split_once(" in ") else {
                    return Err(malformed_block(
                        block,
                        format!("missing 'in' in `{header}`"),
                    ));
                };
                if iterable.contains(" in ") {
                    return Err(malformed_block(
                        block,
                        format!("'in' appears more than once in `{header}`"),
                    ));
                }
                let var = bound_variable(block, var)?;
                Ok(ControlKey::For { var, iterable })
            }
            BlockKind::With => {
                let Some((var, expr)) = header.split_once('=') else {
                    return Err(malformed_block(block, format!("missing '=' in `{header}`")));
                };
                let var = bound_variable(block, var.trim_end())?;
                Ok(ControlKey::With { var, expr })
            }
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            ControlKey::If { .. } => BlockKind::If,
            ControlKey::For { .. } => BlockKind::For,
            ControlKey::With { .. } => BlockKind::With,
        }
    }
}

fn bound_variable(block: BlockKind, var: &str) -> Result<&str, TemplateErrorKind> {
    if is_bindable_name(var) {
        Ok(var)
    } else {
        Err(malformed_block(
            block,
            format!("variable `{var}` is not an identifier"),
        ))
    }
}

#[cfg(test)]
mod tests;
