use super::*;
use pretty_assertions::assert_eq;

fn parse(key: &str) -> Result<ControlKey<'_>, TemplateErrorKind> {
    let (block, header) = control_block(key).unwrap_or_else(|| panic!("not a control key: {key}"));
    ControlKey::parse(block, header)
}

#[test]
fn test_ordinary_keys_are_not_control() {
    for key in ["name", "if", "if(x", "iffy(x)", "for x in y", "", "With(x=1)"] {
        assert_eq!(control_block(key), None, "{key}");
    }
}

#[test]
fn test_classification() {
    assert_eq!(control_block("if(True)"), Some((BlockKind::If, "True")));
    assert_eq!(control_block("for(i in xs)"), Some((BlockKind::For, "i in xs")));
    assert_eq!(control_block("with(x=1)"), Some((BlockKind::With, "x=1")));
    assert_eq!(control_block("if()"), Some((BlockKind::If, "")));
}

#[test]
fn test_if_header() {
    assert_eq!(
        parse("if(a and (b or c))"),
        Ok(ControlKey::If {
            condition: "a and (b or c)"
        })
    );
}

#[test]
fn test_for_header() {
    assert_eq!(
        parse("for(item in range(3))"),
        Ok(ControlKey::For {
            var: "item",
            iterable: "range(3)"
        })
    );
    assert_eq!(
        parse("for(x in  xs )"),
        Ok(ControlKey::For {
            var: "x",
            iterable: " xs "
        })
    );
}

#[test]
fn test_for_header_is_strict() {
    assert_eq!(
        parse("for( i in xs)"),
        Err(malformed_block(BlockKind::For, "variable ` i` is not an identifier"))
    );
    assert_eq!(
        parse("for(x in a if y in b else c)"),
        Err(malformed_block(
            BlockKind::For,
            "'in' appears more than once in `x in a if y in b else c`"
        ))
    );
}

#[test]
fn test_with_header() {
    assert_eq!(
        parse("with(total = a == b)"),
        Ok(ControlKey::With {
            var: "total",
            expr: " a == b"
        })
    );
}

#[test]
fn test_malformed_headers() {
    assert_eq!(
        parse("for(i from xs)"),
        Err(malformed_block(BlockKind::For, "missing 'in' in `i from xs`"))
    );
    assert_eq!(
        parse("for(1x in xs)"),
        Err(malformed_block(BlockKind::For, "variable `1x` is not an identifier"))
    );
    assert_eq!(
        parse("for(in in xs)"),
        Err(malformed_block(BlockKind::For, "variable `in` is not an identifier"))
    );
    assert_eq!(
        parse("with(x)"),
        Err(malformed_block(BlockKind::With, "missing '=' in `x`"))
    );
    assert_eq!(
        parse("with(a.b=1)"),
        Err(malformed_block(BlockKind::With, "variable `a.b` is not an identifier"))
    );
    assert_eq!(
        parse("with( x=1)"),
        Err(malformed_block(BlockKind::With, "variable ` x` is not an identifier"))
    );
}

#[test]
fn test_kind() {
    assert_eq!(parse("with(x=1)").map(|k| k.kind()), Ok(BlockKind::With));
}
