mod common;
use common::*;

use text_size::{TextRange, TextSize};

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

fn literal_text(part: &Expression) -> &str {
    match part {
        Expression::Token(token) => match &token.token.value {
            Some(TokenValue::String(text)) => text.as_str(),
            other => panic!("expected a string value, got {other:?}"),
        },
        other => panic!("expected a literal part, got {other:?}"),
    }
}

#[test]
fn test_literal_and_expression_parts() {
    // `let s = $"hi {1+2}!"`
    let ast = parse_ok(r#"let s = $"hi {1+2}!""#);
    let Statement::ImmutableVarDeclaration(decl) = first_statement(&ast) else {
        panic!("expected a let declaration");
    };
    let Expression::InterpolatedString(interp) = &decl.initializer else {
        panic!("expected an interpolated string");
    };
    assert_eq!(interp.parts.len(), 3);

    assert_eq!(literal_text(&interp.parts[0]), "hi ");
    assert_eq!(interp.parts[0].range(), range(10, 13));

    let Expression::Binary(sum) = &interp.parts[1] else {
        panic!("expected an expression part");
    };
    assert_eq!(sum.operation, BinaryOperation::Add);
    // Sub-token ranges point into the original source.
    assert_eq!(interp.parts[1].range(), range(14, 17));
    assert_eq!(sum.left.range(), range(14, 15));
    assert_eq!(sum.right.range(), range(16, 17));

    assert_eq!(literal_text(&interp.parts[2]), "!");
}

#[test]
fn test_adjacent_holes_produce_no_empty_literals() {
    let ast = parse_ok(r#"let s = $"{a}{b}""#);
    let Statement::ImmutableVarDeclaration(decl) = first_statement(&ast) else {
        panic!("expected a let declaration");
    };
    let Expression::InterpolatedString(interp) = &decl.initializer else {
        panic!("expected an interpolated string");
    };
    assert_eq!(interp.parts.len(), 2);
    assert!(matches!(&interp.parts[0], Expression::Token(t) if t.token.text == "a"));
}

#[test]
fn test_escaped_braces_stay_literal() {
    let ast = parse_ok(r#"let s = $"a\{b\}c""#);
    let Statement::ImmutableVarDeclaration(decl) = first_statement(&ast) else {
        panic!("expected a let declaration");
    };
    let Expression::InterpolatedString(interp) = &decl.initializer else {
        panic!("expected an interpolated string");
    };
    assert_eq!(interp.parts.len(), 1);
    assert_eq!(literal_text(&interp.parts[0]), "a{b}c");
}

#[test]
fn test_escapes_in_literal_parts_are_decoded() {
    let ast = parse_ok(r#"let s = $"a\n{x}""#);
    let Statement::ImmutableVarDeclaration(decl) = first_statement(&ast) else {
        panic!("expected a let declaration");
    };
    let Expression::InterpolatedString(interp) = &decl.initializer else {
        panic!("expected an interpolated string");
    };
    assert_eq!(literal_text(&interp.parts[0]), "a\n");
}

#[test]
fn test_nested_braces_in_holes() {
    let ast = parse_ok(r#"let s = $"{P{v = 1}}""#);
    let Statement::ImmutableVarDeclaration(decl) = first_statement(&ast) else {
        panic!("expected a let declaration");
    };
    let Expression::InterpolatedString(interp) = &decl.initializer else {
        panic!("expected an interpolated string");
    };
    assert_eq!(interp.parts.len(), 1);
    assert!(matches!(&interp.parts[0], Expression::Instantiation(_)));
}

#[test]
fn test_unterminated_hole_is_diagnosed() {
    let diagnostics = parse_err(r#"let s = $"hi {1+2""#);
    assert_diagnostic(&diagnostics, "unterminated expression");
}

#[test]
fn test_empty_hole_is_diagnosed() {
    let diagnostics = parse_err(r#"let s = $"a{}b""#);
    assert_diagnostic(&diagnostics, "empty expression");
}

#[test]
fn test_stray_closing_brace_is_diagnosed() {
    let diagnostics = parse_err(r#"let s = $"a}b""#);
    assert_diagnostic(&diagnostics, "unescaped '}'");
}

#[test]
fn test_bad_sub_expression_is_diagnosed() {
    let diagnostics = parse_err(r#"let s = $"{1+}""#);
    assert_diagnostic(&diagnostics, "expected expression");
}

#[test]
fn test_sub_expression_diagnostics_point_into_the_source() {
    // `let s = $"{ 1 < 2 < 3 }"` - the chaining diagnostic must carry the
    // original file position of the second `<`.
    let diagnostics = parse_err(r#"let s = $"{ 1 < 2 < 3 }""#);
    let chained = diagnostics
        .iter()
        .find(|d| d.message.contains("chained"))
        .expect("chaining diagnostic");
    assert_eq!(chained.line_col(), (1, 19));
}
