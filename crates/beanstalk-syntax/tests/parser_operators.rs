mod common;
use common::*;

fn operator_declaration(text: &str) -> OperatorDeclarationStatement {
    let ast = parse_ok(text);
    match first_statement(&ast) {
        Statement::OperatorDeclaration(decl) => decl.clone(),
        other => panic!("expected an operator declaration, got {other:?}"),
    }
}

#[test]
fn test_binary_operator_declaration() {
    let decl = operator_declaration("operator (var a: i32 + b: i32) -> i32 { return a + b }");
    let OperationExpression::Binary(binary) = &decl.operation else {
        panic!("expected a binary signature");
    };
    assert_eq!(binary.operation, BinaryOperation::Add);
    assert_eq!(binary.left.identifier.text, "a");
    assert!(binary.left.is_mutable);
    assert_eq!(binary.right.identifier.text, "b");
    assert!(!binary.right.is_mutable);
    assert!(matches!(decl.body.as_ref(), Statement::Block(_)));
}

#[test]
fn test_prefix_operator_declaration() {
    let decl = operator_declaration("operator (- v: i32) -> i32 => v");
    let OperationExpression::Unary(unary) = &decl.operation else {
        panic!("expected a unary signature");
    };
    assert_eq!(unary.operation, UnaryOperation::Negate);
    assert!(unary.is_prefix);
    assert_eq!(unary.operand.identifier.text, "v");
    assert!(matches!(decl.body.as_ref(), Statement::Expression(_)));
}

#[test]
fn test_postfix_operator_declaration() {
    let decl = operator_declaration("operator (v: i32 ++) -> i32 => v");
    let OperationExpression::Unary(unary) = &decl.operation else {
        panic!("expected a unary signature");
    };
    assert_eq!(unary.operation, UnaryOperation::PostIncrement);
    assert!(!unary.is_prefix);
}

#[test]
fn test_operator_declaration_inside_a_struct() {
    let ast = parse_ok("struct V { operator (a: V == b: V) -> bool => true }");
    let Statement::StructDeclaration(decl) = first_statement(&ast) else {
        panic!("expected a struct");
    };
    let Statement::OperatorDeclaration(op) = &decl.members[0] else {
        panic!("expected an operator declaration");
    };
    let OperationExpression::Binary(binary) = &op.operation else {
        panic!("expected a binary signature");
    };
    assert_eq!(binary.operation, BinaryOperation::Equals);
}

#[test]
fn test_await_cannot_be_overloaded() {
    let diagnostics = parse_err("operator (await v: i32) -> i32 => v");
    assert_diagnostic(&diagnostics, "'await' cannot be overloaded");
}

#[test]
fn test_operator_declaration_requires_an_operator() {
    let diagnostics = parse_err("operator (v: i32) -> i32 => v");
    assert_diagnostic(&diagnostics, "must contain an operator");
}

#[test]
fn test_nested_operators_are_rejected() {
    let diagnostics = parse_err("operator (a: i32 + b: i32 + c: i32) -> i32 => a");
    assert_diagnostic(&diagnostics, "cannot nest operators");
}

#[test]
fn test_range_operator_signature() {
    let decl = operator_declaration("operator (a: i32 .. b: i32) -> i32 => a");
    let OperationExpression::Binary(binary) = &decl.operation else {
        panic!("expected a binary signature");
    };
    assert_eq!(binary.operation, BinaryOperation::RangeExclusive);
}
