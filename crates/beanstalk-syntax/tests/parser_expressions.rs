mod common;
use common::*;

use beanstalk_syntax::TokenKind;
use text_size::{TextRange, TextSize};

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

// Precedence and associativity

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let Expression::Binary(add) = parse_expr("1 + 2 * 3") else {
        panic!("expected a binary expression");
    };
    assert_eq!(add.operation, BinaryOperation::Add);
    let Expression::Binary(mul) = add.right.as_ref() else {
        panic!("expected the right operand to be a product");
    };
    assert_eq!(mul.operation, BinaryOperation::Multiply);
}

#[test]
fn test_power_is_right_associative() {
    let Expression::Binary(outer) = parse_expr("2 ** 3 ** 2") else {
        panic!("expected a binary expression");
    };
    assert_eq!(outer.operation, BinaryOperation::Power);
    let Expression::Binary(inner) = outer.right.as_ref() else {
        panic!("expected the right operand to be a power");
    };
    assert_eq!(inner.operation, BinaryOperation::Power);
}

#[test]
fn test_null_coalesce_binds_loosest() {
    let Expression::Binary(outer) = parse_expr("a ?? b == c") else {
        panic!("expected a binary expression");
    };
    assert_eq!(outer.operation, BinaryOperation::NullCoalescence);
    let Expression::Binary(inner) = outer.right.as_ref() else {
        panic!("expected the right operand to be a comparison");
    };
    assert_eq!(inner.operation, BinaryOperation::Equals);
}

#[test]
fn test_shift_and_rotate_share_a_level() {
    let Expression::Binary(outer) = parse_expr("a <<< b << c") else {
        panic!("expected a binary expression");
    };
    assert_eq!(outer.operation, BinaryOperation::ShiftLeft);
    let Expression::Binary(inner) = outer.left.as_ref() else {
        panic!("expected left-associative grouping");
    };
    assert_eq!(inner.operation, BinaryOperation::RotateLeft);
}

#[test]
fn test_range_binds_tighter_than_addition() {
    let Expression::Binary(add) = parse_expr("a + b .. c") else {
        panic!("expected a binary expression");
    };
    assert_eq!(add.operation, BinaryOperation::Add);
    let Expression::Binary(spread) = add.right.as_ref() else {
        panic!("expected the right operand to be a range");
    };
    assert_eq!(spread.operation, BinaryOperation::RangeExclusive);
}

#[test]
fn test_inclusive_range() {
    let Expression::Binary(spread) = parse_expr("1 ..= 5") else {
        panic!("expected a binary expression");
    };
    assert_eq!(spread.operation, BinaryOperation::RangeInclusive);
}

#[test]
fn test_relational_chaining_is_rejected() {
    let diagnostics = parse_err("let x = a < b < c");
    assert_diagnostic(&diagnostics, "comparison operators cannot be chained");
    let chained = diagnostics
        .iter()
        .find(|d| d.message.contains("chained"))
        .expect("chaining diagnostic");
    // The diagnostic points at the second `<`.
    assert_eq!(chained.line_col(), (1, 15));
}

#[test]
fn test_assignment_is_right_associative() {
    let Expression::Assignment(outer) = parse_expr("a = b = c") else {
        panic!("expected an assignment");
    };
    let Expression::Assignment(_) = outer.value.as_ref() else {
        panic!("expected the value to be a nested assignment");
    };
}

#[test]
fn test_conditional_with_and_without_else() {
    let Expression::Conditional(full) = parse_expr("a ? b : c") else {
        panic!("expected a conditional");
    };
    assert!(full.else_branch.is_some());

    let Expression::Conditional(short) = parse_expr("a ? b") else {
        panic!("expected a conditional");
    };
    assert!(short.else_branch.is_none());
}

// Prefix operators and literal folding

#[test]
fn test_negated_literal_folds_into_the_token() {
    let expr = parse_expr("-5");
    let Expression::Token(token) = &expr else {
        panic!("expected a folded literal, got {expr:?}");
    };
    assert_eq!(token.token.value, Some(TokenValue::I64(-5)));
    // `let x = -5`: the folded token covers both the sign and the digits.
    assert_eq!(expr.range(), range(8, 10));
    assert_eq!(token.token.text, "-5");
}

#[test]
fn test_identity_leaves_the_literal_untouched() {
    let expr = parse_expr("+5");
    let Expression::Token(token) = &expr else {
        panic!("expected a literal, got {expr:?}");
    };
    assert_eq!(token.token.value, Some(TokenValue::I64(5)));
    assert_eq!(expr.range(), range(9, 10));
}

#[test]
fn test_bitwise_not_folds_any_integer_width() {
    let Expression::Token(token) = parse_expr("~0u8") else {
        panic!("expected a folded literal");
    };
    assert_eq!(token.token.value, Some(TokenValue::U8(255)));
}

#[test]
fn test_logical_not_folds_booleans() {
    let Expression::Token(token) = parse_expr("!true") else {
        panic!("expected a folded literal");
    };
    assert_eq!(token.token.value, Some(TokenValue::Bool(false)));
}

#[test]
fn test_negated_float_stays_a_unary_expression() {
    let Expression::Unary(unary) = parse_expr("-1.5") else {
        panic!("expected a unary expression");
    };
    assert_eq!(unary.operation, UnaryOperation::Negate);
    assert!(unary.is_prefix);
}

#[test]
fn test_increment_operators() {
    let Expression::Unary(prefix) = parse_expr("++a") else {
        panic!("expected a unary expression");
    };
    assert_eq!(prefix.operation, UnaryOperation::PreIncrement);
    assert!(prefix.is_prefix);

    let Expression::Unary(postfix) = parse_expr("a--") else {
        panic!("expected a unary expression");
    };
    assert_eq!(postfix.operation, UnaryOperation::PostDecrement);
    assert!(!postfix.is_prefix);
}

#[test]
fn test_await_is_a_prefix_operator() {
    let Expression::Unary(unary) = parse_expr("await x") else {
        panic!("expected a unary expression");
    };
    assert_eq!(unary.operation, UnaryOperation::Await);
}

// Postfix chain

#[test]
fn test_method_call_after_call_is_allowed() {
    let Expression::FunctionCall(outer) = parse_expr("f(1, 2).g(3)") else {
        panic!("expected a call");
    };
    assert_eq!(outer.arguments.len(), 1);
    let Expression::Access(access) = outer.callee.as_ref() else {
        panic!("expected the callee to be an access");
    };
    assert_eq!(access.member.text, "g");
    assert!(matches!(access.source.as_ref(), Expression::FunctionCall(_)));
}

#[test]
fn test_direct_double_call_is_not_consumed() {
    // Without a `.` step the second argument list is no longer part of the
    // chain; it parses as a separate parenthesized statement.
    let ast = parse_ok("let x = f()(1)");
    let Expression::FunctionCall(call) = let_initializer(&ast) else {
        panic!("expected the initializer to be a single call");
    };
    assert!(call.arguments.is_empty());
    assert_eq!(ast.root.statements.len(), 2);
}

#[test]
fn test_cast_terminates_the_chain() {
    let Expression::Cast(cast) = parse_expr("x.y :: i32") else {
        panic!("expected a cast");
    };
    assert!(matches!(cast.operand.as_ref(), Expression::Access(_)));
    assert!(matches!(cast.target, SyntaxType::Base(_)));
}

#[test]
fn test_null_checked_access_and_index() {
    let Expression::Access(access) = parse_expr("a?.b") else {
        panic!("expected an access");
    };
    assert!(access.null_checked);

    let Expression::Index(index) = parse_expr("a?[0]") else {
        panic!("expected an index");
    };
    assert!(index.null_checked);

    let Expression::Index(plain) = parse_expr("arr[0]") else {
        panic!("expected an index");
    };
    assert!(!plain.null_checked);
}

#[test]
fn test_generic_argument_list_commits_to_type_syntax() {
    let Expression::Type(SyntaxType::Generic(generic)) = parse_expr("Map[i32, i32]") else {
        panic!("expected a generic type expression");
    };
    assert_eq!(generic.arguments.len(), 2);
}

#[test]
fn test_instantiation_with_fields() {
    let Expression::Instantiation(init) = parse_expr("Point{x = 1, y = 2}") else {
        panic!("expected an instantiation");
    };
    assert!(matches!(init.ty, SyntaxType::Base(_)));
    assert_eq!(init.fields.len(), 2);
    assert_eq!(init.fields[0].name.text, "x");
}

#[test]
fn test_generic_instantiation() {
    let Expression::Instantiation(init) = parse_expr("Box[i32]{value = 1}") else {
        panic!("expected an instantiation");
    };
    let SyntaxType::Generic(generic) = &init.ty else {
        panic!("expected a generic instantiation type");
    };
    assert_eq!(generic.arguments.len(), 1);
}

#[test]
fn test_duplicate_instantiation_field_is_diagnosed() {
    let diagnostics = parse_err("let x = P{a = 1, a = 2}");
    assert_diagnostic(&diagnostics, "duplicate field 'a'");
}

// Collections

#[test]
fn test_list_literal() {
    let Expression::List(list) = parse_expr("[1, 2, 3]") else {
        panic!("expected a list");
    };
    assert_eq!(list.elements.len(), 3);
    assert!(list.element_type.is_none());
}

#[test]
fn test_list_with_element_type() {
    let Expression::List(list) = parse_expr("[1, 2 : i32]") else {
        panic!("expected a list");
    };
    assert_eq!(list.elements.len(), 2);
    assert!(matches!(list.element_type, Some(SyntaxType::Base(_))));
}

#[test]
fn test_empty_list() {
    let Expression::List(list) = parse_expr("[]") else {
        panic!("expected a list");
    };
    assert!(list.elements.is_empty());
}

#[test]
fn test_map_literal() {
    let Expression::Map(map) = parse_expr(r#"["a" => 1, "b" => 2]"#) else {
        panic!("expected a map");
    };
    assert_eq!(map.entries.len(), 2);
}

#[test]
fn test_map_with_identifier_keys() {
    // An identifier key followed by `=>` is a map entry, not a lambda.
    let Expression::Map(map) = parse_expr("[x => y]") else {
        panic!("expected a map");
    };
    assert_eq!(map.entries.len(), 1);
}

#[test]
fn test_map_with_pair_annotation() {
    let Expression::Map(map) = parse_expr("[1 => 2 : (i32, i32)]") else {
        panic!("expected a map");
    };
    assert!(matches!(map.entry_type, Some(SyntaxType::Tuple(_))));
}

#[test]
fn test_map_annotation_must_be_a_pair() {
    let diagnostics = parse_err("let x = [1 => 2 : i32]");
    assert_diagnostic(&diagnostics, "tuple of exactly two types");
}

#[test]
fn test_tuple_and_unwrapped_parens() {
    let Expression::Tuple(tuple) = parse_expr("(a, b)") else {
        panic!("expected a tuple");
    };
    assert_eq!(tuple.elements.len(), 2);

    // A single parenthesized expression is not a tuple.
    let unwrapped = parse_expr("(a)");
    assert!(matches!(unwrapped, Expression::Token(_)));
}

// Lambdas

#[test]
fn test_lambda_with_block_body() {
    let Expression::Lambda(lambda) = parse_expr("(n: i32) { return n }") else {
        panic!("expected a lambda");
    };
    assert_eq!(lambda.parameters.len(), 1);
    assert!(matches!(lambda.body.as_ref(), Statement::Block(_)));
}

#[test]
fn test_lambda_with_expression_body_and_return_type() {
    let Expression::Lambda(lambda) = parse_expr("(a: i32, b: i32) -> i32 => a + b") else {
        panic!("expected a lambda");
    };
    assert_eq!(lambda.parameters.len(), 2);
    assert!(lambda.return_type.is_some());
    assert!(matches!(lambda.body.as_ref(), Statement::Expression(_)));
}

#[test]
fn test_single_identifier_lambda() {
    let Expression::Lambda(lambda) = parse_expr("x => x") else {
        panic!("expected a lambda");
    };
    assert_eq!(lambda.parameters.len(), 1);
    assert!(lambda.parameters[0].ty.is_none());
}

#[test]
fn test_failed_lambda_attempt_leaves_no_trace() {
    // `(a, b)` walks into the lambda attempt and rewinds cleanly; any
    // leaked diagnostic would fail parse_ok.
    let ast = parse_ok("let t = (a, b)");
    match first_statement(&ast) {
        Statement::ImmutableVarDeclaration(decl) => {
            assert!(matches!(decl.initializer, Expression::Tuple(_)));
        }
        other => panic!("expected a let declaration, got {other:?}"),
    }
}

// Type tests in expressions

#[test]
fn test_is_and_as_take_types() {
    let Expression::Binary(is) = parse_expr("x is i32") else {
        panic!("expected a binary expression");
    };
    assert_eq!(is.operation, BinaryOperation::Is);
    assert!(matches!(is.right.as_ref(), Expression::Type(_)));

    let Expression::Binary(cast) = parse_expr("x as MyType") else {
        panic!("expected a binary expression");
    };
    assert_eq!(cast.operation, BinaryOperation::As);
}

#[test]
fn test_switch_and_with_are_shells() {
    assert!(matches!(parse_expr("switch"), Expression::Switch(_)));
    assert!(matches!(parse_expr("with"), Expression::With(_)));
}

#[test]
fn test_both_spellings_of_logical_operators_share_tags() {
    for (text, operation) in [
        ("a | b", BinaryOperation::Or),
        ("a || b", BinaryOperation::Or),
        ("a ^ b", BinaryOperation::Xor),
        ("a ^^ b", BinaryOperation::Xor),
        ("a & b", BinaryOperation::And),
        ("a && b", BinaryOperation::And),
        ("a %% b", BinaryOperation::PositiveModulo),
        ("a % b", BinaryOperation::Modulo),
    ] {
        let Expression::Binary(binary) = parse_expr(text) else {
            panic!("expected a binary expression for {text:?}");
        };
        assert_eq!(binary.operation, operation, "for {text:?}");
    }
}

#[test]
fn test_expression_ranges_nest() {
    // `let x = 1 + 2 * 3`
    let expr = parse_expr("1 + 2 * 3");
    let Expression::Binary(add) = &expr else {
        panic!("expected a binary expression");
    };
    let parent = expr.range();
    assert!(parent.contains_range(add.left.range()));
    assert!(parent.contains_range(add.right.range()));
    // Sibling ranges do not overlap.
    assert!(add.left.range().end() <= add.right.range().start());
}

#[test]
fn test_name_token_helper() {
    let expr = parse_expr("value");
    let token = expr.as_name_token().expect("bare identifier");
    assert_eq!(token.kind, TokenKind::Ident);
    assert_eq!(token.text, "value");
}
