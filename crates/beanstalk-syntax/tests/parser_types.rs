mod common;
use common::*;

#[test]
fn test_base_types() {
    assert!(matches!(parse_type("i32"), SyntaxType::Base(_)));
    assert!(matches!(parse_type("string"), SyntaxType::Base(_)));
    assert!(matches!(parse_type("MyStruct"), SyntaxType::Base(_)));
}

#[test]
fn test_parenthesized_single_type_unwraps() {
    assert!(matches!(parse_type("(i32)"), SyntaxType::Base(_)));
}

#[test]
fn test_tuple_type() {
    let SyntaxType::Tuple(tuple) = parse_type("(i32, bool, f64)") else {
        panic!("expected a tuple type");
    };
    assert_eq!(tuple.components.len(), 3);
}

#[test]
fn test_unsized_array() {
    let SyntaxType::Array(array) = parse_type("i32[]") else {
        panic!("expected an array type");
    };
    assert!(array.size.is_none());
    assert!(matches!(array.base.as_ref(), SyntaxType::Base(_)));
}

#[test]
fn test_sized_array_with_literal() {
    let SyntaxType::Array(array) = parse_type("i32[8]") else {
        panic!("expected an array type");
    };
    assert!(array.size.is_some());
}

#[test]
fn test_sized_array_with_expression() {
    let SyntaxType::Array(array) = parse_type("i32[2 + 3]") else {
        panic!("expected an array type");
    };
    let size = array.size.as_deref().expect("size expression");
    assert!(matches!(size, Expression::Binary(_)));
}

#[test]
fn test_generic_type() {
    let SyntaxType::Generic(generic) = parse_type("Map[string, i32]") else {
        panic!("expected a generic type");
    };
    assert_eq!(generic.arguments.len(), 2);
    assert!(matches!(generic.base.as_ref(), SyntaxType::Base(_)));
}

#[test]
fn test_type_argument_wins_over_sized_array() {
    // `T[U]` parses as a generic application; only a failed type-argument
    // list falls back to the sized-array form.
    assert!(matches!(parse_type("T[U]"), SyntaxType::Generic(_)));
}

#[test]
fn test_nullable_type() {
    let SyntaxType::Nullable(nullable) = parse_type("i32?") else {
        panic!("expected a nullable type");
    };
    assert!(matches!(nullable.base.as_ref(), SyntaxType::Base(_)));
}

#[test]
fn test_nullable_array_stacks() {
    let SyntaxType::Nullable(nullable) = parse_type("i32[]?") else {
        panic!("expected a nullable type");
    };
    assert!(matches!(nullable.base.as_ref(), SyntaxType::Array(_)));
}

#[test]
fn test_mutable_type() {
    let SyntaxType::Mutable(mutable) = parse_type("var i32") else {
        panic!("expected a mutable type");
    };
    assert!(matches!(mutable.base.as_ref(), SyntaxType::Base(_)));
}

#[test]
fn test_reference_types() {
    let SyntaxType::Reference(immutable) = parse_type("ref i32") else {
        panic!("expected a reference type");
    };
    assert!(immutable.immutable);

    let SyntaxType::Reference(mutable) = parse_type("var ref i32") else {
        panic!("expected a reference type");
    };
    assert!(!mutable.immutable);
}

#[test]
fn test_lambda_type() {
    let SyntaxType::Lambda(lambda) = parse_type("fun(i32, i32) -> i32") else {
        panic!("expected a lambda type");
    };
    assert_eq!(lambda.parameters.len(), 2);
    assert!(lambda.return_type.is_some());

    let SyntaxType::Lambda(void) = parse_type("fun()") else {
        panic!("expected a lambda type");
    };
    assert!(void.parameters.is_empty());
    assert!(void.return_type.is_none());
}

#[test]
fn test_type_ranges_nest() {
    let ty = parse_type("Map[string, i32]?");
    let SyntaxType::Nullable(nullable) = &ty else {
        panic!("expected a nullable type");
    };
    assert!(ty.range().contains_range(nullable.base.range()));
}
