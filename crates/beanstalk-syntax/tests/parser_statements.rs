mod common;
use common::*;

// Programs and modules

#[test]
fn test_module_entry_and_let() {
    let ast = parse_ok("module a.b\nentry(){ let x: i32 = 1 + 2 * 3 }");

    let module = ast.root.module.as_deref().expect("module statement");
    let Statement::Module(module) = module else {
        panic!("expected a module statement");
    };
    assert_eq!(module.name.text, "a.b");
    assert_eq!(module.name.segments.len(), 2);
    assert!(module.body.is_empty());

    let Statement::Entry(entry) = first_statement(&ast) else {
        panic!("expected an entry statement");
    };
    assert!(entry.parameters.is_empty());
    let Statement::Block(block) = entry.body.as_ref() else {
        panic!("expected a block body");
    };
    assert_eq!(block.statements.len(), 1);

    let Statement::ImmutableVarDeclaration(decl) = &block.statements[0] else {
        panic!("expected a let declaration");
    };
    assert!(matches!(decl.ty, Some(SyntaxType::Base(_))));
    let Expression::Binary(add) = &decl.initializer else {
        panic!("expected a binary initializer");
    };
    assert_eq!(add.operation, BinaryOperation::Add);
    let Expression::Binary(mul) = add.right.as_ref() else {
        panic!("expected a nested product");
    };
    assert_eq!(mul.operation, BinaryOperation::Multiply);
}

#[test]
fn test_program_range_spans_the_file() {
    let text = "module a.b\nentry(){ let x = 1 }";
    let ast = parse_ok(text);
    assert_eq!(u32::from(ast.root.range.end()), text.len() as u32);
    assert_eq!(u32::from(ast.root.range.start()), 0);
    let module = ast.root.module.as_deref().expect("module");
    assert!(ast.root.range.contains_range(module.range()));
    assert!(ast.root.range.contains_range(first_statement(&ast).range()));
}

#[test]
fn test_nested_module_requires_a_body() {
    let diagnostics = parse_err("module a\nmodule b");
    assert_diagnostic(&diagnostics, "requires a body");
}

#[test]
fn test_module_with_body() {
    let ast = parse_ok("module app { fun run() { } }");
    let Some(module) = ast.root.module.as_deref() else {
        panic!("expected a module");
    };
    let Statement::Module(module) = module else {
        panic!("expected a module statement");
    };
    assert_eq!(module.body.len(), 1);
}

// Variable declarations

#[test]
fn test_var_declaration_forms() {
    let ast = parse_ok("var a\nvar b: i32\nvar c = 1\nvar d: i32 = 2");
    assert_eq!(ast.root.statements.len(), 4);
    let Statement::MutableVarDeclaration(bare) = &ast.root.statements[0] else {
        panic!("expected a var declaration");
    };
    assert!(bare.ty.is_none() && bare.initializer.is_none());
    let Statement::MutableVarDeclaration(full) = &ast.root.statements[3] else {
        panic!("expected a var declaration");
    };
    assert!(full.ty.is_some() && full.initializer.is_some());
}

#[test]
fn test_let_requires_an_initializer() {
    let diagnostics = parse_err("let x: i32");
    assert_diagnostic(&diagnostics, "'let' declarations require an initializer");
}

#[test]
fn test_const_requires_an_initializer() {
    let diagnostics = parse_err("const x");
    assert_diagnostic(&diagnostics, "'const' declarations require an initializer");

    let ast = parse_ok("const limit: i32 = 10");
    assert!(matches!(
        first_statement(&ast),
        Statement::ConstVarDeclaration(_)
    ));
}

#[test]
fn test_define_statement() {
    let ast = parse_ok("def Id as i32");
    let Statement::Define(define) = first_statement(&ast) else {
        panic!("expected a define statement");
    };
    assert_eq!(define.identifier.text, "Id");
    assert!(matches!(define.ty, SyntaxType::Base(_)));
}

// Control flow

#[test]
fn test_if_else_chain() {
    let ast = parse_ok("entry() { if x < 10 { return 1 } else if y { return 2 } else { return 3 } }");
    let Statement::Entry(entry) = first_statement(&ast) else {
        panic!("expected entry");
    };
    let Statement::Block(block) = entry.body.as_ref() else {
        panic!("expected a block");
    };
    let Statement::If(first) = &block.statements[0] else {
        panic!("expected an if statement");
    };
    assert!(matches!(first.condition, Expression::Binary(_)));
    let Statement::If(second) = first.else_branch.as_deref().expect("else branch") else {
        panic!("expected a chained if");
    };
    assert!(second.else_branch.is_some());
}

#[test]
fn test_if_condition_does_not_eat_the_block_as_instantiation() {
    let ast = parse_ok("entry() { if ready { go() } }");
    let Statement::Entry(entry) = first_statement(&ast) else {
        panic!("expected entry");
    };
    let Statement::Block(block) = entry.body.as_ref() else {
        panic!("expected a block");
    };
    let Statement::If(cond) = &block.statements[0] else {
        panic!("expected an if statement");
    };
    assert!(matches!(cond.condition, Expression::Token(_)));
}

#[test]
fn test_return_with_and_without_value() {
    let ast = parse_ok("entry() { if done { return } return 42 }");
    let Statement::Entry(entry) = first_statement(&ast) else {
        panic!("expected entry");
    };
    let Statement::Block(block) = entry.body.as_ref() else {
        panic!("expected a block");
    };
    let Statement::Return(with_value) = &block.statements[1] else {
        panic!("expected a return statement");
    };
    assert!(with_value.expression.is_some());
}

// Functions

#[test]
fn test_function_declaration_shape() {
    let text = "fun add(a: i32, b: i32) -> i32 { return a + b }";
    let ast = parse_ok(text);
    let Statement::FunctionDeclaration(fun) = first_statement(&ast) else {
        panic!("expected a function declaration");
    };
    assert_eq!(fun.identifier.text, "add");
    assert!(fun.is_pure);
    assert!(!fun.is_static);
    assert_eq!(fun.parameters.len(), 2);
    let return_type = fun.return_type.as_ref().expect("return type");
    // The signature range stops at the return type; the full range covers
    // the body too.
    assert_eq!(fun.signature_range.start(), fun.range.start());
    assert_eq!(fun.signature_range.end(), return_type.range().end());
    assert!(u32::from(fun.range.end()) > u32::from(fun.signature_range.end()));
}

#[test]
fn test_impure_and_static_functions() {
    let ast = parse_ok("var fun log() { }\nstatic fun shared() => 1");
    let Statement::FunctionDeclaration(impure) = &ast.root.statements[0] else {
        panic!("expected a function declaration");
    };
    assert!(!impure.is_pure);

    let Statement::FunctionDeclaration(shared) = &ast.root.statements[1] else {
        panic!("expected a function declaration");
    };
    assert!(shared.is_static);
    assert!(matches!(shared.body.as_ref(), Statement::Expression(_)));
}

#[test]
fn test_function_type_parameters() {
    let ast = parse_ok("fun id[T](x: T) -> T => x");
    let Statement::FunctionDeclaration(fun) = first_statement(&ast) else {
        panic!("expected a function declaration");
    };
    assert_eq!(fun.type_parameters.len(), 1);
    assert_eq!(fun.type_parameters[0].text, "T");
}

#[test]
fn test_duplicate_function_modifier_is_diagnosed() {
    let diagnostics = parse_err("static static fun f() { }");
    assert_diagnostic(&diagnostics, "duplicate 'static' modifier");
}

#[test]
fn test_parameter_markers_round_trip() {
    let ast = parse_ok("fun f(...var xs: i32 = 1) => xs");
    let Statement::FunctionDeclaration(fun) = first_statement(&ast) else {
        panic!("expected a function declaration");
    };
    let parameter = &fun.parameters[0];
    assert!(parameter.is_variadic);
    assert!(parameter.is_mutable);
    assert_eq!(parameter.identifier.text, "xs");
    assert!(parameter.ty.is_some());
    assert!(parameter.default.is_some());
}

// Structs and interfaces

#[test]
fn test_struct_members() {
    let text = r#"
var struct Point {
    var x: i32 = 0
    y: f64
    static count: i32
    const frozen: bool
    fun length() -> f64 { return y }
    constructor(x: i32) { }
    destructor() { }
    string() -> string { return "point" }
    implicit cast (v: i32) -> Point { return v }
    operator (a: Point + b: Point) -> Point => a
}
"#;
    let ast = parse_ok(text);
    let Statement::StructDeclaration(decl) = first_statement(&ast) else {
        panic!("expected a struct declaration");
    };
    assert!(decl.is_mutable);
    assert_eq!(decl.identifier.text, "Point");
    assert_eq!(decl.members.len(), 10);

    let Statement::FieldDeclaration(x) = &decl.members[0] else {
        panic!("expected a field");
    };
    assert_eq!(x.mutability, Mutability::Mutable);
    assert!(x.initializer.is_some());

    let Statement::FieldDeclaration(y) = &decl.members[1] else {
        panic!("expected a field");
    };
    assert_eq!(y.mutability, Mutability::Immutable);
    assert!(!y.is_static);

    let Statement::FieldDeclaration(count) = &decl.members[2] else {
        panic!("expected a field");
    };
    assert!(count.is_static);

    let Statement::FieldDeclaration(frozen) = &decl.members[3] else {
        panic!("expected a field");
    };
    assert_eq!(frozen.mutability, Mutability::Constant);

    assert!(matches!(decl.members[4], Statement::FunctionDeclaration(_)));
    assert!(matches!(decl.members[5], Statement::ConstructorDeclaration(_)));
    assert!(matches!(decl.members[6], Statement::DestructorDeclaration(_)));
    assert!(matches!(decl.members[7], Statement::StringDeclaration(_)));

    let Statement::CastDeclaration(cast) = &decl.members[8] else {
        panic!("expected a cast declaration");
    };
    assert!(cast.is_implicit);

    assert!(matches!(decl.members[9], Statement::OperatorDeclaration(_)));
}

#[test]
fn test_field_modifier_conflicts() {
    let diagnostics = parse_err("struct S { var const x: i32 }");
    assert_diagnostic(&diagnostics, "'var' and 'const' are mutually exclusive");

    let diagnostics = parse_err("struct S { static static x: i32 }");
    assert_diagnostic(&diagnostics, "duplicate 'static' modifier");

    let diagnostics = parse_err("struct S { var var x: i32 }");
    assert_diagnostic(&diagnostics, "duplicate 'var' modifier");
}

#[test]
fn test_string_declaration_return_type_is_checked() {
    let diagnostics = parse_err(r#"struct S { string() -> i32 { return 1 } }"#);
    assert_diagnostic(&diagnostics, "must return 'string'");
}

#[test]
fn test_explicit_cast_declaration() {
    let ast = parse_ok("struct S { explicit cast (v: i32) -> S { return v } }");
    let Statement::StructDeclaration(decl) = first_statement(&ast) else {
        panic!("expected a struct");
    };
    let Statement::CastDeclaration(cast) = &decl.members[0] else {
        panic!("expected a cast declaration");
    };
    assert!(!cast.is_implicit);
    assert_eq!(cast.parameter.identifier.text, "v");
}

#[test]
fn test_interface_declaration() {
    let ast = parse_ok("interface Shape { fun area() -> f64 { return 0.0 } }");
    let Statement::InterfaceDeclaration(decl) = first_statement(&ast) else {
        panic!("expected an interface declaration");
    };
    assert_eq!(decl.identifier.text, "Shape");
    assert_eq!(decl.members.len(), 1);
}

#[test]
fn test_stray_semicolons_are_skipped() {
    let ast = parse_ok("let a = 1;\n;let b = 2;");
    assert_eq!(ast.root.statements.len(), 2);
}

#[test]
fn test_expression_statement() {
    let ast = parse_ok("entry() { total = total + 1 }");
    let Statement::Entry(entry) = first_statement(&ast) else {
        panic!("expected entry");
    };
    let Statement::Block(block) = entry.body.as_ref() else {
        panic!("expected a block");
    };
    let Statement::Expression(stmt) = &block.statements[0] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(stmt.expression, Expression::Assignment(_)));
}
