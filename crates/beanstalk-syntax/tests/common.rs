//! Shared helpers for parser integration tests.
#![allow(dead_code)]

pub use beanstalk_syntax::ast::*;
pub use beanstalk_syntax::{parse_source, Ast, Diagnostic, SourceText, TokenValue};

/// Parses a source string.
pub fn parse_text(text: &str) -> (Option<Ast>, Vec<Diagnostic>) {
    let source = SourceText::new(text);
    parse_source(&source)
}

/// Parses a source string that must produce a tree and no diagnostics.
pub fn parse_ok(text: &str) -> Ast {
    let (ast, diagnostics) = parse_text(text);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics for {text:?}:\n{diagnostics:#?}"
    );
    ast.expect("expected an AST")
}

/// Parses a source string that must fail, returning its diagnostics.
pub fn parse_err(text: &str) -> Vec<Diagnostic> {
    let (ast, diagnostics) = parse_text(text);
    assert!(ast.is_none(), "expected a failed parse for {text:?}");
    assert!(!diagnostics.is_empty(), "failed parse with no diagnostics");
    diagnostics
}

/// Asserts that some diagnostic message contains `needle`.
pub fn assert_diagnostic(diagnostics: &[Diagnostic], needle: &str) {
    assert!(
        diagnostics.iter().any(|d| d.message.contains(needle)),
        "no diagnostic mentions {needle:?}:\n{diagnostics:#?}"
    );
}

/// The first top-level statement of a tree.
pub fn first_statement(ast: &Ast) -> &Statement {
    ast.root.statements.first().expect("expected a statement")
}

/// The initializer of a leading `let` declaration.
pub fn let_initializer(ast: &Ast) -> &Expression {
    match first_statement(ast) {
        Statement::ImmutableVarDeclaration(decl) => &decl.initializer,
        other => panic!("expected a let declaration, got {other:?}"),
    }
}

/// Parses `text` as the initializer of a `let` declaration.
///
/// Ranges inside the returned expression are offset by 8 bytes for the
/// `"let x = "` prefix.
pub fn parse_expr(text: &str) -> Expression {
    let ast = parse_ok(&format!("let x = {text}"));
    let_initializer(&ast).clone()
}

/// The declared type of a leading `var` declaration.
pub fn parse_type(text: &str) -> SyntaxType {
    let ast = parse_ok(&format!("var x: {text}"));
    match first_statement(&ast) {
        Statement::MutableVarDeclaration(decl) => {
            decl.ty.clone().expect("expected a type annotation")
        }
        other => panic!("expected a var declaration, got {other:?}"),
    }
}
