//! Indented debug rendering of the tree.

use std::fmt::Write as _;

use text_size::TextRange;

use crate::ast::expressions::Expression;
use crate::ast::operations::OperationExpression;
use crate::ast::parameter::Parameter;
use crate::ast::statements::Statement;
use crate::ast::types::SyntaxType;
use crate::ast::walk::{
    walk_expression, walk_operation, walk_parameter, walk_statement, walk_syntax_type, AstWalker,
};

/// Renders a statement tree one node per line, children indented, in the
/// form `Label@start..end`. Meant for debugging and test failure output.
#[must_use]
pub fn dump(stmt: &Statement) -> String {
    let mut printer = Printer {
        out: String::new(),
        depth: 0,
    };
    printer.visit_statement(stmt);
    printer.out
}

struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, label: &str, detail: Option<&str>, range: TextRange) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(label);
        if let Some(detail) = detail {
            let _ = write!(self.out, "({detail})");
        }
        let _ = writeln!(
            self.out,
            "@{}..{}",
            u32::from(range.start()),
            u32::from(range.end())
        );
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }
}

impl AstWalker for Printer {
    fn visit_statement(&mut self, stmt: &Statement) {
        let (label, detail) = statement_label(stmt);
        self.line(label, detail.as_deref(), stmt.range());
        self.nested(|p| walk_statement(p, stmt));
    }

    fn visit_expression(&mut self, expr: &Expression) {
        let (label, detail) = expression_label(expr);
        self.line(label, detail.as_deref(), expr.range());
        self.nested(|p| walk_expression(p, expr));
    }

    fn visit_syntax_type(&mut self, ty: &SyntaxType) {
        let (label, detail) = type_label(ty);
        self.line(label, detail.as_deref(), ty.range());
        self.nested(|p| walk_syntax_type(p, ty));
    }

    fn visit_parameter(&mut self, parameter: &Parameter) {
        let mut markers = String::new();
        if parameter.is_variadic {
            markers.push_str("...");
        }
        if parameter.is_mutable {
            markers.push_str("var ");
        }
        let detail = format!("{markers}{}", parameter.identifier.text);
        self.line("Parameter", Some(&detail), parameter.range);
        self.nested(|p| walk_parameter(p, parameter));
    }

    fn visit_operation(&mut self, operation: &OperationExpression) {
        let detail = match operation {
            OperationExpression::Primary(_) => "primary".to_string(),
            OperationExpression::Unary(op) => format!("{:?}", op.operation),
            OperationExpression::Binary(op) => format!("{:?}", op.operation),
        };
        self.line("Operation", Some(&detail), operation.range());
        self.nested(|p| walk_operation(p, operation));
    }
}

fn statement_label(stmt: &Statement) -> (&'static str, Option<String>) {
    match stmt {
        Statement::Program(_) => ("Program", None),
        Statement::Import(s) => ("Import", Some(format!("{}.{}", s.scope, s.imported.text))),
        Statement::AggregateImport(s) => ("AggregateImport", Some(s.scope.to_string())),
        Statement::DllImport(s) => ("DllImport", Some(s.path.text.to_string())),
        Statement::Module(s) => ("Module", Some(s.name.to_string())),
        Statement::Entry(_) => ("Entry", None),
        Statement::FunctionDeclaration(s) => {
            ("FunctionDeclaration", Some(s.identifier.text.to_string()))
        }
        Statement::ExternalFunction(s) => {
            ("ExternalFunction", Some(s.identifier.text.to_string()))
        }
        Statement::ConstructorDeclaration(_) => ("ConstructorDeclaration", None),
        Statement::DestructorDeclaration(_) => ("DestructorDeclaration", None),
        Statement::StringDeclaration(_) => ("StringDeclaration", None),
        Statement::CastDeclaration(s) => (
            "CastDeclaration",
            Some(if s.is_implicit { "implicit" } else { "explicit" }.to_string()),
        ),
        Statement::OperatorDeclaration(_) => ("OperatorDeclaration", None),
        Statement::FieldDeclaration(s) => {
            ("FieldDeclaration", Some(s.identifier.text.to_string()))
        }
        Statement::StructDeclaration(s) => {
            ("StructDeclaration", Some(s.identifier.text.to_string()))
        }
        Statement::InterfaceDeclaration(s) => {
            ("InterfaceDeclaration", Some(s.identifier.text.to_string()))
        }
        Statement::Block(_) => ("Block", None),
        Statement::Expression(_) => ("ExpressionStatement", None),
        Statement::If(_) => ("If", None),
        Statement::MutableVarDeclaration(s) => {
            ("MutableVarDeclaration", Some(s.identifier.text.to_string()))
        }
        Statement::ImmutableVarDeclaration(s) => (
            "ImmutableVarDeclaration",
            Some(s.identifier.text.to_string()),
        ),
        Statement::ConstVarDeclaration(s) => {
            ("ConstVarDeclaration", Some(s.identifier.text.to_string()))
        }
        Statement::Return(_) => ("Return", None),
        Statement::Define(s) => ("Define", Some(s.identifier.text.to_string())),
    }
}

fn expression_label(expr: &Expression) -> (&'static str, Option<String>) {
    match expr {
        Expression::Token(e) => ("Token", Some(e.token.text.to_string())),
        Expression::Tuple(_) => ("Tuple", None),
        Expression::List(_) => ("List", None),
        Expression::Map(_) => ("Map", None),
        Expression::Instantiation(_) => ("Instantiation", None),
        Expression::FunctionCall(_) => ("Call", None),
        Expression::Cast(_) => ("Cast", None),
        Expression::Access(e) => ("Access", Some(e.member.text.to_string())),
        Expression::Index(_) => ("Index", None),
        Expression::Assignment(_) => ("Assignment", None),
        Expression::Lambda(_) => ("Lambda", None),
        Expression::Conditional(_) => ("Conditional", None),
        Expression::Binary(e) => ("Binary", Some(format!("{:?}", e.operation))),
        Expression::Unary(e) => ("Unary", Some(format!("{:?}", e.operation))),
        Expression::Switch(_) => ("Switch", None),
        Expression::With(_) => ("With", None),
        Expression::InterpolatedString(_) => ("InterpolatedString", None),
        Expression::Type(_) => ("TypeExpression", None),
        Expression::Operation(_) => ("OperationExpression", None),
    }
}

fn type_label(ty: &SyntaxType) -> (&'static str, Option<String>) {
    match ty {
        SyntaxType::Base(t) => ("BaseType", Some(t.token.text.to_string())),
        SyntaxType::Tuple(_) => ("TupleType", None),
        SyntaxType::Generic(_) => ("GenericType", None),
        SyntaxType::Array(_) => ("ArrayType", None),
        SyntaxType::Nullable(_) => ("NullableType", None),
        SyntaxType::Mutable(_) => ("MutableType", None),
        SyntaxType::Reference(t) => (
            "ReferenceType",
            Some(if t.immutable { "ref" } else { "var ref" }.to_string()),
        ),
        SyntaxType::Lambda(_) => ("LambdaType", None),
    }
}
