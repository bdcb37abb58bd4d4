//! Side-effecting tree traversal.
//!
//! [`AstWalker`] is the second visitor shape: every method has a default
//! body that recurses into the node's children through the free `walk_*`
//! functions. Implementors override the hooks they care about and call the
//! matching `walk_*` to keep descending.

use crate::ast::expressions::*;
use crate::ast::operations::OperationExpression;
use crate::ast::parameter::Parameter;
use crate::ast::statements::*;
use crate::ast::types::*;

/// A side-effecting visitor with one hook per concrete variant.
///
/// Default implementations walk into children; an override ends the descent
/// unless it calls the corresponding `walk_*` function itself.
#[allow(missing_docs, unused_variables)]
pub trait AstWalker {
    // ---- dispatchers ----------------------------------------------------

    fn visit_statement(&mut self, stmt: &Statement) {
        walk_statement(self, stmt);
    }

    fn visit_expression(&mut self, expr: &Expression) {
        walk_expression(self, expr);
    }

    fn visit_syntax_type(&mut self, ty: &SyntaxType) {
        walk_syntax_type(self, ty);
    }

    fn visit_parameter(&mut self, parameter: &Parameter) {
        walk_parameter(self, parameter);
    }

    fn visit_operation(&mut self, operation: &OperationExpression) {
        walk_operation(self, operation);
    }

    // ---- statements -----------------------------------------------------

    fn visit_program(&mut self, stmt: &ProgramStatement) {
        for import in &stmt.imports {
            self.visit_statement(import);
        }
        if let Some(module) = &stmt.module {
            self.visit_statement(module);
        }
        for statement in &stmt.statements {
            self.visit_statement(statement);
        }
    }

    fn visit_import(&mut self, stmt: &ImportStatement) {}

    fn visit_aggregate_import(&mut self, stmt: &AggregateImportStatement) {}

    fn visit_dll_import(&mut self, stmt: &DllImportStatement) {
        for function in &stmt.functions {
            self.visit_statement(function);
        }
    }

    fn visit_module(&mut self, stmt: &ModuleStatement) {
        for statement in &stmt.body {
            self.visit_statement(statement);
        }
    }

    fn visit_entry(&mut self, stmt: &EntryStatement) {
        for parameter in &stmt.parameters {
            self.visit_parameter(parameter);
        }
        self.visit_statement(&stmt.body);
    }

    fn visit_function_declaration(&mut self, stmt: &FunctionDeclarationStatement) {
        for parameter in &stmt.parameters {
            self.visit_parameter(parameter);
        }
        if let Some(return_type) = &stmt.return_type {
            self.visit_syntax_type(return_type);
        }
        self.visit_statement(&stmt.body);
    }

    fn visit_external_function(&mut self, stmt: &ExternalFunctionStatement) {
        for parameter in &stmt.parameters {
            self.visit_parameter(parameter);
        }
        if let Some(return_type) = &stmt.return_type {
            self.visit_syntax_type(return_type);
        }
    }

    fn visit_constructor_declaration(&mut self, stmt: &ConstructorDeclarationStatement) {
        for parameter in &stmt.parameters {
            self.visit_parameter(parameter);
        }
        self.visit_statement(&stmt.body);
    }

    fn visit_destructor_declaration(&mut self, stmt: &DestructorDeclarationStatement) {
        self.visit_statement(&stmt.body);
    }

    fn visit_string_declaration(&mut self, stmt: &StringDeclarationStatement) {
        self.visit_syntax_type(&stmt.return_type);
        self.visit_statement(&stmt.body);
    }

    fn visit_cast_declaration(&mut self, stmt: &CastDeclarationStatement) {
        self.visit_parameter(&stmt.parameter);
        self.visit_syntax_type(&stmt.return_type);
        self.visit_statement(&stmt.body);
    }

    fn visit_operator_declaration(&mut self, stmt: &OperatorDeclarationStatement) {
        self.visit_operation(&stmt.operation);
        self.visit_syntax_type(&stmt.return_type);
        self.visit_statement(&stmt.body);
    }

    fn visit_field_declaration(&mut self, stmt: &FieldDeclarationStatement) {
        self.visit_syntax_type(&stmt.ty);
        if let Some(initializer) = &stmt.initializer {
            self.visit_expression(initializer);
        }
    }

    fn visit_struct_declaration(&mut self, stmt: &StructDeclarationStatement) {
        for member in &stmt.members {
            self.visit_statement(member);
        }
    }

    fn visit_interface_declaration(&mut self, stmt: &InterfaceDeclarationStatement) {
        for member in &stmt.members {
            self.visit_statement(member);
        }
    }

    fn visit_block(&mut self, stmt: &BlockStatement) {
        for statement in &stmt.statements {
            self.visit_statement(statement);
        }
    }

    fn visit_expression_statement(&mut self, stmt: &ExpressionStatement) {
        self.visit_expression(&stmt.expression);
    }

    fn visit_if(&mut self, stmt: &IfStatement) {
        self.visit_expression(&stmt.condition);
        self.visit_statement(&stmt.then_branch);
        if let Some(else_branch) = &stmt.else_branch {
            self.visit_statement(else_branch);
        }
    }

    fn visit_mutable_var_declaration(&mut self, stmt: &MutableVarDeclarationStatement) {
        if let Some(ty) = &stmt.ty {
            self.visit_syntax_type(ty);
        }
        if let Some(initializer) = &stmt.initializer {
            self.visit_expression(initializer);
        }
    }

    fn visit_immutable_var_declaration(&mut self, stmt: &ImmutableVarDeclarationStatement) {
        if let Some(ty) = &stmt.ty {
            self.visit_syntax_type(ty);
        }
        self.visit_expression(&stmt.initializer);
    }

    fn visit_const_var_declaration(&mut self, stmt: &ConstVarDeclarationStatement) {
        if let Some(ty) = &stmt.ty {
            self.visit_syntax_type(ty);
        }
        self.visit_expression(&stmt.initializer);
    }

    fn visit_return(&mut self, stmt: &ReturnStatement) {
        if let Some(expression) = &stmt.expression {
            self.visit_expression(expression);
        }
    }

    fn visit_define(&mut self, stmt: &DefineStatement) {
        self.visit_syntax_type(&stmt.ty);
    }

    // ---- expressions ----------------------------------------------------

    fn visit_token_expression(&mut self, expr: &TokenExpression) {}

    fn visit_tuple_expression(&mut self, expr: &TupleExpression) {
        for element in &expr.elements {
            self.visit_expression(element);
        }
    }

    fn visit_list_expression(&mut self, expr: &ListExpression) {
        for element in &expr.elements {
            self.visit_expression(element);
        }
        if let Some(element_type) = &expr.element_type {
            self.visit_syntax_type(element_type);
        }
    }

    fn visit_map_expression(&mut self, expr: &MapExpression) {
        for entry in &expr.entries {
            self.visit_expression(&entry.key);
            self.visit_expression(&entry.value);
        }
        if let Some(entry_type) = &expr.entry_type {
            self.visit_syntax_type(entry_type);
        }
    }

    fn visit_instantiation(&mut self, expr: &InstantiationExpression) {
        self.visit_syntax_type(&expr.ty);
        for field in &expr.fields {
            self.visit_expression(&field.value);
        }
    }

    fn visit_function_call(&mut self, expr: &FunctionCallExpression) {
        self.visit_expression(&expr.callee);
        for argument in &expr.arguments {
            self.visit_expression(argument);
        }
    }

    fn visit_cast(&mut self, expr: &CastExpression) {
        self.visit_expression(&expr.operand);
        self.visit_syntax_type(&expr.target);
    }

    fn visit_access(&mut self, expr: &AccessExpression) {
        self.visit_expression(&expr.source);
    }

    fn visit_index(&mut self, expr: &IndexExpression) {
        self.visit_expression(&expr.source);
        self.visit_expression(&expr.index);
    }

    fn visit_assignment(&mut self, expr: &AssignmentExpression) {
        self.visit_expression(&expr.target);
        self.visit_expression(&expr.value);
    }

    fn visit_lambda(&mut self, expr: &LambdaExpression) {
        for parameter in &expr.parameters {
            self.visit_parameter(parameter);
        }
        if let Some(return_type) = &expr.return_type {
            self.visit_syntax_type(return_type);
        }
        self.visit_statement(&expr.body);
    }

    fn visit_conditional(&mut self, expr: &ConditionalExpression) {
        self.visit_expression(&expr.condition);
        self.visit_expression(&expr.then_branch);
        if let Some(else_branch) = &expr.else_branch {
            self.visit_expression(else_branch);
        }
    }

    fn visit_binary(&mut self, expr: &BinaryExpression) {
        self.visit_expression(&expr.left);
        self.visit_expression(&expr.right);
    }

    fn visit_unary(&mut self, expr: &UnaryExpression) {
        self.visit_expression(&expr.operand);
    }

    fn visit_switch(&mut self, expr: &SwitchExpression) {}

    fn visit_with(&mut self, expr: &WithExpression) {}

    fn visit_interpolated_string(&mut self, expr: &InterpolatedStringExpression) {
        for part in &expr.parts {
            self.visit_expression(part);
        }
    }
}

/// Dispatches a statement to its per-variant hook.
pub fn walk_statement<W: AstWalker + ?Sized>(walker: &mut W, stmt: &Statement) {
    match stmt {
        Statement::Program(s) => walker.visit_program(s),
        Statement::Import(s) => walker.visit_import(s),
        Statement::AggregateImport(s) => walker.visit_aggregate_import(s),
        Statement::DllImport(s) => walker.visit_dll_import(s),
        Statement::Module(s) => walker.visit_module(s),
        Statement::Entry(s) => walker.visit_entry(s),
        Statement::FunctionDeclaration(s) => walker.visit_function_declaration(s),
        Statement::ExternalFunction(s) => walker.visit_external_function(s),
        Statement::ConstructorDeclaration(s) => walker.visit_constructor_declaration(s),
        Statement::DestructorDeclaration(s) => walker.visit_destructor_declaration(s),
        Statement::StringDeclaration(s) => walker.visit_string_declaration(s),
        Statement::CastDeclaration(s) => walker.visit_cast_declaration(s),
        Statement::OperatorDeclaration(s) => walker.visit_operator_declaration(s),
        Statement::FieldDeclaration(s) => walker.visit_field_declaration(s),
        Statement::StructDeclaration(s) => walker.visit_struct_declaration(s),
        Statement::InterfaceDeclaration(s) => walker.visit_interface_declaration(s),
        Statement::Block(s) => walker.visit_block(s),
        Statement::Expression(s) => walker.visit_expression_statement(s),
        Statement::If(s) => walker.visit_if(s),
        Statement::MutableVarDeclaration(s) => walker.visit_mutable_var_declaration(s),
        Statement::ImmutableVarDeclaration(s) => walker.visit_immutable_var_declaration(s),
        Statement::ConstVarDeclaration(s) => walker.visit_const_var_declaration(s),
        Statement::Return(s) => walker.visit_return(s),
        Statement::Define(s) => walker.visit_define(s),
    }
}

/// Dispatches an expression to its per-variant hook.
pub fn walk_expression<W: AstWalker + ?Sized>(walker: &mut W, expr: &Expression) {
    match expr {
        Expression::Token(e) => walker.visit_token_expression(e),
        Expression::Tuple(e) => walker.visit_tuple_expression(e),
        Expression::List(e) => walker.visit_list_expression(e),
        Expression::Map(e) => walker.visit_map_expression(e),
        Expression::Instantiation(e) => walker.visit_instantiation(e),
        Expression::FunctionCall(e) => walker.visit_function_call(e),
        Expression::Cast(e) => walker.visit_cast(e),
        Expression::Access(e) => walker.visit_access(e),
        Expression::Index(e) => walker.visit_index(e),
        Expression::Assignment(e) => walker.visit_assignment(e),
        Expression::Lambda(e) => walker.visit_lambda(e),
        Expression::Conditional(e) => walker.visit_conditional(e),
        Expression::Binary(e) => walker.visit_binary(e),
        Expression::Unary(e) => walker.visit_unary(e),
        Expression::Switch(e) => walker.visit_switch(e),
        Expression::With(e) => walker.visit_with(e),
        Expression::InterpolatedString(e) => walker.visit_interpolated_string(e),
        Expression::Type(t) => walker.visit_syntax_type(t),
        Expression::Operation(o) => walker.visit_operation(o),
    }
}

/// Recurses into the children of a syntax type.
pub fn walk_syntax_type<W: AstWalker + ?Sized>(walker: &mut W, ty: &SyntaxType) {
    match ty {
        SyntaxType::Base(_) => {}
        SyntaxType::Tuple(t) => {
            for component in &t.components {
                walker.visit_syntax_type(component);
            }
        }
        SyntaxType::Generic(t) => {
            walker.visit_syntax_type(&t.base);
            for argument in &t.arguments {
                walker.visit_syntax_type(argument);
            }
        }
        SyntaxType::Array(t) => {
            walker.visit_syntax_type(&t.base);
            if let Some(size) = &t.size {
                walker.visit_expression(size);
            }
        }
        SyntaxType::Nullable(t) => walker.visit_syntax_type(&t.base),
        SyntaxType::Mutable(t) => walker.visit_syntax_type(&t.base),
        SyntaxType::Reference(t) => walker.visit_syntax_type(&t.base),
        SyntaxType::Lambda(t) => {
            for parameter in &t.parameters {
                walker.visit_syntax_type(parameter);
            }
            if let Some(return_type) = &t.return_type {
                walker.visit_syntax_type(return_type);
            }
        }
    }
}

/// Recurses into the children of a parameter.
pub fn walk_parameter<W: AstWalker + ?Sized>(walker: &mut W, parameter: &Parameter) {
    if let Some(ty) = &parameter.ty {
        walker.visit_syntax_type(ty);
    }
    if let Some(default) = &parameter.default {
        walker.visit_expression(default);
    }
}

/// Recurses into the parameters of an operator signature.
pub fn walk_operation<W: AstWalker + ?Sized>(walker: &mut W, operation: &OperationExpression) {
    match operation {
        OperationExpression::Primary(op) => walker.visit_parameter(&op.parameter),
        OperationExpression::Unary(op) => walker.visit_parameter(&op.operand),
        OperationExpression::Binary(op) => {
            walker.visit_parameter(&op.left);
            walker.visit_parameter(&op.right);
        }
    }
}
