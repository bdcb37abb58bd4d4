//! Statement nodes.

use text_size::TextRange;

use crate::ast::expressions::Expression;
use crate::ast::module_name::ModuleName;
use crate::ast::operations::OperationExpression;
use crate::ast::parameter::Parameter;
use crate::ast::types::SyntaxType;
use crate::lexer::Token;

/// How a field binding may change after initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutability {
    /// Declared `var`.
    Mutable,
    /// No mutability modifier.
    Immutable,
    /// Declared `const`.
    Constant,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// The root of one source file.
    Program(ProgramStatement),
    /// `import a.b.c [as d]` or `import a.b.*`.
    Import(ImportStatement),
    /// `import a.b.{ X, Y as Z } [as g]`.
    AggregateImport(AggregateImportStatement),
    /// `import ("path") { fun ... }`.
    DllImport(DllImportStatement),
    /// `module a.b.c { ... }`.
    Module(ModuleStatement),
    /// `entry(params) { ... }`.
    Entry(EntryStatement),
    /// `fun name(params) -> T { ... }`.
    FunctionDeclaration(FunctionDeclarationStatement),
    /// `fun name(params) -> T => external(entry = "main")`.
    ExternalFunction(ExternalFunctionStatement),
    /// `constructor(params) { ... }` inside a struct.
    ConstructorDeclaration(ConstructorDeclarationStatement),
    /// `destructor() { ... }` inside a struct.
    DestructorDeclaration(DestructorDeclarationStatement),
    /// A struct's custom `string` conversion function.
    StringDeclaration(StringDeclarationStatement),
    /// `implicit cast (p: T) -> U { ... }` inside a struct.
    CastDeclaration(CastDeclarationStatement),
    /// `operator (a: T + b: T) -> T { ... }` inside a struct.
    OperatorDeclaration(OperatorDeclarationStatement),
    /// A struct field.
    FieldDeclaration(FieldDeclarationStatement),
    /// `struct Name { ... }` or `var struct Name { ... }`.
    StructDeclaration(StructDeclarationStatement),
    /// `interface Name { ... }`.
    InterfaceDeclaration(InterfaceDeclarationStatement),
    /// `{ ... }`.
    Block(BlockStatement),
    /// An expression in statement position.
    Expression(ExpressionStatement),
    /// `if cond { ... } else { ... }`.
    If(IfStatement),
    /// `var name [: T] [= expr]`.
    MutableVarDeclaration(MutableVarDeclarationStatement),
    /// `let name [: T] = expr`.
    ImmutableVarDeclaration(ImmutableVarDeclarationStatement),
    /// `const name [: T] = expr`.
    ConstVarDeclaration(ConstVarDeclarationStatement),
    /// `return [expr]`.
    Return(ReturnStatement),
    /// `def Name as Type`.
    Define(DefineStatement),
}

/// The root statement of a parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramStatement {
    /// The file's import statements, in source order.
    pub imports: Vec<Statement>,
    /// The file-scope module statement, if one was written.
    pub module: Option<Box<Statement>>,
    /// The remaining top-level statements.
    pub statements: Vec<Statement>,
    /// The whole file.
    pub range: TextRange,
}

/// A single-name import: the dotted scope plus the imported identifier
/// (or `*`), with an optional alias.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportStatement {
    /// The dotted module scope preceding the final element.
    pub scope: ModuleName,
    /// The imported identifier, or the `*` token for wildcard imports.
    pub imported: Token,
    /// The alias after `as`, if any.
    pub alias: Option<Token>,
    /// Source range of the whole statement.
    pub range: TextRange,
}

/// One `X [as Y]` entry of an aggregate import group.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportItem {
    /// The imported identifier.
    pub identifier: Token,
    /// The alias after `as`, if any.
    pub alias: Option<Token>,
}

/// A brace-group import.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateImportStatement {
    /// The dotted module scope preceding the group.
    pub scope: ModuleName,
    /// The imported items.
    pub items: Vec<ImportItem>,
    /// The group alias after the closing brace, if any.
    pub group_alias: Option<Token>,
    /// Source range of the whole statement.
    pub range: TextRange,
}

/// A DLL import block binding external functions from a shared library.
#[derive(Debug, Clone, PartialEq)]
pub struct DllImportStatement {
    /// The library path string token.
    pub path: Token,
    /// The external function statements declared in the body.
    pub functions: Vec<Statement>,
    /// Source range of the whole statement.
    pub range: TextRange,
}

/// A module declaration. At file scope the body is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleStatement {
    /// The dotted module name.
    pub name: ModuleName,
    /// The body statements; empty when no body was written.
    pub body: Vec<Statement>,
    /// Source range of the whole statement.
    pub range: TextRange,
}

/// The program entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryStatement {
    /// The entry parameters.
    pub parameters: Vec<Parameter>,
    /// The body block.
    pub body: Box<Statement>,
    /// Source range of the whole statement.
    pub range: TextRange,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclarationStatement {
    /// The function name.
    pub identifier: Token,
    /// `true` when declared `static`.
    pub is_static: bool,
    /// `false` when declared `var` (impure).
    pub is_pure: bool,
    /// The bracketed type parameters, if any.
    pub type_parameters: Vec<Token>,
    /// The parameters.
    pub parameters: Vec<Parameter>,
    /// The declared return type, if any.
    pub return_type: Option<SyntaxType>,
    /// The body: a block, or an expression statement for `=> expr`.
    pub body: Box<Statement>,
    /// Source range of the whole declaration.
    pub range: TextRange,
    /// Source range of the signature only, from the first modifier through
    /// the return type.
    pub signature_range: TextRange,
}

/// A function implemented outside the program, with its attribute list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalFunctionStatement {
    /// The function name.
    pub identifier: Token,
    /// The parameters.
    pub parameters: Vec<Parameter>,
    /// The declared return type, if any.
    pub return_type: Option<SyntaxType>,
    /// The `key = "value"` attributes, in source order. Keys are unique.
    pub attributes: Vec<(Token, Token)>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

impl ExternalFunctionStatement {
    /// Looks up an attribute value by key name.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Token> {
        self.attributes
            .iter()
            .find(|(name, _)| name.text == key)
            .map(|(_, value)| value)
    }
}

/// A struct constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDeclarationStatement {
    /// The parameters.
    pub parameters: Vec<Parameter>,
    /// The body block.
    pub body: Box<Statement>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A struct destructor.
#[derive(Debug, Clone, PartialEq)]
pub struct DestructorDeclarationStatement {
    /// The body block.
    pub body: Box<Statement>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A struct's custom `string` conversion function. The return type must be
/// `string`.
#[derive(Debug, Clone, PartialEq)]
pub struct StringDeclarationStatement {
    /// The declared return type.
    pub return_type: SyntaxType,
    /// The body block.
    pub body: Box<Statement>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A user-defined cast.
#[derive(Debug, Clone, PartialEq)]
pub struct CastDeclarationStatement {
    /// `true` for `implicit cast`, `false` for `explicit cast`.
    pub is_implicit: bool,
    /// The source-value parameter.
    pub parameter: Parameter,
    /// The target type.
    pub return_type: SyntaxType,
    /// The body block.
    pub body: Box<Statement>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A user-defined operator.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorDeclarationStatement {
    /// The operator signature.
    pub operation: OperationExpression,
    /// The result type.
    pub return_type: SyntaxType,
    /// The body: a block, or an expression statement for `=> expr`.
    pub body: Box<Statement>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclarationStatement {
    /// The field name.
    pub identifier: Token,
    /// The field's mutability.
    pub mutability: Mutability,
    /// `true` when declared `static`.
    pub is_static: bool,
    /// The declared type. Fields always have one.
    pub ty: SyntaxType,
    /// The initializer, if any.
    pub initializer: Option<Expression>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A struct declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclarationStatement {
    /// The struct name.
    pub identifier: Token,
    /// `true` for `var struct`.
    pub is_mutable: bool,
    /// The member declarations.
    pub members: Vec<Statement>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// An interface declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDeclarationStatement {
    /// The interface name.
    pub identifier: Token,
    /// The member declarations.
    pub members: Vec<Statement>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A brace-delimited block of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// The statements, in source order.
    pub statements: Vec<Statement>,
    /// Source range including the braces.
    pub range: TextRange,
}

/// An expression in statement position.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The expression.
    pub expression: Expression,
    /// Source range of the expression.
    pub range: TextRange,
}

/// An `if` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// The condition.
    pub condition: Expression,
    /// The then-block.
    pub then_branch: Box<Statement>,
    /// The else-branch: a block or a chained `if`.
    pub else_branch: Option<Box<Statement>>,
    /// Source range of the whole statement.
    pub range: TextRange,
}

/// A `var` declaration. Type and initializer are both optional.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableVarDeclarationStatement {
    /// The variable name.
    pub identifier: Token,
    /// The declared type, if any.
    pub ty: Option<SyntaxType>,
    /// The initializer, if any.
    pub initializer: Option<Expression>,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A `let` declaration. The initializer is required.
#[derive(Debug, Clone, PartialEq)]
pub struct ImmutableVarDeclarationStatement {
    /// The variable name.
    pub identifier: Token,
    /// The declared type, if any.
    pub ty: Option<SyntaxType>,
    /// The initializer.
    pub initializer: Expression,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A `const` declaration. The initializer is required.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstVarDeclarationStatement {
    /// The constant name.
    pub identifier: Token,
    /// The declared type, if any.
    pub ty: Option<SyntaxType>,
    /// The initializer.
    pub initializer: Expression,
    /// Source range of the whole declaration.
    pub range: TextRange,
}

/// A `return` statement with an optional value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// The returned expression, if any.
    pub expression: Option<Expression>,
    /// Source range of the whole statement.
    pub range: TextRange,
}

/// A type alias: `def Name as Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct DefineStatement {
    /// The alias name.
    pub identifier: Token,
    /// The aliased type.
    pub ty: SyntaxType,
    /// Source range of the whole statement.
    pub range: TextRange,
}

impl Statement {
    /// The source range of this statement.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Program(s) => s.range,
            Self::Import(s) => s.range,
            Self::AggregateImport(s) => s.range,
            Self::DllImport(s) => s.range,
            Self::Module(s) => s.range,
            Self::Entry(s) => s.range,
            Self::FunctionDeclaration(s) => s.range,
            Self::ExternalFunction(s) => s.range,
            Self::ConstructorDeclaration(s) => s.range,
            Self::DestructorDeclaration(s) => s.range,
            Self::StringDeclaration(s) => s.range,
            Self::CastDeclaration(s) => s.range,
            Self::OperatorDeclaration(s) => s.range,
            Self::FieldDeclaration(s) => s.range,
            Self::StructDeclaration(s) => s.range,
            Self::InterfaceDeclaration(s) => s.range,
            Self::Block(s) => s.range,
            Self::Expression(s) => s.range,
            Self::If(s) => s.range,
            Self::MutableVarDeclaration(s) => s.range,
            Self::ImmutableVarDeclaration(s) => s.range,
            Self::ConstVarDeclaration(s) => s.range,
            Self::Return(s) => s.range,
            Self::Define(s) => s.range,
        }
    }

    /// Dispatches to the visitor method for this variant.
    pub fn visit<V: StatementVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Program(s) => visitor.visit_program(s),
            Self::Import(s) => visitor.visit_import(s),
            Self::AggregateImport(s) => visitor.visit_aggregate_import(s),
            Self::DllImport(s) => visitor.visit_dll_import(s),
            Self::Module(s) => visitor.visit_module(s),
            Self::Entry(s) => visitor.visit_entry(s),
            Self::FunctionDeclaration(s) => visitor.visit_function_declaration(s),
            Self::ExternalFunction(s) => visitor.visit_external_function(s),
            Self::ConstructorDeclaration(s) => visitor.visit_constructor_declaration(s),
            Self::DestructorDeclaration(s) => visitor.visit_destructor_declaration(s),
            Self::StringDeclaration(s) => visitor.visit_string_declaration(s),
            Self::CastDeclaration(s) => visitor.visit_cast_declaration(s),
            Self::OperatorDeclaration(s) => visitor.visit_operator_declaration(s),
            Self::FieldDeclaration(s) => visitor.visit_field_declaration(s),
            Self::StructDeclaration(s) => visitor.visit_struct_declaration(s),
            Self::InterfaceDeclaration(s) => visitor.visit_interface_declaration(s),
            Self::Block(s) => visitor.visit_block(s),
            Self::Expression(s) => visitor.visit_expression(s),
            Self::If(s) => visitor.visit_if(s),
            Self::MutableVarDeclaration(s) => visitor.visit_mutable_var_declaration(s),
            Self::ImmutableVarDeclaration(s) => visitor.visit_immutable_var_declaration(s),
            Self::ConstVarDeclaration(s) => visitor.visit_const_var_declaration(s),
            Self::Return(s) => visitor.visit_return(s),
            Self::Define(s) => visitor.visit_define(s),
        }
    }
}

/// Value-producing visitor over statements, one method per variant.
#[allow(missing_docs)]
pub trait StatementVisitor {
    /// The result type of a visit.
    type Output;

    fn visit_program(&mut self, stmt: &ProgramStatement) -> Self::Output;
    fn visit_import(&mut self, stmt: &ImportStatement) -> Self::Output;
    fn visit_aggregate_import(&mut self, stmt: &AggregateImportStatement) -> Self::Output;
    fn visit_dll_import(&mut self, stmt: &DllImportStatement) -> Self::Output;
    fn visit_module(&mut self, stmt: &ModuleStatement) -> Self::Output;
    fn visit_entry(&mut self, stmt: &EntryStatement) -> Self::Output;
    fn visit_function_declaration(&mut self, stmt: &FunctionDeclarationStatement)
        -> Self::Output;
    fn visit_external_function(&mut self, stmt: &ExternalFunctionStatement) -> Self::Output;
    fn visit_constructor_declaration(
        &mut self,
        stmt: &ConstructorDeclarationStatement,
    ) -> Self::Output;
    fn visit_destructor_declaration(
        &mut self,
        stmt: &DestructorDeclarationStatement,
    ) -> Self::Output;
    fn visit_string_declaration(&mut self, stmt: &StringDeclarationStatement) -> Self::Output;
    fn visit_cast_declaration(&mut self, stmt: &CastDeclarationStatement) -> Self::Output;
    fn visit_operator_declaration(&mut self, stmt: &OperatorDeclarationStatement)
        -> Self::Output;
    fn visit_field_declaration(&mut self, stmt: &FieldDeclarationStatement) -> Self::Output;
    fn visit_struct_declaration(&mut self, stmt: &StructDeclarationStatement) -> Self::Output;
    fn visit_interface_declaration(
        &mut self,
        stmt: &InterfaceDeclarationStatement,
    ) -> Self::Output;
    fn visit_block(&mut self, stmt: &BlockStatement) -> Self::Output;
    fn visit_expression(&mut self, stmt: &ExpressionStatement) -> Self::Output;
    fn visit_if(&mut self, stmt: &IfStatement) -> Self::Output;
    fn visit_mutable_var_declaration(
        &mut self,
        stmt: &MutableVarDeclarationStatement,
    ) -> Self::Output;
    fn visit_immutable_var_declaration(
        &mut self,
        stmt: &ImmutableVarDeclarationStatement,
    ) -> Self::Output;
    fn visit_const_var_declaration(
        &mut self,
        stmt: &ConstVarDeclarationStatement,
    ) -> Self::Output;
    fn visit_return(&mut self, stmt: &ReturnStatement) -> Self::Output;
    fn visit_define(&mut self, stmt: &DefineStatement) -> Self::Output;
}
