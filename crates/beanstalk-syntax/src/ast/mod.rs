//! The typed abstract syntax tree.
//!
//! Node families are tagged sums: one enum per family
//! ([`Statement`], [`Expression`], [`SyntaxType`]) with a struct per
//! variant. Every node owns the tokens it references and carries its own
//! [`text_size::TextRange`]. Consumers traverse the tree either with the
//! value-producing visitors ([`StatementVisitor`], [`ExpressionVisitor`],
//! [`SyntaxTypeVisitor`]) or with the side-effecting [`AstWalker`].

mod dump;
mod expressions;
mod module_name;
mod operations;
mod parameter;
mod statements;
mod types;
mod walk;

pub use dump::dump;
pub use expressions::{
    AccessExpression, AssignmentExpression, BinaryExpression, BinaryOperation, CastExpression,
    ConditionalExpression, Expression, ExpressionVisitor, FieldInitializer,
    FunctionCallExpression, IndexExpression, InstantiationExpression,
    InterpolatedStringExpression, LambdaExpression, ListExpression, MapEntry, MapExpression,
    SwitchExpression, TokenExpression, TupleExpression, UnaryExpression, UnaryOperation,
    WithExpression,
};
pub use module_name::ModuleName;
pub use operations::{
    BinaryOperationExpression, OperationExpression, PrimaryOperationExpression,
    UnaryOperationExpression,
};
pub use parameter::Parameter;
pub use statements::{
    AggregateImportStatement, BlockStatement, CastDeclarationStatement,
    ConstVarDeclarationStatement, ConstructorDeclarationStatement, DefineStatement,
    DestructorDeclarationStatement, DllImportStatement, EntryStatement, ExpressionStatement,
    ExternalFunctionStatement, FieldDeclarationStatement, FunctionDeclarationStatement,
    IfStatement, ImmutableVarDeclarationStatement, ImportItem, ImportStatement,
    InterfaceDeclarationStatement, ModuleStatement, Mutability, MutableVarDeclarationStatement,
    OperatorDeclarationStatement, ProgramStatement, ReturnStatement, Statement,
    StatementVisitor, StringDeclarationStatement, StructDeclarationStatement,
};
pub use types::{
    ArraySyntaxType, BaseSyntaxType, GenericSyntaxType, LambdaSyntaxType, MutableSyntaxType,
    NullableSyntaxType, ReferenceSyntaxType, SyntaxType, SyntaxTypeVisitor, TupleSyntaxType,
};
pub use walk::{
    walk_expression, walk_operation, walk_parameter, walk_statement, walk_syntax_type,
    AstWalker,
};

use crate::source::SourceText;

/// A parsed source file: the program root plus the buffer it came from.
///
/// The AST exclusively owns every node it reaches; nodes are immutable once
/// parsing finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    /// The root program statement.
    pub root: ProgramStatement,
    /// The buffer the tree was parsed from.
    pub source: SourceText,
}

impl Ast {
    /// Renders the tree in the indented debug format of [`dump`].
    #[must_use]
    pub fn dump(&self) -> String {
        dump(&Statement::Program(self.root.clone()))
    }
}
