//! Function, lambda, and operator parameters.

use text_size::TextRange;

use crate::ast::expressions::Expression;
use crate::ast::types::SyntaxType;
use crate::lexer::Token;

/// A declared parameter: `[...] [var] ident : Type [= default]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The parameter name.
    pub identifier: Token,
    /// The declared type, if any. Lambda parameters always have one.
    pub ty: Option<SyntaxType>,
    /// The default value, when the `=` clause was present and the context
    /// allows defaults.
    pub default: Option<Box<Expression>>,
    /// `true` when the parameter was marked `...`.
    pub is_variadic: bool,
    /// `true` when the parameter was marked `var`.
    pub is_mutable: bool,
    /// The range from the first marker to the end of the default.
    pub range: TextRange,
}
