//! Operator-overload signatures.
//!
//! The expression inside `operator ( ... )` is a parameter-only
//! mini-grammar: operands are [`Parameter`] declarations rather than
//! expressions, and at most one operator may appear.

use text_size::TextRange;

use crate::ast::expressions::{BinaryOperation, UnaryOperation};
use crate::ast::parameter::Parameter;
use crate::lexer::Token;

/// An operator-overload signature.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationExpression {
    /// A lone parameter with no operator. Rejected at the declaration
    /// level.
    Primary(PrimaryOperationExpression),
    /// A unary signature such as `-a: i32` or `a: i32 ++`.
    Unary(UnaryOperationExpression),
    /// A binary signature such as `a: i32 + b: i32`.
    Binary(BinaryOperationExpression),
}

/// A signature consisting of a single parameter and no operator.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryOperationExpression {
    /// The lone parameter.
    pub parameter: Parameter,
    /// Source range of the parameter.
    pub range: TextRange,
}

/// A unary operator signature.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperationExpression {
    /// The operation tag.
    pub operation: UnaryOperation,
    /// The operator token.
    pub operator: Token,
    /// The operand parameter.
    pub operand: Parameter,
    /// `true` for prefix signatures.
    pub is_prefix: bool,
    /// Source range of operator and operand.
    pub range: TextRange,
}

/// A binary operator signature over exactly two parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperationExpression {
    /// The left parameter.
    pub left: Parameter,
    /// The operation tag.
    pub operation: BinaryOperation,
    /// The operator token.
    pub operator: Token,
    /// The right parameter.
    pub right: Parameter,
    /// Source range of both parameters.
    pub range: TextRange,
}

impl OperationExpression {
    /// The source range of this signature.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Primary(op) => op.range,
            Self::Unary(op) => op.range,
            Self::Binary(op) => op.range,
        }
    }
}
