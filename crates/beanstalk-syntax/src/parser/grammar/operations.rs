//! Operator-overload signature parsing.
//!
//! The expression between the parentheses of an `operator` declaration is
//! a parameter-only mini-grammar: it reuses the operator tables of the
//! expression parser, but every operand is a [`Parameter`] declaration and
//! at most one operator may appear.

use crate::ast::{
    BinaryOperation, BinaryOperationExpression, OperationExpression,
    PrimaryOperationExpression, UnaryOperation, UnaryOperationExpression,
};
use crate::lexer::TokenKind;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// Parses the signature of an operator declaration.
    pub(crate) fn parse_operation_expression(&mut self) -> ParseResult<OperationExpression> {
        // Prefix form: `op param`.
        if let Some(operation) = UnaryOperation::prefix_from_token(self.kind()) {
            let operator = self.bump();
            if operation == UnaryOperation::Await {
                let range = operator.range;
                self.error_at(range, "'await' cannot be overloaded");
            }
            let operand = self.parse_parameter(true, true)?;
            let range = operator.range.cover(operand.range);
            self.reject_nested_operator();
            return Ok(OperationExpression::Unary(UnaryOperationExpression {
                operation,
                operator,
                operand,
                is_prefix: true,
                range,
            }));
        }

        let left = self.parse_parameter(true, true)?;

        // Postfix form: `param ++`.
        if let Some(operation) = UnaryOperation::postfix_from_token(self.kind()) {
            let operator = self.bump();
            let range = left.range.cover(operator.range);
            self.reject_nested_operator();
            return Ok(OperationExpression::Unary(UnaryOperationExpression {
                operation,
                operator,
                operand: left,
                is_prefix: false,
                range,
            }));
        }

        // Binary form: `param op param`, two primaries only.
        if let Some(operation) = BinaryOperation::from_token(self.kind()) {
            let operator = self.bump();
            let right = self.parse_parameter(true, true)?;
            let range = left.range.cover(right.range);
            self.reject_nested_operator();
            return Ok(OperationExpression::Binary(BinaryOperationExpression {
                left,
                operation,
                operator,
                right,
                range,
            }));
        }

        let range = left.range;
        Ok(OperationExpression::Primary(PrimaryOperationExpression {
            parameter: left,
            range,
        }))
    }

    /// A second operator in a signature is rejected with a diagnostic at
    /// the inner operator; the rest of the signature is skipped so the
    /// declaration can continue.
    fn reject_nested_operator(&mut self) {
        let nested = BinaryOperation::from_token(self.kind()).is_some()
            || UnaryOperation::prefix_from_token(self.kind()).is_some();
        if !nested {
            return;
        }
        if let Some(token) = self.current() {
            let range = token.range;
            self.error_at(range, "operator signatures cannot nest operators");
        }
        while !self.at(TokenKind::RParen) && !self.at_end() {
            self.bump();
        }
    }
}

/// Checks an already-parsed signature at the declaration level: a
/// declaration must contain at least one operator.
pub(crate) fn require_operator(parser: &mut Parser, operation: &OperationExpression) {
    if let OperationExpression::Primary(primary) = operation {
        parser.error_at(
            primary.range,
            "an operator declaration must contain an operator",
        );
    }
}
