//! Expression parsing.
//!
//! Operator precedence (lowest to highest):
//! - `=` assignment (right associative, structural)
//! - `?:` conditional (right associative, structural)
//! - `??` (1-2)
//! - `==` `!=` (3-4)
//! - `|` (5-6), `^` (7-8), `&` (9-10)
//! - `<` `<=` `>` `>=` `is` `as` (11-12, non-chaining)
//! - `<<<` `>>>` `<<` `>>` (13-14)
//! - `+` `-` (15-16)
//! - `*` `/` `%%` `%` (17-18)
//! - `**` (20-19, right associative)
//! - `..` `..=` (21-22)
//! - prefix unary (structural, folds literals)
//! - postfix chain: `::Type` (terminal), call, `.`/`?.`, `[`/`?[`, `{`, `++`/`--`

use smol_str::SmolStr;

use crate::ast::{
    AccessExpression, AssignmentExpression, BinaryExpression, BinaryOperation, CastExpression,
    ConditionalExpression, Expression, ExpressionStatement, FieldInitializer,
    FunctionCallExpression, IndexExpression, InstantiationExpression, LambdaExpression,
    ListExpression, MapEntry, MapExpression, Parameter, Statement, SwitchExpression,
    SyntaxType, TokenExpression, TupleExpression, UnaryExpression, UnaryOperation,
    WithExpression,
};
use crate::lexer::{Token, TokenKind};
use crate::parser::{ParseResult, Parser};
use rustc_hash::FxHashSet;

impl Parser {
    /// Parses a full expression. Every expression entry point first makes a
    /// cheap speculative attempt at a lambda.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression> {
        if let Some(lambda) = self.try_lambda() {
            return Ok(lambda);
        }
        self.parse_assignment()
    }

    /// Assignment level: right-associative, chained.
    pub(crate) fn parse_assignment(&mut self) -> ParseResult<Expression> {
        let target = self.parse_conditional()?;
        if self.at(TokenKind::Eq) {
            self.bump();
            let value = self.parse_expression()?;
            let range = target.range().cover(value.range());
            return Ok(Expression::Assignment(AssignmentExpression {
                target: Box::new(target),
                value: Box::new(value),
                range,
            }));
        }
        Ok(target)
    }

    /// Conditional level: `cond ? then : else`, right-associative, with an
    /// optional else branch.
    fn parse_conditional(&mut self) -> ParseResult<Expression> {
        let condition = self.parse_binary(0)?;
        if !self.at(TokenKind::Question) {
            return Ok(condition);
        }
        self.bump();
        let then_branch = self.parse_expression()?;
        let else_branch = if self.bump_if(TokenKind::Colon).is_some() {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        let end = else_branch
            .as_deref()
            .map_or_else(|| then_branch.range(), Expression::range);
        let range = condition.range().cover(end);
        Ok(Expression::Conditional(ConditionalExpression {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch,
            range,
        }))
    }

    /// Pratt loop for the uniform binary levels.
    fn parse_binary(&mut self, min_bp: u8) -> ParseResult<Expression> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let op_kind = self.kind();
            let Some((l_bp, r_bp)) = op_kind.infix_binding_power() else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let Some(operation) = BinaryOperation::from_token(op_kind) else {
                break;
            };

            let operator = self.bump();
            // `is`/`as` take a type on the right, not an expression.
            let right = if matches!(operation, BinaryOperation::Is | BinaryOperation::As) {
                Expression::Type(self.parse_syntax_type()?)
            } else {
                self.parse_binary(r_bp)?
            };
            let range = lhs.range().cover(right.range());
            lhs = Expression::Binary(BinaryExpression {
                left: Box::new(lhs),
                operation,
                operator: operator.clone(),
                right: Box::new(right),
                range,
            });

            // The relational level does not chain: at most one comparison
            // per sub-expression.
            if operator.kind.is_comparison_op() && self.kind().is_comparison_op() {
                if let Some(token) = self.current() {
                    let range = token.range;
                    self.error_at(range, "comparison operators cannot be chained");
                }
            }
        }

        Ok(lhs)
    }

    /// Prefix unary level, right-recursive. A prefix operator applied
    /// directly to a literal token folds into a new literal.
    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        let Some(operation) = UnaryOperation::prefix_from_token(self.kind()) else {
            return self.parse_postfix();
        };
        let operator = self.bump();
        let operand = self.parse_prefix()?;
        Ok(fold_prefix_literal(operation, operator, operand))
    }

    /// Postfix chain over a primary expression.
    ///
    /// At most one call is consumed until the chain moves through an
    /// access, index, or instantiation step. A cast terminates the chain.
    /// When indexing fails on a bare name, the whole chain is re-parsed as
    /// a type expression (`name[i]` vs `Name[T]`).
    fn parse_postfix(&mut self) -> ParseResult<Expression> {
        let chain_start = self.position();
        let mut expr = self.parse_primary()?;
        let mut calls_enabled = true;

        loop {
            match self.kind() {
                TokenKind::ColonColon => {
                    self.bump();
                    let target = self.parse_syntax_type()?;
                    let range = expr.range().cover(target.range());
                    return Ok(Expression::Cast(CastExpression {
                        operand: Box::new(expr),
                        target,
                        range,
                    }));
                }
                TokenKind::LParen if calls_enabled => {
                    let (arguments, rparen) = self.parse_call_arguments()?;
                    let range = expr.range().cover(rparen.range);
                    expr = Expression::FunctionCall(FunctionCallExpression {
                        callee: Box::new(expr),
                        arguments,
                        range,
                    });
                    calls_enabled = false;
                }
                TokenKind::Dot | TokenKind::QuestionDot => {
                    let op = self.bump();
                    let member = self.expect(TokenKind::Ident, "member name")?;
                    let range = expr.range().cover(member.range);
                    expr = Expression::Access(AccessExpression {
                        source: Box::new(expr),
                        member,
                        null_checked: op.kind == TokenKind::QuestionDot,
                        range,
                    });
                    calls_enabled = true;
                }
                TokenKind::LBracket | TokenKind::QuestionLBracket => {
                    let op = self.bump();
                    let index = self
                        .parse_expression()
                        .and_then(|index| {
                            let rbracket = self.expect(TokenKind::RBracket, "']'")?;
                            Ok((index, rbracket))
                        });
                    match index {
                        Ok((index, rbracket)) => {
                            let range = expr.range().cover(rbracket.range);
                            expr = Expression::Index(IndexExpression {
                                source: Box::new(expr),
                                index: Box::new(index),
                                null_checked: op.kind == TokenKind::QuestionLBracket,
                                range,
                            });
                            calls_enabled = true;
                        }
                        Err(error) => {
                            // Commit to type syntax only when expression
                            // parsing fails on a bare name.
                            if op.kind == TokenKind::LBracket && expr.as_name_token().is_some() {
                                self.restore(chain_start);
                                let ty = self.parse_syntax_type()?;
                                expr = Expression::Type(ty);
                                calls_enabled = true;
                            } else {
                                return Err(error);
                            }
                        }
                    }
                }
                TokenKind::LBrace if self.struct_literals_allowed() => {
                    let Some(ty) = expr.to_syntax_type() else {
                        break;
                    };
                    expr = self.parse_instantiation(ty)?;
                    calls_enabled = true;
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let operator = self.bump();
                    let Some(operation) = UnaryOperation::postfix_from_token(operator.kind)
                    else {
                        break;
                    };
                    let range = expr.range().cover(operator.range);
                    expr = Expression::Unary(UnaryExpression {
                        operand: Box::new(expr),
                        operation,
                        operator,
                        is_prefix: false,
                        range,
                    });
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Parses `Type{field = expr, ...}` once the preceding expression has
    /// been committed to a type.
    fn parse_instantiation(&mut self, ty: SyntaxType) -> ParseResult<Expression> {
        if !matches!(ty, SyntaxType::Base(_) | SyntaxType::Generic(_)) {
            self.error_at(ty.range(), "this type cannot be instantiated with field syntax");
        }
        self.bump(); // {

        let mut fields = Vec::new();
        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
        while !self.at(TokenKind::RBrace) && !self.at_end() {
            let name = self.expect(TokenKind::Ident, "field name")?;
            if !seen.insert(name.text.clone()) {
                let range = name.range;
                self.error_at(range, format!("duplicate field '{}' in initializer", name.text));
            }
            self.expect(TokenKind::Eq, "'='")?;
            let value = self.parse_expression()?;
            fields.push(FieldInitializer { name, value });

            if self.bump_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        let rbrace = self.expect(TokenKind::RBrace, "'}'")?;
        let range = ty.range().cover(rbrace.range);
        Ok(Expression::Instantiation(InstantiationExpression {
            ty,
            fields,
            range,
        }))
    }

    /// Parses a call argument list, returning the arguments and the closing
    /// parenthesis.
    fn parse_call_arguments(&mut self) -> ParseResult<(Vec<Expression>, Token)> {
        self.bump(); // (
        let mut arguments = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_end() {
            arguments.push(self.parse_expression()?);
            if self.bump_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        let rparen = self.expect(TokenKind::RParen, "')'")?;
        Ok((arguments, rparen))
    }

    /// Primary expressions: literals, identifiers, parenthesized
    /// expressions and tuples, lists and maps, type expressions, and the
    /// `switch`/`with` shells.
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.kind() {
            TokenKind::IntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::CharLiteral
            | TokenKind::KwTrue
            | TokenKind::KwFalse
            | TokenKind::KwNull
            | TokenKind::KwThis
            | TokenKind::KwNew
            | TokenKind::Ident => {
                let token = self.bump();
                let range = token.range;
                Ok(Expression::Token(TokenExpression { token, range }))
            }
            TokenKind::InterpolatedStringLiteral => self.parse_interpolated_string(),
            TokenKind::LParen => self.parse_paren_or_tuple(),
            TokenKind::LBracket => self.parse_list_or_map(),
            TokenKind::KwSwitch => {
                let keyword = self.bump();
                let range = keyword.range;
                Ok(Expression::Switch(SwitchExpression { keyword, range }))
            }
            TokenKind::KwWith => {
                let keyword = self.bump();
                let range = keyword.range;
                Ok(Expression::With(WithExpression { keyword, range }))
            }
            kind if kind.is_type_keyword() || kind == TokenKind::KwRef => {
                Ok(Expression::Type(self.parse_syntax_type()?))
            }
            _ => Err(self.unexpected("expected expression")),
        }
    }

    /// A parenthesized expression or a tuple. A single parenthesized
    /// expression is unwrapped, not a one-element tuple.
    fn parse_paren_or_tuple(&mut self) -> ParseResult<Expression> {
        let lparen = self.bump();
        let first = self.parse_expression()?;
        if !self.at(TokenKind::Comma) {
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(first);
        }

        let mut elements = vec![first];
        while self.bump_if(TokenKind::Comma).is_some() {
            if self.at(TokenKind::RParen) {
                break;
            }
            elements.push(self.parse_expression()?);
        }
        let rparen = self.expect(TokenKind::RParen, "')'")?;
        Ok(Expression::Tuple(TupleExpression {
            elements,
            range: lparen.range.cover(rparen.range),
        }))
    }

    /// At `[` the parser first attempts a map (which needs at least one
    /// `key => value` entry) and falls back to a list on failure.
    fn parse_list_or_map(&mut self) -> ParseResult<Expression> {
        let checkpoint = self.checkpoint();
        match self.parse_map_inner() {
            Ok(map) => {
                checkpoint.commit();
                Ok(map)
            }
            Err(_) => {
                checkpoint.rewind(self);
                self.parse_list_inner()
            }
        }
    }

    fn parse_map_inner(&mut self) -> ParseResult<Expression> {
        let lbracket = self.bump(); // [
        let mut entries = Vec::new();

        // Map keys skip the lambda attempt so that `[x => y]` reads as an
        // entry rather than a single-parameter lambda.
        let key = self.parse_assignment()?;
        self.expect(TokenKind::FatArrow, "'=>'")?;
        let value = self.parse_expression()?;
        entries.push(MapEntry { key, value });

        while self.bump_if(TokenKind::Comma).is_some() {
            if self.at(TokenKind::RBracket) || self.at(TokenKind::Colon) {
                break;
            }
            let key = self.parse_assignment()?;
            self.expect(TokenKind::FatArrow, "'=>'")?;
            let value = self.parse_expression()?;
            entries.push(MapEntry { key, value });
        }

        let entry_type = self.parse_bracket_annotation()?;
        if let Some(ty) = &entry_type {
            let is_pair = matches!(ty, SyntaxType::Tuple(t) if t.components.len() == 2);
            if !is_pair {
                self.error_at(
                    ty.range(),
                    "a map type annotation must be a tuple of exactly two types",
                );
            }
        }
        let rbracket = self.expect(TokenKind::RBracket, "']'")?;
        Ok(Expression::Map(MapExpression {
            entries,
            entry_type,
            range: lbracket.range.cover(rbracket.range),
        }))
    }

    fn parse_list_inner(&mut self) -> ParseResult<Expression> {
        let lbracket = self.bump(); // [
        let mut elements = Vec::new();
        while !self.at(TokenKind::RBracket)
            && !self.at(TokenKind::Colon)
            && !self.at_end()
        {
            elements.push(self.parse_expression()?);
            if self.bump_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        let element_type = self.parse_bracket_annotation()?;
        let rbracket = self.expect(TokenKind::RBracket, "']'")?;
        Ok(Expression::List(ListExpression {
            elements,
            element_type,
            range: lbracket.range.cover(rbracket.range),
        }))
    }

    fn parse_bracket_annotation(&mut self) -> ParseResult<Option<SyntaxType>> {
        if self.bump_if(TokenKind::Colon).is_some() {
            Ok(Some(self.parse_syntax_type()?))
        } else {
            Ok(None)
        }
    }

    // =========================================================================
    // Lambdas
    // =========================================================================

    /// Speculatively parses a lambda. Returns `None` and restores the
    /// parser state if the input is not one.
    fn try_lambda(&mut self) -> Option<Expression> {
        let worth_trying = self.at(TokenKind::LParen)
            || (self.at(TokenKind::Ident) && self.nth_kind(1) == TokenKind::FatArrow);
        if !worth_trying {
            return None;
        }

        let checkpoint = self.checkpoint();
        match self.parse_lambda_inner() {
            Ok(lambda) => {
                checkpoint.commit();
                Some(lambda)
            }
            Err(_) => {
                checkpoint.rewind(self);
                None
            }
        }
    }

    /// `(params) [-> Type] { ... }`, `(params) [-> Type] => expr`, or the
    /// single-identifier form `x => expr`. Parenthesized parameters require
    /// explicit type annotations, which keeps the speculative parse cheap.
    fn parse_lambda_inner(&mut self) -> ParseResult<Expression> {
        if self.at(TokenKind::Ident) {
            let identifier = self.bump();
            let range = identifier.range;
            let parameter = Parameter {
                identifier,
                ty: None,
                default: None,
                is_variadic: false,
                is_mutable: false,
                range,
            };
            self.expect(TokenKind::FatArrow, "'=>'")?;
            let body = self.parse_expression()?;
            let full = range.cover(body.range());
            let body_range = body.range();
            return Ok(Expression::Lambda(LambdaExpression {
                parameters: vec![parameter],
                return_type: None,
                body: Box::new(Statement::Expression(ExpressionStatement {
                    expression: body,
                    range: body_range,
                })),
                range: full,
            }));
        }

        let lparen = self.expect(TokenKind::LParen, "'('")?;
        let mut parameters = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_end() {
            parameters.push(self.parse_parameter(true, false)?);
            if self.bump_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;

        let return_type = if self.bump_if(TokenKind::Arrow).is_some() {
            Some(self.parse_syntax_type()?)
        } else {
            None
        };

        let body = if self.at(TokenKind::LBrace) {
            self.parse_block_statement()?
        } else {
            self.expect(TokenKind::FatArrow, "'=>'")?;
            let expression = self.parse_expression()?;
            let range = expression.range();
            Statement::Expression(ExpressionStatement { expression, range })
        };
        let range = lparen.range.cover(body.range());
        Ok(Expression::Lambda(LambdaExpression {
            parameters,
            return_type,
            body: Box::new(body),
            range,
        }))
    }
}

/// Folds a prefix operator into a literal operand where the language
/// defines a folded result; otherwise builds a plain unary node.
///
/// `+` on a numeric literal returns the operand unchanged. `-` negates
/// signed integer literals in their own width, saturating at the width's
/// bounds. `~` inverts integer literals of any width. `!` flips booleans.
fn fold_prefix_literal(
    operation: UnaryOperation,
    operator: Token,
    operand: Expression,
) -> Expression {
    let folded = match &operand {
        Expression::Token(token_expr) => match &token_expr.token.value {
            Some(value) if operation == UnaryOperation::Identity && value.is_numeric() => {
                // `+` leaves the literal untouched.
                return operand;
            }
            Some(value) => match operation {
                UnaryOperation::Negate => value.negated(),
                UnaryOperation::BitwiseNegate => value.bitwise_inverted(),
                UnaryOperation::LogicalNot => value.logically_inverted(),
                _ => None,
            },
            None => None,
        },
        _ => None,
    };

    if let (Some(folded), Expression::Token(token_expr)) = (folded, &operand) {
        let range = operator.range.cover(operand.range());
        let mut token = token_expr.token.clone();
        token.value = Some(folded);
        token.range = range;
        token.text = SmolStr::new(token.source.slice(range));
        token.line = operator.line;
        token.column = operator.column;
        return Expression::Token(TokenExpression { token, range });
    }

    let range = operator.range.cover(operand.range());
    Expression::Unary(UnaryExpression {
        operand: Box::new(operand),
        operation,
        operator,
        is_prefix: true,
        range,
    })
}
