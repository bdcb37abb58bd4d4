//! Expression nodes.

use text_size::TextRange;

use crate::ast::operations::OperationExpression;
use crate::ast::parameter::Parameter;
use crate::ast::statements::Statement;
use crate::ast::types::{BaseSyntaxType, GenericSyntaxType, SyntaxType};
use crate::lexer::{Token, TokenKind};

/// Binary operation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum BinaryOperation {
    NullCoalescence,
    Equals,
    NotEquals,
    Or,
    Xor,
    And,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    Is,
    As,
    RotateLeft,
    RotateRight,
    ShiftLeft,
    ShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    PositiveModulo,
    Modulo,
    Power,
    RangeInclusive,
    RangeExclusive,
}

impl BinaryOperation {
    /// Maps an operator token to its operation tag.
    ///
    /// Both the single- and double-character spellings of `|`, `^`, and `&`
    /// map to the same tag; distinguishing bitwise from logical use is the
    /// resolver's job.
    #[must_use]
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::QuestionQuestion => Self::NullCoalescence,
            TokenKind::EqEq => Self::Equals,
            TokenKind::NotEq => Self::NotEquals,
            TokenKind::Pipe | TokenKind::PipePipe => Self::Or,
            TokenKind::Caret | TokenKind::CaretCaret => Self::Xor,
            TokenKind::Amp | TokenKind::AmpAmp => Self::And,
            TokenKind::Lt => Self::LessThan,
            TokenKind::Gt => Self::GreaterThan,
            TokenKind::LtEq => Self::LessEqual,
            TokenKind::GtEq => Self::GreaterEqual,
            TokenKind::KwIs => Self::Is,
            TokenKind::KwAs => Self::As,
            TokenKind::RotLeft => Self::RotateLeft,
            TokenKind::RotRight => Self::RotateRight,
            TokenKind::Shl => Self::ShiftLeft,
            TokenKind::Shr => Self::ShiftRight,
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Subtract,
            TokenKind::Star => Self::Multiply,
            TokenKind::Slash => Self::Divide,
            TokenKind::PercentPercent => Self::PositiveModulo,
            TokenKind::Percent => Self::Modulo,
            TokenKind::StarStar => Self::Power,
            TokenKind::DotDotEq => Self::RangeInclusive,
            TokenKind::DotDot => Self::RangeExclusive,
            _ => return None,
        })
    }
}

/// Unary operation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum UnaryOperation {
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    Identity,
    Negate,
    BitwiseNegate,
    LogicalNot,
    Await,
}

impl UnaryOperation {
    /// Maps a prefix operator token to its operation tag.
    #[must_use]
    pub fn prefix_from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::PlusPlus => Self::PreIncrement,
            TokenKind::MinusMinus => Self::PreDecrement,
            TokenKind::Plus => Self::Identity,
            TokenKind::Minus => Self::Negate,
            TokenKind::Tilde => Self::BitwiseNegate,
            TokenKind::Bang => Self::LogicalNot,
            TokenKind::KwAwait => Self::Await,
            _ => return None,
        })
    }

    /// Maps a postfix operator token to its operation tag.
    #[must_use]
    pub fn postfix_from_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::PlusPlus => Self::PostIncrement,
            TokenKind::MinusMinus => Self::PostDecrement,
            _ => return None,
        })
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal or identifier token reference.
    Token(TokenExpression),
    /// A tuple: `(a, b)`. Never has fewer than two elements.
    Tuple(TupleExpression),
    /// A list literal: `[a, b : T]`.
    List(ListExpression),
    /// A map literal: `[k => v : (K, V)]`.
    Map(MapExpression),
    /// Struct construction: `Type{field = expr}`.
    Instantiation(InstantiationExpression),
    /// A function call: `callee(args)`.
    FunctionCall(FunctionCallExpression),
    /// A cast: `operand :: Type`.
    Cast(CastExpression),
    /// Member access: `a.b` or `a?.b`.
    Access(AccessExpression),
    /// Indexing: `a[i]` or `a?[i]`.
    Index(IndexExpression),
    /// Assignment: `target = value`, right-associative.
    Assignment(AssignmentExpression),
    /// A lambda: `(params) -> T { ... }` or `x => expr`.
    Lambda(LambdaExpression),
    /// The conditional operator: `a ? b : c`.
    Conditional(ConditionalExpression),
    /// A binary operation.
    Binary(BinaryExpression),
    /// A unary operation, prefix or postfix.
    Unary(UnaryExpression),
    /// A `switch` expression shell; the body grammar is not settled yet.
    Switch(SwitchExpression),
    /// A `with` expression shell; the body grammar is not settled yet.
    With(WithExpression),
    /// An interpolated string with literal and expression parts.
    InterpolatedString(InterpolatedStringExpression),
    /// A type expression in expression position.
    Type(SyntaxType),
    /// An operator-overload signature.
    Operation(OperationExpression),
}

/// A literal or identifier token in expression position.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenExpression {
    /// The token, copied by value.
    pub token: Token,
    /// Source range. Differs from the token's own range when a prefix
    /// operator was folded into the literal.
    pub range: TextRange,
}

/// A tuple expression with two or more elements.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleExpression {
    /// The elements, in source order.
    pub elements: Vec<Expression>,
    /// Source range including the parentheses.
    pub range: TextRange,
}

/// A list literal, optionally annotated with an element type.
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpression {
    /// The elements, in source order.
    pub elements: Vec<Expression>,
    /// The `: T` element type annotation, if present.
    pub element_type: Option<SyntaxType>,
    /// Source range including the brackets.
    pub range: TextRange,
}

/// One `key => value` entry of a map literal.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    /// The key expression.
    pub key: Expression,
    /// The value expression.
    pub value: Expression,
}

/// A map literal, optionally annotated with a `(K, V)` tuple type.
#[derive(Debug, Clone, PartialEq)]
pub struct MapExpression {
    /// The entries, in source order. Never empty.
    pub entries: Vec<MapEntry>,
    /// The `: (K, V)` annotation, if present. Always a two-component tuple
    /// in well-formed programs.
    pub entry_type: Option<SyntaxType>,
    /// Source range including the brackets.
    pub range: TextRange,
}

/// One `field = value` initializer of an instantiation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInitializer {
    /// The field name.
    pub name: Token,
    /// The initializer expression.
    pub value: Expression,
}

/// Struct construction syntax.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantiationExpression {
    /// The type being constructed.
    pub ty: SyntaxType,
    /// The field initializers. Field names are unique.
    pub fields: Vec<FieldInitializer>,
    /// Source range including the braces.
    pub range: TextRange,
}

/// A function call.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallExpression {
    /// The callee expression.
    pub callee: Box<Expression>,
    /// The arguments, in source order.
    pub arguments: Vec<Expression>,
    /// Source range including the argument parentheses.
    pub range: TextRange,
}

/// A cast written `operand :: Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpression {
    /// The expression being cast.
    pub operand: Box<Expression>,
    /// The target type.
    pub target: SyntaxType,
    /// Source range of operand and type.
    pub range: TextRange,
}

/// Member access, `.` or null-checked `?.`.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessExpression {
    /// The accessed expression.
    pub source: Box<Expression>,
    /// The member name.
    pub member: Token,
    /// `true` for `?.`.
    pub null_checked: bool,
    /// Source range of source and member.
    pub range: TextRange,
}

/// Indexing, `[...]` or null-checked `?[...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpression {
    /// The indexed expression.
    pub source: Box<Expression>,
    /// The index expression.
    pub index: Box<Expression>,
    /// `true` for `?[`.
    pub null_checked: bool,
    /// Source range including the brackets.
    pub range: TextRange,
}

/// An assignment expression. Chained assignments nest to the right.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    /// The assignment target.
    pub target: Box<Expression>,
    /// The assigned value.
    pub value: Box<Expression>,
    /// Source range of target and value.
    pub range: TextRange,
}

/// A lambda expression.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpression {
    /// The parameters. In the parenthesized form every parameter has an
    /// explicit type.
    pub parameters: Vec<Parameter>,
    /// The declared return type, if any.
    pub return_type: Option<SyntaxType>,
    /// The body: a block statement, or an expression statement for the
    /// `=> expr` form.
    pub body: Box<Statement>,
    /// Source range of the whole lambda.
    pub range: TextRange,
}

/// The conditional (ternary) operator.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    /// The condition.
    pub condition: Box<Expression>,
    /// The value when the condition holds.
    pub then_branch: Box<Expression>,
    /// The value otherwise, if an else branch was written.
    pub else_branch: Option<Box<Expression>>,
    /// Source range of the whole conditional.
    pub range: TextRange,
}

/// A binary operation.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// The left operand.
    pub left: Box<Expression>,
    /// The operation tag.
    pub operation: BinaryOperation,
    /// The operator token.
    pub operator: Token,
    /// The right operand. For `is`/`as` this is a [`Expression::Type`].
    pub right: Box<Expression>,
    /// Source range of both operands.
    pub range: TextRange,
}

/// A unary operation, prefix or postfix.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// The operand.
    pub operand: Box<Expression>,
    /// The operation tag.
    pub operation: UnaryOperation,
    /// The operator token.
    pub operator: Token,
    /// `true` for prefix operators.
    pub is_prefix: bool,
    /// Source range of operator and operand.
    pub range: TextRange,
}

/// A `switch` expression shell. The parser accepts the keyword; the body is
/// not parsed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchExpression {
    /// The `switch` keyword.
    pub keyword: Token,
    /// Source range of the keyword.
    pub range: TextRange,
}

/// A `with` expression shell. The parser accepts the keyword; the body is
/// not parsed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct WithExpression {
    /// The `with` keyword.
    pub keyword: Token,
    /// Source range of the keyword.
    pub range: TextRange,
}

/// An interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedStringExpression {
    /// The parts in source order: string-literal [`Expression::Token`]s for
    /// literal runs, parsed sub-expressions for `{...}` holes.
    pub parts: Vec<Expression>,
    /// Source range of the whole literal.
    pub range: TextRange,
}

impl Expression {
    /// The source range of this expression.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Token(e) => e.range,
            Self::Tuple(e) => e.range,
            Self::List(e) => e.range,
            Self::Map(e) => e.range,
            Self::Instantiation(e) => e.range,
            Self::FunctionCall(e) => e.range,
            Self::Cast(e) => e.range,
            Self::Access(e) => e.range,
            Self::Index(e) => e.range,
            Self::Assignment(e) => e.range,
            Self::Lambda(e) => e.range,
            Self::Conditional(e) => e.range,
            Self::Binary(e) => e.range,
            Self::Unary(e) => e.range,
            Self::Switch(e) => e.range,
            Self::With(e) => e.range,
            Self::InterpolatedString(e) => e.range,
            Self::Type(t) => t.range(),
            Self::Operation(o) => o.range(),
        }
    }

    /// Returns the underlying token for a bare identifier or type-keyword
    /// expression.
    #[must_use]
    pub fn as_name_token(&self) -> Option<&Token> {
        match self {
            Self::Token(e)
                if e.token.kind == TokenKind::Ident || e.token.kind.is_type_keyword() =>
            {
                Some(&e.token)
            }
            _ => None,
        }
    }

    /// Reinterprets this expression as a type, when its shape allows it.
    ///
    /// Identifier and type-keyword tokens become base types; an index
    /// expression whose source and index both convert becomes a generic
    /// type. This is what instantiation syntax uses to commit `Name{...}`
    /// and `Name[T]{...}` to type syntax.
    #[must_use]
    pub fn to_syntax_type(&self) -> Option<SyntaxType> {
        match self {
            Self::Type(ty) => Some(ty.clone()),
            Self::Token(_) => self.as_name_token().map(|token| {
                SyntaxType::Base(BaseSyntaxType {
                    token: token.clone(),
                    range: self.range(),
                })
            }),
            Self::Index(index) if !index.null_checked => {
                let base = index.source.to_syntax_type()?;
                let argument = index.index.to_syntax_type()?;
                Some(SyntaxType::Generic(GenericSyntaxType {
                    base: Box::new(base),
                    arguments: vec![argument],
                    range: index.range,
                }))
            }
            _ => None,
        }
    }

    /// Dispatches to the visitor method for this variant.
    pub fn visit<V: ExpressionVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Token(e) => visitor.visit_token(e),
            Self::Tuple(e) => visitor.visit_tuple(e),
            Self::List(e) => visitor.visit_list(e),
            Self::Map(e) => visitor.visit_map(e),
            Self::Instantiation(e) => visitor.visit_instantiation(e),
            Self::FunctionCall(e) => visitor.visit_function_call(e),
            Self::Cast(e) => visitor.visit_cast(e),
            Self::Access(e) => visitor.visit_access(e),
            Self::Index(e) => visitor.visit_index(e),
            Self::Assignment(e) => visitor.visit_assignment(e),
            Self::Lambda(e) => visitor.visit_lambda(e),
            Self::Conditional(e) => visitor.visit_conditional(e),
            Self::Binary(e) => visitor.visit_binary(e),
            Self::Unary(e) => visitor.visit_unary(e),
            Self::Switch(e) => visitor.visit_switch(e),
            Self::With(e) => visitor.visit_with(e),
            Self::InterpolatedString(e) => visitor.visit_interpolated_string(e),
            Self::Type(t) => visitor.visit_type(t),
            Self::Operation(o) => visitor.visit_operation(o),
        }
    }
}

/// Value-producing visitor over expressions, one method per variant.
#[allow(missing_docs)]
pub trait ExpressionVisitor {
    /// The result type of a visit.
    type Output;

    fn visit_token(&mut self, expr: &TokenExpression) -> Self::Output;
    fn visit_tuple(&mut self, expr: &TupleExpression) -> Self::Output;
    fn visit_list(&mut self, expr: &ListExpression) -> Self::Output;
    fn visit_map(&mut self, expr: &MapExpression) -> Self::Output;
    fn visit_instantiation(&mut self, expr: &InstantiationExpression) -> Self::Output;
    fn visit_function_call(&mut self, expr: &FunctionCallExpression) -> Self::Output;
    fn visit_cast(&mut self, expr: &CastExpression) -> Self::Output;
    fn visit_access(&mut self, expr: &AccessExpression) -> Self::Output;
    fn visit_index(&mut self, expr: &IndexExpression) -> Self::Output;
    fn visit_assignment(&mut self, expr: &AssignmentExpression) -> Self::Output;
    fn visit_lambda(&mut self, expr: &LambdaExpression) -> Self::Output;
    fn visit_conditional(&mut self, expr: &ConditionalExpression) -> Self::Output;
    fn visit_binary(&mut self, expr: &BinaryExpression) -> Self::Output;
    fn visit_unary(&mut self, expr: &UnaryExpression) -> Self::Output;
    fn visit_switch(&mut self, expr: &SwitchExpression) -> Self::Output;
    fn visit_with(&mut self, expr: &WithExpression) -> Self::Output;
    fn visit_interpolated_string(&mut self, expr: &InterpolatedStringExpression)
        -> Self::Output;
    fn visit_type(&mut self, ty: &SyntaxType) -> Self::Output;
    fn visit_operation(&mut self, op: &OperationExpression) -> Self::Output;
}
