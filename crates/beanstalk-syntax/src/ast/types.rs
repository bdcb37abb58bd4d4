//! Syntax types: type expressions as they appear in source.
//!
//! A [`SyntaxType`] is the surface-level spelling of a type; resolving it to
//! a semantic type is the analyzer's job. Syntax types are also expressions
//! (see [`crate::ast::Expression::Type`]) so that postfix parsing can
//! reinterpret an expression as a type when instantiation syntax follows.

use text_size::TextRange;

use crate::ast::expressions::Expression;
use crate::lexer::Token;

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxType {
    /// A single type keyword or identifier: `i32`, `Point`.
    Base(BaseSyntaxType),
    /// An ordered sequence of two or more component types: `(i32, bool)`.
    Tuple(TupleSyntaxType),
    /// A base type with type arguments: `Map[K, V]`.
    Generic(GenericSyntaxType),
    /// An array type, optionally sized: `i32[]`, `i32[8]`.
    Array(ArraySyntaxType),
    /// A nullable type: `T?`.
    Nullable(NullableSyntaxType),
    /// A mutable type: `var T`.
    Mutable(MutableSyntaxType),
    /// A reference type: `ref T` (immutable) or `var ref T` (mutable).
    Reference(ReferenceSyntaxType),
    /// A lambda type: `fun(i32, i32) -> i32`.
    Lambda(LambdaSyntaxType),
}

/// A single type keyword or identifier token.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseSyntaxType {
    /// The type keyword or identifier.
    pub token: Token,
    /// Source range of the type.
    pub range: TextRange,
}

/// A tuple of component types. A parenthesized single type is not a tuple;
/// the parser unwraps it.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleSyntaxType {
    /// The component types, always two or more.
    pub components: Vec<SyntaxType>,
    /// Source range including the parentheses.
    pub range: TextRange,
}

/// A base type applied to ordered type arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericSyntaxType {
    /// The type being parameterized.
    pub base: Box<SyntaxType>,
    /// The type arguments, in source order.
    pub arguments: Vec<SyntaxType>,
    /// Source range including the brackets.
    pub range: TextRange,
}

/// An array type with an optional size expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySyntaxType {
    /// The element type.
    pub base: Box<SyntaxType>,
    /// The size expression for `T[expr]`, `None` for `T[]`.
    pub size: Option<Box<Expression>>,
    /// Source range including the brackets.
    pub range: TextRange,
}

/// A type marked nullable with `?`.
#[derive(Debug, Clone, PartialEq)]
pub struct NullableSyntaxType {
    /// The underlying type.
    pub base: Box<SyntaxType>,
    /// Source range including the `?`.
    pub range: TextRange,
}

/// A type marked mutable with `var`.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableSyntaxType {
    /// The underlying type.
    pub base: Box<SyntaxType>,
    /// Source range including the `var`.
    pub range: TextRange,
}

/// A reference type.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSyntaxType {
    /// The referenced type.
    pub base: Box<SyntaxType>,
    /// `true` for `ref T`, `false` for `var ref T`.
    pub immutable: bool,
    /// Source range including the markers.
    pub range: TextRange,
}

/// A lambda type: ordered parameter types and an optional return type.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaSyntaxType {
    /// The parameter types, in source order.
    pub parameters: Vec<SyntaxType>,
    /// The return type after `->`, if any.
    pub return_type: Option<Box<SyntaxType>>,
    /// Source range from `fun` to the end of the signature.
    pub range: TextRange,
}

impl SyntaxType {
    /// The source range of this type.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Self::Base(t) => t.range,
            Self::Tuple(t) => t.range,
            Self::Generic(t) => t.range,
            Self::Array(t) => t.range,
            Self::Nullable(t) => t.range,
            Self::Mutable(t) => t.range,
            Self::Reference(t) => t.range,
            Self::Lambda(t) => t.range,
        }
    }

    /// Dispatches to the visitor method for this variant.
    pub fn visit<V: SyntaxTypeVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Base(t) => visitor.visit_base(t),
            Self::Tuple(t) => visitor.visit_tuple(t),
            Self::Generic(t) => visitor.visit_generic(t),
            Self::Array(t) => visitor.visit_array(t),
            Self::Nullable(t) => visitor.visit_nullable(t),
            Self::Mutable(t) => visitor.visit_mutable(t),
            Self::Reference(t) => visitor.visit_reference(t),
            Self::Lambda(t) => visitor.visit_lambda(t),
        }
    }
}

/// Value-producing visitor over syntax types, one method per variant.
#[allow(missing_docs)]
pub trait SyntaxTypeVisitor {
    /// The result type of a visit.
    type Output;

    fn visit_base(&mut self, ty: &BaseSyntaxType) -> Self::Output;
    fn visit_tuple(&mut self, ty: &TupleSyntaxType) -> Self::Output;
    fn visit_generic(&mut self, ty: &GenericSyntaxType) -> Self::Output;
    fn visit_array(&mut self, ty: &ArraySyntaxType) -> Self::Output;
    fn visit_nullable(&mut self, ty: &NullableSyntaxType) -> Self::Output;
    fn visit_mutable(&mut self, ty: &MutableSyntaxType) -> Self::Output;
    fn visit_reference(&mut self, ty: &ReferenceSyntaxType) -> Self::Output;
    fn visit_lambda(&mut self, ty: &LambdaSyntaxType) -> Self::Output;
}
