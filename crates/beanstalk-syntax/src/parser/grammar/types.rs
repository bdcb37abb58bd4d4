//! Type expression parsing.
//!
//! ```text
//! Type := tuple | lambda | 'var' ['ref'] Type | 'ref' Type
//!       | base ( '[' ']' | '[' typeList ']' | '[' expr ']' | '?' )*
//! ```

use crate::ast::{
    ArraySyntaxType, BaseSyntaxType, GenericSyntaxType, LambdaSyntaxType, MutableSyntaxType,
    NullableSyntaxType, ReferenceSyntaxType, SyntaxType, TupleSyntaxType,
};
use crate::lexer::{Token, TokenKind};
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// Parses a type expression.
    pub(crate) fn parse_syntax_type(&mut self) -> ParseResult<SyntaxType> {
        match self.kind() {
            TokenKind::LParen => self.parse_tuple_type(),
            TokenKind::KwFun => self.parse_lambda_type(),
            TokenKind::KwVar => {
                let var = self.bump();
                if self.at(TokenKind::KwRef) {
                    self.bump();
                    let base = self.parse_syntax_type()?;
                    let range = var.range.cover(base.range());
                    Ok(SyntaxType::Reference(ReferenceSyntaxType {
                        base: Box::new(base),
                        immutable: false,
                        range,
                    }))
                } else {
                    let base = self.parse_syntax_type()?;
                    let range = var.range.cover(base.range());
                    Ok(SyntaxType::Mutable(MutableSyntaxType {
                        base: Box::new(base),
                        range,
                    }))
                }
            }
            TokenKind::KwRef => {
                let reference = self.bump();
                let base = self.parse_syntax_type()?;
                let range = reference.range.cover(base.range());
                Ok(SyntaxType::Reference(ReferenceSyntaxType {
                    base: Box::new(base),
                    immutable: true,
                    range,
                }))
            }
            kind if kind == TokenKind::Ident || kind.is_type_keyword() => {
                let token = self.bump();
                let range = token.range;
                let base = SyntaxType::Base(BaseSyntaxType { token, range });
                self.parse_type_suffixes(base)
            }
            _ => Err(self.unexpected("expected type")),
        }
    }

    /// Parses the `[...]` and `?` suffixes on a base type.
    fn parse_type_suffixes(&mut self, mut ty: SyntaxType) -> ParseResult<SyntaxType> {
        loop {
            match self.kind() {
                TokenKind::LBracket => {
                    self.bump();

                    // T[] is an unsized array.
                    if let Some(rbracket) = self.bump_if(TokenKind::RBracket) {
                        let range = ty.range().cover(rbracket.range);
                        ty = SyntaxType::Array(ArraySyntaxType {
                            base: Box::new(ty),
                            size: None,
                            range,
                        });
                        continue;
                    }

                    // Try the type-argument list first; rewind into the
                    // sized-array form when it fails at the `]`.
                    let checkpoint = self.checkpoint();
                    match self.parse_type_argument_list() {
                        Ok((arguments, rbracket)) => {
                            checkpoint.commit();
                            let range = ty.range().cover(rbracket.range);
                            ty = SyntaxType::Generic(GenericSyntaxType {
                                base: Box::new(ty),
                                arguments,
                                range,
                            });
                        }
                        Err(_) => {
                            checkpoint.rewind(self);
                            let size = self.parse_expression()?;
                            let rbracket = self.expect(TokenKind::RBracket, "']'")?;
                            let range = ty.range().cover(rbracket.range);
                            ty = SyntaxType::Array(ArraySyntaxType {
                                base: Box::new(ty),
                                size: Some(Box::new(size)),
                                range,
                            });
                        }
                    }
                }
                TokenKind::Question => {
                    let question = self.bump();
                    let range = ty.range().cover(question.range);
                    ty = SyntaxType::Nullable(NullableSyntaxType {
                        base: Box::new(ty),
                        range,
                    });
                }
                _ => break,
            }
        }
        Ok(ty)
    }

    fn parse_type_argument_list(&mut self) -> ParseResult<(Vec<SyntaxType>, Token)> {
        let mut arguments = vec![self.parse_syntax_type()?];
        while self.bump_if(TokenKind::Comma).is_some() {
            arguments.push(self.parse_syntax_type()?);
        }
        let rbracket = self.expect(TokenKind::RBracket, "']'")?;
        Ok((arguments, rbracket))
    }

    /// `( T1, T2, ... )`. One component unwraps to the inner type.
    fn parse_tuple_type(&mut self) -> ParseResult<SyntaxType> {
        let lparen = self.bump();
        let mut components = vec![self.parse_syntax_type()?];
        while self.bump_if(TokenKind::Comma).is_some() {
            if self.at(TokenKind::RParen) {
                break;
            }
            components.push(self.parse_syntax_type()?);
        }
        let rparen = self.expect(TokenKind::RParen, "')'")?;
        if components.len() == 1 {
            // A parenthesized single type is the inner type, not a tuple.
            return Ok(components.remove(0));
        }
        Ok(SyntaxType::Tuple(TupleSyntaxType {
            components,
            range: lparen.range.cover(rparen.range),
        }))
    }

    /// `fun ( T1, T2 ) [-> T]`.
    fn parse_lambda_type(&mut self) -> ParseResult<SyntaxType> {
        let fun = self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        let mut parameters = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_end() {
            parameters.push(self.parse_syntax_type()?);
            if self.bump_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        let rparen = self.expect(TokenKind::RParen, "')'")?;

        let mut range = fun.range.cover(rparen.range);
        let return_type = if self.bump_if(TokenKind::Arrow).is_some() {
            let return_type = self.parse_syntax_type()?;
            range = range.cover(return_type.range());
            Some(Box::new(return_type))
        } else {
            None
        };
        Ok(SyntaxType::Lambda(LambdaSyntaxType {
            parameters,
            return_type,
            range,
        }))
    }
}
