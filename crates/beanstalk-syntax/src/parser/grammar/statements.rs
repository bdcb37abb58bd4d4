//! Statement and declaration parsing.
//!
//! Covered here:
//! - Blocks, `if`/`else`, `return`, expression statements
//! - `var`/`let`/`const` declarations and `def` type aliases
//! - `entry`, function declarations (including the `=> external` tail)
//! - Structs with their member declarations (fields, methods,
//!   constructor/destructor, `string`, casts, operators) and interfaces

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::ast::{
    BaseSyntaxType, BlockStatement, CastDeclarationStatement, ConstVarDeclarationStatement,
    ConstructorDeclarationStatement, DefineStatement, DestructorDeclarationStatement,
    EntryStatement, Expression, ExpressionStatement, ExternalFunctionStatement,
    FieldDeclarationStatement, FunctionDeclarationStatement, IfStatement,
    ImmutableVarDeclarationStatement, InterfaceDeclarationStatement, Mutability,
    MutableVarDeclarationStatement, OperatorDeclarationStatement, Parameter, ReturnStatement,
    Statement, StringDeclarationStatement, StructDeclarationStatement, SyntaxType,
    TokenExpression,
};
use crate::lexer::{Token, TokenKind};
use crate::parser::grammar::operations::require_operator;
use crate::parser::{ParseResult, Parser};
use crate::token_set::TokenSet;
use rustc_hash::FxHashSet;

/// Sync tokens for statement lists inside blocks.
const BLOCK_SYNC: TokenSet = TokenSet::new(&[
    TokenKind::RBrace,
    TokenKind::Semicolon,
    TokenKind::KwVar,
    TokenKind::KwLet,
    TokenKind::KwConst,
    TokenKind::KwIf,
    TokenKind::KwReturn,
    TokenKind::KwFun,
    TokenKind::KwStatic,
    TokenKind::KwStruct,
    TokenKind::KwInterface,
    TokenKind::KwDef,
    TokenKind::KwEntry,
]);

/// Sync tokens for struct and interface bodies.
const STRUCT_BODY_SYNC: TokenSet = TokenSet::new(&[
    TokenKind::RBrace,
    TokenKind::Semicolon,
    TokenKind::KwStatic,
    TokenKind::KwVar,
    TokenKind::KwConst,
    TokenKind::KwFun,
    TokenKind::KwConstructor,
    TokenKind::KwDestructor,
    TokenKind::KwString,
    TokenKind::KwCast,
    TokenKind::KwOperator,
    TokenKind::KwImplicit,
    TokenKind::KwExplicit,
]);

impl Parser {
    /// Parses a single statement.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.kind() {
            TokenKind::LBrace => self.parse_block_statement(),
            TokenKind::KwIf => self.parse_if_statement(),
            TokenKind::KwReturn => self.parse_return_statement(),
            TokenKind::KwLet | TokenKind::KwConst => self.parse_var_declaration(),
            TokenKind::KwVar => match self.nth_kind(1) {
                TokenKind::KwFun | TokenKind::KwStatic => self.parse_function_statement(),
                TokenKind::KwStruct => self.parse_struct_declaration(),
                _ => self.parse_var_declaration(),
            },
            TokenKind::KwStatic | TokenKind::KwFun => self.parse_function_statement(),
            TokenKind::KwOperator => self.parse_operator_declaration(),
            TokenKind::KwStruct => self.parse_struct_declaration(),
            TokenKind::KwInterface => self.parse_interface_declaration(),
            TokenKind::KwDef => self.parse_define_statement(),
            TokenKind::KwEntry => self.parse_entry_statement(),
            TokenKind::KwModule => self.parse_module_statement(false),
            TokenKind::KwImport => {
                let range = self.current_range();
                self.error_at(range, "imports are only allowed at file scope");
                self.parse_import_statement()
            }
            kind if kind.can_start_expression() => {
                let expression = self.parse_expression()?;
                let range = expression.range();
                Ok(Statement::Expression(ExpressionStatement { expression, range }))
            }
            _ => Err(self.unexpected("expected statement")),
        }
    }

    /// Parses a brace-delimited block.
    pub(crate) fn parse_block_statement(&mut self) -> ParseResult<Statement> {
        let lbrace = self.expect(TokenKind::LBrace, "'{'")?;
        let mut statements = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_end() {
            if self.bump_if(TokenKind::Semicolon).is_some() {
                continue;
            }
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => self.recover(error, BLOCK_SYNC),
            }
        }
        let rbrace = self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Statement::Block(BlockStatement {
            statements,
            range: lbrace.range.cover(rbrace.range),
        }))
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.bump();
        // The brace after the condition starts the then-block, so
        // instantiation syntax is off while the condition parses.
        let condition = self.with_struct_literals(false, Parser::parse_expression)?;
        let then_branch = self.parse_block_statement()?;
        let else_branch = if self.bump_if(TokenKind::KwElse).is_some() {
            let branch = if self.at(TokenKind::KwIf) {
                self.parse_if_statement()?
            } else {
                self.parse_block_statement()?
            };
            Some(Box::new(branch))
        } else {
            None
        };

        let end = else_branch
            .as_deref()
            .map_or_else(|| then_branch.range(), Statement::range);
        let range = keyword.range.cover(end);
        Ok(Statement::If(IfStatement {
            condition,
            then_branch: Box::new(then_branch),
            else_branch,
            range,
        }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.bump();
        let expression = if self.kind().can_start_expression() {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let end = expression
            .as_ref()
            .map_or(keyword.range, Expression::range);
        Ok(Statement::Return(ReturnStatement {
            expression,
            range: keyword.range.cover(end),
        }))
    }

    /// `var`/`let`/`const` declarations. `let` and `const` require an
    /// initializer; a missing one is diagnosed and replaced by a
    /// zero-width placeholder so parsing continues.
    fn parse_var_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.bump();
        let identifier = self.expect(TokenKind::Ident, "variable name")?;
        let ty = if self.bump_if(TokenKind::Colon).is_some() {
            Some(self.parse_syntax_type()?)
        } else {
            None
        };
        let mut end = ty.as_ref().map_or(identifier.range, SyntaxType::range);
        let initializer = if self.bump_if(TokenKind::Eq).is_some() {
            let expression = self.parse_expression()?;
            end = expression.range();
            Some(expression)
        } else {
            None
        };
        let range = keyword.range.cover(end);

        Ok(match keyword.kind {
            TokenKind::KwVar => Statement::MutableVarDeclaration(MutableVarDeclarationStatement {
                identifier,
                ty,
                initializer,
                range,
            }),
            TokenKind::KwConst => {
                let initializer = initializer.unwrap_or_else(|| {
                    self.error_at(range, "'const' declarations require an initializer");
                    self.missing_expression(end.end())
                });
                Statement::ConstVarDeclaration(ConstVarDeclarationStatement {
                    identifier,
                    ty,
                    initializer,
                    range,
                })
            }
            _ => {
                let initializer = initializer.unwrap_or_else(|| {
                    self.error_at(range, "'let' declarations require an initializer");
                    self.missing_expression(end.end())
                });
                Statement::ImmutableVarDeclaration(ImmutableVarDeclarationStatement {
                    identifier,
                    ty,
                    initializer,
                    range,
                })
            }
        })
    }

    fn parse_define_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.bump();
        let identifier = self.expect(TokenKind::Ident, "type alias name")?;
        self.expect(TokenKind::KwAs, "'as'")?;
        let ty = self.parse_syntax_type()?;
        let range = keyword.range.cover(ty.range());
        Ok(Statement::Define(DefineStatement {
            identifier,
            ty,
            range,
        }))
    }

    fn parse_entry_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.bump();
        let (parameters, _) = self.parse_parameter_list(true, true)?;
        let body = self.parse_block_statement()?;
        let range = keyword.range.cover(body.range());
        Ok(Statement::Entry(EntryStatement {
            parameters,
            body: Box::new(body),
            range,
        }))
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// Parses `[static] [var] fun ...`, producing either a function
    /// declaration or, for the `=> external (...)` tail, an external
    /// function statement.
    pub(crate) fn parse_function_statement(&mut self) -> ParseResult<Statement> {
        let start = self.current_range();
        let mut static_token: Option<Token> = None;
        let mut var_token: Option<Token> = None;
        loop {
            match self.kind() {
                TokenKind::KwStatic => {
                    let token = self.bump();
                    if static_token.is_some() {
                        self.error_at(token.range, "duplicate 'static' modifier");
                    } else {
                        static_token = Some(token);
                    }
                }
                TokenKind::KwVar => {
                    let token = self.bump();
                    if var_token.is_some() {
                        self.error_at(token.range, "duplicate 'var' modifier");
                    } else {
                        var_token = Some(token);
                    }
                }
                _ => break,
            }
        }
        self.parse_function_tail(start, static_token.is_some(), var_token.is_none())
    }

    /// Continues a function declaration at the `fun` keyword.
    fn parse_function_tail(
        &mut self,
        start: TextRange,
        is_static: bool,
        is_pure: bool,
    ) -> ParseResult<Statement> {
        self.expect(TokenKind::KwFun, "'fun'")?;
        let identifier = self.expect(TokenKind::Ident, "function name")?;

        let mut type_parameters = Vec::new();
        if self.bump_if(TokenKind::LBracket).is_some() {
            while !self.at(TokenKind::RBracket) && !self.at_end() {
                type_parameters.push(self.expect(TokenKind::Ident, "type parameter name")?);
                if self.bump_if(TokenKind::Comma).is_none() {
                    break;
                }
            }
            self.expect(TokenKind::RBracket, "']'")?;
        }

        let (parameters, rparen) = self.parse_parameter_list(true, true)?;
        let mut signature_end = rparen.range;
        let return_type = if self.bump_if(TokenKind::Arrow).is_some() {
            let ty = self.parse_syntax_type()?;
            signature_end = ty.range();
            Some(ty)
        } else {
            None
        };
        let signature_range = start.cover(signature_end);

        if self.bump_if(TokenKind::FatArrow).is_some() {
            if self.bump_if(TokenKind::KwExternal).is_some() {
                let (attributes, attr_rparen) = self.parse_external_attributes()?;
                return Ok(Statement::ExternalFunction(ExternalFunctionStatement {
                    identifier,
                    parameters,
                    return_type,
                    attributes,
                    range: start.cover(attr_rparen.range),
                }));
            }
            let expression = self.parse_expression()?;
            let body_range = expression.range();
            let body = Statement::Expression(ExpressionStatement {
                expression,
                range: body_range,
            });
            return Ok(Statement::FunctionDeclaration(FunctionDeclarationStatement {
                identifier,
                is_static,
                is_pure,
                type_parameters,
                parameters,
                return_type,
                body: Box::new(body),
                range: start.cover(body_range),
                signature_range,
            }));
        }

        let body = self.parse_block_statement()?;
        let range = start.cover(body.range());
        Ok(Statement::FunctionDeclaration(FunctionDeclarationStatement {
            identifier,
            is_static,
            is_pure,
            type_parameters,
            parameters,
            return_type,
            body: Box::new(body),
            range,
            signature_range,
        }))
    }

    /// `( key = "value", ... )` after `external`. The key set is closed;
    /// duplicate keys are diagnosed.
    fn parse_external_attributes(&mut self) -> ParseResult<(Vec<(Token, Token)>, Token)> {
        const KNOWN_ATTRIBUTES: &[&str] = &["entry"];

        self.expect(TokenKind::LParen, "'('")?;
        let mut attributes = Vec::new();
        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
        while !self.at(TokenKind::RParen) && !self.at_end() {
            // Attribute keys may collide with keywords (`entry` does), so
            // accept any word-like token and validate the spelling.
            let key = if self.at(TokenKind::Ident) || self.kind().is_keyword() {
                self.bump()
            } else {
                return Err(self.unexpected("expected attribute name"));
            };
            if !KNOWN_ATTRIBUTES.contains(&key.text.as_str()) {
                let range = key.range;
                self.error_at(range, format!("unknown external attribute '{}'", key.text));
            }
            if !seen.insert(key.text.clone()) {
                let range = key.range;
                self.error_at(
                    range,
                    format!("attribute '{}' is already defined", key.text),
                );
            }
            self.expect(TokenKind::Eq, "'='")?;
            let value = self.expect(TokenKind::StringLiteral, "attribute value string")?;
            attributes.push((key, value));
            if self.bump_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        let rparen = self.expect(TokenKind::RParen, "')'")?;
        Ok((attributes, rparen))
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// `[...] [var] ident [: Type] [= default]`.
    ///
    /// Contexts that require types (functions, lambdas) pass `require_type`;
    /// a disallowed default is diagnosed, parsed, and dropped.
    pub(crate) fn parse_parameter(
        &mut self,
        require_type: bool,
        allow_default: bool,
    ) -> ParseResult<Parameter> {
        let start = self.current_range();
        let is_variadic = self.bump_if(TokenKind::Ellipsis).is_some();
        let is_mutable = self.bump_if(TokenKind::KwVar).is_some();
        let identifier = self.expect(TokenKind::Ident, "parameter name")?;

        let ty = if require_type {
            self.expect(TokenKind::Colon, "':' and a parameter type")?;
            Some(self.parse_syntax_type()?)
        } else if self.bump_if(TokenKind::Colon).is_some() {
            Some(self.parse_syntax_type()?)
        } else {
            None
        };

        let mut end = ty.as_ref().map_or(identifier.range, SyntaxType::range);
        let default = if self.bump_if(TokenKind::Eq).is_some() {
            let expression = self.parse_expression()?;
            end = expression.range();
            if allow_default {
                Some(Box::new(expression))
            } else {
                self.error_at(expression.range(), "default values are not allowed here");
                None
            }
        } else {
            None
        };

        Ok(Parameter {
            identifier,
            ty,
            default,
            is_variadic,
            is_mutable,
            range: start.cover(end),
        })
    }

    /// `( param, param, ... )`, returning the closing parenthesis for range
    /// bookkeeping.
    pub(crate) fn parse_parameter_list(
        &mut self,
        require_type: bool,
        allow_default: bool,
    ) -> ParseResult<(Vec<Parameter>, Token)> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut parameters = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at_end() {
            parameters.push(self.parse_parameter(require_type, allow_default)?);
            if self.bump_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        let rparen = self.expect(TokenKind::RParen, "')'")?;
        Ok((parameters, rparen))
    }

    // =========================================================================
    // Structs and interfaces
    // =========================================================================

    fn parse_struct_declaration(&mut self) -> ParseResult<Statement> {
        let start = self.current_range();
        let is_mutable = self.bump_if(TokenKind::KwVar).is_some();
        self.expect(TokenKind::KwStruct, "'struct'")?;
        let identifier = self.expect(TokenKind::Ident, "struct name")?;
        let (members, rbrace) = self.parse_member_block()?;
        Ok(Statement::StructDeclaration(StructDeclarationStatement {
            identifier,
            is_mutable,
            members,
            range: start.cover(rbrace.range),
        }))
    }

    fn parse_interface_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.bump();
        let identifier = self.expect(TokenKind::Ident, "interface name")?;
        let (members, rbrace) = self.parse_member_block()?;
        Ok(Statement::InterfaceDeclaration(InterfaceDeclarationStatement {
            identifier,
            members,
            range: keyword.range.cover(rbrace.range),
        }))
    }

    fn parse_member_block(&mut self) -> ParseResult<(Vec<Statement>, Token)> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut members = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_end() {
            if self.bump_if(TokenKind::Semicolon).is_some() {
                continue;
            }
            match self.parse_struct_member() {
                Ok(member) => members.push(member),
                Err(error) => self.recover(error, STRUCT_BODY_SYNC),
            }
        }
        let rbrace = self.expect(TokenKind::RBrace, "'}'")?;
        Ok((members, rbrace))
    }

    fn parse_struct_member(&mut self) -> ParseResult<Statement> {
        match self.kind() {
            TokenKind::KwConstructor => {
                let keyword = self.bump();
                let (parameters, _) = self.parse_parameter_list(true, true)?;
                let body = self.parse_block_statement()?;
                let range = keyword.range.cover(body.range());
                Ok(Statement::ConstructorDeclaration(ConstructorDeclarationStatement {
                    parameters,
                    body: Box::new(body),
                    range,
                }))
            }
            TokenKind::KwDestructor => {
                let keyword = self.bump();
                self.expect(TokenKind::LParen, "'('")?;
                self.expect(TokenKind::RParen, "')'")?;
                let body = self.parse_block_statement()?;
                let range = keyword.range.cover(body.range());
                Ok(Statement::DestructorDeclaration(DestructorDeclarationStatement {
                    body: Box::new(body),
                    range,
                }))
            }
            TokenKind::KwString => self.parse_string_declaration(),
            TokenKind::KwImplicit | TokenKind::KwExplicit | TokenKind::KwCast => {
                self.parse_cast_declaration()
            }
            TokenKind::KwOperator => self.parse_operator_declaration(),
            TokenKind::KwStatic
            | TokenKind::KwVar
            | TokenKind::KwConst
            | TokenKind::KwFun
            | TokenKind::Ident => self.parse_field_or_method(),
            _ => Err(self.unexpected("expected struct member")),
        }
    }

    /// `string ( ) [-> string] { ... }`. Without an arrow the return type
    /// is the `string` keyword itself; with one it must spell `string`.
    fn parse_string_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        self.expect(TokenKind::RParen, "')'")?;
        let return_type = if self.bump_if(TokenKind::Arrow).is_some() {
            let ty = self.parse_syntax_type()?;
            let is_string =
                matches!(&ty, SyntaxType::Base(base) if base.token.kind == TokenKind::KwString);
            if !is_string {
                self.error_at(ty.range(), "a 'string' declaration must return 'string'");
            }
            ty
        } else {
            SyntaxType::Base(BaseSyntaxType {
                token: keyword.clone(),
                range: keyword.range,
            })
        };
        let body = self.parse_block_statement()?;
        let range = keyword.range.cover(body.range());
        Ok(Statement::StringDeclaration(StringDeclarationStatement {
            return_type,
            body: Box::new(body),
            range,
        }))
    }

    /// `[implicit|explicit] cast ( param ) -> Type { ... }`. A bare `cast`
    /// is explicit.
    fn parse_cast_declaration(&mut self) -> ParseResult<Statement> {
        let first = self.bump();
        let is_implicit = first.kind == TokenKind::KwImplicit;
        if first.kind != TokenKind::KwCast {
            self.expect(TokenKind::KwCast, "'cast'")?;
        }
        self.expect(TokenKind::LParen, "'('")?;
        let parameter = self.parse_parameter(true, true)?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::Arrow, "'->'")?;
        let return_type = self.parse_syntax_type()?;
        let body = self.parse_block_statement()?;
        let range = first.range.cover(body.range());
        Ok(Statement::CastDeclaration(CastDeclarationStatement {
            is_implicit,
            parameter,
            return_type,
            body: Box::new(body),
            range,
        }))
    }

    /// `operator ( signature ) -> Type ( { ... } | => expr )`.
    fn parse_operator_declaration(&mut self) -> ParseResult<Statement> {
        let keyword = self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        let operation = self.parse_operation_expression()?;
        require_operator(self, &operation);
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::Arrow, "'->'")?;
        let return_type = self.parse_syntax_type()?;

        let body = if self.bump_if(TokenKind::FatArrow).is_some() {
            let expression = self.parse_expression()?;
            let range = expression.range();
            Statement::Expression(ExpressionStatement { expression, range })
        } else {
            self.parse_block_statement()?
        };
        let range = keyword.range.cover(body.range());
        Ok(Statement::OperatorDeclaration(OperatorDeclarationStatement {
            operation,
            return_type,
            body: Box::new(body),
            range,
        }))
    }

    /// Fields and methods share the `{static, var, const}` modifier bag;
    /// each modifier appears at most once and `var`/`const` exclude each
    /// other, all with dedicated messages.
    fn parse_field_or_method(&mut self) -> ParseResult<Statement> {
        let start = self.current_range();
        let mut static_token: Option<Token> = None;
        let mut var_token: Option<Token> = None;
        let mut const_token: Option<Token> = None;
        loop {
            match self.kind() {
                TokenKind::KwStatic => {
                    let token = self.bump();
                    if static_token.is_some() {
                        self.error_at(token.range, "duplicate 'static' modifier");
                    } else {
                        static_token = Some(token);
                    }
                }
                TokenKind::KwVar => {
                    let token = self.bump();
                    if var_token.is_some() {
                        self.error_at(token.range, "duplicate 'var' modifier");
                    } else if const_token.is_some() {
                        self.error_at(token.range, "'var' and 'const' are mutually exclusive");
                    } else {
                        var_token = Some(token);
                    }
                }
                TokenKind::KwConst => {
                    let token = self.bump();
                    if const_token.is_some() {
                        self.error_at(token.range, "duplicate 'const' modifier");
                    } else if var_token.is_some() {
                        self.error_at(token.range, "'var' and 'const' are mutually exclusive");
                    } else {
                        const_token = Some(token);
                    }
                }
                _ => break,
            }
        }

        if self.at(TokenKind::KwFun) {
            if let Some(token) = &const_token {
                let range = token.range;
                self.error_at(range, "'const' cannot be applied to a function");
            }
            return self.parse_function_tail(start, static_token.is_some(), var_token.is_none());
        }

        let identifier = self.expect(TokenKind::Ident, "field name")?;
        self.expect(TokenKind::Colon, "':' and a field type")?;
        let ty = self.parse_syntax_type()?;
        let mut end = ty.range();
        let initializer = if self.bump_if(TokenKind::Eq).is_some() {
            let expression = self.parse_expression()?;
            end = expression.range();
            Some(expression)
        } else {
            None
        };

        let mutability = if var_token.is_some() {
            Mutability::Mutable
        } else if const_token.is_some() {
            Mutability::Constant
        } else {
            Mutability::Immutable
        };
        Ok(Statement::FieldDeclaration(FieldDeclarationStatement {
            identifier,
            mutability,
            is_static: static_token.is_some(),
            ty,
            initializer,
            range: start.cover(end),
        }))
    }

    /// A zero-width error placeholder standing in for a required expression
    /// that was missing. Only ever reachable in trees that are discarded
    /// because an error diagnostic was recorded alongside it.
    fn missing_expression(&self, offset: TextSize) -> Expression {
        let (line, column) = self.source.line_col(offset);
        let range = TextRange::empty(offset);
        Expression::Token(TokenExpression {
            token: Token {
                kind: TokenKind::Error,
                range,
                value: None,
                text: SmolStr::default(),
                line,
                column,
                source: self.source.clone(),
            },
            range,
        })
    }
}
