//! Grammar productions, grouped the way the language groups them.
//!
//! Each submodule contributes `impl Parser` blocks:
//! - [`expressions`]: Pratt expression parsing and the postfix chain
//! - [`types`]: type expressions
//! - [`statements`]: statements and declarations
//! - [`interpolation`]: interpolated string bodies
//! - [`operations`]: operator-overload signatures
//!
//! This module owns the file-level productions: the program root, module
//! statements, and the import family.

mod expressions;
mod interpolation;
mod operations;
mod statements;
mod types;

use crate::ast::{
    AggregateImportStatement, DllImportStatement, ImportItem, ImportStatement, ModuleName,
    ModuleStatement, ProgramStatement, Statement,
};
use crate::lexer::{Token, TokenKind};
use crate::parser::{ParseResult, Parser, SyntaxError};
use crate::token_set::TokenSet;

/// Sync tokens for the top level of a file and module bodies.
const TOP_LEVEL_SYNC: TokenSet = TokenSet::new(&[
    TokenKind::KwModule,
    TokenKind::KwImport,
    TokenKind::KwEntry,
    TokenKind::KwDef,
    TokenKind::KwFun,
    TokenKind::KwStatic,
    TokenKind::KwVar,
    TokenKind::KwLet,
    TokenKind::KwConst,
    TokenKind::KwStruct,
    TokenKind::KwInterface,
    TokenKind::KwIf,
    TokenKind::KwReturn,
    TokenKind::RBrace,
    TokenKind::Semicolon,
]);

/// Sync tokens inside a DLL import body.
const DLL_BODY_SYNC: TokenSet = TokenSet::new(&[
    TokenKind::RBrace,
    TokenKind::KwFun,
    TokenKind::KwStatic,
    TokenKind::KwVar,
    TokenKind::Semicolon,
]);

/// Sync tokens inside an aggregate import group.
const IMPORT_ITEM_SYNC: TokenSet = TokenSet::new(&[TokenKind::Comma, TokenKind::RBrace]);

impl Parser {
    /// Parses one source file into its program root. Never fails: every
    /// hard error is recovered at the top level.
    pub(crate) fn parse_program(&mut self) -> ProgramStatement {
        let range = self.source.full_range();
        let mut imports = Vec::new();
        let mut module: Option<Box<Statement>> = None;
        let mut statements = Vec::new();

        while !self.at_end() {
            if self.bump_if(TokenKind::Semicolon).is_some() {
                continue;
            }
            match self.kind() {
                TokenKind::KwImport => match self.parse_import_statement() {
                    Ok(import) => imports.push(import),
                    Err(error) => self.recover(error, TOP_LEVEL_SYNC),
                },
                TokenKind::KwModule if module.is_none() => {
                    match self.parse_module_statement(true) {
                        Ok(parsed) => module = Some(Box::new(parsed)),
                        Err(error) => self.recover(error, TOP_LEVEL_SYNC),
                    }
                }
                _ => match self.parse_statement() {
                    Ok(statement) => statements.push(statement),
                    Err(error) => self.recover(error, TOP_LEVEL_SYNC),
                },
            }
        }

        ProgramStatement {
            imports,
            module,
            statements,
            range,
        }
    }

    /// `module a.b.c [{ ... }]`. The body is optional at file scope only.
    pub(crate) fn parse_module_statement(&mut self, file_scope: bool) -> ParseResult<Statement> {
        let keyword = self.bump();
        let mut segments = vec![self.expect(TokenKind::Ident, "module name")?];
        while self.bump_if(TokenKind::Dot).is_some() {
            segments.push(self.expect(TokenKind::Ident, "module name segment")?);
        }
        let name = ModuleName::new(segments);

        let mut body = Vec::new();
        let mut end = name.range;
        if self.bump_if(TokenKind::LBrace).is_some() {
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                if self.bump_if(TokenKind::Semicolon).is_some() {
                    continue;
                }
                match self.parse_statement() {
                    Ok(statement) => body.push(statement),
                    Err(error) => self.recover(error, TOP_LEVEL_SYNC),
                }
            }
            let rbrace = self.expect(TokenKind::RBrace, "'}'")?;
            end = rbrace.range;
        } else if !file_scope {
            let at = keyword.range.cover(name.range);
            self.error_at(at, "a module declaration here requires a body");
        }

        Ok(Statement::Module(ModuleStatement {
            name,
            body,
            range: keyword.range.cover(end),
        }))
    }

    // =========================================================================
    // Imports
    // =========================================================================

    /// Parses any of the import forms: dotted, wildcard, aggregate group,
    /// or the `import ("path")` DLL form.
    pub(crate) fn parse_import_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.bump();
        if self.at(TokenKind::LParen) {
            return self.parse_dll_import(keyword);
        }

        // Collect the dotted path permissively; segment kinds are validated
        // after the shape of the import is known.
        let mut segments: Vec<Token> = Vec::new();
        let mut wildcard: Option<Token> = None;
        let mut group: Option<(Vec<ImportItem>, Token)> = None;
        loop {
            match self.kind() {
                TokenKind::Star => {
                    wildcard = Some(self.bump());
                    break;
                }
                TokenKind::LBrace => {
                    group = Some(self.parse_import_group()?);
                    break;
                }
                kind if kind == TokenKind::Ident || kind.is_keyword() => {
                    segments.push(self.bump());
                    if self.bump_if(TokenKind::Dot).is_some() {
                        continue;
                    }
                    break;
                }
                _ => return Err(self.unexpected("expected import path")),
            }
        }

        if let Some((items, rbrace)) = group {
            if segments.is_empty() {
                return Err(SyntaxError {
                    message: "an aggregate import requires a module scope".to_string(),
                    range: keyword.range.cover(rbrace.range),
                    highlight: None,
                });
            }
            self.check_scope_segments(&segments);
            let scope = ModuleName::new(segments);
            let mut end = rbrace.range;
            let group_alias = if self.bump_if(TokenKind::KwAs).is_some() {
                let alias = self.expect(TokenKind::Ident, "group alias")?;
                end = alias.range;
                Some(alias)
            } else {
                None
            };
            return Ok(Statement::AggregateImport(AggregateImportStatement {
                scope,
                items,
                group_alias,
                range: keyword.range.cover(end),
            }));
        }

        let imported = if let Some(star) = wildcard {
            if segments.is_empty() {
                return Err(SyntaxError {
                    message: "a wildcard import requires a module scope".to_string(),
                    range: keyword.range.cover(star.range),
                    highlight: None,
                });
            }
            star
        } else {
            // A plain import needs at least a scope and an imported name.
            if segments.len() < 2 {
                let end = segments.last().map_or(keyword.range, |token| token.range);
                let at = keyword.range.cover(end);
                self.error_at(at, "an import requires a module scope and an imported name");
            }
            let imported = if segments.len() > 1 {
                segments.pop()
            } else {
                segments.first().cloned()
            };
            let Some(imported) = imported else {
                return Err(self.unexpected("expected import path"));
            };
            if imported.kind != TokenKind::Ident {
                let range = imported.range;
                self.error_at(range, "the imported name must be an identifier");
            }
            imported
        };

        self.check_scope_segments(&segments);
        let scope = ModuleName::new(segments);
        let mut end = imported.range;
        let alias = if self.bump_if(TokenKind::KwAs).is_some() {
            let alias = self.expect(TokenKind::Ident, "alias")?;
            end = alias.range;
            Some(alias)
        } else {
            None
        };
        Ok(Statement::Import(ImportStatement {
            scope,
            imported,
            alias,
            range: keyword.range.cover(end),
        }))
    }

    /// Records one diagnostic per scope segment that is not an identifier.
    fn check_scope_segments(&mut self, segments: &[Token]) {
        let offenders: Vec<_> = segments
            .iter()
            .filter(|token| token.kind != TokenKind::Ident)
            .map(|token| token.range)
            .collect();
        for range in offenders {
            self.error_at(range, "import scope segments must be identifiers");
        }
    }

    /// `{ X [as Y], ... }` of an aggregate import.
    fn parse_import_group(&mut self) -> ParseResult<(Vec<ImportItem>, Token)> {
        self.bump(); // {
        let mut items = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at_end() {
            match self.parse_import_item() {
                Ok(item) => {
                    items.push(item);
                    if self.bump_if(TokenKind::Comma).is_none() {
                        break;
                    }
                }
                Err(error) => {
                    self.recover(error, IMPORT_ITEM_SYNC);
                    self.bump_if(TokenKind::Comma);
                }
            }
        }
        let rbrace = self.expect(TokenKind::RBrace, "'}'")?;
        Ok((items, rbrace))
    }

    fn parse_import_item(&mut self) -> ParseResult<ImportItem> {
        let identifier = self.expect(TokenKind::Ident, "imported name")?;
        let alias = if self.bump_if(TokenKind::KwAs).is_some() {
            Some(self.expect(TokenKind::Ident, "alias")?)
        } else {
            None
        };
        Ok(ImportItem { identifier, alias })
    }

    // =========================================================================
    // DLL imports
    // =========================================================================

    /// `import ("path") { fun ... }` or `import ("path") fun ...`.
    fn parse_dll_import(&mut self, keyword: Token) -> ParseResult<Statement> {
        self.bump(); // (
        let path = self.expect(TokenKind::StringLiteral, "library path string")?;
        self.expect(TokenKind::RParen, "')'")?;

        let mut functions = Vec::new();
        let end;
        if self.bump_if(TokenKind::LBrace).is_some() {
            while !self.at(TokenKind::RBrace) && !self.at_end() {
                if self.bump_if(TokenKind::Semicolon).is_some() {
                    continue;
                }
                match self.parse_dll_member() {
                    Ok(member) => functions.push(member),
                    Err(error) => self.recover(error, DLL_BODY_SYNC),
                }
            }
            let rbrace = self.expect(TokenKind::RBrace, "'}'")?;
            end = rbrace.range;
        } else {
            let member = self.parse_dll_member()?;
            end = member.range();
            functions.push(member);
        }

        Ok(Statement::DllImport(DllImportStatement {
            path,
            functions,
            range: keyword.range.cover(end),
        }))
    }

    /// Only `fun`-headed external function declarations may appear in a DLL
    /// import body.
    fn parse_dll_member(&mut self) -> ParseResult<Statement> {
        if !matches!(
            self.kind(),
            TokenKind::KwFun | TokenKind::KwStatic | TokenKind::KwVar
        ) {
            return Err(self.unexpected("expected an external function declaration"));
        }
        let statement = self.parse_function_statement()?;
        if !matches!(statement, Statement::ExternalFunction(_)) {
            let range = statement.range();
            self.error_at(
                range,
                "library imports may only contain external function declarations",
            );
        }
        Ok(statement)
    }
}
