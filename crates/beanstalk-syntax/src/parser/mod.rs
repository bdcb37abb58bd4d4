//! Parser for the Beanstalk language.
//!
//! A hand-written recursive descent parser over the filtered token stream.
//! The token stream is collected eagerly into a random-access vector; the
//! grammar lives in the [`grammar`] submodules as `impl Parser` blocks.
//!
//! # Design
//!
//! - **Error-tolerant**: hard failures ([`SyntaxError`]) are caught by the
//!   closest recovery loop, which records a diagnostic and skips ahead to a
//!   synchronization token.
//! - **Speculative parses** (lambdas, maps, generic type argument lists)
//!   run under a [`Checkpoint`] that restores both the position and the
//!   diagnostics list on rewind, so a failed attempt is invisible.
//! - **Single pass**: no backtracking outside checkpoints; the produced
//!   tree owns all of its tokens.

#![allow(clippy::module_name_repetitions)]

pub mod grammar;

use drop_bomb::DropBomb;
use text_size::TextRange;
use thiserror::Error;

use crate::ast::Ast;
use crate::diagnostics::{sort_diagnostics, Diagnostic, Severity};
use crate::lexer::{FilteredLexer, Token, TokenKind};
use crate::source::SourceText;
use crate::token_set::TokenSet;

/// Parses a token stream into an AST and a list of diagnostics.
///
/// The diagnostic list is sorted by `(line, column)`. If any diagnostic of
/// severity [`Severity::Error`] was recorded the AST is `None`; warnings
/// and infos alone do not suppress the tree.
#[must_use]
pub fn parse(lexer: FilteredLexer<'_>) -> (Option<Ast>, Vec<Diagnostic>) {
    let source = lexer.source().clone();
    tracing::debug!(len = u32::from(source.len()), "parsing source buffer");

    let mut parser = Parser::new(source.clone(), lexer);
    let root = parser.parse_program();

    let mut diagnostics = parser.diagnostics;
    sort_diagnostics(&mut diagnostics);

    let has_error = diagnostics
        .iter()
        .any(|diagnostic| diagnostic.severity == Severity::Error);
    tracing::debug!(
        diagnostics = diagnostics.len(),
        failed = has_error,
        "parse finished"
    );

    if has_error {
        (None, diagnostics)
    } else {
        (Some(Ast { root, source }), diagnostics)
    }
}

/// Lexes and parses a source buffer in one step.
#[must_use]
pub fn parse_source(source: &SourceText) -> (Option<Ast>, Vec<Diagnostic>) {
    parse(FilteredLexer::new(source))
}

/// A hard parse failure, thrown to the closest recovery loop.
///
/// Carries the message, the range of the offending token (empty at end of
/// file), and an optional highlight range that takes precedence when the
/// diagnostic is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub(crate) struct SyntaxError {
    pub(crate) message: String,
    pub(crate) range: TextRange,
    pub(crate) highlight: Option<TextRange>,
}

pub(crate) type ParseResult<T> = Result<T, SyntaxError>;

/// A snapshot of the parser state for speculative parsing.
///
/// Every checkpoint must end in exactly one of [`Checkpoint::commit`] or
/// [`Checkpoint::rewind`]; dropping one on the floor is a bug and the bomb
/// makes it loud.
pub(crate) struct Checkpoint {
    pos: usize,
    diagnostics_len: usize,
    bomb: DropBomb,
}

impl Checkpoint {
    /// Keeps everything parsed since the checkpoint.
    pub(crate) fn commit(mut self) {
        self.bomb.defuse();
    }

    /// Restores the position and drops any diagnostics recorded since the
    /// checkpoint, leaving the parser as if the attempt never happened.
    pub(crate) fn rewind(mut self, parser: &mut Parser) {
        self.bomb.defuse();
        tracing::trace!(from = parser.pos, to = self.pos, "rewinding speculative parse");
        parser.pos = self.pos;
        parser.diagnostics.truncate(self.diagnostics_len);
    }
}

/// The parser state for one source file.
pub(crate) struct Parser {
    pub(crate) source: SourceText,
    tokens: Vec<Token>,
    pos: usize,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Instantiation (`Type{...}`) is disabled while parsing constructs
    /// where a following `{` belongs to a block, e.g. `if` conditions.
    allow_struct_literal: bool,
    /// Where "end of input" diagnostics point. The end of the buffer for a
    /// file parse, the end of the hole for an interpolation sub-parse.
    eof_offset: text_size::TextSize,
}

impl Parser {
    pub(crate) fn new(source: SourceText, lexer: FilteredLexer<'_>) -> Self {
        let mut diagnostics = Vec::new();
        let tokens = collect_tokens(&source, lexer, &mut diagnostics);
        let eof_offset = source.len();
        Self {
            source,
            tokens,
            pos: 0,
            diagnostics,
            allow_struct_literal: true,
            eof_offset,
        }
    }

    /// Builds a parser over already-collected tokens. Used for the
    /// sub-parses of interpolated string expressions.
    pub(crate) fn from_tokens(
        source: SourceText,
        tokens: Vec<Token>,
        eof_offset: text_size::TextSize,
    ) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
            allow_struct_literal: true,
            eof_offset,
        }
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// The current token, or `None` at end of input.
    pub(crate) fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// The current token kind, or `Eof` at end.
    pub(crate) fn kind(&self) -> TokenKind {
        self.nth_kind(0)
    }

    /// The kind of the nth token ahead (0 = current), or `Eof`.
    pub(crate) fn nth_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn at_any(&self, set: TokenSet) -> bool {
        set.contains(self.kind())
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consumes and returns the current token. At end of input returns a
    /// synthesized zero-width `Eof` token.
    pub(crate) fn bump(&mut self) -> Token {
        match self.tokens.get(self.pos) {
            Some(token) => {
                let token = token.clone();
                self.pos += 1;
                token
            }
            None => self.eof_token(),
        }
    }

    /// Consumes the current token if it has the given kind.
    pub(crate) fn bump_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Consumes a token of the given kind or fails with `expected {what}`.
    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(format!("expected {what}")))
        }
    }

    fn eof_token(&self) -> Token {
        let offset = self.eof_offset;
        let (line, column) = self.source.line_col(offset);
        Token {
            kind: TokenKind::Eof,
            range: TextRange::empty(offset),
            value: None,
            text: smol_str::SmolStr::default(),
            line,
            column,
            source: self.source.clone(),
        }
    }

    /// The range of the current token, or the empty range at end of file.
    pub(crate) fn current_range(&self) -> TextRange {
        self.current()
            .map_or_else(|| TextRange::empty(self.eof_offset), |token| token.range)
    }

    /// Builds a hard failure at the current token (or at end of file).
    pub(crate) fn unexpected(&self, message: impl Into<String>) -> SyntaxError {
        let range = self
            .current()
            .map_or_else(|| TextRange::empty(self.eof_offset), |token| token.range);
        SyntaxError {
            message: message.into(),
            range,
            highlight: None,
        }
    }

    /// Records a hard failure as an error diagnostic.
    pub(crate) fn report(&mut self, error: SyntaxError) {
        let range = error.highlight.unwrap_or(error.range);
        self.diagnostics
            .push(Diagnostic::error(self.source.clone(), range, error.message));
    }

    /// Records a recoverable error diagnostic without unwinding.
    pub(crate) fn error_at(&mut self, range: TextRange, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::error(self.source.clone(), range, message));
    }

    /// Records a warning diagnostic.
    pub(crate) fn warn_at(&mut self, range: TextRange, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(
            Severity::Warning,
            self.source.clone(),
            range,
            message,
        ));
    }

    /// Standard error recovery: record the failure, step over the offending
    /// token, then skip ahead until a synchronization token for the current
    /// scope comes up.
    pub(crate) fn recover(&mut self, error: SyntaxError, sync: TokenSet) {
        tracing::debug!(error = %error, "recovering from parse failure");
        self.report(error);
        if !self.at_end() {
            self.pos += 1;
        }
        while !self.at_end() && !self.at_any(sync) {
            self.pos += 1;
        }
    }

    /// Takes a checkpoint for a speculative parse.
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            diagnostics_len: self.diagnostics.len(),
            bomb: DropBomb::new("checkpoint was neither committed nor rewound"),
        }
    }

    /// Raw position snapshot for the postfix-chain type rewind, which does
    /// not run under a checkpoint.
    pub(crate) fn position(&self) -> (usize, usize) {
        (self.pos, self.diagnostics.len())
    }

    /// Restores a raw position snapshot.
    pub(crate) fn restore(&mut self, (pos, diagnostics_len): (usize, usize)) {
        self.pos = pos;
        self.diagnostics.truncate(diagnostics_len);
    }

    /// Runs `f` with instantiation syntax enabled or disabled.
    pub(crate) fn with_struct_literals<T>(
        &mut self,
        allowed: bool,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = std::mem::replace(&mut self.allow_struct_literal, allowed);
        let result = f(self);
        self.allow_struct_literal = saved;
        result
    }

    pub(crate) fn struct_literals_allowed(&self) -> bool {
        self.allow_struct_literal
    }
}

/// Drains a token stream, converting lexical `Error` tokens into
/// diagnostics so one bad byte yields one message instead of a cascade of
/// parser errors.
pub(crate) fn collect_tokens(
    source: &SourceText,
    tokens: impl Iterator<Item = Token>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Token> {
    tokens
        .filter_map(|token| {
            if token.kind == TokenKind::Error {
                diagnostics.push(Diagnostic::error(
                    source.clone(),
                    token.range,
                    format!("unexpected or malformed token '{}'", token.text),
                ));
                None
            } else {
                Some(token)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let source = SourceText::new("");
        let (ast, diagnostics) = parse_source(&source);
        assert!(diagnostics.is_empty());
        let ast = ast.expect("empty input parses");
        assert!(ast.root.imports.is_empty());
        assert!(ast.root.statements.is_empty());
    }

    #[test]
    fn test_lexical_errors_become_diagnostics() {
        let source = SourceText::new("let x = @");
        let (ast, diagnostics) = parse_source(&source);
        assert!(ast.is_none());
        assert!(diagnostics
            .iter()
            .any(|d| d.message.contains("malformed token '@'")));
    }

    #[test]
    fn test_checkpoint_rewind_restores_state() {
        let source = SourceText::new("a b c");
        let mut parser = Parser::new(source.clone(), FilteredLexer::new(&source));
        parser.bump();
        let checkpoint = parser.checkpoint();
        parser.bump();
        parser.error_at(TextRange::empty(0.into()), "speculative");
        checkpoint.rewind(&mut parser);
        assert_eq!(parser.position(), (1, 0));
        assert!(parser.diagnostics.is_empty());
    }

    #[test]
    fn test_eof_token_is_synthesized() {
        let source = SourceText::new("x");
        let mut parser = Parser::new(source.clone(), FilteredLexer::new(&source));
        parser.bump();
        let eof = parser.bump();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert!(eof.range.is_empty());
    }
}
