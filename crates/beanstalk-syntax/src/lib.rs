//! `beanstalk-syntax` - Lexer, parser, and abstract syntax tree for the
//! Beanstalk programming language.
//!
//! This crate provides the syntactic front-end of the compiler:
//!
//! - **Lexer**: Tokenizes source text into a stream of self-contained
//!   tokens with decoded literal values
//! - **Parser**: Builds a typed AST from tokens, recovering from errors
//! - **AST**: Tagged node families with visitor-based traversal
//!
//! # Design Principles
//!
//! - **Error-tolerant**: the lexer never fails, and the parser records
//!   diagnostics and resynchronizes instead of stopping at the first
//!   problem
//! - **Self-contained trees**: AST nodes copy the tokens they reference
//!   and share one read-only handle to the source buffer
//! - **Deterministic**: the same input bytes produce the same tree ranges
//!   and the same sorted diagnostics
//!
//! # Example
//!
//! ```
//! use beanstalk_syntax::lexer::{lex, TokenKind};
//! use beanstalk_syntax::source::SourceText;
//!
//! let source = SourceText::new("let x = 42");
//! let tokens = lex(&source);
//!
//! // Filter out whitespace to see the meaningful tokens
//! let meaningful: Vec<_> = tokens.iter()
//!     .filter(|t| !t.kind.is_trivia())
//!     .collect();
//!
//! assert_eq!(meaningful[0].kind, TokenKind::KwLet);
//! assert_eq!(meaningful[1].kind, TokenKind::Ident);
//! assert_eq!(meaningful[2].kind, TokenKind::Eq);
//! assert_eq!(meaningful[3].kind, TokenKind::IntLiteral);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token_set;

pub use ast::Ast;
pub use diagnostics::{Diagnostic, Severity};
pub use lexer::{lex, FilteredLexer, Lexer, Token, TokenKind, TokenValue};
pub use parser::{parse, parse_source};
pub use source::SourceText;
pub use token_set::TokenSet;
