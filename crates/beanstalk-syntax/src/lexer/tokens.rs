//! Token definitions for the Beanstalk language.
//!
//! This module defines all lexical tokens that can appear in Beanstalk
//! source code. Recognition is driven by the `logos` lexer generator;
//! literal value decoding happens in the [`crate::lexer`] wrapper.

use logos::Logos;

fn lex_block_comment(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let mut depth = 1usize;
    let bytes = lex.remainder().as_bytes();
    let mut i = 0usize;

    while i + 1 < bytes.len() {
        if bytes[i] == b'/' && bytes[i + 1] == b'*' {
            depth += 1;
            i += 2;
            continue;
        }
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
            continue;
        }
        i += 1;
    }

    lex.bump(bytes.len());
    false
}

/// All token kinds in Beanstalk source code.
///
/// Token kinds are divided into categories:
/// - Trivia (whitespace, comments) - dropped by the filtered lexer
/// - Punctuation and operators
/// - Keywords (reserved words, including the primitive type words)
/// - Literals (numbers, strings, chars, interpolated strings)
/// - Identifiers
/// - Special tokens (errors, EOF)
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[derive(Default)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Whitespace (spaces, tabs, newlines, and a byte-order mark)
    #[regex(r"[ \t\r\n]+")]
    #[regex(r"\u{FEFF}")]
    Whitespace,

    /// Single-line comment: // ...
    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    /// Block comment: /* ... */ (supports nesting).
    #[token("/*", lex_block_comment)]
    BlockComment,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    /// `;`
    #[token(";")]
    Semicolon,

    /// `:`
    #[token(":")]
    Colon,

    /// `::`
    #[token("::")]
    ColonColon,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `?.`
    #[token("?.")]
    QuestionDot,

    /// `..`
    #[token("..")]
    DotDot,

    /// `..=`
    #[token("..=")]
    DotDotEq,

    /// `...`
    #[token("...")]
    Ellipsis,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// `[`
    #[token("[")]
    LBracket,

    /// `?[`
    #[token("?[")]
    QuestionLBracket,

    /// `]`
    #[token("]")]
    RBracket,

    /// `{`
    #[token("{")]
    LBrace,

    /// `}`
    #[token("}")]
    RBrace,

    /// `#`
    #[token("#")]
    Hash,

    /// `#[`
    #[token("#[")]
    HashBracket,

    // =========================================================================
    // OPERATORS - Assignment and comparison
    // =========================================================================
    /// `=`
    #[token("=")]
    Eq,

    /// `==`
    #[token("==")]
    EqEq,

    /// `!=`
    #[token("!=")]
    NotEq,

    /// `<`
    #[token("<")]
    Lt,

    /// `<=`
    #[token("<=")]
    LtEq,

    /// `>`
    #[token(">")]
    Gt,

    /// `>=`
    #[token(">=")]
    GtEq,

    // =========================================================================
    // OPERATORS - Arithmetic
    // =========================================================================
    /// `+`
    #[token("+")]
    Plus,

    /// `++`
    #[token("++")]
    PlusPlus,

    /// `-`
    #[token("-")]
    Minus,

    /// `--`
    #[token("--")]
    MinusMinus,

    /// `*`
    #[token("*")]
    Star,

    /// `**`
    #[token("**")]
    StarStar,

    /// `/`
    #[token("/")]
    Slash,

    /// `%`
    #[token("%")]
    Percent,

    /// `%%`
    #[token("%%")]
    PercentPercent,

    // =========================================================================
    // OPERATORS - Shifts and rotates
    // =========================================================================
    /// `<<`
    #[token("<<")]
    Shl,

    /// `>>`
    #[token(">>")]
    Shr,

    /// `<<<`
    #[token("<<<")]
    RotLeft,

    /// `>>>`
    #[token(">>>")]
    RotRight,

    // =========================================================================
    // OPERATORS - Bitwise and logical
    // =========================================================================
    /// `&`
    #[token("&")]
    Amp,

    /// `&&`
    #[token("&&")]
    AmpAmp,

    /// `|`
    #[token("|")]
    Pipe,

    /// `||`
    #[token("||")]
    PipePipe,

    /// `^`
    #[token("^")]
    Caret,

    /// `^^`
    #[token("^^")]
    CaretCaret,

    /// `~`
    #[token("~")]
    Tilde,

    /// `!`
    #[token("!")]
    Bang,

    // =========================================================================
    // OPERATORS - Null handling and arrows
    // =========================================================================
    /// `??`
    #[token("??")]
    QuestionQuestion,

    /// `?`
    #[token("?")]
    Question,

    /// `->`
    #[token("->")]
    Arrow,

    /// `=>`
    #[token("=>")]
    FatArrow,

    // =========================================================================
    // KEYWORDS - Modules and imports
    // =========================================================================
    /// `module`
    #[token("module")]
    KwModule,

    /// `import`
    #[token("import")]
    KwImport,

    /// `as`
    #[token("as")]
    KwAs,

    /// `external`
    #[token("external")]
    KwExternal,

    // =========================================================================
    // KEYWORDS - Declarations
    // =========================================================================
    /// `entry`
    #[token("entry")]
    KwEntry,

    /// `def`
    #[token("def")]
    KwDef,

    /// `fun`
    #[token("fun")]
    KwFun,

    /// `static`
    #[token("static")]
    KwStatic,

    /// `var`
    #[token("var")]
    KwVar,

    /// `let`
    #[token("let")]
    KwLet,

    /// `const`
    #[token("const")]
    KwConst,

    /// `struct`
    #[token("struct")]
    KwStruct,

    /// `interface`
    #[token("interface")]
    KwInterface,

    /// `cast`
    #[token("cast")]
    KwCast,

    /// `operator`
    #[token("operator")]
    KwOperator,

    /// `constructor`
    #[token("constructor")]
    KwConstructor,

    /// `destructor`
    #[token("destructor")]
    KwDestructor,

    /// `implicit`
    #[token("implicit")]
    KwImplicit,

    /// `explicit`
    #[token("explicit")]
    KwExplicit,

    /// `ref`
    #[token("ref")]
    KwRef,

    // =========================================================================
    // KEYWORDS - Expressions and control flow
    // =========================================================================
    /// `new`
    #[token("new")]
    KwNew,

    /// `this`
    #[token("this")]
    KwThis,

    /// `null`
    #[token("null")]
    KwNull,

    /// `true`
    #[token("true")]
    KwTrue,

    /// `false`
    #[token("false")]
    KwFalse,

    /// `if`
    #[token("if")]
    KwIf,

    /// `else`
    #[token("else")]
    KwElse,

    /// `return`
    #[token("return")]
    KwReturn,

    /// `switch`
    #[token("switch")]
    KwSwitch,

    /// `with`
    #[token("with")]
    KwWith,

    /// `is`
    #[token("is")]
    KwIs,

    /// `await`
    #[token("await")]
    KwAwait,

    // =========================================================================
    // KEYWORDS - Primitive types
    // =========================================================================
    /// `i8`
    #[token("i8")]
    KwI8,

    /// `i16`
    #[token("i16")]
    KwI16,

    /// `i32`
    #[token("i32")]
    KwI32,

    /// `i64`
    #[token("i64")]
    KwI64,

    /// `u8`
    #[token("u8")]
    KwU8,

    /// `u16`
    #[token("u16")]
    KwU16,

    /// `u32`
    #[token("u32")]
    KwU32,

    /// `u64`
    #[token("u64")]
    KwU64,

    /// `f32`
    #[token("f32")]
    KwF32,

    /// `f64`
    #[token("f64")]
    KwF64,

    /// `bool`
    #[token("bool")]
    KwBool,

    /// `char`
    #[token("char")]
    KwChar,

    /// `string`
    #[token("string")]
    KwString,

    // =========================================================================
    // LITERALS
    // =========================================================================
    /// Integer literal: 123, 0xFF, 0b1010, 0o77, with an optional width
    /// suffix (`1_000u16`, `0xFFi64`). Underscore separators are allowed.
    #[regex(r"[0-9][0-9_]*(i8|i16|i32|i64|u8|u16|u32|u64)?")]
    #[regex(r"0x[0-9a-fA-F][0-9a-fA-F_]*(i8|i16|i32|i64|u8|u16|u32|u64)?")]
    #[regex(r"0b[01][01_]*(i8|i16|i32|i64|u8|u16|u32|u64)?")]
    #[regex(r"0o[0-7][0-7_]*(i8|i16|i32|i64|u8|u16|u32|u64)?")]
    IntLiteral,

    /// Float literal: 3.14, 1.0e10, 2.5e-3, 1f32, 1.5f64
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?(f32|f64)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*(f32|f64)?")]
    #[regex(r"[0-9][0-9_]*(f32|f64)")]
    FloatLiteral,

    /// String literal: "hello\n", with C-style escapes
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    StringLiteral,

    /// Char literal: 'a', '\n', '\u{1F600}'
    #[regex(r"'([^'\\\r\n]|\\[^\r\n])*'")]
    CharLiteral,

    /// Interpolated string literal: $"x = {x}". The body is kept raw; the
    /// parser re-scans it for embedded expressions.
    #[regex(r#"\$"([^"\\\r\n]|\\[^\r\n])*""#)]
    InterpolatedStringLiteral,

    // =========================================================================
    // IDENTIFIERS
    // =========================================================================
    /// Identifier: starts with letter or underscore
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // =========================================================================
    // SPECIAL TOKENS
    // =========================================================================
    /// Lexer error - unrecognized character or unterminated literal
    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*"#, priority = 1)]
    #[regex(r"'([^'\\\r\n]|\\[^\r\n])*", priority = 1)]
    #[regex(r#"\$"([^"\\\r\n]|\\[^\r\n])*"#, priority = 1)]
    #[default]
    Error,

    /// End of file marker (not produced by the lexer, used by the parser)
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is trivia (whitespace or a comment).
    #[inline]
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::LineComment | Self::BlockComment)
    }

    /// Returns `true` if this token is a literal.
    #[must_use]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntLiteral
                | Self::FloatLiteral
                | Self::StringLiteral
                | Self::CharLiteral
                | Self::InterpolatedStringLiteral
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwNull
        )
    }

    /// Returns `true` if this token is a keyword.
    #[must_use]
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::KwModule
                | Self::KwImport
                | Self::KwAs
                | Self::KwExternal
                | Self::KwEntry
                | Self::KwDef
                | Self::KwFun
                | Self::KwStatic
                | Self::KwVar
                | Self::KwLet
                | Self::KwConst
                | Self::KwStruct
                | Self::KwInterface
                | Self::KwCast
                | Self::KwOperator
                | Self::KwConstructor
                | Self::KwDestructor
                | Self::KwImplicit
                | Self::KwExplicit
                | Self::KwRef
                | Self::KwNew
                | Self::KwThis
                | Self::KwNull
                | Self::KwTrue
                | Self::KwFalse
                | Self::KwIf
                | Self::KwElse
                | Self::KwReturn
                | Self::KwSwitch
                | Self::KwWith
                | Self::KwIs
                | Self::KwAwait
        ) || self.is_type_keyword()
    }

    /// Returns `true` if this token is a primitive type keyword.
    #[must_use]
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            Self::KwI8
                | Self::KwI16
                | Self::KwI32
                | Self::KwI64
                | Self::KwU8
                | Self::KwU16
                | Self::KwU32
                | Self::KwU64
                | Self::KwF32
                | Self::KwF64
                | Self::KwBool
                | Self::KwChar
                | Self::KwString
        )
    }

    /// Returns `true` if this token can begin a type expression.
    #[must_use]
    pub fn can_start_type(self) -> bool {
        self.is_type_keyword()
            || matches!(
                self,
                Self::Ident | Self::LParen | Self::KwFun | Self::KwVar | Self::KwRef
            )
    }

    /// Returns `true` if this token can begin an expression.
    #[must_use]
    pub fn can_start_expression(self) -> bool {
        self.is_literal()
            || self.is_type_keyword()
            || matches!(
                self,
                Self::Ident
                    | Self::KwThis
                    | Self::KwNew
                    | Self::KwRef
                    | Self::KwSwitch
                    | Self::KwWith
                    | Self::KwAwait
                    | Self::LParen
                    | Self::LBracket
                    | Self::Plus
                    | Self::PlusPlus
                    | Self::Minus
                    | Self::MinusMinus
                    | Self::Tilde
                    | Self::Bang
            )
    }

    /// Returns `true` if this token can begin a statement.
    #[must_use]
    pub fn can_start_statement(self) -> bool {
        self.can_start_expression()
            || matches!(
                self,
                Self::KwVar
                    | Self::KwLet
                    | Self::KwConst
                    | Self::KwIf
                    | Self::KwReturn
                    | Self::KwFun
                    | Self::KwStatic
                    | Self::KwStruct
                    | Self::KwInterface
                    | Self::KwDef
                    | Self::KwEntry
                    | Self::KwModule
                    | Self::LBrace
                    | Self::Semicolon
            )
    }

    /// Returns `true` if this token is a comparison operator (including the
    /// `is`/`as` type tests, which share the comparison level).
    #[must_use]
    pub fn is_comparison_op(self) -> bool {
        matches!(
            self,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::KwIs | Self::KwAs
        )
    }

    /// Returns `true` if this token is a prefix unary operator.
    #[must_use]
    pub fn is_prefix_op(self) -> bool {
        matches!(
            self,
            Self::PlusPlus
                | Self::MinusMinus
                | Self::Plus
                | Self::Minus
                | Self::Tilde
                | Self::Bang
                | Self::KwAwait
        )
    }

    /// Returns the binding power for Pratt parsing (left, right).
    /// Returns None if not an infix operator.
    ///
    /// Assignment and the conditional operator sit below all of these and are
    /// handled structurally; the postfix chain sits above.
    #[must_use]
    pub fn infix_binding_power(self) -> Option<(u8, u8)> {
        Some(match self {
            Self::QuestionQuestion => (1, 2),
            Self::EqEq | Self::NotEq => (3, 4),
            Self::Pipe | Self::PipePipe => (5, 6),
            Self::Caret | Self::CaretCaret => (7, 8),
            Self::Amp | Self::AmpAmp => (9, 10),
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::KwIs | Self::KwAs => (11, 12),
            Self::RotLeft | Self::RotRight | Self::Shl | Self::Shr => (13, 14),
            Self::Plus | Self::Minus => (15, 16),
            Self::Star | Self::Slash | Self::PercentPercent | Self::Percent => (17, 18),
            Self::StarStar => (20, 19), // Right associative
            Self::DotDot | Self::DotDotEq => (21, 22),
            _ => return None,
        })
    }

    /// A short human-readable description used in diagnostics.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Whitespace => "whitespace",
            Self::LineComment | Self::BlockComment => "comment",
            Self::Semicolon => "';'",
            Self::Colon => "':'",
            Self::ColonColon => "'::'",
            Self::Comma => "','",
            Self::Dot => "'.'",
            Self::QuestionDot => "'?.'",
            Self::DotDot => "'..'",
            Self::DotDotEq => "'..='",
            Self::Ellipsis => "'...'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::QuestionLBracket => "'?['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Hash => "'#'",
            Self::HashBracket => "'#['",
            Self::Eq => "'='",
            Self::EqEq => "'=='",
            Self::NotEq => "'!='",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::Plus => "'+'",
            Self::PlusPlus => "'++'",
            Self::Minus => "'-'",
            Self::MinusMinus => "'--'",
            Self::Star => "'*'",
            Self::StarStar => "'**'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::PercentPercent => "'%%'",
            Self::Shl => "'<<'",
            Self::Shr => "'>>'",
            Self::RotLeft => "'<<<'",
            Self::RotRight => "'>>>'",
            Self::Amp => "'&'",
            Self::AmpAmp => "'&&'",
            Self::Pipe => "'|'",
            Self::PipePipe => "'||'",
            Self::Caret => "'^'",
            Self::CaretCaret => "'^^'",
            Self::Tilde => "'~'",
            Self::Bang => "'!'",
            Self::QuestionQuestion => "'??'",
            Self::Question => "'?'",
            Self::Arrow => "'->'",
            Self::FatArrow => "'=>'",
            Self::KwModule => "'module'",
            Self::KwImport => "'import'",
            Self::KwAs => "'as'",
            Self::KwExternal => "'external'",
            Self::KwEntry => "'entry'",
            Self::KwDef => "'def'",
            Self::KwFun => "'fun'",
            Self::KwStatic => "'static'",
            Self::KwVar => "'var'",
            Self::KwLet => "'let'",
            Self::KwConst => "'const'",
            Self::KwStruct => "'struct'",
            Self::KwInterface => "'interface'",
            Self::KwCast => "'cast'",
            Self::KwOperator => "'operator'",
            Self::KwConstructor => "'constructor'",
            Self::KwDestructor => "'destructor'",
            Self::KwImplicit => "'implicit'",
            Self::KwExplicit => "'explicit'",
            Self::KwRef => "'ref'",
            Self::KwNew => "'new'",
            Self::KwThis => "'this'",
            Self::KwNull => "'null'",
            Self::KwTrue => "'true'",
            Self::KwFalse => "'false'",
            Self::KwIf => "'if'",
            Self::KwElse => "'else'",
            Self::KwReturn => "'return'",
            Self::KwSwitch => "'switch'",
            Self::KwWith => "'with'",
            Self::KwIs => "'is'",
            Self::KwAwait => "'await'",
            Self::KwI8 => "'i8'",
            Self::KwI16 => "'i16'",
            Self::KwI32 => "'i32'",
            Self::KwI64 => "'i64'",
            Self::KwU8 => "'u8'",
            Self::KwU16 => "'u16'",
            Self::KwU32 => "'u32'",
            Self::KwU64 => "'u64'",
            Self::KwF32 => "'f32'",
            Self::KwF64 => "'f64'",
            Self::KwBool => "'bool'",
            Self::KwChar => "'char'",
            Self::KwString => "'string'",
            Self::IntLiteral => "integer literal",
            Self::FloatLiteral => "float literal",
            Self::StringLiteral => "string literal",
            Self::CharLiteral => "char literal",
            Self::InterpolatedStringLiteral => "interpolated string literal",
            Self::Ident => "identifier",
            Self::Error => "invalid token",
            Self::Eof => "end of file",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}
