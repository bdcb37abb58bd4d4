//! Lexer for the Beanstalk language.
//!
//! The lexer is a lazy iterator over [`Token`]s. Recognition is handled by
//! the `logos`-generated [`TokenKind`]; this module decodes literal values,
//! attaches 1-based line/column positions, and keeps a shared handle to the
//! source buffer so every token is self-contained.
//!
//! The lexer never fails: unrecognized input and malformed literals come out
//! as [`TokenKind::Error`] tokens that still advance the position, so the
//! parser can report several problems in one pass.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use thiserror::Error;

use crate::source::SourceText;

/// The decoded value of a literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// 8-bit signed integer (`i8` suffix).
    I8(i8),
    /// 16-bit signed integer (`i16` suffix).
    I16(i16),
    /// 32-bit signed integer (`i32` suffix).
    I32(i32),
    /// 64-bit signed integer (`i64` suffix or unsuffixed).
    I64(i64),
    /// 8-bit unsigned integer (`u8` suffix).
    U8(u8),
    /// 16-bit unsigned integer (`u16` suffix).
    U16(u16),
    /// 32-bit unsigned integer (`u32` suffix).
    U32(u32),
    /// 64-bit unsigned integer (`u64` suffix, or unsuffixed and too large
    /// for `i64`).
    U64(u64),
    /// 32-bit float (`f32` suffix).
    F32(f32),
    /// 64-bit float (`f64` suffix or unsuffixed).
    F64(f64),
    /// Boolean (`true`/`false`).
    Bool(bool),
    /// A single Unicode scalar as UTF-8 bytes, null-padded to four bytes.
    Char([u8; 4]),
    /// Decoded string bytes.
    String(SmolStr),
}

impl TokenValue {
    /// Returns `true` for integer values of any width or signedness.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::I8(_)
                | Self::I16(_)
                | Self::I32(_)
                | Self::I64(_)
                | Self::U8(_)
                | Self::U16(_)
                | Self::U32(_)
                | Self::U64(_)
        )
    }

    /// Returns `true` for integer and float values.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Self::F32(_) | Self::F64(_))
    }

    /// Arithmetic negation of a signed integer, saturating at the width's
    /// `MIN`/`MAX`. Returns `None` for every other value.
    #[must_use]
    pub fn negated(&self) -> Option<TokenValue> {
        Some(match self {
            Self::I8(v) => Self::I8(v.checked_neg().unwrap_or(i8::MAX)),
            Self::I16(v) => Self::I16(v.checked_neg().unwrap_or(i16::MAX)),
            Self::I32(v) => Self::I32(v.checked_neg().unwrap_or(i32::MAX)),
            Self::I64(v) => Self::I64(v.checked_neg().unwrap_or(i64::MAX)),
            _ => return None,
        })
    }

    /// Bitwise inversion of an integer of any width. Returns `None` for
    /// every other value.
    #[must_use]
    pub fn bitwise_inverted(&self) -> Option<TokenValue> {
        Some(match self {
            Self::I8(v) => Self::I8(!v),
            Self::I16(v) => Self::I16(!v),
            Self::I32(v) => Self::I32(!v),
            Self::I64(v) => Self::I64(!v),
            Self::U8(v) => Self::U8(!v),
            Self::U16(v) => Self::U16(!v),
            Self::U32(v) => Self::U32(!v),
            Self::U64(v) => Self::U64(!v),
            _ => return None,
        })
    }

    /// Logical inversion of a boolean. Returns `None` for every other value.
    #[must_use]
    pub fn logically_inverted(&self) -> Option<TokenValue> {
        match self {
            Self::Bool(v) => Some(Self::Bool(!v)),
            _ => None,
        }
    }
}

/// A token produced by the lexer.
///
/// Tokens are self-contained copies: they carry their decoded value, the
/// text slice they came from, a 1-based line/column, and a handle to the
/// source buffer. AST nodes embed tokens by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
    /// The decoded literal value, or `None` for non-literals.
    pub value: Option<TokenValue>,
    /// The literal text slice of the source.
    pub text: SmolStr,
    /// 1-based line of the token's first byte.
    pub line: u32,
    /// 1-based column of the token's first byte.
    pub column: u32,
    /// The buffer this token came from.
    pub source: SourceText,
}

impl Token {
    /// Returns the length of the token in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        self.range.len()
    }

    /// Returns true if the token has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Lexer for Beanstalk source code.
///
/// The lexer is an iterator over tokens. It handles all error recovery
/// internally - any unrecognized input is returned as `TokenKind::Error`.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: SourceText,
    offset: TextSize,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer over the whole buffer.
    #[must_use]
    pub fn new(source: &'src SourceText) -> Self {
        Self {
            inner: TokenKind::lexer(source.text()),
            source: source.clone(),
            offset: TextSize::from(0),
        }
    }

    /// Creates a lexer over a sub-range of the buffer.
    ///
    /// Token ranges and line/column positions point into the original
    /// buffer. The parser uses this to re-scan interpolated string bodies.
    #[must_use]
    pub fn over_range(source: &'src SourceText, range: TextRange) -> Self {
        Self {
            inner: TokenKind::lexer(source.slice(range)),
            source: source.clone(),
            offset: range.start(),
        }
    }

    /// Returns a handle to the source buffer being lexed.
    #[must_use]
    pub fn source(&self) -> &SourceText {
        &self.source
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?;
        let mut kind = kind.unwrap_or(TokenKind::Error);
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::from(span.start as u32) + self.offset,
            TextSize::from(span.end as u32) + self.offset,
        );
        let text = SmolStr::new(self.inner.slice());

        let value = match decode_value(kind, &text) {
            Ok(value) => value,
            Err(_) => {
                kind = TokenKind::Error;
                None
            }
        };

        let (line, column) = self.source.line_col(range.start());
        Some(Token {
            kind,
            range,
            value,
            text,
            line,
            column,
            source: self.source.clone(),
        })
    }
}

/// A lexer wrapper that omits trivia (whitespace and comments).
///
/// This is the stream the parser consumes.
pub struct FilteredLexer<'src> {
    inner: Lexer<'src>,
}

impl<'src> FilteredLexer<'src> {
    /// Creates a new filtered lexer over the whole buffer.
    #[must_use]
    pub fn new(source: &'src SourceText) -> Self {
        Self {
            inner: Lexer::new(source),
        }
    }

    /// Creates a filtered lexer over a sub-range of the buffer.
    #[must_use]
    pub fn over_range(source: &'src SourceText, range: TextRange) -> Self {
        Self {
            inner: Lexer::over_range(source, range),
        }
    }

    /// Returns a handle to the source buffer being lexed.
    #[must_use]
    pub fn source(&self) -> &SourceText {
        self.inner.source()
    }
}

impl Iterator for FilteredLexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find(|token| !token.kind.is_trivia())
    }
}

/// Lex the entire buffer and return all tokens, trivia included.
///
/// This is a convenience function for testing and simple use cases.
/// For the parser, use [`FilteredLexer`] directly.
#[must_use]
pub fn lex(source: &SourceText) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex a buffer and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &SourceText) -> Vec<(Token, SmolStr)> {
    Lexer::new(source)
        .map(|token| {
            let text = token.text.clone();
            (token, text)
        })
        .collect()
}

// =========================================================================
// Literal decoding
// =========================================================================

/// An invalid escape sequence inside a string or char literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid escape sequence at byte {offset}")]
pub struct EscapeError {
    /// Byte offset of the backslash inside the unescaped text.
    pub offset: usize,
}

fn decode_value(kind: TokenKind, text: &str) -> Result<Option<TokenValue>, EscapeError> {
    match kind {
        TokenKind::IntLiteral => Ok(Some(decode_int(text))),
        TokenKind::FloatLiteral => Ok(Some(decode_float(text))),
        TokenKind::StringLiteral => {
            let body = &text[1..text.len() - 1];
            let decoded = unescape_string(body)?;
            Ok(Some(TokenValue::String(SmolStr::new(decoded))))
        }
        TokenKind::CharLiteral => {
            let body = &text[1..text.len() - 1];
            let decoded = unescape_string(body)?;
            let mut chars = decoded.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    let mut bytes = [0u8; 4];
                    c.encode_utf8(&mut bytes);
                    Ok(Some(TokenValue::Char(bytes)))
                }
                // Not exactly one scalar value.
                _ => Err(EscapeError { offset: 0 }),
            }
        }
        TokenKind::KwTrue => Ok(Some(TokenValue::Bool(true))),
        TokenKind::KwFalse => Ok(Some(TokenValue::Bool(false))),
        // Interpolated string bodies stay raw for the parser to re-scan.
        _ => Ok(None),
    }
}

fn decode_int(text: &str) -> TokenValue {
    let (digits, suffix) = split_int_suffix(text);
    let (digits, radix) = match digits.as_bytes().get(1) {
        Some(b'x') => (&digits[2..], 16),
        Some(b'b') => (&digits[2..], 2),
        Some(b'o') => (&digits[2..], 8),
        _ => (digits, 10),
    };
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    let value = u64::from_str_radix(&cleaned, radix).unwrap_or(u64::MAX);

    // Out-of-range literals saturate at the requested width's MAX; the
    // lexer itself stays total.
    match suffix {
        Some("i8") => TokenValue::I8(value.min(i8::MAX as u64) as i8),
        Some("i16") => TokenValue::I16(value.min(i16::MAX as u64) as i16),
        Some("i32") => TokenValue::I32(value.min(i32::MAX as u64) as i32),
        Some("i64") => TokenValue::I64(value.min(i64::MAX as u64) as i64),
        Some("u8") => TokenValue::U8(value.min(u64::from(u8::MAX)) as u8),
        Some("u16") => TokenValue::U16(value.min(u64::from(u16::MAX)) as u16),
        Some("u32") => TokenValue::U32(value.min(u64::from(u32::MAX)) as u32),
        Some("u64") => TokenValue::U64(value),
        _ if value <= i64::MAX as u64 => TokenValue::I64(value as i64),
        _ => TokenValue::U64(value),
    }
}

fn split_int_suffix(text: &str) -> (&str, Option<&str>) {
    for suffix in ["i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64"] {
        if let Some(digits) = text.strip_suffix(suffix) {
            // Guard against hex digits swallowing the suffix start: the
            // regexes only permit a suffix at the very end, so a stripped
            // prefix that still ends in a digit or '_' is the real cut.
            if !digits.is_empty() {
                return (digits, Some(suffix));
            }
        }
    }
    (text, None)
}

fn decode_float(text: &str) -> TokenValue {
    let (digits, is_f32) = if let Some(d) = text.strip_suffix("f32") {
        (d, true)
    } else if let Some(d) = text.strip_suffix("f64") {
        (d, false)
    } else {
        (text, false)
    };
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    let value: f64 = cleaned.parse().unwrap_or(f64::INFINITY);
    if is_f32 {
        TokenValue::F32(value as f32)
    } else {
        TokenValue::F64(value)
    }
}

/// Decodes C-style escape sequences in a string or char literal body.
///
/// Supported escapes: `\n \r \t \0 \\ \" \' \{ \} \xNN \u{..}`. This is the
/// same routine the parser uses for the literal parts of interpolated
/// strings, which is why the brace escapes live here.
pub fn unescape_string(raw: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, escape)) = chars.next() else {
            return Err(EscapeError { offset });
        };
        match escape {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '{' => out.push('{'),
            '}' => out.push('}'),
            'x' => {
                let hi = chars.next().map(|(_, c)| c);
                let lo = chars.next().map(|(_, c)| c);
                let (Some(hi), Some(lo)) = (hi, lo) else {
                    return Err(EscapeError { offset });
                };
                let (Some(hi), Some(lo)) = (hi.to_digit(16), lo.to_digit(16)) else {
                    return Err(EscapeError { offset });
                };
                let Some(c) = char::from_u32(hi * 16 + lo) else {
                    return Err(EscapeError { offset });
                };
                out.push(c);
            }
            'u' => {
                if chars.next().map(|(_, c)| c) != Some('{') {
                    return Err(EscapeError { offset });
                }
                let mut code = 0u32;
                let mut digits = 0;
                loop {
                    match chars.next().map(|(_, c)| c) {
                        Some('}') if digits > 0 => break,
                        Some(c) if c.is_ascii_hexdigit() && digits < 6 => {
                            code = code * 16 + c.to_digit(16).unwrap_or(0);
                            digits += 1;
                        }
                        _ => return Err(EscapeError { offset }),
                    }
                }
                let Some(c) = char::from_u32(code) else {
                    return Err(EscapeError { offset });
                };
                out.push(c);
            }
            _ => return Err(EscapeError { offset }),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_kinds(text: &str) -> Vec<TokenKind> {
        let source = SourceText::new(text);
        lex(&source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.kind)
            .collect()
    }

    fn single_value(text: &str) -> TokenValue {
        let source = SourceText::new(text);
        let tokens: Vec<_> = FilteredLexer::new(&source).collect();
        assert_eq!(tokens.len(), 1, "{text:?} lexed to {tokens:?}");
        tokens[0].value.clone().expect("no value")
    }

    #[test]
    fn test_lexer_basic() {
        let source = SourceText::new("let x = 42");
        let tokens: Vec<_> = FilteredLexer::new(&source).collect();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::KwLet,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::IntLiteral,
            ]
        );
        assert_eq!(tokens[1].text, "x");
        assert_eq!(tokens[3].value, Some(TokenValue::I64(42)));
    }

    #[test]
    fn test_positions_are_one_based() {
        let source = SourceText::new("a\nbb");
        let tokens: Vec<_> = FilteredLexer::new(&source).collect();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 1));
    }

    #[test]
    fn test_int_suffixes() {
        assert_eq!(single_value("5i8"), TokenValue::I8(5));
        assert_eq!(single_value("5u16"), TokenValue::U16(5));
        assert_eq!(single_value("0xFFu8"), TokenValue::U8(255));
        assert_eq!(single_value("0b1010"), TokenValue::I64(10));
        assert_eq!(single_value("0o77"), TokenValue::I64(63));
        assert_eq!(single_value("1_000_000"), TokenValue::I64(1_000_000));
    }

    #[test]
    fn test_int_saturation() {
        assert_eq!(single_value("300i8"), TokenValue::I8(i8::MAX));
        assert_eq!(single_value("70000u16"), TokenValue::U16(u16::MAX));
        assert_eq!(
            single_value("99999999999999999999999999"),
            TokenValue::U64(u64::MAX)
        );
    }

    #[test]
    fn test_unsuffixed_widens() {
        assert_eq!(single_value("9223372036854775807"), TokenValue::I64(i64::MAX));
        assert_eq!(
            single_value("9223372036854775808"),
            TokenValue::U64(9_223_372_036_854_775_808)
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(single_value("3.5"), TokenValue::F64(3.5));
        assert_eq!(single_value("1f32"), TokenValue::F32(1.0));
        assert_eq!(single_value("2.5e2"), TokenValue::F64(250.0));
    }

    #[test]
    fn test_string_decoding() {
        assert_eq!(
            single_value(r#""a\nb""#),
            TokenValue::String(SmolStr::new("a\nb"))
        );
        assert_eq!(
            single_value(r#""\x41\u{1F600}""#),
            TokenValue::String(SmolStr::new("A\u{1F600}"))
        );
    }

    #[test]
    fn test_bad_escape_is_error_token() {
        assert_eq!(lex_kinds(r#""\q""#), vec![TokenKind::Error]);
    }

    #[test]
    fn test_char_decoding() {
        assert_eq!(single_value("'A'"), TokenValue::Char([0x41, 0, 0, 0]));
        let TokenValue::Char(bytes) = single_value("'\u{20AC}'") else {
            panic!("expected char value");
        };
        assert_eq!(&bytes[..3], "\u{20AC}".as_bytes());
        assert_eq!(bytes[3], 0);
    }

    #[test]
    fn test_char_must_be_single_scalar() {
        assert_eq!(lex_kinds("'ab'"), vec![TokenKind::Error]);
    }

    #[test]
    fn test_interpolated_string_stays_raw() {
        let source = SourceText::new(r#"$"hi {1+2}!""#);
        let tokens: Vec<_> = FilteredLexer::new(&source).collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::InterpolatedStringLiteral);
        assert_eq!(tokens[0].value, None);
    }

    #[test]
    fn test_bom_is_trivia() {
        let source = SourceText::new("\u{FEFF}let");
        let tokens: Vec<_> = FilteredLexer::new(&source).collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::KwLet);
    }

    #[test]
    fn test_over_range_shifts_positions() {
        let source = SourceText::new("ab 1+2 cd");
        let range = TextRange::new(TextSize::from(3), TextSize::from(6));
        let tokens: Vec<_> = FilteredLexer::over_range(&source, range).collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(
            tokens[0].range,
            TextRange::new(TextSize::from(3), TextSize::from(4))
        );
        assert_eq!(
            tokens[1].range,
            TextRange::new(TextSize::from(4), TextSize::from(5))
        );
        assert_eq!(tokens[0].column, 4);
    }
}
