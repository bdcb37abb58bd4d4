//! Interpolated string parsing.
//!
//! The lexer hands over one `$"..."` token with its body still raw. The
//! parser splits that body into literal runs and `{...}` expression holes,
//! honoring escapes and brace nesting, then re-lexes each hole over a
//! sub-range of the original buffer so every sub-token's range and
//! line/column already point at the real source.

use text_size::{TextRange, TextSize};

use crate::ast::{Expression, InterpolatedStringExpression, TokenExpression};
use crate::lexer::{unescape_string, FilteredLexer, Token, TokenKind, TokenValue};
use crate::parser::{collect_tokens, ParseResult, Parser};

impl Parser {
    /// Parses the current interpolated string literal token.
    pub(crate) fn parse_interpolated_string(&mut self) -> ParseResult<Expression> {
        let token = self.bump();
        let range = token.range;

        // The body sits between the `$"` prefix and the closing quote.
        let body_start = usize::from(range.start()) + 2;
        let body_end = usize::from(range.end()).saturating_sub(1);
        let source = self.source.clone();
        let bytes = source.text().as_bytes();

        let mut parts: Vec<Expression> = Vec::new();
        let mut literal_start = body_start;
        let mut i = body_start;

        while i < body_end {
            match bytes[i] {
                // Escapes stay inside the literal run; they are decoded
                // later by the shared unescape routine.
                b'\\' => i += 2,
                b'{' => {
                    self.push_literal_part(&mut parts, literal_start, i);

                    let expr_start = i + 1;
                    let mut depth = 1usize;
                    let mut in_string = false;
                    let mut j = expr_start;
                    while j < body_end && depth > 0 {
                        let byte = bytes[j];
                        if in_string {
                            if byte == b'\\' {
                                j += 2;
                                continue;
                            }
                            if byte == b'"' {
                                in_string = false;
                            }
                        } else {
                            match byte {
                                b'\\' => {
                                    j += 2;
                                    continue;
                                }
                                b'"' => in_string = true,
                                b'{' => depth += 1,
                                b'}' => {
                                    depth -= 1;
                                    if depth == 0 {
                                        break;
                                    }
                                }
                                _ => {}
                            }
                        }
                        j += 1;
                    }

                    if depth != 0 || j >= body_end {
                        let at = TextRange::new(
                            TextSize::from(i as u32),
                            TextSize::from(body_end as u32),
                        );
                        self.error_at(at, "unterminated expression in interpolated string");
                        literal_start = body_end;
                        break;
                    }

                    if j == expr_start {
                        let at = TextRange::new(
                            TextSize::from(i as u32),
                            TextSize::from(j as u32 + 1),
                        );
                        self.error_at(at, "empty expression in interpolated string");
                    } else {
                        let sub_range = TextRange::new(
                            TextSize::from(expr_start as u32),
                            TextSize::from(j as u32),
                        );
                        self.parse_hole(sub_range, &mut parts);
                    }

                    i = j + 1;
                    literal_start = i;
                }
                b'}' => {
                    let at =
                        TextRange::new(TextSize::from(i as u32), TextSize::from(i as u32 + 1));
                    self.error_at(at, "unescaped '}' in interpolated string");
                    i += 1;
                }
                _ => i += 1,
            }
        }

        self.push_literal_part(&mut parts, literal_start, body_end);
        Ok(Expression::InterpolatedString(InterpolatedStringExpression {
            parts,
            range,
        }))
    }

    /// Decodes a raw literal run into a synthesized string token part.
    fn push_literal_part(&mut self, parts: &mut Vec<Expression>, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let range = TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32));
        let raw = self.source.slice(range).to_owned();
        match unescape_string(&raw) {
            Ok(decoded) => {
                let (line, column) = self.source.line_col(range.start());
                let token = Token {
                    kind: TokenKind::StringLiteral,
                    range,
                    value: Some(TokenValue::String(decoded.into())),
                    text: raw.into(),
                    line,
                    column,
                    source: self.source.clone(),
                };
                parts.push(Expression::Token(TokenExpression { token, range }));
            }
            Err(_) => {
                self.error_at(range, "invalid escape sequence in interpolated string");
            }
        }
    }

    /// Re-lexes and parses one `{...}` hole with an independent parser over
    /// the same buffer; its diagnostics merge into this parser's list.
    fn parse_hole(&mut self, range: TextRange, parts: &mut Vec<Expression>) {
        let source = self.source.clone();
        let mut diagnostics = Vec::new();
        let tokens = collect_tokens(
            &source,
            FilteredLexer::over_range(&source, range),
            &mut diagnostics,
        );
        let mut sub = Parser::from_tokens(source, tokens, range.end());
        sub.diagnostics = diagnostics;

        match sub.parse_expression() {
            Ok(expression) => {
                if !sub.at_end() {
                    let error = sub.unexpected("unexpected token in interpolated expression");
                    sub.report(error);
                }
                parts.push(expression);
            }
            Err(error) => sub.report(error),
        }
        self.diagnostics.append(&mut sub.diagnostics);
    }
}
