use beanstalk_syntax::lexer::{FilteredLexer, TokenKind, TokenValue};
use beanstalk_syntax::SourceText;

fn single(text: &str) -> (TokenKind, Option<TokenValue>) {
    let source = SourceText::new(text);
    let tokens: Vec<_> = FilteredLexer::new(&source).collect();
    assert_eq!(tokens.len(), 1, "{text:?} lexed to {tokens:?}");
    (tokens[0].kind, tokens[0].value.clone())
}

fn value(text: &str) -> TokenValue {
    let (kind, value) = single(text);
    assert_ne!(kind, TokenKind::Error, "{text:?} failed to lex");
    value.unwrap_or_else(|| panic!("{text:?} has no value"))
}

#[test]
fn test_decimal_integers() {
    assert_eq!(value("0"), TokenValue::I64(0));
    assert_eq!(value("42"), TokenValue::I64(42));
    assert_eq!(value("1_000_000"), TokenValue::I64(1_000_000));
}

#[test]
fn test_radix_prefixes() {
    assert_eq!(value("0xFF"), TokenValue::I64(255));
    assert_eq!(value("0b1010"), TokenValue::I64(10));
    assert_eq!(value("0o17"), TokenValue::I64(15));
}

#[test]
fn test_width_suffixes_select_the_narrow_type() {
    assert_eq!(value("1i8"), TokenValue::I8(1));
    assert_eq!(value("2i16"), TokenValue::I16(2));
    assert_eq!(value("3i32"), TokenValue::I32(3));
    assert_eq!(value("4i64"), TokenValue::I64(4));
    assert_eq!(value("5u8"), TokenValue::U8(5));
    assert_eq!(value("6u16"), TokenValue::U16(6));
    assert_eq!(value("7u32"), TokenValue::U32(7));
    assert_eq!(value("8u64"), TokenValue::U64(8));
    assert_eq!(value("0xFFu8"), TokenValue::U8(255));
}

#[test]
fn test_out_of_range_literals_saturate() {
    assert_eq!(value("1000i8"), TokenValue::I8(i8::MAX));
    assert_eq!(value("100000u16"), TokenValue::U16(u16::MAX));
}

#[test]
fn test_unsuffixed_integers_use_the_widest_type() {
    assert_eq!(value("9223372036854775807"), TokenValue::I64(i64::MAX));
    assert_eq!(
        value("18446744073709551615"),
        TokenValue::U64(u64::MAX)
    );
}

#[test]
fn test_floats() {
    assert_eq!(value("3.25"), TokenValue::F64(3.25));
    assert_eq!(value("1e3"), TokenValue::F64(1000.0));
    assert_eq!(value("2.5e-1"), TokenValue::F64(0.25));
    assert_eq!(value("1.5f32"), TokenValue::F32(1.5));
    assert_eq!(value("2f64"), TokenValue::F64(2.0));
}

#[test]
fn test_string_escapes() {
    assert_eq!(
        value(r#""tab\there""#),
        TokenValue::String("tab\there".into())
    );
    assert_eq!(value(r#""\x41\x42""#), TokenValue::String("AB".into()));
    assert_eq!(
        value(r#""\u{48}\u{49}""#),
        TokenValue::String("HI".into())
    );
    assert_eq!(value(r#""\"\\""#), TokenValue::String("\"\\".into()));
}

#[test]
fn test_invalid_escape_is_an_error_token() {
    assert_eq!(single(r#""\q""#).0, TokenKind::Error);
    assert_eq!(single(r#""\x4""#).0, TokenKind::Error);
    assert_eq!(single(r#""\u{}""#).0, TokenKind::Error);
}

#[test]
fn test_char_literals_are_null_padded_utf8() {
    assert_eq!(value("'A'"), TokenValue::Char([0x41, 0, 0, 0]));
    assert_eq!(value("'\\n'"), TokenValue::Char([0x0A, 0, 0, 0]));

    let TokenValue::Char(bytes) = value("'\u{1F600}'") else {
        panic!("expected a char value");
    };
    assert_eq!(bytes, *"\u{1F600}".as_bytes().first_chunk::<4>().unwrap());
}

#[test]
fn test_char_with_multiple_scalars_is_an_error() {
    assert_eq!(single("'ab'").0, TokenKind::Error);
    assert_eq!(single("''").0, TokenKind::Error);
}

#[test]
fn test_unterminated_literals_are_error_tokens() {
    assert_eq!(single(r#""open"#).0, TokenKind::Error);
    assert_eq!(single("'x").0, TokenKind::Error);
    assert_eq!(single(r#"$"open"#).0, TokenKind::Error);
}

#[test]
fn test_interpolated_string_body_stays_raw() {
    let (kind, value) = single(r#"$"x = {x}\n""#);
    assert_eq!(kind, TokenKind::InterpolatedStringLiteral);
    assert_eq!(value, None);
}

#[test]
fn test_boolean_keywords_carry_values() {
    assert_eq!(value("true"), TokenValue::Bool(true));
    assert_eq!(value("false"), TokenValue::Bool(false));
}
