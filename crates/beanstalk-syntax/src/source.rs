//! Shared source buffers.
//!
//! A [`SourceText`] is an immutable, reference-counted handle to the text of
//! one source file. Tokens, AST nodes, and diagnostics all hold a handle so
//! they can render themselves long after the parse that produced them.

use std::fmt;
use std::sync::Arc;

use text_size::{TextRange, TextSize};

/// An immutable source buffer shared between the lexer, the AST, and
/// diagnostics.
///
/// Cloning is cheap (an `Arc` bump). Offsets are byte offsets; the line
/// index recognizes `\n`, `\r\n`, and `\r` terminators.
#[derive(Clone)]
pub struct SourceText {
    inner: Arc<SourceTextInner>,
}

struct SourceTextInner {
    text: String,
    /// Byte offset of the first byte of every line, always starting with 0.
    line_starts: Vec<TextSize>,
}

impl SourceText {
    /// Creates a new source buffer from the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self {
            inner: Arc::new(SourceTextInner { text, line_starts }),
        }
    }

    /// Returns the full text of the buffer.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.inner.text
    }

    /// Returns the length of the buffer in bytes.
    #[must_use]
    pub fn len(&self) -> TextSize {
        TextSize::of(self.inner.text.as_str())
    }

    /// Returns `true` if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.text.is_empty()
    }

    /// Returns the range covering the entire buffer.
    #[must_use]
    pub fn full_range(&self) -> TextRange {
        TextRange::new(TextSize::from(0), self.len())
    }

    /// Returns the text covered by `range`.
    ///
    /// Out-of-bounds ranges are clamped to the buffer.
    #[must_use]
    pub fn slice(&self, range: TextRange) -> &str {
        let len = usize::from(self.len());
        let start = usize::from(range.start()).min(len);
        let end = usize::from(range.end()).min(len).max(start);
        &self.inner.text[start..end]
    }

    /// Returns the 1-based `(line, column)` of a byte offset.
    ///
    /// The column counts characters, not bytes, so multi-byte scalars take a
    /// single column.
    #[must_use]
    pub fn line_col(&self, offset: TextSize) -> (u32, u32) {
        let starts = &self.inner.line_starts;
        let line = starts.partition_point(|&start| start <= offset) - 1;
        let line_start = starts[line];
        let clamped = offset.min(self.len());
        let column = self.slice(TextRange::new(line_start, clamped)).chars().count();
        (line as u32 + 1, column as u32 + 1)
    }

    /// Returns `true` if two handles refer to the same buffer.
    #[must_use]
    pub fn same_buffer(&self, other: &SourceText) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceText")
            .field("len", &u32::from(self.len()))
            .finish_non_exhaustive()
    }
}

impl PartialEq for SourceText {
    fn eq(&self, other: &Self) -> bool {
        self.same_buffer(other) || self.text() == other.text()
    }
}

impl Eq for SourceText {}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

fn compute_line_starts(text: &str) -> Vec<TextSize> {
    let mut starts = vec![TextSize::from(0)];
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => starts.push(TextSize::from(i as u32 + 1)),
            // A lone `\r` terminates a line; `\r\n` is handled by the `\n` arm.
            b'\r' if bytes.get(i + 1) != Some(&b'\n') => {
                starts.push(TextSize::from(i as u32 + 1));
            }
            _ => {}
        }
        i += 1;
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_basic() {
        let source = SourceText::new("ab\ncd\nef");
        assert_eq!(source.line_col(TextSize::from(0)), (1, 1));
        assert_eq!(source.line_col(TextSize::from(1)), (1, 2));
        assert_eq!(source.line_col(TextSize::from(3)), (2, 1));
        assert_eq!(source.line_col(TextSize::from(7)), (3, 2));
    }

    #[test]
    fn test_line_col_crlf_and_cr() {
        let source = SourceText::new("a\r\nb\rc");
        assert_eq!(source.line_col(TextSize::from(0)), (1, 1));
        assert_eq!(source.line_col(TextSize::from(3)), (2, 1));
        assert_eq!(source.line_col(TextSize::from(5)), (3, 1));
    }

    #[test]
    fn test_column_counts_chars() {
        let source = SourceText::new("é=1");
        // 'é' is two bytes; '=' still sits in column 2.
        assert_eq!(source.line_col(TextSize::from(2)), (1, 2));
    }

    #[test]
    fn test_slice_clamps() {
        let source = SourceText::new("abc");
        let range = TextRange::new(TextSize::from(1), TextSize::from(10));
        assert_eq!(source.slice(range), "bc");
    }
}
