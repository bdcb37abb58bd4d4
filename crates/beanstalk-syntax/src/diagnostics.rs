//! Diagnostics reported by the front-end.
//!
//! A [`Diagnostic`] carries a severity, a handle to the source buffer, the
//! byte range it refers to, and a message. Rendering follows the fixed
//! layout `[line L, column C at '<slice>'] message` with 1-based positions.

use std::fmt;

use text_size::TextRange;

use crate::source::SourceText;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational note.
    Info,
    /// Suspicious but not invalid.
    Warning,
    /// The program is invalid; no AST is produced.
    Error,
}

/// A diagnostic message anchored to a source range.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: Severity,
    /// The buffer the diagnostic refers to.
    pub source: SourceText,
    /// The byte range the diagnostic refers to.
    pub range: TextRange,
    /// The diagnostic message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(
        severity: Severity,
        source: SourceText,
        range: TextRange,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            source,
            range,
            message: message.into(),
        }
    }

    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(source: SourceText, range: TextRange, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, source, range, message)
    }

    /// The 1-based `(line, column)` of the diagnostic's start.
    #[must_use]
    pub fn line_col(&self) -> (u32, u32) {
        self.source.line_col(self.range.start())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.line_col();
        write!(
            f,
            "[line {line}, column {column} at '{}'] {}",
            self.source.slice(self.range),
            self.message
        )
    }
}

/// Stably sorts diagnostics by `(line, column)` ascending.
///
/// Diagnostics with equal positions keep their discovery order.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(Diagnostic::line_col);
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextSize;

    #[test]
    fn test_display_layout() {
        let source = SourceText::new("let x = @");
        let range = TextRange::new(TextSize::from(8), TextSize::from(9));
        let diagnostic = Diagnostic::error(source, range, "unexpected character");
        assert_eq!(
            diagnostic.to_string(),
            "[line 1, column 9 at '@'] unexpected character"
        );
    }

    #[test]
    fn test_sort_is_stable() {
        let source = SourceText::new("ab\ncd");
        let at = |start: u32, end: u32, msg: &str| {
            Diagnostic::error(
                source.clone(),
                TextRange::new(TextSize::from(start), TextSize::from(end)),
                msg,
            )
        };
        let mut diagnostics = vec![
            at(3, 4, "second line"),
            at(0, 1, "first"),
            at(0, 1, "also first"),
        ];
        sort_diagnostics(&mut diagnostics);
        assert_eq!(diagnostics[0].message, "first");
        assert_eq!(diagnostics[1].message, "also first");
        assert_eq!(diagnostics[2].message, "second line");
    }
}
