//! Dotted module names.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::lexer::Token;

/// A dotted sequence of identifiers naming a module, e.g. `a.b.c`.
///
/// Stored as the ordered segment tokens plus the joined representation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleName {
    /// The segment tokens, in source order.
    pub segments: Vec<Token>,
    /// The joined dotted form, e.g. `"a.b.c"`.
    pub text: SmolStr,
    /// The range from the first to the last segment.
    pub range: TextRange,
}

impl ModuleName {
    /// Builds a module name from its segment tokens.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty; the parser never produces an empty
    /// module name.
    #[must_use]
    pub fn new(segments: Vec<Token>) -> Self {
        assert!(!segments.is_empty(), "module name needs at least one segment");
        let text = SmolStr::new(
            segments
                .iter()
                .map(|token| token.text.as_str())
                .collect::<Vec<_>>()
                .join("."),
        );
        let range = segments
            .first()
            .map(|t| t.range)
            .unwrap_or_default()
            .cover(segments.last().map(|t| t.range).unwrap_or_default());
        Self {
            segments,
            text,
            range,
        }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if there are no segments. Never true for parser
    /// output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl std::fmt::Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
