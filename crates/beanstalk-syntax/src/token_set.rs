//! Bitmask sets of token kinds.
//!
//! Error recovery works off fixed per-scope synchronization tables. A
//! [`TokenSet`] packs those tables into a `u128` keyed by the token-kind
//! ordinal so membership is a single mask test.

use crate::lexer::TokenKind;

/// A constant set of [`TokenKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    /// The empty set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Creates a set from a list of kinds.
    #[must_use]
    pub const fn new(kinds: &[TokenKind]) -> TokenSet {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            bits |= mask(kinds[i]);
            i += 1;
        }
        TokenSet(bits)
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    /// Returns `true` if `kind` is a member.
    #[must_use]
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & mask(kind) != 0
    }
}

const fn mask(kind: TokenKind) -> u128 {
    1u128 << (kind as u16)
}
