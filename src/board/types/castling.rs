//! Castling rights type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// FEN letters in canonical output order
const FEN_ORDER: [(char, u8); 4] = [
    ('K', CASTLE_WHITE_K),
    ('Q', CASTLE_WHITE_Q),
    ('k', CASTLE_BLACK_K),
    ('q', CASTLE_BLACK_Q),
];

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        let bit = Self::bit_for(color, kingside);
        self.0 & bit != 0
    }

    /// Create from raw bitmask value; bits outside `KQkq` are dropped
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        CastlingRights(value & ALL_CASTLING_RIGHTS)
    }

    /// Bit for a FEN castling letter (`K`, `Q`, `k`, `q`)
    #[must_use]
    pub(crate) fn bit_for_fen_char(c: char) -> Option<u8> {
        FEN_ORDER
            .iter()
            .find(|(letter, _)| *letter == c)
            .map(|&(_, bit)| bit)
    }

    /// FEN castling field (`-` when empty)
    #[must_use]
    pub fn to_fen(self) -> String {
        let field: String = FEN_ORDER
            .iter()
            .filter(|(_, bit)| self.0 & bit != 0)
            .map(|&(letter, _)| letter)
            .collect();
        if field.is_empty() {
            "-".to_string()
        } else {
            field
        }
    }

    /// Get the bit for a specific castling right
    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fen_canonical_order() {
        let rights = CastlingRights::from_u8(CASTLE_BLACK_Q | CASTLE_WHITE_K);
        assert_eq!(rights.to_fen(), "Kq");
        assert_eq!(CastlingRights::all().to_fen(), "KQkq");
        assert_eq!(CastlingRights::none().to_fen(), "-");
    }

    #[test]
    fn test_has() {
        let rights = CastlingRights::from_u8(CASTLE_WHITE_K | CASTLE_BLACK_Q);
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(rights.has(Color::Black, false));
        assert!(!rights.has(Color::Black, true));
    }

    #[test]
    fn test_from_u8_masks_unknown_bits() {
        assert_eq!(CastlingRights::from_u8(0xFF), CastlingRights::all());
    }
}
