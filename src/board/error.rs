//! Error types for board construction and FEN parsing.

use std::fmt;

use thiserror::Error;

use super::types::Color;

/// The FEN field a [`FenError`] was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FenField {
    /// The string as a whole (field count)
    Layout,
    PiecePlacement,
    SideToMove,
    Castling,
    EnPassant,
    HalfmoveClock,
    FullmoveNumber,
}

impl fmt::Display for FenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FenField::Layout => "field layout",
            FenField::PiecePlacement => "piece placement",
            FenField::SideToMove => "side to move",
            FenField::Castling => "castling rights",
            FenField::EnPassant => "en passant square",
            FenField::HalfmoveClock => "halfmove clock",
            FenField::FullmoveNumber => "fullmove number",
        };
        f.write_str(name)
    }
}

/// Error type for FEN parsing failures.
///
/// Parsing stops at the first violated rule; `field()` names the FEN field it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    #[error("FEN must have at least 4 fields, found {found}")]
    TooFewParts { found: usize },
    /// FEN string has more than 6 fields
    #[error("FEN must have at most 6 fields, found {found}")]
    TooManyParts { found: usize },
    /// Piece placement does not describe exactly 8 ranks
    #[error("piece placement must have 8 ranks, found {found}")]
    WrongRankCount { found: usize },
    /// A rank does not describe exactly 8 squares (rank is 1-based, as printed in FEN)
    #[error("rank {rank} describes {squares} squares, expected 8")]
    WrongRankLength { rank: usize, squares: usize },
    /// Invalid piece character in position string
    #[error("invalid piece character '{char}' in FEN")]
    InvalidPiece { char: char },
    /// Invalid side to move (must be 'w' or 'b')
    #[error("invalid side to move '{found}', expected 'w' or 'b'")]
    InvalidSideToMove { found: String },
    /// Malformed castling field
    #[error("invalid castling field '{found}'")]
    InvalidCastling { found: String },
    /// Malformed en passant square
    #[error("invalid en passant square '{found}'")]
    InvalidEnPassant { found: String },
    /// Halfmove clock is not a non-negative integer
    #[error("invalid halfmove clock '{found}'")]
    InvalidHalfmoveClock { found: String },
    /// Fullmove number is not a positive integer
    #[error("invalid fullmove number '{found}'")]
    InvalidFullmoveNumber { found: String },
    /// A side does not have exactly one king
    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },
}

impl FenError {
    /// The FEN field that violated its rule.
    #[must_use]
    pub const fn field(&self) -> FenField {
        match self {
            FenError::TooFewParts { .. } | FenError::TooManyParts { .. } => FenField::Layout,
            FenError::WrongRankCount { .. }
            | FenError::WrongRankLength { .. }
            | FenError::InvalidPiece { .. }
            | FenError::KingCount { .. } => FenField::PiecePlacement,
            FenError::InvalidSideToMove { .. } => FenField::SideToMove,
            FenError::InvalidCastling { .. } => FenField::Castling,
            FenError::InvalidEnPassant { .. } => FenField::EnPassant,
            FenError::InvalidHalfmoveClock { .. } => FenField::HalfmoveClock,
            FenError::InvalidFullmoveNumber { .. } => FenField::FullmoveNumber,
        }
    }
}

/// Error type for square parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    /// Invalid algebraic notation
    #[error("invalid square notation '{notation}'")]
    InvalidNotation { notation: String },
}
