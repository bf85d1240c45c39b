//! Core chess types.
//!
//! - `Piece` and `Color` - chess piece kinds and colors
//! - `Square` - (rank, file) board square
//! - `CastlingRights` - castling state

mod castling;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use piece::{Color, Piece};
pub use square::Square;
