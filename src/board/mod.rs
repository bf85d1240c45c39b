//! Chess position representation and FEN parsing.
//!
//! The board is a plain 64-square mailbox carrying just what evaluation needs:
//! piece placement, side to move, and the FEN metadata fields.
//!
//! # Example
//! ```
//! use nnue_probe::board::{Board, Color, Piece, Square};
//!
//! let board: Board = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1".parse().unwrap();
//! assert_eq!(board.piece_at(Square(1, 4)), Some((Color::White, Piece::Pawn)));
//! assert_eq!(board.king_square(Color::Black), Some(Square(7, 4)));
//! ```

mod error;
mod fen;
mod state;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use error::{FenError, FenField, SquareError};
pub use fen::START_FEN;
pub use state::Board;
pub use types::{CastlingRights, Color, Piece, Square};
