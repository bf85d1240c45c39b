//! Position evaluation against a loaded network.

use std::path::Path;
use std::sync::Arc;

use log::trace;

use crate::board::{Board, Color, Piece, Square};
use crate::error::{Error, Result};
use crate::nnue::{Architecture, NetworkWeights};

/// Scores positions with one immutable network.
///
/// Cloning is cheap and shares the weights, so an evaluator can be handed to
/// any number of threads. Each call builds its own board and accumulator.
#[derive(Clone, Debug)]
pub struct Evaluator {
    network: Arc<NetworkWeights>,
}

impl Evaluator {
    #[must_use]
    pub fn new(network: Arc<NetworkWeights>) -> Self {
        Evaluator { network }
    }

    /// Load a `256x2-32-32-1` network file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, &Architecture::default())
    }

    /// Load a network file of shape `arch`.
    pub fn load_with<P: AsRef<Path>>(path: P, arch: &Architecture) -> Result<Self> {
        let path = path.as_ref();
        let network =
            NetworkWeights::load_with(path, arch).map_err(|e| Error::from_network(path, e))?;
        Ok(Evaluator::new(Arc::new(network)))
    }

    #[must_use]
    pub fn network(&self) -> &Arc<NetworkWeights> {
        &self.network
    }

    /// Parse `fen` and score it from the side to move's point of view.
    pub fn evaluate(&self, fen: &str) -> Result<i32> {
        let board = Board::try_from_fen(fen)?;
        self.evaluate_board(&board)
    }

    /// Score an already built board.
    ///
    /// Boards without exactly one king per side fail with
    /// [`Error::KingCount`].
    pub fn evaluate_board(&self, board: &Board) -> Result<i32> {
        let score = self.network.evaluate(board)?;
        trace!("{} -> {score}", board.to_fen());
        Ok(score)
    }

    /// Score a bare piece list with `side_to_move` to play.
    ///
    /// The list needs exactly one king per colour and at most one piece per
    /// square.
    pub fn evaluate_pieces(
        &self,
        side_to_move: Color,
        pieces: &[(Color, Piece, Square)],
    ) -> Result<i32> {
        let board = board_from_pieces(side_to_move, pieces)?;
        self.evaluate_board(&board)
    }
}

fn board_from_pieces(side_to_move: Color, pieces: &[(Color, Piece, Square)]) -> Result<Board> {
    let mut board = Board::empty();
    board.set_side_to_move(side_to_move);
    for &(color, piece, sq) in pieces {
        if Square::new(sq.rank(), sq.file()).is_none() {
            return Err(Error::InvalidPieceList {
                reason: format!("square ({}, {}) is off the board", sq.rank(), sq.file()),
            });
        }
        if board.piece_at(sq).is_some() {
            return Err(Error::InvalidPieceList {
                reason: format!("{sq} is occupied twice"),
            });
        }
        board.set_piece(sq, color, piece);
    }
    if let Some((color, count)) = board.king_count_violation() {
        return Err(Error::InvalidPieceList {
            reason: format!("{color} has {count} kings"),
        });
    }
    Ok(board)
}
