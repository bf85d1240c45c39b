//! Per-perspective accumulators.

use super::feature_transformer::FeatureTransformer;
use super::features::{active_features, feature_index};
use super::simd;
use crate::board::{Board, Color, Piece, Square};

/// Highest value a transformed feature can take
pub const TRANSFORMED_MAX: i16 = 127;

/// Feature transformer output for both perspectives.
///
/// Each half equals the transformer bias plus the weight rows of every active
/// feature of that perspective. Equal boards always give bit-identical
/// accumulators, whether built by [`FeatureTransformer::transform`] or by
/// incremental updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accumulator {
    /// Indexed by `Color::index()`
    values: [Vec<i16>; 2],
}

impl Accumulator {
    /// Accumulator holding only the biases (no active features).
    #[must_use]
    pub fn new(transformer: &FeatureTransformer) -> Self {
        let biases = transformer.biases().to_vec();
        Accumulator {
            values: [biases.clone(), biases],
        }
    }

    /// The half computed from `perspective`'s king.
    #[inline]
    #[must_use]
    pub fn perspective(&self, perspective: Color) -> &[i16] {
        &self.values[perspective.index()]
    }

    /// Recompute both halves from scratch.
    pub fn refresh(&mut self, transformer: &FeatureTransformer, board: &Board) {
        for perspective in Color::BOTH {
            self.refresh_perspective(transformer, board, perspective);
        }
    }

    /// Recompute one half from scratch; needed after that side's king moved.
    pub fn refresh_perspective(
        &mut self,
        transformer: &FeatureTransformer,
        board: &Board,
        perspective: Color,
    ) {
        let half = &mut self.values[perspective.index()];
        half.copy_from_slice(transformer.biases());
        for idx in active_features(board, perspective) {
            simd::add_row(half, transformer.row(idx));
        }
    }

    /// Account for `piece` of `color` having been placed on `sq`.
    ///
    /// `board` supplies the king squares. Returns `false` without touching the
    /// accumulator for kings: a king move changes every feature of its side,
    /// so the caller has to refresh instead.
    #[must_use]
    pub fn add_piece(
        &mut self,
        transformer: &FeatureTransformer,
        board: &Board,
        sq: Square,
        color: Color,
        piece: Piece,
    ) -> bool {
        self.apply(transformer, board, sq, color, piece, simd::add_row)
    }

    /// Account for `piece` of `color` having been removed from `sq`.
    ///
    /// Same king rule as [`Accumulator::add_piece`].
    #[must_use]
    pub fn remove_piece(
        &mut self,
        transformer: &FeatureTransformer,
        board: &Board,
        sq: Square,
        color: Color,
        piece: Piece,
    ) -> bool {
        self.apply(transformer, board, sq, color, piece, simd::sub_row)
    }

    fn apply(
        &mut self,
        transformer: &FeatureTransformer,
        board: &Board,
        sq: Square,
        color: Color,
        piece: Piece,
        update: fn(&mut [i16], &[i16]),
    ) -> bool {
        if piece == Piece::King {
            return false;
        }
        for perspective in Color::BOTH {
            let Some(king_sq) = board.king_square(perspective) else {
                continue;
            };
            if let Some(idx) = feature_index(perspective, king_sq, sq, color, piece) {
                update(&mut self.values[perspective.index()], transformer.row(idx));
            }
        }
        true
    }

    /// Network input: both halves clipped to `0..=127`, `side_to_move` first.
    #[must_use]
    pub fn transformed_features(&self, side_to_move: Color) -> Vec<u8> {
        let order = [side_to_move, side_to_move.opponent()];
        order
            .iter()
            .flat_map(|&perspective| self.perspective(perspective))
            .map(|&v| v.clamp(0, TRANSFORMED_MAX) as u8)
            .collect()
    }
}
