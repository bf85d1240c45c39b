//! HalfKP feature indexing.
//!
//! A feature is a non-king piece on a square, seen from one side's king:
//!
//! ```text
//! index = orient(p, sq) + PIECE_BASE[relative piece] + PS_END * orient(p, king_sq(p))
//! ```
//!
//! `orient` is the identity for White and a 180 degree rotation (`sq ^ 63`)
//! for Black, so both perspectives see their own pieces as "friend" pieces
//! moving up the board. Index 0 of every king bucket is unused.

use crate::board::{Board, Color, Piece, Square};

/// Width of one king bucket (10 piece planes of 64 squares plus the unused slot 0)
pub const PS_END: usize = 641;

/// Total number of HalfKP features
pub const HALFKP_DIMENSIONS: usize = 64 * PS_END;

/// Plane base per piece kind, `[friend, enemy]`
const PIECE_BASE: [[usize; 2]; 5] = [
    [1, 65],    // pawn
    [129, 193], // knight
    [257, 321], // bishop
    [385, 449], // rook
    [513, 577], // queen
];

/// Square index as seen from `perspective`.
#[inline]
#[must_use]
pub const fn orient(perspective: Color, sq: Square) -> usize {
    match perspective {
        Color::White => sq.as_index(),
        Color::Black => sq.as_index() ^ 63,
    }
}

/// HalfKP index of `piece` of `color` on `sq`, from `perspective` whose king
/// stands on `king_sq`. Kings are not features and yield `None`.
#[inline]
#[must_use]
pub fn feature_index(
    perspective: Color,
    king_sq: Square,
    sq: Square,
    color: Color,
    piece: Piece,
) -> Option<usize> {
    if piece == Piece::King {
        return None;
    }
    let relation = usize::from(color != perspective);
    let base = PIECE_BASE[piece.index()][relation];
    Some(orient(perspective, sq) + base + PS_END * orient(perspective, king_sq))
}

/// Active features of `board` from `perspective`, in ascending square order.
///
/// Yields nothing when the perspective has no king.
pub fn active_features(board: &Board, perspective: Color) -> impl Iterator<Item = usize> + '_ {
    let king_sq = board.king_square(perspective);
    board
        .pieces()
        .filter_map(move |(sq, color, piece)| feature_index(perspective, king_sq?, sq, color, piece))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_FEN;

    #[test]
    fn test_indices_are_in_range_and_unique() {
        let king_sq = Square(0, 4);
        let mut seen = std::collections::HashSet::new();
        for perspective in Color::BOTH {
            seen.clear();
            for sq in Square::ALL {
                for color in Color::BOTH {
                    for piece in Piece::NON_KING {
                        let idx = feature_index(perspective, king_sq, sq, color, piece).unwrap();
                        assert!(idx < HALFKP_DIMENSIONS);
                        assert_ne!(idx % PS_END, 0, "slot 0 of a bucket is reserved");
                        assert!(seen.insert(idx), "duplicate index {idx}");
                    }
                }
            }
            assert_eq!(seen.len(), 640);
        }
    }

    #[test]
    fn test_known_indices() {
        // White pawn on e2, white king on e1, white's view
        let idx = feature_index(
            Color::White,
            Square(0, 4),
            Square(1, 4),
            Color::White,
            Piece::Pawn,
        );
        assert_eq!(idx, Some(12 + 1 + PS_END * 4));

        // Same pawn from black's view with the black king on e8: enemy pawn,
        // e2 rotates to d7 (51) and e8 rotates to d1 (3)
        let idx = feature_index(
            Color::Black,
            Square(7, 4),
            Square(1, 4),
            Color::White,
            Piece::Pawn,
        );
        assert_eq!(idx, Some(51 + 65 + PS_END * 3));
    }

    #[test]
    fn test_kings_are_not_features() {
        assert_eq!(
            feature_index(Color::White, Square(0, 4), Square(7, 4), Color::Black, Piece::King),
            None
        );
    }

    #[test]
    fn test_start_position_features_mirror() {
        let board = Board::try_from_fen(START_FEN).unwrap();
        let white: Vec<usize> = active_features(&board, Color::White).collect();
        let black: Vec<usize> = active_features(&board, Color::Black).collect();
        assert_eq!(white.len(), 30);
        assert_eq!(black.len(), 30);
        // e1 stays e1 for White; e8 rotates to d1 for Black
        assert!(white.iter().all(|&i| i / PS_END == 4));
        assert!(black.iter().all(|&i| i / PS_END == 3));
    }

    #[test]
    fn test_features_follow_square_order() {
        let board = Board::try_from_fen("4k3/8/8/3q4/8/8/1P6/4K2R w - - 0 1").unwrap();
        let features: Vec<usize> = active_features(&board, Color::White).collect();
        let king = PS_END * 4;
        assert_eq!(
            features,
            vec![
                7 + 385 + king,  // rook h1
                9 + 1 + king,    // pawn b2
                35 + 577 + king, // enemy queen d5
            ]
        );
    }
}
