//! Offset and ray tables for every piece kind.

use crate::Board;
use ply_core::{Color, Piece, PieceKind, Square};

/// Knight jumps as (row delta, col delta).
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps in all 8 directions.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Orthogonal ray directions.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal ray directions.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns the on-board squares a knight on `sq` jumps to.
pub fn knight_targets(sq: Square) -> impl Iterator<Item = Square> {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(dr, dc)| sq.offset(dr, dc))
}

/// Returns the on-board squares a king on `sq` steps to.
pub fn king_targets(sq: Square) -> impl Iterator<Item = Square> {
    KING_OFFSETS
        .into_iter()
        .filter_map(move |(dr, dc)| sq.offset(dr, dc))
}

/// Returns the diagonal squares a pawn of `color` on `sq` attacks.
pub fn pawn_attacks(sq: Square, color: Color) -> impl Iterator<Item = Square> {
    let step = color.pawn_step();
    [-1, 1]
        .into_iter()
        .filter_map(move |dc| sq.offset(step, dc))
}

/// Returns true if a pawn of color `by` attacks `sq`, whether or not
/// anything stands there.
pub fn pawn_guards(board: &Board, sq: Square, by: Color) -> bool {
    let pawn = Some(Piece::new(by, PieceKind::Pawn));
    // A pawn of `by` attacking `sq` stands one step behind it.
    pawn_attacks(sq, by.opposite()).any(|from| board.piece_at(from) == pawn)
}
