//! Move generation.
//!
//! The generator produces *pseudo-legal* moves: they respect how pieces move
//! and what stands in their way, but may leave the mover's own king attacked.
//! Filtering for king safety needs apply/undo simulation and is done by
//! [`GameState::legal_moves`](crate::GameState::legal_moves).

mod attacks;
pub mod perft;

use crate::{Board, CastlingRights};
use ply_core::{Color, Move, MoveKind, Piece, PieceKind, Square};

pub use attacks::{
    king_targets, knight_targets, pawn_attacks, pawn_guards, BISHOP_DIRECTIONS, KING_OFFSETS,
    KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves the list can hold.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Iterates over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if an equal move is in the list.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates pseudo-legal moves for every piece of `side`, castling excluded.
///
/// `en_passant` is the square a pawn skipped on the previous ply, if any.
pub fn pseudo_legal_moves(board: &Board, side: Color, en_passant: Option<Square>) -> MoveList {
    let mut moves = MoveList::new();
    for (from, piece) in board.pieces(side) {
        let moves = &mut moves;
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(board, from, piece, en_passant, moves),
            PieceKind::Knight => {
                generate_step_moves(board, from, piece, knight_targets(from), moves)
            }
            PieceKind::Bishop => generate_ray_moves(board, from, piece, &BISHOP_DIRECTIONS, moves),
            PieceKind::Rook => generate_ray_moves(board, from, piece, &ROOK_DIRECTIONS, moves),
            PieceKind::Queen => {
                generate_ray_moves(board, from, piece, &ROOK_DIRECTIONS, moves);
                generate_ray_moves(board, from, piece, &BISHOP_DIRECTIONS, moves);
            }
            PieceKind::King => {
                generate_step_moves(board, from, piece, king_targets(from), moves)
            }
        }
    }
    moves
}

/// Generates pseudo-legal pawn moves.
fn generate_pawn_moves(
    board: &Board,
    from: Square,
    pawn: Piece,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    let step = pawn.color.pawn_step();

    // Pushes
    if let Some(one) = from.offset(step, 0) {
        if board.is_empty(one) {
            moves.push(Move::normal(from, one, pawn, None));
            if from.row() == pawn.color.pawn_row() {
                if let Some(two) = one.offset(step, 0) {
                    if board.is_empty(two) {
                        moves.push(Move::normal(from, two, pawn, None));
                    }
                }
            }
        }
    }

    // Captures, including en passant
    for to in pawn_attacks(from, pawn.color) {
        match board.piece_at(to) {
            Some(target) if target.color != pawn.color => {
                moves.push(Move::normal(from, to, pawn, Some(target)));
            }
            None if en_passant == Some(to) => {
                // The captured pawn sits beside the mover, not on `to`.
                let victim = board.piece_at(Square::at(from.row(), to.col()));
                if victim == Some(Piece::new(pawn.color.opposite(), PieceKind::Pawn)) {
                    moves.push(Move::new(from, to, pawn, victim, MoveKind::EnPassant));
                }
            }
            _ => {}
        }
    }
}

/// Generates moves for pieces with a fixed offset table (knight, king).
fn generate_step_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    targets: impl Iterator<Item = Square>,
    moves: &mut MoveList,
) {
    for to in targets {
        let target = board.piece_at(to);
        if target.map_or(true, |t| t.color != piece.color) {
            moves.push(Move::normal(from, to, piece, target));
        }
    }
}

/// Generates moves along rays until the edge, a friendly piece (excluded)
/// or an enemy piece (included as a capture).
fn generate_ray_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, dc) {
            match board.piece_at(to) {
                None => {
                    moves.push(Move::normal(from, to, piece, None));
                    current = to;
                }
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(Move::normal(from, to, piece, Some(target)));
                    }
                    break;
                }
            }
        }
    }
}

/// One side of the board a king may castle towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// Column of the rook that castles on this side.
    const fn rook_col(self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    /// Column the king lands on.
    const fn king_col(self) -> u8 {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        }
    }

    /// Column the rook lands on.
    const fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        }
    }

    /// Columns strictly between king and rook; all must be empty.
    const fn between_cols(self) -> &'static [u8] {
        match self {
            CastleSide::King => &[5, 6],
            CastleSide::Queen => &[1, 2, 3],
        }
    }

    /// Columns the king passes over; none may be attacked.
    const fn transit_cols(self) -> &'static [u8] {
        match self {
            CastleSide::King => &[5, 6],
            CastleSide::Queen => &[3, 2],
        }
    }

    fn from_king_target(to: Square) -> Self {
        if to.col() > 4 {
            CastleSide::King
        } else {
            CastleSide::Queen
        }
    }
}

/// Column the king starts on for both colors.
const KING_START_COL: u8 = 4;

/// Returns the rook's (from, to) squares for a castle landing the king on `king_to`.
pub fn castling_rook_squares(king_to: Square) -> (Square, Square) {
    let side = CastleSide::from_king_target(king_to);
    let row = king_to.row();
    (
        Square::at(row, side.rook_col()),
        Square::at(row, side.rook_target_col()),
    )
}

/// Appends castling candidates for `side`.
///
/// A castle is generated when the right is held, the rook stands on its
/// corner, every square between king and rook is empty, and neither the
/// king's square nor any square it crosses is attacked.
pub fn castling_moves(board: &Board, side: Color, rights: CastlingRights, moves: &mut MoveList) {
    let row = side.back_row();
    let king_sq = Square::at(row, KING_START_COL);
    let king = Piece::new(side, PieceKind::King);
    if board.piece_at(king_sq) != Some(king) {
        return;
    }

    let enemy = side.opposite();
    let mut king_safe = None;

    for (held, castle) in [
        (rights.king_side(side), CastleSide::King),
        (rights.queen_side(side), CastleSide::Queen),
    ] {
        if !held {
            continue;
        }
        let rook_sq = Square::at(row, castle.rook_col());
        if board.piece_at(rook_sq) != Some(Piece::new(side, PieceKind::Rook)) {
            continue;
        }
        if !castle
            .between_cols()
            .iter()
            .all(|&col| board.is_empty(Square::at(row, col)))
        {
            continue;
        }
        // Can't castle out of check
        if !*king_safe.get_or_insert_with(|| !square_under_attack(board, king_sq, enemy)) {
            return;
        }
        if castle
            .transit_cols()
            .iter()
            .any(|&col| square_under_attack(board, Square::at(row, col), enemy))
        {
            continue;
        }
        let to = Square::at(row, castle.king_col());
        moves.push(Move::new(king_sq, to, king, None, MoveKind::Castle));
    }
}

/// Returns true if any piece of color `by` attacks `sq`.
///
/// Generates `by`'s pseudo-legal moves and looks for one landing on `sq`.
/// Pawns are special: their pushes never attack, while their diagonals
/// attack even an empty square, so pawns are checked directly.
pub fn square_under_attack(board: &Board, sq: Square, by: Color) -> bool {
    pseudo_legal_moves(board, by, None)
        .iter()
        .any(|m| m.to() == sq && !m.piece_moved().is_kind(PieceKind::Pawn))
        || pawn_guards(board, sq, by)
}
