//! Move representation.

use crate::{Color, Piece, PieceKind, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The kind of a move, deciding the side effects of applying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Plain move or capture on the destination square (includes promotions).
    Normal = 0,
    /// Pawn capture of a pawn that sits beside the destination square.
    EnPassant = 1,
    /// King moves two squares towards a rook; the rook jumps over it.
    Castle = 2,
}

/// A single ply.
///
/// Moves are immutable values. Two moves are equal when they connect the same
/// squares with the same [`MoveKind`]; the recorded pieces and the promotion
/// choice do not take part in equality, so a move built from user input
/// matches the generated one regardless of the promotion piece picked.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece_moved: Piece,
    piece_captured: Option<Piece>,
    kind: MoveKind,
    is_promotion: bool,
    promotion: PieceKind,
}

impl Move {
    /// Creates a new move.
    ///
    /// The promotion flag is derived: a pawn reaching the far row promotes,
    /// to a queen unless [`with_promotion`](Move::with_promotion) says otherwise.
    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        piece_moved: Piece,
        piece_captured: Option<Piece>,
        kind: MoveKind,
    ) -> Self {
        let is_promotion = piece_moved.is_kind(PieceKind::Pawn)
            && to.row() == piece_moved.color.promotion_row();
        Move {
            from,
            to,
            piece_moved,
            piece_captured,
            kind,
            is_promotion,
            promotion: PieceKind::Queen,
        }
    }

    /// Creates a normal move.
    #[inline]
    pub fn normal(
        from: Square,
        to: Square,
        piece_moved: Piece,
        piece_captured: Option<Piece>,
    ) -> Self {
        Self::new(from, to, piece_moved, piece_captured, MoveKind::Normal)
    }

    /// Returns a copy of this move promoting to `kind` instead of a queen.
    ///
    /// Has no effect on moves that do not promote.
    #[inline]
    pub fn with_promotion(self, kind: PieceKind) -> Self {
        debug_assert!(kind.is_promotion_target());
        Move {
            promotion: kind,
            ..self
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the piece that moves.
    #[inline]
    pub const fn piece_moved(self) -> Piece {
        self.piece_moved
    }

    /// Returns the captured piece, if any. For en passant this is the pawn
    /// removed from beside the destination square.
    #[inline]
    pub const fn piece_captured(self) -> Option<Piece> {
        self.piece_captured
    }

    /// Returns the color of the moving side.
    #[inline]
    pub const fn color(self) -> Color {
        self.piece_moved.color
    }

    #[inline]
    pub const fn kind(self) -> MoveKind {
        self.kind
    }

    /// Returns true if a pawn reaches the far row with this move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.is_promotion
    }

    /// Returns the promotion piece kind. Queen unless overridden.
    #[inline]
    pub const fn promotion_kind(self) -> PieceKind {
        self.promotion
    }

    /// Returns the piece kind placed on the destination if this move promotes.
    #[inline]
    pub const fn promotion(self) -> Option<PieceKind> {
        if self.is_promotion {
            Some(self.promotion)
        } else {
            None
        }
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.piece_captured.is_some()
    }

    #[inline]
    pub fn is_castle(self) -> bool {
        self.kind == MoveKind::Castle
    }

    #[inline]
    pub fn is_en_passant(self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    /// Returns true for a pawn moving straight ahead, which never attacks
    /// its destination.
    #[inline]
    pub fn is_pawn_push(self) -> bool {
        self.piece_moved.is_kind(PieceKind::Pawn) && self.from.col() == self.to.col()
    }

    /// Returns true for a pawn advancing two squares from its starting row.
    #[inline]
    pub fn is_double_push(self) -> bool {
        self.is_pawn_push() && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// Numeric id `startRow*1000 + startCol*100 + endRow*10 + endCol`.
    pub fn id(self) -> u16 {
        self.from.row() as u16 * 1000
            + self.from.col() as u16 * 100
            + self.to.row() as u16 * 10
            + self.to.col() as u16
    }

    /// Returns the 4-character source+destination notation (e.g., "e2e4").
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move {
        from: Square::A8,
        to: Square::A8,
        piece_moved: Piece::new(Color::White, PieceKind::Pawn),
        piece_captured: None,
        kind: MoveKind::Normal,
        is_promotion: false,
        promotion: PieceKind::Queen,
    };
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.kind == other.kind
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from, self.to)?;
        match self.kind {
            MoveKind::Normal => Ok(()),
            MoveKind::EnPassant => write!(f, " e.p."),
            MoveKind::Castle => write!(f, " castle"),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
