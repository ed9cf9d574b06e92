//! The 8x8 grid of pieces.

use ply_core::{Color, NotationError, Piece, PieceKind, Square};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when reading a board diagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board: expected 8 rows, got {0}")]
    InvalidRowCount(usize),

    #[error("invalid board: row {row} has {len} cells, expected 8")]
    InvalidRowLength { row: usize, len: usize },

    #[error("invalid board: {0}")]
    InvalidPiece(#[from] NotationError),
}

/// The board grid, one cell per square, `None` for an empty cell.
///
/// The board knows nothing about legality; it only stores what it is told.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Board {
    /// Back-rank piece order from the a-file to the h-file.
    const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// Creates the standard starting arrangement.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            for (col, kind) in Self::BACK_RANK.into_iter().enumerate() {
                let col = col as u8;
                board.set_piece(
                    Square::at(color.back_row(), col),
                    Some(Piece::new(color, kind)),
                );
                board.set_piece(
                    Square::at(color.pawn_row(), col),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    /// Reads a board diagram: 8 rows from row 0 (rank 8) to row 7 (rank 1),
    /// each holding 8 whitespace-separated piece codes such as `"wK"`, or
    /// `"--"` for an empty square.
    ///
    /// ```
    /// use ply_engine::Board;
    ///
    /// let board = Board::from_codes(&[
    ///     "-- -- -- -- bK -- -- --",
    ///     "-- -- -- -- -- -- -- --",
    ///     "-- -- -- -- -- -- -- --",
    ///     "-- -- -- -- -- -- -- --",
    ///     "-- -- -- -- -- -- -- --",
    ///     "-- -- -- -- -- -- -- --",
    ///     "-- -- -- -- -- -- -- --",
    ///     "-- -- -- -- wK -- -- --",
    /// ])
    /// .unwrap();
    /// assert!(board.piece_at(ply_core::Square::E1).is_some());
    /// ```
    pub fn from_codes<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        if rows.len() != 8 {
            return Err(BoardError::InvalidRowCount(rows.len()));
        }
        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let codes: Vec<&str> = line.as_ref().split_whitespace().collect();
            if codes.len() != 8 {
                return Err(BoardError::InvalidRowLength {
                    row,
                    len: codes.len(),
                });
            }
            for (col, code) in codes.into_iter().enumerate() {
                board.set_piece(Square::at(row as u8, col as u8), Piece::from_code(code)?);
            }
        }
        Ok(board)
    }

    /// Returns the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index() as usize]
    }

    /// Puts a piece on (or with `None`, clears) the given square.
    #[inline]
    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index() as usize] = piece;
    }

    /// Returns true if no piece stands on the given square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cells[sq.index() as usize].is_none()
    }

    /// Returns the color of the piece on the given square, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|p| p.color)
    }

    /// Iterates over the pieces of one color with their squares.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Scans the board for the king of the given color.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.is_kind(PieceKind::King))
            .map(|(sq, _)| sq)
    }

    /// Returns a row-major snapshot of the grid, row 0 first.
    pub fn rows(&self) -> [[Option<Piece>; 8]; 8] {
        let mut rows = [[None; 8]; 8];
        for sq in Square::all() {
            rows[sq.row() as usize][sq.col() as usize] = self.piece_at(sq);
        }
        rows
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Some(piece) => write!(f, "{}", piece)?,
                    None => f.write_str(Piece::EMPTY_CODE)?,
                }
            }
            if r < 7 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        writeln!(f, "{}", self)?;
        write!(f, ")")
    }
}
