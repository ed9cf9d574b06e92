//! Board square representation.

use crate::NotationError;
use std::fmt;

/// A square on the chess board, addressed by (row, col).
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank
/// (rank 1). Column 0 is the a-file and column 7 the h-file. Internally the
/// square is stored as `row * 8 + col`:
/// - a8 = 0, b8 = 1, ..., h8 = 7
/// - a1 = 56, ..., h1 = 63
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column, or `None` if either is off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Creates a square from row and column.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in 0-7. Out-of-range coordinates are
    /// a caller bug; use [`Square::new`] to range-check untrusted input.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square coordinates out of range");
        Square(row * 8 + col)
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the row (0 = rank 8, 7 = rank 1).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the column (0 = a-file, 7 = h-file).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square shifted by the given row and column deltas,
    /// or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row() as i8 + d_row;
        let col = self.col() as i8 + d_col;
        if row < 0 || row > 7 || col < 0 || col > 7 {
            None
        } else {
            Some(Square((row * 8 + col) as u8))
        }
    }

    /// Iterates over all 64 squares, row by row starting at a8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Result<Self, NotationError> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(NotationError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(NotationError::InvalidSquare(s.to_string()));
        }
        Ok(Square::at(b'8' - rank, file - b'a'))
    }

    /// Returns the file letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Returns the rank digit ('1'-'8').
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row()) as char
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    // Back-rank squares
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl std::str::FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn square_at() {
        let e4 = Square::at(4, 4);
        assert_eq!(e4.row(), 4);
        assert_eq!(e4.col(), 4);
        assert_eq!(e4.to_algebraic(), "e4");
        assert_eq!(Square::at(7, 4), Square::E1);
        assert_eq!(Square::at(0, 0), Square::A8);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn square_at_out_of_range_panics() {
        let _ = Square::at(8, 0);
    }

    #[test]
    fn square_new_range_checks() {
        assert_eq!(Square::new(7, 7), Some(Square::H1));
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Ok(Square::A1));
        assert_eq!(Square::from_algebraic("h8"), Ok(Square::H8));
        assert_eq!(Square::from_algebraic("E2"), Ok(Square::at(6, 4)));
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("a9").is_err());
        assert!(Square::from_algebraic("a0").is_err());
        assert!(Square::from_algebraic("").is_err());
        assert!(Square::from_algebraic("e44").is_err());
    }

    #[test]
    fn algebraic_round_trip_all_squares() {
        assert_eq!(Square::all().count(), 64);
        for sq in Square::all() {
            let text = sq.to_algebraic();
            assert_eq!(Square::from_algebraic(&text), Ok(sq));
            assert_eq!(Square::new(sq.row(), sq.col()), Some(sq));
        }
    }

    #[test]
    fn offset_stays_on_board() {
        assert_eq!(Square::E1.offset(-1, 0), Some(Square::at(6, 4)));
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::H8.offset(-1, 0), None);
        assert_eq!(Square::A8.offset(1, 1), Some(Square::at(1, 1)));
    }

    proptest! {
        #[test]
        fn from_algebraic_never_panics(s in "\\PC{0,4}") {
            let _ = Square::from_algebraic(&s);
        }

        #[test]
        fn offset_matches_new(index in 0u8..64, dr in -8i8..=8, dc in -8i8..=8) {
            let sq = Square::from_index(index).unwrap();
            let row = sq.row() as i8 + dr;
            let col = sq.col() as i8 + dc;
            let expected = if (0..8).contains(&row) && (0..8).contains(&col) {
                Square::new(row as u8, col as u8)
            } else {
                None
            };
            prop_assert_eq!(sq.offset(dr, dc), expected);
        }
    }
}
