//! Coordinate move notation ("e2e4", "e7e8n").
//!
//! Only the plain source+destination form is handled. SAN, PGN and FEN are
//! the business of whoever presents the game.

use crate::{PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing squares, pieces or coordinate moves.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid square: '{0}'")]
    InvalidSquare(String),

    #[error("invalid move: expected 4 or 5 characters, got '{0}'")]
    InvalidMoveLength(String),

    #[error("invalid promotion piece '{0}': expected one of q, r, b, n")]
    InvalidPromotion(char),

    #[error("invalid piece code: '{0}'")]
    InvalidPieceCode(String),
}

/// A move as typed by a user: two squares and an optional promotion choice.
///
/// This carries no knowledge of the position; the engine resolves it into a
/// full [`Move`](crate::Move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

/// Parses a coordinate move such as `"e2e4"` or `"e7e8n"`.
pub fn parse_coordinate_move(s: &str) -> Result<CoordinateMove, NotationError> {
    let s = s.trim();
    if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
        return Err(NotationError::InvalidMoveLength(s.to_string()));
    }
    let from = Square::from_algebraic(&s[0..2])?;
    let to = Square::from_algebraic(&s[2..4])?;
    let promotion = match s[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_letter(c) {
            Some(kind) if kind.is_promotion_target() => Some(kind),
            _ => return Err(NotationError::InvalidPromotion(c)),
        },
    };
    Ok(CoordinateMove {
        from,
        to,
        promotion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_plain_move() {
        let m = parse_coordinate_move("e2e4").unwrap();
        assert_eq!(m.from, Square::at(6, 4));
        assert_eq!(m.to, Square::at(4, 4));
        assert_eq!(m.promotion, None);
    }

    #[test]
    fn parse_promotion() {
        let m = parse_coordinate_move("a7a8N").unwrap();
        assert_eq!(m.to, Square::A8);
        assert_eq!(m.promotion, Some(PieceKind::Knight));

        let m = parse_coordinate_move(" b2b1q ").unwrap();
        assert_eq!(m.to, Square::B1);
        assert_eq!(m.promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            parse_coordinate_move("e2"),
            Err(NotationError::InvalidMoveLength(_))
        ));
        assert!(matches!(
            parse_coordinate_move("e2e4qq"),
            Err(NotationError::InvalidMoveLength(_))
        ));
        assert!(matches!(
            parse_coordinate_move("e2e9"),
            Err(NotationError::InvalidSquare(_))
        ));
        assert_eq!(
            parse_coordinate_move("e7e8k"),
            Err(NotationError::InvalidPromotion('k'))
        );
        assert_eq!(
            parse_coordinate_move("e7e8x"),
            Err(NotationError::InvalidPromotion('x'))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            NotationError::InvalidSquare("z9".into()).to_string(),
            "invalid square: 'z9'"
        );
    }

    proptest! {
        #[test]
        fn parse_never_panics(s in "\\PC{0,8}") {
            let _ = parse_coordinate_move(&s);
        }
    }
}
