//! Core value types for chess.
//!
//! This crate provides the fundamental types used by the rule engine:
//! - [`Color`], [`PieceKind`] and [`Piece`] for piece representation
//! - [`Square`] for (row, col) board coordinates and algebraic names
//! - [`Move`] and [`MoveKind`] for single plies
//! - Coordinate move parsing ("e2e4", "e7e8n")

mod color;
mod mov;
mod notation;
mod piece;
mod square;

pub use color::Color;
pub use mov::{Move, MoveKind};
pub use notation::{parse_coordinate_move, CoordinateMove, NotationError};
pub use piece::{Piece, PieceKind};
pub use square::Square;
