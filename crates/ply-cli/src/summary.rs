//! JSON summary of a replayed game.

use ply_core::Color;
use ply_engine::{GameState, GameStatus};
use serde::Serialize;

/// Final position of a replayed move sequence.
#[derive(Debug, Serialize)]
pub struct ReplaySummary {
    /// Moves played, in coordinate notation.
    pub moves: Vec<String>,
    /// "active", "checkmate" or "stalemate".
    pub status: &'static str,
    /// "white" or "black".
    pub side_to_move: &'static str,
    pub in_check: bool,
    /// Winner after checkmate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<&'static str>,
    /// Castling rights in "KQkq" form, "-" if none.
    pub castling: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en_passant: Option<String>,
    /// Board rows from rank 8 down, as two-letter piece codes.
    pub board: Vec<String>,
}

fn color_key(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

impl ReplaySummary {
    pub fn from_game(game: &GameState) -> Self {
        ReplaySummary {
            moves: game.move_log().iter().map(|m| m.to_algebraic()).collect(),
            status: match game.status() {
                GameStatus::Active => "active",
                GameStatus::Checkmate => "checkmate",
                GameStatus::Stalemate => "stalemate",
            },
            side_to_move: color_key(game.side_to_move()),
            in_check: game.in_check(),
            winner: game.winner().map(color_key),
            castling: game.castling_rights().to_string(),
            en_passant: game.en_passant().map(|sq| sq.to_string()),
            board: game.board().to_string().lines().map(String::from).collect(),
        }
    }
}
