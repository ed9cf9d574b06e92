//! Text rendering of boards and game status.

use crate::config::PlyConfig;
use ply_core::{Piece, Square};
use ply_engine::{Board, GameState, GameStatus};

/// Renders the board as rows of two-letter piece codes.
///
/// White's back rank is at the bottom unless `flip_board` is set.
pub fn render_board(board: &Board, config: &PlyConfig) -> String {
    let order: Vec<u8> = if config.flip_board {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };

    let mut out = String::new();
    for &row in &order {
        if config.show_coordinates {
            out.push(Square::at(row, 0).rank_char());
            out.push(' ');
        }
        let cells: Vec<String> = order
            .iter()
            .map(|&col| match board.piece_at(Square::at(row, col)) {
                Some(piece) => piece.to_string(),
                None => Piece::EMPTY_CODE.to_string(),
            })
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    if config.show_coordinates {
        out.push(' ');
        for &col in &order {
            // Each label sits under the second letter of its cell.
            out.push_str("  ");
            out.push(Square::at(0, col).file_char());
        }
        out.push('\n');
    }
    out
}

/// Describes who is to move, or how the game ended.
pub fn render_status(game: &GameState) -> String {
    let side = game.side_to_move();
    match game.status() {
        GameStatus::Checkmate => format!("Checkmate: {} wins", side.opposite()),
        GameStatus::Stalemate => "Stalemate: draw".to_string(),
        GameStatus::Active if game.in_check() => {
            format!("{} to move (in check)", side)
        }
        GameStatus::Active => format!("{} to move", side),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_standard_board() {
        let text = render_board(&Board::standard(), &PlyConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 bR bN bB bQ bK bB bN bR");
        assert_eq!(lines[4], "4 -- -- -- -- -- -- -- --");
        assert_eq!(lines[7], "1 wR wN wB wQ wK wB wN wR");
        assert_eq!(lines[8], "   a  b  c  d  e  f  g  h");
    }

    #[test]
    fn test_render_without_coordinates() {
        let config = PlyConfig {
            show_coordinates: false,
            ..PlyConfig::default()
        };
        let text = render_board(&Board::standard(), &config);
        assert_eq!(text, format!("{}\n", Board::standard()));
    }

    #[test]
    fn test_render_flipped() {
        let config = PlyConfig {
            flip_board: true,
            ..PlyConfig::default()
        };
        let text = render_board(&Board::standard(), &config);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1 wR wN wB wK wQ wB wN wR");
        assert_eq!(lines[7], "8 bR bN bB bK bQ bB bN bR");
        assert_eq!(lines[8], "   h  g  f  e  d  c  b  a");
    }

    #[test]
    fn test_render_status() {
        let mut game = GameState::new();
        assert_eq!(render_status(&game), "White to move");

        for mv in ["e2e4", "f7f6", "d2d4", "g7g5"] {
            game.play(mv).unwrap();
        }
        game.play("d1h5").unwrap();
        assert_eq!(render_status(&game), "Checkmate: White wins");
    }
}
