//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Every node is visited with apply/undo on a single [`GameState`], so a
//! perft run also exercises the exactness of undo.
//!
//! Promotions are counted once (to the default queen), so reference counts
//! only match for depths where no pawn can promote.

use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(game: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        game.apply(*m);
        nodes += perft(game, depth - 1);
        game.undo_last();
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
///
/// Depth 0 has no root moves to split by, so the result is empty.
pub fn perft_divide(game: &mut GameState, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = game.legal_moves();
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        game.apply(*m);
        let nodes = if depth > 1 {
            perft(game, depth - 1)
        } else {
            1
        };
        game.undo_last();
        results.push((m.to_algebraic(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, CastlingRights};
    use ply_core::Color;

    fn kiwipete() -> GameState {
        let board = Board::from_codes(&[
            "bR -- -- -- bK -- -- bR",
            "bP -- bP bP bQ bP bB --",
            "bB bN -- -- bP bN bP --",
            "-- -- -- wP wN -- -- --",
            "-- bP -- -- wP -- -- --",
            "-- -- wN -- -- wQ -- bP",
            "wP wP wP wB wB wP wP wP",
            "wR -- -- -- wK -- -- wR",
        ])
        .unwrap();
        GameState::from_board(board, Color::White, CastlingRights::ALL).unwrap()
    }

    fn position3() -> GameState {
        let board = Board::from_codes(&[
            "-- -- -- -- -- -- -- --",
            "-- -- bP -- -- -- -- --",
            "-- -- -- bP -- -- -- --",
            "wK wP -- -- -- -- -- bR",
            "-- wR -- -- -- bP -- bK",
            "-- -- -- -- -- -- -- --",
            "-- -- -- -- wP -- wP --",
            "-- -- -- -- -- -- -- --",
        ])
        .unwrap();
        GameState::from_board(board, Color::White, CastlingRights::NONE).unwrap()
    }

    // Starting position perft values (well-known and verified)
    #[test]
    fn perft_startpos_depth_1() {
        let mut game = GameState::new();
        assert_eq!(perft(&mut game, 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        let mut game = GameState::new();
        assert_eq!(perft(&mut game, 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        let mut game = GameState::new();
        assert_eq!(perft(&mut game, 3), 8902);
    }

    // Slow in debug builds
    #[test]
    #[ignore]
    fn perft_startpos_depth_4() {
        let mut game = GameState::new();
        assert_eq!(perft(&mut game, 4), 197281);
    }

    // Kiwipete - a position with lots of special moves
    #[test]
    fn perft_kiwipete_depth_1() {
        let mut game = kiwipete();
        assert_eq!(perft(&mut game, 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        let mut game = kiwipete();
        assert_eq!(perft(&mut game, 2), 2039);
    }

    // Position 3: Check evasion, en passant, pins along the rank
    #[test]
    fn perft_position3_depth_1() {
        let mut game = position3();
        assert_eq!(perft(&mut game, 1), 14);
    }

    #[test]
    fn perft_position3_depth_2() {
        let mut game = position3();
        assert_eq!(perft(&mut game, 2), 191);
    }

    #[test]
    fn perft_position3_depth_3() {
        let mut game = position3();
        assert_eq!(perft(&mut game, 3), 2812);
    }

    #[test]
    fn perft_leaves_game_untouched() {
        let mut game = kiwipete();
        let before = game.clone();
        perft(&mut game, 2);
        assert_eq!(game, before);
    }

    #[test]
    fn perft_divide_works() {
        let mut game = GameState::new();
        let results = perft_divide(&mut game, 1);
        assert_eq!(results.len(), 20);
        // Total should equal perft(1)
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 20);
        assert_eq!(results[0].0, "a2a3");
    }

    #[test]
    fn perft_divide_depth_zero_is_empty() {
        let mut game = GameState::new();
        assert!(perft_divide(&mut game, 0).is_empty());
        assert_eq!(perft(&mut game, 0), 1);
    }
}
