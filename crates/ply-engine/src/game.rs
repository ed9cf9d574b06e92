//! Game state and the legality controller.
//!
//! [`GameState`] owns the board and all rule-relevant bookkeeping: side to
//! move, the move log, cached king locations, the castling-rights history
//! and the en-passant history. Moves are applied and undone in place; each
//! applied ply pushes exactly one entry onto every history, so undo is an
//! exact inverse of apply.

use crate::movegen::{castling_moves, castling_rook_squares, pseudo_legal_moves, square_under_attack};
use crate::{Board, CastlingRights, MoveList, RightsTracker};
use ply_core::{
    parse_coordinate_move, Color, Move, MoveKind, NotationError, Piece, PieceKind, Square,
};
use thiserror::Error;
use tracing::{debug, trace};

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The game has already ended in checkmate or stalemate.
    #[error("game has already ended")]
    GameOver,
    /// There is no applied move to take back.
    #[error("no move to undo")]
    NothingToUndo,
    /// A move was requested from an empty square.
    #[error("no piece on {0}")]
    EmptySquare(Square),
    /// A move was requested for a piece of the side not to move.
    #[error("the piece on {0} does not belong to the side to move")]
    NotYourPiece(Square),
    /// Pawns cannot promote to the requested kind.
    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceKind),
    /// A custom board lacks a king.
    #[error("board has no {0} king")]
    MissingKing(Color),
    /// Move text could not be parsed.
    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    Active,
    /// The side to move is in check and has no legal move.
    Checkmate,
    /// The side to move is not in check and has no legal move.
    Stalemate,
}

/// A chess game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    white_to_move: bool,
    move_log: Vec<Move>,
    white_king: Square,
    black_king: Square,
    rights: RightsTracker,
    /// En-passant target after each ply; the last entry is current.
    en_passant_log: Vec<Option<Square>>,
    check_mate: bool,
    stale_mate: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game with the standard starting position.
    pub fn new() -> Self {
        GameState {
            board: Board::standard(),
            white_to_move: true,
            move_log: Vec::new(),
            white_king: Square::E1,
            black_king: Square::E8,
            rights: RightsTracker::new(CastlingRights::ALL),
            en_passant_log: vec![None],
            check_mate: false,
            stale_mate: false,
        }
    }

    /// Creates a game from a custom board.
    ///
    /// King locations are scanned once; from then on they are kept in sync
    /// by apply/undo. The status is evaluated immediately, so a position
    /// that is already mate or stalemate reports it.
    pub fn from_board(
        board: Board,
        side_to_move: Color,
        rights: CastlingRights,
    ) -> Result<Self, GameError> {
        let white_king = board
            .find_king(Color::White)
            .ok_or(GameError::MissingKing(Color::White))?;
        let black_king = board
            .find_king(Color::Black)
            .ok_or(GameError::MissingKing(Color::Black))?;
        let mut game = GameState {
            board,
            white_to_move: side_to_move == Color::White,
            move_log: Vec::new(),
            white_king,
            black_king,
            rights: RightsTracker::new(rights),
            en_passant_log: vec![None],
            check_mate: false,
            stale_mate: false,
        };
        game.legal_moves();
        Ok(game)
    }

    /// Throws the current game away and starts again from the initial position.
    pub fn reset(&mut self) {
        debug!(plies = self.move_log.len(), "game reset");
        *self = Self::new();
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns true if it is White's turn.
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Returns the applied moves, oldest first.
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Returns the cached location of the king of the given color.
    pub fn king_location(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Returns the castling rights in force.
    pub fn castling_rights(&self) -> CastlingRights {
        self.rights.current()
    }

    /// Returns the full castling-rights history.
    pub fn rights_history(&self) -> &RightsTracker {
        &self.rights
    }

    /// Returns the current en-passant target square.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant_log.last().copied().flatten()
    }

    /// True once [`legal_moves`](Self::legal_moves) found the side to move mated.
    pub fn is_checkmate(&self) -> bool {
        self.check_mate
    }

    /// True once [`legal_moves`](Self::legal_moves) found the side to move stalemated.
    pub fn is_stalemate(&self) -> bool {
        self.stale_mate
    }

    /// Returns the status as of the last legal-move evaluation.
    pub fn status(&self) -> GameStatus {
        if self.check_mate {
            GameStatus::Checkmate
        } else if self.stale_mate {
            GameStatus::Stalemate
        } else {
            GameStatus::Active
        }
    }

    /// Returns true if the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.check_mate || self.stale_mate
    }

    /// Returns the winner, if the game ended in checkmate.
    pub fn winner(&self) -> Option<Color> {
        self.check_mate.then(|| self.side_to_move().opposite())
    }

    /// Returns the pseudo-legal moves of the side to move, castling excluded.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        pseudo_legal_moves(&self.board, self.side_to_move(), self.en_passant())
    }

    /// Returns true if any piece of color `by` attacks `sq`.
    pub fn square_under_attack(&self, sq: Square, by: Color) -> bool {
        square_under_attack(&self.board, sq, by)
    }

    /// Returns true if the opponent of the side to move attacks `sq`.
    pub fn is_square_attacked(&self, sq: Square) -> bool {
        self.square_under_attack(sq, self.side_to_move().opposite())
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.is_square_attacked(self.king_location(self.side_to_move()))
    }

    /// Returns all legal moves for the side to move and refreshes the
    /// checkmate/stalemate flags.
    ///
    /// Each candidate is applied, tested for leaving the mover's king
    /// attacked, and undone. Apart from the two flags the game is left
    /// exactly as it was.
    pub fn legal_moves(&mut self) -> MoveList {
        let us = self.side_to_move();
        let saved_en_passant = self.en_passant();
        let saved_rights = self.castling_rights();

        let mut moves = self.pseudo_legal_moves();
        castling_moves(&self.board, us, saved_rights, &mut moves);

        moves.retain(|m| {
            self.apply(*m);
            let safe = !self.square_under_attack(self.king_location(us), us.opposite());
            self.undo_last();
            safe
        });

        debug_assert_eq!(self.en_passant(), saved_en_passant);
        debug_assert_eq!(self.castling_rights(), saved_rights);

        if moves.is_empty() {
            let check = self.in_check();
            self.check_mate = check;
            self.stale_mate = !check;
            debug!(side = %us, checkmate = check, "no legal moves");
        } else {
            self.check_mate = false;
            self.stale_mate = false;
        }
        moves
    }

    /// Returns the squares the piece on `from` can legally move to.
    pub fn targets_from(&mut self, from: Square) -> Vec<Square> {
        self.legal_moves()
            .iter()
            .filter(|m| m.from() == from)
            .map(|m| m.to())
            .collect()
    }

    /// Builds a move between two squares from what the board holds now.
    ///
    /// Resolves the moving and captured pieces and the move kind (castle
    /// for a two-column king move, en passant for a diagonal pawn move onto
    /// the en-passant target). `promotion` picks the promotion piece; a
    /// queen is used if it is `None`. A promotion piece on a move that does
    /// not promote is rejected. The result is not checked for legality;
    /// [`apply_move`](Self::apply_move) does that.
    pub fn build_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Move, GameError> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or(GameError::EmptySquare(from))?;
        if piece.color != self.side_to_move() {
            return Err(GameError::NotYourPiece(from));
        }

        let mut captured = self.board.piece_at(to);
        let kind = if piece.is_kind(PieceKind::King)
            && from.row() == to.row()
            && from.col().abs_diff(to.col()) == 2
        {
            MoveKind::Castle
        } else if piece.is_kind(PieceKind::Pawn)
            && from.col() != to.col()
            && captured.is_none()
            && self.en_passant() == Some(to)
        {
            captured = self.board.piece_at(Square::at(from.row(), to.col()));
            MoveKind::EnPassant
        } else {
            MoveKind::Normal
        };

        let m = Move::new(from, to, piece, captured, kind);
        match promotion {
            Some(p) if !p.is_promotion_target() || !m.is_promotion() => {
                Err(GameError::InvalidPromotion(p))
            }
            Some(p) => Ok(m.with_promotion(p)),
            None => Ok(m),
        }
    }

    /// Validates and applies a move.
    ///
    /// The move must match one of [`legal_moves`](Self::legal_moves) (same
    /// squares and kind); the generated move is applied with the caller's
    /// promotion choice. On error nothing changes.
    pub fn apply_move(&mut self, m: Move) -> Result<(), GameError> {
        self.apply_checked(m).map(|_| ())
    }

    /// Parses a coordinate move ("e2e4", "e7e8n"), then builds and applies it.
    ///
    /// Returns the move as recorded in the log.
    pub fn play(&mut self, text: &str) -> Result<Move, GameError> {
        let cm = parse_coordinate_move(text)?;
        let m = self.build_move(cm.from, cm.to, cm.promotion)?;
        self.apply_checked(m)
    }

    /// Takes back the last applied move and returns it.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let m = self.undo_last().ok_or(GameError::NothingToUndo)?;
        trace!(mv = %m, "undid move");
        Ok(m)
    }

    fn apply_checked(&mut self, m: Move) -> Result<Move, GameError> {
        let legal = self.legal_moves();
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if !m.promotion_kind().is_promotion_target() {
            return Err(GameError::InvalidPromotion(m.promotion_kind()));
        }
        let found = legal
            .iter()
            .find(|lm| **lm == m)
            .map(|lm| lm.with_promotion(m.promotion_kind()))
            .ok_or_else(|| GameError::IllegalMove(m.to_algebraic()))?;

        self.apply(found);
        // Evaluate the opponent's position so mate or stalemate shows at once.
        self.legal_moves();
        Ok(found)
    }

    /// Applies a move without any legality check.
    pub(crate) fn apply(&mut self, m: Move) {
        let us = m.color();
        let from = m.from();
        let to = m.to();

        self.board.set_piece(from, None);
        self.board.set_piece(to, Some(m.piece_moved()));

        match m.kind() {
            MoveKind::Castle => {
                let (rook_from, rook_to) = castling_rook_squares(to);
                let rook = self.board.piece_at(rook_from);
                self.board.set_piece(rook_from, None);
                self.board.set_piece(rook_to, rook);
            }
            MoveKind::EnPassant => {
                self.board.set_piece(Square::at(from.row(), to.col()), None);
            }
            MoveKind::Normal => {}
        }

        if m.is_promotion() {
            self.board
                .set_piece(to, Some(Piece::new(us, m.promotion_kind())));
        }

        if m.piece_moved().is_kind(PieceKind::King) {
            self.set_king_location(us, to);
        }

        let en_passant = if m.is_double_push() {
            Some(Square::at((from.row() + to.row()) / 2, from.col()))
        } else {
            None
        };
        self.en_passant_log.push(en_passant);
        self.rights.push(updated_rights(self.rights.current(), m));

        self.move_log.push(m);
        self.white_to_move = !self.white_to_move;
        trace!(mv = %m, side = %us, "applied move");
    }

    /// Reverts the last applied move without touching the logs of any
    /// earlier move. Returns `None` if the log is empty.
    pub(crate) fn undo_last(&mut self) -> Option<Move> {
        let m = self.move_log.pop()?;
        self.white_to_move = !self.white_to_move;

        let from = m.from();
        let to = m.to();
        self.board.set_piece(from, Some(m.piece_moved()));

        match m.kind() {
            MoveKind::Castle => {
                self.board.set_piece(to, None);
                let (rook_from, rook_to) = castling_rook_squares(to);
                let rook = self.board.piece_at(rook_to);
                self.board.set_piece(rook_to, None);
                self.board.set_piece(rook_from, rook);
            }
            MoveKind::EnPassant => {
                self.board.set_piece(to, None);
                self.board
                    .set_piece(Square::at(from.row(), to.col()), m.piece_captured());
            }
            MoveKind::Normal => {
                self.board.set_piece(to, m.piece_captured());
            }
        }

        if m.piece_moved().is_kind(PieceKind::King) {
            self.set_king_location(m.color(), from);
        }

        self.rights.pop();
        self.en_passant_log.pop();
        self.check_mate = false;
        self.stale_mate = false;
        Some(m)
    }

    fn set_king_location(&mut self, color: Color, sq: Square) {
        match color {
            Color::White => self.white_king = sq,
            Color::Black => self.black_king = sq,
        }
    }
}

/// Castling rights after `m`: a king move drops both sides for its color,
/// and any move leaving or landing on a rook corner drops that corner's side.
///
/// Landing on a corner covers the capture of a rook that never moved: its
/// side loses the right at once (`Bxa8` leaves `KQk`), rather than when that
/// rook would next have moved.
fn updated_rights(mut rights: CastlingRights, m: Move) -> CastlingRights {
    if m.piece_moved().is_kind(PieceKind::King) {
        rights.remove_color(m.color());
    }
    for sq in [m.from(), m.to()] {
        match sq {
            Square::H1 => rights.remove_king_side(Color::White),
            Square::A1 => rights.remove_queen_side(Color::White),
            Square::H8 => rights.remove_king_side(Color::Black),
            Square::A8 => rights.remove_queen_side(Color::Black),
            _ => {}
        }
    }
    rights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play_all(game: &mut GameState, moves: &[&str]) {
        for text in moves {
            game.play(text).unwrap();
        }
    }

    #[test]
    fn new_game() {
        let game = GameState::new();
        assert!(game.white_to_move());
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.move_log().is_empty());
        assert_eq!(game.king_location(Color::White), Square::E1);
        assert_eq!(game.king_location(Color::Black), Square::E8);
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
        assert_eq!(game.en_passant(), None);
        assert_eq!(game.status(), GameStatus::Active);
        assert!(!game.in_check());
    }

    #[test]
    fn initial_legal_moves() {
        let mut game = GameState::new();
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().all(|m| m.kind() == MoveKind::Normal));
    }

    #[test]
    fn play_pawn_push() {
        let mut game = GameState::new();
        let m = game.play("e2e4").unwrap();
        assert_eq!(m.to_algebraic(), "e2e4");
        assert!(!game.white_to_move());
        assert!(game.board().is_empty(sq("e2")));
        assert_eq!(
            game.board().piece_at(sq("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(game.en_passant(), Some(sq("e3")));
        assert_eq!(game.rights_history().history().len(), 2);
    }

    #[test]
    fn en_passant_cleared_by_next_move() {
        let mut game = GameState::new();
        play_all(&mut game, &["e2e4", "g8f6"]);
        assert_eq!(game.en_passant(), None);
    }

    #[test]
    fn illegal_move_rejected_without_change() {
        let mut game = GameState::new();
        let before = game.clone();
        assert!(matches!(game.play("e2e5"), Err(GameError::IllegalMove(_))));
        assert!(matches!(
            game.play("e7e5"),
            Err(GameError::NotYourPiece(_))
        ));
        assert!(matches!(game.play("e3e4"), Err(GameError::EmptySquare(_))));
        assert!(matches!(game.play("e2"), Err(GameError::Notation(_))));
        assert_eq!(game, before);
    }

    #[test]
    fn undo_restores_state() {
        let mut game = GameState::new();
        let before = game.clone();
        game.play("g1f3").unwrap();
        let undone = game.undo().unwrap();
        assert_eq!(undone.to_algebraic(), "g1f3");
        assert_eq!(game, before);
    }

    #[test]
    fn undo_on_empty_log() {
        let mut game = GameState::new();
        assert_eq!(game.undo(), Err(GameError::NothingToUndo));
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn double_undo_restores_en_passant() {
        let mut game = GameState::new();
        play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert_eq!(game.en_passant(), Some(sq("d6")));
        game.play("h2h3").unwrap();
        assert_eq!(game.en_passant(), None);
        game.undo().unwrap();
        assert_eq!(game.en_passant(), Some(sq("d6")));
        assert!(game
            .legal_moves()
            .iter()
            .any(|m| m.is_en_passant() && m.to() == sq("d6")));
    }

    #[test]
    fn king_move_updates_cache_and_rights() {
        let mut game = GameState::new();
        play_all(&mut game, &["e2e4", "e7e5", "e1e2"]);
        assert_eq!(game.king_location(Color::White), sq("e2"));
        let rights = game.castling_rights();
        assert!(!rights.white_king_side && !rights.white_queen_side);
        assert!(rights.black_king_side && rights.black_queen_side);

        game.undo().unwrap();
        assert_eq!(game.king_location(Color::White), Square::E1);
        assert_eq!(game.castling_rights(), CastlingRights::ALL);
    }

    #[test]
    fn build_move_resolves_kinds() {
        let mut game = GameState::new();
        play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
        let ep = game.build_move(sq("e5"), sq("d6"), None).unwrap();
        assert_eq!(ep.kind(), MoveKind::EnPassant);
        assert_eq!(
            ep.piece_captured(),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );

        let castle = game.build_move(Square::E1, Square::G1, None).unwrap();
        assert_eq!(castle.kind(), MoveKind::Castle);

        assert_eq!(
            game.build_move(sq("e5"), sq("e6"), Some(PieceKind::King)),
            Err(GameError::InvalidPromotion(PieceKind::King))
        );
    }

    #[test]
    fn promotion_piece_on_plain_move_rejected() {
        let mut game = GameState::new();
        let before = game.clone();
        assert_eq!(
            game.build_move(sq("e2"), sq("e4"), Some(PieceKind::Queen)),
            Err(GameError::InvalidPromotion(PieceKind::Queen))
        );
        assert_eq!(
            game.play("e2e4q"),
            Err(GameError::InvalidPromotion(PieceKind::Queen))
        );
        assert_eq!(
            game.play("g1f3n"),
            Err(GameError::InvalidPromotion(PieceKind::Knight))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn targets_from_square() {
        let mut game = GameState::new();
        let mut targets = game.targets_from(Square::G1);
        targets.sort();
        assert_eq!(targets, vec![sq("f3"), sq("h3")]);
        assert!(game.targets_from(sq("e4")).is_empty());
    }

    #[test]
    fn reset_starts_over() {
        let mut game = GameState::new();
        play_all(&mut game, &["e2e4", "e7e5"]);
        game.reset();
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn from_board_requires_kings() {
        let mut board = Board::empty();
        board.set_piece(Square::E1, Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(
            GameState::from_board(board, Color::White, CastlingRights::NONE),
            Err(GameError::MissingKing(Color::Black))
        );
    }

    #[test]
    fn updated_rights_on_corner_capture() {
        let rook = Piece::new(Color::Black, PieceKind::Rook);
        let m = Move::normal(sq("h8"), Square::H1, rook, Some(Piece::new(Color::White, PieceKind::Rook)));
        let rights = updated_rights(CastlingRights::ALL, m);
        assert!(!rights.white_king_side);
        assert!(!rights.black_king_side);
        assert!(rights.white_queen_side);
        assert!(rights.black_queen_side);
    }
}
