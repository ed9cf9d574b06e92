//! Chess rules engine on a plain 8x8 board.
//!
//! This crate provides:
//! - [`Board`] - 64-cell board of optional pieces, row 0 being rank 8
//! - [`GameState`] - game controller with move log, legality checking and undo
//! - [`CastlingRights`] / [`RightsTracker`] - castling permissions and their history
//! - Pseudo-legal move generation, attack detection and perft
//!
//! # Example
//!
//! ```
//! use ply_engine::{GameState, GameStatus};
//!
//! let mut game = GameState::new();
//! assert_eq!(game.legal_moves().len(), 20);
//!
//! for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     game.play(mv).unwrap();
//! }
//! assert_eq!(game.status(), GameStatus::Checkmate);
//! ```

mod board;
mod castling;
mod game;
pub mod movegen;

pub use board::{Board, BoardError};
pub use castling::{CastlingRights, RightsTracker};
pub use game::{GameError, GameState, GameStatus};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{castling_moves, pseudo_legal_moves, square_under_attack, MoveList};
