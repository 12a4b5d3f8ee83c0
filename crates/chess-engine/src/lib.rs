//! Chess rules engine on a reversible game state.
//!
//! This crate provides:
//! - [`GameState`] - board, side to move, castling rights, en passant target
//!   and the history needed to undo any move
//! - [`CastlingRights`] - the four castling permissions
//! - Legal move generation with checkmate and stalemate detection
//! - [`perft`](movegen::perft::perft) for validating the move generator
//!
//! # Architecture
//!
//! The board is a plain 8x8 grid of cells. Legal moves are found by
//! generating pseudo-legal candidates and then playing each one on the game
//! state to see whether the mover's own king is left attacked. Making and
//! undoing moves is cheap and exact, so search code walks the whole tree on a
//! single `GameState`.
//!
//! # Example
//!
//! ```
//! use chess_engine::GameState;
//!
//! let mut game = GameState::new();
//! let moves = game.valid_moves();
//! println!("Legal moves from starting position: {}", moves.len());
//!
//! game.make_move(moves[0]);
//! game.undo_move();
//! assert_eq!(game, GameState::new());
//! ```

mod castling;
mod game;
pub mod movegen;

pub use castling::CastlingRights;
pub use game::GameState;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::MoveList;
