//! Computer opponent for the chess engine.
//!
//! This crate provides:
//! - [`score_material`] and [`score_board`] - material evaluation
//! - [`find_random_move`], [`find_two_ply_move`] and [`find_best_move`] -
//!   move choosers of increasing strength
//! - [`SearchContext`] - per-search state (random source, node counter)
//! - [`SearchConfig`] and [`Strategy`] - serde-friendly settings
//!
//! # Example
//!
//! ```
//! use chess_ai::{find_best_move, SearchConfig, SearchContext};
//! use chess_engine::GameState;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut game = GameState::new();
//! let moves = game.valid_moves();
//! let config = SearchConfig { depth: 2, ..SearchConfig::default() };
//! let mut ctx = SearchContext::new(config, StdRng::seed_from_u64(7));
//!
//! let best = find_best_move(&mut game, &moves, &mut ctx).unwrap();
//! assert!(moves.contains(&best));
//! ```

mod config;
mod evaluation;
mod search;

pub use config::{SearchConfig, Strategy, UnknownStrategy, DEFAULT_DEPTH};
pub use evaluation::{piece_value, score_board, score_material, CHECKMATE, STALEMATE};
pub use search::{find_best_move, find_random_move, find_two_ply_move, SearchContext};
