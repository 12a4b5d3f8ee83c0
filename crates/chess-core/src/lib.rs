//! Core types for chess.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Piece`], [`Color`] and [`Cell`] for square contents
//! - [`Square`] and [`Board`] for board coordinates and the 8x8 grid
//! - [`Move`] for a single ply with its captured-piece snapshot
//! - FEN position setup

mod board;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use board::Board;
pub use color::Color;
pub use fen::{FenError, FenSetup};
pub use mov::Move;
pub use piece::{Cell, Piece};
pub use square::Square;
