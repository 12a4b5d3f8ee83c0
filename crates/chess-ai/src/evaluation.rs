//! Material evaluation.
//!
//! Scores are from White's point of view: positive favours White, negative
//! favours Black.

use chess_core::{Board, Piece};
use chess_engine::GameState;

/// Score of a won game.
pub const CHECKMATE: i32 = 1000;
/// Score of a drawn game.
pub const STALEMATE: i32 = 0;

/// Material value of a piece type. The king is never traded and counts zero.
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::King => 0,
        Piece::Queen => 10,
        Piece::Rook => 5,
        Piece::Bishop => 3,
        Piece::Knight => 3,
        Piece::Pawn => 1,
    }
}

/// Sums piece values, White positive and Black negative.
pub fn score_material(board: &Board) -> i32 {
    board
        .occupied()
        .map(|(_, color, piece)| color.sign() * piece_value(piece))
        .sum()
}

/// Scores a position, taking the game result into account.
///
/// Relies on the terminal flags computed by the last
/// [`GameState::valid_moves`] call: a checkmated side to move scores
/// `CHECKMATE` against itself, stalemate scores [`STALEMATE`].
pub fn score_board(state: &GameState) -> i32 {
    if state.is_checkmate() {
        -state.side_to_move().sign() * CHECKMATE
    } else if state.is_stalemate() {
        STALEMATE
    } else {
        score_material(state.board())
    }
}
