//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Every node is visited with make/undo on one shared game state, so a
//! perft run also exercises the history bookkeeping.

use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.valid_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        state.make_move(*m);
        nodes += perft(state, depth - 1);
        state.undo_move();
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(state: &mut GameState, depth: u32) -> Vec<(String, u64)> {
    let moves = state.valid_moves();
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        state.make_move(*m);
        let nodes = if depth > 1 {
            perft(state, depth - 1)
        } else {
            1
        };
        state.undo_move();
        results.push((m.notation(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
