//! Move choosers.
//!
//! All choosers take the legal moves already generated for `state` and
//! walk the game tree with make/undo on that same state, leaving it exactly
//! as they found it.

use crate::evaluation::{score_board, score_material, CHECKMATE, STALEMATE};
use crate::{SearchConfig, Strategy};
use chess_core::Move;
use chess_engine::{GameState, MoveList};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

/// State carried through one search.
#[derive(Debug)]
pub struct SearchContext<R> {
    config: SearchConfig,
    rng: R,
    nodes: u64,
    best_move: Option<Move>,
}

impl<R: Rng> SearchContext<R> {
    pub fn new(config: SearchConfig, rng: R) -> Self {
        SearchContext {
            config,
            rng,
            nodes: 0,
            best_move: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of positions visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    fn reset(&mut self) {
        self.nodes = 0;
        self.best_move = None;
    }

    fn shuffle(&mut self, moves: &mut MoveList) {
        if self.config.shuffle {
            moves.as_mut_slice().shuffle(&mut self.rng);
        }
    }
}

impl Strategy {
    /// Picks a move for the side to move with this strategy.
    ///
    /// `moves` must be the legal moves of `state`; see [`find_best_move`].
    pub fn choose_move<R: Rng>(
        self,
        state: &mut GameState,
        moves: &MoveList,
        ctx: &mut SearchContext<R>,
    ) -> Option<Move> {
        trace!(strategy = %self, candidates = moves.len(), "choosing move");
        match self {
            Strategy::Random => find_random_move(moves, ctx.rng_mut()),
            Strategy::TwoPly => find_two_ply_move(state, moves, ctx),
            Strategy::Negamax => find_best_move(state, moves, ctx),
        }
    }
}

/// Picks a move uniformly at random. Returns `None` only for an empty list.
pub fn find_random_move<R: Rng + ?Sized>(moves: &MoveList, rng: &mut R) -> Option<Move> {
    moves.as_slice().choose(rng).copied()
}

/// Picks the move that leaves the opponent's best reply worst in material.
///
/// Each candidate is played and every reply tried; a reply that mates us
/// scores `CHECKMATE` for the opponent, a stalemating one `STALEMATE`. A
/// candidate that mates or stalemates the opponent outright is scored
/// directly. `moves` must be the non-empty legal move list of `state`.
pub fn find_two_ply_move<R: Rng>(
    state: &mut GameState,
    moves: &MoveList,
    ctx: &mut SearchContext<R>,
) -> Option<Move> {
    debug_assert!(!moves.is_empty(), "search needs at least one legal move");
    ctx.reset();
    let turn = state.side_to_move().sign();
    let mut candidates = moves.clone();
    ctx.shuffle(&mut candidates);

    // One above the worst score, so even a losing move gets picked.
    let mut best_worst_case = CHECKMATE + 1;
    for &mv in &candidates {
        let plies = state.ply_count();
        state.make_move(mv);
        ctx.nodes += 1;
        let replies = state.valid_moves();

        let opponent_best = if state.is_stalemate() {
            STALEMATE
        } else if state.is_checkmate() {
            -CHECKMATE
        } else {
            let mut opponent_best = -CHECKMATE;
            for &reply in &replies {
                state.make_move(reply);
                ctx.nodes += 1;
                state.valid_moves();
                let score = if state.is_checkmate() {
                    CHECKMATE
                } else if state.is_stalemate() {
                    STALEMATE
                } else {
                    -turn * score_material(state.board())
                };
                opponent_best = opponent_best.max(score);
                state.undo_move();
            }
            opponent_best
        };

        state.undo_move();
        debug_assert_eq!(plies, state.ply_count());

        if opponent_best < best_worst_case {
            best_worst_case = opponent_best;
            ctx.best_move = Some(mv);
        }
    }

    debug!(
        nodes = ctx.nodes,
        score = -best_worst_case,
        best = ?ctx.best_move,
        "two-ply search finished"
    );
    ctx.best_move
}

/// Searches `state` with negamax and alpha-beta pruning.
///
/// `moves` must be the non-empty legal move list of `state`, freshly
/// generated so the terminal flags are current. This is only checked in
/// debug builds; an empty list yields `None`.
pub fn find_best_move<R: Rng>(
    state: &mut GameState,
    moves: &MoveList,
    ctx: &mut SearchContext<R>,
) -> Option<Move> {
    debug_assert!(!moves.is_empty(), "search needs at least one legal move");
    ctx.reset();
    let depth = ctx.config.depth.max(1);
    let turn = state.side_to_move().sign();
    let mut root_moves = moves.clone();

    let score = negamax(
        state,
        &mut root_moves,
        depth,
        0,
        -CHECKMATE,
        CHECKMATE,
        turn,
        ctx,
    );

    debug!(
        depth,
        nodes = ctx.nodes,
        score,
        best = ?ctx.best_move,
        "negamax search finished"
    );
    ctx.best_move
}

/// Returns the score of `state` for the side to move, `turn` being that
/// side's sign. `moves` are the legal moves of `state`.
#[allow(clippy::too_many_arguments)]
fn negamax<R: Rng>(
    state: &mut GameState,
    moves: &mut MoveList,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    beta: i32,
    turn: i32,
    ctx: &mut SearchContext<R>,
) -> i32 {
    ctx.nodes += 1;

    if depth == 0 || state.is_checkmate() || state.is_stalemate() {
        return turn * score_board(state);
    }

    ctx.shuffle(moves);

    // Below -CHECKMATE so a forced loss still records a move at the root.
    let mut max_score = -CHECKMATE - 1;
    for &mv in moves.iter() {
        let plies = state.ply_count();
        state.make_move(mv);
        let mut replies = state.valid_moves();
        let score = -negamax(
            state,
            &mut replies,
            depth - 1,
            ply + 1,
            -beta,
            -alpha,
            -turn,
            ctx,
        );
        state.undo_move();
        debug_assert_eq!(plies, state.ply_count());

        if score > max_score {
            max_score = score;
            if ply == 0 {
                ctx.best_move = Some(mv);
            }
        }
        alpha = alpha.max(max_score);
        if alpha >= beta {
            break;
        }
    }
    max_score
}
