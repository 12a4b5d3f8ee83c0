//! Game loop for engine-versus-engine play.

use chess_ai::{SearchConfig, SearchContext, Strategy};
use chess_core::{Color, FenError};
use chess_engine::GameState;
use rand::Rng;

/// The outcome of a self-play game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The given side delivered checkmate.
    Checkmate(Color),
    Stalemate,
    /// The ply limit was reached before the game ended.
    Unfinished,
}

/// A finished self-play game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    /// Moves in coordinate notation, e.g. "e2e4".
    pub moves: Vec<String>,
    pub outcome: Outcome,
    /// Final position as FEN.
    pub final_fen: String,
}

/// Plays one game between two strategies.
pub struct GameRunner<R> {
    white: Strategy,
    black: Strategy,
    max_plies: u32,
    ctx: SearchContext<R>,
}

impl<R: Rng> GameRunner<R> {
    pub fn new(
        white: Strategy,
        black: Strategy,
        search: SearchConfig,
        max_plies: u32,
        rng: R,
    ) -> Self {
        GameRunner {
            white,
            black,
            max_plies,
            ctx: SearchContext::new(search, rng),
        }
    }

    /// Plays from the standard starting position.
    pub fn play_game(&mut self) -> GameRecord {
        self.play_from(GameState::new())
    }

    /// Plays from a FEN position.
    ///
    /// # Errors
    ///
    /// Returns an error if `fen` does not describe a valid position.
    pub fn play_from_fen(&mut self, fen: &str) -> Result<GameRecord, FenError> {
        Ok(self.play_from(GameState::from_fen(fen)?))
    }

    fn play_from(&mut self, mut state: GameState) -> GameRecord {
        let mut moves = Vec::new();

        let outcome = loop {
            let legal = state.valid_moves();
            if state.is_checkmate() {
                break Outcome::Checkmate(state.side_to_move().opposite());
            }
            if state.is_stalemate() {
                break Outcome::Stalemate;
            }
            if moves.len() as u32 >= self.max_plies {
                break Outcome::Unfinished;
            }

            let side = state.side_to_move();
            let strategy = match side {
                Color::White => self.white,
                Color::Black => self.black,
            };
            let Some(mv) = strategy.choose_move(&mut state, &legal, &mut self.ctx) else {
                // Only reachable with an empty move list, handled above.
                break Outcome::Stalemate;
            };

            tracing::info!(
                ply = moves.len() + 1,
                side = %side,
                %strategy,
                nodes = self.ctx.nodes(),
                "{}",
                mv
            );
            state.make_move(mv);
            moves.push(mv.notation());
        };

        tracing::info!(plies = moves.len(), ?outcome, "game over");
        GameRecord {
            moves,
            outcome,
            final_fen: state.to_fen(),
        }
    }
}
