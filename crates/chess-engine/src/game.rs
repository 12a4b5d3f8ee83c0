//! Mutable game state with reversible moves.
//!
//! [`GameState`] owns the board and every piece of history needed to take a
//! move back: the move log, one castling-rights snapshot per ply and one
//! en passant snapshot per ply. [`GameState::make_move`] and
//! [`GameState::undo_move`] are exact inverses, which is what lets move
//! generation and search explore the tree on a single shared instance.

use crate::CastlingRights;
use chess_core::{Board, Cell, Color, FenError, FenSetup, Move, Piece, Square};

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    /// King squares, indexed by [`Color::index`].
    pub(crate) kings: [Square; 2],
    pub(crate) castling: CastlingRights,
    /// Initial rights followed by the rights after each ply.
    castling_log: Vec<CastlingRights>,
    pub(crate) en_passant: Option<Square>,
    /// Initial target followed by the target after each ply.
    en_passant_log: Vec<Option<Square>>,
    move_log: Vec<Move>,
    pub(crate) checkmate: bool,
    pub(crate) stalemate: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game at the standard starting position.
    pub fn new() -> Self {
        Self::from_setup(FenSetup::default())
    }

    /// Creates a game from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_setup(FenSetup::parse(fen)?))
    }

    fn from_setup(setup: FenSetup) -> Self {
        // FenSetup guarantees one king per side.
        let kings = [
            setup.board.find_king(Color::White).unwrap_or(Square::E1),
            setup.board.find_king(Color::Black).unwrap_or(Square::E8),
        ];
        let castling = CastlingRights::from_flags(setup.castling);
        GameState {
            board: setup.board,
            side_to_move: setup.side_to_move,
            kings,
            castling,
            castling_log: vec![castling],
            en_passant: setup.en_passant,
            en_passant_log: vec![setup.en_passant],
            move_log: Vec::new(),
            checkmate: false,
            stalemate: false,
        }
    }

    /// Returns the current position as a FEN string.
    pub fn to_fen(&self) -> String {
        FenSetup {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling.to_flags(),
            en_passant: self.en_passant,
        }
        .to_fen()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    /// Returns the square of the given color's king.
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// Returns the current castling rights.
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the square a pawn may capture en passant on, if any.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the moves played so far, oldest first.
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Returns the number of plies played.
    pub fn ply_count(&self) -> usize {
        self.move_log.len()
    }

    /// True if the last legal-move query found the side to move checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// True if the last legal-move query found the side to move stalemated.
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Plays a move.
    ///
    /// The move must come from [`GameState::valid_moves`] for the current
    /// position; it is not validated again.
    pub fn make_move(&mut self, mv: Move) {
        let Cell::Occupied(us, piece) = mv.piece_moved() else {
            debug_assert!(false, "move {mv:?} has no moving piece");
            return;
        };
        let from = mv.from();
        let to = mv.to();

        self.board[from] = Cell::Empty;
        self.board[to] = mv.piece_moved();
        self.move_log.push(mv);
        self.side_to_move = us.opposite();

        if piece == Piece::King {
            self.kings[us.index()] = to;
        }

        if mv.is_promotion() {
            self.board[to] = Cell::Occupied(us, Piece::Queen);
        }

        if mv.is_en_passant() {
            self.board[Square::at(from.row(), to.col())] = Cell::Empty;
        }

        self.en_passant = if piece == Piece::Pawn && from.row().abs_diff(to.row()) == 2 {
            Some(Square::at((from.row() + to.row()) / 2, from.col()))
        } else {
            None
        };
        self.en_passant_log.push(self.en_passant);

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(mv);
            self.board[rook_to] = self.board[rook_from];
            self.board[rook_from] = Cell::Empty;
        }

        self.update_castling_rights(mv, us, piece);
        self.castling_log.push(self.castling);

        self.debug_check_history();
    }

    /// Takes back the last move and returns it, or does nothing and returns
    /// `None` when no move has been played.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        let from = mv.from();
        let to = mv.to();

        self.board[from] = mv.piece_moved();
        self.board[to] = mv.piece_captured();
        self.side_to_move = self.side_to_move.opposite();

        if let Cell::Occupied(us, Piece::King) = mv.piece_moved() {
            self.kings[us.index()] = from;
        }

        if mv.is_en_passant() {
            self.board[to] = Cell::Empty;
            self.board[Square::at(from.row(), to.col())] = mv.piece_captured();
        }

        self.en_passant_log.pop();
        self.en_passant = self.en_passant_log.last().copied().flatten();

        self.castling_log.pop();
        self.castling = self
            .castling_log
            .last()
            .copied()
            .unwrap_or(CastlingRights::NONE);

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(mv);
            self.board[rook_from] = self.board[rook_to];
            self.board[rook_to] = Cell::Empty;
        }

        // The restored position has not been examined yet.
        self.checkmate = false;
        self.stalemate = false;

        self.debug_check_history();
        Some(mv)
    }

    fn update_castling_rights(&mut self, mv: Move, us: Color, piece: Piece) {
        match piece {
            Piece::King => self.castling.remove_color(us),
            Piece::Rook => self.revoke_for_corner(us, mv.from()),
            _ => {}
        }

        // A rook captured on its corner takes its right with it.
        if let Cell::Occupied(them, Piece::Rook) = mv.piece_captured() {
            self.revoke_for_corner(them, mv.to());
        }
    }

    fn revoke_for_corner(&mut self, color: Color, sq: Square) {
        if sq.row() != color.back_row() {
            return;
        }
        match sq.col() {
            0 => self.castling.remove_queenside(color),
            7 => self.castling.remove_kingside(color),
            _ => {}
        }
    }

    #[inline]
    fn debug_check_history(&self) {
        debug_assert_eq!(self.move_log.len() + 1, self.castling_log.len());
        debug_assert_eq!(self.move_log.len() + 1, self.en_passant_log.len());
        debug_assert!(self.board[self.kings[0]].is(Color::White, Piece::King));
        debug_assert!(self.board[self.kings[1]].is(Color::Black, Piece::King));
    }
}

/// Returns the rook's (origin, destination) for a castling move.
fn castle_rook_squares(mv: Move) -> (Square, Square) {
    let row = mv.to().row();
    let col = mv.to().col();
    if mv.is_kingside_castle() {
        (Square::at(row, 7), Square::at(row, col - 1))
    } else {
        (Square::at(row, 0), Square::at(row, col + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(state: &mut GameState, from: &str, to: &str) -> Move {
        let mv = state
            .valid_moves()
            .iter()
            .copied()
            .find(|m| m.from() == sq(from) && m.to() == sq(to))
            .unwrap_or_else(|| panic!("{from}{to} is not legal"));
        state.make_move(mv);
        mv
    }

    #[test]
    fn new_game() {
        let state = GameState::new();
        assert_eq!(state.ply_count(), 0);
        assert!(state.white_to_move());
        assert_eq!(state.king_square(Color::White), Square::E1);
        assert_eq!(state.king_square(Color::Black), Square::E8);
        assert_eq!(state.castling_rights(), CastlingRights::ALL);
        assert_eq!(state.en_passant(), None);
        assert_eq!(state.to_fen(), FenSetup::STARTPOS);
    }

    #[test]
    fn make_and_undo_pawn_push() {
        let mut state = GameState::new();
        let before = state.clone();
        let mv = play(&mut state, "e2", "e4");

        assert_eq!(state.side_to_move(), Color::Black);
        assert!(state.board()[sq("e2")].is_empty());
        assert!(state.board()[sq("e4")].is(Color::White, Piece::Pawn));
        assert_eq!(state.move_log(), &[mv]);

        assert_eq!(state.undo_move(), Some(mv));
        assert_eq!(state, before);
    }

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut state = GameState::new();
        let before = state.clone();
        assert_eq!(state.undo_move(), None);
        assert_eq!(state, before);
    }

    #[test]
    fn en_passant_target_lives_one_ply() {
        let mut state = GameState::new();
        play(&mut state, "e2", "e4");
        assert_eq!(state.en_passant(), Some(sq("e3")));
        play(&mut state, "g8", "f6");
        assert_eq!(state.en_passant(), None);
        play(&mut state, "e4", "e5");
        play(&mut state, "d7", "d5");
        assert_eq!(state.en_passant(), Some(sq("d6")));

        state.undo_move();
        assert_eq!(state.en_passant(), None);
        state.undo_move();
        state.undo_move();
        assert_eq!(state.en_passant(), Some(sq("e3")));
    }

    #[test]
    fn en_passant_capture_and_undo() {
        let mut state =
            GameState::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .unwrap();
        let before = state.clone();
        let mv = play(&mut state, "e5", "d6");

        assert!(mv.is_en_passant());
        assert!(state.board()[sq("d5")].is_empty());
        assert!(state.board()[sq("d6")].is(Color::White, Piece::Pawn));

        state.undo_move();
        assert!(state.board()[sq("d5")].is(Color::Black, Piece::Pawn));
        assert!(state.board()[sq("d6")].is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn castling_moves_rook_and_revokes_rights() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let before = state.clone();
        let mv = play(&mut state, "e1", "g1");

        assert!(mv.is_castle());
        assert!(state.board()[sq("f1")].is(Color::White, Piece::Rook));
        assert!(state.board()[sq("h1")].is_empty());
        assert_eq!(state.king_square(Color::White), Square::at(7, 6));
        assert!(!state.castling_rights().can_castle_kingside(Color::White));
        assert!(!state.castling_rights().can_castle_queenside(Color::White));
        assert!(state.castling_rights().can_castle_kingside(Color::Black));

        let reply = play(&mut state, "e8", "c8");
        assert_eq!(reply.to_string(), "O-O-O");
        assert!(state.board()[sq("d8")].is(Color::Black, Piece::Rook));
        assert!(state.board()[sq("a8")].is_empty());
        assert_eq!(state.castling_rights(), CastlingRights::NONE);

        state.undo_move();
        state.undo_move();
        assert_eq!(state, before);
    }

    #[test]
    fn rook_move_revokes_one_side() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut state, "a1", "a2");
        assert_eq!(state.castling_rights().to_flags(), [true, false, true, true]);
        play(&mut state, "h8", "h7");
        assert_eq!(state.castling_rights().to_flags(), [true, false, false, true]);
    }

    #[test]
    fn capturing_unmoved_rook_revokes_its_right() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut state, "a1", "a8");
        let rights = state.castling_rights();
        assert!(!rights.can_castle_queenside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(rights.can_castle_kingside(Color::Black));

        // The right stays gone however play continues.
        play(&mut state, "e8", "e7");
        play(&mut state, "a8", "a1");
        assert!(!state.castling_rights().can_castle_queenside(Color::Black));

        state.undo_move();
        state.undo_move();
        state.undo_move();
        assert!(state.castling_rights().can_castle_queenside(Color::Black));
    }

    #[test]
    fn promotion_queens_and_undo_restores_pawn() {
        let mut state = GameState::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let push = play(&mut state, "a7", "a8");
        assert!(push.is_promotion());
        assert!(state.board()[sq("a8")].is(Color::White, Piece::Queen));
        state.undo_move();
        assert!(state.board()[sq("a7")].is(Color::White, Piece::Pawn));

        let capture = play(&mut state, "a7", "b8");
        assert!(capture.is_promotion());
        assert!(state.board()[sq("b8")].is(Color::White, Piece::Queen));
        state.undo_move();
        assert!(state.board()[sq("b8")].is(Color::Black, Piece::Knight));
    }

    #[test]
    fn undo_clears_terminal_flags() {
        let mut state = GameState::new();
        play(&mut state, "f2", "f3");
        play(&mut state, "e7", "e5");
        play(&mut state, "g2", "g4");
        play(&mut state, "d8", "h4");
        assert!(state.valid_moves().is_empty());
        assert!(state.is_checkmate());

        state.undo_move();
        assert!(!state.is_checkmate());
        assert!(!state.is_stalemate());
    }
}
