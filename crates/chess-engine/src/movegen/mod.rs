//! Move generation.
//!
//! Legal moves are produced in two stages. The per-piece rules in
//! [`pieces`] emit pseudo-legal candidates that ignore the mover's own king.
//! [`GameState::valid_moves`] then plays each candidate on the game state,
//! asks the attack detector whether the mover's king is now attacked, and
//! takes the move back again.

mod attacks;
mod pieces;
pub mod perft;

use crate::GameState;
use chess_core::{Move, Piece, Square};
use pieces::{generate_pseudo_legal, GenMode};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Removes the move at `index`, shifting later moves down.
    pub fn remove(&mut self, index: usize) -> Move {
        assert!(index < self.len, "index {index} out of bounds");
        let removed = self.moves[index];
        self.moves.copy_within(index + 1..self.len, index);
        self.len -= 1;
        removed
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns a mutable slice of the moves, e.g. for reordering.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if a move with the same start and end squares is present.
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Finds the move between two squares, if present.
    pub fn find(&self, from: Square, to: Square) -> Option<Move> {
        self.iter().copied().find(|m| m.from() == from && m.to() == to)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl GameState {
    /// Generates all legal moves for the side to move.
    ///
    /// Also recomputes the checkmate and stalemate flags: with no legal move
    /// the side to move is checkmated if its king is attacked and stalemated
    /// otherwise.
    pub fn valid_moves(&mut self) -> MoveList {
        // The legality test plays and takes back every candidate.
        let saved_en_passant = self.en_passant;
        let saved_castling = self.castling;

        let mut moves = self.pseudo_legal_moves();
        let king = self.king_square(self.side_to_move);
        self.generate_castling_moves(king, &mut moves);

        let us = self.side_to_move;
        // Backwards, so removal does not skip the next candidate.
        for i in (0..moves.len()).rev() {
            let plies = self.ply_count();
            self.make_move(moves[i]);
            self.side_to_move = us;
            let exposed = self.in_check();
            self.side_to_move = us.opposite();
            self.undo_move();
            debug_assert_eq!(plies, self.ply_count());
            if exposed {
                moves.remove(i);
            }
        }

        if moves.is_empty() {
            let check = self.in_check();
            self.checkmate = check;
            self.stalemate = !check;
        } else {
            self.checkmate = false;
            self.stalemate = false;
        }

        self.en_passant = saved_en_passant;
        self.castling = saved_castling;
        moves
    }

    /// Generates the pseudo-legal moves of the side to move, without castling.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        generate_pseudo_legal(
            &self.board,
            self.side_to_move,
            self.en_passant,
            GenMode::Moves,
            &mut moves,
        );
        moves
    }

    /// Appends castling moves for the king on `king`.
    ///
    /// Castling is never generated out of check. For each side with its right
    /// still set, the squares between king and rook must be empty and the
    /// square the king crosses and the square it lands on must be unattacked.
    fn generate_castling_moves(&self, king: Square, moves: &mut MoveList) {
        if self.square_under_attack(king) {
            return;
        }
        let us = self.side_to_move;
        if self.castling.can_castle_kingside(us) {
            self.generate_kingside_castle(king, moves);
        }
        if self.castling.can_castle_queenside(us) {
            self.generate_queenside_castle(king, moves);
        }
    }

    fn generate_kingside_castle(&self, king: Square, moves: &mut MoveList) {
        let (Some(f), Some(g), Some(rook)) =
            (king.offset(0, 1), king.offset(0, 2), king.offset(0, 3))
        else {
            return;
        };
        if !self.board[rook].is(self.side_to_move, Piece::Rook) {
            return;
        }
        if self.board[f].is_empty()
            && self.board[g].is_empty()
            && !self.square_under_attack(f)
            && !self.square_under_attack(g)
        {
            moves.push(Move::castle(king, g, &self.board));
        }
    }

    fn generate_queenside_castle(&self, king: Square, moves: &mut MoveList) {
        let (Some(d), Some(c), Some(b), Some(rook)) = (
            king.offset(0, -1),
            king.offset(0, -2),
            king.offset(0, -3),
            king.offset(0, -4),
        ) else {
            return;
        };
        if !self.board[rook].is(self.side_to_move, Piece::Rook) {
            return;
        }
        if self.board[d].is_empty()
            && self.board[c].is_empty()
            && self.board[b].is_empty()
            && !self.square_under_attack(d)
            && !self.square_under_attack(c)
        {
            moves.push(Move::castle(king, c, &self.board));
        }
    }
}
