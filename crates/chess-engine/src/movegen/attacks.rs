//! Attack detection.

use super::pieces::{generate_pseudo_legal, GenMode};
use super::MoveList;
use crate::GameState;
use chess_core::{Color, Square};

impl GameState {
    /// Returns true if the side not to move attacks `sq`.
    ///
    /// A pawn attacks its two diagonal squares even when they are empty, and
    /// never the square it could push to. So a pawn on h2 keeps a king from
    /// castling onto g1, and a pawn standing in front of a square does not
    /// attack it.
    pub fn square_under_attack(&self, sq: Square) -> bool {
        self.square_attacked_by(sq, self.side_to_move.opposite())
    }

    /// Returns true if any piece of `attacker` could capture on `sq`.
    ///
    /// Pawns count their diagonals even when the square is empty, so this
    /// also answers whether a king may cross or land on `sq`.
    pub fn square_attacked_by(&self, sq: Square, attacker: Color) -> bool {
        let mut attacks = MoveList::new();
        generate_pseudo_legal(&self.board, attacker, None, GenMode::Attacks, &mut attacks);
        attacks.iter().any(|m| m.to() == sq)
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.square_under_attack(self.king_square(self.side_to_move))
    }
}
