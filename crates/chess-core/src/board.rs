//! The 8x8 board grid.

use crate::{Cell, Color, Piece, Square};
use std::fmt;
use std::ops::{Index, IndexMut};

/// An 8x8 grid of [`Cell`]s indexed by [`Square`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            cells: [[Cell::Empty; 8]; 8],
        }
    }

    /// Creates the standard starting arrangement.
    pub fn startpos() -> Self {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            let back = color.back_row() as usize;
            let pawns = color.pawn_row() as usize;
            for (col, piece) in BACK_RANK.iter().enumerate() {
                board.cells[back][col] = Cell::Occupied(color, *piece);
                board.cells[pawns][col] = Cell::Occupied(color, Piece::Pawn);
            }
        }
        board
    }

    /// Iterates over every occupied square with its occupant.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Color, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self[sq] {
            Cell::Occupied(color, piece) => Some((sq, color, piece)),
            Cell::Empty => None,
        })
    }

    /// Returns the square of the king of the given color, if present.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self[sq].is(color, Piece::King))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Index<Square> for Board {
    type Output = Cell;

    #[inline]
    fn index(&self, sq: Square) -> &Cell {
        &self.cells[sq.row() as usize][sq.col() as usize]
    }
}

impl IndexMut<Square> for Board {
    #[inline]
    fn index_mut(&mut self, sq: Square) -> &mut Cell {
        &mut self.cells[sq.row() as usize][sq.col() as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    Cell::Occupied(color, piece) => piece.to_fen_char(*color),
                    Cell::Empty => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_layout() {
        let board = Board::startpos();
        assert_eq!(board[Square::E1], Cell::Occupied(Color::White, Piece::King));
        assert_eq!(board[Square::E8], Cell::Occupied(Color::Black, Piece::King));
        assert_eq!(board[Square::A8], Cell::Occupied(Color::Black, Piece::Rook));
        assert_eq!(
            board[Square::at(6, 3)],
            Cell::Occupied(Color::White, Piece::Pawn)
        );
        assert!(board[Square::at(4, 4)].is_empty());
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn find_king() {
        let board = Board::startpos();
        assert_eq!(board.find_king(Color::White), Some(Square::E1));
        assert_eq!(board.find_king(Color::Black), Some(Square::E8));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn index_mut() {
        let mut board = Board::empty();
        let c1 = Square::at(7, 2);
        board[c1] = Cell::Occupied(Color::White, Piece::Bishop);
        assert_eq!(board.occupied().next(), Some((c1, Color::White, Piece::Bishop)));
    }
}
