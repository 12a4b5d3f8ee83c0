//! Move representation.

use crate::{Board, Cell, Color, Piece, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single ply.
///
/// The moved and captured pieces are snapshots of the board taken when the
/// move is constructed, so the move can be undone after the board changed.
///
/// Two moves compare equal when their start and end squares match; the
/// special-move flags take no part in equality. No two simultaneously legal
/// moves share both squares, since promotion always picks a queen.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece_moved: Cell,
    piece_captured: Cell,
    en_passant: bool,
    castle: bool,
    promotion: bool,
}

impl Move {
    /// Creates a normal move, reading the moved and captured pieces from `board`.
    pub fn new(from: Square, to: Square, board: &Board) -> Self {
        let piece_moved = board[from];
        let promotion = match piece_moved {
            Cell::Occupied(color, Piece::Pawn) => to.row() == color.promotion_row(),
            _ => false,
        };
        Move {
            from,
            to,
            piece_moved,
            piece_captured: board[to],
            en_passant: false,
            castle: false,
            promotion,
        }
    }

    /// Creates an en passant capture.
    ///
    /// The landing square is empty, so the captured piece is taken to be the
    /// opposing pawn.
    pub fn en_passant(from: Square, to: Square, board: &Board) -> Self {
        let mut m = Self::new(from, to, board);
        m.en_passant = true;
        m.piece_captured = match m.piece_moved.color() {
            Some(color) => Cell::Occupied(color.opposite(), Piece::Pawn),
            None => Cell::Empty,
        };
        m
    }

    /// Creates a castling move of the king from `from` to `to`.
    pub fn castle(from: Square, to: Square, board: &Board) -> Self {
        let mut m = Self::new(from, to, board);
        m.castle = true;
        m
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move {
        from: Square::A8,
        to: Square::A8,
        piece_moved: Cell::Empty,
        piece_captured: Cell::Empty,
        en_passant: false,
        castle: false,
        promotion: false,
    };

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the piece that moves, as it stood on the source square.
    #[inline]
    pub const fn piece_moved(self) -> Cell {
        self.piece_moved
    }

    /// Returns the piece removed by this move, or `Cell::Empty`.
    #[inline]
    pub const fn piece_captured(self) -> Cell {
        self.piece_captured
    }

    /// Returns the color of the side making the move.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        self.piece_moved.color()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.en_passant
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.castle
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        !self.piece_captured.is_empty()
    }

    /// Returns true for a castle towards the h-file.
    #[inline]
    pub const fn is_kingside_castle(self) -> bool {
        self.castle && self.to.col() > self.from.col()
    }

    /// Returns the start and end squares as a rank/file pair (e.g., "e2e4").
    pub fn notation(self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.notation())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.castle {
            if self.to.col() == 6 {
                write!(f, "O-O")
            } else {
                write!(f, "O-O-O")
            }
        } else {
            write!(f, "{}{}", self.from, self.to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_snapshots_pieces() {
        let board = Board::startpos();
        let m = Move::new(sq("g1"), sq("f3"), &board);
        assert_eq!(m.piece_moved(), Cell::Occupied(Color::White, Piece::Knight));
        assert_eq!(m.piece_captured(), Cell::Empty);
        assert_eq!(m.color(), Some(Color::White));
        assert!(!m.is_capture());
        assert!(!m.is_promotion());
    }

    #[test]
    fn move_notation() {
        let board = Board::startpos();
        let m = Move::new(sq("e2"), sq("e4"), &board);
        assert_eq!(m.notation(), "e2e4");
        assert_eq!(format!("{}", m), "e2e4");
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
    }

    #[test]
    fn castle_display() {
        let board = Board::startpos();
        let short = Move::castle(Square::E1, Square::at(7, 6), &board);
        let long = Move::castle(Square::E8, Square::at(0, 2), &board);
        assert_eq!(short.to_string(), "O-O");
        assert_eq!(long.to_string(), "O-O-O");
        assert!(short.is_kingside_castle());
        assert!(!long.is_kingside_castle());
        assert_eq!(short.notation(), "e1g1");
    }

    #[test]
    fn promotion_flag_derived() {
        let mut board = Board::empty();
        board[sq("b7")] = Cell::Occupied(Color::White, Piece::Pawn);
        board[sq("g2")] = Cell::Occupied(Color::Black, Piece::Pawn);
        board[sq("g6")] = Cell::Occupied(Color::White, Piece::Pawn);
        assert!(Move::new(sq("b7"), sq("b8"), &board).is_promotion());
        assert!(Move::new(sq("g2"), sq("g1"), &board).is_promotion());
        assert!(!Move::new(sq("g6"), sq("g7"), &board).is_promotion());
    }

    #[test]
    fn en_passant_captures_pawn() {
        let mut board = Board::empty();
        board[sq("e5")] = Cell::Occupied(Color::White, Piece::Pawn);
        board[sq("d5")] = Cell::Occupied(Color::Black, Piece::Pawn);
        let m = Move::en_passant(sq("e5"), sq("d6"), &board);
        assert!(m.is_en_passant());
        assert!(m.is_capture());
        assert_eq!(m.piece_captured(), Cell::Occupied(Color::Black, Piece::Pawn));
    }

    #[test]
    fn equality_ignores_flags() {
        let board = Board::startpos();
        let plain = Move::new(Square::E1, Square::at(7, 6), &board);
        let castle = Move::castle(Square::E1, Square::at(7, 6), &board);
        assert_eq!(plain, castle);
        assert_ne!(plain, Move::new(Square::E1, Square::at(7, 2), &board));
    }
}
