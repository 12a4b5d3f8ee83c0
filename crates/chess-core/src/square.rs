//! Board square representation.

use std::fmt;

/// A square on the board, stored as `row * 8 + col`.
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank
/// (rank 1). Column 0 is the a-file.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column, if both are in 0-7.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Creates a square from row and column without bounds checking.
    ///
    /// Both coordinates must be in 0-7.
    #[inline]
    pub const fn at(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return None;
        }
        Some(Square::at(b'8' - rank, file - b'a'))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the row (0 = rank 8, 7 = rank 1).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    /// Returns the column (0 = file a).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    /// Returns the square shifted by the given row and column deltas,
    /// or `None` if that leaves the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if row < 0 || row > 7 || col < 0 || col > 7 {
            None
        } else {
            Some(Square::at(row as u8, col as u8))
        }
    }

    /// Returns the file character ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.col()) as char
    }

    /// Returns the rank character ('1'-'8').
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'8' - self.row()) as char
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Iterates over all 64 squares, row by row from row 0.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }

    pub const A8: Square = Square::at(0, 0);
    // Home squares of the kings
    pub const E1: Square = Square::at(7, 4);
    pub const E8: Square = Square::at(0, 4);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
