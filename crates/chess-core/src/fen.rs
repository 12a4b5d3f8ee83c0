//! FEN (Forsyth-Edwards Notation) position setup.
//!
//! Only the first four fields (placement, side to move, castling, en passant)
//! carry meaning here. The two clock fields are optional on input and always
//! written as `0 1`.

use crate::{Board, Cell, Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 to 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("{0} has {1} kings, expected exactly one")]
    KingCount(Color, usize),
}

/// A position description parsed from FEN.
///
/// The engine turns this into its own game state; castling availability is
/// kept as the four `KQkq` flags in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenSetup {
    pub board: Board,
    pub side_to_move: Color,
    /// White kingside, White queenside, Black kingside, Black queenside.
    pub castling: [bool; 4],
    pub en_passant: Option<Square>,
}

impl FenSetup {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let board = Self::parse_placement(parts[0])?;
        for color in [Color::White, Color::Black] {
            let kings = board
                .occupied()
                .filter(|&(_, c, p)| c == color && p == Piece::King)
                .count();
            if kings != 1 {
                return Err(FenError::KingCount(color, kings));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let mut castling = [false; 4];
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let slot = match c {
                    'K' => 0,
                    'Q' => 1,
                    'k' => 2,
                    'q' => 3,
                    _ => {
                        return Err(FenError::InvalidCastlingRights(format!(
                            "invalid character '{}'",
                            c
                        )))
                    }
                };
                castling[slot] = true;
            }
        }

        let en_passant = match parts[3] {
            "-" => None,
            ep => match Square::from_algebraic(ep) {
                Some(sq) if Self::en_passant_fits(&board, side_to_move, sq) => Some(sq),
                _ => return Err(FenError::InvalidEnPassantSquare(ep.to_string())),
            },
        };

        Ok(FenSetup {
            board,
            side_to_move,
            castling,
            en_passant,
        })
    }

    /// A target is only valid right after the opponent's double push: it sits
    /// on the skipped square, that square and the pawn's start are empty, and
    /// the pawn stands just past it.
    fn en_passant_fits(board: &Board, side_to_move: Color, target: Square) -> bool {
        let them = side_to_move.opposite();
        let dir = them.pawn_direction();
        if target.row() as i8 != them.pawn_row() as i8 + dir {
            return false;
        }
        let (Some(start), Some(pawn)) = (target.offset(-dir, 0), target.offset(dir, 0)) else {
            return false;
        };
        board[target].is_empty() && board[start].is_empty() && board[pawn].is(them, Piece::Pawn)
    }

    fn parse_placement(placement: &str) -> Result<Board, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = Board::empty();
        // FEN lists rank 8 first, which is row 0.
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0u32;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip;
                } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                    if let Some(sq) = Square::new(row as u8, col as u8) {
                        board[sq] = Cell::Occupied(color, piece);
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        8 - row
                    )));
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    8 - row,
                    col
                )));
            }
        }
        Ok(board)
    }

    /// Converts the setup back to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for row in 0..8u8 {
            let mut empty_count = 0;
            for col in 0..8u8 {
                match self.board[Square::at(row, col)] {
                    Cell::Occupied(color, piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                    Cell::Empty => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling.iter().all(|&c| !c) {
            fen.push('-');
        } else {
            for (flag, c) in self.castling.iter().zip(['K', 'Q', 'k', 'q']) {
                if *flag {
                    fen.push(c);
                }
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&sq.to_algebraic()),
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }
}

impl Default for FenSetup {
    fn default() -> Self {
        FenSetup {
            board: Board::startpos(),
            side_to_move: Color::White,
            castling: [true; 4],
            en_passant: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = FenSetup::parse(FenSetup::STARTPOS).unwrap();
        assert_eq!(fen, FenSetup::default());
        assert_eq!(fen.to_fen(), FenSetup::STARTPOS);
    }

    #[test]
    fn roundtrip_with_en_passant() {
        let original = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let parsed = FenSetup::parse(original).unwrap();
        assert_eq!(parsed.side_to_move, Color::Black);
        assert_eq!(parsed.en_passant, Square::from_algebraic("e3"));
        assert_eq!(parsed.to_fen(), original);
    }

    #[test]
    fn clocks_are_optional() {
        let fen = FenSetup::parse("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(fen.castling, [false; 4]);
        assert_eq!(fen.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn partial_castling() {
        let fen = FenSetup::parse("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        assert_eq!(fen.castling, [true, false, false, true]);
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(
            FenSetup::parse("invalid"),
            Err(FenError::InvalidPartCount(1))
        ));
        assert!(matches!(
            FenSetup::parse("4k3/8/8/8/8/8/8/4K3 x - - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
        assert!(matches!(
            FenSetup::parse("4k3/8/8/8/8/8/8/4K3 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            FenSetup::parse("4k3/8/8/8/8/8/8/4K3 w - e4 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn en_passant_row_follows_side_to_move() {
        // e3 is only a target when Black is to move.
        assert!(matches!(
            FenSetup::parse("4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(FenSetup::parse("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").is_ok());

        assert!(matches!(
            FenSetup::parse("4k3/8/8/3p4/8/8/8/4K3 b - d6 0 1"),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(FenSetup::parse("4k3/8/8/3p4/8/8/8/4K3 w - d6 0 1").is_ok());
    }

    #[test]
    fn en_passant_needs_a_double_pushed_pawn() {
        let rejected = [
            // Nothing on d5.
            "4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1",
            // A knight where the pawn should be.
            "4k3/8/8/3nP3/8/8/8/4K3 w - d6 0 1",
            // The pawn belongs to the side to move.
            "4k3/8/8/3PP3/8/8/8/4K3 w - d6 0 1",
            // The skipped square is occupied.
            "4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1",
            // The pawn's start square is occupied.
            "4k3/3n4/8/3pP3/8/8/8/4K3 w - d6 0 1",
            // White's own pawns behind an e3 target.
            "4k3/8/8/8/8/8/3PP3/4K3 b - e3 0 1",
        ];
        for fen in rejected {
            assert!(
                matches!(FenSetup::parse(fen), Err(FenError::InvalidEnPassantSquare(_))),
                "{fen} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_piece_placement() {
        assert!(matches!(
            FenSetup::parse("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenSetup::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            FenSetup::parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn requires_one_king_each() {
        assert_eq!(
            FenSetup::parse("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::KingCount(Color::Black, 0))
        );
        assert_eq!(
            FenSetup::parse("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(FenError::KingCount(Color::White, 2))
        );
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains('3'));
        let err = FenError::KingCount(Color::Black, 0);
        assert_eq!(format!("{}", err), "Black has 0 kings, expected exactly one");
    }
}
