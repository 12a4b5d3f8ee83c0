//! Pseudo-legal move rules for each piece type.

use super::MoveList;
use chess_core::{Board, Cell, Color, Move, Piece, Square};

/// What the generator is producing.
///
/// `Attacks` is used by the attack detector. In that mode pawns emit both
/// diagonal steps whether or not anything stands there, and never push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GenMode {
    Moves,
    Attacks,
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Appends the pseudo-legal moves of every `us` piece on `board`.
///
/// Castling is not included; it depends on attack information and is
/// handled by the game state.
pub(crate) fn generate_pseudo_legal(
    board: &Board,
    us: Color,
    en_passant: Option<Square>,
    mode: GenMode,
    moves: &mut MoveList,
) {
    for (from, color, piece) in board.occupied() {
        if color != us {
            continue;
        }
        match piece {
            Piece::Pawn => generate_pawn_moves(board, from, us, en_passant, mode, moves),
            Piece::Knight => generate_knight_moves(board, from, us, moves),
            Piece::Bishop => generate_bishop_moves(board, from, us, moves),
            Piece::Rook => generate_rook_moves(board, from, us, moves),
            Piece::Queen => generate_queen_moves(board, from, us, moves),
            Piece::King => generate_king_moves(board, from, us, moves),
        }
    }
}

fn generate_pawn_moves(
    board: &Board,
    from: Square,
    us: Color,
    en_passant: Option<Square>,
    mode: GenMode,
    moves: &mut MoveList,
) {
    let dir = us.pawn_direction();

    if mode == GenMode::Moves {
        if let Some(one) = from.offset(dir, 0) {
            if board[one].is_empty() {
                moves.push(Move::new(from, one, board));
                if from.row() == us.pawn_row() {
                    if let Some(two) = one.offset(dir, 0) {
                        if board[two].is_empty() {
                            moves.push(Move::new(from, two, board));
                        }
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        match mode {
            GenMode::Attacks => moves.push(Move::new(from, to, board)),
            GenMode::Moves => {
                if board[to].is_color(us.opposite()) {
                    moves.push(Move::new(from, to, board));
                } else if Some(to) == en_passant && board[to].is_empty() {
                    moves.push(Move::en_passant(from, to, board));
                }
            }
        }
    }
}

fn generate_knight_moves(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    generate_steps(board, from, us, &KNIGHT_OFFSETS, moves);
}

fn generate_bishop_moves(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    generate_slides(board, from, us, &BISHOP_DIRECTIONS, moves);
}

fn generate_rook_moves(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    generate_slides(board, from, us, &ROOK_DIRECTIONS, moves);
}

fn generate_queen_moves(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    generate_rook_moves(board, from, us, moves);
    generate_bishop_moves(board, from, us, moves);
}

fn generate_king_moves(board: &Board, from: Square, us: Color, moves: &mut MoveList) {
    generate_steps(board, from, us, &KING_OFFSETS, moves);
}

/// Single steps onto squares not held by `us`.
fn generate_steps(
    board: &Board,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            if !board[to].is_color(us) {
                moves.push(Move::new(from, to, board));
            }
        }
    }
}

/// Rays that stop at the edge, before an own piece, or on an enemy piece.
fn generate_slides(
    board: &Board,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, dc) {
            match board[to] {
                Cell::Empty => moves.push(Move::new(from, to, board)),
                Cell::Occupied(color, _) => {
                    if color != us {
                        moves.push(Move::new(from, to, board));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}
