//! Board: owner of the 8x8 grid, castling rights, en-passant target, the
//! halfmove clock and the repetition-detection ledger.
//!
//! Row 0 is White's back rank, row 7 is Black's; see `crate::square` for
//! the coordinate convention this crate fixes.

mod fen;
mod position_key;

use std::collections::HashMap;
use std::fmt;

use crate::moves::execute;
use crate::moves::movegen;
use crate::moves::types::Move;
use crate::square::Square;
use crate::status::{self, GameOverReason};

pub use fen::FenError;
pub use position_key::position_key;

/// Which side is to move. `Black` is the side the evaluator maximizes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;
    #[inline]
    fn not(self) -> Color {
        self.opposite()
    }
}

/// The closed set of chess piece kinds, as a tagged variant rather than
/// a string-dispatched class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Standard material value in centipawns.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 20000,
        }
    }

    pub fn promotion_char(self) -> Option<char> {
        match self {
            PieceKind::Queen => Some('q'),
            PieceKind::Rook => Some('r'),
            PieceKind::Bishop => Some('b'),
            PieceKind::Knight => Some('n'),
            _ => None,
        }
    }

    pub fn from_promotion_char(c: char) -> Option<PieceKind> {
        match c {
            'q' => Some(PieceKind::Queen),
            'r' => Some(PieceKind::Rook),
            'b' => Some(PieceKind::Bishop),
            'n' => Some(PieceKind::Knight),
            _ => None,
        }
    }
}

/// A piece is just (kind, color) — no redundant square field. The board's
/// `grid` is the sole source of truth for where a piece sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }
}

/// Castling rights for both colors, both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    #[inline]
    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    #[inline]
    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }
}

/// Home squares for kings and rooks, used by castling logic and by the
/// "a castling right implies the king/rook still sit on their home
/// squares" invariant.
pub const WHITE_KING_HOME: Square = Square::new(0, 4);
pub const BLACK_KING_HOME: Square = Square::new(7, 4);
pub const WHITE_KINGSIDE_ROOK_HOME: Square = Square::new(0, 7);
pub const WHITE_QUEENSIDE_ROOK_HOME: Square = Square::new(0, 0);
pub const BLACK_KINGSIDE_ROOK_HOME: Square = Square::new(7, 7);
pub const BLACK_QUEENSIDE_ROOK_HOME: Square = Square::new(7, 0);

/// Core board representation: a 64-slot mailbox array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [Option<Piece>; 64],
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u32,
    /// Canonical position key -> number of times seen. Maintained
    /// symmetrically by `make`/`unmake` so a make/unmake round trip leaves
    /// this map, like every other field, bit-for-bit restored.
    pub repetition_counts: HashMap<String, u32>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Board {
    /// An empty board: no pieces, no castling rights, no en-passant
    /// target, a zeroed halfmove clock and no repetition history.
    pub fn new() -> Self {
        Board {
            grid: [None; 64],
            castling_rights: CastlingRights::default(),
            en_passant_target: None,
            halfmove_clock: 0,
            repetition_counts: HashMap::new(),
        }
    }

    /// Populates the grid with the standard starting array, grants full
    /// castling rights to both sides, and records the starting position
    /// in `repetition_counts`.
    pub fn setup_initial_position(&mut self) {
        *self = Board::new();

        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for col in 0..8u8 {
            self.set(
                Square::new(0, col),
                Some(Piece::new(BACK_RANK[col as usize], Color::White)),
            );
            self.set(
                Square::new(1, col),
                Some(Piece::new(PieceKind::Pawn, Color::White)),
            );
            self.set(
                Square::new(6, col),
                Some(Piece::new(PieceKind::Pawn, Color::Black)),
            );
            self.set(
                Square::new(7, col),
                Some(Piece::new(BACK_RANK[col as usize], Color::Black)),
            );
        }

        self.castling_rights = CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        };

        let key = position_key(self, Color::White);
        self.repetition_counts.insert(key, 1);
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.grid[square.index()] = piece;
    }

    /// Iterates every occupied square together with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|p| (Square::from_index(i as u8), p)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(sq, _)| sq)
    }

    /// §4.2: O(1)-per-attacker-class square-attacked test. Does not
    /// perform full move generation.
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        // Pawn attacks: a pawn of `by_color` attacks diagonally "forward"
        // from its own perspective, so we look one rank *behind* `square`
        // (from the attacker's point of view) on both files.
        let pawn_rank_offset: i8 = match by_color {
            Color::White => -1,
            Color::Black => 1,
        };
        for d_col in [-1i8, 1i8] {
            if let Some(origin) = square.try_offset(pawn_rank_offset, d_col) {
                if let Some(p) = self.piece_at(origin) {
                    if p.color == by_color && p.kind == PieceKind::Pawn {
                        return true;
                    }
                }
            }
        }

        const KNIGHT_OFFSETS: [(i8, i8); 8] = [
            (1, 2),
            (2, 1),
            (-1, 2),
            (-2, 1),
            (1, -2),
            (2, -1),
            (-1, -2),
            (-2, -1),
        ];
        for (dr, dc) in KNIGHT_OFFSETS {
            if let Some(origin) = square.try_offset(dr, dc) {
                if let Some(p) = self.piece_at(origin) {
                    if p.color == by_color && p.kind == PieceKind::Knight {
                        return true;
                    }
                }
            }
        }

        const KING_OFFSETS: [(i8, i8); 8] = [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];
        for (dr, dc) in KING_OFFSETS {
            if let Some(origin) = square.try_offset(dr, dc) {
                if let Some(p) = self.piece_at(origin) {
                    if p.color == by_color && p.kind == PieceKind::King {
                        return true;
                    }
                }
            }
        }

        const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
        for (dr, dc) in DIAGONALS {
            let mut cur = square;
            while let Some(next) = cur.try_offset(dr, dc) {
                cur = next;
                if let Some(p) = self.piece_at(cur) {
                    if p.color == by_color
                        && (p.kind == PieceKind::Bishop || p.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
            }
        }

        const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        for (dr, dc) in ORTHOGONALS {
            let mut cur = square;
            while let Some(next) = cur.try_offset(dr, dc) {
                cur = next;
                if let Some(p) = self.piece_at(cur) {
                    if p.color == by_color
                        && (p.kind == PieceKind::Rook || p.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
            }
        }

        false
    }

    /// True iff `color`'s king is attacked by the opposing side. Panics if
    /// `color` has no king: a board without a king is an invariant
    /// violation, fatal by design.
    pub fn in_check(&self, color: Color) -> bool {
        let king_sq = self
            .king_square(color)
            .unwrap_or_else(|| panic!("InvariantViolation: no {color:?} king on the board"));
        self.is_square_attacked(king_sq, color.opposite())
    }

    /// All legal moves for `color` from the current position.
    pub fn legal_moves(&mut self, color: Color) -> Vec<Move> {
        movegen::legal_moves(self, color)
    }

    /// Applies `mv` at the game level: rejects it (returning `false`,
    /// leaving the board untouched) if it is not in `legal_moves`,
    /// otherwise commits it permanently and returns `true`. Unlike the
    /// internal `make`/`unmake` pair used by search, a committed `apply`
    /// is never undone — it grows `repetition_counts` for the life of the
    /// game.
    ///
    /// A promotion move with no promotion kind set is treated as Queen
    /// before the legality check, since `legal_moves` only ever enumerates
    /// promotions with an explicit kind and `make` defaults a missing one
    /// to Queen anyway — a bare UCI string like `"e7e8"` must be accepted
    /// the same as `"e7e8q"`.
    pub fn apply(&mut self, mv: Move) -> bool {
        let Some(mover) = self.piece_at(mv.from) else {
            return false;
        };
        let mv = movegen::with_default_promotion(self, mv);
        let legal = self.legal_moves(mover.color);
        if !legal.contains(&mv) {
            return false;
        }
        execute::make(self, mv);
        true
    }

    /// Resolves game-over status for `color_to_move`, checked in this
    /// priority order: insufficient material, checkmate, stalemate,
    /// fifty-move, threefold.
    pub fn game_over(&mut self, color_to_move: Color) -> (bool, GameOverReason) {
        status::game_over(self, color_to_move)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_has_32_pieces() {
        let mut b = Board::new();
        b.setup_initial_position();
        assert_eq!(b.pieces().count(), 32);
        assert_eq!(b.king_square(Color::White), Some(Square::new(0, 4)));
        assert_eq!(b.king_square(Color::Black), Some(Square::new(7, 4)));
    }

    #[test]
    fn initial_position_records_repetition() {
        let mut b = Board::new();
        b.setup_initial_position();
        assert_eq!(b.repetition_counts.len(), 1);
        assert!(b.repetition_counts.values().all(|&c| c == 1));
    }

    #[test]
    fn no_one_is_in_check_at_the_start() {
        let mut b = Board::new();
        b.setup_initial_position();
        assert!(!b.in_check(Color::White));
        assert!(!b.in_check(Color::Black));
    }

    #[test]
    fn opposite_color_round_trips() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }
}
