//! FEN import/export. A convenience for seeding non-initial positions in
//! tests and the `cli` tool; not part of the engine-facing move
//! boundary, which only ever sees UCI move strings.

use std::fmt;

use super::{Board, CastlingRights, Color, Piece, PieceKind};
use crate::square::Square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenError(pub String);

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid FEN: {}", self.0)
    }
}

impl std::error::Error for FenError {}

impl Board {
    /// Loads a FEN position string, replacing `self` entirely. The
    /// halfmove clock and side-to-move fields of the FEN are consumed;
    /// side-to-move itself is not stored on `Board` (callers track whose
    /// turn it is), so it is used only to seed `repetition_counts`.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| FenError("missing piece placement field".into()))?;
        let side_field = fields.next().unwrap_or("w");
        let castling_field = fields.next().unwrap_or("-");
        let ep_field = fields.next().unwrap_or("-");
        let halfmove_field = fields.next().unwrap_or("0");

        let mut board = Board::new();

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError(format!(
                "expected 8 ranks, found {}",
                ranks.len()
            )));
        }
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let row = 7 - rank_from_top as u8;
            let mut col = 0u8;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as u8;
                    continue;
                }
                if col >= 8 {
                    return Err(FenError(format!("rank '{rank_str}' overflows 8 files")));
                }
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let kind = match c.to_ascii_lowercase() {
                    'p' => PieceKind::Pawn,
                    'n' => PieceKind::Knight,
                    'b' => PieceKind::Bishop,
                    'r' => PieceKind::Rook,
                    'q' => PieceKind::Queen,
                    'k' => PieceKind::King,
                    other => return Err(FenError(format!("unknown piece glyph '{other}'"))),
                };
                board.set(Square::new(row, col), Some(Piece::new(kind, color)));
                col += 1;
            }
            if col != 8 {
                return Err(FenError(format!("rank '{rank_str}' does not fill 8 files")));
            }
        }

        let side_to_move = match side_field {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError(format!("bad side-to-move field '{other}'"))),
        };

        let mut rights = CastlingRights::default();
        if castling_field != "-" {
            for c in castling_field.chars() {
                match c {
                    'K' => rights.white_kingside = true,
                    'Q' => rights.white_queenside = true,
                    'k' => rights.black_kingside = true,
                    'q' => rights.black_queenside = true,
                    other => return Err(FenError(format!("bad castling glyph '{other}'"))),
                }
            }
        }
        board.castling_rights = rights;

        board.en_passant_target = if ep_field == "-" {
            None
        } else {
            Some(
                Square::from_algebraic(ep_field)
                    .ok_or_else(|| FenError(format!("bad en passant field '{ep_field}'")))?,
            )
        };

        board.halfmove_clock = halfmove_field
            .parse()
            .map_err(|_| FenError(format!("bad halfmove clock '{halfmove_field}'")))?;

        let key = super::position_key(&board, side_to_move);
        board.repetition_counts.insert(key, 1);

        *self = board;
        Ok(())
    }

    /// Renders the position as FEN. The fullmove counter is not part of
    /// `Board`'s state, so `1` is always emitted for it, matching a fresh
    /// game.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for row in (0..8u8).rev() {
            let mut empty_run = 0u8;
            for col in 0..8u8 {
                match self.piece_at(Square::new(row, col)) {
                    Some(p) => {
                        if empty_run > 0 {
                            out.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        let c = match p.kind {
                            PieceKind::Pawn => 'p',
                            PieceKind::Knight => 'n',
                            PieceKind::Bishop => 'b',
                            PieceKind::Rook => 'r',
                            PieceKind::Queen => 'q',
                            PieceKind::King => 'k',
                        };
                        out.push(if p.color == Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        });
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                out.push((b'0' + empty_run) as char);
            }
            if row != 0 {
                out.push('/');
            }
        }

        out.push_str(" w ");

        let r = &self.castling_rights;
        if !(r.white_kingside || r.white_queenside || r.black_kingside || r.black_queenside) {
            out.push('-');
        } else {
            if r.white_kingside {
                out.push('K');
            }
            if r.white_queenside {
                out.push('Q');
            }
            if r.black_kingside {
                out.push('k');
            }
            if r.black_queenside {
                out.push('q');
            }
        }

        out.push(' ');
        match self.en_passant_target {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} 1", self.halfmove_clock));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_round_trips_through_fen() {
        let mut a = Board::new();
        a.setup_initial_position();
        let fen = a.to_fen();
        assert_eq!(
            fen,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );

        let mut b = Board::new();
        b.set_fen(&fen).unwrap();
        assert_eq!(a.pieces().collect::<Vec<_>>(), b.pieces().collect::<Vec<_>>());
        assert_eq!(a.castling_rights, b.castling_rights);
    }

    #[test]
    fn rejects_malformed_placement() {
        let mut b = Board::new();
        assert!(b.set_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn en_passant_field_round_trips() {
        let mut b = Board::new();
        b.set_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(b.en_passant_target, Square::from_algebraic("d6"));
    }
}
