//! Zobrist hashing: a deterministically seeded key table and a
//! from-scratch hash recompute. The seed is fixed unconditionally —
//! there is no feature gate for swapping in a random one.

use once_cell::sync::OnceCell;
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::board::{Board, CastlingRights, Color, PieceKind};

const ZOBRIST_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

#[allow(dead_code)]
pub struct ZobristKeys {
    /// `[color][piece kind][square]`, color indexed White=0/Black=1,
    /// piece kind indexed by `PieceKind as usize`.
    pub piece: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// `[white_kingside, white_queenside, black_kingside, black_queenside]`.
    pub castling: [u64; 4],
    /// File a..h => 0..7.
    pub ep_file: [u64; 8],
}

fn non_zero(rng: &mut StdRng) -> u64 {
    let mut v = rng.next_u64();
    while v == 0 {
        v = rng.next_u64();
    }
    v
}

fn generate_keys() -> ZobristKeys {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut keys = ZobristKeys {
        piece: [[[0u64; 64]; 6]; 2],
        side_to_move: 0,
        castling: [0u64; 4],
        ep_file: [0u64; 8],
    };

    for color in keys.piece.iter_mut() {
        for kind in color.iter_mut() {
            for square in kind.iter_mut() {
                *square = non_zero(&mut rng);
            }
        }
    }
    for c in keys.castling.iter_mut() {
        *c = non_zero(&mut rng);
    }
    for f in keys.ep_file.iter_mut() {
        *f = non_zero(&mut rng);
    }
    keys.side_to_move = non_zero(&mut rng);

    keys
}

/// The global key table, generated once from the fixed seed.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(generate_keys)
}

fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

fn castling_indices(rights: &CastlingRights) -> [bool; 4] {
    [
        rights.white_kingside,
        rights.white_queenside,
        rights.black_kingside,
        rights.black_queenside,
    ]
}

/// From-scratch Zobrist hash of `board` with `side_to_move` to play: XORs
/// the key for every placed piece, every active castling right, the
/// en-passant target's file (if any), and the side-to-move key when the
/// second side (Black) is to move.
pub fn hash(board: &Board, side_to_move: Color) -> u64 {
    let keys = zobrist_keys();
    let mut h = 0u64;

    for (square, piece) in board.pieces() {
        h ^= keys.piece[color_index(piece.color)][piece.kind as usize][square.index()];
    }

    for (active, key) in castling_indices(&board.castling_rights)
        .iter()
        .zip(keys.castling.iter())
    {
        if *active {
            h ^= key;
        }
    }

    if let Some(ep) = board.en_passant_target {
        h ^= keys.ep_file[ep.col as usize];
    }

    if side_to_move == Color::Black {
        h ^= keys.side_to_move;
    }

    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn same_position_hashes_identically() {
        let mut a = Board::new();
        a.setup_initial_position();
        let mut b = Board::new();
        b.setup_initial_position();
        assert_eq!(hash(&a, Color::White), hash(&b, Color::White));
    }

    #[test]
    fn side_to_move_changes_the_hash() {
        let mut b = Board::new();
        b.setup_initial_position();
        assert_ne!(hash(&b, Color::White), hash(&b, Color::Black));
    }

    #[test]
    fn castling_rights_change_the_hash() {
        let mut b = Board::new();
        b.setup_initial_position();
        let with_rights = hash(&b, Color::White);
        b.castling_rights.white_kingside = false;
        let without_right = hash(&b, Color::White);
        assert_ne!(with_rights, without_right);
    }

    #[test]
    fn moving_a_piece_changes_the_hash() {
        let mut b = Board::new();
        b.setup_initial_position();
        let before = hash(&b, Color::White);
        b.set_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let after = hash(&b, Color::White);
        assert_ne!(before, after);
    }

    #[test]
    fn keys_are_stable_across_calls() {
        let keys_a = zobrist_keys();
        let keys_b = zobrist_keys();
        assert_eq!(keys_a.side_to_move, keys_b.side_to_move);
    }
}
