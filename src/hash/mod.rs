pub mod zobrist;

pub use zobrist::{hash, ZobristKeys};
