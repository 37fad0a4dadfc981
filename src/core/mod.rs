pub mod bitboard;
pub mod board;
pub mod types;

pub use bitboard::*;
pub use board::*;
pub use types::*;
