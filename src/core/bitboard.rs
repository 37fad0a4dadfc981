// Ficheiro: src/core/bitboard.rs
// Descrição: Operações básicas de bitboard para o tabuleiro 10x10.
// Performance crítica: usadas em todas as avaliações.

use super::types::{Bitboard, Square};

/// Conta o número de bits setados (popcount)
#[inline(always)]
pub fn popcount(bb: Bitboard) -> u32 {
    bb.count_ones()
}

/// Verifica se a casa está marcada no bitboard
#[inline(always)]
pub fn contains(bb: Bitboard, square: Square) -> bool {
    bb & square.bit() != 0
}
