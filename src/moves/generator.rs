// Ficheiro: src/moves/generator.rs
// Descrição: Geração dos lances (deslize da dama + flecha) de um lado.
// Só uma parte dos lances é devolvida: lances estaticamente maus raramente
// se revelam bons nas Amazonas, e a largura da árvore fica limitada.

use crate::core::*;
use crate::search::Evaluator;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Lance ordenado apenas pelo score (empates sem ordem definida).
struct Ranked(Move);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.0.score == other.0.score
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.score.cmp(&other.0.score)
    }
}

/// Gera todos os lances de `role`, sem pontuação.
pub fn legal_moves(board: &Board, role: Role) -> Vec<Move> {
    let mut moves = Vec::with_capacity(256);

    for &origin in board.queens(role) {
        for &dir in &DIRECTIONS {
            let mut destination = origin.step(dir);
            while board.is_open(destination) {
                for &arrow_dir in &DIRECTIONS {
                    let mut arrow = destination.step(arrow_dir);
                    // a flecha pode passar pela casa que a dama acabou de deixar
                    while arrow.in_bounds() && (board.pos_free(arrow) || arrow == origin) {
                        moves.push(Move::new(role, origin, destination, arrow));
                        arrow = arrow.step(arrow_dir);
                    }
                }
                destination = destination.step(dir);
            }
        }
    }

    moves
}

#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator {
    evaluator: Evaluator,
    max_explorations: usize,
}

impl MoveGenerator {
    pub fn new(evaluator: Evaluator, max_explorations: usize) -> Self {
        MoveGenerator { evaluator, max_explorations }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn max_explorations(&self) -> usize {
        self.max_explorations
    }

    /// Os `max_explorations` melhores lances de `role`, do melhor para o pior.
    ///
    /// Cada candidato é aplicado, avaliado para `role` e desfeito; o tabuleiro
    /// volta ao estado de entrada.
    pub fn generate(&self, board: &mut Board, role: Role) -> Vec<Move> {
        let candidates = legal_moves(board, role);
        let mut heap = BinaryHeap::with_capacity(candidates.len());

        for mut mv in candidates {
            board.apply(&mv);
            mv.score = self.evaluator.evaluate(board, role);
            board.undo(&mv);
            heap.push(Ranked(mv));
        }

        let count = self.max_explorations.min(heap.len());
        let mut best = Vec::with_capacity(count);
        while best.len() < count {
            match heap.pop() {
                Some(Ranked(mv)) => best.push(mv),
                None => break,
            }
        }
        best
    }
}
