// Ficheiro: src/search/minimax.rs
// Descrição: Minimax com poda Alpha-Beta, aprofundamento iterativo e
// ordenação best-first, com os ramos da raiz distribuídos por um pool.
//
// Os limites alpha/beta são locais a cada ramo: a divisão da raiz não
// partilha limites entre ramos.

use super::deepening::{Branch, BranchSearch, Deepening, Round, BRANCH_DEPTH};
use crate::core::*;
use crate::engine::EngineConfig;
use crate::moves::MoveGenerator;
use crate::search::{CutoffTest, Evaluator};
use log::info;
use std::time::Instant;

/// Alpha-Beta dentro de um ramo: MAX joga nos níveis ímpares, MIN nos pares.
struct AlphaBeta {
    max_role: Role,
    min_role: Role,
}

impl AlphaBeta {
    fn max_value(&self, board: &mut Board, round: &Round<'_>, mut alpha: i32, beta: i32, depth: i32) -> i32 {
        if let Some(score) = round.leaf(board, depth, self.max_role) {
            return score;
        }
        let successors = round.generator.generate(board, self.max_role);
        if successors.is_empty() {
            return round.evaluator().evaluate(board, self.max_role);
        }

        let mut v = i32::MIN;
        for mv in &successors {
            board.apply(mv);
            v = v.max(self.min_value(board, round, alpha, beta, depth + 1));
            // um só tabuleiro por ramo: desfazer sempre ao recuar
            board.undo(mv);
            if v >= beta {
                break;
            }
            alpha = alpha.max(v);
        }
        v
    }

    fn min_value(&self, board: &mut Board, round: &Round<'_>, alpha: i32, mut beta: i32, depth: i32) -> i32 {
        // avaliado sempre do ponto de vista de MAX
        if let Some(score) = round.leaf(board, depth, self.max_role) {
            return score;
        }
        let successors = round.generator.generate(board, self.min_role);
        if successors.is_empty() {
            return round.evaluator().evaluate(board, self.max_role);
        }

        let mut v = i32::MAX;
        for mv in &successors {
            board.apply(mv);
            v = v.min(self.max_value(board, round, alpha, beta, depth + 1));
            board.undo(mv);
            if v <= alpha {
                break;
            }
            beta = beta.min(v);
        }
        v
    }
}

impl BranchSearch for AlphaBeta {
    fn search_branch(&self, board: &mut Board, round: &Round<'_>) -> i32 {
        // abaixo da raiz é a vez de MIN, com janela completa
        self.min_value(board, round, i32::MIN, i32::MAX, BRANCH_DEPTH)
    }
}

/// Busca de dois jogadores. Guarda a profundidade de corte entre decisões.
#[derive(Debug, Clone)]
pub struct MinimaxSearch {
    generator: MoveGenerator,
    cutoff: CutoffTest,
    max_threads: usize,
    cutoff_depth: i32,
}

impl MinimaxSearch {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_cutoff(config, CutoffTest::new(config.min_free_memory, config.search_time))
    }

    pub fn with_cutoff(config: &EngineConfig, cutoff: CutoffTest) -> Self {
        MinimaxSearch {
            generator: MoveGenerator::new(Evaluator::new(config.end_game_turn), config.max_explorations),
            cutoff,
            max_threads: config.max_threads,
            cutoff_depth: config.initial_depth,
        }
    }

    /// Profundidade em que a próxima decisão começa o aprofundamento.
    pub fn cutoff_depth(&self) -> i32 {
        self.cutoff_depth
    }

    pub fn set_cutoff_depth(&mut self, cutoff_depth: i32) {
        self.cutoff_depth = cutoff_depth;
    }

    /// Melhor lance para `max_role` segundo a avaliação, limitado pelo teste
    /// de corte. `None` se `max_role` não tem lances (abandono).
    pub fn decide(&mut self, max_role: Role, min_role: Role, board: &Board) -> Option<Move> {
        let start_time = Instant::now();

        let mut root = board.clone();
        let candidates = self.generator.generate(&mut root, max_role);
        if candidates.is_empty() {
            info!("MinimaxSearch: no moves for {}", max_role);
            return None;
        }

        // sub-árvores persistentes entre iterações
        let mut branches: Vec<Branch> = candidates.into_iter().map(|mv| Branch::new(board, mv)).collect();

        let deepening = Deepening {
            generator: &self.generator,
            cutoff: &self.cutoff,
            max_threads: self.max_threads,
            start_time,
        };
        let policy = AlphaBeta { max_role, min_role };
        let best = deepening.run(&policy, &mut branches, &mut self.cutoff_depth);

        info!(
            "MinimaxSearch: search took {}ms, maximum depth {}, best value {:?}",
            start_time.elapsed().as_millis(),
            self.cutoff_depth,
            best.map(|result| result.score)
        );

        best.map(|result| result.best_move)
    }
}
