// Ficheiro: src/search/state_space.rs
// Descrição: Busca de um só agente para quando o tabuleiro está fechado.
// Com os territórios separados os lances do adversário já não mexem no
// nosso score, por isso todos os nós maximizam para o mesmo lado e não há
// poda.

use super::deepening::{Branch, BranchSearch, Deepening, Round, BRANCH_DEPTH};
use crate::core::*;
use crate::engine::EngineConfig;
use crate::moves::MoveGenerator;
use crate::search::{CutoffTest, Evaluator};
use log::info;
use std::time::Instant;

struct Maximize {
    role: Role,
}

impl Maximize {
    fn max_value(&self, board: &mut Board, round: &Round<'_>, depth: i32) -> i32 {
        if let Some(score) = round.leaf(board, depth, self.role) {
            return score;
        }
        let successors = round.generator.generate(board, self.role);
        if successors.is_empty() {
            return round.evaluator().evaluate(board, self.role);
        }

        let mut v = i32::MIN;
        for mv in &successors {
            board.apply(mv);
            v = v.max(self.max_value(board, round, depth + 1));
            board.undo(mv);
        }
        v
    }
}

impl BranchSearch for Maximize {
    fn search_branch(&self, board: &mut Board, round: &Round<'_>) -> i32 {
        self.max_value(board, round, BRANCH_DEPTH)
    }
}

#[derive(Debug, Clone)]
pub struct StateSpaceSearch {
    generator: MoveGenerator,
    cutoff: CutoffTest,
    max_threads: usize,
    cutoff_depth: i32,
}

impl StateSpaceSearch {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_cutoff(config, CutoffTest::new(config.min_free_memory, config.search_time))
    }

    pub fn with_cutoff(config: &EngineConfig, cutoff: CutoffTest) -> Self {
        StateSpaceSearch {
            generator: MoveGenerator::new(Evaluator::new(config.end_game_turn), config.max_explorations),
            cutoff,
            max_threads: config.max_threads,
            cutoff_depth: config.initial_depth,
        }
    }

    pub fn cutoff_depth(&self) -> i32 {
        self.cutoff_depth
    }

    pub fn set_cutoff_depth(&mut self, cutoff_depth: i32) {
        self.cutoff_depth = cutoff_depth;
    }

    /// Melhor sequência de lances de `role` sozinho no tabuleiro; devolve o
    /// primeiro lance. `None` se `role` não tem lances.
    pub fn decide(&mut self, role: Role, board: &Board) -> Option<Move> {
        let start_time = Instant::now();

        let mut root = board.clone();
        let candidates = self.generator.generate(&mut root, role);
        if candidates.is_empty() {
            info!("StateSpaceSearch: no moves for {}", role);
            return None;
        }

        let mut branches: Vec<Branch> = candidates.into_iter().map(|mv| Branch::new(board, mv)).collect();

        let deepening = Deepening {
            generator: &self.generator,
            cutoff: &self.cutoff,
            max_threads: self.max_threads,
            start_time,
        };
        let best = deepening.run(&Maximize { role }, &mut branches, &mut self.cutoff_depth);

        info!(
            "StateSpaceSearch: search took {}ms, maximum depth {}, best value {:?}",
            start_time.elapsed().as_millis(),
            self.cutoff_depth,
            best.map(|result| result.score)
        );

        best.map(|result| result.best_move)
    }
}
