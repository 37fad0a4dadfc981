// Ficheiro: src/search/deepening.rs
// Descrição: Aprofundamento iterativo paralelo na raiz, partilhado pelas duas buscas.
//
// Cada lance da raiz é um ramo com o seu próprio tabuleiro (clone + lance
// aplicado) que persiste entre iterações. Em cada ronda um pool de threads
// novo procura todos os ramos até à profundidade alvo; a ronda só é aceite
// se nenhum ramo foi cortado por recursos, exceto a primeira.

use crate::core::*;
use crate::moves::MoveGenerator;
use crate::search::{CutoffTest, Evaluator};
use crossbeam::utils::CachePadded;
use log::{debug, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::time::Instant;

/// Profundidade do primeiro nó abaixo da raiz. Os resultados da
/// profundidade 1 são recolhidos pelo próprio driver.
pub(crate) const BRANCH_DEPTH: i32 = 2;

/// Estado partilhado por todos os ramos numa ronda. Escrito em concorrência,
/// lido só depois do pool terminar.
#[derive(Default)]
pub(crate) struct RoundTrackers {
    max_depth: CachePadded<AtomicI32>,
    cutoff_hit: CachePadded<AtomicBool>,
}

impl RoundTrackers {
    fn reset(&self) {
        self.max_depth.store(1, Ordering::Relaxed);
        self.cutoff_hit.store(false, Ordering::Relaxed);
    }

    fn reach(&self, depth: i32) {
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    fn signal_cutoff(&self) {
        self.cutoff_hit.store(true, Ordering::Relaxed);
    }

    fn max_depth(&self) -> i32 {
        self.max_depth.load(Ordering::Relaxed)
    }

    fn cutoff_hit(&self) -> bool {
        self.cutoff_hit.load(Ordering::Relaxed)
    }
}

/// Tudo o que um ramo precisa durante uma ronda.
pub(crate) struct Round<'a> {
    pub target_depth: i32,
    pub start_time: Instant,
    pub generator: &'a MoveGenerator,
    pub cutoff: &'a CutoffTest,
    trackers: &'a RoundTrackers,
}

impl<'a> Round<'a> {
    pub fn new(
        target_depth: i32,
        start_time: Instant,
        generator: &'a MoveGenerator,
        cutoff: &'a CutoffTest,
        trackers: &'a RoundTrackers,
    ) -> Self {
        Round { target_depth, start_time, generator, cutoff, trackers }
    }

    #[inline]
    pub fn evaluator(&self) -> &Evaluator {
        self.generator.evaluator()
    }

    /// Regista a profundidade e decide se o nó é folha. Devolve a avaliação
    /// para `role` quando o teste de corte dispara ou a profundidade alvo foi
    /// atingida.
    #[inline]
    pub fn leaf(&self, board: &Board, depth: i32, role: Role) -> Option<i32> {
        self.trackers.reach(depth);
        if self.cutoff.cutoff(depth, self.start_time) {
            self.trackers.signal_cutoff();
            return Some(self.evaluator().evaluate(board, role));
        }
        if depth >= self.target_depth {
            return Some(self.evaluator().evaluate(board, role));
        }
        None
    }
}

/// Política de busca aplicada a cada ramo da raiz.
pub(crate) trait BranchSearch: Sync {
    /// Valor do tabuleiro do ramo (já com o lance da raiz aplicado).
    /// O tabuleiro tem de voltar ao estado de entrada.
    fn search_branch(&self, board: &mut Board, round: &Round<'_>) -> i32;
}

/// Um lance da raiz e o tabuleiro privado onde já foi aplicado.
pub(crate) struct Branch {
    board: Board,
    root_move: Move,
}

impl Branch {
    pub fn new(root: &Board, root_move: Move) -> Self {
        let mut board = root.clone();
        board.apply(&root_move);
        Branch { board, root_move }
    }

    fn search<S: BranchSearch>(&mut self, policy: &S, round: &Round<'_>) -> SearchResult {
        let score = policy.search_branch(&mut self.board, round);
        SearchResult::new(score, self.root_move)
    }
}

/// Parâmetros fixos de uma decisão.
pub(crate) struct Deepening<'a> {
    pub generator: &'a MoveGenerator,
    pub cutoff: &'a CutoffTest,
    pub max_threads: usize,
    pub start_time: Instant,
}

impl Deepening<'_> {
    /// Corre rondas sucessivas sobre `branches` e devolve o melhor resultado
    /// aceite. `cutoff_depth` sai recuado em dois para a próxima decisão.
    pub fn run<S: BranchSearch>(
        &self,
        policy: &S,
        branches: &mut [Branch],
        cutoff_depth: &mut i32,
    ) -> Option<SearchResult> {
        let trackers = RoundTrackers::default();
        let mut global_best: Option<SearchResult> = None;

        loop {
            trackers.reset();
            let round = Round::new(*cutoff_depth, self.start_time, self.generator, self.cutoff, &trackers);

            let local_best = self.run_round(policy, branches, &round);

            // só se aceita a ronda se nenhum ramo foi cortado; a primeira
            // é sempre aceite para nunca ficar sem lance
            if !trackers.cutoff_hit() || global_best.is_none() {
                if let Some(local) = local_best {
                    global_best = Some(local);
                }
            }

            debug!(
                "round target={} reached={} cutoff={} best={:?}",
                *cutoff_depth,
                trackers.max_depth(),
                trackers.cutoff_hit(),
                global_best.map(|best| best.score)
            );

            *cutoff_depth += 1;

            // se não chegámos à profundidade alvo, uma mais funda também não chega
            if trackers.cutoff_hit() || trackers.max_depth() < *cutoff_depth - 1 {
                break;
            }
        }

        *cutoff_depth -= 2;
        global_best
    }

    fn run_round<S: BranchSearch>(
        &self,
        policy: &S,
        branches: &mut [Branch],
        round: &Round<'_>,
    ) -> Option<SearchResult> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_threads.max(1))
            .thread_name(|i| format!("amazonas-search-{}", i))
            .build();

        let results: Vec<SearchResult> = match pool {
            Ok(pool) => pool.install(|| {
                branches
                    .par_iter_mut()
                    .with_max_len(1)
                    .map(|branch| branch.search(policy, round))
                    .collect()
            }),
            Err(err) => {
                warn!("failed to build search pool ({}), searching on the caller thread", err);
                branches.iter_mut().map(|branch| branch.search(policy, round)).collect()
            }
        };

        // ordem dos ramos preservada: no empate ganha o primeiro
        results.into_iter().fold(None, SearchResult::combine)
    }
}
