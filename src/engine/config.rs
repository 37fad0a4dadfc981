// Ficheiro: src/engine/config.rs
// Descrição: Configuração do motor. Os binários sobrepõem campos a partir
// da linha de comando.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Threads do pool de cada ronda de aprofundamento.
    pub max_threads: usize,
    /// Memória livre mínima (bytes) antes de cortar a busca.
    pub min_free_memory: u64,
    /// Tempo máximo de uma decisão.
    pub search_time: Duration,
    /// Máximo de sucessores analisados por nó.
    pub max_explorations: usize,
    /// Profundidade inicial do aprofundamento iterativo.
    pub initial_depth: i32,
    /// Turno a partir do qual entra a heurística de fim de jogo.
    pub end_game_turn: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_threads: num_cpus::get().max(1),
            min_free_memory: 5_000_000,
            search_time: Duration::from_millis(25_000),
            max_explorations: 3,
            initial_depth: 1,
            end_game_turn: 60,
        }
    }
}

impl EngineConfig {
    /// Aplica um par `--opção valor`. Devolve `false` se a opção não existe.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<bool, std::num::ParseIntError> {
        match name {
            "--threads" => self.max_threads = value.parse::<usize>()?.max(1),
            "--memory" => self.min_free_memory = value.parse()?,
            "--time-ms" => self.search_time = Duration::from_millis(value.parse()?),
            "--width" => self.max_explorations = value.parse()?,
            "--depth" => self.initial_depth = value.parse()?,
            "--end-game" => self.end_game_turn = value.parse()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
