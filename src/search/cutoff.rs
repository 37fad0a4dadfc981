// Ficheiro: src/search/cutoff.rs
// Descrição: Teste de corte por recursos: memória livre e tempo de parede.
// Consultado a cada chamada recursiva, nunca preemptivo.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use sysinfo::System;

/// Intervalo mínimo entre leituras de /proc (ou equivalente).
const REFRESH_INTERVAL: Duration = Duration::from_millis(50);

/// Fonte da memória disponível, em bytes.
pub trait MemoryProbe: Send + Sync {
    fn available_memory(&self) -> u64;
}

/// Memória disponível do sistema via `sysinfo`, com cache.
pub struct SystemMemory {
    system: Mutex<(System, Instant)>,
    cached: AtomicU64,
}

impl SystemMemory {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_memory();
        let available = system.available_memory();
        SystemMemory {
            system: Mutex::new((system, Instant::now())),
            cached: AtomicU64::new(available),
        }
    }
}

impl Default for SystemMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for SystemMemory {
    fn available_memory(&self) -> u64 {
        // Quem não apanha o lock usa o último valor lido
        if let Ok(mut guard) = self.system.try_lock() {
            let (system, refreshed_at) = &mut *guard;
            if refreshed_at.elapsed() >= REFRESH_INTERVAL {
                system.refresh_memory();
                self.cached.store(system.available_memory(), Ordering::Relaxed);
                *refreshed_at = Instant::now();
            }
        }
        self.cached.load(Ordering::Relaxed)
    }
}

#[derive(Clone)]
pub struct CutoffTest {
    min_free_memory: u64,
    search_time: Duration,
    probe: Arc<dyn MemoryProbe>,
}

impl CutoffTest {
    pub fn new(min_free_memory: u64, search_time: Duration) -> Self {
        Self::with_probe(min_free_memory, search_time, Arc::new(SystemMemory::new()))
    }

    pub fn with_probe(min_free_memory: u64, search_time: Duration, probe: Arc<dyn MemoryProbe>) -> Self {
        CutoffTest { min_free_memory, search_time, probe }
    }

    pub fn search_time(&self) -> Duration {
        self.search_time
    }

    /// Se a busca deve parar de aprofundar este ramo.
    /// `_depth` não entra no teste: o corte é só por recursos.
    #[inline]
    pub fn cutoff(&self, _depth: i32, start_time: Instant) -> bool {
        if self.probe.available_memory() <= self.min_free_memory {
            return true;
        }
        start_time.elapsed() >= self.search_time
    }
}

impl std::fmt::Debug for CutoffTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CutoffTest")
            .field("min_free_memory", &self.min_free_memory)
            .field("search_time", &self.search_time)
            .finish()
    }
}
