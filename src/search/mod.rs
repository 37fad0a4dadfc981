pub mod cutoff;
pub mod deepening;
pub mod evaluation;
pub mod minimax;
pub mod state_space;

pub use cutoff::*;
pub use evaluation::*;
pub use minimax::*;
pub use state_space::*;
