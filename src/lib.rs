// Motor Amazonas - Game of the Amazons Search Engine Library

pub mod core;
pub mod engine;
pub mod error;
pub mod moves;
pub mod search;

pub use crate::core::*;
pub use engine::{EngineConfig, Player};
pub use error::*;
