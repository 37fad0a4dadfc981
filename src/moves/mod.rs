// Ficheiro: src/moves/mod.rs
// Descrição: Declara os submódulos de geração e validação de lances.

pub mod generator;
pub mod validator;

pub use generator::*;
pub use validator::*;
