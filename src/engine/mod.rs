pub mod config;
pub mod player;

pub use config::*;
pub use player::*;
