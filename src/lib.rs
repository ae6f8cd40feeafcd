pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod output;

pub use config::{EngineConfig, SheetLayout};
pub use engine::RuleEngine;
pub use error::EngineError;
pub use grid::{CellValue, Grid, MemoryGrid};
