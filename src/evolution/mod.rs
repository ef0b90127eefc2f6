pub mod builder;
pub mod engine;
pub mod options;

pub use builder::MoeadBuilder;
pub use engine::{EngineState, GenerationReport, Moead};
pub use options::{MoeadOptions, MoeadOptionsBuilder, MATING_PARENTS};
