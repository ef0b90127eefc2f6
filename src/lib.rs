pub mod archive;
pub mod decomposition;
pub mod error;
pub mod evolution;
pub mod individual;
pub mod problem;
pub mod rng;
pub mod selection;
pub mod variation;

// Re-export commonly used types for convenience
pub use archive::{Archive, NoArchive, ParetoArchive};
pub use error::{MoeadError, OptionExt, Result, ResultExt};
pub use evolution::{EngineState, GenerationReport, Moead, MoeadBuilder, MoeadOptions};
pub use individual::{Individual, Population, SubproblemId};
pub use problem::{FnProblem, Problem};
pub use variation::{Bounds, Crossover, Mutation, Variation, VariationPipeline};
