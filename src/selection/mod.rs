pub mod mating;
pub mod replacement;

pub use mating::{MatingScope, MatingSelector};
pub use replacement::{ReplacementOutcome, ReplacementUpdater};
