use std::fmt::Debug;

use crate::algorithms::ConfigurationError;

pub mod crossover;
pub mod local_search;
pub mod mutation;
pub mod selection;
pub mod survival;

pub use crossover::CrossoverOperator;
pub use local_search::{Improvement, LocalSearch, LocalSearchOperator, LocalSearchPopulation};
pub use mutation::MutationOperator;
pub use selection::SelectionOperator;
pub use survival::SurvivalOperator;

pub trait GeneticOperator: Debug {
    fn name(&self) -> String;

    /// Checks the operator's parameters; called by the builder before a run.
    fn validate(&self) -> Result<(), ConfigurationError> {
        Ok(())
    }
}
