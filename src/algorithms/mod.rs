use std::fmt;

use crate::problem::EvaluatorError;

mod config;
mod nsga2;

pub use config::{FitnessInheritance, LocalSearchCount, Nsga2Config};
pub use nsga2::{Nsga2, Nsga2Builder};

/// Stage of the run in which an error surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initialization,
    OffspringEvaluation,
    LocalSearch,
    Ranking,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initialization => "initialization",
            Phase::OffspringEvaluation => "offspring evaluation",
            Phase::LocalSearch => "local search",
            Phase::Ranking => "ranking",
        };
        f.write_str(name)
    }
}

/// Rejected configuration, reported before any evaluation takes place.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Missing operator: {0}")]
    MissingOperator(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum Nsga2Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Error during {phase}: {source}")]
    Evaluation {
        phase: Phase,
        source: EvaluatorError,
    },
    #[error("Invariant violated during {phase}: {message}")]
    InvariantViolation { phase: Phase, message: String },
}

// Helper function for probability validation
pub(crate) fn validate_probability(value: f64, name: &str) -> Result<(), ConfigurationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigurationError::InvalidParameter(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

// Helper function for positive integer validation
fn validate_positive(value: usize, name: &str) -> Result<(), ConfigurationError> {
    if value == 0 {
        return Err(ConfigurationError::InvalidParameter(format!(
            "{} must be greater than 0",
            name
        )));
    }
    Ok(())
}

/// Counters of the run in progress, shared with the termination criterion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunState {
    pub generation: usize,
    pub evaluations: usize,
}
