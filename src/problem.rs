use crate::genetic::Individual;
use crate::random::RandomGenerator;

/// Failure reported by a [`Problem`] while building or evaluating candidates.
#[derive(Debug, thiserror::Error)]
pub enum EvaluatorError {
    #[error("Evaluation failed: {0}")]
    Failed(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The optimization problem: knows how to create candidate test suites and how to
/// score them. Every objective is minimized.
pub trait Problem {
    type Chromosome;

    /// Creates a fresh, not yet evaluated candidate.
    fn build_candidate(&mut self, rng: &mut dyn RandomGenerator) -> Individual<Self::Chromosome>;

    /// Computes the objectives of every individual in the batch through
    /// `Individual::set_objectives`. Returns the number of evaluations performed,
    /// which the engine adds to its evaluation counter.
    fn evaluate(
        &mut self,
        individuals: &mut [&mut Individual<Self::Chromosome>],
    ) -> Result<usize, EvaluatorError>;

    /// Computes the constraint violation of a single individual.
    fn evaluate_constraints(
        &mut self,
        individual: &mut Individual<Self::Chromosome>,
    ) -> Result<(), EvaluatorError>;

    fn number_of_objectives(&self) -> usize;

    /// Informs the problem about the generation being processed and the run progress in `[0, 1]`.
    fn set_current_generation(&mut self, _generation: usize, _progress: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluator_error_messages() {
        let failed = EvaluatorError::Failed("timeout".to_string());
        assert_eq!(failed.to_string(), "Evaluation failed: timeout");

        let other: EvaluatorError = anyhow::anyhow!("classloader crashed").into();
        assert_eq!(other.to_string(), "classloader crashed");
    }
}
