use std::fmt::Debug;

use crate::{
    algorithms::{ConfigurationError, validate_probability},
    genetic::Individual,
    operators::{GeneticOperator, MutationOperator},
    random::RandomGenerator,
};

/// Swaps two distinct positions of a sequence chromosome with probability `mutation_rate`.
#[derive(Clone, Debug)]
pub struct SwapMutation {
    pub mutation_rate: f64,
}

impl SwapMutation {
    pub fn new(mutation_rate: f64) -> Self {
        Self { mutation_rate }
    }
}

impl GeneticOperator for SwapMutation {
    fn name(&self) -> String {
        "SwapMutation".to_string()
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        validate_probability(self.mutation_rate, "Mutation rate")
    }
}

impl<G> MutationOperator<Vec<G>> for SwapMutation {
    fn mutate(&self, individual: &mut Individual<Vec<G>>, rng: &mut dyn RandomGenerator) {
        let len = individual.chromosome.len();
        if len < 2 || !rng.gen_bool(self.mutation_rate) {
            return;
        }
        let i = rng.gen_range_usize(0, len);
        let mut j = rng.gen_range_usize(0, len - 1);
        if j >= i {
            j += 1;
        }
        individual.chromosome.swap(i, j);
        individual.invalidate();
    }
}
