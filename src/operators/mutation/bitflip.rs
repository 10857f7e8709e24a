use std::fmt::Debug;

use crate::{
    algorithms::{ConfigurationError, validate_probability},
    genetic::Individual,
    operators::{GeneticOperator, MutationOperator},
    random::RandomGenerator,
};

/// Flips every bit independently with probability `gene_mutation_rate`.
#[derive(Clone, Debug)]
pub struct BitFlipMutation {
    pub gene_mutation_rate: f64,
}

impl BitFlipMutation {
    pub fn new(gene_mutation_rate: f64) -> Self {
        Self { gene_mutation_rate }
    }
}

impl GeneticOperator for BitFlipMutation {
    fn name(&self) -> String {
        "BitFlipMutation".to_string()
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        validate_probability(self.gene_mutation_rate, "Gene mutation rate")
    }
}

impl MutationOperator<Vec<bool>> for BitFlipMutation {
    fn mutate(&self, individual: &mut Individual<Vec<bool>>, rng: &mut dyn RandomGenerator) {
        let mut flipped = false;
        for gene in individual.chromosome.iter_mut() {
            if rng.gen_bool(self.gene_mutation_rate) {
                *gene = !*gene;
                flipped = true;
            }
        }
        if flipped {
            individual.invalidate();
        }
    }
}
