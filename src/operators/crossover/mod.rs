use crate::genetic::Individual;
use crate::operators::GeneticOperator;
use crate::random::RandomGenerator;

pub mod single_point;

pub use single_point::SinglePointCrossover;

pub trait CrossoverOperator<V>: GeneticOperator {
    /// Performs crossover between two parents to produce exactly two offspring.
    ///
    /// Deciding whether the recombination happens at all (crossover rate) belongs to
    /// the operator; when it does not, the offspring are plain copies of the parents.
    fn crossover(
        &self,
        parent_a: &Individual<V>,
        parent_b: &Individual<V>,
        rng: &mut dyn RandomGenerator,
    ) -> (Individual<V>, Individual<V>);
}
