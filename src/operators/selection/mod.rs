use crate::{
    genetic::{Individual, Population},
    operators::GeneticOperator,
    random::RandomGenerator,
};

pub mod random_tournament;
pub mod rank_and_crowding_tournament;

pub use random_tournament::RandomSelection;
pub use rank_and_crowding_tournament::BinaryTournamentSelection;

// Enum to represent the result of a tournament duel.
#[derive(Debug, PartialEq, Eq)]
pub enum DuelResult {
    LeftWins,
    RightWins,
    Tie,
}

pub trait SelectionOperator<V>: GeneticOperator {
    /// Tournament between 2 individuals.
    fn tournament_duel(
        &self,
        p1: &Individual<V>,
        p2: &Individual<V>,
        rng: &mut dyn RandomGenerator,
    ) -> DuelResult;

    /// Picks one parent and returns its index in `population`.
    ///
    /// Two participants are drawn uniformly (with replacement); a tie is broken by a
    /// fair coin. The population itself is never modified.
    fn select(&self, population: &Population<V>, rng: &mut dyn RandomGenerator) -> usize {
        let population_size = population.len();
        let left = rng.gen_range_usize(0, population_size);
        let right = rng.gen_range_usize(0, population_size);
        match self.tournament_duel(population.get(left), population.get(right), rng) {
            DuelResult::LeftWins => left,
            DuelResult::RightWins => right,
            DuelResult::Tie => {
                if rng.gen_bool(0.5) {
                    left
                } else {
                    right
                }
            }
        }
    }
}
