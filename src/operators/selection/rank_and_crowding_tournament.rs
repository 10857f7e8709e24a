use std::fmt::Debug;

use crate::genetic::Individual;
use crate::operators::{GeneticOperator, SelectionOperator, selection::DuelResult};
use crate::random::RandomGenerator;

/// NSGA-II binary tournament: feasibility, then lower rank, then larger crowding distance.
#[derive(Clone, Debug, Default)]
pub struct BinaryTournamentSelection;

impl BinaryTournamentSelection {
    pub fn new() -> Self {
        Self
    }
}

impl GeneticOperator for BinaryTournamentSelection {
    fn name(&self) -> String {
        "BinaryTournamentSelection".to_string()
    }
}

impl<V> SelectionOperator<V> for BinaryTournamentSelection {
    fn tournament_duel(
        &self,
        p1: &Individual<V>,
        p2: &Individual<V>,
        _rng: &mut dyn RandomGenerator,
    ) -> DuelResult {
        let p1_feasible = p1.is_feasible();
        let p2_feasible = p2.is_feasible();
        // Unranked individuals lose against ranked ones.
        let p1_rank = p1.rank.unwrap_or(usize::MAX);
        let p2_rank = p2.rank.unwrap_or(usize::MAX);
        let p1_cd = p1.crowding_distance.unwrap_or(0.0);
        let p2_cd = p2.crowding_distance.unwrap_or(0.0);

        if p1_feasible && !p2_feasible {
            DuelResult::LeftWins
        } else if p2_feasible && !p1_feasible {
            DuelResult::RightWins
        } else if p1_rank < p2_rank {
            DuelResult::LeftWins
        } else if p2_rank < p1_rank {
            DuelResult::RightWins
        } else if p1_cd > p2_cd {
            DuelResult::LeftWins
        } else if p1_cd < p2_cd {
            DuelResult::RightWins
        } else {
            DuelResult::Tie
        }
    }
}
