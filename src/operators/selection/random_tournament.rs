use std::fmt::Debug;

use crate::genetic::Individual;
use crate::operators::{GeneticOperator, SelectionOperator, selection::DuelResult};
use crate::random::RandomGenerator;

/// Feasibility decides the duel; otherwise a coin flip does.
#[derive(Clone, Debug, Default)]
pub struct RandomSelection {}

impl RandomSelection {
    pub fn new() -> Self {
        Self {}
    }
}

impl GeneticOperator for RandomSelection {
    fn name(&self) -> String {
        "RandomSelection".to_string()
    }
}

impl<V> SelectionOperator<V> for RandomSelection {
    fn tournament_duel(
        &self,
        p1: &Individual<V>,
        p2: &Individual<V>,
        rng: &mut dyn RandomGenerator,
    ) -> DuelResult {
        let p1_feasible = p1.is_feasible();
        let p2_feasible = p2.is_feasible();

        // If exactly one is feasible, that one automatically wins:
        if p1_feasible && !p2_feasible {
            DuelResult::LeftWins
        } else if p2_feasible && !p1_feasible {
            DuelResult::RightWins
        } else if rng.gen_bool(0.5) {
            DuelResult::LeftWins
        } else {
            DuelResult::RightWins
        }
    }
}
