use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::{
    genetic::{Individual, Population},
    non_dominated_sorting::Ranking,
    operators::GeneticOperator,
};

pub mod nsga2;

pub use nsga2::{RankCrowdingSurvival, crowding_distance};

/// Orders by descending crowding distance. Missing distances sort last.
pub fn crowding_comparator<V>(a: &Individual<V>, b: &Individual<V>) -> Ordering {
    let da = OrderedFloat(a.crowding_distance.unwrap_or(f64::NEG_INFINITY));
    let db = OrderedFloat(b.crowding_distance.unwrap_or(f64::NEG_INFINITY));
    db.cmp(&da)
}

/// The SurvivalOperator trait extends GeneticOperator and requires that concrete operators
/// provide a method for computing the survival score of one front.
pub trait SurvivalOperator<V>: GeneticOperator {
    /// Computes the survival score (e.g. crowding distance) for every member of `front`.
    fn set_survival_score(&self, front: &mut Population<V>);

    /// Selects the individuals that will survive to the next generation.
    ///
    /// `ranking` must have been computed on `population`. Fronts are admitted whole
    /// while they fit; the first front that does not fit is scored, stably sorted by
    /// `crowding_comparator` and cut to the remaining capacity.
    fn operate(
        &self,
        population: Population<V>,
        ranking: &Ranking,
        n_survive: usize,
    ) -> Population<V> {
        let mut slots: Vec<Option<Individual<V>>> = population.into_iter().map(Some).collect();
        let mut survivors = Population::new(n_survive);
        let mut remaining = n_survive;

        for (rank, indices) in ranking.fronts().iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let mut front = Population::from_individuals(
                indices
                    .iter()
                    .filter_map(|&i| slots[i].take())
                    .map(|mut individual| {
                        individual.rank = Some(rank);
                        individual
                    })
                    .collect(),
            );
            self.set_survival_score(&mut front);

            if front.len() <= remaining {
                // The entire front fits.
                remaining -= front.len();
                for individual in front {
                    survivors.add(individual);
                }
            } else {
                // Splitting front: only part of the front is needed.
                front.sort_by(crowding_comparator);
                front.truncate(remaining);
                remaining = 0;
                for individual in front {
                    survivors.add(individual);
                }
            }
        }
        survivors
    }
}
