use std::fmt::Debug;

use ndarray::Array1;
use ordered_float::OrderedFloat;

use crate::genetic::{Population, PopulationFitness};
use crate::operators::{GeneticOperator, SurvivalOperator};

/// NSGA-II environmental selection: whole fronts first, crowding distance to split the last one.
#[derive(Clone, Debug, Default)]
pub struct RankCrowdingSurvival;

impl GeneticOperator for RankCrowdingSurvival {
    fn name(&self) -> String {
        "RankCrowdingSurvival".to_string()
    }
}

impl RankCrowdingSurvival {
    pub fn new() -> Self {
        Self {}
    }
}

impl<V> SurvivalOperator<V> for RankCrowdingSurvival {
    fn set_survival_score(&self, front: &mut Population<V>) {
        let distances = crowding_distance(&front.fitness());
        for (individual, distance) in front.iter_mut().zip(distances) {
            individual.crowding_distance = Some(distance);
        }
    }
}

/// Computes the crowding distance for a given Pareto population_fitness.
///
/// # Parameters:
/// - `population_fitness`: A 2D array where each row represents an individual's fitness values.
///
/// # Returns:
/// - A 1D array of crowding distances for each individual in the population_fitness.
///
/// Per objective the members are sorted stably (ties keep their row order), both
/// extremes get `f64::INFINITY` and interior members accumulate the normalized gap between
/// their neighbours. A zero range contributes nothing.
pub fn crowding_distance(population_fitness: &PopulationFitness) -> Array1<f64> {
    let num_individuals = population_fitness.nrows();
    let num_objectives = population_fitness.ncols();

    // Handle edge cases
    if num_individuals <= 2 {
        return Array1::from_elem(num_individuals, f64::INFINITY);
    }

    // Initialize distances to zero
    let mut distances = Array1::zeros(num_individuals);

    for obj_idx in 0..num_objectives {
        let objective_values = population_fitness.column(obj_idx);

        let mut sorted_indices: Vec<usize> = (0..num_individuals).collect();
        sorted_indices.sort_by_key(|&i| OrderedFloat(objective_values[i]));

        let first = sorted_indices[0];
        let last = sorted_indices[num_individuals - 1];
        distances[first] = f64::INFINITY;
        distances[last] = f64::INFINITY;

        // Get min and max values for normalization
        let range = objective_values[last] - objective_values[first];

        if range != 0.0 {
            for k in 1..(num_individuals - 1) {
                let next = objective_values[sorted_indices[k + 1]];
                let prev = objective_values[sorted_indices[k - 1]];
                distances[sorted_indices[k]] += (next - prev) / range;
            }
        }
    }

    distances
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use ndarray::array;

    use crate::genetic::{Individual, Objectives};
    use crate::non_dominated_sorting::Ranking;

    fn population(rows: &[Objectives]) -> Population<usize> {
        Population::from_individuals(
            rows.iter()
                .enumerate()
                .map(|(i, objectives)| {
                    let mut individual = Individual::new(i);
                    individual.set_objectives(objectives.clone());
                    individual
                })
                .collect(),
        )
    }

    #[test]
    /// Corner individuals get infinity; the middle one sums 0.5 + 0.5 across both objectives.
    fn test_crowding_distance() {
        let population_fitness = array![[1.0, 2.0], [2.0, 1.0], [1.5, 1.5], [3.0, 3.0]];
        let distances = crowding_distance(&population_fitness);
        let expected = array![f64::INFINITY, f64::INFINITY, 1.0, f64::INFINITY];
        assert_eq!(distances, expected);
    }

    #[test]
    fn test_crowding_distance_single_individual() {
        let population_fitness = array![[1.0, 2.0]];
        let distances = crowding_distance(&population_fitness);
        assert_eq!(distances, array![f64::INFINITY]);
    }

    #[test]
    fn test_crowding_distance_two_individuals() {
        let population_fitness = array![[1.0, 2.0], [2.0, 1.0]];
        let distances = crowding_distance(&population_fitness);
        assert_eq!(distances, array![f64::INFINITY, f64::INFINITY]);
    }

    #[test]
    fn test_crowding_distance_same_fitness_values() {
        // Stable sort: the first and last rows are the extremes.
        let population_fitness = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let distances = crowding_distance(&population_fitness);
        assert_eq!(distances, array![f64::INFINITY, 0.0, 0.0, 0.0, f64::INFINITY]);
    }

    #[test]
    fn test_crowding_distance_uneven_spacing() {
        // Objective 1 spans [0, 10], objective 2 is the mirror image.
        let population_fitness = array![[0.0, 10.0], [2.0, 8.0], [6.0, 4.0], [10.0, 0.0]];
        let distances = crowding_distance(&population_fitness);
        assert_eq!(distances[0], f64::INFINITY);
        assert_eq!(distances[3], f64::INFINITY);
        assert!((distances[1] - 1.2).abs() < 1e-12);
        assert!((distances[2] - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_set_survival_score() {
        let mut front = population(&[
            array![1.0, 4.0],
            array![2.0, 3.0],
            array![3.0, 2.0],
            array![4.0, 1.0],
        ]);
        let survivor = RankCrowdingSurvival::new();
        SurvivalOperator::<usize>::set_survival_score(&survivor, &mut front);
        let scores: Vec<f64> = front.iter().map(|i| i.crowding_distance.unwrap()).collect();
        assert_eq!(scores[0], f64::INFINITY);
        assert_eq!(scores[3], f64::INFINITY);
        // Each interior member gets 2/3 from both objectives.
        assert!((scores[1] - 4.0 / 3.0).abs() < 1e-12);
        assert!((scores[2] - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_survival_selection_all_survive_single_front() {
        let pop = population(&[array![0.1, 0.9], array![0.2, 0.8], array![0.3, 0.7]]);
        let ranking = Ranking::new(&pop);
        let survivor = RankCrowdingSurvival;
        assert_eq!(GeneticOperator::name(&survivor), "RankCrowdingSurvival");

        let survivors = survivor.operate(pop, &ranking, 3);
        assert_eq!(survivors.len(), 3);
        assert_eq!(
            survivors.iter().map(|i| i.chromosome).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(survivors.iter().all(|i| i.rank == Some(0)));
    }

    #[test]
    fn test_survival_selection_multiple_fronts() {
        // Front 0: individuals 0 and 1.
        // Front 1: individuals 2..=5, only two fit; 3 and 4 are interior on the
        // front, 2 and 5 are its extremes.
        let pop = population(&[
            array![0.0, 1.0],
            array![1.0, 0.0],
            array![1.0, 5.0],
            array![2.0, 4.0],
            array![3.0, 3.0],
            array![5.0, 1.0],
        ]);
        let ranking = Ranking::new(&pop);
        assert_eq!(ranking.number_of_fronts(), 2);

        let survivors = RankCrowdingSurvival.operate(pop, &ranking, 4);
        assert_eq!(survivors.len(), 4);
        assert_eq!(
            survivors.iter().map(|i| i.chromosome).collect::<Vec<_>>(),
            vec![0, 1, 2, 5]
        );
        assert_eq!(
            survivors.iter().map(|i| i.rank.unwrap()).collect::<Vec<_>>(),
            vec![0, 0, 1, 1]
        );
    }

    #[test]
    fn test_survival_keeps_population_size() {
        let rows: Vec<Objectives> = (0..20)
            .map(|i| array![(i % 7) as f64, ((i * 3) % 5) as f64])
            .collect();
        for n_survive in [1, 5, 10, 13, 20] {
            let pop = population(&rows);
            let ranking = Ranking::new(&pop);
            let survivors = RankCrowdingSurvival.operate(pop, &ranking, n_survive);
            assert_eq!(survivors.len(), n_survive);
            assert!(survivors.iter().all(|i| i.crowding_distance.is_some()));
        }
    }

    #[test]
    fn test_survival_single_individual() {
        let pop = population(&[array![1.0, 1.0]]);
        let ranking = Ranking::new(&pop);
        let survivors = RankCrowdingSurvival.operate(pop, &ranking, 1);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors.get(0).crowding_distance, Some(f64::INFINITY));
        assert_eq!(survivors.get(0).rank, Some(0));
    }
}
