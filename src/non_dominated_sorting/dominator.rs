use ndarray::{ArrayView1, Axis};
use rayon::prelude::*;

use crate::genetic::{Population, PopulationFitness, PopulationViolations};

/// Inlines the check for "does f1 dominate f2?" to reduce call overhead.
#[inline]
pub fn dominates(f1: &ArrayView1<f64>, f2: &ArrayView1<f64>) -> bool {
    let mut better = false;
    // We assume f1.len() == f2.len()
    for (&a, &b) in f1.iter().zip(f2.iter()) {
        if a > b {
            return false;
        } else if a < b {
            better = true;
        }
    }
    better
}

/// Constraint domination: the smaller violation wins outright (so feasible beats
/// infeasible); only equal violations fall back to Pareto dominance.
#[inline]
pub fn constrained_dominates(
    f1: &ArrayView1<f64>,
    v1: f64,
    f2: &ArrayView1<f64>,
    v2: f64,
) -> bool {
    if v1 < v2 {
        true
    } else if v1 > v2 {
        false
    } else {
        dominates(f1, f2)
    }
}

/// Fast Non-Dominated Sorting.
/// Returns a vector of fronts, each front is a list of indices in ascending order.
///
/// The pairwise comparisons run on the rayon pool, but their results are gathered
/// in index order, so the output only depends on the input.
pub fn fast_non_dominated_sorting(
    population_fitness: &PopulationFitness,
    violations: &PopulationViolations,
) -> Vec<Vec<usize>> {
    let population_size = population_fitness.nrows();
    if population_size == 0 {
        return Vec::new();
    }
    assert_eq!(
        population_size,
        violations.len(),
        "Fitness has {} rows but {} violations were given",
        population_size,
        violations.len()
    );

    // Precompute row views to avoid repeated indexing
    let fitness_rows: Vec<ArrayView1<f64>> = population_fitness.axis_iter(Axis(0)).collect();

    // For each p, the (dominator, dominated) pairs against every q > p.
    let pairwise: Vec<Vec<(usize, usize)>> = (0..population_size)
        .into_par_iter()
        .map(|p| {
            let mut local_updates = Vec::new();
            for q in (p + 1)..population_size {
                if constrained_dominates(
                    &fitness_rows[p],
                    violations[p],
                    &fitness_rows[q],
                    violations[q],
                ) {
                    local_updates.push((p, q));
                } else if constrained_dominates(
                    &fitness_rows[q],
                    violations[q],
                    &fitness_rows[p],
                    violations[p],
                ) {
                    local_updates.push((q, p));
                }
            }
            local_updates
        })
        .collect();

    let mut domination_count = vec![0usize; population_size];
    let mut dominated_sets: Vec<Vec<usize>> = vec![Vec::new(); population_size];
    for (dominator, dominated) in pairwise.into_iter().flatten() {
        dominated_sets[dominator].push(dominated);
        domination_count[dominated] += 1;
    }

    // Build the first front
    let first_front: Vec<usize> = (0..population_size)
        .filter(|&i| domination_count[i] == 0)
        .collect();

    let mut fronts = Vec::new();
    let mut current_front = first_front;
    while !current_front.is_empty() {
        let mut next_front = Vec::new();
        for &p in &current_front {
            for &q in &dominated_sets[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        next_front.sort_unstable();
        fronts.push(current_front);
        current_front = next_front;
    }

    fronts
}

/// The fronts of one population snapshot. Fronts are index views into that
/// snapshot; use `subfront` to obtain an owned copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranking {
    fronts: Vec<Vec<usize>>,
    population_size: usize,
}

impl Ranking {
    pub fn new<V>(population: &Population<V>) -> Self {
        let fronts = fast_non_dominated_sorting(
            &population.fitness(),
            &population.constraint_violations(),
        );
        Self {
            fronts,
            population_size: population.len(),
        }
    }

    pub fn number_of_fronts(&self) -> usize {
        self.fronts.len()
    }

    /// Indices of the members of front `index`.
    pub fn front(&self, index: usize) -> &[usize] {
        &self.fronts[index]
    }

    pub fn fronts(&self) -> &[Vec<usize>] {
        &self.fronts
    }

    /// Rank of every individual, indexed like the ranked population.
    pub fn ranks(&self) -> Vec<usize> {
        let mut ranks = vec![0; self.population_size];
        for (rank, front) in self.fronts.iter().enumerate() {
            for &i in front {
                ranks[i] = rank;
            }
        }
        ranks
    }

    /// Writes the rank of each member into `population`, which must be the ranked snapshot.
    pub fn assign_ranks<V>(&self, population: &mut Population<V>) {
        debug_assert_eq!(population.len(), self.population_size);
        for (rank, front) in self.fronts.iter().enumerate() {
            for &i in front {
                population.get_mut(i).rank = Some(rank);
            }
        }
    }

    /// Owned copy of front `index` with ranks set. Out-of-range indices yield an empty front.
    pub fn subfront<V: Clone>(&self, population: &Population<V>, index: usize) -> Population<V> {
        let Some(indices) = self.fronts.get(index) else {
            return Population::new(0);
        };
        let mut front = population.selected(indices);
        for individual in front.iter_mut() {
            individual.rank = Some(index);
        }
        front
    }
}
