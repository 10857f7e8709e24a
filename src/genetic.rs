use std::cmp::Ordering;

use ndarray::{Array1, Array2};

/// Objective vector of one individual. Every objective is minimized.
pub type Objectives = Array1<f64>;

/// Type aliases to work with populations.
pub type PopulationFitness = Array2<f64>;
pub type PopulationViolations = Array1<f64>;

/// A candidate solution: a chromosome plus the bookkeeping the search attaches to it.
///
/// `objectives` and `constraint_violation` are written by the problem, `rank` by the
/// non-dominated sorting and `crowding_distance` by the survival operator.
#[derive(Clone, Debug, PartialEq)]
pub struct Individual<V> {
    pub chromosome: V,
    objectives: Objectives,
    constraint_violation: f64,
    evaluated: bool,
    pub rank: Option<usize>,
    pub crowding_distance: Option<f64>,
}

impl<V> Individual<V> {
    /// Fresh candidate, not yet evaluated.
    pub fn new(chromosome: V) -> Self {
        Self {
            chromosome,
            objectives: Array1::zeros(0),
            constraint_violation: 0.0,
            evaluated: false,
            rank: None,
            crowding_distance: None,
        }
    }

    /// Builds an offspring of `parent`. The parent's objectives and violation are
    /// carried over as an inherited estimate until the child is evaluated.
    pub fn derive<P>(chromosome: V, parent: &Individual<P>) -> Self {
        Self {
            chromosome,
            objectives: parent.objectives.clone(),
            constraint_violation: parent.constraint_violation,
            evaluated: false,
            rank: None,
            crowding_distance: None,
        }
    }

    /// Copy for the next generation: same chromosome and evaluation, no rank or distance.
    pub fn reproduce(&self) -> Self
    where
        V: Clone,
    {
        Self {
            rank: None,
            crowding_distance: None,
            ..self.clone()
        }
    }

    pub fn objectives(&self) -> &Objectives {
        &self.objectives
    }

    pub fn set_objectives(&mut self, objectives: Objectives) {
        self.objectives = objectives;
        self.evaluated = true;
    }

    pub fn constraint_violation(&self) -> f64 {
        self.constraint_violation
    }

    /// Non-negative amount of infeasibility. Negative input is clamped to zero.
    pub fn set_constraint_violation(&mut self, violation: f64) {
        self.constraint_violation = violation.max(0.0);
    }

    pub fn is_feasible(&self) -> bool {
        self.constraint_violation <= 0.0
    }

    /// Whether the objective vector was computed for the current chromosome.
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Marks the cached objectives as stale. Called by mutation operators.
    pub fn invalidate(&mut self) {
        self.evaluated = false;
    }
}

/// Ordered collection of individuals with a nominal capacity.
///
/// The capacity is only a hint: unions and offspring creation may exceed it until
/// environmental selection brings the size back.
#[derive(Clone, Debug, PartialEq)]
pub struct Population<V> {
    individuals: Vec<Individual<V>>,
    capacity: usize,
}

impl<V> Population<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn from_individuals(individuals: Vec<Individual<V>>) -> Self {
        let capacity = individuals.len();
        Self {
            individuals,
            capacity,
        }
    }

    pub fn add(&mut self, individual: Individual<V>) {
        self.individuals.push(individual);
    }

    pub fn get(&self, idx: usize) -> &Individual<V> {
        &self.individuals[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Individual<V> {
        &mut self.individuals[idx]
    }

    /// Replaces the individual at `idx`, returning the previous occupant.
    pub fn replace(&mut self, idx: usize, individual: Individual<V>) -> Individual<V> {
        std::mem::replace(&mut self.individuals[idx], individual)
    }

    pub fn clear(&mut self) {
        self.individuals.clear();
    }

    /// Returns the number of individuals in the population.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual<V>> {
        self.individuals.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Individual<V>> {
        self.individuals.iter_mut()
    }

    pub fn into_individuals(self) -> Vec<Individual<V>> {
        self.individuals
    }

    /// Stable in-place sort. Individuals comparing equal keep their relative order.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Individual<V>, &Individual<V>) -> Ordering,
    {
        self.individuals.sort_by(compare);
    }

    /// Keeps the first `len` individuals.
    pub fn truncate(&mut self, len: usize) {
        self.individuals.truncate(len);
    }

    /// Mutable references to the individuals at `indices`, in ascending index order.
    /// Duplicate indices are collapsed.
    pub fn select_mut(&mut self, indices: &[usize]) -> Vec<&mut Individual<V>> {
        let mut wanted = vec![false; self.individuals.len()];
        for &i in indices {
            wanted[i] = true;
        }
        self.individuals
            .iter_mut()
            .zip(wanted)
            .filter_map(|(individual, keep)| keep.then_some(individual))
            .collect()
    }

    /// Fitness matrix: one row per individual, one column per objective.
    ///
    /// All objective vectors must share the same length; see `check_objectives`.
    pub fn fitness(&self) -> PopulationFitness {
        let n_objectives = self.individuals.first().map_or(0, |i| i.objectives.len());
        Array2::from_shape_fn((self.len(), n_objectives), |(i, j)| {
            self.individuals[i].objectives[j]
        })
    }

    pub fn constraint_violations(&self) -> PopulationViolations {
        self.individuals
            .iter()
            .map(|i| i.constraint_violation)
            .collect()
    }

    /// Verifies every objective vector has `n_objectives` entries.
    pub fn check_objectives(&self, n_objectives: usize) -> Result<(), String> {
        match self
            .individuals
            .iter()
            .position(|i| i.objectives.len() != n_objectives)
        {
            Some(idx) => Err(format!(
                "individual {} has {} objectives, expected {}",
                idx,
                self.individuals[idx].objectives.len(),
                n_objectives
            )),
            None => Ok(()),
        }
    }
}

impl<V: Clone> Population<V> {
    /// Returns a new `Population` owning copies of the individuals at `indices`.
    pub fn selected(&self, indices: &[usize]) -> Population<V> {
        Population::from_individuals(
            indices
                .iter()
                .map(|&i| self.individuals[i].clone())
                .collect(),
        )
    }

    /// Returns a new `Population` containing only the individuals with rank = 0.
    /// If no ranking information is available, the entire population is returned.
    pub fn best(&self) -> Population<V> {
        if self.individuals.iter().any(|i| i.rank.is_some()) {
            let indices: Vec<usize> = self
                .individuals
                .iter()
                .enumerate()
                .filter_map(|(i, ind)| (ind.rank == Some(0)).then_some(i))
                .collect();
            self.selected(&indices)
        } else {
            self.clone()
        }
    }

    /// Union of both populations, `self` first. The result owns its individuals.
    pub fn union(&self, other: &Population<V>) -> Population<V> {
        let mut individuals = Vec::with_capacity(self.len() + other.len());
        individuals.extend(self.individuals.iter().cloned());
        individuals.extend(other.individuals.iter().cloned());
        Population {
            individuals,
            capacity: self.capacity + other.capacity,
        }
    }
}

impl<V> IntoIterator for Population<V> {
    type Item = Individual<V>;
    type IntoIter = std::vec::IntoIter<Individual<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Population<V> {
    type Item = &'a Individual<V>;
    type IntoIter = std::slice::Iter<'a, Individual<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
