use tracing::{Level, debug, enabled};

use crate::genetic::Population;

/// Minimum of every objective over the evaluated members of `population`.
///
/// Members whose objective vector does not match the first evaluated one are ignored.
pub fn minimum_objectives<V>(population: &Population<V>) -> Vec<f64> {
    let mut evaluated = population.iter().filter(|i| i.is_evaluated());
    let Some(first) = evaluated.next() else {
        return Vec::new();
    };
    let mut minimum = first.objectives().to_vec();
    for individual in evaluated {
        if individual.objectives().len() != minimum.len() {
            continue;
        }
        for (current, value) in minimum.iter_mut().zip(individual.objectives()) {
            *current = current.min(*value);
        }
    }
    minimum
}

/// Logs the per-objective minimum of the population at debug level.
pub fn log_minimum_objectives<V>(population: &Population<V>, generation: usize) {
    if !enabled!(Level::DEBUG) {
        return;
    }
    let minimum = minimum_objectives(population);
    let formatted = minimum
        .iter()
        .enumerate()
        .map(|(i, value)| format!("f{}={:.4}", i + 1, value))
        .collect::<Vec<_>>()
        .join(", ");
    debug!(generation, population = population.len(), "Minimum objectives: {}", formatted);
}
