use std::time::{Duration, Instant};

use crate::algorithms::RunState;

/// Decides when a run stops and reports how far along it is.
///
/// The engine calls `update` at the start of every generation and after every
/// evaluation batch, then queries `is_terminated`.
pub trait TerminationCriterion {
    fn is_terminated(&self) -> bool;

    /// Fraction of the budget already consumed, in `[0, 1]`.
    fn progress(&self) -> f32;

    fn progress_percent(&self) -> f32 {
        self.progress() * 100.0
    }

    /// Human readable description of the budget left, used in progress logs.
    fn remaining(&self) -> String;

    fn update(&mut self, state: &RunState);
}

fn fraction(done: usize, total: usize) -> f32 {
    if total == 0 {
        1.0
    } else {
        (done as f32 / total as f32).min(1.0)
    }
}

/// Stops after a fixed number of generations.
#[derive(Clone, Debug)]
pub struct MaxGenerations {
    max_generations: usize,
    generation: usize,
}

impl MaxGenerations {
    pub fn new(max_generations: usize) -> Self {
        Self {
            max_generations,
            generation: 0,
        }
    }
}

impl TerminationCriterion for MaxGenerations {
    fn is_terminated(&self) -> bool {
        self.generation >= self.max_generations
    }

    fn progress(&self) -> f32 {
        fraction(self.generation, self.max_generations)
    }

    fn remaining(&self) -> String {
        format!(
            "{} generations",
            self.max_generations.saturating_sub(self.generation)
        )
    }

    fn update(&mut self, state: &RunState) {
        self.generation = state.generation;
    }
}

/// Stops once the problem has performed the given number of evaluations.
#[derive(Clone, Debug)]
pub struct MaxEvaluations {
    max_evaluations: usize,
    evaluations: usize,
}

impl MaxEvaluations {
    pub fn new(max_evaluations: usize) -> Self {
        Self {
            max_evaluations,
            evaluations: 0,
        }
    }
}

impl TerminationCriterion for MaxEvaluations {
    fn is_terminated(&self) -> bool {
        self.evaluations >= self.max_evaluations
    }

    fn progress(&self) -> f32 {
        fraction(self.evaluations, self.max_evaluations)
    }

    fn remaining(&self) -> String {
        format!(
            "{} evaluations",
            self.max_evaluations.saturating_sub(self.evaluations)
        )
    }

    fn update(&mut self, state: &RunState) {
        self.evaluations = state.evaluations;
    }
}

/// Wall-clock budget. The clock starts at construction and restarts when a run
/// begins, i.e. on an update with zero generations and zero evaluations.
#[derive(Clone, Debug)]
pub struct TimeBudget {
    budget: Duration,
    start: Instant,
}

impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl TerminationCriterion for TimeBudget {
    fn is_terminated(&self) -> bool {
        self.elapsed() >= self.budget
    }

    fn progress(&self) -> f32 {
        if self.budget.is_zero() {
            return 1.0;
        }
        (self.elapsed().as_secs_f32() / self.budget.as_secs_f32()).min(1.0)
    }

    fn remaining(&self) -> String {
        format!("{}s", self.budget.saturating_sub(self.elapsed()).as_secs())
    }

    fn update(&mut self, state: &RunState) {
        if *state == RunState::default() {
            self.start = Instant::now();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn state(generation: usize, evaluations: usize) -> RunState {
        RunState {
            generation,
            evaluations,
        }
    }

    #[rstest(
        generation, terminated, progress,
        case(0, false, 0.0),
        case(2, false, 0.5),
        case(4, true, 1.0),
        case(9, true, 1.0)
    )]
    fn test_max_generations(generation: usize, terminated: bool, progress: f32) {
        let mut criterion = MaxGenerations::new(4);
        criterion.update(&state(generation, 1000));
        assert_eq!(criterion.is_terminated(), terminated);
        assert_eq!(criterion.progress(), progress);
        assert_eq!(criterion.progress_percent(), progress * 100.0);
    }

    #[test]
    fn test_max_generations_remaining() {
        let mut criterion = MaxGenerations::new(10);
        criterion.update(&state(3, 0));
        assert_eq!(criterion.remaining(), "7 generations");
    }

    #[test]
    fn test_max_evaluations() {
        let mut criterion = MaxEvaluations::new(100);
        assert!(!criterion.is_terminated());
        criterion.update(&state(1, 40));
        assert_eq!(criterion.progress(), 0.4);
        assert_eq!(criterion.remaining(), "60 evaluations");
        criterion.update(&state(2, 120));
        assert!(criterion.is_terminated());
        assert_eq!(criterion.remaining(), "0 evaluations");
    }

    #[test]
    fn test_zero_budgets_are_terminated() {
        assert!(MaxGenerations::new(0).is_terminated());
        assert_eq!(MaxEvaluations::new(0).progress(), 1.0);
        let budget = TimeBudget::new(Duration::ZERO);
        assert!(budget.is_terminated());
        assert_eq!(budget.progress(), 1.0);
    }

    #[test]
    fn test_time_budget_running() {
        let budget = TimeBudget::new(Duration::from_secs(3600));
        assert!(!budget.is_terminated());
        assert!(budget.progress() < 0.01);
        assert!(budget.remaining().ends_with('s'));
    }

    #[test]
    fn test_time_budget_restarts_with_the_run() {
        let mut budget = TimeBudget::new(Duration::from_millis(100));
        std::thread::sleep(Duration::from_millis(150));
        assert!(budget.is_terminated());

        // Later counters leave the clock alone.
        budget.update(&state(1, 10));
        assert!(budget.is_terminated());

        budget.update(&RunState::default());
        assert!(!budget.is_terminated());
    }
}
