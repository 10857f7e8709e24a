use std::fmt::Debug;

use crate::{
    algorithms::{ConfigurationError, validate_probability},
    genetic::Individual,
    operators::{CrossoverOperator, GeneticOperator},
    random::RandomGenerator,
};

/// Single-point crossover for sequence chromosomes such as the operation list of a
/// test case. Parents may have different lengths; the cut point is drawn inside the
/// shorter one and the tails are exchanged.
#[derive(Clone, Debug)]
pub struct SinglePointCrossover {
    pub crossover_rate: f64,
}

impl SinglePointCrossover {
    pub fn new(crossover_rate: f64) -> Self {
        Self { crossover_rate }
    }
}

impl GeneticOperator for SinglePointCrossover {
    fn name(&self) -> String {
        "SinglePointCrossover".to_string()
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        validate_probability(self.crossover_rate, "Crossover rate")
    }
}

impl<G: Clone> CrossoverOperator<Vec<G>> for SinglePointCrossover {
    fn crossover(
        &self,
        parent_a: &Individual<Vec<G>>,
        parent_b: &Individual<Vec<G>>,
        rng: &mut dyn RandomGenerator,
    ) -> (Individual<Vec<G>>, Individual<Vec<G>>) {
        let min_len = parent_a.chromosome.len().min(parent_b.chromosome.len());
        if min_len < 2 || rng.gen_proability() > self.crossover_rate {
            // Keep parents as offspring
            return (parent_a.reproduce(), parent_b.reproduce());
        }

        let point = rng.gen_range_usize(1, min_len);
        let (head_a, tail_a) = parent_a.chromosome.split_at(point);
        let (head_b, tail_b) = parent_b.chromosome.split_at(point);

        let child_a: Vec<G> = head_a.iter().chain(tail_b).cloned().collect();
        let child_b: Vec<G> = head_b.iter().chain(tail_a).cloned().collect();

        (
            Individual::derive(child_a, parent_a),
            Individual::derive(child_b, parent_b),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::TestDummyRng;
    use ndarray::array;

    /// Fake generator returning a fixed probability and cut point.
    struct FakeRandom {
        dummy: TestDummyRng,
        probability: f64,
        point: usize,
    }

    impl RandomGenerator for FakeRandom {
        fn rng(&mut self) -> &mut dyn rand::RngCore {
            &mut self.dummy
        }
        fn gen_proability(&mut self) -> f64 {
            self.probability
        }
        fn gen_range_usize(&mut self, min: usize, max: usize) -> usize {
            assert!(min <= self.point && self.point < max);
            self.point
        }
    }

    fn parent(chromosome: Vec<u8>, objectives: [f64; 2]) -> Individual<Vec<u8>> {
        let mut individual = Individual::new(chromosome);
        individual.set_objectives(array![objectives[0], objectives[1]]);
        individual.rank = Some(0);
        individual
    }

    #[test]
    fn test_single_point_crossover_exchanges_tails() {
        let a = parent(vec![1, 2, 3, 4], [1.0, 2.0]);
        let b = parent(vec![5, 6, 7, 8, 9], [3.0, 4.0]);
        let mut rng = FakeRandom {
            dummy: TestDummyRng,
            probability: 0.1,
            point: 2,
        };

        let operator = SinglePointCrossover::new(0.9);
        assert_eq!(operator.name(), "SinglePointCrossover");
        let (c1, c2) = operator.crossover(&a, &b, &mut rng);

        assert_eq!(c1.chromosome, vec![1, 2, 7, 8, 9]);
        assert_eq!(c2.chromosome, vec![5, 6, 3, 4]);
        assert!(!c1.is_evaluated() && !c2.is_evaluated());
        // Each child inherits the estimate of the parent contributing its head.
        assert_eq!(c1.objectives(), a.objectives());
        assert_eq!(c2.objectives(), b.objectives());
        assert_eq!(c1.rank, None);
    }

    #[test]
    fn test_single_point_crossover_rate_not_met() {
        let a = parent(vec![1, 2, 3], [1.0, 2.0]);
        let b = parent(vec![4, 5, 6], [3.0, 4.0]);
        let mut rng = FakeRandom {
            dummy: TestDummyRng,
            probability: 0.95,
            point: 1,
        };

        let (c1, c2) = SinglePointCrossover::new(0.9).crossover(&a, &b, &mut rng);
        assert_eq!(c1.chromosome, a.chromosome);
        assert_eq!(c2.chromosome, b.chromosome);
        assert!(c1.is_evaluated(), "Plain copies keep their evaluation");
        assert_eq!(c1.rank, None);
    }

    #[test]
    fn test_single_point_crossover_short_parents() {
        let a = parent(vec![1], [1.0, 2.0]);
        let b = parent(vec![4, 5, 6], [3.0, 4.0]);
        let mut rng = FakeRandom {
            dummy: TestDummyRng,
            probability: 0.0,
            point: 1,
        };
        let (c1, c2) = SinglePointCrossover::new(1.0).crossover(&a, &b, &mut rng);
        assert_eq!(c1.chromosome, vec![1]);
        assert_eq!(c2.chromosome, vec![4, 5, 6]);
    }

    #[test]
    fn test_crossover_rate_out_of_range_is_rejected() {
        assert!(SinglePointCrossover::new(0.0).validate().is_ok());
        assert!(matches!(
            SinglePointCrossover::new(2.0).validate(),
            Err(ConfigurationError::InvalidParameter(_))
        ));
    }
}
