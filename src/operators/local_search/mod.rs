use crate::{
    algorithms::ConfigurationError,
    genetic::{Individual, Population},
    operators::GeneticOperator,
    random::RandomGenerator,
};

/// Improves a single individual, e.g. by hill climbing on its chromosome.
///
/// Returns `None` when no better neighbour was found. The engine puts the returned
/// individual in place of the original and evaluates it there.
pub trait LocalSearchOperator<V>: GeneticOperator {
    fn improve(
        &mut self,
        individual: &Individual<V>,
        rng: &mut dyn RandomGenerator,
    ) -> Option<Individual<V>>;
}

/// Replacement produced by a population-level local search.
///
/// `slot` is the position of the improved member inside the front handed to
/// `improve_front`.
#[derive(Clone, Debug, PartialEq)]
pub struct Improvement<V> {
    pub slot: usize,
    pub individual: Individual<V>,
}

impl<V> Improvement<V> {
    pub fn new(slot: usize, individual: Individual<V>) -> Self {
        Self { slot, individual }
    }
}

/// Local search working on a whole Pareto front at once.
pub trait LocalSearchPopulation<V>: LocalSearchOperator<V> {
    fn improve_front(
        &mut self,
        front: &Population<V>,
        rng: &mut dyn RandomGenerator,
    ) -> Vec<Improvement<V>>;
}

/// The configured local-search operator, in exactly one of its two forms.
pub enum LocalSearch<V> {
    Individual(Box<dyn LocalSearchOperator<V>>),
    Population(Box<dyn LocalSearchPopulation<V>>),
}

impl<V> LocalSearch<V> {
    pub fn is_population(&self) -> bool {
        matches!(self, LocalSearch::Population(_))
    }

    pub fn name(&self) -> String {
        match self {
            LocalSearch::Individual(operator) => operator.name(),
            LocalSearch::Population(operator) => operator.name(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            LocalSearch::Individual(operator) => operator.validate(),
            LocalSearch::Population(operator) => operator.validate(),
        }
    }

    /// Single-individual improvement; both forms support it.
    pub fn improve(
        &mut self,
        individual: &Individual<V>,
        rng: &mut dyn RandomGenerator,
    ) -> Option<Individual<V>> {
        match self {
            LocalSearch::Individual(operator) => operator.improve(individual, rng),
            LocalSearch::Population(operator) => operator.improve(individual, rng),
        }
    }

    /// Front-level improvement, `None` for the single-individual form.
    pub fn improve_front(
        &mut self,
        front: &Population<V>,
        rng: &mut dyn RandomGenerator,
    ) -> Option<Vec<Improvement<V>>> {
        match self {
            LocalSearch::Individual(_) => None,
            LocalSearch::Population(operator) => Some(operator.improve_front(front, rng)),
        }
    }
}

impl<V> std::fmt::Debug for LocalSearch<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocalSearch::Individual(operator) => f.debug_tuple("Individual").field(operator).finish(),
            LocalSearch::Population(operator) => f.debug_tuple("Population").field(operator).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::NoopRandomGenerator;

    /// Sets the first gene to zero when it is not already.
    #[derive(Debug)]
    struct ZeroFirstGene;

    impl GeneticOperator for ZeroFirstGene {
        fn name(&self) -> String {
            "ZeroFirstGene".to_string()
        }
    }

    impl LocalSearchOperator<Vec<u8>> for ZeroFirstGene {
        fn improve(
            &mut self,
            individual: &Individual<Vec<u8>>,
            _rng: &mut dyn RandomGenerator,
        ) -> Option<Individual<Vec<u8>>> {
            if individual.chromosome.first().copied().unwrap_or(0) == 0 {
                return None;
            }
            let mut chromosome = individual.chromosome.clone();
            chromosome[0] = 0;
            Some(Individual::derive(chromosome, individual))
        }
    }

    impl LocalSearchPopulation<Vec<u8>> for ZeroFirstGene {
        fn improve_front(
            &mut self,
            front: &Population<Vec<u8>>,
            rng: &mut dyn RandomGenerator,
        ) -> Vec<Improvement<Vec<u8>>> {
            front
                .iter()
                .enumerate()
                .filter_map(|(slot, individual)| {
                    self.improve(individual, rng)
                        .map(|improved| Improvement::new(slot, improved))
                })
                .collect()
        }
    }

    #[test]
    fn test_individual_form() {
        let mut search: LocalSearch<Vec<u8>> = LocalSearch::Individual(Box::new(ZeroFirstGene));
        let mut rng = NoopRandomGenerator::new();
        assert!(!search.is_population());
        assert_eq!(search.name(), "ZeroFirstGene");

        let improved = search.improve(&Individual::new(vec![3, 1]), &mut rng);
        assert_eq!(improved.map(|i| i.chromosome), Some(vec![0, 1]));
        assert!(search.improve(&Individual::new(vec![0, 1]), &mut rng).is_none());

        let front = Population::from_individuals(vec![Individual::new(vec![1])]);
        assert!(search.improve_front(&front, &mut rng).is_none());
    }

    #[test]
    fn test_population_form() {
        let mut search: LocalSearch<Vec<u8>> = LocalSearch::Population(Box::new(ZeroFirstGene));
        let mut rng = NoopRandomGenerator::new();
        assert!(search.is_population());

        let front = Population::from_individuals(vec![
            Individual::new(vec![0, 2]),
            Individual::new(vec![5, 2]),
        ]);
        let improvements = search.improve_front(&front, &mut rng).unwrap_or_default();
        assert_eq!(improvements.len(), 1);
        assert_eq!(improvements[0].slot, 1);
        assert_eq!(improvements[0].individual.chromosome, vec![0, 2]);

        // The population form also offers single-individual improvement.
        assert!(search.improve(&Individual::new(vec![7]), &mut rng).is_some());
        assert!(format!("{:?}", search).starts_with("Population"));
    }
}
