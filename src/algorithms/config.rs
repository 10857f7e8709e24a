use crate::algorithms::{ConfigurationError, validate_positive};

/// Strategy used to skip some evaluations by reusing the objectives of a parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FitnessInheritance {
    /// Every offspring is evaluated.
    #[default]
    None,
    /// Each offspring keeps its inherited objectives with a fixed probability.
    Uniform,
    /// Evaluation is spread between the Pareto frontier of the parents and the rest.
    Fronteer,
}

/// How many individuals a local-search generation improves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LocalSearchCount {
    Absolute(usize),
    /// Fraction of the population size, clamped to `[0, 1]`.
    Fraction(f32),
}

impl LocalSearchCount {
    pub fn resolve(&self, population_size: usize) -> usize {
        match *self {
            LocalSearchCount::Absolute(n) => n,
            LocalSearchCount::Fraction(p) => (population_size as f32 * p.clamp(0.0, 1.0)) as usize,
        }
    }
}

impl Default for LocalSearchCount {
    fn default() -> Self {
        LocalSearchCount::Absolute(0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Nsga2Config {
    pub population_size: usize,
    pub inheritance: FitnessInheritance,
    /// Local search runs on generations that are a multiple of this period.
    pub local_search_period: usize,
    /// Zero means "the whole frontier" for population-level operators.
    pub local_search_count: LocalSearchCount,
    pub seed: Option<u64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            inheritance: FitnessInheritance::None,
            local_search_period: 20,
            local_search_count: LocalSearchCount::default(),
            seed: None,
        }
    }
}

impl Nsga2Config {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_positive(self.population_size, "Population size")?;
        validate_positive(self.local_search_period, "Local search period")?;
        if let LocalSearchCount::Fraction(p) = self.local_search_count {
            if p.is_nan() {
                return Err(ConfigurationError::InvalidParameter(
                    "Local search fraction must be a number".to_string(),
                ));
            }
        }
        Ok(())
    }
}
