use tracing::{debug, debug_span, info, instrument};

use crate::{
    algorithms::{
        ConfigurationError, FitnessInheritance, Nsga2Config, Nsga2Error, Phase, RunState,
    },
    callback::{CallbackId, Callbacks, ProgressCallback},
    genetic::{Individual, Population},
    helpers::printer::log_minimum_objectives,
    non_dominated_sorting::Ranking,
    operators::{
        CrossoverOperator, GeneticOperator, LocalSearch, MutationOperator, SelectionOperator,
        SurvivalOperator,
        survival::RankCrowdingSurvival,
    },
    problem::Problem,
    random::{RandomGenerator, SearchRandomGenerator},
    termination::TerminationCriterion,
};

/// Probability that an offspring keeps the objectives inherited from its parent.
const INHERIT_PROBABILITY: f32 = 0.55;

/// Weight of the frontier when spreading evaluations under `FitnessInheritance::Fronteer`.
const FRONTEER_WEIGHT: f32 = 0.5;

/// NSGA-II evolving test suites for `P`.
///
/// One instance models one run at a time: `execute` resets the run state, so calling
/// it again starts a new search from a fresh initial population.
pub struct Nsga2<P, T, Sel, Cross, Mut>
where
    P: Problem,
    T: TerminationCriterion,
    Sel: SelectionOperator<P::Chromosome>,
    Cross: CrossoverOperator<P::Chromosome>,
    Mut: MutationOperator<P::Chromosome>,
{
    problem: P,
    termination: T,
    selector: Sel,
    crossover: Cross,
    mutation: Mut,
    survivor: RankCrowdingSurvival,
    local_search: Option<LocalSearch<P::Chromosome>>,
    config: Nsga2Config,
    local_search_count: usize,
    callbacks: Callbacks,
    rng: Box<dyn RandomGenerator>,
    state: RunState,
}

impl<P, T, Sel, Cross, Mut> Nsga2<P, T, Sel, Cross, Mut>
where
    P: Problem,
    P::Chromosome: Clone,
    T: TerminationCriterion,
    Sel: SelectionOperator<P::Chromosome>,
    Cross: CrossoverOperator<P::Chromosome>,
    Mut: MutationOperator<P::Chromosome>,
{
    /// Runs the search until the termination criterion fires and returns the first
    /// non-dominated front of the final population, with crowding distances set.
    #[instrument(level = "info", skip(self), fields(population_size = self.config.population_size))]
    pub fn execute(&mut self) -> Result<Population<P::Chromosome>, Nsga2Error> {
        let population_size = self.config.population_size;
        self.state = RunState::default();
        self.termination.update(&self.state);

        let mut population = {
            let _span = debug_span!("nsga.initialization").entered();
            self.problem.set_current_generation(0, 0.0);
            info!(
                progress_percent = self.termination.progress_percent(),
                remaining = %self.termination.remaining(),
                "Creating initial population"
            );
            let mut population = Population::new(population_size);
            for _ in 0..population_size {
                population.add(self.problem.build_candidate(self.rng.as_mut()));
            }
            population
        };

        {
            let _span = debug_span!("nsga.execution").entered();
            info!(
                progress_percent = self.termination.progress_percent(),
                generation = 0,
                remaining = %self.termination.remaining(),
                "Evaluating initial population"
            );
            let all: Vec<usize> = (0..population.len()).collect();
            self.evaluate(&mut population, &all, Phase::Initialization)?;
        }

        while !self.termination.is_terminated() {
            self.state.generation += 1;
            let generation = self.state.generation;
            self.problem
                .set_current_generation(generation, self.termination.progress());
            self.termination.update(&self.state);
            self.callbacks.notify(&self.termination);

            info!(
                progress_percent = self.termination.progress_percent(),
                generation,
                remaining = %self.termination.remaining(),
                "Generation started"
            );
            log_minimum_objectives(&population, generation);

            if generation % self.config.local_search_period == 0 {
                if let Some(mut local_search) = self.local_search.take() {
                    let outcome = self.local_search_step(&mut population, &mut local_search);
                    self.local_search = Some(local_search);
                    outcome?;
                    continue;
                }
            }

            let mut offspring = {
                let _span = debug_span!("nsga.offspring_creation").entered();
                self.create_offspring(&population)
            };

            let (parents_to_evaluate, offspring_to_evaluate) = {
                let _span = debug_span!("nsga.fitness_inheritance").entered();
                self.select_for_evaluation(&population, &offspring)?
            };

            {
                let _span = debug_span!("nsga.execution").entered();
                self.evaluate(
                    &mut population,
                    &parents_to_evaluate,
                    Phase::OffspringEvaluation,
                )?;
                self.evaluate(
                    &mut offspring,
                    &offspring_to_evaluate,
                    Phase::OffspringEvaluation,
                )?;
            }

            let union = {
                let _span = debug_span!("nsga.union").entered();
                let mut individuals = population.into_individuals();
                individuals.extend(offspring);
                Population::from_individuals(individuals)
            };

            let ranking = {
                let _span = debug_span!("nsga.ranking").entered();
                self.check_objectives(&union, Phase::Ranking)?;
                Ranking::new(&union)
            };

            population = {
                let _span = debug_span!("nsga.selection").entered();
                self.survivor.operate(union, &ranking, population_size)
            };
        }

        info!(
            generations = self.state.generation,
            evaluations = self.state.evaluations,
            "Search finished"
        );

        self.check_objectives(&population, Phase::Ranking)?;
        let ranking = Ranking::new(&population);
        let mut front = ranking.subfront(&population, 0);
        self.survivor.set_survival_score(&mut front);
        Ok(front)
    }

    /// Adds a progress callback, notified at the start of every generation and again
    /// before the per-member local-search loop.
    pub fn register(&mut self, callback: Box<dyn ProgressCallback>) -> CallbackId {
        self.callbacks.register(callback)
    }

    pub fn unregister(&mut self, id: CallbackId) -> bool {
        self.callbacks.unregister(id)
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn termination(&self) -> &T {
        &self.termination
    }

    pub fn config(&self) -> &Nsga2Config {
        &self.config
    }

    /// Counters of the last (or current) run.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Evaluates objectives, then constraints, of the individuals at `indices`.
    fn evaluate(
        &mut self,
        population: &mut Population<P::Chromosome>,
        indices: &[usize],
        phase: Phase,
    ) -> Result<(), Nsga2Error> {
        if indices.is_empty() {
            return Ok(());
        }
        let mut batch = population.select_mut(indices);
        let performed = self
            .problem
            .evaluate(&mut batch)
            .map_err(|source| Nsga2Error::Evaluation { phase, source })?;
        for individual in batch.iter_mut() {
            self.problem
                .evaluate_constraints(individual)
                .map_err(|source| Nsga2Error::Evaluation { phase, source })?;
        }
        self.state.evaluations += performed;
        self.termination.update(&self.state);
        debug!(%phase, batch = indices.len(), performed, "Evaluated");
        Ok(())
    }

    fn check_objectives(
        &self,
        population: &Population<P::Chromosome>,
        phase: Phase,
    ) -> Result<(), Nsga2Error> {
        population
            .check_objectives(self.problem.number_of_objectives())
            .map_err(|message| Nsga2Error::InvariantViolation { phase, message })
    }

    /// Improves either the whole frontier or randomly drawn members. Improved
    /// individuals take the place of the originals and are evaluated there.
    fn local_search_step(
        &mut self,
        population: &mut Population<P::Chromosome>,
        local_search: &mut LocalSearch<P::Chromosome>,
    ) -> Result<(), Nsga2Error> {
        let _span = debug_span!("nsga.local_search", operator = %local_search.name()).entered();

        if self.local_search_count == 0 && local_search.is_population() {
            self.check_objectives(population, Phase::LocalSearch)?;
            let ranking = Ranking::new(population);
            let front = ranking.subfront(population, 0);
            info!(front_size = front.len(), "Local search on frontier");

            let improvements = local_search
                .improve_front(&front, self.rng.as_mut())
                .unwrap_or_default();
            let mut improved = Vec::with_capacity(improvements.len());
            for improvement in improvements {
                let index = ranking
                    .fronts()
                    .first()
                    .and_then(|members| members.get(improvement.slot))
                    .copied()
                    .ok_or_else(|| Nsga2Error::InvariantViolation {
                        phase: Phase::LocalSearch,
                        message: format!(
                            "improvement slot {} outside a frontier of {}",
                            improvement.slot,
                            front.len()
                        ),
                    })?;
                write_back(population, index, improvement.individual);
                improved.push(index);
            }
            self.evaluate(population, &improved, Phase::LocalSearch)?;
        } else {
            let population_size = population.len();
            self.callbacks.notify(&self.termination);
            for i in 0..self.local_search_count {
                if self.termination.is_terminated() {
                    break;
                }
                let index = self.rng.gen_range_usize(0, population_size);
                info!(
                    "Local search {}/{} on element {}",
                    i, self.local_search_count, index
                );
                if let Some(individual) = local_search.improve(population.get(index), self.rng.as_mut())
                {
                    write_back(population, index, individual);
                    self.evaluate(population, &[index], Phase::LocalSearch)?;
                }
            }
        }
        Ok(())
    }

    /// `population_size / 2` pairs of parents, each producing two mutated children.
    fn create_offspring(
        &mut self,
        population: &Population<P::Chromosome>,
    ) -> Population<P::Chromosome> {
        let population_size = self.config.population_size;
        let mut offspring = Population::new(population_size);
        for _ in 0..population_size / 2 {
            let first = self.selector.select(population, self.rng.as_mut());
            let second = self.selector.select(population, self.rng.as_mut());
            let (mut child_a, mut child_b) = self.crossover.crossover(
                population.get(first),
                population.get(second),
                self.rng.as_mut(),
            );
            self.mutation.mutate(&mut child_a, self.rng.as_mut());
            self.mutation.mutate(&mut child_b, self.rng.as_mut());
            offspring.add(child_a);
            offspring.add(child_b);
        }
        offspring
    }

    /// Picks what gets evaluated this generation: indices into the parent
    /// population and indices into the offspring.
    fn select_for_evaluation(
        &mut self,
        population: &Population<P::Chromosome>,
        offspring: &Population<P::Chromosome>,
    ) -> Result<(Vec<usize>, Vec<usize>), Nsga2Error> {
        match self.config.inheritance {
            FitnessInheritance::None => Ok((Vec::new(), (0..offspring.len()).collect())),
            FitnessInheritance::Uniform => {
                let p = f64::from(INHERIT_PROBABILITY);
                let selected = (0..offspring.len())
                    .filter(|_| !self.rng.gen_bool(p))
                    .collect();
                Ok((Vec::new(), selected))
            }
            FitnessInheritance::Fronteer => {
                self.check_objectives(population, Phase::Ranking)?;
                let ranking = Ranking::new(population);
                let (frontier, others) = match ranking.fronts().split_first() {
                    Some((frontier, others)) => (frontier.as_slice(), others),
                    None => return Ok((Vec::new(), Vec::new())),
                };

                let (pf, po) = fronteer_probabilities(offspring.len(), frontier.len());
                debug!(pf, po, frontier = frontier.len(), "Fronteer inheritance");

                let mut selected = Vec::new();
                for &i in frontier {
                    if !self.rng.gen_bool(pf) {
                        selected.push(i);
                    }
                }
                for &i in others.iter().flatten() {
                    if !self.rng.gen_bool(po) {
                        selected.push(i);
                    }
                }
                Ok((selected, Vec::new()))
            }
        }
    }
}

/// Puts `individual` in slot `index`, keeping the rank and crowding distance of the
/// member it replaces.
fn write_back<V>(population: &mut Population<V>, index: usize, mut individual: Individual<V>) {
    let current = population.get(index);
    individual.rank = current.rank;
    individual.crowding_distance = current.crowding_distance;
    population.replace(index, individual);
}

/// Probabilities of skipping the evaluation of a frontier member and of any other
/// member under `FitnessInheritance::Fronteer`, for `offspring` children and a
/// frontier of `frontier` members.
fn fronteer_probabilities(offspring: usize, frontier: usize) -> (f64, f64) {
    let n = offspring as f32;
    let f = frontier as f32;
    let k = FRONTEER_WEIGHT;
    let pf = k * INHERIT_PROBABILITY * n / (n + f * (k - 1.0));
    let po = if pf / k >= 1.0 { 1.0 } else { pf / k };
    // An odd population size can push pf above 1.
    (
        f64::from(pf.clamp(0.0, 1.0)),
        f64::from(po.clamp(0.0, 1.0)),
    )
}

/// Assembles an [`Nsga2`] engine, checking that the configuration is valid and that
/// every mandatory operator was provided.
pub struct Nsga2Builder<P, T, Sel, Cross, Mut>
where
    P: Problem,
{
    problem: P,
    termination: T,
    selector: Option<Sel>,
    crossover: Option<Cross>,
    mutation: Option<Mut>,
    local_search: Option<LocalSearch<P::Chromosome>>,
    config: Nsga2Config,
    rng: Option<Box<dyn RandomGenerator>>,
}

impl<P, T, Sel, Cross, Mut> Nsga2Builder<P, T, Sel, Cross, Mut>
where
    P: Problem,
    P::Chromosome: Clone,
    T: TerminationCriterion,
    Sel: SelectionOperator<P::Chromosome>,
    Cross: CrossoverOperator<P::Chromosome>,
    Mut: MutationOperator<P::Chromosome>,
{
    pub fn new(problem: P, termination: T) -> Self {
        Self {
            problem,
            termination,
            selector: None,
            crossover: None,
            mutation: None,
            local_search: None,
            config: Nsga2Config::default(),
            rng: None,
        }
    }

    pub fn config(mut self, config: Nsga2Config) -> Self {
        self.config = config;
        self
    }

    pub fn population_size(mut self, population_size: usize) -> Self {
        self.config.population_size = population_size;
        self
    }

    pub fn inheritance(mut self, inheritance: FitnessInheritance) -> Self {
        self.config.inheritance = inheritance;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn selection(mut self, selector: Sel) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn crossover(mut self, crossover: Cross) -> Self {
        self.crossover = Some(crossover);
        self
    }

    pub fn mutation(mut self, mutation: Mut) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn local_search(mut self, local_search: LocalSearch<P::Chromosome>) -> Self {
        self.local_search = Some(local_search);
        self
    }

    /// Replaces the seeded generator. Mostly useful to script random draws in tests.
    pub fn random_generator(mut self, rng: Box<dyn RandomGenerator>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn build(self) -> Result<Nsga2<P, T, Sel, Cross, Mut>, ConfigurationError> {
        self.config.validate()?;
        let selector = self
            .selector
            .ok_or(ConfigurationError::MissingOperator("selection"))?;
        let crossover = self
            .crossover
            .ok_or(ConfigurationError::MissingOperator("crossover"))?;
        let mutation = self
            .mutation
            .ok_or(ConfigurationError::MissingOperator("mutation"))?;
        selector.validate()?;
        crossover.validate()?;
        mutation.validate()?;
        if let Some(local_search) = &self.local_search {
            local_search.validate()?;
        }
        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(SearchRandomGenerator::from_seed(self.config.seed)));
        let local_search_count = self
            .config
            .local_search_count
            .resolve(self.config.population_size);

        if let Some(local_search) = &self.local_search {
            debug!(
                operator = %local_search.name(),
                period = self.config.local_search_period,
                count = local_search_count,
                "Local search enabled"
            );
        }

        Ok(Nsga2 {
            problem: self.problem,
            termination: self.termination,
            selector,
            crossover,
            mutation,
            survivor: RankCrowdingSurvival::new(),
            local_search: self.local_search,
            config: self.config,
            local_search_count,
            callbacks: Callbacks::new(),
            rng,
            state: RunState::default(),
        })
    }
}
