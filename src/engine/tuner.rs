use super::candidate::{Candidate, Population};
use super::fitness::evaluate;
use super::operators::{crossover, mutate, random_population, select_parents};
use super::progress::ProgressCallback;
use crate::error::{Result, SliceTuneError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct TunerConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Size of the parent pool drawn each generation (with replacement, so
    /// it may exceed the population size). Must be at least 2 so that two
    /// distinct parents can be paired per child.
    pub num_parents: usize,
    /// Cap on full search restarts when the result does not beat the
    /// baseline; once exhausted the run reports non-convergence instead of
    /// retrying forever.
    pub max_attempts: usize,
    pub seed: Option<u64>,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            num_parents: 10,
            max_attempts: 5,
            seed: None,
        }
    }
}

impl TunerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(SliceTuneError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.generations == 0 {
            return Err(SliceTuneError::Configuration(
                "Generation count must be at least 1".to_string(),
            ));
        }
        if self.num_parents < 2 {
            return Err(SliceTuneError::Configuration(
                "Parent pool must hold at least 2 parents".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(SliceTuneError::Configuration(
                "Max attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a full tuning run.
#[derive(Debug, Clone, Copy)]
pub struct TuneOutcome {
    /// Best candidate found across all attempts.
    pub candidate: Candidate,
    pub fitness: f64,
    /// Attempts consumed (1-based; 1 means the first search was accepted).
    pub attempts: usize,
    /// Whether the result scored at least as well as the supplied baseline.
    /// `false` is the explicit non-convergence outcome: the caller gets the
    /// best candidate seen, not an error or an endless retry loop.
    pub improved: bool,
}

/// Generational search driver.
///
/// Owns an explicit RNG threaded through every operator so a seeded run is
/// fully reproducible; nothing here touches global random state. Generations
/// run strictly in sequence and each population wholesale-replaces the
/// previous one, so the only shared state is the population local to one
/// attempt. Fitness evaluation is a pure per-candidate function and is
/// mapped over the population in parallel.
pub struct Tuner {
    config: TunerConfig,
    rng: StdRng,
}

impl Tuner {
    pub fn new(config: TunerConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Run the search until its best candidate scores at least `baseline`,
    /// restarting from scratch on failure, up to the configured attempt cap.
    pub fn run<C: ProgressCallback>(
        &mut self,
        baseline: f64,
        callback: &mut C,
    ) -> TuneOutcome {
        let mut best: Option<(Candidate, f64)> = None;

        for attempt in 1..=self.config.max_attempts {
            callback.on_attempt_start(attempt, self.config.max_attempts);

            let (candidate, fitness) = self.run_once(callback);

            if best.map_or(true, |(_, f)| fitness > f) {
                best = Some((candidate, fitness));
            }

            // Strictly worse than the baseline retries; equal is accepted.
            if fitness >= baseline {
                return TuneOutcome {
                    candidate,
                    fitness,
                    attempts: attempt,
                    improved: true,
                };
            }

            log::warn!(
                "Attempt {} best fitness {:.4} below baseline {:.4}",
                attempt,
                fitness,
                baseline
            );
        }

        let (candidate, fitness) = best.expect("max_attempts >= 1 is validated");
        TuneOutcome {
            candidate,
            fitness,
            attempts: self.config.max_attempts,
            improved: false,
        }
    }

    /// One complete search: seed a population, evolve it for the configured
    /// number of generations, return the final population's best.
    fn run_once<C: ProgressCallback>(&mut self, callback: &mut C) -> (Candidate, f64) {
        let mut population = random_population(self.config.population_size, &mut self.rng);

        for generation in 0..self.config.generations {
            let fitnesses = evaluate_population(&population);

            let best_fitness = fitnesses
                .iter()
                .cloned()
                .fold(f64::NEG_INFINITY, f64::max);
            callback.on_generation_complete(generation, best_fitness);

            let parents = select_parents(
                &population,
                &fitnesses,
                self.config.num_parents,
                &mut self.rng,
            );

            population = self.breed(&parents);
        }

        let fitnesses = evaluate_population(&population);
        let best_idx = argmax(&fitnesses);
        (population[best_idx], fitnesses[best_idx])
    }

    /// Build the next generation: pair two distinct parents uniformly from
    /// the pool, cross them, mutate the child, until the population is full.
    fn breed(&mut self, parents: &[Candidate]) -> Population {
        let mut next = Vec::with_capacity(self.config.population_size);

        while next.len() < self.config.population_size {
            let (i, j) = distinct_pair(parents.len(), &mut self.rng);
            let mut child = crossover(&parents[i], &parents[j], &mut self.rng);
            mutate(&mut child, &mut self.rng);
            next.push(child);
        }

        next
    }
}

fn evaluate_population(population: &[Candidate]) -> Vec<f64> {
    population.par_iter().map(evaluate).collect()
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Two distinct indices drawn uniformly from `0..len`. Requires `len >= 2`,
/// guaranteed by `TunerConfig::validate`.
fn distinct_pair<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let i = rng.gen_range(0..len);
    loop {
        let j = rng.gen_range(0..len);
        if j != i {
            return (i, j);
        }
    }
}
