use super::candidate::{Candidate, Population};
use super::domain::Parameter;
use rand::Rng;

/// Minimum probability mass left to the worst individual after the fitness
/// shift in [`select_parents`].
const WEIGHT_EPSILON: f64 = 1e-6;

/// Generate one candidate with every field drawn uniformly from its domain
/// and snapped per that domain's rounding rule.
pub fn random_candidate<R: Rng>(rng: &mut R) -> Candidate {
    let mut candidate = Candidate::default();
    for param in Parameter::ALL {
        candidate.set(param, param.domain().sample(rng));
    }
    candidate
}

/// Generate a fresh population of exactly `size` candidates. No validation
/// beyond construction; range violations reintroduced later by crossover or
/// mutation are handled by fitness penalties, not rejection.
pub fn random_population<R: Rng>(size: usize, rng: &mut R) -> Population {
    (0..size).map(|_| random_candidate(rng)).collect()
}

/// Fitness-proportional selection with replacement: draw `num_parents`
/// candidates (possibly more than the population holds), each draw weighted
/// by fitness.
///
/// Raw fitness here can be zero or negative (penalties dominate easily), so
/// dividing by the fitness sum is not a valid probability distribution.
/// Instead of clamping negatives to zero, which would strip an entire
/// below-zero population of selection pressure, all fitnesses are shifted so
/// the minimum maps to a small positive epsilon before the roulette spin.
/// An all-equal population degrades to uniform draws.
pub fn select_parents<R: Rng>(
    population: &[Candidate],
    fitnesses: &[f64],
    num_parents: usize,
    rng: &mut R,
) -> Vec<Candidate> {
    debug_assert_eq!(population.len(), fitnesses.len());

    let min = fitnesses.iter().cloned().fold(f64::INFINITY, f64::min);
    let shift = if min <= 0.0 { -min + WEIGHT_EPSILON } else { 0.0 };

    let weights: Vec<f64> = fitnesses.iter().map(|f| f + shift).collect();
    let total: f64 = weights.iter().sum();

    let mut parents = Vec::with_capacity(num_parents);
    for _ in 0..num_parents {
        let mut spin = rng.gen::<f64>() * total;
        let mut chosen = population.len() - 1;
        for (i, weight) in weights.iter().enumerate() {
            spin -= weight;
            if spin <= 0.0 {
                chosen = i;
                break;
            }
        }
        parents.push(population[chosen]);
    }
    parents
}

/// Uniform crossover: the child starts as a copy of `parent1` and takes each
/// field from `parent2` with independent probability 0.5. Neither parent is
/// touched; the child is always a complete candidate.
pub fn crossover<R: Rng>(parent1: &Candidate, parent2: &Candidate, rng: &mut R) -> Candidate {
    let mut child = *parent1;
    for param in Parameter::ALL {
        if rng.gen::<f64>() < 0.5 {
            child.set(param, parent2.get(param));
        }
    }
    child
}

/// Mutate exactly one field, chosen uniformly, by resampling it from its
/// domain with the same rule the population generator uses. All other
/// fields are left untouched.
pub fn mutate<R: Rng>(candidate: &mut Candidate, rng: &mut R) {
    let param = Parameter::ALL[rng.gen_range(0..Parameter::ALL.len())];
    candidate.set(param, param.domain().sample(rng));
}
