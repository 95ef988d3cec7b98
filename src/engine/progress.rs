/// Observer for search progress. The tuner reports every generation's best
/// fitness through this trait rather than printing directly.
pub trait ProgressCallback {
    fn on_attempt_start(&mut self, attempt: usize, max_attempts: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64);
}

/// Reports progress through the `log` crate.
pub struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_attempt_start(&mut self, attempt: usize, max_attempts: usize) {
        if attempt > 1 {
            log::info!("Search attempt {}/{}", attempt, max_attempts);
        }
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64) {
        log::info!(
            "Generation {} - Best Fitness: {:.4}",
            generation,
            best_fitness
        );
    }
}

/// Silent observer for tests and embedding.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn on_attempt_start(&mut self, _attempt: usize, _max_attempts: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64) {}
}
