use super::traits::ConfigSection;
use crate::error::SliceTuneError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub num_parents: usize,
    pub max_attempts: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            num_generations: 100,
            num_parents: 10,
            max_attempts: 5,
            seed: None,
        }
    }
}

impl ConfigSection for SearchConfig {
    fn section_name() -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<(), SliceTuneError> {
        if self.population_size < 2 {
            return Err(SliceTuneError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.num_generations == 0 {
            return Err(SliceTuneError::Configuration(
                "Number of generations must be at least 1".to_string(),
            ));
        }
        if self.num_parents < 2 {
            return Err(SliceTuneError::Configuration(
                "Number of parents must be at least 2".to_string(),
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

impl From<&SearchConfig> for crate::engine::TunerConfig {
    fn from(config: &SearchConfig) -> Self {
        Self {
            population_size: config.population_size,
            generations: config.num_generations,
            num_parents: config.num_parents,
            max_attempts: config.max_attempts,
            seed: config.seed,
        }
    }
}
