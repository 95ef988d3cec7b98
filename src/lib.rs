pub mod config;
pub mod engine;
pub mod error;
pub mod profile;

pub use engine::{Candidate, TuneOutcome, Tuner, TunerConfig};
pub use error::{Result, SliceTuneError};
