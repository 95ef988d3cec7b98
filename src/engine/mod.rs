pub mod candidate;
pub mod domain;
pub mod fitness;
pub mod operators;
pub mod progress;
pub mod tuner;

pub use candidate::{Candidate, Population};
pub use domain::{ParamDomain, Parameter, Rounding};
pub use fitness::evaluate;
pub use progress::{LogProgress, NullProgress, ProgressCallback};
pub use tuner::{TuneOutcome, Tuner, TunerConfig};
