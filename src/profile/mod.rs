pub mod ini;

pub use ini::{read_initial_parameters, write_parameters};
