use super::domain::Parameter;
use serde::{Deserialize, Serialize};

/// One complete proposed setting of the tunable slicer parameters.
///
/// The chromosome is a fixed-key record, not a variable-length gene string:
/// every candidate always carries all eight fields, so crossover and mutation
/// can never produce a partial individual. Candidates are `Copy`; operators
/// work on copies and never alias two live individuals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub fill_density: f64,
    pub first_layer_speed: f64,
    pub first_layer_height: f64,
    pub layer_height: f64,
    pub perimeter_speed: f64,
    pub solid_infill_speed: f64,
    pub retract_speed: f64,
    pub retract_length: f64,
}

/// The set of candidates considered in one generation. Replaced wholesale
/// each generation; individuals are never retained across generations.
pub type Population = Vec<Candidate>;

impl Candidate {
    pub fn get(&self, param: Parameter) -> f64 {
        match param {
            Parameter::FillDensity => self.fill_density,
            Parameter::FirstLayerSpeed => self.first_layer_speed,
            Parameter::FirstLayerHeight => self.first_layer_height,
            Parameter::LayerHeight => self.layer_height,
            Parameter::PerimeterSpeed => self.perimeter_speed,
            Parameter::SolidInfillSpeed => self.solid_infill_speed,
            Parameter::RetractSpeed => self.retract_speed,
            Parameter::RetractLength => self.retract_length,
        }
    }

    pub fn set(&mut self, param: Parameter, value: f64) {
        match param {
            Parameter::FillDensity => self.fill_density = value,
            Parameter::FirstLayerSpeed => self.first_layer_speed = value,
            Parameter::FirstLayerHeight => self.first_layer_height = value,
            Parameter::LayerHeight => self.layer_height = value,
            Parameter::PerimeterSpeed => self.perimeter_speed = value,
            Parameter::SolidInfillSpeed => self.solid_infill_speed = value,
            Parameter::RetractSpeed => self.retract_speed = value,
            Parameter::RetractLength => self.retract_length = value,
        }
    }

    /// All parameters fall back to their documented defaults.
    pub fn from_defaults() -> Self {
        let mut candidate = Candidate {
            fill_density: 0.0,
            first_layer_speed: 0.0,
            first_layer_height: 0.0,
            layer_height: 0.0,
            perimeter_speed: 0.0,
            solid_infill_speed: 0.0,
            retract_speed: 0.0,
            retract_length: 0.0,
        };
        for param in Parameter::ALL {
            candidate.set(param, param.default_value());
        }
        candidate
    }
}

impl Default for Candidate {
    fn default() -> Self {
        Self::from_defaults()
    }
}
