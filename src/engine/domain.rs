use rand::Rng;

/// Layer heights must sit on integer multiples of this step.
pub const LAYER_HEIGHT_STEP: f64 = 0.04;

/// Tolerance for the grid-membership check. Uniform draws rounded onto the
/// grid are rarely bit-exact multiples of 0.04, so exact float equality
/// would flag nearly every quantized value as invalid.
pub const GRID_TOLERANCE: f64 = 1e-6;

/// How a sampled value is snapped after a uniform draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rounding {
    /// Keep the raw draw (continuous parameter).
    None,
    /// Round to the nearest whole number (speeds).
    Integer,
    /// Round to the nearest integer multiple of the step (layer heights).
    Step(f64),
}

/// Valid range and quantization rule for one tunable parameter.
///
/// Static configuration data: ranges never change during a run. Domains are
/// only consulted for sampling and for fitness penalties; out-of-range values
/// produced by crossover inheritance are not rejected here.
#[derive(Debug, Clone, Copy)]
pub struct ParamDomain {
    pub min: f64,
    pub max: f64,
    pub rounding: Rounding,
}

impl ParamDomain {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether the value sits on the quantization grid (always true for
    /// non-quantized parameters). Tolerance-based, never exact equality.
    pub fn on_grid(&self, value: f64) -> bool {
        match self.rounding {
            Rounding::Step(step) => {
                let nearest = (value / step).round() * step;
                (value - nearest).abs() <= GRID_TOLERANCE
            }
            _ => true,
        }
    }

    /// Uniform draw over the interval, snapped per the rounding rule. The
    /// same rule is used by initial population generation and by mutation.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        let raw = rng.gen_range(self.min..=self.max);
        match self.rounding {
            Rounding::None => raw,
            Rounding::Integer => raw.round(),
            Rounding::Step(step) => (raw / step).round() * step,
        }
    }
}

/// The tunable slicer parameters.
///
/// A tagged enum with a static lookup table instead of string-keyed dispatch:
/// every operator (sampling, mutation, fitness) indexes into `ALL` rather
/// than comparing key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    FillDensity,
    FirstLayerSpeed,
    FirstLayerHeight,
    LayerHeight,
    PerimeterSpeed,
    SolidInfillSpeed,
    RetractSpeed,
    RetractLength,
}

impl Parameter {
    pub const ALL: [Parameter; 8] = [
        Parameter::FillDensity,
        Parameter::FirstLayerSpeed,
        Parameter::FirstLayerHeight,
        Parameter::LayerHeight,
        Parameter::PerimeterSpeed,
        Parameter::SolidInfillSpeed,
        Parameter::RetractSpeed,
        Parameter::RetractLength,
    ];

    /// Key name as it appears in the slicer profile.
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::FillDensity => "fill_density",
            Parameter::FirstLayerSpeed => "first_layer_speed",
            Parameter::FirstLayerHeight => "first_layer_height",
            Parameter::LayerHeight => "layer_height",
            Parameter::PerimeterSpeed => "perimeter_speed",
            Parameter::SolidInfillSpeed => "solid_infill_speed",
            Parameter::RetractSpeed => "retract_speed",
            Parameter::RetractLength => "retract_length",
        }
    }

    pub fn domain(&self) -> ParamDomain {
        match self {
            Parameter::FillDensity => ParamDomain {
                min: 0.1,
                max: 0.3,
                rounding: Rounding::None,
            },
            Parameter::FirstLayerSpeed => ParamDomain {
                min: 20.0,
                max: 50.0,
                rounding: Rounding::Integer,
            },
            Parameter::FirstLayerHeight | Parameter::LayerHeight => ParamDomain {
                min: 0.12,
                max: 0.32,
                rounding: Rounding::Step(LAYER_HEIGHT_STEP),
            },
            Parameter::PerimeterSpeed
            | Parameter::SolidInfillSpeed
            | Parameter::RetractSpeed => ParamDomain {
                min: 30.0,
                max: 100.0,
                rounding: Rounding::Integer,
            },
            Parameter::RetractLength => ParamDomain {
                min: 1.0,
                max: 5.0,
                rounding: Rounding::None,
            },
        }
    }

    /// Fallback value when the parameter is missing from the profile.
    pub fn default_value(&self) -> f64 {
        match self {
            Parameter::FillDensity => 0.2,
            Parameter::FirstLayerSpeed => 30.0,
            Parameter::FirstLayerHeight => 0.28,
            Parameter::LayerHeight => 0.2,
            Parameter::PerimeterSpeed => 60.0,
            Parameter::SolidInfillSpeed => 60.0,
            Parameter::RetractSpeed => 40.0,
            Parameter::RetractLength => 2.0,
        }
    }
}
