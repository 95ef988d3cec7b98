use super::candidate::Candidate;
use super::domain::Parameter;

/// Numerator of every per-parameter time-cost term.
const TIME_COST_SCALE: f64 = 100.0;

/// Floor substituted into time-cost denominators so a near-zero field (which
/// crossover or a corrupt profile can produce) costs a lot without dividing
/// by zero.
const MIN_DIVISOR: f64 = 1e-3;

/// Added to the time cost once per violated parameter. Penalties stack, so a
/// candidate violating four constraints pays four times.
pub const CONSTRAINT_PENALTY: f64 = 1000.0;

/// Mean of the four speed fields is scaled by this.
const SPEED_REWARD_SCALE: f64 = 4.0;

/// `layer_height / max_layer_height` is scaled by this.
const HEIGHT_REWARD_SCALE: f64 = 3.2;

const SPEED_PARAMS: [Parameter; 4] = [
    Parameter::FirstLayerSpeed,
    Parameter::PerimeterSpeed,
    Parameter::SolidInfillSpeed,
    Parameter::RetractSpeed,
];

/// Score a candidate; higher is better.
///
/// This is a deliberately simplified print-time heuristic, not a simulator:
/// a negated time cost (each field contributes `100 / value`), rewards for
/// higher speeds and layer height, and a flat penalty per parameter that is
/// out of range or off the quantization grid. Domain violations are soft
/// constraints so the search can pass through invalid regions and recover.
///
/// Pure function of the candidate's field values: no randomness, no state.
pub fn evaluate(candidate: &Candidate) -> f64 {
    let mut time_cost = 0.0;

    for param in Parameter::ALL {
        let value = candidate.get(param);
        time_cost += TIME_COST_SCALE / value.max(MIN_DIVISOR);

        let domain = param.domain();
        if !domain.contains(value) || !domain.on_grid(value) {
            time_cost += CONSTRAINT_PENALTY;
        }
    }

    let mean_speed = SPEED_PARAMS
        .iter()
        .map(|p| candidate.get(*p))
        .sum::<f64>()
        / SPEED_PARAMS.len() as f64;
    let speed_reward = mean_speed * SPEED_REWARD_SCALE;

    let max_layer_height = Parameter::LayerHeight.domain().max;
    let height_reward = HEIGHT_REWARD_SCALE * candidate.layer_height / max_layer_height;

    -time_cost + speed_reward + height_reward
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_candidate() -> Candidate {
        Candidate {
            fill_density: 0.2,
            first_layer_speed: 30.0,
            first_layer_height: 0.28,
            layer_height: 0.28,
            perimeter_speed: 60.0,
            solid_infill_speed: 60.0,
            retract_speed: 40.0,
            retract_length: 2.0,
        }
    }

    #[test]
    fn test_valid_candidate_has_no_penalty() {
        let candidate = valid_candidate();
        let fitness = evaluate(&candidate);
        assert!(fitness.is_finite());

        // Reconstruct the penalty-free score by hand
        let time_cost: f64 = Parameter::ALL
            .iter()
            .map(|p| 100.0 / candidate.get(*p))
            .sum();
        let speed_reward = (30.0 + 60.0 + 60.0 + 40.0) / 4.0 * 4.0;
        let height_reward = 3.2 * 0.28 / 0.32;
        let expected = -time_cost + speed_reward + height_reward;

        assert!((fitness - expected).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_costs_at_least_one_penalty() {
        let valid = valid_candidate();
        let mut invalid = valid;
        invalid.layer_height = 0.33;

        // The out-of-range value also shifts the time/reward terms a little,
        // so the observable gap is the penalty minus those shifts.
        let gap = evaluate(&valid) - evaluate(&invalid);
        assert!(
            gap >= CONSTRAINT_PENALTY - 100.0,
            "expected penalty dominance, gap was {gap}"
        );
    }

    #[test]
    fn test_off_grid_value_is_penalized() {
        let valid = valid_candidate();
        let mut off_grid = valid;
        off_grid.layer_height = 0.27; // in range, not a multiple of 0.04

        let gap = evaluate(&valid) - evaluate(&off_grid);
        assert!(gap >= CONSTRAINT_PENALTY - 10.0);
    }

    #[test]
    fn test_penalties_stack_per_parameter() {
        let valid = valid_candidate();
        let mut invalid = valid;
        invalid.fill_density = 0.31;
        invalid.perimeter_speed = 101.0;
        invalid.retract_speed = 29.0;
        invalid.layer_height = 0.36; // on grid, out of range

        let gap = evaluate(&valid) - evaluate(&invalid);
        assert!(
            gap >= 4.0 * CONSTRAINT_PENALTY - 500.0,
            "four violations must pay roughly four penalties, gap was {gap}"
        );
    }

    #[test]
    fn test_near_zero_field_does_not_blow_up() {
        let mut candidate = valid_candidate();
        candidate.retract_length = 0.0;

        let fitness = evaluate(&candidate);
        assert!(fitness.is_finite());
        assert!(fitness < evaluate(&valid_candidate()));
    }

    #[test]
    fn test_faster_profile_scores_higher() {
        let slow = valid_candidate();
        let mut fast = slow;
        fast.perimeter_speed = 100.0;
        fast.solid_infill_speed = 100.0;
        fast.layer_height = 0.32;

        assert!(evaluate(&fast) > evaluate(&slow));
    }
}
