use rand::Rng;
use std::ops::Range;
use std::time::Duration;

/// Probability that a simulated inspection flags a defect.
pub const DEFECT_PROBABILITY: f64 = 0.28;

/// The simulated inspection timer fires at a uniformly random interval
/// within this range.
pub const TICK_INTERVAL_MS: Range<u64> = 6000..15000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectionOutcome {
    Good,
    Defect,
}

/// Classify a uniform draw in [0, 1) against the default probability.
pub fn classify(draw: f64) -> InspectionOutcome {
    classify_with(draw, DEFECT_PROBABILITY)
}

pub fn classify_with(draw: f64, defect_probability: f64) -> InspectionOutcome {
    if draw < defect_probability {
        InspectionOutcome::Defect
    } else {
        InspectionOutcome::Good
    }
}

pub fn sample_outcome<R: Rng>(rng: &mut R) -> InspectionOutcome {
    classify(rng.gen::<f64>())
}

pub fn sample_tick_interval<R: Rng>(rng: &mut R) -> Duration {
    Duration::from_millis(rng.gen_range(TICK_INTERVAL_MS))
}
