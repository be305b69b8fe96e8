use rand::Rng;

use crate::{
    animation::{
        descriptor::{FillMode, KeyframeAnimation, RepeatCount},
        timing::TimingFunction,
        value::AnimValue,
    },
    config::IndicatorConfig,
    engine::beam::beam_path,
    foundation::core::Rect,
};

/// `count` heights drawn uniformly from `[0, 100)`.
pub fn random_levels<R: Rng>(rng: &mut R, count: usize) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(0.0..100.0)).collect()
}

/// Evenly spaced key times `i / count` for `i` in `0..count`.
///
/// The last waypoint sits at `(count - 1) / count`, so each pass holds it briefly before
/// reversing.
pub fn key_times(count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64 / count as f64).collect()
}

/// `count` segment curves drawn uniformly from [`TimingFunction::ALL`].
pub fn random_timing_functions<R: Rng>(rng: &mut R, count: usize) -> Vec<TimingFunction> {
    (0..count)
        .map(|_| TimingFunction::ALL[rng.gen_range(0..TimingFunction::ALL.len())])
        .collect()
}

/// Fresh looping descriptor for one beam: random waypoints, even key times, random segment
/// curves, delayed by the seed duration, autoreversing forever.
pub fn loop_animation<R: Rng>(
    rng: &mut R,
    bounds: Rect,
    config: &IndicatorConfig,
) -> KeyframeAnimation {
    let count = config.waypoint_count;
    let values = random_levels(rng, count)
        .into_iter()
        .map(|level| AnimValue::Path(beam_path(bounds, level, config.beam_width_fraction)))
        .collect();
    let timing = random_timing_functions(rng, count);

    KeyframeAnimation::new(values, key_times(count), timing, config.loop_duration)
        .begin_offset(config.seed_duration)
        .fill_mode(FillMode::Forwards)
        .removed_on_completion(false)
        .autoreverses(true)
        .repeat(RepeatCount::Infinite)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/keyframes.rs"]
mod tests;
