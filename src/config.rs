use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::Rgba8,
    error::{IndicatorError, IndicatorResult},
};

/// Timing and geometry knobs for an [`IndicatorEngine`](crate::IndicatorEngine).
///
/// The defaults reproduce the classic indicator: a 0.2s fade in, a 0.35s seed into a 1.75s
/// autoreversing loop over ten waypoints, a 0.2s settle to 5% and a 0.1s fade out that starts
/// once the settle is 80% through.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    /// Fade-in duration when playback starts.
    pub fade_in_duration: f64,
    /// Duration of the per-beam path transition into the loop's first waypoint.
    pub seed_duration: f64,
    /// Duration of one forward pass over the waypoints.
    pub loop_duration: f64,
    /// Waypoints per beam loop.
    pub waypoint_count: usize,
    /// Duration of the settle to the resting level.
    pub settle_duration: f64,
    /// Resting beam height, in percent.
    pub resting_level: f64,
    /// Fraction of the settle that elapses before the stop fade begins.
    pub fade_out_delay_factor: f64,
    /// Fade-out duration when playback stops.
    pub fade_out_duration: f64,
    /// Beam width as a fraction of the indicator width.
    pub beam_width_fraction: f64,
    /// Initial beam color.
    pub color: Rgba8,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            fade_in_duration: 0.2,
            seed_duration: 0.35,
            loop_duration: 1.75,
            waypoint_count: 10,
            settle_duration: 0.2,
            resting_level: 5.0,
            fade_out_delay_factor: 0.8,
            fade_out_duration: 0.1,
            beam_width_fraction: 0.25,
            color: Rgba8::RED,
        }
    }
}

impl IndicatorConfig {
    /// Delay between a stop and the start of its fade out.
    pub fn fade_out_delay(&self) -> f64 {
        self.settle_duration * self.fade_out_delay_factor
    }

    /// Check every field is usable.
    pub fn validate(&self) -> IndicatorResult<()> {
        for (name, v) in [
            ("fade_in_duration", self.fade_in_duration),
            ("seed_duration", self.seed_duration),
            ("loop_duration", self.loop_duration),
            ("settle_duration", self.settle_duration),
            ("fade_out_duration", self.fade_out_duration),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(IndicatorError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
        }
        if self.waypoint_count < 2 {
            return Err(IndicatorError::validation(format!(
                "waypoint_count must be >= 2 (got {})",
                self.waypoint_count
            )));
        }
        if !(0.0..=100.0).contains(&self.resting_level) {
            return Err(IndicatorError::validation(format!(
                "resting_level must be in [0, 100] (got {})",
                self.resting_level
            )));
        }
        if !(0.0..=1.0).contains(&self.fade_out_delay_factor) {
            return Err(IndicatorError::validation(format!(
                "fade_out_delay_factor must be in [0, 1] (got {})",
                self.fade_out_delay_factor
            )));
        }
        if !(self.beam_width_fraction > 0.0 && self.beam_width_fraction <= 1.0 / 3.0) {
            return Err(IndicatorError::validation(format!(
                "beam_width_fraction must be in (0, 1/3] (got {})",
                self.beam_width_fraction
            )));
        }
        Ok(())
    }

    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> IndicatorResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| IndicatorError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> IndicatorResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
