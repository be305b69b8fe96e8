use std::fmt;

/// What the indicator is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Hidden, or fading out to hidden.
    Stopped,
    /// Beams bouncing.
    Playing,
    /// Visible, beams resting low.
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        };
        f.write_str(s)
    }
}

/// Infer the state from what is attached to the animation layers.
///
/// A looping beam wins; otherwise a positive commanded opacity means paused. The opacity
/// target is read as committed, even while its fade is still waiting on a begin delay.
pub fn derive_state(loop_attached: bool, opacity_target: Option<f64>) -> PlaybackState {
    if loop_attached {
        return PlaybackState::Playing;
    }
    match opacity_target {
        Some(v) if v > 0.0 => PlaybackState::Paused,
        _ => PlaybackState::Stopped,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/state.rs"]
mod tests;
