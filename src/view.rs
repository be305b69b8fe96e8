use crate::{
    engine::{
        indicator::{IndicatorEngine, IndicatorSnapshot},
        state::PlaybackState,
    },
    foundation::core::{Rect, Rgba8},
};

/// Host container for an [`IndicatorEngine`].
///
/// Keeps the engine's frame equal to its own bounds and forwards everything else.
#[derive(Debug, Default)]
pub struct IndicatorView {
    bounds: Rect,
    indicator: IndicatorEngine,
}

impl IndicatorView {
    /// View around a default engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// View around an already configured engine.
    pub fn with_engine(indicator: IndicatorEngine) -> Self {
        let bounds = indicator.bounds();
        Self { bounds, indicator }
    }

    /// The hosted engine.
    pub fn indicator(&self) -> &IndicatorEngine {
        &self.indicator
    }

    /// Own bounds, as last laid out.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds changed: resize the engine to match.
    pub fn layout(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.indicator.layout(bounds);
    }

    /// Beam color.
    pub fn indicator_color(&self) -> Rgba8 {
        self.indicator.color()
    }

    /// Set the beam color.
    pub fn set_indicator_color(&mut self, color: Rgba8) {
        self.indicator.set_color(color);
    }

    /// Inferred state of the engine.
    pub fn state(&self) -> PlaybackState {
        self.indicator.state()
    }

    /// Transition the engine towards `state`.
    pub fn set_state(&mut self, state: PlaybackState) {
        self.indicator.set_state(state);
    }

    /// See [`IndicatorEngine::animate_playback`].
    pub fn animate_playback(&mut self) {
        self.indicator.animate_playback();
    }

    /// See [`IndicatorEngine::stop_playback`].
    pub fn stop_playback(&mut self) {
        self.indicator.stop_playback();
    }

    /// See [`IndicatorEngine::pause_playback`].
    pub fn pause_playback(&mut self) {
        self.indicator.pause_playback();
    }

    /// See [`IndicatorEngine::reset`].
    pub fn reset(&mut self) {
        self.indicator.reset();
    }

    /// See [`IndicatorEngine::set_completion`].
    pub fn set_completion(&mut self, completion: impl FnOnce(&mut IndicatorEngine) + 'static) {
        self.indicator.set_completion(completion);
    }

    /// See [`IndicatorEngine::tick`].
    pub fn tick(&mut self) -> bool {
        self.indicator.tick()
    }

    /// See [`IndicatorEngine::snapshot`].
    pub fn snapshot(&self) -> IndicatorSnapshot {
        self.indicator.snapshot()
    }
}
