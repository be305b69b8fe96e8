use std::fmt;

use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::{
    animation::{
        descriptor::{BasicAnimation, DelegateToken, FillMode},
        timing::TimingFunction,
        value::AnimValue,
    },
    compositor::layer::{AnimationKey, Layer},
    config::IndicatorConfig,
    engine::{
        beam::{Beam, BeamPlacement, beam_path},
        keyframes::loop_animation,
        state::{PlaybackState, derive_state},
    },
    foundation::{
        clock::{Clock, SystemClock},
        core::{MediaTime, Point, Rect, Rgba8},
        error::IndicatorResult,
    },
};

/// Single-shot callback run when a stop fades out completely.
///
/// It is detached before it runs and receives the engine, so it may start a new transition or
/// register the next completion.
pub type Completion = Box<dyn FnOnce(&mut IndicatorEngine)>;

/// The three-beam playback indicator.
///
/// The engine never stores its state. [`IndicatorEngine::state`] reads it back from the
/// attached animations, so it stays truthful when transitions interrupt each other.
pub struct IndicatorEngine {
    config: IndicatorConfig,
    layer: Layer,
    beams: [Beam; 3],
    color: Rgba8,
    frame: Rect,
    completion: Option<Completion>,
    generation: u64,
    stop_token: Option<DelegateToken>,
    rng: Box<dyn RngCore>,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for IndicatorEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndicatorEngine")
            .field("state", &self.state())
            .field("frame", &self.frame)
            .field("color", &self.color)
            .field("generation", &self.generation)
            .field("completion_pending", &self.completion.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorEngine {
    /// Engine with the default config, wall clock and an entropy-seeded generator.
    pub fn new() -> Self {
        Self::build(
            IndicatorConfig::default(),
            Box::new(StdRng::from_entropy()),
            Box::new(SystemClock::new()),
        )
    }

    /// Engine with explicit config, randomness and clock. Fails only on an invalid config.
    pub fn with_parts(
        config: IndicatorConfig,
        rng: impl RngCore + 'static,
        clock: impl Clock + 'static,
    ) -> IndicatorResult<Self> {
        config.validate()?;
        Ok(Self::build(config, Box::new(rng), Box::new(clock)))
    }

    fn build(config: IndicatorConfig, rng: Box<dyn RngCore>, clock: Box<dyn Clock>) -> Self {
        let color = config.color;
        let mut layer = Layer::new();
        layer.set_opacity(0.0);

        let mut engine = Self {
            config,
            layer,
            beams: BeamPlacement::ALL.map(|p| Beam::new(p, color)),
            color,
            frame: Rect::ZERO,
            completion: None,
            generation: 0,
            stop_token: None,
            rng,
            clock,
        };
        engine.apply_layout();
        engine
    }

    /// Current state, inferred from the attached animations.
    pub fn state(&self) -> PlaybackState {
        derive_state(self.beams[0].is_looping(), self.opacity_target())
    }

    /// Run the transition towards `state`.
    pub fn set_state(&mut self, state: PlaybackState) {
        match state {
            PlaybackState::Stopped => self.stop_playback(),
            PlaybackState::Playing => self.animate_playback(),
            PlaybackState::Paused => self.pause_playback(),
        }
    }

    /// Commanded opacity of the attached fade, if any.
    pub fn opacity_target(&self) -> Option<f64> {
        self.layer
            .animation(AnimationKey::Opacity)
            .and_then(|a| a.target())
            .and_then(AnimValue::as_scalar)
    }

    /// Fade in and start every beam on its own freshly randomized loop.
    pub fn animate_playback(&mut self) {
        let now = self.clock.now();
        self.supersede();

        let fade = BasicAnimation::new(
            self.layer.presentation_opacity(now),
            1.0,
            self.config.fade_in_duration,
        )
        .fill_mode(FillMode::Both)
        .removed_on_completion(false);

        let bounds = self.local_bounds();
        for beam in &mut self.beams {
            let looped = loop_animation(&mut self.rng, bounds, &self.config);
            let Some(first) = looped.values.first().cloned() else {
                continue;
            };
            let seed = BasicAnimation::new(
                beam.layer().presentation_path(now),
                first,
                self.config.seed_duration,
            );
            let layer = beam.layer_mut();
            layer.add_animation(AnimationKey::Path, seed, now);
            layer.add_animation(AnimationKey::Loop, looped, now);
        }

        self.layer.add_animation(AnimationKey::Opacity, fade, now);
        tracing::debug!(generation = self.generation, "animate playback");
    }

    /// Settle every beam to the resting level. Opacity is left alone.
    pub fn pause_playback(&mut self) {
        let now = self.clock.now();
        self.supersede();
        self.settle_beams(now);
        tracing::debug!(generation = self.generation, "pause playback");
    }

    /// Settle, then fade out. The completion fires if the fade runs to its end.
    pub fn stop_playback(&mut self) {
        let now = self.clock.now();
        self.supersede();
        self.settle_beams(now);

        let token = DelegateToken(self.generation);
        self.stop_token = Some(token);
        let fade = BasicAnimation::new(
            self.layer.presentation_opacity(now),
            0.0,
            self.config.fade_out_duration,
        )
        .begin_offset(self.config.fade_out_delay())
        .fill_mode(FillMode::Both)
        .removed_on_completion(false)
        .delegate(token);
        self.layer.add_animation(AnimationKey::Opacity, fade, now);
        tracing::debug!(generation = self.generation, "stop playback");
    }

    /// Drop every animation and snap back to the static resting look.
    pub fn reset(&mut self) {
        self.supersede();
        self.layer.remove_all_animations();
        for beam in &mut self.beams {
            beam.layer_mut().remove_all_animations();
        }
        self.apply_layout();
        for beam in &mut self.beams {
            beam.layer_mut().set_fill(self.color);
        }
        tracing::debug!(generation = self.generation, "reset");
    }

    /// Beam fill color.
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Restyle every beam immediately. In-flight animations are untouched.
    pub fn set_color(&mut self, color: Rgba8) {
        self.color = color;
        for beam in &mut self.beams {
            beam.layer_mut().set_fill(color);
        }
    }

    /// Register the callback for the next stop that fades out completely.
    pub fn set_completion(&mut self, completion: impl FnOnce(&mut IndicatorEngine) + 'static) {
        self.completion = Some(Box::new(completion));
    }

    /// Forget the registered callback.
    pub fn clear_completion(&mut self) {
        self.completion = None;
    }

    /// Whether a callback is registered and has not fired yet.
    pub fn has_pending_completion(&self) -> bool {
        self.completion.is_some()
    }

    /// Pump the timeline: deliver stop notifications and drop finished transient animations.
    ///
    /// Returns `true` when the current stop's fade finished during this call.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        for beam in &mut self.beams {
            beam.layer_mut().advance(now);
        }

        let mut stopped = false;
        for event in self.layer.advance(now) {
            tracing::trace!(?event, "opacity animation stopped");
            if event.finished && self.stop_token == Some(event.token) {
                self.stop_token = None;
                stopped = true;
            }
        }
        if stopped {
            self.fire_completion();
        }
        stopped
    }

    fn fire_completion(&mut self) {
        if let Some(completion) = self.completion.take() {
            tracing::debug!("stop completed");
            completion(self);
        }
    }

    /// Frame in the host's coordinate space.
    pub fn bounds(&self) -> Rect {
        self.frame
    }

    /// Recompute the static beam geometry for new bounds. Never animated.
    pub fn layout(&mut self, bounds: Rect) {
        self.frame = bounds;
        self.apply_layout();
        tracing::trace!(?bounds, "layout");
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.frame.size())
    }

    fn apply_layout(&mut self) {
        let bounds = self.local_bounds();
        for beam in &mut self.beams {
            beam.apply_layout(
                bounds,
                self.config.resting_level,
                self.config.beam_width_fraction,
            );
        }
    }

    fn settle_beams(&mut self, now: MediaTime) {
        let rest = beam_path(
            self.local_bounds(),
            self.config.resting_level,
            self.config.beam_width_fraction,
        );
        for beam in &mut self.beams {
            let settle = BasicAnimation::new(
                beam.layer().presentation_path(now),
                rest.clone(),
                self.config.settle_duration,
            )
            .timing(TimingFunction::EaseOut)
            .fill_mode(FillMode::Forwards)
            .removed_on_completion(false);
            let layer = beam.layer_mut();
            layer.remove_animation(AnimationKey::Loop);
            layer.add_animation(AnimationKey::Path, settle, now);
        }
    }

    // Any new transition orphans a pending stop attempt.
    fn supersede(&mut self) {
        self.generation += 1;
        self.stop_token = None;
    }

    /// The three beams, left to right.
    pub fn beams(&self) -> &[Beam; 3] {
        &self.beams
    }

    /// Indicator-level layer carrying the opacity fades.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Active configuration.
    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Current timeline time according to the engine's clock.
    pub fn now(&self) -> MediaTime {
        self.clock.now()
    }

    /// Everything a host needs to draw the current frame.
    pub fn snapshot(&self) -> IndicatorSnapshot {
        let now = self.clock.now();
        let bounds = self.local_bounds();
        IndicatorSnapshot {
            time: now.as_secs(),
            state: self.state(),
            opacity: self.layer.presentation_opacity(now),
            color: self.color,
            frame: self.frame,
            beams: self
                .beams
                .iter()
                .map(|b| BeamSnapshot {
                    placement: b.placement(),
                    frame: b.layer().frame(),
                    level: b.level(bounds, now),
                    path: b.layer().presentation_path(now).to_svg(),
                })
                .collect(),
        }
    }
}

/// Presentation state of one beam.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BeamSnapshot {
    /// Anchoring.
    pub placement: BeamPlacement,
    /// Frame in the indicator's local space.
    pub frame: Rect,
    /// Live height, in percent.
    pub level: f64,
    /// Live outline as SVG path data, in beam-local space.
    pub path: String,
}

/// Presentation state of the whole indicator at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct IndicatorSnapshot {
    /// Timeline time, in seconds.
    pub time: f64,
    /// Inferred state.
    pub state: PlaybackState,
    /// Live opacity.
    pub opacity: f64,
    /// Beam fill.
    pub color: Rgba8,
    /// Frame in the host's space.
    pub frame: Rect,
    /// Left to right.
    pub beams: Vec<BeamSnapshot>,
}

#[cfg(test)]
#[path = "../../tests/unit/engine/indicator.rs"]
mod tests;
