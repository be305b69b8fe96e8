use crate::{
    animation::{
        timing::TimingFunction,
        value::{AnimValue, Lerp},
    },
    foundation::{
        core::MediaTime,
        error::{IndicatorError, IndicatorResult},
    },
};

/// What a descriptor contributes outside its active interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Nothing before begin, nothing after end.
    #[default]
    Removed,
    /// Hold the final value after the end.
    Forwards,
    /// Show the initial value before the begin.
    Backwards,
    /// Both of the above.
    Both,
}

impl FillMode {
    /// Holds the final value once the active interval is over.
    pub fn fills_forwards(self) -> bool {
        matches!(self, Self::Forwards | Self::Both)
    }

    /// Shows the initial value while waiting for a delayed begin.
    pub fn fills_backwards(self) -> bool {
        matches!(self, Self::Backwards | Self::Both)
    }
}

/// How many times a descriptor's cycle runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCount {
    /// A single cycle.
    #[default]
    Once,
    /// Never ends on its own.
    Infinite,
}

/// Opaque identity handed back in a stop notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DelegateToken(pub u64);

/// Two-point interpolation.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicAnimation {
    /// Start value (usually a presentation value sampled at commit time).
    pub from: AnimValue,
    /// End value.
    pub to: AnimValue,
    /// Seconds from begin to end.
    pub duration: f64,
    /// Delay between commit and begin, in seconds.
    pub begin_offset: f64,
    /// Contribution outside the active interval.
    pub fill_mode: FillMode,
    /// Detach automatically when finished.
    pub removed_on_completion: bool,
    /// Pacing curve.
    pub timing: TimingFunction,
    /// Identity reported in stop notifications, if the committer wants them.
    pub delegate: Option<DelegateToken>,
}

impl BasicAnimation {
    /// Linear, non-filling, auto-removed interpolation from `from` to `to`.
    pub fn new(from: impl Into<AnimValue>, to: impl Into<AnimValue>, duration: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            duration,
            begin_offset: 0.0,
            fill_mode: FillMode::Removed,
            removed_on_completion: true,
            timing: TimingFunction::Linear,
            delegate: None,
        }
    }

    /// Set the fill mode.
    pub fn fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Set whether the descriptor detaches itself when finished.
    pub fn removed_on_completion(mut self, removed: bool) -> Self {
        self.removed_on_completion = removed;
        self
    }

    /// Set the pacing curve.
    pub fn timing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Delay the begin by `secs` after commit.
    pub fn begin_offset(mut self, secs: f64) -> Self {
        self.begin_offset = secs;
        self
    }

    /// Request a stop notification carrying `token`.
    pub fn delegate(mut self, token: DelegateToken) -> Self {
        self.delegate = Some(token);
        self
    }

    fn value_at(&self, local: f64) -> AnimValue {
        if self.duration <= 0.0 {
            return self.to.clone();
        }
        let t = self.timing.apply(local / self.duration);
        AnimValue::lerp(&self.from, &self.to, t)
    }
}

/// Multi-waypoint animation with explicit key times and per-segment pacing.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeAnimation {
    /// Waypoints, in order.
    pub values: Vec<AnimValue>,
    /// Normalized time of each waypoint within one cycle.
    pub key_times: Vec<f64>,
    /// Pacing of the segment starting at the waypoint with the same index.
    pub timing_functions: Vec<TimingFunction>,
    /// Seconds per cycle.
    pub duration: f64,
    /// Delay between commit and begin, in seconds.
    pub begin_offset: f64,
    /// Contribution outside the active interval.
    pub fill_mode: FillMode,
    /// Detach automatically when finished.
    pub removed_on_completion: bool,
    /// Play each cycle forwards then backwards.
    pub autoreverses: bool,
    /// Number of cycles.
    pub repeat: RepeatCount,
}

impl KeyframeAnimation {
    /// Single forward cycle, non-filling, auto-removed.
    pub fn new(
        values: Vec<AnimValue>,
        key_times: Vec<f64>,
        timing_functions: Vec<TimingFunction>,
        duration: f64,
    ) -> Self {
        Self {
            values,
            key_times,
            timing_functions,
            duration,
            begin_offset: 0.0,
            fill_mode: FillMode::Removed,
            removed_on_completion: true,
            autoreverses: false,
            repeat: RepeatCount::Once,
        }
    }

    /// Set the fill mode.
    pub fn fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Set whether the descriptor detaches itself when finished.
    pub fn removed_on_completion(mut self, removed: bool) -> Self {
        self.removed_on_completion = removed;
        self
    }

    /// Delay the begin by `secs` after commit.
    pub fn begin_offset(mut self, secs: f64) -> Self {
        self.begin_offset = secs;
        self
    }

    /// Play each cycle forwards then backwards.
    pub fn autoreverses(mut self, on: bool) -> Self {
        self.autoreverses = on;
        self
    }

    /// Set the number of cycles.
    pub fn repeat(mut self, repeat: RepeatCount) -> Self {
        self.repeat = repeat;
        self
    }

    /// Check that the waypoint tables line up.
    pub fn validate(&self) -> IndicatorResult<()> {
        if self.values.is_empty() {
            return Err(IndicatorError::animation(
                "keyframe animation needs at least one value",
            ));
        }
        if self.key_times.len() != self.values.len() {
            return Err(IndicatorError::animation(format!(
                "keyframe animation has {} values but {} key times",
                self.values.len(),
                self.key_times.len()
            )));
        }
        if self.timing_functions.len() + 1 < self.values.len() {
            return Err(IndicatorError::animation(format!(
                "keyframe animation has {} values but only {} timing functions",
                self.values.len(),
                self.timing_functions.len()
            )));
        }
        if !self.key_times.iter().all(|k| (0.0..=1.0).contains(k)) {
            return Err(IndicatorError::animation("key times must lie in [0, 1]"));
        }
        if !self.key_times.windows(2).all(|w| w[0] <= w[1]) {
            return Err(IndicatorError::animation("key times must be non-decreasing"));
        }
        Ok(())
    }

    fn cycle_len(&self) -> f64 {
        if self.autoreverses {
            self.duration * 2.0
        } else {
            self.duration
        }
    }

    // Normalized progress inside the forward waypoint table.
    fn progress_at(&self, local: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let phase = local.rem_euclid(self.cycle_len());
        if self.autoreverses && phase > self.duration {
            (self.cycle_len() - phase) / self.duration
        } else {
            phase / self.duration
        }
    }

    fn value_at_progress(&self, u: f64) -> Option<AnimValue> {
        let last = self.values.len().checked_sub(1)?;
        let idx = self.key_times.partition_point(|k| *k <= u);
        if idx == 0 {
            return Some(self.values[0].clone());
        }
        if idx > last || idx >= self.key_times.len() {
            return Some(self.values[last].clone());
        }

        let (a, b) = (idx - 1, idx);
        let span = self.key_times[b] - self.key_times[a];
        if span <= 0.0 {
            return Some(self.values[a].clone());
        }
        let local = (u - self.key_times[a]) / span;
        let eased = self
            .timing_functions
            .get(a)
            .copied()
            .unwrap_or_default()
            .apply(local);
        Some(AnimValue::lerp(&self.values[a], &self.values[b], eased))
    }

    fn final_value(&self) -> Option<AnimValue> {
        if self.autoreverses {
            self.value_at_progress(0.0)
        } else {
            self.value_at_progress(1.0)
        }
    }
}

/// One animation to be played back on a layer property.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationDescriptor {
    /// Two-point interpolation.
    Basic(BasicAnimation),
    /// Waypoint sequence.
    Keyframe(KeyframeAnimation),
}

impl AnimationDescriptor {
    /// Delay between commit and begin, in seconds.
    pub fn begin_offset(&self) -> f64 {
        match self {
            Self::Basic(a) => a.begin_offset,
            Self::Keyframe(k) => k.begin_offset,
        }
    }

    /// Contribution outside the active interval.
    pub fn fill_mode(&self) -> FillMode {
        match self {
            Self::Basic(a) => a.fill_mode,
            Self::Keyframe(k) => k.fill_mode,
        }
    }

    /// Detaches itself when finished.
    pub fn removed_on_completion(&self) -> bool {
        match self {
            Self::Basic(a) => a.removed_on_completion,
            Self::Keyframe(k) => k.removed_on_completion,
        }
    }

    /// Stop-notification identity, if requested.
    pub fn delegate(&self) -> Option<DelegateToken> {
        match self {
            Self::Basic(a) => a.delegate,
            Self::Keyframe(_) => None,
        }
    }

    /// Commanded end value: `to` for basic animations, the last waypoint for keyframes.
    pub fn target(&self) -> Option<&AnimValue> {
        match self {
            Self::Basic(a) => Some(&a.to),
            Self::Keyframe(k) => k.values.last(),
        }
    }

    /// Seconds from begin to natural completion; `None` when it never completes.
    pub fn active_duration(&self) -> Option<f64> {
        match self {
            Self::Basic(a) => Some(a.duration.max(0.0)),
            Self::Keyframe(k) => match k.repeat {
                RepeatCount::Once => Some(k.cycle_len().max(0.0)),
                RepeatCount::Infinite => None,
            },
        }
    }

    /// Absolute completion time for a descriptor that began at `begin`.
    pub fn active_end(&self, begin: MediaTime) -> Option<MediaTime> {
        self.active_duration().map(|d| begin.after(d))
    }

    /// Structural checks.
    pub fn validate(&self) -> IndicatorResult<()> {
        match self {
            Self::Basic(a) => {
                if !a.duration.is_finite() || a.duration < 0.0 {
                    return Err(IndicatorError::animation(
                        "basic animation duration must be finite and >= 0",
                    ));
                }
                Ok(())
            }
            Self::Keyframe(k) => {
                if !k.duration.is_finite() || k.duration <= 0.0 {
                    return Err(IndicatorError::animation(
                        "keyframe animation duration must be finite and > 0",
                    ));
                }
                k.validate()
            }
        }
    }

    /// Value contributed at `now` by a descriptor that begins at `begin`.
    ///
    /// `None` means the descriptor leaves the property alone at that instant.
    pub fn sample(&self, begin: MediaTime, now: MediaTime) -> Option<AnimValue> {
        let local = now.since(begin);
        if local < 0.0 {
            if !self.fill_mode().fills_backwards() {
                return None;
            }
            return self.value_at(0.0);
        }
        if let Some(d) = self.active_duration()
            && local >= d
        {
            if !self.fill_mode().fills_forwards() {
                return None;
            }
            return self.final_value();
        }
        self.value_at(local)
    }

    fn value_at(&self, local: f64) -> Option<AnimValue> {
        match self {
            Self::Basic(a) => Some(a.value_at(local)),
            Self::Keyframe(k) => k.value_at_progress(k.progress_at(local)),
        }
    }

    fn final_value(&self) -> Option<AnimValue> {
        match self {
            Self::Basic(a) => Some(a.to.clone()),
            Self::Keyframe(k) => k.final_value(),
        }
    }
}

impl From<BasicAnimation> for AnimationDescriptor {
    fn from(a: BasicAnimation) -> Self {
        Self::Basic(a)
    }
}

impl From<KeyframeAnimation> for AnimationDescriptor {
    fn from(k: KeyframeAnimation) -> Self {
        Self::Keyframe(k)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/descriptor.rs"]
mod tests;
