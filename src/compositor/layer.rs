use crate::{
    animation::{
        descriptor::{AnimationDescriptor, DelegateToken},
        value::AnimValue,
    },
    foundation::core::{BezPath, MediaTime, Point, Rect, Rgba8},
};

/// Slot a descriptor is attached under. Attaching under an occupied slot supersedes the
/// previous descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationKey {
    /// Transient path change: the playback seed or the settle-to-rest step.
    Path,
    /// Looping waypoint animation.
    Loop,
    /// Layer opacity fade.
    Opacity,
}

/// Layer property a descriptor drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    /// Shape geometry.
    Path,
    /// Alpha multiplier.
    Opacity,
}

impl AnimationKey {
    /// Property driven by descriptors under this key.
    pub fn property(self) -> Property {
        match self {
            Self::Path | Self::Loop => Property::Path,
            Self::Opacity => Property::Opacity,
        }
    }
}

/// Completion notification for a descriptor that asked for one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StopEvent {
    /// Token the descriptor was committed with.
    pub token: DelegateToken,
    /// `true` when the active duration elapsed, `false` when superseded or removed first.
    pub finished: bool,
}

#[derive(Clone, Debug)]
struct Attached {
    key: AnimationKey,
    descriptor: AnimationDescriptor,
    begin: MediaTime,
    completed: bool,
}

/// A compositing layer: model properties plus the descriptors animating them.
///
/// Descriptors are applied in attachment order on top of the model value, so the most
/// recently attached contributor wins where several overlap.
#[derive(Clone, Debug)]
pub struct Layer {
    opacity: f64,
    path: BezPath,
    fill: Rgba8,
    frame: Rect,
    animations: Vec<Attached>,
    pending: Vec<StopEvent>,
}

impl Default for Layer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer {
    /// Fully opaque layer with an empty path and a zero frame.
    pub fn new() -> Self {
        Self {
            opacity: 1.0,
            path: BezPath::new(),
            fill: Rgba8::default(),
            frame: Rect::ZERO,
            animations: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Model opacity.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Set the model opacity.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Model path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Set the model path.
    pub fn set_path(&mut self, path: BezPath) {
        self.path = path;
    }

    /// Fill color.
    pub fn fill(&self) -> Rgba8 {
        self.fill
    }

    /// Set the fill color. Never animated.
    pub fn set_fill(&mut self, fill: Rgba8) {
        self.fill = fill;
    }

    /// Frame in the parent's coordinate space.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Set the frame.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Center of the frame in the parent's coordinate space.
    pub fn position(&self) -> Point {
        self.frame.center()
    }

    /// Move the frame so its center lands on `position`, keeping its size.
    pub fn set_position(&mut self, position: Point) {
        self.frame = Rect::from_center_size(position, self.frame.size());
    }

    /// Attach `descriptor` under `key`, beginning `begin_offset` seconds after `now`.
    pub fn add_animation(
        &mut self,
        key: AnimationKey,
        descriptor: impl Into<AnimationDescriptor>,
        now: MediaTime,
    ) {
        self.remove_animation(key);
        let descriptor = descriptor.into();
        let begin = now.after(descriptor.begin_offset());
        self.animations.push(Attached {
            key,
            descriptor,
            begin,
            completed: false,
        });
    }

    /// Detach the descriptor under `key`, returning it.
    pub fn remove_animation(&mut self, key: AnimationKey) -> Option<AnimationDescriptor> {
        let idx = self.animations.iter().position(|a| a.key == key)?;
        let old = self.animations.remove(idx);
        self.report_interrupted(&old);
        Some(old.descriptor)
    }

    /// Detach every descriptor.
    pub fn remove_all_animations(&mut self) {
        for old in std::mem::take(&mut self.animations) {
            self.report_interrupted(&old);
        }
    }

    /// Descriptor currently attached under `key`.
    pub fn animation(&self, key: AnimationKey) -> Option<&AnimationDescriptor> {
        self.animations
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.descriptor)
    }

    /// Keys of the attached descriptors, in attachment order.
    pub fn animation_keys(&self) -> impl Iterator<Item = AnimationKey> + '_ {
        self.animations.iter().map(|a| a.key)
    }

    /// Number of attached descriptors.
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Stop events not yet handed out by [`Layer::advance`].
    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// Live opacity at `now`.
    pub fn presentation_opacity(&self, now: MediaTime) -> f64 {
        self.presentation(Property::Opacity, now)
            .as_scalar()
            .unwrap_or(self.opacity)
            .clamp(0.0, 1.0)
    }

    /// Live path at `now`.
    pub fn presentation_path(&self, now: MediaTime) -> BezPath {
        match self.presentation(Property::Path, now) {
            AnimValue::Path(p) => p,
            AnimValue::Scalar(_) => self.path.clone(),
        }
    }

    fn presentation(&self, property: Property, now: MediaTime) -> AnimValue {
        let mut value = match property {
            Property::Opacity => AnimValue::Scalar(self.opacity),
            Property::Path => AnimValue::Path(self.path.clone()),
        };
        for a in self
            .animations
            .iter()
            .filter(|a| a.key.property() == property)
        {
            if let Some(v) = a.descriptor.sample(a.begin, now) {
                value = v;
            }
        }
        value
    }

    /// Move the timeline to `now`: complete elapsed descriptors, drop the auto-removed ones and
    /// hand out every stop event gathered since the previous call.
    pub fn advance(&mut self, now: MediaTime) -> Vec<StopEvent> {
        for a in self.animations.iter_mut().filter(|a| !a.completed) {
            let Some(end) = a.descriptor.active_end(a.begin) else {
                continue;
            };
            if end <= now {
                a.completed = true;
                if let Some(token) = a.descriptor.delegate() {
                    self.pending.push(StopEvent {
                        token,
                        finished: true,
                    });
                }
            }
        }
        self.animations
            .retain(|a| !(a.completed && a.descriptor.removed_on_completion()));
        std::mem::take(&mut self.pending)
    }

    fn report_interrupted(&mut self, old: &Attached) {
        if old.completed {
            return;
        }
        if let Some(token) = old.descriptor.delegate() {
            tracing::trace!(?token, key = ?old.key, "delegated animation interrupted");
            self.pending.push(StopEvent {
                token,
                finished: false,
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/layer.rs"]
mod tests;
