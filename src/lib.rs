//! A three-beam "now playing" indicator, driven entirely by animation descriptors.
//!
//! The engine commits timed descriptors onto three beam layers and an indicator-level
//! opacity layer, then lets the compositing timeline play them back:
//!
//! 1. **Play**: fade in, seed each beam from its live path, then loop over freshly randomized
//!    waypoints (each beam on its own sequence).
//! 2. **Pause**: drop the loops and settle every beam to the resting level.
//! 3. **Stop**: pause, then fade out; the completion callback runs once the fade finishes.
//!
//! The current [`PlaybackState`] is never stored. It is read back from what is attached
//! (a beam loop means playing, a positive opacity target means paused), which keeps it
//! correct under arbitrary interleaving of transitions.
//!
//! The crate ships a small in-process compositor ([`Layer`]) implementing the timeline
//! primitives the engine needs: basic and keyframe descriptors, presentation values,
//! finished/interrupted stop notifications. Hosts pump it with [`IndicatorEngine::tick`]
//! and draw from [`IndicatorEngine::snapshot`].
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic on demand**: randomness and time are injected ([`rand::RngCore`],
//!   [`Clock`]).
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animation;
mod compositor;
mod config;
mod engine;
mod foundation;
mod view;

pub use animation::descriptor::{
    AnimationDescriptor, BasicAnimation, DelegateToken, FillMode, KeyframeAnimation, RepeatCount,
};
pub use animation::timing::TimingFunction;
pub use animation::value::{AnimValue, Lerp};
pub use compositor::layer::{AnimationKey, Layer, Property, StopEvent};
pub use config::IndicatorConfig;
pub use engine::beam::{Beam, BeamPlacement, beam_path, path_level};
pub use engine::indicator::{BeamSnapshot, Completion, IndicatorEngine, IndicatorSnapshot};
pub use engine::keyframes::{key_times, loop_animation, random_levels, random_timing_functions};
pub use engine::state::{PlaybackState, derive_state};
pub use foundation::clock::{Clock, ManualClock, SystemClock};
pub use foundation::core::{BezPath, MediaTime, Point, Rect, Rgba8, Shape, Size, Vec2};
pub use foundation::error::{IndicatorError, IndicatorResult};
pub use view::IndicatorView;
