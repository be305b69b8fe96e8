use crate::{
    compositor::layer::{AnimationKey, Layer},
    foundation::core::{BezPath, MediaTime, Point, Rect, Rgba8, Shape, Size},
};

/// Horizontal anchoring of a beam inside the indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BeamPlacement {
    /// Flush with the left edge.
    Leading,
    /// Horizontally centered.
    Center,
    /// Flush with the right edge.
    Trailing,
}

impl BeamPlacement {
    /// Left to right.
    pub const ALL: [Self; 3] = [Self::Leading, Self::Center, Self::Trailing];

    /// Center of a beam of `size` inside `bounds`.
    pub fn position_in(self, bounds: Rect, size: Size) -> Point {
        let x = match self {
            Self::Leading => bounds.x0 + size.width / 2.0,
            Self::Center => bounds.center().x,
            Self::Trailing => bounds.x1 - size.width / 2.0,
        };
        Point::new(x, bounds.center().y)
    }
}

/// Beam outline at `level` percent of the height of `bounds`.
///
/// A quadrilateral anchored to the bottom-left corner: bottom-right, bottom-left, top-left,
/// top-right, closed. Every level shares this element structure so paths interpolate cleanly.
pub fn beam_path(bounds: Rect, level: f64, width_fraction: f64) -> BezPath {
    let h = bounds.height();
    let origin = Point::new(
        bounds.x0 + bounds.width() * width_fraction,
        bounds.y1 - h * level / 100.0,
    );

    let mut path = BezPath::new();
    path.move_to((origin.x, bounds.y1));
    path.line_to((bounds.x0, bounds.y1));
    path.line_to((bounds.x0, origin.y));
    path.line_to(origin);
    path.close_path();
    path
}

/// Height of `path` as a percentage of the height of `bounds`.
pub fn path_level(path: &BezPath, bounds: Rect) -> f64 {
    let h = bounds.height();
    if h <= 0.0 || path.elements().is_empty() {
        return 0.0;
    }
    (path.bounding_box().height() / h * 100.0).clamp(0.0, 100.0)
}

/// One of the three bars, owned by the engine.
#[derive(Clone, Debug)]
pub struct Beam {
    layer: Layer,
    placement: BeamPlacement,
}

impl Beam {
    pub(crate) fn new(placement: BeamPlacement, fill: Rgba8) -> Self {
        let mut layer = Layer::new();
        layer.set_fill(fill);
        Self { layer, placement }
    }

    /// Anchoring of this beam.
    pub fn placement(&self) -> BeamPlacement {
        self.placement
    }

    /// Underlying compositing layer.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub(crate) fn layer_mut(&mut self) -> &mut Layer {
        &mut self.layer
    }

    /// Whether the looping waypoint animation is attached.
    pub fn is_looping(&self) -> bool {
        self.layer.animation(AnimationKey::Loop).is_some()
    }

    /// Live height percentage at `now`, relative to the indicator's local `bounds`.
    pub fn level(&self, bounds: Rect, now: MediaTime) -> f64 {
        path_level(&self.layer.presentation_path(now), bounds)
    }

    /// Static geometry for the indicator's local `bounds`. Model writes never animate.
    pub(crate) fn apply_layout(&mut self, bounds: Rect, resting_level: f64, width_fraction: f64) {
        let size = beam_path(bounds, 100.0, width_fraction).bounding_box().size();
        self.layer.set_frame(Rect::from_origin_size(Point::ZERO, size));
        self.layer
            .set_position(self.placement.position_in(bounds, size));
        self.layer
            .set_path(beam_path(bounds, resting_level, width_fraction));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/beam.rs"]
mod tests;
