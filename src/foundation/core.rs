pub use kurbo::{BezPath, Point, Rect, Shape, Size, Vec2};

/// Absolute time on the compositing timeline, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct MediaTime(pub f64);

impl MediaTime {
    /// Timeline origin.
    pub const ZERO: Self = Self(0.0);

    /// Time `secs` seconds after `self`.
    pub fn after(self, secs: f64) -> Self {
        Self(self.0 + secs)
    }

    /// Seconds elapsed from `earlier` to `self` (negative when `earlier` is in the future).
    pub fn since(self, earlier: Self) -> f64 {
        self.0 - earlier.0
    }

    /// Raw seconds.
    pub fn as_secs(self) -> f64 {
        self.0
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque red, the default beam color.
    pub const RED: Self = Self::opaque(255, 0, 0);

    /// Build a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::RED
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
