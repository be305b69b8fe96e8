use kurbo::PathEl;

use crate::foundation::core::{BezPath, Point};

/// Linear interpolation between two values of the same kind.
pub trait Lerp: Sized {
    /// Value at progress `t` between `a` (0) and `b` (1).
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

impl Lerp for BezPath {
    /// Element-wise interpolation. Paths with differing structure snap to `b`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let (ea, eb) = (a.elements(), b.elements());
        if ea.len() != eb.len() {
            return b.clone();
        }

        let mut out = BezPath::new();
        for (x, y) in ea.iter().zip(eb) {
            let p = |p: &Point, q: &Point| <Point as Lerp>::lerp(p, q, t);
            let el = match (x, y) {
                (PathEl::MoveTo(p0), PathEl::MoveTo(q0)) => PathEl::MoveTo(p(p0, q0)),
                (PathEl::LineTo(p0), PathEl::LineTo(q0)) => PathEl::LineTo(p(p0, q0)),
                (PathEl::QuadTo(p0, p1), PathEl::QuadTo(q0, q1)) => {
                    PathEl::QuadTo(p(p0, q0), p(p1, q1))
                }
                (PathEl::CurveTo(p0, p1, p2), PathEl::CurveTo(q0, q1, q2)) => {
                    PathEl::CurveTo(p(p0, q0), p(p1, q1), p(p2, q2))
                }
                (PathEl::ClosePath, PathEl::ClosePath) => PathEl::ClosePath,
                _ => return b.clone(),
            };
            out.push(el);
        }
        out
    }
}

/// A value an animation descriptor can drive.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimValue {
    /// Scalar property such as opacity.
    Scalar(f64),
    /// Shape geometry.
    Path(BezPath),
}

impl AnimValue {
    /// Scalar payload, if any.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Path(_) => None,
        }
    }

    /// Path payload, if any.
    pub fn as_path(&self) -> Option<&BezPath> {
        match self {
            Self::Path(p) => Some(p),
            Self::Scalar(_) => None,
        }
    }
}

impl Lerp for AnimValue {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(x), Self::Scalar(y)) => Self::Scalar(<f64 as Lerp>::lerp(x, y, t)),
            (Self::Path(x), Self::Path(y)) => Self::Path(<BezPath as Lerp>::lerp(x, y, t)),
            _ => b.clone(),
        }
    }
}

impl From<f64> for AnimValue {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<BezPath> for AnimValue {
    fn from(p: BezPath) -> Self {
        Self::Path(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
