/// Named pacing curves a descriptor or keyframe segment can use.
///
/// Each curve is a cubic bezier through `(0,0)` and `(1,1)` with the classic
/// Core Animation / CSS control points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingFunction {
    /// Constant speed.
    #[default]
    Linear,
    /// Slow start and slow end.
    EaseInEaseOut,
    /// Fast start, slow end.
    EaseOut,
    /// Slow start, fast end.
    EaseIn,
}

impl TimingFunction {
    /// Uniform choice set for randomized keyframe segments.
    pub const ALL: [Self; 4] = [
        Self::Linear,
        Self::EaseInEaseOut,
        Self::EaseOut,
        Self::EaseIn,
    ];

    /// Bezier control points `(x1, y1, x2, y2)`.
    pub fn control_points(self) -> (f64, f64, f64, f64) {
        match self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::EaseInEaseOut => (0.42, 0.0, 0.58, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
        }
    }

    /// Map normalized progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            _ => {
                let (x1, y1, x2, y2) = self.control_points();
                cubic_bezier_ease(t, x1, y1, x2, y2)
            }
        }
    }
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    // Newton-Raphson on x(u) = x, then a bisection pass to tighten flat regions.
    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    let mut lo = 0.0;
    let mut hi = 1.0;
    for _ in 0..16 {
        let x_t = sample_curve(x1, x2, t);
        if (x_t - x).abs() < 1e-9 {
            break;
        }
        if x_t < x {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }

    sample_curve(y1, y2, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
