//! Easing curves applied to per-unit progress.
//!
//! Named curves use the standard CSS control points. A `cubic-bezier(...)`
//! curve is solved for its x coordinate with Newton-Raphson, falling back to
//! bisection when the derivative flattens out.

use std::str::FromStr;

use tracing::debug;

/// A timing curve mapping `[0, 1]` progress to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Control points `(x1, y1, x2, y2)`; `x1` and `x2` are clamped to `[0, 1]`.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    pub const EASE: Self = Self::CubicBezier(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: Self = Self::CubicBezier(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: Self = Self::CubicBezier(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: Self = Self::CubicBezier(0.42, 0.0, 0.58, 1.0);

    /// Parse an easing name. Unknown or malformed names yield [`Easing::Linear`].
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        match name {
            "linear" => Self::Linear,
            "ease" => Self::EASE,
            "ease-in" => Self::EASE_IN,
            "ease-out" => Self::EASE_OUT,
            "ease-in-out" => Self::EASE_IN_OUT,
            other => match parse_cubic_bezier(other) {
                Some((x1, y1, x2, y2)) => Self::CubicBezier(x1, y1, x2, y2),
                None => {
                    debug!(easing = other, "Unknown easing, using linear");
                    Self::Linear
                }
            },
        }
    }

    /// Eased value for `progress`, which is clamped to `[0, 1]` first.
    ///
    /// The result may leave `[0, 1]` for curves whose y control points do.
    pub fn apply(&self, progress: f64) -> f64 {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        match *self {
            Self::Linear => p,
            Self::CubicBezier(x1, y1, x2, y2) => {
                if p <= 0.0 {
                    return 0.0;
                }
                if p >= 1.0 {
                    return 1.0;
                }
                let t = solve_bezier_x(x1.clamp(0.0, 1.0), x2.clamp(0.0, 1.0), p);
                eval_cubic(0.0, y1, y2, 1.0, t)
            }
        }
    }
}

impl FromStr for Easing {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Shorthand for `Easing::parse(name).apply(progress)`.
pub fn apply_easing(progress: f64, name: &str) -> f64 {
    Easing::parse(name).apply(progress)
}

/// Parse `cubic-bezier(x1, y1, x2, y2)`.
pub fn parse_cubic_bezier(s: &str) -> Option<(f64, f64, f64, f64)> {
    let inner = s
        .trim()
        .strip_prefix("cubic-bezier(")?
        .strip_suffix(')')?;
    let values = inner
        .split(',')
        .map(|v| v.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>()?;
    match values.as_slice() {
        [x1, y1, x2, y2] => Some((*x1, *y1, *x2, *y2)),
        _ => None,
    }
}

/// B(t) = (1-t)^3*p0 + 3*(1-t)^2*t*p1 + 3*(1-t)*t^2*p2 + t^3*p3
fn eval_cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let omt = 1.0 - t;
    let omt2 = omt * omt;
    let t2 = t * t;
    omt2 * omt * p0 + 3.0 * omt2 * t * p1 + 3.0 * omt * t2 * p2 + t2 * t * p3
}

fn eval_cubic_derivative(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let omt = 1.0 - t;
    3.0 * omt * omt * (p1 - p0) + 6.0 * omt * t * (p2 - p1) + 3.0 * t * t * (p3 - p2)
}

/// Parametric t at which the x curve (x0 = 0, x3 = 1) reaches `target_x`.
fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = eval_cubic(0.0, x1, x2, 1.0, t) - target_x;
        if x.abs() < 1e-7 {
            return t;
        }
        let dx = eval_cubic_derivative(0.0, x1, x2, 1.0, t);
        if dx.abs() < 1e-9 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    t = target_x;
    for _ in 0..32 {
        let x = eval_cubic(0.0, x1, x2, 1.0, t);
        if (x - target_x).abs() < 1e-7 {
            return t;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }
    t
}
