//! Easing curves
//!
//! CSS-compatible timing functions. Named curves map onto their standard
//! `cubic-bezier()` control points; custom curves are solved with
//! Newton-Raphson on the x polynomial.

use folio_core::{Result, RevealError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timing curve mapping linear progress to eased progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    /// No easing
    Linear,
    /// CSS `ease`, `cubic-bezier(0.25, 0.1, 0.25, 1.0)`
    #[default]
    Ease,
    /// CSS `ease-in`, `cubic-bezier(0.42, 0, 1, 1)`
    EaseIn,
    /// CSS `ease-out`, `cubic-bezier(0, 0, 0.58, 1)`
    EaseOut,
    /// CSS `ease-in-out`, `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// Custom curve; x values must lie in [0, 1]
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Build a custom curve, rejecting control points outside the unit x range
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self> {
        let easing = Easing::CubicBezier { x1, y1, x2, y2 };
        easing.validate()?;
        Ok(easing)
    }

    pub fn validate(&self) -> Result<()> {
        if let Easing::CubicBezier { x1, y1, x2, y2 } = *self {
            if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                return Err(RevealError::invalid("bezier control points must be finite"));
            }
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(RevealError::invalid(format!(
                    "bezier x values must be in [0, 1], got {x1} and {x2}"
                )));
            }
        }
        Ok(())
    }

    /// Control points of the equivalent cubic-bezier curve
    pub fn control_points(&self) -> Option<(f32, f32, f32, f32)> {
        match *self {
            Easing::Linear => None,
            Easing::Ease => Some((0.25, 0.1, 0.25, 1.0)),
            Easing::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Easing::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Easing::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Easing::CubicBezier { x1, y1, x2, y2 } => Some((x1, y1, x2, y2)),
        }
    }

    /// Eased progress for linear progress `t` (clamped to [0, 1])
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self.control_points() {
            None => t,
            Some((x1, y1, x2, y2)) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Easing::Linear => write!(f, "linear"),
            Easing::Ease => write!(f, "ease"),
            Easing::EaseIn => write!(f, "ease-in"),
            Easing::EaseOut => write!(f, "ease-out"),
            Easing::EaseInOut => write!(f, "ease-in-out"),
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                write!(f, "cubic-bezier({x1:.2}, {y1:.2}, {x2:.2}, {y2:.2})")
            }
        }
    }
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }
    let t = solve_bezier_x(x1, x2, progress);
    bezier_component(y1, y2, t)
}

fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;
    for _ in 0..8 {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < 1e-6 {
            return t;
        }
        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    // Newton stalled on a flat segment; fall back to bisection
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..32 {
        let x = bezier_component(x1, x2, t);
        if (x - target_x).abs() < 1e-6 {
            break;
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

/// 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_derivative(p1: f32, p2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_linear() {
        let ease = Easing::Linear;
        assert!(approx_eq(ease.apply(0.25), 0.25));
        assert!(approx_eq(ease.apply(0.75), 0.75));
    }

    #[test]
    fn test_endpoints_and_clamping() {
        for ease in [
            Easing::Ease,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicBezier {
                x1: 0.25,
                y1: 0.1,
                x2: 0.25,
                y2: 1.0,
            },
        ] {
            assert!(approx_eq(ease.apply(0.0), 0.0));
            assert!(approx_eq(ease.apply(1.0), 1.0));
            assert!(approx_eq(ease.apply(-0.5), 0.0));
            assert!(approx_eq(ease.apply(1.5), 1.0));
        }
    }

    #[test]
    fn test_ease_out_decelerates() {
        let ease = Easing::EaseOut;
        assert!(ease.apply(0.25) > 0.25);
        assert!(ease.apply(0.5) > 0.5);
    }

    #[test]
    fn test_fade_curve_matches_css_ease() {
        // The fade-in-up curve uses the same control points as CSS `ease`
        let custom = Easing::cubic_bezier(0.25, 0.1, 0.25, 1.0).unwrap();
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(approx_eq(custom.apply(t), Easing::Ease.apply(t)));
        }
        let mid = custom.apply(0.5);
        assert!(mid > 0.7 && mid < 0.9, "ease midpoint should be ~0.8, got {mid}");
    }

    #[test]
    fn test_monotonic() {
        let ease = Easing::EaseInOut;
        let mut last = 0.0;
        for i in 1..=20 {
            let v = ease.apply(i as f32 / 20.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_invalid_bezier_rejected() {
        assert!(matches!(
            Easing::cubic_bezier(-0.1, 0.0, 0.5, 1.0),
            Err(RevealError::InvalidConfig(_))
        ));
        assert!(Easing::cubic_bezier(0.5, 0.0, 1.5, 1.0).is_err());
        assert!(Easing::cubic_bezier(0.5, f32::NAN, 0.5, 1.0).is_err());
    }

    #[test]
    fn test_display_css() {
        assert_eq!(Easing::EaseOut.to_string(), "ease-out");
        assert_eq!(
            Easing::CubicBezier {
                x1: 0.25,
                y1: 0.1,
                x2: 0.25,
                y2: 1.0
            }
            .to_string(),
            "cubic-bezier(0.25, 0.10, 0.25, 1.00)"
        );
    }
}
