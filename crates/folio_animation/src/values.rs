//! Animatable values
//!
//! [`VisualState`] is the declarative, partial form used in variants: only
//! the properties a keyframe cares about are set. [`Visual`] is the fully
//! resolved form a renderer consumes, with every property filled in.

use serde::{Deserialize, Serialize};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

/// Partial visual keyframe
///
/// Unset properties fall back to the identity visual (fully opaque, no
/// offset, no blur, unit scale).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    /// Horizontal offset in px
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f32>,
    /// Vertical offset in px (positive is down)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f32>,
    /// Gaussian blur radius in px
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
}

impl VisualState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn translate_x(mut self, px: f32) -> Self {
        self.translate_x = Some(px);
        self
    }

    pub fn translate_y(mut self, px: f32) -> Self {
        self.translate_y = Some(px);
        self
    }

    pub fn blur(mut self, px: f32) -> Self {
        self.blur = Some(px);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    fn values(&self) -> [Option<f32>; 5] {
        [
            self.opacity,
            self.translate_x,
            self.translate_y,
            self.blur,
            self.scale,
        ]
    }

    /// Whether every set property is a finite number
    pub fn is_finite(&self) -> bool {
        self.values().iter().flatten().all(|v| v.is_finite())
    }

    /// Fill unset properties from the identity visual
    pub fn resolve(&self) -> Visual {
        self.resolve_over(Visual::IDENTITY)
    }

    /// Fill unset properties from `base`
    pub fn resolve_over(&self, base: Visual) -> Visual {
        Visual {
            opacity: self.opacity.unwrap_or(base.opacity),
            translate_x: self.translate_x.unwrap_or(base.translate_x),
            translate_y: self.translate_y.unwrap_or(base.translate_y),
            blur: self.blur.unwrap_or(base.blur),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

/// Fully resolved visual properties of an element
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub opacity: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub blur: f32,
    pub scale: f32,
}

impl Visual {
    pub const IDENTITY: Visual = Visual {
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        blur: 0.0,
        scale: 1.0,
    };

    /// Apply a hover overlay on top of this visual
    ///
    /// Translations add, scales multiply; `t` is the hover blend progress.
    pub fn with_overlay(&self, overlay: &VisualState, t: f32) -> Visual {
        let target = Visual {
            opacity: overlay.opacity.unwrap_or(self.opacity),
            translate_x: self.translate_x + overlay.translate_x.unwrap_or(0.0),
            translate_y: self.translate_y + overlay.translate_y.unwrap_or(0.0),
            blur: overlay.blur.unwrap_or(self.blur),
            scale: self.scale * overlay.scale.unwrap_or(1.0),
        };
        self.lerp(&target, t)
    }
}

impl Default for Visual {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Interpolate for Visual {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Visual {
            opacity: self.opacity.lerp(&other.opacity, t),
            translate_x: self.translate_x.lerp(&other.translate_x, t),
            translate_y: self.translate_y.lerp(&other.translate_y, t),
            blur: self.blur.lerp(&other.blur, t),
            scale: self.scale.lerp(&other.scale, t),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.opacity.approx_eq(&other.opacity, epsilon)
            && self.translate_x.approx_eq(&other.translate_x, epsilon)
            && self.translate_y.approx_eq(&other.translate_y, epsilon)
            && self.blur.approx_eq(&other.blur, epsilon)
            && self.scale.approx_eq(&other.scale, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_partial_state_resolves_to_identity() {
        let hidden = VisualState::new().opacity(0.0).translate_y(30.0);
        let v = hidden.resolve();
        assert_eq!(v.opacity, 0.0);
        assert_eq!(v.translate_y, 30.0);
        assert_eq!(v.blur, 0.0);
        assert_eq!(v.scale, 1.0);
    }

    #[test]
    fn test_visual_lerp_midpoint() {
        let from = VisualState::new().opacity(0.0).translate_y(30.0).blur(10.0).resolve();
        let to = Visual::IDENTITY;
        let mid = from.lerp(&to, 0.5);
        assert!(mid.approx_eq(
            &Visual {
                opacity: 0.5,
                translate_x: 0.0,
                translate_y: 15.0,
                blur: 5.0,
                scale: 1.0,
            },
            1e-5
        ));
    }

    #[test]
    fn test_hover_overlay_composes() {
        let lift = VisualState::new().scale(1.02).translate_y(-5.0);
        let hovered = Visual::IDENTITY.with_overlay(&lift, 1.0);
        assert!((hovered.scale - 1.02).abs() < 1e-6);
        assert!((hovered.translate_y + 5.0).abs() < 1e-6);

        let half = Visual::IDENTITY.with_overlay(&lift, 0.5);
        assert!((half.translate_y + 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_state_detected() {
        assert!(VisualState::new().opacity(1.0).is_finite());
        assert!(!VisualState::new().blur(f32::INFINITY).is_finite());
    }
}
