//! Animation variants
//!
//! A variant is a named pair of keyframes (hidden and visible) plus timing.
//! Variants are immutable once registered; per-use tweaks such as a custom
//! delay go through [`AnimationVariant::with_delay`], which returns a copy.

use crate::easing::Easing;
use crate::stagger::StaggerPreset;
use crate::values::{Interpolate, Visual, VisualState};
use folio_core::{Result, RevealError};
use serde::{Deserialize, Serialize};

/// Declarative entrance animation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationVariant {
    /// Visual state before the element is revealed
    pub hidden: VisualState,
    /// Visual state once the animation completes
    pub visible: VisualState,
    /// Animation duration in seconds
    pub duration: f32,
    #[serde(default)]
    pub easing: Easing,
    /// Delay in seconds between trigger and animation start
    #[serde(default)]
    pub delay: f32,
    /// Child timing, for container variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger: Option<StaggerPreset>,
}

impl AnimationVariant {
    /// Fade in from below with a blur-to-sharp transition
    pub fn fade_in_up() -> Self {
        Self {
            hidden: VisualState::new().opacity(0.0).translate_y(30.0).blur(10.0),
            visible: VisualState::new().opacity(1.0).translate_y(0.0).blur(0.0),
            duration: 0.8,
            easing: Easing::CubicBezier {
                x1: 0.25,
                y1: 0.1,
                x2: 0.25,
                y2: 1.0,
            },
            delay: 0.0,
            stagger: None,
        }
    }

    /// List or grid item, shorter than [`fade_in_up`](Self::fade_in_up)
    pub fn stagger_item() -> Self {
        Self {
            duration: 0.6,
            easing: Easing::EaseOut,
            ..Self::fade_in_up()
        }
    }

    /// List container that fades in and cascades its children
    pub fn stagger_container() -> Self {
        Self {
            hidden: VisualState::new().opacity(0.0),
            visible: VisualState::new().opacity(1.0),
            duration: 0.8,
            easing: Easing::Ease,
            delay: 0.0,
            stagger: Some(StaggerPreset::default()),
        }
    }

    /// Copy of this variant with a different delay; `self` is left untouched
    pub fn with_delay(&self, delay: f32) -> Self {
        Self {
            delay,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(RevealError::invalid(format!(
                "duration must be a non-negative number, got {}",
                self.duration
            )));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(RevealError::invalid(format!(
                "delay must be a non-negative number, got {}",
                self.delay
            )));
        }
        if !self.hidden.is_finite() || !self.visible.is_finite() {
            return Err(RevealError::invalid("keyframe values must be finite"));
        }
        self.easing.validate()?;
        if let Some(stagger) = &self.stagger {
            stagger.validate()?;
        }
        Ok(())
    }

    /// Seconds from trigger until the element is fully visible
    pub fn total_secs(&self) -> f32 {
        self.delay + self.duration
    }

    pub fn hidden_visual(&self) -> Visual {
        self.hidden.resolve()
    }

    pub fn visible_visual(&self) -> Visual {
        self.visible.resolve()
    }

    /// Visual state `elapsed` seconds after the trigger
    pub fn sample(&self, elapsed: f32) -> Visual {
        let active = elapsed - self.delay;
        if active <= 0.0 {
            return self.hidden_visual();
        }
        if self.duration <= 0.0 || active >= self.duration {
            return self.visible_visual();
        }
        let eased = self.easing.apply(active / self.duration);
        self.hidden_visual().lerp(&self.visible_visual(), eased)
    }
}

/// Pointer-hover overlay applied on top of a revealed element
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoverEffect {
    pub state: VisualState,
    /// Blend duration in seconds
    pub duration: f32,
    #[serde(default)]
    pub easing: Easing,
}

impl HoverEffect {
    /// Slight scale-up for cards
    pub fn card() -> Self {
        Self {
            state: VisualState::new().scale(1.02),
            duration: 0.3,
            easing: Easing::Ease,
        }
    }

    /// Scale-up plus a small lift for grid items
    pub fn lift() -> Self {
        Self {
            state: VisualState::new().scale(1.02).translate_y(-5.0),
            duration: 0.3,
            easing: Easing::Ease,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(RevealError::invalid(format!(
                "hover duration must be a non-negative number, got {}",
                self.duration
            )));
        }
        if !self.state.is_finite() {
            return Err(RevealError::invalid("hover values must be finite"));
        }
        self.easing.validate()
    }

    /// Blend progress `elapsed` seconds after the pointer entered
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.easing.apply(elapsed / self.duration)
    }
}
