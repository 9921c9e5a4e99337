//! Reveal controller
//!
//! Per-element state machine:
//!
//! ```text
//!            intersecting                 delay + duration
//!   Hidden ───────────────▶ Revealing ───────────────────▶ Revealed
//!      ▲                        │                              │
//!      └────────────────────────┴──────────────────────────────┘
//!                 not intersecting (continuous mode only)
//! ```
//!
//! In one-shot mode `Revealed` is terminal and the controller drops its
//! detector subscription on arrival. The controller never touches the
//! element tree; callers apply the `active` marker from the returned
//! [`StateChange`].

use crate::detector::Subscription;
use crate::options::{ObserverConfig, RevealTrigger};
use folio_animation::{AnimationVariant, Visual};
use folio_core::ElementId;
use serde::Serialize;
use std::sync::Arc;

/// Tolerance when comparing animation deadlines against the clock
pub const TIME_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    #[default]
    Hidden,
    Revealing,
    Revealed,
}

impl RevealState {
    /// Value of the element's `active` marker in this state
    pub fn is_active(self) -> bool {
        !matches!(self, RevealState::Hidden)
    }
}

/// A transition taken by a controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange {
    pub from: RevealState,
    pub to: RevealState,
}

pub struct RevealController {
    element: ElementId,
    variant: Arc<AnimationVariant>,
    config: ObserverConfig,
    trigger: RevealTrigger,
    state: RevealState,
    /// Clock time the entrance was triggered; the animation itself starts
    /// `variant.delay` seconds later
    triggered_at: Option<f64>,
    visible: bool,
    revealed_once: bool,
    subscription: Option<Subscription>,
}

impl RevealController {
    pub fn new(
        element: ElementId,
        variant: Arc<AnimationVariant>,
        config: ObserverConfig,
        trigger: RevealTrigger,
    ) -> Self {
        Self {
            element,
            variant,
            config,
            trigger,
            state: RevealState::Hidden,
            triggered_at: None,
            visible: false,
            revealed_once: false,
            subscription: None,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn variant(&self) -> &Arc<AnimationVariant> {
        &self.variant
    }

    pub fn config(&self) -> &ObserverConfig {
        &self.config
    }

    pub fn trigger(&self) -> RevealTrigger {
        self.trigger
    }

    /// Last intersection state reported by the detector
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn revealed_once(&self) -> bool {
        self.revealed_once
    }

    /// No further transitions can happen
    pub fn is_terminal(&self) -> bool {
        self.state == RevealState::Revealed && self.is_one_shot()
    }

    fn is_one_shot(&self) -> bool {
        self.config.trigger_once || self.trigger == RevealTrigger::Mount
    }

    /// Whether the controller still holds a live detector subscription
    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Hand over a detector subscription, releasing any previous one
    pub fn attach(&mut self, subscription: Option<Subscription>) {
        self.subscription = subscription;
    }

    /// Swap in new options on re-registration; the current state is kept
    pub fn reconfigure(
        &mut self,
        variant: Arc<AnimationVariant>,
        config: ObserverConfig,
        trigger: RevealTrigger,
    ) {
        self.variant = variant;
        self.config = config;
        self.trigger = trigger;
    }

    /// Clock time at which `Revealing` completes
    pub fn deadline(&self) -> Option<f64> {
        match (self.state, self.triggered_at) {
            (RevealState::Revealing, Some(at)) => Some(at + f64::from(self.variant.total_secs())),
            _ => None,
        }
    }

    /// Feed an intersection change
    ///
    /// `trigger_time` is only evaluated when the element actually starts
    /// revealing, so stagger groups can anchor lazily.
    pub fn on_intersection(
        &mut self,
        intersecting: bool,
        trigger_time: impl FnOnce() -> f64,
    ) -> Option<StateChange> {
        let was_visible = std::mem::replace(&mut self.visible, intersecting);

        match (self.state, intersecting) {
            (RevealState::Hidden, true) => self.activate(trigger_time()),
            // Only leaving the viewport hides; a first "not intersecting"
            // report for an element started by its group does not
            (RevealState::Revealing | RevealState::Revealed, false)
                if was_visible && !self.is_one_shot() =>
            {
                self.triggered_at = None;
                self.transition(RevealState::Hidden)
            }
            _ => None,
        }
    }

    /// Start revealing without an intersection of its own, e.g. when a
    /// sibling activates the element's stagger group
    pub fn activate(&mut self, trigger_time: f64) -> Option<StateChange> {
        if self.state != RevealState::Hidden {
            return None;
        }
        self.triggered_at = Some(trigger_time);
        self.transition(RevealState::Revealing)
    }

    /// Advance the timer; completes `Revealing` once its deadline has passed
    pub fn poll(&mut self, now: f64) -> Option<StateChange> {
        let deadline = self.deadline()?;
        if now + TIME_EPSILON < deadline {
            return None;
        }

        self.revealed_once = true;
        let change = self.transition(RevealState::Revealed);
        if self.is_one_shot() && self.subscription.take().is_some() {
            tracing::trace!("{:?} revealed for good, subscription released", self.element);
        }
        change
    }

    fn transition(&mut self, to: RevealState) -> Option<StateChange> {
        if self.state == to {
            return None;
        }
        let from = std::mem::replace(&mut self.state, to);
        Some(StateChange { from, to })
    }

    /// Visual state at clock time `now`
    pub fn sample(&self, now: f64) -> Visual {
        match (self.state, self.triggered_at) {
            (RevealState::Revealing, Some(at)) => self.variant.sample((now - at).max(0.0) as f32),
            (RevealState::Revealed, _) => self.variant.visible_visual(),
            _ => self.variant.hidden_visual(),
        }
    }
}

impl std::fmt::Debug for RevealController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealController")
            .field("element", &self.element)
            .field("state", &self.state)
            .field("triggered_at", &self.triggered_at)
            .field("trigger_once", &self.config.trigger_once)
            .finish()
    }
}
