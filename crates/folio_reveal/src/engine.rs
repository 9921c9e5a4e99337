//! Reveal engine
//!
//! Owns the element tree, the visibility detector and one [`RevealController`]
//! per registered element, and drives them from two event sources:
//!
//! - [`RevealEngine::process_viewport`]: intersection evaluation
//! - [`RevealEngine::advance`]: the animation clock
//!
//! Detector callbacks only push entries onto a queue; the engine drains it
//! after evaluation, so controllers are never re-entered mid-transition.
//!
//! # Example
//!
//! ```ignore
//! let mut engine = RevealEngine::new(Arc::new(VariantRegistry::builtin()));
//! let card = engine.mount(Rect::new(0.0, 900.0, 300.0, 200.0));
//! engine.register_reveal(card, STAGGER_ITEM, RevealOptions::new().group("projects"));
//!
//! engine.process_viewport(Rect::new(0.0, 300.0, 1280.0, 800.0));
//! engine.advance(1.0 / 60.0);
//! let visual = engine.sample(card);
//! ```

use crate::controller::{RevealController, RevealState, StateChange, TIME_EPSILON};
use crate::detector::{IntersectionEntry, VisibilityDetector};
use crate::options::{RevealOptions, RevealSettings, RevealTrigger};
use folio_animation::{HoverEffect, StaggerPreset, VariantRegistry, Visual};
use folio_core::{ElementId, ElementTree, Rect, Result, RevealError};
use indexmap::IndexMap;
use serde::Serialize;
use slotmap::SecondaryMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

/// A recorded state change, for timelines and tests
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RevealTransition {
    #[serde(skip)]
    pub element: ElementId,
    pub label: Option<String>,
    pub from: RevealState,
    pub to: RevealState,
    /// Clock time of the change (seconds)
    pub at: f64,
}

/// Position in a stagger group
///
/// A departed member leaves a vacated slot behind so later siblings keep
/// their index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Slot {
    Member(ElementId),
    Vacated(usize),
}

impl Slot {
    fn member(self) -> Option<ElementId> {
        match self {
            Slot::Member(id) => Some(id),
            Slot::Vacated(_) => None,
        }
    }
}

/// Siblings sharing a base delay and per-index increment
#[derive(Debug)]
struct StaggerGroup {
    preset: StaggerPreset,
    /// Insertion order; a slot's index never changes
    slots: Vec<Slot>,
    /// Time of the group's activation; cleared when every member is hidden
    /// again
    anchor: Option<f64>,
}

impl StaggerGroup {
    fn new(preset: StaggerPreset) -> Self {
        Self {
            preset,
            slots: Vec::new(),
            anchor: None,
        }
    }

    fn members(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.slots.iter().filter_map(|slot| slot.member())
    }

    fn join(&mut self, element: ElementId) {
        if !self.slots.contains(&Slot::Member(element)) {
            self.slots.push(Slot::Member(element));
        }
    }

    fn leave(&mut self, element: ElementId) {
        if let Some(index) = self.slots.iter().position(|s| *s == Slot::Member(element)) {
            self.slots[index] = Slot::Vacated(index);
        }
    }

    /// Delays of every current member, in insertion order
    fn delays(&self) -> Result<Vec<(ElementId, f32)>> {
        Ok(self
            .preset
            .sequence(&self.slots)?
            .into_iter()
            .filter_map(|(slot, delay)| Some((slot.member()?, delay)))
            .collect())
    }

    /// Trigger time for a member whose own delay is `delay`
    ///
    /// The member's animation starts at `max(now, anchor + delay)`; the
    /// controller adds `delay` itself, hence the subtraction.
    fn trigger_time(&mut self, now: f64, delay: f32) -> f64 {
        let anchor = *self.anchor.get_or_insert(now);
        anchor.max(now - f64::from(delay))
    }
}

/// Delay `element` holds in `group`, or would get by joining it now
fn member_delay(group: Option<&StaggerGroup>, preset: StaggerPreset, element: ElementId) -> Result<f32> {
    let slot = Slot::Member(element);
    let mut slots = group.map(|g| g.slots.clone()).unwrap_or_default();
    if !slots.contains(&slot) {
        slots.push(slot);
    }
    preset
        .sequence(&slots)?
        .get(&slot)
        .copied()
        .ok_or_else(|| RevealError::invalid("stagger slot missing from sequence"))
}

struct Registration {
    controller: RevealController,
    variant_name: String,
    options: RevealOptions,
    /// Delay baked into the resolved variant
    delay: f32,
    seq: u64,
}

struct HoverState {
    effect: HoverEffect,
    hovered: bool,
    since: f64,
    /// Blend progress when the pointer last entered or left
    from: f32,
}

impl HoverState {
    fn progress(&self, now: f64) -> f32 {
        let t = self.effect.progress((now - self.since).max(0.0) as f32);
        if self.hovered {
            self.from + (1.0 - self.from) * t
        } else {
            self.from * (1.0 - t)
        }
    }
}

pub struct RevealEngine {
    registry: Arc<VariantRegistry>,
    settings: RevealSettings,
    elements: ElementTree,
    detector: VisibilityDetector,
    registrations: SecondaryMap<ElementId, Registration>,
    groups: IndexMap<String, StaggerGroup>,
    hovers: SecondaryMap<ElementId, HoverState>,
    queue: Rc<RefCell<VecDeque<IntersectionEntry>>>,
    transitions: Vec<RevealTransition>,
    viewport: Option<Rect>,
    now: f64,
    next_seq: u64,
}

impl RevealEngine {
    pub fn new(registry: Arc<VariantRegistry>) -> Self {
        Self::with_settings(registry, RevealSettings::default())
    }

    pub fn with_settings(registry: Arc<VariantRegistry>, settings: RevealSettings) -> Self {
        Self {
            registry,
            settings,
            elements: ElementTree::new(),
            detector: VisibilityDetector::new(),
            registrations: SecondaryMap::new(),
            groups: IndexMap::new(),
            hovers: SecondaryMap::new(),
            queue: Rc::new(RefCell::new(VecDeque::new())),
            transitions: Vec::new(),
            viewport: None,
            now: 0.0,
            next_seq: 0,
        }
    }

    pub fn registry(&self) -> &Arc<VariantRegistry> {
        &self.registry
    }

    pub fn settings(&self) -> &RevealSettings {
        &self.settings
    }

    /// Registration options carrying the configured observer defaults
    pub fn default_options(&self) -> RevealOptions {
        RevealOptions::new().observer(self.settings.observer())
    }

    pub fn elements(&self) -> &ElementTree {
        &self.elements
    }

    // =========================================================================
    // Element lifecycle
    // =========================================================================

    pub fn mount(&mut self, bounds: Rect) -> ElementId {
        self.elements.mount(bounds)
    }

    pub fn mount_labeled(&mut self, bounds: Rect, label: impl Into<String>) -> ElementId {
        self.elements.mount_labeled(bounds, label)
    }

    pub fn set_bounds(&mut self, element: ElementId, bounds: Rect) {
        self.elements.set_bounds(element, bounds);
    }

    /// Unmount an element, releasing its controller and subscription
    pub fn unmount(&mut self, element: ElementId) -> bool {
        if let Some(registration) = self.registrations.remove(element) {
            if let Some(key) = &registration.options.group {
                if let Some(group) = self.groups.get_mut(key) {
                    group.leave(element);
                }
            }
            tracing::debug!(
                "{:?} unmounted in state {:?}",
                element,
                registration.controller.state()
            );
        }
        self.hovers.remove(element);
        self.elements.unmount(element).is_some()
    }

    // =========================================================================
    // Stagger groups
    // =========================================================================

    /// Define a stagger group's timing
    ///
    /// Redefining with identical timing is a no-op; changing the timing of an
    /// existing group is rejected since members already hold their delays.
    pub fn define_group(&mut self, key: impl Into<String>, base: f32, increment: f32) -> Result<()> {
        self.define_group_preset(key, StaggerPreset::new(base, increment))
    }

    pub fn define_group_preset(&mut self, key: impl Into<String>, preset: StaggerPreset) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(RevealError::invalid("group key must not be empty"));
        }
        preset.validate()?;

        match self.groups.get(&key) {
            Some(group) if group.preset == preset => Ok(()),
            Some(group) => Err(RevealError::invalid(format!(
                "group `{key}` already defined with delay {} / increment {}",
                group.preset.delay_children, group.preset.stagger_children
            ))),
            None => {
                tracing::debug!(
                    "stagger group `{}`: delay {} increment {}",
                    key,
                    preset.delay_children,
                    preset.stagger_children
                );
                self.groups.insert(key, StaggerGroup::new(preset));
                Ok(())
            }
        }
    }

    /// Effective delays of a group's members, in insertion order
    pub fn group_delays(&self, key: &str) -> Option<Vec<(ElementId, f32)>> {
        self.groups.get(key)?.delays().ok()
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register `element` for a scroll reveal; returns its `active` flag
    ///
    /// Every failure is logged and reported as `false`, leaving the element
    /// hidden.
    pub fn register_reveal(&mut self, element: ElementId, variant: &str, options: RevealOptions) -> bool {
        match self.try_register_reveal(element, variant, options) {
            Ok(active) => active,
            Err(err) if err.is_teardown() => {
                tracing::debug!("reveal for {:?} skipped: {}", element, err);
                false
            }
            Err(err) => {
                tracing::warn!("reveal for {:?} rejected: {}", element, err);
                false
            }
        }
    }

    pub fn try_register_reveal(
        &mut self,
        element: ElementId,
        variant: &str,
        options: RevealOptions,
    ) -> Result<bool> {
        options.validate()?;
        if !self.elements.is_mounted(element) {
            return Err(RevealError::DetachedElement);
        }

        if let Some(existing) = self.registrations.get(element) {
            if existing.variant_name == variant && existing.options == options {
                return Ok(self.elements.is_active(element));
            }
        }

        if !self.registry.contains(variant) {
            return Err(RevealError::UnknownVariant(variant.to_string()));
        }

        // Resolve before touching group membership so a failure leaves no trace
        let (resolved, delay) = match &options.group {
            Some(key) => {
                let preset = match self.groups.get(key) {
                    Some(group) => group.preset,
                    None => self
                        .registry
                        .get(variant)
                        .and_then(|v| v.stagger)
                        .unwrap_or_default(),
                };
                preset.validate()?;
                let delay = member_delay(self.groups.get(key), preset, element)?;
                let resolved = self.registry.resolve(variant, Some(delay))?;
                self.define_group_preset(key.clone(), preset)?;
                if let Some(group) = self.groups.get_mut(key) {
                    group.join(element);
                }
                (resolved, delay)
            }
            None => {
                let resolved = self.registry.resolve(variant, options.delay)?;
                let delay = resolved.delay;
                (resolved, delay)
            }
        };

        let previous = self.registrations.remove(element);
        let (mut controller, seq) = match previous {
            Some(previous) => {
                if previous.options.group != options.group {
                    if let Some(group) = previous.options.group.as_ref().and_then(|k| self.groups.get_mut(k)) {
                        group.leave(element);
                    }
                }
                let mut controller = previous.controller;
                controller.reconfigure(resolved, options.observer, options.trigger);
                tracing::debug!("{:?} re-registered as `{}`", element, variant);
                (controller, previous.seq)
            }
            None => {
                let seq = self.next_seq;
                self.next_seq += 1;
                tracing::debug!("{:?} registered as `{}` (delay {:.2}s)", element, variant, delay);
                (
                    RevealController::new(element, resolved, options.observer, options.trigger),
                    seq,
                )
            }
        };

        match options.trigger {
            RevealTrigger::InView if !controller.is_terminal() => {
                let queue = Rc::clone(&self.queue);
                let subscription = self.detector.observe(
                    &self.elements,
                    element,
                    options.observer,
                    move |entry: &IntersectionEntry| queue.borrow_mut().push_back(*entry),
                )?;
                controller.attach(subscription);
            }
            _ => controller.attach(None),
        }

        let reveal_on_mount = options.trigger == RevealTrigger::Mount;
        self.registrations.insert(
            element,
            Registration {
                controller,
                variant_name: variant.to_string(),
                options,
                delay,
                seq,
            },
        );

        if reveal_on_mount {
            self.apply_intersection(element, true);
        }

        Ok(self.elements.is_active(element))
    }

    // =========================================================================
    // Event sources
    // =========================================================================

    /// Evaluate every observer against `viewport` and apply the changes
    ///
    /// Returns the number of transitions taken.
    pub fn process_viewport(&mut self, viewport: Rect) -> usize {
        self.viewport = Some(viewport);
        self.detector.evaluate(viewport, &self.elements);

        let pending: SmallVec<[IntersectionEntry; 16]> = self.queue.borrow_mut().drain(..).collect();
        let before = self.transitions.len();
        for entry in pending {
            self.apply_intersection(entry.element, entry.is_intersecting);
        }
        self.transitions.len() - before
    }

    /// Re-evaluate the last viewport, e.g. after registering new elements
    pub fn refresh(&mut self) -> usize {
        match self.viewport {
            Some(viewport) => self.process_viewport(viewport),
            None => 0,
        }
    }

    /// Advance the clock by `dt` seconds
    pub fn advance(&mut self, dt: f64) -> usize {
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!("ignoring clock step {}", dt);
            return 0;
        }
        self.advance_to(self.now + dt)
    }

    /// Advance the clock to `time`, completing every reveal due by then
    ///
    /// Completions are applied in deadline order, ties broken by
    /// registration order; each is stamped with its own deadline.
    pub fn advance_to(&mut self, time: f64) -> usize {
        if !time.is_finite() || time < self.now {
            return 0;
        }

        let mut due: SmallVec<[(f64, u64, ElementId); 16]> = self
            .registrations
            .iter()
            .filter_map(|(id, registration)| {
                let deadline = registration.controller.deadline()?;
                (deadline <= time + TIME_EPSILON).then_some((deadline, registration.seq, id))
            })
            .collect();
        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut completed = 0;
        for (deadline, _, element) in due {
            let change = self
                .registrations
                .get_mut(element)
                .and_then(|registration| registration.controller.poll(time));
            if let Some(change) = change {
                self.record(element, change, deadline.max(self.now));
                completed += 1;
            }
        }

        self.now = time;
        completed
    }

    fn apply_intersection(&mut self, element: ElementId, intersecting: bool) {
        let now = self.now;
        let Some(registration) = self.registrations.get_mut(element) else {
            return;
        };
        let delay = registration.delay;
        let group = registration.options.group.as_deref();
        let groups = &mut self.groups;
        let mut activated = None;

        let change = registration.controller.on_intersection(intersecting, || {
            match group.and_then(|key| groups.get_mut(key)) {
                Some(stagger) => {
                    if stagger.anchor.is_none() {
                        activated = group.map(str::to_owned);
                    }
                    stagger.trigger_time(now, delay)
                }
                None => now,
            }
        });

        match (change, activated) {
            (Some(change), Some(key)) => self.activate_group(&key, element, change),
            (Some(change), None) => self.record(element, change, now),
            _ => {}
        }
    }

    /// Start every hidden member of a freshly activated group
    ///
    /// Members cascade from the anchor by their own stagger delay, in
    /// insertion order, whichever member's intersection arrived first.
    fn activate_group(&mut self, key: &str, trigger: ElementId, change: StateChange) {
        let now = self.now;
        let delays = match self.groups.get(key).map(StaggerGroup::delays) {
            Some(Ok(delays)) => delays,
            Some(Err(err)) => {
                tracing::warn!("group `{}` not cascaded: {}", key, err);
                Vec::new()
            }
            None => Vec::new(),
        };
        tracing::debug!("group `{}` activated with {} members", key, delays.len());

        let mut recorded = false;
        for (member, delay) in delays {
            if member == trigger {
                self.record(trigger, change, now);
                recorded = true;
                continue;
            }
            let cascaded = self
                .registrations
                .get_mut(member)
                .and_then(|registration| registration.controller.activate(now));
            if let Some(cascaded) = cascaded {
                tracing::trace!("{:?} cascaded, starts after {:.2}s", member, delay);
                self.record(member, cascaded, now);
            }
        }
        if !recorded {
            self.record(trigger, change, now);
        }
    }

    fn record(&mut self, element: ElementId, change: StateChange, at: f64) {
        self.elements.set_active(element, change.to.is_active());
        let label = self.elements.label(element).map(str::to_owned);
        tracing::debug!(
            "{} {:?} -> {:?} at {:.3}s",
            label.as_deref().unwrap_or("<unlabeled>"),
            change.from,
            change.to,
            at
        );

        if change.to == RevealState::Hidden {
            self.release_anchor(element);
        }

        self.transitions.push(RevealTransition {
            element,
            label,
            from: change.from,
            to: change.to,
            at,
        });
    }

    /// Re-arm a group's anchor once none of its members is showing
    fn release_anchor(&mut self, element: ElementId) {
        let Some(key) = self
            .registrations
            .get(element)
            .and_then(|r| r.options.group.as_deref())
        else {
            return;
        };
        let Some(group) = self.groups.get_mut(key) else {
            return;
        };
        let registrations = &self.registrations;
        let all_hidden = group.members().all(|id| {
            registrations
                .get(id)
                .map_or(true, |r| r.controller.state() == RevealState::Hidden)
        });
        if all_hidden {
            group.anchor = None;
        }
    }

    // =========================================================================
    // Hover
    // =========================================================================

    /// Attach a named hover preset to an element
    pub fn attach_hover(&mut self, element: ElementId, name: &str) -> bool {
        if !self.elements.is_mounted(element) {
            return false;
        }
        let Some(effect) = self.registry.hover(name) else {
            tracing::warn!("unknown hover effect `{}`", name);
            return false;
        };
        self.hovers.insert(
            element,
            HoverState {
                effect: *effect,
                hovered: false,
                since: self.now,
                from: 0.0,
            },
        );
        true
    }

    /// Pointer entered (`true`) or left (`false`) the element
    pub fn set_hovered(&mut self, element: ElementId, hovered: bool) {
        let now = self.now;
        let Some(hover) = self.hovers.get_mut(element) else {
            return;
        };
        if hover.hovered == hovered {
            return;
        }
        hover.from = hover.progress(now);
        hover.hovered = hovered;
        hover.since = now;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    pub fn state(&self, element: ElementId) -> Option<RevealState> {
        self.registrations.get(element).map(|r| r.controller.state())
    }

    /// The element's `active` marker
    pub fn is_active(&self, element: ElementId) -> bool {
        self.elements.is_active(element)
    }

    /// Effective delay of the element's resolved variant
    pub fn effective_delay(&self, element: ElementId) -> Option<f32> {
        self.registrations.get(element).map(|r| r.delay)
    }

    pub fn controller(&self, element: ElementId) -> Option<&RevealController> {
        self.registrations.get(element).map(|r| &r.controller)
    }

    /// Current visual state of a mounted element
    ///
    /// Elements without a reveal render at rest; hover overlays apply on top.
    pub fn sample(&self, element: ElementId) -> Option<Visual> {
        if !self.elements.is_mounted(element) {
            return None;
        }
        let base = self
            .registrations
            .get(element)
            .map_or(Visual::IDENTITY, |r| r.controller.sample(self.now));
        Some(match self.hovers.get(element) {
            Some(hover) => base.with_overlay(&hover.effect.state, hover.progress(self.now)),
            None => base,
        })
    }

    pub fn registered(&self) -> usize {
        self.registrations.len()
    }

    /// Number of live detector subscriptions
    pub fn observer_count(&self) -> usize {
        self.detector.len()
    }

    pub fn transitions(&self) -> &[RevealTransition] {
        &self.transitions
    }

    pub fn drain_transitions(&mut self) -> Vec<RevealTransition> {
        std::mem::take(&mut self.transitions)
    }
}

impl std::fmt::Debug for RevealEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealEngine")
            .field("now", &self.now)
            .field("elements", &self.elements.len())
            .field("registered", &self.registrations.len())
            .field("groups", &self.groups.len())
            .field("observers", &self.detector.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_animation::{CARD_HOVER, FADE_IN_UP, STAGGER_ITEM};

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);

    fn engine() -> RevealEngine {
        RevealEngine::new(Arc::new(VariantRegistry::builtin()))
    }

    #[test]
    fn test_unknown_variant_stays_hidden() {
        let mut engine = engine();
        let el = engine.mount(Rect::new(0.0, 100.0, 100.0, 100.0));
        assert!(!engine.register_reveal(el, "spinIn", RevealOptions::new()));
        assert!(matches!(
            engine.try_register_reveal(el, "spinIn", RevealOptions::new()),
            Err(RevealError::UnknownVariant(_))
        ));
        assert_eq!(engine.observer_count(), 0);
        assert_eq!(engine.process_viewport(VIEWPORT), 0);
        assert!(!engine.is_active(el));
    }

    #[test]
    fn test_detached_element_is_noop() {
        let mut engine = engine();
        let el = engine.mount(Rect::new(0.0, 100.0, 100.0, 100.0));
        engine.unmount(el);
        assert!(!engine.register_reveal(el, FADE_IN_UP, RevealOptions::new()));
        assert_eq!(
            engine.try_register_reveal(el, FADE_IN_UP, RevealOptions::new()),
            Err(RevealError::DetachedElement)
        );
    }

    #[test]
    fn test_unmount_releases_subscription() {
        let mut engine = engine();
        let el = engine.mount(Rect::new(0.0, 2000.0, 100.0, 100.0));
        engine.register_reveal(el, FADE_IN_UP, RevealOptions::new());
        assert_eq!(engine.observer_count(), 1);
        assert!(engine.unmount(el));
        assert_eq!(engine.observer_count(), 0);
        assert_eq!(engine.registered(), 0);
        assert_eq!(engine.process_viewport(VIEWPORT), 0);
    }

    #[test]
    fn test_reveal_completes_on_clock() {
        let mut engine = engine();
        let el = engine.mount_labeled(Rect::new(0.0, 100.0, 100.0, 100.0), "about.header");
        engine.register_reveal(el, FADE_IN_UP, RevealOptions::new());

        assert_eq!(engine.process_viewport(VIEWPORT), 1);
        assert_eq!(engine.state(el), Some(RevealState::Revealing));
        assert!(engine.is_active(el));
        assert_eq!(engine.observer_count(), 0);

        assert_eq!(engine.advance(0.5), 0);
        assert_eq!(engine.advance(0.5), 1);
        assert_eq!(engine.state(el), Some(RevealState::Revealed));

        let last = engine.transitions().last().unwrap();
        assert_eq!(last.label.as_deref(), Some("about.header"));
        assert!((last.at - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_delay_override_extends_deadline() {
        let mut engine = engine();
        let el = engine.mount(Rect::new(0.0, 100.0, 100.0, 100.0));
        engine.register_reveal(el, FADE_IN_UP, RevealOptions::new().delay(0.2));
        assert_eq!(engine.effective_delay(el), Some(0.2));

        engine.process_viewport(VIEWPORT);
        engine.advance(0.9);
        assert_eq!(engine.state(el), Some(RevealState::Revealing));
        engine.advance(0.1);
        assert_eq!(engine.state(el), Some(RevealState::Revealed));
        assert_eq!(engine.registry().get(FADE_IN_UP).unwrap().delay, 0.0);
    }

    #[test]
    fn test_reveal_on_mount() {
        let mut engine = engine();
        let el = engine.mount(Rect::new(0.0, 5000.0, 100.0, 100.0));
        assert!(engine.register_reveal(el, FADE_IN_UP, RevealOptions::new().delay(0.3).on_mount()));
        assert_eq!(engine.state(el), Some(RevealState::Revealing));
        assert_eq!(engine.observer_count(), 0);

        engine.advance(1.1);
        assert_eq!(engine.state(el), Some(RevealState::Revealed));
    }

    #[test]
    fn test_group_redefinition() {
        let mut engine = engine();
        engine.define_group("projects", 0.2, 0.1).unwrap();
        assert!(engine.define_group("projects", 0.2, 0.1).is_ok());
        assert!(matches!(
            engine.define_group("projects", 0.1, 0.1),
            Err(RevealError::InvalidConfig(_))
        ));
        assert!(engine.define_group("bad", 0.1, -1.0).is_err());
    }

    #[test]
    fn test_removing_member_keeps_sibling_delays() {
        let mut engine = engine();
        engine.define_group("cards", 0.1, 0.1).unwrap();
        let ids: Vec<_> = (0..3)
            .map(|i| engine.mount(Rect::new(0.0, 2000.0 + i as f32 * 200.0, 100.0, 100.0)))
            .collect();
        for &id in &ids {
            engine.register_reveal(id, STAGGER_ITEM, RevealOptions::new().group("cards"));
        }
        engine.unmount(ids[0]);

        let late = engine.mount(Rect::new(0.0, 3000.0, 100.0, 100.0));
        engine.register_reveal(late, STAGGER_ITEM, RevealOptions::new().group("cards"));

        let delays: Vec<f32> = engine
            .group_delays("cards")
            .unwrap()
            .into_iter()
            .map(|(_, d)| d)
            .collect();
        let expected = [0.2, 0.3, 0.4];
        assert_eq!(delays.len(), expected.len());
        for (got, want) in delays.iter().zip(expected) {
            assert!((got - want).abs() < 1e-5, "{got} != {want}");
        }
    }

    #[test]
    fn test_first_intersection_activates_whole_group() {
        let mut engine = engine();
        engine.define_group("cards", 0.0, 0.1).unwrap();
        let first = engine.mount(Rect::new(0.0, 100.0, 100.0, 100.0));
        let second = engine.mount(Rect::new(0.0, 1200.0, 100.0, 100.0));
        engine.register_reveal(first, STAGGER_ITEM, RevealOptions::new().group("cards"));
        engine.register_reveal(second, STAGGER_ITEM, RevealOptions::new().group("cards"));

        assert_eq!(engine.process_viewport(VIEWPORT), 2);
        assert_eq!(engine.state(second), Some(RevealState::Revealing));
        let deadline = engine.controller(second).unwrap().deadline().unwrap();
        assert!((deadline - 0.7).abs() < 1e-6, "{deadline}");

        // Still subscribed until it completes
        assert_eq!(engine.observer_count(), 1);
        engine.advance(1.0);
        assert_eq!(engine.state(second), Some(RevealState::Revealed));
        assert_eq!(engine.observer_count(), 0);
    }

    #[test]
    fn test_member_joining_after_activation_starts_on_sight() {
        let mut engine = engine();
        engine.define_group("cards", 0.0, 0.1).unwrap();
        let first = engine.mount(Rect::new(0.0, 100.0, 100.0, 100.0));
        engine.register_reveal(first, STAGGER_ITEM, RevealOptions::new().group("cards"));
        engine.process_viewport(VIEWPORT);
        engine.advance(2.0);

        let late = engine.mount(Rect::new(0.0, 1200.0, 100.0, 100.0));
        engine.register_reveal(late, STAGGER_ITEM, RevealOptions::new().group("cards"));
        assert_eq!(engine.refresh(), 0);
        engine.process_viewport(Rect::new(0.0, 800.0, 1280.0, 800.0));

        // Anchor 0.0 + delay 0.1 is long past, so the animation starts now
        let deadline = engine.controller(late).unwrap().deadline().unwrap();
        assert!((deadline - 2.6).abs() < 1e-6, "{deadline}");
    }

    #[test]
    fn test_negative_group_delay_rejected_at_definition() {
        let mut engine = engine();
        assert!(matches!(
            engine.define_group("cards", -0.5, 0.1),
            Err(RevealError::InvalidConfig(_))
        ));
        assert!(engine.group_delays("cards").is_none());
    }

    #[test]
    fn test_hover_blend() {
        let mut engine = engine();
        let el = engine.mount(Rect::new(0.0, 100.0, 100.0, 100.0));
        assert!(engine.attach_hover(el, CARD_HOVER));
        assert!(!engine.attach_hover(el, "wobble"));

        assert_eq!(engine.sample(el).unwrap().scale, 1.0);
        engine.set_hovered(el, true);
        engine.advance(0.3);
        assert!((engine.sample(el).unwrap().scale - 1.02).abs() < 1e-4);

        engine.set_hovered(el, false);
        engine.advance(0.15);
        let scale = engine.sample(el).unwrap().scale;
        assert!(scale > 1.0 && scale < 1.02);
        engine.advance(0.15);
        assert!((engine.sample(el).unwrap().scale - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_clock_rejects_bad_steps() {
        let mut engine = engine();
        engine.advance(1.0);
        assert_eq!(engine.advance(-0.5), 0);
        assert_eq!(engine.advance(f64::NAN), 0);
        assert_eq!(engine.advance_to(0.5), 0);
        assert_eq!(engine.now(), 1.0);
    }
}
