//! Visibility detector
//!
//! Wraps viewport intersection: each observer watches one element and hears
//! a boolean "is intersecting" signal, first on the evaluation right after it
//! was registered and afterwards only when that boolean flips.
//!
//! Observers are owned through [`Subscription`] guards. Dropping the guard
//! detaches the observer immediately, on every exit path, so a component that
//! unmounts (or fails half-way through setup) never leaks one. One-shot
//! observers additionally detach themselves after their first `true`.
//!
//! Callbacks run with no internal borrow held, so a callback may observe new
//! elements or drop subscriptions, including its own.

use crate::options::ObserverConfig;
use folio_core::{ElementId, ElementTree, Rect, Result};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Handle to a registered observer
    pub struct ObserverId;
}

/// One intersection report
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionEntry {
    pub element: ElementId,
    pub is_intersecting: bool,
    /// Visible fraction of the element inside the (margin-adjusted) viewport
    pub ratio: f32,
}

/// Callback invoked with intersection changes
pub type IntersectionCallback = Box<dyn FnMut(&IntersectionEntry)>;

struct Observer {
    element: ElementId,
    config: ObserverConfig,
    last: Option<bool>,
    /// Taken out while the callback runs
    callback: Option<IntersectionCallback>,
}

#[derive(Default)]
struct DetectorShared {
    observers: RefCell<SlotMap<ObserverId, Observer>>,
}

impl DetectorShared {
    fn release(&self, id: ObserverId) -> bool {
        self.observers.borrow_mut().remove(id).is_some()
    }
}

/// Guard that keeps an observer alive; dropping it unobserves
#[must_use = "dropping a Subscription immediately stops observing"]
pub struct Subscription {
    id: ObserverId,
    shared: Weak<DetectorShared>,
}

impl Subscription {
    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Whether the observer is still registered (one-shot observers detach
    /// themselves after firing)
    pub fn is_active(&self) -> bool {
        match self.shared.upgrade() {
            Some(shared) => {
                let observers = shared.observers.borrow();
                observers.contains_key(self.id)
            }
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            if shared.release(self.id) {
                tracing::trace!("observer {:?} released", self.id);
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Compute the intersection of `bounds` with the margin-adjusted viewport
///
/// Returns `(is_intersecting, ratio)`. Zero-area elements count as fully
/// visible while they touch the root.
pub fn intersect(viewport: Rect, bounds: Rect, config: &ObserverConfig) -> (bool, f32) {
    let root = viewport.outset(config.root_margin);
    match bounds.intersection(&root) {
        None => (false, 0.0),
        Some(overlap) => {
            let area = bounds.area();
            let ratio = if area > 0.0 {
                (overlap.area() / area).clamp(0.0, 1.0)
            } else {
                1.0
            };
            (ratio >= config.threshold, ratio)
        }
    }
}

/// Registry of element observers
#[derive(Clone, Default)]
pub struct VisibilityDetector {
    shared: Rc<DetectorShared>,
}

impl VisibilityDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `element`
    ///
    /// Returns `Ok(None)` without registering anything when the element is
    /// not mounted: during teardown a stale handle is expected, not an error.
    pub fn observe<F>(
        &self,
        elements: &ElementTree,
        element: ElementId,
        config: ObserverConfig,
        callback: F,
    ) -> Result<Option<Subscription>>
    where
        F: FnMut(&IntersectionEntry) + 'static,
    {
        config.validate()?;
        if !elements.is_mounted(element) {
            tracing::debug!("observe skipped for detached element {:?}", element);
            return Ok(None);
        }

        let id = self.shared.observers.borrow_mut().insert(Observer {
            element,
            config,
            last: None,
            callback: Some(Box::new(callback)),
        });
        tracing::trace!("observer {:?} attached to {:?}", id, element);

        Ok(Some(Subscription {
            id,
            shared: Rc::downgrade(&self.shared),
        }))
    }

    /// Explicitly stop observing; equivalent to dropping the guard
    pub fn unobserve(&self, subscription: Subscription) {
        drop(subscription);
    }

    /// Test every observer against `viewport` and deliver changes
    ///
    /// Returns the number of entries delivered. Observers whose element is
    /// no longer mounted are skipped.
    pub fn evaluate(&self, viewport: Rect, elements: &ElementTree) -> usize {
        let pending: SmallVec<[(ObserverId, IntersectionEntry, bool); 16]> = {
            let mut observers = self.shared.observers.borrow_mut();
            observers
                .iter_mut()
                .filter_map(|(id, observer)| {
                    let bounds = elements.bounds(observer.element)?;
                    let (is_intersecting, ratio) = intersect(viewport, bounds, &observer.config);
                    if observer.last == Some(is_intersecting) {
                        return None;
                    }
                    observer.last = Some(is_intersecting);
                    let entry = IntersectionEntry {
                        element: observer.element,
                        is_intersecting,
                        ratio,
                    };
                    let spent = observer.config.trigger_once && is_intersecting;
                    Some((id, entry, spent))
                })
                .collect()
        };

        let mut delivered = 0;
        for (id, entry, spent) in pending {
            // The observer may have been released by an earlier callback
            let callback = self
                .shared
                .observers
                .borrow_mut()
                .get_mut(id)
                .and_then(|o| o.callback.take());
            let Some(mut callback) = callback else {
                continue;
            };

            callback(&entry);
            delivered += 1;

            let mut observers = self.shared.observers.borrow_mut();
            if spent {
                observers.remove(id);
                tracing::trace!("one-shot observer {:?} detached", id);
            } else if let Some(observer) = observers.get_mut(id) {
                observer.callback = Some(callback);
            }
        }

        tracing::trace!("evaluated viewport {:?}: {} entries delivered", viewport, delivered);
        delivered
    }

    /// Number of live observers
    pub fn len(&self) -> usize {
        self.shared.observers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Insets;
    use std::cell::Cell;

    fn viewport_at(scroll_y: f32) -> Rect {
        Rect::new(0.0, scroll_y, 1000.0, 800.0)
    }

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, impl FnMut(&IntersectionEntry) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |e: &IntersectionEntry| sink.borrow_mut().push(e.is_intersecting))
    }

    #[test]
    fn test_intersect_respects_bottom_margin() {
        let config = ObserverConfig::default();
        // Element top sits 20px above the viewport bottom: inside the
        // viewport, but not past the -50px margin
        let bounds = Rect::new(0.0, 780.0, 100.0, 100.0);
        let (hit, ratio) = intersect(viewport_at(0.0), bounds, &config);
        assert!(!hit);
        assert_eq!(ratio, 0.0);

        // 15px past the margin line
        let bounds = Rect::new(0.0, 735.0, 100.0, 100.0);
        let (hit, ratio) = intersect(viewport_at(0.0), bounds, &config);
        assert!(hit);
        assert!((ratio - 0.15).abs() < 1e-4);
    }

    #[test]
    fn test_threshold_gates_intersection() {
        let config = ObserverConfig {
            threshold: 0.5,
            root_margin: Insets::ZERO,
            trigger_once: false,
        };
        let bounds = Rect::new(0.0, 760.0, 100.0, 100.0);
        assert!(!intersect(viewport_at(0.0), bounds, &config).0);
        assert!(intersect(viewport_at(20.0), bounds, &config).0);
    }

    #[test]
    fn test_delivers_initial_state_then_only_changes() {
        let mut tree = ElementTree::new();
        let el = tree.mount(Rect::new(0.0, 2000.0, 100.0, 100.0));
        let detector = VisibilityDetector::new();
        let (seen, cb) = recorder();
        let config = ObserverConfig {
            trigger_once: false,
            ..Default::default()
        };
        let _sub = detector.observe(&tree, el, config, cb).unwrap().unwrap();

        detector.evaluate(viewport_at(0.0), &tree);
        detector.evaluate(viewport_at(100.0), &tree);
        detector.evaluate(viewport_at(1500.0), &tree);
        detector.evaluate(viewport_at(1600.0), &tree);
        detector.evaluate(viewport_at(0.0), &tree);

        assert_eq!(*seen.borrow(), vec![false, true, false]);
    }

    #[test]
    fn test_trigger_once_self_cancels() {
        let mut tree = ElementTree::new();
        let el = tree.mount(Rect::new(0.0, 2000.0, 100.0, 100.0));
        let detector = VisibilityDetector::new();
        let (seen, cb) = recorder();
        let sub = detector
            .observe(&tree, el, ObserverConfig::default(), cb)
            .unwrap()
            .unwrap();

        detector.evaluate(viewport_at(1500.0), &tree);
        assert!(!sub.is_active());
        assert!(detector.is_empty());

        detector.evaluate(viewport_at(0.0), &tree);
        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn test_drop_releases_observer() {
        let mut tree = ElementTree::new();
        let el = tree.mount(Rect::new(0.0, 0.0, 100.0, 100.0));
        let detector = VisibilityDetector::new();
        {
            let _sub = detector
                .observe(&tree, el, ObserverConfig::default(), |_| {})
                .unwrap();
            assert_eq!(detector.len(), 1);
        }
        assert!(detector.is_empty());
    }

    #[test]
    fn test_release_on_early_return() {
        fn setup(
            detector: &VisibilityDetector,
            tree: &ElementTree,
            el: ElementId,
        ) -> std::result::Result<Subscription, &'static str> {
            let sub = detector
                .observe(tree, el, ObserverConfig::default(), |_| {})
                .map_err(|_| "config")?
                .ok_or("detached")?;
            // A later setup step fails; the guard must still release
            measure_layout()?;
            Ok(sub)
        }

        fn measure_layout() -> std::result::Result<(), &'static str> {
            Err("layout failed")
        }

        let mut tree = ElementTree::new();
        let el = tree.mount(Rect::new(0.0, 0.0, 10.0, 10.0));
        let detector = VisibilityDetector::new();
        assert!(setup(&detector, &tree, el).is_err());
        assert!(detector.is_empty());
    }

    #[test]
    fn test_detached_element_is_noop() {
        let mut tree = ElementTree::new();
        let el = tree.mount(Rect::new(0.0, 0.0, 10.0, 10.0));
        tree.unmount(el);
        let detector = VisibilityDetector::new();
        let sub = detector
            .observe(&tree, el, ObserverConfig::default(), |_| {})
            .unwrap();
        assert!(sub.is_none());
        assert!(detector.is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut tree = ElementTree::new();
        let el = tree.mount(Rect::new(0.0, 0.0, 10.0, 10.0));
        let detector = VisibilityDetector::new();
        let config = ObserverConfig {
            threshold: 2.0,
            ..Default::default()
        };
        assert!(detector.observe(&tree, el, config, |_| {}).is_err());
    }

    #[test]
    fn test_callback_may_drop_other_subscription() {
        let mut tree = ElementTree::new();
        let a = tree.mount(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = tree.mount(Rect::new(0.0, 20.0, 10.0, 10.0));
        let detector = VisibilityDetector::new();
        let config = ObserverConfig {
            trigger_once: false,
            ..Default::default()
        };

        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let b_calls = Rc::new(Cell::new(0));

        let slot_a = Rc::clone(&slot);
        let _sub_a = detector
            .observe(&tree, a, config, move |_| {
                slot_a.borrow_mut().take();
            })
            .unwrap();
        let calls = Rc::clone(&b_calls);
        *slot.borrow_mut() = detector
            .observe(&tree, b, config, move |_| calls.set(calls.get() + 1))
            .unwrap();

        detector.evaluate(viewport_at(0.0), &tree);
        assert_eq!(b_calls.get(), 0);
        assert_eq!(detector.len(), 1);
    }
}
