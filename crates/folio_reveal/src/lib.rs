//! Folio Reveal
//!
//! Scroll-triggered entrance animations: elements start hidden, animate in
//! when they enter the viewport, and optionally hide again when they leave.
//!
//! # Features
//!
//! - **Visibility detection**: threshold and root-margin intersection tests
//!   with RAII subscriptions
//! - **Reveal controllers**: per-element `Hidden → Revealing → Revealed`
//!   state machines, idempotent across re-registration
//! - **Stagger groups**: sibling cascades anchored on first activation
//! - **Hover overlays**: blended on top of the revealed state
//!
//! # Example
//!
//! ```ignore
//! use folio_reveal::prelude::*;
//!
//! let mut engine = RevealEngine::new(Arc::new(VariantRegistry::builtin()));
//! engine.define_group("projects", 0.2, 0.1)?;
//!
//! for bounds in card_bounds {
//!     let card = engine.mount(bounds);
//!     engine.register_reveal(card, STAGGER_ITEM, RevealOptions::new().group("projects"));
//! }
//!
//! loop {
//!     engine.process_viewport(viewport);
//!     engine.advance(dt);
//! }
//! ```

pub mod controller;
pub mod detector;
pub mod engine;
pub mod options;


pub use controller::{RevealController, RevealState, StateChange, TIME_EPSILON};
pub use detector::{intersect, IntersectionEntry, ObserverId, Subscription, VisibilityDetector};
pub use engine::{RevealEngine, RevealTransition};
pub use options::{
    ObserverConfig, RevealOptions, RevealSettings, RevealTrigger, DEFAULT_ROOT_MARGIN,
    DEFAULT_THRESHOLD, SECTION_ROOT_MARGIN,
};

pub mod prelude {
    pub use crate::{ObserverConfig, RevealEngine, RevealOptions, RevealState, RevealTrigger};
    pub use folio_animation::{VariantRegistry, FADE_IN_UP, STAGGER_CONTAINER, STAGGER_ITEM};
    pub use folio_core::{ElementId, Insets, Rect};
    pub use std::sync::Arc;
}
