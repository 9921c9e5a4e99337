//! Folio Animation
//!
//! Declarative entrance animations for scroll-revealed content.
//!
//! # Features
//!
//! - **Easing**: CSS-compatible timing curves, including custom cubic-beziers
//! - **Variants**: hidden/visible keyframe pairs with timing, shared by name
//! - **Registry**: one immutable table of variants and hover effects
//! - **Stagger**: deterministic per-item delays for sibling cascades

pub mod easing;
pub mod registry;
pub mod stagger;
pub mod values;
pub mod variant;

pub use easing::Easing;
pub use registry::{
    RegistryBuilder, RegistrySnapshot, VariantRegistry, CARD_HOVER, FADE_IN_UP, ITEM_HOVER,
    STAGGER_CONTAINER, STAGGER_ITEM,
};
pub use stagger::{delay_at, sequence, StaggerPreset};
pub use values::{Interpolate, Visual, VisualState};
pub use variant::{AnimationVariant, HoverEffect};
