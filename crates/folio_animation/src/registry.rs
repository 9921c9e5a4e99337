//! Variant registry
//!
//! One shared, read-only table of named variants replaces the animation
//! literals each page section would otherwise declare for itself. The
//! registry has no mutating methods: it is assembled once through a
//! [`RegistryBuilder`] and then shared behind an `Arc`.

use crate::variant::{AnimationVariant, HoverEffect};
use folio_core::{Result, RevealError};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Section-level fade from below
pub const FADE_IN_UP: &str = "fadeInUp";
/// Individual card or list entry
pub const STAGGER_ITEM: &str = "staggerItem";
/// Container that cascades its children
pub const STAGGER_CONTAINER: &str = "staggerContainer";
/// Card hover scale
pub const CARD_HOVER: &str = "cardHover";
/// Grid item hover scale and lift
pub const ITEM_HOVER: &str = "itemHover";

/// Immutable name → variant table
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    variants: IndexMap<String, Arc<AnimationVariant>>,
    hovers: IndexMap<String, HoverEffect>,
}

impl VariantRegistry {
    /// Registry holding only the built-in variants
    pub fn builtin() -> Self {
        Self::builder().build()
    }

    /// Start from the built-ins and add more entries
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<AnimationVariant>> {
        self.variants.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    /// Look up a variant, optionally overriding its delay
    ///
    /// Without an override (or with one equal to the stored delay) the shared
    /// entry is returned. An override produces a private copy, so the
    /// registry entry other elements read is never touched.
    pub fn resolve(&self, name: &str, delay: Option<f32>) -> Result<Arc<AnimationVariant>> {
        let base = self
            .variants
            .get(name)
            .ok_or_else(|| RevealError::UnknownVariant(name.to_string()))?;

        match delay {
            Some(d) if d != base.delay => {
                let copy = base.with_delay(d);
                copy.validate()?;
                Ok(Arc::new(copy))
            }
            _ => Ok(Arc::clone(base)),
        }
    }

    pub fn hover(&self, name: &str) -> Option<&HoverEffect> {
        self.hovers.get(name)
    }

    /// Variant names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.keys().map(String::as_str)
    }

    pub fn hover_names(&self) -> impl Iterator<Item = &str> {
        self.hovers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Borrowed view suitable for serialization
    pub fn snapshot(&self) -> RegistrySnapshot<'_> {
        RegistrySnapshot {
            variants: self
                .variants
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_ref()))
                .collect(),
            hovers: self.hovers.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        }
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Serializable view of a registry
#[derive(Debug, Serialize)]
pub struct RegistrySnapshot<'a> {
    pub variants: IndexMap<&'a str, &'a AnimationVariant>,
    pub hovers: IndexMap<&'a str, &'a HoverEffect>,
}

/// Mutable staging area for a [`VariantRegistry`]
#[derive(Debug)]
pub struct RegistryBuilder {
    variants: IndexMap<String, Arc<AnimationVariant>>,
    hovers: IndexMap<String, HoverEffect>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        let mut variants = IndexMap::new();
        variants.insert(FADE_IN_UP.to_string(), Arc::new(AnimationVariant::fade_in_up()));
        variants.insert(STAGGER_ITEM.to_string(), Arc::new(AnimationVariant::stagger_item()));
        variants.insert(
            STAGGER_CONTAINER.to_string(),
            Arc::new(AnimationVariant::stagger_container()),
        );

        let mut hovers = IndexMap::new();
        hovers.insert(CARD_HOVER.to_string(), HoverEffect::card());
        hovers.insert(ITEM_HOVER.to_string(), HoverEffect::lift());

        Self { variants, hovers }
    }
}

impl RegistryBuilder {
    /// Start with no entries at all
    pub fn empty() -> Self {
        Self {
            variants: IndexMap::new(),
            hovers: IndexMap::new(),
        }
    }

    /// Add a variant; names must be unique
    pub fn variant(mut self, name: impl Into<String>, variant: AnimationVariant) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(RevealError::invalid("variant name must not be empty"));
        }
        if self.variants.contains_key(&name) {
            return Err(RevealError::invalid(format!(
                "variant `{name}` is already registered"
            )));
        }
        variant
            .validate()
            .map_err(|e| RevealError::invalid(format!("variant `{name}`: {e}")))?;
        tracing::debug!("registered animation variant {}", name);
        self.variants.insert(name, Arc::new(variant));
        Ok(self)
    }

    /// Add several variants, in iteration order
    pub fn variants<I, S>(self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, AnimationVariant)>,
        S: Into<String>,
    {
        entries
            .into_iter()
            .try_fold(self, |builder, (name, variant)| builder.variant(name, variant))
    }

    /// Add a hover effect; names must be unique
    pub fn hover(mut self, name: impl Into<String>, hover: HoverEffect) -> Result<Self> {
        let name = name.into();
        if self.hovers.contains_key(&name) {
            return Err(RevealError::invalid(format!(
                "hover effect `{name}` is already registered"
            )));
        }
        hover.validate()?;
        self.hovers.insert(name, hover);
        Ok(self)
    }

    pub fn build(self) -> VariantRegistry {
        VariantRegistry {
            variants: self.variants,
            hovers: self.hovers,
        }
    }
}
