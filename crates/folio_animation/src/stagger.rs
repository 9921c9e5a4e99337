//! Stagger sequencing
//!
//! Offsets the start of otherwise identical entrance animations so siblings
//! cascade instead of firing together. Item `i` of a group starts after
//! `base_delay + i * increment` seconds.

use folio_core::{Result, RevealError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Compute the effective delay of every item from its position in `items`
///
/// Pure: the same inputs always produce the same mapping, in input order.
/// An empty sequence yields an empty mapping whatever the parameters. A
/// negative increment is rejected because it would reverse the cascade.
/// Duplicate items keep their first position.
pub fn sequence<K>(items: &[K], base_delay: f32, increment: f32) -> Result<IndexMap<K, f32>>
where
    K: Copy + Eq + Hash,
{
    if items.is_empty() {
        return Ok(IndexMap::new());
    }
    validate_params(base_delay, increment)?;

    let mut delays = IndexMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        delays
            .entry(*item)
            .or_insert_with(|| delay_at(base_delay, increment, index));
    }
    Ok(delays)
}

/// Delay of the item at `index`
pub fn delay_at(base_delay: f32, increment: f32, index: usize) -> f32 {
    base_delay + index as f32 * increment
}

fn validate_params(base_delay: f32, increment: f32) -> Result<()> {
    if !base_delay.is_finite() {
        return Err(RevealError::invalid(format!(
            "stagger base delay must be finite, got {base_delay}"
        )));
    }
    if !increment.is_finite() || increment < 0.0 {
        return Err(RevealError::invalid(format!(
            "stagger increment must be a non-negative number, got {increment}"
        )));
    }
    Ok(())
}

/// Stagger timing carried by container variants
///
/// Mirrors the `delayChildren` / `staggerChildren` pair of a list container.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaggerPreset {
    /// Delay before the first child starts (seconds)
    pub delay_children: f32,
    /// Added per child index (seconds)
    pub stagger_children: f32,
}

impl StaggerPreset {
    pub const fn new(delay_children: f32, stagger_children: f32) -> Self {
        Self {
            delay_children,
            stagger_children,
        }
    }

    /// Unlike a bare [`sequence`], a preset also needs a non-negative base,
    /// since its delays end up on resolved variants
    pub fn validate(&self) -> Result<()> {
        if self.delay_children < 0.0 {
            return Err(RevealError::invalid(format!(
                "stagger base delay must not be negative, got {}",
                self.delay_children
            )));
        }
        validate_params(self.delay_children, self.stagger_children)
    }

    pub fn sequence<K: Copy + Eq + Hash>(&self, items: &[K]) -> Result<IndexMap<K, f32>> {
        sequence(items, self.delay_children, self.stagger_children)
    }
}

impl Default for StaggerPreset {
    fn default() -> Self {
        Self::new(0.1, 0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_delay_is_base_plus_index_times_increment() {
        for n in 0..8usize {
            for (b, d) in [(0.0, 0.0), (0.1, 0.1), (0.2, 0.15), (1.5, 0.0)] {
                let items: Vec<usize> = (0..n).collect();
                let delays = sequence(&items, b, d).unwrap();
                assert_eq!(delays.len(), n);
                for (i, item) in items.iter().enumerate() {
                    assert!(approx_eq(delays[item], b + i as f32 * d));
                }
            }
        }
    }

    #[test]
    fn test_empty_sequence_for_any_params() {
        let empty: [u32; 0] = [];
        assert!(sequence(&empty, 0.1, 0.1).unwrap().is_empty());
        assert!(sequence(&empty, 0.1, -1.0).unwrap().is_empty());
        assert!(sequence(&empty, f32::NAN, f32::NAN).unwrap().is_empty());
    }

    #[test]
    fn test_negative_increment_rejected() {
        let err = sequence(&[1, 2, 3], 0.0, -1.0).unwrap_err();
        assert!(matches!(err, RevealError::InvalidConfig(_)));
        assert!(sequence(&['a'], 0.5, -1.0).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(sequence(&[1], f32::INFINITY, 0.1).is_err());
        assert!(sequence(&[1], 0.1, f32::NAN).is_err());
    }

    #[test]
    fn test_order_follows_input_not_key() {
        let delays = sequence(&[30, 10, 20], 0.0, 1.0).unwrap();
        let keys: Vec<_> = delays.keys().copied().collect();
        assert_eq!(keys, vec![30, 10, 20]);
        assert!(approx_eq(delays[&20], 2.0));
    }

    #[test]
    fn test_duplicates_keep_first_position() {
        let delays = sequence(&['a', 'b', 'a'], 0.0, 1.0).unwrap();
        assert_eq!(delays.len(), 2);
        assert!(approx_eq(delays[&'a'], 0.0));
    }

    #[test]
    fn test_preset_matches_container_timing() {
        let delays = StaggerPreset::new(0.2, 0.1).sequence(&[0, 1, 2, 3]).unwrap();
        assert!(approx_eq(delays[&0], 0.2));
        assert!(approx_eq(delays[&3], 0.5));
        assert!(StaggerPreset::new(0.1, -0.1).validate().is_err());
    }

    #[test]
    fn test_preset_rejects_negative_base() {
        assert!(StaggerPreset::new(-0.5, 0.1).validate().is_err());
        assert!(StaggerPreset::new(0.0, 0.0).validate().is_ok());
        // The bare sequencer only needs a finite base
        assert!(sequence(&[1], -0.5, 0.1).is_ok());
    }

    #[test]
    fn test_preset_sequence_uses_its_timing() {
        let delays = StaggerPreset::new(0.2, 0.1).sequence(&['x', 'y']).unwrap();
        assert!(approx_eq(delays[&'y'], 0.3));
    }
}
