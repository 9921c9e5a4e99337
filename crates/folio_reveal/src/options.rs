//! Observer and registration options

use folio_core::{Insets, Result, RevealError};
use serde::{Deserialize, Serialize};

/// Default bottom margin: an element must be 50px past the viewport's bottom
/// edge before it counts as visible
pub const DEFAULT_ROOT_MARGIN: Insets = Insets::bottom(-50.0);

/// Bottom margin used by whole-section wrappers
pub const SECTION_ROOT_MARGIN: Insets = Insets::bottom(-100.0);

pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// How a single element is watched for visibility
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObserverConfig {
    /// Minimum visible fraction (0 to 1) of the element
    pub threshold: f32,
    /// Grows (positive) or shrinks (negative) the viewport before testing
    pub root_margin: Insets,
    /// Stop observing after the first time the element becomes visible
    pub trigger_once: bool,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root_margin: DEFAULT_ROOT_MARGIN,
            trigger_once: true,
        }
    }
}

impl ObserverConfig {
    /// Observer for whole-section wrappers (fires later, 100px inside)
    pub fn section() -> Self {
        Self {
            threshold: 0.0,
            root_margin: SECTION_ROOT_MARGIN,
            trigger_once: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(RevealError::invalid(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if !self.root_margin.is_finite() {
            return Err(RevealError::invalid("root margin must be finite"));
        }
        Ok(())
    }
}

/// What starts the reveal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealTrigger {
    /// Entering the viewport
    #[default]
    InView,
    /// Registration itself; used for above-the-fold content
    Mount,
}

/// Arguments to [`RevealEngine::register_reveal`](crate::RevealEngine::register_reveal)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RevealOptions {
    pub observer: ObserverConfig,
    /// Stagger group this element belongs to
    pub group: Option<String>,
    /// Delay override for ungrouped elements (seconds)
    pub delay: Option<f32>,
    pub trigger: RevealTrigger,
}

impl RevealOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.observer.threshold = threshold;
        self
    }

    pub fn root_margin(mut self, margin: Insets) -> Self {
        self.observer.root_margin = margin;
        self
    }

    pub fn trigger_once(mut self, once: bool) -> Self {
        self.observer.trigger_once = once;
        self
    }

    pub fn observer(mut self, observer: ObserverConfig) -> Self {
        self.observer = observer;
        self
    }

    pub fn group(mut self, key: impl Into<String>) -> Self {
        self.group = Some(key.into());
        self
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Reveal on registration instead of on viewport entry
    pub fn on_mount(mut self) -> Self {
        self.trigger = RevealTrigger::Mount;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.observer.validate()?;
        if let Some(delay) = self.delay {
            if !delay.is_finite() || delay < 0.0 {
                return Err(RevealError::invalid(format!(
                    "delay must be a non-negative number, got {delay}"
                )));
            }
        }
        if matches!(&self.group, Some(key) if key.is_empty()) {
            return Err(RevealError::invalid("group key must not be empty"));
        }
        Ok(())
    }
}

/// `[reveal]` section of the configuration file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealSettings {
    pub threshold: f32,
    pub root_margin: Insets,
    pub trigger_once: bool,
}

impl Default for RevealSettings {
    fn default() -> Self {
        let observer = ObserverConfig::default();
        Self {
            threshold: observer.threshold,
            root_margin: observer.root_margin,
            trigger_once: observer.trigger_once,
        }
    }
}

impl RevealSettings {
    pub fn observer(&self) -> ObserverConfig {
        ObserverConfig {
            threshold: self.threshold,
            root_margin: self.root_margin,
            trigger_once: self.trigger_once,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_observer_config() {
        let config = ObserverConfig::default();
        assert_eq!(config.threshold, 0.1);
        assert_eq!(config.root_margin, Insets::new(0.0, 0.0, -50.0, 0.0));
        assert!(config.trigger_once);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_threshold() {
        for threshold in [-0.1, 1.5, f32::NAN] {
            let options = RevealOptions::new().threshold(threshold);
            assert!(matches!(options.validate(), Err(RevealError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_invalid_delay_and_group() {
        assert!(RevealOptions::new().delay(-0.1).validate().is_err());
        assert!(RevealOptions::new().group("").validate().is_err());
        assert!(RevealOptions::new().delay(0.3).group("cards").validate().is_ok());
    }

    #[test]
    fn test_settings_from_toml() {
        let settings: RevealSettings = toml::from_str(
            r#"
            threshold = 0.25
            root_margin = "0px 0px -100px 0px"
            "#,
        )
        .unwrap();
        let observer = settings.observer();
        assert_eq!(observer.threshold, 0.25);
        assert_eq!(observer.root_margin, SECTION_ROOT_MARGIN);
        assert!(observer.trigger_once);
    }
}
