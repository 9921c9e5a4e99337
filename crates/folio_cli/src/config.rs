//! `folio.toml` handling
//!
//! Every table is optional:
//!
//! ```toml
//! [reveal]
//! threshold = 0.1
//! root_margin = "0px 0px -50px 0px"
//! trigger_once = true
//!
//! [variants.slowFade]
//! hidden = { opacity = 0.0 }
//! visible = { opacity = 1.0 }
//! duration = 1.2
//!
//! [contact]
//! service_id = "service_abc"
//! ```

use anyhow::{Context, Result};
use folio_animation::{AnimationVariant, HoverEffect, RegistryBuilder, VariantRegistry};
use folio_contact::EmailConfig;
use folio_reveal::RevealSettings;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    pub reveal: RevealSettings,
    /// Extra variants, added after the built-in ones
    pub variants: IndexMap<String, AnimationVariant>,
    /// Extra hover effects
    pub hovers: IndexMap<String, HoverEffect>,
    pub contact: EmailConfig,
}

impl FolioConfig {
    /// Load an explicit config file, or `folio.toml` from the working
    /// directory when present
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load_file(Path::new(CONFIG_FILE)),
            None => {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content)?;
        config.reveal.observer().validate()?;
        Ok(config)
    }

    /// Built-in registry extended with the configured entries
    pub fn registry(&self) -> Result<VariantRegistry> {
        let builder = RegistryBuilder::default()
            .variants(self.variants.iter().map(|(name, v)| (name.clone(), v.clone())))
            .context("Invalid [variants] entry")?;
        let builder = self
            .hovers
            .iter()
            .try_fold(builder, |b, (name, hover)| b.hover(name.clone(), *hover))
            .context("Invalid [hovers] entry")?;
        Ok(builder.build())
    }

    /// Email settings with environment overrides applied
    pub fn email(&self) -> EmailConfig {
        self.contact.clone().with_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = FolioConfig::parse("").unwrap();
        assert_eq!(config.reveal, RevealSettings::default());
        assert_eq!(config.registry().unwrap().len(), 3);
    }

    #[test]
    fn test_extra_variants() {
        let config = FolioConfig::parse(
            r#"
            [reveal]
            trigger_once = false

            [variants.slowFade]
            hidden = { opacity = 0.0 }
            visible = { opacity = 1.0 }
            duration = 1.2
            easing = { type = "ease_in_out" }
            "#,
        )
        .unwrap();

        assert!(!config.reveal.trigger_once);
        let registry = config.registry().unwrap();
        assert!(registry.contains("slowFade"));
        assert_eq!(registry.names().last(), Some("slowFade"));
    }

    #[test]
    fn test_builtin_names_cannot_be_replaced() {
        let config = FolioConfig::parse(
            r#"
            [variants.fadeInUp]
            hidden = { opacity = 0.5 }
            visible = { opacity = 1.0 }
            duration = 0.1
            "#,
        )
        .unwrap();
        assert!(config.registry().is_err());
    }

    #[test]
    fn test_rejects_bad_threshold_and_unknown_tables() {
        assert!(FolioConfig::parse("[reveal]\nthreshold = 2.0").is_err());
        assert!(FolioConfig::parse("[server]\nport = 1").is_err());
    }
}
