//! Email delivery credentials
//!
//! Read from the `[contact]` table of `folio.toml`; each value can be
//! overridden through the environment:
//!
//! | Field         | Variable                   |
//! |---------------|----------------------------|
//! | `service_id`  | `FOLIO_EMAIL_SERVICE_ID`   |
//! | `template_id` | `FOLIO_EMAIL_TEMPLATE_ID`  |
//! | `public_key`  | `FOLIO_EMAIL_PUBLIC_KEY`   |

use crate::error::{ContactError, Result};
use serde::{Deserialize, Serialize};

pub const SERVICE_ID_VAR: &str = "FOLIO_EMAIL_SERVICE_ID";
pub const TEMPLATE_ID_VAR: &str = "FOLIO_EMAIL_TEMPLATE_ID";
pub const PUBLIC_KEY_VAR: &str = "FOLIO_EMAIL_PUBLIC_KEY";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailConfig {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
}

/// A complete set of credentials, ready to address a request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailConfig {
    /// Apply overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fields = [
            (SERVICE_ID_VAR, &mut self.service_id),
            (TEMPLATE_ID_VAR, &mut self.template_id),
            (PUBLIC_KEY_VAR, &mut self.public_key),
        ];
        for (var, field) in fields {
            if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
                tracing::debug!("{} overridden from environment", var);
                *field = Some(value);
            }
        }
        self
    }

    pub fn is_complete(&self) -> bool {
        self.credentials().is_ok()
    }

    pub fn credentials(&self) -> Result<EmailCredentials> {
        Ok(EmailCredentials {
            service_id: required(&self.service_id, "service_id")?,
            template_id: required(&self.template_id, "template_id")?,
            public_key: required(&self.public_key, "public_key")?,
        })
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or(ContactError::MissingConfig(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_named() {
        let config = EmailConfig {
            service_id: Some("svc".into()),
            template_id: Some("   ".into()),
            public_key: None,
        };
        assert_eq!(
            config.credentials(),
            Err(ContactError::MissingConfig("template_id"))
        );
        assert!(!EmailConfig::default().is_complete());
    }

    #[test]
    fn test_environment_overrides_file() {
        let config: EmailConfig = toml::from_str(
            r#"
            service_id = "file_service"
            template_id = "file_template"
            "#,
        )
        .unwrap();

        let config = config.with_overrides(|var| match var {
            SERVICE_ID_VAR => Some("env_service".to_string()),
            TEMPLATE_ID_VAR => Some(String::new()),
            PUBLIC_KEY_VAR => Some("env_key".to_string()),
            _ => None,
        });

        let creds = config.credentials().unwrap();
        assert_eq!(creds.service_id, "env_service");
        assert_eq!(creds.template_id, "file_template");
        assert_eq!(creds.public_key, "env_key");
    }
}
