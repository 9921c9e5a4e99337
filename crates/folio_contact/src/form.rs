//! Contact form fields and validation

use crate::error::{ContactError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Every field is required; the email must look deliverable
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::Validation(field, "required".to_string()));
            }
        }

        if !is_plausible_email(self.email.trim()) {
            return Err(ContactError::Validation(
                "email",
                format!("`{}` is not an email address", self.email.trim()),
            ));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    /// Template parameters for the delivery service
    pub fn template_params(&self) -> serde_json::Value {
        json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "message": self.message.trim(),
        })
    }
}

/// One `@`, a non-empty local part, and a dotted domain without empty labels
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let form = ContactForm::new("Ada", "ada@example.com", "Hello there");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_required_fields() {
        let form = ContactForm::new("Ada", "ada@example.com", "  \n ");
        assert_eq!(
            form.validate(),
            Err(ContactError::Validation("message", "required".into()))
        );
        assert!(matches!(
            ContactForm::default().validate(),
            Err(ContactError::Validation("name", _))
        ));
    }

    #[test]
    fn test_email_shapes() {
        for bad in ["ada", "@example.com", "ada@example", "ada@@example.com", "ada@.com", "a da@x.io"] {
            let form = ContactForm::new("Ada", bad, "hi");
            assert!(
                matches!(form.validate(), Err(ContactError::Validation("email", _))),
                "{bad} should be rejected"
            );
        }
        let form = ContactForm::new("Ada", "ada.lovelace@mail.example.org", "hi");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_template_params_and_clear() {
        let mut form = ContactForm::new(" Ada ", "ada@example.com", "Hi");
        let params = form.template_params();
        assert_eq!(params["name"], "Ada");
        assert_eq!(params["email"], "ada@example.com");
        assert_eq!(params["message"], "Hi");

        form.clear();
        assert!(form.is_empty());
    }
}
