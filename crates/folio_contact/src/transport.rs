//! Email delivery transports

use crate::config::EmailCredentials;
use crate::error::{ContactError, Result};
use crate::form::ContactForm;
use serde::Serialize;

/// A fully addressed message for the delivery service
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmailRequest {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub template_params: serde_json::Value,
}

impl EmailRequest {
    pub fn new(credentials: EmailCredentials, form: &ContactForm) -> Self {
        Self {
            service_id: credentials.service_id,
            template_id: credentials.template_id,
            public_key: credentials.public_key,
            template_params: form.template_params(),
        }
    }
}

/// Something that can deliver an [`EmailRequest`]
///
/// Delivery is a single attempt; implementations must not retry.
pub trait EmailTransport {
    fn send(&mut self, request: &EmailRequest) -> Result<()>;
}

impl<T: EmailTransport + ?Sized> EmailTransport for Box<T> {
    fn send(&mut self, request: &EmailRequest) -> Result<()> {
        (**self).send(request)
    }
}

/// Writes the request payload to the log instead of sending it
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTransport;

impl EmailTransport for LogTransport {
    fn send(&mut self, request: &EmailRequest) -> Result<()> {
        let payload = serde_json::to_string(request)
            .map_err(|e| ContactError::Transport(format!("could not encode request: {e}")))?;
        tracing::info!("email request: {}", payload);
        Ok(())
    }
}

/// Keeps every request it is handed; optionally fails them all
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    pub sent: Vec<EmailRequest>,
    failure: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that records, then rejects with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

impl EmailTransport for RecordingTransport {
    fn send(&mut self, request: &EmailRequest) -> Result<()> {
        self.sent.push(request.clone());
        match &self.failure {
            Some(reason) => Err(ContactError::Transport(reason.clone())),
            None => Ok(()),
        }
    }
}
