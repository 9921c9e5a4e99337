//! Form submission flow

use crate::config::EmailConfig;
use crate::error::Result;
use crate::form::ContactForm;
use crate::transport::{EmailRequest, EmailTransport};
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again later.";

/// Outcome shown under the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum SubmitStatus {
    Success(String),
    Error(String),
}

impl SubmitStatus {
    pub fn message(&self) -> &str {
        match self {
            SubmitStatus::Success(msg) | SubmitStatus::Error(msg) => msg,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitStatus::Success(_))
    }
}

/// Sends contact forms through a transport, one attempt per submission
pub struct ContactSubmitter<T: EmailTransport> {
    config: EmailConfig,
    transport: T,
    is_loading: bool,
    status: Option<SubmitStatus>,
}

impl<T: EmailTransport> ContactSubmitter<T> {
    pub fn new(config: EmailConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            is_loading: false,
            status: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Status of the last submission
    pub fn status(&self) -> Option<&SubmitStatus> {
        self.status.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Submit `form`, clearing it on success
    ///
    /// Failures of any kind are logged and collapse into the generic error
    /// message; the form keeps its contents so the visitor can retry.
    pub fn submit(&mut self, form: &mut ContactForm) -> SubmitStatus {
        self.is_loading = true;
        self.status = None;

        let result = self.try_submit(form);
        self.is_loading = false;

        let status = match result {
            Ok(()) => {
                tracing::info!("contact message from {} delivered", form.email.trim());
                form.clear();
                SubmitStatus::Success(SUCCESS_MESSAGE.to_string())
            }
            Err(err) => {
                tracing::error!("error sending email: {}", err);
                SubmitStatus::Error(FAILURE_MESSAGE.to_string())
            }
        };
        self.status = Some(status.clone());
        status
    }

    /// The submission itself, with the underlying error preserved
    pub fn try_submit(&mut self, form: &ContactForm) -> Result<()> {
        form.validate()?;
        let credentials = self.config.credentials()?;
        let request = EmailRequest::new(credentials, form);
        tracing::debug!("sending contact form via service {}", request.service_id);
        self.transport.send(&request)
    }
}
