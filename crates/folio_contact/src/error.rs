use thiserror::Error;

/// Errors raised while submitting the contact form
///
/// The form never shows these to the visitor; every variant maps to the same
/// generic failure message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// A delivery credential is absent from both config and environment
    #[error("email delivery is not configured: missing {0}")]
    MissingConfig(&'static str),

    #[error("invalid {0}: {1}")]
    Validation(&'static str, String),

    /// The delivery service rejected or never received the message
    #[error("email transport failed: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, ContactError>;
