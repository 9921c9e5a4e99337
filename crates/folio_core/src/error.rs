//! Error types for the reveal engine

use thiserror::Error;

/// Errors raised while configuring or registering reveal animations
///
/// None of these reach the presentation layer: registration resolves them
/// locally and the affected element simply stays hidden.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevealError {
    /// Malformed threshold, margin, delay, or increment
    #[error("invalid reveal configuration: {0}")]
    InvalidConfig(String),

    /// The element handle was unmounted (or never mounted)
    #[error("element is detached")]
    DetachedElement,

    /// No variant is registered under this name
    #[error("unknown animation variant: {0}")]
    UnknownVariant(String),
}

impl RevealError {
    /// Shorthand for building an `InvalidConfig` error
    pub fn invalid(msg: impl Into<String>) -> Self {
        RevealError::InvalidConfig(msg.into())
    }

    /// Whether this error only happens during teardown races
    pub fn is_teardown(&self) -> bool {
        matches!(self, RevealError::DetachedElement)
    }
}

/// Result type for reveal engine operations
pub type Result<T> = std::result::Result<T, RevealError>;
