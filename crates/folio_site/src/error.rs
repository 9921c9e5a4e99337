//! Error types for folio_site

use folio_core::RevealError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    /// Site content could not be parsed
    #[error("invalid site content: {0}")]
    Content(#[from] toml::de::Error),

    /// A group or reveal could not be configured
    #[error(transparent)]
    Reveal(#[from] RevealError),

    /// Layout width is not a positive finite number
    #[error("invalid page width: {0}")]
    Width(f32),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for SiteError {
    fn from(err: anyhow::Error) -> Self {
        SiteError::Other(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
