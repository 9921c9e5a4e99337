//! Folio Contact
//!
//! The portfolio's contact form: field validation and a single-attempt
//! submission through a pluggable email delivery transport.
//!
//! ```ignore
//! let config = EmailConfig::default().with_env();
//! let mut submitter = ContactSubmitter::new(config, LogTransport);
//! let status = submitter.submit(&mut form);
//! println!("{}", status.message());
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod submit;
pub mod transport;

pub use config::{EmailConfig, EmailCredentials};
pub use error::{ContactError, Result};
pub use form::ContactForm;
pub use submit::{ContactSubmitter, SubmitStatus, FAILURE_MESSAGE, SUCCESS_MESSAGE};
pub use transport::{EmailRequest, EmailTransport, LogTransport, RecordingTransport};
