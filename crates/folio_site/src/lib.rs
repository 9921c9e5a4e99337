//! Folio Site
//!
//! The portfolio page itself: content for the eight sections and the layout
//! that mounts them on a [`RevealEngine`](folio_reveal::RevealEngine) with
//! their entrance and hover animations.

pub mod content;
pub mod error;
pub mod page;

pub use content::{
    About, ContactEntry, Experience, Footer, Hero, Highlight, Link, Navbar, Project, Section,
    SiteContent, Testimonial,
};
pub use error::{Result, SiteError};
pub use page::{Page, PageElement, SectionKind, SectionLayout};
