//! Folio Core
//!
//! Foundational primitives shared by the Folio crates:
//!
//! - **Geometry**: points, sizes, rects, and CSS-style edge insets
//! - **Element Tree**: generational handles to mounted, renderable nodes
//! - **Errors**: the error taxonomy of the reveal engine
//!
//! # Example
//!
//! ```rust
//! use folio_core::{ElementTree, Rect};
//!
//! let mut tree = ElementTree::new();
//! let hero = tree.mount(Rect::new(0.0, 0.0, 1280.0, 720.0));
//!
//! assert!(tree.is_mounted(hero));
//! tree.unmount(hero);
//! assert!(!tree.is_mounted(hero));
//! ```

pub mod element;
pub mod error;
pub mod geometry;

pub use element::{ElementId, ElementNode, ElementTree};
pub use error::{RevealError, Result};
pub use geometry::{Insets, ParseInsetsError, Point, Rect, Size};
