//! # TeeForge Core
//!
//! Core types and utilities shared across the TeeForge apparel designer.
//! Provides the fundamental abstractions for product views, geometry,
//! print-area configuration, and error handling.

pub mod constants;
pub mod error;
pub mod geom;
pub mod view;

pub use error::{EditorError, Result};
pub use geom::{Bounds, Point, Rect};
pub use view::{View, ViewMap};

pub use constants::{print_area, PrintArea};
