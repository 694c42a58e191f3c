//! Pure domain types with minimal dependencies
//!
//! This module contains the coordinate types, the affine mapping, route data
//! and view state. Types here have no framework dependencies (cosmic, iced,
//! etc.) so they can be used from the watcher thread and in tests.

pub mod geometry;
pub mod route;
pub mod view;

pub use geometry::*;
pub use route::*;
pub use view::*;
