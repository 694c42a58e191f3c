//! Overlay rendering module
//!
//! This module contains:
//! - Scene building from a route snapshot (the render pass)
//! - Geometry constants for the path and markers
//! - Mesh building using iced (for the anti-aliased path)

pub mod geometry;
pub mod mesh;
pub mod scene;

pub use scene::{CurrentMarker, NodeMarker, Scene, render};
