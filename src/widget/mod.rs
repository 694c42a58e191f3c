//! Custom widgets
//!
//! This module contains the floorplan widget that paints a route scene and
//! the marker drawing helpers it uses.

pub mod drawing;
pub mod floorplan;

pub use floorplan::{Floorplan, OverlayStyle};
