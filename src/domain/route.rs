//! Route data: the decoded snapshot and the model that owns it

use super::geometry::CadPoint;

/// A named waypoint; ids may be empty and need not be unique
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub id: String,
    pub position: CadPoint,
}

#[cfg(test)]
impl Node {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: CadPoint::new(x, y),
        }
    }
}

/// One fully decoded view of the route document
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteSnapshot {
    /// Current position, if the document has one
    pub current: Option<CadPoint>,
    /// Path points in drawing order
    pub path: Vec<CadPoint>,
    /// Waypoints, rendered one marker each
    pub nodes: Vec<Node>,
}

#[cfg(test)]
impl RouteSnapshot {
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.path.is_empty() && self.nodes.is_empty()
    }
}

/// Owner of the displayed route snapshot
///
/// Reloads replace the snapshot wholesale. The only in-place mutation is
/// moving the current position, which lasts until the next reload.
#[derive(Debug, Default)]
pub struct RouteModel {
    snapshot: RouteSnapshot,
}

impl RouteModel {
    pub fn new(snapshot: RouteSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &RouteSnapshot {
        &self.snapshot
    }

    /// Publish a freshly decoded snapshot
    pub fn replace(&mut self, snapshot: RouteSnapshot) {
        self.snapshot = snapshot;
    }

    /// Move the current-position marker to a CAD point
    pub fn set_current(&mut self, position: CadPoint) {
        self.snapshot.current = Some(position);
    }
}
