//! Scene building: one render pass over a route snapshot
//!
//! [`render`] maps every CAD coordinate through the affine parameters and
//! produces a complete [`Scene`] in base pixel space. The scene is rebuilt from
//! scratch on every pass, so repeated passes with the same inputs yield equal
//! scenes and nothing from a previous snapshot survives. The view transform is
//! carried alongside and applied to the whole scene at paint time.

use crate::domain::{AffineParams, CadPoint, PixelPoint, PixelRect, RouteSnapshot, ViewState, map};

use super::geometry::{current, node};

/// The current-position marker
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrentMarker {
    pub center: PixelPoint,
    pub radius: f64,
}

/// A clickable node label
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMarker {
    pub label: String,
    /// Mapped node location
    pub anchor: PixelPoint,
    /// Clickable area
    pub bounds: PixelRect,
    /// Node location in CAD space, applied on click
    pub position: CadPoint,
}

/// Everything painted for one frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// View transform applied to all layers
    pub view: ViewState,
    /// Background image placement at native size, anchored at the origin
    pub background: PixelRect,
    /// Path polyline vertices
    pub path: Vec<PixelPoint>,
    /// `None` hides the marker
    pub current: Option<CurrentMarker>,
    /// Node markers in drawing order
    pub nodes: Vec<NodeMarker>,
}

/// Build the scene for a snapshot
pub fn render(
    snapshot: &RouteSnapshot,
    params: &AffineParams,
    view: &ViewState,
    background_size: (u32, u32),
) -> Scene {
    let (width, height) = background_size;

    let path = snapshot.path.iter().map(|p| map(*p, params)).collect();

    let current = snapshot.current.map(|p| CurrentMarker {
        center: map(p, params),
        radius: current::RADIUS,
    });

    let nodes = snapshot
        .nodes
        .iter()
        .map(|n| {
            let anchor = map(n.position, params);
            NodeMarker {
                label: n.id.clone(),
                anchor,
                bounds: PixelRect::new(
                    anchor.x - node::ANCHOR_OFFSET,
                    anchor.y - node::ANCHOR_OFFSET,
                    node::width(&n.id),
                    node::HEIGHT,
                ),
                position: n.position,
            }
        })
        .collect();

    Scene {
        view: *view,
        background: PixelRect::new(0.0, 0.0, f64::from(width), f64::from(height)),
        path,
        current,
        nodes,
    }
}

impl Scene {
    /// Topmost node marker under a point in view (screen) space
    pub fn node_at(&self, screen: PixelPoint) -> Option<&NodeMarker> {
        let base = self.view.invert(screen);
        // Later markers are drawn on top
        self.nodes.iter().rev().find(|m| m.bounds.contains(base))
    }
}
