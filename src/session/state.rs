//! UI-thread session state
//!
//! The session owns the route model, the view state and the affine
//! parameters, and keeps the scene built from them current. It is only ever
//! touched from the UI thread.

use std::path::{Path, PathBuf};

use crate::domain::{AffineParams, RouteModel, RouteSnapshot, ViewState};
use crate::render::{self, Scene};

use super::interaction::{Gesture, InteractionController};

pub struct Session {
    params: AffineParams,
    route_path: PathBuf,
    background_size: (u32, u32),
    route: RouteModel,
    view: ViewState,
    controller: InteractionController,
    scene: Scene,
}

impl Session {
    /// Create a session and perform the initial load and render
    pub fn new(params: AffineParams, route_path: PathBuf, background_size: (u32, u32)) -> Self {
        let mut session = Self::with_snapshot(
            params,
            route_path,
            background_size,
            RouteSnapshot::default(),
        );
        session.reload();
        session
    }

    /// Create a session from an already decoded snapshot
    pub fn with_snapshot(
        params: AffineParams,
        route_path: PathBuf,
        background_size: (u32, u32),
        snapshot: RouteSnapshot,
    ) -> Self {
        let mut session = Self {
            params,
            route_path,
            background_size,
            route: RouteModel::new(snapshot),
            view: ViewState::default(),
            controller: InteractionController::default(),
            scene: Scene::default(),
        };
        session.rerender();
        session
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn route_path(&self) -> &Path {
        &self.route_path
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> &RouteSnapshot {
        self.route.snapshot()
    }

    /// Reload the route document and re-render
    ///
    /// A missing or undecodable document leaves the previous snapshot on
    /// screen. Rendering happens either way, so the call is idempotent.
    pub fn reload(&mut self) {
        self.route.reload(&self.route_path);
        self.rerender();
    }

    /// Route a gesture through the interaction controller
    pub fn handle_gesture(&mut self, gesture: Gesture) {
        if self.controller.handle(gesture, &mut self.view, &mut self.route) {
            self.rerender();
        }
    }

    fn rerender(&mut self) {
        self.scene = render::render(
            self.route.snapshot(),
            &self.params,
            &self.view,
            self.background_size,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CadPoint, Node, PixelPoint, ZoomDirection};
    use crate::session::interaction::PointerButton;

    fn params() -> AffineParams {
        AffineParams::new(0.0, 0.0, 20.0, 50.0, 50.0).unwrap()
    }

    fn two_nodes() -> RouteSnapshot {
        RouteSnapshot {
            current: None,
            path: Vec::new(),
            nodes: vec![Node::new("A", 1.0, 2.0), Node::new("B", 3.0, 4.0)],
        }
    }

    #[test]
    fn test_node_click_moves_current_marker() {
        let mut session =
            Session::with_snapshot(params(), PathBuf::from("route.json"), (0, 0), two_nodes());
        assert!(session.scene().current.is_none());

        let marker = session
            .scene()
            .nodes
            .iter()
            .find(|m| m.label == "B")
            .cloned()
            .unwrap();
        session.handle_gesture(Gesture::NodeClicked {
            id: marker.label.clone(),
            position: marker.position,
        });

        assert_eq!(session.snapshot().current, Some(CadPoint::new(3.0, 4.0)));
        let current = session.scene().current.unwrap();
        assert_eq!(current.center, params().map(CadPoint::new(3.0, 4.0)));
        assert_eq!(current.center, PixelPoint::new(110.0, -30.0));
    }

    #[test]
    fn test_missing_document_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(params(), dir.path().join("route.json"), (1200, 800));
        assert!(session.snapshot().is_empty());
        assert!(session.scene().nodes.is_empty());
        assert!(session.scene().current.is_none());
    }

    #[test]
    fn test_reload_replaces_clicked_current() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.json");
        std::fs::write(&path, r#"{"current": {"x": 0, "y": 0}, "allNodes": [{"id": "A", "x": 1, "y": 2}]}"#)
            .unwrap();

        let mut session = Session::new(params(), path.clone(), (0, 0));
        session.handle_gesture(Gesture::NodeClicked {
            id: "A".into(),
            position: CadPoint::new(1.0, 2.0),
        });
        assert_eq!(session.snapshot().current, Some(CadPoint::new(1.0, 2.0)));

        session.reload();
        assert_eq!(session.snapshot().current, Some(CadPoint::new(0.0, 0.0)));
        assert_eq!(session.scene().current.unwrap().center, PixelPoint::new(50.0, 50.0));
    }

    #[test]
    fn test_bad_write_keeps_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.json");
        std::fs::write(&path, r#"{"path": [{"x": 0, "y": 0}, {"x": 2, "y": 2}]}"#).unwrap();

        let mut session = Session::new(params(), path.clone(), (0, 0));
        let before = session.scene().clone();

        std::fs::write(&path, r#"{"path": [{"x": 0, "y": "#).unwrap();
        session.reload();
        assert_eq!(session.scene(), &before);
    }

    #[test]
    fn test_gestures_update_scene_view() {
        let mut session =
            Session::with_snapshot(params(), PathBuf::from("route.json"), (0, 0), two_nodes());

        session.handle_gesture(Gesture::Pressed {
            button: PointerButton::Middle,
            position: PixelPoint::new(0.0, 0.0),
            modifier: false,
        });
        session.handle_gesture(Gesture::Moved {
            position: PixelPoint::new(30.0, -10.0),
        });
        session.handle_gesture(Gesture::Scrolled {
            direction: ZoomDirection::Forward,
            notches: 1,
        });

        let view = session.scene().view;
        assert_eq!((view.pan_x, view.pan_y), (30.0, -10.0));
        assert!((view.zoom() - 1.1).abs() < 1e-12);
        assert_eq!(session.view, view);
        // Base geometry is unaffected by the view transform
        assert_eq!(session.scene().nodes[0].anchor, PixelPoint::new(70.0, 10.0));
    }
}
