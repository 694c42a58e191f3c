//! Interaction controller: gestures to view and route mutations
//!
//! Gestures arrive already translated from raw input by the floorplan widget.
//! Pan/zoom only touch the [`ViewState`]; node clicks only touch the
//! [`RouteModel`]. Every handled gesture reports whether a re-render is due.

use crate::domain::{CadPoint, PixelPoint, RouteModel, ViewState, ZoomDirection};

/// Pointer buttons the controller distinguishes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other,
}

/// Input gestures in widget-local screen pixels
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    /// A button went down; `modifier` is whether the pan modifier was held
    Pressed {
        button: PointerButton,
        position: PixelPoint,
        modifier: bool,
    },
    /// The pointer moved while a button was held
    Moved { position: PixelPoint },
    /// A button went up
    Released { button: PointerButton },
    /// Scroll wheel notches
    Scrolled { direction: ZoomDirection, notches: u32 },
    /// A node marker was clicked
    NodeClicked { id: String, position: CadPoint },
}

/// Whether a press starts a pan drag
///
/// Middle button always pans; primary pans only with the modifier held.
pub fn starts_pan(button: PointerButton, modifier: bool) -> bool {
    match button {
        PointerButton::Middle => true,
        PointerButton::Primary => modifier,
        PointerButton::Secondary | PointerButton::Other => false,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PanDrag {
    button: PointerButton,
    last: PixelPoint,
}

/// Pan/zoom/click state machine
#[derive(Debug, Default)]
pub struct InteractionController {
    drag: Option<PanDrag>,
}

impl InteractionController {
    #[cfg(test)]
    pub fn is_panning(&self) -> bool {
        self.drag.is_some()
    }

    /// Apply a gesture; returns true when the scene must be rebuilt
    pub fn handle(&mut self, gesture: Gesture, view: &mut ViewState, route: &mut RouteModel) -> bool {
        match gesture {
            Gesture::Pressed {
                button,
                position,
                modifier,
            } => {
                if starts_pan(button, modifier) {
                    self.drag = Some(PanDrag {
                        button,
                        last: position,
                    });
                }
                false
            }
            Gesture::Moved { position } => {
                let Some(drag) = &mut self.drag else {
                    return false;
                };
                view.pan_by(position.x - drag.last.x, position.y - drag.last.y);
                drag.last = position;
                true
            }
            Gesture::Released { button } => {
                if self.drag.is_some_and(|d| d.button == button) {
                    self.drag = None;
                }
                false
            }
            Gesture::Scrolled { direction, notches } => {
                if notches == 0 {
                    return false;
                }
                view.zoom_by(direction, notches);
                true
            }
            Gesture::NodeClicked { id, position } => {
                log::debug!("Node {:?} clicked, current set to ({}, {})", id, position.x, position.y);
                route.set_current(position);
                true
            }
        }
    }
}
