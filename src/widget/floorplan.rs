//! Floorplan widget for painting a scene and capturing pointer input
//!
//! This widget handles:
//! - Painting the background, path, current marker and node markers under a
//!   single view transformation, so all layers stay in registration
//! - Translating pointer, wheel and modifier events into [`Gesture`]s
//! - Hit testing node markers for clicks

use cosmic::{
    Element,
    iced::{Color, keyboard, mouse},
    iced_core::{
        Clipboard, Layout, Length, Rectangle, Shell, Size, Transformation, Widget, event, layout,
        overlay,
        renderer::Renderer as RendererTrait,
        widget::{Tree, tree},
    },
    iced_widget::graphics::{
        Mesh,
        mesh::{Indexed, Renderer as MeshRenderer},
    },
};

use crate::domain::{CadPoint, PixelPoint, ViewState, ZoomDirection};
use crate::render::{NodeMarker, Scene};
use crate::render::geometry::path;
use crate::render::mesh::build_polyline_mesh;
use crate::session::interaction::{Gesture, PointerButton, starts_pan};

use super::drawing::{draw_current_marker, draw_node_marker, to_rectangle};

/// Overlay colors
#[derive(Clone, Copy, Debug)]
pub struct OverlayStyle {
    pub path: Color,
    pub current: Color,
    pub node: Color,
}

/// Input state kept between events
#[derive(Debug, Default)]
struct FloorplanState {
    /// Whether the pan modifier (Alt) is held
    modifier: bool,
    /// Button currently dragging the view
    held: Option<PointerButton>,
    /// Node marker under a primary press, clicked if released over it
    pressed_node: Option<PressedNode>,
}

#[derive(Clone, Debug, PartialEq)]
struct PressedNode {
    id: String,
    position: CadPoint,
}

impl From<&NodeMarker> for PressedNode {
    fn from(marker: &NodeMarker) -> Self {
        Self {
            id: marker.label.clone(),
            position: marker.position,
        }
    }
}

/// Click gesture for a primary release over the marker that was pressed
fn released_on_node(scene: &Scene, pressed: PressedNode, release: PixelPoint) -> Option<Gesture> {
    let marker = scene.node_at(release)?;
    if PressedNode::from(marker) != pressed {
        return None;
    }
    Some(Gesture::NodeClicked {
        id: pressed.id,
        position: pressed.position,
    })
}

/// Floorplan widget
pub struct Floorplan<'a, Msg> {
    scene: &'a Scene,
    background: Option<&'a cosmic::widget::image::Handle>,
    style: OverlayStyle,
    on_gesture: Box<dyn Fn(Gesture) -> Msg + 'a>,
}

impl<'a, Msg> Floorplan<'a, Msg> {
    pub fn new(
        scene: &'a Scene,
        style: OverlayStyle,
        on_gesture: impl Fn(Gesture) -> Msg + 'a,
    ) -> Self {
        Self {
            scene,
            background: None,
            style,
            on_gesture: Box::new(on_gesture),
        }
    }

    /// Set the background image
    pub fn background(mut self, handle: Option<&'a cosmic::widget::image::Handle>) -> Self {
        self.background = handle;
        self
    }
}

/// Map an iced mouse button to a controller button
pub fn pointer_button(button: mouse::Button) -> PointerButton {
    match button {
        mouse::Button::Left => PointerButton::Primary,
        mouse::Button::Middle => PointerButton::Middle,
        mouse::Button::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

/// Direction and notch count of a wheel event, `None` for a zero delta
pub fn scroll_notches(delta: mouse::ScrollDelta) -> Option<(ZoomDirection, u32)> {
    let (dy, lines) = match delta {
        mouse::ScrollDelta::Lines { y, .. } => (y, true),
        mouse::ScrollDelta::Pixels { y, .. } => (y, false),
    };
    let direction = if dy > 0.0 {
        ZoomDirection::Forward
    } else if dy < 0.0 {
        ZoomDirection::Backward
    } else {
        return None;
    };
    let notches = if lines {
        (dy.abs().round() as u32).max(1)
    } else {
        1
    };
    Some((direction, notches))
}

/// Transformation from base pixels to window coordinates
pub fn view_transformation(view: &ViewState, bounds: Rectangle) -> Transformation {
    Transformation::translate(bounds.x + view.pan_x as f32, bounds.y + view.pan_y as f32)
        * Transformation::scale(view.zoom() as f32)
}

fn local_point(position: cosmic::iced::Point, bounds: Rectangle) -> PixelPoint {
    PixelPoint::new(
        f64::from(position.x - bounds.x),
        f64::from(position.y - bounds.y),
    )
}

impl<'a, Msg: Clone + 'static> Widget<Msg, cosmic::Theme, cosmic::Renderer> for Floorplan<'a, Msg> {
    fn size(&self) -> Size<Length> {
        Size::new(Length::Fill, Length::Fill)
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<FloorplanState>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(FloorplanState::default())
    }

    fn children(&self) -> Vec<Tree> {
        vec![]
    }

    fn diff(&mut self, _tree: &mut Tree) {}

    fn layout(
        &self,
        _tree: &mut Tree,
        _renderer: &cosmic::Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::Node::new(limits.max())
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut cosmic::Renderer,
        _theme: &cosmic::Theme,
        _style: &cosmic::iced_core::renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let transformation = view_transformation(&self.scene.view, bounds);

        // Background first, beneath every overlay
        if let Some(handle) = self.background {
            let image_bounds = to_rectangle(&self.scene.background);
            renderer.with_layer(bounds, |renderer| {
                renderer.with_transformation(transformation, |renderer| {
                    cosmic::iced_core::image::Renderer::draw_image(
                        renderer,
                        handle.clone(),
                        cosmic::iced_core::image::FilterMethod::Linear,
                        image_bounds,
                        cosmic::iced::Radians(0.0),
                        1.0,
                        [0.0, 0.0, 0.0, 0.0],
                    );
                });
            });
        }

        let points: Vec<(f32, f32)> = self
            .scene
            .path
            .iter()
            .map(|p| (p.x as f32, p.y as f32))
            .collect();
        if let Some((vertices, indices)) =
            build_polyline_mesh(&points, self.style.path, path::THICKNESS)
        {
            renderer.with_layer(bounds, |renderer| {
                renderer.draw_mesh(Mesh::Solid {
                    buffers: Indexed { vertices, indices },
                    transformation,
                    clip_bounds: bounds,
                });
            });
        }

        renderer.with_layer(bounds, |renderer| {
            renderer.with_transformation(transformation, |renderer| {
                if let Some(current) = &self.scene.current {
                    draw_current_marker(renderer, current, self.style.current);
                }
                for marker in &self.scene.nodes {
                    draw_node_marker(renderer, marker, self.style.node);
                }
            });
        });
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: cosmic::iced_core::Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &cosmic::Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Msg>,
        _viewport: &Rectangle,
    ) -> event::Status {
        let state = tree.state.downcast_mut::<FloorplanState>();
        let bounds = layout.bounds();

        match event {
            cosmic::iced_core::Event::Keyboard(keyboard::Event::ModifiersChanged(mods)) => {
                state.modifier = mods.alt();
            }
            cosmic::iced_core::Event::Mouse(mouse::Event::ButtonPressed(button)) => {
                let Some(pos) = cursor.position_in(bounds) else {
                    return event::Status::Ignored;
                };
                let position = PixelPoint::new(f64::from(pos.x), f64::from(pos.y));
                let button = pointer_button(button);

                // Plain primary clicks go to node markers and fire on release
                if button == PointerButton::Primary && !state.modifier {
                    if let Some(marker) = self.scene.node_at(position) {
                        state.pressed_node = Some(PressedNode::from(marker));
                        return event::Status::Captured;
                    }
                    return event::Status::Ignored;
                }

                if starts_pan(button, state.modifier) {
                    state.held = Some(button);
                }
                shell.publish((self.on_gesture)(Gesture::Pressed {
                    button,
                    position,
                    modifier: state.modifier,
                }));
                return event::Status::Captured;
            }
            cosmic::iced_core::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if state.held.is_some() {
                    shell.publish((self.on_gesture)(Gesture::Moved {
                        position: local_point(position, bounds),
                    }));
                    return event::Status::Captured;
                }
            }
            cosmic::iced_core::Event::Mouse(mouse::Event::ButtonReleased(button)) => {
                let button = pointer_button(button);
                if button == PointerButton::Primary {
                    if let Some(pressed) = state.pressed_node.take() {
                        let gesture = cursor.position_in(bounds).and_then(|pos| {
                            let release = PixelPoint::new(f64::from(pos.x), f64::from(pos.y));
                            released_on_node(self.scene, pressed, release)
                        });
                        if let Some(gesture) = gesture {
                            shell.publish((self.on_gesture)(gesture));
                        }
                        return event::Status::Captured;
                    }
                }
                if state.held == Some(button) {
                    state.held = None;
                    shell.publish((self.on_gesture)(Gesture::Released { button }));
                    return event::Status::Captured;
                }
            }
            cosmic::iced_core::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if !cursor.is_over(bounds) {
                    return event::Status::Ignored;
                }
                if let Some((direction, notches)) = scroll_notches(delta) {
                    shell.publish((self.on_gesture)(Gesture::Scrolled { direction, notches }));
                }
                // Consumed so nothing underneath scrolls
                return event::Status::Captured;
            }
            _ => {}
        }

        event::Status::Ignored
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &cosmic::Renderer,
    ) -> mouse::Interaction {
        let state = tree.state.downcast_ref::<FloorplanState>();
        if state.held.is_some() {
            return mouse::Interaction::Grabbing;
        }
        if state.modifier {
            return mouse::Interaction::default();
        }
        match cursor.position_in(layout.bounds()) {
            Some(pos)
                if self
                    .scene
                    .node_at(PixelPoint::new(f64::from(pos.x), f64::from(pos.y)))
                    .is_some() =>
            {
                mouse::Interaction::Pointer
            }
            _ => mouse::Interaction::default(),
        }
    }

    fn overlay<'b>(
        &'b mut self,
        _tree: &'b mut Tree,
        _layout: Layout<'_>,
        _renderer: &cosmic::Renderer,
        _translation: cosmic::iced::Vector,
    ) -> Option<overlay::Element<'b, Msg, cosmic::Theme, cosmic::Renderer>> {
        None
    }
}

impl<'a, Msg: Clone + 'static> From<Floorplan<'a, Msg>> for Element<'a, Msg> {
    fn from(floorplan: Floorplan<'a, Msg>) -> Self {
        Self::new(floorplan)
    }
}
