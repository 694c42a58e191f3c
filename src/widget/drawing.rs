//! Marker drawing helpers
//!
//! All functions draw in base pixel space; callers wrap them in the view
//! transformation.

use cosmic::iced_core::{
    Background, Border, Color, Point, Rectangle, Renderer as _, Shadow, Size, renderer::Quad,
};

use crate::domain::PixelRect;
use crate::render::geometry::{current, node};
use crate::render::{CurrentMarker, NodeMarker};

/// Convert a pixel-space rectangle to an iced rectangle
pub fn to_rectangle(r: &PixelRect) -> Rectangle {
    Rectangle {
        x: r.x as f32,
        y: r.y as f32,
        width: r.width as f32,
        height: r.height as f32,
    }
}

/// Draw the current-position marker as a filled circle with a white outline
pub fn draw_current_marker(renderer: &mut cosmic::Renderer, marker: &CurrentMarker, fill: Color) {
    let r = marker.radius as f32;
    let bounds = Rectangle {
        x: marker.center.x as f32 - r,
        y: marker.center.y as f32 - r,
        width: r * 2.0,
        height: r * 2.0,
    };

    renderer.fill_quad(
        Quad {
            bounds,
            border: Border {
                radius: r.into(),
                width: current::OUTLINE,
                color: Color::WHITE,
            },
            shadow: Shadow::default(),
        },
        Background::Color(fill),
    );
}

/// Draw a node marker: a rounded pill with the node id centered inside
pub fn draw_node_marker(renderer: &mut cosmic::Renderer, marker: &NodeMarker, fill: Color) {
    use cosmic::iced_core::text::{Renderer as TextRenderer, Text};

    let bounds = to_rectangle(&marker.bounds);

    renderer.fill_quad(
        Quad {
            bounds,
            border: Border {
                radius: node::CORNER_RADIUS.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
            shadow: Shadow::default(),
        },
        Background::Color(fill),
    );

    if marker.label.is_empty() {
        return;
    }

    renderer.fill_text(
        Text {
            content: marker.label.clone(),
            bounds: Size::new(bounds.width, bounds.height),
            size: cosmic::iced_core::Pixels(node::FONT_SIZE),
            line_height: cosmic::iced_core::text::LineHeight::Relative(1.0),
            font: cosmic::iced_core::Font::default(),
            horizontal_alignment: cosmic::iced::alignment::Horizontal::Center,
            vertical_alignment: cosmic::iced::alignment::Vertical::Center,
            shaping: cosmic::iced_core::text::Shaping::Advanced,
            wrapping: cosmic::iced_core::text::Wrapping::None,
        },
        Point::new(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0),
        Color::WHITE,
        bounds,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rectangle() {
        let r = to_rectangle(&PixelRect::new(-4.0, 2.5, 28.0, 18.0));
        assert_eq!(r, Rectangle { x: -4.0, y: 2.5, width: 28.0, height: 18.0 });
    }
}
