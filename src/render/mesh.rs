//! Mesh building for the route polyline
//!
//! Builds vertex/index buffers for an anti-aliased polyline with round joins
//! and caps. Coordinates are base pixels; the view transform is applied by the
//! mesh transformation at draw time.

use cosmic::iced::Color;
use cosmic::iced_widget::graphics::{
    color::{Packed, pack},
    mesh::SolidVertex2D,
};

use super::geometry::{mesh as mesh_const, path};

/// Polyline mesh result: vertices and indices for rendering
pub type PolylineMesh = (Vec<SolidVertex2D>, Vec<u32>);

/// Build a polyline mesh through `points`
///
/// Returns None when there are fewer than two points.
pub fn build_polyline_mesh(points: &[(f32, f32)], color: Color, thickness: f32) -> Option<PolylineMesh> {
    if points.len() < path::MIN_POINTS {
        return None;
    }

    let mut inner = color;
    inner.a = inner.a.clamp(0.0, 1.0);
    let packed_inner = pack(inner);

    let mut outer = color;
    outer.a = 0.0;
    let packed_outer = pack(outer);

    let radius = thickness / 2.0;
    let feather = mesh_const::FEATHER;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        add_line_segment(
            &mut vertices,
            &mut indices,
            x0,
            y0,
            x1,
            y1,
            radius,
            feather,
            packed_inner,
            packed_outer,
        );
    }

    // Round joins and caps at every vertex
    for &(x, y) in points {
        add_circle(
            &mut vertices,
            &mut indices,
            x,
            y,
            radius,
            feather,
            packed_inner,
            packed_outer,
        );
    }

    Some((vertices, indices))
}

/// Build a line segment with anti-aliased feathering
#[allow(clippy::too_many_arguments)]
fn add_line_segment(
    vertices: &mut Vec<SolidVertex2D>,
    indices: &mut Vec<u32>,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    radius: f32,
    feather: f32,
    packed_inner: Packed,
    packed_outer: Packed,
) {
    let ldx = x1 - x0;
    let ldy = y1 - y0;
    let llen = (ldx * ldx + ldy * ldy).sqrt();
    if llen < 0.1 {
        return;
    }
    let lnx = ldx / llen;
    let lny = ldy / llen;

    // Perpendicular
    let px = -lny;
    let py = lnx;

    let base_idx = vertices.len() as u32;
    let inner_r = radius;
    let outer_r = radius + feather;

    for (r, color) in [(inner_r, packed_inner), (outer_r, packed_outer)] {
        vertices.push(SolidVertex2D {
            position: [x0 + px * r, y0 + py * r],
            color,
        });
        vertices.push(SolidVertex2D {
            position: [x0 - px * r, y0 - py * r],
            color,
        });
        vertices.push(SolidVertex2D {
            position: [x1 - px * r, y1 - py * r],
            color,
        });
        vertices.push(SolidVertex2D {
            position: [x1 + px * r, y1 + py * r],
            color,
        });
    }

    // Solid core
    indices.extend_from_slice(&[base_idx, base_idx + 1, base_idx + 2]);
    indices.extend_from_slice(&[base_idx, base_idx + 2, base_idx + 3]);

    // Feather band (+ side)
    indices.extend_from_slice(&[base_idx + 4, base_idx, base_idx + 3]);
    indices.extend_from_slice(&[base_idx + 4, base_idx + 3, base_idx + 7]);

    // Feather band (- side)
    indices.extend_from_slice(&[base_idx + 5, base_idx + 6, base_idx + 2]);
    indices.extend_from_slice(&[base_idx + 5, base_idx + 2, base_idx + 1]);
}

/// Build a filled circle with anti-aliased feathering
#[allow(clippy::too_many_arguments)]
fn add_circle(
    vertices: &mut Vec<SolidVertex2D>,
    indices: &mut Vec<u32>,
    cx: f32,
    cy: f32,
    radius: f32,
    feather: f32,
    packed_inner: Packed,
    packed_outer: Packed,
) {
    let base_idx = vertices.len() as u32;
    let segments = mesh_const::CIRCLE_SEGMENTS;

    vertices.push(SolidVertex2D {
        position: [cx, cy],
        color: packed_inner,
    });

    let outer_r = radius + feather;
    for (r, color) in [(radius, packed_inner), (outer_r, packed_outer)] {
        for i in 0..segments {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            vertices.push(SolidVertex2D {
                position: [cx + r * angle.cos(), cy + r * angle.sin()],
                color,
            });
        }
    }

    for i in 0..segments {
        let next = (i + 1) % segments;
        let inner_i = base_idx + 1 + i as u32;
        let inner_next = base_idx + 1 + next as u32;
        let outer_i = inner_i + segments as u32;
        let outer_next = inner_next + segments as u32;

        // Fan from the center
        indices.extend_from_slice(&[base_idx, inner_i, inner_next]);
        // Feather ring
        indices.extend_from_slice(&[inner_i, outer_i, outer_next]);
        indices.extend_from_slice(&[inner_i, outer_next, inner_next]);
    }
}
