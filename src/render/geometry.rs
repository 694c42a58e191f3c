//! Overlay geometry constants
//!
//! All sizes are in base pixels; the view transform scales them together with
//! the background.

/// Route path polyline
pub mod path {
    /// Stroke width
    pub const THICKNESS: f32 = 3.0;
    /// Fewer points than this draw nothing
    pub const MIN_POINTS: usize = 2;
}

/// Current-position marker
pub mod current {
    pub const RADIUS: f64 = 6.0;
    /// White outline width
    pub const OUTLINE: f32 = 1.5;
}

/// Node label markers
pub mod node {
    /// Marker top-left sits this far up and left of the mapped point
    pub const ANCHOR_OFFSET: f64 = 14.0;
    pub const HEIGHT: f64 = 18.0;
    /// Keeps empty labels clickable
    pub const MIN_WIDTH: f64 = 28.0;
    pub const PADDING_X: f64 = 6.0;
    pub const FONT_SIZE: f32 = 10.0;
    /// Average glyph advance at FONT_SIZE
    pub const CHAR_WIDTH: f64 = 6.0;
    pub const CORNER_RADIUS: f32 = 12.0;

    /// Estimated marker width for a label
    pub fn width(label: &str) -> f64 {
        let text = label.chars().count() as f64 * CHAR_WIDTH;
        (text + 2.0 * PADDING_X).max(MIN_WIDTH)
    }
}

/// Mesh rendering constants (for the anti-aliased path)
pub mod mesh {
    /// Anti-aliasing feather width in pixels
    pub const FEATHER: f32 = 1.0;
    /// Number of segments for round joins and caps
    pub const CIRCLE_SEGMENTS: usize = 12;
}
