//! Interactive pan/zoom state applied on top of the base pixel rendering

use super::geometry::PixelPoint;

/// Smallest allowed zoom factor
pub const MIN_ZOOM: f64 = 0.2;
/// Largest allowed zoom factor
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom multiplier per forward scroll notch
pub const ZOOM_IN_STEP: f64 = 1.1;
/// Zoom multiplier per backward scroll notch
pub const ZOOM_OUT_STEP: f64 = 0.9;

/// Direction of a scroll gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Away from the user; zooms in
    Forward,
    /// Toward the user; zooms out
    Backward,
}

impl ZoomDirection {
    fn step(self) -> f64 {
        match self {
            ZoomDirection::Forward => ZOOM_IN_STEP,
            ZoomDirection::Backward => ZOOM_OUT_STEP,
        }
    }
}

/// Pan offset and zoom factor of the whole drawing surface
///
/// Maps base pixels to screen pixels as `screen = base * zoom + pan`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub pan_x: f64,
    pub pan_y: f64,
    zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl ViewState {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Translate the surface by a pointer delta in screen pixels
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Apply `notches` scroll steps in one direction, clamping after each
    ///
    /// Stops early once a clamp bound is reached.
    pub fn zoom_by(&mut self, direction: ZoomDirection, notches: u32) {
        for _ in 0..notches {
            let next = (self.zoom * direction.step()).clamp(MIN_ZOOM, MAX_ZOOM);
            if next == self.zoom {
                break;
            }
            self.zoom = next;
        }
    }

    /// Screen pixel to base pixel
    pub fn invert(&self, screen: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            (screen.x - self.pan_x) / self.zoom,
            (screen.y - self.pan_y) / self.zoom,
        )
    }
}

#[cfg(test)]
impl ViewState {
    /// Base pixel to screen pixel
    pub fn apply(&self, base: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            base.x * self.zoom + self.pan_x,
            base.y * self.zoom + self.pan_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_out_never_below_min() {
        let mut view = ViewState::default();
        for _ in 0..200 {
            view.zoom_by(ZoomDirection::Backward, 1);
            assert!(view.zoom() >= MIN_ZOOM);
        }
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_in_never_above_max() {
        let mut view = ViewState::default();
        for _ in 0..200 {
            view.zoom_by(ZoomDirection::Forward, 1);
            assert!(view.zoom() <= MAX_ZOOM);
        }
        assert_eq!(view.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_single_steps() {
        let mut view = ViewState::default();
        view.zoom_by(ZoomDirection::Forward, 1);
        assert!((view.zoom() - 1.1).abs() < 1e-12);

        let mut view = ViewState::default();
        view.zoom_by(ZoomDirection::Backward, 2);
        assert!((view.zoom() - 0.81).abs() < 1e-12);
    }

    #[test]
    fn test_zero_notches_is_noop() {
        let mut view = ViewState::default();
        view.zoom_by(ZoomDirection::Forward, 0);
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn test_apply_and_invert() {
        let mut view = ViewState::default();
        view.pan_by(15.0, -4.0);
        view.zoom_by(ZoomDirection::Forward, 3);

        let base = PixelPoint::new(70.0, 30.0);
        let screen = view.apply(base);
        assert!((screen.x - (70.0 * view.zoom() + 15.0)).abs() < 1e-9);
        assert!((screen.y - (30.0 * view.zoom() - 4.0)).abs() < 1e-9);

        let back = view.invert(screen);
        assert!((back.x - base.x).abs() < 1e-9);
        assert!((back.y - base.y).abs() < 1e-9);
    }

    #[test]
    fn test_pan_accumulates() {
        let mut view = ViewState::default();
        view.pan_by(3.0, 4.0);
        view.pan_by(-1.0, 1.0);
        assert_eq!((view.pan_x, view.pan_y), (2.0, 5.0));
        assert_eq!(view.zoom(), 1.0);
    }

    #[test]
    fn test_huge_notch_count_stops_at_bound() {
        let mut view = ViewState::default();
        view.zoom_by(ZoomDirection::Forward, u32::MAX);
        assert_eq!(view.zoom(), MAX_ZOOM);

        view.zoom_by(ZoomDirection::Backward, u32::MAX);
        assert_eq!(view.zoom(), MIN_ZOOM);
    }
}
