//! Coordinate types and the CAD to pixel affine mapping

use crate::error::ConfigError;

/// A point in CAD space (drawing units, y grows upward)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CadPoint {
    pub x: f64,
    pub y: f64,
}

impl CadPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in base pixel space (surface pixels, y grows downward)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixel space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if this rectangle contains a point (right and bottom edges exclusive)
    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Parameters of the fixed CAD to pixel mapping
///
/// `X = (x - x0) * scale + offset_x`
/// `Y = (y0 - y) * scale + offset_y`
///
/// Construct through [`AffineParams::new`], which rejects a scale that is not
/// strictly positive and any non-finite component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineParams {
    x0: f64,
    y0: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl AffineParams {
    pub fn new(
        x0: f64,
        y0: f64,
        scale: f64,
        offset_x: f64,
        offset_y: f64,
    ) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("x0", x0),
            ("y0", y0),
            ("scale", scale),
            ("offset_x", offset_x),
            ("offset_y", offset_y),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if scale <= 0.0 {
            return Err(ConfigError::NonPositiveScale(scale));
        }
        Ok(Self {
            x0,
            y0,
            scale,
            offset_x,
            offset_y,
        })
    }

    /// Map a CAD point to base pixel coordinates
    #[inline]
    pub fn map(&self, p: CadPoint) -> PixelPoint {
        PixelPoint {
            x: (p.x - self.x0) * self.scale + self.offset_x,
            // Pixel rows grow downward
            y: (self.y0 - p.y) * self.scale + self.offset_y,
        }
    }
}

/// Map a CAD point through the given parameters
#[inline]
pub fn map(p: CadPoint, params: &AffineParams) -> PixelPoint {
    params.map(p)
}

#[cfg(test)]
impl AffineParams {
    /// Inverse of [`AffineParams::map`]
    pub fn unmap(&self, q: PixelPoint) -> CadPoint {
        CadPoint {
            x: (q.x - self.offset_x) / self.scale + self.x0,
            y: self.y0 - (q.y - self.offset_y) / self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn params() -> AffineParams {
        AffineParams::new(0.0, 0.0, 20.0, 50.0, 50.0).unwrap()
    }

    #[test]
    fn test_map_known_point() {
        let q = map(CadPoint::new(1.0, 1.0), &params());
        assert_eq!(q, PixelPoint::new(70.0, 30.0));
    }

    #[test]
    fn test_map_with_origin_offset() {
        let p = AffineParams::new(10.0, -5.0, 2.0, 0.0, 0.0).unwrap();
        let q = p.map(CadPoint::new(12.0, -4.0));
        assert_eq!(q, PixelPoint::new(4.0, -2.0));
    }

    #[test]
    fn test_x_increases_and_y_decreases() {
        let p = params();
        let samples = [-100.0, -1.5, 0.0, 0.25, 3.0, 1e4];
        for w in samples.windows(2) {
            let a = p.map(CadPoint::new(w[0], 0.0));
            let b = p.map(CadPoint::new(w[1], 0.0));
            assert!(b.x > a.x, "X must grow with x");

            let a = p.map(CadPoint::new(0.0, w[0]));
            let b = p.map(CadPoint::new(0.0, w[1]));
            assert!(b.y < a.y, "Y must shrink as y grows");
        }
    }

    #[test]
    fn test_unmap_recovers_cad_point() {
        let p = AffineParams::new(3.5, -12.0, 0.37, 11.0, -4.0).unwrap();
        for cad in [
            CadPoint::new(0.0, 0.0),
            CadPoint::new(-250.125, 88.5),
            CadPoint::new(1e5, -1e5),
        ] {
            let back = p.unmap(p.map(cad));
            assert!((back.x - cad.x).abs() < EPSILON * cad.x.abs().max(1.0));
            assert!((back.y - cad.y).abs() < EPSILON * cad.y.abs().max(1.0));
        }
    }

    #[test]
    fn test_map_is_deterministic() {
        let p = params();
        let cad = CadPoint::new(7.25, -3.0);
        assert_eq!(p.map(cad), p.map(cad));
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        assert!(matches!(
            AffineParams::new(0.0, 0.0, 0.0, 0.0, 0.0),
            Err(ConfigError::NonPositiveScale(_))
        ));
        assert!(matches!(
            AffineParams::new(0.0, 0.0, -2.0, 0.0, 0.0),
            Err(ConfigError::NonPositiveScale(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_components() {
        let err = AffineParams::new(f64::NAN, 0.0, 1.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { field: "x0", .. }));

        let err = AffineParams::new(0.0, 0.0, f64::INFINITY, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ConfigError::NonFinite { field: "scale", .. }));
    }

    #[test]
    fn test_rect_contains_excludes_far_edges() {
        let r = PixelRect::new(10.0, 20.0, 5.0, 5.0);
        assert!(r.contains(PixelPoint::new(10.0, 20.0)));
        assert!(r.contains(PixelPoint::new(14.9, 24.9)));
        assert!(!r.contains(PixelPoint::new(15.0, 22.0)));
        assert!(!r.contains(PixelPoint::new(12.0, 25.0)));
    }
}
