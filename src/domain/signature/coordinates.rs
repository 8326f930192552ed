//! Viewport to backing-surface coordinate mapping.
//!
//! The capture surface is either laid out as-is, or rotated 90° so portrait
//! devices get a landscape-shaped drawing area. In the rotated case the
//! pointer's horizontal travel runs along the surface's vertical axis, and
//! its vertical travel runs right-to-left along the surface's horizontal
//! axis.

use serde::{Deserialize, Serialize};

use super::pointer::ViewportPoint;

/// Bounding rectangle of the capture surface in layout pixels, as measured
/// after any CSS rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect with zero, negative or non-finite extent cannot be mapped.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Pixel dimensions of the backing raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackingSize {
    pub width: u32,
    pub height: u32,
}

impl BackingSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Position in backing-surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &CanvasPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Translates pointer positions into backing-surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinateMapper;

impl CoordinateMapper {
    /// Maps `pointer` into backing space.
    ///
    /// Returns `None` while the surface is not ready (zero-sized rect or
    /// backing). Results are not clamped: points outside the rect map
    /// outside the backing bounds and simply draw off-surface.
    pub fn map(
        pointer: ViewportPoint,
        rect: SurfaceRect,
        backing: BackingSize,
        rotated: bool,
    ) -> Option<CanvasPoint> {
        if !rect.is_measurable() || backing.is_empty() {
            return None;
        }

        let nx = (pointer.x - rect.left) / rect.width;
        let ny = (pointer.y - rect.top) / rect.height;
        let (w, h) = (f64::from(backing.width), f64::from(backing.height));

        let point = if rotated {
            CanvasPoint::new(ny * w, (1.0 - nx) * h)
        } else {
            CanvasPoint::new(nx * w, ny * h)
        };
        Some(point)
    }
}

/// The surface is rotated whenever the viewport is taller than it is wide.
pub fn is_rotated_layout(viewport_width: f64, viewport_height: f64) -> bool {
    viewport_height > viewport_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect() -> SurfaceRect {
        SurfaceRect::new(0.0, 0.0, 200.0, 100.0)
    }

    fn backing() -> BackingSize {
        BackingSize::new(400, 200)
    }

    #[test]
    fn midpoint_maps_to_midpoint() {
        let p = CoordinateMapper::map(ViewportPoint::new(100.0, 50.0), rect(), backing(), false)
            .unwrap();
        assert_eq!(p, CanvasPoint::new(200.0, 100.0));
    }

    #[test]
    fn rotated_mapping_swaps_and_inverts() {
        let p = CoordinateMapper::map(ViewportPoint::new(100.0, 25.0), rect(), backing(), true)
            .unwrap();
        assert_eq!(p, CanvasPoint::new(100.0, 100.0));
    }

    #[test]
    fn rotated_corners() {
        // top-left of the rendered rect is the bottom-left of the backing
        let p = CoordinateMapper::map(ViewportPoint::new(0.0, 0.0), rect(), backing(), true)
            .unwrap();
        assert_eq!(p, CanvasPoint::new(0.0, 200.0));

        let p = CoordinateMapper::map(ViewportPoint::new(200.0, 100.0), rect(), backing(), true)
            .unwrap();
        assert_eq!(p, CanvasPoint::new(400.0, 0.0));
    }

    #[test]
    fn offset_rect_is_respected() {
        let rect = SurfaceRect::new(10.0, 20.0, 200.0, 100.0);
        let p = CoordinateMapper::map(ViewportPoint::new(110.0, 70.0), rect, backing(), false)
            .unwrap();
        assert_eq!(p, CanvasPoint::new(200.0, 100.0));
    }

    #[test]
    fn zero_sized_rect_is_not_ready() {
        let rect = SurfaceRect::new(0.0, 0.0, 0.0, 100.0);
        assert!(CoordinateMapper::map(ViewportPoint::new(1.0, 1.0), rect, backing(), false).is_none());
    }

    #[test]
    fn zero_backing_is_not_ready() {
        let p = CoordinateMapper::map(
            ViewportPoint::new(1.0, 1.0),
            rect(),
            BackingSize::new(0, 0),
            true,
        );
        assert!(p.is_none());
    }

    #[test]
    fn outside_points_are_not_clamped() {
        let p = CoordinateMapper::map(ViewportPoint::new(-50.0, 150.0), rect(), backing(), false)
            .unwrap();
        assert_eq!(p, CanvasPoint::new(-100.0, 300.0));
    }

    #[test]
    fn portrait_viewport_is_rotated() {
        assert!(is_rotated_layout(390.0, 844.0));
        assert!(!is_rotated_layout(844.0, 390.0));
        assert!(!is_rotated_layout(500.0, 500.0));
    }

    proptest! {
        #[test]
        fn points_inside_rect_stay_inside_backing(
            fx in 0.0f64..=1.0,
            fy in 0.0f64..=1.0,
            w in 1.0f64..2000.0,
            h in 1.0f64..2000.0,
            bw in 1u32..4000,
            bh in 1u32..4000,
            rotated in any::<bool>(),
        ) {
            let rect = SurfaceRect::new(5.0, 7.0, w, h);
            let pointer = ViewportPoint::new(5.0 + fx * w, 7.0 + fy * h);
            let p = CoordinateMapper::map(pointer, rect, BackingSize::new(bw, bh), rotated).unwrap();
            let eps = 1e-6;
            prop_assert!(p.x >= -eps && p.x <= f64::from(bw) + eps);
            prop_assert!(p.y >= -eps && p.y <= f64::from(bh) + eps);
        }
    }
}
