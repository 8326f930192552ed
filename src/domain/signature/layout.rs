//! Measured layout of the capture surface and resize debouncing.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::coordinates::{is_rotated_layout, BackingSize, SurfaceRect};

/// Viewport dimensions in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One measurement of the capture container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    /// Rendered bounding rect, post rotation.
    pub bounding_rect: SurfaceRect,
    pub viewport: Viewport,
    pub device_pixel_ratio: f64,
}

impl SurfaceLayout {
    pub fn new(bounding_rect: SurfaceRect, viewport: Viewport, device_pixel_ratio: f64) -> Self {
        Self {
            bounding_rect,
            viewport,
            device_pixel_ratio,
        }
    }

    pub fn is_rotated(&self) -> bool {
        is_rotated_layout(self.viewport.width, self.viewport.height)
    }

    /// Device pixel ratio, falling back to 1.0 for nonsense values.
    pub fn pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }

    /// Backing raster size for this measurement.
    ///
    /// The bounding rect of a rotated element has its axes swapped relative
    /// to the element itself, so they are swapped back before scaling.
    /// Returns `None` for a zero-sized measurement, which happens while an
    /// orientation change is still settling.
    pub fn backing_size(&self) -> Option<BackingSize> {
        if !self.bounding_rect.is_measurable() {
            return None;
        }
        let (w, h) = if self.is_rotated() {
            (self.bounding_rect.height, self.bounding_rect.width)
        } else {
            (self.bounding_rect.width, self.bounding_rect.height)
        };
        let ratio = self.pixel_ratio();
        let size = BackingSize::new((w * ratio).round() as u32, (h * ratio).round() as u32);
        (!size.is_empty()).then_some(size)
    }
}

/// Holds the latest resize request until the layout has settled.
#[derive(Debug, Clone, Default)]
pub struct ResizeDebounce {
    pending: Option<(SurfaceLayout, Instant)>,
}

impl ResizeDebounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a measurement; a newer request replaces an older one and
    /// restarts the delay.
    pub fn request(&mut self, layout: SurfaceLayout, now: Instant, settle: Duration) {
        self.pending = Some((layout, now + settle));
    }

    /// Returns the pending layout once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<SurfaceLayout> {
        match self.pending {
            Some((layout, due)) if now >= due => {
                self.pending = None;
                Some(layout)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
