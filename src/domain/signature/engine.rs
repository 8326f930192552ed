//! Free-hand signature capture engine.
//!
//! Owns one capture session at a time: sizes the backing raster from the
//! measured container, turns pointer events into ink, and exports the middle
//! band of the surface as a PNG artifact. The top and bottom quarters are
//! guide zones and never end up in the artifact.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::foundation::StateMachine;

use super::artifact::SignatureArtifact;
use super::coordinates::{BackingSize, CanvasPoint, CoordinateMapper};
use super::errors::CaptureError;
use super::layout::{ResizeDebounce, SurfaceLayout};
use super::pointer::{InputFilter, PointerEvent};
use super::status::CaptureStatus;
use super::surface::InkSurface;

/// Tunables for a capture engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSettings {
    pub input_filter: InputFilter,
    /// Stay open after a save, for collecting many signatures in a row.
    pub keep_open: bool,
    /// Stroke width in layout pixels; multiplied by the pixel ratio.
    pub stroke_width: f64,
    pub settle_delay: Duration,
    pub success_flash: Duration,
    pub crop_top_ratio: f64,
    pub crop_height_ratio: f64,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            input_filter: InputFilter::AnyDevice,
            keep_open: false,
            stroke_width: 2.5,
            settle_delay: Duration::from_millis(100),
            success_flash: Duration::from_millis(1500),
            crop_top_ratio: 0.25,
            crop_height_ratio: 0.5,
        }
    }
}

/// What a pointer-down did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Stroke started and the pointer is captured.
    Captured,
    /// Event was filtered out or the surface was not ready.
    Ignored,
}

/// Stateful drawing surface.
#[derive(Debug)]
pub struct SignatureCaptureEngine {
    settings: CaptureSettings,
    status: CaptureStatus,
    has_ink: bool,
    surface: Option<InkSurface>,
    layout: Option<SurfaceLayout>,
    captured_pointer: Option<i64>,
    last_point: Option<CanvasPoint>,
    resize: ResizeDebounce,
    saved_count: u32,
    last_saved_at: Option<Instant>,
}

impl SignatureCaptureEngine {
    pub fn new(settings: CaptureSettings) -> Self {
        Self {
            settings,
            status: CaptureStatus::Closed,
            has_ink: false,
            surface: None,
            layout: None,
            captured_pointer: None,
            last_point: None,
            resize: ResizeDebounce::new(),
            saved_count: 0,
            last_saved_at: None,
        }
    }

    // === Queries ===

    pub fn status(&self) -> CaptureStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    pub fn has_ink(&self) -> bool {
        self.has_ink
    }

    /// Save is enabled only once something has been drawn.
    pub fn can_save(&self) -> bool {
        self.is_open() && self.has_ink
    }

    pub fn settings(&self) -> &CaptureSettings {
        &self.settings
    }

    pub fn backing_size(&self) -> Option<BackingSize> {
        self.surface.as_ref().map(InkSurface::size)
    }

    pub fn surface(&self) -> Option<&InkSurface> {
        self.surface.as_ref()
    }

    pub fn captured_pointer(&self) -> Option<i64> {
        self.captured_pointer
    }

    pub fn is_rotated_layout(&self) -> bool {
        self.layout.map(|l| l.is_rotated()).unwrap_or(false)
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Number of artifacts emitted while staying open.
    pub fn saved_count(&self) -> u32 {
        self.saved_count
    }

    /// Whether the transient "saved" indicator should still be shown.
    pub fn is_success_visible(&self, now: Instant) -> bool {
        self.last_saved_at
            .map(|at| now.saturating_duration_since(at) < self.settings.success_flash)
            .unwrap_or(false)
    }

    pub fn acknowledge_saved(&mut self) {
        self.last_saved_at = None;
    }

    pub fn set_input_filter(&mut self, filter: InputFilter) {
        self.settings.input_filter = filter;
    }

    // === Session lifecycle ===

    /// Opens the surface and sizes the backing raster from `layout`.
    ///
    /// A zero-sized measurement leaves the surface unallocated; the host
    /// should call [`resize`](Self::resize) once layout settles.
    pub fn open(&mut self, layout: SurfaceLayout) -> Result<(), CaptureError> {
        if self.is_open() {
            return Err(CaptureError::AlreadyOpen);
        }
        self.status = self.status.transition_to(CaptureStatus::Idle)?;
        self.has_ink = false;
        self.captured_pointer = None;
        self.last_point = None;
        self.saved_count = 0;
        self.last_saved_at = None;
        self.resize.cancel();
        self.surface = None;
        self.layout = None;
        self.apply_layout(layout);
        Ok(())
    }

    /// Records a new container measurement after a viewport change.
    ///
    /// The reallocation is deferred until [`tick`](Self::tick) observes that
    /// the settle delay has passed, so mid-rotation sizes are never used.
    pub fn resize(&mut self, layout: SurfaceLayout, now: Instant) {
        if !self.is_open() {
            return;
        }
        self.resize.request(layout, now, self.settings.settle_delay);
    }

    /// Applies a settled resize. Returns true if a measurement was applied.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_open() {
            return false;
        }
        match self.resize.poll(now) {
            Some(layout) => {
                self.apply_layout(layout);
                true
            }
            None => false,
        }
    }

    fn apply_layout(&mut self, layout: SurfaceLayout) {
        let Some(size) = layout.backing_size() else {
            debug!("Ignoring zero-sized capture layout");
            return;
        };
        self.layout = Some(layout);

        if self.backing_size() == Some(size) {
            return;
        }
        debug!(width = size.width, height = size.height, "Allocating signature surface");
        // Reallocation starts from a blank raster.
        self.surface = Some(InkSurface::new(size));
        self.has_ink = false;
        self.last_point = None;
    }

    // === Pointer input ===

    fn map(&self, event: &PointerEvent) -> Option<CanvasPoint> {
        let layout = self.layout?;
        let backing = self.backing_size()?;
        CoordinateMapper::map(event.position, layout.bounding_rect, backing, layout.is_rotated())
    }

    pub fn pointer_down(&mut self, event: PointerEvent) -> PointerOutcome {
        if self.status != CaptureStatus::Idle || !self.settings.input_filter.permits(event.device) {
            return PointerOutcome::Ignored;
        }
        let Some(point) = self.map(&event) else {
            return PointerOutcome::Ignored;
        };

        self.status = CaptureStatus::Drawing;
        self.captured_pointer = Some(event.pointer_id);
        self.last_point = Some(point);
        PointerOutcome::Captured
    }

    /// Extends the current stroke. Returns true if ink was laid down.
    pub fn pointer_move(&mut self, event: PointerEvent) -> bool {
        if self.status != CaptureStatus::Drawing
            || self.captured_pointer != Some(event.pointer_id)
            || !self.settings.input_filter.permits(event.device)
        {
            return false;
        }
        let Some(point) = self.map(&event) else {
            return false;
        };
        let width = self.settings.stroke_width
            * self.layout.map(|l| l.pixel_ratio()).unwrap_or(1.0);
        let from = self.last_point.unwrap_or(point);

        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        surface.draw_segment(from, point, width);
        self.last_point = Some(point);
        self.has_ink = true;
        true
    }

    /// Ends the stroke and releases pointer capture. The stroke drawn so
    /// far stays on the surface.
    pub fn pointer_up(&mut self, event: PointerEvent) {
        if self.status == CaptureStatus::Drawing && self.captured_pointer == Some(event.pointer_id) {
            self.end_stroke();
        }
    }

    pub fn pointer_leave(&mut self, event: PointerEvent) {
        self.pointer_up(event);
    }

    fn end_stroke(&mut self) {
        self.status = CaptureStatus::Idle;
        self.captured_pointer = None;
        self.last_point = None;
    }

    // === Commands ===

    /// Erases all ink. No-op while closed.
    pub fn clear(&mut self) {
        if !self.is_open() {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
        self.has_ink = false;
    }

    /// Exports the middle band of the surface.
    ///
    /// Returns `Ok(None)` without touching state when there is no ink. In
    /// keep-open mode the surface is cleared for the next signer; otherwise
    /// the session closes.
    pub fn save(&mut self) -> Result<Option<SignatureArtifact>, CaptureError> {
        if !self.can_save() {
            return Ok(None);
        }
        let Some(surface) = self.surface.as_ref() else {
            return Ok(None);
        };

        let (band, image) =
            surface.crop(self.settings.crop_top_ratio, self.settings.crop_height_ratio);
        let artifact = SignatureArtifact::encode(image, band.offset)?;
        debug!(
            width = artifact.width,
            height = artifact.height,
            bytes = artifact.png.len(),
            "Signature captured"
        );

        if self.settings.keep_open {
            self.end_stroke();
            self.clear();
            self.saved_count += 1;
            self.last_saved_at = Some(Instant::now());
        } else {
            self.close();
        }
        Ok(Some(artifact))
    }

    /// Discards the session without emitting an artifact.
    pub fn cancel(&mut self) {
        if self.is_open() {
            self.close();
        }
    }

    fn close(&mut self) {
        self.status = CaptureStatus::Closed;
        self.has_ink = false;
        self.surface = None;
        self.layout = None;
        self.captured_pointer = None;
        self.last_point = None;
        self.resize.cancel();
    }
}

impl Default for SignatureCaptureEngine {
    fn default() -> Self {
        Self::new(CaptureSettings::default())
    }
}
