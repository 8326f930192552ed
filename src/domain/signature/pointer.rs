//! Capability-tagged pointer events and the pen-only input filter.

use serde::{Deserialize, Serialize};

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Pen,
    Touch,
    Mouse,
}

impl DeviceKind {
    /// Maps a DOM-style `pointerType` tag onto a device kind.
    ///
    /// Unknown tags are treated as a mouse, the most permissive guess that
    /// still gets rejected by the pen-only filter.
    pub fn from_pointer_type(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pen" | "stylus" => DeviceKind::Pen,
            "touch" => DeviceKind::Touch,
            _ => DeviceKind::Mouse,
        }
    }
}

/// Which devices may put ink on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFilter {
    #[default]
    AnyDevice,
    PenOnly,
}

impl InputFilter {
    pub fn from_pen_only(pen_only: bool) -> Self {
        if pen_only {
            InputFilter::PenOnly
        } else {
            InputFilter::AnyDevice
        }
    }

    /// Returns true if events from `device` are accepted.
    pub fn permits(self, device: DeviceKind) -> bool {
        match self {
            InputFilter::AnyDevice => true,
            InputFilter::PenOnly => device == DeviceKind::Pen,
        }
    }
}

/// Position in viewport (layout pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportPoint {
    pub x: f64,
    pub y: f64,
}

impl ViewportPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single pointer down/move/up/leave sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Identifies the pointer for the capture handshake.
    pub pointer_id: i64,
    pub position: ViewportPoint,
    pub device: DeviceKind,
}

impl PointerEvent {
    pub fn new(pointer_id: i64, x: f64, y: f64, device: DeviceKind) -> Self {
        Self {
            pointer_id,
            position: ViewportPoint::new(x, y),
            device,
        }
    }

    pub fn pen(x: f64, y: f64) -> Self {
        Self::new(1, x, y, DeviceKind::Pen)
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self::new(2, x, y, DeviceKind::Touch)
    }

    pub fn mouse(x: f64, y: f64) -> Self {
        Self::new(3, x, y, DeviceKind::Mouse)
    }
}
